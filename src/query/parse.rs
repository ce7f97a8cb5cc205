//! Passthrough key dispatch and value parsers.

use alloc::string::String;
use alloc::vec::Vec;

use super::{Flip, OutputFormat, ParseWarning, Passthrough};

/// Keys computed by the resolver. Sorted for binary search.
const RESERVED_KEYS: &[&str] = &[
    "auto", "crop", "fit", "fp-x", "fp-y", "h", "metadata", "rect", "w",
];

/// Parse a query string into passthrough params + warnings.
pub(crate) fn parse_query(query: &str) -> (Passthrough, Vec<ParseWarning>) {
    let mut params = Passthrough::default();
    let mut warnings = Vec::new();

    let query = query.strip_prefix('?').unwrap_or(query);
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        dispatch_key(&key.to_ascii_lowercase(), &value, &mut params, &mut warnings);
    }

    (params, warnings)
}

fn dispatch_key(
    key: &str,
    value: &str,
    params: &mut Passthrough,
    warnings: &mut Vec<ParseWarning>,
) {
    match key {
        "blur" => {
            let parsed = parse_in_range(value, 1, 2000).map(|v| v as u32);
            set_or_warn(&mut params.blur, parsed, "blur", value, "expected 1-2000", warnings);
        }
        "flip" => {
            set_or_warn(
                &mut params.flip,
                parse_flip(value),
                "flip",
                value,
                "expected h|v|hv",
                warnings,
            );
        }
        "fm" => {
            set_or_warn(
                &mut params.fm,
                parse_format(value),
                "fm",
                value,
                "expected jpg|pjpg|png|webp",
                warnings,
            );
        }
        "q" => {
            let parsed = parse_in_range(value, 0, 100).map(|v| v as u8);
            set_or_warn(&mut params.q, parsed, "q", value, "expected 0-100", warnings);
        }
        "sat" => {
            let parsed = parse_in_range(value, -100, -100).map(|v| v as i32);
            set_or_warn(&mut params.sat, parsed, "sat", value, "expected -100", warnings);
        }
        "sharpen" => {
            let parsed = parse_in_range(value, 0, 100).map(|v| v as u8);
            set_or_warn(
                &mut params.sharpen,
                parsed,
                "sharpen",
                value,
                "expected 0-100",
                warnings,
            );
        }
        _ => {
            let warning = if RESERVED_KEYS.binary_search(&key).is_ok() {
                ParseWarning::KeyReserved {
                    key: String::from(key),
                    value: String::from(value),
                }
            } else {
                ParseWarning::KeyNotRecognized {
                    key: String::from(key),
                    value: String::from(value),
                }
            };
            warnings.push(warning);
        }
    }
}

/// Set a field, warning on duplicate or unparseable values.
fn set_or_warn<T>(
    field: &mut Option<T>,
    parsed: Option<T>,
    key: &'static str,
    value: &str,
    reason: &'static str,
    warnings: &mut Vec<ParseWarning>,
) {
    match parsed {
        Some(v) => {
            if field.is_some() {
                warnings.push(ParseWarning::DuplicateKey {
                    key: String::from(key),
                    value: String::from(value),
                });
            }
            *field = Some(v);
        }
        None => warnings.push(ParseWarning::ValueInvalid {
            key,
            value: String::from(value),
            reason,
        }),
    }
}

// ---- Value parsers ----

fn parse_in_range(s: &str, min: i64, max: i64) -> Option<i64> {
    s.trim()
        .parse::<i64>()
        .ok()
        .filter(|v| (min..=max).contains(v))
}

fn parse_flip(s: &str) -> Option<Flip> {
    match s.trim().to_ascii_lowercase().as_str() {
        "h" => Some(Flip::H),
        "v" => Some(Flip::V),
        "hv" | "vh" => Some(Flip::Hv),
        _ => None,
    }
}

fn parse_format(s: &str) -> Option<OutputFormat> {
    match s.trim().to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some(OutputFormat::Jpg),
        "pjpg" => Some(OutputFormat::Pjpg),
        "png" => Some(OutputFormat::Png),
        "webp" => Some(OutputFormat::Webp),
        _ => None,
    }
}
