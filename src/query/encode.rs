//! Query string encoding.
//!
//! Pairs are serialized `application/x-www-form-urlencoded` style, then
//! escaped commas are restored so `rect=0,0,750,750` stays readable.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use core::fmt::Display;

use form_urlencoded::Serializer;

/// Encode key/value pairs as a query string, sorted by key.
///
/// The output does not depend on input order. A key given twice keeps its
/// last value.
pub fn encode_query<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Display,
{
    let sorted: BTreeMap<String, String> = pairs
        .into_iter()
        .map(|(k, v)| (String::from(k.as_ref()), v.to_string()))
        .collect();

    let encoded = Serializer::new(String::new())
        .extend_pairs(&sorted)
        .finish();
    // A literal '%' is itself escaped, so every `%2C` left here was a comma.
    encoded.replace("%2C", ",")
}
