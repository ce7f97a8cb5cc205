//! Requests and policies loaded from JSON configuration.

#![cfg(feature = "serde")]

use imgurl::query::{Flip, OutputFormat};
use imgurl::{Crop, FitMode, ImageRequest, Passthrough, SrcSetPolicy, UrlBuilder};

#[test]
fn request_from_json() {
    let request: ImageRequest = serde_json::from_str(
        r#"{
            "mode": "cover",
            "width": 300,
            "height": 500,
            "crop": { "top": 0.0, "left": 0.0, "right": 0.25, "bottom": 0.25 },
            "passthrough": { "flip": "hv", "fm": "webp" }
        }"#,
    )
    .unwrap();

    assert_eq!(
        request,
        ImageRequest::new()
            .mode(FitMode::Cover)
            .width(300)
            .height(500)
            .crop(Crop::new(0.0, 0.0, 0.25, 0.25))
            .passthrough(Passthrough {
                flip: Some(Flip::Hv),
                fm: Some(OutputFormat::Webp),
                ..Passthrough::default()
            })
    );

    let src = UrlBuilder::new("/i/")
        .unwrap()
        .src("image-abc-1000x1000-jpg", &request)
        .unwrap();
    assert_eq!(
        src.src,
        "/i/abc-1000x1000.jpg?crop=entropy&fit=crop&flip=hv&fm=webp&h=500&q=75&rect=0,0,750,750&w=300"
    );
}

#[test]
fn empty_request_is_default() {
    let request: ImageRequest = serde_json::from_str("{}").unwrap();
    assert_eq!(request, ImageRequest::new());
}

#[test]
fn partial_policy_keeps_default_tiers() {
    let policy: SrcSetPolicy = serde_json::from_str(r#"{ "min_variant_width": 120 }"#).unwrap();
    assert_eq!(policy.min_variant_width, 120);
    assert_eq!(policy.tiers, SrcSetPolicy::default().tiers);
}

#[test]
fn policy_round_trips() {
    let policy = SrcSetPolicy::default();
    let json = serde_json::to_string(&policy).unwrap();
    let back: SrcSetPolicy = serde_json::from_str(&json).unwrap();
    assert_eq!(back, policy);
}
