//! Property-based testing for target parsing.
//!
//! Uses proptest to generate arbitrary inputs and verify classification
//! invariants: http(s) inputs are URLs, path-like inputs are local files,
//! and parsing never panics.

use proptest::prelude::*;
use visprobe::Target;

/// Strategy for generating plausible host names
fn arb_host() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,20}\\.[a-z]{2,6}"
}

/// Strategy for generating URL path segments
///
/// Dots are excluded so generated paths survive URL normalization
/// (`..` segments would be collapsed by the parser).
fn arb_path_segment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,20}"
}

/// Strategy for generating relative file paths
fn arb_relative_path() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_path_segment(), 1..4).prop_map(|segments| segments.join("/"))
}

proptest! {
    #[test]
    fn http_targets_classify_as_urls(host in arb_host(), path in arb_path_segment()) {
        let input = format!("http://{}/{}", host, path);
        let target = Target::parse(&input).unwrap();
        prop_assert!(matches!(target, Target::Url(_)));
        prop_assert!(!target.is_local());
    }

    #[test]
    fn https_targets_classify_as_urls(host in arb_host()) {
        let input = format!("https://{}", host);
        let target = Target::parse(&input).unwrap();
        prop_assert!(matches!(target, Target::Url(_)));
    }

    #[test]
    fn relative_paths_classify_as_local(path in arb_relative_path()) {
        let target = Target::parse(&path).unwrap();
        prop_assert!(target.is_local());
        prop_assert_eq!(target.as_path().unwrap().to_str().unwrap(), path.as_str());
    }

    #[test]
    fn absolute_paths_classify_as_local(path in arb_relative_path()) {
        let input = format!("/{}", path);
        let target = Target::parse(&input).unwrap();
        prop_assert!(target.is_local());
    }

    #[test]
    fn file_urls_classify_as_local(path in arb_relative_path()) {
        let input = format!("file:///{}", path);
        let target = Target::parse(&input).unwrap();
        prop_assert!(target.is_local());
    }

    #[test]
    fn unsupported_schemes_are_rejected(scheme in "[a-eg-z]{3,6}", host in arb_host()) {
        // Any non-http(s)/file scheme must be an error, not a local path.
        prop_assume!(scheme != "http" && scheme != "https" && scheme != "file");
        let input = format!("{}://{}", scheme, host);
        prop_assert!(Target::parse(&input).is_err());
    }

    #[test]
    fn parsing_never_panics(input in ".{0,100}") {
        let _ = Target::parse(&input);
    }

    #[test]
    fn url_targets_roundtrip_through_resolve(host in arb_host(), path in arb_path_segment()) {
        let input = format!("https://{}/{}", host, path);
        let target = Target::parse(&input).unwrap();
        let url = target.resolve().unwrap();
        prop_assert_eq!(url.as_str(), input.as_str());
    }
}
