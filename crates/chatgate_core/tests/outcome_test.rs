//! Tests for the outcome-to-response mapping.

use chatgate_core::{Outcome, OutcomeBody, StatusCategory};
use std::time::Duration;
use strum::IntoEnumIterator;

#[test]
fn test_status_table() {
    let cases = [
        (Outcome::Success("hi".into()), 200),
        (Outcome::AuthRejected, 401),
        (Outcome::InvalidInput("empty".into()), 400),
        (
            Outcome::RateLimited {
                retry_after: Duration::from_secs(8),
            },
            429,
        ),
        (Outcome::ProviderThrottled, 503),
        (Outcome::ProviderError("boom".into()), 500),
        (Outcome::Cancelled, 499),
    ];

    for (outcome, code) in cases {
        assert_eq!(outcome.status().code(), code, "{}", outcome.label());
    }
}

#[test]
fn test_retry_after_rounds_up() {
    let exact = Outcome::RateLimited {
        retry_after: Duration::from_secs(8),
    };
    assert_eq!(exact.retry_after_secs(), Some(8));

    let fractional = Outcome::RateLimited {
        retry_after: Duration::from_millis(1),
    };
    assert_eq!(fractional.retry_after_secs(), Some(1));
}

#[test]
fn test_provider_error_detail_not_exposed() {
    let outcome = Outcome::ProviderError("secret upstream detail".into());
    let body = serde_json::to_string(&outcome.body()).unwrap();
    assert!(!body.contains("secret upstream detail"));
    assert!(body.starts_with("{\"error\":"));
}

#[test]
fn test_success_body() {
    let body = Outcome::Success("Hi there".into()).body();
    assert_eq!(
        body,
        OutcomeBody::Response {
            response: "Hi there".into()
        }
    );
    assert_eq!(
        serde_json::to_string(&body).unwrap(),
        r#"{"response":"Hi there"}"#
    );
}

#[test]
fn test_status_codes_are_distinct() {
    let mut codes: Vec<u16> = StatusCategory::iter().map(StatusCategory::code).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), StatusCategory::iter().count());
}

#[test]
fn test_labels() {
    assert_eq!(Outcome::ProviderThrottled.label(), "provider_throttled");
    assert_eq!(
        Outcome::RateLimited {
            retry_after: Duration::from_secs(1)
        }
        .label(),
        "rate_limited"
    );
}
