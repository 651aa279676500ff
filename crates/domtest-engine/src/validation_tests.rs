use domtest_browser::{ElementHandle, Locator};
use domtest_config::MatcherConfig;

use super::*;
use crate::test_support::{MockElement, MockPage};

fn css(selector: &str) -> Locator {
    Locator::Css(selector.to_string())
}

fn engine() -> ValidationEngine {
    ValidationEngine::new(ValidationConfig::default())
}

fn with_dashboard_matcher(policy: UnclassifiedPolicy) -> ValidationEngine {
    ValidationEngine::new(ValidationConfig {
        unclassified: policy,
        matchers: vec![MatcherConfig {
            keyword: "Dashboard".to_string(),
            selectors: vec!["#dashboard".to_string(), ".welcome".to_string()],
        }],
        ..ValidationConfig::default()
    })
}

#[test]
fn test_classification_order() {
    let engine = with_dashboard_matcher(UnclassifiedPolicy::Fail);

    assert_eq!(engine.classify("An ERROR MESSAGE is shown"), ExpectationKind::ErrorMessage);
    assert_eq!(engine.classify("Login succeeds with success banner"), ExpectationKind::Success);
    // "error message" wins over "success".
    assert_eq!(
        engine.classify("error message instead of success"),
        ExpectationKind::ErrorMessage
    );
    assert_eq!(engine.classify("User lands on the dashboard"), ExpectationKind::Custom(0));
    assert_eq!(engine.classify("Page title changes"), ExpectationKind::Unclassified);
}

#[tokio::test]
async fn test_success_indicator_visible() {
    let page = MockPage::new().with(MockElement::top(
        css(".alert-success"),
        ElementHandle::new("ok", "div"),
    ));

    let expectations = vec!["Success message is displayed".to_string()];
    engine().validate(&page, &expectations).await.unwrap();
}

#[tokio::test]
async fn test_hidden_match_falls_through_to_next_selector() {
    let page = MockPage::new()
        .with(MockElement::top(css(".error-message"), ElementHandle::new("e1", "div")).hidden())
        .with(MockElement::top(css("span.error"), ElementHandle::new("e2", "span")));

    let expectations = vec!["error message appears".to_string()];
    engine().validate(&page, &expectations).await.unwrap();
}

#[tokio::test]
async fn test_only_hidden_matches_fail() {
    let page = MockPage::new()
        .with(MockElement::top(css(".error-message"), ElementHandle::new("e1", "div")).hidden());

    let expectations = vec!["error message appears".to_string()];
    let err = engine().validate(&page, &expectations).await.unwrap_err();
    match err {
        EngineError::ValidationFailed { expectation, reason } => {
            assert_eq!(expectation, "error message appears");
            assert_eq!(reason, "Expected error message not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_probes_each_selector_once_in_order() {
    let page = MockPage::new();
    let expectations = vec!["success".to_string()];

    assert!(engine().validate(&page, &expectations).await.is_err());
    for selector in domtest_config::default_success_selectors() {
        assert_eq!(page.probes(&css(&selector)), 1, "{}", selector);
    }
}

#[tokio::test]
async fn test_indicators_only_checked_at_top_level() {
    let page = MockPage::new()
        .with_iframe()
        .with(MockElement::in_iframe(css(".alert-success"), ElementHandle::new("ok", "div")));

    let expectations = vec!["success".to_string()];
    assert!(engine().validate(&page, &expectations).await.is_err());
}

#[tokio::test]
async fn test_fail_fast_in_order() {
    let page = MockPage::new().with(MockElement::top(
        css(".alert-success"),
        ElementHandle::new("ok", "div"),
    ));
    let expectations = vec![
        "error message is shown".to_string(),
        "success".to_string(),
    ];

    let err = engine().validate(&page, &expectations).await.unwrap_err();
    assert!(err.to_string().contains("error message is shown"));
    // The second expectation was never probed.
    assert_eq!(page.probes(&css(".alert-success")), 0);
}

#[tokio::test]
async fn test_unclassified_fails_by_default() {
    let page = MockPage::new();
    let expectations = vec!["Page title changes".to_string()];

    let err = engine().validate(&page, &expectations).await.unwrap_err();
    assert!(matches!(err, EngineError::UnclassifiedExpectation(ref e) if e == "Page title changes"));
}

#[tokio::test]
async fn test_unclassified_pass_policy_skips() {
    let page = MockPage::new();
    let engine = with_dashboard_matcher(UnclassifiedPolicy::Pass);
    let expectations = vec!["Page title changes".to_string()];

    engine.validate(&page, &expectations).await.unwrap();
}

#[tokio::test]
async fn test_operator_matcher() {
    let engine = with_dashboard_matcher(UnclassifiedPolicy::Fail);
    let expectations = vec!["User sees the dashboard".to_string()];

    let empty = MockPage::new();
    let err = engine.validate(&empty, &expectations).await.unwrap_err();
    assert!(err.to_string().contains("None of the matcher selectors is visible"));

    let page = MockPage::new().with(MockElement::top(css(".welcome"), ElementHandle::new("w", "h1")));
    engine.validate(&page, &expectations).await.unwrap();
}

#[tokio::test]
async fn test_empty_expectations_pass() {
    engine().validate(&MockPage::new(), &[]).await.unwrap();
}
