use std::time::Duration;

use domtest_browser::{BrowserError, ElementHandle, Locator};

use super::*;
use crate::test_support::{MockElement, MockPage};

fn resolver() -> SelectorResolver {
    SelectorResolver::new(Duration::from_secs(10), Duration::from_millis(250))
}

fn user_field() -> ElementHandle {
    ElementHandle::new("user", "input").with_input_type("text")
}

#[tokio::test(start_paused = true)]
async fn test_resolves_present_element() {
    let page = MockPage::new().with(MockElement::top(Locator::Id("user".into()), user_field()));

    let found = resolver().resolve(&page, "id", "user").await.unwrap();
    assert_eq!(found.tag_name(), "input");
    assert_eq!(found.input_type(), Some("text"));
    assert!(!found.in_iframe());
    assert!(!page.in_frame());
}

#[tokio::test(start_paused = true)]
async fn test_invalid_selector_makes_no_lookups() {
    let page = MockPage::new();

    let err = resolver().resolve(&page, "label", "Submit").await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidSelector(ref s) if s == "label"));
    assert_eq!(page.probes(&Locator::TagName("label".into())), 0);
    assert!(page.actions().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_data_testid_uses_css_attribute() {
    let locator = Locator::Css(r#"[data-testid="login-button"]"#.into());
    let page = MockPage::new().with(MockElement::top(locator.clone(), ElementHandle::new("login", "button")));

    let found = resolver().resolve(&page, "data-testid", "login-button").await.unwrap();
    assert_eq!(found.locator(), &locator);
}

#[tokio::test(start_paused = true)]
async fn test_waits_for_late_element() {
    let page = MockPage::new()
        .with(MockElement::top(Locator::Id("user".into()), user_field()).appears_after(3));

    let start = tokio::time::Instant::now();
    let found = resolver().resolve(&page, "id", "user").await.unwrap();
    assert_eq!(found.handle().object_id, "user");
    assert_eq!(start.elapsed(), Duration::from_millis(750));
}

#[tokio::test(start_paused = true)]
async fn test_times_out_at_deadline() {
    let page = MockPage::new();

    let start = tokio::time::Instant::now();
    let err = resolver().resolve(&page, "id", "user").await.unwrap_err();
    assert_eq!(start.elapsed(), Duration::from_secs(10));

    assert!(err.to_string().contains("not found"));
    match err {
        EngineError::ElementNotFound {
            selector_type,
            value,
            waited,
        } => {
            assert_eq!(selector_type, "id");
            assert_eq!(value, "user");
            assert_eq!(waited, Duration::from_secs(10));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // One probe at t=0 plus one per 250ms interval.
    assert_eq!(page.probes(&Locator::Id("user".into())), 41);
    assert!(!page.in_frame());
}

#[tokio::test(start_paused = true)]
async fn test_zero_wait_probes_once() {
    let page = MockPage::new();
    let resolver = SelectorResolver::new(Duration::ZERO, Duration::from_millis(250));

    assert!(resolver.resolve(&page, "css", "#user").await.is_err());
    assert_eq!(page.probes(&Locator::Css("#user".into())), 1);
}

#[tokio::test(start_paused = true)]
async fn test_iframe_match_takes_precedence() {
    let locator = Locator::Id("user".into());
    let page = MockPage::new()
        .with_iframe()
        .with(MockElement::top(locator.clone(), ElementHandle::new("outer", "input")))
        .with(MockElement::in_iframe(locator.clone(), ElementHandle::new("inner", "input")));

    let found = resolver().resolve(&page, "id", "user").await.unwrap();
    assert_eq!(found.handle().object_id, "inner");
    assert!(found.in_iframe());
    assert!(!page.in_frame());
}

#[tokio::test(start_paused = true)]
async fn test_falls_back_to_top_level_when_iframe_lacks_match() {
    let page = MockPage::new()
        .with_iframe()
        .with(MockElement::top(Locator::Id("user".into()), ElementHandle::new("outer", "input")));

    let found = resolver().resolve(&page, "id", "user").await.unwrap();
    assert_eq!(found.handle().object_id, "outer");
    assert!(!found.in_iframe());
    assert!(!page.in_frame());
}

#[tokio::test(start_paused = true)]
async fn test_context_restored_on_timeout_inside_iframe() {
    let page = MockPage::new().with_iframe();
    let resolver = SelectorResolver::new(Duration::from_secs(1), Duration::from_millis(250));

    assert!(resolver.resolve(&page, "xpath", "//input").await.is_err());
    assert!(!page.in_frame());
}

#[tokio::test(start_paused = true)]
async fn test_context_restored_on_lookup_error() {
    let locator = Locator::Css("#bad[".into());
    let page = MockPage::new().with_iframe().fail_lookup(&locator);

    let err = resolver().resolve(&page, "css", "#bad[").await.unwrap_err();
    assert!(matches!(err, EngineError::Browser(BrowserError::Script(_))));
    assert!(!page.in_frame());
}
