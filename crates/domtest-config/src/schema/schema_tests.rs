use super::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(config.target.url.is_none());
    assert_eq!(config.browser.debug_port, 9222);
    assert_eq!(config.credentials.password_env, "TEST_PASSWORD");
    assert_eq!(config.validation.unclassified, UnclassifiedPolicy::Fail);
}

#[test]
fn test_timing_defaults() {
    let timing = TimingConfig::default();
    assert_eq!(timing.element_wait(), std::time::Duration::from_secs(10));
    assert_eq!(timing.initial_settle(), std::time::Duration::from_secs(1));
    assert_eq!(timing.step_settle(), std::time::Duration::from_millis(500));
    assert!(timing.poll_interval() < timing.element_wait());
}

#[test]
fn test_browser_config_default() {
    let browser = BrowserConfig::default();
    assert!(!browser.headless);
    assert!(browser.profile_dir.is_none());
    assert_eq!(browser.command_timeout_secs, 30);
    assert_eq!(browser.viewport_width, 1280);
    assert_eq!(browser.viewport_height, 720);
}

#[test]
fn test_default_indicator_selectors_order() {
    let validation = ValidationConfig::default();
    assert_eq!(validation.error_selectors.len(), 6);
    assert_eq!(validation.error_selectors[0], ".error-message");
    assert_eq!(validation.error_selectors[2], "[role=\"alert\"]");
    assert_eq!(validation.success_selectors[1], ".alert-success");
    assert!(validation.matchers.is_empty());
}

#[test]
fn test_report_config_default() {
    let report = ReportConfig::default();
    assert_eq!(report.output, PathBuf::from("domtest-report.json"));
    assert!(!report.screenshot_on_failure);
}

#[test]
fn test_target_url_missing() {
    let config = Config::default();
    let err = config.target_url().unwrap_err();
    assert!(matches!(err, ConfigError::MissingField(ref f) if f == "target.url"));
}

#[test]
fn test_target_url_invalid() {
    let mut config = Config::default();
    config.target.url = Some("not a url".to_string());
    assert!(matches!(
        config.target_url(),
        Err(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn test_target_url_parsed() {
    let mut config = Config::default();
    config.target.url = Some("https://example.com/login".to_string());
    let url = config.target_url().unwrap();
    assert_eq!(url.host_str(), Some("example.com"));
    assert_eq!(url.path(), "/login");
}

#[test]
fn test_unclassified_policy_serde() {
    let policy: UnclassifiedPolicy = toml::from_str::<ValidationConfig>("unclassified = \"pass\"")
        .unwrap()
        .unclassified;
    assert_eq!(policy, UnclassifiedPolicy::Pass);
}

#[test]
fn test_matchers_deserialize() {
    let content = r##"
        [[matchers]]
        keyword = "dashboard"
        selectors = ["#dashboard", ".welcome"]
    "##;
    let validation: ValidationConfig = toml::from_str(content).unwrap();
    assert_eq!(validation.matchers.len(), 1);
    assert_eq!(validation.matchers[0].keyword, "dashboard");
    assert_eq!(validation.matchers[0].selectors, vec!["#dashboard", ".welcome"]);
    // Unspecified lists keep their defaults.
    assert_eq!(validation.error_selectors, default_error_selectors());
}
