//! TOML loading with environment substitution.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// Reads `domtest.toml`, substituting `${VAR}` from the environment and
/// expanding `~` in path settings.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => Self::load_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ConfigError::NotFound(path.display().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Missing file means all defaults; any other failure is reported.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }

    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let mut config: Config = toml::from_str(&expanded)?;
        if let Some(dir) = config.browser.profile_dir.take() {
            config.browser.profile_dir = Some(Self::expand_path(&dir));
        }
        Ok(config)
    }

    /// Substitute `${VAR}` references outside comment lines. The first unset
    /// variable aborts the load.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        content
            .lines()
            .map(|line| {
                if line.trim_start().starts_with('#') {
                    return Ok(line.to_string());
                }
                let mut missing = None;
                let expanded = ENV_VAR.replace_all(line, |cap: &regex::Captures<'_>| {
                    std::env::var(&cap[1]).unwrap_or_else(|_| {
                        missing.get_or_insert_with(|| cap[1].to_string());
                        String::new()
                    })
                });
                match missing {
                    Some(var) => Err(ConfigError::EnvVarNotSet(var)),
                    None => Ok(expanded.into_owned()),
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|lines| lines.join("\n"))
    }

    /// `~/x` to an absolute path.
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::UnclassifiedPolicy;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.timing.element_wait_ms, 10_000);
        assert!(config.target.url.is_none());
    }

    #[test]
    fn test_load_target_and_timing() {
        let content = r#"
            [target]
            url = "https://example.com/login"

            [timing]
            element_wait_ms = 2000
            step_settle_ms = 100
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.target.url.as_deref(), Some("https://example.com/login"));
        assert_eq!(config.timing.element_wait_ms, 2000);
        assert_eq!(config.timing.step_settle_ms, 100);
        assert_eq!(config.timing.initial_settle_ms, 1000);
    }

    #[test]
    fn test_load_full_config() {
        let content = r##"
            [target]
            url = "http://localhost:3000"

            [browser]
            debug_port = 9333
            headless = true

            [credentials]
            password_env = "LOGIN_SECRET"

            [validation]
            unclassified = "pass"
            success_selectors = [".toast-ok"]

            [[validation.matchers]]
            keyword = "redirect"
            selectors = ["#home"]

            [report]
            output = "out/report.json"
            screenshot_on_failure = true
        "##;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.browser.debug_port, 9333);
        assert!(config.browser.headless);
        assert_eq!(config.credentials.password_env, "LOGIN_SECRET");
        assert_eq!(config.validation.unclassified, UnclassifiedPolicy::Pass);
        assert_eq!(config.validation.success_selectors, vec![".toast-ok"]);
        assert_eq!(config.validation.matchers[0].keyword, "redirect");
        assert_eq!(config.validation.matchers[0].selectors, vec!["#home"]);
        assert!(config.report.screenshot_on_failure);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[browser]").unwrap();
        writeln!(file, "debug_port = 9444").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.browser.debug_port, 9444);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/domtest.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_nonexistent_file() {
        let config = ConfigLoader::load_or_default(Path::new("/nonexistent/domtest.toml")).unwrap();
        assert_eq!(config.browser.debug_port, 9222);
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test runs in isolation and sets a unique test-only env var
        unsafe {
            std::env::set_var("DOMTEST_CONFIG_TEST_URL", "https://app.test");
        }
        let content = "[target]\nurl = \"${DOMTEST_CONFIG_TEST_URL}/login\"";
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.target.url.as_deref(), Some("https://app.test/login"));
        unsafe {
            std::env::remove_var("DOMTEST_CONFIG_TEST_URL");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${NONEXISTENT_DOMTEST_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(ref v)) if v == "NONEXISTENT_DOMTEST_VAR_12345"));
    }

    #[test]
    fn test_expand_env_vars_skips_comments() {
        let content = "# url = \"${NONEXISTENT_DOMTEST_VAR_12345}\"\nvalue = 1";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert_eq!(expanded, content);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = ConfigLoader::expand_path("~/profile");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("/profile"));
    }

    #[test]
    fn test_profile_dir_is_expanded() {
        let config = ConfigLoader::load_str("[browser]\nprofile_dir = \"~/.domtest/p\"").unwrap();
        let dir = config.browser.profile_dir.unwrap();
        assert!(!dir.starts_with('~'));
        assert!(dir.ends_with(".domtest/p"));
    }

    #[test]
    fn test_example_config_is_valid() {
        let config = ConfigLoader::load_str(include_str!("../../../domtest.example.toml")).unwrap();
        assert!(config.browser.headless);
        assert_eq!(config.validation.matchers.len(), 1);
        let result = crate::ConfigValidator::validate(&config).unwrap();
        assert!(result.is_valid(), "{:?}", result.errors);
    }
}
