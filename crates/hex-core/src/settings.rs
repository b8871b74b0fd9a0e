//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`
//!
//! Settings are read-only once initialised. The engine takes its own copy at
//! construction, so tests can run with custom values side by side.

use std::sync::OnceLock;
use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        // A custom TOML is validated in `init_custom`, and the embedded
        // default is covered by `parse_default_toml`.
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub ranking: RankingSettings,
    pub macros: MacroSettings,
    pub corpus: CorpusSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingSettings {
    pub usage_boost: u64,
    pub scan_cap: usize,
    pub max_limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MacroSettings {
    pub slots: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorpusSettings {
    pub base_file: String,
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub supplementary: Vec<String>,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_fetch_timeout_secs() -> u64 {
    60
}

impl CorpusSettings {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn invalid(field: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// A bare file name: non-empty, no directory components.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Range and file-name checks applied by [`parse_settings_toml`]. Also for
/// `Settings` values built in code.
pub fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(invalid(
                    concat!(stringify!($section), ".", stringify!($field)),
                    "must be positive",
                ));
            }
        };
    }

    check_positive!(ranking.usage_boost);
    check_positive!(ranking.scan_cap);
    check_positive!(ranking.max_limit);
    check_positive!(macros.slots);
    check_positive!(corpus.fetch_timeout_secs);

    if !is_plain_file_name(&s.corpus.base_file) {
        return Err(invalid("corpus.base_file", "must be a plain file name"));
    }
    for (i, name) in s.corpus.supplementary.iter().enumerate() {
        if !is_plain_file_name(name) {
            return Err(invalid(
                &format!("corpus.supplementary[{i}]"),
                "must be a plain file name",
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUSTOM: &str = r#"
[ranking]
usage_boost = 50
scan_cap = 100
max_limit = 5

[macros]
slots = 3

[corpus]
base_file = "base.txt"
"#;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.ranking.usage_boost, 1000);
        assert_eq!(s.ranking.scan_cap, 5000);
        assert_eq!(s.ranking.max_limit, 10);
        assert_eq!(s.macros.slots, 7);
        assert_eq!(s.corpus.base_file, "words.txt");
        assert!(s.corpus.base_url.starts_with("https://"));
        assert_eq!(s.corpus.supplementary.len(), 3);
        assert_eq!(s.corpus.fetch_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn parse_valid_custom_toml() {
        let s = parse_settings_toml(CUSTOM).unwrap();
        assert_eq!(s.ranking.usage_boost, 50);
        assert_eq!(s.macros.slots, 3);
        assert!(s.corpus.base_url.is_empty());
        assert!(s.corpus.supplementary.is_empty());
        assert_eq!(s.corpus.fetch_timeout_secs, 60);
    }

    #[test]
    fn error_zero_fetch_timeout() {
        let toml = format!("{CUSTOM}fetch_timeout_secs = 0\n");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("corpus.fetch_timeout_secs"));
    }

    #[test]
    fn error_zero_boost() {
        let toml = CUSTOM.replace("usage_boost = 50", "usage_boost = 0");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("ranking.usage_boost"));
    }

    #[test]
    fn error_zero_slots() {
        let toml = CUSTOM.replace("slots = 3", "slots = 0");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("macros.slots"));
    }

    #[test]
    fn error_path_in_file_name() {
        let toml = CUSTOM.replace("\"base.txt\"", "\"../etc/passwd\"");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("corpus.base_file"));

        let toml = format!("{CUSTOM}supplementary = [\"ok.txt\", \"a/b.txt\"]\n");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("corpus.supplementary[1]"));
    }

    #[test]
    fn error_negative_value() {
        let toml = CUSTOM.replace("scan_cap = 100", "scan_cap = -1");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let toml = r#"
[ranking]
usage_boost = 1000
scan_cap = 5000
max_limit = 10
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
