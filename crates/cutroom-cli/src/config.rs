//! CLI runtime configuration.

use std::path::PathBuf;

use cutroom_models::MarketingIntent;

/// Runtime settings read from the environment. Command-line flags win.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// Directory edited shot lists and notes are written to
    pub out_dir: PathBuf,
    /// Preset applied when `--intent` is not given
    pub intent: MarketingIntent,
    /// Brand pacing aggressiveness (0..1); no bias when unset
    pub pacing: Option<f64>,
    /// Write director's notes next to each edited list
    pub write_notes: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("cutroom-out"),
            intent: MarketingIntent::SocialReel,
            pacing: None,
            write_notes: false,
        }
    }
}

impl CliConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from any key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            out_dir: lookup("CUTROOM_OUT_DIR")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.out_dir),
            intent: lookup("CUTROOM_INTENT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.intent),
            pacing: lookup("CUTROOM_PACING")
                .and_then(|s| s.parse::<f64>().ok())
                .filter(|p| (0.0..=1.0).contains(p)),
            write_notes: lookup("CUTROOM_WRITE_NOTES")
                .map(|s| matches!(s.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.write_notes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = CliConfig::from_lookup(lookup(&[]));
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = CliConfig::from_lookup(lookup(&[
            ("CUTROOM_OUT_DIR", "/tmp/edits"),
            ("CUTROOM_INTENT", "paid_ad"),
            ("CUTROOM_PACING", "0.75"),
            ("CUTROOM_WRITE_NOTES", "true"),
        ]));

        assert_eq!(config.out_dir, PathBuf::from("/tmp/edits"));
        assert_eq!(config.intent, MarketingIntent::PaidAd);
        assert_eq!(config.pacing, Some(0.75));
        assert!(config.write_notes);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = CliConfig::from_lookup(lookup(&[
            ("CUTROOM_INTENT", "billboard"),
            ("CUTROOM_PACING", "1.5"),
            ("CUTROOM_WRITE_NOTES", "maybe"),
        ]));

        assert_eq!(config.intent, MarketingIntent::SocialReel);
        assert_eq!(config.pacing, None);
        assert!(!config.write_notes);
    }
}
