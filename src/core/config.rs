//! # Reminder Suite Configuration
//!
//! YAML-based configuration for the rally and personal timer features.
//! The hosting server integration loads it once at startup and hands it to
//! the feature constructors; it is never reloaded at runtime.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Countdown section for the personal timer feature
//! - 1.0.0: Initial schema with rally and notifier sections

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Canonical arm command; always routed to the rally feature even when the
/// configured alias list omits it.
pub const RALLY_COMMAND: &str = "rally";

/// Root configuration for all reminder features
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Rally spawn reminder settings
    #[serde(default)]
    pub rally: RallyConfig,

    /// Personal one-shot timer settings
    #[serde(default)]
    pub countdown: CountdownConfig,

    /// Delivery settings shared by all features
    #[serde(default)]
    pub notifier: NotifierConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section, including cross-section alias uniqueness
    ///
    /// Each command name may belong to exactly one alias family; a name in
    /// two families would make dispatch ambiguous.
    pub fn validate(&self) -> Result<()> {
        self.rally.validate()?;
        self.countdown.validate()?;
        self.notifier.validate()?;

        let mut seen: HashSet<&str> = HashSet::new();
        let families = self
            .rally
            .start_aliases
            .iter()
            .chain(self.rally.stop_aliases.iter())
            .chain(self.rally.pause_aliases.iter())
            .chain(self.countdown.aliases.iter());
        for alias in families {
            if !seen.insert(alias.as_str()) {
                return Err(anyhow::anyhow!(
                    "Command alias appears in more than one family: {}",
                    alias
                ));
            }
        }
        Ok(())
    }
}

/// Rally spawn reminder settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RallyConfig {
    /// Aliases that arm a reminder; "rally" is always accepted on top
    #[serde(default = "default_start_aliases")]
    pub start_aliases: Vec<String>,

    /// Aliases that stop the reminder
    #[serde(default = "default_stop_aliases")]
    pub stop_aliases: Vec<String>,

    /// Aliases that pause or resume the reminder
    #[serde(default = "default_pause_aliases")]
    pub pause_aliases: Vec<String>,

    /// Seconds before the spawn at which the notice lands
    #[serde(default = "default_lead_time")]
    pub lead_time_default: u32,

    /// Upper bound for per-command lead time overrides
    #[serde(default = "default_lead_time_max")]
    pub lead_time_max: u32,

    /// Largest accepted "seconds until spawn" value, given in minutes
    #[serde(default = "default_max_cycle_minutes")]
    pub max_cycle_minutes: u32,
}

impl RallyConfig {
    /// Bound for the player-supplied seconds-until-spawn value
    pub fn max_cycle_seconds(&self) -> u32 {
        self.max_cycle_minutes * 60
    }

    /// Every command name the host should route to the rally feature
    pub fn command_names(&self) -> Vec<String> {
        let mut names = self.start_aliases.clone();
        if !names.iter().any(|n| n == RALLY_COMMAND) {
            names.push(RALLY_COMMAND.to_string());
        }
        names.extend(self.stop_aliases.iter().cloned());
        names.extend(self.pause_aliases.iter().cloned());
        names
    }

    pub fn is_start_alias(&self, command: &str) -> bool {
        command == RALLY_COMMAND || self.start_aliases.iter().any(|a| a == command)
    }

    pub fn is_stop_alias(&self, command: &str) -> bool {
        self.stop_aliases.iter().any(|a| a == command)
    }

    pub fn is_pause_alias(&self, command: &str) -> bool {
        self.pause_aliases.iter().any(|a| a == command)
    }

    /// Validate the rally section
    pub fn validate(&self) -> Result<()> {
        validate_aliases("rally.start_aliases", &self.start_aliases)?;
        validate_aliases("rally.stop_aliases", &self.stop_aliases)?;
        validate_aliases("rally.pause_aliases", &self.pause_aliases)?;

        if self.lead_time_default == 0 {
            return Err(anyhow::anyhow!("rally.lead_time_default must be positive"));
        }
        if self.lead_time_default > self.lead_time_max {
            return Err(anyhow::anyhow!(
                "rally.lead_time_default ({}) exceeds rally.lead_time_max ({})",
                self.lead_time_default,
                self.lead_time_max
            ));
        }
        if self.max_cycle_minutes == 0 {
            return Err(anyhow::anyhow!("rally.max_cycle_minutes must be positive"));
        }
        Ok(())
    }
}

impl Default for RallyConfig {
    fn default() -> Self {
        Self {
            start_aliases: default_start_aliases(),
            stop_aliases: default_stop_aliases(),
            pause_aliases: default_pause_aliases(),
            lead_time_default: default_lead_time(),
            lead_time_max: default_lead_time_max(),
            max_cycle_minutes: default_max_cycle_minutes(),
        }
    }
}

/// Personal one-shot timer settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CountdownConfig {
    /// Aliases that set a timer
    #[serde(default = "default_countdown_aliases")]
    pub aliases: Vec<String>,

    /// Largest accepted timer length in minutes
    #[serde(default = "default_countdown_max_minutes")]
    pub max_minutes: u32,

    /// How many times the final reminder is delivered
    #[serde(default = "default_countdown_repeat")]
    pub reminder_repeat: u32,
}

impl CountdownConfig {
    /// Validate the countdown section
    pub fn validate(&self) -> Result<()> {
        validate_aliases("countdown.aliases", &self.aliases)?;
        if self.max_minutes == 0 {
            return Err(anyhow::anyhow!("countdown.max_minutes must be positive"));
        }
        if self.reminder_repeat == 0 {
            return Err(anyhow::anyhow!("countdown.reminder_repeat must be positive"));
        }
        Ok(())
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            aliases: default_countdown_aliases(),
            max_minutes: default_countdown_max_minutes(),
            reminder_repeat: default_countdown_repeat(),
        }
    }
}

/// Delivery settings shared by all features
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotifierConfig {
    /// How many times each scheduled notice is delivered
    #[serde(default = "default_repeat_count")]
    pub repeat_count: u32,

    /// Seconds between repeated deliveries of one notice
    #[serde(default = "default_spacing_seconds")]
    pub spacing_seconds: u64,
}

impl NotifierConfig {
    /// Validate the notifier section
    pub fn validate(&self) -> Result<()> {
        if self.repeat_count == 0 {
            return Err(anyhow::anyhow!("notifier.repeat_count must be positive"));
        }
        Ok(())
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            repeat_count: default_repeat_count(),
            spacing_seconds: default_spacing_seconds(),
        }
    }
}

/// Alias lists must be non-empty, lowercase, single-token names
fn validate_aliases(field: &str, aliases: &[String]) -> Result<()> {
    if aliases.is_empty() {
        return Err(anyhow::anyhow!("{} must not be empty", field));
    }
    for alias in aliases {
        if alias.is_empty() || !alias.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()) {
            return Err(anyhow::anyhow!(
                "{} entries must be lowercase single words: {:?}",
                field,
                alias
            ));
        }
    }
    Ok(())
}

// Default value functions
fn default_start_aliases() -> Vec<String> {
    vec!["r".to_string(), "rly".to_string(), "raly".to_string()]
}

fn default_stop_aliases() -> Vec<String> {
    vec![
        "sr".to_string(),
        "stop".to_string(),
        "rs".to_string(),
        "rts".to_string(),
    ]
}

fn default_pause_aliases() -> Vec<String> {
    vec![
        "pr".to_string(),
        "pause".to_string(),
        "rp".to_string(),
        "rtp".to_string(),
    ]
}

fn default_lead_time() -> u32 {
    20
}

fn default_lead_time_max() -> u32 {
    120
}

fn default_max_cycle_minutes() -> u32 {
    2
}

fn default_countdown_aliases() -> Vec<String> {
    vec![
        "timer".to_string(),
        "time".to_string(),
        "set".to_string(),
        "settimer".to_string(),
    ]
}

fn default_countdown_max_minutes() -> u32 {
    30
}

fn default_countdown_repeat() -> u32 {
    2
}

fn default_repeat_count() -> u32 {
    1
}

fn default_spacing_seconds() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        config.validate().unwrap();

        assert_eq!(config.rally.lead_time_default, 20);
        assert_eq!(config.rally.max_cycle_seconds(), 120);
        assert_eq!(config.rally.start_aliases, vec!["r", "rly", "raly"]);
        assert_eq!(config.countdown.max_minutes, 30);
        assert_eq!(config.notifier.repeat_count, 1);
        assert_eq!(config.notifier.spacing_seconds, 5);
    }

    #[test]
    fn test_partial_yaml_overrides() {
        let yaml = r#"
rally:
  lead_time_default: 15
  max_cycle_minutes: 3
notifier:
  repeat_count: 2
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        config.validate().unwrap();

        assert_eq!(config.rally.lead_time_default, 15);
        assert_eq!(config.rally.max_cycle_seconds(), 180);
        // Untouched sections keep their defaults
        assert_eq!(config.rally.stop_aliases, vec!["sr", "stop", "rs", "rts"]);
        assert_eq!(config.notifier.repeat_count, 2);
        assert_eq!(config.countdown.reminder_repeat, 2);
    }

    #[test]
    fn test_json_config_also_parses() {
        let json = r#"{"rally": {"lead_time_default": 25}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        config.validate().unwrap();
        assert_eq!(config.rally.lead_time_default, 25);
    }

    #[test]
    fn test_rally_command_always_routed() {
        let config = RallyConfig::default();
        assert!(config.is_start_alias("rally"));
        assert!(config.command_names().iter().any(|n| n == "rally"));

        let explicit = RallyConfig {
            start_aliases: vec!["rally".to_string(), "r".to_string()],
            ..RallyConfig::default()
        };
        let names = explicit.command_names();
        assert_eq!(names.iter().filter(|n| *n == "rally").count(), 1);
    }

    #[test]
    fn test_alias_family_lookups() {
        let config = RallyConfig::default();
        assert!(config.is_start_alias("r"));
        assert!(config.is_stop_alias("sr"));
        assert!(config.is_pause_alias("pr"));
        assert!(!config.is_start_alias("sr"));
        assert!(!config.is_stop_alias("pr"));
        assert!(!config.is_pause_alias("r"));
    }

    #[test]
    fn test_validate_rejects_uppercase_alias() {
        let yaml = r#"
rally:
  stop_aliases: ["Stop"]
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_alias_family() {
        let yaml = r#"
rally:
  pause_aliases: []
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_lead_time() {
        let yaml = r#"
rally:
  lead_time_default: 0
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_default_lead_over_max() {
        let yaml = r#"
rally:
  lead_time_default: 200
  lead_time_max: 120
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_cross_family_alias() {
        let yaml = r#"
rally:
  stop_aliases: ["stop"]
  pause_aliases: ["stop"]
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_countdown_alias_clash() {
        let yaml = r#"
countdown:
  aliases: ["stop"]
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());
    }
}
