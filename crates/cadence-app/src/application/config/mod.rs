use serde::{Deserialize, Serialize};
use std::path::Path;

use cadence_domain::window::WindowAnchorConfig;

/// Centralized scheduling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    /// How weekday names resolve to instants around a due date
    pub window_anchor: WindowAnchorConfig,

    /// Hour of day (UTC) lazily created occurrences fall due (default: 9)
    pub due_hour: u32,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            window_anchor: WindowAnchorConfig::default(),
            due_hour: 9,
        }
    }
}

impl SchedulingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: set the window anchor rule
    pub fn with_window_anchor(mut self, anchor: WindowAnchorConfig) -> Self {
        self.window_anchor = anchor;
        self
    }

    /// Builder pattern: set the due hour for synthesized occurrences
    pub fn with_due_hour(mut self, due_hour: u32) -> Self {
        self.due_hour = due_hour;
        self
    }

    /// Load from a JSON file; missing fields fall back to defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SchedulingConfig::default();
        assert_eq!(config.window_anchor.week_start, Weekday::Mon);
        assert_eq!(config.due_hour, 9);
    }

    #[test]
    fn test_builder_pattern() {
        let anchor = WindowAnchorConfig::default().with_week_start(Weekday::Sun);
        let config = SchedulingConfig::new()
            .with_due_hour(18)
            .with_window_anchor(anchor);

        assert_eq!(config.due_hour, 18);
        assert_eq!(config.window_anchor.week_start, Weekday::Sun);
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "due_hour": 7 }}"#).unwrap();

        let config = SchedulingConfig::load(file.path()).unwrap();
        assert_eq!(config.due_hour, 7);
        assert_eq!(config.window_anchor.week_start, Weekday::Mon);
    }
}
