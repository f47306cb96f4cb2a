//! Keyword configuration for the scenario parser.

use serde::{Deserialize, Serialize};

/// Which line prefixes open a scenario and which count as steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Prefix that opens a new scenario.
    pub scenario_keyword: String,

    /// Prefixes of step lines, including the trailing space.
    pub step_keywords: Vec<String>,
}

impl ExtractorConfig {
    /// Set the scenario keyword.
    pub fn with_scenario_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.scenario_keyword = keyword.into();
        self
    }

    /// Add a step keyword.
    pub fn with_step_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.step_keywords.push(keyword.into());
        self
    }

    /// Whether a trimmed line is a step line.
    pub fn is_step(&self, trimmed: &str) -> bool {
        self.step_keywords
            .iter()
            .any(|keyword| trimmed.starts_with(keyword.as_str()))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            scenario_keyword: "Scenario:".to_string(),
            step_keywords: vec![
                "Given ".to_string(),
                "When ".to_string(),
                "Then ".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_keywords() {
        let config = ExtractorConfig::default();
        assert_eq!(config.scenario_keyword, "Scenario:");
        assert!(config.is_step("Given a user"));
        assert!(config.is_step("Then it works"));
        assert!(!config.is_step("And another thing"));
        assert!(!config.is_step("Givenotspace"));
    }

    #[test]
    fn test_extra_step_keyword() {
        let config = ExtractorConfig::default().with_step_keyword("And ");
        assert!(config.is_step("And another thing"));
    }
}
