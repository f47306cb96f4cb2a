//! Line-prefix scenario parser.
//!
//! Not a Gherkin grammar. Each trimmed line is classified as:
//!
//! - scenario header: flushes the open scenario and opens a new one
//!   seeded with `"<name>: "`
//! - step: appended with a trailing space while a scenario is open
//! - blank: ignored
//! - anything else: flushes and closes the open scenario
//!
//! Steps seen while no scenario is open are dropped, so steps never leak
//! across a terminating line.

use crate::config::ExtractorConfig;

/// Parse feature text into one flattened string per scenario.
pub fn parse_scenarios(content: &str, config: &ExtractorConfig) -> Vec<String> {
    let mut results = Vec::new();
    let mut current: Option<String> = None;

    for line in content.lines() {
        let trimmed = line.trim();

        if let Some(name) = trimmed.strip_prefix(config.scenario_keyword.as_str()) {
            flush(&mut current, &mut results);
            current = Some(format!("{}: ", name.trim()));
        } else if config.is_step(trimmed) {
            if let Some(scenario) = current.as_mut() {
                scenario.push_str(trimmed);
                scenario.push(' ');
            }
        } else if trimmed.is_empty() {
            continue;
        } else {
            flush(&mut current, &mut results);
        }
    }

    flush(&mut current, &mut results);
    results
}

fn flush(current: &mut Option<String>, results: &mut Vec<String>) {
    if let Some(scenario) = current.take().filter(|s| !s.is_empty()) {
        results.push(scenario);
    }
}
