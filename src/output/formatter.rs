//! Rendering of verdict lines and group banners.

use crate::output::config::OutputConfig;
use crate::run::GroupStats;
use std::io::{self, Write};

// ANSI color codes: green/red background for the verdict badge.
const GREEN_BG: &str = "\x1b[42m";
const RED_BG: &str = "\x1b[41m";
const RESET: &str = "\x1b[0m";

/// Everything needed to render one test outcome.
#[derive(Debug, Clone)]
pub(crate) struct Verdict {
    /// Final result, after negation is applied.
    pub passed: bool,
    /// The subject text: an explicit label, or the rendered actual value.
    pub subject: String,
    /// Whether `subject` was supplied by the caller rather than generated.
    pub explicit_label: bool,
    /// Optional caller message.
    pub message: Option<String>,
    /// Matcher description ("===", "to be close to", ...).
    pub description: String,
    /// Rendered expected operand; `None` for unary matchers.
    pub expected: Option<String>,
    pub negated: bool,
    pub some: bool,
    pub elementwise: bool,
}

/// Emits report lines to a sink, one per test outcome, in test order.
pub struct Reporter {
    config: OutputConfig,
    sink: Box<dyn Write + Send>,
}

impl Reporter {
    /// A reporter writing to stdout.
    pub fn new(config: OutputConfig) -> Self {
        Self::with_sink(config, Box::new(io::stdout()))
    }

    /// A reporter writing to an arbitrary sink. Tests use this to capture
    /// report lines.
    pub fn with_sink(config: OutputConfig, sink: Box<dyn Write + Send>) -> Self {
        Self { config, sink }
    }

    /// A reporter that discards everything.
    pub fn silent() -> Self {
        Self::with_sink(OutputConfig::plain(), Box::new(io::sink()))
    }

    pub(crate) fn verdict(&mut self, verdict: &Verdict) {
        let text = format_verdict(&self.config, verdict);
        let _ = self.sink.write_all(text.as_bytes());
        let _ = self.sink.flush();
    }

    pub(crate) fn group_started(&mut self, name: Option<&str>) {
        let line = match name {
            Some(name) => format!("\nSTART {}\n", name),
            None => "\nRESET test counters\n".to_string(),
        };
        let _ = self.sink.write_all(line.as_bytes());
    }

    pub(crate) fn group_finished(&mut self, name: Option<&str>, stats: GroupStats) {
        let header = match name {
            Some(name) => format!("END {}\n", name),
            None => "\n----------- END TEST ------------\n".to_string(),
        };
        let summary = format!(
            "    Passed {} out of {} tests\n",
            stats.passed, stats.tested
        );
        let _ = self.sink.write_all(header.as_bytes());
        let _ = self.sink.write_all(summary.as_bytes());
        let _ = self.sink.flush();
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn badge(config: &OutputConfig, passed: bool) -> String {
    let word = if passed { "PASS" } else { "FAIL" };
    if config.colors_enabled {
        let color = if passed { GREEN_BG } else { RED_BG };
        format!("    {}{}{}  ", color, word, RESET)
    } else {
        format!("    {}  ", word)
    }
}

/// Fold negation into the matcher description: `===` becomes `!==`,
/// `==` becomes `!=`, anything else gets a `not ` prefix.
fn describe(description: &str, negated: bool) -> String {
    if !negated {
        return description.to_string();
    }
    if let Some(rest) = description.strip_prefix('=') {
        format!("!{}", rest)
    } else if description.starts_with('!') {
        description.to_string()
    } else {
        format!("not {}", description)
    }
}

fn format_verdict(config: &OutputConfig, v: &Verdict) -> String {
    let badge = badge(config, v.passed);

    // A message on an unlabeled expectation replaces the generated line.
    if let Some(message) = &v.message {
        if !v.explicit_label {
            return format!("{}Expect {}\n", badge, message);
        }
    }

    let mut line = String::new();
    if let Some(message) = &v.message {
        line.push_str(&format!("          {}:\n", message));
    }

    let some = if v.some { "some " } else { "" };
    let contents = if v.elementwise { "contents of " } else { "" };
    line.push_str(&format!(
        "{}Expect {}{}{} {}",
        badge,
        some,
        contents,
        v.subject,
        describe(&v.description, v.negated)
    ));
    if let Some(expected) = &v.expected {
        line.push(' ');
        line.push_str(expected);
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict() -> Verdict {
        Verdict {
            passed: true,
            subject: "5".to_string(),
            explicit_label: false,
            message: None,
            description: "===".to_string(),
            expected: Some("5".to_string()),
            negated: false,
            some: false,
            elementwise: false,
        }
    }

    fn plain() -> OutputConfig {
        OutputConfig::plain()
    }

    #[test]
    fn test_basic_verdict_line() {
        let line = format_verdict(&plain(), &verdict());
        assert_eq!(line, "    PASS  Expect 5 === 5\n");
    }

    #[test]
    fn test_fail_badge() {
        let mut v = verdict();
        v.passed = false;
        assert!(format_verdict(&plain(), &v).starts_with("    FAIL  "));
    }

    #[test]
    fn test_colors_wrap_badge() {
        let config = OutputConfig::new().colors(true);
        let line = format_verdict(&config, &verdict());
        assert!(line.contains("\x1b[42mPASS\x1b[0m"));
    }

    #[test]
    fn test_negated_equality_symbol() {
        let mut v = verdict();
        v.negated = true;
        assert!(format_verdict(&plain(), &v).contains("5 !== 5"));
    }

    #[test]
    fn test_negated_worded_description() {
        let mut v = verdict();
        v.negated = true;
        v.description = "to be close to".to_string();
        assert!(format_verdict(&plain(), &v).contains("not to be close to"));
    }

    #[test]
    fn test_modifier_prefixes() {
        let mut v = verdict();
        v.some = true;
        v.elementwise = true;
        v.subject = "[1, 2, 3]".to_string();
        let line = format_verdict(&plain(), &v);
        assert!(line.contains("Expect some contents of [1, 2, 3]"));
    }

    #[test]
    fn test_message_replaces_generated_line() {
        let mut v = verdict();
        v.message = Some("adds small numbers".to_string());
        let line = format_verdict(&plain(), &v);
        assert_eq!(line, "    PASS  Expect adds small numbers\n");
    }

    #[test]
    fn test_message_with_explicit_label_keeps_both() {
        let mut v = verdict();
        v.message = Some("adds small numbers".to_string());
        v.explicit_label = true;
        v.subject = "add(1,2)".to_string();
        let line = format_verdict(&plain(), &v);
        assert!(line.starts_with("          adds small numbers:\n"));
        assert!(line.contains("Expect add(1,2) === 5"));
    }

    #[test]
    fn test_unary_omits_expected() {
        let mut v = verdict();
        v.description = "to be truthy".to_string();
        v.expected = None;
        let line = format_verdict(&plain(), &v);
        assert_eq!(line, "    PASS  Expect 5 to be truthy\n");
    }
}
