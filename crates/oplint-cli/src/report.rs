//! # Findings Report
//!
//! One finding per violated rule, tagged with the suite and the subject
//! (definition or process name) so a failing run pinpoints what broke.

use std::fmt;

/// A single check failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Suite that produced the finding (`subtypes` or `processes`).
    pub suite: &'static str,
    /// Definition or process the finding belongs to.
    pub subject: String,
    /// What is wrong.
    pub message: String,
}

impl Finding {
    /// Convenience constructor used by the suites.
    pub fn new(suite: &'static str, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Finding {
            suite,
            subject: subject.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.suite, self.subject, self.message)
    }
}

/// Print all findings and a one-line summary to stdout.
pub fn print(findings: &[Finding]) {
    for finding in findings {
        println!("{finding}");
    }
    if findings.is_empty() {
        println!("All checks passed.");
    } else {
        println!("{} problem(s) found.", findings.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_suite_and_subject() {
        let finding = Finding::new("subtypes", "date", "title must not end with a dot");
        assert_eq!(
            finding.to_string(),
            "[subtypes] date: title must not end with a dot"
        );
    }
}
