//! Readiness report types and formatting.

use std::fmt;

use owo_colors::OwoColorize;

use crate::core::Route;

/// Outcome of all checks for one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub route: Route,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Per-route results in sitemap order.
#[derive(Debug, Default)]
pub struct ReadinessReport {
    pub results: Vec<ValidationResult>,
}

impl ReadinessReport {
    pub fn push(&mut self, route: Route, errors: Vec<String>) {
        self.results.push(ValidationResult { route, errors });
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Print the checklist: one line per route, failure reasons indented.
    pub fn print(&self) {
        for result in &self.results {
            if result.passed() {
                eprintln!("{} {}", "✓".green(), result.route);
            } else {
                eprintln!("{} {}", "✗".red(), result.route.red());
                for error in &result.errors {
                    eprintln!("    {} {}", "→".red(), error);
                }
            }
        }
    }
}

impl fmt::Display for ReadinessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let passed = self.passed();
        let total = self.total();
        if self.is_success() {
            write!(f, "{}", format!("{passed}/{total} routes ready").green())
        } else {
            write!(
                f,
                "{} {}",
                format!("{passed}/{total} routes ready,").dimmed(),
                format!("{} failed", self.failed()).red().bold()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut report = ReadinessReport::default();
        report.push(Route::root(), vec![]);
        report.push(Route::new("/contact"), vec!["file not found".to_string()]);

        assert_eq!(report.total(), 2);
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_success());
        assert!(report.to_string().contains("1/2 routes ready"));
    }

    #[test]
    fn test_empty_report_succeeds() {
        assert!(ReadinessReport::default().is_success());
    }
}
