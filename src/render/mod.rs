//! Content rendering: document body plus the shared footer

use chrono::{Datelike, Local, NaiveDate};

const GERMAN_MONTHS: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// Append `footer` to `body` verbatim.
pub fn render(body: &str, footer: &str) -> String {
    let mut content = String::with_capacity(body.len() + footer.len());
    content.push_str(body);
    content.push_str(footer);
    content
}

/// Format a date the way the documentation stamps it, e.g. `21. Februar 2026`
pub fn german_date(date: NaiveDate) -> String {
    let month = GERMAN_MONTHS[date.month0() as usize];
    format!("{}. {} {}", date.day(), month, date.year())
}

/// Version stamp appended to every generated document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    pub label: String,
    pub version: String,
    pub updated: String,
}

impl Footer {
    pub fn new(
        label: impl Into<String>,
        version: impl Into<String>,
        updated: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            version: version.into(),
            updated: updated.into(),
        }
    }

    /// Footer stamped with today's local date
    pub fn today(label: impl Into<String>, version: impl Into<String>) -> Self {
        Self::new(label, version, german_date(Local::now().date_naive()))
    }

    pub fn to_markdown(&self) -> String {
        format!(
            "\n---\n\n*{}: {} – Version {}*\n",
            self.label, self.updated, self.version
        )
    }

    pub fn apply(&self, body: &str) -> String {
        render(body, &self.to_markdown())
    }
}

impl std::fmt::Display for Footer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_markdown())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_appends_footer_verbatim() {
        assert_eq!(render("# Title\n", "\n---\nfoot\n"), "# Title\n\n---\nfoot\n");
        assert_eq!(render("", "x"), "x");
        assert_eq!(render("body", ""), "body");
    }

    #[test]
    fn test_german_date() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 21).unwrap();
        assert_eq!(german_date(date), "21. Februar 2026");

        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(german_date(date), "1. März 2025");
    }

    #[test]
    fn test_footer_markdown() {
        let footer = Footer::new("Letzte Aktualisierung", "0.26.13", "21. Februar 2026");
        assert_eq!(
            footer.to_markdown(),
            "\n---\n\n*Letzte Aktualisierung: 21. Februar 2026 – Version 0.26.13*\n"
        );
        assert_eq!(footer.apply("# Doc\n"), format!("# Doc\n{}", footer));
    }
}
