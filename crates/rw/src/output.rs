//! Colored terminal reporting for the cacoo commands.

use std::path::Path;

use console::{Style, Term};

/// Reporter for resolution results and diagram metadata, written to stderr.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print a plain line.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a fatal error (red).
    pub(crate) fn error(&self, msg: &str) {
        self.styled(&self.red, msg);
    }

    /// Report a reference rewritten to a cached image (green).
    pub(crate) fn resolved(&self, uri: &str, path: &Path) {
        self.styled(&self.green, &format!("{uri} -> {}", path.display()));
    }

    /// Report a reference that was left unchanged (yellow).
    pub(crate) fn skipped(&self, reason: &str) {
        self.styled(&self.yellow, reason);
    }

    /// Print the end-of-run tally (cyan bold).
    pub(crate) fn summary(&self, resolved: usize, total: usize) {
        let line = summary_line(resolved, total);
        self.styled(&self.cyan_bold, &format!("\n{line}"));
    }

    /// Print a diagram title as a heading (cyan bold).
    pub(crate) fn title(&self, title: Option<&str>) {
        self.styled(&self.cyan_bold, title.unwrap_or("(untitled)"));
    }

    /// Print one sheet of a diagram.
    pub(crate) fn sheet(&self, uid: &str, name: Option<&str>) {
        self.info(&sheet_line(uid, name));
    }

    fn styled(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }
}

fn summary_line(resolved: usize, total: usize) -> String {
    let noun = if total == 1 { "reference" } else { "references" };
    format!("Resolved {resolved} of {total} {noun}")
}

fn sheet_line(uid: &str, name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() => format!("  -> {uid} {name}"),
        _ => format!("  -> {uid}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_summary_line() {
        assert_eq!(summary_line(2, 3), "Resolved 2 of 3 references");
        assert_eq!(summary_line(0, 1), "Resolved 0 of 1 reference");
    }

    #[test]
    fn test_sheet_line() {
        assert_eq!(sheet_line("abc", Some("Overview")), "  -> abc Overview");
        assert_eq!(sheet_line("abc", Some("")), "  -> abc");
        assert_eq!(sheet_line("abc", None), "  -> abc");
    }
}
