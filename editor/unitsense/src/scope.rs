//! Enclosing section resolution.
//!
//! Unit files have a single level of scoping: every key belongs to the
//! nearest `[Section]` header above it.

use regex::Regex;
use std::sync::LazyLock;
use unitkb::{KnowledgeBase, SettingsIndex};

/// Maximum number of lines scanned upward for a section header.
pub const SCAN_WINDOW: usize = 100;

/// A line holding only a `[Name]` header.
static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[(\w+)\]\s*$").expect("section header pattern is valid"));

/// Section name if `line` is a section header.
pub fn section_header(line: &str) -> Option<&str> {
    SECTION_HEADER
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Name of the nearest header strictly above `line` (0-based), looking at no
/// more than [`SCAN_WINDOW`] lines.
pub fn enclosing_section_name<'a>(lines: &[&'a str], line: usize) -> Option<&'a str> {
    let above = &lines[..line.min(lines.len())];
    above
        .iter()
        .rev()
        .take(SCAN_WINDOW)
        .find_map(|&text| section_header(text))
}

/// Settings of the section enclosing `line` (0-based).
///
/// `None` when there is no header within the window or the nearest header
/// names a section the knowledge base does not know. An unknown header still
/// ends the scan.
pub fn find_enclosing_section<'kb>(
    kb: &'kb KnowledgeBase,
    lines: &[&str],
    line: usize,
) -> Option<&'kb SettingsIndex> {
    enclosing_section_name(lines, line).and_then(|name| kb.settings(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitkb::{Section, Setting};

    fn test_kb() -> KnowledgeBase {
        KnowledgeBase::from_sections(vec![
            Section::new("Unit", "").with_setting(Setting::new("Description", "")),
            Section::new("Service", "").with_setting(Setting::new("Type", "")),
        ])
        .unwrap()
    }

    #[test]
    fn test_section_header() {
        assert_eq!(section_header("[Service]"), Some("Service"));
        assert_eq!(section_header("  [Unit]  "), Some("Unit"));
        assert_eq!(section_header("[Service"), None);
        assert_eq!(section_header("[Service] x"), None);
        assert_eq!(section_header("[]"), None);
        assert_eq!(section_header("Type=[simple]"), None);
    }

    #[test]
    fn test_header_on_first_line() {
        let lines = vec!["[Service]", "Type=simple", "", "", "", ""];
        assert_eq!(enclosing_section_name(&lines, 5), Some("Service"));
    }

    #[test]
    fn test_nearest_header_wins() {
        let lines = vec!["[Unit]", "Description=x", "[Service]", "Type=simple", ""];
        assert_eq!(enclosing_section_name(&lines, 4), Some("Service"));
        assert_eq!(enclosing_section_name(&lines, 2), Some("Unit"));
    }

    #[test]
    fn test_cursor_line_not_scanned() {
        let lines = vec!["[Unit]", "[Service]"];
        assert_eq!(enclosing_section_name(&lines, 1), Some("Unit"));
        assert_eq!(enclosing_section_name(&lines, 0), None);
    }

    #[test]
    fn test_no_header() {
        let lines = vec!["Description=x", "Type=simple", ""];
        assert_eq!(enclosing_section_name(&lines, 2), None);
    }

    #[test]
    fn test_scan_window_bound() {
        let mut lines = vec!["[Service]"];
        lines.extend(std::iter::repeat("Environment=A=1").take(SCAN_WINDOW));
        lines.push("");

        // Header is exactly SCAN_WINDOW lines above the line after it
        assert_eq!(enclosing_section_name(&lines, SCAN_WINDOW), Some("Service"));
        // One line further and it is out of reach
        assert_eq!(enclosing_section_name(&lines, SCAN_WINDOW + 1), None);
    }

    #[test]
    fn test_line_past_end() {
        let lines = vec!["[Unit]"];
        assert_eq!(enclosing_section_name(&lines, 10), Some("Unit"));
    }

    #[test]
    fn test_unknown_header_stops_scan() {
        let kb = test_kb();
        let lines = vec!["[Service]", "[Vendor]", ""];
        assert!(find_enclosing_section(&kb, &lines, 2).is_none());
    }

    #[test]
    fn test_non_word_header_is_not_a_header() {
        let kb = test_kb();
        let lines = vec!["[Service]", "[X-Custom]", ""];
        let settings = find_enclosing_section(&kb, &lines, 2).unwrap();
        assert!(settings.contains("Type"));
    }

    #[test]
    fn test_find_enclosing_section() {
        let kb = test_kb();
        let lines = vec!["[Unit]", "Description=x", ""];
        let settings = find_enclosing_section(&kb, &lines, 2).unwrap();
        assert!(settings.contains("Description"));
    }

    #[test]
    fn test_idempotent() {
        let kb = test_kb();
        let lines = vec!["[Service]", "Type=simple", ""];
        let first = find_enclosing_section(&kb, &lines, 2).unwrap();
        let second = find_enclosing_section(&kb, &lines, 2).unwrap();
        assert!(std::ptr::eq(first, second));
    }
}
