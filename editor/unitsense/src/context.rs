//! Cursor context classification for unit files.
//!
//! A unit file line is either a `[Section]` header, a `Key=value` assignment,
//! a comment, or blank. What the user is typing is decided from the text on
//! the cursor line before the word under the cursor:
//!
//! | Text before the word | Context |
//! |----------------------|---------|
//! | `[` (after trimming) | section name |
//! | empty (after trimming) | key name |
//! | `Key=` / `Key=-` | value of `Key` |
//! | anything else | unknown |

use crate::types::{ContextKind, CursorContext, Range};
use regex::Regex;
use std::sync::LazyLock;

/// Key name followed by `=` or `=-`, anchored at the line start.
static ASSIGNMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\w+)\s*=-?\s*").expect("assignment pattern is valid"));

/// Characters that end a word, besides whitespace.
const WORD_SEPARATORS: &str = "`~!@#$%^&*()-=+[{]}\\|;:'\",.<>/?";

/// Split a document into lines, keeping a trailing empty line and dropping
/// `\r` from CRLF endings.
pub fn split_lines(source: &str) -> Vec<&str> {
    source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

pub fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !WORD_SEPARATORS.contains(c)
}

/// Char range `[start, end)` of the word touching `column` (0-based char
/// index), if any. A cursor right after the last character of a word is
/// still on that word.
pub fn word_range_at(line: &str, column: usize) -> Option<(usize, usize)> {
    let chars: Vec<char> = line.chars().collect();
    let col = column.min(chars.len());

    let start = chars[..col]
        .iter()
        .rposition(|&c| !is_word_char(c))
        .map_or(0, |p| p + 1);

    let end = chars[col..]
        .iter()
        .position(|&c| !is_word_char(c))
        .map_or(chars.len(), |p| col + p);

    (start < end).then_some((start, end))
}

/// Substring by char indices.
pub(crate) fn char_slice(line: &str, start: usize, end: usize) -> String {
    line.chars().skip(start).take(end.saturating_sub(start)).collect()
}

/// Key name of a `Key=` / `Key=-` assignment at the start of `text`.
pub fn setting_assignment(text: &str) -> Option<&str> {
    ASSIGNMENT
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Classify the context from the line text before the cursor word and the
/// word itself.
pub fn classify(line_start: &str, prefix: &str) -> ContextKind {
    let trimmed = line_start.trim();

    if trimmed == "[" {
        ContextKind::SectionName {
            prefix: prefix.to_string(),
        }
    } else if trimmed.is_empty() {
        ContextKind::KeyName {
            prefix: prefix.to_string(),
        }
    } else if let Some(key) = setting_assignment(line_start) {
        ContextKind::KeyValue {
            key: key.to_string(),
        }
    } else {
        ContextKind::Unknown
    }
}

/// Determine the completion context at a position (1-based line/column).
pub fn parse_context(source: &str, line: u32, column: u32) -> CursorContext {
    let mut ctx = CursorContext {
        line,
        column,
        ..Default::default()
    };

    let lines = split_lines(source);
    let Some(text) = line.checked_sub(1).and_then(|idx| lines.get(idx as usize)) else {
        return ctx;
    };

    let col = (column as usize).saturating_sub(1);
    match word_range_at(text, col) {
        Some((start, end)) => {
            ctx.prefix = char_slice(text, start, end);
            ctx.line_start = char_slice(text, 0, start);
            ctx.word_range = Some(Range::on_line(line, start as u32 + 1, end as u32 + 1));
        }
        None => {
            ctx.line_start = char_slice(text, 0, col);
        }
    }

    ctx.kind = classify(&ctx.line_start, &ctx.prefix);
    ctx
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Classification
    // =========================================================================

    #[test]
    fn test_classify_section_name() {
        assert_eq!(
            classify("[", "Ser"),
            ContextKind::SectionName {
                prefix: "Ser".to_string()
            }
        );
        assert_eq!(
            classify("  [ ", ""),
            ContextKind::SectionName {
                prefix: String::new()
            }
        );
    }

    #[test]
    fn test_classify_key_name() {
        assert_eq!(
            classify("", "Exec"),
            ContextKind::KeyName {
                prefix: "Exec".to_string()
            }
        );
        assert_eq!(
            classify("    ", ""),
            ContextKind::KeyName {
                prefix: String::new()
            }
        );
    }

    #[test]
    fn test_classify_value() {
        assert_eq!(
            classify("Type=", ""),
            ContextKind::KeyValue {
                key: "Type".to_string()
            }
        );
        assert_eq!(
            classify("  Restart = ", "on"),
            ContextKind::KeyValue {
                key: "Restart".to_string()
            }
        );
    }

    #[test]
    fn test_classify_ignore_failure_assignment() {
        assert_eq!(
            classify("ExecStartPre=-", ""),
            ContextKind::KeyValue {
                key: "ExecStartPre".to_string()
            }
        );
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify("[Service]", ""), ContextKind::Unknown);
        assert_eq!(classify("# comment ", "text"), ContextKind::Unknown);
        assert_eq!(classify("[[", ""), ContextKind::Unknown);
    }

    // =========================================================================
    // Word ranges
    // =========================================================================

    #[test]
    fn test_word_range_inside_word() {
        assert_eq!(word_range_at("Type=simple", 2), Some((0, 4)));
    }

    #[test]
    fn test_word_range_at_word_end() {
        assert_eq!(word_range_at("Type=sim", 8), Some((5, 8)));
    }

    #[test]
    fn test_word_range_after_separator() {
        assert_eq!(word_range_at("Type=", 5), None);
        assert_eq!(word_range_at("[", 1), None);
    }

    #[test]
    fn test_word_range_splits_on_dash() {
        assert_eq!(word_range_at("IOSchedulingClass=best-eff", 26), Some((23, 26)));
    }

    #[test]
    fn test_word_range_column_past_end() {
        assert_eq!(word_range_at("Nice", 40), Some((0, 4)));
        assert_eq!(word_range_at("", 3), None);
    }

    #[test]
    fn test_setting_assignment() {
        assert_eq!(setting_assignment("Type=simple"), Some("Type"));
        assert_eq!(setting_assignment("  User = nobody"), Some("User"));
        assert_eq!(setting_assignment("ExecStart=-/bin/true"), Some("ExecStart"));
        assert_eq!(setting_assignment("Description"), None);
        assert_eq!(setting_assignment("[Unit]"), None);
    }

    #[test]
    fn test_split_lines_keeps_trailing_line() {
        assert_eq!(split_lines("[Unit]\r\nDescription=x\n"), vec!["[Unit]", "Description=x", ""]);
    }

    // =========================================================================
    // Full context
    // =========================================================================

    #[test]
    fn test_parse_section_context() {
        let ctx = parse_context("[Ser", 1, 5);
        assert_eq!(
            ctx.kind,
            ContextKind::SectionName {
                prefix: "Ser".to_string()
            }
        );
        assert_eq!(ctx.word_range, Some(Range::on_line(1, 2, 5)));
    }

    #[test]
    fn test_parse_key_context_on_trailing_line() {
        let ctx = parse_context("[Service]\n", 2, 1);
        assert_eq!(
            ctx.kind,
            ContextKind::KeyName {
                prefix: String::new()
            }
        );
    }

    #[test]
    fn test_parse_value_context_with_partial_value() {
        let ctx = parse_context("[Service]\nType=fo", 2, 8);
        assert_eq!(
            ctx.kind,
            ContextKind::KeyValue {
                key: "Type".to_string()
            }
        );
        assert_eq!(ctx.prefix, "fo");
        assert_eq!(ctx.line_start, "Type=");
    }

    #[test]
    fn test_parse_context_out_of_range() {
        assert_eq!(parse_context("[Unit]", 5, 1).kind, ContextKind::Unknown);
        assert_eq!(parse_context("[Unit]", 0, 1).kind, ContextKind::Unknown);
    }

    #[test]
    fn test_parse_context_multibyte_line() {
        let ctx = parse_context("Description=Überwachung", 1, 24);
        assert_eq!(
            ctx.kind,
            ContextKind::KeyValue {
                key: "Description".to_string()
            }
        );
        assert_eq!(ctx.prefix, "Überwachung");
    }
}
