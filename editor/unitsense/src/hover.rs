//! Hover documentation for setting keys.
//!
//! Only a key at the start of a line produces hover content. Section headers
//! and values do not.

use crate::context::{char_slice, setting_assignment, split_lines, word_range_at};
use crate::scope::find_enclosing_section;
use crate::types::{HoverInfo, Range};
use unitkb::KnowledgeBase;

/// Get hover information at a position (1-based line/column).
pub fn get_hover(kb: &KnowledgeBase, source: &str, line: u32, column: u32) -> Option<HoverInfo> {
    let lines = split_lines(source);
    let line_idx = (line as usize).checked_sub(1)?;
    let text = *lines.get(line_idx)?;

    let (start, end) = word_range_at(text, (column as usize).saturating_sub(1))?;
    if !char_slice(text, 0, start).trim().is_empty() {
        return None;
    }

    // Key from the whole line, so a cursor anywhere in the token works
    let key = setting_assignment(text)?;
    let setting = find_enclosing_section(kb, &lines, line_idx)?.get(key)?;

    Some(
        HoverInfo::new(setting.doc.clone()).with_range(Range::on_line(
            line,
            start as u32 + 1,
            end as u32 + 1,
        )),
    )
}
