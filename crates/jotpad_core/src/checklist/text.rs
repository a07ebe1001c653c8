//! Text <-> checklist item conversion.
//!
//! Indentation is two spaces per level. Parsing counts any leading
//! whitespace character, so tabs count as one unit each.

use crate::checklist::engine::ensure_root_start;
use crate::model::checklist_item::{ChecklistItem, MAX_ITEM_LEVEL};
use once_cell::sync::Lazy;
use regex::Regex;

/// Indentation emitted per checklist level.
pub const INDENT_UNIT: &str = "  ";

static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s]+").expect("valid link regex"));

/// Parses indented text into unchecked checklist items, one per line.
///
/// `level = min(3, leading_whitespace / 2)`; item text is the trimmed line.
/// Blank input yields no items. An indented first line is lifted to level 0
/// so the sequence never starts with an orphan.
pub fn parse_text_to_items(text: &str) -> Vec<ChecklistItem> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut items: Vec<ChecklistItem> = text.split('\n').map(parse_line).collect();
    ensure_root_start(&mut items);
    items
}

/// Renders items as indented lines joined by `\n`.
pub fn items_to_text(items: &[ChecklistItem]) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", INDENT_UNIT.repeat(usize::from(item.level)), item.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Returns every `http(s)://` link found in an item text, in order.
pub fn item_links(text: &str) -> Vec<&str> {
    LINK_RE.find_iter(text).map(|m| m.as_str()).collect()
}

fn parse_line(line: &str) -> ChecklistItem {
    let leading = line.chars().take_while(|c| c.is_whitespace()).count();
    let level = (leading / INDENT_UNIT.len()).min(usize::from(MAX_ITEM_LEVEL));
    // Bounded by MAX_ITEM_LEVEL above.
    ChecklistItem::with_level(line.trim(), level as u8)
}

#[cfg(test)]
mod tests {
    use super::{item_links, items_to_text, parse_text_to_items};

    #[test]
    fn parse_maps_leading_spaces_to_levels() {
        let items = parse_text_to_items("root\n  child\n     grandchild\n          deep");
        let shape: Vec<(&str, u8)> = items
            .iter()
            .map(|item| (item.text.as_str(), item.level))
            .collect();
        assert_eq!(
            shape,
            vec![("root", 0), ("child", 1), ("grandchild", 2), ("deep", 3)]
        );
        assert!(items.iter().all(|item| !item.checked));
    }

    #[test]
    fn parse_blank_input_yields_nothing() {
        assert!(parse_text_to_items("").is_empty());
        assert!(parse_text_to_items("  \n \t ").is_empty());
    }

    #[test]
    fn parse_lifts_indented_first_line() {
        let items = parse_text_to_items("    orphan\nnext");
        assert_eq!(items[0].level, 0);
        assert_eq!(items[0].text, "orphan");
    }

    #[test]
    fn parse_keeps_interior_blank_lines_and_strips_carriage_returns() {
        let items = parse_text_to_items("a\r\n\r\nb");
        let texts: Vec<&str> = items.iter().map(|item| item.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "", "b"]);
    }

    #[test]
    fn text_round_trip_preserves_text_and_level() {
        let source = parse_text_to_items("Plan\n  Book flights\n    Compare prices\n  Pack\nDone");
        let reparsed = parse_text_to_items(&items_to_text(&source));
        assert_eq!(source.len(), reparsed.len());
        for (before, after) in source.iter().zip(&reparsed) {
            assert_eq!(before.text, after.text);
            assert_eq!(before.level, after.level);
            assert_ne!(before.id, after.id);
        }
    }

    #[test]
    fn item_links_finds_urls_in_order() {
        let links = item_links("see https://example.com and http://a.b/c?d=1 now");
        assert_eq!(links, vec!["https://example.com", "http://a.b/c?d=1"]);
        assert!(item_links("no links").is_empty());
    }
}
