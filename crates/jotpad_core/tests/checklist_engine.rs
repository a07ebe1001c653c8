use chrono::Utc;
use jotpad_core::checklist::convert::{convert_to_checklist, convert_to_text};
use jotpad_core::checklist::engine::{
    active_items, add_item, completed_items, delete_item, indent, outdent, reorder,
    toggle_cascade,
};
use jotpad_core::checklist::text::{item_links, items_to_text, parse_text_to_items};
use jotpad_core::{ChecklistItem, NoteDraft, MAX_ITEM_LEVEL};

fn shape(items: &[ChecklistItem]) -> Vec<(String, u8)> {
    items
        .iter()
        .map(|item| (item.text.clone(), item.level))
        .collect()
}

#[test]
fn text_and_levels_survive_render_then_parse() {
    let shapes: &[&[(&str, u8)]] = &[
        &[("a", 0)],
        &[("a", 0), ("b", 1), ("c", 2), ("d", 3), ("e", 0)],
        &[("root", 0), ("child", 1), ("", 1), ("sibling", 0)],
    ];
    for expected in shapes {
        let items: Vec<ChecklistItem> = expected
            .iter()
            .map(|(text, level)| ChecklistItem::with_level(*text, *level))
            .collect();
        let parsed = parse_text_to_items(&items_to_text(&items));
        let expected: Vec<(String, u8)> = expected
            .iter()
            .map(|(text, level)| (text.to_string(), *level))
            .collect();
        assert_eq!(shape(&parsed), expected);
    }
}

#[test]
fn parse_caps_deep_indentation() {
    let parsed = parse_text_to_items("top\n            very deep");
    assert_eq!(parsed[1].level, MAX_ITEM_LEVEL);
    assert!(parsed.iter().all(|item| !item.checked));
}

#[test]
fn cascade_scenario_leaves_next_top_level_alone() {
    let mut items = parse_text_to_items("A\n  A1\nB");
    let a = items[0].id.clone();
    assert!(toggle_cascade(&mut items, &a, true));
    let checked: Vec<bool> = items.iter().map(|item| item.checked).collect();
    assert_eq!(checked, vec![true, true, false]);

    let a1 = items[1].id.clone();
    assert!(toggle_cascade(&mut items, &a1, false));
    assert!(items[0].checked);
}

#[test]
fn moving_child_to_front_promotes_it() {
    let mut items = parse_text_to_items("A\nB\n  B-sub");
    assert!(reorder(&mut items, 2, 0));
    assert_eq!(
        shape(&items),
        vec![
            ("B-sub".to_string(), 0),
            ("A".to_string(), 0),
            ("B".to_string(), 0)
        ]
    );
}

#[test]
fn editing_session_on_note_keeps_note_valid() {
    let mut note = NoteDraft::new("Weekend", "Shop\nClean")
        .into_note(Utc::now())
        .unwrap();
    assert!(convert_to_checklist(&mut note));

    let items = &mut note.checklist_items;
    let milk = add_item(items, "milk");
    assert!(reorder(items, 2, 1));
    assert!(indent(items, 1));
    assert!(indent(items, 1));
    assert_eq!(items[1].level, 2);
    assert!(outdent(items, 1));
    let shop = items[0].id.clone();
    toggle_cascade(items, &shop, true);
    assert!(items.iter().find(|item| item.id == milk).unwrap().checked);
    assert!(note.validate().is_ok());

    let completed: Vec<&str> = completed_items(&note.checklist_items)
        .into_iter()
        .map(|item| item.text.as_str())
        .collect();
    let active: Vec<&str> = active_items(&note.checklist_items)
        .into_iter()
        .map(|item| item.text.as_str())
        .collect();
    assert_eq!(completed, vec!["Shop", "milk"]);
    assert_eq!(active, vec!["Clean"]);

    assert!(delete_item(&mut note.checklist_items, &shop));
    assert_eq!(note.checklist_items[0].level, 0);
    assert!(convert_to_text(&mut note));
    assert_eq!(note.content, "milk\nClean");
}

#[test]
fn links_are_found_in_item_text() {
    let items =
        parse_text_to_items("Read https://docs.rs/regex and http://example.com/a?b=1\nno link");
    assert_eq!(
        item_links(&items[0].text),
        vec!["https://docs.rs/regex", "http://example.com/a?b=1"]
    );
    assert!(item_links(&items[1].text).is_empty());
}
