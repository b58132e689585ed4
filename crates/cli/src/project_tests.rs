// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::storage::MemoryStorage;
use proptest::prelude::*;
use rstest::rstest;

fn populated() -> SourceSet {
    let mut set = SourceSet::new();
    set.set(SlotId::Html, "<b>hi</b>");
    set.set(SlotId::Css, "b { color: red }");
    set.set(SlotId::Python, "print('hi')");
    set.set(SlotId::Javascript, "throw new Error('x')");
    set
}

#[test]
fn test_slots_default_to_empty() {
    let set = SourceSet::new();
    for slot in SlotId::ALL {
        assert_eq!(set.get(slot), "");
    }
    assert!(set.is_empty());
}

#[test]
fn test_set_and_get_round_trip_per_slot() {
    let mut set = SourceSet::new();
    for (index, slot) in SlotId::ALL.into_iter().enumerate() {
        set.set(slot, format!("text-{index}"));
    }
    for (index, slot) in SlotId::ALL.into_iter().enumerate() {
        assert_eq!(set.get(slot), format!("text-{index}"));
    }
    assert!(!set.is_empty());
}

#[test]
fn test_reset_clears_every_slot() {
    let mut set = populated();
    set.reset();
    assert!(set.is_empty());
}

#[test]
fn test_slot_names_follow_declaration_order() {
    let names: Vec<&str> = SlotId::ALL.iter().map(|slot| slot.name()).collect();
    assert_eq!(names, ["html", "css", "python", "javascript"]);
}

#[rstest]
#[case("html", Some(SlotId::Html))]
#[case("css", Some(SlotId::Css))]
#[case("python", Some(SlotId::Python))]
#[case("javascript", Some(SlotId::Javascript))]
#[case("js", None)]
#[case("HTML", None)]
#[case("", None)]
fn test_slot_from_name(#[case] name: &str, #[case] expected: Option<SlotId>) {
    assert_eq!(SlotId::from_name(name), expected);
}

#[test]
fn test_serialize_emits_stable_key_order() {
    let set = SourceSet::new();
    assert_eq!(
        set.serialize(),
        r#"{"$version":"1","html":"","css":"","python":"","javascript":""}"#
    );
}

#[test]
fn test_serialize_then_deserialize_round_trips() {
    let original = populated();
    let mut restored = SourceSet::new();
    restored.deserialize(&original.serialize());
    assert_eq!(restored, original);
}

#[test]
fn test_deserialize_missing_names_resolve_to_empty() {
    let mut set = populated();
    set.deserialize(r#"{"python":"x = 1"}"#);
    assert_eq!(set.get(SlotId::Python), "x = 1");
    assert_eq!(set.get(SlotId::Html), "");
    assert_eq!(set.get(SlotId::Css), "");
    assert_eq!(set.get(SlotId::Javascript), "");
}

#[test]
fn test_deserialize_ignores_unknown_names() {
    let mut set = SourceSet::new();
    set.deserialize(r#"{"html":"<p>ok</p>","typescript":"let x = 1","count":5}"#);
    assert_eq!(set.get(SlotId::Html), "<p>ok</p>");
}

#[test]
fn test_deserialize_accepts_any_version_value() {
    let mut set = SourceSet::new();
    set.deserialize(r#"{"$version":"99","css":"body {}"}"#);
    assert_eq!(set.get(SlotId::Css), "body {}");
}

#[rstest]
#[case("not json at all")]
#[case("[1, 2, 3]")]
#[case("\"just a string\"")]
#[case("42")]
#[case("")]
fn test_deserialize_malformed_input_resets(#[case] text: &str) {
    let mut set = populated();
    set.deserialize(text);
    assert!(set.is_empty());
}

#[test]
fn test_non_string_slot_value_makes_input_malformed() {
    let mut set = populated();
    let result = set.try_deserialize(r#"{"html":"<p>ok</p>","python":5}"#);
    assert!(matches!(result, Err(ProjectError::Parse(_))));
    assert!(set.is_empty());
}

#[test]
fn test_try_deserialize_reports_parse_failure() {
    let mut set = populated();
    let result = set.try_deserialize("{broken");
    assert!(matches!(result, Err(ProjectError::Parse(_))));
    assert!(set.is_empty());
}

#[test]
fn test_storage_round_trip() {
    let mut storage = MemoryStorage::new();
    let original = populated();
    original.persist_to(&mut storage, "webpad.project").unwrap();

    let mut restored = SourceSet::new();
    restored.load_from(&storage, "webpad.project");
    assert_eq!(restored, original);
}

#[test]
fn test_load_from_missing_key_resets() {
    let storage = MemoryStorage::new();
    let mut set = populated();
    set.load_from(&storage, "webpad.project");
    assert!(set.is_empty());
}

#[test]
fn test_load_from_malformed_value_resets() {
    let mut storage = MemoryStorage::new();
    storage.set("webpad.project", "%%%").unwrap();
    let mut set = populated();
    set.load_from(&storage, "webpad.project");
    assert!(set.is_empty());
}

// Property-based tests

proptest! {
    #[test]
    fn slot_text_round_trips_through_serialization(
        html in any::<String>(),
        css in any::<String>(),
        python in any::<String>(),
        javascript in any::<String>(),
    ) {
        let mut original = SourceSet::new();
        original.set(SlotId::Html, html);
        original.set(SlotId::Css, css);
        original.set(SlotId::Python, python);
        original.set(SlotId::Javascript, javascript);

        let mut restored = SourceSet::new();
        restored.deserialize(&original.serialize());
        prop_assert_eq!(restored, original);
    }

    #[test]
    fn deserialize_never_panics_and_fails_soft(text in any::<String>()) {
        let mut set = populated();
        if set.try_deserialize(&text).is_err() {
            prop_assert!(set.is_empty());
        }
    }
}
