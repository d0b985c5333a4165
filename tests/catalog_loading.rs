//! Catalog loading from the JSON fixture and from temporary files.
mod common;

use std::fs;

use augtags::augment::{AugmentError, Augmentable, ItemCatalog, ItemKind, Taggable};
use tempfile::tempdir;

use common::fixture_catalog;

#[test]
fn fixture_parses_notes_from_descriptions() {
    let catalog = fixture_catalog();
    assert_eq!(catalog.len(), 8);

    let hack = catalog.profile("hack_chip").unwrap();
    assert_eq!(hack.requirements(), ["CANFULLAUTO"]);
    assert_eq!(hack.granted_tags(), ["HACKED"]);
    assert_eq!(
        hack.rejection_string(),
        "\\C[2]Only full-auto frames accept this chip.\\C[0]"
    );

    // Mixed-case labels are accepted.
    let ghost = catalog.profile("ghost_chip").unwrap();
    assert_eq!(ghost.granted_tags(), ["HACKED", "SILENCED"]);
    assert!(ghost.requirements().is_empty());
    assert_eq!(ghost.rejection_string(), "");

    assert!(catalog.profile("potion").unwrap().is_empty());
}

#[test]
fn annotated_lists_only_items_with_notes_in_file_order() {
    let catalog = fixture_catalog();
    let ids: Vec<&str> = catalog
        .annotated()
        .map(|(record, _)| record.id.as_str())
        .collect();
    assert_eq!(ids, ["hack_chip", "ghost_chip", "gun_scope", "overclock_chip"]);
}

#[test]
fn records_keep_kind_tags_and_slots() {
    let catalog = fixture_catalog();
    let rifle = catalog.record("assault_rifle").unwrap();
    assert_eq!(rifle.kind, ItemKind::Weapon);
    assert_eq!(rifle.augment_slots, ["Chip", "Chip", "Scope"]);
    assert_eq!(catalog.record("vest").unwrap().kind, ItemKind::Armor);
    assert_eq!(catalog.record("potion").unwrap().kind, ItemKind::Item);

    let host = catalog.instantiate("rifle#1", "assault_rifle").unwrap();
    assert_eq!(host.host_id(), "rifle#1");
    assert_eq!(host.slot_count(), 3);
    assert_eq!(host.slot_type(2), Some("Scope"));
    assert!(host.has_tag("gun_*"));
    assert!(host.has_tag("CANFULLAUTO"));
}

#[test]
fn unknown_ids_are_reported() {
    let catalog = fixture_catalog();
    assert!(matches!(
        catalog.instantiate("x", "cannon"),
        Err(AugmentError::UnknownItem(id)) if id == "cannon"
    ));
    assert!(matches!(
        catalog.profile("cannon"),
        Err(AugmentError::UnknownAugment(_))
    ));
}

#[test]
fn duplicate_ids_fail_the_load() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("items.json");
    fs::write(
        &path,
        r#"[{"id": "chip", "name": "Chip"}, {"id": "chip", "name": "Other Chip"}]"#,
    )
    .unwrap();

    match ItemCatalog::load_from_json(&path) {
        Err(AugmentError::DuplicateId(id)) => assert_eq!(id, "chip"),
        other => panic!("expected duplicate id error, got {:?}", other.map(|c| c.len())),
    }
}

#[test]
fn malformed_and_missing_files_are_errors() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("items.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        ItemCatalog::load_from_json(&path),
        Err(AugmentError::Json(_))
    ));
    assert!(matches!(
        ItemCatalog::load_from_json(tmp.path().join("missing.json")),
        Err(AugmentError::Io(_))
    ));
}

#[test]
fn minimal_records_default_every_optional_field() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("items.json");
    fs::write(&path, r#"[{"id": "rock", "name": "Rock"}]"#).unwrap();

    let catalog = ItemCatalog::load_from_json(&path).unwrap();
    let rock = catalog.record("rock").unwrap();
    assert_eq!(rock.kind, ItemKind::Item);
    assert!(rock.tags.is_empty());
    assert!(rock.augment_slots.is_empty());
    assert_eq!(catalog.annotated().count(), 0);
}
