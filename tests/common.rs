//! Test utilities & fixtures.
//! Provides access to integration test data under `tests/test-data-int`.

use std::path::{Path, PathBuf};

use augtags::augment::{EquipItem, ItemBag, ItemCatalog, ItemKind, ItemRecord};

/// Return the path to the static integration test fixture directory.
#[allow(dead_code)]
pub fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("test-data-int")
}

/// Catalog loaded from `tests/test-data-int/items.json`.
#[allow(dead_code)] // Not every test binary uses the JSON fixture.
pub fn fixture_catalog() -> ItemCatalog {
    ItemCatalog::load_from_json(fixture_root().join("items.json")).expect("fixture catalog")
}

/// Small in-memory catalog mirroring the canonical scenarios: a full-auto
/// requirement chip and two chips that both grant HACKED.
#[allow(dead_code)]
pub fn scenario_catalog() -> ItemCatalog {
    ItemCatalog::from_records(vec![
        ItemRecord::new("full_auto_chip", "Full Auto Chip", ItemKind::Item).with_description(
            "<AUGMENT REQUIRES TAGS: CANFULLAUTO>\n\
             <AUGMENT GRANTS TAGS: HACKED>\n\
             <AUGMENT REJECTION STRING: This weapon cannot fire full auto.>",
        ),
        ItemRecord::new("hack_a", "Hack A", ItemKind::Item)
            .with_description("<AUGMENT GRANTS TAGS: HACKED>"),
        ItemRecord::new("hack_b", "Hack B", ItemKind::Item)
            .with_description("<AUGMENT GRANTS TAGS: HACKED, LOUD>"),
        ItemRecord::new("quiet", "Quiet", ItemKind::Item)
            .with_description("<AUGMENT GRANTS TAGS: SILENCED>"),
    ])
    .expect("scenario catalog")
}

/// Bag holding `count` units of every augment in `ids`.
#[allow(dead_code)]
pub fn stocked_bag(ids: &[&str], count: u32) -> ItemBag {
    ids.iter().fold(ItemBag::new(), |bag, id| bag.with_item(id, count))
}

/// A host with `slots` chip slots and the given base tags.
#[allow(dead_code)]
pub fn host_with(tags: &[&str], slots: usize) -> EquipItem {
    let mut host = EquipItem::new("host", "Host");
    for tag in tags {
        host = host.with_tag(tag);
    }
    for _ in 0..slots {
        host = host.with_slot("Chip");
    }
    host
}
