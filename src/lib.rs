//! # augtags - Tag-gated augments for RPG equipment
//!
//! augtags adds tag rules to an "attach augments to equipment" system:
//!
//! - **Requirements**: an augment lists tags its host must already carry
//!   (`<AUGMENT REQUIRES TAGS: CanFullAuto>`); the install is declined otherwise.
//! - **Grants**: an installed augment adds namespaced tags to its host
//!   (`<AUGMENT GRANTS TAGS: Hacked>` puts `AUG_HACKED` on the weapon), taken
//!   away again once no installed augment grants them.
//! - **Rejection text**: a declined install shows the augment's
//!   `<AUGMENT REJECTION STRING: ...>` in a message window.
//!
//! Tag lookups accept one `*` wildcard (`GUN_*`, `*_AUTO`, `GUN*AUTO`).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use augtags::augment::{AugmentController, ItemBag, ItemCatalog, RejectionWindow};
//! use augtags::config::Config;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml")?;
//!     let catalog = ItemCatalog::load_from_json(&config.catalog.path)?;
//!     let controller = AugmentController::new(&catalog, &config.augments);
//!
//!     let mut rifle = catalog.instantiate("rifle#1", "rifle")?;
//!     let mut bag = ItemBag::new().with_item("hack_chip", 1);
//!     let mut window = RejectionWindow::new(config.rejection_window.duration_frames);
//!     let outcome = controller.install(&mut rifle, "hack_chip", 0, &mut bag, &mut window)?;
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`augment`] - matcher, notetag parser, catalog and install/remove lifecycle
//! - [`session`] - scripted sessions driving the lifecycle line by line
//! - [`config`] - TOML configuration
//! - [`logutil`] - logging setup and single-line escaping
//! - [`metrics`] - process-wide install/removal counters

pub mod augment;
pub mod config;
pub mod logutil;
pub mod metrics;
pub mod session;
