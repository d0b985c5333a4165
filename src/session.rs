//! Scripted augment sessions.
//!
//! A session owns the catalog, a set of host item instances, a bag and a
//! rejection window, and executes one command per line:
//!
//! ```text
//! # comment
//! host rifle#1 rifle           instantiate catalog record `rifle` (ids are unique)
//! stock hack_chip 2            add units to the bag
//! install rifle#1 0 hack_chip  install into slot 0
//! remove rifle#1 0 [gain]      empty slot 0
//! tags rifle#1                 list host tags
//! expect-tag rifle#1 AUG_*     fail unless a tag matches
//! expect-no-tag rifle#1 AUG_*  fail if a tag matches
//! require hack_chip HEAVY      runtime profile edits:
//! unrequire hack_chip HEAVY      (also grant / ungrant, which re-sync
//!                                hosts holding the augment)
//! window                       show rejection window state
//! tick 60                      advance the rejection window
//! bag                          list the bag
//! ```
//!
//! Every command yields one report line.

use std::collections::BTreeMap;

use log::debug;

use crate::augment::{
    AugmentController, AugmentError, Augmentable, EquipItem, InstallOutcome, Inventory,
    ItemBag, ItemCatalog, RejectionWindow, RemoveOutcome, Taggable,
};
use crate::config::Config;

pub struct Session {
    catalog: ItemCatalog,
    config: Config,
    hosts: BTreeMap<String, EquipItem>,
    bag: ItemBag,
    window: RejectionWindow,
}

fn script_error(line: usize, reason: impl Into<String>) -> AugmentError {
    AugmentError::Script {
        line,
        reason: reason.into(),
    }
}

fn parse_number<T: std::str::FromStr>(
    line: usize,
    word: &str,
    what: &str,
) -> Result<T, AugmentError> {
    word.parse()
        .map_err(|_| script_error(line, format!("invalid {}: '{}'", what, word)))
}

impl Session {
    pub fn new(catalog: ItemCatalog, config: Config) -> Self {
        let window = RejectionWindow::new(config.rejection_window.duration_frames);
        Self {
            catalog,
            config,
            hosts: BTreeMap::new(),
            bag: ItemBag::new(),
            window,
        }
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn host(&self, id: &str) -> Option<&EquipItem> {
        self.hosts.get(id)
    }

    pub fn bag(&self) -> &ItemBag {
        &self.bag
    }

    pub fn window(&self) -> &RejectionWindow {
        &self.window
    }

    /// Run a whole script, stopping at the first failing line.
    pub fn run_script(&mut self, script: &str) -> Result<Vec<String>, AugmentError> {
        let mut report = Vec::new();
        for (idx, raw) in script.lines().enumerate() {
            if let Some(line) = self.run_line(idx + 1, raw)? {
                report.push(line);
            }
        }
        Ok(report)
    }

    /// Run one line. Blank lines and `#` comments yield `None`.
    pub fn run_line(&mut self, line_no: usize, raw: &str) -> Result<Option<String>, AugmentError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }
        let words: Vec<&str> = trimmed.split_whitespace().collect();
        debug!("script line {}: {:?}", line_no, words);

        let report = match words.as_slice() {
            ["host", host_id, record_id] => {
                if self.hosts.contains_key(*host_id) {
                    return Err(script_error(line_no, format!("host {} already exists", host_id)));
                }
                let host = self.catalog.instantiate(host_id, record_id)?;
                let slots = host.slot_count();
                self.hosts.insert(host_id.to_string(), host);
                format!("{} ready ({} slots)", host_id, slots)
            }
            ["stock", item_id, qty] => {
                let qty: u32 = parse_number(line_no, qty, "quantity")?;
                self.catalog.profile(item_id)?;
                self.bag.gain_item(item_id, qty);
                format!("{} x{} in bag", item_id, self.bag.quantity(item_id))
            }
            ["install", host_id, slot, augment_id] => {
                let slot: usize = parse_number(line_no, slot, "slot")?;
                self.install(line_no, host_id, slot, augment_id)?
            }
            ["remove", host_id, slot] => {
                let slot: usize = parse_number(line_no, slot, "slot")?;
                self.remove(line_no, host_id, slot, None)?
            }
            ["remove", host_id, slot, gain] => {
                let slot: usize = parse_number(line_no, slot, "slot")?;
                let gain: u32 = parse_number(line_no, gain, "gain")?;
                self.remove(line_no, host_id, slot, Some(gain))?
            }
            ["tags", host_id] => {
                let host = self.host_or_err(line_no, host_id)?;
                format!("{}: {}", host_id, format_tags(host.tags()))
            }
            ["expect-tag", host_id, pattern] => {
                let host = self.host_or_err(line_no, host_id)?;
                if !host.has_tag(pattern) {
                    return Err(script_error(
                        line_no,
                        format!(
                            "{} has no tag matching {} ({})",
                            host_id,
                            pattern,
                            format_tags(host.tags())
                        ),
                    ));
                }
                format!("ok: {} has {}", host_id, pattern)
            }
            ["expect-no-tag", host_id, pattern] => {
                let host = self.host_or_err(line_no, host_id)?;
                if host.has_tag(pattern) {
                    return Err(script_error(
                        line_no,
                        format!(
                            "{} unexpectedly matches {} ({})",
                            host_id,
                            pattern,
                            format_tags(host.tags())
                        ),
                    ));
                }
                format!("ok: {} lacks {}", host_id, pattern)
            }
            [verb @ ("require" | "unrequire" | "grant" | "ungrant"), augment_id, tag] => {
                let profile = self.catalog.profile_mut(augment_id)?;
                let changed = match *verb {
                    "require" => profile.add_requirement(tag),
                    "unrequire" => profile.remove_requirement(tag),
                    "grant" => profile.add_granted_tag(tag),
                    _ => profile.remove_granted_tag(tag),
                };
                let mut line = format!(
                    "{} {} {}{}",
                    augment_id,
                    verb,
                    tag.to_uppercase(),
                    if changed { "" } else { " (unchanged)" }
                );
                if changed && matches!(*verb, "grant" | "ungrant") {
                    let updated = self.reconcile_holders(augment_id);
                    if !updated.is_empty() {
                        line.push_str(&format!(", updated {}", updated.join(",")));
                    }
                }
                line
            }
            ["window"] => self.window_state(),
            ["tick", frames] => {
                let frames: u32 = parse_number(line_no, frames, "frame count")?;
                for _ in 0..frames {
                    self.window.update();
                }
                self.window_state()
            }
            ["bag"] => self.bag.format_compact().join(" | "),
            _ => return Err(script_error(line_no, format!("unrecognized command: {}", trimmed))),
        };
        Ok(Some(report))
    }

    fn host_or_err(&self, line_no: usize, host_id: &str) -> Result<&EquipItem, AugmentError> {
        self.hosts
            .get(host_id)
            .ok_or_else(|| script_error(line_no, format!("no host named {}", host_id)))
    }

    /// Re-sync granted tags on every host holding `augment_id`. Returns the
    /// ids of hosts whose tags changed.
    fn reconcile_holders(&mut self, augment_id: &str) -> Vec<String> {
        let controller = AugmentController::new(&self.catalog, &self.config.augments);
        let mut updated = Vec::new();
        for (host_id, host) in self.hosts.iter_mut() {
            let holds = (0..host.slot_count()).any(|s| host.slot_occupant(s) == Some(augment_id));
            if !holds {
                continue;
            }
            let (added, revoked) = controller.reconcile_grants(host);
            if !added.is_empty() || !revoked.is_empty() {
                self.bag.refresh_holder(host_id);
                updated.push(host_id.clone());
            }
        }
        updated
    }

    fn window_state(&self) -> String {
        if self.window.is_visible() {
            format!("window: {}", self.window.text())
        } else {
            "window: hidden".to_string()
        }
    }

    fn install(
        &mut self,
        line_no: usize,
        host_id: &str,
        slot: usize,
        augment_id: &str,
    ) -> Result<String, AugmentError> {
        let controller = AugmentController::new(&self.catalog, &self.config.augments);
        let host = self
            .hosts
            .get_mut(host_id)
            .ok_or_else(|| script_error(line_no, format!("no host named {}", host_id)))?;
        let outcome = controller.install(host, augment_id, slot, &mut self.bag, &mut self.window)?;
        Ok(match outcome {
            InstallOutcome::Installed {
                displaced, granted, ..
            } => {
                let mut line = format!("installed {} into {}[{}]", augment_id, host_id, slot);
                if let Some(prior) = displaced {
                    line.push_str(&format!(", displaced {}", prior));
                }
                if !granted.is_empty() {
                    line.push_str(&format!(", granted {}", granted.join(",")));
                }
                line
            }
            InstallOutcome::Rejected { unmet, .. } => format!(
                "rejected {} for {}[{}]: missing {}",
                augment_id,
                host_id,
                slot,
                unmet.join(",")
            ),
        })
    }

    fn remove(
        &mut self,
        line_no: usize,
        host_id: &str,
        slot: usize,
        gain: Option<u32>,
    ) -> Result<String, AugmentError> {
        let controller = AugmentController::new(&self.catalog, &self.config.augments);
        let host = self
            .hosts
            .get_mut(host_id)
            .ok_or_else(|| script_error(line_no, format!("no host named {}", host_id)))?;
        Ok(match controller.remove(host, slot, &mut self.bag, gain)? {
            RemoveOutcome::NothingRemoved => format!("{}[{}] already empty", host_id, slot),
            RemoveOutcome::Removed {
                augment_id,
                revoked,
                returned,
                ..
            } => {
                let mut line = format!(
                    "removed {} from {}[{}], returned {}",
                    augment_id, host_id, slot, returned
                );
                if !revoked.is_empty() {
                    line.push_str(&format!(", revoked {}", revoked.join(",")));
                }
                line
            }
        })
    }
}

fn format_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        "(none)".to_string()
    } else {
        tags.join(", ")
    }
}
