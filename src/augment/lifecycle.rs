/// Augment install/remove lifecycle.
///
/// A slot is either empty or holds one augment id. Installing checks the
/// augment's requirements against the host's tags, then records the augment
/// and adds its namespaced grants. Removing clears the slot and revokes each
/// grant that no remaining occupant still provides, so a granted tag is on the
/// host exactly while some installed augment grants it. Editing a profile's
/// grants at runtime does not touch any host; follow such edits with
/// [`AugmentController::reconcile_grants`] on every host that holds the augment.
use log::{debug, info, warn};

use super::catalog::ItemCatalog;
use super::errors::AugmentError;
use super::inventory::Inventory;
use super::item::Augmentable;
use super::matcher;
use super::rejection::RejectionDisplay;
use super::types::{
    normalize_tag, AugmentProfile, InstallOutcome, RemoveOutcome, RequirementMatching,
};
use crate::config::AugmentsConfig;
use crate::logutil::escape_log;
use crate::metrics;

pub struct AugmentController<'a> {
    catalog: &'a ItemCatalog,
    rules: &'a AugmentsConfig,
}

impl<'a> AugmentController<'a> {
    pub fn new(catalog: &'a ItemCatalog, rules: &'a AugmentsConfig) -> Self {
        Self { catalog, rules }
    }

    /// Host-side name of a granted tag, e.g. `HACKED` -> `AUG_HACKED`.
    pub fn granted_tag_name(&self, tag: &str) -> String {
        normalize_tag(&format!("{}{}", self.rules.granted_tag_prefix, tag))
    }

    fn requirement_met<S: AsRef<str>>(&self, requirement: &str, tags: &[S]) -> bool {
        match self.rules.requirement_matching {
            RequirementMatching::Wildcard => matcher::matches(requirement, tags),
            RequirementMatching::Exact => matcher::contains_exact(requirement, tags),
        }
    }

    /// Requirement entries of `profile` that no tag in `tags` satisfies.
    pub fn unmet_requirements<S: AsRef<str>>(
        &self,
        profile: &AugmentProfile,
        tags: &[S],
    ) -> Vec<String> {
        profile
            .requirements()
            .iter()
            .filter(|req| !self.requirement_met(req, tags))
            .cloned()
            .collect()
    }

    fn check_slot<H>(&self, host: &H, slot: usize) -> Result<(), AugmentError>
    where
        H: Augmentable + ?Sized,
    {
        if slot >= host.slot_count() {
            return Err(AugmentError::SlotOutOfRange {
                host: host.host_id().to_string(),
                slot,
                count: host.slot_count(),
            });
        }
        Ok(())
    }

    fn occupant_grants(&self, occupant: &str, tag: &str) -> bool {
        self.catalog
            .profile(occupant)
            .map(|profile| matcher::contains_exact(tag, profile.granted_tags()))
            .unwrap_or(false)
    }

    /// Namespaced tags that would leave the host if `slot` were emptied.
    fn revocable_grants<H: Augmentable + ?Sized>(&self, host: &H, slot: usize) -> Vec<String> {
        let Some(occupant) = host.slot_occupant(slot) else {
            return Vec::new();
        };
        let profile = match self.catalog.profile(occupant) {
            Ok(profile) => profile,
            Err(e) => {
                warn!("{} slot {} holds {}", host.host_id(), slot, e);
                return Vec::new();
            }
        };
        let others = host.other_occupants(slot);
        profile
            .granted_tags()
            .iter()
            .filter(|tag| !others.iter().any(|other| self.occupant_grants(other, tag)))
            .map(|tag| self.granted_tag_name(tag))
            .filter(|name| matcher::contains_exact(name, host.tags()))
            .collect()
    }

    /// Empty `slot`, revoking grants nobody else provides.
    fn detach<H: Augmentable + ?Sized>(&self, host: &mut H, slot: usize) -> Vec<String> {
        let revoked = self.revocable_grants(host, slot);
        for name in &revoked {
            host.remove_tag(name);
        }
        host.set_slot_occupant(slot, None);
        metrics::add_tags_revoked(revoked.len());
        revoked
    }

    /// Requirements `augment_id` would fail if installed into `slot` now.
    ///
    /// Tags that the slot's current occupant would take with it are ignored,
    /// since a swap removes them before the new augment lands.
    pub fn check_requirements<H: Augmentable + ?Sized>(
        &self,
        host: &H,
        augment_id: &str,
        slot: usize,
    ) -> Result<Vec<String>, AugmentError> {
        self.check_slot(host, slot)?;
        let profile = self.catalog.profile(augment_id)?;
        let leaving = self.revocable_grants(host, slot);
        let projected: Vec<&str> = host
            .tags()
            .iter()
            .filter(|tag| !leaving.contains(*tag))
            .map(String::as_str)
            .collect();
        Ok(self.unmet_requirements(profile, &projected))
    }

    /// Install `augment_id` into `slot`, displacing any prior occupant.
    ///
    /// A declined install leaves host and inventory untouched, and shows the
    /// augment's rejection string unless it is empty.
    pub fn install<H, I, R>(
        &self,
        host: &mut H,
        augment_id: &str,
        slot: usize,
        inventory: &mut I,
        display: &mut R,
    ) -> Result<InstallOutcome, AugmentError>
    where
        H: Augmentable + ?Sized,
        I: Inventory + ?Sized,
        R: RejectionDisplay + ?Sized,
    {
        self.check_slot(host, slot)?;
        let profile = self.catalog.profile(augment_id)?;
        if inventory.quantity(augment_id) == 0 {
            return Err(AugmentError::NotInInventory(augment_id.to_string()));
        }

        let unmet = self.check_requirements(host, augment_id, slot)?;
        if !unmet.is_empty() {
            let message = profile.rejection_string().to_string();
            warn!(
                "install of {} into {} slot {} declined; unmet: {:?}",
                augment_id,
                host.host_id(),
                slot,
                unmet
            );
            if !message.is_empty() {
                debug!("showing rejection: {}", escape_log(&message));
                display.show(&message);
            }
            metrics::inc_rejections();
            return Ok(InstallOutcome::Rejected {
                augment_id: augment_id.to_string(),
                slot,
                unmet,
                message,
            });
        }

        let displaced = host.slot_occupant(slot).map(str::to_string);
        let revoked = if displaced.is_some() {
            self.detach(host, slot)
        } else {
            Vec::new()
        };

        inventory.lose_item(augment_id, 1);
        if let Some(prior) = &displaced {
            inventory.gain_item(prior, self.rules.default_gain);
            metrics::inc_displacements();
        }

        let mut granted = Vec::new();
        for tag in profile.granted_tags() {
            let name = self.granted_tag_name(tag);
            if host.add_tag(&name) {
                granted.push(name);
            }
        }
        host.set_slot_occupant(slot, Some(augment_id.to_string()));
        inventory.refresh_holder(host.host_id());

        metrics::inc_installs();
        metrics::add_tags_granted(granted.len());
        info!(
            "installed {} into {} slot {} (displaced {:?}, granted {:?})",
            augment_id,
            host.host_id(),
            slot,
            displaced,
            granted
        );

        Ok(InstallOutcome::Installed {
            augment_id: augment_id.to_string(),
            slot,
            displaced,
            granted,
            revoked,
        })
    }

    /// Empty `slot` and return the augment to the inventory.
    ///
    /// `gain` overrides how many units come back; `None` uses the configured
    /// default. Removing from an empty slot is a no-op.
    pub fn remove<H, I>(
        &self,
        host: &mut H,
        slot: usize,
        inventory: &mut I,
        gain: Option<u32>,
    ) -> Result<RemoveOutcome, AugmentError>
    where
        H: Augmentable + ?Sized,
        I: Inventory + ?Sized,
    {
        self.check_slot(host, slot)?;
        let Some(augment_id) = host.slot_occupant(slot).map(str::to_string) else {
            debug!("{} slot {} already empty", host.host_id(), slot);
            return Ok(RemoveOutcome::NothingRemoved);
        };

        let revoked = self.detach(host, slot);
        let returned = gain.unwrap_or(self.rules.default_gain);
        if returned > 0 {
            inventory.gain_item(&augment_id, returned);
        }
        inventory.refresh_holder(host.host_id());

        metrics::inc_removals();
        info!(
            "removed {} from {} slot {} (revoked {:?}, returned {})",
            augment_id,
            host.host_id(),
            slot,
            revoked,
            returned
        );

        Ok(RemoveOutcome::Removed {
            augment_id,
            slot,
            revoked,
            returned,
        })
    }

    /// Namespaced tags the host's current occupants grant, sorted.
    pub fn expected_grants<H: Augmentable + ?Sized>(&self, host: &H) -> Vec<String> {
        let mut names: Vec<String> = (0..host.slot_count())
            .filter_map(|slot| host.slot_occupant(slot))
            .filter_map(|occupant| self.catalog.profile(occupant).ok())
            .flat_map(|profile| profile.granted_tags().iter())
            .map(|tag| self.granted_tag_name(tag))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Namespaced tags actually on the host, sorted.
    pub fn present_grants<H: Augmentable + ?Sized>(&self, host: &H) -> Vec<String> {
        let prefix = normalize_tag(&self.rules.granted_tag_prefix);
        let mut names: Vec<String> = host
            .tags()
            .iter()
            .filter(|tag| tag.starts_with(&prefix))
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Bring the host's namespaced tags in line with its occupants' current
    /// profiles. Returns the tags added and the tags revoked.
    ///
    /// Install and remove keep grants consistent on their own; call this after
    /// editing the granted tags of an augment that may already be installed.
    pub fn reconcile_grants<H: Augmentable + ?Sized>(
        &self,
        host: &mut H,
    ) -> (Vec<String>, Vec<String>) {
        let expected = self.expected_grants(host);
        let present = self.present_grants(host);

        let revoked: Vec<String> = present
            .iter()
            .filter(|tag| !expected.contains(*tag))
            .cloned()
            .collect();
        let added: Vec<String> = expected
            .iter()
            .filter(|tag| !present.contains(*tag))
            .cloned()
            .collect();

        for tag in &revoked {
            host.remove_tag(tag);
        }
        for tag in &added {
            host.add_tag(tag);
        }
        if !added.is_empty() || !revoked.is_empty() {
            metrics::add_tags_granted(added.len());
            metrics::add_tags_revoked(revoked.len());
            info!(
                "reconciled grants on {} (added {:?}, revoked {:?})",
                host.host_id(),
                added,
                revoked
            );
        }
        (added, revoked)
    }
}
