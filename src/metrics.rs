//! Process-wide augment counters.
//! Relaxed atomics: counts are advisory and read via [`snapshot`].
use std::sync::atomic::{AtomicU64, Ordering};

static INSTALLS: AtomicU64 = AtomicU64::new(0);
static REJECTIONS: AtomicU64 = AtomicU64::new(0);
static REMOVALS: AtomicU64 = AtomicU64::new(0);
static DISPLACEMENTS: AtomicU64 = AtomicU64::new(0);
static TAGS_GRANTED: AtomicU64 = AtomicU64::new(0);
static TAGS_REVOKED: AtomicU64 = AtomicU64::new(0);

pub fn inc_installs() {
    INSTALLS.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_rejections() {
    REJECTIONS.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_removals() {
    REMOVALS.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_displacements() {
    DISPLACEMENTS.fetch_add(1, Ordering::Relaxed);
}

pub fn add_tags_granted(count: usize) {
    TAGS_GRANTED.fetch_add(count as u64, Ordering::Relaxed);
}

pub fn add_tags_revoked(count: usize) {
    TAGS_REVOKED.fetch_add(count as u64, Ordering::Relaxed);
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub installs: u64,
    pub rejections: u64,
    pub removals: u64,
    pub displacements: u64,
    pub tags_granted: u64,
    pub tags_revoked: u64,
}

pub fn snapshot() -> Snapshot {
    Snapshot {
        installs: INSTALLS.load(Ordering::Relaxed),
        rejections: REJECTIONS.load(Ordering::Relaxed),
        removals: REMOVALS.load(Ordering::Relaxed),
        displacements: DISPLACEMENTS.load(Ordering::Relaxed),
        tags_granted: TAGS_GRANTED.load(Ordering::Relaxed),
        tags_revoked: TAGS_REVOKED.load(Ordering::Relaxed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Other tests bump the same counters concurrently, so only lower bounds hold.
    #[test]
    fn counters_only_grow() {
        let before = snapshot();
        inc_installs();
        inc_rejections();
        add_tags_granted(2);
        let after = snapshot();
        assert!(after.installs >= before.installs + 1);
        assert!(after.rejections >= before.rejections + 1);
        assert!(after.tags_granted >= before.tags_granted + 2);
    }
}
