use std::collections::BTreeSet;

use orrery_common::BodyId;

/// Explicit per-pass body membership.
///
/// The base set is what the color pass draws; the bloom set is what the glow
/// pass draws before the bright-extract. Membership is stable state queried
/// by the renderer each frame, never a camera flag rewritten per tick.
///
/// A body tagged into `base` but not `bloom` renders with no glow at all —
/// that is the intended way to keep a body out of the effect, and the quiet
/// way to lose it when tagging is forgotten. Tests pin the behavior down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassMembership {
    base: BTreeSet<BodyId>,
    bloom: BTreeSet<BodyId>,
}

impl PassMembership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag a body into the base color pass.
    pub fn tag_base(&mut self, id: BodyId) {
        self.base.insert(id);
    }

    /// Tag a body into the bloom glow pass.
    pub fn tag_bloom(&mut self, id: BodyId) {
        self.bloom.insert(id);
    }

    /// Tag a body into every pass.
    pub fn tag_all(&mut self, id: BodyId) {
        self.tag_base(id);
        self.tag_bloom(id);
    }

    /// Remove a body from every pass.
    pub fn untag(&mut self, id: BodyId) {
        self.base.remove(&id);
        self.bloom.remove(&id);
    }

    pub fn in_base(&self, id: BodyId) -> bool {
        self.base.contains(&id)
    }

    pub fn in_bloom(&self, id: BodyId) -> bool {
        self.bloom.contains(&id)
    }

    /// Bodies drawn by the base color pass, in deterministic order.
    pub fn base(&self) -> &BTreeSet<BodyId> {
        &self.base
    }

    /// Bodies drawn by the glow pass, in deterministic order.
    pub fn bloom(&self) -> &BTreeSet<BodyId> {
        &self.bloom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagging_is_per_pass() {
        let mut passes = PassMembership::new();
        let id = BodyId::new();
        passes.tag_base(id);
        assert!(passes.in_base(id));
        assert!(!passes.in_bloom(id));
    }

    #[test]
    fn body_outside_bloom_set_gets_no_glow() {
        // The layer-mismatch hazard, stated positively: membership decides,
        // and nothing re-tags bodies behind the caller's back.
        let mut passes = PassMembership::new();
        let plain = BodyId::new();
        let glowing = BodyId::new();
        passes.tag_base(plain);
        passes.tag_all(glowing);

        assert!(passes.bloom().contains(&glowing));
        assert!(!passes.bloom().contains(&plain));
        assert!(passes.base().contains(&plain));
    }

    #[test]
    fn tagging_is_idempotent() {
        let mut passes = PassMembership::new();
        let id = BodyId::new();
        passes.tag_all(id);
        passes.tag_all(id);
        assert_eq!(passes.base().len(), 1);
        assert_eq!(passes.bloom().len(), 1);
    }

    #[test]
    fn untag_clears_both_passes() {
        let mut passes = PassMembership::new();
        let id = BodyId::new();
        passes.tag_all(id);
        passes.untag(id);
        assert!(!passes.in_base(id));
        assert!(!passes.in_bloom(id));
    }
}
