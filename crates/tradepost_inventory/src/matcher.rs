//! Fungibility matching policies

use crate::item::ItemSpec;

/// Decides whether two item descriptions are interchangeable.
///
/// The policy is chosen by the owning context and passed explicitly into
/// every operation that compares or counts items.
pub trait ItemMatcher: Send + Sync {
    /// Whether `a` and `b` describe interchangeable resources
    fn matches(&self, a: &ItemSpec, b: &ItemSpec) -> bool;
}

/// Strict policy: same id and identical instance data.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatcher;

impl ItemMatcher for ExactMatcher {
    fn matches(&self, a: &ItemSpec, b: &ItemSpec) -> bool {
        a.same_resource(b)
    }
}

/// Fuzzy policy: same id, instance data ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct LooseMatcher;

impl ItemMatcher for LooseMatcher {
    fn matches(&self, a: &ItemSpec, b: &ItemSpec) -> bool {
        a.id() == b.id()
    }
}
