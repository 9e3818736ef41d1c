use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner shared by node and edge ids, for cheap comparisons.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

macro_rules! interned_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Spur);

        impl $name {
            /// Prefix used for ids allocated by a graph (`<prefix>-<n>`).
            pub const PREFIX: &'static str = $prefix;

            /// Intern a string as an id, or return the existing one.
            pub fn intern(s: &str) -> Self {
                $name(INTERNER.get_or_intern(s))
            }

            /// Resolve back to a string slice.
            pub fn as_str(&self) -> &str {
                INTERNER.resolve(&self.0)
            }

            /// Numeric suffix of an allocated id (`node-12` → `12`), if any.
            pub fn numeric_suffix(&self) -> Option<u64> {
                self.as_str()
                    .strip_prefix(Self::PREFIX)
                    .and_then(|rest| rest.strip_prefix('-'))
                    .and_then(|n| n.parse().ok())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.as_str())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Ok($name::intern(&s))
            }
        }
    };
}

interned_id!(
    /// Stable identifier of a node, unique within a graph. Join key for edges.
    NodeId,
    "node"
);

interned_id!(
    /// Stable identifier of a connection.
    EdgeId,
    "edge"
);

/// Per-graph id allocator. Suffixes grow until they reach `u64::MAX`, then
/// restart from zero; the `taken` check keeps every id unique either way.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Allocate the next node id for which `taken` returns false.
    pub fn next_node(&mut self, taken: impl Fn(NodeId) -> bool) -> NodeId {
        loop {
            let id = NodeId::intern(&format!("{}-{}", NodeId::PREFIX, self.bump()));
            if !taken(id) {
                return id;
            }
        }
    }

    /// Allocate the next edge id for which `taken` returns false.
    pub fn next_edge(&mut self, taken: impl Fn(EdgeId) -> bool) -> EdgeId {
        loop {
            let id = EdgeId::intern(&format!("{}-{}", EdgeId::PREFIX, self.bump()));
            if !taken(id) {
                return id;
            }
        }
    }

    /// Make sure future ids are allocated above `suffix`.
    pub fn advance_past(&mut self, suffix: u64) {
        self.next = self.next.max(suffix.saturating_add(1));
    }

    fn bump(&mut self) -> u64 {
        let n = self.next;
        self.next = n.checked_add(1).unwrap_or_else(|| {
            log::debug!("id suffixes exhausted, restarting from zero");
            0
        });
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = NodeId::intern("idea_root");
        let b = NodeId::intern("idea_root");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "idea_root");
    }

    #[test]
    fn allocator_skips_taken_ids() {
        let mut ids = IdAllocator::default();
        let taken = NodeId::intern("node-0");
        let id = ids.next_node(|candidate| candidate == taken);
        assert_eq!(id.as_str(), "node-1");
    }

    #[test]
    fn allocator_is_monotonic_after_advance() {
        let mut ids = IdAllocator::default();
        ids.advance_past(41);
        assert_eq!(ids.next_edge(|_| false).as_str(), "edge-42");
        assert_eq!(ids.next_node(|_| false).as_str(), "node-43");
    }

    #[test]
    fn allocator_restarts_after_the_largest_suffix() {
        let mut ids = IdAllocator::default();
        ids.advance_past(u64::MAX);
        let top = NodeId::intern(&format!("node-{}", u64::MAX));
        assert_eq!(ids.next_node(|candidate| candidate == top).as_str(), "node-0");
        assert_eq!(ids.next_node(|_| false).as_str(), "node-1");
    }

    #[test]
    fn numeric_suffix_parses_allocated_ids_only() {
        assert_eq!(NodeId::intern("node-7").numeric_suffix(), Some(7));
        assert_eq!(NodeId::intern("a1b2c3").numeric_suffix(), None);
        assert_eq!(EdgeId::intern("edge-x").numeric_suffix(), None);
    }
}
