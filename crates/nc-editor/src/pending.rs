//! In-flight host requests, keyed by correlation id.
//!
//! Each response must find its entry here to have any effect. Entries
//! leave the map on response, timeout, node deletion or graph reload, so a
//! late response is provably ignored.

use nc_core::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(pub u64);

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PendingKind {
    /// Reference content requested for `node`.
    Content { node: NodeId, path: String },
    /// Ideas requested from `node`.
    Generation { node: NodeId },
}

impl PendingKind {
    pub fn node(&self) -> NodeId {
        match self {
            PendingKind::Content { node, .. } | PendingKind::Generation { node } => *node,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pending {
    pub kind: PendingKind,
    pub deadline_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct PendingRequests {
    next: u64,
    entries: HashMap<CorrelationId, Pending>,
}

impl PendingRequests {
    /// Register a request that expires `timeout_ms` after `now_ms`.
    pub fn issue(&mut self, kind: PendingKind, now_ms: u64, timeout_ms: u64) -> CorrelationId {
        self.next += 1;
        let id = CorrelationId(self.next);
        self.entries.insert(
            id,
            Pending {
                kind,
                deadline_ms: now_ms.saturating_add(timeout_ms),
            },
        );
        id
    }

    /// Claim the entry for a response. Unknown ids were already resolved,
    /// expired or cancelled.
    pub fn take(&mut self, id: CorrelationId) -> Option<Pending> {
        self.take_if(id, |_| true)
    }

    /// Claim the entry only if `accepts` its kind. A response of the wrong
    /// kind leaves the entry in place, so it can still be answered or expire.
    pub fn take_if(&mut self, id: CorrelationId, accepts: impl FnOnce(&PendingKind) -> bool) -> Option<Pending> {
        match self.entries.get(&id) {
            None => {
                log::warn!("ignoring stale response {id}");
                None
            }
            Some(pending) if !accepts(&pending.kind) => {
                log::warn!("response {id} does not match its request ({:?})", pending.kind);
                None
            }
            Some(_) => self.entries.remove(&id),
        }
    }

    pub fn contains(&self, id: CorrelationId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Drop every request that targets `node`.
    pub fn cancel_node(&mut self, node: NodeId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, p| p.kind.node() != node);
        let cancelled = before - self.entries.len();
        if cancelled > 0 {
            log::debug!("cancelled {cancelled} request(s) for deleted node {node}");
        }
        cancelled
    }

    pub fn cancel_all(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        n
    }

    /// Remove and return every entry past its deadline, oldest first.
    pub fn expire(&mut self, now_ms: u64) -> Vec<(CorrelationId, Pending)> {
        let overdue: Vec<CorrelationId> = self
            .entries
            .iter()
            .filter(|(_, p)| p.deadline_ms <= now_ms)
            .map(|(id, _)| *id)
            .collect();
        let mut out: Vec<_> = overdue
            .into_iter()
            .filter_map(|id| self.entries.remove(&id).map(|p| (id, p)))
            .collect();
        out.sort_by_key(|(id, _)| *id);
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(node: &str) -> PendingKind {
        PendingKind::Content {
            node: NodeId::intern(node),
            path: format!("{node}.md"),
        }
    }

    #[test]
    fn responses_are_claimed_once() {
        let mut p = PendingRequests::default();
        let id = p.issue(content("a"), 0, 100);
        assert!(p.take(id).is_some());
        assert!(p.take(id).is_none());
    }

    #[test]
    fn mismatched_kind_leaves_the_entry_pending() {
        let mut p = PendingRequests::default();
        let id = p.issue(content("a"), 0, 100);
        assert!(p.take_if(id, |k| matches!(k, PendingKind::Generation { .. })).is_none());
        assert!(p.contains(id));
        assert!(p.take_if(id, |k| matches!(k, PendingKind::Content { .. })).is_some());
        assert!(!p.contains(id));
    }

    #[test]
    fn deleting_a_node_cancels_its_requests() {
        let mut p = PendingRequests::default();
        let a = p.issue(content("a"), 0, 100);
        let b = p.issue(
            PendingKind::Generation {
                node: NodeId::intern("a"),
            },
            0,
            100,
        );
        let other = p.issue(content("b"), 0, 100);
        assert_eq!(p.cancel_node(NodeId::intern("a")), 2);
        assert!(!p.contains(a) && !p.contains(b));
        assert!(p.contains(other));
    }

    #[test]
    fn expiry_respects_deadlines() {
        let mut p = PendingRequests::default();
        let early = p.issue(content("a"), 0, 100);
        let late = p.issue(content("b"), 50, 100);
        assert!(p.expire(99).is_empty());
        let expired: Vec<_> = p.expire(100).into_iter().map(|(id, _)| id).collect();
        assert_eq!(expired, vec![early]);
        assert!(p.contains(late));
        assert_eq!(p.expire(10_000).len(), 1);
        assert!(p.is_empty());
    }
}
