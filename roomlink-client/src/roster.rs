use crate::participant::RemoteParticipantHandle;
use std::collections::HashMap;
use std::sync::Arc;

/// The live mapping from participant identity to durable handle.
///
/// A plain `HashMap` with a sorted identity index kept alongside, so that
/// snapshots and key listings come out in identity order without paying for
/// a tree on every lookup.
#[derive(Debug, Default)]
pub struct Roster {
    map: HashMap<String, Arc<RemoteParticipantHandle>>,
    identities: Vec<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
            identities: Vec::new(),
        }
    }

    pub fn get(&self, identity: &str) -> Option<&Arc<RemoteParticipantHandle>> {
        self.map.get(identity)
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.map.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Inserts a handle, keeping the identity index sorted. Returns the
    /// previous handle if the identity was already present.
    pub fn insert(
        &mut self,
        identity: String,
        handle: Arc<RemoteParticipantHandle>,
    ) -> Option<Arc<RemoteParticipantHandle>> {
        let previous = self.map.insert(identity.clone(), handle);
        if previous.is_none() {
            if let Err(index) = self.identities.binary_search(&identity) {
                self.identities.insert(index, identity);
            }
        }
        previous
    }

    pub fn remove(&mut self, identity: &str) -> Option<Arc<RemoteParticipantHandle>> {
        if let Ok(index) = self.identities.binary_search_by(|i| i.as_str().cmp(identity)) {
            self.identities.remove(index);
        }
        self.map.remove(identity)
    }

    /// Connected identities in sorted order.
    pub fn ordered_identities(&self) -> &[String] {
        &self.identities
    }

    /// Cloned handles in identity order.
    pub fn snapshot(&self) -> Vec<Arc<RemoteParticipantHandle>> {
        self.identities
            .iter()
            .filter_map(|identity| self.map.get(identity).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::{DefaultParticipantFactory, ParticipantFactory};
    use crate::session::SchedulerHandle;
    use roomlink_types::RemoteParticipantInfo;

    fn handle(identity: &str) -> Arc<RemoteParticipantHandle> {
        DefaultParticipantFactory.build_handle(
            &RemoteParticipantInfo {
                identity: identity.to_string(),
                sid: format!("PA_{identity}"),
                audio_tracks: vec![],
                video_tracks: vec![],
            },
            SchedulerHandle::inline(),
        )
    }

    #[test]
    fn snapshot_is_identity_sorted_regardless_of_insert_order() {
        let mut roster = Roster::new();
        for identity in ["carol", "alice", "bob"] {
            roster.insert(identity.to_string(), handle(identity));
        }
        let order: Vec<String> = roster
            .snapshot()
            .iter()
            .map(|h| h.identity().to_string())
            .collect();
        assert_eq!(order, ["alice", "bob", "carol"]);
        assert_eq!(roster.ordered_identities(), ["alice", "bob", "carol"]);
    }

    #[test]
    fn remove_keeps_index_consistent() {
        let mut roster = Roster::new();
        for identity in ["alice", "bob", "carol"] {
            roster.insert(identity.to_string(), handle(identity));
        }
        assert!(roster.remove("bob").is_some());
        assert!(roster.remove("bob").is_none());
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.ordered_identities(), ["alice", "carol"]);
        assert!(!roster.contains("bob"));
    }

    #[test]
    fn reinsert_replaces_handle_without_duplicating_identity() {
        let mut roster = Roster::new();
        roster.insert("alice".to_string(), handle("alice"));
        let previous = roster.insert("alice".to_string(), handle("alice"));
        assert!(previous.is_some());
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.ordered_identities(), ["alice"]);
    }
}
