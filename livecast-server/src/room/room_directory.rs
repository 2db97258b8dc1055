use dashmap::DashMap;
use livecast_core::{PeerId, RoomId};
use std::collections::HashSet;

/// Room name -> connected members.
///
/// A room exists while it has at least one member: it is created by the first
/// join and removed when the last member leaves.
#[derive(Default)]
pub struct RoomDirectory {
    rooms: DashMap<RoomId, HashSet<PeerId>>,
}

impl RoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the peer was already a member.
    pub fn join(&self, room_id: &RoomId, peer_id: &PeerId) -> bool {
        self.rooms
            .entry(room_id.clone())
            .or_default()
            .insert(peer_id.clone())
    }

    /// Returns `false` if the peer was not a member.
    pub fn leave(&self, room_id: &RoomId, peer_id: &PeerId) -> bool {
        let removed = match self.rooms.get_mut(room_id) {
            Some(mut members) => members.remove(peer_id),
            None => return false,
        };
        self.rooms.remove_if(room_id, |_, members| members.is_empty());
        removed
    }

    /// Removes the peer from every room and returns the rooms it was in.
    pub fn leave_all(&self, peer_id: &PeerId) -> Vec<RoomId> {
        let mut left = Vec::new();
        for mut entry in self.rooms.iter_mut() {
            if entry.value_mut().remove(peer_id) {
                left.push(entry.key().clone());
            }
        }
        self.rooms.retain(|_, members| !members.is_empty());
        left
    }

    pub fn members(&self, room_id: &RoomId) -> Vec<PeerId> {
        self.rooms
            .get(room_id)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
