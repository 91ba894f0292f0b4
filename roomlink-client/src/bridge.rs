/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

//! The room roster bridge: projects room session events onto a
//! [`RoomObserver`] and keeps the participant roster in sync.

use crate::observer::RoomObserver;
use crate::participant::{LocalParticipantContext, ParticipantFactory, RemoteParticipantHandle};
use crate::roster::Roster;
use crate::session::RoomSession;
use log::{debug, warn};
use roomlink_types::{RemoteParticipantInfo, RoomError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    /// A participant-disconnected event arrived for an identity the roster
    /// has no entry for. Protocol violation by the session collaborator;
    /// the bridge reports it rather than continuing with a missing handle.
    #[error("no roster entry for disconnecting participant {0}")]
    UnknownParticipant(String),

    /// The observer itself failed while handling a notification. Propagated
    /// to the caller of the triggering event method; the bridge does not
    /// retry.
    #[error("listener failed during {callback}")]
    Listener {
        callback: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

/// Flag guarded by the deletion lock. The lock is held for the duration of
/// every event handler body, so `mark_deleted` can never interleave with a
/// handler's validity check.
#[derive(Debug, Default)]
struct BridgeState {
    observer_deleted: bool,
}

/// Bridges a room session's event stream to a [`RoomObserver`].
///
/// The observer is held weakly: if the embedding application drops its last
/// strong reference, every subsequent event becomes a logged no-op. For an
/// orderly teardown the owner calls [`mark_deleted`](Self::mark_deleted)
/// first, which closes the race between an in-flight event and concurrent
/// destruction: a handler either completed its validity check before the
/// flag was set (and runs to completion) or observes the flag and does
/// nothing, not even partial roster mutation.
///
/// The roster lives behind its own `RwLock` and is only written while the
/// deletion lock is held. Reads take no part in handler serialization, so
/// an observer may query [`participants`](Self::participants) synchronously
/// from inside a callback; in particular, the handle delivered to
/// `on_participant_disconnected` is still resolvable there.
pub struct RoomRosterBridge {
    observer: Weak<dyn RoomObserver>,
    factory: Arc<dyn ParticipantFactory>,
    deletion_lock: Mutex<BridgeState>,
    roster: RwLock<Roster>,
}

impl RoomRosterBridge {
    pub fn new(observer: Weak<dyn RoomObserver>, factory: Arc<dyn ParticipantFactory>) -> Self {
        debug!("room roster bridge created");
        Self {
            observer,
            factory,
            deletion_lock: Mutex::new(BridgeState::default()),
            roster: RwLock::new(Roster::new()),
        }
    }

    /// Marks the observer as deleted so that no further notifications are
    /// delivered. Idempotent; called exactly once by the owner before it
    /// releases the bridge.
    pub fn mark_deleted(&self) {
        let mut state = self.lock_state();
        state.observer_deleted = true;
        debug!("room observer marked for deletion");
    }

    /// Room connected: reads the session's sid/local participant, builds
    /// the initial roster snapshot, then notifies the observer twice --
    /// `on_room_established` followed by `on_connected`.
    pub fn on_connected(&self, room: &dyn RoomSession) -> Result<(), BridgeError> {
        let state = self.lock_state();
        let Some(observer) = self.valid_observer(&state, "on_connected") else {
            return Ok(());
        };

        let room_sid = room.sid();
        let local = room.local_participant();
        let local_context = LocalParticipantContext::new(local.clone());
        let snapshot = self.build_roster_snapshot(room);
        debug!(
            "room {room_sid} connected with {} remote participant(s)",
            snapshot.len()
        );

        observer
            .on_room_established(
                &room_sid,
                local_context,
                &local.sid,
                &local.identity,
                snapshot,
            )
            .map_err(|source| BridgeError::Listener {
                callback: "on_room_established",
                source,
            })?;
        observer
            .on_connected(room)
            .map_err(|source| BridgeError::Listener {
                callback: "on_connected",
                source,
            })
    }

    /// Room disconnected, with an error for remote causes and `None` for a
    /// locally requested disconnect. Does not touch the roster: entries are
    /// released by the participant-disconnected events or, failing that,
    /// when the bridge is dropped.
    pub fn on_disconnected(
        &self,
        room: &dyn RoomSession,
        error: Option<&RoomError>,
    ) -> Result<(), BridgeError> {
        let state = self.lock_state();
        let Some(observer) = self.valid_observer(&state, "on_disconnected") else {
            return Ok(());
        };
        observer
            .on_disconnected(room, error)
            .map_err(|source| BridgeError::Listener {
                callback: "on_disconnected",
                source,
            })
    }

    /// Connect attempt failed. The error is always present here.
    pub fn on_connect_failure(
        &self,
        room: &dyn RoomSession,
        error: &RoomError,
    ) -> Result<(), BridgeError> {
        let state = self.lock_state();
        let Some(observer) = self.valid_observer(&state, "on_connect_failure") else {
            return Ok(());
        };
        observer
            .on_connect_failure(room, error)
            .map_err(|source| BridgeError::Listener {
                callback: "on_connect_failure",
                source,
            })
    }

    /// A remote participant joined. The handle is inserted into the roster
    /// before the observer is notified, so a roster query from inside the
    /// callback already sees it.
    pub fn on_participant_connected(
        &self,
        room: &dyn RoomSession,
        participant: &RemoteParticipantInfo,
    ) -> Result<(), BridgeError> {
        let state = self.lock_state();
        let Some(observer) = self.valid_observer(&state, "on_participant_connected") else {
            return Ok(());
        };

        let handle = self.factory.build_handle(participant, room.scheduler());
        debug!("participant {} connected", participant.identity);
        self.write_roster()
            .insert(participant.identity.clone(), handle.clone());

        observer
            .on_participant_connected(room, &handle)
            .map_err(|source| BridgeError::Listener {
                callback: "on_participant_connected",
                source,
            })
    }

    /// A remote participant left. The observer is notified first; only
    /// after the callback returns is the roster entry erased and the
    /// durable reference released.
    pub fn on_participant_disconnected(
        &self,
        room: &dyn RoomSession,
        participant: &RemoteParticipantInfo,
    ) -> Result<(), BridgeError> {
        let state = self.lock_state();
        let Some(observer) = self.valid_observer(&state, "on_participant_disconnected") else {
            return Ok(());
        };

        let handle = self
            .read_roster_handle(&participant.identity)
            .ok_or_else(|| BridgeError::UnknownParticipant(participant.identity.clone()))?;

        let result = observer.on_participant_disconnected(room, &handle);

        debug!("participant {} disconnected", participant.identity);
        self.write_roster().remove(&participant.identity);

        result.map_err(|source| BridgeError::Listener {
            callback: "on_participant_disconnected",
            source,
        })
    }

    pub fn on_recording_started(&self, room: &dyn RoomSession) -> Result<(), BridgeError> {
        let state = self.lock_state();
        let Some(observer) = self.valid_observer(&state, "on_recording_started") else {
            return Ok(());
        };
        observer
            .on_recording_started(room)
            .map_err(|source| BridgeError::Listener {
                callback: "on_recording_started",
                source,
            })
    }

    pub fn on_recording_stopped(&self, room: &dyn RoomSession) -> Result<(), BridgeError> {
        let state = self.lock_state();
        let Some(observer) = self.valid_observer(&state, "on_recording_stopped") else {
            return Ok(());
        };
        observer
            .on_recording_stopped(room)
            .map_err(|source| BridgeError::Listener {
                callback: "on_recording_stopped",
                source,
            })
    }

    /// Current roster snapshot in identity order. Safe to call from inside
    /// observer callbacks.
    pub fn participants(&self) -> Vec<Arc<RemoteParticipantHandle>> {
        self.roster
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot()
    }

    /// Whether the roster currently holds a handle for `identity`. Safe to
    /// call from inside observer callbacks.
    pub fn contains_participant(&self, identity: &str) -> bool {
        self.roster
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(identity)
    }

    /// Builds a handle for every remote participant in the session, in the
    /// session map's natural (identity-sorted) order, populating the live
    /// roster as a side effect. The returned sequence and the roster share
    /// the same handles. Must be called with the deletion lock held.
    fn build_roster_snapshot(&self, room: &dyn RoomSession) -> Vec<Arc<RemoteParticipantHandle>> {
        let participants = room.remote_participants();
        let scheduler = room.scheduler();
        let mut snapshot = Vec::with_capacity(participants.len());
        let mut roster = self.write_roster();
        for (identity, info) in participants {
            let handle = self.factory.build_handle(&info, scheduler.clone());
            roster.insert(identity, handle.clone());
            snapshot.push(handle);
        }
        snapshot
    }

    /// Upgrades the observer if notifications may still be delivered.
    /// Returns `None`, logging at warn level, when the owner has begun
    /// teardown or the observer has already been dropped. Callers must hold
    /// the deletion lock for the duration of the event handler.
    fn valid_observer(
        &self,
        state: &BridgeState,
        callback: &str,
    ) -> Option<Arc<dyn RoomObserver>> {
        if state.observer_deleted {
            warn!("room observer is marked for deletion, skipping {callback} callback");
            return None;
        }
        match self.observer.upgrade() {
            Some(observer) => Some(observer),
            None => {
                warn!("room observer reference has been destroyed, skipping {callback} callback");
                None
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, BridgeState> {
        self.deletion_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_roster(&self) -> std::sync::RwLockWriteGuard<'_, Roster> {
        self.roster.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_roster_handle(&self, identity: &str) -> Option<Arc<RemoteParticipantHandle>> {
        self.roster
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(identity)
            .cloned()
    }
}

impl Drop for RoomRosterBridge {
    fn drop(&mut self) {
        // Remaining durable references (e.g. after a room-level disconnect
        // with no per-participant events) are released here.
        let roster = self.roster.get_mut().unwrap_or_else(PoisonError::into_inner);
        if !roster.is_empty() {
            debug!("releasing {} roster entr(ies) at teardown", roster.len());
        }
    }
}
