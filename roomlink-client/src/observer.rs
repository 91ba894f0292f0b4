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

//! The listener capability the bridge projects room events onto.

use crate::participant::{LocalParticipantContext, RemoteParticipantHandle};
use crate::session::RoomSession;
use anyhow::Result;
use roomlink_types::RoomError;
use std::sync::Arc;

/// Listener for room lifecycle events.
///
/// The bridge invokes these one at a time, in event order, and only while
/// the observer is alive and not marked for deletion. Any `Err` returned
/// here propagates to the caller of the triggering event method; the bridge
/// never retries.
///
/// A participant handle passed to [`on_participant_disconnected`] is still
/// resolvable through the bridge's roster for the duration of the callback;
/// it is released only after the callback returns.
///
/// [`on_participant_disconnected`]: RoomObserver::on_participant_disconnected
pub trait RoomObserver: Send + Sync {
    /// Room state established: delivered once per successful connect,
    /// immediately before [`on_connected`](RoomObserver::on_connected).
    /// `participants` is the initial roster snapshot in identity order.
    /// Ownership of `local` transfers to the listener.
    fn on_room_established(
        &self,
        room_sid: &str,
        local: LocalParticipantContext,
        local_sid: &str,
        local_identity: &str,
        participants: Vec<Arc<RemoteParticipantHandle>>,
    ) -> Result<()>;

    fn on_connected(&self, room: &dyn RoomSession) -> Result<()>;

    /// Room disconnected. `error` is `None` for a locally requested
    /// disconnect.
    fn on_disconnected(&self, room: &dyn RoomSession, error: Option<&RoomError>) -> Result<()>;

    /// Connect attempt failed. Unlike disconnect, the error is always
    /// present.
    fn on_connect_failure(&self, room: &dyn RoomSession, error: &RoomError) -> Result<()>;

    fn on_participant_connected(
        &self,
        room: &dyn RoomSession,
        participant: &Arc<RemoteParticipantHandle>,
    ) -> Result<()>;

    fn on_participant_disconnected(
        &self,
        room: &dyn RoomSession,
        participant: &Arc<RemoteParticipantHandle>,
    ) -> Result<()>;

    fn on_recording_started(&self, room: &dyn RoomSession) -> Result<()>;

    fn on_recording_stopped(&self, room: &dyn RoomSession) -> Result<()>;
}
