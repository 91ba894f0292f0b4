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

//! Participant handles and the factory seam that builds them.

use crate::session::SchedulerHandle;
use roomlink_types::{
    AudioTrackDescriptor, LocalParticipantInfo, RemoteParticipantInfo, VideoTrackDescriptor,
};
use std::fmt;
use std::sync::Arc;

/// The externally visible representation of one remote participant.
///
/// The bridge holds exactly one handle per currently connected remote
/// participant, behind an `Arc` durable enough to keep the handle alive for
/// the whole span between the participant-connected and
/// participant-disconnected notifications. Listeners may clone the `Arc`
/// and keep it past disconnect; the roster entry is what the bridge
/// releases.
pub struct RemoteParticipantHandle {
    identity: String,
    sid: String,
    audio_tracks: Vec<AudioTrackDescriptor>,
    video_tracks: Vec<VideoTrackDescriptor>,
    scheduler: SchedulerHandle,
}

impl RemoteParticipantHandle {
    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn sid(&self) -> &str {
        &self.sid
    }

    pub fn audio_tracks(&self) -> &[AudioTrackDescriptor] {
        &self.audio_tracks
    }

    pub fn video_tracks(&self) -> &[VideoTrackDescriptor] {
        &self.video_tracks
    }

    /// The executor token track events for this participant are posted on.
    pub fn scheduler(&self) -> &SchedulerHandle {
        &self.scheduler
    }
}

impl fmt::Debug for RemoteParticipantHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteParticipantHandle")
            .field("identity", &self.identity)
            .field("sid", &self.sid)
            .field("audio_tracks", &self.audio_tracks.len())
            .field("video_tracks", &self.video_tracks.len())
            .finish()
    }
}

/// Opaque handle wrapping the local participant reference.
///
/// Ownership transfers to the listener in `on_room_established`; the
/// listener releases the underlying reference by dropping the context.
#[derive(Debug)]
pub struct LocalParticipantContext {
    local: LocalParticipantInfo,
}

impl LocalParticipantContext {
    pub fn new(local: LocalParticipantInfo) -> Self {
        Self { local }
    }

    pub fn local(&self) -> &LocalParticipantInfo {
        &self.local
    }

    pub fn into_inner(self) -> LocalParticipantInfo {
        self.local
    }
}

/// Builds externally visible handles from the session's native participant
/// entries. External so the embedding application can attach its own track
/// marshalling; the bridge passes the session's scheduler token through
/// unchanged.
pub trait ParticipantFactory: Send + Sync {
    fn build_handle(
        &self,
        info: &RemoteParticipantInfo,
        scheduler: SchedulerHandle,
    ) -> Arc<RemoteParticipantHandle>;
}

/// Factory that copies the session's track descriptors into the handle
/// as-is.
#[derive(Debug, Default)]
pub struct DefaultParticipantFactory;

impl ParticipantFactory for DefaultParticipantFactory {
    fn build_handle(
        &self,
        info: &RemoteParticipantInfo,
        scheduler: SchedulerHandle,
    ) -> Arc<RemoteParticipantHandle> {
        Arc::new(RemoteParticipantHandle {
            identity: info.identity.clone(),
            sid: info.sid.clone(),
            audio_tracks: info.audio_tracks.clone(),
            video_tracks: info.video_tracks.clone(),
            scheduler,
        })
    }
}
