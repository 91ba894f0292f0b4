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

use crate::track::{AudioTrackDescriptor, VideoTrackDescriptor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse room status as reported by the session collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomStatus {
    Connecting,
    Connected,
    Disconnected,
    Failed,
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomStatus::Connecting => write!(f, "connecting"),
            RoomStatus::Connected => write!(f, "connected"),
            RoomStatus::Disconnected => write!(f, "disconnected"),
            RoomStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A remote participant entry as the session collaborator sees it: native
/// identity plus the tracks currently published. This is the input to the
/// participant factory; the bridge never stores it directly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteParticipantInfo {
    pub identity: String,
    pub sid: String,
    pub audio_tracks: Vec<AudioTrackDescriptor>,
    pub video_tracks: Vec<VideoTrackDescriptor>,
}

/// The local participant's sid and identity, read off the session at
/// connect time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalParticipantInfo {
    pub sid: String,
    pub identity: String,
}
