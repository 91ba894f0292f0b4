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

//! The room session seam: the external collaborator the bridge observes
//! but does not own.

use roomlink_types::{LocalParticipantInfo, RemoteParticipantInfo, RoomStatus};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Opaque execution-context affinity token exposed by the session.
///
/// Handles built by the participant factory carry a clone of this token so
/// that track events for the participant can be posted back onto the
/// executor the embedding application drives its listener from. The bridge
/// itself never posts through it; it only threads the token from the
/// session to the factory.
#[derive(Clone)]
pub struct SchedulerHandle {
    post: Arc<dyn Fn(Box<dyn FnOnce() + Send>) + Send + Sync>,
}

impl SchedulerHandle {
    pub fn new<F>(post: F) -> Self
    where
        F: Fn(Box<dyn FnOnce() + Send>) + Send + Sync + 'static,
    {
        Self {
            post: Arc::new(post),
        }
    }

    /// A scheduler that runs tasks immediately on the calling thread.
    /// Suitable for single-threaded hosts and tests.
    pub fn inline() -> Self {
        Self::new(|task| task())
    }

    pub fn post(&self, task: Box<dyn FnOnce() + Send>) {
        (self.post)(task)
    }
}

impl fmt::Debug for SchedulerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SchedulerHandle")
    }
}

/// Read-only view of the room session. All getters reflect the session's
/// current state at call time; the bridge reads them only from inside an
/// event handler, where the session guarantees one-at-a-time delivery.
pub trait RoomSession: Send + Sync {
    /// Unique session id of the room.
    fn sid(&self) -> String;

    /// The local participant's sid and identity.
    fn local_participant(&self) -> LocalParticipantInfo;

    /// Currently connected remote participants keyed by identity.
    /// Iteration order of the map is the roster's natural order.
    fn remote_participants(&self) -> BTreeMap<String, RemoteParticipantInfo>;

    /// The executor token listener-side deliveries must be scheduled on.
    fn scheduler(&self) -> SchedulerHandle;

    /// Coarse connection status.
    fn status(&self) -> RoomStatus;
}
