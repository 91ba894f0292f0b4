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

//! Room roster bridge for the roomlink stack.
//!
//! [`RoomRosterBridge`] consumes lifecycle events from a room session
//! (connect, disconnect, participant joined/left, recording toggled) and
//! projects them, in order, onto a [`RoomObserver`], while maintaining the
//! roster of currently connected remote participants. The bridge is the
//! single point of truth for roster membership: a participant handle exists
//! in the roster exactly while that participant is connected from the
//! bridge's point of view.
//!
//! The bridge never calls into an observer that is being torn down: the
//! owner calls [`RoomRosterBridge::mark_deleted`] before releasing it, and
//! every event handler checks the flag under the same lock before doing any
//! work. Late events are dropped with a warning, never an error.

pub mod bridge;
pub mod observer;
pub mod participant;
pub mod roster;
pub mod session;

pub use bridge::{BridgeError, RoomRosterBridge};
pub use observer::RoomObserver;
pub use participant::{
    DefaultParticipantFactory, LocalParticipantContext, ParticipantFactory,
    RemoteParticipantHandle,
};
pub use roster::Roster;
pub use session::{RoomSession, SchedulerHandle};
