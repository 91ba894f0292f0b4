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

//! Plain-data types shared by the roomlink adapters.
//!
//! Everything here is data only: no I/O, no callbacks, no state machines.
//! The bridge crate builds its session and listener seams out of these;
//! the capture crate is self-contained and shares nothing with the bridge.

pub mod error;
pub mod participant;
pub mod track;

pub use error::RoomError;
pub use participant::{LocalParticipantInfo, RemoteParticipantInfo, RoomStatus};
pub use track::{AudioTrackDescriptor, VideoTrackDescriptor};
