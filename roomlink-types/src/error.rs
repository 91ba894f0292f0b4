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

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Room-level error as reported by the media service: a numeric code plus a
/// short message and a longer explanation. Carried through disconnect and
/// connect-failure notifications; the bridge never interprets the fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("room error {code}: {message}")]
pub struct RoomError {
    pub code: i32,
    pub message: String,
    pub explanation: String,
}

impl RoomError {
    pub fn new(code: i32, message: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            explanation: explanation.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_and_message() {
        let err = RoomError::new(53001, "Signaling connection error", "The server dropped us");
        assert_eq!(err.to_string(), "room error 53001: Signaling connection error");
    }

    #[test]
    fn serde_round_trip_preserves_all_fields() {
        let err = RoomError::new(20101, "Invalid token", "Access token expired");
        let json = serde_json::to_string(&err).unwrap();
        let back: RoomError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }
}
