//! Drives the roster bridge against a scripted session and prints the
//! projected events. Run with `cargo run --example roster_demo`.

use anyhow::Result;
use roomlink_client::{
    DefaultParticipantFactory, LocalParticipantContext, RemoteParticipantHandle, RoomObserver,
    RoomRosterBridge, RoomSession, SchedulerHandle,
};
use roomlink_types::{LocalParticipantInfo, RemoteParticipantInfo, RoomError, RoomStatus};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

struct ScriptedSession {
    remote: Mutex<BTreeMap<String, RemoteParticipantInfo>>,
}

impl ScriptedSession {
    fn new(identities: &[&str]) -> Self {
        let remote = identities
            .iter()
            .map(|identity| {
                (
                    identity.to_string(),
                    RemoteParticipantInfo {
                        identity: identity.to_string(),
                        sid: format!("PA_{identity}"),
                        audio_tracks: vec![],
                        video_tracks: vec![],
                    },
                )
            })
            .collect();
        Self {
            remote: Mutex::new(remote),
        }
    }

    fn leave(&self, identity: &str) -> Option<RemoteParticipantInfo> {
        self.remote.lock().unwrap().remove(identity)
    }
}

impl RoomSession for ScriptedSession {
    fn sid(&self) -> String {
        "RM_demo".to_string()
    }

    fn local_participant(&self) -> LocalParticipantInfo {
        LocalParticipantInfo {
            sid: "PA_local".to_string(),
            identity: "me".to_string(),
        }
    }

    fn remote_participants(&self) -> BTreeMap<String, RemoteParticipantInfo> {
        self.remote.lock().unwrap().clone()
    }

    fn scheduler(&self) -> SchedulerHandle {
        SchedulerHandle::inline()
    }

    fn status(&self) -> RoomStatus {
        RoomStatus::Connected
    }
}

struct PrintObserver;

impl RoomObserver for PrintObserver {
    fn on_room_established(
        &self,
        room_sid: &str,
        _local: LocalParticipantContext,
        _local_sid: &str,
        local_identity: &str,
        participants: Vec<Arc<RemoteParticipantHandle>>,
    ) -> Result<()> {
        let roster: Vec<&str> = participants.iter().map(|p| p.identity()).collect();
        println!("room {room_sid} established for {local_identity}, roster: {roster:?}");
        Ok(())
    }

    fn on_connected(&self, room: &dyn RoomSession) -> Result<()> {
        println!("connected to {}", room.sid());
        Ok(())
    }

    fn on_disconnected(&self, room: &dyn RoomSession, error: Option<&RoomError>) -> Result<()> {
        println!("disconnected from {}: {error:?}", room.sid());
        Ok(())
    }

    fn on_connect_failure(&self, _room: &dyn RoomSession, error: &RoomError) -> Result<()> {
        println!("connect failure: {error}");
        Ok(())
    }

    fn on_participant_connected(
        &self,
        _room: &dyn RoomSession,
        participant: &Arc<RemoteParticipantHandle>,
    ) -> Result<()> {
        println!("participant connected: {}", participant.identity());
        Ok(())
    }

    fn on_participant_disconnected(
        &self,
        _room: &dyn RoomSession,
        participant: &Arc<RemoteParticipantHandle>,
    ) -> Result<()> {
        println!("participant disconnected: {}", participant.identity());
        Ok(())
    }

    fn on_recording_started(&self, _room: &dyn RoomSession) -> Result<()> {
        println!("recording started");
        Ok(())
    }

    fn on_recording_stopped(&self, _room: &dyn RoomSession) -> Result<()> {
        println!("recording stopped");
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let observer: Arc<dyn RoomObserver> = Arc::new(PrintObserver);
    let bridge = RoomRosterBridge::new(
        Arc::downgrade(&observer),
        Arc::new(DefaultParticipantFactory),
    );

    let session = ScriptedSession::new(&["alice", "bob"]);
    bridge.on_connected(&session)?;
    bridge.on_recording_started(&session)?;

    if let Some(alice) = session.leave("alice") {
        bridge.on_participant_disconnected(&session, &alice)?;
    }
    println!(
        "roster now: {:?}",
        bridge
            .participants()
            .iter()
            .map(|p| p.identity().to_string())
            .collect::<Vec<_>>()
    );

    bridge.mark_deleted();
    // Dropped with a warning, never delivered.
    bridge.on_disconnected(&session, None)?;
    Ok(())
}
