use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use shared_config::AppConfig;

use crate::{
    BoardSnapshot, CallBoardError, CallSlot, CurrentCall, DisplayBoard, EventBroadcaster,
    EventReceiver, Patient, PatientPriority, PatientQueue, Professional, ServerEvent,
    SessionRegistry,
};

/// The authoritative in-memory board state.
///
/// Lives behind one mutex so every client action runs to completion
/// (validate, mutate, broadcast) before the next one is handled. Broadcasts
/// go out while the lock is held, which is what gives each subscriber the
/// acceptance-order delivery guarantee.
#[derive(Default)]
struct BoardState {
    sessions: SessionRegistry,
    queue: PatientQueue,
    call: CallSlot,
    display: DisplayBoard,
}

/// Single serialized mutation entry point for the whole call board.
///
/// Cheap to clone; clones share the same state and broadcast channel.
#[derive(Clone)]
pub struct CallBoard {
    state: Arc<Mutex<BoardState>>,
    events: EventBroadcaster,
}

impl CallBoard {
    pub fn new(event_channel_capacity: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(BoardState::default())),
            events: EventBroadcaster::new(event_channel_capacity),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.event_channel_capacity)
    }

    /// Receiver for all broadcast state changes. Each connection holds one.
    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }

    /// Full state snapshot, sent unicast to a freshly connected client.
    pub async fn snapshot(&self) -> BoardSnapshot {
        let state = self.state.lock().await;
        BoardSnapshot {
            patients: state.queue.to_vec(),
            calling: state.call.current().cloned(),
            playlist_url: state.display.embed_url().map(String::from),
            professionals: state.sessions.professionals(),
        }
    }

    pub async fn login(
        &self,
        connection_id: Uuid,
        name: String,
        role: String,
    ) -> Result<Professional, CallBoardError> {
        let mut state = self.state.lock().await;
        let professional = state.sessions.login(connection_id, name, role)?;

        info!(
            "Professional \"{}\" ({}) logged in (connection {})",
            professional.name, professional.role, connection_id
        );
        self.events
            .send(ServerEvent::ProfessionalListUpdated(
                state.sessions.professionals(),
            ));
        Ok(professional)
    }

    /// Explicit logout. A no-op when the connection is not logged in: no
    /// error, no broadcast.
    pub async fn logout(&self, connection_id: Uuid) {
        let mut state = self.state.lock().await;
        self.end_session(&mut state, connection_id, "logged out");
    }

    /// Transport-level disconnection. Identical effect to logout.
    pub async fn disconnect(&self, connection_id: Uuid) {
        let mut state = self.state.lock().await;
        self.end_session(&mut state, connection_id, "disconnected");
    }

    pub async fn add_patient(
        &self,
        connection_id: Uuid,
        name: String,
        priority: PatientPriority,
    ) -> Result<Patient, CallBoardError> {
        let mut state = self.state.lock().await;
        let added_by = state.sessions.require_session(connection_id)?.clone();

        let patient = state
            .queue
            .add(name, priority, added_by.clone(), connection_id)?;

        info!(
            "Patient \"{}\" added by \"{}\" ({})",
            patient.name, added_by.name, added_by.role
        );
        self.events
            .send(ServerEvent::QueueUpdated(state.queue.to_vec()));
        Ok(patient)
    }

    pub async fn call_patient(
        &self,
        connection_id: Uuid,
        patient_id: &str,
    ) -> Result<CurrentCall, CallBoardError> {
        let mut state = self.state.lock().await;
        let called_by = state.sessions.require_session(connection_id)?.clone();

        let entry = state
            .queue
            .get(patient_id)
            .ok_or_else(|| CallBoardError::PatientNotFound(patient_id.to_string()))?;
        state.call.ensure_idle()?;
        if entry.added_by_connection != connection_id {
            return Err(CallBoardError::NotOwner);
        }

        // All checks passed: queue removal and call creation happen under
        // the same lock, so no observer ever sees the patient in both or
        // neither place.
        let patient = state.queue.take(patient_id).unwrap();
        let call = state
            .call
            .begin(patient, called_by.clone(), connection_id)
            .clone();

        info!(
            "Patient \"{}\" called by \"{}\" ({})",
            call.patient.name, called_by.name, called_by.role
        );
        self.events
            .send(ServerEvent::QueueUpdated(state.queue.to_vec()));
        self.events.send(ServerEvent::PatientCalled(call.clone()));
        Ok(call)
    }

    /// Ends the active call. `confirmed` only changes what gets logged
    /// ("arrived" versus "stopped"); the resulting state is the same.
    pub async fn confirm_or_stop_call(
        &self,
        connection_id: Uuid,
        patient_id: &str,
        confirmed: bool,
    ) -> Result<(), CallBoardError> {
        let mut state = self.state.lock().await;
        let professional = state.sessions.require_session(connection_id)?.clone();

        let call = state.call.finish(connection_id, patient_id)?;
        if confirmed {
            info!(
                "Arrival of \"{}\" confirmed by \"{}\"",
                call.patient.name, professional.name
            );
        } else {
            info!(
                "Call for \"{}\" stopped by \"{}\"",
                call.patient.name, professional.name
            );
        }

        self.events.send(ServerEvent::CallStopped);
        self.events
            .send(ServerEvent::QueueUpdated(state.queue.to_vec()));
        Ok(())
    }

    /// Updates the waiting-room display. An empty or absent URL clears it;
    /// anything else must be a valid playlist link.
    pub async fn update_video(
        &self,
        connection_id: Uuid,
        raw_url: Option<String>,
    ) -> Result<Option<String>, CallBoardError> {
        let mut state = self.state.lock().await;
        let professional = state.sessions.require_session(connection_id)?.clone();

        let raw_url = raw_url.filter(|url| !url.trim().is_empty());
        let embed_url = match raw_url {
            Some(url) => {
                let embed = state.display.update(&url)?.to_string();
                info!(
                    "Playlist updated by \"{}\": {}",
                    professional.name, embed
                );
                Some(embed)
            }
            None => {
                state.display.clear();
                info!("Display cleared by \"{}\"", professional.name);
                None
            }
        };

        self.events
            .send(ServerEvent::VideoUpdated(embed_url.clone()));
        Ok(embed_url)
    }

    fn end_session(&self, state: &mut BoardState, connection_id: Uuid, reason: &str) {
        let Some(professional) = state.sessions.remove(connection_id) else {
            return;
        };

        info!(
            "Professional \"{}\" ({}) {} (connection {})",
            professional.name, professional.role, reason, connection_id
        );
        self.events
            .send(ServerEvent::ProfessionalListUpdated(
                state.sessions.professionals(),
            ));

        if let Some(call) = state.call.release_owned_by(connection_id) {
            info!(
                "Call for \"{}\" stopped because \"{}\" {}",
                call.patient.name, professional.name, reason
            );
            self.events.send(ServerEvent::CallStopped);
            self.events
                .send(ServerEvent::QueueUpdated(state.queue.to_vec()));
        }
    }
}

impl Default for CallBoard {
    fn default() -> Self {
        Self::new(1000)
    }
}
