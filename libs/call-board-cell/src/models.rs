use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a logged-in staff member, snapshotted onto every action
/// that creates shared state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professional {
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PatientPriority {
    High,
    #[default]
    Normal,
}

impl PatientPriority {
    /// Sort rank: high priority sorts before normal.
    pub fn rank(&self) -> u8 {
        match self {
            PatientPriority::High => 0,
            PatientPriority::Normal => 1,
        }
    }
}

impl From<String> for PatientPriority {
    // Anything other than "high" is treated as normal priority.
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case("high") {
            PatientPriority::High
        } else {
            PatientPriority::Normal
        }
    }
}

impl From<PatientPriority> for String {
    fn from(value: PatientPriority) -> Self {
        match value {
            PatientPriority::High => "high".to_string(),
            PatientPriority::Normal => "normal".to_string(),
        }
    }
}

/// A patient waiting in the queue.
///
/// `id` is unique process-wide and monotonically orderable by creation,
/// even for patients added within the same millisecond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub priority: PatientPriority,
    pub added_at: DateTime<Utc>,
    pub added_by: Professional,
    pub added_by_connection: Uuid,
}

/// The single patient currently being called, if any.
///
/// Constructed only through [`CurrentCall::begin`], which consumes the
/// queued `Patient` so it cannot remain in the queue while being called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentCall {
    #[serde(flatten)]
    pub patient: Patient,
    pub called_by: Professional,
    pub called_by_connection: Uuid,
}

impl CurrentCall {
    pub fn begin(patient: Patient, called_by: Professional, called_by_connection: Uuid) -> Self {
        Self {
            patient,
            called_by,
            called_by_connection,
        }
    }
}

/// Full board state pushed to a client right after it connects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub patients: Vec<Patient>,
    pub calling: Option<CurrentCall>,
    pub playlist_url: Option<String>,
    pub professionals: Vec<Professional>,
}

/// Actions a client may send over its WebSocket connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    ProfessionalLogin {
        #[serde(default)]
        name: String,
        #[serde(default)]
        role: String,
    },
    ProfessionalLogout,
    AddPatient {
        #[serde(default)]
        name: String,
        #[serde(default)]
        priority: PatientPriority,
    },
    CallPatient(String),
    ConfirmOrStopCall {
        patient_id: String,
        confirmed: bool,
    },
    UpdateVideo(Option<String>),
}

/// Messages pushed from the server to clients.
///
/// Everything except `CurrentState` and `ErrorMessage` is broadcast to all
/// connected clients; those two are unicast to a single connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    CurrentState(BoardSnapshot),
    ProfessionalListUpdated(Vec<Professional>),
    QueueUpdated(Vec<Patient>),
    PatientCalled(CurrentCall),
    CallStopped,
    VideoUpdated(Option<String>),
    ErrorMessage(String),
}
