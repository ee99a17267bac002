use thiserror::Error;

/// Errors produced by call board actions.
///
/// Every variant is recoverable and caller-local: it is reported back to the
/// connection that issued the action as an `error_message` and never mutates
/// or broadcasts shared state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CallBoardError {
    #[error("You need to be logged in to perform this action")]
    NotAuthenticated,

    #[error("Invalid login information: name and role are required")]
    InvalidLogin,

    #[error("Invalid patient data: a name is required")]
    InvalidPatientData,

    #[error("Patient not found in the queue: {0}")]
    PatientNotFound(String),

    #[error("A patient is already being called: {0}")]
    CallInProgress(String),

    #[error("No active call matches patient {0}")]
    NoActiveCall(String),

    #[error("Only the professional who added a patient may call them, and only the caller may end the call")]
    NotOwner,

    #[error("Invalid link: a full YouTube playlist URL is required")]
    InvalidPlaylistLink,
}
