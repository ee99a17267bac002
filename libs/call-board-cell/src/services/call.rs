use uuid::Uuid;

use crate::{CallBoardError, CurrentCall, Patient, Professional};

/// The call state machine: idle, or exactly one patient being called.
///
/// Ownership of an active call is pinned to the connection that issued it,
/// not just the identity, so a second session logged in under the same name
/// cannot release someone else's call.
#[derive(Debug, Default)]
pub struct CallSlot {
    current: Option<CurrentCall>,
}

impl CallSlot {
    pub fn new() -> Self {
        Self { current: None }
    }

    pub fn current(&self) -> Option<&CurrentCall> {
        self.current.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    /// Fails with `CallInProgress` while another patient is being called.
    pub fn ensure_idle(&self) -> Result<(), CallBoardError> {
        match &self.current {
            Some(call) => Err(CallBoardError::CallInProgress(call.patient.name.clone())),
            None => Ok(()),
        }
    }

    /// Transitions idle -> calling. The caller must have validated the
    /// slot is idle and removed `patient` from the queue; consuming the
    /// `Patient` here keeps the queue/call disjointness a move, not a copy.
    pub fn begin(
        &mut self,
        patient: Patient,
        called_by: Professional,
        called_by_connection: Uuid,
    ) -> &CurrentCall {
        self.current = Some(CurrentCall::begin(
            patient,
            called_by,
            called_by_connection,
        ));
        self.current.as_ref().unwrap()
    }

    /// Transitions calling -> idle for an explicit confirm or stop.
    ///
    /// Fails with `NoActiveCall` when idle or when `patient_id` does not
    /// match the active call, and with `NotOwner` when the ending
    /// connection is not the one that issued the call.
    pub fn finish(
        &mut self,
        connection_id: Uuid,
        patient_id: &str,
    ) -> Result<CurrentCall, CallBoardError> {
        match &self.current {
            Some(call) if call.patient.id == patient_id => {
                if call.called_by_connection != connection_id {
                    return Err(CallBoardError::NotOwner);
                }
                Ok(self.current.take().unwrap())
            }
            _ => Err(CallBoardError::NoActiveCall(patient_id.to_string())),
        }
    }

    /// Forced calling -> idle when the calling connection logs out or
    /// disconnects. Returns the released call, if this connection owned it.
    pub fn release_owned_by(&mut self, connection_id: Uuid) -> Option<CurrentCall> {
        match &self.current {
            Some(call) if call.called_by_connection == connection_id => self.current.take(),
            _ => None,
        }
    }
}
