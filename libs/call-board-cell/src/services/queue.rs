use chrono::Utc;
use uuid::Uuid;

use crate::{CallBoardError, Patient, PatientPriority, Professional};

/// Ordered collection of waiting patients.
///
/// Ordering is total and stable: all high-priority patients precede all
/// normal-priority patients, and within a tier patients are FIFO by the
/// time they were added (insertion order breaks same-millisecond ties).
#[derive(Debug, Default)]
pub struct PatientQueue {
    patients: Vec<Patient>,
    next_seq: u64,
}

impl PatientQueue {
    pub fn new() -> Self {
        Self {
            patients: Vec::new(),
            next_seq: 0,
        }
    }

    /// Adds a patient and re-sorts the queue, returning the new entry.
    ///
    /// The id embeds the creation timestamp plus a monotonic sequence
    /// number, so ids stay unique and creation-ordered even when two
    /// patients are added within the same millisecond.
    pub fn add(
        &mut self,
        name: String,
        priority: PatientPriority,
        added_by: Professional,
        added_by_connection: Uuid,
    ) -> Result<Patient, CallBoardError> {
        if name.trim().is_empty() {
            return Err(CallBoardError::InvalidPatientData);
        }

        let added_at = Utc::now();
        let patient = Patient {
            id: format!("patient_{}_{}", added_at.timestamp_millis(), self.next_seq),
            name,
            priority,
            added_at,
            added_by,
            added_by_connection,
        };
        self.next_seq += 1;

        self.patients.push(patient.clone());
        self.sort();
        Ok(patient)
    }

    pub fn get(&self, patient_id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == patient_id)
    }

    /// Removes and returns the patient with the given id.
    pub fn take(&mut self, patient_id: &str) -> Option<Patient> {
        let index = self.patients.iter().position(|p| p.id == patient_id)?;
        Some(self.patients.remove(index))
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn to_vec(&self) -> Vec<Patient> {
        self.patients.clone()
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    fn sort(&mut self) {
        // Stable sort: insertion order survives for equal (priority, time).
        self.patients
            .sort_by_key(|p| (p.priority.rank(), p.added_at));
    }
}
