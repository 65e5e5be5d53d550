//! Patient lookup and the doctor's care list.
//!
//! The synchronous methods are the whole behaviour. The `*_later` variants
//! run the same work behind a [`Deferred`] so callers see the simulated
//! network latency, and `close()` cancels anything still waiting.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use careportal_contracts::{
    directory::{Patient, RecordId},
    error::{PortalError, PortalResult},
};
use careportal_core::{Deferred, LatencyConfig};

use crate::mock_data;

/// Patients searchable by username, plus the set added to the doctor's care.
///
/// Cloning shares the care list.
#[derive(Debug, Clone)]
pub struct PatientRegistry {
    patients: Arc<Vec<Patient>>,
    under_care: Arc<Mutex<BTreeSet<RecordId>>>,
    latency: LatencyConfig,
    token: CancellationToken,
}

impl PatientRegistry {
    pub fn new(patients: Vec<Patient>, latency: LatencyConfig) -> Self {
        Self {
            patients: Arc::new(patients),
            under_care: Arc::new(Mutex::new(BTreeSet::new())),
            latency,
            token: CancellationToken::new(),
        }
    }

    /// The built-in mock patients.
    pub fn mock(latency: LatencyConfig) -> Self {
        Self::new(mock_data::patients(), latency)
    }

    /// Patients whose username contains `term`, case-insensitive.
    ///
    /// A blank term is rejected with `BlankInput`. No match is not an error.
    pub fn search_username(&self, term: &str) -> PortalResult<Vec<Patient>> {
        if term.trim().is_empty() {
            return Err(PortalError::BlankInput {
                field: "username".to_string(),
            });
        }
        Ok(search(&self.patients, term))
    }

    /// Add patient `id` to the care list and return the confirmation notice.
    ///
    /// Adding a patient who is already under care succeeds again with the
    /// same notice and leaves the list unchanged.
    pub fn add_patient(&self, id: RecordId) -> PortalResult<String> {
        add(&self.patients, &self.under_care, id)
    }

    /// Patients added so far, ordered by id.
    pub fn under_care(&self) -> Vec<Patient> {
        let ids = self.under_care.lock().unwrap_or_else(PoisonError::into_inner);
        self.patients
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect()
    }

    /// `search_username` after the configured search latency.
    ///
    /// The blank check happens immediately; only a valid search is delayed.
    pub fn search_username_later(&self, term: &str) -> PortalResult<Deferred<Vec<Patient>>> {
        if term.trim().is_empty() {
            return Err(PortalError::BlankInput {
                field: "username".to_string(),
            });
        }
        let patients = Arc::clone(&self.patients);
        let term = term.to_string();
        Ok(Deferred::schedule(
            self.latency.patient_search(),
            self.token.child_token(),
            move || search(&patients, &term),
        ))
    }

    /// `add_patient` after the configured add latency.
    pub fn add_patient_later(&self, id: RecordId) -> Deferred<PortalResult<String>> {
        let patients = Arc::clone(&self.patients);
        let under_care = Arc::clone(&self.under_care);
        Deferred::schedule(
            self.latency.patient_add(),
            self.token.child_token(),
            move || add(&patients, &under_care, id),
        )
    }

    /// Cancel every pending delayed search or add.
    pub fn close(&self) {
        self.token.cancel();
    }
}

fn search(patients: &[Patient], term: &str) -> Vec<Patient> {
    let needle = term.to_lowercase();
    let results: Vec<Patient> = patients
        .iter()
        .filter(|p| p.username.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    if results.is_empty() {
        warn!(term, "no patients found with that username");
    } else {
        debug!(term, results = results.len(), "patient search");
    }
    results
}

fn add(
    patients: &[Patient],
    under_care: &Mutex<BTreeSet<RecordId>>,
    id: RecordId,
) -> PortalResult<String> {
    let patient = patients
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| PortalError::NotFound {
            kind: "patient".to_string(),
            id: id.to_string(),
        })?;

    let newly_added = under_care
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(id);

    info!(patient_id = id, newly_added, "patient added to care list");
    Ok(format!("{} has been added as your patient", patient.name))
}
