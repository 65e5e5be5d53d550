//! Find-doctors directory with saved-doctor bookmarks.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use careportal_contracts::{
    directory::{Doctor, RecordId},
    error::{PortalError, PortalResult},
};

use crate::mock_data;

/// Result of flipping a doctor's saved flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedToggle {
    /// The flag after the toggle.
    pub saved: bool,
    /// Confirmation text shown to the patient.
    pub notice: String,
}

/// An ordered list of doctors. Search results keep directory order.
#[derive(Debug, Clone)]
pub struct DoctorDirectory {
    doctors: Vec<Doctor>,
}

impl DoctorDirectory {
    pub fn new(doctors: Vec<Doctor>) -> Self {
        Self { doctors }
    }

    /// The built-in mock directory.
    pub fn mock() -> Self {
        Self::new(mock_data::doctors())
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn get(&self, id: RecordId) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    /// Doctors whose name, specialty or hospital contains `term`
    /// (case-insensitive), restricted to `specialty` when one is given.
    ///
    /// An empty term matches every doctor. The specialty filter is an exact,
    /// case-sensitive comparison against the values in [`Self::specialties`].
    pub fn search(&self, term: &str, specialty: Option<&str>) -> Vec<&Doctor> {
        let needle = term.to_lowercase();
        let results: Vec<&Doctor> = self
            .doctors
            .iter()
            .filter(|d| {
                d.name.to_lowercase().contains(&needle)
                    || d.specialty.to_lowercase().contains(&needle)
                    || d.hospital.to_lowercase().contains(&needle)
            })
            .filter(|d| specialty.map_or(true, |s| d.specialty == s))
            .collect();

        debug!(term, ?specialty, results = results.len(), "doctor search");
        if results.is_empty() {
            warn!(term, ?specialty, "no doctors matched search");
        }
        results
    }

    /// Distinct specialties in first-seen order.
    pub fn specialties(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.doctors
            .iter()
            .map(|d| d.specialty.as_str())
            .filter(|s| seen.insert(*s))
            .collect()
    }

    /// Flip the saved flag of doctor `id`.
    pub fn toggle_saved(&mut self, id: RecordId) -> PortalResult<SavedToggle> {
        let doctor = self
            .doctors
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| PortalError::NotFound {
                kind: "doctor".to_string(),
                id: id.to_string(),
            })?;

        doctor.saved = !doctor.saved;

        // Names carry the "Dr." prefix, so the second token is the first name.
        let short = doctor
            .name
            .split_whitespace()
            .nth(1)
            .unwrap_or(doctor.name.as_str());
        let notice = if doctor.saved {
            format!("Added Dr. {} to saved doctors", short)
        } else {
            format!("Removed Dr. {} from saved doctors", short)
        };

        debug!(doctor_id = id, saved = doctor.saved, "saved flag toggled");
        Ok(SavedToggle {
            saved: doctor.saved,
            notice,
        })
    }

    /// Saved doctors, in directory order.
    pub fn saved(&self) -> Vec<&Doctor> {
        self.doctors.iter().filter(|d| d.saved).collect()
    }
}

impl Default for DoctorDirectory {
    fn default() -> Self {
        Self::mock()
    }
}
