//! Doctor and patient records used by the reference directory.

use serde::{Deserialize, Serialize};

/// Numeric identifier shared by doctors and patients in the mock data.
pub type RecordId = u32;

/// A healthcare provider listed in the find-doctors directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: RecordId,
    /// Full display name, including the "Dr." prefix.
    pub name: String,
    pub specialty: String,
    pub hospital: String,
    pub address: String,
    /// Pre-rendered, e.g. "1.2 miles away".
    pub distance: String,
    pub phone: String,
    pub email: String,
    pub rating: f32,
    pub reviews: u32,
    /// Whether the patient has bookmarked this doctor.
    pub saved: bool,
}

/// A patient account a doctor can look up by username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: RecordId,
    pub username: String,
    pub name: String,
    pub age: u32,
    pub email: String,
}
