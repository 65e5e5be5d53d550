//! # careportal-ref
//!
//! Reference runtime for the CarePortal mock engine.
//!
//! Provides the directory features around the engine and a set of scripted
//! walkthroughs:
//!
//! 1. **Patient / Doctor Chat**: role greeting, canned replies after the
//!    typing delay, attachments, blank-input rejection and cancellation on
//!    close.
//! 2. **Symptom Checker**: table-driven candidates, the busy lock and the
//!    diagnosis disclaimer.
//! 3. **Find Doctors**: search, specialty filter and saved-doctor toggles.
//! 4. **Add Patient**: delayed username search and idempotent add.
//!
//! All data is hardcoded and fictional. No external calls are made.

pub mod directory;
pub mod mock_data;
pub mod patients;
pub mod scenarios;

pub use directory::{DoctorDirectory, SavedToggle};
pub use patients::PatientRegistry;
pub use scenarios::ScenarioContext;
