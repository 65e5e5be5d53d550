//! Canned chat responder.
//!
//! The responder is a stand-in for a conversational agent: it picks one reply
//! uniformly at random and never looks at what the user wrote.

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use careportal_contracts::error::PortalResult;
use careportal_core::traits::ResponseSelector;

use crate::table::ResponseTable;

#[derive(Debug)]
enum RngSource {
    Thread,
    Seeded(Mutex<StdRng>),
}

/// A `ResponseSelector` that draws from a fixed list of replies.
#[derive(Debug)]
pub struct CannedResponder {
    responses: Vec<String>,
    source: RngSource,
}

impl CannedResponder {
    /// Responder using the thread-local RNG.
    ///
    /// Returns `TableValidation` if the table is empty or has a blank reply.
    pub fn new(table: ResponseTable) -> PortalResult<Self> {
        table.validate()?;
        Ok(Self {
            responses: table.responses,
            source: RngSource::Thread,
        })
    }

    /// Responder with a reproducible sequence of choices.
    pub fn seeded(table: ResponseTable, seed: u64) -> PortalResult<Self> {
        table.validate()?;
        Ok(Self {
            responses: table.responses,
            source: RngSource::Seeded(Mutex::new(StdRng::seed_from_u64(seed))),
        })
    }

    pub fn builtin() -> PortalResult<Self> {
        Self::new(ResponseTable::builtin()?)
    }

    pub fn from_file(path: &Path) -> PortalResult<Self> {
        Self::new(ResponseTable::from_file(path)?)
    }

    /// The full set of replies this responder can produce.
    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    /// Pick a reply using the caller's RNG.
    pub fn select_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // `responses` is non-empty: both constructors validate the table.
        &self.responses[rng.gen_range(0..self.responses.len())]
    }
}

impl ResponseSelector for CannedResponder {
    fn select_response(&self, user_text: &str) -> String {
        let reply = match &self.source {
            RngSource::Thread => self.select_with(&mut rand::thread_rng()),
            RngSource::Seeded(rng) => {
                let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
                self.select_with(&mut *rng)
            }
        };
        debug!(input_len = user_text.len(), "canned reply selected");
        reply.to_string()
    }
}
