//! Scripted portal walkthroughs.
//!
//! Each scenario wires the real session, matcher and directory components
//! together with mock data and prints what a user of that page would see.

use std::sync::Arc;

use careportal_contracts::{
    error::PortalResult,
    message::{Message, Sender},
};
use careportal_core::{
    traits::{ResponseSelector, SymptomMatcher},
    LatencyConfig,
};
use careportal_engine::PortalConfig;

pub mod add_patient;
pub mod chat;
pub mod find_doctors;
pub mod symptom_check;

/// Engine components shared by every scenario.
#[derive(Clone)]
pub struct ScenarioContext {
    pub latency: LatencyConfig,
    pub selector: Arc<dyn ResponseSelector>,
    pub matcher: Arc<dyn SymptomMatcher>,
}

impl ScenarioContext {
    /// Build the responder and matcher described by `config`.
    pub fn from_config(config: &PortalConfig) -> PortalResult<Self> {
        Ok(Self {
            latency: config.latency.clone(),
            selector: Arc::new(config.responder()?),
            matcher: Arc::new(config.symptom_matcher()?),
        })
    }
}

/// Print one transcript line as `[HH:MM] sender: content`.
pub(crate) fn print_message(message: &Message) {
    let who = match message.sender {
        Sender::User => "you",
        Sender::Bot => "bot",
    };
    match &message.attachment {
        Some(attachment) => println!(
            "  [{}] {:>3}: {} (attached {})",
            message.display_time(),
            who,
            message.content,
            attachment.name
        ),
        None => println!("  [{}] {:>3}: {}", message.display_time(), who, message.content),
    }
}
