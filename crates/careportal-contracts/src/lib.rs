//! # careportal-contracts
//!
//! Shared types and error contracts for the CarePortal mock engine.
//!
//! Every crate in the workspace imports from here. No business logic lives in
//! this crate, only data definitions and the error type.

pub mod diagnosis;
pub mod directory;
pub mod error;
pub mod message;
