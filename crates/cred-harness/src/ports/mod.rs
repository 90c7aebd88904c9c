//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: the two fuzzing-engine entry points
//! - **Outbound (Driven)**: the credential library and the byte mutator

pub mod inbound;
pub mod outbound;
