//! Offer Engine library crate.
//!
//! This crate evaluates a job offer against the user's current situation:
//! a negotiation range, a salaried vs self-employed tax comparison, a
//! personal values compatibility score and a decision checklist.  External
//! applications may depend on the `offer_engine` crate and call
//! `engine::OfferEngine::evaluate` directly or embed the API via
//! `api::build_router`.

pub mod api;
pub mod checklist;
pub mod comparison;
pub mod compatibility;
pub mod compensation;
pub mod config;
pub mod demo;
pub mod engine;
pub mod equivalence;
pub mod error;
pub mod models;
pub mod negotiation;
pub mod tax;
pub mod telemetry;

pub use engine::{Evaluation, OfferEngine};
pub use error::EngineError;
