//! Core types and definitions for the FRONTLINE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! identifiers, tile handles, unit kinds, tuning configuration, events,
//! diagnostics and snapshot views. It has no knowledge of the map grid
//! or of executions.

pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
