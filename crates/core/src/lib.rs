//! # Path Finder Core
//!
//! Domain types, traits, and error definitions for the Path Finder study
//! and career advisor. This crate has **zero framework dependencies** — it
//! defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The completion backend is defined as a trait here; the implementation
//! lives in `pathfinder-providers`. This enables:
//! - Swapping backends via configuration
//! - Easy testing with mock implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod message;
pub mod profile;
pub mod provider;
pub mod transcript;

// Re-export key types at crate root for ergonomics
pub use error::{CatalogError, Error, ProviderError, Result};
pub use message::{Message, Role};
pub use profile::{Program, ResolvedProfile, Specialization, StudyPhase, resolve};
pub use provider::{CompletionRequest, CompletionResponse, Provider, Usage};
pub use transcript::Transcript;
