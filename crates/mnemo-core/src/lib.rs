//! mnemo-core: Shared types, configuration, and error handling for Mnemo.
//!
//! This crate provides the foundational types used across all Mnemo components:
//! - Graph types (Entity, Relation, KnowledgeGraph)
//! - Per-operation request/response records
//! - Configuration management
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::MemoryConfig;
pub use error::MnemoError;
pub use types::{
    Entity, KnowledgeGraph, ObservationAdded, ObservationDeletion, ObservationUpdate, Relation,
};
