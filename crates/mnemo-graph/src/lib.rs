//! Mnemo Graph — the file-backed knowledge graph store.
//!
//! This crate is the single mutation point for the Mnemo knowledge graph.
//! A [`GraphStore`] loads the persisted graph once at open, serves reads
//! straight from memory, and rewrites the whole file after every
//! successful mutation. Callers invoke the operations synchronously and
//! serialize the returned values themselves.

mod codec;
mod mutations;
mod queries;
pub mod store;

pub use store::{GraphStore, Result, StoreError};
