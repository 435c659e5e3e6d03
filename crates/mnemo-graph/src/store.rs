//! Store handle: load at open, mutate in memory, flush on every write.

use std::fs;
use std::path::{Path, PathBuf};

use mnemo_core::KnowledgeGraph;

use crate::codec;

/// Errors from knowledge graph store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A request record is missing a field the operation requires.
    /// Raised before anything is mutated.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// The persisted graph cannot be parsed. Fatal to `open`; no partial
    /// graph is exposed.
    #[error("Corrupt store: line {line}: {reason}")]
    CorruptStore { line: usize, reason: String },

    /// The durable flush after a successful in-memory mutation failed.
    /// The in-memory graph keeps the mutation.
    #[error("Storage write failed, mutation retained in memory: {0}")]
    StorageWrite(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// File-backed knowledge graph store.
///
/// Owns the in-memory graph for the process lifetime and rewrites the
/// whole persisted file after every successful mutation. Mutations take
/// `&mut self`, which makes the single-writer discipline a compile-time
/// property; callers sharing the store across threads must serialize
/// mutating calls externally (e.g. a `Mutex<GraphStore>` held across the
/// call, flush included). Reads take `&self` and never touch storage.
pub struct GraphStore {
    pub(crate) path: PathBuf,
    pub(crate) graph: KnowledgeGraph,
}

impl GraphStore {
    /// Open the store at the given path, creating the parent directory
    /// if needed. A missing file yields an empty graph; an unparseable
    /// one fails with [`StoreError::CorruptStore`].
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let graph = codec::load(&path)?;
        tracing::debug!(
            path = %path.display(),
            entities = graph.entities.len(),
            relations = graph.relations.len(),
            "Knowledge graph loaded"
        );

        Ok(Self { path, graph })
    }

    /// The storage path this store flushes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the full persisted representation.
    ///
    /// Called after every successful in-memory mutation. On failure the
    /// mutation stays applied in memory and the caller sees
    /// [`StoreError::StorageWrite`]; any later successful mutation
    /// re-flushes the complete graph.
    pub(crate) fn flush(&self) -> Result<()> {
        codec::save(&self.path, &self.graph)?;
        tracing::debug!(
            entities = self.graph.entities.len(),
            relations = self.graph.relations.len(),
            "Knowledge graph flushed"
        );
        Ok(())
    }
}
