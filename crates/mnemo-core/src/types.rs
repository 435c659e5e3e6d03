//! Core domain types for the Mnemo knowledge graph.
//!
//! These types represent entities and relations in the agent memory graph,
//! shared across all Mnemo components. Fields serialize in camelCase
//! (`entityType`, `relationType`, `entityName`) so the persisted file and
//! the responses handed to remote callers keep the established wire shape.

use serde::{Deserialize, Serialize};

// ── Graph Types ───────────────────────────────────────────────────

/// A uniquely-named node in the knowledge graph.
///
/// `name` is the primary key: no two entities in a graph share one.
/// `observations` preserves insertion order and never contains the same
/// string twice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub name: String,
    pub entity_type: String,
    pub observations: Vec<String>,
}

/// A directed, typed edge between two entity names.
///
/// Identity is the full (`from`, `to`, `relationType`) triple. Endpoints
/// are names, not enforced references — a relation may point at a name
/// with no corresponding entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub from: String,
    pub to: String,
    pub relation_type: String,
}

impl Relation {
    /// Whether two relations carry the same identifying triple.
    pub fn same_triple(&self, other: &Relation) -> bool {
        self.from == other.from && self.to == other.to && self.relation_type == other.relation_type
    }
}

/// The full graph: the unit of persistence and of snapshot reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KnowledgeGraph {
    pub entities: Vec<Entity>,
    pub relations: Vec<Relation>,
}

impl KnowledgeGraph {
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relations.is_empty()
    }
}

// ── Operation Records ─────────────────────────────────────────────

/// Request record for `add_observations`: strings to append to one entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ObservationUpdate {
    pub entity_name: String,
    pub contents: Vec<String>,
}

/// Response record for `add_observations`: the strings actually appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ObservationAdded {
    pub entity_name: String,
    pub added_observations: Vec<String>,
}

/// Request record for `delete_observations`: strings to remove from one entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ObservationDeletion {
    pub entity_name: String,
    pub observations: Vec<String>,
}
