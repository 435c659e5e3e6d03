//! Read operations for the knowledge graph store.
//!
//! Reads scan the in-memory collections directly and never touch
//! durable storage. Search and open both return a subgraph: the matched
//! entities plus only those relations with both endpoints inside the
//! matched set.

use std::collections::HashSet;

use mnemo_core::{Entity, KnowledgeGraph};

use crate::store::GraphStore;

impl GraphStore {
    /// Full snapshot of the current graph.
    pub fn read_graph(&self) -> KnowledgeGraph {
        self.graph.clone()
    }

    /// Case-insensitive substring search over entity names, types, and
    /// observations.
    pub fn search_nodes(&self, query: &str) -> KnowledgeGraph {
        let needle = query.to_lowercase();
        let entities: Vec<Entity> = self
            .graph
            .entities
            .iter()
            .filter(|e| {
                e.name.to_lowercase().contains(&needle)
                    || e.entity_type.to_lowercase().contains(&needle)
                    || e.observations
                        .iter()
                        .any(|o| o.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();

        self.subgraph_for(entities)
    }

    /// Exact-name lookup. `names` not present in the graph contribute
    /// nothing; an empty list yields an empty graph.
    pub fn open_nodes(&self, names: &[String]) -> KnowledgeGraph {
        let wanted: HashSet<&str> = names.iter().map(String::as_str).collect();
        let entities: Vec<Entity> = self
            .graph
            .entities
            .iter()
            .filter(|e| wanted.contains(e.name.as_str()))
            .cloned()
            .collect();

        self.subgraph_for(entities)
    }

    /// Keep only the relations fully internal to `entities`.
    fn subgraph_for(&self, entities: Vec<Entity>) -> KnowledgeGraph {
        let names: HashSet<&str> = entities.iter().map(|e| e.name.as_str()).collect();
        let relations = self
            .graph
            .relations
            .iter()
            .filter(|r| names.contains(r.from.as_str()) && names.contains(r.to.as_str()))
            .cloned()
            .collect();

        KnowledgeGraph {
            entities,
            relations,
        }
    }
}
