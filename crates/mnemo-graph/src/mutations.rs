//! Write operations for the knowledge graph store.
//!
//! Every operation validates its whole input batch first, applies the
//! in-memory mutation, then rewrites the persisted file. Duplicates and
//! unknown names are skipped silently — only a missing required field is
//! an error, and it is raised before anything changes.

use std::collections::HashSet;

use mnemo_core::{Entity, ObservationAdded, ObservationDeletion, ObservationUpdate, Relation};

use crate::store::{GraphStore, Result, StoreError};

impl GraphStore {
    // ── Creation ─────────────────────────────────────────────────

    /// Add the candidate entities whose names are not already taken.
    ///
    /// Returns only the entities actually added, in input order. A name
    /// already in the graph — or earlier in the same batch — is skipped
    /// without error.
    pub fn create_entities(&mut self, candidates: Vec<Entity>) -> Result<Vec<Entity>> {
        for entity in &candidates {
            require(&entity.name, "entity", "name")?;
        }

        let mut added = Vec::new();
        for entity in candidates {
            if self.graph.entities.iter().any(|e| e.name == entity.name) {
                continue;
            }
            self.graph.entities.push(entity.clone());
            added.push(entity);
        }

        if !added.is_empty() {
            tracing::debug!(added = added.len(), "Entities created");
        }
        self.flush()?;
        Ok(added)
    }

    /// Add the candidate relations whose (from, to, relationType) triples
    /// are new. Same silent-skip semantics as [`Self::create_entities`],
    /// keyed by the full triple. Endpoints are not checked against the
    /// entity set.
    pub fn create_relations(&mut self, candidates: Vec<Relation>) -> Result<Vec<Relation>> {
        for relation in &candidates {
            require(&relation.from, "relation", "from")?;
            require(&relation.to, "relation", "to")?;
            require(&relation.relation_type, "relation", "relationType")?;
        }

        let mut added = Vec::new();
        for relation in candidates {
            if self.graph.relations.iter().any(|r| r.same_triple(&relation)) {
                continue;
            }
            self.graph.relations.push(relation.clone());
            added.push(relation);
        }

        if !added.is_empty() {
            tracing::debug!(added = added.len(), "Relations created");
        }
        self.flush()?;
        Ok(added)
    }

    // ── Observations ─────────────────────────────────────────────

    /// Append observation strings to existing entities.
    ///
    /// Strings already present on an entity are skipped, checked one
    /// append at a time so a string repeated within one `contents` list
    /// lands only once. The returned records report exactly what was
    /// appended. Updates naming an unknown entity produce no record and
    /// no error.
    pub fn add_observations(
        &mut self,
        updates: Vec<ObservationUpdate>,
    ) -> Result<Vec<ObservationAdded>> {
        for update in &updates {
            require(&update.entity_name, "observation update", "entityName")?;
        }

        let mut results = Vec::new();
        for update in updates {
            let Some(entity) = self
                .graph
                .entities
                .iter_mut()
                .find(|e| e.name == update.entity_name)
            else {
                continue;
            };

            let mut appended = Vec::new();
            for content in update.contents {
                if entity.observations.contains(&content) {
                    continue;
                }
                entity.observations.push(content.clone());
                appended.push(content);
            }

            results.push(ObservationAdded {
                entity_name: update.entity_name,
                added_observations: appended,
            });
        }

        self.flush()?;
        Ok(results)
    }

    // ── Deletion ─────────────────────────────────────────────────

    /// Remove entities by name, cascading to every relation that
    /// references a removed name as `from` or `to`. Unknown names are
    /// ignored.
    pub fn delete_entities(&mut self, names: Vec<String>) -> Result<()> {
        let doomed: HashSet<String> = names.into_iter().collect();
        let relations_before = self.graph.relations.len();

        self.graph.entities.retain(|e| !doomed.contains(&e.name));
        self.graph
            .relations
            .retain(|r| !doomed.contains(&r.from) && !doomed.contains(&r.to));

        let cascaded = relations_before - self.graph.relations.len();
        if cascaded > 0 {
            tracing::debug!(cascaded, "Relations removed with their entities");
        }
        self.flush()
    }

    /// Remove the listed observation strings from matching entities.
    /// Unknown entities and absent strings are no-ops.
    pub fn delete_observations(&mut self, deletions: Vec<ObservationDeletion>) -> Result<()> {
        for deletion in &deletions {
            require(&deletion.entity_name, "observation deletion", "entityName")?;
        }

        for deletion in deletions {
            let Some(entity) = self
                .graph
                .entities
                .iter_mut()
                .find(|e| e.name == deletion.entity_name)
            else {
                continue;
            };
            entity
                .observations
                .retain(|o| !deletion.observations.contains(o));
        }

        self.flush()
    }

    /// Remove relations whose triple exactly matches an entry in
    /// `to_remove`. Triples with no match are ignored.
    pub fn delete_relations(&mut self, to_remove: Vec<Relation>) -> Result<()> {
        for relation in &to_remove {
            require(&relation.from, "relation deletion", "from")?;
            require(&relation.to, "relation deletion", "to")?;
            require(&relation.relation_type, "relation deletion", "relationType")?;
        }

        self.graph
            .relations
            .retain(|r| !to_remove.iter().any(|d| d.same_triple(r)));
        self.flush()
    }
}

// ── Helpers ──────────────────────────────────────────────────────

/// Reject a record whose required identifier field is empty.
fn require(value: &str, record: &str, field: &str) -> Result<()> {
    if value.is_empty() {
        return Err(StoreError::MalformedInput(format!(
            "{record} missing required field `{field}`"
        )));
    }
    Ok(())
}
