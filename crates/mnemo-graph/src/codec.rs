//! Line codec for the persisted graph.
//!
//! The durable representation is JSONL: one self-describing record per
//! line, entities first, then relations. Each record embeds a `type`
//! discriminator alongside its own fields, so every line parses
//! independently; line order carries no meaning beyond the observation
//! order stored inside each entity record.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use mnemo_core::{Entity, KnowledgeGraph, Relation};

use crate::store::{Result, StoreError};

/// One persisted line, as read back from disk.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Record {
    Entity(Entity),
    Relation(Relation),
}

/// Borrowing counterpart of [`Record`] for serialization, so `save`
/// never clones the graph it writes.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RecordRef<'a> {
    Entity(&'a Entity),
    Relation(&'a Relation),
}

/// Read the persisted graph.
///
/// A missing file is an empty graph. Any line that fails to parse fails
/// the whole load — no partial or best-effort recovery.
pub(crate) fn load(path: &Path) -> Result<KnowledgeGraph> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(KnowledgeGraph::default()),
        Err(e) => return Err(e.into()),
    };

    let mut graph = KnowledgeGraph::default();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: Record = serde_json::from_str(line).map_err(|e| StoreError::CorruptStore {
            line: index + 1,
            reason: e.to_string(),
        })?;
        match record {
            Record::Entity(entity) => graph.entities.push(entity),
            Record::Relation(relation) => graph.relations.push(relation),
        }
    }

    Ok(graph)
}

/// Rewrite the persisted graph: all entities, then all relations, one
/// record per line.
///
/// The new contents go to a sibling temp file which is synced and then
/// renamed over the target, so a crash mid-write leaves either the old
/// file or the new one on disk — never a mix.
pub(crate) fn save(path: &Path, graph: &KnowledgeGraph) -> Result<()> {
    let mut buf = String::new();
    for entity in &graph.entities {
        push_line(&mut buf, &RecordRef::Entity(entity))?;
    }
    for relation in &graph.relations {
        push_line(&mut buf, &RecordRef::Relation(relation))?;
    }

    swap_in(path, buf.as_bytes()).map_err(|e| StoreError::StorageWrite(e.to_string()))
}

fn push_line(buf: &mut String, record: &RecordRef<'_>) -> Result<()> {
    let line =
        serde_json::to_string(record).map_err(|e| StoreError::StorageWrite(e.to_string()))?;
    buf.push_str(&line);
    buf.push('\n');
    Ok(())
}

/// Durable swap: write a sibling temp file, sync it, rename over `path`.
fn swap_in(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = tmp_path(path);
    let mut file = fs::File::create(&tmp)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    fs::rename(&tmp, path)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "memory".into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> KnowledgeGraph {
        KnowledgeGraph {
            entities: vec![
                Entity {
                    name: "ada".to_string(),
                    entity_type: "person".to_string(),
                    observations: vec!["writes compilers".to_string(), "b. 1815".to_string()],
                },
                Entity {
                    name: "london".to_string(),
                    entity_type: "place".to_string(),
                    observations: vec![],
                },
            ],
            relations: vec![Relation {
                from: "ada".to_string(),
                to: "london".to_string(),
                relation_type: "lives_in".to_string(),
            }],
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let graph = load(&dir.path().join("memory.jsonl")).unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn round_trip_preserves_graph() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.jsonl");

        let graph = sample_graph();
        save(&path, &graph).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, graph);
    }

    #[test]
    fn records_are_tagged_entities_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.jsonl");
        save(&path, &sample_graph()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("\"type\":\"entity\""));
        assert!(lines[0].contains("\"entityType\":\"person\""));
        assert!(lines[1].contains("\"type\":\"entity\""));
        assert!(lines[2].contains("\"type\":\"relation\""));
        assert!(lines[2].contains("\"relationType\":\"lives_in\""));
    }

    #[test]
    fn corrupt_line_reports_line_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.jsonl");
        fs::write(
            &path,
            "{\"type\":\"entity\",\"name\":\"ada\",\"entityType\":\"person\",\"observations\":[]}\nnot json\n",
        )
        .unwrap();

        match load(&path) {
            Err(StoreError::CorruptStore { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected CorruptStore, got {other:?}"),
        }
    }

    #[test]
    fn unknown_tag_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.jsonl");
        fs::write(&path, "{\"type\":\"widget\",\"name\":\"x\"}\n").unwrap();

        assert!(matches!(
            load(&path),
            Err(StoreError::CorruptStore { line: 1, .. })
        ));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.jsonl");
        fs::write(
            &path,
            "\n{\"type\":\"relation\",\"from\":\"a\",\"to\":\"b\",\"relationType\":\"knows\"}\n\n",
        )
        .unwrap();

        let graph = load(&path).unwrap();
        assert_eq!(graph.entities.len(), 0);
        assert_eq!(graph.relations.len(), 1);
    }

    #[test]
    fn save_replaces_rather_than_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.jsonl");

        save(&path, &sample_graph()).unwrap();
        let mut smaller = sample_graph();
        smaller.entities.pop();
        smaller.relations.clear();
        save(&path, &smaller).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded, smaller);
        assert!(!dir.path().join("memory.jsonl.tmp").exists());
    }
}
