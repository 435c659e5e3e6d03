//! Configuration management for Mnemo.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (MNEMO__ prefix)
//! 2. Config file (mnemo.toml)
//! 3. Defaults

use serde::Deserialize;

use crate::error::MnemoError;

/// Storage configuration for the memory store.
///
/// Loaded from the `[memory]` section of `mnemo.toml` or
/// `MNEMO__MEMORY__*` environment variables. The embedding process reads
/// this once at startup and injects `memory_file` into the store; the
/// store itself never touches configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MemoryConfig {
    /// Path of the persisted graph file.
    #[serde(default = "default_memory_file")]
    pub memory_file: String,
}

fn default_memory_file() -> String {
    "./memory.jsonl".to_string()
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            memory_file: default_memory_file(),
        }
    }
}

/// Load the memory configuration from `<file_prefix>.toml` and the environment.
///
/// A missing config file or `[memory]` section falls back to defaults;
/// only an unreadable/unparseable source is an error.
pub fn load_memory_config(file_prefix: &str) -> Result<MemoryConfig, MnemoError> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("MNEMO")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| MnemoError::Config(e.to_string()))?;

    let memory = match cfg.get::<MemoryConfig>("memory") {
        Ok(c) => c,
        Err(_) => MemoryConfig::default(),
    };

    tracing::debug!(memory_file = %memory.memory_file, "Memory configuration loaded");
    Ok(memory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MemoryConfig::default();
        assert_eq!(config.memory_file, "./memory.jsonl");
    }

    #[test]
    fn test_section_deserializes() {
        let cfg = config::Config::builder()
            .add_source(config::File::from_str(
                "[memory]\nmemory_file = \"/var/lib/mnemo/memory.jsonl\"",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let memory: MemoryConfig = cfg.get("memory").unwrap();
        assert_eq!(memory.memory_file, "/var/lib/mnemo/memory.jsonl");
    }

    #[test]
    fn test_missing_section_falls_back() {
        let memory = load_memory_config("no-such-config-file").unwrap();
        assert_eq!(memory, MemoryConfig::default());
    }
}
