//! Command catalog: the injected set of command descriptors of a toolkit.
//!
//! Commands are not discovered; they are handed over as a list, either
//! built in code or loaded from a TOML file of `[[command]]` tables.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::config::ParserConfig;
use crate::error::DeclarationError;
use crate::metadata::{CommandMetadata, DocRenderer};
use crate::model::{CommandDescriptor, CommandModel};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read command catalog '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse command catalog '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Declaration(#[from] DeclarationError),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default, rename = "command")]
    commands: Vec<CommandDescriptor>,
}

/// Commands of a toolkit, unique by name.
#[derive(Debug, Clone, Default)]
pub struct CommandCatalog {
    commands: Vec<CommandDescriptor>,
}

impl CommandCatalog {
    pub fn new(commands: Vec<CommandDescriptor>) -> Result<Self, DeclarationError> {
        let mut seen = HashSet::new();
        for command in &commands {
            if !seen.insert(command.name.as_str()) {
                return Err(DeclarationError::DuplicateCommand {
                    name: command.name.clone(),
                });
            }
        }
        Ok(Self { commands })
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|e| CatalogError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: CatalogFile = toml::from_str(&content).map_err(|e| CatalogError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let catalog = Self::new(file.commands)?;
        tracing::debug!(
            "Loaded {} commands from {}",
            catalog.commands.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn find(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn descriptors(&self) -> &[CommandDescriptor] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Metadata of every command, ordered by group (ungrouped first) then
    /// name. Fails on the first command whose declaration is broken.
    pub fn metadata(
        &self,
        config: &ParserConfig,
        renderer: &dyn DocRenderer,
        include_hidden: bool,
    ) -> Result<Vec<CommandMetadata>, DeclarationError> {
        let mut metadata = self
            .commands
            .iter()
            .filter(|c| include_hidden || !c.hidden)
            .map(|c| {
                CommandModel::build(c, config).map(|m| CommandMetadata::from_model(&m, renderer))
            })
            .collect::<Result<Vec<_>, _>>()?;
        metadata.sort_by(|a, b| (&a.group, &a.name).cmp(&(&b.group, &b.name)));
        Ok(metadata)
    }
}
