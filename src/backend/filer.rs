//! Artifact sinks for generated source
//!
//! A `Filer` is the host's artifact-registration interface. Submitting a name
//! that already exists is an error the caller is expected to downgrade.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::frontend::decl::QualifiedName;

#[derive(Debug, Error)]
pub enum FilerError {
    #[error("{name} already exists")]
    AlreadyExists { name: String },

    #[error("failed to write {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

/// One generated compilation unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// `package.SimpleName`
    pub name: String,
    /// Declaration the artifact was generated from
    pub originating: QualifiedName,
    pub contents: String,
}

impl Artifact {
    pub fn package(&self) -> &str {
        self.name.rsplit_once('.').map(|(package, _)| package).unwrap_or("")
    }

    pub fn simple_name(&self) -> &str {
        self.name.rsplit_once('.').map(|(_, simple)| simple).unwrap_or(&self.name)
    }
}

pub trait Filer {
    fn create_source_file(&mut self, artifact: &Artifact) -> Result<(), FilerError>;
}

/// Keeps artifacts in memory, keyed by name
#[derive(Debug, Default)]
pub struct MemoryFiler {
    files: BTreeMap<String, Artifact>,
}

impl MemoryFiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Artifact> {
        self.files.get(name)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Artifacts sorted by name
    pub fn artifacts(&self) -> impl Iterator<Item = &Artifact> + '_ {
        self.files.values()
    }
}

impl Filer for MemoryFiler {
    fn create_source_file(&mut self, artifact: &Artifact) -> Result<(), FilerError> {
        if self.files.contains_key(&artifact.name) {
            return Err(FilerError::AlreadyExists {
                name: artifact.name.clone(),
            });
        }
        self.files.insert(artifact.name.clone(), artifact.clone());
        Ok(())
    }
}

/// Writes `<root>/<package path>/<SimpleName>.java`, never overwriting
#[derive(Debug, Clone)]
pub struct DirFiler {
    root: PathBuf,
}

impl DirFiler {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, artifact: &Artifact) -> PathBuf {
        let mut path = self.root.clone();
        for segment in artifact.package().split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.java", artifact.simple_name()));
        path
    }
}

impl Filer for DirFiler {
    fn create_source_file(&mut self, artifact: &Artifact) -> Result<(), FilerError> {
        let io_err = |source: io::Error| FilerError::Io {
            name: artifact.name.clone(),
            source,
        };
        let path = self.path_for(artifact);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => FilerError::AlreadyExists {
                    name: artifact.name.clone(),
                },
                _ => io_err(e),
            })?;
        file.write_all(artifact.contents.as_bytes()).map_err(io_err)?;
        Ok(())
    }
}
