use crate::storage::{Store, Tree};
use anyhow::{Context, Result};
use pipegeo_config::StoreConfig;
use pipegeo_core::{NewPipe, Pipe, PipeId, PipeQuery};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tracing::{debug, info};

const DEFAULT_COLOR: &str = "#607D8B";

/// Why a create request was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipeValidationError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid pipe data")]
    InvalidData,
}

/// Check a create payload before it is given an id.
pub fn validate_new_pipe(pipe: &NewPipe) -> std::result::Result<(), PipeValidationError> {
    if pipe.name.trim().is_empty() {
        return Err(PipeValidationError::MissingFields);
    }
    if !pipe.start_point.is_finite() || !pipe.end_point.is_finite() {
        return Err(PipeValidationError::InvalidData);
    }
    Ok(())
}

/// Pipes persisted in a sled tree, keyed by big-endian id.
pub struct PipeStore {
    store: Store,
    pipes_tree: Tree,
    next_id: AtomicU64,
    default_color: String,
}

impl PipeStore {
    pub fn new(store: Store) -> Result<Self> {
        let pipes_tree = store.open_tree("pipes")?;

        let last_id = match pipes_tree.last()? {
            Some((k, _)) => decode_id(&k)?,
            None => 0,
        };

        Ok(Self {
            store,
            pipes_tree,
            next_id: AtomicU64::new(last_id + 1),
            default_color: DEFAULT_COLOR.to_string(),
        })
    }

    pub fn open(path: &Path) -> Result<Self> {
        Self::new(Store::open(path)?)
    }

    /// Open the store described by the `store` config section.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        Ok(Self::open(&config.path)?.with_default_color(config.default_color.clone()))
    }

    /// Color given to pipes created without one.
    pub fn with_default_color(mut self, color: impl Into<String>) -> Self {
        self.default_color = color.into();
        self
    }

    pub fn list_pipes(&self, query: &PipeQuery) -> Result<Vec<Pipe>> {
        let limit = query.effective_limit().unwrap_or(usize::MAX);
        let mut pipes = Vec::new();

        for item in self.pipes_tree.iter() {
            if pipes.len() >= limit {
                break;
            }
            let (_, bytes) = item?;
            let pipe: Pipe = bincode::deserialize(&bytes).context("corrupt pipe record")?;
            if query.matches(&pipe) {
                pipes.push(pipe);
            }
        }

        debug!(count = pipes.len(), tag = ?query.tag, "listed pipes");
        Ok(pipes)
    }

    pub fn get_pipe(&self, id: PipeId) -> Result<Option<Pipe>> {
        self.pipes_tree.get_decoded(id.to_be_bytes())
    }

    pub fn create_pipe(&self, new_pipe: NewPipe) -> Result<Pipe> {
        validate_new_pipe(&new_pipe)?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let pipe = new_pipe.into_pipe(id, &self.default_color);
        self.pipes_tree.insert_encoded(id.to_be_bytes(), &pipe)?;

        info!(id, name = %pipe.name, "created pipe");
        Ok(pipe)
    }

    /// Validate and write a batch in one atomic step. Nothing is written if
    /// any entry is rejected.
    pub fn insert_batch(&self, new_pipes: Vec<NewPipe>) -> Result<usize> {
        for new_pipe in &new_pipes {
            validate_new_pipe(new_pipe)
                .with_context(|| format!("rejected pipe '{}'", new_pipe.name))?;
        }

        let count = new_pipes.len();
        let first_id = self.next_id.fetch_add(count as u64, Ordering::SeqCst);

        let mut encoded = Vec::with_capacity(count);
        for (offset, new_pipe) in new_pipes.into_iter().enumerate() {
            let id = first_id + offset as u64;
            let pipe = new_pipe.into_pipe(id, &self.default_color);
            encoded.push((id.to_be_bytes(), bincode::serialize(&pipe)?));
        }
        self.pipes_tree.insert_batch(encoded)?;

        debug!(count, first_id, "inserted pipe batch");
        Ok(count)
    }

    pub fn count(&self) -> usize {
        self.pipes_tree.len()
    }

    /// Remove every pipe and restart ids at 1.
    pub fn clear(&self) -> Result<()> {
        self.pipes_tree.clear()?;
        self.next_id.store(1, Ordering::SeqCst);
        Ok(())
    }

    pub fn flush(&self) -> Result<()> {
        self.store.flush()
    }
}

fn decode_id(bytes: &[u8]) -> Result<PipeId> {
    let raw: [u8; 8] = bytes.try_into().context("malformed pipe key")?;
    Ok(u64::from_be_bytes(raw))
}
