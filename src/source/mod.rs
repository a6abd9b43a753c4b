//! # Data sources
//!
//! Raw records → `Entity`, and the catalog of named sources the viewer can
//! switch between.
//!
//! Two raw shapes are accepted side by side: the legacy shape with bare
//! numeric money fields and the current one with `{amount, currency}`
//! objects. Unknown fields are ignored; wrongly-typed optional fields read
//! as absent.

mod fields;
mod record;
mod detail;
pub mod snapshot;

use std::sync::Arc;

use crate::{Error, Result};

pub use snapshot::Snapshot;

/// Named sources in registration order. The first one is the default.
#[derive(Debug, Clone, Default)]
pub struct SourceCatalog {
    sources: Vec<Arc<Snapshot>>,
}

impl SourceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a snapshot. A source with the same name is replaced in place.
    pub fn register(&mut self, snapshot: Snapshot) -> Arc<Snapshot> {
        let snapshot = Arc::new(snapshot);
        match self.sources.iter_mut().find(|s| s.name() == snapshot.name()) {
            Some(slot) => *slot = Arc::clone(&snapshot),
            None => self.sources.push(Arc::clone(&snapshot)),
        }
        snapshot
    }

    pub fn with_source(mut self, snapshot: Snapshot) -> Self {
        self.register(snapshot);
        self
    }

    /// Parse `json` and register it under `name`.
    pub fn load_json(&mut self, name: &str, json: &str) -> Result<Arc<Snapshot>> {
        let snapshot = Snapshot::from_json_str(name, json)?;
        Ok(self.register(snapshot))
    }

    pub fn get(&self, name: &str) -> Result<Arc<Snapshot>> {
        self.sources
            .iter()
            .find(|s| s.name() == name)
            .cloned()
            .ok_or_else(|| Error::UnknownSource(name.to_owned()))
    }

    pub fn default_source(&self) -> Option<Arc<Snapshot>> {
        self.sources.first().cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.name())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
