use crate::error::{Result, YapError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// One trending pre-TGE project from the mindshare leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub mindshare: String,
    pub category: String,
}

/// Source of the project leaderboard. The live leaderboard is fetched out of
/// band and saved as a snapshot; the static catalog is the safe default when
/// no snapshot is available.
pub trait ProjectCatalog {
    fn top_projects(&self) -> Result<Vec<Project>>;
}

/// Reads a previously saved leaderboard export (a JSON array of projects).
/// Read and parse failures surface as errors instead of being swallowed.
pub struct SnapshotCatalog {
    path: PathBuf,
}

impl SnapshotCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProjectCatalog for SnapshotCatalog {
    fn top_projects(&self) -> Result<Vec<Project>> {
        if !self.path.exists() {
            return Err(YapError::CatalogUnavailable(format!(
                "snapshot not found: {}",
                self.path.display()
            )));
        }
        let body = std::fs::read_to_string(&self.path)?;
        let projects: Vec<Project> = serde_json::from_str(&body)
            .map_err(|e| YapError::CatalogUnavailable(format!("{}: {}", self.path.display(), e)))?;
        if projects.is_empty() {
            return Err(YapError::CatalogUnavailable(format!(
                "snapshot is empty: {}",
                self.path.display()
            )));
        }
        Ok(projects)
    }
}

/// Compiled-in fallback list.
pub struct StaticCatalog;

impl ProjectCatalog for StaticCatalog {
    fn top_projects(&self) -> Result<Vec<Project>> {
        Ok(fallback_projects())
    }
}

fn fallback_projects() -> Vec<Project> {
    [
        ("Limitless", "High", "AI Tools"),
        ("Polymarket", "Very High", "Prediction Markets"),
        ("Sentient", "High", "AI Agents"),
        ("Monad", "High", "Layer 1"),
        ("Base", "Very High", "Layer 2"),
    ]
    .iter()
    .map(|(name, mindshare, category)| Project {
        name: name.to_string(),
        mindshare: mindshare.to_string(),
        category: category.to_string(),
    })
    .collect()
}

/// Prefers the snapshot when one is given; falls back to the static list on
/// any snapshot failure, logging the failure so it stays visible.
pub fn catalog_or_fallback(snapshot: Option<&Path>) -> Vec<Project> {
    if let Some(path) = snapshot {
        match SnapshotCatalog::new(path).top_projects() {
            Ok(projects) => return projects,
            Err(err) => {
                warn!(error = %err, "project snapshot unavailable, using static catalog");
            }
        }
    }
    StaticCatalog
        .top_projects()
        .unwrap_or_else(|_| fallback_projects())
}
