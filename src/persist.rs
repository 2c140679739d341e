//! Flat-file CSV dumps of fetched records.
//!
//! Each fetch overwrites its own file in the cache directory. The files are
//! a convenience for offline inspection and are never read back.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CsvCache {
    dir: PathBuf,
}

impl CsvCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `routes.csv`
    pub fn routes_path(&self) -> PathBuf {
        self.dir.join("routes.csv")
    }

    /// `trips.csv`
    pub fn trips_path(&self) -> PathBuf {
        self.dir.join("trips.csv")
    }

    /// `shape_<shape_id>.csv`
    pub fn shape_path(&self, shape_id: &str) -> PathBuf {
        self.dir.join(format!("shape_{}.csv", file_key(shape_id)))
    }

    /// `stops_<route_id>.csv`
    pub fn stops_path(&self, route_id: &str) -> PathBuf {
        self.dir.join(format!("stops_{}.csv", file_key(route_id)))
    }

    /// Writes `records` to `path`, replacing any previous content.
    pub fn write_records<T: Serialize>(&self, path: &Path, records: &[T]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating cache directory {}", self.dir.display()))?;

        let file =
            File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        debug!(path = %path.display(), rows = records.len(), "Cached records to CSV");
        Ok(())
    }
}

/// Keeps ids usable as file name fragments.
fn file_key(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
