//! Analysis result cache
//!
//! Results are keyed by the SHA-256 of the encoded image, so analysing
//! the same photo again skips the model call.

use super::Analyzer;
use crate::error::{DetoxError, Result};
use async_trait::async_trait;
use desk_detox_common::{AnalysisError, CapturedImage, DetoxResponse};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const CACHE_FILE_NAME: &str = "results.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheFile {
    /// Format version; mismatching files are discarded
    version: u32,
    /// image hash -> entry
    entries: HashMap<String, CacheEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub mime_type: String,
    pub file_size: u64,
    /// RFC 3339, local time
    pub analyzed_at: String,
    pub result: DetoxResponse,
}

impl CacheFile {
    const CURRENT_VERSION: u32 = 1;

    pub fn cache_path(folder: &Path) -> PathBuf {
        folder.join(CACHE_FILE_NAME)
    }

    /// `~/.cache/desk-detox` (platform equivalent)
    pub fn default_dir() -> Result<PathBuf> {
        dirs::cache_dir()
            .map(|d| d.join("desk-detox"))
            .ok_or_else(|| DetoxError::Config("cache directory not found".into()))
    }

    /// Load the cache; a missing, unreadable or outdated file gives an empty one
    pub fn load(folder: &Path) -> Self {
        let cache_path = Self::cache_path(folder);
        if !cache_path.exists() {
            return Self::default();
        }

        let file = match File::open(&cache_path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(path = %cache_path.display(), error = %e, "cannot open cache");
                return Self::default();
            }
        };

        match serde_json::from_reader::<_, CacheFile>(BufReader::new(file)) {
            Ok(cache) if cache.version == Self::CURRENT_VERSION => cache,
            Ok(cache) => {
                tracing::info!(found = cache.version, "cache version mismatch, starting fresh");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "corrupt cache, starting fresh");
                Self::default()
            }
        }
    }

    pub fn save(&self, folder: &Path) -> Result<()> {
        std::fs::create_dir_all(folder)?;
        let file = File::create(Self::cache_path(folder))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Returns Ok(false) if there was nothing to delete
    pub fn clear(folder: &Path) -> Result<bool> {
        let cache_path = Self::cache_path(folder);
        if cache_path.exists() {
            std::fs::remove_file(cache_path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn get(&self, hash: &str) -> Option<&DetoxResponse> {
        self.entries.get(hash).map(|e| &e.result)
    }

    pub fn insert(&mut self, hash: String, image: &CapturedImage, result: DetoxResponse) {
        self.entries.insert(
            hash,
            CacheEntry {
                mime_type: image.mime_type.clone(),
                file_size: image.bytes.len() as u64,
                analyzed_at: chrono::Local::now().to_rfc3339(),
                result,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CacheFile {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// Hex SHA-256 of the encoded image
pub fn compute_image_hash(image: &CapturedImage) -> String {
    hex::encode(Sha256::digest(&image.bytes))
}

/// Serves repeated images from the cache, otherwise asks `inner`
///
/// Only successful results are stored. A failed save is logged, the
/// result is still returned.
pub struct CachedAnalyzer<A> {
    inner: A,
    folder: PathBuf,
    cache: Mutex<CacheFile>,
}

impl<A: Analyzer> CachedAnalyzer<A> {
    pub fn new(inner: A, folder: PathBuf) -> Self {
        let cache = CacheFile::load(&folder);
        Self { inner, folder, cache: Mutex::new(cache) }
    }

    pub fn len(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, hash: &str) -> Option<DetoxResponse> {
        self.cache.lock().ok()?.get(hash).cloned()
    }

    fn store(&self, hash: String, image: &CapturedImage, result: &DetoxResponse) {
        let Ok(mut cache) = self.cache.lock() else {
            return;
        };
        cache.insert(hash, image, result.clone());
        if let Err(e) = cache.save(&self.folder) {
            tracing::warn!(error = %e, "could not write cache");
        }
    }
}

#[async_trait]
impl<A: Analyzer> Analyzer for CachedAnalyzer<A> {
    async fn analyze(&self, image: &CapturedImage) -> std::result::Result<DetoxResponse, AnalysisError> {
        let hash = compute_image_hash(image);
        let short = &hash[..12];

        if let Some(hit) = self.lookup(&hash) {
            tracing::info!(hash = short, "cache hit");
            return Ok(hit);
        }

        tracing::debug!(hash = short, "cache miss");
        let result = self.inner.analyze(image).await?;
        self.store(hash, image, &result);
        Ok(result)
    }
}
