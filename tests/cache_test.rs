//! Result cache tests
//!
//! Save/load of the cache file and the cache-first analyzer wrapper.

use async_trait::async_trait;
use desk_detox::analyzer::cache::{compute_image_hash, CacheFile};
use desk_detox::analyzer::{Analyzer, CachedAnalyzer};
use desk_detox_common::{AnalysisError, CapturedImage, Category, DetoxItem, DetoxResponse};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::tempdir;

fn image(bytes: &[u8]) -> CapturedImage {
    CapturedImage::new(bytes.to_vec(), "image/jpeg")
}

fn response(sender: &str) -> DetoxResponse {
    let mut item = DetoxItem::new(1, Category::Action);
    item.sender = sender.to_string();
    item.urgency_score = 7;
    DetoxResponse { summary: "1 document".to_string(), items: vec![item] }
}

/// Counts calls; fails when `fail` is set
struct StubAnalyzer {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

#[async_trait]
impl Analyzer for StubAnalyzer {
    async fn analyze(&self, _image: &CapturedImage) -> Result<DetoxResponse, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(AnalysisError::Http { status: 503, body: "overloaded".to_string() })
        } else {
            Ok(response("Power Co"))
        }
    }
}

#[test]
fn test_cache_file_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let cache = CacheFile::load(dir.path());

    assert_eq!(cache.len(), 0);
    assert!(cache.is_empty());
}

#[test]
fn test_cache_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let img = image(b"\xFF\xD8\xFFdesk");
    let hash = compute_image_hash(&img);

    let mut cache = CacheFile::load(dir.path());
    cache.insert(hash.clone(), &img, response("Power Co"));
    cache.save(dir.path()).expect("save failed");

    let loaded = CacheFile::load(dir.path());
    assert_eq!(loaded.len(), 1);
    let cached = loaded.get(&hash).expect("entry missing");
    assert_eq!(cached.items[0].sender, "Power Co");
    assert!(loaded.get("other").is_none());
}

#[test]
fn test_corrupt_cache_starts_fresh() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(CacheFile::cache_path(dir.path()), "{ not json").expect("write failed");

    let cache = CacheFile::load(dir.path());
    assert!(cache.is_empty());
}

#[test]
fn test_version_mismatch_starts_fresh() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(
        CacheFile::cache_path(dir.path()),
        r#"{"version": 999, "entries": {}}"#,
    )
    .expect("write failed");

    let cache = CacheFile::load(dir.path());
    assert!(cache.is_empty());
}

#[test]
fn test_cache_clear() {
    let dir = tempdir().expect("Failed to create temp dir");

    assert!(!CacheFile::clear(dir.path()).expect("clear failed"));

    CacheFile::default().save(dir.path()).expect("save failed");
    assert!(CacheFile::clear(dir.path()).expect("clear failed"));
    assert!(!CacheFile::cache_path(dir.path()).exists());
}

#[test]
fn test_hash_depends_on_content() {
    let a = compute_image_hash(&image(b"one"));
    let b = compute_image_hash(&image(b"two"));
    assert_eq!(a.len(), 64);
    assert_ne!(a, b);
    assert_eq!(a, compute_image_hash(&image(b"one")));
}

#[tokio::test]
async fn test_cached_analyzer_calls_once() {
    let dir = tempdir().expect("Failed to create temp dir");
    let calls = Arc::new(AtomicUsize::new(0));
    let stub = StubAnalyzer { calls: calls.clone(), fail: false };
    let analyzer = CachedAnalyzer::new(stub, dir.path().to_path_buf());

    let img = image(b"same photo");
    let first = analyzer.analyze(&img).await.expect("first analysis");
    let second = analyzer.analyze(&img).await.expect("second analysis");

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(first, second);
    assert_eq!(analyzer.len(), 1);

    // persisted for the next run
    assert_eq!(CacheFile::load(dir.path()).len(), 1);
}

#[tokio::test]
async fn test_cached_analyzer_does_not_store_errors() {
    let dir = tempdir().expect("Failed to create temp dir");
    let calls = Arc::new(AtomicUsize::new(0));
    let stub = StubAnalyzer { calls: calls.clone(), fail: true };
    let analyzer = CachedAnalyzer::new(stub, dir.path().to_path_buf());

    let img = image(b"blurry photo");
    assert!(analyzer.analyze(&img).await.is_err());
    assert!(analyzer.analyze(&img).await.is_err());

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(analyzer.is_empty());
}
