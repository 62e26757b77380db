//! End-to-end pipeline test without HTTP: upload batches feed the
//! submission form through snapshots, the aggregator gates and stores the
//! payload, and the packager resolves the stored URLs back out of storage.
//!
//! Run with: `cargo test -p galley-api --test pipeline_test`

mod helpers;

use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use galley_core::models::FileCategory;
use galley_notify::{package_attachments, FetchError, FetchedFile, FileFetcher, Notifier};
use galley_storage::{LocalStorage, Storage, StorageError};
use galley_submission::{Aggregator, MemoryArticleStore, SubmissionForm};
use galley_upload::{SelectedFile, UploadBatch};

const BASE_URL: &str = "http://localhost:3000/files";

/// Resolves public URLs back through the storage backend, standing in for
/// the HTTP fetcher.
struct StorageFetcher {
    storage: Arc<dyn Storage>,
}

#[async_trait]
impl FileFetcher for StorageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedFile, FetchError> {
        let key = url
            .strip_prefix(BASE_URL)
            .map(|k| k.trim_start_matches('/'))
            .ok_or_else(|| FetchError::Network(format!("unexpected url {}", url)))?;
        let bytes = self.storage.download(key).await.map_err(|e| match e {
            StorageError::NotFound(_) => FetchError::Status(404),
            other => FetchError::Network(other.to_string()),
        })?;
        Ok(FetchedFile {
            url: url.to_string(),
            name: url.rsplit('/').next().unwrap_or("attachment").to_string(),
            content_type: "application/octet-stream".to_string(),
            bytes: bytes.into(),
        })
    }
}

fn selected(name: &str, content_type: &str, data: &[u8]) -> SelectedFile {
    SelectedFile {
        name: name.to_string(),
        content_type: content_type.to_string(),
        data: data.to_vec(),
    }
}

#[tokio::test]
async fn test_full_submission_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let config = helpers::test_config(&temp_dir);
    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(temp_dir.path(), BASE_URL.to_string())
            .await
            .unwrap(),
    );

    // Independent per-category upload managers.
    let documents = UploadBatch::new(
        FileCategory::Document,
        config.documents.clone(),
        storage.clone(),
    );
    let annexes = UploadBatch::new(FileCategory::Image, config.images.clone(), storage.clone());
    let cover = UploadBatch::new(FileCategory::Cover, config.covers.clone(), storage.clone());

    let doc_rx = documents.subscribe();
    let annex_rx = annexes.subscribe();
    let cover_rx = cover.subscribe();

    documents.select_files(vec![
        selected("manuscript.pdf", "application/pdf", b"%PDF-1.4 main"),
        selected("appendix.pdf", "application/pdf", b"%PDF-1.4 appendix"),
    ]);
    annexes.select_files(vec![selected("fig1.png", "image/png", b"\x89PNG fig1")]);
    cover.select_files(vec![selected("cover.jpg", "image/jpeg", b"\xff\xd8 cover")]);

    documents.wait_idle().await;
    annexes.wait_idle().await;
    cover.wait_idle().await;

    // The form consumes the latest snapshots (last value wins) and never
    // mutates the batches' lists.
    let mut form = SubmissionForm::new();
    form.title = "Bilateral giant inguinoscrotal hernia repair".to_string();
    form.abstract_text = "E".repeat(150);
    form.authors = vec!["G. Hilaire".to_string(), "H. Innocent".to_string()];
    form.tags = vec!["general-surgery".to_string()];
    form.track = Some(galley_core::models::PublicationTrack::Rhca);
    form.corresponding_email = "g.hilaire@example.org".to_string();
    form.update_files(FileCategory::Document, doc_rx.borrow().clone());
    form.update_files(FileCategory::Image, annex_rx.borrow().clone());
    form.update_files(FileCategory::Cover, cover_rx.borrow().clone());

    let store = Arc::new(MemoryArticleStore::new());
    let aggregator = Aggregator::new(store.clone());
    let outcome = aggregator.submit_form(&mut form).await.unwrap();
    assert!(form.is_empty());

    let article = outcome.article;
    assert_eq!(article.article_files.len(), 2);
    assert_eq!(article.image_annexes.len(), 1);
    assert!(article.cover_image_url.is_some());

    // Packaging resolves every stored URL back out of storage.
    let fetcher = StorageFetcher {
        storage: storage.clone(),
    };
    let notifier = Notifier::new(
        None,
        Arc::new(fetcher),
        config.attachment_budget_bytes,
        None,
    );
    let manifest = notifier.dispatch_submission(&article).await.unwrap();

    assert_eq!(manifest.included.len(), 4);
    assert!(manifest.excluded.is_empty());
    assert!(manifest.total_size_bytes > 0);
}

/// A stored URL that no longer resolves is excluded with `fetch_failed`
/// while its siblings are still packaged.
#[tokio::test]
async fn test_pipeline_packaging_survives_missing_object() {
    let temp_dir = TempDir::new().unwrap();
    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(temp_dir.path(), BASE_URL.to_string())
            .await
            .unwrap(),
    );

    let (_, present_url) = storage
        .upload(
            "article-documents",
            "present.pdf",
            "application/pdf",
            b"%PDF-present".to_vec(),
        )
        .await
        .unwrap();
    let missing_url = format!("{}/article-documents/missing.pdf", BASE_URL);

    let fetcher = StorageFetcher {
        storage: storage.clone(),
    };
    let urls = vec![present_url, missing_url, format!("{}2", BASE_URL)];
    let packaged = package_attachments(&fetcher, &urls, 45 * 1024 * 1024).await;

    assert_eq!(packaged.manifest.included.len(), 1);
    assert_eq!(packaged.manifest.excluded.len(), 2);
}
