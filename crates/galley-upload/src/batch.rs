//! Upload batch: the per-category upload manager.
//!
//! A batch turns local file selections into durable remote URLs. Policy
//! checks run at selection time and a rejected file never reaches the
//! storage layer. Accepted files upload concurrently; the `files` list
//! order is upload **completion** order, not selection order, and every
//! change publishes the full current list (never a delta) on a
//! last-value-wins `watch` channel.
//!
//! Per-file state machine:
//! selected → validating → {rejected | uploading → {uploaded | failed}}.
//! Terminal states: rejected, uploaded, failed. A failed file leaves
//! `failed` only by being selected again.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{watch, Notify};
use tokio_util::sync::CancellationToken;

use galley_core::config::CategoryPolicy;
use galley_core::models::{FileCategory, UploadedFile};
use galley_storage::Storage;

use crate::pipeline;
use crate::validator::{FileValidationError, FileValidator};

/// A locally selected file handed to the batch.
#[derive(Clone)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Read-only snapshot of a batch, for display.
#[derive(Debug, Clone, Default)]
pub struct UploadBatchState {
    /// Completed uploads, in completion order.
    pub files: Vec<UploadedFile>,
    /// True while any upload is in flight.
    pub uploading: bool,
    /// Per-file errors, keyed by original filename.
    pub errors: HashMap<String, String>,
}

/// Outcome of one `select_files` call. Rejections are also recorded in the
/// batch error map.
#[derive(Debug, Default)]
pub struct SelectionReport {
    pub accepted: Vec<String>,
    pub rejected: Vec<(String, String)>,
}

struct BatchInner {
    files: Vec<UploadedFile>,
    errors: HashMap<String, String>,
    in_flight: usize,
}

/// Per-category upload manager.
///
/// The batch is the single writer of its file list; collaborators receive
/// read-only snapshots via [`subscribe`](UploadBatch::subscribe) and must
/// never assume ordering between categories.
pub struct UploadBatch {
    category: FileCategory,
    policy: CategoryPolicy,
    storage: Arc<dyn Storage>,
    inner: Arc<Mutex<BatchInner>>,
    snapshot_tx: watch::Sender<Vec<UploadedFile>>,
    idle: Arc<Notify>,
    cancel: CancellationToken,
}

impl UploadBatch {
    pub fn new(category: FileCategory, policy: CategoryPolicy, storage: Arc<dyn Storage>) -> Self {
        let (snapshot_tx, _) = watch::channel(Vec::new());
        UploadBatch {
            category,
            policy,
            storage,
            inner: Arc::new(Mutex::new(BatchInner {
                files: Vec::new(),
                errors: HashMap::new(),
                in_flight: 0,
            })),
            snapshot_tx,
            idle: Arc::new(Notify::new()),
            cancel: CancellationToken::new(),
        }
    }

    /// Receive the full current file list on every change (last value wins).
    pub fn subscribe(&self) -> watch::Receiver<Vec<UploadedFile>> {
        self.snapshot_tx.subscribe()
    }

    pub fn category(&self) -> FileCategory {
        self.category
    }

    /// Validate a selection and start uploads for the accepted files.
    ///
    /// Checks run in order, each short-circuiting with a user-visible error
    /// and no storage call for the rejected file:
    /// 1. capacity — the overflow files are rejected, not the whole batch;
    /// 2. type (extension, content type, cross-check);
    /// 3. size.
    ///
    /// Returns immediately after spawning the uploads; use
    /// [`wait_idle`](UploadBatch::wait_idle) or the snapshot channel to
    /// observe completion.
    pub fn select_files(&self, candidates: Vec<SelectedFile>) -> SelectionReport {
        let validator = FileValidator::from_policy(&self.policy);
        let mut report = SelectionReport::default();

        let capacity = {
            let inner = self.inner.lock().expect("batch lock poisoned");
            self.policy
                .max_files
                .saturating_sub(inner.files.len() + inner.in_flight)
        };

        let mut accepted = Vec::new();
        for (idx, candidate) in candidates.into_iter().enumerate() {
            if idx >= capacity {
                let err = FileValidationError::MaxFilesExceeded {
                    max: self.policy.max_files,
                };
                self.record_rejection(&mut report, candidate.name, err.to_string());
                continue;
            }

            match validator.validate_all(
                &candidate.name,
                &candidate.content_type,
                candidate.data.len() as u64,
            ) {
                Ok(()) => accepted.push(candidate),
                Err(err) => self.record_rejection(&mut report, candidate.name, err.to_string()),
            }
        }

        for candidate in accepted {
            report.accepted.push(candidate.name.clone());
            self.spawn_upload(candidate);
        }

        report
    }

    fn record_rejection(&self, report: &mut SelectionReport, name: String, message: String) {
        tracing::debug!(
            category = %self.category,
            file = %name,
            error = %message,
            "File rejected at selection"
        );
        self.inner
            .lock()
            .expect("batch lock poisoned")
            .errors
            .insert(name.clone(), message.clone());
        report.rejected.push((name, message));
    }

    fn spawn_upload(&self, candidate: SelectedFile) {
        {
            let mut inner = self.inner.lock().expect("batch lock poisoned");
            inner.in_flight += 1;
            // Re-selecting a failed file is the only way out of `failed`.
            inner.errors.remove(&candidate.name);
        }

        let storage = self.storage.clone();
        let bucket = self.policy.bucket.clone();
        let category = self.category;
        let inner = self.inner.clone();
        let snapshot_tx = self.snapshot_tx.clone();
        let idle = self.idle.clone();
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            let SelectedFile {
                name,
                content_type,
                data,
            } = candidate;

            let result =
                pipeline::store_file(storage, &bucket, &name, &content_type, data, category).await;

            let mut guard = inner.lock().expect("batch lock poisoned");
            guard.in_flight -= 1;

            // A cancelled batch discards results: the in-flight upload has
            // completed (or failed) silently and must not touch the file
            // list, the error map, or the snapshot channel.
            if !cancel.is_cancelled() {
                match result {
                    Ok(file) => {
                        tracing::info!(
                            category = %category,
                            file = %file.original_name,
                            size_bytes = file.size_bytes,
                            "Upload complete"
                        );
                        guard.files.push(file);
                        // Full current list, not the delta; sent under the
                        // lock so snapshots are ordered with completions.
                        // send_replace stores the value even with no
                        // subscribers yet.
                        snapshot_tx.send_replace(guard.files.clone());
                    }
                    Err(err) => {
                        tracing::warn!(
                            category = %category,
                            file = %name,
                            error = %err,
                            "Upload failed"
                        );
                        guard.errors.insert(name, err.to_string());
                    }
                }
            }

            let now_idle = guard.in_flight == 0;
            drop(guard);
            if now_idle {
                idle.notify_waiters();
            }
        });
    }

    /// Remove a completed file from local state.
    ///
    /// The remote object is deliberately left in place (orphan-tolerant
    /// storage policy); only the local list and the published snapshot
    /// change.
    pub fn remove_file(&self, name: &str) -> bool {
        let mut inner = self.inner.lock().expect("batch lock poisoned");
        let before = inner.files.len();
        inner.files.retain(|f| f.original_name != name);
        let removed = inner.files.len() != before;
        if removed {
            self.snapshot_tx.send_replace(inner.files.clone());
        }
        removed
    }

    /// Dispose of the batch: in-flight uploads complete silently and their
    /// results are discarded.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn state(&self) -> UploadBatchState {
        let inner = self.inner.lock().expect("batch lock poisoned");
        UploadBatchState {
            files: inner.files.clone(),
            uploading: inner.in_flight > 0,
            errors: inner.errors.clone(),
        }
    }

    /// Wait until no upload is in flight.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.idle.notified();
            if self.inner.lock().expect("batch lock poisoned").in_flight == 0 {
                return;
            }
            notified.await;
        }
    }
}
