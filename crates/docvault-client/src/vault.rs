//! The vault state container.
//!
//! [`Vault`] owns the live [`AppState`] and is the only thing that mutates
//! it. Every mutation that changes something is applied under one lock and
//! followed, still under that lock, by a full snapshot write through the
//! injected [`SnapshotStore`], so snapshots land in mutation order. The lock
//! is never held across an `.await`: concurrent ingestions interleave freely
//! and commit in the order they finish.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Local;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use docvault_shared::constants::{NEW_CATEGORY_COLOR, NEW_CATEGORY_ICON};
use docvault_shared::types::default_categories;
use docvault_shared::{AppState, Category, Document, User};
use docvault_store::SnapshotStore;

use crate::config::VaultConfig;
use crate::error::{IngestError, IngestFailure};
use crate::events::{emit_event, VaultEvent, EVENT_CHANNEL_CAPACITY};
use crate::ingest::{self, IngestStage, RawFile};
use crate::remote::RemoteAdapter;

struct Inner {
    state: AppState,
    store: Box<dyn SnapshotStore>,
}

/// Central vault state.
pub struct Vault {
    inner: Mutex<Inner>,
    remote: RemoteAdapter,
    login_delay: Duration,
    /// A login is waiting on its simulated latency.
    syncing: AtomicBool,
    /// Ingestions started but not yet committed or failed.
    pending: AtomicUsize,
    events: broadcast::Sender<VaultEvent>,
}

/// Decrements the pending-ingestion counter however the pipeline exits.
struct PendingGuard<'a>(&'a AtomicUsize);

impl<'a> PendingGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Vault {
    /// Load the last snapshot from `store`, or start from the default state.
    ///
    /// Never fails: a missing, unreadable or malformed snapshot all mean
    /// "start fresh".
    pub fn initialize(
        config: &VaultConfig,
        store: impl SnapshotStore + 'static,
        remote: RemoteAdapter,
    ) -> Self {
        let mut state = match store.load() {
            Ok(Some(state)) => {
                info!(
                    categories = state.categories.len(),
                    documents = state.documents.len(),
                    logged_in = state.is_logged_in(),
                    "Vault state restored"
                );
                state
            }
            Ok(None) => {
                info!("No stored vault state, starting fresh");
                AppState::default()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored vault state, starting fresh");
                AppState::default()
            }
        };

        if state.categories.is_empty() {
            warn!("Stored vault state has no categories, reseeding defaults");
            state.categories = default_categories();
        }

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            inner: Mutex::new(Inner {
                state,
                store: Box::new(store),
            }),
            remote,
            login_delay: config.login_delay,
            syncing: AtomicBool::new(false),
            pending: AtomicUsize::new(0),
            events,
        }
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> AppState {
        self.lock().state.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<VaultEvent> {
        self.events.subscribe()
    }

    /// Whether a login is in flight. Callers should not start another.
    pub fn is_syncing(&self) -> bool {
        self.syncing.load(Ordering::SeqCst)
    }

    /// Number of ingestions currently in progress.
    pub fn pending_ingestions(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Simulated sign-in: wait the configured latency, then record the
    /// fixed demo identity.
    ///
    /// There is no guard against overlapping calls; check
    /// [`Vault::is_syncing`] before calling.
    pub async fn login(&self) -> User {
        self.syncing.store(true, Ordering::SeqCst);
        emit_event(&self.events, VaultEvent::LoginStarted);

        tokio::time::sleep(self.login_delay).await;

        let user = User::demo();
        self.commit(|state| {
            state.user = Some(user.clone());
            Some(())
        });
        self.syncing.store(false, Ordering::SeqCst);

        info!(user_id = %user.id, "Login complete");
        emit_event(
            &self.events,
            VaultEvent::LoginCompleted {
                user_id: user.id.clone(),
            },
        );
        user
    }

    /// Ingest the file picked by the user, if any. `None` is ignored.
    pub async fn ingest_selection(
        &self,
        file: Option<RawFile>,
    ) -> Result<Option<Document>, IngestError> {
        match file {
            Some(file) => self.ingest_document(file).await.map(Some),
            None => {
                debug!("No file selected, nothing to ingest");
                Ok(None)
            }
        }
    }

    /// Encode, analyze and upload `file`, then file the resulting document
    /// at the front of the vault.
    ///
    /// Analysis problems never fail an ingestion (the document gets a
    /// placeholder title and summary); an oversized file or a failed upload
    /// does, and then nothing is added.
    pub async fn ingest_document(&self, file: RawFile) -> Result<Document, IngestError> {
        let _pending = PendingGuard::enter(&self.pending);
        let meta = file.metadata();

        self.stage(&meta.name, IngestStage::Encoding);
        let encoded =
            ingest::encode(&file).map_err(|e| self.fail(&meta.name, IngestStage::Encoding, e))?;

        self.stage(&meta.name, IngestStage::AnalyzingAndUploading);
        let (analysis, upload) = tokio::join!(
            self.remote.analyze_content(&meta, &encoded),
            self.remote.simulate_upload(&meta, &file.bytes),
        );
        let drive_file_id = upload.map_err(|e| {
            self.fail(
                &meta.name,
                IngestStage::AnalyzingAndUploading,
                IngestFailure::Upload(e),
            )
        })?;

        self.stage(&meta.name, IngestStage::Assembling);
        let today = Local::now().date_naive();
        let document = self
            .commit(|state| {
                let category = state.resolve_category(&analysis.category)?;
                debug!(
                    label = %analysis.category,
                    category = %category.name,
                    "Resolved analysis category"
                );
                let document =
                    ingest::assemble_document(&meta, analysis, category, drive_file_id, today);
                state.documents.insert(0, document.clone());
                Some(document)
            })
            .ok_or_else(|| {
                self.fail(&meta.name, IngestStage::Assembling, IngestFailure::NoCategories)
            })?;

        self.stage(&meta.name, IngestStage::Committed);
        info!(
            doc_id = %document.id,
            category_id = %document.category_id,
            file_name = %meta.name,
            size = meta.size,
            "Document ingested"
        );
        emit_event(
            &self.events,
            VaultEvent::DocumentAdded {
                id: document.id.clone(),
            },
        );
        Ok(document)
    }

    /// Remove the document with `id`. Returns whether one was removed.
    ///
    /// Asking the user for confirmation is up to the caller.
    pub fn delete_document(&self, id: &str) -> bool {
        let removed = self
            .commit(|state| {
                let before = state.documents.len();
                state.documents.retain(|d| d.id != id);
                (state.documents.len() != before).then_some(())
            })
            .is_some();

        if removed {
            info!(doc_id = %id, "Document deleted");
            emit_event(&self.events, VaultEvent::DocumentDeleted { id: id.to_string() });
        } else {
            debug!(doc_id = %id, "Delete of unknown document ignored");
        }
        removed
    }

    /// Append a category named `name`. Blank names are ignored.
    pub fn add_category(&self, name: &str) -> Option<Category> {
        let name = name.trim();
        if name.is_empty() {
            debug!("Ignoring category with empty name");
            return None;
        }

        let category = Category::new(
            ingest::new_category_id(),
            name,
            NEW_CATEGORY_ICON,
            NEW_CATEGORY_COLOR,
        );
        self.commit(|state| {
            state.categories.push(category.clone());
            Some(())
        })?;

        info!(category_id = %category.id, name = %category.name, "Category added");
        emit_event(
            &self.events,
            VaultEvent::CategoryAdded {
                id: category.id.clone(),
            },
        );
        Some(category)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `mutate` and, if it reports a change, persist the whole state.
    fn commit<R>(&self, mutate: impl FnOnce(&mut AppState) -> Option<R>) -> Option<R> {
        let mut inner = self.lock();
        let out = mutate(&mut inner.state)?;
        if let Err(e) = inner.store.save(&inner.state) {
            error!(error = %e, "Failed to persist vault state");
        }
        Some(out)
    }

    fn stage(&self, file_name: &str, stage: IngestStage) {
        debug!(file_name, %stage, "Ingestion stage");
        emit_event(
            &self.events,
            VaultEvent::IngestionStage {
                file_name: file_name.to_string(),
                stage,
            },
        );
    }

    fn fail(&self, file_name: &str, stage: IngestStage, cause: IngestFailure) -> IngestError {
        warn!(file_name, %stage, error = %cause, "Ingestion failed");
        self.stage(file_name, IngestStage::Failed);
        IngestError::new(stage, cause)
    }
}

impl std::fmt::Debug for Vault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("remote", &self.remote)
            .field("login_delay", &self.login_delay)
            .field("syncing", &self.is_syncing())
            .field("pending", &self.pending_ingestions())
            .finish_non_exhaustive()
    }
}
