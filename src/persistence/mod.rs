// ABOUTME: Snapshot persistence for wizard sessions
// Storage failures degrade to warnings; in-memory wizard state stays authoritative

pub mod snapshot;
pub mod store;

use thiserror::Error;
use tracing::{info, warn};

pub use snapshot::WizardSnapshot;
pub use store::{FileSnapshotStore, MemorySnapshotStore};

use crate::wizard::WizardController;

/// Errors from a snapshot store or from decoding its blob
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Snapshot decoded but does not fit the running wizard
    #[error("Snapshot does not fit this wizard: {0}")]
    Incompatible(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Opaque blob storage
#[cfg_attr(test, mockall::automock)]
pub trait SnapshotStore {
    fn save(&mut self, blob: &str) -> Result<(), StorageError>;
    fn load(&self) -> Result<Option<String>, StorageError>;
    fn clear(&mut self) -> Result<(), StorageError>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Box<S> {
    fn save(&mut self, blob: &str) -> Result<(), StorageError> {
        (**self).save(blob)
    }

    fn load(&self) -> Result<Option<String>, StorageError> {
        (**self).load()
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        (**self).clear()
    }
}

/// Result of a persistence operation. Never fatal.
#[derive(Debug)]
#[must_use]
pub enum PersistenceOutcome {
    Done,
    /// Nothing was stored to restore
    Empty,
    /// The store failed; the wizard state was left untouched
    Degraded(StorageError),
}

impl PersistenceOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }

    pub fn warning(&self) -> Option<&StorageError> {
        match self {
            Self::Degraded(err) => Some(err),
            _ => None,
        }
    }
}

/// Saves and restores a controller through a `SnapshotStore`
#[derive(Debug)]
pub struct WizardPersistence<S> {
    store: S,
}

impl<S: SnapshotStore> WizardPersistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn save(&mut self, controller: &WizardController) -> PersistenceOutcome {
        let result = WizardSnapshot::capture(controller)
            .to_blob()
            .and_then(|blob| self.store.save(&blob));

        match result {
            Ok(()) => {
                info!(step = controller.current_step(), "Wizard snapshot saved");
                PersistenceOutcome::Done
            }
            Err(err) => degraded("save", err),
        }
    }

    /// Apply the stored snapshot to `controller`; any failure leaves it unchanged
    pub fn restore(&self, controller: &mut WizardController) -> PersistenceOutcome {
        let snapshot = match self.load_snapshot() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return PersistenceOutcome::Empty,
            Err(err) => return degraded("load", err),
        };

        match snapshot.into_state(controller) {
            Ok(state) => {
                controller.replace_state(state);
                info!(step = controller.current_step(), "Wizard snapshot restored");
                PersistenceOutcome::Done
            }
            Err(err) => degraded("restore", err),
        }
    }

    pub fn load_snapshot(&self) -> Result<Option<WizardSnapshot>, StorageError> {
        self.store
            .load()?
            .map(|blob| WizardSnapshot::from_blob(&blob))
            .transpose()
    }

    pub fn clear(&mut self) -> PersistenceOutcome {
        match self.store.clear() {
            Ok(()) => PersistenceOutcome::Done,
            Err(err) => degraded("clear", err),
        }
    }
}

fn degraded(operation: &str, err: StorageError) -> PersistenceOutcome {
    warn!(operation, error = %err, "Wizard snapshot {} failed", operation);
    PersistenceOutcome::Degraded(err)
}
