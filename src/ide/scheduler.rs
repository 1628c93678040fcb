//! Per-URI ordering of re-index work.
//!
//! Every document change carries a version. Starting work for a URI cancels
//! the older in-flight work for it, and a result is only applied if it comes
//! from the newest work started. A re-index at the version already seen (a
//! classpath change, say) is newer work too; only older versions are
//! refused. Different URIs never wait on each other beyond the short table
//! lock.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("{uri} version {version} superseded by version {latest}")]
    Superseded {
        uri: SmolStr,
        version: u64,
        latest: u64,
    },

    #[error("indexing {uri} version {version} was cancelled")]
    Cancelled { uri: SmolStr, version: u64 },
}

/// Permission to index one version of a document
#[derive(Debug, Clone)]
pub struct IndexTicket {
    project: SmolStr,
    uri: SmolStr,
    version: u64,
    generation: u64,
    cancel: CancellationToken,
}

impl IndexTicket {
    pub fn project(&self) -> &SmolStr {
        &self.project
    }

    pub fn uri(&self) -> &SmolStr {
        &self.uri
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Cancelled once newer work for the same URI starts
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[derive(Debug)]
struct Slot {
    project: SmolStr,
    version: u64,
    generation: u64,
    cancel: CancellationToken,
}

#[derive(Debug, Default)]
struct Slots {
    by_uri: FxHashMap<SmolStr, Slot>,
    /// Bumped for every ticket handed out
    generation: u64,
}

#[derive(Debug, Default)]
pub struct IndexScheduler {
    slots: Mutex<Slots>,
}

impl IndexScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start work for `version` of `uri` in `project`, cancelling older
    /// in-flight work for the URI
    ///
    /// Fails when a newer version was already seen.
    pub fn begin(&self, project: &str, uri: &str, version: u64) -> Result<IndexTicket, IndexError> {
        let mut slots = self.slots.lock();
        if let Some(slot) = slots.by_uri.get(uri) {
            if slot.version > version {
                return Err(IndexError::Superseded {
                    uri: SmolStr::new(uri),
                    version,
                    latest: slot.version,
                });
            }
            trace!(uri, old = slot.version, new = version, "cancelling older index work");
            slot.cancel.cancel();
        }

        slots.generation += 1;
        let generation = slots.generation;
        let cancel = CancellationToken::new();
        slots.by_uri.insert(
            SmolStr::new(uri),
            Slot {
                project: SmolStr::new(project),
                version,
                generation,
                cancel: cancel.clone(),
            },
        );
        Ok(IndexTicket {
            project: SmolStr::new(project),
            uri: SmolStr::new(uri),
            version,
            generation,
            cancel,
        })
    }

    /// Run `apply` if `ticket` is still the newest work for its URI
    ///
    /// `apply` runs under the table lock, so results for one URI are applied
    /// in the order their work started and a stale result can never
    /// overwrite a newer one.
    pub fn commit<R>(&self, ticket: &IndexTicket, apply: impl FnOnce() -> R) -> Result<R, IndexError> {
        let slots = self.slots.lock();
        let Some(slot) = slots.by_uri.get(&ticket.uri) else {
            debug!(uri = %ticket.uri, version = ticket.version, "index result for a forgotten document dropped");
            return Err(IndexError::Cancelled {
                uri: ticket.uri.clone(),
                version: ticket.version,
            });
        };
        if slot.generation != ticket.generation {
            debug!(uri = %ticket.uri, version = ticket.version, latest = slot.version, "stale index result dropped");
            return Err(IndexError::Superseded {
                uri: ticket.uri.clone(),
                version: ticket.version,
                latest: slot.version,
            });
        }
        if ticket.is_cancelled() {
            return Err(IndexError::Cancelled {
                uri: ticket.uri.clone(),
                version: ticket.version,
            });
        }
        Ok(apply())
    }

    /// Newest version seen for `uri`
    pub fn latest_version(&self, uri: &str) -> Option<u64> {
        self.slots.lock().by_uri.get(uri).map(|slot| slot.version)
    }

    /// Stop tracking `uri`, cancelling its in-flight work
    pub fn forget(&self, uri: &str) {
        if let Some(slot) = self.slots.lock().by_uri.remove(uri) {
            slot.cancel.cancel();
        }
    }

    /// Stop tracking every URI of `project`, then run `remove`
    ///
    /// Both happen under the table lock, so no result for the project can be
    /// committed after `remove` ran.
    pub fn forget_project<R>(&self, project: &str, remove: impl FnOnce() -> R) -> R {
        let mut slots = self.slots.lock();
        slots.by_uri.retain(|_, slot| {
            if slot.project == project {
                slot.cancel.cancel();
                false
            } else {
                true
            }
        });
        remove()
    }

    /// Cancel all in-flight work
    pub fn cancel_all(&self) {
        for slot in self.slots.lock().by_uri.values() {
            slot.cancel.cancel();
        }
    }
}
