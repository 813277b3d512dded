//! Search execution and lifecycle

use super::state::{FailureReason, SearchState};
use crate::breach::select_first;
use crate::error::ValidationError;
use crate::query::SearchQuery;
use crate::sources::LookupSource;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

/// Default upper bound on a single lookup
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(15);

/// How a search ended from the caller's point of view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled {
    /// The outcome was written to the controller state
    Applied(SearchState),
    /// A newer search started first; the outcome was dropped
    Superseded,
}

/// Runs one search at a time against a lookup source and owns the resulting
/// [`SearchState`].
///
/// Every started search gets a generation number. An outcome is written only
/// if its generation is still the latest when the lookup settles, so a slow
/// earlier request can never overwrite a later one.
#[derive(Clone)]
pub struct SearchController {
    source: Arc<dyn LookupSource>,
    lookup_timeout: Duration,
    generation: Arc<AtomicU64>,
    state: Arc<watch::Sender<SearchState>>,
}

impl SearchController {
    /// Create a controller in the `Idle` state
    pub fn new(source: Arc<dyn LookupSource>) -> Self {
        let (state, _) = watch::channel(SearchState::Idle);
        Self {
            source,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            generation: Arc::new(AtomicU64::new(0)),
            state: Arc::new(state),
        }
    }

    /// Set the lookup timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Set the lookup timeout from seconds; invalid values keep the default
    pub fn with_timeout_secs(self, seconds: f64) -> Self {
        match Duration::try_from_secs_f64(seconds) {
            Ok(timeout) if !timeout.is_zero() => self.with_timeout(timeout),
            _ => {
                warn!("Ignoring invalid lookup timeout {}s", seconds);
                self
            }
        }
    }

    pub fn source(&self) -> &Arc<dyn LookupSource> {
        &self.source
    }

    pub fn lookup_timeout(&self) -> Duration {
        self.lookup_timeout
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Observe every state replacement
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Start a search without waiting for it.
    ///
    /// Blank queries are rejected before any state change. Otherwise the
    /// state is `Pending` when this returns and the lookup runs on a
    /// spawned task.
    pub fn start(&self, query: SearchQuery) -> Result<SearchTicket, ValidationError> {
        query.validate()?;

        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = SearchState::Pending;
        });

        info!(
            "Starting search #{} ({} mode) via {}",
            generation,
            query.mode,
            self.source.name()
        );
        debug!("Search #{} query: {}", generation, query.trimmed());

        let controller = self.clone();
        let handle = tokio::spawn(async move { controller.run(generation, query).await });

        Ok(SearchTicket {
            generation,
            handle,
            controller: self.clone(),
        })
    }

    /// Run a search to completion and return the resulting state.
    ///
    /// If a newer search superseded this one, the current state (belonging
    /// to the newer search) is returned instead.
    pub async fn search(&self, query: SearchQuery) -> Result<SearchState, ValidationError> {
        let ticket = self.start(query)?;
        Ok(match ticket.wait().await {
            Settled::Applied(state) => state,
            Settled::Superseded => self.state(),
        })
    }

    async fn run(&self, generation: u64, query: SearchQuery) -> Settled {
        let start = Instant::now();

        let outcome = match timeout(self.lookup_timeout, self.source.lookup(&query)).await {
            Ok(Ok(records)) => match select_first(&records) {
                Some(breach) => {
                    debug!(
                        "Search #{} matched {} records, reporting {}",
                        generation,
                        records.len(),
                        breach.title
                    );
                    SearchState::Found(breach)
                }
                None => SearchState::NotFound,
            },
            Ok(Err(e)) => {
                warn!("Search #{} failed: {}", generation, e);
                SearchState::Failed(e.into())
            }
            Err(_) => {
                warn!(
                    "Search #{} timed out after {:?}",
                    generation, self.lookup_timeout
                );
                SearchState::Failed(FailureReason::Timeout)
            }
        };

        let settled = self.settle(generation, outcome);
        if let Settled::Applied(ref state) = settled {
            info!(
                "Search #{} settled as {} in {:?}",
                generation,
                state.kind(),
                start.elapsed()
            );
        }
        settled
    }

    /// Write `outcome` if `generation` is still the latest search
    fn settle(&self, generation: u64, outcome: SearchState) -> Settled {
        let applied = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) == generation {
                *state = outcome.clone();
                true
            } else {
                false
            }
        });

        if applied {
            Settled::Applied(outcome)
        } else {
            debug!("Dropping outcome of superseded search #{}", generation);
            Settled::Superseded
        }
    }
}

/// Handle to a started search
pub struct SearchTicket {
    generation: u64,
    handle: JoinHandle<Settled>,
    controller: SearchController,
}

impl std::fmt::Debug for SearchTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchTicket")
            .field("generation", &self.generation)
            .field("finished", &self.handle.is_finished())
            .finish()
    }
}

impl SearchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Wait for the lookup to settle
    pub async fn wait(self) -> Settled {
        match self.handle.await {
            Ok(settled) => settled,
            Err(e) => {
                error!("Search #{} task aborted: {}", self.generation, e);
                self.controller.settle(
                    self.generation,
                    SearchState::Failed(FailureReason::Transport(
                        "lookup task aborted".to_string(),
                    )),
                )
            }
        }
    }
}
