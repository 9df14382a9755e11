// crates/cityfinder-core/src/repository.rs

//! # City Repository
//!
//! Owns the initialization gate: the catalog is loaded and indexed lazily,
//! on first use, exactly once per success.
//!
//! The gate is a small state machine behind a `Mutex`:
//!
//! ```text
//! Uninitialized --first caller--> Initializing --ok--> Ready(catalog)
//!       ^                              |
//!       |                              +--err--> Failed(error) --next caller--> Initializing
//!       +------ loader unwound --------+
//! ```
//!
//! Callers arriving while a load is in flight wait on a `Condvar` and receive
//! that flight's outcome, success or failure, instead of loading again. A
//! caller arriving after a failure starts a fresh flight, which is how retry
//! works. The catalog is published only once it is complete, and readers
//! then search it through an `Arc` without holding the lock.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use once_cell::sync::{Lazy, OnceCell};
use tracing::{debug, info, warn};

use crate::common::CatalogStats;
use crate::config::RepositoryConfig;
use crate::error::{CityError, Result};
use crate::loader::{CitySource, FileSource};
use crate::store::{Catalog, CityList};
use crate::text::Folding;

/// Observable phase of the initialization gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitPhase {
    Uninitialized,
    Initializing,
    Ready,
    Failed,
}

enum InitState {
    Uninitialized,
    Initializing(Arc<Flight>),
    Ready(Arc<Catalog>),
    Failed(CityError),
}

impl InitState {
    fn phase(&self) -> InitPhase {
        match self {
            InitState::Uninitialized => InitPhase::Uninitialized,
            InitState::Initializing(_) => InitPhase::Initializing,
            InitState::Ready(_) => InitPhase::Ready,
            InitState::Failed(_) => InitPhase::Failed,
        }
    }
}

/// One ingestion attempt. Waiters keep a handle to the flight they joined,
/// so they see its failure even after later flights have started.
struct Flight {
    id: u64,
    failure: OnceCell<CityError>,
}

struct Gate {
    state: InitState,
    // id of the most recently started flight
    flights: u64,
}

/// Lazily initialized, thread-safe access to the city catalog.
///
/// # Example
///
/// ```
/// use cityfinder_core::{City, CityRepository, Result};
///
/// let repo = CityRepository::new(|| -> Result<Vec<City>> {
///     Ok(vec![
///         City::new("London", "GB", 51.5074, -0.1278),
///         City::new("Paris", "FR", 48.8566, 2.3522),
///     ])
/// });
///
/// let hits = repo.search_cities_by_prefix("lon").unwrap();
/// assert_eq!(hits.len(), 1);
/// assert_eq!(repo.get_all_cities().unwrap().len(), 2);
/// ```
pub struct CityRepository<S: CitySource> {
    source: S,
    folding: Folding,
    gate: Mutex<Gate>,
    settled: Condvar,
    loads: AtomicUsize,
}

impl<S: CitySource> CityRepository<S> {
    pub fn new(source: S) -> Self {
        Self::with_folding(source, Folding::default())
    }

    pub fn with_folding(source: S, folding: Folding) -> Self {
        Self {
            source,
            folding,
            gate: Mutex::new(Gate {
                state: InitState::Uninitialized,
                flights: 0,
            }),
            settled: Condvar::new(),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn folding(&self) -> Folding {
        self.folding
    }

    /// Current phase of the gate.
    pub fn phase(&self) -> InitPhase {
        self.lock_gate().state.phase()
    }

    pub fn is_initialized(&self) -> bool {
        self.phase() == InitPhase::Ready
    }

    /// How many times the source has been asked to load.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Load and index the dataset unless that already happened.
    ///
    /// A no-op once ready. After a failure the next call tries again.
    pub fn ensure_initialized(&self) -> Result<()> {
        self.catalog().map(|_| ())
    }

    /// The whole Record Store, in ingestion order.
    pub fn get_all_cities(&self) -> Result<CityList> {
        Ok(CityList::all(self.catalog()?))
    }

    /// Cities whose name starts with `prefix`, ignoring case.
    ///
    /// A blank prefix returns the same list as [`get_all_cities`](Self::get_all_cities).
    pub fn search_cities_by_prefix(&self, prefix: &str) -> Result<CityList> {
        Ok(CityList::search(self.catalog()?, prefix))
    }

    pub fn stats(&self) -> Result<CatalogStats> {
        Ok(self.catalog()?.stats())
    }

    /// The published catalog, initializing it first if needed.
    pub fn catalog(&self) -> Result<Arc<Catalog>> {
        let mut gate = self.lock_gate();
        let mut joined: Option<Arc<Flight>> = None;
        loop {
            if let Some(err) = joined.as_ref().and_then(|f| f.failure.get()) {
                return Err(err.clone());
            }
            let in_flight = match &gate.state {
                InitState::Ready(catalog) => return Ok(Arc::clone(catalog)),
                InitState::Initializing(flight) => Arc::clone(flight),
                InitState::Uninitialized | InitState::Failed(_) => break,
            };
            if joined.is_none() {
                debug!(flight = in_flight.id, "waiting for in-flight initialization");
            }
            joined = Some(in_flight);
            gate = self
                .settled
                .wait(gate)
                .unwrap_or_else(PoisonError::into_inner);
        }

        gate.flights += 1;
        let flight = Arc::new(Flight {
            id: gate.flights,
            failure: OnceCell::new(),
        });
        gate.state = InitState::Initializing(Arc::clone(&flight));
        drop(gate);

        let mut guard = FlightGuard {
            repo: self,
            flight,
            done: false,
        };
        let outcome = self.load_catalog(guard.flight.id);
        guard.settle(&outcome);
        outcome
    }

    fn load_catalog(&self, flight: u64) -> Result<Arc<Catalog>> {
        let started = Instant::now();
        let attempt = self.loads.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            source = %self.source.describe(),
            flight,
            attempt,
            "initializing city catalog"
        );

        let built = self
            .source
            .load_records()
            .and_then(|records| Catalog::build(records, self.folding));

        match built {
            Ok(catalog) => {
                info!(
                    cities = catalog.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "city catalog ready"
                );
                Ok(Arc::new(catalog))
            }
            Err(err) => {
                warn!(kind = ?err.kind(), error = %err, "city catalog initialization failed");
                Err(err)
            }
        }
    }

    fn lock_gate(&self) -> MutexGuard<'_, Gate> {
        // every transition is a single assignment, so a poisoned gate is still consistent
        self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Settles the in-flight state. If the loader unwinds before `settle`, drop
/// puts the gate back to `Uninitialized` and wakes the waiters so one of them
/// can take over.
struct FlightGuard<'a, S: CitySource> {
    repo: &'a CityRepository<S>,
    flight: Arc<Flight>,
    done: bool,
}

impl<S: CitySource> FlightGuard<'_, S> {
    fn settle(&mut self, outcome: &Result<Arc<Catalog>>) {
        let next = match outcome {
            Ok(catalog) => InitState::Ready(Arc::clone(catalog)),
            Err(err) => {
                // recorded before the state changes, so a waiter that wakes sees it
                let _ = self.flight.failure.set(err.clone());
                InitState::Failed(err.clone())
            }
        };
        self.repo.lock_gate().state = next;
        self.done = true;
        self.repo.settled.notify_all();
    }
}

impl<S: CitySource> Drop for FlightGuard<'_, S> {
    fn drop(&mut self) {
        if !self.done {
            warn!("city catalog initialization abandoned");
            self.repo.lock_gate().state = InitState::Uninitialized;
            self.repo.settled.notify_all();
        }
    }
}

impl CityRepository<FileSource> {
    /// Repository over the dataset and folding named by `config`.
    pub fn from_config(config: &RepositoryConfig) -> Self {
        Self::with_folding(config.file_source(), config.folding)
    }
}

static DEFAULT_REPOSITORY: Lazy<CityRepository<FileSource>> = Lazy::new(|| {
    let config = RepositoryConfig::from_env().unwrap_or_else(|err| {
        warn!(error = %err, "ignoring invalid environment configuration");
        RepositoryConfig::default()
    });
    CityRepository::from_config(&config)
});

/// Process-wide repository over the configured default dataset.
///
/// Configured from the environment on first access (see
/// [`RepositoryConfig::from_env`]); the catalog itself still loads lazily.
pub fn default_repository() -> &'static CityRepository<FileSource> {
    &DEFAULT_REPOSITORY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::City;
    use std::sync::atomic::AtomicBool;
    use std::sync::{mpsc, Barrier};
    use std::thread;
    use std::time::Duration;

    fn sample() -> Vec<City> {
        vec![
            City::new("New York", "US", 40.7128, -74.0060),
            City::new("London", "GB", 51.5074, -0.1278),
            City::new("Paris", "FR", 48.8566, 2.3522),
        ]
    }

    fn names(list: &CityList) -> Vec<&str> {
        list.iter().map(City::name).collect()
    }

    #[test]
    fn starts_uninitialized_and_loads_on_first_query() {
        let repo = CityRepository::new(|| -> Result<Vec<City>> { Ok(sample()) });
        assert_eq!(repo.phase(), InitPhase::Uninitialized);
        assert_eq!(repo.loads(), 0);

        let all = repo.get_all_cities().unwrap();
        assert_eq!(names(&all), vec!["New York", "London", "Paris"]);
        assert_eq!(repo.phase(), InitPhase::Ready);
        assert_eq!(repo.loads(), 1);
    }

    #[test]
    fn second_initialization_is_a_no_op() {
        let repo = CityRepository::new(|| -> Result<Vec<City>> { Ok(sample()) });
        repo.ensure_initialized().unwrap();
        let first = repo.catalog().unwrap();
        repo.ensure_initialized().unwrap();
        let second = repo.catalog().unwrap();

        assert_eq!(repo.loads(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn blank_prefix_returns_the_store() {
        let repo = CityRepository::new(|| -> Result<Vec<City>> { Ok(sample()) });
        let all = repo.get_all_cities().unwrap();
        for blank in ["", "   ", "\t"] {
            let hits = repo.search_cities_by_prefix(blank).unwrap();
            assert!(hits.is_all());
            assert_eq!(hits.to_vec(), all.to_vec());
        }
    }

    #[test]
    fn prefix_search_goes_through_the_trie() {
        let repo = CityRepository::new(|| -> Result<Vec<City>> { Ok(sample()) });
        assert_eq!(names(&repo.search_cities_by_prefix("lo").unwrap()), vec!["London"]);
        assert!(repo.search_cities_by_prefix("z").unwrap().is_empty());
    }

    #[test]
    fn failure_leaves_gate_retryable() {
        let fixed = AtomicBool::new(false);
        let repo = CityRepository::new(|| -> Result<Vec<City>> {
            if fixed.load(Ordering::SeqCst) {
                Ok(sample())
            } else {
                Err(CityError::Loading("cities_sorted.json".into()))
            }
        });

        let err = repo.get_all_cities().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Loading);
        assert_eq!(repo.phase(), InitPhase::Failed);

        fixed.store(true, Ordering::SeqCst);
        assert_eq!(repo.get_all_cities().unwrap().len(), 3);
        assert_eq!(repo.loads(), 2);
    }

    #[test]
    fn concurrent_first_callers_share_one_load() {
        let repo = CityRepository::new(|| -> Result<Vec<City>> {
            thread::sleep(Duration::from_millis(50));
            Ok(sample())
        });
        let barrier = Barrier::new(8);

        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    barrier.wait();
                    assert_eq!(repo.search_cities_by_prefix("PAR").unwrap().len(), 1);
                });
            }
        });
        assert_eq!(repo.loads(), 1);
    }

    #[test]
    fn waiters_receive_the_flight_failure() {
        let repo = CityRepository::new(|| -> Result<Vec<City>> {
            thread::sleep(Duration::from_millis(50));
            Err(CityError::Parsing("bad json".into()))
        });
        let barrier = Barrier::new(6);

        let kinds: Vec<ErrorKind> = thread::scope(|s| {
            let handles: Vec<_> = (0..6)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        repo.get_all_cities().unwrap_err().kind()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(kinds.iter().all(|k| *k == ErrorKind::Parsing));
        // Threads that reach the gate after a settled failure retry, so the
        // count is bounded by the callers, not fixed at one.
        assert!(repo.loads() >= 1 && repo.loads() <= 6);
    }

    fn current_flight<S: CitySource>(repo: &CityRepository<S>) -> Option<Arc<Flight>> {
        match &repo.lock_gate().state {
            InitState::Initializing(flight) => Some(Arc::clone(flight)),
            _ => None,
        }
    }

    #[test]
    fn waiter_keeps_its_flight_failure_after_a_newer_flight_starts() {
        let (release, blocked) = mpsc::channel::<()>();
        let blocked = Mutex::new(blocked);
        let calls = AtomicUsize::new(0);
        let repo = CityRepository::new(|| -> Result<Vec<City>> {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            if n == 0 {
                blocked.lock().unwrap().recv().unwrap();
            }
            Err(CityError::Loading(format!("attempt {n}")))
        });

        thread::scope(|s| {
            let owner = s.spawn(|| repo.ensure_initialized());
            let flight = loop {
                if let Some(flight) = current_flight(&repo) {
                    break flight;
                }
                thread::yield_now();
            };

            let waiter = s.spawn(|| repo.ensure_initialized());
            // gate + owner + this test + the waiter
            while Arc::strong_count(&flight) < 4 {
                thread::yield_now();
            }

            // hold the gate so the flight fails and a newer one is in place
            // before either thread can look at the state again
            let mut gate = repo.lock_gate();
            release.send(()).unwrap();
            while flight.failure.get().is_none() {
                thread::yield_now();
            }
            gate.flights += 1;
            gate.state = InitState::Initializing(Arc::new(Flight {
                id: gate.flights,
                failure: OnceCell::new(),
            }));
            drop(gate);

            let first = owner.join().unwrap().unwrap_err();
            assert_eq!(first, CityError::Loading("attempt 0".into()));
            assert_eq!(waiter.join().unwrap().unwrap_err(), first);
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn panicking_loader_does_not_wedge_the_gate() {
        let calls = AtomicUsize::new(0);
        let repo = CityRepository::new(|| -> Result<Vec<City>> {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                panic!("loader blew up");
            }
            Ok(sample())
        });

        let unwound = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = repo.ensure_initialized();
        }));
        assert!(unwound.is_err());
        assert_eq!(repo.phase(), InitPhase::Uninitialized);

        repo.ensure_initialized().unwrap();
        assert!(repo.is_initialized());
    }

    #[test]
    fn stats_reflect_catalog() {
        let repo = CityRepository::new(|| -> Result<Vec<City>> { Ok(sample()) });
        let stats = repo.stats().unwrap();
        assert_eq!(stats.cities, 3);
        assert_eq!(stats.distinct_names, 3);
    }
}
