//! Read-through cache of the lease collection.
//!
//! The cache is never patched after a command. Commands invalidate it, and
//! the next read goes back to the lease service. A fetch that was already in
//! flight when an invalidation happened is discarded instead of stored.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::LeaseError;
use crate::filters::StatusFilter;
use crate::model::{Lease, LeaseId, LeaseStatus};
use crate::remote::LeaseService;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaseSnapshot {
    pub leases: Vec<Lease>,
    pub filters: Vec<StatusFilter>,
}

impl LeaseSnapshot {
    pub fn new(leases: Vec<Lease>, filters: Vec<StatusFilter>) -> Self {
        Self { leases, filters }
    }

    pub fn get(&self, id: LeaseId) -> Option<&Lease> {
        self.leases.iter().find(|l| l.id == id)
    }

    pub fn with_status(&self, status: LeaseStatus) -> impl Iterator<Item = &Lease> {
        self.leases.iter().filter(move |l| l.status == status)
    }
}

#[derive(Default)]
struct CacheState {
    generation: u64,
    snapshot: Option<Arc<LeaseSnapshot>>,
}

#[derive(Default)]
pub struct LeaseCache {
    state: Mutex<CacheState>,
}

impl LeaseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last accepted snapshot, without fetching.
    pub async fn peek(&self) -> Option<Arc<LeaseSnapshot>> {
        self.state.lock().await.snapshot.clone()
    }

    pub async fn generation(&self) -> u64 {
        self.state.lock().await.generation
    }

    pub async fn invalidate(&self) {
        let mut st = self.state.lock().await;
        st.generation += 1;
        st.snapshot = None;
        info!(generation = st.generation, "lease cache invalidated");
    }

    /// Cached snapshot, or a fresh one from `service`. Re-fetches while
    /// invalidations keep landing during the fetch.
    pub async fn read<S>(&self, service: &S) -> Result<Arc<LeaseSnapshot>, LeaseError>
    where
        S: LeaseService + ?Sized,
    {
        loop {
            let started = {
                let st = self.state.lock().await;
                if let Some(snapshot) = &st.snapshot {
                    return Ok(Arc::clone(snapshot));
                }
                st.generation
            };

            let fetched = Arc::new(service.fetch_leases().await?);

            let mut st = self.state.lock().await;
            if st.generation == started {
                st.snapshot = Some(Arc::clone(&fetched));
                return Ok(fetched);
            }
            debug!(
                started,
                current = st.generation,
                "discarding lease fetch that predates an invalidation"
            );
        }
    }
}

#[cfg(test)]
#[path = "tests/cache_tests.rs"]
mod tests;
