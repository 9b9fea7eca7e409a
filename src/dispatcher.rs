//! Turns administrator intents into validated lease commands.
//!
//! Preconditions are checked against the last fetched status before any
//! request is made. Every accepted command invalidates the lease cache so
//! the next read reflects what the lease service confirmed.

use std::sync::Arc;

use tracing::info;

use crate::cache::{LeaseCache, LeaseSnapshot};
use crate::error::LeaseError;
use crate::lifecycle::{Intent, is_dispatchable};
use crate::model::{
    ApartmentId, Lease, LeaseId, LeaseTerms, NewLease, RentAmount, TenantId, add_one_year,
};
use crate::remote::{CommandReceipt, LeaseService};

mod clock;
mod modal;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::modal::{CommandDraft, CommandModal};

pub struct LeaseDispatcher<S: ?Sized> {
    service: Arc<S>,
    cache: Arc<LeaseCache>,
    clock: Arc<dyn Clock>,
    modal: CommandModal,
}

impl<S: LeaseService + ?Sized> LeaseDispatcher<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            cache: Arc::new(LeaseCache::new()),
            clock: Arc::new(SystemClock),
            modal: CommandModal::Closed,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_cache(mut self, cache: Arc<LeaseCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &Arc<LeaseCache> {
        &self.cache
    }

    pub fn modal(&self) -> &CommandModal {
        &self.modal
    }

    pub async fn leases(&self) -> Result<Arc<LeaseSnapshot>, LeaseError> {
        self.cache.read(self.service.as_ref()).await
    }

    /// Opens the command modal for `intent` on `lease` with proposed terms.
    /// Replaces whatever modal was open before.
    pub fn begin(&mut self, intent: Intent, lease: &Lease) -> Result<CommandDraft, LeaseError> {
        let terms = self.propose(intent, lease)?;
        let draft = CommandDraft {
            intent,
            lease: Some(lease.clone()),
            tenant_id: lease.tenant_id,
            apartment_id: lease.apartment_id,
            terms,
        };
        self.modal = CommandModal::Open(draft.clone());
        Ok(draft)
    }

    /// Opens the add-lease modal with a one-year term starting tomorrow.
    pub fn begin_add(
        &mut self,
        tenant_id: TenantId,
        apartment_id: ApartmentId,
        rent: RentAmount,
    ) -> Result<CommandDraft, LeaseError> {
        let (start, end) = self.next_term()?;
        let draft = CommandDraft {
            intent: Intent::Add,
            lease: None,
            tenant_id: Some(tenant_id),
            apartment_id: Some(apartment_id),
            terms: LeaseTerms { start, end, rent },
        };
        self.modal = CommandModal::Open(draft.clone());
        Ok(draft)
    }

    /// Proposed terms of the open command. Intent and target are fixed once
    /// the modal is open.
    pub fn terms_mut(&mut self) -> Option<&mut LeaseTerms> {
        match &mut self.modal {
            CommandModal::Open(d) => Some(&mut d.terms),
            CommandModal::Closed => None,
        }
    }

    pub fn cancel(&mut self) {
        self.modal = CommandModal::Closed;
    }

    /// Issues the open command. On success the modal closes and the cache is
    /// invalidated; on failure the modal stays open for correction.
    pub async fn submit(&mut self) -> Result<CommandReceipt, LeaseError> {
        let draft = match &self.modal {
            CommandModal::Open(d) => d.clone(),
            CommandModal::Closed => {
                return Err(LeaseError::Validation("no lease command in progress".to_string()));
            }
        };

        // Eligibility is checked again against the draft being sent.
        let target = match draft.lease.as_ref() {
            Some(lease) => {
                Self::check(draft.intent, lease)?;
                Some(lease)
            }
            None if draft.intent.targets_lease() => {
                return Err(LeaseError::Validation(format!(
                    "{} requires a target lease",
                    draft.intent
                )));
            }
            None => None,
        };

        if matches!(draft.intent, Intent::Add | Intent::Renew | Intent::Amend) {
            draft.terms.validate().map_err(LeaseError::Validation)?;
        }

        let receipt = match target {
            None => {
                let (Some(tenant_id), Some(apartment_id)) = (draft.tenant_id, draft.apartment_id)
                else {
                    return Err(LeaseError::Validation(
                        "tenant and apartment are required to add a lease".to_string(),
                    ));
                };
                self.service
                    .create_lease(&NewLease {
                        tenant_id,
                        apartment_id,
                        terms: draft.terms,
                    })
                    .await?
            }
            Some(lease) => match draft.intent {
                Intent::Send => self.service.send_lease(lease.id).await?,
                Intent::Renew => self.service.renew_lease(lease, &draft.terms).await?,
                Intent::Amend => self.service.amend_lease(lease, &draft.terms).await?,
                Intent::Terminate => self.service.terminate_lease(lease.id).await?,
                Intent::Add => {
                    return Err(LeaseError::Validation(
                        "add does not target an existing lease".to_string(),
                    ));
                }
            },
        };

        self.cache.invalidate().await;
        self.modal = CommandModal::Closed;
        info!(intent = %draft.intent, lease_id = ?draft.lease.as_ref().map(|l| l.id.get()), "lease command accepted");
        Ok(receipt)
    }

    pub async fn send(&mut self, lease: &Lease) -> Result<CommandReceipt, LeaseError> {
        self.begin(Intent::Send, lease)?;
        self.submit().await
    }

    pub async fn renew(&mut self, lease: &Lease) -> Result<CommandReceipt, LeaseError> {
        self.begin(Intent::Renew, lease)?;
        self.submit().await
    }

    /// Amends with `terms`, or re-submits the current terms when `None`.
    pub async fn amend(
        &mut self,
        lease: &Lease,
        terms: Option<LeaseTerms>,
    ) -> Result<CommandReceipt, LeaseError> {
        self.begin(Intent::Amend, lease)?;
        if let (Some(terms), Some(current)) = (terms, self.terms_mut()) {
            *current = terms;
        }
        self.submit().await
    }

    /// Terminates by id, checking the status from the cached (or freshly
    /// read) lease collection.
    pub async fn terminate(&mut self, lease_id: LeaseId) -> Result<CommandReceipt, LeaseError> {
        let snapshot = self.leases().await?;
        let lease = snapshot.get(lease_id).cloned().ok_or_else(|| {
            LeaseError::Precondition(format!(
                "lease {} is not in the current lease set",
                lease_id
            ))
        })?;
        self.begin(Intent::Terminate, &lease)?;
        self.submit().await
    }

    fn check(intent: Intent, lease: &Lease) -> Result<(), LeaseError> {
        if !intent.targets_lease() {
            return Err(LeaseError::Validation(
                "add does not target an existing lease".to_string(),
            ));
        }
        if matches!(intent, Intent::Renew | Intent::Amend) && lease.apartment_id.is_none() {
            return Err(LeaseError::Validation("missing apartment id".to_string()));
        }
        if !is_dispatchable(lease.status, intent) {
            return Err(LeaseError::not_eligible(intent, lease.id, lease.status));
        }
        Ok(())
    }

    fn propose(&self, intent: Intent, lease: &Lease) -> Result<LeaseTerms, LeaseError> {
        Self::check(intent, lease)?;

        if intent == Intent::Renew {
            let (start, end) = self.next_term()?;
            return Ok(LeaseTerms {
                start,
                end,
                rent: lease.rent,
            });
        }
        Ok(lease.terms())
    }

    /// `[today + 1 day, today + 1 year)`.
    fn next_term(&self) -> Result<(time::Date, time::Date), LeaseError> {
        let today = self.clock.today();
        let start = today
            .next_day()
            .ok_or_else(|| LeaseError::Validation("date out of range".to_string()))?;
        Ok((start, add_one_year(today)))
    }
}

#[cfg(test)]
#[path = "tests/dispatcher_tests.rs"]
mod tests;
