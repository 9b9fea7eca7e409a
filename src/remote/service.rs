use async_trait::async_trait;

use super::*;

/// Remote lease operations the command dispatcher depends on.
#[async_trait]
pub trait LeaseService: Send + Sync {
    async fn fetch_leases(&self) -> Result<LeaseSnapshot, LeaseError>;

    async fn send_lease(&self, lease_id: LeaseId) -> Result<CommandReceipt, LeaseError>;

    async fn renew_lease(
        &self,
        lease: &Lease,
        terms: &LeaseTerms,
    ) -> Result<CommandReceipt, LeaseError>;

    async fn amend_lease(
        &self,
        lease: &Lease,
        terms: &LeaseTerms,
    ) -> Result<CommandReceipt, LeaseError>;

    async fn create_lease(&self, draft: &NewLease) -> Result<CommandReceipt, LeaseError>;

    async fn terminate_lease(&self, lease_id: LeaseId) -> Result<CommandReceipt, LeaseError>;
}

#[async_trait]
impl LeaseService for RemoteClient {
    async fn fetch_leases(&self) -> Result<LeaseSnapshot, LeaseError> {
        RemoteClient::fetch_leases(self).await
    }

    async fn send_lease(&self, lease_id: LeaseId) -> Result<CommandReceipt, LeaseError> {
        RemoteClient::send_lease(self, lease_id).await
    }

    async fn renew_lease(
        &self,
        lease: &Lease,
        terms: &LeaseTerms,
    ) -> Result<CommandReceipt, LeaseError> {
        RemoteClient::renew_lease(self, lease, terms).await
    }

    async fn amend_lease(
        &self,
        lease: &Lease,
        terms: &LeaseTerms,
    ) -> Result<CommandReceipt, LeaseError> {
        RemoteClient::amend_lease(self, lease, terms).await
    }

    async fn create_lease(&self, draft: &NewLease) -> Result<CommandReceipt, LeaseError> {
        RemoteClient::create_lease(self, draft).await
    }

    async fn terminate_lease(&self, lease_id: LeaseId) -> Result<CommandReceipt, LeaseError> {
        RemoteClient::terminate_lease(self, lease_id).await
    }
}
