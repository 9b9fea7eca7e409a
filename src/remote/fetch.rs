//! Authenticated read paths: the lease collection and signed-document links.

use super::*;
use crate::filters::status_filters_or_default;

impl RemoteClient {
    /// Authoritative lease collection plus the status filters derived from it.
    pub async fn fetch_leases(&self) -> Result<LeaseSnapshot, LeaseError> {
        let url = self.url("/admin/leases/")?;
        let url = url.as_str();
        let records = self
            .with_auth_retries("list leases", move |token| {
                self.get_lease_records(url, token)
            })
            .await?;

        let filters = status_filters_or_default(records.iter().map(|r| r.status.as_str()));
        let leases = records
            .into_iter()
            .map(Lease::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(LeaseError::Fetch)?;
        debug!(count = leases.len(), "fetched leases");
        Ok(LeaseSnapshot::new(leases, filters))
    }

    async fn get_lease_records(
        &self,
        url: &str,
        token: String,
    ) -> Result<Vec<LeaseRecord>, LeaseError> {
        let resp = self
            .client
            .get(url)
            .header(reqwest::header::AUTHORIZATION, Self::bearer(&token))
            .send()
            .await
            .map_err(|e| LeaseError::Fetch(format!("list leases: {}", e)))?;
        let resp = ensure_ok(resp, "list leases").await?;
        // An empty collection is encoded as `null`.
        let records: Option<Vec<LeaseRecord>> = resp
            .json()
            .await
            .map_err(|e| LeaseError::Fetch(format!("parse leases: {}", e)))?;
        Ok(records.unwrap_or_default())
    }

    /// Signed-document URL for one lease, from the signing provider.
    pub async fn document_url(&self, lease_id: LeaseId) -> Result<String, LeaseError> {
        let url = self.url(&format!("/admin/leases/{}/url", lease_id))?;
        let url = url.as_str();
        self.with_auth_retries("document url", move |token| {
            async move {
                let resp = self
                    .client
                    .get(url)
                    .header(reqwest::header::AUTHORIZATION, Self::bearer(&token))
                    .send()
                    .await
                    .map_err(|e| LeaseError::Fetch(format!("document url: {}", e)))?;
                let out: DocumentUrlResponse = ensure_ok(resp, "document url")
                    .await?
                    .json()
                    .await
                    .map_err(|e| LeaseError::Fetch(format!("parse document url: {}", e)))?;
                Ok(out.url)
            }
        })
        .await
    }
}
