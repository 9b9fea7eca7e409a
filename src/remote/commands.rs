//! Lease state-change commands. Each issues at most one request; a missing
//! credential is waited out with the read-path backoff first.

use super::*;

impl RemoteClient {
    async fn post_command<B: serde::Serialize + ?Sized>(
        &self,
        command: &'static str,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, LeaseError> {
        let url = self.url(path)?;
        let token = self.acquire_token(command).await?;
        let mut req = self
            .client
            .post(url)
            .header(reqwest::header::AUTHORIZATION, Self::bearer(&token));
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await.map_err(|e| LeaseError::Command {
            command,
            status: 0,
            message: e.to_string(),
        })?;
        ensure_command_ok(resp, command).await
    }

    /// An accepted command may answer with an empty or non-JSON body; that
    /// still counts as success with an empty receipt.
    async fn receipt(command: &'static str, resp: reqwest::Response) -> CommandReceipt {
        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(command, "read command response: {}", e);
                return CommandReceipt::default();
            }
        };
        if body.trim().is_empty() {
            return CommandReceipt::default();
        }
        serde_json::from_str(&body).unwrap_or_else(|e| {
            warn!(command, "unparsed command response: {}", e);
            CommandReceipt::default()
        })
    }

    pub async fn send_lease(&self, lease_id: LeaseId) -> Result<CommandReceipt, LeaseError> {
        let resp = self
            .post_command::<()>("send", &format!("/admin/leases/send/{}", lease_id), None)
            .await?;
        let receipt = Self::receipt("send", resp).await;
        info!(lease_id = lease_id.get(), "lease sent for signing");
        Ok(receipt)
    }

    pub async fn renew_lease(
        &self,
        lease: &Lease,
        terms: &LeaseTerms,
    ) -> Result<CommandReceipt, LeaseError> {
        let apartment_id = lease
            .apartment_id
            .ok_or_else(|| LeaseError::Validation("missing apartment id".to_string()))?;
        let mut body = LeaseUpsertRequest::new(lease.tenant_id, apartment_id, terms, self.admin_id);
        body.previous_lease_id = Some(lease.id.get());
        let resp = self
            .post_command("renew", "/admin/leases/renew", Some(&body))
            .await?;
        let receipt = Self::receipt("renew", resp).await;
        info!(lease_id = lease.id.get(), "lease renewal submitted");
        Ok(receipt)
    }

    pub async fn amend_lease(
        &self,
        lease: &Lease,
        terms: &LeaseTerms,
    ) -> Result<CommandReceipt, LeaseError> {
        let apartment_id = lease
            .apartment_id
            .ok_or_else(|| LeaseError::Validation("missing apartment id".to_string()))?;
        let mut body = LeaseUpsertRequest::new(lease.tenant_id, apartment_id, terms, self.admin_id);
        body.lease_id = Some(lease.id.get());
        let resp = self
            .post_command("amend", "/admin/leases/amend", Some(&body))
            .await?;
        let receipt = Self::receipt("amend", resp).await;
        info!(lease_id = lease.id.get(), "lease amendment submitted");
        Ok(receipt)
    }

    pub async fn create_lease(&self, draft: &NewLease) -> Result<CommandReceipt, LeaseError> {
        let body = LeaseUpsertRequest::new(
            Some(draft.tenant_id),
            draft.apartment_id,
            &draft.terms,
            self.admin_id,
        );
        let resp = self
            .post_command("create", "/admin/leases/create", Some(&body))
            .await?;
        let receipt = Self::receipt("create", resp).await;
        info!(lease_id = ?receipt.lease_id, "draft lease created");
        Ok(receipt)
    }

    pub async fn terminate_lease(&self, lease_id: LeaseId) -> Result<CommandReceipt, LeaseError> {
        let body = TerminateRequest {
            id: lease_id.get(),
            updated_by: self.admin_id,
        };
        let resp = self
            .post_command(
                "terminate",
                &format!("/admin/leases/terminate/{}", lease_id),
                Some(&body),
            )
            .await?;
        let receipt = Self::receipt("terminate", resp).await;
        info!(lease_id = lease_id.get(), "lease terminated");
        Ok(receipt)
    }

    /// Asks the lease service to notify administrators about leases ending soon.
    pub async fn notify_expiring(&self) -> Result<ExpiringLeasesReport, LeaseError> {
        let resp = self
            .post_command::<()>("notify-expiring", "/admin/leases/notify-expiring", None)
            .await?;
        resp.json().await.map_err(|e| LeaseError::Command {
            command: "notify-expiring",
            status: 200,
            message: format!("parse report: {}", e),
        })
    }
}
