use crate::lifecycle::Intent;
use crate::model::{ApartmentId, Lease, LeaseTerms, TenantId};

/// A command the administrator is about to issue. Not persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandDraft {
    pub intent: Intent,
    /// Absent only for `add`.
    pub lease: Option<Lease>,
    pub tenant_id: Option<TenantId>,
    pub apartment_id: Option<ApartmentId>,
    pub terms: LeaseTerms,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CommandModal {
    #[default]
    Closed,
    Open(CommandDraft),
}

impl CommandModal {
    pub fn is_open(&self) -> bool {
        matches!(self, CommandModal::Open(_))
    }

    pub fn draft(&self) -> Option<&CommandDraft> {
        match self {
            CommandModal::Open(d) => Some(d),
            CommandModal::Closed => None,
        }
    }

    pub fn intent(&self) -> Option<Intent> {
        self.draft().map(|d| d.intent)
    }
}
