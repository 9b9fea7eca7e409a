//! Status filter entries for the lease table, derived from the statuses that
//! actually occur in a fetched collection.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::model::LeaseStatus;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusFilter {
    pub text: String,
    pub value: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("no lease statuses to derive filters from")]
    NoStatuses,

    #[error("blank lease status")]
    BlankStatus,
}

/// Filter entry for a raw wire status. Known statuses use their own label;
/// only unrecognised values are title-cased.
pub fn status_entry(raw: &str) -> Result<StatusFilter, FilterError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FilterError::BlankStatus);
    }
    Ok(match trimmed.parse::<LeaseStatus>() {
        Ok(status) => StatusFilter {
            text: status.label().to_string(),
            value: status.as_str().to_string(),
        },
        Err(_) => StatusFilter {
            text: title_case(trimmed),
            value: trimmed.to_ascii_lowercase(),
        },
    })
}

fn title_case(raw: &str) -> String {
    raw.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One entry per distinct status, ordered by label.
pub fn derive_status_filters<'a>(
    statuses: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<StatusFilter>, FilterError> {
    let mut by_value: BTreeMap<String, String> = BTreeMap::new();
    for raw in statuses {
        let entry = status_entry(raw)?;
        by_value.insert(entry.value, entry.text);
    }
    if by_value.is_empty() {
        return Err(FilterError::NoStatuses);
    }

    let mut out = by_value
        .into_iter()
        .map(|(value, text)| StatusFilter { text, value })
        .collect::<Vec<_>>();
    out.sort_by(|a, b| a.text.cmp(&b.text).then_with(|| a.value.cmp(&b.value)));
    Ok(out)
}

/// Every known status, ordered by label.
pub fn default_status_filters() -> Vec<StatusFilter> {
    let mut out = LeaseStatus::ALL
        .iter()
        .map(|s| StatusFilter {
            text: s.label().to_string(),
            value: s.as_str().to_string(),
        })
        .collect::<Vec<_>>();
    out.sort_by(|a, b| a.text.cmp(&b.text));
    out
}

pub fn status_filters_or_default<'a>(
    statuses: impl IntoIterator<Item = &'a str>,
) -> Vec<StatusFilter> {
    match derive_status_filters(statuses) {
        Ok(filters) => filters,
        Err(err) => {
            warn!("status filter derivation failed, using defaults: {}", err);
            default_status_filters()
        }
    }
}

#[cfg(test)]
#[path = "tests/filters_tests.rs"]
mod tests;
