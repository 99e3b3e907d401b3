use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::types::{AuditLogRecord, AuditRow};

/// Query key for the user-type multi-select.
pub const USER_TYPE_PARAM: &str = "user_type";
/// Query key for the action multi-select.
pub const ACTION_PARAM: &str = "action";
/// Marker sent by the filter form so that an empty multi-select is
/// distinguishable from "no filter submitted".
pub const FILTERED_PARAM: &str = "filtered";
pub const RESET_PARAM: &str = "reset";

/// Distinct values present in a fetched dataset, sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub user_types: BTreeSet<String>,
    pub actions: BTreeSet<String>,
}

impl FilterOptions {
    pub fn from_rows(rows: &[AuditRow]) -> Self {
        let mut opts = Self::default();
        for row in rows {
            opts.user_types.insert(row.user_type.clone());
            opts.actions.insert(row.action.clone());
        }
        opts
    }

    pub fn from_records(records: &[AuditLogRecord]) -> Self {
        let mut opts = Self::default();
        for record in records {
            opts.user_types.insert(record.user_type.clone());
            opts.actions.insert(record.action.clone());
        }
        opts
    }
}

/// The user's filter choice, held for the browser session.
/// `None` in a dimension means every value present is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub user_types: Option<BTreeSet<String>>,
    pub actions: Option<BTreeSet<String>>,
}

impl FilterSelection {
    pub fn is_default(&self) -> bool {
        self.user_types.is_none() && self.actions.is_none()
    }

    /// Build an explicit selection from submitted query pairs.
    /// Returns `None` unless the filter form marker is present.
    pub fn from_params(params: &[(String, String)]) -> Option<Self> {
        if !params.iter().any(|(k, _)| k == FILTERED_PARAM) {
            return None;
        }
        let collect = |key: &str| -> BTreeSet<String> {
            params
                .iter()
                .filter(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .collect()
        };
        Some(Self {
            user_types: Some(collect(USER_TYPE_PARAM)),
            actions: Some(collect(ACTION_PARAM)),
        })
    }

    /// Drop selected values that are not present in `options`.
    /// `None` dimensions stay `None`.
    pub fn restrict_to(&self, options: &FilterOptions) -> Self {
        let keep = |chosen: &Option<BTreeSet<String>>, present: &BTreeSet<String>| -> Option<BTreeSet<String>> {
            chosen
                .as_ref()
                .map(|set| set.intersection(present).cloned().collect())
        };
        Self {
            user_types: keep(&self.user_types, &options.user_types),
            actions: keep(&self.actions, &options.actions),
        }
    }

    /// Resolve against the values actually present. Stale values are dropped.
    pub fn resolve(&self, options: &FilterOptions) -> ResolvedFilter {
        let pick = |chosen: &Option<BTreeSet<String>>, present: &BTreeSet<String>| match chosen {
            None => present.clone(),
            Some(set) => set.intersection(present).cloned().collect(),
        };
        ResolvedFilter {
            user_types: pick(&self.user_types, &options.user_types),
            actions: pick(&self.actions, &options.actions),
        }
    }
}

/// Concrete selected sets for one render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFilter {
    pub user_types: BTreeSet<String>,
    pub actions: BTreeSet<String>,
}

impl ResolvedFilter {
    pub fn matches(&self, row: &AuditRow) -> bool {
        self.user_types.contains(&row.user_type) && self.actions.contains(&row.action)
    }

    pub fn apply(&self, rows: &[AuditRow]) -> Vec<AuditRow> {
        rows.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}
