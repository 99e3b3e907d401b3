use super::filter::{FilterOptions, FilterSelection};
use super::types::{AuditRow, COLUMNS, ParsedBatch};
use crate::errors::FetchError;

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch audit logs.";
pub const NO_DATA_MESSAGE: &str = "No audit logs found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Warning,
    Error,
}

impl BannerKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            BannerKind::Success => "banner-success",
            BannerKind::Warning => "banner-warning",
            BannerKind::Error => "banner-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    pub detail: Option<String>,
}

/// One entry of a multi-select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
}

/// Expandable per-row block: "Log {number}: {action} by {user_type}".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPanel {
    pub number: usize,
    pub label: String,
    pub fields: Vec<DetailField>,
}

impl DetailPanel {
    fn from_row(number: usize, row: &AuditRow) -> Self {
        let fields = COLUMNS
            .iter()
            .zip(row.cells())
            .map(|(col, value)| DetailField { label: col.label, value: value.to_string() })
            .collect();
        Self {
            number,
            label: format!("Log {number}: {} by {}", row.action, row.user_type),
            fields,
        }
    }
}

/// Everything the dashboard template needs for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditView {
    pub banner: Banner,
    pub record_warnings: Vec<String>,
    /// Valid records fetched, before filtering.
    pub total: usize,
    pub rows: Vec<AuditRow>,
    pub panels: Vec<DetailPanel>,
    pub user_type_options: Vec<FilterOption>,
    pub action_options: Vec<FilterOption>,
    pub show_filters: bool,
}

impl AuditView {
    fn without_data(banner: Banner) -> Self {
        Self {
            banner,
            record_warnings: vec![],
            total: 0,
            rows: vec![],
            panels: vec![],
            user_type_options: vec![],
            action_options: vec![],
            show_filters: false,
        }
    }

    pub fn headers(&self) -> Vec<&'static str> {
        COLUMNS.iter().map(|c| c.label).collect()
    }

    pub fn showing_summary(&self) -> String {
        format!("Showing {} of {} logs", self.rows.len(), self.total)
    }
}

/// Turn one fetch outcome and the session's filter selection into a view.
/// Pure: no I/O, no ambient state.
pub fn build_view(outcome: Result<ParsedBatch, FetchError>, selection: &FilterSelection) -> AuditView {
    let batch = match outcome {
        Ok(batch) => batch,
        Err(e) => {
            return AuditView::without_data(Banner {
                kind: BannerKind::Error,
                message: FETCH_FAILED_MESSAGE.to_string(),
                detail: Some(e.to_string()),
            });
        }
    };

    if batch.is_empty() {
        return AuditView::without_data(Banner {
            kind: BannerKind::Warning,
            message: NO_DATA_MESSAGE.to_string(),
            detail: None,
        });
    }

    let record_warnings = batch.rejected.iter().map(ToString::to_string).collect();
    let all_rows: Vec<AuditRow> = batch.records.into_iter().map(AuditRow::from).collect();
    let options = FilterOptions::from_rows(&all_rows);
    let resolved = selection.resolve(&options);
    let rows = resolved.apply(&all_rows);

    let panels = rows
        .iter()
        .enumerate()
        .map(|(i, row)| DetailPanel::from_row(i + 1, row))
        .collect();

    let to_options = |present: &std::collections::BTreeSet<String>,
                      chosen: &std::collections::BTreeSet<String>| {
        present
            .iter()
            .map(|v| FilterOption { value: v.clone(), selected: chosen.contains(v) })
            .collect::<Vec<_>>()
    };

    AuditView {
        banner: Banner {
            kind: BannerKind::Success,
            message: format!("Found {} audit logs", all_rows.len()),
            detail: None,
        },
        record_warnings,
        total: all_rows.len(),
        user_type_options: to_options(&options.user_types, &resolved.user_types),
        action_options: to_options(&options.actions, &resolved.actions),
        show_filters: !all_rows.is_empty(),
        rows,
        panels,
    }
}
