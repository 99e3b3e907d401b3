use serde::Deserialize;

/// One audit entry as served by the upstream API (camelCase keys).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogRecord {
    pub time: String,
    pub user_type: String,
    pub user_id: String,
    pub record_id: String,
    pub action: String,
}

/// Normalized tabular row. Field names are the column keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRow {
    pub time: String,
    pub user_type: String,
    pub user_id: String,
    pub record_id: String,
    pub action: String,
}

impl From<AuditLogRecord> for AuditRow {
    fn from(r: AuditLogRecord) -> Self {
        AuditRow {
            time: r.time,
            user_type: r.user_type,
            user_id: r.user_id,
            record_id: r.record_id,
            action: r.action,
        }
    }
}

impl AuditRow {
    /// Cell values in `COLUMNS` order.
    pub fn cells(&self) -> [&str; 5] {
        [
            &self.time,
            &self.user_type,
            &self.user_id,
            &self.record_id,
            &self.action,
        ]
    }
}

/// A column of the audit table: upstream key, normalized key, header label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub source: &'static str,
    pub key: &'static str,
    pub label: &'static str,
}

/// The complete rename mapping from upstream keys to table columns.
pub const COLUMNS: [Column; 5] = [
    Column { source: "time",     key: "time",      label: "Time" },
    Column { source: "userType", key: "user_type", label: "User Type" },
    Column { source: "userId",   key: "user_id",   label: "User ID" },
    Column { source: "recordId", key: "record_id", label: "Record ID" },
    Column { source: "action",   key: "action",    label: "Action" },
];

/// Why a single upstream element could not become a record.
/// All problems of one element are reported together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordIssue {
    /// 1-based position in the upstream array.
    pub position: usize,
    pub missing: Vec<&'static str>,
    pub not_strings: Vec<&'static str>,
    pub not_an_object: bool,
}

impl RecordIssue {
    pub fn reason(&self) -> String {
        if self.not_an_object {
            return "not a JSON object".to_string();
        }
        let mut parts = Vec::new();
        if !self.missing.is_empty() {
            parts.push(format!("missing {}", self.missing.join(", ")));
        }
        if !self.not_strings.is_empty() {
            parts.push(format!("non-string {}", self.not_strings.join(", ")));
        }
        parts.join("; ")
    }
}

impl std::fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Record {}: {}", self.position, self.reason())
    }
}

/// Result of parsing one upstream response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedBatch {
    pub records: Vec<AuditLogRecord>,
    pub rejected: Vec<RecordIssue>,
}

impl ParsedBatch {
    /// True when the upstream array itself had no elements.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.rejected.is_empty()
    }
}
