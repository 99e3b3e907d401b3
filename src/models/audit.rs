pub mod filter;
pub mod parse;
pub mod types;
pub mod view;

pub use filter::{FilterOptions, FilterSelection, ResolvedFilter};
pub use parse::parse_batch;
pub use types::{AuditLogRecord, AuditRow, COLUMNS, Column, ParsedBatch, RecordIssue};
pub use view::{AuditView, Banner, BannerKind, DetailPanel, build_view};
