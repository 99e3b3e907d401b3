use askama::Template;

use crate::models::audit::AuditView;

#[derive(Template)]
#[template(path = "audit/dashboard.html")]
pub struct AuditDashboardTemplate {
    pub title: String,
    pub source_url: String,
    pub fetched_at: String,
    /// True when the session holds a non-default selection.
    pub filter_active: bool,
    pub view: AuditView,
}
