//! Validated domain types.

mod api_url;
mod export_target;
mod locator;
mod profile;

pub use api_url::{ApiUrl, DEFAULT_API_URL};
pub use export_target::ExportTarget;
pub use locator::ReportLocator;
pub use profile::ProfileReference;
