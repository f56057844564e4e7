pub mod comment_service;
pub mod order_service;
pub mod product_service;
pub mod user_service;

use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

/// Current time at the microsecond precision Postgres stores.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Path ids that are not UUIDs cannot match any stored document.
pub(crate) fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
