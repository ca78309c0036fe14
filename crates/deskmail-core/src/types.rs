//! Shared datetime aliases

use chrono::{DateTime as ChronoDateTime, Utc};

/// Database DateTime type used across all Deskmail crates
///
/// This is the canonical datetime type for `TIMESTAMPTZ` columns and for
/// timestamps carried in delivery results.
pub type DBDateTime = ChronoDateTime<Utc>;

/// Current time truncated to whole microseconds.
///
/// Postgres stores microsecond precision, so values written and read back
/// compare equal only after truncation.
pub fn db_now() -> DBDateTime {
    use chrono::SubsecRound;
    Utc::now().trunc_subsecs(6)
}
