use chrono::{DateTime, Utc};

/// Source of wall-clock time for timestamps the store assigns.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}
