//! Rate limit stores that keep their records on the local machine.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

pub use file::FileRateLimitStore;
pub use memory::MemoryRateLimitStore;

mod file;
mod memory;

/// Whether a record written at `last` still blocks an action at `now`.
fn within_window(last: DateTime<Utc>, window: Duration, now: DateTime<Utc>) -> bool {
    TimeDelta::from_std(window).map_or(true, |window| now - last < window)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window() {
        let last = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let window = Duration::from_secs(60);

        assert!(within_window(last, window, last));
        assert!(within_window(last, window, last + TimeDelta::seconds(59)));
        assert!(!within_window(last, window, last + TimeDelta::seconds(60)));
        assert!(!within_window(last, window, last + TimeDelta::hours(1)));
    }
}
