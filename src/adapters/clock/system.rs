use chrono::{DateTime, Utc};

use crate::ports::clock::ClockPort;

/// Wall-clock time in UTC
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use speculoos::prelude::*;

    #[test]
    fn test_now_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();

        assert_that!(second).is_greater_than_or_equal_to(first);
    }
}
