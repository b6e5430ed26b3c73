//! Daily load distribution.
//!
//! Spreads a class group's weekly lesson total over the five weekdays:
//! every day receives `total / 5` lessons, then each of the `total % 5`
//! leftover lessons goes to a uniformly random day. Draws are independent,
//! so one day may receive several leftovers.

use rand::Rng;

use crate::models::{DailyLoad, Weekday, WEEKDAY_COUNT};

/// Distributes `total` weekly lessons across the week.
///
/// Called once per placement attempt so that a retry can escape a dense
/// day produced by an unlucky draw.
pub fn distribute_daily_load<R: Rng + ?Sized>(total: usize, rng: &mut R) -> DailyLoad {
    let mut load = DailyLoad::uniform(total / WEEKDAY_COUNT);
    for _ in 0..total % WEEKDAY_COUNT {
        let day = Weekday::ALL[rng.random_range(0..WEEKDAY_COUNT)];
        load.increment(day);
    }
    load
}
