pub mod macros;
pub mod prelude;
pub mod setup;

use chrono::{NaiveDate, TimeZone};
use chrono_tz::{America::Chicago, Tz};

/// `hour:minute` on the given day in the default trigger zone.
#[allow(unused)]
#[track_caller]
pub fn chicago(date: NaiveDate, hour: u32, minute: u32) -> chrono::DateTime<Tz> {
    Chicago
        .from_local_datetime(&date.and_hms_opt(hour, minute, 0).unwrap())
        .single()
        .expect("ambiguous local time")
}

#[allow(unused)]
pub fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 1).unwrap() + chrono::Days::new(u64::from(n))
}
