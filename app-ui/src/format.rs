use core::fmt::Debug;

use app_calendar::week::DAY_ABBREV;
use app_calendar::{Date, TimeOfDay};
use ufmt::{uWrite, uwrite};

pub fn write_2d<E: Debug, W: uWrite<Error = E>>(w: &mut W, value: u8) {
    if value < 10 {
        uwrite!(w, "0{}", value).unwrap();
    } else {
        uwrite!(w, "{}", value).unwrap();
    }
}

/// "HH:MM"
pub fn write_hhmm<E: Debug, W: uWrite<Error = E>>(w: &mut W, time: TimeOfDay) {
    write_2d(w, time.hour);
    uwrite!(w, ":").unwrap();
    write_2d(w, time.minute);
}

/// "Sun 2/8"
pub fn write_day_label<E: Debug, W: uWrite<Error = E>>(w: &mut W, date: Date) {
    uwrite!(
        w,
        "{} {}/{}",
        DAY_ABBREV[date.day_of_week() as usize],
        date.month,
        date.day
    )
    .unwrap();
}

/// "Task 3-7 of 12"
pub fn write_task_range<E: Debug, W: uWrite<Error = E>>(
    w: &mut W,
    first: usize,
    last: usize,
    total: usize,
) {
    uwrite!(w, "Task {}-{} of {}", first, last, total).unwrap();
}
