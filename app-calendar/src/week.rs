use heapless::{String, Vec};
use ufmt::uwrite;

use crate::date::Date;
use crate::event::{push_str_lossy, CalendarEvent, TimeOfDay};

pub const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
pub const DAY_ABBREV: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Slots per day cell; generous next to what the vertical-room rule allows.
pub const MAX_DAY_EVENTS: usize = 16;
/// Title buffer: the truncation limit plus the `...` marker.
pub const MAX_SLOT_TITLE: usize = 24;
pub const HEADER_LEN: usize = 32;

/// Pixel geometry of one week row, supplied by the rendering layer. The
/// planner works entirely in cell-local coordinates.
#[derive(Debug, Clone, Copy)]
pub struct WeekGeometry {
    pub cell_width: u32,
    pub cell_height: u32,
    /// Left inset where the event flow starts (after the day label).
    pub event_origin_x: u32,
    /// Top inset of the first event line within a cell.
    pub event_origin_y: u32,
    pub line_height: u32,
    /// Wrap once the cursor passes `cell_width - wrap_margin`.
    pub wrap_margin: u32,
    /// Horizontal room a time label consumes.
    pub time_advance: u32,
    /// Horizontal stride to the next event after a title.
    pub event_advance: u32,
    /// Titles longer than this many characters are cut and marked.
    pub title_chars: usize,
}

/// One placed event: where its time label and title go within the cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSlot {
    /// Cell-local x of the time label (equals `title_x` for untimed events).
    pub x: u32,
    /// Cell-local y of the line this slot sits on.
    pub y: u32,
    pub time: Option<TimeOfDay>,
    pub title_x: u32,
    pub title: String<MAX_SLOT_TITLE>,
}

#[derive(Debug, Clone)]
pub struct DayPlan {
    pub date: Date,
    pub is_today: bool,
    pub slots: Vec<EventSlot, MAX_DAY_EVENTS>,
}

/// A fully computed week view: seven day rows plus the header text.
/// No draw calls happen here; the screen renders the plan verbatim.
#[derive(Debug, Clone)]
pub struct WeekPlan {
    pub start: Date,
    pub header: String<HEADER_LEN>,
    pub days: [DayPlan; 7],
}

/// Compute the displayed week for `reference` shifted by `week_offset`
/// whole weeks. Stateless: every call derives the full plan from its
/// arguments.
pub fn plan_week(
    events: &[CalendarEvent],
    reference: Date,
    week_offset: i32,
    geom: &WeekGeometry,
) -> WeekPlan {
    let anchor = reference.advance(7 * week_offset);
    let start = anchor.advance(-(anchor.day_of_week() as i32));
    let end = start.advance(6);

    let days = core::array::from_fn(|i| {
        let date = start.advance(i as i32);
        plan_day(events, date, date == reference, geom)
    });

    WeekPlan {
        start,
        header: header_text(start, end),
        days,
    }
}

fn header_text(start: Date, end: Date) -> String<HEADER_LEN> {
    let mut header = String::new();
    if start.month == end.month {
        let _ = uwrite!(
            header,
            "{} {}-{}, {}",
            MONTH_ABBREV[start.month as usize - 1],
            start.day,
            end.day,
            start.year
        );
    } else {
        let _ = uwrite!(
            header,
            "{} {} - {} {}, {}",
            MONTH_ABBREV[start.month as usize - 1],
            start.day,
            MONTH_ABBREV[end.month as usize - 1],
            end.day,
            end.year
        );
    }
    header
}

/// Flow the day's events into the cell: left to right with a fixed stride,
/// wrapping while vertical room remains, silently dropping the rest once
/// it runs out. Events are taken in stored order, which fixes the ordering
/// of same-day events.
fn plan_day(events: &[CalendarEvent], date: Date, is_today: bool, geom: &WeekGeometry) -> DayPlan {
    let mut slots: Vec<EventSlot, MAX_DAY_EVENTS> = Vec::new();

    let wrap_x = geom.cell_width.saturating_sub(geom.wrap_margin);
    let max_y = geom
        .cell_height
        .saturating_sub(geom.line_height + geom.event_origin_y);
    let mut x = geom.event_origin_x;
    let mut y = geom.event_origin_y;

    for event in events.iter().filter(|e| e.occurs_on(date)) {
        if x > wrap_x {
            if y < max_y {
                x = geom.event_origin_x;
                y += geom.line_height;
            } else {
                // vertical room exhausted: drop the remainder of the day
                break;
            }
        }

        let title_x = if event.time.is_some() {
            x + geom.time_advance
        } else {
            x
        };
        let slot = EventSlot {
            x,
            y,
            time: event.time,
            title_x,
            title: truncate_title(&event.summary, geom.title_chars),
        };
        if slots.push(slot).is_err() {
            break;
        }
        x = title_x + geom.event_advance;
    }

    DayPlan {
        date,
        is_today,
        slots,
    }
}

fn truncate_title(summary: &str, limit: usize) -> String<MAX_SLOT_TITLE> {
    let mut title = String::new();
    if summary.chars().count() > limit {
        for ch in summary.chars().take(limit) {
            let _ = title.push(ch);
        }
        push_str_lossy(&mut title, "...");
    } else {
        push_str_lossy(&mut title, summary);
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventStore, Recurrence};
    use crate::io::StrLineSource;

    const GEOM: WeekGeometry = WeekGeometry {
        cell_width: 480,
        cell_height: 38,
        event_origin_x: 120,
        event_origin_y: 4,
        line_height: 15,
        wrap_margin: 150,
        time_advance: 44,
        event_advance: 100,
        title_chars: 12,
    };

    fn store(ics: &str) -> EventStore {
        EventStore::load(&mut StrLineSource::new(ics))
    }

    #[test]
    fn test_week_starts_on_preceding_sunday() {
        // 2026-02-09 is a Monday
        let plan = plan_week(&[], Date::new(2026, 2, 9), 0, &GEOM);
        assert_eq!(plan.start, Date::new(2026, 2, 8));
        for (i, day) in plan.days.iter().enumerate() {
            assert_eq!(day.date, Date::new(2026, 2, 8 + i as u8));
        }
    }

    #[test]
    fn test_week_offset_shifts_whole_weeks() {
        let plan = plan_week(&[], Date::new(2026, 2, 9), 1, &GEOM);
        assert_eq!(plan.start, Date::new(2026, 2, 15));
        let plan = plan_week(&[], Date::new(2026, 2, 9), -1, &GEOM);
        assert_eq!(plan.start, Date::new(2026, 2, 1));
    }

    #[test]
    fn test_header_within_one_month() {
        let plan = plan_week(&[], Date::new(2026, 2, 9), 0, &GEOM);
        assert_eq!(plan.header.as_str(), "Feb 8-14, 2026");
    }

    #[test]
    fn test_header_across_months_and_years() {
        // week of 2025-12-28 .. 2026-01-03; the header year follows the end
        let plan = plan_week(&[], Date::new(2026, 1, 1), 0, &GEOM);
        assert_eq!(plan.start, Date::new(2025, 12, 28));
        assert_eq!(plan.header.as_str(), "Dec 28 - Jan 3, 2026");
    }

    #[test]
    fn test_today_highlight_tracks_the_literal_date() {
        let reference = Date::new(2026, 2, 9);
        let plan = plan_week(&[], reference, 0, &GEOM);
        assert!(plan.days[1].is_today);
        assert_eq!(plan.days.iter().filter(|d| d.is_today).count(), 1);
        // scrolled away, no row is today; scrolled back, it reappears
        let plan = plan_week(&[], reference, 3, &GEOM);
        assert!(plan.days.iter().all(|d| !d.is_today));
    }

    #[test]
    fn test_events_placed_in_stored_order() {
        let ics = "SUMMARY:First\nDTSTART:20260209T090000\nEND:VEVENT\n\
                   SUMMARY:Second\nDTSTART:20260209\nEND:VEVENT\n";
        let store = store(ics);
        let plan = plan_week(store.events(), Date::new(2026, 2, 9), 0, &GEOM);
        let monday = &plan.days[1];
        assert_eq!(monday.slots.len(), 2);
        assert_eq!(monday.slots[0].title.as_str(), "First");
        assert_eq!(monday.slots[1].title.as_str(), "Second");
        assert!(monday.slots[0].x < monday.slots[1].x);
    }

    #[test]
    fn test_timed_event_reserves_time_slot() {
        let ics = "SUMMARY:Timed\nDTSTART:20260209T090000\nEND:VEVENT\n";
        let store = store(ics);
        let plan = plan_week(store.events(), Date::new(2026, 2, 9), 0, &GEOM);
        let slot = &plan.days[1].slots[0];
        assert_eq!(slot.x, GEOM.event_origin_x);
        assert_eq!(slot.title_x, GEOM.event_origin_x + GEOM.time_advance);
    }

    #[test]
    fn test_flow_wraps_then_drops() {
        // enough same-day events to overflow both lines of the cell
        let mut ics = heapless::String::<512>::new();
        for _ in 0..8 {
            ics.push_str("SUMMARY:Meet\nDTSTART:20260209\nEND:VEVENT\n")
                .unwrap();
        }
        let store = store(&ics);
        let plan = plan_week(store.events(), Date::new(2026, 2, 9), 0, &GEOM);
        let monday = &plan.days[1];
        // some events were dropped once vertical room ran out
        assert!(monday.slots.len() < 8);
        // at least one slot wrapped to the second line
        assert!(monday.slots.iter().any(|s| s.y > GEOM.event_origin_y));
        // every placed slot is within the cell
        for slot in monday.slots.iter() {
            assert!(slot.y + GEOM.line_height <= GEOM.cell_height);
        }
    }

    #[test]
    fn test_long_titles_truncated_with_marker() {
        let ics = "SUMMARY:A very long appointment title\nDTSTART:20260209\nEND:VEVENT\n";
        let store = store(ics);
        let plan = plan_week(store.events(), Date::new(2026, 2, 9), 0, &GEOM);
        let title = plan.days[1].slots[0].title.as_str();
        assert_eq!(title, "A very long ...");
        assert_eq!(title.chars().count(), GEOM.title_chars + 3);
    }

    #[test]
    fn test_recurring_event_appears_in_its_week() {
        let event = CalendarEvent {
            summary: {
                let mut s = String::new();
                s.push_str("Birthday").unwrap();
                s
            },
            anchor: Date::new(2020, 2, 10),
            time: None,
            recurrence: Recurrence::parse("FREQ=YEARLY"),
        };
        let plan = plan_week(
            core::slice::from_ref(&event),
            Date::new(2026, 2, 9),
            0,
            &GEOM,
        );
        // 2026-02-10 is the Tuesday of the displayed week
        assert_eq!(plan.days[2].slots.len(), 1);
        assert_eq!(plan.days[2].slots[0].title.as_str(), "Birthday");
    }
}
