use heapless::{String, Vec};

use crate::date::{days_in_month, Date};
use crate::io::LineSource;

/// Upper bound on stored events; parsing past this drains the stream but
/// drops the records and raises the `truncated` flag.
pub const MAX_EVENTS: usize = 128;
pub const MAX_SUMMARY: usize = 48;

const MAX_LINE: usize = 256;

/// Wall-clock start time of a timed event. Untimed events carry none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

/// Parsed form of the recurrence rule subset this device understands:
/// `FREQ=YEARLY` enables yearly repetition, `UNTIL=YYYYMMDD` caps it.
/// Other frequency tokens produce a rule that never matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Recurrence {
    pub yearly: bool,
    pub until: Option<Date>,
}

impl Recurrence {
    pub fn parse(rule: &str) -> Option<Recurrence> {
        if rule.is_empty() {
            return None;
        }
        let until = rule.find("UNTIL=").and_then(|i| {
            let value = &rule[i + 6..];
            let value = value.split(';').next().unwrap_or(value);
            parse_yyyymmdd(value)
        });
        Some(Recurrence {
            yearly: rule.contains("FREQ=YEARLY"),
            until,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub summary: String<MAX_SUMMARY>,
    /// First occurrence for recurring events, only occurrence otherwise.
    pub anchor: Date,
    pub time: Option<TimeOfDay>,
    pub recurrence: Option<Recurrence>,
}

impl CalendarEvent {
    /// Whether the event is visible on `date`, directly or via recurrence.
    ///
    /// An UNTIL bound wins over a recurrence match, but never over a direct
    /// anchor match.
    pub fn occurs_on(&self, date: Date) -> bool {
        if self.anchor == date {
            return true;
        }
        let Some(rule) = self.recurrence else {
            return false;
        };
        if let Some(until) = rule.until {
            if date > until {
                return false;
            }
        }
        rule.yearly
            && self.anchor.month == date.month
            && self.anchor.day == date.day
            && (date.year > self.anchor.year
                || (date.year == self.anchor.year && date.month >= self.anchor.month))
    }
}

fn parse_yyyymmdd(value: &str) -> Option<Date> {
    let bytes = value.as_bytes();
    if bytes.len() < 8 || !bytes[..8].iter().all(u8::is_ascii_digit) {
        return None;
    }
    let year: i32 = value[0..4].parse().ok()?;
    let month: u8 = value[4..6].parse().ok()?;
    let day: u8 = value[6..8].parse().ok()?;
    if !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
        return None;
    }
    Some(Date::new(year, month, day))
}

/// Parse a `DTSTART` value: 8 digits of date, optionally `T` plus 6 digits
/// of time. Seconds are located but not kept.
fn parse_dtstart(value: &str) -> Option<(Date, Option<TimeOfDay>)> {
    let date = parse_yyyymmdd(value)?;
    let bytes = value.as_bytes();
    let time = if bytes.len() >= 15
        && bytes[8] == b'T'
        && bytes[9..15].iter().all(u8::is_ascii_digit)
    {
        Some(TimeOfDay {
            hour: value[9..11].parse().ok()?,
            minute: value[11..13].parse().ok()?,
        })
    } else {
        None
    };
    Some((date, time))
}

/// Bounded, load-once event list. The whole store is rebuilt on each
/// reload; nothing mutates individual events afterwards.
#[derive(Debug)]
pub struct EventStore {
    events: Vec<CalendarEvent, MAX_EVENTS>,
    truncated: bool,
}

impl EventStore {
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            truncated: false,
        }
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.truncated = false;
    }

    /// Rebuild the store from an iCalendar-style stream.
    ///
    /// Only four line kinds matter; everything else is skipped. A block
    /// missing its summary or a valid date never becomes an event. Once
    /// the store is full the rest of the stream is drained so the caller
    /// can tell that records were dropped.
    pub fn reload(&mut self, src: &mut impl LineSource) {
        self.events.clear();
        self.truncated = false;

        let mut buf = [0u8; MAX_LINE];
        let mut summary: String<MAX_SUMMARY> = String::new();
        let mut start: Option<(Date, Option<TimeOfDay>)> = None;
        let mut rule: Option<Recurrence> = None;

        while let Some(line) = src.next_line(&mut buf) {
            if let Some(rest) = line.strip_prefix("SUMMARY:") {
                summary.clear();
                push_str_lossy(&mut summary, rest);
            } else if let Some(rest) = line.strip_prefix("RRULE:") {
                rule = Recurrence::parse(rest);
            } else if line.starts_with("DTSTART") {
                // the property may carry parameters, e.g. DTSTART;VALUE=DATE:
                if let Some((_, value)) = line.split_once(':') {
                    start = parse_dtstart(value);
                }
            } else if line.starts_with("END:VEVENT") {
                if let (false, Some((anchor, time))) = (summary.is_empty(), start) {
                    let event = CalendarEvent {
                        summary: summary.clone(),
                        anchor,
                        time,
                        recurrence: rule,
                    };
                    if self.events.push(event).is_err() {
                        self.truncated = true;
                    }
                }
                summary.clear();
                start = None;
                rule = None;
            }
        }
    }

    pub fn load(src: &mut impl LineSource) -> Self {
        let mut store = Self::new();
        store.reload(src);
        store
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// True when records were dropped because the store filled up.
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Append as much of `text` as fits, cutting at a char boundary.
pub(crate) fn push_str_lossy<const N: usize>(out: &mut String<N>, text: &str) {
    for ch in text.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::StrLineSource;

    fn event(year: i32, month: u8, day: u8, rrule: &str) -> CalendarEvent {
        let mut summary = String::new();
        summary.push_str("Test").unwrap();
        CalendarEvent {
            summary,
            anchor: Date::new(year, month, day),
            time: None,
            recurrence: Recurrence::parse(rrule),
        }
    }

    #[test]
    fn test_direct_match_only_without_rule() {
        let e = event(2026, 2, 9, "");
        assert!(e.occurs_on(Date::new(2026, 2, 9)));
        assert!(!e.occurs_on(Date::new(2027, 2, 9)));
        assert!(!e.occurs_on(Date::new(2026, 2, 10)));
    }

    #[test]
    fn test_yearly_recurrence() {
        let e = event(2020, 3, 15, "FREQ=YEARLY");
        assert!(e.occurs_on(Date::new(2020, 3, 15)));
        assert!(e.occurs_on(Date::new(2026, 3, 15)));
        // before the anchor year there is nothing to repeat
        assert!(!e.occurs_on(Date::new(2019, 3, 15)));
        assert!(!e.occurs_on(Date::new(2026, 3, 16)));
    }

    #[test]
    fn test_until_overrides_recurrence_match() {
        let e = event(2020, 3, 15, "FREQ=YEARLY;UNTIL=20250301");
        assert!(e.occurs_on(Date::new(2024, 3, 15)));
        // month/day match but the queried date is past the bound
        assert!(!e.occurs_on(Date::new(2025, 3, 15)));
        assert!(!e.occurs_on(Date::new(2026, 3, 15)));
    }

    #[test]
    fn test_until_does_not_mask_direct_match() {
        let e = event(2026, 6, 1, "FREQ=YEARLY;UNTIL=20200101");
        assert!(e.occurs_on(Date::new(2026, 6, 1)));
    }

    #[test]
    fn test_non_yearly_frequency_never_matches() {
        let e = event(2026, 2, 9, "FREQ=WEEKLY");
        assert!(e.occurs_on(Date::new(2026, 2, 9)));
        assert!(!e.occurs_on(Date::new(2026, 2, 16)));
        assert!(!e.occurs_on(Date::new(2027, 2, 9)));
    }

    #[test]
    fn test_parse_block_with_time() {
        let ics = "BEGIN:VEVENT\n\
                   SUMMARY:Dentist\n\
                   DTSTART:20260209T143000\n\
                   END:VEVENT\n";
        let store = EventStore::load(&mut StrLineSource::new(ics));
        assert_eq!(store.len(), 1);
        let e = &store.events()[0];
        assert_eq!(e.summary.as_str(), "Dentist");
        assert_eq!(e.anchor, Date::new(2026, 2, 9));
        assert_eq!(e.time, Some(TimeOfDay { hour: 14, minute: 30 }));
        assert_eq!(e.recurrence, None);
    }

    #[test]
    fn test_parse_date_only_and_parameterized_dtstart() {
        let ics = "SUMMARY:Holiday\n\
                   DTSTART;VALUE=DATE:20260501\n\
                   END:VEVENT\n";
        let store = EventStore::load(&mut StrLineSource::new(ics));
        assert_eq!(store.len(), 1);
        assert_eq!(store.events()[0].anchor, Date::new(2026, 5, 1));
        assert_eq!(store.events()[0].time, None);
    }

    #[test]
    fn test_block_without_summary_is_skipped() {
        let ics = "DTSTART:20260209T143000\n\
                   END:VEVENT\n\
                   SUMMARY:Kept\n\
                   DTSTART:20260210\n\
                   END:VEVENT\n";
        let store = EventStore::load(&mut StrLineSource::new(ics));
        assert_eq!(store.len(), 1);
        assert_eq!(store.events()[0].summary.as_str(), "Kept");
    }

    #[test]
    fn test_block_without_date_is_skipped() {
        let ics = "SUMMARY:No date\nEND:VEVENT\n";
        let store = EventStore::load(&mut StrLineSource::new(ics));
        assert!(store.is_empty());
    }

    #[test]
    fn test_invalid_date_is_skipped() {
        let ics = "SUMMARY:Bad\nDTSTART:20261301\nEND:VEVENT\n";
        let store = EventStore::load(&mut StrLineSource::new(ics));
        assert!(store.is_empty());
    }

    #[test]
    fn test_accumulators_reset_between_blocks() {
        // the second block must not inherit the first block's rule or time
        let ics = "SUMMARY:First\n\
                   RRULE:FREQ=YEARLY\n\
                   DTSTART:20260209T090000\n\
                   END:VEVENT\n\
                   SUMMARY:Second\n\
                   DTSTART:20260210\n\
                   END:VEVENT\n";
        let store = EventStore::load(&mut StrLineSource::new(ics));
        assert_eq!(store.len(), 2);
        assert_eq!(store.events()[1].recurrence, None);
        assert_eq!(store.events()[1].time, None);
    }

    #[test]
    fn test_capacity_is_bounded() {
        let mut ics = heapless::String::<{ (MAX_EVENTS + 10) * 48 }>::new();
        for _ in 0..MAX_EVENTS + 10 {
            ics.push_str("SUMMARY:E\nDTSTART:20260209\nEND:VEVENT\n")
                .unwrap();
        }
        let store = EventStore::load(&mut StrLineSource::new(&ics));
        assert_eq!(store.len(), MAX_EVENTS);
        assert!(store.truncated());
    }

    #[test]
    fn test_missing_resource_is_empty() {
        let store = EventStore::load(&mut StrLineSource::new(""));
        assert!(store.is_empty());
        assert!(!store.truncated());
    }

    #[test]
    fn test_until_terminated_by_semicolon() {
        let rule = Recurrence::parse("UNTIL=20250301;FREQ=YEARLY").unwrap();
        assert!(rule.yearly);
        assert_eq!(rule.until, Some(Date::new(2025, 3, 1)));
    }
}
