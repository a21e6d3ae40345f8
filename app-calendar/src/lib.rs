#![no_std]

pub mod date;
pub mod event;
pub mod io;
pub mod photos;
pub mod tasks;
pub mod week;

pub use date::{days_in_month, Date};
pub use event::{CalendarEvent, EventStore, Recurrence, TimeOfDay, MAX_EVENTS};
pub use io::{LineSource, StrLineSource};
pub use photos::{PhotoList, Slideshow, MAX_PHOTOS, SLIDE_INTERVAL_MS};
pub use tasks::{Task, TaskList, MAX_TASKS};
pub use week::{plan_week, DayPlan, EventSlot, WeekGeometry, WeekPlan};
