//! Host harness: the full screen set inside an SDL window, with mouse
//! clicks standing in for touch presses. Runs on fixture data; the photo
//! frame shows its empty state since there is no card to list.

use std::thread;
use std::time::Duration;

use app_calendar::{plan_week, Date, EventStore, StrLineSource, TaskList};
use app_ui::nav::{self, NavState, ScreenId};
use app_ui::{
    visible_tasks, week_geometry, AppStubScreen, CalendarScreen, DashboardScreen, HintRefresh,
    PhotoFrameScreen, Screen, Screens, TodoScreen, WelcomeScreen,
};
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{Dimensions, Size};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::Pixel;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};

const SIZE: Size = Size::new(480, 320);
const TODAY: Date = Date::new(2026, 2, 9);

const SAMPLE_ICS: &str = "\
BEGIN:VEVENT
SUMMARY:Dentist
DTSTART:20260209T143000
END:VEVENT
BEGIN:VEVENT
SUMMARY:Standup
DTSTART:20260209T091500
END:VEVENT
BEGIN:VEVENT
SUMMARY:Anna's birthday
RRULE:FREQ=YEARLY
DTSTART:20190211
END:VEVENT
BEGIN:VEVENT
SUMMARY:Lease renewal reminder
RRULE:FREQ=YEARLY;UNTIL=20270101
DTSTART:20240213
END:VEVENT
BEGIN:VEVENT
SUMMARY:Trip planning session with the whole family
DTSTART:20260212T183000
END:VEVENT
";

const SAMPLE_TASKS: &[u8] = br#"[
    {"title": "Water the plants", "status": "pending"},
    {"title": "Pay the electricity bill", "status": "completed"},
    {"title": "Book dentist follow-up"},
    {"title": "Clean the balcony", "status": "pending"},
    {"title": "Back up the photo card", "status": "completed"},
    {"title": "Buy a birthday present for Anna"},
    {"title": "Fix the hallway light"}
]"#;

/// The simulator display with the refresh hint the screens expect.
struct SimDisplay(SimulatorDisplay<Rgb565>);

impl Dimensions for SimDisplay {
    fn bounding_box(&self) -> Rectangle {
        self.0.bounding_box()
    }
}

impl DrawTarget for SimDisplay {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.0.draw_iter(pixels)
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.0.fill_contiguous(area, colors)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.0.fill_solid(area, color)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.0.clear(color)
    }
}

impl HintRefresh for SimDisplay {
    fn hint_refresh(&mut self) {}
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let mut display = SimDisplay(SimulatorDisplay::new(SIZE));

    let events = EventStore::load(&mut StrLineSource::new(SAMPLE_ICS));
    let tasks = TaskList::from_json(SAMPLE_TASKS);

    let mut nav = NavState::new();
    let mut shown = nav;
    let mut screen: Screens<SimDisplay, core::convert::Infallible> =
        WelcomeScreen::new(true).into();
    screen.draw_init(&mut display).await;

    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut w = Window::new("Hearth UI", &output_settings);

    'outer: loop {
        screen.draw_frame(&mut display).await;
        w.update(&display.0);

        for e in w.events() {
            match e {
                SimulatorEvent::Quit => {
                    break 'outer;
                }
                SimulatorEvent::MouseButtonUp { point, .. } => {
                    if let Some(action) = nav::handle_tap(nav.screen, SIZE, point) {
                        nav.apply(action, tasks.len(), visible_tasks(SIZE.height));
                    }
                }
                _ => (),
            }
        }

        if nav != shown {
            screen = match nav.screen {
                ScreenId::Welcome => WelcomeScreen::new(true).into(),
                ScreenId::Dashboard => DashboardScreen::default().into(),
                ScreenId::Calendar => {
                    let plan =
                        plan_week(events.events(), TODAY, nav.week_offset, &week_geometry(SIZE));
                    CalendarScreen::new(plan).into()
                }
                ScreenId::Todo => TodoScreen::new(tasks.clone(), nav.task_scroll).into(),
                ScreenId::PhotoFrame => PhotoFrameScreen::new(0).into(),
                stub => AppStubScreen::new(stub.label()).into(),
            };
            screen.draw_init(&mut display).await;
            shown = nav;
        }

        thread::sleep(Duration::from_millis(20));
    }
}
