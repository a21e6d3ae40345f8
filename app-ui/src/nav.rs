//! Screen identity, tap-region dispatch, and navigation state.
//!
//! Everything here is a pure function of the tap point and the current
//! state, so the whole navigation shell is testable without hardware.

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::{ContainsPoint, Rectangle};

/// Square top-left corner that exits an app back to the dashboard.
pub const EXIT_REGION: i32 = 100;

pub const ICON_COUNT: usize = 8;
pub const ICON_LABELS: [&str; ICON_COUNT] = [
    "Calendar",
    "To-Do",
    "Photo Frame",
    "News",
    "Weather",
    "Demo",
    "Setup",
    "About",
];

const ICON_MARGIN: i32 = 20;
const ICON_GAP: i32 = 12;
const ICON_COLS: i32 = 4;
const ICON_ROWS: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenId {
    Welcome,
    Dashboard,
    Calendar,
    Todo,
    PhotoFrame,
    News,
    Weather,
    Demo,
    Setup,
}

impl ScreenId {
    /// Title shown on the placeholder app screens.
    pub fn label(self) -> &'static str {
        match self {
            ScreenId::News => "News",
            ScreenId::Weather => "Weather",
            ScreenId::Demo => "Demo",
            ScreenId::Setup => "Setup",
            _ => "",
        }
    }
}

/// The dashboard icon order; the last icon returns to the welcome screen.
pub fn icon_target(index: usize) -> ScreenId {
    match index {
        0 => ScreenId::Calendar,
        1 => ScreenId::Todo,
        2 => ScreenId::PhotoFrame,
        3 => ScreenId::News,
        4 => ScreenId::Weather,
        5 => ScreenId::Demo,
        6 => ScreenId::Setup,
        _ => ScreenId::Welcome,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Goto(ScreenId),
    PrevWeek,
    NextWeek,
    ScrollUp,
    ScrollDown,
    PrevPhoto,
    NextPhoto,
}

/// 2x4 icon grid filling the display.
pub fn icon_rects(size: Size) -> [Rectangle; ICON_COUNT] {
    let w = size.width as i32;
    let h = size.height as i32;
    let icon_w = (w - ICON_MARGIN * 2 - ICON_GAP * (ICON_COLS - 1)) / ICON_COLS;
    let icon_h = (h - ICON_MARGIN * 2 - ICON_GAP * (ICON_ROWS - 1)) / ICON_ROWS;

    core::array::from_fn(|i| {
        let row = i as i32 / ICON_COLS;
        let col = i as i32 % ICON_COLS;
        Rectangle::new(
            Point::new(
                ICON_MARGIN + col * (icon_w + ICON_GAP),
                ICON_MARGIN + row * (icon_h + ICON_GAP),
            ),
            Size::new(icon_w as u32, icon_h as u32),
        )
    })
}

pub fn hit_icon(size: Size, point: Point) -> Option<usize> {
    icon_rects(size)
        .iter()
        .position(|rect| rect.contains(point))
}

/// Map a press to a navigation action for the active screen.
pub fn handle_tap(screen: ScreenId, size: Size, point: Point) -> Option<NavAction> {
    use NavAction::*;

    let in_exit = point.x < EXIT_REGION && point.y < EXIT_REGION;
    let left_half = point.x < size.width as i32 / 2;

    match screen {
        ScreenId::Welcome => Some(Goto(ScreenId::Dashboard)),
        ScreenId::Dashboard => hit_icon(size, point).map(|i| Goto(icon_target(i))),
        ScreenId::Calendar if in_exit => Some(Goto(ScreenId::Dashboard)),
        ScreenId::Calendar if left_half => Some(PrevWeek),
        ScreenId::Calendar => Some(NextWeek),
        ScreenId::Todo if in_exit => Some(Goto(ScreenId::Dashboard)),
        ScreenId::Todo if left_half => Some(ScrollUp),
        ScreenId::Todo => Some(ScrollDown),
        ScreenId::PhotoFrame if in_exit => Some(Goto(ScreenId::Dashboard)),
        ScreenId::PhotoFrame if left_half => Some(PrevPhoto),
        ScreenId::PhotoFrame => Some(NextPhoto),
        // placeholder apps: any tap returns
        _ => Some(Goto(ScreenId::Dashboard)),
    }
}

/// Navigation state owned by the control loop and passed into every
/// component that needs it; nothing here is global.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    pub screen: ScreenId,
    /// Whole weeks away from the reference date; unbounded in both
    /// directions, changed only by explicit prev/next.
    pub week_offset: i32,
    pub task_scroll: usize,
}

impl NavState {
    pub const fn new() -> Self {
        Self {
            screen: ScreenId::Welcome,
            week_offset: 0,
            task_scroll: 0,
        }
    }

    /// Apply an action; returns true when the screen must be redrawn.
    /// Photo actions always redraw, but stepping the slideshow itself is
    /// the caller's job.
    pub fn apply(&mut self, action: NavAction, task_count: usize, visible_tasks: usize) -> bool {
        match action {
            NavAction::Goto(screen) => {
                if screen == ScreenId::Todo {
                    self.task_scroll = 0;
                }
                self.screen = screen;
                true
            }
            NavAction::PrevWeek => {
                self.week_offset -= 1;
                true
            }
            NavAction::NextWeek => {
                self.week_offset += 1;
                true
            }
            NavAction::ScrollUp => {
                if self.task_scroll > 0 {
                    self.task_scroll -= 1;
                    true
                } else {
                    false
                }
            }
            NavAction::ScrollDown => {
                if self.task_scroll + visible_tasks < task_count {
                    self.task_scroll += 1;
                    true
                } else {
                    false
                }
            }
            NavAction::PrevPhoto | NavAction::NextPhoto => true,
        }
    }
}

impl Default for NavState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Size = Size::new(480, 320);

    #[test]
    fn test_welcome_tap_anywhere_enters_dashboard() {
        assert_eq!(
            handle_tap(ScreenId::Welcome, SIZE, Point::new(3, 3)),
            Some(NavAction::Goto(ScreenId::Dashboard))
        );
    }

    #[test]
    fn test_dashboard_hit_test() {
        let rects = icon_rects(SIZE);
        let center = rects[0].center();
        assert_eq!(
            handle_tap(ScreenId::Dashboard, SIZE, center),
            Some(NavAction::Goto(ScreenId::Calendar))
        );
        let center = rects[7].center();
        assert_eq!(
            handle_tap(ScreenId::Dashboard, SIZE, center),
            Some(NavAction::Goto(ScreenId::Welcome))
        );
        // between the margins nothing is hit
        assert_eq!(handle_tap(ScreenId::Dashboard, SIZE, Point::new(1, 1)), None);
    }

    #[test]
    fn test_icon_grid_is_two_by_four() {
        let rects = icon_rects(SIZE);
        assert_eq!(rects[0].top_left.y, rects[3].top_left.y);
        assert!(rects[4].top_left.y > rects[0].top_left.y);
        assert_eq!(rects[0].top_left.x, rects[4].top_left.x);
        for rect in &rects {
            assert!(rect.bottom_right().unwrap().x < SIZE.width as i32);
            assert!(rect.bottom_right().unwrap().y < SIZE.height as i32);
        }
    }

    #[test]
    fn test_calendar_regions() {
        // exit wins over the half split
        assert_eq!(
            handle_tap(ScreenId::Calendar, SIZE, Point::new(50, 50)),
            Some(NavAction::Goto(ScreenId::Dashboard))
        );
        assert_eq!(
            handle_tap(ScreenId::Calendar, SIZE, Point::new(50, 200)),
            Some(NavAction::PrevWeek)
        );
        assert_eq!(
            handle_tap(ScreenId::Calendar, SIZE, Point::new(400, 200)),
            Some(NavAction::NextWeek)
        );
    }

    #[test]
    fn test_stub_screens_return_on_any_tap() {
        for screen in [
            ScreenId::News,
            ScreenId::Weather,
            ScreenId::Demo,
            ScreenId::Setup,
        ] {
            assert_eq!(
                handle_tap(screen, SIZE, Point::new(400, 300)),
                Some(NavAction::Goto(ScreenId::Dashboard))
            );
        }
    }

    #[test]
    fn test_week_offset_is_unbounded() {
        let mut nav = NavState::new();
        nav.screen = ScreenId::Calendar;
        for _ in 0..10 {
            assert!(nav.apply(NavAction::PrevWeek, 0, 0));
        }
        assert_eq!(nav.week_offset, -10);
        for _ in 0..25 {
            nav.apply(NavAction::NextWeek, 0, 0);
        }
        assert_eq!(nav.week_offset, 15);
    }

    #[test]
    fn test_week_offset_survives_leaving_the_calendar() {
        let mut nav = NavState::new();
        nav.screen = ScreenId::Calendar;
        nav.apply(NavAction::NextWeek, 0, 0);
        nav.apply(NavAction::Goto(ScreenId::Dashboard), 0, 0);
        nav.apply(NavAction::Goto(ScreenId::Calendar), 0, 0);
        assert_eq!(nav.week_offset, 1);
    }

    #[test]
    fn test_task_scroll_clamped() {
        let mut nav = NavState::new();
        nav.apply(NavAction::Goto(ScreenId::Todo), 0, 0);
        assert!(!nav.apply(NavAction::ScrollUp, 10, 5));
        assert!(nav.apply(NavAction::ScrollDown, 10, 5));
        for _ in 0..20 {
            nav.apply(NavAction::ScrollDown, 10, 5);
        }
        // at most task_count - visible_tasks
        assert_eq!(nav.task_scroll, 5);
        assert!(nav.apply(NavAction::ScrollUp, 10, 5));
    }

    #[test]
    fn test_entering_todo_resets_scroll() {
        let mut nav = NavState::new();
        nav.apply(NavAction::Goto(ScreenId::Todo), 10, 5);
        nav.apply(NavAction::ScrollDown, 10, 5);
        nav.apply(NavAction::Goto(ScreenId::Dashboard), 10, 5);
        nav.apply(NavAction::Goto(ScreenId::Todo), 10, 5);
        assert_eq!(nav.task_scroll, 0);
    }
}
