use embedded_graphics::pixelcolor::{Rgb565, RgbColor, WebColors};

pub const APP_NAME: &str = "Hearth";
pub const APP_AUTHOR: &str = "Eugene";
pub const PHOTO_DIR: &str = "/PHOTOS";

pub const COLOR_BACKGROUND: Rgb565 = Rgb565::BLACK;
pub const COLOR_TEXT: Rgb565 = Rgb565::WHITE;
pub const COLOR_HINT: Rgb565 = Rgb565::CSS_GRAY;
pub const COLOR_ACCENT: Rgb565 = Rgb565::CSS_PALE_GREEN;
pub const COLOR_ALERT: Rgb565 = Rgb565::RED;

pub const COLOR_GRID: Rgb565 = Rgb565::CSS_DIM_GRAY;
pub const COLOR_TODAY_FILL: Rgb565 = Rgb565::CSS_DARK_SLATE_GRAY;
pub const COLOR_EVENT_TIME: Rgb565 = Rgb565::CYAN;
pub const COLOR_EVENT_TITLE: Rgb565 = Rgb565::YELLOW;

pub const COLOR_TASK_DONE: Rgb565 = Rgb565::CSS_DIM_GRAY;
pub const COLOR_CHECKBOX_FILL: Rgb565 = Rgb565::GREEN;

// Week view vertical split
pub const WEEK_HEADER_HEIGHT: u32 = 40;
pub const WEEK_FOOTER_HEIGHT: u32 = 16;

// Event flow inside a day cell
pub const EVENT_ORIGIN_X: u32 = 120;
pub const EVENT_ORIGIN_Y: u32 = 4;
pub const EVENT_LINE_HEIGHT: u32 = 15;
pub const EVENT_WRAP_MARGIN: u32 = 150;
pub const EVENT_TIME_ADVANCE: u32 = 44;
pub const EVENT_ADVANCE: u32 = 100;
pub const EVENT_TITLE_CHARS: usize = 12;

// To-do list rows
pub const TASK_LIST_TOP: u32 = 44;
pub const TASK_LIST_BOTTOM_RESERVE: u32 = 28;
pub const TASK_ROW_HEIGHT: u32 = 48;
pub const TASK_CHECKBOX_SIZE: u32 = 24;
pub const TASK_CHECKBOX_X: i32 = 16;
pub const TASK_TITLE_CHARS: usize = 28;
