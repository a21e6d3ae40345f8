#![no_std]

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::pixelcolor::Rgb565;

pub mod config;
mod elements;
pub mod fonts;
mod format;
pub mod nav;
pub mod panic;
mod screens;
mod util;

pub use elements::*;
pub use screens::{
    visible_tasks, week_geometry, AppStubScreen, CalendarScreen, DashboardScreen,
    PhotoFrameScreen, Screen, Screens, TodoScreen, WelcomeScreen,
};

pub trait HintRefresh {
    fn hint_refresh(&mut self);
}

pub trait AppDrawTarget<E>: DrawTarget<Color = Rgb565, Error = E> + HintRefresh {}
impl<E, D: DrawTarget<Color = Rgb565, Error = E> + HintRefresh> AppDrawTarget<E> for D {}

pub use badge::draw_badge;
