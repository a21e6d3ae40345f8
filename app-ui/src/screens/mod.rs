mod app_stub;
mod calendar;
mod dashboard;
mod photo_frame;
mod todo;
mod welcome;

use core::fmt::Debug;

pub use app_stub::AppStubScreen;
pub use calendar::{week_geometry, CalendarScreen};
pub use dashboard::DashboardScreen;
use enum_dispatch::enum_dispatch;
pub use photo_frame::PhotoFrameScreen;
pub use todo::{visible_tasks, TodoScreen};
pub use welcome::WelcomeScreen;

use crate::AppDrawTarget;

#[allow(async_fn_in_trait)]
#[enum_dispatch(Screens<DT, E>)]
pub trait Screen<DT: AppDrawTarget<E>, E: Debug> {
    async fn draw_init(&mut self, display: &mut DT);
    async fn draw_frame(&mut self, display: &mut DT);
}

#[allow(clippy::large_enum_variant)]
#[enum_dispatch]
pub enum Screens<DT: AppDrawTarget<E>, E: Debug> {
    Welcome(WelcomeScreen<DT, E>),
    Dashboard(DashboardScreen<DT, E>),
    Calendar(CalendarScreen<DT, E>),
    Todo(TodoScreen<DT, E>),
    PhotoFrame(PhotoFrameScreen<DT, E>),
    AppStub(AppStubScreen<DT, E>),
}
