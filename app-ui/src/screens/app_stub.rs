use core::fmt::Debug;

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::{PrimitiveStyleBuilder, Rectangle, StyledDrawable};
use u8g2_fonts::types::{FontColor, VerticalPosition};

use super::Screen;
use crate::fonts::{SMALL_FONT, TINY_FONT};
use crate::{config, AppDrawTarget};

/// Placeholder for launcher entries that have no app behind them yet.
pub struct AppStubScreen<DT, E> {
    pub label: &'static str,
    _phantom: core::marker::PhantomData<(DT, E)>,
}

impl<DT, E> AppStubScreen<DT, E> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            _phantom: core::marker::PhantomData,
        }
    }
}

impl<DT: AppDrawTarget<E>, E: Debug> Screen<DT, E> for AppStubScreen<DT, E> {
    async fn draw_init(&mut self, display: &mut DT) {
        display.clear(config::COLOR_BACKGROUND).unwrap();

        Rectangle::new(Point::new(10, 10), Size::new(80, 30))
            .draw_styled(
                &PrimitiveStyleBuilder::new()
                    .stroke_color(config::COLOR_TEXT)
                    .stroke_width(1)
                    .build(),
                display,
            )
            .unwrap();
        TINY_FONT
            .render(
                "Back",
                Point::new(18, 16),
                VerticalPosition::Top,
                FontColor::Transparent(config::COLOR_TEXT),
                display,
            )
            .unwrap();

        SMALL_FONT
            .render(
                self.label,
                Point::new(20, 60),
                VerticalPosition::Top,
                FontColor::Transparent(config::COLOR_ACCENT),
                display,
            )
            .unwrap();
        TINY_FONT
            .render(
                "Tap anywhere to return",
                Point::new(20, 100),
                VerticalPosition::Top,
                FontColor::Transparent(config::COLOR_HINT),
                display,
            )
            .unwrap();
    }

    async fn draw_frame(&mut self, _display: &mut DT) {}
}
