use core::fmt::Debug;

use embedded_graphics::geometry::Point;
use embedded_graphics::primitives::{PrimitiveStyleBuilder, StyledDrawable};
use u8g2_fonts::types::{FontColor, HorizontalAlignment, VerticalPosition};

use super::Screen;
use crate::fonts::TINY_FONT;
use crate::nav::{icon_rects, ICON_LABELS};
use crate::{config, AppDrawTarget};

/// The 2x4 launcher grid. The firmware overlays BMP icons from storage on
/// top of each cell after init; cells keep their border as the fallback
/// when no icon file exists.
pub struct DashboardScreen<DT, E> {
    _phantom: core::marker::PhantomData<(DT, E)>,
}

impl<DT: AppDrawTarget<E>, E: Debug> Screen<DT, E> for DashboardScreen<DT, E> {
    async fn draw_init(&mut self, display: &mut DT) {
        display.clear(config::COLOR_BACKGROUND).unwrap();

        let border = PrimitiveStyleBuilder::new()
            .stroke_color(config::COLOR_GRID)
            .stroke_width(1)
            .build();

        let rects = icon_rects(display.bounding_box().size);
        for (rect, label) in rects.iter().zip(ICON_LABELS) {
            rect.draw_styled(&border, display).unwrap();

            let label_y = rect.top_left.y + rect.size.height as i32 - 28;
            TINY_FONT
                .render_aligned(
                    label,
                    Point::new(rect.top_left.x + rect.size.width as i32 / 2, label_y),
                    VerticalPosition::Top,
                    HorizontalAlignment::Center,
                    FontColor::Transparent(config::COLOR_TEXT),
                    display,
                )
                .unwrap();
        }
    }

    async fn draw_frame(&mut self, _display: &mut DT) {}
}

impl<DT, E> Default for DashboardScreen<DT, E> {
    fn default() -> Self {
        Self {
            _phantom: core::marker::PhantomData,
        }
    }
}
