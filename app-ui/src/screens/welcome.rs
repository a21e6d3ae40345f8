use core::fmt::Debug;

use embedded_graphics::geometry::Point;
use u8g2_fonts::types::{FontColor, HorizontalAlignment, VerticalPosition};

use super::Screen;
use crate::fonts::{SMALL_FONT, TINY_FONT};
use crate::{config, draw_badge, AppDrawTarget};

pub struct WelcomeScreen<DT, E> {
    pub storage_ok: bool,
    _phantom: core::marker::PhantomData<(DT, E)>,
}

impl<DT, E> WelcomeScreen<DT, E> {
    pub fn new(storage_ok: bool) -> Self {
        Self {
            storage_ok,
            _phantom: core::marker::PhantomData,
        }
    }
}

impl<DT: AppDrawTarget<E>, E: Debug> Screen<DT, E> for WelcomeScreen<DT, E> {
    async fn draw_init(&mut self, display: &mut DT) {
        display.clear(config::COLOR_BACKGROUND).unwrap();

        let width = display.bounding_box().size.width;
        let height = display.bounding_box().size.height;
        let center_x = width as i32 / 2;
        let mid_y = height as i32 / 2;

        draw_badge(
            display,
            Point::new(center_x, mid_y - 60),
            config::APP_NAME,
            config::COLOR_ACCENT,
            config::COLOR_BACKGROUND,
        )
        .await;

        for (i, (label, value)) in [
            ("Version: ", env!("CARGO_PKG_VERSION")),
            ("Author: ", config::APP_AUTHOR),
        ]
        .iter()
        .enumerate()
        {
            let y = mid_y + i as i32 * 20;
            let rect = TINY_FONT
                .render(
                    *label,
                    Point::new(20, y),
                    VerticalPosition::Top,
                    FontColor::Transparent(config::COLOR_HINT),
                    display,
                )
                .unwrap();
            let x = rect
                .bounding_box
                .and_then(|b| b.bottom_right())
                .map(|p| p.x + 4)
                .unwrap_or(120);
            TINY_FONT
                .render(
                    *value,
                    Point::new(x, y),
                    VerticalPosition::Top,
                    FontColor::Transparent(config::COLOR_TEXT),
                    display,
                )
                .unwrap();
        }

        let y = mid_y + 40;
        let rect = TINY_FONT
            .render(
                "Storage: ",
                Point::new(20, y),
                VerticalPosition::Top,
                FontColor::Transparent(config::COLOR_HINT),
                display,
            )
            .unwrap();
        let x = rect
            .bounding_box
            .and_then(|b| b.bottom_right())
            .map(|p| p.x + 4)
            .unwrap_or(120);
        let (status, color) = if self.storage_ok {
            ("OK", config::COLOR_ACCENT)
        } else {
            ("Not Found", config::COLOR_ALERT)
        };
        TINY_FONT
            .render(
                status,
                Point::new(x, y),
                VerticalPosition::Top,
                FontColor::Transparent(color),
                display,
            )
            .unwrap();

        SMALL_FONT
            .render_aligned(
                " TAP TO BEGIN ",
                Point::new(center_x, height as i32 - 50),
                VerticalPosition::Top,
                HorizontalAlignment::Center,
                FontColor::WithBackground {
                    fg: config::COLOR_BACKGROUND,
                    bg: config::COLOR_TEXT,
                },
                display,
            )
            .unwrap();
    }

    async fn draw_frame(&mut self, _display: &mut DT) {}
}

impl<DT, E> Default for WelcomeScreen<DT, E> {
    fn default() -> Self {
        Self::new(false)
    }
}
