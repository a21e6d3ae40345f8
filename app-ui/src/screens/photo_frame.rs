use core::fmt::Debug;

use embedded_graphics::geometry::Point;
use u8g2_fonts::types::{FontColor, HorizontalAlignment, VerticalPosition};

use super::Screen;
use crate::fonts::TINY_FONT;
use crate::{config, AppDrawTarget};

/// Chrome for the slideshow. The photos themselves are blitted by the
/// control loop, which owns storage; this screen only paints the empty
/// state when no photos were found.
pub struct PhotoFrameScreen<DT, E> {
    pub photo_count: usize,
    _phantom: core::marker::PhantomData<(DT, E)>,
}

impl<DT, E> PhotoFrameScreen<DT, E> {
    pub fn new(photo_count: usize) -> Self {
        Self {
            photo_count,
            _phantom: core::marker::PhantomData,
        }
    }
}

impl<DT: AppDrawTarget<E>, E: Debug> Screen<DT, E> for PhotoFrameScreen<DT, E> {
    async fn draw_init(&mut self, display: &mut DT) {
        display.clear(config::COLOR_BACKGROUND).unwrap();

        if self.photo_count == 0 {
            let center = display.bounding_box().center();
            TINY_FONT
                .render_aligned(
                    "No photos found in",
                    center - Point::new(0, 12),
                    VerticalPosition::Center,
                    HorizontalAlignment::Center,
                    FontColor::Transparent(config::COLOR_HINT),
                    display,
                )
                .unwrap();
            TINY_FONT
                .render_aligned(
                    config::PHOTO_DIR,
                    center + Point::new(0, 12),
                    VerticalPosition::Center,
                    HorizontalAlignment::Center,
                    FontColor::Transparent(config::COLOR_TEXT),
                    display,
                )
                .unwrap();
        }
    }

    async fn draw_frame(&mut self, _display: &mut DT) {}
}
