use core::fmt::Debug;

use app_calendar::week::{WeekGeometry, WeekPlan};
use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::{PrimitiveStyleBuilder, Rectangle, StyledDrawable};
use heapless::String;
use u8g2_fonts::types::{FontColor, HorizontalAlignment, VerticalPosition};

use super::Screen;
use crate::fonts::{SMALL_FONT, TINIER_FONT, TINY_FONT};
use crate::format::{write_day_label, write_hhmm};
use crate::{config, AppDrawTarget};

/// Geometry handed to the week planner for this display. Cell height is
/// whatever is left between header and footer, split across 7 rows.
pub fn week_geometry(size: Size) -> WeekGeometry {
    let cell_height =
        (size.height - config::WEEK_HEADER_HEIGHT - config::WEEK_FOOTER_HEIGHT) / 7;
    WeekGeometry {
        cell_width: size.width,
        cell_height,
        event_origin_x: config::EVENT_ORIGIN_X,
        event_origin_y: config::EVENT_ORIGIN_Y,
        line_height: config::EVENT_LINE_HEIGHT,
        wrap_margin: config::EVENT_WRAP_MARGIN,
        time_advance: config::EVENT_TIME_ADVANCE,
        event_advance: config::EVENT_ADVANCE,
        title_chars: config::EVENT_TITLE_CHARS,
    }
}

/// Renders a computed `WeekPlan` verbatim; all layout decisions were made
/// by the planner.
pub struct CalendarScreen<DT, E> {
    pub plan: WeekPlan,
    _phantom: core::marker::PhantomData<(DT, E)>,
}

impl<DT, E> CalendarScreen<DT, E> {
    pub fn new(plan: WeekPlan) -> Self {
        Self {
            plan,
            _phantom: core::marker::PhantomData,
        }
    }
}

impl<DT: AppDrawTarget<E>, E: Debug> Screen<DT, E> for CalendarScreen<DT, E> {
    async fn draw_init(&mut self, display: &mut DT) {
        display.clear(config::COLOR_BACKGROUND).unwrap();

        let width = display.bounding_box().size.width;
        let height = display.bounding_box().size.height;
        let cell_height = week_geometry(display.bounding_box().size).cell_height;

        SMALL_FONT
            .render_aligned(
                self.plan.header.as_str(),
                Point::new(width as i32 / 2, 6),
                VerticalPosition::Top,
                HorizontalAlignment::Center,
                FontColor::Transparent(config::COLOR_TEXT),
                display,
            )
            .unwrap();

        let border = PrimitiveStyleBuilder::new()
            .stroke_color(config::COLOR_GRID)
            .stroke_width(1)
            .build();

        for (row, day) in self.plan.days.iter().enumerate() {
            let y = (config::WEEK_HEADER_HEIGHT + row as u32 * cell_height) as i32;

            if day.is_today {
                display
                    .fill_solid(
                        &Rectangle::new(
                            Point::new(2, y + 2),
                            Size::new(width - 4, cell_height - 4),
                        ),
                        config::COLOR_TODAY_FILL,
                    )
                    .unwrap();
            }

            let mut label = String::<16>::new();
            write_day_label(&mut label, day.date);
            TINY_FONT
                .render(
                    label.as_str(),
                    Point::new(10, y + 5),
                    VerticalPosition::Top,
                    FontColor::Transparent(config::COLOR_TEXT),
                    display,
                )
                .unwrap();

            for slot in day.slots.iter() {
                let slot_y = y + slot.y as i32;
                if let Some(time) = slot.time {
                    let mut text = String::<8>::new();
                    write_hhmm(&mut text, time);
                    TINIER_FONT
                        .render(
                            text.as_str(),
                            Point::new(slot.x as i32, slot_y),
                            VerticalPosition::Top,
                            FontColor::Transparent(config::COLOR_EVENT_TIME),
                            display,
                        )
                        .unwrap();
                }
                TINIER_FONT
                    .render(
                        slot.title.as_str(),
                        Point::new(slot.title_x as i32, slot_y),
                        VerticalPosition::Top,
                        FontColor::Transparent(config::COLOR_EVENT_TITLE),
                        display,
                    )
                    .unwrap();
            }

            Rectangle::new(Point::new(0, y), Size::new(width, cell_height))
                .draw_styled(&border, display)
                .unwrap();
        }

        TINIER_FONT
            .render_aligned(
                "< Prev Week | Next Week > | Tap top-left to exit",
                Point::new(width as i32 / 2, height as i32 - 14),
                VerticalPosition::Top,
                HorizontalAlignment::Center,
                FontColor::Transparent(config::COLOR_HINT),
                display,
            )
            .unwrap();
    }

    async fn draw_frame(&mut self, _display: &mut DT) {}
}
