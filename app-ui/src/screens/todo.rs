use core::fmt::Debug;

use app_calendar::TaskList;
use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::{Line, PrimitiveStyleBuilder, Rectangle, StyledDrawable};
use heapless::String;
use u8g2_fonts::types::{FontColor, HorizontalAlignment, VerticalPosition};

use super::Screen;
use crate::fonts::{SMALL_FONT, TINIER_FONT, TINY_FONT};
use crate::format::write_task_range;
use crate::{config, AppDrawTarget};

/// Rows that fit between the header and the bottom hint area.
pub fn visible_tasks(display_height: u32) -> usize {
    ((display_height - config::TASK_LIST_TOP - config::TASK_LIST_BOTTOM_RESERVE)
        / config::TASK_ROW_HEIGHT) as usize
}

pub struct TodoScreen<DT, E> {
    tasks: TaskList,
    scroll: usize,
    _phantom: core::marker::PhantomData<(DT, E)>,
}

impl<DT, E> TodoScreen<DT, E> {
    pub fn new(tasks: TaskList, scroll: usize) -> Self {
        Self {
            tasks,
            scroll,
            _phantom: core::marker::PhantomData,
        }
    }
}

impl<DT: AppDrawTarget<E>, E: Debug> Screen<DT, E> for TodoScreen<DT, E> {
    async fn draw_init(&mut self, display: &mut DT) {
        display.clear(config::COLOR_BACKGROUND).unwrap();

        let width = display.bounding_box().size.width;
        let height = display.bounding_box().size.height;
        let center_x = width as i32 / 2;

        SMALL_FONT
            .render_aligned(
                "To-Do List",
                Point::new(center_x, 6),
                VerticalPosition::Top,
                HorizontalAlignment::Center,
                FontColor::Transparent(config::COLOR_TEXT),
                display,
            )
            .unwrap();

        if self.tasks.is_empty() {
            TINY_FONT
                .render_aligned(
                    "No tasks found",
                    Point::new(center_x, height as i32 / 2),
                    VerticalPosition::Center,
                    HorizontalAlignment::Center,
                    FontColor::Transparent(config::COLOR_HINT),
                    display,
                )
                .unwrap();
        } else {
            self.draw_rows(display);
        }

        TINIER_FONT
            .render_aligned(
                "Left: Scroll Up | Right: Scroll Down | Top-left: Exit",
                Point::new(center_x, height as i32 - 14),
                VerticalPosition::Top,
                HorizontalAlignment::Center,
                FontColor::Transparent(config::COLOR_HINT),
                display,
            )
            .unwrap();
    }

    async fn draw_frame(&mut self, _display: &mut DT) {}
}

impl<DT: AppDrawTarget<E>, E: Debug> TodoScreen<DT, E> {
    fn draw_rows(&self, display: &mut DT) {
        let width = display.bounding_box().size.width;
        let height = display.bounding_box().size.height;
        let visible = visible_tasks(height);
        let total = self.tasks.len();

        let checkbox_border = PrimitiveStyleBuilder::new()
            .stroke_color(config::COLOR_TEXT)
            .stroke_width(1)
            .build();
        let separator = PrimitiveStyleBuilder::new()
            .stroke_color(config::COLOR_GRID)
            .stroke_width(1)
            .build();

        let first = self.scroll.min(total.saturating_sub(1));
        let last = (first + visible).min(total);

        for (row, task) in self.tasks.tasks()[first..last].iter().enumerate() {
            let row_y = (config::TASK_LIST_TOP + row as u32 * config::TASK_ROW_HEIGHT) as i32;

            let checkbox = Rectangle::new(
                Point::new(config::TASK_CHECKBOX_X, row_y + 10),
                Size::new(config::TASK_CHECKBOX_SIZE, config::TASK_CHECKBOX_SIZE),
            );
            checkbox.draw_styled(&checkbox_border, display).unwrap();
            if task.completed {
                display
                    .fill_solid(
                        &Rectangle::new(
                            checkbox.top_left + Point::new(3, 3),
                            Size::new(
                                config::TASK_CHECKBOX_SIZE - 6,
                                config::TASK_CHECKBOX_SIZE - 6,
                            ),
                        ),
                        config::COLOR_CHECKBOX_FILL,
                    )
                    .unwrap();
            }

            let text_color = if task.completed {
                config::COLOR_TASK_DONE
            } else {
                config::COLOR_TEXT
            };
            let mut title = String::<40>::new();
            if task.title.chars().count() > config::TASK_TITLE_CHARS {
                for ch in task.title.chars().take(config::TASK_TITLE_CHARS) {
                    let _ = title.push(ch);
                }
                let _ = title.push_str("...");
            } else {
                let _ = title.push_str(task.title.as_str());
            }
            TINY_FONT
                .render(
                    title.as_str(),
                    Point::new(
                        config::TASK_CHECKBOX_X + config::TASK_CHECKBOX_SIZE as i32 + 10,
                        row_y + 12,
                    ),
                    VerticalPosition::Top,
                    FontColor::Transparent(text_color),
                    display,
                )
                .unwrap();

            let sep_y = row_y + config::TASK_ROW_HEIGHT as i32 - 2;
            Line::new(Point::new(10, sep_y), Point::new(width as i32 - 10, sep_y))
                .draw_styled(&separator, display)
                .unwrap();
        }

        if total > visible {
            let mut range = String::<24>::new();
            write_task_range(&mut range, first + 1, last, total);
            TINIER_FONT
                .render_aligned(
                    range.as_str(),
                    Point::new(width as i32 / 2, height as i32 - 26),
                    VerticalPosition::Top,
                    HorizontalAlignment::Center,
                    FontColor::Transparent(config::COLOR_HINT),
                    display,
                )
                .unwrap();
        }
    }
}
