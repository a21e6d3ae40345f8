//! Minimal FT6x36 capacitive touch driver.
//!
//! The panel is polled from the control loop; only the first touch point
//! is read, and only the press edge is reported. The controller is wired
//! in portrait orientation, so coordinates are rotated to match the
//! landscape display.

use embedded_graphics::geometry::Point;
use embedded_hal::blocking::i2c::WriteRead;

const FT6X36_ADDR: u8 = 0x38;
const REG_TD_STATUS: u8 = 0x02;
const REG_P1_XH: u8 = 0x03;

pub struct TouchPanel<I2C> {
    i2c: I2C,
    was_down: bool,
}

impl<I2C: WriteRead> TouchPanel<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            was_down: false,
        }
    }

    fn read_raw(&mut self) -> Option<(u16, u16)> {
        let mut status = [0u8; 1];
        self.i2c
            .write_read(FT6X36_ADDR, &[REG_TD_STATUS], &mut status)
            .ok()?;
        if status[0] & 0x0f == 0 {
            return None;
        }
        let mut data = [0u8; 4];
        self.i2c
            .write_read(FT6X36_ADDR, &[REG_P1_XH], &mut data)
            .ok()?;
        let x = ((data[0] as u16 & 0x0f) << 8) | data[1] as u16;
        let y = ((data[2] as u16 & 0x0f) << 8) | data[3] as u16;
        Some((x, y))
    }

    /// Press edge in display coordinates, or None while idle or held.
    pub fn poll_press(&mut self) -> Option<Point> {
        match self.read_raw() {
            Some((x, y)) => {
                let pressed = !self.was_down;
                self.was_down = true;
                if pressed {
                    Some(map_to_landscape(x, y))
                } else {
                    None
                }
            }
            None => {
                self.was_down = false;
                None
            }
        }
    }
}

fn map_to_landscape(x: u16, y: u16) -> Point {
    let x = x.min(config::DISPLAY_HEIGHT - 1);
    let y = y.min(config::DISPLAY_WIDTH - 1);
    Point::new(y as i32, (config::DISPLAY_HEIGHT - 1 - x) as i32)
}
