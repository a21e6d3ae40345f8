#![no_std]

pub use {display_interface_spi, fugit, stm32f4xx_hal as hal};

#[macro_use]
mod macros;

// Peripheral allocation
// SPI1 -> display
// SPI2 -> SD card
// I2C1 -> touch controller
// TIM3 -> display init delay
// TIM5 -> SD card delay

pub const SYSCLK: u32 = 168_000_000;
pub const HCLK: u32 = 168_000_000;

pub const DISPLAY_SPI_FREQ_HZ: u32 = 24_000_000;
pub const SD_SPI_FREQ_HZ: u32 = 8_000_000;
pub const TOUCH_I2C_FREQ_HZ: u32 = 100_000;

pub const DISPLAY_WIDTH: u16 = 480;
pub const DISPLAY_HEIGHT: u16 = 320;

pub type DisplaySpiType = Spi<SPI1>;
pub type SdSpiType = Spi<SPI2>;
pub type TouchI2cType = I2c<I2C1>;
pub type SdDelayType = DelayUs<TIM5>;

#[macro_export]
macro_rules! setup_clocks {
    ($dp:expr) => {{
        use $crate::hal::prelude::*;
        let rcc = $dp.RCC.constrain();
        rcc.cfgr
            .use_hse(8.MHz())
            .sysclk($crate::SYSCLK.Hz())
            .hclk($crate::HCLK.Hz())
            .pclk1(42.MHz())
            .pclk2(84.MHz())
            .freeze()
    }};
}

#[macro_export]
macro_rules! setup_display_spi {
    ($dp:expr, $gpio:expr, $clocks:expr) => {{
        use $crate::fugit::RateExtU32;
        use $crate::hal::gpio::Speed;
        use $crate::hal::spi::Spi;

        let mut sclk_pin = $crate::display_sclk_pin!($gpio).into_alternate();
        let mut miso_pin = $crate::display_miso_pin!($gpio).into_alternate();
        let mut mosi_pin = $crate::display_mosi_pin!($gpio).into_alternate();
        sclk_pin.set_speed(Speed::VeryHigh);
        miso_pin.set_speed(Speed::VeryHigh);
        mosi_pin.set_speed(Speed::VeryHigh);

        Spi::new(
            $dp.SPI1,
            (sclk_pin, miso_pin, mosi_pin),
            embedded_hal::spi::MODE_0,
            $crate::DISPLAY_SPI_FREQ_HZ.Hz(),
            &$clocks,
        )
    }};
}

#[macro_export]
macro_rules! setup_sd_spi {
    ($dp:expr, $gpio:expr, $clocks:expr) => {{
        use $crate::fugit::RateExtU32;
        use $crate::hal::spi::Spi;

        let sclk_pin = $crate::sd_sclk_pin!($gpio).into_alternate();
        let miso_pin = $crate::sd_miso_pin!($gpio).into_alternate();
        let mosi_pin = $crate::sd_mosi_pin!($gpio).into_alternate();

        Spi::new(
            $dp.SPI2,
            (sclk_pin, miso_pin, mosi_pin),
            embedded_hal::spi::MODE_0,
            $crate::SD_SPI_FREQ_HZ.Hz(),
            &$clocks,
        )
    }};
}

#[macro_export]
macro_rules! setup_touch_i2c {
    ($dp:expr, $gpio:expr, $clocks:expr) => {{
        use $crate::fugit::RateExtU32;
        use $crate::hal::i2c::{I2c, Mode};

        let scl_pin = $crate::touch_scl_pin!($gpio).into_alternate_open_drain();
        let sda_pin = $crate::touch_sda_pin!($gpio).into_alternate_open_drain();

        I2c::new(
            $dp.I2C1,
            (scl_pin, sda_pin),
            Mode::Standard {
                frequency: $crate::TOUCH_I2C_FREQ_HZ.Hz(),
            },
            &$clocks,
        )
    }};
}

#[macro_export]
macro_rules! display_delay_timer {
    ($dp:expr) => {
        $dp.TIM3
    };
}

#[macro_export]
macro_rules! sd_delay_timer {
    ($dp:expr) => {
        $dp.TIM5
    };
}

pub struct AllGpio {
    pub a: hal::gpio::gpioa::Parts,
    pub b: hal::gpio::gpiob::Parts,
    pub c: hal::gpio::gpioc::Parts,
}

pin_macro!($ display_dc_pin, a, pa8);
pin_macro!($ display_rst_pin, b, pb5);
pin_macro!($ display_sclk_pin, a, pa5);
pin_macro!($ display_miso_pin, a, pa6);
pin_macro!($ display_mosi_pin, a, pa7);
pin_macro!($ display_backlight_pin, b, pb9);

pin_macro!($ sd_sclk_pin, b, pb13);
pin_macro!($ sd_miso_pin, b, pb14);
pin_macro!($ sd_mosi_pin, b, pb15);
pin_macro!($ sd_cs_pin, b, pb12);

pin_macro!($ touch_scl_pin, b, pb6);
pin_macro!($ touch_sda_pin, b, pb7);

pin_macro!($ led_pin, c, pc13);

use hal::i2c::I2c;
use hal::pac::{I2C1, SPI1, SPI2, TIM5};
use hal::spi::Spi;
use hal::timer::DelayUs;
