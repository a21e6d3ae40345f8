use app_ui::HintRefresh;
use display_interface_spi::SPIInterfaceNoCS;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::Dimensions;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::Pixel;
use embedded_hal::blocking::delay::DelayUs;
use mipidsi::models::ILI9486Rgb565;
use stm32f4xx_hal::gpio::{ErasedPin, Output};

pub trait DisplayInterface: embedded_hal::blocking::spi::Write<u8> {}
impl<W: embedded_hal::blocking::spi::Write<u8>> DisplayInterface for W {}

pub struct Display<DI: DisplayInterface> {
    inner: mipidsi::Display<SPIInterfaceNoCS<DI, ErasedPin<Output>>, ILI9486Rgb565, ErasedPin<Output>>,
    backlight_pin: ErasedPin<Output>,
}

impl<DI: DisplayInterface> Display<DI> {
    pub fn new<Delay: DelayUs<u32>>(
        spi: DI,
        dc_pin: ErasedPin<Output>,
        rst_pin: ErasedPin<Output>,
        backlight_pin: ErasedPin<Output>,
        delay: &mut Delay,
    ) -> Self {
        let di = SPIInterfaceNoCS::new(spi, dc_pin);
        let display = mipidsi::Builder::ili9486_rgb565(di)
            .with_display_size(320, 480)
            .with_orientation(mipidsi::Orientation::Landscape(false))
            .with_invert_colors(mipidsi::ColorInversion::Normal)
            .init(delay, Some(rst_pin))
            .unwrap();
        Display {
            inner: display,
            backlight_pin,
        }
    }

    pub fn backlight_on(&mut self) {
        self.backlight_pin.set_high();
    }

    pub fn backlight_off(&mut self) {
        self.backlight_pin.set_low();
    }

    /// Clear without the wipe being visible.
    pub fn sneaky_clear(&mut self, color: Rgb565) {
        self.backlight_off();
        self.inner.clear(color).unwrap();
        self.backlight_on();
    }

    pub fn height(&self) -> u32 {
        self.bounding_box().size.height
    }

    pub fn width(&self) -> u32 {
        self.bounding_box().size.width
    }
}

impl<DI: DisplayInterface> Dimensions for Display<DI> {
    fn bounding_box(&self) -> Rectangle {
        self.inner.bounding_box()
    }
}

impl<DI: DisplayInterface> DrawTarget for Display<DI> {
    type Color = Rgb565;
    type Error = mipidsi::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.inner.draw_iter(pixels)
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.inner.fill_contiguous(area, colors)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.inner.fill_solid(area, color)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.inner.fill_solid(&self.bounding_box(), color)
    }
}

impl<DI: DisplayInterface> HintRefresh for Display<DI> {
    fn hint_refresh(&mut self) {}
}
