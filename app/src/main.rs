#![no_std]
#![no_main]

extern crate alloc;

use defmt_rtt as _;
use embedded_alloc::Heap;

mod display;
mod panic;
mod storage;
mod touch;

#[global_allocator]
static HEAP: Heap = Heap::empty();

#[rtic::app(device = config::hal::pac, peripherals = true, dispatchers = [SPI4])]
mod app {
    use core::cell::UnsafeCell;

    use app_calendar::{plan_week, Date, EventStore, PhotoList, Slideshow, TaskList};
    use app_ui::nav::{self, NavAction, NavState, ScreenId};
    use app_ui::{
        config as ui, visible_tasks, week_geometry, AppStubScreen, CalendarScreen,
        DashboardScreen, PhotoFrameScreen, Screen, Screens, TodoScreen, WelcomeScreen,
    };
    use config::{self as hw, hal, AllGpio};
    use cortex_m::peripheral::DWT;
    use embedded_graphics::geometry::{Dimensions, OriginDimensions, Point, Size};
    use embedded_graphics::image::Image;
    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_graphics::Drawable;
    use fugit::ExtU32;
    use hal::gpio::Speed;
    use hal::prelude::*;
    use mipidsi::Error as MipidsiError;
    use rtic_monotonics::systick::Systick;
    use rtic_monotonics::{create_systick_token, Monotonic};
    use tinybmp::Bmp;

    use crate::display::Display;
    use crate::panic::set_panic_display_ref;
    use crate::storage::SdStorage;
    use crate::touch::TouchPanel;

    pub type DisplayType = Display<hw::DisplaySpiType>;

    /// The fixed "today" the calendar is anchored to.
    const TODAY: Date = Date::new(2026, 2, 9);

    const HEAP_SIZE: usize = 88 * 1024;

    #[shared]
    struct Shared {
        display: UnsafeCell<DisplayType>,
    }

    #[local]
    struct Local {
        touch: TouchPanel<hw::TouchI2cType>,
        storage: SdStorage,
    }

    #[init]
    fn init(mut cx: init::Context) -> (Shared, Local) {
        let dp: hal::pac::Peripherals = cx.device;

        {
            use core::mem::MaybeUninit;
            static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] =
                [MaybeUninit::uninit(); HEAP_SIZE];
            unsafe {
                crate::HEAP.init(core::ptr::addr_of_mut!(HEAP_MEM) as usize, HEAP_SIZE)
            }
        }

        let gpio = AllGpio {
            a: dp.GPIOA.split(),
            b: dp.GPIOB.split(),
            c: dp.GPIOC.split(),
        };

        let mut led_pin = hw::led_pin!(gpio).into_push_pull_output();
        let mut backlight_pin = hw::display_backlight_pin!(gpio).into_push_pull_output();
        backlight_pin.set_low();

        let clocks = config::setup_clocks!(dp);

        cx.core.DCB.enable_trace();
        cx.core.DWT.enable_cycle_counter();

        let systick_token = create_systick_token!();
        Systick::start(cx.core.SYST, hw::SYSCLK, systick_token);

        let mut delay = config::display_delay_timer!(dp).delay_us(&clocks);

        let mut display = {
            let mut dc_pin = hw::display_dc_pin!(gpio).into_push_pull_output();
            let mut rst_pin = hw::display_rst_pin!(gpio).into_push_pull_output();
            dc_pin.set_speed(Speed::VeryHigh);
            rst_pin.set_speed(Speed::VeryHigh);
            let spi = config::setup_display_spi!(dp, gpio, clocks);

            Display::new(
                spi,
                dc_pin.erase(),
                rst_pin.erase(),
                backlight_pin.erase(),
                &mut delay,
            )
        };

        display.sneaky_clear(Rgb565::BLACK);

        let touch = TouchPanel::new(config::setup_touch_i2c!(dp, gpio, clocks));

        let storage = {
            let spi = config::setup_sd_spi!(dp, gpio, clocks);
            let cs_pin = hw::sd_cs_pin!(gpio).into_push_pull_output();
            let sd_delay = config::sd_delay_timer!(dp).delay_us(&clocks);
            SdStorage::new(spi, cs_pin.erase(), sd_delay)
        };

        display_task::spawn().unwrap();
        led_pin.set_low();

        (
            Shared {
                display: UnsafeCell::new(display),
            },
            Local { touch, storage },
        )
    }

    fn now_ms() -> u64 {
        (Systick::now() - <Systick as Monotonic>::ZERO).to_millis() as u64
    }

    /// The whole launcher: one cooperative loop that polls touch input,
    /// updates navigation state, and redraws. Event/task/photo stores are
    /// rebuilt when their screen is entered, never patched in place.
    #[task(
        shared = [display],
        local = [
            touch,
            storage,
            events: EventStore = EventStore::new(),
            tasks: TaskList = TaskList::new(),
            photos: PhotoList = PhotoList::new(),
        ],
        priority = 1
    )]
    async fn display_task(mut cx: display_task::Context) {
        // Only shared with the panic handler, which never returns
        let display = unsafe { cx.shared.display.lock(|d| &mut *d.get()) };
        let touch = cx.local.touch;
        let storage = cx.local.storage;

        let size = display.bounding_box().size;
        let storage_ok = storage.is_mounted();
        defmt::info!("storage mounted: {}", storage_ok);

        let mut nav = NavState::new();
        let mut shown = nav;
        let mut slideshow = Slideshow::new(DWT::cycle_count());
        let mut icons_pending = false;

        let mut screen: Screens<DisplayType, MipidsiError> =
            WelcomeScreen::new(storage_ok).into();
        screen.draw_init(display).await;

        loop {
            let now = Systick::now();

            if let Some(point) = touch.poll_press() {
                if let Some(action) = nav::handle_tap(nav.screen, size, point) {
                    nav.apply(action, cx.local.tasks.len(), visible_tasks(size.height));
                    match action {
                        NavAction::PrevPhoto => slideshow.prev(cx.local.photos.len(), now_ms()),
                        NavAction::NextPhoto => slideshow.next(cx.local.photos.len(), now_ms()),
                        _ => (),
                    }
                }
            }

            if nav != shown {
                let entering = nav.screen != shown.screen;
                screen = match nav.screen {
                    ScreenId::Welcome => WelcomeScreen::new(storage.is_mounted()).into(),
                    ScreenId::Dashboard => {
                        icons_pending = true;
                        DashboardScreen::default().into()
                    }
                    ScreenId::Calendar => {
                        if entering {
                            storage.load_events(cx.local.events);
                        }
                        let plan = plan_week(
                            cx.local.events.events(),
                            TODAY,
                            nav.week_offset,
                            &week_geometry(size),
                        );
                        CalendarScreen::new(plan).into()
                    }
                    ScreenId::Todo => {
                        if entering {
                            storage.load_tasks(cx.local.tasks);
                        }
                        TodoScreen::new(cx.local.tasks.clone(), nav.task_scroll).into()
                    }
                    ScreenId::PhotoFrame => {
                        if entering {
                            storage.load_photos(cx.local.photos);
                            slideshow.reset();
                        }
                        PhotoFrameScreen::new(cx.local.photos.len()).into()
                    }
                    stub => AppStubScreen::new(stub.label()).into(),
                };
                screen.draw_init(display).await;
                shown = nav;
            }

            if icons_pending && matches!(screen, Screens::Dashboard(_)) {
                draw_dashboard_icons(display, storage, size);
                icons_pending = false;
            }

            if matches!(screen, Screens::PhotoFrame(_)) && !cx.local.photos.is_empty() {
                if let Some(index) = slideshow.poll(cx.local.photos.len(), now_ms()) {
                    if let Some(name) = cx.local.photos.get(index) {
                        draw_photo(display, storage, name, size);
                    }
                }
            }

            screen.draw_frame(display).await;

            Systick::delay_until(now + 25.millis()).await;
        }
    }

    /// Overlay BMP icons from storage on the dashboard grid. Cells whose
    /// icon file is missing keep the plain border drawn by the screen.
    fn draw_dashboard_icons(display: &mut DisplayType, storage: &mut SdStorage, size: Size) {
        for (index, rect) in nav::icon_rects(size).iter().enumerate() {
            let Some(data) = storage.read_icon(index) else {
                continue;
            };
            let Ok(bmp) = Bmp::<Rgb565>::from_slice(&data) else {
                defmt::warn!("icon {} is not a usable BMP", index);
                continue;
            };
            let bmp_size = bmp.size();
            // center above the label band at the cell bottom
            let inner_h = rect.size.height.saturating_sub(32);
            let x = rect.top_left.x + (rect.size.width.saturating_sub(bmp_size.width) / 2) as i32;
            let y = rect.top_left.y + (inner_h.saturating_sub(bmp_size.height) / 2) as i32;
            let _ = Image::new(&bmp, Point::new(x, y)).draw(display);
        }
    }

    fn draw_photo(display: &mut DisplayType, storage: &mut SdStorage, name: &str, size: Size) {
        let Some(data) = storage.read_photo(name) else {
            return;
        };
        let Ok(bmp) = Bmp::<Rgb565>::from_slice(&data) else {
            defmt::warn!("photo {} is not a usable BMP", name);
            return;
        };
        display.clear(ui::COLOR_BACKGROUND).unwrap();
        let bmp_size = bmp.size();
        let x = (size.width.saturating_sub(bmp_size.width) / 2) as i32;
        let y = (size.height.saturating_sub(bmp_size.height) / 2) as i32;
        let _ = Image::new(&bmp, Point::new(x, y)).draw(display);
    }

    #[idle(shared = [display])]
    fn idle(mut cx: idle::Context) -> ! {
        cx.shared.display.lock(|display| {
            set_panic_display_ref(display);
        });

        loop {
            rtic::export::wfi()
        }
    }
}
