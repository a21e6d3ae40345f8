//! SD card access behind the loaders the launcher needs.
//!
//! Every failure path degrades to "no data": a missing card, volume,
//! directory, or file leaves the target store empty. Nothing here is ever
//! written back.

use alloc::vec::Vec;

use app_calendar::io::copy_trimmed;
use app_calendar::{EventStore, LineSource, PhotoList, TaskList};
use embedded_sdmmc::{Mode, SdCard, TimeSource, Timestamp, VolumeIdx, VolumeManager};
use heapless::String;
use stm32f4xx_hal::gpio::{ErasedPin, Output};
use ufmt::uwrite;

pub const CALENDAR_FILE: &str = "CALENDAR.ICS";
pub const TASKS_FILE: &str = "TASKS.TXT";
pub const PHOTO_DIR: &str = "PHOTOS";
pub const ICON_DIR: &str = "ICONS";

/// Enough for a pre-sized 240x160 RGB565 photo.
pub const MAX_PHOTO_BYTES: usize = 80 * 1024;
pub const MAX_ICON_BYTES: usize = 24 * 1024;
const MAX_TASK_BYTES: usize = 8 * 1024;

const CHUNK: usize = 512;

/// The launcher never writes, so directory timestamps don't matter.
pub struct FixedTime;

impl TimeSource for FixedTime {
    fn get_timestamp(&self) -> Timestamp {
        Timestamp {
            year_since_1970: 56,
            zero_indexed_month: 1,
            zero_indexed_day: 8,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }
}

type Card = SdCard<config::SdSpiType, ErasedPin<Output>, config::SdDelayType>;
type Vm = VolumeManager<Card, FixedTime>;
type File<'a> = embedded_sdmmc::File<'a, Card, FixedTime, 4, 4, 1>;
type Directory<'a> = embedded_sdmmc::Directory<'a, Card, FixedTime, 4, 4, 1>;

pub struct SdStorage {
    vm: Vm,
}

impl SdStorage {
    pub fn new(spi: config::SdSpiType, cs: ErasedPin<Output>, delay: config::SdDelayType) -> Self {
        Self {
            vm: VolumeManager::new(SdCard::new(spi, cs, delay), FixedTime),
        }
    }

    /// Whether a card answers at all; shown on the welcome screen.
    pub fn is_mounted(&mut self) -> bool {
        self.vm.device().num_bytes().is_ok()
    }

    pub fn load_events(&mut self, store: &mut EventStore) {
        store.clear();
        let Ok(mut volume) = self.vm.open_volume(VolumeIdx(0)) else {
            return;
        };
        let Ok(mut root) = volume.open_root_dir() else {
            return;
        };
        let Ok(file) = root.open_file_in_dir(CALENDAR_FILE, Mode::ReadOnly) else {
            defmt::info!("storage: no {}", CALENDAR_FILE);
            return;
        };
        let mut lines = FileLines::new(file);
        store.reload(&mut lines);
        if store.truncated() {
            defmt::warn!("storage: event store full, records dropped");
        }
        defmt::info!("storage: {} events loaded", store.len());
    }

    pub fn load_tasks(&mut self, list: &mut TaskList) {
        list.clear();
        let Ok(mut volume) = self.vm.open_volume(VolumeIdx(0)) else {
            return;
        };
        let Ok(mut root) = volume.open_root_dir() else {
            return;
        };
        let Ok(mut file) = root.open_file_in_dir(TASKS_FILE, Mode::ReadOnly) else {
            defmt::info!("storage: no {}", TASKS_FILE);
            return;
        };
        if let Some(data) = read_all(&mut file, MAX_TASK_BYTES) {
            list.reload_from_json(&data);
        }
        defmt::info!("storage: {} tasks loaded", list.len());
    }

    pub fn load_photos(&mut self, list: &mut PhotoList) {
        list.clear();
        let Ok(mut volume) = self.vm.open_volume(VolumeIdx(0)) else {
            return;
        };
        let Ok(mut root) = volume.open_root_dir() else {
            return;
        };
        let Ok(mut dir) = root.open_dir(PHOTO_DIR) else {
            defmt::info!("storage: no {} directory", PHOTO_DIR);
            return;
        };
        let _ = dir.iterate_dir(|entry| {
            if entry.attributes.is_directory() {
                return;
            }
            let mut name = String::<16>::new();
            if core::fmt::write(&mut name, format_args!("{}", entry.name)).is_ok() {
                list.push(name.as_str());
            }
        });
        defmt::info!("storage: {} photos found", list.len());
    }

    /// Whole photo file, or None when absent or larger than the budget.
    pub fn read_photo(&mut self, name: &str) -> Option<Vec<u8>> {
        let mut volume = self.vm.open_volume(VolumeIdx(0)).ok()?;
        let mut root = volume.open_root_dir().ok()?;
        let mut dir = root.open_dir(PHOTO_DIR).ok()?;
        let mut file = dir.open_file_in_dir(name, Mode::ReadOnly).ok()?;
        read_all(&mut file, MAX_PHOTO_BYTES)
    }

    /// Dashboard icon `ICON1.BMP` .. `ICON8.BMP`.
    pub fn read_icon(&mut self, index: usize) -> Option<Vec<u8>> {
        let mut name = String::<16>::new();
        uwrite!(name, "ICON{}.BMP", index + 1).ok()?;
        let mut volume = self.vm.open_volume(VolumeIdx(0)).ok()?;
        let mut root = volume.open_root_dir().ok()?;
        let mut dir = root.open_dir(ICON_DIR).ok()?;
        let mut file = dir.open_file_in_dir(name.as_str(), Mode::ReadOnly).ok()?;
        read_all(&mut file, MAX_ICON_BYTES)
    }
}

fn read_all(file: &mut File<'_>, max_bytes: usize) -> Option<Vec<u8>> {
    let length = file.length() as usize;
    if length > max_bytes {
        defmt::warn!("storage: file of {} bytes over budget", length);
        return None;
    }
    let mut data = Vec::new();
    data.resize(length, 0);
    let mut filled = 0;
    while filled < length {
        match file.read(&mut data[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(_) => return None,
        }
    }
    data.truncate(filled);
    Some(data)
}

/// `LineSource` over an open file, pulling fixed chunks.
struct FileLines<'a> {
    file: File<'a>,
    chunk: [u8; CHUNK],
    len: usize,
    pos: usize,
    done: bool,
}

impl<'a> FileLines<'a> {
    fn new(file: File<'a>) -> Self {
        Self {
            file,
            chunk: [0; CHUNK],
            len: 0,
            pos: 0,
            done: false,
        }
    }

    fn next_byte(&mut self) -> Option<u8> {
        if self.pos >= self.len {
            if self.done {
                return None;
            }
            match self.file.read(&mut self.chunk) {
                Ok(n) if n > 0 => {
                    self.len = n;
                    self.pos = 0;
                }
                // read errors end the stream like a short file would
                _ => {
                    self.done = true;
                    return None;
                }
            }
        }
        let byte = self.chunk[self.pos];
        self.pos += 1;
        Some(byte)
    }
}

impl LineSource for FileLines<'_> {
    fn next_line<'b>(&mut self, buf: &'b mut [u8]) -> Option<&'b str> {
        let mut collected: heapless::Vec<u8, 256> = heapless::Vec::new();
        let mut saw_any = false;
        loop {
            match self.next_byte() {
                Some(b'\n') => {
                    saw_any = true;
                    break;
                }
                Some(byte) => {
                    saw_any = true;
                    // bytes past the buffer are dropped until the newline
                    let _ = collected.push(byte);
                }
                None => break,
            }
        }
        if !saw_any {
            return None;
        }
        let line = core::str::from_utf8(&collected).unwrap_or("");
        Some(copy_trimmed(line, buf))
    }
}
