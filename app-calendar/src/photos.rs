use heapless::{String, Vec};

use crate::event::push_str_lossy;

pub const MAX_PHOTOS: usize = 100;
pub const MAX_PHOTO_NAME: usize = 48;

/// How long a photo stays up before the slideshow moves on.
pub const SLIDE_INTERVAL_MS: u64 = 15_000;

/// Bounded list of photo file names found in the photo directory.
#[derive(Debug, Clone, Default)]
pub struct PhotoList {
    names: Vec<String<MAX_PHOTO_NAME>, MAX_PHOTOS>,
}

impl PhotoList {
    pub const fn new() -> Self {
        Self { names: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    /// Record a file if it looks like a photo. Returns false once the list
    /// is full or for non-photo files.
    pub fn push(&mut self, name: &str) -> bool {
        if !is_photo_name(name) {
            return false;
        }
        let mut owned = String::new();
        push_str_lossy(&mut owned, name);
        self.names.push(owned).is_ok()
    }

    pub fn names(&self) -> &[String<MAX_PHOTO_NAME>] {
        &self.names
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(|n| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn is_photo_name(name: &str) -> bool {
    let mut lower = String::<MAX_PHOTO_NAME>::new();
    for ch in name.chars() {
        if lower.push(ch.to_ascii_lowercase()).is_err() {
            return false;
        }
    }
    lower.ends_with(".bmp")
}

/// Slideshow sequencing: pseudo-random auto-advance on a fixed interval,
/// manual stepping wraps around and restarts the interval. Wall-clock
/// times come in from the caller, so the logic is testable without a
/// clock.
#[derive(Debug, Clone)]
pub struct Slideshow {
    current: Option<usize>,
    last_change_ms: u64,
    force_redraw: bool,
    rng: u32,
}

impl Slideshow {
    pub fn new(seed: u32) -> Self {
        Self {
            current: None,
            last_change_ms: 0,
            force_redraw: false,
            // xorshift must not start at zero
            rng: if seed == 0 { 0x9e37_79b9 } else { seed },
        }
    }

    /// Forget the current photo; the next poll starts the show over.
    pub fn reset(&mut self) {
        self.current = None;
        self.force_redraw = false;
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Decide whether a (new) photo should be drawn now. Returns the index
    /// to show, or None when the current photo stays up. Auto-advance
    /// picks a random index; manual navigation has already set one.
    pub fn poll(&mut self, count: usize, now_ms: u64) -> Option<usize> {
        if count == 0 {
            self.current = None;
            return None;
        }
        let elapsed = now_ms.saturating_sub(self.last_change_ms) >= SLIDE_INTERVAL_MS;
        let first = self.current.is_none();
        if !(first || elapsed || self.force_redraw) {
            return None;
        }
        self.force_redraw = false;
        if first || elapsed {
            self.current = Some(self.next_random(count));
        }
        self.last_change_ms = now_ms;
        self.current
    }

    /// Step forward, wrapping at the end; restarts the interval.
    pub fn next(&mut self, count: usize, now_ms: u64) {
        if count == 0 {
            return;
        }
        let next = match self.current {
            Some(i) if i + 1 < count => i + 1,
            _ => 0,
        };
        self.show(next, now_ms);
    }

    /// Step backward, wrapping at the start; restarts the interval.
    pub fn prev(&mut self, count: usize, now_ms: u64) {
        if count == 0 {
            return;
        }
        let prev = match self.current {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        };
        self.show(prev, now_ms);
    }

    fn show(&mut self, index: usize, now_ms: u64) {
        self.current = Some(index);
        self.last_change_ms = now_ms;
        self.force_redraw = true;
    }

    fn next_random(&mut self, count: usize) -> usize {
        // xorshift32; plenty for picking the next slide
        let mut x = self.rng;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng = x;
        x as usize % count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_list_filters_extensions() {
        let mut list = PhotoList::new();
        assert!(list.push("HOLIDAY.BMP"));
        assert!(list.push("cat.bmp"));
        assert!(!list.push("NOTES.TXT"));
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0), Some("HOLIDAY.BMP"));
    }

    #[test]
    fn test_photo_list_bounded() {
        let mut list = PhotoList::new();
        for _ in 0..MAX_PHOTOS {
            assert!(list.push("A.BMP"));
        }
        assert!(!list.push("B.BMP"));
        assert_eq!(list.len(), MAX_PHOTOS);
    }

    #[test]
    fn test_poll_shows_first_photo_immediately() {
        let mut show = Slideshow::new(7);
        let shown = show.poll(5, 1_000);
        assert!(shown.is_some());
        // nothing new until the interval elapses
        assert_eq!(show.poll(5, 2_000), None);
        assert!(show.poll(5, 1_000 + SLIDE_INTERVAL_MS).is_some());
    }

    #[test]
    fn test_poll_with_no_photos() {
        let mut show = Slideshow::new(7);
        assert_eq!(show.poll(0, 1_000), None);
        assert_eq!(show.current(), None);
    }

    #[test]
    fn test_manual_navigation_wraps() {
        let mut show = Slideshow::new(7);
        show.poll(3, 0);
        show.next(3, 10);
        show.next(3, 20);
        show.next(3, 30);
        show.next(3, 40);
        // four steps over three photos must have wrapped through 0
        assert!(show.current().unwrap() < 3);

        let mut show = Slideshow::new(7);
        show.prev(3, 0);
        assert_eq!(show.current(), Some(2));
    }

    #[test]
    fn test_manual_step_forces_redraw_and_restarts_interval() {
        let mut show = Slideshow::new(7);
        show.poll(4, 0);
        show.next(4, 5_000);
        let idx = show.current();
        // the forced index is reported exactly once
        assert_eq!(show.poll(4, 5_001), idx);
        assert_eq!(show.poll(4, 5_002), None);
        // interval counts from the manual step, not from the first photo
        assert_eq!(show.poll(4, 15_001), None);
        assert!(show.poll(4, 5_000 + SLIDE_INTERVAL_MS).is_some());
    }

    #[test]
    fn test_random_indices_stay_in_range() {
        let mut show = Slideshow::new(12345);
        for step in 0..50u64 {
            let idx = show
                .poll(7, step * SLIDE_INTERVAL_MS + SLIDE_INTERVAL_MS)
                .unwrap();
            assert!(idx < 7);
        }
    }
}
