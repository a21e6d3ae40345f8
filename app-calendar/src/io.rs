/// Pull-based source of text lines.
///
/// Implementations wrap whatever storage the platform has: a FAT file on
/// the device, a string fixture in tests. Lines come back with surrounding
/// whitespace (including `\r`) trimmed. A read error ends the stream, so
/// the caller sees the same thing as a short file and degrades to an empty
/// data set.
pub trait LineSource {
    /// Read the next line into `buf`, returning the trimmed text, or
    /// `None` at end of stream. Lines longer than `buf` are cut at the
    /// nearest character boundary.
    fn next_line<'a>(&mut self, buf: &'a mut [u8]) -> Option<&'a str>;
}

/// `LineSource` over an in-memory string.
pub struct StrLineSource<'s> {
    rest: &'s str,
}

impl<'s> StrLineSource<'s> {
    pub fn new(text: &'s str) -> Self {
        Self { rest: text }
    }
}

impl LineSource for StrLineSource<'_> {
    fn next_line<'a>(&mut self, buf: &'a mut [u8]) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let (line, rest) = match self.rest.find('\n') {
            Some(i) => (&self.rest[..i], &self.rest[i + 1..]),
            None => (self.rest, ""),
        };
        self.rest = rest;
        Some(copy_trimmed(line, buf))
    }
}

/// Trim `line` and copy it into `buf`, cutting at a char boundary if the
/// buffer is shorter than the line.
pub fn copy_trimmed<'a>(line: &str, buf: &'a mut [u8]) -> &'a str {
    let line = line.trim();
    let mut end = line.len().min(buf.len());
    while end > 0 && !line.is_char_boundary(end) {
        end -= 1;
    }
    buf[..end].copy_from_slice(&line.as_bytes()[..end]);
    // the slice was cut on a char boundary, so this cannot fail
    core::str::from_utf8(&buf[..end]).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_are_split_and_trimmed() {
        let mut src = StrLineSource::new("first\r\n  second  \nthird");
        let mut buf = [0u8; 64];
        assert_eq!(src.next_line(&mut buf), Some("first"));
        assert_eq!(src.next_line(&mut buf), Some("second"));
        assert_eq!(src.next_line(&mut buf), Some("third"));
        assert_eq!(src.next_line(&mut buf), None);
    }

    #[test]
    fn test_long_line_cut_at_char_boundary() {
        let mut src = StrLineSource::new("abcd\u{00e9}f");
        let mut buf = [0u8; 5];
        // the two-byte e-acute does not fit after "abcd"
        assert_eq!(src.next_line(&mut buf), Some("abcd"));
    }

    #[test]
    fn test_empty_input() {
        let mut src = StrLineSource::new("");
        let mut buf = [0u8; 8];
        assert_eq!(src.next_line(&mut buf), None);
    }
}
