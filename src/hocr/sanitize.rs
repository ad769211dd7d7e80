//! Filtering decode layer for noisy hOCR streams.
//!
//! OCR engines occasionally leak control bytes or broken encodings into
//! their hOCR output, which a strict XML parser rejects outright. The
//! [`SanitizingReader`] scrubs every byte that is not part of a well-formed
//! UTF-8 encoding of an XML 1.0 `Char` into an ASCII space, in place, so a
//! forward-only parser can tolerate the noise. Byte run length and stream
//! position are preserved.

use std::io::{self, Read};

/// Maximum bytes of an unfinished UTF-8 sequence carried between reads.
const MAX_CARRY: usize = 3;

/// A [`Read`] adapter that replaces invalid markup characters with spaces.
pub struct SanitizingReader<R> {
    inner: R,
    carry: [u8; MAX_CARRY],
    carry_len: usize,
}

impl<R: Read> SanitizingReader<R> {
    /// Wrap a raw source.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            carry: [0; MAX_CARRY],
            carry_len: 0,
        }
    }
}

impl<R: Read> Read for SanitizingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        // Replay bytes held back from the previous call.
        let held = self.carry_len.min(buf.len());
        buf[..held].copy_from_slice(&self.carry[..held]);
        self.carry.copy_within(held..self.carry_len, 0);
        self.carry_len -= held;

        let mut len = held;
        loop {
            let read = self.inner.read(&mut buf[len..])?;
            len += read;
            if len == 0 {
                return Ok(0);
            }

            // A multi-byte sequence cut off at the end of this chunk is held
            // back and completed on the next call; at EOF it is scrubbed.
            let keep = if read > 0 {
                trailing_incomplete(&buf[..len])
            } else {
                0
            };

            if keep == len && len < buf.len() {
                continue;
            }
            if keep > 0 && keep < len {
                self.carry[..keep].copy_from_slice(&buf[len - keep..len]);
                self.carry_len = keep;
                len -= keep;
            }

            scrub(&mut buf[..len]);
            return Ok(len);
        }
    }
}

/// Length of an unfinished UTF-8 sequence at the end of `bytes`, if any.
fn trailing_incomplete(bytes: &[u8]) -> usize {
    let len = bytes.len();
    for back in 1..=MAX_CARRY.min(len) {
        let byte = bytes[len - back];
        if byte < 0x80 {
            return 0;
        }
        let need = match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => continue, // continuation or invalid byte, scan further back
        };
        return if need > back { back } else { 0 };
    }
    0
}

/// Replace every byte not forming a valid XML character with a space.
fn scrub(bytes: &mut [u8]) {
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        if byte < 0x80 {
            if !matches!(byte, b'\t' | b'\n' | b'\r' | 0x20..=0x7F) {
                bytes[i] = b' ';
            }
            i += 1;
            continue;
        }
        match decode_one(&bytes[i..]) {
            Some((ch, width)) if is_xml_char(ch) => i += width,
            Some((_, width)) => {
                bytes[i..i + width].fill(b' ');
                i += width;
            }
            None => {
                bytes[i] = b' ';
                i += 1;
            }
        }
    }
}

/// Decode the first scalar of `bytes`, returning it and its encoded width.
fn decode_one(bytes: &[u8]) -> Option<(char, usize)> {
    let take = bytes.len().min(4);
    let prefix = match std::str::from_utf8(&bytes[..take]) {
        Ok(s) => s,
        Err(e) if e.valid_up_to() > 0 => {
            std::str::from_utf8(&bytes[..e.valid_up_to()]).ok()?
        }
        Err(_) => return None,
    };
    let ch = prefix.chars().next()?;
    Some((ch, ch.len_utf8()))
}

/// The XML 1.0 `Char` production.
fn is_xml_char(ch: char) -> bool {
    matches!(ch, '\t' | '\n' | '\r')
        || ('\u{20}'..='\u{D7FF}').contains(&ch)
        || ('\u{E000}'..='\u{FFFD}').contains(&ch)
        || ch >= '\u{10000}'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitize(input: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        SanitizingReader::new(input)
            .read_to_end(&mut out)
            .expect("in-memory read cannot fail");
        out
    }

    #[test]
    fn test_clean_text_is_unchanged() {
        let input = b"<span class='ocrx_word' title='bbox 1 2 3 4'>Hello</span>\n";
        assert_eq!(sanitize(input), input.to_vec());
    }

    #[test]
    fn test_idempotent() {
        let noisy = b"He\x00llo\x0Bworld\x1F".to_vec();
        let once = sanitize(&noisy);
        let twice = sanitize(&once);
        assert_eq!(once, b"He llo world ".to_vec());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_run_length_preserved() {
        let noisy = [b'a', 0x00, 0x01, 0xFF, b'b'];
        let clean = sanitize(&noisy);
        assert_eq!(clean.len(), noisy.len());
        assert_eq!(clean, b"a   b".to_vec());
    }

    #[test]
    fn test_multibyte_preserved() {
        let input = "naïve — déjà vu".as_bytes();
        assert_eq!(sanitize(input), input.to_vec());
    }

    #[test]
    fn test_invalid_scalar_scrubbed_in_place() {
        // U+FFFE is not an XML character; all three of its UTF-8 bytes
        // become spaces, keeping the byte length.
        let mut input = b"a".to_vec();
        input.extend_from_slice("\u{FFFE}".as_bytes());
        input.push(b'b');
        assert_eq!(sanitize(&input), b"a   b".to_vec());
    }

    #[test]
    fn test_sequence_split_across_reads() {
        // 'é' is two bytes; force a read boundary in the middle of it.
        struct OneByte<'a>(&'a [u8], usize);
        impl Read for OneByte<'_> {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if self.1 >= self.0.len() || buf.is_empty() {
                    return Ok(0);
                }
                buf[0] = self.0[self.1];
                self.1 += 1;
                Ok(1)
            }
        }

        let input = "café".as_bytes();
        let mut out = Vec::new();
        SanitizingReader::new(OneByte(input, 0))
            .read_to_end(&mut out)
            .expect("in-memory read cannot fail");
        assert_eq!(out, input.to_vec());
    }

    #[test]
    fn test_truncated_sequence_at_eof() {
        // A lone UTF-8 start byte at end of stream becomes a space.
        let input = [b'a', 0xC3];
        assert_eq!(sanitize(&input), b"a ".to_vec());
    }

    #[test]
    fn test_whitespace_controls_kept() {
        let input = b"a\tb\nc\rd";
        assert_eq!(sanitize(input), input.to_vec());
    }
}
