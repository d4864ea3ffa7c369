//! Frame Tests
//!
//! Tests verify:
//! - Length prefix is little-endian and excludes itself
//! - Oversized frames are rejected before any payload is read or written
//! - Partial reads and writes are stitched into whole frames
//! - Premature close surfaces as a connection error

use std::io::{self, Cursor, Read, Write};

use rankkv::protocol::{read_frame, write_frame, MAX_FRAME_SIZE};
use rankkv::RankError;

// =============================================================================
// Helpers
// =============================================================================

/// Reader that hands out at most one byte per call
struct Trickle<R> {
    inner: R,
}

impl<R: Read> Read for Trickle<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = buf.len().min(1);
        self.inner.read(&mut buf[..len])
    }
}

/// Writer that accepts at most three bytes per call
#[derive(Default)]
struct ShortWriter {
    written: Vec<u8>,
    flushed: bool,
}

impl Write for ShortWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let len = buf.len().min(3);
        self.written.extend_from_slice(&buf[..len]);
        Ok(len)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushed = true;
        Ok(())
    }
}

fn framed(payload: &[u8]) -> Vec<u8> {
    let mut bytes = (payload.len() as u32).to_le_bytes().to_vec();
    bytes.extend_from_slice(payload);
    bytes
}

// =============================================================================
// Write Tests
// =============================================================================

#[test]
fn test_write_frame_layout() {
    let mut out = Vec::new();
    write_frame(&mut out, b"hello", MAX_FRAME_SIZE).unwrap();

    assert_eq!(out, vec![5, 0, 0, 0, b'h', b'e', b'l', b'l', b'o']);
}

#[test]
fn test_write_empty_frame() {
    let mut out = Vec::new();
    write_frame(&mut out, b"", MAX_FRAME_SIZE).unwrap();

    assert_eq!(out, vec![0, 0, 0, 0]);
}

#[test]
fn test_write_frame_at_limit() {
    let payload = vec![7u8; MAX_FRAME_SIZE];
    let mut out = Vec::new();
    write_frame(&mut out, &payload, MAX_FRAME_SIZE).unwrap();

    assert_eq!(out.len(), 4 + MAX_FRAME_SIZE);
    assert_eq!(&out[..4], &(MAX_FRAME_SIZE as u32).to_le_bytes());
}

#[test]
fn test_write_oversized_frame_writes_nothing() {
    let payload = vec![0u8; MAX_FRAME_SIZE + 1];
    let mut out = Vec::new();
    let result = write_frame(&mut out, &payload, MAX_FRAME_SIZE);

    match result {
        Err(RankError::FrameTooLarge { size, max }) => {
            assert_eq!(size, MAX_FRAME_SIZE + 1);
            assert_eq!(max, MAX_FRAME_SIZE);
        }
        other => panic!("Expected FrameTooLarge, got {:?}", other),
    }
    assert!(out.is_empty());
}

#[test]
fn test_write_frame_across_short_writes() {
    let mut writer = ShortWriter::default();
    write_frame(&mut writer, b"partial writes", MAX_FRAME_SIZE).unwrap();

    assert_eq!(writer.written, framed(b"partial writes"));
    assert!(writer.flushed);
}

// =============================================================================
// Read Tests
// =============================================================================

#[test]
fn test_read_frame() {
    let mut cursor = Cursor::new(framed(b"payload"));
    let frame = read_frame(&mut cursor, MAX_FRAME_SIZE).unwrap();

    assert_eq!(frame, b"payload");
}

#[test]
fn test_read_consecutive_frames() {
    let mut bytes = framed(b"first");
    bytes.extend(framed(b""));
    bytes.extend(framed(b"third"));
    let mut cursor = Cursor::new(bytes);

    assert_eq!(read_frame(&mut cursor, MAX_FRAME_SIZE).unwrap(), b"first");
    assert_eq!(read_frame(&mut cursor, MAX_FRAME_SIZE).unwrap(), b"");
    assert_eq!(read_frame(&mut cursor, MAX_FRAME_SIZE).unwrap(), b"third");
}

#[test]
fn test_read_frame_across_partial_reads() {
    let payload: Vec<u8> = (0..=255).collect();
    let mut reader = Trickle {
        inner: Cursor::new(framed(&payload)),
    };

    assert_eq!(read_frame(&mut reader, MAX_FRAME_SIZE).unwrap(), payload);
}

#[test]
fn test_read_oversized_frame_consumes_no_payload() {
    let mut bytes = ((MAX_FRAME_SIZE + 1) as u32).to_le_bytes().to_vec();
    bytes.extend_from_slice(b"never read");
    let mut cursor = Cursor::new(bytes);

    let result = read_frame(&mut cursor, MAX_FRAME_SIZE);

    assert!(matches!(result, Err(RankError::FrameTooLarge { .. })));
    assert_eq!(cursor.position(), 4);
}

#[test]
fn test_read_frame_custom_limit() {
    let mut cursor = Cursor::new(framed(b"0123456789"));
    let result = read_frame(&mut cursor, 8);

    assert!(matches!(result, Err(RankError::FrameTooLarge { size: 10, max: 8 })));
}

#[test]
fn test_read_truncated_prefix() {
    let mut cursor = Cursor::new(vec![5u8, 0]);
    let err = read_frame(&mut cursor, MAX_FRAME_SIZE).unwrap_err();

    assert!(matches!(err, RankError::Connection(_)));
    assert!(err.is_disconnect());
}

#[test]
fn test_read_truncated_payload() {
    let mut bytes = framed(b"complete payload");
    bytes.truncate(10);
    let mut cursor = Cursor::new(bytes);

    let err = read_frame(&mut cursor, MAX_FRAME_SIZE).unwrap_err();
    match err {
        RankError::Connection(e) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
        other => panic!("Expected Connection error, got {:?}", other),
    }
}
