//! Frame encoding and decoding for the host link.
//!
//! Frame format:
//! - CODE (1 byte): command identifier
//! - LENGTH (1 byte): payload length (0-64)
//! - PAYLOAD (LENGTH bytes): command-specific data
//! - CHECKSUM (1 byte): XOR of CODE, LENGTH, and all PAYLOAD bytes
//!
//! There is no start byte. The receiver pulls the CODE byte itself and
//! then asks [`try_take_frame`] for the rest, which only consumes bytes
//! once the whole remainder is queued.

use heapless::Vec;

use crate::queue::ByteSource;

/// Maximum payload size in bytes
///
/// The LENGTH byte could declare up to 255 bytes, but nothing on the link
/// needs more than a display row of text.
pub const MAX_PAYLOAD_LEN: usize = 64;

/// Maximum complete frame size (CODE + LENGTH + MAX_PAYLOAD + CHECKSUM)
pub const MAX_FRAME_SIZE: usize = 1 + 1 + MAX_PAYLOAD_LEN + 1;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Declared or supplied payload exceeds [`MAX_PAYLOAD_LEN`]
    PayloadTooLarge,
    /// Frame is incomplete (need more bytes)
    Incomplete,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// XOR checksum over CODE, LENGTH and the payload
pub fn checksum(code: u8, payload: &[u8]) -> u8 {
    let mut checksum = code ^ payload.len() as u8;
    for &byte in payload {
        checksum ^= byte;
    }
    checksum
}

/// A received or constructed frame
///
/// The checksum is stored as received, so a frame can exist in an invalid
/// state; [`CommandFrame::is_valid`] decides whether it may be acted on.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandFrame {
    /// Command identifier
    pub code: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_LEN>,
    /// Checksum byte as carried on the wire
    pub checksum: u8,
}

impl CommandFrame {
    /// Create a frame with a correct checksum
    pub fn new(code: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let mut payload_vec = Vec::new();
        payload_vec
            .extend_from_slice(payload)
            .map_err(|_| FrameError::PayloadTooLarge)?;

        Ok(Self {
            code,
            checksum: checksum(code, payload),
            payload: payload_vec,
        })
    }

    /// Create a frame with no payload
    pub fn empty(code: u8) -> Self {
        Self {
            code,
            payload: Vec::new(),
            checksum: checksum(code, &[]),
        }
    }

    /// Declared payload length
    pub fn length(&self) -> u8 {
        self.payload.len() as u8
    }

    /// Checksum the frame should carry for its code and payload
    pub fn expected_checksum(&self) -> u8 {
        checksum(self.code, &self.payload)
    }

    /// True iff the carried checksum matches the computed one
    pub fn is_valid(&self) -> bool {
        self.checksum == self.expected_checksum()
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = 3 + self.payload.len(); // CODE + LENGTH + payload + CHECKSUM
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        buffer[0] = self.code;
        buffer[1] = self.length();
        buffer[2..2 + self.payload.len()].copy_from_slice(&self.payload);
        buffer[2 + self.payload.len()] = self.checksum;

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| FrameError::BufferTooSmall)?;
        Ok(vec)
    }
}

/// Build the wire bytes for an outgoing report
pub fn encode_report(code: u8, payload: &[u8]) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
    CommandFrame::new(code, payload)?.encode_to_vec()
}

/// Take the rest of a frame whose CODE byte has already been dequeued
///
/// Reads the LENGTH byte, then LENGTH payload bytes plus the checksum.
/// Returns [`FrameError::Incomplete`] without consuming anything if the
/// source cannot supply all of that yet. A LENGTH above
/// [`MAX_PAYLOAD_LEN`] consumes only the LENGTH byte and returns
/// [`FrameError::PayloadTooLarge`].
pub fn try_take_frame<S: ByteSource + ?Sized>(
    source: &mut S,
    code: u8,
) -> Result<CommandFrame, FrameError> {
    let length = source.peek(0).ok_or(FrameError::Incomplete)? as usize;

    if length > MAX_PAYLOAD_LEN {
        source.pop();
        return Err(FrameError::PayloadTooLarge);
    }

    // LENGTH + payload + CHECKSUM
    if source.available() < length + 2 {
        return Err(FrameError::Incomplete);
    }

    source.pop();
    let mut payload = Vec::new();
    for _ in 0..length {
        let byte = source.pop().ok_or(FrameError::Incomplete)?;
        payload
            .push(byte)
            .map_err(|_| FrameError::PayloadTooLarge)?;
    }
    let checksum = source.pop().ok_or(FrameError::Incomplete)?;

    Ok(CommandFrame {
        code,
        payload,
        checksum,
    })
}

/// Incremental frame reader over a byte source
///
/// Holds on to a CODE byte between polls when the rest of its frame has
/// not arrived yet. There is no timeout: a partial frame waits until its
/// bytes show up or the reader is reset.
#[derive(Debug, Clone, Default)]
pub struct FrameReader {
    pending_code: Option<u8>,
}

impl FrameReader {
    /// Create a new frame reader
    pub const fn new() -> Self {
        Self { pending_code: None }
    }

    /// Forget any partially received frame
    pub fn reset(&mut self) {
        self.pending_code = None;
    }

    /// True if a CODE byte is waiting for the rest of its frame
    pub fn is_mid_frame(&self) -> bool {
        self.pending_code.is_some()
    }

    /// Poll the source for one frame
    ///
    /// Returns `Ok(Some(frame))` when a frame is complete (valid or not),
    /// `Ok(None)` when more bytes are needed, or `Err` for an oversized
    /// frame whose header has been discarded.
    pub fn poll<S: ByteSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<Option<CommandFrame>, FrameError> {
        let code = match self.pending_code.take().or_else(|| source.pop()) {
            Some(code) => code,
            None => return Ok(None),
        };

        match try_take_frame(source, code) {
            Ok(frame) => Ok(Some(frame)),
            Err(FrameError::Incomplete) => {
                self.pending_code = Some(code);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
