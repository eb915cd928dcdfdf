//! Copying the whole content of a byte source.
//!
//! The source may be mid-read by another operation on the same image, so the
//! transfer always leaves it exactly as it found it: same open/closed state,
//! same offset.

use bytes::Bytes;
use tracing::{trace, warn};

use super::source::ByteSource;
use crate::error::{CodecError, ErrorCode};

/// Restores a source's read state when dropped.
///
/// On construction an open source is rewound to offset 0 after its current
/// offset is recorded; a closed source is opened. Dropping the guard seeks
/// back to the recorded offset or closes the source again, whichever
/// matches the state it was found in.
pub struct PreserveReadState<'a> {
    source: &'a mut dyn ByteSource,
    saved_offset: Option<u64>,
}

impl<'a> PreserveReadState<'a> {
    pub fn new(source: &'a mut dyn ByteSource) -> Result<Self, CodecError> {
        let saved_offset = if source.is_open() {
            let offset = source.tell()?;
            source.seek(0)?;
            Some(offset)
        } else {
            source.open().map_err(|e| {
                CodecError::new(
                    ErrorCode::DataSourceOpenFailed,
                    format!("{}: {e}", source.identifier()),
                )
            })?;
            None
        };
        Ok(Self {
            source,
            saved_offset,
        })
    }

    pub fn source(&mut self) -> &mut dyn ByteSource {
        &mut *self.source
    }
}

impl Drop for PreserveReadState<'_> {
    fn drop(&mut self) {
        let restored = match self.saved_offset {
            Some(offset) => self.source.seek(offset),
            None => self.source.close(),
        };
        if let Err(e) = restored {
            warn!(
                source = self.source.identifier(),
                error = %e,
                "failed to restore read state"
            );
        }
    }
}

/// Read the full content of `source`.
///
/// A source that delivers fewer bytes than its reported size yields the
/// bytes actually read; that is not an error.
///
/// # Errors
///
/// Returns `MallocFailed` if the source is larger than `max_size`, and an I/O
/// code if opening or reading fails.
pub fn read_all(source: &mut dyn ByteSource, max_size: u64) -> Result<Bytes, CodecError> {
    let size = source.size()?;
    if size > max_size {
        return Err(CodecError::new(
            ErrorCode::MallocFailed,
            format!("source is {size} bytes, limit is {max_size}"),
        ));
    }
    let size = usize::try_from(size).map_err(|_| {
        CodecError::new(ErrorCode::MallocFailed, format!("{size} bytes cannot be addressed"))
    })?;

    let mut guard = PreserveReadState::new(source)?;
    let mut buffer = vec![0u8; size];
    let mut filled = 0;
    while filled < size {
        let read = guard.source().read(&mut buffer[filled..]).map_err(|e| {
            CodecError::new(ErrorCode::FailedToReadImageData, e.to_string())
        })?;
        if read == 0 {
            break;
        }
        filled += read;
    }

    if filled < size {
        trace!(expected = size, actual = filled, "short read, truncating");
        buffer.truncate(filled);
    }
    Ok(Bytes::from(buffer))
}
