//! Buffer retrieval for external formatting calls
//!
//! Formatting libraries write UTF-16 into a caller-provided buffer and
//! report the length they needed. The helpers here first offer the
//! buffer's whole inline capacity, and on overflow grow it to the reported
//! size and call exactly once more.

use smallvec::{Array, SmallVec};

use crate::error::{Error, Result};

/// Inline capacity of formatting buffers
pub const INITIAL_CHAR_BUFFER_SIZE: usize = 32;

/// Status reported by a formatting call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatStatus {
    /// The output fit
    Success,
    /// The buffer was too small; the reported length is what is required
    BufferOverflow,
    /// Any other library error code
    Failure(i32),
}

/// Run `format` against `chars`, retrying once on overflow
///
/// `format` receives the buffer to write into and returns the number of
/// code units the full output requires plus a status. On success `chars`
/// holds exactly the output and its length is returned.
pub fn call_formatting_into<A, F>(chars: &mut SmallVec<A>, mut format: F) -> Result<usize>
where
    A: Array<Item = u16>,
    F: FnMut(&mut [u16]) -> (usize, FormatStatus),
{
    chars.clear();
    chars.resize(chars.inline_size(), 0);

    let (size, mut status) = format(chars.as_mut_slice());
    if status == FormatStatus::BufferOverflow {
        tracing::trace!(required = size, offered = chars.len(), "formatting buffer overflow");
        chars.resize(size, 0);
        status = format(chars.as_mut_slice()).1;
    }

    match status {
        FormatStatus::Success => {
            chars.resize(size, 0);
            Ok(size)
        }
        FormatStatus::BufferOverflow => Err(Error::InternalError(format!(
            "formatting output did not fit in {} code units",
            chars.len()
        ))),
        FormatStatus::Failure(code) => Err(Error::InternalError(format!(
            "formatting failed with status {}",
            code
        ))),
    }
}

/// Run `format` and decode its UTF-16 output
pub fn call_formatting<F>(format: F) -> Result<String>
where
    F: FnMut(&mut [u16]) -> (usize, FormatStatus),
{
    let mut chars: SmallVec<[u16; INITIAL_CHAR_BUFFER_SIZE]> = SmallVec::new();
    call_formatting_into(&mut chars, format)?;
    String::from_utf16(&chars)
        .map_err(|e| Error::InternalError(format!("formatting produced invalid UTF-16: {}", e)))
}
