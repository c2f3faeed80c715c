//! Error and result types.
//!
//! The original C expresses three outcomes per call with `goto` labels and an `int` return:
//! `1` (ok), `0` (insufficient data, "try again with more bytes"), `-1` (bad data). The two
//! negative-ish outcomes carry different semantics — one tells the caller to buffer and wait, the
//! other tells the caller to give up on this record — so this crate keeps them as distinct enum
//! variants rather than collapsing both into `Err`.

use core::fmt;

/// Outcome of framing one call's worth of input against a [`crate::transaction::FlowDnsState`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FrameResult {
    /// A complete record (or more than one) was consumed and handed to the message parser, or a
    /// partial record was buffered; the caller should supply more bytes when they arrive.
    Ok,
    /// The record was structurally invalid. The per-record buffer has been reset; the flow
    /// itself is left alone.
    Malformed,
    /// Too few bytes arrived to make progress (not even the 2-byte length prefix). The caller
    /// must not consume the input and should re-call once more bytes are available.
    NeedMore,
}

/// Failure of a single DNS message parse (header, question, or resource-record walk).
///
/// This is an internal detail of [`crate::request`] and [`crate::response`]; callers of the
/// public framing API only ever see [`FrameResult`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DecodeError {
    /// Fewer bytes were available than a fixed-size field requires.
    Truncated,
    /// The `QR` bit did not match the side being parsed (a request carried `QR=1`, or a response
    /// carried `QR=0`).
    WrongDirection,
    /// The opcode is reserved (`3..=15`).
    ReservedOpCode,
    /// `qdcount == 0` in a request.
    NoQuestions,
    /// A label length byte was `0` with no preceding labels, or exceeded the maximum label
    /// length where the caller does not tolerate it.
    InvalidLabel,
    /// The accumulated dot-separated name exceeded 255 bytes.
    NameTooLong,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Truncated => write!(f, "message ended before a fixed-size field"),
            DecodeError::WrongDirection => write!(f, "QR bit does not match the side being parsed"),
            DecodeError::ReservedOpCode => write!(f, "opcode is reserved"),
            DecodeError::NoQuestions => write!(f, "qdcount is zero"),
            DecodeError::InvalidLabel => write!(f, "invalid label length byte"),
            DecodeError::NameTooLong => write!(f, "name exceeds 255 bytes"),
        }
    }
}

impl std::error::Error for DecodeError {}
