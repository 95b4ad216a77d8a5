//! Response types for request handlers.
//!
//! `Response` is what a handler hands back to the transport layer: a status
//! code and a short plain-text body. Serialization onto the wire is the
//! transport's job.

use crate::error::ControlError;
use core::fmt::{self, Write};

/// Maximum response body length.
pub const MAX_BODY: usize = 64;

/// Handler reply with status code and plain-text body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP-style status code
    pub status: u16,

    /// Plain-text body (may be empty)
    pub body: heapless::String<MAX_BODY>,
}

impl Response {
    /// 200 with the given body (truncated to [`MAX_BODY`]).
    pub fn ok(body: &str) -> Self {
        Self::with_status(200, body)
    }

    /// 200 with no body.
    pub fn empty() -> Self {
        Self::with_status(200, "")
    }

    /// 200 with a temperature formatted with two decimals.
    pub fn celsius(value: f32) -> Self {
        Self::formatted(200, format_args!("{:.2}", value))
    }

    /// Status matching `err`, with its message as body.
    ///
    /// `MalformedRequest` is the caller's fault (400); everything else is
    /// reported as a device fault (500).
    pub fn from_error(err: &ControlError) -> Self {
        let status = match err {
            ControlError::MalformedRequest { .. } => 400,
            _ => 500,
        };
        Self::formatted(status, format_args!("{}", err))
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn with_status(status: u16, message: &str) -> Self {
        Self::formatted(status, format_args!("{}", message))
    }

    fn formatted(status: u16, args: fmt::Arguments<'_>) -> Self {
        let mut body = BodyWriter::default();
        if body.write_fmt(args).is_err() {
            warn!("response body formatting failed");
        }
        if body.truncated {
            debug!("response body truncated to {} bytes", MAX_BODY);
        }
        Self {
            status,
            body: body.buf,
        }
    }
}

/// Body sink that keeps the first [`MAX_BODY`] bytes on a char boundary and
/// drops the rest.
#[derive(Default)]
struct BodyWriter {
    buf: heapless::String<MAX_BODY>,
    truncated: bool,
}

impl Write for BodyWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Ok(());
        }
        for c in s.chars() {
            if self.buf.push(c).is_err() {
                self.truncated = true;
                break;
            }
        }
        Ok(())
    }
}
