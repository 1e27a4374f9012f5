use chrono::{Local, NaiveDateTime};
use tracing::{Span, info_span};

use pointgen_core::DeviceType;

/// Per-request state handed to the loader, compiler, and writer.
///
/// Holds the logging span every stage records into and the timestamp used for
/// the output file name.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    span: Span,
    timestamp: NaiveDateTime,
}

impl GenerationContext {
    pub fn new(device_type: &DeviceType) -> Self {
        Self {
            span: info_span!("point_table", device_type = %device_type),
            timestamp: Local::now().naive_local(),
        }
    }

    /// Context recording into a caller-provided span.
    pub fn from_span(span: Span) -> Self {
        Self {
            span,
            timestamp: Local::now().naive_local(),
        }
    }

    /// Replace the wall-clock timestamp, e.g. for reproducible file names.
    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// `YYYYMMDDHHMMSS`, as used in output file names.
    pub fn file_stamp(&self) -> String {
        self.timestamp.format("%Y%m%d%H%M%S").to_string()
    }
}
