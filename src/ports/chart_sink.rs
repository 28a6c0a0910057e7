//! Output sink for rendered chart files.
//!
//! A sink owns where the chart lands. Destinations are a closed set, so an
//! implementation never receives caller-controlled path segments.

use crate::domain::{AppError, Destination};

/// Port for persisting rendered chart files.
pub trait ChartSink {
    /// Write the full contents of one destination, replacing anything already there.
    ///
    /// Failures are reported as `AppError::Write` naming the destination.
    fn write(&self, destination: Destination, contents: &str) -> Result<(), AppError>;

    /// Human-readable location of a destination, for reporting.
    fn location(&self, destination: Destination) -> String;
}
