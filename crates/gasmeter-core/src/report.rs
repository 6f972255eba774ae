//! Console report lines

use core::fmt::{self, Write};

use log::warn;

use crate::sensors::SensorError;

/// Capacity of a single report line in bytes
pub const REPORT_LINE_CAPACITY: usize = 96;

pub type ReportLine = heapless::String<REPORT_LINE_CAPACITY>;

/// Destination for report lines.
///
/// The firmware writes to the RTT console, the simulator to stdout.
pub trait ReportSink {
    /// Write one line. The line carries no trailing newline.
    fn emit(&mut self, line: &str);
}

impl<T: ReportSink + ?Sized> ReportSink for &mut T {
    fn emit(&mut self, line: &str) {
        (**self).emit(line);
    }
}

/// Line reported in place of a reading when the read failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadFailure(pub SensorError);

impl fmt::Display for ReadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lesefehler: {}", self.0)
    }
}

/// Writes into a line and silently stops at capacity.
struct Truncating<'a> {
    line: &'a mut ReportLine,
    truncated: bool,
}

impl Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.line.push(c).is_err() {
                self.truncated = true;
                break;
            }
        }
        Ok(())
    }
}

/// Render a reading into a fixed-capacity line.
///
/// Text beyond [`REPORT_LINE_CAPACITY`] is cut off so a line is always produced.
pub fn format_line<T: fmt::Display>(reading: &T) -> ReportLine {
    let mut line = ReportLine::new();
    let mut writer = Truncating {
        line: &mut line,
        truncated: false,
    };

    if write!(writer, "{}", reading).is_err() || writer.truncated {
        warn!("report line truncated to {} bytes", REPORT_LINE_CAPACITY);
    }

    line
}
