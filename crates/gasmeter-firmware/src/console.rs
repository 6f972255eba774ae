use gasmeter_core::report::ReportSink;
use rtt_target::rprintln;

/// Report sink printing each line on the RTT console.
///
/// Requires `rtt_init_print!` to have run.
pub struct RttConsole;

impl ReportSink for RttConsole {
    fn emit(&mut self, line: &str) {
        rprintln!("{}", line);
    }
}
