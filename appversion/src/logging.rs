//! Log setup for the executable.

use slog::{Drain, Level, Logger, o};

/// Create a logger that writes to stderr.
///
/// `verbose` is the number of times `--verbose` was passed. With none, only
/// warnings and errors are shown.
pub fn init(verbose: u8) -> Logger {
    let level = match verbose {
        0 => Level::Warning,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    };

    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::CompactFormat::new(decorator).build().fuse();
    let drain = drain.filter_level(level).fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    Logger::root(drain, o!())
}
