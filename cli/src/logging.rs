// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use slog::Drain;
use slog::Level;
use slog::Logger;

/// Warnings by default, each `-v` one level more
pub fn level_for_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::Warning,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    }
}

/// One line per record, with the logger's own key-values appended inline
fn record_format<D: slog_term::Decorator>(
    decorator: D,
) -> slog_term::FullFormat<D> {
    slog_term::FullFormat::new(decorator).build()
}

/// Log to stderr so that stdout only ever carries the response body. Drop
/// every clone of the returned logger before exiting to flush it.
pub fn stderr_logger(verbose: u8) -> Logger {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = record_format(decorator).fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain =
        slog::LevelFilter::new(drain, level_for_verbosity(verbose)).fuse();

    Logger::root(drain, slog::o!())
}
