// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::process::ExitCode;

use clap::Parser;
use myorg_cli::Args;

fn main() -> ExitCode {
    // Usage errors exit with clap's own code 2, help and version with 0
    let args = Args::parse();

    let log = myorg_cli::stderr_logger(args.verbose);
    let result = myorg_cli::run(&log, args, &mut std::io::stdout().lock());

    // Flush pending log records before the error line
    drop(log);

    match result {
        Ok(()) => ExitCode::SUCCESS,

        Err(error) => {
            let code = error.exit_code();
            // NB: "{:#}" prints the whole source chain on one line
            eprintln!("myorg: {:#}", anyhow::Error::new(error));
            ExitCode::from(code)
        }
    }
}
