// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use slog::Logger;
use slog::info;

mod client;
mod commands;
mod env_file;
mod error;
mod logging;
mod payload;

pub use client::*;
pub use commands::*;
pub use env_file::*;
pub use error::*;
pub use logging::*;
pub use payload::*;

#[derive(Debug, Parser)]
#[clap(
    name = "myorg",
    about = "Manage an organization through the My Organization API",
    version
)]
pub struct Args {
    /// Read `access_token` from this key=value file
    #[clap(short = 'e', long = "env-file", global = true)]
    pub env_file: Option<PathBuf>,

    /// Access token to send; falls back to `access_token` from the env file,
    /// then from the environment
    #[clap(short = 'a', long = "access-token", global = true)]
    pub access_token: Option<String>,

    /// Log more to stderr, may be repeated
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// HTTP timeout in seconds
    #[clap(
        long,
        env = "MYORG_HTTP_TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..),
        global = true
    )]
    pub timeout: u64,

    #[clap(subcommand)]
    pub command: Command,
}

/// Run one invocation: resolve the token, check it grants the operation's
/// scope, send the request and write the response to `out`.
pub fn run(
    log: &Logger,
    args: Args,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let env_file = match &args.env_file {
        Some(path) => EnvFile::load(log, path)?,
        None => EnvFile::default(),
    };

    let process_token = std::env::var(ACCESS_TOKEN_VAR).ok();
    let token = resolve_token(
        args.access_token.as_deref(),
        &env_file,
        process_token.as_deref(),
    )
    .ok_or_else(|| {
        CliError::usage(format!(
            "no access token: pass -a, or set {ACCESS_TOKEN_VAR} in the env \
             file or environment"
        ))
    })?;

    let (operation, body) = args.command.into_operation()?;

    info!(log, "preparing request";
        "operation" => %operation,
        "scope" => operation.required_scope()
    );

    let request = operation.request(&token, body)?;
    let client = http_client(Duration::from_secs(args.timeout))?;

    send(log, &client, request, out)
}
