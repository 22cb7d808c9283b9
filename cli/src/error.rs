// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use reqwest::Method;
use reqwest::StatusCode;

/// Everything that can end an invocation early. Each variant maps to one
/// process exit code, see [`CliError::exit_code`].
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The HTTP client (and with it the TLS backend) could not be set up
    #[error("HTTP client could not be initialised")]
    MissingDependency(#[source] reqwest::Error),

    #[error("{0}")]
    Usage(String),

    // dotenvy's Display already includes its io cause
    #[error("reading env file {}: {error}", .path.display())]
    EnvFile { path: PathBuf, error: dotenvy::Error },

    #[error("invalid JSON in --{flag}")]
    InvalidJson {
        flag: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Token(#[from] myorg::Error),

    #[error("{method} {url} failed")]
    Transport {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned {status}")]
    HttpStatus { method: Method, url: String, status: StatusCode },

    #[error("writing response failed")]
    Output(#[source] std::io::Error),
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        CliError::Usage(message.into())
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Token(_) => 1,

            CliError::Usage(_)
            | CliError::EnvFile { .. }
            | CliError::InvalidJson { .. } => 2,

            CliError::MissingDependency(_) => 3,

            CliError::Transport { .. }
            | CliError::HttpStatus { .. }
            | CliError::Output(_) => 4,
        }
    }
}
