// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Reasons an access token cannot be turned into a request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The token is not shaped like a compact JWT, or lacks a usable issuer.
    #[error("malformed access token: {0}")]
    TokenFormat(String),

    /// The token is well formed but does not grant the required scope.
    #[error(
        "access token does not grant scope {required} (granted: {granted})"
    )]
    Scope { required: String, granted: String },
}

impl Error {
    pub fn token_format(detail: impl Into<String>) -> Self {
        Error::TokenFormat(detail.into())
    }

    pub fn scope<'a>(
        required: &str,
        granted: impl Iterator<Item = &'a str>,
    ) -> Self {
        let granted = granted.collect::<Vec<_>>().join(" ");

        Error::Scope {
            required: required.to_string(),
            granted: if granted.is_empty() {
                String::from("none")
            } else {
                granted
            },
        }
    }
}
