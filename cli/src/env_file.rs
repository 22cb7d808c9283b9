// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::BTreeMap;
use std::path::Path;

use slog::Logger;
use slog::debug;

use crate::CliError;

/// Name of the setting holding the access token, both in env files and in
/// the process environment
pub const ACCESS_TOKEN_VAR: &str = "access_token";

/// Settings sourced from a `key=value` env file. The file is parsed, never
/// applied to the process environment.
#[derive(Debug, Default)]
pub struct EnvFile {
    settings: BTreeMap<String, String>,
}

impl EnvFile {
    pub fn load(log: &Logger, path: &Path) -> Result<Self, CliError> {
        let to_error = |error| CliError::EnvFile {
            path: path.to_path_buf(),
            error,
        };

        let mut settings = BTreeMap::new();
        for item in dotenvy::from_path_iter(path).map_err(to_error)? {
            let (key, value) = item.map_err(to_error)?;

            if key != ACCESS_TOKEN_VAR {
                debug!(log, "ignoring env file setting"; "key" => &key);
            }

            settings.insert(key, value);
        }

        Ok(Self { settings })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }
}

/// Pick the access token: an explicit `-a` wins over the env file, which wins
/// over the process environment. Blank values count as unset.
pub fn resolve_token(
    flag: Option<&str>,
    env_file: &EnvFile,
    process: Option<&str>,
) -> Option<String> {
    [flag, env_file.get(ACCESS_TOKEN_VAR), process]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|token| !token.is_empty())
        .map(String::from)
}
