// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io::Write;
use std::time::Duration;

use myorg::RequestDescriptor;
use reqwest::blocking::Client;
use slog::Logger;
use slog::info;
use slog::warn;

use crate::CliError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub fn http_client(timeout: Duration) -> Result<Client, CliError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("myorg/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(CliError::MissingDependency)
}

/// Send `request` and write the response body to `out`. Error responses are
/// still written out before the status is reported.
pub fn send(
    log: &Logger,
    client: &Client,
    request: RequestDescriptor,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let (method, url, headers, body) = request.into_parts();

    // The URL comes straight from the token's issuer
    let parsed = reqwest::Url::parse(&url).map_err(|e| {
        myorg::Error::token_format(format!("iss does not form a URL: {e}"))
    })?;

    info!(log, "sending request"; "method" => %method, "url" => &url);

    let mut builder = client.request(method.clone(), parsed).headers(headers);
    if let Some(body) = body {
        builder = builder.body(body);
    }

    let to_transport = |source| CliError::Transport {
        method: method.clone(),
        url: url.clone(),
        source,
    };

    let response = builder.send().map_err(to_transport)?;
    let status = response.status();
    let text = response.text().map_err(to_transport)?;

    info!(log, "received response";
        "status" => status.as_u16(),
        "bytes" => text.len()
    );

    emit(out, &text)?;

    if !status.is_success() {
        warn!(log, "request was not successful"; "status" => %status);
        return Err(CliError::HttpStatus { method, url, status });
    }

    Ok(())
}

/// Pretty-print a JSON body. A body that is not JSON is written as is, and
/// an empty one not at all.
pub fn emit(out: &mut dyn Write, body: &str) -> Result<(), CliError> {
    if body.trim().is_empty() {
        return Ok(());
    }

    let result = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => writeln!(out, "{value:#}"),
        Err(_) => writeln!(out, "{}", body.trim_end()),
    };

    result.and_then(|()| out.flush()).map_err(CliError::Output)
}
