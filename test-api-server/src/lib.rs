// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! An in-memory implementation of the My Organization API, for exercising
//! clients against a real HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use dropshot::ApiDescription;
use dropshot::Body;
use dropshot::ConfigDropshot;
use dropshot::HttpError;
use dropshot::HttpServer;
use dropshot::Path;
use dropshot::RequestContext;
use dropshot::ServerBuilder;
use dropshot::TypedBody;
use dropshot::endpoint;
use http::Response;
use http::StatusCode;
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use slog::Drain;
use slog::Logger;

mod details;
mod domains;
mod identity_providers;
mod store;

pub use store::*;

pub struct ServerContext {
    pub store: ApiStore,
}

/// Build the API description and start serving it. Binding to port 0 picks
/// an ephemeral port, see [`HttpServer::local_addr`].
pub fn create_http_server(
    log: Logger,
    bind_address: Option<SocketAddr>,
) -> anyhow::Result<HttpServer<Arc<ServerContext>>> {
    let mut api = ApiDescription::new();

    register(&mut api, details::get_details)?;
    register(&mut api, details::update_details)?;

    register(&mut api, identity_providers::list_identity_providers)?;
    register(&mut api, identity_providers::get_identity_provider)?;
    register(&mut api, identity_providers::create_identity_provider)?;
    register(&mut api, identity_providers::update_identity_provider)?;
    register(&mut api, identity_providers::delete_identity_provider)?;

    register(&mut api, domains::list_domains)?;
    register(&mut api, domains::get_domain)?;
    register(&mut api, domains::create_domain)?;
    register(&mut api, domains::delete_domain)?;
    register(&mut api, domains::verify_domain)?;

    let config = ConfigDropshot {
        bind_address: bind_address
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 0))),
        ..Default::default()
    };

    let context = Arc::new(ServerContext { store: ApiStore::new() });

    let server = ServerBuilder::new(api, context, log).config(config).start()?;

    Ok(server)
}

fn register<E>(
    api: &mut ApiDescription<Arc<ServerContext>>,
    endpoint: E,
) -> anyhow::Result<()>
where
    E: Into<dropshot::ApiEndpoint<Arc<ServerContext>>>,
{
    api.register(endpoint)
        .map_err(|e| anyhow::anyhow!("registering endpoint failed: {e}"))
}

/// A stderr logger for running the server standalone
pub fn terminal_logger() -> Logger {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    Logger::root(drain, slog::o!("component" => "myorg-test-api-server"))
}

/// Every endpoint requires a bearer token. Its contents are not checked.
fn require_bearer(
    rqctx: &RequestContext<Arc<ServerContext>>,
) -> Result<(), ApiError> {
    let bearer = rqctx
        .request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match bearer {
        Some(token) if !token.is_empty() => Ok(()),
        _ => Err(ApiError::unauthorized()),
    }
}

fn json_response<T: Serialize>(
    status: StatusCode,
    value: &T,
) -> Result<Response<Body>, http::Error> {
    match serde_json::to_string(value) {
        Ok(serialized) => Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(serialized.into()),

        Err(e) => ApiError::internal_error(format!(
            "serializing response failed: {e}"
        ))
        .to_http_response(),
    }
}

/// Run an endpoint body and turn its outcome into an HTTP response
fn respond<F>(
    rqctx: &RequestContext<Arc<ServerContext>>,
    status: StatusCode,
    f: F,
) -> Result<Response<Body>, HttpError>
where
    F: FnOnce(&ApiStore) -> Result<Option<serde_json::Value>, ApiError>,
{
    let result = require_bearer(rqctx).and_then(|()| f(&rqctx.context().store));

    let response: Result<Response<Body>, http::Error> = match result {
        Ok(Some(value)) => json_response(status, &value),
        Ok(None) => Response::builder()
            .status(StatusCode::NO_CONTENT)
            .body(Body::empty()),
        Err(error) => error.to_http_response(),
    };

    response.map_err(HttpError::from)
}

fn to_value<T: Serialize>(value: T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| {
        ApiError::internal_error(format!("serializing response failed: {e}"))
    })
}
