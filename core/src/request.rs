// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use http::header::ACCEPT;
use http::header::AUTHORIZATION;
use http::header::CONTENT_TYPE;

use super::*;

/// Everything needed to send one API request. Built by [`build`] and never
/// modified afterwards.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    url: String,
    headers: HeaderMap,
    body: Option<String>,
}

impl RequestDescriptor {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn into_parts(self) -> (Method, String, HeaderMap, Option<String>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Check that `token` grants `required_scope` and build a request for `path`
/// on the host named by the token's issuer.
///
/// The token's claims are decoded without verifying its signature; see the
/// crate documentation.
pub fn build(
    token: &str,
    required_scope: &str,
    path: &str,
    method: Method,
    body: Option<String>,
) -> Result<RequestDescriptor, Error> {
    let access_token = AccessToken::decode(token)?;

    // A missing issuer is reported ahead of any scope failure.
    let host = access_token.host()?;
    access_token.require_scope(required_scope)?;

    let mut bearer =
        HeaderValue::try_from(format!("Bearer {token}")).map_err(|_| {
            Error::token_format("token contains characters not allowed in a header")
        })?;
    bearer.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if body.is_some() {
        headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    Ok(RequestDescriptor {
        method,
        url: format!("{host}{path}"),
        headers,
        body,
    })
}
