// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use base64::Engine;
use base64::alphabet;
use base64::engine::DecodePaddingMode;
use base64::engine::GeneralPurpose;
use base64::engine::GeneralPurposeConfig;

use super::*;

// Payload segments are unpadded base64url, but tokens pasted from other tools
// sometimes carry padding.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A compact `header.payload.signature` access token with its payload
/// claims decoded.
///
/// Only the payload segment is read. The signature is never checked.
#[derive(Debug, Clone)]
pub struct AccessToken<'a> {
    raw: &'a str,
    claims: serde_json::Map<String, Value>,
}

impl<'a> AccessToken<'a> {
    pub fn decode(raw: &'a str) -> Result<Self, Error> {
        let mut segments = raw.split('.');

        let (Some(_header), Some(payload)) = (segments.next(), segments.next())
        else {
            return Err(Error::token_format(
                "expected dot-separated header and payload segments",
            ));
        };

        let bytes = PAYLOAD_ENGINE.decode(payload).map_err(|e| {
            Error::token_format(format!("payload segment is not base64url: {e}"))
        })?;

        let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
            Error::token_format(format!("payload segment is not JSON: {e}"))
        })?;

        match value {
            Value::Object(claims) => Ok(Self { raw, claims }),
            _ => Err(Error::token_format("payload segment is not a JSON object")),
        }
    }

    /// The token exactly as it was supplied
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    /// The `iss` claim. Absent, empty, null and the literal string `"null"`
    /// are all rejected.
    pub fn issuer(&self) -> Result<&str, Error> {
        match self.claims.get("iss") {
            Some(Value::String(iss)) if !iss.is_empty() && iss != "null" => {
                Ok(iss.as_str())
            }

            None | Some(Value::Null) | Some(Value::String(_)) => {
                Err(Error::token_format("token has no iss claim"))
            }

            Some(other) => Err(Error::token_format(format!(
                "iss claim is not a string: {other}"
            ))),
        }
    }

    /// The API host named by the issuer, with a single trailing `/` removed
    pub fn host(&self) -> Result<&str, Error> {
        let iss = self.issuer()?;
        Ok(iss.strip_suffix('/').unwrap_or(iss))
    }

    /// Permissions from the whitespace-delimited `scope` claim. A token with
    /// no `scope` claim, or a non-string one, grants nothing.
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.claims
            .get("scope")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .split_whitespace()
    }

    pub fn has_scope(&self, required: &str) -> bool {
        self.scopes().any(|scope| scope == required)
    }

    pub fn require_scope(&self, required: &str) -> Result<(), Error> {
        if self.has_scope(required) {
            Ok(())
        } else {
            Err(Error::scope(required, self.scopes()))
        }
    }
}
