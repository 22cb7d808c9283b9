// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Token-gated request construction for the My Organization API.
//!
//! Every operation of the API is gated by a scope carried in the caller's
//! access token, and every request is sent to the host named by that token's
//! issuer. [`build`] performs both checks and returns a [`RequestDescriptor`]
//! that the caller sends with the HTTP client of its choice.
//!
//! Access tokens are decoded, not verified. Nothing in this crate checks a
//! token's signature, expiry or audience, so a scope check passing here only
//! means the token *claims* that scope. The API server remains the authority.

use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use serde_json::Value;

mod error;
mod operation;
mod request;
mod token;

pub use error::*;
pub use operation::*;
pub use request::*;
pub use token::*;
