//! HTTP basic authentication.
//!
//! [`BasicAuth`] decodes the `Authorization` header into
//! [`LoginCredentials`]; [`authorize`] checks them against the user named in
//! the request path. Any failure is `401` with a basic-auth challenge.

use actix_web::dev::Payload;
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures_util::future::{Ready, ready};
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::{Error, LoginCredentials, User, UserId};

use super::ApiResult;
use super::state::HttpState;

const SCHEME: &str = "Basic ";

/// Credentials decoded from an `Authorization: Basic ...` header.
#[derive(Debug, Clone)]
pub struct BasicAuth(LoginCredentials);

impl BasicAuth {
    /// Decoded credentials.
    pub fn credentials(&self) -> &LoginCredentials {
        &self.0
    }
}

fn malformed() -> Error {
    Error::unauthorized("malformed basic credentials")
}

fn decode(headers: &HeaderMap) -> ApiResult<LoginCredentials> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing basic credentials"))?
        .to_str()
        .map_err(|_| malformed())?;
    let encoded = value
        .get(..SCHEME.len())
        .filter(|scheme| scheme.eq_ignore_ascii_case(SCHEME))
        .and_then(|_| value.get(SCHEME.len()..))
        .ok_or_else(malformed)?;

    let bytes = Zeroizing::new(STANDARD.decode(encoded.trim()).map_err(|_| malformed())?);
    let text = std::str::from_utf8(&bytes).map_err(|_| malformed())?;
    let (username, password) = text.split_once(':').ok_or_else(malformed)?;

    LoginCredentials::try_from_parts(username, password)
        .map_err(|_| Error::unauthorized("invalid credentials"))
}

impl FromRequest for BasicAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(decode(req.headers()).map(Self).inspect_err(|err| {
            debug!(path = req.path(), reason = err.message(), "rejected basic credentials");
        }))
    }
}

/// Load the user `id` when `auth` matches its stored credentials.
pub async fn authorize(state: &HttpState, id: &UserId, auth: &BasicAuth) -> ApiResult<User> {
    state.login.authenticate(id, auth.credentials()).await
}
