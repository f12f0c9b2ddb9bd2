// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Body and query extractors whose rejections use the JSON error shape.

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::HttpError;

/// JSON request body. A body that fails to parse is a 400.
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                debug!(rejection = %rejection, "Rejected request body");
                Err(HttpError::malformed(rejection.body_text()))
            }
        }
    }
}

/// JSON body of an action endpoint; an empty body means `T::default()`.
pub struct OptionalPayload<T>(pub T);

impl<S, T> FromRequest<S> for OptionalPayload<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes: Bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| HttpError::malformed(rejection.body_text()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }
        serde_json::from_slice(&bytes).map(Self).map_err(|e| {
            debug!(error = %e, "Rejected request body");
            HttpError::malformed(format!("Failed to parse the request body as JSON: {e}"))
        })
    }
}

/// Query string parameters. A query string that fails to parse is a 400.
pub struct Params<T>(pub T);

impl<S, T> FromRequestParts<S> for Params<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => {
                debug!(rejection = %rejection, "Rejected query string");
                Err(HttpError::malformed(rejection.body_text()))
            }
        }
    }
}
