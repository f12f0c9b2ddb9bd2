// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

//! API boundary of the hotel back office.
//!
//! Handlers in [`handlers`] take the persistence adapter, the parsed
//! request DTOs from [`request_response`] and a [`handlers::Now`]; they
//! return response DTOs or an [`ApiError`]. The HTTP layer only routes,
//! extracts and serializes.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Role};
pub use error::{ApiError, AuthError, translate_domain_error};
pub use handlers::Now;
pub use request_response::{ListQuery, ListResponse, MessageResponse};
