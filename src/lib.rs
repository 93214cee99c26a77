//! Provider variants for a multi-provider OAuth 2.0 / OpenID Connect gateway: default
//! endpoints, provider-specific request headers, email resolution, and session validation.
//!
//! The gateway owns the token exchange, refresh, and session persistence. This crate only
//! supplies what differs per identity service: [`provider::ProviderData`] defaults, the
//! header set sent to protected endpoints, and the [`provider::Provider`] calls that turn a
//! [`session::SessionState`] into an email identity or a go/no-go validity signal.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod context;
pub mod error;
pub mod http;
pub mod obs;
pub mod provider;
pub mod session;

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
		time::Duration as StdDuration,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value as JsonValue;
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, parking_lot as _};
