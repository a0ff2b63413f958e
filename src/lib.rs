//! Rate-limited client for the Chestny ZNAK goods-tracking API.
//!
//! Authenticates with a caller-signed certificate challenge and submits documents under a
//! self-imposed per-window request quota.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod http;
pub mod limit;
pub mod model;
pub mod obs;
pub mod submit;
#[cfg(feature = "reqwest")]
#[doc(hidden)]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests.

	pub use crate::_prelude::*;

	// self
	use crate::{
		client::ReqwestCrptClient,
		config::{ClientConfig, TimeUnit},
		http::ReqwestHttpClient,
	};

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs a [`ReqwestCrptClient`] pointed at `base_url` with a per-minute quota of
	/// `request_limit`.
	pub fn build_reqwest_test_client(base_url: &str, request_limit: u32) -> ReqwestCrptClient {
		let base_url = Url::parse(base_url).expect("Failed to parse mock server base URL.");
		let config = ClientConfig::new(TimeUnit::Minute, request_limit).with_base_url(base_url);

		ReqwestCrptClient::with_http_client(config, test_reqwest_http_client())
			.expect("Failed to build test client.")
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
		time::Duration,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::Date;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use httpmock as _;
