//! Construction-time configuration: quota, window length, and target environment.

// self
use crate::{_prelude::*, error::ConfigError, model::ProductGroup};

const PRODUCTION_BASE_URL: &str = "https://ismp.crpt.ru/api/v3";
const DEMO_BASE_URL: &str = "https://markirovka.demo.crpt.tech/api/v3";

const AUTH_CERT_KEY_PATH: &str = "/auth/cert/key";
const AUTH_CERT_TOKEN_PATH: &str = "/auth/cert/";
const CREATE_DOCUMENT_PATH: &str = "/lk/documents/create";

/// Remote deployment the client talks to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Environment {
	/// Live API.
	#[default]
	Production,
	/// Sandbox API.
	Demo,
}
impl Environment {
	/// Base URL every endpoint path is appended to.
	pub const fn base_url(self) -> &'static str {
		match self {
			Self::Production => PRODUCTION_BASE_URL,
			Self::Demo => DEMO_BASE_URL,
		}
	}
}

/// Logical length of one quota window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeUnit {
	/// One second.
	Second,
	/// One minute.
	Minute,
	/// One hour.
	Hour,
	/// One day.
	Day,
}
impl TimeUnit {
	/// Absolute duration of a single unit.
	pub const fn as_duration(self) -> Duration {
		match self {
			Self::Second => Duration::from_secs(1),
			Self::Minute => Duration::from_secs(60),
			Self::Hour => Duration::from_secs(60 * 60),
			Self::Day => Duration::from_secs(24 * 60 * 60),
		}
	}
}

/// Client configuration surface.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// Maximum request initiations per window. Must be positive.
	pub request_limit: u32,
	/// Window length; the quota resets to `request_limit` once per window.
	pub period: TimeUnit,
	/// Target deployment.
	pub environment: Environment,
	/// Overrides the environment's base URL when set (proxies, mock servers).
	pub base_url: Option<Url>,
	/// Per-request timeout applied by the built-in reqwest transport.
	pub timeout: Option<Duration>,
}
impl ClientConfig {
	/// Creates a production configuration allowing `request_limit` calls per `period`.
	pub fn new(period: TimeUnit, request_limit: u32) -> Self {
		Self {
			request_limit,
			period,
			environment: Environment::default(),
			base_url: None,
			timeout: None,
		}
	}

	/// Selects the target environment.
	pub fn with_environment(mut self, environment: Environment) -> Self {
		self.environment = environment;

		self
	}

	/// Points the client at an explicit base URL instead of the environment default.
	pub fn with_base_url(mut self, base_url: Url) -> Self {
		self.base_url = Some(base_url);

		self
	}

	/// Bounds every HTTP call made by the built-in transport.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Checks invariants that must hold before any component is built.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.request_limit == 0 {
			return Err(ConfigError::InvalidRequestLimit { limit: self.request_limit });
		}

		Ok(())
	}

	/// Resolves the endpoint set for this configuration.
	pub fn endpoints(&self) -> Result<Endpoints, ConfigError> {
		match &self.base_url {
			Some(base) => Endpoints::new(base.as_str()),
			None => Endpoints::new(self.environment.base_url()),
		}
	}
}

/// Absolute endpoint URLs derived from a base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
	/// Certificate challenge (`GET`).
	pub cert_key: Url,
	/// Certificate exchange (`POST`).
	pub cert_token: Url,
	/// Document creation (`POST`), without the product-group query.
	pub create_document: Url,
}
impl Endpoints {
	/// Derives every endpoint from `base`; paths are appended, never resolved relatively.
	pub fn new(base: &str) -> Result<Self, ConfigError> {
		let base = base.trim_end_matches('/');

		Ok(Self {
			cert_key: join(base, AUTH_CERT_KEY_PATH)?,
			cert_token: join(base, AUTH_CERT_TOKEN_PATH)?,
			create_document: join(base, CREATE_DOCUMENT_PATH)?,
		})
	}

	/// Document creation URL scoped to `group` via the `pg` query parameter.
	pub fn create_document_for(&self, group: ProductGroup) -> Url {
		let mut url = self.create_document.clone();

		url.query_pairs_mut().append_pair("pg", group.as_str());

		url
	}
}

fn join(base: &str, path: &str) -> Result<Url, ConfigError> {
	Url::parse(&format!("{base}{path}")).map_err(|source| ConfigError::InvalidBaseUrl { source })
}
