//! Signing contract for the certificate challenge.

// self
use crate::{_prelude::*, error::BoxError};

/// Produces a detached signature over challenge data with the caller's qualified
/// certificate.
///
/// The cryptography lives outside this crate; implementers typically bridge to a hardware
/// token or a CryptoPro-style service. Closures of the shape
/// `Fn(&str) -> Result<String, E>` implement the trait automatically.
pub trait CertificateSigner
where
	Self: Send + Sync,
{
	/// Signs `data` and returns the base64-encoded signature.
	fn sign(&self, data: &str) -> Result<String, SignerError>;
}
impl<F, E> CertificateSigner for F
where
	F: Fn(&str) -> Result<String, E> + Send + Sync,
	E: Into<BoxError>,
{
	fn sign(&self, data: &str) -> Result<String, SignerError> {
		self(data).map_err(SignerError::new)
	}
}

/// Failure reported by a [`CertificateSigner`].
#[derive(Debug, ThisError)]
#[error("Certificate signer failed to sign the challenge.")]
pub struct SignerError {
	#[source]
	source: BoxError,
}
impl SignerError {
	/// Wraps an arbitrary signer failure.
	pub fn new(source: impl Into<BoxError>) -> Self {
		Self { source: source.into() }
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::error::Error as _;
	// self
	use super::*;

	#[test]
	fn closures_act_as_signers() {
		let signer = |data: &str| Ok::<_, SignerError>(format!("signed:{data}"));

		assert_eq!(signer.sign("abc").expect("Closure signer should succeed."), "signed:abc");
	}

	#[test]
	fn signer_failures_keep_their_source() {
		let signer = |_: &str| Err::<String, _>("token not inserted");
		let err = signer.sign("abc").expect_err("Failing signer should surface its error.");

		assert_eq!(
			err.source().map(ToString::to_string).as_deref(),
			Some("token not inserted")
		);
	}
}
