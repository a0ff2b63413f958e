//! Wire shapes of the document creation call.

// self
use crate::{
	_prelude::*,
	model::{DocumentFormat, DocumentType, ProductGroup},
};

/// Body of `POST /lk/documents/create`, assembled per call and never retained.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubmissionRequest {
	/// Payload encoding.
	#[serde(rename = "document_format")]
	pub format: DocumentFormat,
	/// Base64-encoded document payload.
	#[serde(rename = "product_document")]
	pub payload_base64: String,
	/// Product group the document belongs to.
	pub product_group: ProductGroup,
	/// Base64-encoded detached signature over the payload.
	#[serde(rename = "signature")]
	pub signature_base64: String,
	/// Document type code.
	#[serde(rename = "type")]
	pub document_type: DocumentType,
}

/// Successful document creation reply.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SubmissionResult {
	/// Identifier the API assigned to the document.
	pub document_id: String,
	/// Processing status reported by the API.
	pub status: String,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn request_serializes_wire_names() {
		let request = SubmissionRequest {
			format: DocumentFormat::Manual,
			payload_base64: "e30=".into(),
			product_group: ProductGroup::Shoes,
			signature_base64: "c2ln".into(),
			document_type: DocumentType::LpIntroduceGoods,
		};
		let value = serde_json::to_value(&request).expect("Request should encode.");

		assert_eq!(
			value,
			serde_json::json!({
				"document_format": "MANUAL",
				"product_document": "e30=",
				"product_group": "shoes",
				"signature": "c2ln",
				"type": "LP_INTRODUCE_GOODS",
			})
		);
	}
}
