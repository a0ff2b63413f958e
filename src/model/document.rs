//! Structured introduce-goods document and its products.
//!
//! Field names follow the API's JSON contract verbatim; dates travel as `YYYY-MM-DD`.

// self
use crate::{_prelude::*, model::DocumentType};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Document announcing goods entering circulation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
	/// Participant block.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<Description>,
	/// Caller-side document identifier.
	pub doc_id: String,
	/// Caller-side document status.
	pub doc_status: String,
	/// Document type code.
	pub doc_type: DocumentType,
	/// Whether the goods are imported.
	#[serde(rename = "importRequest")]
	pub import_request: bool,
	/// Owner taxpayer number.
	pub owner_inn: String,
	/// Participant taxpayer number.
	pub participant_inn: String,
	/// Producer taxpayer number.
	pub producer_inn: String,
	/// Production date.
	#[serde(with = "iso_date")]
	pub production_date: Date,
	/// Production type (own production, contract production, ...).
	pub production_type: String,
	/// Goods listed by the document.
	#[serde(default)]
	pub products: Vec<Product>,
	/// Registration date.
	#[serde(with = "iso_date")]
	pub reg_date: Date,
	/// Registration number.
	pub reg_number: String,
}
impl Document {
	/// Creates an introduce-goods document with no products; extend `products` as needed.
	#[allow(clippy::too_many_arguments)]
	pub fn introduce_goods(
		doc_id: impl Into<String>,
		participant_inn: impl Into<String>,
		owner_inn: impl Into<String>,
		producer_inn: impl Into<String>,
		production_type: impl Into<String>,
		production_date: Date,
		reg_number: impl Into<String>,
		reg_date: Date,
	) -> Self {
		let participant_inn = participant_inn.into();

		Self {
			description: Some(Description { participant_inn: participant_inn.clone() }),
			doc_id: doc_id.into(),
			doc_status: String::new(),
			doc_type: DocumentType::LpIntroduceGoods,
			import_request: false,
			owner_inn: owner_inn.into(),
			participant_inn,
			producer_inn: producer_inn.into(),
			production_date,
			production_type: production_type.into(),
			products: Vec::new(),
			reg_date,
			reg_number: reg_number.into(),
		}
	}

	/// Appends a product.
	pub fn with_product(mut self, product: Product) -> Self {
		self.products.push(product);

		self
	}
}

/// Participant block of a [`Document`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
	/// Participant taxpayer number.
	pub participant_inn: String,
}

/// Single marked item inside a [`Document`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
	/// Conformity certificate kind.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub certificate_document: Option<String>,
	/// Conformity certificate date.
	#[serde(default, skip_serializing_if = "Option::is_none", with = "iso_date::option")]
	pub certificate_document_date: Option<Date>,
	/// Conformity certificate number.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub certificate_document_number: Option<String>,
	/// Owner taxpayer number.
	pub owner_inn: String,
	/// Producer taxpayer number.
	pub producer_inn: String,
	/// Production date.
	#[serde(with = "iso_date")]
	pub production_date: Date,
	/// Commodity nomenclature code.
	pub tnved_code: String,
	/// Unit identification code.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub uit_code: Option<String>,
	/// Transport package identification code.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub uitu_code: Option<String>,
}
impl Product {
	/// Creates a product identified by its unit code.
	pub fn with_uit(
		uit_code: impl Into<String>,
		tnved_code: impl Into<String>,
		owner_inn: impl Into<String>,
		producer_inn: impl Into<String>,
		production_date: Date,
	) -> Self {
		Self {
			certificate_document: None,
			certificate_document_date: None,
			certificate_document_number: None,
			owner_inn: owner_inn.into(),
			producer_inn: producer_inn.into(),
			production_date,
			tnved_code: tnved_code.into(),
			uit_code: Some(uit_code.into()),
			uitu_code: None,
		}
	}

	/// Attaches conformity certificate details.
	pub fn with_certificate(
		mut self,
		kind: impl Into<String>,
		number: impl Into<String>,
		date: Date,
	) -> Self {
		self.certificate_document = Some(kind.into());
		self.certificate_document_number = Some(number.into());
		self.certificate_document_date = Some(date);

		self
	}
}
