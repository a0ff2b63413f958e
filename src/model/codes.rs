//! Enumerated wire codes: document formats, document types, and product groups.

// std
use std::borrow::Cow;
// crates.io
use serde::{Deserializer, Serializer, de};
// self
use crate::_prelude::*;

macro_rules! def_codes {
	($name:ident, $doc:literal, $kind:literal { $($variant:ident => $code:literal,)+ }) => {
		#[doc = $doc]
		#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
		pub enum $name {
			$(
				#[doc = concat!("`", $code, "`.")]
				$variant,
			)+
		}
		impl $name {
			/// Every code, in declaration order.
			pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

			/// Returns the wire code.
			pub const fn as_str(self) -> &'static str {
				match self {
					$(Self::$variant => $code,)+
				}
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(self.as_str())
			}
		}
		impl FromStr for $name {
			type Err = UnknownCodeError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				match s {
					$($code => Ok(Self::$variant),)+
					_ => Err(UnknownCodeError { kind: $kind, value: s.to_owned() }),
				}
			}
		}
		impl Serialize for $name {
			fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
			where
				S: Serializer,
			{
				serializer.serialize_str(self.as_str())
			}
		}
		impl<'de> Deserialize<'de> for $name {
			fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
			where
				D: Deserializer<'de>,
			{
				let raw = <Cow<'de, str>>::deserialize(deserializer)?;

				raw.parse().map_err(de::Error::custom)
			}
		}
	};
}

/// Error returned when a string does not name a known code.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown {kind} code `{value}`.")]
pub struct UnknownCodeError {
	/// Code table that was searched.
	pub kind: &'static str,
	/// Rejected input.
	pub value: String,
}

def_codes! { DocumentFormat, "Encoding of the `product_document` payload.", "document format" {
		Manual => "MANUAL",
		Xml => "XML",
		Csv => "CSV",
} }

def_codes! { ProductGroup, "Product group partitioning the document namespace.", "product group" {
		Clothes => "clothes",
		Shoes => "shoes",
		Tobacco => "tobacco",
		Perfumery => "perfumery",
		Tires => "tires",
		Electronics => "electronics",
		Pharma => "pharma",
		Milk => "milk",
		Bicycle => "bicycle",
		Wheelchairs => "wheelchairs",
} }

def_codes! { DocumentType, "Document type accepted by the unified creation endpoint.", "document type" {
		AggregationDocument => "AGGREGATION_DOCUMENT",
		AggregationDocumentCsv => "AGGREGATION_DOCUMENT_CSV",
		AggregationDocumentXml => "AGGREGATION_DOCUMENT_XML",
		DisaggregationDocument => "DISAGGREGATION_DOCUMENT",
		DisaggregationDocumentCsv => "DISAGGREGATION_DOCUMENT_CSV",
		DisaggregationDocumentXml => "DISAGGREGATION_DOCUMENT_XML",
		ReaggregationDocument => "REAGGREGATION_DOCUMENT",
		ReaggregationDocumentCsv => "REAGGREGATION_DOCUMENT_CSV",
		ReaggregationDocumentXml => "REAGGREGATION_DOCUMENT_XML",
		LpIntroduceGoods => "LP_INTRODUCE_GOODS",
		LpShipGoods => "LP_SHIP_GOODS",
		LpShipGoodsCsv => "LP_SHIP_GOODS_CSV",
		LpShipGoodsXml => "LP_SHIP_GOODS_XML",
		LpIntroduceGoodsCsv => "LP_INTRODUCE_GOODS_CSV",
		LpIntroduceGoodsXml => "LP_INTRODUCE_GOODS_XML",
		LpAcceptGoods => "LP_ACCEPT_GOODS",
		LpAcceptGoodsXml => "LP_ACCEPT_GOODS_XML",
		LkRemark => "LK_REMARK",
		LkRemarkCsv => "LK_REMARK_CSV",
		LkRemarkXml => "LK_REMARK_XML",
		LkReceipt => "LK_RECEIPT",
		LkReceiptXml => "LK_RECEIPT_XML",
		LkReceiptCsv => "LK_RECEIPT_CSV",
		LpGoodsImport => "LP_GOODS_IMPORT",
		LpGoodsImportCsv => "LP_GOODS_IMPORT_CSV",
		LpGoodsImportXml => "LP_GOODS_IMPORT_XML",
		LpCancelShipment => "LP_CANCEL_SHIPMENT",
		LpCancelShipmentCsv => "LP_CANCEL_SHIPMENT_CSV",
		LpCancelShipmentXml => "LP_CANCEL_SHIPMENT_XML",
		LkKmCancellation => "LK_KM_CANCELLATION",
		LkKmCancellationCsv => "LK_KM_CANCELLATION_CSV",
		LkKmCancellationXml => "LK_KM_CANCELLATION_XML",
		LkAppliedKmCancellation => "LK_APPLIED_KM_CANCELLATION",
		LkAppliedKmCancellationCsv => "LK_APPLIED_KM_CANCELLATION_CSV",
		LkAppliedKmCancellationXml => "LK_APPLIED_KM_CANCELLATION_XML",
		LkContractCommissioning => "LK_CONTRACT_COMMISSIONING",
		LkContractCommissioningCsv => "LK_CONTRACT_COMMISSIONING_CSV",
		LkContractCommissioningXml => "LK_CONTRACT_COMMISSIONING_XML",
		LkIndiCommissioning => "LK_INDI_COMMISSIONING",
		LkIndiCommissioningCsv => "LK_INDI_COMMISSIONING_CSV",
		LkIndiCommissioningXml => "LK_INDI_COMMISSIONING_XML",
		LpShipReceipt => "LP_SHIP_RECEIPT",
		LpShipReceiptCsv => "LP_SHIP_RECEIPT_CSV",
		LpShipReceiptXml => "LP_SHIP_RECEIPT_XML",
		OstDescription => "OST_DESCRIPTION",
		OstDescriptionCsv => "OST_DESCRIPTION_CSV",
		OstDescriptionXml => "OST_DESCRIPTION_XML",
		Crossborder => "CROSSBORDER",
		CrossborderCsv => "CROSSBORDER_CSV",
		CrossborderXml => "CROSSBORDER_XML",
		LpIntroduceOst => "LP_INTRODUCE_OST",
		LpIntroduceOstCsv => "LP_INTRODUCE_OST_CSV",
		LpIntroduceOstXml => "LP_INTRODUCE_OST_XML",
		LpReturn => "LP_RETURN",
		LpReturnCsv => "LP_RETURN_CSV",
		LpReturnXml => "LP_RETURN_XML",
		LpShipGoodsCrossborder => "LP_SHIP_GOODS_CROSSBORDER",
		LpShipGoodsCrossborderCsv => "LP_SHIP_GOODS_CROSSBORDER_CSV",
		LpShipGoodsCrossborderXml => "LP_SHIP_GOODS_CROSSBORDER_XML",
		LpCancelShipmentCrossborder => "LP_CANCEL_SHIPMENT_CROSSBORDER",
} }
