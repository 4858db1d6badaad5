//! # GS1 Web Vocabulary
//!
//! Master-data types from the GS1 Web Vocabulary (<https://gs1.org/voc/>)
//! used to describe trading parties, locations and trade items, together
//! with their predicate bindings and the default JSON-LD context.
//!
//! | Type | `@type` | Notes |
//! |------|---------|-------|
//! | [`TradingParty`] | `gs1:Organization` | `@id` and `gs1:partyGLN` are PGLNs |
//! | [`Location`] | `gs1:Place` | `@id` and `gs1:globalLocationNumber` are PGLNs |
//! | [`TradeItem`] | `gs1:Product` | `@id` is usually a GTIN Digital Link URI |
//! | [`PostalAddress`] | `gs1:PostalAddress` | nested under `gs1:address` |
//! | [`GeoCoordinates`] | `gs1:GeoCoordinates` | nested under `gs1:geo` |

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use tracevocab_core::Pgln;

use crate::binding::{ClassBinding, TermBinding};
use crate::impl_vocabulary_element;

/// Namespace of the GS1 Web Vocabulary.
pub const GS1_NAMESPACE: &str = "http://gs1.org/voc/";

/// The context assigned to GS1 Web Vocabulary elements that carry none.
///
/// Key order matters: `gs1` precedes `@vocab`, so GS1 predicates compact to
/// `gs1:` terms rather than bare terms.
pub fn default_context() -> Value {
    json!({
        "cbvmda": "urn:epcglobal:cbvmda:mda",
        "xsd": "http://www.w3.org/2001/XMLSchema#",
        "gs1": GS1_NAMESPACE,
        "@vocab": GS1_NAMESPACE,
        "gdst": "https://traceability-dialogue.org/vocab"
    })
}

// ---------------------------------------------------------------------------
// Bindings
// ---------------------------------------------------------------------------

/// Binding for [`PostalAddress`].
pub const POSTAL_ADDRESS: ClassBinding = ClassBinding {
    type_iri: Some("http://gs1.org/voc/PostalAddress"),
    terms: &[
        TermBinding::value("street_address", "http://gs1.org/voc/streetAddress"),
        TermBinding::value("address_locality", "http://gs1.org/voc/addressLocality"),
        TermBinding::value("address_region", "http://gs1.org/voc/addressRegion"),
        TermBinding::value("postal_code", "http://gs1.org/voc/postalCode"),
        TermBinding::value("address_country", "http://gs1.org/voc/addressCountry"),
    ],
};

/// Binding for [`GeoCoordinates`].
pub const GEO_COORDINATES: ClassBinding = ClassBinding {
    type_iri: Some("http://gs1.org/voc/GeoCoordinates"),
    terms: &[
        TermBinding::value("latitude", "http://gs1.org/voc/latitude"),
        TermBinding::value("longitude", "http://gs1.org/voc/longitude"),
    ],
};

/// Binding for [`TradingParty`].
pub const TRADING_PARTY: ClassBinding = ClassBinding {
    type_iri: Some("http://gs1.org/voc/Organization"),
    terms: &[
        TermBinding::value("id", "@id"),
        TermBinding::value("party_gln", "http://gs1.org/voc/partyGLN"),
        TermBinding::value("organization_name", "http://gs1.org/voc/organizationName"),
        TermBinding::node("address", "http://gs1.org/voc/address", &POSTAL_ADDRESS),
    ],
};

/// Binding for [`Location`].
pub const LOCATION: ClassBinding = ClassBinding {
    type_iri: Some("http://gs1.org/voc/Place"),
    terms: &[
        TermBinding::value("id", "@id"),
        TermBinding::value("gln", "http://gs1.org/voc/globalLocationNumber"),
        TermBinding::value("name", "http://gs1.org/voc/physicalLocationName"),
        TermBinding::node("address", "http://gs1.org/voc/address", &POSTAL_ADDRESS),
        TermBinding::node("geo", "http://gs1.org/voc/geo", &GEO_COORDINATES),
    ],
};

/// Binding for [`TradeItem`].
pub const TRADE_ITEM: ClassBinding = ClassBinding {
    type_iri: Some("http://gs1.org/voc/Product"),
    terms: &[
        TermBinding::value("id", "@id"),
        TermBinding::value("gtin", "http://gs1.org/voc/gtin"),
        TermBinding::value("product_description", "http://gs1.org/voc/productDescription"),
        TermBinding::value("regulated_product_name", "http://gs1.org/voc/regulatedProductName"),
        TermBinding::value("country_of_origin", "http://gs1.org/voc/countryOfOrigin"),
    ],
};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_locality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// ISO 3166-1 country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_country: Option<String>,
}

/// WGS84 coordinates of a place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A trading partner, department or group identified by a PGLN.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingParty {
    /// JSON-LD context carried by this element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Pgln>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_gln: Option<Pgln>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<PostalAddress>,
}

impl_vocabulary_element!(TradingParty, TRADING_PARTY);

/// A physical location such as a farm, vessel or processing plant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// JSON-LD context carried by this element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Pgln>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gln: Option<Pgln>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<PostalAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoCoordinates>,
}

impl_vocabulary_element!(Location, LOCATION);

/// A product class identified by a GTIN.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeItem {
    /// JSON-LD context carried by this element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gtin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regulated_product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_of_origin: Option<String>,
}

impl_vocabulary_element!(TradeItem, TRADE_ITEM);
