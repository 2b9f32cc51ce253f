//! Order and product models.
//!
//! Orders embed their product list as a serialised JSON string. The string
//! form is what gets persisted; [`Order`] is the decoded read model handed to
//! clients listing their orders.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::UserId;

/// Database-generated order identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = i32, example = 1)]
pub struct OrderId(i32);

impl OrderId {
    /// Wrap a raw identifier read from storage.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Documented shape of a product line embedded in an order.
///
/// Clients may send lines with other fields or other value types; the list
/// is stored verbatim, so this type only describes the expected payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Catalogue identifier.
    #[schema(example = "1")]
    pub id: String,
    #[schema(example = "assumenda autem officia")]
    pub title: String,
    /// Decimal price kept in its string form to avoid float rounding.
    #[schema(example = "97.00")]
    pub price: String,
    /// Units ordered.
    #[schema(example = 1)]
    pub quantity: u32,
    #[schema(example = "https://images.unsplash.com/photo-1444881421460-d838c3b98f95")]
    pub image: String,
}

/// Product list in its stored, serialised form.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use storefront::domain::SerializedProducts;
///
/// let products = json!([{ "id": "1", "title": "mug", "price": 9.5, "colour": "blue" }]);
/// let stored = SerializedProducts::encode(&products).expect("encode");
/// assert_eq!(stored.decode().expect("decode"), products);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String)]
pub struct SerializedProducts(String);

impl SerializedProducts {
    /// Serialise a product list exactly as received.
    pub fn encode(products: &Value) -> Result<Self, serde_json::Error> {
        serde_json::to_string(products).map(Self)
    }

    /// Wrap a string read back from storage without inspecting it.
    pub fn from_stored(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Decode the stored form back into structured JSON.
    pub fn decode(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.0)
    }

    /// Borrow the stored string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Order payload submitted for persistence.
///
/// The caller serialises the product list before building a draft; storage
/// receives the draft unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderDraft {
    /// Owner of the order.
    pub userid: UserId,
    /// Product list as the client sent it, serialised.
    pub products: SerializedProducts,
}

/// Order exactly as persisted, including its generated identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderRecord {
    /// Generated identifier.
    pub id: OrderId,
    /// Owner of the order.
    pub userid: UserId,
    /// Product list in its stored form.
    pub products: SerializedProducts,
}

/// Order read model with the product list decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    /// Generated identifier.
    pub id: OrderId,
    /// Owner of the order.
    pub userid: UserId,
    /// Product list decoded from storage.
    #[schema(value_type = Vec<Product>)]
    pub products: Value,
}

impl OrderRecord {
    /// Decode the stored product list into an [`Order`].
    pub fn into_order(self) -> Result<Order, serde_json::Error> {
        let products = self.products.decode()?;
        Ok(Order {
            id: self.id,
            userid: self.userid,
            products,
        })
    }
}
