//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer entity
///
/// `default_cans` pre-fills the can count on new delivery requests;
/// `price_per_can` drives the billing aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,

    pub name: String,

    pub phone: Option<String>,

    pub address: String,

    /// Suggested can count for new requests (>= 0)
    pub default_cans: i64,

    /// Unit price used for billing stats (1..=999)
    pub price_per_can: i64,

    pub notes: Option<String>,

    /// Creation time (Unix timestamp millis)
    pub created_at: i64,

    /// Refreshed on every mutation
    pub updated_at: i64,
}

/// Create customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCreate {
    pub name: String,
    pub phone: Option<String>,
    pub address: String,
    #[serde(default = "default_cans_default")]
    pub default_cans: i64,
    pub price_per_can: i64,
    pub notes: Option<String>,
}

fn default_cans_default() -> i64 {
    1
}

/// Partial update customer payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_cans: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_can: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
