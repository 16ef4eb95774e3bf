use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
}

/// Product as it appears on the wire: the category/supplier foreign keys are
/// resolved into embedded objects, `added_date` round-trips as `YYYY-MM-DD`.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: Uuid,
    pub reference: String,
    pub name: String,
    pub added_date: NaiveDate,
    pub status: String,
    pub price: f64,
    pub stock_city: String,
    pub quantity: i64,
    pub category: Option<Category>,
    pub supplier: Option<Supplier>,
}

/// Create/update request body for a product. Update is a full overwrite, so
/// the same payload serves both. `added_date` defaults to today on create.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPayload {
    pub reference: String,
    pub name: String,
    pub added_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock_city: String,
    #[serde(default)]
    pub quantity: i64,
    pub category_id: Uuid,
    pub supplier_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupplierPayload {
    pub name: String,
}

/// Wrapper for collection and derived payloads: `{"data": ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryShare {
    pub category_name: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SupplierShare {
    pub supplier_name: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DistanceDto {
    pub distance_km: f64,
}
