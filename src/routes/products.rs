use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, OptionExt},
    filter::{self, PageRequest, ProductFilter},
    state::AppState,
    types::{ActionResponse, Category, DataResponse, Product, ProductPayload, Supplier},
};

/// Raw listing query parameters. Everything arrives as strings so malformed
/// values can be reported as 400s instead of being dropped silently; list
/// parameters are comma-separated (`categories=Books,Electronics`).
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page_number: Option<String>,
    pub limit: Option<String>,
    pub last_created_at: Option<String>,
    pub reference: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub categories: Option<String>,
    pub suppliers: Option<String>,
    pub stock_cities: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

fn parse_date(value: Option<&str>, field: &str) -> AppResult<Option<NaiveDate>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => NaiveDate::parse_from_str(v, "%Y-%m-%d").map(Some).map_err(|_| {
            AppError::InvalidInput(format!("invalid {}: expected YYYY-MM-DD, got {}", field, v))
        }),
    }
}

fn parse_price(value: Option<&str>, field: &str) -> AppResult<Option<f64>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v
            .parse::<f64>()
            .map(Some)
            .map_err(|_| AppError::InvalidInput(format!("invalid {}: expected a number, got {}", field, v))),
    }
}

fn parse_int(value: Option<&str>, field: &str) -> AppResult<Option<i64>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v
            .parse::<i64>()
            .map(Some)
            .map_err(|_| AppError::InvalidInput(format!("invalid {}: expected an integer, got {}", field, v))),
    }
}

fn split_multi(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| v.split(',').map(str::trim).filter(|s| !s.is_empty()).map(ToString::to_string).collect())
        .unwrap_or_default()
}

pub(crate) fn parse_list_query(raw: &ListQuery) -> AppResult<(ProductFilter, PageRequest)> {
    let filter = ProductFilter {
        reference: raw.reference.clone().filter(|r| !r.trim().is_empty()),
        start_date: parse_date(raw.start_date.as_deref(), "start_date")?,
        end_date: parse_date(raw.end_date.as_deref(), "end_date")?,
        min_price: parse_price(raw.min_price.as_deref(), "min_price")?,
        max_price: parse_price(raw.max_price.as_deref(), "max_price")?,
        categories: split_multi(raw.categories.as_deref()),
        suppliers: split_multi(raw.suppliers.as_deref()),
        stock_cities: split_multi(raw.stock_cities.as_deref()),
        statuses: split_multi(raw.status.as_deref()),
        search: raw.search.clone().filter(|s| !s.trim().is_empty()),
    };
    let page = PageRequest {
        page: parse_int(raw.page_number.as_deref(), "page_number")?,
        limit: parse_int(raw.limit.as_deref(), "limit")?,
        last_added: parse_date(raw.last_created_at.as_deref(), "last_created_at")?,
    };
    Ok((filter, page))
}

fn parse_id(value: &str, what: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| AppError::Database(format!("invalid {} {}: {}", what, value, e)))
}

/// Maps a joined product row onto the wire DTO.
pub(crate) fn product_from_row(row: &SqliteRow) -> AppResult<Product> {
    let id: String = row.try_get("id")?;
    let added: String = row.try_get("added_date")?;
    let added_date = NaiveDate::parse_from_str(&added, "%Y-%m-%d")
        .map_err(|e| AppError::Database(format!("invalid added_date {}: {}", added, e)))?;

    let category_id: String = row.try_get("category_id")?;
    let category = row
        .try_get::<Option<String>, _>("category_name")?
        .map(|name| -> AppResult<Category> {
            Ok(Category { id: parse_id(&category_id, "category id")?, name })
        })
        .transpose()?;
    let supplier_id: String = row.try_get("supplier_id")?;
    let supplier = row
        .try_get::<Option<String>, _>("supplier_name")?
        .map(|name| -> AppResult<Supplier> {
            Ok(Supplier { id: parse_id(&supplier_id, "supplier id")?, name })
        })
        .transpose()?;

    Ok(Product {
        id: parse_id(&id, "product id")?,
        reference: row.try_get("reference")?,
        name: row.try_get("name")?,
        added_date,
        status: row.try_get("status")?,
        price: row.try_get("price")?,
        stock_city: row.try_get("stock_city")?,
        quantity: row.try_get("quantity")?,
        category,
        supplier,
    })
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(raw): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let (filter_opts, page) = parse_list_query(&raw)?;
    filter_opts.validate()?;
    state.metrics.inc_list_queries();

    let mut qb = filter::build_list_query(&filter_opts, &page);
    let rows = qb.build().fetch_all(&state.db).await?;
    let items = rows.iter().map(product_from_row).collect::<AppResult<Vec<Product>>>()?;

    Ok(Json(DataResponse { data: items }))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let sql = format!("{} WHERE p.id = ?1", filter::LIST_SELECT);
    let row = sqlx::query(&sql)
        .bind(id.to_string())
        .fetch_optional(&state.db)
        .await?
        .ok_or_not_found("product")?;
    Ok(Json(product_from_row(&row)?))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(req) = payload?;
    if req.reference.trim().is_empty() {
        return Err(AppError::InvalidInput("reference must not be empty".to_string()));
    }
    let id = Uuid::new_v4();
    let added_date = req.added_date.unwrap_or_else(|| Utc::now().date_naive());

    sqlx::query(
        r#"INSERT INTO products
           (id, reference, name, added_date, status, price, stock_city, quantity, category_id, supplier_id)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"#,
    )
    .bind(id.to_string())
    .bind(&req.reference)
    .bind(&req.name)
    .bind(added_date.to_string())
    .bind(&req.status)
    .bind(req.price)
    .bind(&req.stock_city)
    .bind(req.quantity)
    .bind(req.category_id.to_string())
    .bind(req.supplier_id.to_string())
    .execute(&state.db)
    .await?;

    state.metrics.inc_products_created();
    Ok(Json(ActionResponse { message: "Product added successfully".to_string() }))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(req) = payload?;
    if req.reference.trim().is_empty() {
        return Err(AppError::InvalidInput("reference must not be empty".to_string()));
    }
    let added_date = req.added_date.unwrap_or_else(|| Utc::now().date_naive());

    // Full-record overwrite, matched by primary key
    let result = sqlx::query(
        r#"UPDATE products
           SET reference = ?1, name = ?2, added_date = ?3, status = ?4, price = ?5,
               stock_city = ?6, quantity = ?7, category_id = ?8, supplier_id = ?9
           WHERE id = ?10"#,
    )
    .bind(&req.reference)
    .bind(&req.name)
    .bind(added_date.to_string())
    .bind(&req.status)
    .bind(req.price)
    .bind(&req.stock_city)
    .bind(req.quantity)
    .bind(req.category_id.to_string())
    .bind(req.supplier_id.to_string())
    .bind(id.to_string())
    .execute(&state.db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("product not found".to_string()));
    }
    state.metrics.inc_products_updated();
    Ok(Json(ActionResponse { message: "Product updated successfully".to_string() }))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let result =
        sqlx::query("DELETE FROM products WHERE id = ?1").bind(id.to_string()).execute(&state.db).await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("product not found".to_string()));
    }
    state.metrics.inc_products_deleted();
    Ok(Json(ActionResponse { message: "Product deleted successfully".to_string() }))
}
