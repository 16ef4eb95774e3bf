use axum::{
    extract::{Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    filter,
    routes::products::product_from_row,
    state::AppState,
    types::Product,
};

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>, // csv or json
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ExportData {
    pub exported_at: String,
    pub total: usize,
    pub products: Vec<Product>,
}

const CSV_HEADER: &str = "Reference,Name,Added Date,Status,Category,Price,Stock City,Supplier,Quantity\n";

fn escape_csv(value: &str) -> String {
    value.replace('"', "\"\"")
}

fn format_product_csv(p: &Product) -> String {
    format!(
        "\"{}\",\"{}\",{},\"{}\",\"{}\",{:.2},\"{}\",\"{}\",{}\n",
        escape_csv(&p.reference),
        escape_csv(&p.name),
        p.added_date,
        escape_csv(&p.status),
        escape_csv(p.category.as_ref().map(|c| c.name.as_str()).unwrap_or("Unknown")),
        p.price,
        escape_csv(&p.stock_city),
        escape_csv(p.supplier.as_ref().map(|s| s.name.as_str()).unwrap_or("Unknown")),
        p.quantity,
    )
}

/// Product report as a downloadable file. The heavy PDF rendering of the
/// report lives outside this service; this endpoint ships the report data.
pub async fn export_products(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    let requested_limit = query.limit.unwrap_or(10_000);
    if requested_limit > 25_000 {
        tracing::warn!("Export limit clamped from {} to 25000", requested_limit);
    }
    let limit = requested_limit.clamp(1, 25_000);

    let sql = format!("{} ORDER BY p.added_date ASC, p.id ASC LIMIT ?1", filter::LIST_SELECT);
    let rows = sqlx::query(&sql).bind(limit).fetch_all(&state.db).await?;
    let products = rows.iter().map(product_from_row).collect::<AppResult<Vec<Product>>>()?;

    match query.format.as_deref().unwrap_or("csv") {
        "csv" => {
            let mut csv_content = String::with_capacity(CSV_HEADER.len() + products.len() * 96);
            csv_content.push_str(CSV_HEADER);
            for product in &products {
                csv_content.push_str(&format_product_csv(product));
            }

            let mut response = csv_content.into_response();
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/csv; charset=utf-8"));
            response.headers_mut().insert(
                header::CONTENT_DISPOSITION,
                HeaderValue::from_static("attachment; filename=\"product_report.csv\""),
            );
            Ok(response)
        }
        "json" => {
            let body = ExportData {
                exported_at: chrono::Utc::now().to_rfc3339(),
                total: products.len(),
                products,
            };
            Ok(Json(body).into_response())
        }
        other => Err(AppError::BadRequest(format!("Invalid format '{}'. Use 'csv' or 'json'", other))),
    }
}
