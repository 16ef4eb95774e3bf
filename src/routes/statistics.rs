use axum::{extract::State, response::IntoResponse, Json};
use sqlx::Row;

use crate::{
    error::AppResult,
    state::AppState,
    types::{CategoryShare, DataResponse, SupplierShare},
};

// Percentage of products per category. Groups without products yield no row.
pub async fn products_per_category(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = sqlx::query(
        r#"SELECT c.name AS category_name,
                  COUNT(*) * 100.0 / SUM(COUNT(*)) OVER () AS percentage
           FROM products p
           JOIN categories c ON c.id = p.category_id
           GROUP BY c.name
           ORDER BY c.name ASC"#,
    )
    .fetch_all(&state.db)
    .await?;

    let items = rows
        .iter()
        .map(|r| -> AppResult<CategoryShare> {
            Ok(CategoryShare {
                category_name: r.try_get("category_name")?,
                percentage: r.try_get("percentage")?,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Json(DataResponse { data: items }))
}

// Percentage of products per supplier.
pub async fn products_per_supplier(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = sqlx::query(
        r#"SELECT s.name AS supplier_name,
                  COUNT(*) * 100.0 / SUM(COUNT(*)) OVER () AS percentage
           FROM products p
           JOIN suppliers s ON s.id = p.supplier_id
           GROUP BY s.name
           ORDER BY s.name ASC"#,
    )
    .fetch_all(&state.db)
    .await?;

    let items = rows
        .iter()
        .map(|r| -> AppResult<SupplierShare> {
            Ok(SupplierShare {
                supplier_name: r.try_get("supplier_name")?,
                percentage: r.try_get("percentage")?,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Json(DataResponse { data: items }))
}
