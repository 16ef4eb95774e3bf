use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sqlx::Row;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, OptionExt},
    state::AppState,
    types::{DataResponse, Supplier, SupplierPayload},
};

fn supplier_from_row(row: &sqlx::sqlite::SqliteRow) -> AppResult<Supplier> {
    let id: String = row.try_get("id")?;
    Ok(Supplier {
        id: Uuid::parse_str(&id)
            .map_err(|e| AppError::Database(format!("invalid supplier id {}: {}", id, e)))?,
        name: row.try_get("name")?,
    })
}

fn validated_name(payload: &SupplierPayload) -> AppResult<&str> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput("name must not be empty".to_string()));
    }
    Ok(name)
}

pub async fn list_suppliers(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = sqlx::query("SELECT id, name FROM suppliers ORDER BY name ASC").fetch_all(&state.db).await?;
    let items = rows.iter().map(supplier_from_row).collect::<AppResult<Vec<Supplier>>>()?;
    Ok(Json(DataResponse { data: items }))
}

pub async fn get_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let row = sqlx::query("SELECT id, name FROM suppliers WHERE id = ?1")
        .bind(id.to_string())
        .fetch_optional(&state.db)
        .await?
        .ok_or_not_found("supplier")?;
    Ok(Json(supplier_from_row(&row)?))
}

pub async fn create_supplier(
    State(state): State<AppState>,
    payload: Result<Json<SupplierPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(req) = payload?;
    let name = validated_name(&req)?.to_string();
    // Supplier names are unique; the constraint violation surfaces as 409
    let supplier = Supplier { id: Uuid::new_v4(), name };

    sqlx::query("INSERT INTO suppliers (id, name) VALUES (?1, ?2)")
        .bind(supplier.id.to_string())
        .bind(&supplier.name)
        .execute(&state.db)
        .await?;

    Ok((StatusCode::CREATED, Json(supplier)))
}

pub async fn update_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<SupplierPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(req) = payload?;
    let name = validated_name(&req)?.to_string();

    let result = sqlx::query("UPDATE suppliers SET name = ?1 WHERE id = ?2")
        .bind(&name)
        .bind(id.to_string())
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("supplier not found".to_string()));
    }
    Ok(Json(Supplier { id, name }))
}

pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let result =
        sqlx::query("DELETE FROM suppliers WHERE id = ?1").bind(id.to_string()).execute(&state.db).await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("supplier not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
