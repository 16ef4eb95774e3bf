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
    types::{Category, CategoryPayload, DataResponse},
};

fn category_from_row(row: &sqlx::sqlite::SqliteRow) -> AppResult<Category> {
    let id: String = row.try_get("id")?;
    Ok(Category {
        id: Uuid::parse_str(&id)
            .map_err(|e| AppError::Database(format!("invalid category id {}: {}", id, e)))?,
        name: row.try_get("name")?,
    })
}

fn validated_name(payload: &CategoryPayload) -> AppResult<&str> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput("name must not be empty".to_string()));
    }
    Ok(name)
}

pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows =
        sqlx::query("SELECT id, name FROM categories ORDER BY name ASC").fetch_all(&state.db).await?;
    let items = rows.iter().map(category_from_row).collect::<AppResult<Vec<Category>>>()?;
    Ok(Json(DataResponse { data: items }))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let row = sqlx::query("SELECT id, name FROM categories WHERE id = ?1")
        .bind(id.to_string())
        .fetch_optional(&state.db)
        .await?
        .ok_or_not_found("category")?;
    Ok(Json(category_from_row(&row)?))
}

pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<CategoryPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(req) = payload?;
    let name = validated_name(&req)?.to_string();
    let category = Category { id: Uuid::new_v4(), name };

    sqlx::query("INSERT INTO categories (id, name) VALUES (?1, ?2)")
        .bind(category.id.to_string())
        .bind(&category.name)
        .execute(&state.db)
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<CategoryPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(req) = payload?;
    let name = validated_name(&req)?.to_string();

    let result = sqlx::query("UPDATE categories SET name = ?1 WHERE id = ?2")
        .bind(&name)
        .bind(id.to_string())
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("category not found".to_string()));
    }
    Ok(Json(Category { id, name }))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let result =
        sqlx::query("DELETE FROM categories WHERE id = ?1").bind(id.to_string()).execute(&state.db).await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("category not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
