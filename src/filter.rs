//! Filter/query composer for the product listing.
//!
//! Turns a [`ProductFilter`] plus pagination parameters into a single SELECT
//! against the products table. All criteria are optional; present criteria are
//! conjunctive, except the free-text search which is a disjunction across the
//! searchable columns. Pagination is either offset-based (`page_number`) or
//! cursor-based (`last_created_at`), the cursor taking precedence.

use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite};

use crate::error::{AppError, AppResult};

/// Page size used when the caller supplies none (or a non-positive one).
pub const DEFAULT_PAGE_SIZE: i64 = 20;
/// Hard upper bound on the page size.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Request-scoped filter criteria for a product listing query.
/// Absent fields and empty lists mean "no constraint".
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub reference: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub categories: Vec<String>,
    pub suppliers: Vec<String>,
    pub stock_cities: Vec<String>,
    pub statuses: Vec<String>,
    pub search: Option<String>,
}

/// Pagination parameters. `last_added` is the cursor: when present, rows are
/// constrained to `added_date > last_added` and `page` is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageRequest {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub last_added: Option<NaiveDate>,
}

/// Columns the free-text search matches against, case-insensitively.
const SEARCH_COLUMNS: &[&str] = &[
    "p.reference",
    "p.stock_city",
    "c.name",
    "s.name",
    "p.name",
    "p.status",
    "CAST(p.price AS TEXT)",
];

/// Shared projection for product reads; the embedded category/supplier names
/// come from the joined tables.
pub(crate) const LIST_SELECT: &str = "SELECT p.id, p.reference, p.name, p.added_date, p.status, p.price, \
     p.stock_city, p.quantity, p.category_id, p.supplier_id, \
     c.name AS category_name, s.name AS supplier_name \
     FROM products p \
     LEFT JOIN categories c ON c.id = p.category_id \
     LEFT JOIN suppliers s ON s.id = p.supplier_id";

impl ProductFilter {
    /// Range checks that must be rejected before any query executes.
    pub fn validate(&self) -> AppResult<()> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(AppError::InvalidInput(
                    "end_date must not be before start_date".to_string(),
                ));
            }
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(AppError::InvalidInput(
                    "min_price must be less than or equal to max_price".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Resolves the caller-supplied page size: absent or non-positive falls back
/// to [`DEFAULT_PAGE_SIZE`], anything above [`MAX_PAGE_SIZE`] is clamped.
pub fn effective_limit(limit: Option<i64>) -> i64 {
    match limit {
        Some(l) if l > 0 => l.min(MAX_PAGE_SIZE),
        _ => DEFAULT_PAGE_SIZE,
    }
}

/// Rows skipped for offset pagination: `(page - 1) * limit`, floored at page 1.
pub fn page_offset(page: i64, limit: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(limit)
}

const LIKE_ESCAPE: char = '!';

/// Escapes LIKE metacharacters so user input matches literally.
pub fn escape_like_pattern(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(ch);
    }
    out
}

/// Builds the complete listing SELECT. The caller is expected to have run
/// [`ProductFilter::validate`] first.
pub fn build_list_query(filter: &ProductFilter, page: &PageRequest) -> QueryBuilder<'static, Sqlite> {
    let mut qb = QueryBuilder::new(LIST_SELECT);
    qb.push(" WHERE 1=1");
    push_filters(&mut qb, filter);
    push_pagination(&mut qb, page);
    qb
}

fn push_name_list(qb: &mut QueryBuilder<'static, Sqlite>, column: &str, values: &[String]) {
    if values.is_empty() {
        return;
    }
    qb.push(" AND ").push(column).push(" IN (");
    let mut sep = qb.separated(", ");
    for value in values {
        sep.push_bind(value.clone());
    }
    sep.push_unseparated(")");
}

fn push_filters(qb: &mut QueryBuilder<'static, Sqlite>, filter: &ProductFilter) {
    push_name_list(qb, "c.name", &filter.categories);
    push_name_list(qb, "s.name", &filter.suppliers);

    if let Some(reference) = filter.reference.as_deref().filter(|r| !r.is_empty()) {
        qb.push(" AND p.reference = ").push_bind(reference.to_string());
    }

    if let Some(start) = filter.start_date {
        qb.push(" AND p.added_date >= ").push_bind(start.to_string());
    }
    if let Some(end) = filter.end_date {
        qb.push(" AND p.added_date <= ").push_bind(end.to_string());
    }

    push_name_list(qb, "p.status", &filter.statuses);
    push_name_list(qb, "p.stock_city", &filter.stock_cities);

    if let Some(min) = filter.min_price {
        qb.push(" AND p.price >= ").push_bind(min);
    }
    if let Some(max) = filter.max_price {
        qb.push(" AND p.price <= ").push_bind(max);
    }

    if let Some(term) = filter.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        let pattern = format!("%{}%", escape_like_pattern(term).to_lowercase());
        qb.push(" AND (");
        let mut first = true;
        for column in SEARCH_COLUMNS {
            if !first {
                qb.push(" OR ");
            }
            qb.push("LOWER(")
                .push(*column)
                .push(") LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '!'");
            first = false;
        }
        qb.push(")");
    }
}

fn push_pagination(qb: &mut QueryBuilder<'static, Sqlite>, page: &PageRequest) {
    let limit = effective_limit(page.limit);

    // Cursor pagination wins over the numeric offset.
    if let Some(cursor) = page.last_added {
        qb.push(" AND p.added_date > ").push_bind(cursor.to_string());
    }

    // Stable order: added_date, then id as the tie-breaker.
    qb.push(" ORDER BY p.added_date ASC, p.id ASC");
    qb.push(" LIMIT ").push_bind(limit);

    if page.last_added.is_none() {
        if let Some(number) = page.page {
            let offset = page_offset(number, limit);
            if offset > 0 {
                qb.push(" OFFSET ").push_bind(offset);
            }
        }
    }
}
