use sqlx::SqlitePool;

pub async fn init_db(pool: &SqlitePool) -> anyhow::Result<()> {
    // Pragmas for better durability/performance
    if let Err(e) = sqlx::query("PRAGMA journal_mode=WAL;").execute(pool).await {
        tracing::warn!("Failed to set WAL journal mode: {}", e);
    }
    if let Err(e) = sqlx::query("PRAGMA synchronous=NORMAL;").execute(pool).await {
        tracing::warn!("Failed to set synchronous mode: {}", e);
    }
    // Foreign keys are critical - fail if this doesn't work
    sqlx::query("PRAGMA foreign_keys=ON;").execute(pool).await?;

    if let Err(e) = sqlx::query("PRAGMA busy_timeout=10000;").execute(pool).await {
        tracing::warn!("Failed to set busy_timeout: {}", e);
    }

    // categories table
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS categories (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL
        )"#,
    )
    .execute(pool)
    .await?;

    // suppliers table
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS suppliers (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )"#,
    )
    .execute(pool)
    .await?;

    // products table; added_date is a plain calendar date (YYYY-MM-DD),
    // lexicographic order equals chronological order
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS products (
            id TEXT PRIMARY KEY,
            reference TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            added_date TEXT NOT NULL DEFAULT (date('now')),
            status TEXT NOT NULL DEFAULT '',
            price REAL NOT NULL DEFAULT 0,
            stock_city TEXT NOT NULL DEFAULT '',
            quantity INTEGER NOT NULL DEFAULT 0,
            category_id TEXT NOT NULL,
            supplier_id TEXT NOT NULL,
            FOREIGN KEY(category_id) REFERENCES categories(id),
            FOREIGN KEY(supplier_id) REFERENCES suppliers(id)
        )"#,
    )
    .execute(pool)
    .await?;

    let indexes = [
        (
            "idx_products_added_date",
            "CREATE INDEX IF NOT EXISTS idx_products_added_date ON products(added_date, id)",
        ),
        (
            "idx_products_category",
            "CREATE INDEX IF NOT EXISTS idx_products_category ON products(category_id)",
        ),
        (
            "idx_products_supplier",
            "CREATE INDEX IF NOT EXISTS idx_products_supplier ON products(supplier_id)",
        ),
    ];

    for (name, query) in indexes {
        if let Err(e) = sqlx::query(query).execute(pool).await {
            match &e {
                sqlx::Error::Database(db_err) => {
                    let msg = db_err.message().to_lowercase();
                    if msg.contains("already exists") || msg.contains("duplicate") {
                        tracing::debug!("Index {} already exists, skipping", name);
                    } else {
                        tracing::warn!("Failed to create index {}: {}", name, e);
                    }
                }
                _ => {
                    tracing::warn!("Failed to create index {}: {}", name, e);
                }
            }
        }
    }

    Ok(())
}
