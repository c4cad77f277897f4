use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS templates (
        id          BIGSERIAL PRIMARY KEY,
        name        TEXT NOT NULL,
        layout_json TEXT NOT NULL DEFAULT '[]'
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id          BIGSERIAL PRIMARY KEY,
        title       TEXT NOT NULL,
        content     TEXT NOT NULL DEFAULT '',
        template_id BIGINT REFERENCES templates(id) ON DELETE SET NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS articles_template_id_idx ON articles (template_id)",
];

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the tables if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Database schema ready");
    Ok(())
}
