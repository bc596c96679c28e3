//! PostgreSQL schema migrations for quotebook storage.

use anyhow::Result;
use sqlx::PgPool;

/// Run all PostgreSQL migrations. Every statement is idempotent.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sources (
            id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
            title TEXT NOT NULL,
            source_type TEXT NOT NULL,
            year INTEGER,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            UNIQUE (title, source_type)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sources_title ON sources (title)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS quotes (
            id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
            text TEXT NOT NULL,
            text_normalized TEXT NOT NULL,
            source_id BIGINT NOT NULL REFERENCES sources (id) ON DELETE CASCADE,
            weight BIGINT NOT NULL DEFAULT 1 CHECK (weight >= 0),
            likes BIGINT NOT NULL DEFAULT 0 CHECK (likes >= 0),
            dislikes BIGINT NOT NULL DEFAULT 0 CHECK (dislikes >= 0),
            views BIGINT NOT NULL DEFAULT 0 CHECK (views >= 0),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Normalized text is computed in Rust (Unicode trim + lowercase) and kept unique here.
    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_quotes_text_normalized ON quotes (text_normalized)",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_quotes_source ON quotes (source_id)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_quotes_created ON quotes (created_at DESC)")
        .execute(pool)
        .await?;

    tracing::info!("PostgreSQL schema up to date");
    Ok(())
}
