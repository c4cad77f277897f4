use sqlx::PgPool;

use crate::models::article::{Article, ArticleRow};

/// Projection joining an article (aliased `a`) with its template.
const JOINED_COLUMNS: &str = "\
    a.id, a.title, a.content, a.template_id, \
    t.name AS template_name, t.layout_json AS template_layout_json";

/// Data access for the `articles` table.
pub struct ArticleRepo;

impl ArticleRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Article>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM articles a \
             LEFT JOIN templates t ON t.id = a.template_id \
             ORDER BY a.id"
        );
        let rows = sqlx::query_as::<_, ArticleRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Article::from).collect())
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM articles a \
             LEFT JOIN templates t ON t.id = a.template_id \
             WHERE a.id = $1"
        );
        let row = sqlx::query_as::<_, ArticleRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Article::from))
    }

    pub async fn create(
        pool: &PgPool,
        title: &str,
        content: &str,
        template_id: Option<i64>,
    ) -> Result<Article, sqlx::Error> {
        let query = format!(
            "WITH a AS ( \
                 INSERT INTO articles (title, content, template_id) \
                 VALUES ($1, $2, $3) RETURNING * \
             ) \
             SELECT {JOINED_COLUMNS} FROM a \
             LEFT JOIN templates t ON t.id = a.template_id"
        );
        let row = sqlx::query_as::<_, ArticleRow>(&query)
            .bind(title)
            .bind(content)
            .bind(template_id)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    /// Replaces title, content and template. Returns `None` if no article has `id`.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        title: &str,
        content: &str,
        template_id: Option<i64>,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "WITH a AS ( \
                 UPDATE articles SET title = $1, content = $2, template_id = $3 \
                 WHERE id = $4 RETURNING * \
             ) \
             SELECT {JOINED_COLUMNS} FROM a \
             LEFT JOIN templates t ON t.id = a.template_id"
        );
        let row = sqlx::query_as::<_, ArticleRow>(&query)
            .bind(title)
            .bind(content)
            .bind(template_id)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Article::from))
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
