use sqlx::PgPool;

use crate::models::template::Template;

const COLUMNS: &str = "id, name, layout_json";

/// Data access for the `templates` table.
pub struct TemplateRepo;

impl TemplateRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Template>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM templates ORDER BY id");
        sqlx::query_as::<_, Template>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Template>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM templates WHERE id = $1");
        sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Inserts a template; any client-supplied id is ignored.
    pub async fn create(pool: &PgPool, template: &Template) -> Result<Template, sqlx::Error> {
        let query = format!(
            "INSERT INTO templates (name, layout_json) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(&template.name)
            .bind(&template.layout_json)
            .fetch_one(pool)
            .await
    }

    /// Replaces name and layout. Returns `None` if no template has `id`.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        template: &Template,
    ) -> Result<Option<Template>, sqlx::Error> {
        let query = format!(
            "UPDATE templates SET name = $1, layout_json = $2 WHERE id = $3 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(&template.name)
            .bind(&template.layout_json)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Deletes a template. Articles using it keep their content and lose the
    /// template reference. Returns `false` if nothing was deleted.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM templates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
