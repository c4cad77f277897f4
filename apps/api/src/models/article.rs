use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::layout::content::ContentMap;
use crate::layout::preview::{extract_preview, ArticlePreview};
use crate::models::template::Template;

/// An article as exchanged with clients. `content` is the encoded
/// [`ContentMap`]; legacy articles may hold plain text there instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub template: Option<Template>,
}

impl Article {
    pub fn content_map(&self) -> ContentMap {
        ContentMap::decode(&self.content)
    }

    pub fn preview(&self) -> ArticlePreview {
        extract_preview(self.template.as_ref(), &self.content_map())
    }
}

/// Body of article create/update calls. Only `template.id` is used to attach
/// a template; the rest of the template object is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleCreateRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub template: Option<Template>,
}

impl ArticleCreateRequest {
    pub fn template_id(&self) -> Option<i64> {
        self.template.as_ref().and_then(|t| t.id)
    }
}

/// Article joined with its (optional) template, as read from the database.
#[derive(Debug, Clone, FromRow)]
pub struct ArticleRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub template_id: Option<i64>,
    pub template_name: Option<String>,
    pub template_layout_json: Option<String>,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        let template = match (row.template_id, row.template_name) {
            (Some(id), Some(name)) => Some(Template {
                id: Some(id),
                name,
                layout_json: row.template_layout_json.unwrap_or_default(),
            }),
            _ => None,
        };
        Article {
            id: Some(row.id),
            title: row.title,
            content: row.content,
            template,
        }
    }
}

/// One feed card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary {
    pub id: Option<i64>,
    pub title: String,
    /// Absolute location of the thumbnail image, if the article has one.
    pub thumbnail_url: Option<String>,
    pub preview_text: String,
}

/// Response of the image upload endpoint. `url` is stored verbatim as the
/// image block's content value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_with_template_maps_to_nested_template() {
        let row = ArticleRow {
            id: 3,
            title: "Trip".to_string(),
            content: r#"{"t":"hello"}"#.to_string(),
            template_id: Some(9),
            template_name: Some("Journal".to_string()),
            template_layout_json: Some(r#"[{"type":"text","id":"t","label":"Body"}]"#.to_string()),
        };
        let article = Article::from(row);
        let template = article.template.as_ref().unwrap();
        assert_eq!(template.id, Some(9));
        assert_eq!(template.name, "Journal");
        assert_eq!(article.preview().preview_text, "hello");
    }

    #[test]
    fn test_row_without_template() {
        let row = ArticleRow {
            id: 4,
            title: "Legacy".to_string(),
            content: "plain text body".to_string(),
            template_id: None,
            template_name: None,
            template_layout_json: None,
        };
        let article = Article::from(row);
        assert!(article.template.is_none());
        assert!(article.content_map().is_empty());
    }

    #[test]
    fn test_article_wire_shape() {
        let article = Article {
            id: None,
            title: "T".to_string(),
            content: "{}".to_string(),
            template: None,
        };
        assert_eq!(
            serde_json::to_value(&article).unwrap(),
            json!({"id": null, "title": "T", "content": "{}", "template": null})
        );
    }

    #[test]
    fn test_request_template_id() {
        let req: ArticleCreateRequest = serde_json::from_value(json!({
            "title": "T",
            "content": "{}",
            "template": {"id": 5, "name": "Any", "layoutJson": "[]"}
        }))
        .unwrap();
        assert_eq!(req.template_id(), Some(5));

        let req: ArticleCreateRequest =
            serde_json::from_value(json!({"title": "T", "template": {"name": "Unsaved"}})).unwrap();
        assert_eq!(req.template_id(), None);
    }
}
