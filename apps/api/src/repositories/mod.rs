pub mod article_repo;
pub mod template_repo;

pub use article_repo::ArticleRepo;
pub use template_repo::TemplateRepo;
