pub mod article;
pub mod template;
