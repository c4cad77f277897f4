pub mod config;
pub mod db;
pub mod errors;
pub mod layout;
pub mod media;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod storage;
