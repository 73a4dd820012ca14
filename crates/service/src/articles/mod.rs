//! Article domain: record type, store contract with in-memory and SeaORM
//! backends, and the forwarding service.

pub mod domain;
pub mod store;
pub mod service;

pub use domain::Article;
pub use service::{ArticleService, DynArticleService};
pub use store::{memory::InMemoryArticleStore, seaorm::SeaOrmArticleStore, ArticleStore};
