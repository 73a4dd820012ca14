//! Service layer for articles.
//! - `articles::store` defines the storage contract and its two backends.
//! - `articles::service` is the seam the HTTP layer depends on.

pub mod errors;
pub mod articles;
#[cfg(test)]
pub mod test_support;
