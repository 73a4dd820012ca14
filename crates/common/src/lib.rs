//! Pieces shared by every crate in the workspace: logging setup and
//! small response types that do not belong to the article domain.

pub mod types;
pub mod utils;
