pub mod category_repository_sqlx;
pub mod error_log_repository_sqlx;
pub mod link_repository_sqlx;
