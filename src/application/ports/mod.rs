pub mod category_repository;
pub mod error_log_repository;
pub mod link_repository;
