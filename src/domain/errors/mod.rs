pub mod error_log;
