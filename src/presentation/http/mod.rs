pub mod categories;
pub mod errors;
pub mod health;
pub mod links;
pub mod request_log;
pub mod responses;
