pub mod factories;
pub mod raw_http;
