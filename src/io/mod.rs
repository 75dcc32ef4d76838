pub mod common;
pub mod fs;
pub mod http;
