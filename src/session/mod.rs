pub mod application;
pub mod load_handlers;
