pub mod models;
pub mod payload;
pub mod ports;
pub mod services;
