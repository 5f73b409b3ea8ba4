pub mod poll_service;
pub mod repository;
