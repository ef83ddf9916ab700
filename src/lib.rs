pub mod common;
pub mod config;
pub mod db;
pub mod feedback;
pub mod models;
pub mod services;
pub mod windowing;
