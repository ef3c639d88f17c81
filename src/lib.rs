pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod ids;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
pub mod views;
