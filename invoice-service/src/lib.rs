//! invoice-service: turns authenticated line-item submissions into persisted
//! invoice records and downloadable PDF documents.

pub mod config;
pub mod dtos;
pub mod export;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod render;
pub mod services;
pub mod startup;
