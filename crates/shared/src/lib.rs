//! Shared types, errors, and configuration for Perjadin.
//!
//! This crate provides common pieces used across all other crates:
//! - Application-wide error types
//! - Configuration management
//! - Indonesian date/datetime parsing and formatting
//! - Spelled-out rupiah amounts (terbilang) for receipt vouchers

pub mod config;
pub mod datetime;
pub mod error;
pub mod terbilang;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
