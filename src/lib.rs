//! # Storefront API Library
//!
//! This library provides the core functionality for the Storefront API
//! service: a schema-per-tenant product catalog with shared categories,
//! hostname-based tenant resolution, and a management API.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod server;
pub mod telemetry;
pub mod tenancy;
pub use migration;
