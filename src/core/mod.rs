// src/core/mod.rs
//! Shared service plumbing: configuration

pub mod config_manager;

pub use config_manager::{
    ConfigManager, ScraperConfig, ServerConfig, SheetsConfig, StorageBackend, StorageConfig,
};
