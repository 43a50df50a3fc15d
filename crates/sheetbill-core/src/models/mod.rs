//! Data models for extracted invoices and configuration.

pub mod config;
pub mod invoice;
