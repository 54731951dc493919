//! WhatsApp LLM Dashboard library
//!
//! This library provides the read-only admin dashboard over the WhatsApp LLM
//! application's database. The binary entry point is in main.rs.

pub mod admin;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod pagination;
pub mod server;
mod sql;
pub mod stats;
pub mod store;
pub mod tab;
