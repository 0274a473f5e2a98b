//! # ziprs Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the configuration-resolution and dispatch core:
//! - `config`: Loading the configuration file and splitting off `entries`/`mode`
//! - `options`: The options record and its three-layer merge
//! - `orchestrator`: Owns the resolved options and drives the archive collaborators
//! - `error`: Error types and the crate `Result` alias
//! - `logging`: The `tracing` subscriber and its runtime level handle
//!
pub mod config;
pub mod error;
pub mod logging;
pub mod options;
pub mod orchestrator;
