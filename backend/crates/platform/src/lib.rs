//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, hex) for request fingerprints
//! - Keyed async locks for per-entity write serialization

pub mod crypto;
pub mod sync;
