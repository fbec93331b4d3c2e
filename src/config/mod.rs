//! Configuration module
//!
//! File-backed settings plus the environment overrides for the two knobs the
//! backend deployment actually varies (base URL and mock mode).

pub mod config;
