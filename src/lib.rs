//! MediaNet Presentation - analytics dashboard presentation core
//!
//! Turns heterogeneous, sometimes truncated backend payloads into canonical
//! reports and chart render instructions, and sequences chat requests
//! through a per-surface message log.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
