//! Password-grant token acquisition and best-effort token inspection.

pub mod claims;
pub mod client;
pub mod config;
pub mod report;
