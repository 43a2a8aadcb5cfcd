//! CLI command implementations
//!
//! Each handler validates its input, issues at most a couple of facade
//! calls, and hands the result to the output formatter. Nothing is
//! persisted locally beyond the credential record.

pub mod analytics;
pub mod auth;
pub mod init;
pub mod investments;
pub mod projects;
pub mod webhooks;
