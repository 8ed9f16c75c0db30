//! Per-author commit statistics across GitLab projects.

pub mod cli;
pub mod config;
pub mod error;
pub mod gitlab;
pub mod model;
pub mod util;
