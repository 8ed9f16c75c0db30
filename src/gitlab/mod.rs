pub mod aggregate;
pub mod client;
pub mod commit;
pub mod exec;
pub mod fetch;
pub mod output;

pub use aggregate::{collect, rank_authors, report};
pub use client::{ApiResponse, GitlabClient, Transport, UreqTransport};
pub use commit::{enrich, fetch_commits, FetchEnd};
pub use exec::{analyze, exec};
pub use fetch::fetch_repositories;
pub use output::OutputFormat;
