//! HTTP plumbing shared by the token fetcher and the IAM client.

pub mod client;
