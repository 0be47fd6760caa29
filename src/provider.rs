//! Drift detection and delete-then-create reconciliation of an IAM OIDC provider.

pub mod arn;
pub mod confirm;
pub mod desired;
pub mod drift;
pub mod reconcile;
pub mod report;
