//! Integration tests driving both tools against mock token and IAM endpoints.

mod reconcile;
mod token_fetch;
