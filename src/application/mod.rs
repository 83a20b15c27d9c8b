pub mod execute;
pub mod idempotency;
pub mod lineup_plan;
pub mod run;
pub mod scoring;
pub mod summary;
pub mod transfer_plan;
pub mod validate;
