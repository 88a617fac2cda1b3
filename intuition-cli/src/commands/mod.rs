pub mod compute;
pub mod metrics;
