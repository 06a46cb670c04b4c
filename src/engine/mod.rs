pub mod animator;
pub mod metrics;
pub mod severity;
