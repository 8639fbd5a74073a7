//! Emission schedule normalisation and pool classification.

mod classifier;
mod emissions_schedule;

pub use classifier::PoolClassifier;
pub use emissions_schedule::EmissionsSchedule;
