//! Test support: canned stage reports and a scripted backend.
//!
//! Public so downstream crates can exercise controller-driven code
//! without a live service.

mod fixtures;
mod mocks;

pub use fixtures::{
    dataset_file, health_report, preprocess_report, reset_ack, split_report, training_report,
    upload_report,
};
pub use mocks::ScriptedBackend;
