pub mod config;
pub mod dataset;
pub mod encoding;
pub mod error;
pub mod loss;
pub mod metrics;
pub mod model;
pub mod optimization;
pub mod pipeline;
pub mod predictor;

pub use config::PipelineConfig;
pub use error::{MlErr, Result};
pub use pipeline::{Pipeline, Report};
pub use predictor::NextWordPredictor;
