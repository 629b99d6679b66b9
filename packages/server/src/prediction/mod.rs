//! Creating, updating and reading user predictions.

mod service;

pub use service::PredictionService;
