pub mod dimensions;
pub mod normalize;
pub mod orchestrator;
pub mod truncate;

pub use dimensions::{DimensionLoadResult, Dimensionalizer};
pub use normalize::Normalizer;
pub use orchestrator::{EtlPipeline, RunSummary};
pub use truncate::Truncator;
