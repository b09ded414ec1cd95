pub mod params;
pub mod persist;

pub use params::{FLOOR_PROBABILITY, HmmParams, ProbabilityRow, ProbabilityTable};
pub use persist::{MODEL_FORMAT, MODEL_FORMAT_VERSION};
