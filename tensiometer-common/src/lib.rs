mod inputs;
mod types;

pub use inputs::{parse_positive, MeasurementInputs};
pub use types::*;
