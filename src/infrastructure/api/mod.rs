// External API clients
pub mod predict;

pub use predict::HttpPredictor;
