/// Capability traits implemented by devices, predictors and hosts
pub mod traits;

pub use traits::{DeviceCapabilities, EmotionPredictor, ScreenHost};
