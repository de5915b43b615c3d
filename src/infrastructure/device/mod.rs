// Desktop device backends
pub mod local;

pub use local::{LocalDevice, PickerMode};
