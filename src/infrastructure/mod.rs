// Concrete implementations of the platform traits
pub mod api;
pub mod device;
pub mod terminal;
