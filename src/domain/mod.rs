// Business entities and the capture flow
pub mod models;
pub mod services;
