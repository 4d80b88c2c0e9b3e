// stufa-api: Async Rust client for the Extraflame Total Control cloud

pub mod client;
pub mod device;
pub mod error;
pub mod models;
pub mod registers;
pub mod transport;

pub use client::{CloudClient, Credentials};
pub use device::Device;
pub use error::Error;
pub use registers::{RegisterKey, RegisterSpec, RegisterValue};
