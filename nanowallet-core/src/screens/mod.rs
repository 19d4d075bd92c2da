//! Application screens

pub mod address;

pub use address::{AddressAction, AddressScreen};
