

pub mod config;
pub mod error;

pub use config::MedragConfig;
pub use error::{MedragError, Result};
