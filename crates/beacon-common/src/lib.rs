pub mod errors;

pub use errors::{BeaconError, ConfigError};

pub type Result<T> = std::result::Result<T, BeaconError>;
