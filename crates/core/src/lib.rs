pub mod channel;
pub mod config;
pub mod credentials;
pub mod error;
pub mod frame;

pub use config::AppConfig;
pub use error::{PulseError, PulseResult};
