pub mod errors;
pub mod id;

pub use errors::{ConfigError, CurtisError};
pub use id::SessionId;
