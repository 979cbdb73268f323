pub use self::parser::{Config, DatabaseConfig, LoggingConfig, ServerConfig};
pub use self::validator::ConfigError;

mod parser;
mod validator;
