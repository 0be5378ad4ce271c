pub mod data;
pub mod io;

pub use data::{Config, ConfigKey};
pub use io::ConfigError;

#[cfg(test)]
mod tests;
