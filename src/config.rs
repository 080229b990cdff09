use color_eyre::eyre::{Report, WrapErr};
use std::{env, fmt::Display, net::SocketAddr, str::FromStr};
use tracing::info;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:polls.db";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub bind_address: SocketAddr,
}

impl Config {
    /// Reads configuration from the environment. Call `dotenv()` first to
    /// pick up a `.env` file.
    pub fn from_env() -> Result<Self, Report> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Report> {
        Ok(Self {
            database_url: load(&lookup, "DATABASE_URL", DEFAULT_DATABASE_URL)?,
            bind_address: load(&lookup, "BIND_ADDRESS", DEFAULT_BIND_ADDRESS)?,
        })
    }
}

fn load<T>(lookup: impl Fn(&str) -> Option<String>, key: &str, default: &str) -> Result<T, Report>
where
    T: FromStr,
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}", key = key, default = default);
        default.to_owned()
    });
    value
        .parse()
        .map_err(|e: T::Err| Report::msg(e.to_string()))
        .wrap_err_with(|| format!("Invalid {} value: {:?}", key, value))
}
