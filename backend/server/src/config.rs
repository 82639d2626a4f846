use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    pub redis_url: String,
    pub static_dir: PathBuf,
    pub template_dir: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("RUST_PORT", "5000"),
            redis_url: try_load("REDIS_URL", "redis://127.0.0.1:6379"),
            static_dir: try_load("STATIC_DIR", "static"),
            template_dir: try_load("TEMPLATE_DIR", "templates"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

#[cfg(test)]
mod tests {
    use super::try_load;

    #[test]
    fn test_default_used_when_unset() {
        let port: u16 = try_load("PORTAL_TEST_UNSET_PORT", "5000");
        assert_eq!(port, 5000);
    }

    #[test]
    #[should_panic(expected = "Environment misconfigured!")]
    fn test_unparsable_default_panics() {
        let _: u16 = try_load("PORTAL_TEST_UNSET_PORT", "not-a-port");
    }
}
