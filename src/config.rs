use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DetectorConfig {
    pub url: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub detector: DetectorConfig,
    pub max_upload_mb: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let detector = DetectorConfig {
            url: std::env::var("DETECTOR_URL").context("DETECTOR_URL is not set")?,
            model: std::env::var("DETECTOR_MODEL").unwrap_or_else(|_| "ssd_mobilenet_v2".into()),
            timeout_secs: parse_or("DETECTOR_TIMEOUT_SECS", 30),
        };
        Ok(Self {
            database_url,
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10),
            detector,
            max_upload_mb: parse_or("MAX_UPLOAD_MB", 10),
        })
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_falls_back_on_missing_or_garbage() {
        assert_eq!(parse_or::<u64>("MACROLENS_TEST_SURELY_UNSET", 7), 7);
        std::env::set_var("MACROLENS_TEST_GARBAGE", "not-a-number");
        assert_eq!(parse_or::<u32>("MACROLENS_TEST_GARBAGE", 3), 3);
        std::env::set_var("MACROLENS_TEST_NUMBER", "42");
        assert_eq!(parse_or::<usize>("MACROLENS_TEST_NUMBER", 3), 42);
    }
}
