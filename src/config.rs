use clap::Parser;
use once_cell::sync::Lazy;

/// Certificates stay valid for this many years after issue.
pub const CERTIFICATE_VALIDITY_YEARS: i32 = 2;

pub const DEFAULT_QR_SIZE: u32 = 90;

pub static APP_CONFIG: Lazy<Config> = Lazy::new(Config::parse);

#[derive(Debug, Parser, Clone)]
pub struct Config {
    #[clap(long, env, default_value_t = 8080)]
    pub port: u16,

    #[clap(long, env, default_value_t = true, action = clap::ArgAction::Set)]
    pub swagger_enabled: bool,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    #[clap(long, env)]
    pub database_url: String,

    /// Base of the verification link encoded into each QR code.
    #[clap(long, env, default_value = "https://yourdomain.com")]
    pub verify_base_url: String,

    #[clap(long, env, default_value = "*")]
    pub cors_allowed_origins: String,

    #[clap(long, env, default_value_t = DEFAULT_QR_SIZE)]
    pub qr_size: u32,

    #[clap(long, env, default_value = "#7c3aed")]
    pub accent_color: String,

    #[clap(
        long,
        env,
        default_value = "Spatial and Data Science Association of Nigeria."
    )]
    pub organization_name: String,

    #[clap(long, env, default_value = "local")]
    pub app_env: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["certificate_service", "--database-url", "sqlite::memory:"]);
        assert_eq!(config.qr_size, DEFAULT_QR_SIZE);
        assert_eq!(config.verify_base_url, "https://yourdomain.com");
        assert_eq!(config.database_url, "sqlite::memory:");
    }
}
