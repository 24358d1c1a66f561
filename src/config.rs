use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    /// Base URL embedded in approval links sent to the administrator.
    pub public_base_url: String,
    /// Fixed administrative address receiving approval requests.
    pub admin_email: String,
    /// When set, a second redemption of an approval link is rejected
    /// instead of being a no-op.
    pub approval_single_use: bool,
    /// SMTP relay; when absent, approval links are only logged.
    pub smtp: Option<SmtpConfig>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let public_base_url =
            std::env::var("APP_PUBLIC_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".into());
        let admin_email =
            std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@localhost".into());
        let approval_single_use = std::env::var("APPROVAL_SINGLE_USE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let smtp = match std::env::var("SMTP_HOST") {
            Ok(host) => Some(SmtpConfig {
                host,
                port: std::env::var("SMTP_PORT")
                    .ok()
                    .and_then(|v| v.parse::<u16>().ok())
                    .unwrap_or(587),
                username: std::env::var("SMTP_USERNAME")?,
                password: std::env::var("SMTP_PASSWORD")?,
            }),
            Err(_) => None,
        };
        Ok(Self {
            database_url,
            public_base_url,
            admin_email,
            approval_single_use,
            smtp,
        })
    }
}
