use std::net::IpAddr;

use chrono::Duration;

const DEFAULT_JWT_SECRET: &str = "your-secret-key";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiry: Duration,
    pub host: IpAddr,
    pub port: u16,
    pub environment: Environment,
    pub log_level: String,
    pub admin_seed: Option<AdminSeed>,
}

/// Credentials for the admin account created at startup when none exists.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;

        let environment = match env_or("DEVBOARD_ENV", "development").as_str() {
            "production" => Environment::Production,
            _ => Environment::Development,
        };

        let jwt_secret = env_or("JWT_SECRET", DEFAULT_JWT_SECRET);
        if jwt_secret == DEFAULT_JWT_SECRET && environment == Environment::Production {
            return Err("JWT_SECRET must be set in production environment".to_string());
        }

        let jwt_expiry = parse_duration(&env_or("JWT_EXPIRY", "24h"))
            .map_err(|e| format!("Invalid JWT_EXPIRY: {e}"))?;

        let host: IpAddr = env_or("DEVBOARD_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid DEVBOARD_HOST: {e}"))?;

        let port: u16 = env_or("DEVBOARD_PORT", "8080")
            .parse()
            .map_err(|e| format!("Invalid DEVBOARD_PORT: {e}"))?;

        let log_level = env_or("DEVBOARD_LOG_LEVEL", "info");

        let admin_seed = match (
            std::env::var("DEVBOARD_ADMIN_EMAIL").ok(),
            std::env::var("DEVBOARD_ADMIN_PASSWORD").ok(),
        ) {
            (Some(email), Some(password)) => Some(AdminSeed { email, password }),
            _ => None,
        };

        Ok(Config {
            database_url,
            jwt_secret,
            jwt_expiry,
            host,
            port,
            environment,
            log_level,
            admin_seed,
        })
    }

    pub fn secure_cookies(&self) -> bool {
        self.environment == Environment::Production
    }
}

/// Parse durations of the form `24h`, `90m` or `30s`.
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    let split = raw
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| format!("missing unit in '{raw}'"))?;
    let (amount, unit) = raw.split_at(split);
    let amount: i64 = amount
        .parse()
        .map_err(|_| format!("missing amount in '{raw}'"))?;

    let duration = match unit {
        "h" => Duration::try_hours(amount),
        "m" => Duration::try_minutes(amount),
        "s" => Duration::try_seconds(amount),
        other => return Err(format!("unknown unit '{other}'")),
    }
    .ok_or_else(|| format!("duration out of range: '{raw}'"))?;

    if duration <= Duration::zero() {
        return Err(format!("duration must be positive, got '{raw}'"));
    }
    Ok(duration)
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hour_minute_and_second_units() {
        assert_eq!(parse_duration("24h").unwrap(), Duration::hours(24));
        assert_eq!(parse_duration("90m").unwrap(), Duration::minutes(90));
        assert_eq!(parse_duration(" 45s ").unwrap(), Duration::seconds(45));
    }

    #[test]
    fn rejects_bad_durations() {
        assert!(parse_duration("24").is_err());
        assert!(parse_duration("9999999999999h").is_err());
        assert!(parse_duration("99999999999999999999s").is_err());
        assert!(parse_duration("h").is_err());
        assert!(parse_duration("3d").is_err());
        assert!(parse_duration("0h").is_err());
    }
}
