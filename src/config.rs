use anyhow::Context;
use time::UtcOffset;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub alert_recipient: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub smtp: Option<SmtpConfig>,
    /// Fixed regional offset applied before ledger timestamps are stored
    /// zone-naive.
    pub ledger_offset: UtcOffset,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL not set")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET not set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "smartstock".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "smartstock-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(480),
        };

        let smtp = match std::env::var("SMTP_HOST") {
            Ok(host) => Some(SmtpConfig {
                host,
                port: std::env::var("SMTP_PORT")
                    .ok()
                    .and_then(|v| v.parse::<u16>().ok())
                    .unwrap_or(587),
                username: std::env::var("SMTP_USERNAME").context("SMTP_USERNAME not set")?,
                password: std::env::var("SMTP_PASSWORD").context("SMTP_PASSWORD not set")?,
                from: std::env::var("SMTP_FROM")
                    .unwrap_or_else(|_| "no-reply@smartstock.local".into()),
                alert_recipient: std::env::var("ALERT_RECIPIENT")
                    .context("ALERT_RECIPIENT not set")?,
            }),
            Err(_) => None,
        };

        let ledger_offset = parse_utc_offset(
            &std::env::var("LEDGER_UTC_OFFSET").unwrap_or_else(|_| "+05:30".into()),
        )?;

        Ok(Self {
            database_url,
            jwt,
            smtp,
            ledger_offset,
        })
    }
}

/// Parses offsets of the form `+05:30` / `-03:00`.
pub fn parse_utc_offset(s: &str) -> anyhow::Result<UtcOffset> {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => (-1i8, rest),
        None => (1i8, s.strip_prefix('+').unwrap_or(s)),
    };
    let (hours, minutes) = rest
        .split_once(':')
        .with_context(|| format!("expected [+-]HH:MM, got {s:?}"))?;
    let hours: i8 = hours
        .parse()
        .with_context(|| format!("bad hours in offset {s:?}"))?;
    let minutes: i8 = minutes
        .parse()
        .with_context(|| format!("bad minutes in offset {s:?}"))?;
    UtcOffset::from_hms(sign * hours, sign * minutes, 0)
        .with_context(|| format!("offset out of range: {s:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::offset;

    #[test]
    fn parses_positive_offset() {
        assert_eq!(parse_utc_offset("+05:30").unwrap(), offset!(+5:30));
    }

    #[test]
    fn parses_negative_offset() {
        assert_eq!(parse_utc_offset("-03:00").unwrap(), offset!(-3:00));
    }

    #[test]
    fn parses_unsigned_offset() {
        assert_eq!(parse_utc_offset("00:00").unwrap(), UtcOffset::UTC);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_utc_offset("five-thirty").is_err());
        assert!(parse_utc_offset("+99:00").is_err());
    }
}
