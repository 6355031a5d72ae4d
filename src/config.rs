use std::env;
use std::path::PathBuf;

/// Authentication mode for the application.
#[derive(Debug, Clone)]
pub enum AuthMode {
    /// No authentication required - all users can access the app.
    Unauthenticated,
    /// Password authentication with an Argon2 hash.
    Password(String),
}

/// SMTP relay settings for budget alert emails.
///
/// Optional: when absent the mailer runs in log-only mode so the rest of the
/// app (including the budget monitor) keeps working without a mail account.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub auth_mode: AuthMode,
    pub smtp: Option<SmtpConfig>,
}

/// The magic value that disables authentication.
pub const UNAUTHENTICATED_MAGIC: &str = "DANGEROUSLY_ALLOW_UNAUTHENTICATED_USERS";

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let auth_mode = match env::var("OUTLAY_PASSWORD_HASH") {
            Ok(hash) if hash == UNAUTHENTICATED_MAGIC => AuthMode::Unauthenticated,
            Ok(hash) if hash.starts_with("$argon2id$") => AuthMode::Password(hash),
            Ok(hash) if hash.is_empty() => {
                panic!(
                    "OUTLAY_PASSWORD_HASH is empty. Set a valid Argon2 hash or '{}' to \
                     explicitly allow unauthenticated access.",
                    UNAUTHENTICATED_MAGIC
                );
            }
            Ok(hash) => {
                panic!(
                    "Invalid OUTLAY_PASSWORD_HASH: must start with '$argon2id$' or be set \
                     to '{}'. Got: {}...",
                    UNAUTHENTICATED_MAGIC,
                    &hash[..hash.len().min(20)]
                );
            }
            Err(_) => {
                panic!(
                    "OUTLAY_PASSWORD_HASH environment variable is not set. Set a valid \
                     Argon2 hash or '{}' to explicitly allow unauthenticated access.",
                    UNAUTHENTICATED_MAGIC
                );
            }
        };

        let smtp = match (
            env::var("OUTLAY_SMTP_HOST"),
            env::var("OUTLAY_SMTP_USER"),
            env::var("OUTLAY_SMTP_PASSWORD"),
        ) {
            (Ok(host), Ok(username), Ok(password)) if !host.is_empty() => Some(SmtpConfig {
                from: env::var("OUTLAY_SMTP_FROM")
                    .unwrap_or_else(|_| format!("Outlay <{}>", username)),
                host,
                username,
                password,
            }),
            _ => None,
        };

        Self {
            host: env::var("OUTLAY_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("OUTLAY_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database_path: env::var("OUTLAY_DATABASE_URL")
                .map(|v| {
                    PathBuf::from(
                        v.strip_prefix("sqlite://")
                            .or_else(|| v.strip_prefix("sqlite:"))
                            .unwrap_or(&v),
                    )
                })
                .unwrap_or_else(|_| PathBuf::from("data/outlay.db")),
            auth_mode,
            smtp,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
