use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Root of the back-office REST API, e.g. `http://localhost:8080/api`.
    pub api_base_url: String,
    pub env: Environment,
    pub log_level: String,
    /// Bearer credential attached to API requests, if the session has one.
    pub access_token: Option<String>,
    /// Credentials used to sign in when no access token is configured.
    pub login_user_id: Option<String>,
    pub login_password: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// YAML fixture backing the Product List; the built-in catalogue is used when unset.
    pub products_fixture: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_base_url", &self.api_base_url)
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("login_user_id", &self.login_user_id)
            .field(
                "login_password",
                &self.login_password.as_ref().map(|_| "[redacted]"),
            )
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("products_fixture", &self.products_fixture)
            .finish()
    }
}
