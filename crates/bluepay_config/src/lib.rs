// --- File: crates/bluepay_config/src/lib.rs ---

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;

pub mod models;
pub use models::*;

/// Env var holding the BluePay shared secret key. Kept out of the config
/// files on purpose; read it with [`secret_key`] right before building a
/// client.
pub const SECRET_KEY_ENV: &str = "BLUEPAY_SECRET_KEY";

pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "BPG".to_string());

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()));
    let workspace_root = manifest_dir
        .ancestors()
        .nth(2) // go from crates/bluepay_config to workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));

    let default_path = workspace_root.join("config/default");
    let env_path = workspace_root.join(format!("config/{}", run_env));

    let builder = Config::builder()
        .add_source(File::with_name(default_path.to_str().unwrap_or("config/default")).required(false))
        .add_source(File::with_name(env_path.to_str().unwrap_or("config/debug")).required(false))
        .add_source(Environment::with_prefix(&prefix).separator("__"));

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    Ok(raw_config)
}

/// Reads the BluePay shared secret from the environment.
pub fn secret_key() -> Result<String, ConfigError> {
    ensure_dotenv_loaded();
    env::var(SECRET_KEY_ENV)
        .map_err(|_| ConfigError::Message(format!("{} is not set", SECRET_KEY_ENV)))
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// Loads `.env` (or the file named by `DOTENV_OVERRIDE`) exactly once per
/// process.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = std::env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bluepay_config_defaults_to_sandbox_authorize() {
        let cfg: BluePayConfig = serde_json::from_str(
            r#"{"account_id": "100200300", "user_id": "1001"}"#,
        )
        .unwrap();
        assert!(cfg.use_sandbox);
        assert_eq!(cfg.transact_mode, TransactMode::Authorize);
    }

    #[test]
    fn app_config_without_bluepay_section() {
        let cfg: AppConfig = serde_json::from_str(
            r#"{"server": {"host": "127.0.0.1", "port": 8086}}"#,
        )
        .unwrap();
        assert!(!cfg.use_bluepay);
        assert!(cfg.bluepay.is_none());
    }

    #[test]
    fn transact_mode_uses_snake_case_names() {
        let mode: TransactMode = serde_json::from_str(r#""authorize_and_capture""#).unwrap();
        assert_eq!(mode, TransactMode::AuthorizeAndCapture);
    }
}
