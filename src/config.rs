use std::env;
use std::path::PathBuf;

pub const DB_ENV: &str = "RECIPE_CATALOG_DB";
pub const DEFAULT_DB: &str = "recipes.db";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// SQLite file standing in for the browser's origin storage.
    pub database: PathBuf,
}

impl Settings {
    /// Loads `.env` if there is one, then reads the environment.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        if env::var_os("RUST_LOG").is_none() {
            env::set_var("RUST_LOG", "info");
        }
        Self::from_vars(env::var(DB_ENV).ok())
    }

    fn from_vars(database: Option<String>) -> Self {
        Settings {
            database: database
                .filter(|path| !path.is_empty())
                .unwrap_or_else(|| DEFAULT_DB.to_string())
                .into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_defaults_when_unset_or_blank() {
        assert_eq!(Settings::from_vars(None).database, PathBuf::from(DEFAULT_DB));
        assert_eq!(
            Settings::from_vars(Some(String::new())).database,
            PathBuf::from(DEFAULT_DB)
        );
        assert_eq!(
            Settings::from_vars(Some("/tmp/r.db".to_string())).database,
            PathBuf::from("/tmp/r.db")
        );
    }
}
