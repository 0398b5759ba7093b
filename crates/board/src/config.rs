use anyhow::{anyhow, Result};
use directories::{BaseDirs, ProjectDirs};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const LOCAL_CONFIG_FILE_NAME: &str = "board.toml";

/// Board configuration
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Seed dataset to start from; the built-in demo board when unset
    pub seed: Option<PathBuf>,
    /// Acting user (ID, name or email); the project lead when unset
    pub user: Option<String>,
    /// File holding the onboarding flag
    pub state_file: Option<PathBuf>,
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        let explicit_path = config_path.as_deref();
        if let Some(path) = explicit_path {
            if !path.exists() {
                return Err(anyhow!("Config file not found: {}", path.display()));
            }
        }

        for path in config_paths(explicit_path) {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        figment = figment.merge(Env::prefixed("BOARD_").only(&["seed", "user", "state_file"]));

        figment
            .extract()
            .map_err(|e| anyhow!("Failed to load config: {}", e))
    }

    pub fn merge_with_cli(mut self, cli_seed: Option<PathBuf>, cli_user: Option<String>) -> Self {
        if let Some(seed) = cli_seed {
            self.seed = Some(seed);
        }
        if let Some(user) = cli_user {
            self.user = Some(user);
        }
        self
    }

    /// Where the onboarding flag lives
    pub fn state_path(&self) -> Result<PathBuf> {
        match &self.state_file {
            Some(path) => Ok(path.clone()),
            None => crate::local_state::default_path(),
        }
    }
}

/// Config files that are consulted, lowest precedence first
pub fn config_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
        return paths;
    }

    if let Some(path) = get_project_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_xdg_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_local_config_path() {
        push_unique(&mut paths, path);
    }

    paths
}

fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

fn get_project_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "board").map(|d| d.config_dir().join("config.toml"))
}

fn get_xdg_config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(dir).join("board").join("config.toml"));
    }

    BaseDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(".config")
            .join("board")
            .join("config.toml")
    })
}

fn get_local_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|dir| dir.join(LOCAL_CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn explicit_path_is_the_only_candidate() {
        let explicit = PathBuf::from("/tmp/custom.toml");
        assert_eq!(config_paths(Some(&explicit)), vec![explicit]);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Config::load(Some(PathBuf::from("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    #[serial]
    fn explicit_file_values_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "seed = \"fixtures/board.toml\"\nuser = \"u-sarah\"\n").unwrap();

        let config = Config::load(Some(path)).unwrap();

        assert_eq!(config.seed, Some(PathBuf::from("fixtures/board.toml")));
        assert_eq!(config.user.as_deref(), Some("u-sarah"));
        assert!(config.state_file.is_none());
    }

    #[test]
    #[serial]
    fn env_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "user = \"u-sarah\"\n").unwrap();

        std::env::set_var("BOARD_USER", "u-mike");
        let config = Config::load(Some(path));
        std::env::remove_var("BOARD_USER");

        assert_eq!(config.unwrap().user.as_deref(), Some("u-mike"));
    }

    #[test]
    fn cli_values_override_config() {
        let config = Config {
            seed: Some(PathBuf::from("a.toml")),
            user: Some("u1".to_string()),
            state_file: None,
        }
        .merge_with_cli(Some(PathBuf::from("b.toml")), None);

        assert_eq!(config.seed, Some(PathBuf::from("b.toml")));
        assert_eq!(config.user.as_deref(), Some("u1"));
    }

    #[test]
    fn state_path_prefers_configured_file() {
        let config = Config {
            state_file: Some(PathBuf::from("/tmp/state.json")),
            ..Default::default()
        };
        assert_eq!(config.state_path().unwrap(), PathBuf::from("/tmp/state.json"));
    }
}
