//! Config loader: assembles the layered sources into a `TaskdraftConfig`.

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::TaskdraftConfig;
use crate::error::ApiError;
use config::Map;
use std::path::{Path, PathBuf};

/// Environment variable selecting the workspace overlay file (config/{env}.toml).
pub const ENV_NAME_VAR: &str = "TASKDRAFT_ENV";

/// Loads configuration from an explicit environment snapshot.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    vars: Map<String, String>,
    global_path: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::from_process_env()
    }
}

impl ConfigLoader {
    /// Snapshot the process environment and use the platform global config path.
    pub fn from_process_env() -> Self {
        Self {
            vars: std::env::vars().collect(),
            global_path: global_file::global_config_path(),
        }
    }

    /// Use exactly these variables and no global config file.
    pub fn with_env<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            global_path: None,
        }
    }

    pub fn with_global_path(mut self, path: Option<PathBuf>) -> Self {
        self.global_path = path;
        self
    }

    fn env_name(&self) -> String {
        self.vars
            .get(ENV_NAME_VAR)
            .cloned()
            .unwrap_or_else(|| "development".to_string())
    }

    /// Defaults, global file, workspace files, environment.
    pub fn load(&self, workspace_root: &Path) -> Result<TaskdraftConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder, self.global_path.as_deref())?;
        let builder = workspace_file::add_to_builder(builder, workspace_root, &self.env_name())?;
        let builder = environment::add_to_builder(builder, &self.vars)?;
        Ok(builder.build()?.try_deserialize()?)
    }

    /// Defaults, the given file (which must exist), environment.
    pub fn load_from_file(&self, path: &Path) -> Result<TaskdraftConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = merge_policy::builder_with_defaults()?
            .add_source(config::File::from(path.to_path_buf()).required(true));
        let builder = environment::add_to_builder(builder, &self.vars)?;
        Ok(builder.build()?.try_deserialize()?)
    }

    /// `load_from_file` when a path is given, `load` otherwise.
    pub fn load_for(
        &self,
        workspace_root: &Path,
        config_path: Option<&Path>,
    ) -> Result<TaskdraftConfig, ApiError> {
        match config_path {
            Some(path) => self.load_from_file(path),
            None => self.load(workspace_root),
        }
    }
}
