//! CLI route: single route table and run context. Dispatches to the library API and presentation.

use crate::api::TaskDraftApi;
use crate::config::{validation_failure, ConfigLoader, TaskdraftConfig};
use crate::error::ApiError;
use crate::generation::{task_list_from_output, GenerationRequest, ShortListPolicy};
use crate::types::TaskList;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use crate::cli::parse::{Commands, ConfigCommands};
use crate::cli::presentation::{format_config_text, format_task_list_json, format_task_list_text};

/// Runtime context for CLI execution: workspace, config path and the loaded configuration.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    config: TaskdraftConfig,
    workspace_root: PathBuf,
    config_path: Option<PathBuf>,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let loader = ConfigLoader::from_process_env();
        Self::with_loader(&loader, workspace_root, config_path)
    }

    pub fn with_loader(
        loader: &ConfigLoader,
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
    ) -> Result<Self, ApiError> {
        let config = loader.load_for(&workspace_root, config_path.as_deref())?;
        Ok(Self {
            config,
            workspace_root,
            config_path,
        })
    }

    pub fn config(&self) -> &TaskdraftConfig {
        &self.config
    }

    /// Execute a command and return its rendered output.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = match command {
            Commands::Generate {
                goal,
                end_users,
                constraints,
                format,
                strict,
            } => {
                let request = GenerationRequest::new(goal, end_users, constraints);
                self.handle_generate(&request, format, *strict)
            }
            Commands::Extract {
                input,
                format,
                strict,
            } => self.handle_extract(input.as_deref(), format, *strict),
            Commands::Config { command } => self.handle_config(command),
        };
        info!(
            command = command_name(command),
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn handle_generate(
        &self,
        request: &GenerationRequest,
        format: &str,
        strict: bool,
    ) -> Result<String, ApiError> {
        let format = OutputFormat::parse(format)?;
        let api = TaskDraftApi::from_config(&self.config)?;
        let api = if strict {
            TaskDraftApi::new(
                api.generator()
                    .clone()
                    .with_short_list_policy(ShortListPolicy::Reject),
            )
        } else {
            api
        };

        let runtime = tokio::runtime::Runtime::new()?;
        let task_list = runtime.block_on(api.generate_task_list(request))?;
        render_task_list(&task_list, format)
    }

    fn handle_extract(
        &self,
        input: Option<&Path>,
        format: &str,
        strict: bool,
    ) -> Result<String, ApiError> {
        let format = OutputFormat::parse(format)?;
        let raw_text = match input {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            }
        };
        let policy = if strict {
            ShortListPolicy::Reject
        } else {
            self.config.generation.short_list_policy
        };
        let task_list = task_list_from_output(&raw_text, policy)?;
        render_task_list(&task_list, format)
    }

    fn handle_config(&self, command: &ConfigCommands) -> Result<String, ApiError> {
        match command {
            ConfigCommands::Show { format } => match OutputFormat::parse(format)? {
                OutputFormat::Json => serde_json::to_string_pretty(&self.config.redacted_json())
                    .map_err(|e| ApiError::ConfigError(e.to_string())),
                OutputFormat::Text => {
                    let mut output = format!("Workspace: {}\n", self.workspace_root.display());
                    if let Some(ref path) = self.config_path {
                        output.push_str(&format!("Config file: {}\n", path.display()));
                    }
                    output.push('\n');
                    output.push_str(&format_config_text(&self.config));
                    Ok(output)
                }
            },
            ConfigCommands::Validate => match self.config.validate() {
                Ok(()) => Ok("Configuration is valid".to_string()),
                Err(errors) => Err(validation_failure(&errors)),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

impl OutputFormat {
    fn parse(value: &str) -> Result<Self, ApiError> {
        match value {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            other => Err(ApiError::ConfigError(format!(
                "Invalid format: {} (must be 'json' or 'text')",
                other
            ))),
        }
    }
}

fn render_task_list(task_list: &TaskList, format: OutputFormat) -> Result<String, ApiError> {
    match format {
        OutputFormat::Json => format_task_list_json(task_list),
        OutputFormat::Text => Ok(format_task_list_text(task_list)),
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Generate { .. } => "generate",
        Commands::Extract { .. } => "extract",
        Commands::Config {
            command: ConfigCommands::Show { .. },
        } => "config show",
        Commands::Config {
            command: ConfigCommands::Validate,
        } => "config validate",
    }
}
