//! CLI interface module
//!
//! This module provides command-line interface functionality for linkdash.

pub mod commands;

use std::fmt;
use std::sync::Arc;

use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::errors::LinkdashError;
use crate::services::{LinkQuery, LinkService};
use crate::session::session_from_config;
use crate::storage::TableFactory;
use commands::{
    check_alias, config_generate, create_link, delete_link, list_links, show_link, show_stats,
    update_link,
};

/// Shown to the user when an alias is taken, whichever layer caught it.
pub const DUPLICATE_ALIAS_MESSAGE: &str = "This alias is already taken. Please choose another.";

#[derive(Debug)]
pub enum CliError {
    Service(LinkdashError),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::Service(LinkdashError::DuplicateAlias(_)) => {
                DUPLICATE_ALIAS_MESSAGE.to_string()
            }
            CliError::Service(err) => err.format_simple(),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::Service(LinkdashError::DuplicateAlias(alias)) => format!(
                "{} {} {}",
                "Duplicate alias:".red().bold(),
                alias.cyan(),
                DUPLICATE_ALIAS_MESSAGE.white()
            ),
            CliError::Service(err) => err.format_colored(),
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<LinkdashError> for CliError {
    fn from(err: LinkdashError) -> Self {
        CliError::Service(err)
    }
}

/// Wire the configured store and session into a [`LinkService`].
pub async fn build_service(config: &StaticConfig) -> Result<LinkService, CliError> {
    let table = TableFactory::create(config).await?;
    let session = session_from_config(&config.session);
    Ok(LinkService::new(table, session).with_alias_length(config.links.alias_length))
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands, config: Arc<StaticConfig>) -> Result<(), CliError> {
    let cmd = match cmd {
        // Generate doesn't need a store
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => return config_generate(output_path, force).await,
        other => other,
    };

    let service = build_service(&config).await?;
    let base_url = config.links.public_base_url.as_deref();

    match cmd {
        Commands::List {
            search,
            sort,
            asc,
            page,
            page_size,
            json,
        } => {
            let query = LinkQuery {
                search,
                sort,
                descending: !asc,
                page,
                page_size: page_size.unwrap_or(config.links.page_size),
            };
            list_links(&service, &query, base_url, json).await
        }

        Commands::Show { id, json } => show_link(&service, &id, base_url, json).await,

        Commands::Create { url, alias } => create_link(&service, url, alias, base_url).await,

        Commands::Update { id, url, alias } => update_link(&service, &id, url, alias).await,

        Commands::Delete { id } => delete_link(&service, &id).await,

        Commands::Check { alias, exclude } => {
            check_alias(&service, &alias, exclude.as_deref()).await
        }

        Commands::Stats { json } => show_stats(&service, base_url, json).await,

        Commands::Config { .. } => Err(CliError::CommandError(
            "config commands do not use the link store".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_alias_message() {
        let err = CliError::from(LinkdashError::duplicate("promo"));
        assert_eq!(err.format_simple(), DUPLICATE_ALIAS_MESSAGE);
        assert!(err.format_colored().contains("promo"));
    }

    #[test]
    fn test_service_errors_keep_their_format() {
        let err = CliError::from(LinkdashError::NotAuthenticated);
        assert_eq!(
            err.format_simple(),
            LinkdashError::NotAuthenticated.format_simple()
        );
    }

    #[tokio::test]
    async fn test_build_service_with_memory_store() {
        let mut config = StaticConfig::default();
        config.store.url = "memory".to_string();
        let service = build_service(&config).await.unwrap();
        assert_eq!(service.backend_name(), "memory");
        // anonymous session
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_config_generate_skips_store() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.toml");

        // an unusable store URL must not matter for config commands
        let mut config = StaticConfig::default();
        config.store.url = "ftp://nowhere".to_string();

        let cmd = Commands::Config {
            action: ConfigCommands::Generate {
                output_path: Some(path.to_string_lossy().into_owned()),
                force: true,
            },
        };
        run_cli_command(cmd, Arc::new(config)).await.unwrap();
        assert!(path.exists());
    }
}
