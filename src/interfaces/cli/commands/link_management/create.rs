//! Create link command

use colored::Colorize;

use super::helpers::display_alias;
use crate::interfaces::cli::CliError;
use crate::services::{CreateLinkRequest, LinkService};

pub async fn create_link(
    service: &LinkService,
    url: String,
    alias: Option<String>,
    base_url: Option<&str>,
) -> Result<(), CliError> {
    let generated = alias.as_deref().is_none_or(str::is_empty);

    let link = service
        .create(CreateLinkRequest {
            original_url: url,
            alias,
        })
        .await?;

    if generated {
        println!(
            "{} Generated random alias: {}",
            "ℹ".bold().blue(),
            link.alias.magenta()
        );
    }

    println!(
        "{} Created link: {} -> {}",
        "✓".bold().green(),
        display_alias(&link.alias, base_url).cyan(),
        link.original_url.blue().underline()
    );
    println!("  {} {}", "id:".dimmed(), link.id.dimmed());

    Ok(())
}
