//! Update link command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::{LinkService, UpdateLinkRequest};

pub async fn update_link(
    service: &LinkService,
    id: &str,
    url: Option<String>,
    alias: Option<String>,
) -> Result<(), CliError> {
    if url.is_none() && alias.is_none() {
        return Err(CliError::ParseError(
            "Nothing to update, pass --url and/or --alias".to_string(),
        ));
    }

    let link = service
        .update(
            id,
            UpdateLinkRequest {
                original_url: url,
                alias,
            },
        )
        .await?;

    println!(
        "{} Updated link: {} -> {}",
        "✓".bold().green(),
        link.alias.cyan(),
        link.original_url.blue().underline()
    );

    Ok(())
}
