//! Check alias command

use colored::Colorize;

use crate::interfaces::cli::{CliError, DUPLICATE_ALIAS_MESSAGE};
use crate::services::LinkService;

/// Prints whether `alias` is free. A taken alias is not an error here.
pub async fn check_alias(
    service: &LinkService,
    alias: &str,
    exclude_id: Option<&str>,
) -> Result<(), CliError> {
    if service.is_alias_available(alias, exclude_id).await? {
        println!("{} Alias {} is available", "✓".bold().green(), alias.cyan());
    } else {
        println!(
            "{} Alias {} is taken. {}",
            "✗".bold().red(),
            alias.cyan(),
            DUPLICATE_ALIAS_MESSAGE.dimmed()
        );
    }
    Ok(())
}
