//! Delete link command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::LinkService;

pub async fn delete_link(service: &LinkService, id: &str) -> Result<(), CliError> {
    service.delete(id).await?;

    println!("{} Deleted link: {}", "✓".bold().green(), id.cyan());
    Ok(())
}
