//! Show link command

use colored::Colorize;

use super::helpers::{print_json, print_link_details};
use crate::interfaces::cli::CliError;
use crate::services::LinkService;

pub async fn show_link(
    service: &LinkService,
    id: &str,
    base_url: Option<&str>,
    json: bool,
) -> Result<(), CliError> {
    let link = service
        .get_by_id(id)
        .await?
        .ok_or_else(|| CliError::CommandError(format!("Link does not exist: {}", id)))?;

    if json {
        return print_json(&link);
    }

    println!("{}", "Link details:".bold().green());
    print_link_details(&link, base_url);
    Ok(())
}
