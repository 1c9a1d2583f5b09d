//! List links command

use colored::Colorize;

use super::helpers::{link_line, print_json};
use crate::interfaces::cli::CliError;
use crate::services::{LinkQuery, LinkService};

pub async fn list_links(
    service: &LinkService,
    query: &LinkQuery,
    base_url: Option<&str>,
    json: bool,
) -> Result<(), CliError> {
    let page = service.list_page(query).await?;

    if json {
        return print_json(&page);
    }

    if page.total == 0 {
        println!("{} No links found", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Your links:".bold().green());
    println!();
    for link in &page.items {
        println!("  {}", link_line(link, base_url));
    }
    println!();
    println!(
        "{} Page {}/{} ({} links total)",
        "ℹ".bold().blue(),
        page.page,
        page.total_pages.max(1),
        page.total.to_string().green()
    );
    Ok(())
}
