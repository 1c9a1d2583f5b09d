//! Dashboard statistics command

use colored::Colorize;

use super::helpers::{link_line, print_json};
use crate::interfaces::cli::CliError;
use crate::services::LinkService;

const BAR_WIDTH: usize = 30;

pub async fn show_stats(
    service: &LinkService,
    base_url: Option<&str>,
    json: bool,
) -> Result<(), CliError> {
    let stats = service.dashboard().await?;

    if json {
        return print_json(&stats);
    }

    println!("{}", "Dashboard".bold().green());
    println!();
    println!(
        "  {:<18}{}",
        "Total links:".bold(),
        stats.total_links.to_string().cyan()
    );
    println!(
        "  {:<18}{}",
        "Total visits:".bold(),
        stats.total_visits.to_string().cyan()
    );
    println!(
        "  {:<18}{}",
        "New this month:".bold(),
        stats.links_this_month.to_string().cyan()
    );

    println!();
    println!("{}", "Links created per month:".bold());
    let max = stats.monthly.iter().map(|b| b.links).max().unwrap_or(0).max(1);
    for bucket in &stats.monthly {
        let bar = "█".repeat(bucket.links * BAR_WIDTH / max);
        println!(
            "  {:<10}{:>4} {} {}",
            bucket.label,
            bucket.links,
            bar.green(),
            format!("({} visits)", bucket.visits).dimmed()
        );
    }

    if !stats.recent.is_empty() {
        println!();
        println!("{}", "Recent links:".bold());
        for link in &stats.recent {
            println!("  {}", link_line(link, base_url));
        }
    }

    Ok(())
}
