//! Helper functions for link management CLI commands

use colored::Colorize;
use serde::Serialize;

use crate::interfaces::cli::CliError;
use crate::services::short_url;
use crate::storage::LinkRecord;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::CommandError(format!("Failed to serialize output: {}", e)))?;
    println!("{}", json);
    Ok(())
}

/// The alias, or the full short URL when a public base is configured.
pub fn display_alias(alias: &str, base_url: Option<&str>) -> String {
    match base_url.filter(|b| !b.is_empty()) {
        Some(base) => short_url(base, alias),
        None => alias.to_string(),
    }
}

/// One-line summary used by `list` and `stats`.
pub fn link_line(link: &LinkRecord, base_url: Option<&str>) -> String {
    let mut parts = vec![format!(
        "{} -> {}",
        display_alias(&link.alias, base_url).cyan(),
        link.original_url.blue().underline()
    )];

    if link.visit_count > 0 {
        parts.push(
            format!("(visits: {})", link.visit_count)
                .dimmed()
                .cyan()
                .to_string(),
        );
    }

    parts.push(
        format!("[{}]", link.created_at.format(DATE_FORMAT))
            .dimmed()
            .to_string(),
    );
    parts.push(link.id.dimmed().to_string());

    parts.join(" ")
}

/// Multi-line detail block used by `show`.
pub fn print_link_details(link: &LinkRecord, base_url: Option<&str>) {
    println!("  {:<12}{}", "Alias:".bold(), link.alias.cyan());
    if let Some(base) = base_url.filter(|b| !b.is_empty()) {
        println!(
            "  {:<12}{}",
            "Short URL:".bold(),
            short_url(base, &link.alias).blue().underline()
        );
    }
    println!(
        "  {:<12}{}",
        "Target:".bold(),
        link.original_url.blue().underline()
    );
    println!("  {:<12}{}", "Visits:".bold(), link.visit_count);
    println!(
        "  {:<12}{}",
        "Created:".bold(),
        link.created_at.format(DATE_FORMAT)
    );
    println!(
        "  {:<12}{}",
        "Updated:".bold(),
        link.updated_at.format(DATE_FORMAT)
    );
    println!("  {:<12}{}", "Id:".bold(), link.id.dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_alias() {
        assert_eq!(display_alias("promo", None), "promo");
        assert_eq!(display_alias("promo", Some("")), "promo");
        assert_eq!(
            display_alias("promo", Some("https://sho.rt/")),
            "https://sho.rt/promo"
        );
    }
}
