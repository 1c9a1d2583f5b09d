//! Dashboard statistics
//!
//! Pure aggregation over an already-listed set of links; months are UTC
//! calendar months.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use crate::storage::LinkRecord;

/// Number of calendar months in the activity chart
pub const CHART_MONTHS: usize = 6;

/// Number of links shown as recent activity
pub const RECENT_LINKS: usize = 5;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Links created in one calendar month, and the visits they have collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyBucket {
    pub year: i32,
    /// 1-based
    pub month: u32,
    pub label: String,
    pub links: usize,
    pub visits: u64,
}

impl MonthlyBucket {
    fn new(year: i32, month: u32) -> Self {
        let name = MONTH_NAMES[(month as usize).saturating_sub(1) % 12];
        Self {
            year,
            month,
            label: format!("{} {}", name, year),
            links: 0,
            visits: 0,
        }
    }

    fn contains(&self, at: &DateTime<Utc>) -> bool {
        at.year() == self.year && at.month() == self.month
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_links: usize,
    pub total_visits: u64,
    pub links_this_month: usize,
    /// Oldest month first, ending with the current month
    pub monthly: Vec<MonthlyBucket>,
    pub recent: Vec<LinkRecord>,
}

impl DashboardStats {
    /// Aggregate `links` (expected newest first) as seen at `now`.
    pub fn from_links(links: &[LinkRecord], now: DateTime<Utc>) -> Self {
        let mut monthly = month_buckets(now);

        for link in links {
            if let Some(bucket) = monthly.iter_mut().find(|b| b.contains(&link.created_at)) {
                bucket.links += 1;
                bucket.visits = bucket.visits.saturating_add(link.visit_count);
            }
        }

        let links_this_month = monthly.last().map(|b| b.links).unwrap_or_default();

        Self {
            total_links: links.len(),
            total_visits: links
                .iter()
                .fold(0u64, |acc, l| acc.saturating_add(l.visit_count)),
            links_this_month,
            monthly,
            recent: links.iter().take(RECENT_LINKS).cloned().collect(),
        }
    }
}

/// Empty buckets for the [`CHART_MONTHS`] months ending at `now`'s month.
fn month_buckets(now: DateTime<Utc>) -> Vec<MonthlyBucket> {
    // Months since year 0, so stepping back across January is plain subtraction
    let current = now.year() * 12 + now.month0() as i32;

    (0..CHART_MONTHS as i32)
        .rev()
        .map(|back| {
            let index = current - back;
            MonthlyBucket::new(index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
        })
        .collect()
}
