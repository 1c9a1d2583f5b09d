//! Search, sort and paging over a listed set of links

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::storage::LinkRecord;

pub const MAX_PAGE_SIZE: usize = 100;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum SortKey {
    #[default]
    #[strum(to_string = "created", serialize = "created_at")]
    CreatedAt,
    #[strum(to_string = "visits", serialize = "visit_count")]
    VisitCount,
    #[strum(to_string = "url", serialize = "original_url")]
    OriginalUrl,
    #[strum(to_string = "alias")]
    Alias,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkQuery {
    /// Case-insensitive substring of `original_url`
    pub search: Option<String>,
    pub sort: SortKey,
    pub descending: bool,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
}

impl Default for LinkQuery {
    fn default() -> Self {
        Self {
            search: None,
            sort: SortKey::CreatedAt,
            descending: true,
            page: 1,
            page_size: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkPage {
    pub items: Vec<LinkRecord>,
    /// Matches before paging
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl LinkQuery {
    pub fn apply(&self, mut links: Vec<LinkRecord>) -> LinkPage {
        let page = self.page.max(1);
        let page_size = self.page_size.clamp(1, MAX_PAGE_SIZE);

        if let Some(needle) = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            let needle = needle.to_lowercase();
            links.retain(|l| l.original_url.to_lowercase().contains(&needle));
        }

        // stable sort: ties keep list order in both directions
        links.sort_by(|a, b| {
            let ord = match self.sort {
                SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
                SortKey::VisitCount => a.visit_count.cmp(&b.visit_count),
                SortKey::OriginalUrl => a.original_url.cmp(&b.original_url),
                SortKey::Alias => a.alias.cmp(&b.alias),
            };
            if self.descending {
                ord.reverse()
            } else {
                ord
            }
        });

        let total = links.len();
        let items = links
            .into_iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .collect();

        LinkPage {
            items,
            total,
            page,
            page_size,
            total_pages: total.div_ceil(page_size),
        }
    }
}

/// Public URL of `alias` under `base`.
pub fn short_url(base: &str, alias: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), alias)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn links(n: usize) -> Vec<LinkRecord> {
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        // newest first, like the store returns them
        (0..n)
            .rev()
            .map(|i| LinkRecord {
                id: format!("id-{i}"),
                user_id: "u".to_string(),
                alias: format!("a{i:02}"),
                original_url: if i % 2 == 0 {
                    format!("https://Even.example/{i}")
                } else {
                    format!("https://odd.example/{i}")
                },
                visit_count: (i as u64 * 7) % 5,
                created_at: base + Duration::days(i as i64),
                updated_at: base + Duration::days(i as i64),
            })
            .collect()
    }

    #[test]
    fn test_default_query_keeps_newest_first() {
        let page = LinkQuery::default().apply(links(25));
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.items[0].id, "id-24");
        assert_eq!(page.items[9].id, "id-15");
    }

    #[test]
    fn test_last_and_out_of_range_pages() {
        let query = LinkQuery {
            page: 3,
            ..Default::default()
        };
        let page = query.apply(links(25));
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[4].id, "id-0");

        let beyond = LinkQuery {
            page: 9,
            ..Default::default()
        }
        .apply(links(25));
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total, 25);
    }

    #[test]
    fn test_page_and_size_are_clamped() {
        let page = LinkQuery {
            page: 0,
            page_size: 0,
            ..Default::default()
        }
        .apply(links(3));
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.total_pages, 3);

        let page = LinkQuery {
            page_size: 1000,
            ..Default::default()
        }
        .apply(links(3));
        assert_eq!(page.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let query = LinkQuery {
            search: Some("EVEN".to_string()),
            page_size: 100,
            ..Default::default()
        };
        let page = query.apply(links(10));
        assert_eq!(page.total, 5);
        assert!(page.items.iter().all(|l| l.original_url.contains("Even")));
    }

    #[test]
    fn test_sort_by_visits_ascending() {
        let query = LinkQuery {
            sort: SortKey::VisitCount,
            descending: false,
            page_size: 100,
            ..Default::default()
        };
        let page = query.apply(links(10));
        let visits: Vec<u64> = page.items.iter().map(|l| l.visit_count).collect();
        let mut sorted = visits.clone();
        sorted.sort();
        assert_eq!(visits, sorted);
    }

    #[test]
    fn test_sort_by_alias_descending() {
        let query = LinkQuery {
            sort: SortKey::Alias,
            page_size: 3,
            ..Default::default()
        };
        let page = query.apply(links(10));
        let aliases: Vec<&str> = page.items.iter().map(|l| l.alias.as_str()).collect();
        assert_eq!(aliases, ["a09", "a08", "a07"]);
    }

    #[test]
    fn test_descending_sort_keeps_list_order_for_ties() {
        let query = LinkQuery {
            sort: SortKey::VisitCount,
            page_size: 100,
            ..Default::default()
        };
        let input = links(10);
        let page = query.apply(input.clone());

        for visits in 0..5 {
            let expected: Vec<&str> = input
                .iter()
                .filter(|l| l.visit_count == visits)
                .map(|l| l.id.as_str())
                .collect();
            let got: Vec<&str> = page
                .items
                .iter()
                .filter(|l| l.visit_count == visits)
                .map(|l| l.id.as_str())
                .collect();
            assert_eq!(got, expected);
        }
        assert!(page.items.windows(2).all(|w| w[0].visit_count >= w[1].visit_count));
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("created".parse::<SortKey>().unwrap(), SortKey::CreatedAt);
        assert_eq!("Visits".parse::<SortKey>().unwrap(), SortKey::VisitCount);
        assert_eq!("url".parse::<SortKey>().unwrap(), SortKey::OriginalUrl);
        assert_eq!("alias".parse::<SortKey>().unwrap(), SortKey::Alias);
        assert!("clicks".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_short_url() {
        assert_eq!(short_url("https://sho.rt/", "promo"), "https://sho.rt/promo");
        assert_eq!(short_url("https://sho.rt", "promo"), "https://sho.rt/promo");
    }
}
