//! 工具函数性能基准测试

use chrono::{Duration, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use linkdash::services::{DashboardStats, LinkQuery, SortKey};
use linkdash::storage::LinkRecord;
use linkdash::utils::url_validator::validate_url;
use linkdash::utils::{generate_alias, is_valid_alias};

// ============== is_valid_alias 基准测试 ==============

fn bench_is_valid_alias(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/is_valid_alias");

    group.bench_function("valid_simple", |b| {
        b.iter(|| {
            assert!(is_valid_alias("abc123"));
        });
    });

    group.bench_function("valid_with_separators", |b| {
        b.iter(|| {
            assert!(is_valid_alias("summer-sale_2026"));
        });
    });

    group.bench_function("invalid_special_chars", |b| {
        b.iter(|| {
            assert!(!is_valid_alias("'; DROP TABLE--"));
        });
    });

    let max_len = "a".repeat(128);
    group.bench_function("valid_max_length", |b| {
        b.iter(|| {
            assert!(is_valid_alias(&max_len));
        });
    });

    group.finish();
}

// ============== generate_alias 基准测试 ==============

fn bench_generate_alias(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/generate_alias");

    for length in [6, 8, 12, 20] {
        group.bench_with_input(BenchmarkId::new("length", length), &length, |b, &length| {
            b.iter(|| {
                let alias = generate_alias(length);
                assert_eq!(alias.len(), length);
            });
        });
    }

    group.finish();
}

// ============== validate_url 基准测试 ==============

fn bench_validate_url(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/validate_url");

    group.bench_function("valid_https", |b| {
        b.iter(|| {
            assert!(validate_url("https://example.com/path?query=1").is_ok());
        });
    });

    group.bench_function("dangerous_protocol", |b| {
        b.iter(|| {
            assert!(validate_url("javascript:alert(1)").is_err());
        });
    });

    group.finish();
}

// ============== 列表视图与统计 ==============

fn sample_links(n: usize) -> Vec<LinkRecord> {
    let now = Utc::now();
    (0..n)
        .map(|i| LinkRecord {
            id: format!("id-{}", i),
            user_id: "bench".to_string(),
            alias: generate_alias(6),
            original_url: format!("https://site{}.example/page/{}", i % 50, i),
            visit_count: (i * 31 % 997) as u64,
            created_at: now - Duration::hours(i as i64 * 7),
            updated_at: now,
        })
        .collect()
}

fn bench_link_views(c: &mut Criterion) {
    let mut group = c.benchmark_group("services/link_views");

    for n in [100, 1000] {
        let links = sample_links(n);

        group.bench_with_input(BenchmarkId::new("search_sort_page", n), &links, |b, links| {
            let query = LinkQuery {
                search: Some("site1".to_string()),
                sort: SortKey::VisitCount,
                ..Default::default()
            };
            b.iter(|| query.apply(links.clone()));
        });

        group.bench_with_input(BenchmarkId::new("dashboard", n), &links, |b, links| {
            b.iter(|| DashboardStats::from_links(links, Utc::now()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_is_valid_alias,
    bench_generate_alias,
    bench_validate_url,
    bench_link_views,
);
criterion_main!(benches);
