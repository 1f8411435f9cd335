//! Benchmark tests for the hot paths
//!
//! Run with: cargo test --release --test bench_test -- --ignored --nocapture

use std::time::Instant;
use tempfile::NamedTempFile;

use url_shortener::database::{init_db, AppState};
use url_shortener::handler::{get_stats, list_urls, shorten_url};
use url_shortener::model::ShortenRequest;
use url_shortener::store::UrlStore;

use axum::{extract::State, http::HeaderMap, Json};

/// Benchmark helper to measure execution time
fn benchmark<F>(name: &str, iterations: usize, mut f: F)
where
    F: FnMut(),
{
    let start = Instant::now();

    for _ in 0..iterations {
        f();
    }

    let duration = start.elapsed();
    let avg_ms = duration.as_millis() as f64 / iterations as f64;
    let ops_per_sec = (iterations as f64 / duration.as_secs_f64()) as u64;

    println!("  {} ({} iterations)", name, iterations);
    println!("    Total time: {:?}", duration);
    println!("    Avg time: {:.3}ms", avg_ms);
    println!("    Throughput: {} ops/sec\n", ops_per_sec);
}

fn setup_store() -> (UrlStore, NamedTempFile) {
    let temp_db = NamedTempFile::new().unwrap();
    let db = init_db(temp_db.path().to_str().unwrap()).unwrap();
    (UrlStore::new(db), temp_db)
}

#[test]
#[ignore]
fn bench_create_urls() {
    println!("\n=== Benchmark: Create URLs ===\n");

    let (store, _temp_db) = setup_store();

    benchmark("UrlStore::create", 1000, || {
        store.create("https://example.com/bench").unwrap();
    });
}

#[test]
#[ignore]
fn bench_redirects() {
    println!("\n=== Benchmark: Redirect lookups ===\n");

    let (store, _temp_db) = setup_store();
    let codes: Vec<String> = (0..100)
        .map(|i| {
            store
                .create(&format!("https://example.com/{}", i))
                .unwrap()
                .short_code
        })
        .collect();

    let mut i = 0;
    benchmark("UrlStore::lookup_and_increment", 1000, || {
        store.lookup_and_increment(&codes[i % codes.len()]).unwrap();
        i += 1;
    });

    benchmark("UrlStore::lookup_and_increment (missing)", 1000, || {
        let _ = store.lookup_and_increment("zzzzzz");
    });
}

#[tokio::test]
#[ignore]
async fn bench_handlers() {
    println!("\n=== Benchmark: Handlers ===\n");

    let (store, _temp_db) = setup_store();
    let state = AppState::new(store, None);

    let iterations = 500;
    let start = Instant::now();
    for _ in 0..iterations {
        let request = ShortenRequest {
            url: Some("https://example.com/handler".to_string()),
        };
        shorten_url(State(state.clone()), HeaderMap::new(), Ok(Json(request)))
            .await
            .unwrap();
    }
    println!("  shorten_url x{}: {:?}", iterations, start.elapsed());

    let start = Instant::now();
    let Json(links) = list_urls(State(state.clone()), HeaderMap::new())
        .await
        .unwrap();
    println!("  list_urls ({} links): {:?}", links.len(), start.elapsed());

    let start = Instant::now();
    let Json(stats) = get_stats(State(state)).await.unwrap();
    println!("  get_stats ({} urls): {:?}", stats.total_urls, start.elapsed());
}
