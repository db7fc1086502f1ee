//! Integration Tests for the process-wide cache
//!
//! Exercises the public API the way an embedding host would: many
//! concurrent invocations sharing one lazily created cache.

use std::sync::Once;
use std::thread::sleep;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared_cache::{CacheError, CacheStore, Config, Ttl};

// == Helper Functions ==

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "shared_cache=debug".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Every test in this binary shares the singleton, so keys are prefixed
/// per test.
fn key(test: &str, name: &str) -> String {
    format!("{}:{}", test, name)
}

// == Singleton ==

#[test]
fn test_instance_created_on_demand_and_shared() {
    init_tracing();
    let config = Config {
        initial_capacity: 16,
        sweep_interval: 0,
    };

    let initialized = shared_cache::init(&config);
    assert!(std::ptr::eq(initialized, shared_cache::instance()));
    assert!(std::ptr::eq(shared_cache::init(&config), initialized));
}

// == Invocation Scenarios ==

#[test]
fn test_put_working_then_expire() -> anyhow::Result<()> {
    init_tracing();
    let cache = shared_cache::instance();
    let k = key("expire", "Test");

    cache.put(k.clone(), json!("Working"), 1)?;
    assert_eq!(cache.get(&k)?, Some(json!("Working")));

    sleep(Duration::from_secs(2));

    assert_eq!(cache.get(&k)?, None);
    assert!(!cache.contains_key(&k));
    Ok(())
}

#[test]
fn test_zero_ttl_never_expires() -> anyhow::Result<()> {
    init_tracing();
    let cache = shared_cache::instance();
    let k = key("forever", "k");

    cache.put(k.clone(), json!("v"), 0)?;
    sleep(Duration::from_millis(1200));

    assert_eq!(cache.get(&k)?, Some(json!("v")));
    Ok(())
}

#[test]
fn test_empty_key_is_invalid_argument() {
    init_tracing();
    let cache = shared_cache::instance();

    let result = cache.put("", json!("x"), 5);

    assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
    assert!(!cache.contains_key(""));
    assert!(matches!(cache.get(""), Err(CacheError::InvalidArgument(_))));
    assert!(matches!(cache.evict(""), Err(CacheError::InvalidArgument(_))));
}

#[test]
fn test_negative_ttl_is_invalid_argument() -> anyhow::Result<()> {
    init_tracing();
    let cache = shared_cache::instance();
    let k = key("negative", "k");

    cache.put(k.clone(), json!(1), 60)?;
    let result = cache.put(k.clone(), json!(2), -30);

    assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
    assert_eq!(cache.get(&k)?, Some(json!(1)));
    Ok(())
}

#[test]
fn test_evict_then_get_is_absent() -> anyhow::Result<()> {
    init_tracing();
    let cache = shared_cache::instance();
    let k = key("evict", "k");

    cache.put(k.clone(), json!({"a": 1}), 60)?;
    cache.evict(&k)?;
    cache.evict(&k)?;

    assert!(cache.get(&k)?.is_none());
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Greeting {
    name: String,
    count: u32,
}

#[test]
fn test_typed_payloads_share_the_cache() -> anyhow::Result<()> {
    init_tracing();
    let cache = shared_cache::instance();
    let greeting = Greeting {
        name: "world".to_string(),
        count: 1,
    };

    cache.put_json(key("typed", "greeting"), &greeting, 60)?;
    cache.put_json(key("typed", "numbers"), &vec![1, 2, 3], 60)?;

    let greeting_back: Option<Greeting> = cache.get_json(&key("typed", "greeting"))?;
    let numbers_back: Option<Vec<u32>> = cache.get_json(&key("typed", "numbers"))?;

    assert_eq!(greeting_back, Some(greeting));
    assert_eq!(numbers_back, Some(vec![1, 2, 3]));
    Ok(())
}

// == Concurrency ==

#[test]
fn test_concurrent_invocations_on_disjoint_keys() {
    init_tracing();
    let threads: Vec<_> = (0..16)
        .map(|t| {
            std::thread::spawn(move || {
                let cache = shared_cache::instance();
                for i in 0..100 {
                    let k = key("threads", &format!("{}-{}", t, i));
                    cache.put(k.clone(), json!(i), 0).unwrap();
                    assert_eq!(cache.get(&k).unwrap(), Some(json!(i)));
                }
            })
        })
        .collect();

    for thread in threads {
        thread.join().expect("invocation thread panicked");
    }

    let cache = shared_cache::instance();
    for t in 0..16 {
        for i in 0..100 {
            let k = key("threads", &format!("{}-{}", t, i));
            assert_eq!(cache.get(&k).unwrap(), Some(json!(i)));
        }
    }
}

#[test]
fn test_concurrent_writers_on_one_key_last_write_wins() {
    init_tracing();
    let k = key("contended", "k");
    let threads: Vec<_> = (0..8)
        .map(|t| {
            let k = k.clone();
            std::thread::spawn(move || {
                for i in 0..200 {
                    shared_cache::instance()
                        .put(k.clone(), json!({"writer": t, "seq": i}), 0)
                        .unwrap();
                }
            })
        })
        .collect();

    for thread in threads {
        thread.join().expect("writer thread panicked");
    }

    // Whatever won, the value is one complete write
    let value: Value = shared_cache::instance().get(&k).unwrap().expect("value present");
    assert!(value["writer"].as_u64().unwrap() < 8);
    assert_eq!(value["seq"], json!(199));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_async_tasks_with_sweep() {
    init_tracing();
    let cache: CacheStore<String> = CacheStore::new();
    let sweep = shared_cache::spawn_sweep_task(cache.clone(), Duration::from_millis(50));

    let tasks: Vec<_> = (0..32)
        .map(|t| {
            let cache = cache.clone();
            tokio::spawn(async move {
                cache
                    .put_with_ttl(
                        format!("short{}", t),
                        "gone soon".to_string(),
                        Ttl::after(Duration::from_millis(30)),
                    )
                    .unwrap();
                cache
                    .put(format!("long{}", t), "stays".to_string(), 3600)
                    .unwrap();
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap();
    }

    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(cache.len(), 32);
    assert_eq!(cache.stats().expirations, 32);
    assert_eq!(cache.get("long7").unwrap().as_deref(), Some("stays"));
    assert!(cache.get("short7").unwrap().is_none());

    sweep.abort();
}
