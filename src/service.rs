//! Process-wide cache service.
//!
//! One [`CacheStore`] per process, created on first access and shared by
//! every caller. Hosts may call [`init`] during startup to size it from an
//! explicit [`Config`]; otherwise [`instance`] builds it from the environment.

use std::sync::Mutex;

use once_cell::sync::OnceCell;
use tokio::runtime::Handle;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{info, warn};

use crate::cache::CacheStore;
use crate::config::Config;
use crate::tasks::spawn_sweep_task;

static INSTANCE: OnceCell<CacheStore> = OnceCell::new();
static SWEEP: Mutex<Option<AbortHandle>> = Mutex::new(None);

/// Returns the process-wide cache, creating it on first call.
pub fn instance() -> &'static CacheStore {
    INSTANCE.get_or_init(|| create(&Config::from_env()))
}

/// Initializes the process-wide cache from `config`.
///
/// The first initialization wins. Later calls, including an `instance()`
/// call that already created the cache, return the existing store.
pub fn init(config: &Config) -> &'static CacheStore {
    let mut created = false;
    let store = INSTANCE.get_or_init(|| {
        created = true;
        create(config)
    });

    if !created {
        warn!("Cache already initialized, ignoring new configuration");
    }
    store
}

/// Starts the background sweep for the process-wide cache.
///
/// Returns `None` when the configured interval is 0, when no tokio runtime
/// is running on this thread, or when a sweep is already active.
pub fn start_sweep(config: &Config) -> Option<JoinHandle<()>> {
    let period = config.sweep_period()?;

    if Handle::try_current().is_err() {
        warn!("No tokio runtime available, TTL sweep not started");
        return None;
    }

    let mut active = SWEEP.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if active.as_ref().is_some_and(|handle| !handle.is_finished()) {
        return None;
    }

    let handle = spawn_sweep_task(instance().clone(), period);
    *active = Some(handle.abort_handle());
    Some(handle)
}

fn create(config: &Config) -> CacheStore {
    info!(
        "Cache initialized: initial_capacity={}, sweep_interval={}s",
        config.initial_capacity, config.sweep_interval
    );
    CacheStore::with_config(config)
}
