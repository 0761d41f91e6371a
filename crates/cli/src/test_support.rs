use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serializes tests that read or mutate process environment variables.
pub(crate) fn with_locked_env<R>(run: impl FnOnce() -> R) -> R {
    // A panicking test must not wedge every other env test.
    let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    run()
}

/// Sets an environment variable. Call only inside `with_locked_env`.
pub(crate) fn set_env_var(key: &str, value: &str) {
    // SAFETY: env mutation is serialized by `ENV_LOCK`.
    unsafe {
        std::env::set_var(key, value);
    }
}

/// Removes an environment variable. Call only inside `with_locked_env`.
pub(crate) fn remove_env_var(key: &str) {
    // SAFETY: env mutation is serialized by `ENV_LOCK`.
    unsafe {
        std::env::remove_var(key);
    }
}
