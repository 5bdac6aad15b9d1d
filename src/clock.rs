use std::time::SystemTime;

/// Source of the current time, in seconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_secs(&self) -> f64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> f64 {
        // A clock set before 1970 reads as the epoch, which fails every `iat`/`exp` window.
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs_f64())
            .unwrap_or_default()
    }
}
