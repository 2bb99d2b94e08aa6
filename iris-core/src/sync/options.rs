use chrono::Duration;

/// Days of remote history fetched by pull and merge.
pub const DEFAULT_WINDOW_DAYS: u32 = 90;

/// Minimum time between background full syncs.
pub const DEFAULT_BACKGROUND_INTERVAL_MINUTES: i64 = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct SyncOptions {
    pub window_days: u32,
    pub background_interval: Duration,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            background_interval: Duration::minutes(DEFAULT_BACKGROUND_INTERVAL_MINUTES),
        }
    }
}

impl SyncOptions {
    pub fn with_window_days(mut self, days: u32) -> Self {
        self.window_days = days;
        self
    }

    pub fn with_background_interval(mut self, interval: Duration) -> Self {
        self.background_interval = interval;
        self
    }
}
