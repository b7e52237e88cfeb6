/// Abstraction over wall-clock time sources.
/// Implementations: SystemTimeProvider (production), ManualTimeProvider (testing).
pub trait TimeProvider: Send + Sync {
    /// Current time in microseconds from an arbitrary epoch.
    fn now_us(&self) -> i64;
}

/// System time provider using std::time::Instant.
pub struct SystemTimeProvider {
    start: std::time::Instant,
}

impl SystemTimeProvider {
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

impl Default for SystemTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for SystemTimeProvider {
    fn now_us(&self) -> i64 {
        self.start.elapsed().as_micros() as i64
    }
}

/// Manually-driven time provider for deterministic testing.
pub struct ManualTimeProvider {
    current_us: std::sync::atomic::AtomicI64,
}

impl ManualTimeProvider {
    pub fn new() -> Self {
        Self {
            current_us: std::sync::atomic::AtomicI64::new(0),
        }
    }

    pub fn set_time(&self, us: i64) {
        self.current_us
            .store(us, std::sync::atomic::Ordering::Relaxed);
    }

    pub fn advance(&self, delta_us: i64) {
        self.current_us
            .fetch_add(delta_us, std::sync::atomic::Ordering::Relaxed);
    }
}

impl Default for ManualTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for ManualTimeProvider {
    fn now_us(&self) -> i64 {
        self.current_us.load(std::sync::atomic::Ordering::Relaxed)
    }
}
