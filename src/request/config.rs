use std::sync::atomic::{AtomicU64, Ordering};

/// 进程启动时的默认超时（毫秒）
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

static DEFAULT_TIMEOUT: AtomicU64 = AtomicU64::new(DEFAULT_TIMEOUT_MS);

/// 修改全局默认超时，只影响之后发起的调用
pub fn set_default_timeout(timeout_ms: u64) {
    DEFAULT_TIMEOUT.store(timeout_ms, Ordering::Relaxed);
}

pub fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setter_overwrites_and_restores() {
        let before = default_timeout();
        set_default_timeout(1234);
        assert_eq!(default_timeout(), 1234);
        set_default_timeout(before);
        assert_eq!(default_timeout(), before);
    }
}
