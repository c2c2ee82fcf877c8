use tokio_util::sync::CancellationToken;

/// 中止控制器：持有方可以取消对应的信号
#[derive(Debug, Default)]
pub struct AbortController {
    token: CancellationToken,
}

impl AbortController {
    pub fn new() -> Self {
        Self { token: CancellationToken::new() }
    }

    pub fn signal(&self) -> AbortSignal {
        AbortSignal { token: self.token.clone() }
    }

    pub fn abort(&self) {
        self.token.cancel();
    }
}

/// 传给请求的中止信号，克隆后共享同一状态
#[derive(Debug, Clone)]
pub struct AbortSignal {
    token: CancellationToken,
}

impl AbortSignal {
    pub fn is_aborted(&self) -> bool {
        self.token.is_cancelled()
    }

    /// 等待直到被中止
    pub async fn aborted(&self) {
        self.token.cancelled().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn abort_is_visible_through_every_clone() {
        let controller = AbortController::new();
        let signal = controller.signal();
        let copy = signal.clone();
        assert!(!signal.is_aborted());

        controller.abort();
        assert!(signal.is_aborted());
        assert!(copy.is_aborted());
    }

    #[test]
    fn controllers_are_independent() {
        let first = AbortController::new();
        let second = AbortController::new();
        first.abort();
        assert!(first.signal().is_aborted());
        assert!(!second.signal().is_aborted());
    }

    #[tokio::test]
    async fn aborted_resolves_once_cancelled() {
        let controller = AbortController::new();
        let signal = controller.signal();
        let waiter = tokio::spawn(async move { signal.aborted().await });

        tokio::time::sleep(Duration::from_millis(10)).await;
        controller.abort();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("signal never fired")
            .unwrap();
    }
}
