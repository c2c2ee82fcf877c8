use std::time::Duration;

use reqwest::Response;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::network::AbortController;
use super::config::default_timeout;
use super::descriptor::Resource;
use super::executor::send;
use super::normalize::{normalize, RequestInit};
use super::options::RequestOptions;

/// 一次性计时器：到时后中止控制器；清除或被丢弃时取消
pub(crate) struct AbortTimer {
    handle: Option<JoinHandle<()>>,
}

impl AbortTimer {
    pub(crate) fn arm(controller: AbortController, timeout: Duration) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            controller.abort();
        });
        debug!(timeout_ms = timeout.as_millis() as u64, "abort timer armed");
        Self { handle: Some(handle) }
    }

    pub(crate) fn clear(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("abort timer cleared");
        }
    }
}

impl Drop for AbortTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

pub(crate) struct PreparedRequest {
    pub(crate) resource: Resource,
    pub(crate) options: RequestOptions,
    pub(crate) timeout_ms: u64,
    pub(crate) controller: AbortController,
}

pub(crate) fn prepare(resource: Resource, init: RequestInit, timeout_ms: Option<u64>) -> PreparedRequest {
    let normalized = normalize(&resource, init, timeout_ms);
    // 默认超时在调用开始时读取
    let timeout_ms = normalized.timeout_ms.unwrap_or_else(default_timeout);

    let controller = AbortController::new();
    let mut options = normalized.options;
    options.signal = Some(controller.signal());

    PreparedRequest { resource, options, timeout_ms, controller }
}

/// 带超时的请求
///
/// `init` 可以是 `RequestOptions`、`RequestDescriptor`、表示超时的 `u64`，
/// 或者 `RequestInit::None`。超时优先取 `init` 中的数字，其次是 `timeout_ms`，
/// 最后是全局默认值（见 [`set_default_timeout`](crate::set_default_timeout)）。
///
/// 计时器先触发时返回 `FetchError::Timeout`，其他错误原样返回。
pub async fn fetch<R, I>(resource: R, init: I, timeout_ms: Option<u64>) -> Result<Response, FetchError>
where
    R: Into<Resource>,
    I: Into<RequestInit>,
{
    let PreparedRequest { resource, options, timeout_ms, controller } =
        prepare(resource.into(), init.into(), timeout_ms);

    let timer = AbortTimer::arm(controller, Duration::from_millis(timeout_ms));
    let outcome = send(resource, options).await;
    timer.clear();

    match outcome {
        Ok(response) => Ok(response),
        Err(FetchError::Aborted) => {
            warn!(timeout_ms, "request timed out");
            Err(FetchError::Timeout { timeout_ms })
        }
        Err(err) => Err(err),
    }
}
