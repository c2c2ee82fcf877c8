use thiserror::Error;

/// fetch 调用可能返回的错误
#[derive(Debug, Error)]
pub enum FetchError {
    /// 计时器先于请求完成触发
    #[error("request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// 请求被中止信号取消；`fetch` 会把它转换成 `Timeout`
    #[error("request was aborted")]
    Aborted,

    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error(transparent)]
    InvalidUrl(#[from] url::ParseError),

    #[error("redirect to {location} refused: redirect mode is \"error\"")]
    RedirectRefused { location: String },

    #[error("request body stream has already been consumed")]
    BodyUsed,
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout { .. })
    }
}
