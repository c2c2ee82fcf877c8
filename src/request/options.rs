use std::fmt;
use std::io;
use std::pin::Pin;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use futures::Stream;
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde_json::Value;
use thiserror::Error;

use crate::network::AbortSignal;

#[derive(Debug, Error)]
#[error("invalid {kind} value: '{value}'")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
}

// 字符串枚举：取值与 Fetch 标准中的字符串一致
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseOptionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(ParseOptionError { kind: $kind, value: s.to_string() }),
                }
            }
        }
    };
}

string_enum! {
    RequestMode, "mode" {
        Cors => "cors",
        NoCors => "no-cors",
        SameOrigin => "same-origin",
        Navigate => "navigate",
    }
}

string_enum! {
    Credentials, "credentials" {
        Omit => "omit",
        SameOrigin => "same-origin",
        Include => "include",
    }
}

string_enum! {
    CacheMode, "cache" {
        Default => "default",
        NoStore => "no-store",
        Reload => "reload",
        NoCache => "no-cache",
        ForceCache => "force-cache",
        OnlyIfCached => "only-if-cached",
    }
}

string_enum! {
    RedirectMode, "redirect" {
        Follow => "follow",
        Error => "error",
        Manual => "manual",
    }
}

string_enum! {
    ReferrerPolicy, "referrer policy" {
        Unset => "",
        NoReferrer => "no-referrer",
        NoReferrerWhenDowngrade => "no-referrer-when-downgrade",
        SameOrigin => "same-origin",
        Origin => "origin",
        StrictOrigin => "strict-origin",
        OriginWhenCrossOrigin => "origin-when-cross-origin",
        StrictOriginWhenCrossOrigin => "strict-origin-when-cross-origin",
        UnsafeUrl => "unsafe-url",
    }
}

string_enum! {
    /// 请求体是流时需要的半双工标记
    Duplex, "duplex" {
        Half => "half",
    }
}

impl Default for RequestMode {
    fn default() -> Self {
        RequestMode::Cors
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Credentials::SameOrigin
    }
}

impl Default for CacheMode {
    fn default() -> Self {
        CacheMode::Default
    }
}

impl Default for RedirectMode {
    fn default() -> Self {
        RedirectMode::Follow
    }
}

impl Default for ReferrerPolicy {
    fn default() -> Self {
        ReferrerPolicy::Unset
    }
}

pub type ByteStream = Pin<Box<dyn Stream<Item = io::Result<Bytes>> + Send + Sync>>;

/// 流式请求体，克隆之间共享，只能被读取一次
#[derive(Clone)]
pub struct StreamBody {
    inner: Arc<Mutex<Option<ByteStream>>>,
}

impl StreamBody {
    pub fn new<S>(stream: S) -> Self
    where
        S: Stream<Item = io::Result<Bytes>> + Send + Sync + 'static,
    {
        Self { inner: Arc::new(Mutex::new(Some(Box::pin(stream)))) }
    }

    pub fn is_used(&self) -> bool {
        self.lock().is_none()
    }

    pub(crate) fn take(&self) -> Option<ByteStream> {
        self.lock().take()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<ByteStream>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl fmt::Debug for StreamBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamBody").field("used", &self.is_used()).finish()
    }
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    Bytes(Bytes),
    Text(String),
    Json(Value),
    Stream(StreamBody),
}

impl RequestBody {
    pub fn is_stream(&self) -> bool {
        matches!(self, RequestBody::Stream(_))
    }
}

impl PartialEq for RequestBody {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RequestBody::Bytes(a), RequestBody::Bytes(b)) => a == b,
            (RequestBody::Text(a), RequestBody::Text(b)) => a == b,
            (RequestBody::Json(a), RequestBody::Json(b)) => a == b,
            (RequestBody::Stream(a), RequestBody::Stream(b)) => Arc::ptr_eq(&a.inner, &b.inner),
            _ => false,
        }
    }
}

impl From<Bytes> for RequestBody {
    fn from(bytes: Bytes) -> Self {
        RequestBody::Bytes(bytes)
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        RequestBody::Bytes(Bytes::from(bytes))
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        RequestBody::Text(text.to_string())
    }
}

impl From<Value> for RequestBody {
    fn from(json: Value) -> Self {
        RequestBody::Json(json)
    }
}

impl From<StreamBody> for RequestBody {
    fn from(stream: StreamBody) -> Self {
        RequestBody::Stream(stream)
    }
}

/// 请求选项，所有字段可选；未设置的字段使用请求描述符或默认值
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub headers: Option<HeaderMap>,
    pub body: Option<RequestBody>,
    pub mode: Option<RequestMode>,
    pub credentials: Option<Credentials>,
    pub cache: Option<CacheMode>,
    pub redirect: Option<RedirectMode>,
    pub referrer: Option<String>,
    pub referrer_policy: Option<ReferrerPolicy>,
    pub integrity: Option<String>,
    pub duplex: Option<Duplex>,
    // 只由 fetch 设置，每次调用新建
    pub(crate) signal: Option<AbortSignal>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn mode(mut self, mode: RequestMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn cache(mut self, cache: CacheMode) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn redirect(mut self, redirect: RedirectMode) -> Self {
        self.redirect = Some(redirect);
        self
    }

    pub fn referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }

    pub fn referrer_policy(mut self, policy: ReferrerPolicy) -> Self {
        self.referrer_policy = Some(policy);
        self
    }

    pub fn integrity(mut self, integrity: impl Into<String>) -> Self {
        self.integrity = Some(integrity.into());
        self
    }

    pub fn duplex(mut self, duplex: Duplex) -> Self {
        self.duplex = Some(duplex);
        self
    }

    pub fn signal(&self) -> Option<&AbortSignal> {
        self.signal.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_strings_match_fetch_names() {
        assert_eq!("no-cors".parse::<RequestMode>().unwrap(), RequestMode::NoCors);
        assert_eq!("include".parse::<Credentials>().unwrap(), Credentials::Include);
        assert_eq!("only-if-cached".parse::<CacheMode>().unwrap(), CacheMode::OnlyIfCached);
        assert_eq!("".parse::<ReferrerPolicy>().unwrap(), ReferrerPolicy::Unset);
        assert_eq!(RedirectMode::Manual.to_string(), "manual");
        assert_eq!(Duplex::Half.as_str(), "half");
    }

    #[test]
    fn unknown_option_string_is_rejected() {
        let err = "sideways".parse::<RedirectMode>().unwrap_err();
        assert_eq!(err.to_string(), "invalid redirect value: 'sideways'");
    }

    #[test]
    fn stream_body_is_taken_once_across_clones() {
        let body = StreamBody::new(futures::stream::empty());
        let copy = body.clone();
        assert!(!copy.is_used());

        assert!(body.take().is_some());
        assert!(copy.is_used());
        assert!(copy.take().is_none());
        assert_eq!(RequestBody::Stream(body), RequestBody::Stream(copy));
    }

    #[test]
    fn builder_sets_only_what_was_given() {
        let options = RequestOptions::new().method(Method::PUT).body("hi");
        assert_eq!(options.method, Some(Method::PUT));
        assert_eq!(options.body, Some(RequestBody::Text("hi".into())));
        assert!(options.headers.is_none());
        assert!(options.signal().is_none());
    }
}
