use reqwest::header::HeaderMap;
use reqwest::Method;
use url::Url;

use super::options::{
    CacheMode, Credentials, RedirectMode, ReferrerPolicy, RequestBody, RequestMode, RequestOptions,
};

const CLIENT_REFERRER: &str = "about:client";

/// 预先构建好的只读请求，字段只能通过 getter 读取
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    url: Url,
    method: Method,
    headers: HeaderMap,
    body: Option<RequestBody>,
    mode: RequestMode,
    credentials: Credentials,
    cache: CacheMode,
    redirect: RedirectMode,
    referrer: String,
    referrer_policy: ReferrerPolicy,
    integrity: String,
}

impl RequestDescriptor {
    pub fn new(url: &str, options: RequestOptions) -> Result<Self, url::ParseError> {
        Ok(Self::from_url(Url::parse(url)?, options))
    }

    pub fn from_url(url: Url, options: RequestOptions) -> Self {
        Self {
            url,
            method: options.method.unwrap_or(Method::GET),
            headers: options.headers.unwrap_or_default(),
            body: options.body,
            mode: options.mode.unwrap_or_default(),
            credentials: options.credentials.unwrap_or_default(),
            cache: options.cache.unwrap_or_default(),
            redirect: options.redirect.unwrap_or_default(),
            referrer: options.referrer.unwrap_or_else(|| CLIENT_REFERRER.to_string()),
            referrer_policy: options.referrer_policy.unwrap_or_default(),
            integrity: options.integrity.unwrap_or_default(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    pub fn mode(&self) -> RequestMode {
        self.mode
    }

    pub fn credentials(&self) -> Credentials {
        self.credentials
    }

    pub fn cache(&self) -> CacheMode {
        self.cache
    }

    pub fn redirect(&self) -> RedirectMode {
        self.redirect
    }

    pub fn referrer(&self) -> &str {
        &self.referrer
    }

    pub fn referrer_policy(&self) -> ReferrerPolicy {
        self.referrer_policy
    }

    pub fn integrity(&self) -> &str {
        &self.integrity
    }

    /// 把描述符的字段复制到一个新的选项结构，不修改描述符本身
    pub fn to_options(&self) -> RequestOptions {
        RequestOptions {
            method: Some(self.method.clone()),
            headers: Some(self.headers.clone()),
            body: self.body.clone(),
            mode: Some(self.mode),
            credentials: Some(self.credentials),
            cache: Some(self.cache),
            redirect: Some(self.redirect),
            referrer: Some(self.referrer.clone()),
            referrer_policy: Some(self.referrer_policy),
            integrity: Some(self.integrity.clone()),
            duplex: None,
            signal: None,
        }
    }
}

/// 请求目标：URL 字符串或请求描述符
#[derive(Debug, Clone)]
pub enum Resource {
    Url(String),
    Descriptor(RequestDescriptor),
}

impl Resource {
    pub fn as_descriptor(&self) -> Option<&RequestDescriptor> {
        match self {
            Resource::Descriptor(descriptor) => Some(descriptor),
            Resource::Url(_) => None,
        }
    }
}

impl From<&str> for Resource {
    fn from(url: &str) -> Self {
        Resource::Url(url.to_string())
    }
}

impl From<String> for Resource {
    fn from(url: String) -> Self {
        Resource::Url(url)
    }
}

impl From<&String> for Resource {
    fn from(url: &String) -> Self {
        Resource::Url(url.clone())
    }
}

impl From<Url> for Resource {
    fn from(url: Url) -> Self {
        Resource::Url(url.into())
    }
}

impl From<RequestDescriptor> for Resource {
    fn from(descriptor: RequestDescriptor) -> Self {
        Resource::Descriptor(descriptor)
    }
}
