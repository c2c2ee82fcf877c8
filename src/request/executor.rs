use std::time::SystemTime;

use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, LOCATION, PRAGMA, REFERER};
use reqwest::{Body, Client, Method, RequestBuilder, Response};
use url::Url;

use crate::debug::debug_log;
use crate::error::FetchError;
use crate::network::client_for;
use super::descriptor::{RequestDescriptor, Resource};
use super::options::{CacheMode, RedirectMode, ReferrerPolicy, RequestBody, RequestOptions};

const CLIENT_REFERRER: &str = "about:client";

impl RequestOptions {
    // 描述符作为请求目标时，未设置的字段沿用描述符的值
    fn fill_from(&mut self, descriptor: &RequestDescriptor) {
        self.method.get_or_insert_with(|| descriptor.method().clone());
        self.headers.get_or_insert_with(|| descriptor.headers().clone());
        if self.body.is_none() {
            self.body = descriptor.body().cloned();
        }
        self.mode.get_or_insert(descriptor.mode());
        self.credentials.get_or_insert(descriptor.credentials());
        self.cache.get_or_insert(descriptor.cache());
        self.redirect.get_or_insert(descriptor.redirect());
        self.referrer.get_or_insert_with(|| descriptor.referrer().to_string());
        self.referrer_policy.get_or_insert(descriptor.referrer_policy());
        self.integrity.get_or_insert_with(|| descriptor.integrity().to_string());
    }
}

fn resolve(resource: Resource, options: &mut RequestOptions) -> Result<Url, FetchError> {
    match resource {
        Resource::Url(url) => Ok(Url::parse(&url)?),
        Resource::Descriptor(descriptor) => {
            options.fill_from(&descriptor);
            Ok(descriptor.url().clone())
        }
    }
}

fn build_headers(options: &RequestOptions) -> HeaderMap {
    let mut headers = options.headers.clone().unwrap_or_default();

    if matches!(options.cache, Some(CacheMode::NoStore | CacheMode::Reload | CacheMode::NoCache)) {
        if !headers.contains_key(CACHE_CONTROL) {
            headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        }
        if !headers.contains_key(PRAGMA) {
            headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        }
    }

    let suppressed = options.referrer_policy == Some(ReferrerPolicy::NoReferrer);
    if let Some(referrer) = options.referrer.as_deref() {
        if !suppressed && !referrer.is_empty() && referrer != CLIENT_REFERRER && !headers.contains_key(REFERER) {
            if let Ok(value) = HeaderValue::from_str(referrer) {
                headers.insert(REFERER, value);
            }
        }
    }

    headers
}

fn build_request(client: &Client, url: Url, options: &RequestOptions) -> Result<RequestBuilder, FetchError> {
    let method = options.method.clone().unwrap_or(Method::GET);
    let mut builder = client.request(method, url).headers(build_headers(options));

    builder = match &options.body {
        None => builder,
        Some(RequestBody::Bytes(bytes)) => builder.body(bytes.clone()),
        Some(RequestBody::Text(text)) => builder.body(text.clone()),
        Some(RequestBody::Json(json)) => builder.json(json),
        Some(RequestBody::Stream(stream)) => {
            let stream = stream.take().ok_or(FetchError::BodyUsed)?;
            builder.body(Body::wrap_stream(stream))
        }
    };

    Ok(builder)
}

/// 底层请求：发送请求并响应中止信号
pub(crate) async fn send(resource: Resource, mut options: RequestOptions) -> Result<Response, FetchError> {
    let url = resolve(resource, &mut options)?;
    let redirect = options.redirect.unwrap_or_default();
    let client = client_for(redirect)?;
    let request = build_request(&client, url, &options)?.build()?;

    let method = request.method().clone();
    let url = request.url().clone();
    let start = SystemTime::now();

    let response = match options.signal.as_ref() {
        Some(signal) => {
            tokio::select! {
                biased;
                _ = signal.aborted() => return Err(FetchError::Aborted),
                result = client.execute(request) => result?,
            }
        }
        None => client.execute(request).await?,
    };

    debug_log(&method, &url, response.status(), response.headers(), start, SystemTime::now());

    if redirect == RedirectMode::Error && response.status().is_redirection() {
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        return Err(FetchError::RedirectRefused { location });
    }

    Ok(response)
}
