use super::descriptor::{RequestDescriptor, Resource};
use super::options::{Duplex, RequestOptions};

/// `fetch` 第二个参数的三种形态，在入口处一次性区分
#[derive(Debug, Clone, Default)]
pub enum RequestInit {
    #[default]
    None,
    /// 只给了超时时间（毫秒），没有选项
    Timeout(u64),
    Options(RequestOptions),
    Descriptor(RequestDescriptor),
}

impl From<u64> for RequestInit {
    fn from(timeout_ms: u64) -> Self {
        RequestInit::Timeout(timeout_ms)
    }
}

impl From<RequestOptions> for RequestInit {
    fn from(options: RequestOptions) -> Self {
        RequestInit::Options(options)
    }
}

impl From<RequestDescriptor> for RequestInit {
    fn from(descriptor: RequestDescriptor) -> Self {
        RequestInit::Descriptor(descriptor)
    }
}

impl From<Option<RequestOptions>> for RequestInit {
    fn from(options: Option<RequestOptions>) -> Self {
        options.map_or(RequestInit::None, RequestInit::Options)
    }
}

#[derive(Debug)]
pub(crate) struct Normalized {
    pub(crate) options: RequestOptions,
    pub(crate) timeout_ms: Option<u64>,
}

pub(crate) fn normalize(resource: &Resource, init: RequestInit, timeout_ms: Option<u64>) -> Normalized {
    let (options, timeout_ms) = match init {
        RequestInit::Timeout(ms) => (None, Some(ms)),
        RequestInit::Options(options) => (Some(options), timeout_ms),
        RequestInit::Descriptor(descriptor) => {
            // 流式请求体需要半双工标记
            let mut options = descriptor.to_options();
            options.duplex = Some(Duplex::Half);
            (Some(options), timeout_ms)
        }
        RequestInit::None => (None, timeout_ms),
    };

    let options = options.unwrap_or_else(|| match resource.as_descriptor() {
        Some(descriptor) => descriptor.to_options(),
        None => RequestOptions::new(),
    });

    Normalized { options, timeout_ms }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::options::{RequestBody, RequestMode};
    use reqwest::Method;

    fn descriptor() -> RequestDescriptor {
        RequestDescriptor::new(
            "https://example.test/upload",
            RequestOptions::new().method(Method::POST).body("payload").mode(RequestMode::SameOrigin),
        )
        .unwrap()
    }

    #[test]
    fn bare_number_is_the_timeout() {
        let resource = Resource::from("https://example.test/slow");
        let normalized = normalize(&resource, RequestInit::from(50_u64), Some(10_000));
        assert_eq!(normalized.timeout_ms, Some(50));
        assert!(normalized.options.method.is_none());
        assert!(normalized.options.headers.is_none());
    }

    #[test]
    fn bare_number_matches_no_options_plus_timeout() {
        let resource = Resource::from("https://example.test/slow");
        let by_number = normalize(&resource, RequestInit::Timeout(75), None);
        let explicit = normalize(&resource, RequestInit::None, Some(75));
        assert_eq!(by_number.timeout_ms, explicit.timeout_ms);
        assert!(by_number.options.body.is_none() && explicit.options.body.is_none());
        assert!(by_number.options.duplex.is_none() && explicit.options.duplex.is_none());
    }

    #[test]
    fn descriptor_resource_without_options_is_extracted() {
        let resource = Resource::from(descriptor());
        let normalized = normalize(&resource, RequestInit::None, None);
        assert_eq!(normalized.options.method, Some(Method::POST));
        assert_eq!(normalized.options.body, Some(RequestBody::Text("payload".into())));
        assert_eq!(normalized.options.mode, Some(RequestMode::SameOrigin));
        assert!(normalized.options.duplex.is_none());
        assert_eq!(normalized.timeout_ms, None);
    }

    #[test]
    fn descriptor_as_options_sets_half_duplex() {
        let resource = Resource::from("https://example.test/other");
        let normalized = normalize(&resource, RequestInit::from(descriptor()), Some(200));
        assert_eq!(normalized.options.method, Some(Method::POST));
        assert_eq!(normalized.options.duplex, Some(Duplex::Half));
        assert_eq!(normalized.timeout_ms, Some(200));
    }

    #[test]
    fn explicit_options_win_over_descriptor_resource() {
        let resource = Resource::from(descriptor());
        let options = RequestOptions::new().method(Method::DELETE);
        let normalized = normalize(&resource, RequestInit::from(options), None);
        assert_eq!(normalized.options.method, Some(Method::DELETE));
        assert!(normalized.options.body.is_none());
    }

    #[test]
    fn plain_url_without_options_starts_empty() {
        let resource = Resource::from("https://example.test/");
        let normalized = normalize(&resource, RequestInit::default(), None);
        assert!(normalized.options.method.is_none());
        assert!(normalized.options.signal().is_none());
    }
}
