// request/mod.rs

pub mod config;
pub mod descriptor;
pub(crate) mod executor;
pub mod normalize;
pub mod options;
pub mod timeout;

// 重新导出，方便上层直接使用
pub use config::{default_timeout, set_default_timeout, DEFAULT_TIMEOUT_MS};
pub use descriptor::{RequestDescriptor, Resource};
pub use normalize::RequestInit;
pub use options::{
    ByteStream, CacheMode, Credentials, Duplex, ParseOptionError, RedirectMode, ReferrerPolicy,
    RequestBody, RequestMode, RequestOptions, StreamBody,
};
pub use timeout::fetch;
