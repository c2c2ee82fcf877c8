#![cfg_attr(feature = "python", allow(non_local_definitions))]
//! 带超时的 HTTP 请求封装。
//!
//! [`fetch`] 为每次调用创建一个中止信号和一次性计时器，计时器先触发时返回
//! `request timed out after <timeout> ms`。未指定超时的调用使用全局默认值，
//! 可以通过 [`set_default_timeout`] 修改（初始为 60000 毫秒）。
//!
//! 读取分块字节流的工具在 [`utils::drain`]。

mod debug;
mod error;
pub mod network;
pub mod request;
pub mod utils;

#[cfg(feature = "python")]
mod python;

pub use debug::set_debug;
pub use error::FetchError;
pub use network::{AbortController, AbortSignal};
pub use request::{
    default_timeout, fetch, set_default_timeout, CacheMode, Credentials, Duplex, RedirectMode,
    ReferrerPolicy, RequestBody, RequestDescriptor, RequestInit, RequestMode, RequestOptions,
    Resource, StreamBody, DEFAULT_TIMEOUT_MS,
};

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn fetchout(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(python::py_fetch, m)?)?;
    m.add_function(wrap_pyfunction!(python::py_default_timeout, m)?)?;
    m.add_function(wrap_pyfunction!(python::py_set_debug, m)?)?;
    Ok(())
}
