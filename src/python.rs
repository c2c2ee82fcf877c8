use pyo3::exceptions::{PyRuntimeError, PyTimeoutError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyDict, PyString};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;

use crate::error::FetchError;
use crate::request::{RequestBody, RequestInit, RequestOptions};
use crate::utils::{drain, py_to_json};

fn into_py_err(err: FetchError) -> PyErr {
    match err {
        FetchError::Timeout { .. } => PyTimeoutError::new_err(err.to_string()),
        FetchError::InvalidUrl(_) => PyValueError::new_err(err.to_string()),
        other => PyRuntimeError::new_err(other.to_string()),
    }
}

fn value_error(err: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn extract_headers(dict: &PyDict) -> PyResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (k, v) in dict.iter() {
        let name = HeaderName::from_bytes(k.extract::<String>()?.as_bytes()).map_err(value_error)?;
        let value = HeaderValue::from_str(&v.extract::<String>()?).map_err(value_error)?;
        headers.append(name, value);
    }
    Ok(headers)
}

fn extract_body(obj: &PyAny) -> PyResult<RequestBody> {
    if let Ok(bytes) = obj.downcast::<PyBytes>() {
        return Ok(RequestBody::from(bytes.as_bytes().to_vec()));
    }
    if let Ok(text) = obj.downcast::<PyString>() {
        return Ok(RequestBody::Text(text.to_str()?.to_string()));
    }
    Ok(RequestBody::Json(py_to_json(obj)?))
}

fn extract_text<T>(dict: &PyDict, key: &str) -> PyResult<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => Ok(Some(value.extract::<String>()?.parse::<T>().map_err(value_error)?)),
        _ => Ok(None),
    }
}

// 第二个参数：数字表示超时，字典表示请求选项
fn extract_init(options: Option<&PyAny>) -> PyResult<RequestInit> {
    let options = match options {
        Some(options) if !options.is_none() => options,
        _ => return Ok(RequestInit::None),
    };
    if let Ok(timeout_ms) = options.extract::<u64>() {
        return Ok(RequestInit::Timeout(timeout_ms));
    }

    let dict = options.downcast::<PyDict>()?;
    let mut init = RequestOptions::new();
    init.method = extract_text::<String>(dict, "method")?
        .map(|m| Method::from_bytes(m.to_uppercase().as_bytes()).map_err(value_error))
        .transpose()?;
    if let Some(headers) = dict.get_item("headers")? {
        init.headers = Some(extract_headers(headers.downcast::<PyDict>()?)?);
    }
    if let Some(body) = dict.get_item("body")? {
        if !body.is_none() {
            init.body = Some(extract_body(body)?);
        }
    }
    init.mode = extract_text(dict, "mode")?;
    init.credentials = extract_text(dict, "credentials")?;
    init.cache = extract_text(dict, "cache")?;
    init.redirect = extract_text(dict, "redirect")?;
    init.referrer = extract_text(dict, "referrer")?;
    init.referrer_policy = extract_text(dict, "referrer_policy")?;
    init.integrity = extract_text(dict, "integrity")?;
    init.duplex = extract_text(dict, "duplex")?;
    Ok(RequestInit::Options(init))
}

/// 带超时的异步请求，返回 {"status", "headers", "content"}
#[pyfunction]
#[pyo3(name = "fetch", signature = (resource, options=None, timeout=None))]
pub fn py_fetch<'py>(
    py: Python<'py>,
    resource: String,
    options: Option<&PyAny>,
    timeout: Option<u64>,
) -> PyResult<&'py PyAny> {
    let init = extract_init(options)?;
    pyo3_asyncio::tokio::future_into_py(py, async move {
        let response = crate::fetch(resource, init, timeout).await.map_err(into_py_err)?;
        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let content = drain(response.bytes_stream())
            .await
            .map_err(|e| into_py_err(FetchError::from(e)))?;

        Python::with_gil(|py| -> PyResult<PyObject> {
            let dict = PyDict::new(py);
            dict.set_item("status", status)?;
            let header_dict = PyDict::new(py);
            for (k, v) in headers {
                header_dict.set_item(k, v)?;
            }
            dict.set_item("headers", header_dict)?;
            dict.set_item("content", PyBytes::new(py, &content))?;
            Ok(dict.into_py(py))
        })
    })
}

#[pyfunction]
#[pyo3(name = "default_timeout")]
pub fn py_default_timeout(timeout_ms: u64) {
    crate::set_default_timeout(timeout_ms);
}

#[pyfunction]
#[pyo3(name = "set_debug", signature = (enabled, target=None))]
pub fn py_set_debug(enabled: bool, target: Option<String>) {
    crate::set_debug(enabled, target);
}
