use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList, PyTuple};
use serde_json::{Map, Number, Value};

// Python 对象转成 JSON 请求体
pub fn py_to_json(obj: &PyAny) -> PyResult<Value> {
    if obj.is_none() { return Ok(Value::Null); }
    if let Ok(b) = obj.extract::<bool>() { return Ok(Value::Bool(b)); }
    if let Ok(s) = obj.extract::<String>() { return Ok(Value::String(s)); }
    if let Ok(i) = obj.extract::<i64>() { return Ok(Value::Number(i.into())); }
    // NaN/inf 不是合法 JSON
    if let Ok(f) = obj.extract::<f64>() { return Ok(Number::from_f64(f).map_or(Value::Null, Value::Number)); }
    if let Ok(list) = obj.downcast::<PyList>() {
        return list.iter().map(py_to_json).collect::<PyResult<Vec<_>>>().map(Value::Array);
    }
    if let Ok(tuple) = obj.downcast::<PyTuple>() {
        return tuple.iter().map(py_to_json).collect::<PyResult<Vec<_>>>().map(Value::Array);
    }
    if let Ok(dict) = obj.downcast::<PyDict>() {
        let mut map = Map::new();
        for (k, v) in dict.iter() { map.insert(k.str()?.to_string(), py_to_json(v)?); }
        return Ok(Value::Object(map));
    }
    Ok(Value::String(obj.str()?.to_string()))
}
