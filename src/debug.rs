use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::RwLock;
use std::time::SystemTime;

use once_cell::sync::Lazy;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use url::Url;

use crate::utils::format_datetime;

#[derive(Clone, Debug, PartialEq)]
enum DebugTarget {
    Console,
    File(String),
}

#[derive(Clone)]
struct DebugConfig {
    enabled: bool,
    target: DebugTarget,
}

static DEBUG_CONFIG: Lazy<RwLock<DebugConfig>> = Lazy::new(|| {
    RwLock::new(DebugConfig { enabled: false, target: DebugTarget::Console })
});

fn current() -> DebugConfig {
    DEBUG_CONFIG.read().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
}

fn parse_target(target: Option<String>) -> DebugTarget {
    match target {
        Some(t) if t.to_lowercase() == "console" || t.is_empty() => DebugTarget::Console,
        Some(t) => {
            let path = Path::new(&t);
            if path.is_dir() { DebugTarget::File(path.join("debug.log").to_string_lossy().to_string()) }
            else { DebugTarget::File(t) }
        },
        None => DebugTarget::Console,
    }
}

/// 打开/关闭调试输出；target 为 "console"、文件路径或目录（目录下写 debug.log）
pub fn set_debug(enabled: bool, target: Option<String>) {
    let mut cfg = DEBUG_CONFIG.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    cfg.enabled = enabled;
    cfg.target = parse_target(target);
}

fn render(
    method: &Method,
    url: &Url,
    status: StatusCode,
    headers: &HeaderMap,
    start: SystemTime,
    end: SystemTime,
) -> String {
    let mut msg = format!("\n==== [{} {}] ====\nStatus: {}\n", method, url, status);
    msg.push_str(&format!("Request Time: {} -> {}\n", format_datetime(start), format_datetime(end)));
    let elapsed = end.duration_since(start).unwrap_or_default().as_secs_f64();
    msg.push_str(&format!("Process Time: {:.4}\n", elapsed));
    msg.push_str("Headers:\n");
    for (key, value) in headers.iter() {
        msg.push_str(&format!("  {}: {:?}\n", key, value));
    }
    msg
}

pub(crate) fn debug_log(
    method: &Method,
    url: &Url,
    status: StatusCode,
    headers: &HeaderMap,
    start: SystemTime,
    end: SystemTime,
) {
    let cfg = current();
    if !cfg.enabled { return; }

    let msg = render(method, url, status, headers, start, end);
    match &cfg.target {
        DebugTarget::Console => println!("{}", msg),
        DebugTarget::File(path) => {
            let written = OpenOptions::new().create(true).append(true).open(path).and_then(|mut f| writeln!(f, "{}", msg));
            if let Err(e) = written {
                tracing::warn!(path = %path, error = %e, "failed to write debug log");
            }
        }
    }
}
