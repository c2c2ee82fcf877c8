use once_cell::sync::OnceCell;
use reqwest::redirect::Policy;
use reqwest::Client;

use crate::request::RedirectMode;

// 全局共享的HTTP客户端，按重定向策略各一个
static FOLLOW_CLIENT: OnceCell<Client> = OnceCell::new();
static NO_FOLLOW_CLIENT: OnceCell<Client> = OnceCell::new();

fn build_client(redirect: RedirectMode) -> Result<Client, reqwest::Error> {
    let policy = match redirect {
        RedirectMode::Follow => Policy::default(),
        RedirectMode::Error | RedirectMode::Manual => Policy::none(),
    };

    // 超时由 fetch 的计时器负责，这里不设置客户端超时
    Client::builder()
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .redirect(policy)
        .user_agent(concat!("fetchout/", env!("CARGO_PKG_VERSION")))
        .build()
}

pub(crate) fn client_for(redirect: RedirectMode) -> Result<Client, reqwest::Error> {
    let cell = match redirect {
        RedirectMode::Follow => &FOLLOW_CLIENT,
        RedirectMode::Error | RedirectMode::Manual => &NO_FOLLOW_CLIENT,
    };
    cell.get_or_try_init(|| build_client(redirect)).cloned()
}
