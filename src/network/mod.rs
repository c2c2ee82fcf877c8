// src/network/mod.rs
pub mod abort;
pub(crate) mod client;

// 重新导出，方便外部使用
pub use abort::{AbortController, AbortSignal};
pub(crate) use client::client_for;
