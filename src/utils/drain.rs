use futures::{pin_mut, Stream, StreamExt};
use reqwest::Response;

use crate::error::FetchError;

/// 读完一个分块字节流，按到达顺序拼成一个连续的缓冲区
///
/// 流按值传入，只能被读取一次。读取出错时直接返回该错误，已读到的分块被丢弃。
pub async fn drain<S, B, E>(stream: S) -> Result<Vec<u8>, E>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    pin_mut!(stream);

    let mut chunks = Vec::new();
    let mut received = 0usize;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        received += chunk.as_ref().len();
        chunks.push(chunk);
    }

    let mut buffer = Vec::with_capacity(received);
    for chunk in &chunks {
        buffer.extend_from_slice(chunk.as_ref());
    }
    Ok(buffer)
}

/// 读取整个响应体
pub async fn drain_response(response: Response) -> Result<Vec<u8>, FetchError> {
    Ok(drain(response.bytes_stream()).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use std::io;

    #[tokio::test]
    async fn chunks_are_concatenated_in_order() {
        let chunks: Vec<io::Result<Vec<u8>>> = vec![Ok(vec![1, 2, 3]), Ok(vec![4, 5, 6, 7, 8]), Ok(vec![9, 10])];
        let buffer = drain(stream::iter(chunks)).await.unwrap();
        assert_eq!(buffer.len(), 10);
        assert_eq!(buffer, (1..=10).collect::<Vec<u8>>());
        assert_eq!(buffer.capacity(), 10);
    }

    #[tokio::test]
    async fn empty_stream_gives_empty_buffer() {
        let buffer = drain(stream::empty::<io::Result<Vec<u8>>>()).await.unwrap();
        assert!(buffer.is_empty());
    }

    #[tokio::test]
    async fn empty_chunks_are_skipped_over() {
        let chunks: Vec<io::Result<&[u8]>> = vec![Ok(&b""[..]), Ok(&b"ab"[..]), Ok(&b""[..]), Ok(&b"c"[..])];
        assert_eq!(drain(stream::iter(chunks)).await.unwrap(), b"abc");
    }

    #[tokio::test]
    async fn read_error_propagates_unchanged() {
        let chunks: Vec<io::Result<Vec<u8>>> = vec![
            Ok(vec![1, 2]),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer")),
            Ok(vec![3]),
        ];
        let err = drain(stream::iter(chunks)).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
        assert_eq!(err.to_string(), "reset by peer");
    }
}
