//! One-shot HTTP/1.1 server that writes its body in timed chunks.
//!
//! wiremock answers with the whole body at once, so slow or truncated bodies
//! are served from a raw socket instead.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use super::socket_guard::should_skip_socket_bound_test;

/// Body script: the declared `Content-Length`, then each chunk after `gap`.
/// The connection is closed after the last chunk, whether or not the declared
/// length was reached.
pub struct TrickleBody {
    pub content_length: usize,
    pub chunks: Vec<Vec<u8>>,
    pub gap: Duration,
}

/// Serves `body` to the first connection; returns the base URL, or `None`
/// when localhost cannot be bound.
pub async fn serve_once(body: TrickleBody) -> Option<String> {
    if should_skip_socket_bound_test() {
        return None;
    }
    let listener = TcpListener::bind("127.0.0.1:0").await.ok()?;
    let addr = listener.local_addr().ok()?;

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }

        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.content_length
        );
        if socket.write_all(head.as_bytes()).await.is_err() {
            return;
        }
        for chunk in body.chunks {
            tokio::time::sleep(body.gap).await;
            if socket.write_all(&chunk).await.is_err() || socket.flush().await.is_err() {
                return;
            }
        }
        let _ = socket.shutdown().await;
    });

    Some(format!("http://{addr}"))
}
