//! HTTP polling adapter for a remotely served ledger.

use crate::error::LedgerError;
use crate::record::parse_document;
use crate::store::traits::LedgerReader;
use crate::LedgerResult;
use async_trait::async_trait;
use chrono::Utc;
use levels::AggregatedLevel;
use std::time::Duration;
use tracing::debug;

/// Reads the ledger over HTTP, as published to the distribution medium.
///
/// Every poll carries a `ts` query parameter with the current epoch millis
/// so intermediate caches cannot serve a stale document.
pub struct HttpLedgerReader {
    client: reqwest::Client,
    url: String,
}

impl HttpLedgerReader {
    pub fn new(url: String, timeout: Duration) -> LedgerResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LedgerError::Http(e.to_string()))?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl LedgerReader for HttpLedgerReader {
    async fn latest(&self) -> LedgerResult<Option<AggregatedLevel>> {
        let cache_buster = Utc::now().timestamp_millis().to_string();
        debug!(url = %self.url, ts = %cache_buster, "Polling remote ledger");

        let response = self
            .client
            .get(&self.url)
            .query(&[("ts", cache_buster.as_str())])
            .send()
            .await
            .map_err(|e| LedgerError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LedgerError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LedgerError::Http(e.to_string()))?;

        Ok(parse_document(&body)?.into_iter().last())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::HEADER;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// One-shot HTTP responder: accepts a single connection, captures the
    /// request head, answers with `body`, and hands the head back.
    async fn serve_once(body: String) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();

            let mut head = Vec::new();
            let mut buf = [0_u8; 1024];
            loop {
                let n = stream.read(&mut buf).await.unwrap();
                head.extend_from_slice(&buf[..n]);
                if n == 0 || head.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: text/csv\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();

            String::from_utf8_lossy(&head).into_owned()
        });

        (format!("http://{addr}/levels.csv"), handle)
    }

    #[tokio::test]
    async fn test_poll_carries_cache_buster_and_returns_last_record() {
        let body = format!("{HEADER}\n24/08/2026,64000,57000,63000,59000\n25/08/2026,65000,58000,64000,60000\n");
        let (url, server) = serve_once(body).await;

        let reader = HttpLedgerReader::new(url, Duration::from_secs(5)).unwrap();
        let latest = reader.latest().await.unwrap().unwrap();

        assert_eq!(
            latest.date,
            chrono::NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
        );
        assert_eq!(latest.call_wall, 65_000.0);

        // Every poll must carry a fresh timestamp parameter so intermediate
        // caches cannot serve a stale document.
        let request_head = server.await.unwrap();
        let request_line = request_head.lines().next().unwrap().to_string();
        assert!(
            request_line.contains("/levels.csv?ts="),
            "request line missing ts parameter: {request_line}"
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0_u8; 1024];
            let _ = stream.read(&mut buf).await;
            stream
                .write_all(b"HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
                .await
                .unwrap();
        });

        let reader =
            HttpLedgerReader::new(format!("http://{addr}/levels.csv"), Duration::from_secs(5))
                .unwrap();
        assert!(matches!(
            reader.latest().await,
            Err(LedgerError::Status(503))
        ));
    }
}
