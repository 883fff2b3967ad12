pub mod parser;

use std::fs;
use std::path::PathBuf;

use log::debug;

use crate::errors::{DashboardError, Result};

pub use parser::{parse_amount, parse_date, parse_feed, sort_records, PaymentRecord, RawRow};

/// where the raw feed text comes from
///
/// `fetch` is the only blocking call in a load: one request, no retry. Any
/// failure is terminal for that load attempt.
pub trait FeedSource: Send + Sync {
    fn fetch(&self) -> Result<String>;

    /// human readable location, used in logs and errors
    fn location(&self) -> &str;
}

/// published feed fetched over http(s)
#[derive(Debug, Clone)]
pub struct HttpFeed {
    url: String,
}

impl HttpFeed {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl FeedSource for HttpFeed {
    fn fetch(&self) -> Result<String> {
        debug!("fetching feed from {}", self.url);

        let response = ureq::get(&self.url)
            .set("Cache-Control", "no-store")
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(status, _) => DashboardError::FetchStatus {
                    location: self.url.clone(),
                    status,
                },
                ureq::Error::Transport(transport) => DashboardError::Fetch {
                    location: self.url.clone(),
                    reason: transport.to_string(),
                },
            })?;

        response.into_string().map_err(|e| DashboardError::Fetch {
            location: self.url.clone(),
            reason: e.to_string(),
        })
    }

    fn location(&self) -> &str {
        &self.url
    }
}

/// feed exported to a local file
#[derive(Debug, Clone)]
pub struct FileFeed {
    path: PathBuf,
    location: String,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let location = path.display().to_string();
        Self { path, location }
    }
}

impl FeedSource for FileFeed {
    fn fetch(&self) -> Result<String> {
        debug!("reading feed from {}", self.location);

        fs::read_to_string(&self.path).map_err(|e| DashboardError::Fetch {
            location: self.location.clone(),
            reason: e.to_string(),
        })
    }

    fn location(&self) -> &str {
        &self.location
    }
}

/// feed text held in memory
#[derive(Debug, Clone)]
pub struct StaticFeed {
    text: String,
}

impl StaticFeed {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl FeedSource for StaticFeed {
    fn fetch(&self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn location(&self) -> &str {
        "memory"
    }
}

/// pick a source for a configured location: http(s) urls are fetched, anything
/// else is read as a local path (`file://` prefix allowed)
pub fn source_for(location: &str) -> Box<dyn FeedSource> {
    let location = location.trim();
    let lower = location.to_ascii_lowercase();

    if lower.starts_with("http://") || lower.starts_with("https://") {
        Box::new(HttpFeed::new(location))
    } else {
        let path = location.strip_prefix("file://").unwrap_or(location);
        Box::new(FileFeed::new(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    /// serve one canned http response on a local port, returning the url
    fn serve_once(response: &'static str) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/pagos.tsv", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut line = String::new();
            // drain the request head
            while reader.read_line(&mut line).unwrap() > 0 {
                if line == "\r\n" {
                    break;
                }
                line.clear();
            }
            let mut stream = reader.into_inner();
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        });

        (url, handle)
    }

    #[test]
    fn test_http_feed_returns_body() {
        let (url, handle) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 16\r\nConnection: close\r\n\r\nFecha\tMes\tValor\n",
        );
        let text = HttpFeed::new(url).fetch().unwrap();
        handle.join().unwrap();

        assert_eq!(text, "Fecha\tMes\tValor\n");
    }

    #[test]
    fn test_http_error_status_is_fetch_status() {
        let (url, handle) =
            serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        let err = HttpFeed::new(url.clone()).fetch().unwrap_err();
        handle.join().unwrap();

        assert!(matches!(err, DashboardError::FetchStatus { status: 404, ref location } if *location == url));
        assert_eq!(err.kind(), ErrorKind::Fetch);
    }

    #[test]
    fn test_http_unreachable_is_fetch_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/pagos.tsv", listener.local_addr().unwrap());
        drop(listener);

        let err = HttpFeed::new(url).fetch().unwrap_err();
        assert!(matches!(err, DashboardError::Fetch { .. }));
        assert_eq!(err.kind(), ErrorKind::Fetch);
    }

    #[test]
    fn test_source_for_picks_by_scheme() {
        assert_eq!(source_for("https://example.com/pagos.tsv").location(), "https://example.com/pagos.tsv");
        assert_eq!(source_for("file:///tmp/pagos.tsv").location(), "/tmp/pagos.tsv");
        assert_eq!(source_for("pagos.tsv").location(), "pagos.tsv");
    }

    #[test]
    fn test_static_feed() {
        let feed = StaticFeed::new("Fecha\tMes\tValor\n");
        assert_eq!(feed.fetch().unwrap(), "Fecha\tMes\tValor\n");
    }

    #[test]
    fn test_missing_file_is_fetch_error() {
        let feed = FileFeed::new("/nonexistent/dir/pagos.tsv");
        let err = feed.fetch().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fetch);
        assert!(err.to_string().contains("/nonexistent/dir/pagos.tsv"));
    }
}
