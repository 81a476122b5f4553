use std::{
    net::SocketAddr,
    path::Path,
    sync::{Arc, Mutex},
};

use chrono::NaiveDate;
use reqwest::Url;
use serde_json::Value;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

use crate::{commands::Context, config::Settings, store::FileStore};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or_default()
    }

    pub fn query(&self) -> Vec<(String, String)> {
        let url = Url::parse(&format!("http://localhost{}", self.target)).unwrap();
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    pub fn form(&self) -> Vec<(String, String)> {
        let url = Url::parse(&format!("http://localhost/?{}", self.body)).unwrap();
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Serves the given responses in order, one connection each, then stops
/// listening. Every request is recorded before it is answered.
pub struct MockServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockServer {
    pub async fn start(responses: &[(u16, &str)]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        let responses: Vec<(u16, String)> = responses
            .iter()
            .map(|(status, body)| (*status, body.to_string()))
            .collect();

        tokio::spawn(async move {
            for (status, body) in responses {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                let request = read_request(&mut stream).await;
                recorded.lock().unwrap().push(request);

                let response = format!(
                    "HTTP/1.1 {} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Self { addr, requests }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn read_request(stream: &mut TcpStream) -> RecordedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before headers were complete");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let target = request_line.next().unwrap_or_default().to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| {
            let (name, value) = line.split_once(':')?;
            Some((name.trim().to_string(), value.trim().to_string()))
        })
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    RecordedRequest {
        method,
        target,
        headers,
        body: String::from_utf8_lossy(&buf[header_end..]).to_string(),
    }
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Context whose endpoints all live under `base_url`, running on 2024-05-02.
pub fn test_context(dir: &Path, base_url: &str) -> Context {
    Context::new(
        Settings {
            auth_url: format!("{}/public_api/authorize", base_url),
            token_url: format!("{}/public_api/token", base_url),
            api_base: format!("{}/hr/api/v1", base_url),
        },
        Box::new(FileStore::new(dir)),
        day(2024, 5, 2),
    )
}

pub fn write_config(dir: &Path, value: Value) {
    std::fs::write(dir.join("config.json"), value.to_string()).unwrap();
}

pub fn write_token(dir: &Path, value: Value) {
    std::fs::write(dir.join("token.json"), value.to_string()).unwrap();
}

pub fn read_config(dir: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(dir.join("config.json")).unwrap()).unwrap()
}

pub fn read_token(dir: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(dir.join("token.json")).unwrap()).unwrap()
}

/// Config and token for a user who already ran `setup`, `auth` and `info`.
pub fn seed_ready_user(dir: &Path) {
    write_config(
        dir,
        serde_json::json!({
            "client_id": "my-client",
            "client_secret": "my-secret",
            "company_id": 100,
            "employee_id": 200
        }),
    );
    write_token(
        dir,
        serde_json::json!({
            "access_token": "old-access",
            "refresh_token": "old-refresh",
            "token_type": "bearer"
        }),
    );
}

/// Token endpoint answer for a successful refresh.
pub const REFRESHED: &str =
    r#"{"access_token": "new-access", "refresh_token": "new-refresh", "expires_in": 21600}"#;

/// `Authorization` header for `my-client:my-secret`.
pub const BASIC_AUTH: &str = "Basic bXktY2xpZW50Om15LXNlY3JldA==";
