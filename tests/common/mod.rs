#![allow(dead_code)]
use gobarber_schedule::http_config::HttpConfig;
use gobarber_schedule::ApiClient;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

/// One canned response, served to the first request whose path starts with `path`.
pub struct Route {
    pub method: &'static str,
    pub path: &'static str,
    pub status: u16,
    pub body: String,
}

impl Route {
    pub fn new(method: &'static str, path: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self {
            method,
            path,
            status,
            body: body.into(),
        }
    }
}

pub type Recorded = Arc<Mutex<Vec<String>>>;

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        401 => "Unauthorized",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn content_length(head: &str) -> usize {
    head.lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.trim().eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_header_end(&buf) {
            let head = String::from_utf8_lossy(&buf[..pos]).to_string();
            if buf.len() >= pos + 4 + content_length(&head) {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

/// Serves `routes` on a local port, one connection per route.
pub async fn serve(routes: Vec<Route>) -> (Url, Recorded) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
    let requests = recorded.clone();

    tokio::spawn(async move {
        let mut routes: Vec<Option<Route>> = routes.into_iter().map(Some).collect();
        for _ in 0..routes.len() {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => return,
            };
            let request = read_request(&mut socket).await;
            let request_line = request.lines().next().unwrap_or_default().to_string();
            requests.lock().unwrap().push(request.clone());

            let matched = routes.iter_mut().find(|slot| match slot {
                Some(route) => {
                    request_line.starts_with(&format!("{} {}", route.method, route.path))
                }
                None => false,
            });
            let (status, body) = match matched.and_then(Option::take) {
                Some(route) => (route.status, route.body),
                None => (500, "no route".to_string()),
            };

            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason(status),
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (Url::parse(&format!("http://{}/", addr)).unwrap(), recorded)
}

pub fn fast_http_config() -> HttpConfig {
    HttpConfig {
        connect_timeout: Duration::from_secs(2),
        timeout: Duration::from_secs(5),
        max_retries: 3,
        base_retry_delay: Duration::from_millis(5),
        max_retry_delay: Duration::from_millis(20),
        backoff_multiplier: 2.0,
    }
}

pub fn client(base: Url) -> ApiClient {
    ApiClient::with_base_url(base, &fast_http_config()).unwrap()
}
