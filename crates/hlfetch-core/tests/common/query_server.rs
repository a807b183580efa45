//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed set of routes (path -> status + body) and records the
//! `User-Agent` of every request it sees. Unknown paths get 404.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: Vec<u8>,
    /// Sleep before answering (simulates a slow host).
    pub delay: Option<Duration>,
}

impl Route {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            delay: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: format!("status {}", status).into_bytes(),
            delay: None,
        }
    }

    pub fn slow(body: impl Into<Vec<u8>>, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::ok(body)
        }
    }
}

/// Handle to a running server. The server runs until the process exits.
pub struct QueryServer {
    base: String,
    user_agents: Arc<Mutex<Vec<String>>>,
}

impl QueryServer {
    /// URL for `path` (which must start with '/').
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// `User-Agent` values received so far, in arrival order.
    pub fn user_agents(&self) -> Vec<String> {
        self.user_agents.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread serving `routes`.
pub fn start(routes: Vec<(&str, Route)>) -> QueryServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .into_iter()
            .map(|(p, r)| (p.to_string(), r))
            .collect(),
    );
    let user_agents = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&user_agents);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let seen = Arc::clone(&seen);
            thread::spawn(move || handle(stream, &routes, &seen));
        }
    });
    QueryServer {
        base: format!("http://127.0.0.1:{}", port),
        user_agents,
    }
}

/// A URL on a port nothing listens on (connection refused).
pub fn unreachable_url(path: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}{}", port, path)
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &HashMap<String, Route>,
    seen: &Mutex<Vec<String>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (path, user_agent) = parse_request(request);
    if let Some(ua) = user_agent {
        seen.lock().unwrap().push(ua.to_string());
    }

    let route = routes.get(path).cloned().unwrap_or_else(|| Route::status(404));
    if let Some(d) = route.delay {
        thread::sleep(d);
    }
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nContent-Type: text/plain\r\nConnection: close\r\n\r\n",
        route.status,
        reason_phrase(route.status),
        route.body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(&route.body);
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// Returns (path, optional User-Agent).
fn parse_request(request: &str) -> (&str, Option<&str>) {
    let mut path = "";
    let mut user_agent = None;
    for (i, line) in request.lines().enumerate() {
        let line = line.trim();
        if i == 0 {
            path = line.split_whitespace().nth(1).unwrap_or("");
            continue;
        }
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("user-agent") {
                user_agent = Some(value.trim());
            }
        }
    }
    (path, user_agent)
}
