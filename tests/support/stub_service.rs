//! Scripted local HTTP stub standing in for the prediction service.

use std::{
    io::{Read, Write},
    net::TcpListener,
    sync::{Arc, Mutex},
    thread,
    time::Duration,
};

/// One scripted reply, served to one incoming connection.
pub struct StubResponse {
    pub status: u16,
    pub body: String,
    pub delay: Option<Duration>,
}

impl StubResponse {
    pub fn ok_json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            delay: None,
        }
    }

    pub fn delayed_json(delay: Duration, body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            delay: Some(delay),
        }
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: None,
        }
    }
}

/// Serves each scripted response to one connection, capturing request bodies.
pub struct StubService {
    base_url: String,
    request_bodies: Arc<Mutex<Vec<String>>>,
}

impl StubService {
    pub fn spawn(responses: Vec<StubResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let addr = listener.local_addr().expect("stub listener addr");
        let request_bodies = Arc::new(Mutex::new(Vec::new()));
        let captured = request_bodies.clone();
        thread::spawn(move || {
            for response in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    break;
                };
                let body = read_request_body(&mut stream);
                captured
                    .lock()
                    .unwrap_or_else(|err| err.into_inner())
                    .push(body);
                if let Some(delay) = response.delay {
                    thread::sleep(delay);
                }
                let reason = if response.status == 200 { "OK" } else { "Error" };
                let payload = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    response.status,
                    reason,
                    response.body.len(),
                    response.body
                );
                let _ = stream.write_all(payload.as_bytes());
            }
        });
        Self {
            base_url: format!("http://{addr}"),
            request_bodies,
        }
    }

    /// Spawn and immediately close a listener, yielding an address that
    /// refuses connections.
    pub fn unreachable_base_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind throwaway listener");
        let addr = listener.local_addr().expect("throwaway listener addr");
        drop(listener);
        format!("http://{addr}")
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn request_bodies(&self) -> Vec<String> {
        self.request_bodies
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .clone()
    }
}

fn read_request_body(stream: &mut std::net::TcpStream) -> String {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut raw = Vec::new();
    let mut buf = [0u8; 1024];
    let header_end = loop {
        match stream.read(&mut buf) {
            Ok(0) => break None,
            Ok(count) => {
                raw.extend_from_slice(&buf[..count]);
                if let Some(pos) = find_header_end(&raw) {
                    break Some(pos);
                }
            }
            Err(_) => break None,
        }
    };
    let Some(header_end) = header_end else {
        return String::new();
    };
    let headers = String::from_utf8_lossy(&raw[..header_end]).into_owned();
    let content_length = headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("Content-Length")
                .then(|| value.trim().parse::<usize>().ok())?
        })
        .unwrap_or(0);
    let body_start = header_end + 4;
    while raw.len() < body_start + content_length {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(count) => raw.extend_from_slice(&buf[..count]),
        }
    }
    String::from_utf8_lossy(&raw[body_start..raw.len().min(body_start + content_length)])
        .into_owned()
}

fn find_header_end(raw: &[u8]) -> Option<usize> {
    raw.windows(4).position(|window| window == b"\r\n\r\n")
}
