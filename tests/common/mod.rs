#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/*-------------------------------------------------------------------------------------------------
  Stub Fox API Server
-------------------------------------------------------------------------------------------------*/

pub const PROD_ENVELOPE: &str = r#"{"res":{"ipInfo":{"id":"prod","env":"prod","groupArr":["g1"],"cidrArr":["10.0.0.0/8"],"created":"2023-01-01T00:00:00Z","lastModified":"2023-01-02T00:00:00Z"}}}"#;

pub const ALL_ENVELOPE: &str = r#"{"res":{"ipInfoArr":[{"id":"prod","env":"prod","groupArr":["g1"],"cidrArr":["10.0.0.0/8"],"created":"2023-01-01T00:00:00Z","lastModified":"2023-01-02T00:00:00Z"},{"id":"dev","env":"dev","groupArr":["g1","g2"],"cidrArr":["1.2.3.0/24","192.168.0.0/16"],"created":"2023-02-01T00:00:00Z","lastModified":"2023-02-02T12:30:00Z"}]}}"#;

/// One request as received by the stub server.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// A loopback HTTP/1.1 server answering each request with `handler`'s status and JSON body.
pub struct StubServer {
    address: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> (u16, String) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let Some(request) = read_request(&stream) else {
                    continue;
                };
                let (status, body) = handler(&request);
                recorded.lock().unwrap().push(request);

                let response = format!(
                    "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self { address, requests }
    }

    /// Serve fixed routes keyed by `"METHOD /path"`; anything else is a 404.
    pub fn routes(routes: &[(&str, u16, &str)]) -> Self {
        let routes: Vec<(String, u16, String)> = routes
            .iter()
            .map(|(route, status, body)| (route.to_string(), *status, body.to_string()))
            .collect();

        Self::start(move |request| {
            let route = format!("{} {}", request.method, request.path);
            routes
                .iter()
                .find(|(candidate, _, _)| *candidate == route)
                .map(|(_, status, body)| (*status, body.clone()))
                .unwrap_or((404, r#"{"message":"not found"}"#.to_string()))
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn read_request(stream: &TcpStream) -> Option<RecordedRequest> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).ok()?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        let (name, value) = line.split_once(':')?;
        headers.push((name.trim().to_string(), value.trim().to_string()));
    }

    let content_length = headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).ok()?;

    Some(RecordedRequest {
        method,
        path,
        headers,
        body,
    })
}
