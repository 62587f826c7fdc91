// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

use kopilka::api::ApiGateway;
use kopilka::config::Config;
use kopilka::store::Session;
use tempfile::TempDir;

#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub body: String,
    pub bearer: Option<String>,
}

/// Single-threaded HTTP stub. Serves the canned responses in order, one
/// connection each, and records what the client sent.
pub struct MockBackend {
    addr: String,
    handle: thread::JoinHandle<()>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl MockBackend {
    pub fn start(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        let handle = thread::spawn(move || {
            for (status, body) in responses {
                let (stream, _) = listener.accept().unwrap();
                let mut reader = BufReader::new(stream);

                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let mut parts = line.split_whitespace();
                let method = parts.next().unwrap_or_default().to_string();
                let path = parts.next().unwrap_or_default().to_string();

                let mut content_length = 0usize;
                let mut bearer = None;
                loop {
                    let mut header = String::new();
                    reader.read_line(&mut header).unwrap();
                    let header = header.trim_end();
                    if header.is_empty() {
                        break;
                    }
                    if let Some((name, value)) = header.split_once(':') {
                        let value = value.trim();
                        match name.to_ascii_lowercase().as_str() {
                            "content-length" => content_length = value.parse().unwrap_or(0),
                            "authorization" => {
                                bearer = value
                                    .strip_prefix("Bearer ")
                                    .map(|t| t.to_string())
                                    .or_else(|| Some(value.to_string()));
                            }
                            _ => {}
                        }
                    }
                }

                let mut req_body = vec![0u8; content_length];
                reader.read_exact(&mut req_body).unwrap();
                recorded.lock().unwrap().push(Request {
                    method,
                    path,
                    body: String::from_utf8_lossy(&req_body).into_owned(),
                    bearer,
                });

                let mut stream = reader.into_inner();
                let reply = format!(
                    "HTTP/1.1 {} MOCK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                stream.write_all(reply.as_bytes()).unwrap();
            }
        });
        Self {
            addr,
            handle,
            requests,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.addr
    }

    /// Wait for every canned response to be consumed, then hand back the
    /// recorded requests in arrival order.
    pub fn finish(self) -> Vec<Request> {
        self.handle.join().unwrap();
        Arc::try_unwrap(self.requests)
            .unwrap()
            .into_inner()
            .unwrap()
    }
}

/// Gateway pointing all three origins at the same stub.
pub fn gateway(base: &str) -> ApiGateway {
    ApiGateway::new(Config {
        auth_url: base.to_string(),
        core_url: base.to_string(),
        analytics_url: base.to_string(),
    })
    .unwrap()
}

/// Session backed by a throwaway token file. Keep the TempDir alive for the
/// duration of the test.
pub fn session_with_token(token: &str) -> (TempDir, Session) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("token");
    std::fs::write(&path, token).unwrap();
    let session = Session::at(path).unwrap();
    (dir, session)
}

pub fn anonymous_session() -> (TempDir, Session) {
    let dir = TempDir::new().unwrap();
    let session = Session::at(dir.path().join("token")).unwrap();
    (dir, session)
}

// ---- wire fixtures ----

pub fn account_json(id: &str, name: &str, balance: f64, is_default: bool) -> String {
    format!(
        r#"{{"id":"{}","name":"{}","balance":{},"is_default":{},"created_at":"2025-01-15T10:00:00Z"}}"#,
        id, name, balance, is_default
    )
}

pub fn category_json(id: &str, name: &str, r#type: &str, is_system: bool) -> String {
    format!(
        r##"{{"id":"{}","name":"{}","type":"{}","icon":"tag","color":"#999999","is_system":{},"created_at":"2025-01-15T10:00:00Z"}}"##,
        id, name, r#type, is_system
    )
}

pub fn transaction_json(id: &str, r#type: &str, amount: f64, date: &str) -> String {
    format!(
        r#"{{"id":"{}","account_id":"a1","category_id":"c1","type":"{}","amount":{},"date":"{}","created_at":"2025-01-15T10:00:00Z"}}"#,
        id, r#type, amount, date
    )
}

pub fn overview_json(period: &str, income: f64, expense: f64) -> String {
    format!(
        r#"{{"period":"{}","total_income":{},"total_expense":{},"net_income":{},"savings_rate":25.0}}"#,
        period,
        income,
        expense,
        income - expense
    )
}

pub fn error_json(message: &str) -> String {
    format!(r#"{{"error":"{}"}}"#, message)
}
