//! Minimal loopback HTTP server imitating the catalog API
//!
//! Handles one request per connection on a background thread:
//! - `GET /api/character/?name=&page=&status=` paged listing, 404 when empty
//! - `GET /api/character/1,2` batch (array), `GET /api/character/1` (object)

#![allow(dead_code)]

use super::fixtures::{character_json, find, matching, PAGE_SIZE};
use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

pub struct CatalogServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl CatalogServer {
    pub fn start() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let _ = handle(stream, &seen);
            }
        });

        Ok(Self { addr, requests })
    }

    /// Base URL to pass as `--api-url`
    pub fn url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Request targets received so far, e.g. `/api/character/?name=rick&page=1`
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

/// A base URL nothing listens on
pub fn unreachable_url() -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}/api"))
}

fn handle(stream: TcpStream, seen: &Mutex<Vec<String>>) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    // Drain headers; requests carry no body
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 || header == "\r\n" {
            break;
        }
    }

    let target = request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or("/")
        .to_string();
    if let Ok(mut requests) = seen.lock() {
        requests.push(target.clone());
    }

    let (status, body) = route(&target);
    let reason = if status == 200 { "OK" } else { "Not Found" };
    let mut stream = stream;
    write!(
        stream,
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )?;
    stream.flush()
}

fn route(target: &str) -> (u16, String) {
    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    let Some(rest) = path.strip_prefix("/api/character") else {
        return not_found("There is nothing here");
    };

    match rest.trim_matches('/') {
        "" => listing(query),
        ids if ids.contains(',') => {
            let found: Vec<_> = ids
                .split(',')
                .filter_map(|id| id.parse().ok())
                .filter_map(find)
                .map(character_json)
                .collect();
            (200, json!(found).to_string())
        }
        id => match id.parse().ok().and_then(find) {
            Some(character) => (200, character_json(character).to_string()),
            None => not_found("Character not found"),
        },
    }
}

fn listing(query: &str) -> (u16, String) {
    let mut name = String::new();
    let mut page = 1usize;
    let mut status = None;
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "name" => name = value.into_owned(),
            "page" => page = value.parse().unwrap_or(1),
            "status" => status = Some(value.into_owned()),
            _ => {}
        }
    }

    let all = matching(&name, status.as_deref());
    let start = (page.max(1) - 1) * PAGE_SIZE;
    if start >= all.len() {
        return not_found("There is nothing here");
    }

    let results: Vec<_> = all
        .iter()
        .skip(start)
        .take(PAGE_SIZE)
        .map(|c| character_json(c))
        .collect();
    let next = (start + PAGE_SIZE < all.len())
        .then(|| format!("http://catalog.test/api/character/?page={}", page + 1));

    let body = json!({
        "info": { "count": all.len(), "next": next, "prev": null },
        "results": results,
    });
    (200, body.to_string())
}

fn not_found(message: &str) -> (u16, String) {
    (404, json!({ "error": message }).to_string())
}
