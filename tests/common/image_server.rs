//! Minimal HTTP/1.1 server for exercising the fetch pipeline in tests.
//!
//! Serves one canned response to every GET. Status line, content type and
//! content disposition are configurable per instance.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone)]
pub struct ImageServerOptions {
    pub status_line: &'static str,
    pub content_type: &'static str,
    pub content_disposition: Option<&'static str>,
}

impl Default for ImageServerOptions {
    fn default() -> Self {
        Self {
            status_line: "200 OK",
            content_type: "image/png",
            content_disposition: None,
        }
    }
}

/// Starts a server in a background thread serving `body`. Returns the base
/// URL (e.g. "http://127.0.0.1:12345/"). The server runs until the process
/// exits.
pub fn start(body: Vec<u8>) -> String {
    start_with_options(body, ImageServerOptions::default())
}

/// Like `start` but allows customizing the canned response.
pub fn start_with_options(body: Vec<u8>, opts: ImageServerOptions) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let opts = opts.clone();
            thread::spawn(move || handle(stream, &body, &opts));
        }
    });
    format!("http://127.0.0.1:{}/", port)
}

fn handle(mut stream: std::net::TcpStream, body: &[u8], opts: &ImageServerOptions) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));

    let mut buf = [0u8; 8192];
    match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(_) => {}
    }

    let disposition = opts
        .content_disposition
        .map(|value| format!("Content-Disposition: {}\r\n", value))
        .unwrap_or_default();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        opts.status_line,
        opts.content_type,
        body.len(),
        disposition
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body);
}
