//! One-shot HTTP/1.1 server written against a plain socket.
//!
//! wiremock always sends a `Content-Length` that matches the body. This server
//! lets a test declare one length and send fewer bytes before closing, the way
//! a truncating proxy does.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;

/// Accept a single connection, read the request, then answer with `status_line`
/// (e.g. `"200 OK"`), a `Content-Length` of `declared_length` and `body`, and close.
pub fn serve_once(status_line: &str, body: &str, declared_length: usize) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status_line}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {declared_length}\r\n\
         Connection: close\r\n\
         \r\n\
         {body}"
    );

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        read_request(&mut stream);
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
    });

    addr
}

/// Consume headers and body so closing the socket does not reset the connection.
fn read_request(stream: &mut TcpStream) {
    let mut received = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = stream.read(&mut buf).unwrap();
        if n == 0 {
            return;
        }
        received.extend_from_slice(&buf[..n]);

        let Some(header_end) = received.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&received[..header_end]).to_ascii_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if received.len() >= header_end + 4 + content_length {
            return;
        }
    }
}
