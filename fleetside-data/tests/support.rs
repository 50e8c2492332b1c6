//! Throwaway HTTP listeners bound to the loopback interface.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// How long a silent server holds its connection open.
const SILENT_HOLD: Duration = Duration::from_secs(10);

async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap_or_else(|err| panic!("failed to bind loopback listener: {err}"));
    let addr = listener
        .local_addr()
        .unwrap_or_else(|err| panic!("failed to read listener address: {err}"));
    (listener, format!("http://{addr}"))
}

async fn read_request_head(socket: &mut TcpStream) {
    let mut request = Vec::new();
    let mut buf = [0_u8; 1024];
    loop {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(read) => {
                request.extend_from_slice(buf.get(..read).unwrap_or_default());
                if request.windows(4).any(|window| window == b"\r\n\r\n") {
                    return;
                }
            }
        }
    }
}

/// Serve a single response, then close. Returns the server's base URL.
pub async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let (listener, url) = bind().await;
    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        read_request_head(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        if socket.write_all(response.as_bytes()).await.is_ok() {
            drop(socket.shutdown().await);
        }
    });
    url
}

/// Accept a connection and never answer it.
pub async fn serve_silently() -> String {
    let (listener, url) = bind().await;
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            read_request_head(&mut socket).await;
            tokio::time::sleep(SILENT_HOLD).await;
        }
    });
    url
}

/// A loopback URL nothing listens on.
pub async fn refusing_url() -> String {
    let (listener, url) = bind().await;
    drop(listener);
    url
}
