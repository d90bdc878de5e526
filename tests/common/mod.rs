//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use device_validator::config::ValidatorConfig;
use device_validator::http::HttpServer;
use device_validator::lifecycle::Shutdown;

/// Start a mock origin that returns a fixed response.
///
/// Every `x-dv-*` request header the origin receives is echoed back as an
/// `x-seen-x-dv-*` response header.
pub async fn start_origin(content_type: &'static str, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let head = read_head(&mut socket).await;
                        let echoed: String = head
                            .lines()
                            .filter_map(|line| {
                                let (name, value) = line.split_once(':')?;
                                let name = name.trim().to_ascii_lowercase();
                                name.starts_with("x-dv-")
                                    .then(|| format!("x-seen-{}: {}\r\n", name, value.trim()))
                            })
                            .collect();

                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n{}",
                            content_type,
                            body.len(),
                            echoed,
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn read_head(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Config pointing at `origin`, everything else default.
pub fn config_for(origin: SocketAddr) -> ValidatorConfig {
    let mut config = ValidatorConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.upstream.url = format!("http://{}", origin);
    config.timeouts.connect_secs = 1;
    config
}

/// Start the validator host on an ephemeral port.
pub async fn start_validator(config: ValidatorConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
