//! Scripted localhost HTTP server for exercising the client without a real
//! upstream.
//!
//! Token-exchange POSTs are always answered (configurably); every other
//! request consumes the next scripted reply in order.

use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

/// One scripted reply for a non-token request.
#[derive(Clone)]
pub(crate) enum Reply {
    /// Respond with this status and JSON body.
    Json(u16, String),
    /// Close the connection without responding (transport error).
    Hangup,
}

pub(crate) struct ScriptedServer {
    pub base_url: String,
    /// Request lines (e.g. "GET /v2/... HTTP/1.1") of every non-token call.
    pub seen: Arc<Mutex<Vec<String>>>,
    /// Number of token-exchange calls served.
    pub token_calls: Arc<Mutex<u32>>,
}

/// Spawn a server whose token endpoint always succeeds.
pub(crate) async fn spawn(script: Vec<Reply>) -> ScriptedServer {
    spawn_with_token_reply(script, None).await
}

/// Spawn a server; `token_reply` overrides the default successful token
/// exchange when set.
pub(crate) async fn spawn_with_token_reply(
    script: Vec<Reply>,
    token_reply: Option<Reply>,
) -> ScriptedServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    let seen = Arc::new(Mutex::new(Vec::new()));
    let token_calls = Arc::new(Mutex::new(0u32));

    let seen_task = seen.clone();
    let token_task = token_calls.clone();
    tokio::spawn(async move {
        let mut script = script.into_iter();
        loop {
            let Ok((mut sock, _)) = listener.accept().await else {
                break;
            };
            let Some(request) = read_request(&mut sock).await else {
                continue;
            };
            let first_line = request.lines().next().unwrap_or_default().to_string();

            if first_line.starts_with("POST") && first_line.contains("/v1/security/oauth2/token")
            {
                *token_task.lock().await += 1;
                match &token_reply {
                    None => {
                        respond(
                            &mut sock,
                            200,
                            r#"{"access_token":"scripted-token","expires_in":900}"#,
                        )
                        .await
                    }
                    Some(Reply::Json(status, body)) => respond(&mut sock, *status, body).await,
                    Some(Reply::Hangup) => drop(sock),
                }
                continue;
            }

            seen_task.lock().await.push(first_line);
            match script.next() {
                Some(Reply::Json(status, body)) => respond(&mut sock, status, &body).await,
                Some(Reply::Hangup) | None => drop(sock),
            }
        }
    });

    ScriptedServer {
        base_url: format!("http://{}", addr),
        seen,
        token_calls,
    }
}

/// Read one full HTTP request (headers plus content-length body).
async fn read_request(sock: &mut TcpStream) -> Option<String> {
    let mut data = Vec::new();
    let mut buf = [0u8; 2048];
    loop {
        let n = sock.read(&mut buf).await.ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(head_end) = find_header_end(&data) {
            let head = String::from_utf8_lossy(&data[..head_end]).to_string();
            let content_length = head
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            if data.len() >= head_end + 4 + content_length {
                return Some(String::from_utf8_lossy(&data).to_string());
            }
        }
    }
    if data.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(&data).to_string())
    }
}

fn find_header_end(data: &[u8]) -> Option<usize> {
    data.windows(4).position(|w| w == b"\r\n\r\n")
}

async fn respond(sock: &mut TcpStream, status: u16, body: &str) {
    let resp = format!(
        "HTTP/1.1 {} Scripted\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = sock.write_all(resp.as_bytes()).await;
    let _ = sock.shutdown().await;
}
