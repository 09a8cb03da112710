use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use erp_panel::ApiError;
use erp_panel::notifications::{HttpNotificationBackend, NotificationBackend, NotificationKind};

/// Answer a single request with a canned response. The task yields the
/// raw request head.
async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );

    let task = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 8192];
        let mut read = 0;
        loop {
            let n = socket.read(&mut buf[read..]).await.unwrap();
            read += n;
            if n == 0 || buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&buf[..read]).into_owned()
    });
    (format!("http://{addr}"), task)
}

fn backend(base: &str) -> HttpNotificationBackend {
    HttpNotificationBackend::new(base, Some("segredo".to_string())).unwrap()
}

// ============================================================================
// Requests
// ============================================================================

#[tokio::test]
async fn test_unread_count_request() {
    let (base, server) = serve_once("200 OK", r#"{"count": 4}"#).await;

    assert_eq!(backend(&base).unread_count().await.unwrap(), 4);

    let request = server.await.unwrap().to_lowercase();
    assert!(request.starts_with("get /api/notifications/unread-count http/1.1"));
    assert!(request.contains("authorization: bearer segredo"));
}

#[tokio::test]
async fn test_list_request_and_parsing() {
    let body = r#"[
        {"id": 1, "title": "Pedido", "message": "Atrasado", "type": "error",
         "read": false, "link": "/pedidos/1", "created_at": "2024-03-01T10:00:00Z"},
        {"id": 2, "title": "Aviso", "type": "announcement", "created_at": "2024-03-01"}
    ]"#;
    let (base, server) = serve_once("200 OK", body).await;

    let items = backend(&base).list(10).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].kind, NotificationKind::Error);
    assert_eq!(items[0].target(), Some("/pedidos/1"));
    assert_eq!(items[1].kind, NotificationKind::Info);
    assert!(!items[1].read);
    assert_eq!(items[1].target(), None);

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /api/notifications/?limit=10 HTTP/1.1"));
}

#[tokio::test]
async fn test_mark_read_posts() {
    let (base, server) = serve_once("204 No Content", "").await;

    backend(&base).mark_read(7).await.unwrap();

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /api/notifications/7/read HTTP/1.1"));
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_error_status_keeps_body() {
    let (base, _server) = serve_once("500 Internal Server Error", "falha interna").await;

    let err = backend(&base).mark_all_read().await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    assert!(matches!(err, ApiError::Http { message, .. } if message == "falha interna"));
}

#[tokio::test]
async fn test_unparseable_body() {
    let (base, _server) = serve_once("200 OK", "<html>login</html>").await;

    let err = backend(&base).unread_count().await.unwrap_err();
    assert!(matches!(err, ApiError::Parse { body: Some(body), .. } if body == "<html>login</html>"));
}

#[tokio::test]
async fn test_no_token_never_connects() {
    let backend = HttpNotificationBackend::new("http://127.0.0.1:9", None).unwrap();
    assert!(!backend.is_authenticated());
    assert!(matches!(backend.unread_count().await, Err(ApiError::Unauthenticated)));
}
