use services::{ContentSource, ContentStore, LoadError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tracker_core::model::{DetailBlock, Mode, Priority};

const LLD_DOC: &str = r#"[{"title":"OOP","subtitle":"Objects","groups":[{"name":"Pillars","topics":["Abstraction",{"title":"Polymorphism","priority":"high","note":"Runtime vs compile time"}]}]}]"#;
const HLD_DOC: &str = r#"[{"title":"Scaling","groups":[{"name":"Basics","topics":["Load Balancing"]}]}]"#;
const CODE_DETAILS: &str =
    r#"{"Polymorphism":{"blocks":[{"type":"code","language":"java","content":"class A {}"}]}}"#;

fn write_documents(dir: &std::path::Path, details: &str) {
    std::fs::write(dir.join("lld.json"), LLD_DOC).unwrap();
    std::fs::write(dir.join("hld.json"), HLD_DOC).unwrap();
    std::fs::write(dir.join("details.json"), details).unwrap();
}

/// Serve `routes` over plain HTTP/1.1 and return the base URL `/kb`.
/// Unknown paths answer 404.
async fn serve(routes: Vec<(&'static str, &'static str)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let routes = routes.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let request = String::from_utf8_lossy(&request);
                let path = request.split_whitespace().nth(1).unwrap_or("/");
                let (status, body) = match routes.iter().find(|(route, _)| *route == path) {
                    Some((_, body)) => ("200 OK", *body),
                    None => ("404 Not Found", ""),
                };
                let response = format!(
                    "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });
    format!("http://{addr}/kb")
}

#[tokio::test]
async fn loads_all_documents_from_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    write_documents(dir.path(), CODE_DETAILS);

    let source = ContentSource::parse(dir.path().to_str().unwrap()).unwrap();
    let store = ContentStore::load(&source).await.expect("load");

    let lld = store.catalog(Mode::Lld);
    assert_eq!(lld.len(), 1);
    let topics: Vec<_> = lld.topics().collect();
    assert_eq!(topics[1].priority(), Priority::High);
    assert_eq!(store.catalog(Mode::Hld).topics().count(), 1);
    assert!(matches!(
        store.detail_blocks("Polymorphism"),
        [DetailBlock::Code { .. }]
    ));
}

#[tokio::test]
async fn missing_document_fails_the_whole_load() {
    let dir = tempfile::tempdir().unwrap();
    write_documents(dir.path(), "{}");
    std::fs::remove_file(dir.path().join("details.json")).unwrap();

    let source = ContentSource::parse(dir.path().to_str().unwrap()).unwrap();
    let err = ContentStore::load(&source).await.unwrap_err();
    assert!(matches!(err, LoadError::Read { document: "details.json", .. }));
}

#[tokio::test]
async fn malformed_document_fails_the_whole_load() {
    let dir = tempfile::tempdir().unwrap();
    write_documents(dir.path(), "not json");

    let source = ContentSource::parse(dir.path().to_str().unwrap()).unwrap();
    let err = ContentStore::load(&source).await.unwrap_err();
    assert_eq!(err.document(), Some("details.json"));
    assert!(err.to_string().contains("malformed"));
}

#[tokio::test]
async fn loads_all_documents_from_a_base_url() {
    let base = serve(vec![
        ("/kb/lld.json", LLD_DOC),
        ("/kb/hld.json", HLD_DOC),
        ("/kb/details.json", CODE_DETAILS),
    ])
    .await;

    let source = ContentSource::parse(&base).unwrap();
    assert!(matches!(source, ContentSource::Remote(_)));
    let store = ContentStore::load(&source).await.expect("load");

    assert_eq!(store.catalog(Mode::Lld).topics().count(), 2);
    assert_eq!(store.catalog(Mode::Hld).len(), 1);
    assert!(matches!(
        store.detail_blocks("Polymorphism"),
        [DetailBlock::Code { .. }]
    ));
}

#[tokio::test]
async fn http_error_status_names_the_document() {
    let base = serve(vec![("/kb/lld.json", LLD_DOC), ("/kb/hld.json", HLD_DOC)]).await;

    let source = ContentSource::parse(&base).unwrap();
    let err = ContentStore::load(&source).await.unwrap_err();
    match err {
        LoadError::HttpStatus { document, status } => {
            assert_eq!(document, "details.json");
            assert_eq!(status.as_u16(), 404);
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_is_a_fetch_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = ContentSource::parse(&format!("http://{addr}/kb")).unwrap();
    let err = ContentStore::load(&source).await.unwrap_err();
    assert!(matches!(err, LoadError::Fetch { .. }), "{err:?}");
}
