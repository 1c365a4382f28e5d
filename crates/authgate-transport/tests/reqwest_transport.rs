//! Integration tests for the reqwest transport.
//!
//! These spin up a real axum server on a random port and check that
//! requests, statuses, headers, and bodies survive the round trip, and
//! that "no response" conditions come back as `TransportError`s.

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use std::time::Duration;

    use authgate_transport::{
        HttpRequest, HttpTransport, ReqwestTransport, TransportError,
    };
    use axum::body::Bytes;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::Router;

    /// Serves `app` on 127.0.0.1:0 and returns the base URL.
    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = listener.local_addr().expect("should have local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    fn transport() -> ReqwestTransport {
        ReqwestTransport::new(Duration::from_secs(5)).expect("client should build")
    }

    #[tokio::test]
    async fn test_non_2xx_status_is_a_response_not_an_error() {
        let app = Router::new().route("/users", post(|| async { StatusCode::CONFLICT }));
        let base = serve(app).await;

        let res = transport()
            .send(HttpRequest::post_json(format!("{base}/users"), b"{}".to_vec()))
            .await
            .expect("a 409 is still a response");

        assert_eq!(res.status, 409);
    }

    #[tokio::test]
    async fn test_body_is_sent_and_received() {
        let app = Router::new().route(
            "/echo",
            post(|body: Bytes| async move { (StatusCode::CREATED, body) }),
        );
        let base = serve(app).await;
        let payload = serde_json::to_vec(&serde_json::json!({"id": "alice"})).unwrap();

        let res = transport()
            .send(HttpRequest::post_json(format!("{base}/echo"), payload.clone()))
            .await
            .unwrap();

        assert_eq!(res.status, 201);
        assert_eq!(res.body, payload);
    }

    #[tokio::test]
    async fn test_headers_reach_the_server() {
        let app = Router::new().route(
            "/user",
            get(|headers: HeaderMap| async move {
                headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string()
            }),
        );
        let base = serve(app).await;

        let res = transport()
            .send(HttpRequest::get(format!("{base}/user")).bearer("T"))
            .await
            .unwrap();

        assert_eq!(res.status, 200);
        assert_eq!(res.body, b"Bearer T");
        assert!(res.header("content-type").is_some());
    }

    #[tokio::test]
    async fn test_refused_connection_is_a_transport_error() {
        // Grab a free port, then close it so nothing is listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = transport()
            .send(HttpRequest::get(format!("http://{addr}/user")))
            .await
            .expect_err("nothing is listening");

        assert!(
            matches!(err, TransportError::Connect(_) | TransportError::Request(_)),
            "expected a connection-level error, got {err:?}"
        );
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let app = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );
        let base = serve(app).await;
        let transport = ReqwestTransport::new(Duration::from_millis(100)).unwrap();

        let err = transport
            .send(HttpRequest::get(format!("{base}/slow")))
            .await
            .expect_err("should time out");

        assert!(matches!(err, TransportError::Timeout(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_unparsable_url_is_invalid_request() {
        let err = transport()
            .send(HttpRequest::get("not a url"))
            .await
            .expect_err("url is garbage");

        assert!(matches!(err, TransportError::InvalidRequest(_)), "got {err:?}");
    }
}
