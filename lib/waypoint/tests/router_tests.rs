//! Integration tests for `Router` against a wiremock server.

use std::borrow::Cow;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use assert2::{check, let_assert};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use waypoint::{
    Endpoint, Error, FilePart, Headers, HyperClient, Method, MimeType, Parameters, Router,
    RouterConfig, Task, Upload, UploadProgress,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct User {
    id: u64,
    name: String,
}

/// Endpoint pointing at the mock server.
struct Call {
    base: String,
    path: &'static str,
    method: Method,
    task: Task,
    headers: Option<Headers>,
}

impl Call {
    fn new(server: &MockServer, method: Method, path: &'static str, task: Task) -> Self {
        Self {
            base: server.uri(),
            path,
            method,
            task,
            headers: None,
        }
    }
}

impl Endpoint for Call {
    fn base_url(&self) -> Cow<'_, str> {
        self.base.as_str().into()
    }

    fn path(&self) -> Cow<'_, str> {
        self.path.into()
    }

    fn method(&self) -> Method {
        self.method
    }

    fn task(&self) -> Task {
        self.task.clone()
    }

    fn headers(&self) -> Option<Headers> {
        self.headers.clone()
    }
}

async fn last_request(server: &MockServer) -> wiremock::Request {
    let requests = server.received_requests().await.unwrap_or_default();
    requests.into_iter().last().expect("one request received")
}

#[tokio::test]
async fn get_query_is_sorted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("a", "1"))
        .and(query_param("b", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let router = Router::new(HyperClient::new());
    let call = Call::new(
        &server,
        Method::Get,
        "search",
        Task::query(Parameters::new().with("b", "2").with("a", "1")),
    );

    let_assert!(Ok(response) = router.execute(&call).await);
    check!(response.status() == 200);

    let received = last_request(&server).await;
    check!(received.url.query() == Some("a=1&b=2"));
    check!(received.body.is_empty());
}

#[tokio::test]
async fn post_json_body() {
    let server = MockServer::start().await;
    let created = User {
        id: 42,
        name: "Bob".to_string(),
    };
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({"name": "Bob"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(&created))
        .mount(&server)
        .await;

    let router = Router::new(HyperClient::new());
    let call = Call::new(
        &server,
        Method::Post,
        "users",
        Task::json(Parameters::new().with("name", "Bob")),
    );

    let_assert!(Ok(user) = router.fetch::<User, _>(&call).await);
    check!(user == created);
}

#[tokio::test]
async fn post_form_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let router = Router::new(HyperClient::new());
    let call = Call::new(
        &server,
        Method::Post,
        "login",
        Task::query(Parameters::new().with("user", "a b").with("pass", "x&y")),
    );

    let_assert!(Ok(response) = router.execute(&call).await);
    check!(response.status() == 204);

    let received = last_request(&server).await;
    check!(received.url.query().is_none());
    check!(received.body == b"pass=x%26y&user=a%20b");
    let_assert!(Some(content_type) = received.headers.get("content-type"));
    check!(content_type.as_bytes() == b"application/x-www-form-urlencoded; charset=utf-8");
}

#[tokio::test]
async fn query_and_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .and(query_param("q", "1"))
        .and(body_json(serde_json::json!({"x": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let router = Router::new(HyperClient::new());
    let call = Call::new(
        &server,
        Method::Post,
        "items",
        Task::query_and_json(Parameters::new().with("q", "1"), Parameters::new().with("x", 1)),
    );

    let_assert!(Ok(response) = router.execute(&call).await);
    check!(response.is_success());
}

#[tokio::test]
async fn multipart_upload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(header("Content-Type", "multipart/form-data; boundary=B"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let router = Router::new(HyperClient::new());
    let file = FilePart::new(Bytes::from_static(b"JPEG"), "photo", "x", "jpg", MimeType::Jpeg);
    let call = Call::new(
        &server,
        Method::Post,
        "upload",
        Task::Upload(Upload::flat("B", Parameters::new().with("a", 1), file)),
    );

    let_assert!(Ok(response) = router.execute(&call).await);
    check!(response.status() == 200);

    let expected = concat!(
        "--B\r\n",
        "Content-Disposition: form-data; name=\"a\"\r\n\r\n",
        "1\r\n",
        "--B\r\n",
        "Content-Disposition: form-data; name=\"photo\"; filename=\"x.jpg\"\r\n",
        "Content-Type: image/jpeg\r\n\r\n",
        "JPEG\r\n",
        "--B--\r\n",
    );
    let received = last_request(&server).await;
    check!(received.body == expected.as_bytes());
}

#[tokio::test]
async fn endpoint_content_type_is_sent_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/things"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let router = Router::new(HyperClient::new());
    let mut call = Call::new(
        &server,
        Method::Post,
        "things",
        Task::json(Parameters::new().with("x", 1)),
    );
    call.headers = Some(
        [("content-type".to_string(), "application/vnd.api+json".to_string())]
            .into_iter()
            .collect(),
    );

    let_assert!(Ok(response) = router.execute(&call).await);
    check!(response.status() == 201);

    let received = last_request(&server).await;
    let values: Vec<_> = received
        .headers
        .get_all("content-type")
        .iter()
        .map(|value| value.to_str().unwrap_or_default().to_string())
        .collect();
    check!(values == ["application/vnd.api+json"]);
    check!(received.body == br#"{"x":1}"#);
}

#[tokio::test]
async fn base_url_query_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/items"))
        .and(query_param("key", "1"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let router = Router::new(HyperClient::new());
    let mut call = Call::new(
        &server,
        Method::Get,
        "items",
        Task::query(Parameters::new().with("page", 2)),
    );
    call.base = format!("{}/api?key=1", server.uri());

    let_assert!(Ok(response) = router.execute(&call).await);
    check!(response.is_success());

    let received = last_request(&server).await;
    check!(received.url.query() == Some("key=1&page=2"));
}

#[tokio::test]
async fn upload_reports_progress() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let seen = Arc::new(Mutex::new(Vec::<UploadProgress>::new()));
    let sink = Arc::clone(&seen);
    let file = FilePart::new(Bytes::from(vec![b'z'; 100_000]), "video", "clip", "mp4", MimeType::Mp4);
    let upload = Upload::indexed("B", vec![Parameters::new().with("id", 1)], vec![file])
        .on_progress(move |progress| sink.lock().expect("lock").push(progress));

    let router = Router::new(HyperClient::new());
    let call = Call::new(&server, Method::Post, "upload", Task::Upload(upload));

    let_assert!(Ok(response) = router.execute(&call).await);
    check!(response.is_success());

    let received = last_request(&server).await;
    let expected = u64::try_from(received.body.len()).expect("fits");

    let seen = seen.lock().expect("lock");
    check!(seen.len() > 1);
    let_assert!(Some(last) = seen.last());
    check!(last.total_bytes_sent == expected);
    check!(seen.iter().all(|p| p.total_bytes_expected == expected));
    check!(seen.iter().map(|p| p.bytes_sent).sum::<u64>() == expected);
    check!(seen.windows(2).all(|pair| pair[0].total_bytes_sent < pair[1].total_bytes_sent));
}

#[tokio::test]
async fn default_and_endpoint_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("X-Client", "waypoint"))
        .and(header("Authorization", "Bearer t"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let config = RouterConfig::builder()
        .default_header("X-Client", "waypoint")
        .default_header("Authorization", "none")
        .build();
    let router = Router::with_config(HyperClient::new(), config);

    let mut call = Call::new(&server, Method::Get, "me", Task::Plain);
    call.headers = Some(
        [("Authorization".to_string(), "Bearer t".to_string())]
            .into_iter()
            .collect(),
    );

    let_assert!(Ok(response) = router.execute(&call).await);
    check!(response.is_success());
}

#[tokio::test]
async fn http_error_status_is_a_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let router = Router::new(HyperClient::new());
    let call = Call::new(&server, Method::Get, "missing", Task::Plain);

    let_assert!(Ok(response) = router.execute(&call).await);
    check!(response.is_client_error());
    check!(&response.body()[..] == b"Not Found");
}

#[tokio::test]
async fn fetch_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let router = Router::new(HyperClient::new());
    let call = Call::new(&server, Method::Delete, "users/1", Task::Plain);

    let_assert!(Err(Error::EmptyResponseBody) = router.fetch::<User, _>(&call).await);
}

#[tokio::test]
async fn fetch_reports_decode_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":"x","name":"A"}"#))
        .mount(&server)
        .await;

    let router = Router::new(HyperClient::new());
    let call = Call::new(&server, Method::Get, "users/1", Task::Plain);

    let_assert!(Err(Error::JsonDeserialization { path, .. }) = router.fetch::<User, _>(&call).await);
    check!(path == "id");
}

#[tokio::test]
async fn bad_url_is_reported() {
    let server = MockServer::start().await;
    let router = Router::new(HyperClient::new());
    let mut call = Call::new(&server, Method::Get, "x", Task::Plain);
    call.base = "no scheme here".to_string();

    let_assert!(Err(Error::BadUrl(_)) = router.execute(&call).await);
    check!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn request_calls_completion_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .mount(&server)
        .await;

    let router = Router::new(HyperClient::new());
    let call = Call::new(&server, Method::Get, "ping", Task::Plain);
    let (tx, rx) = tokio::sync::oneshot::channel();

    router.request(&call, move |result| {
        let _ = tx.send(result);
    });

    let_assert!(Ok(Ok(response)) = rx.await);
    check!(&response.body()[..] == b"pong");
}

#[tokio::test]
async fn cancel_right_after_dispatch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let router = Router::new(HyperClient::new());
    let call = Call::new(&server, Method::Get, "slow", Task::Plain);
    let completed = Arc::new(AtomicBool::new(false));

    let flag = Arc::clone(&completed);
    router.request(&call, move |_| flag.store(true, Ordering::SeqCst));
    router.cancel();

    tokio::time::sleep(Duration::from_millis(400)).await;
    check!(!completed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn cancel_targets_latest_request_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .set_delay(Duration::from_millis(100)),
        )
        .mount(&server)
        .await;

    let router = Router::new(HyperClient::new());
    let call = Call::new(&server, Method::Get, "slow", Task::Plain);

    let (first_tx, first_rx) = tokio::sync::oneshot::channel();
    router.request(&call, move |result| {
        let _ = first_tx.send(result);
    });

    let second = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&second);
    router.request(&call, move |_| flag.store(true, Ordering::SeqCst));
    router.cancel();

    let_assert!(Ok(Ok(response)) = first_rx.await);
    check!(response.is_success());

    tokio::time::sleep(Duration::from_millis(200)).await;
    check!(!second.load(Ordering::SeqCst));
}
