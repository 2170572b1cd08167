//! Integration tests for the HTTP timeline client.
//!
//! These tests run the client and the full timeline search against a
//! local mock of the REST API.

use serde_json::{json, Value};
use timeline_search::commands::{search_all, search_home, search_user};
use timeline_search::{
    ErrorKind, HttpTimelineClient, PageRequest, SearchError, Timeline, TimelineClient,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HOME_PATH: &str = "/1/statuses/home_timeline.json";
const USER_PATH: &str = "/1/statuses/user_timeline.json";

fn status(screen_name: &str, text: &str) -> Value {
    json!({
        "text": text,
        "created_at": "Wed Aug 27 13:08:45 +0000 2008",
        "user": { "screen_name": screen_name }
    })
}

fn search_result(from_user: &str, text: &str) -> Value {
    json!({
        "from_user": from_user,
        "text": text,
        "created_at": "Wed, 27 Aug 2008 13:08:45 +0000"
    })
}

fn client(server: &MockServer) -> HttpTimelineClient {
    HttpTimelineClient::new(server.uri(), "test-token").unwrap()
}

/// Answer every page of `timeline_path` with an empty list.
async fn mount_empty_pages(server: &MockServer, timeline_path: &str) {
    Mock::given(method("GET"))
        .and(path(timeline_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .with_priority(10)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_home_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(HOME_PATH))
        .and(query_param("page", "3"))
        .and(query_param("count", "200"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([status("sferik", "one"), status("jack", "two")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let posts = client(&server)
        .fetch_page(&Timeline::Home, PageRequest::new(3, 200).unwrap())
        .await
        .unwrap();

    let handles: Vec<&str> = posts.iter().map(|p| p.author_handle.as_str()).collect();
    assert_eq!(handles, vec!["sferik", "jack"]);
}

#[tokio::test]
async fn test_server_error_is_transient() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(HOME_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("Over capacity"))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_page(&Timeline::Home, PageRequest::new(1, 200).unwrap())
        .await
        .unwrap_err();

    assert!(err.is_transient());
    assert!(matches!(err, SearchError::Server { status: 503, .. }));
}

#[tokio::test]
async fn test_unauthorized_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(HOME_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("Could not authenticate you"))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_page(&Timeline::Home, PageRequest::new(1, 200).unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Fatal);
    assert!(matches!(err, SearchError::Api { status: 401, .. }));
}

#[tokio::test]
async fn test_malformed_body_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(HOME_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_page(&Timeline::Home, PageRequest::new(1, 200).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Serialization(_)));
}

#[tokio::test]
async fn test_home_search_recovers_from_flaky_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(HOME_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(2)
        .with_priority(1)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(HOME_PATH))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([status("sferik", "foo bar"), status("jack", "baz")])),
        )
        .with_priority(2)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(HOME_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([status("jack", "FOOBAR")])))
        .with_priority(2)
        .mount(&server)
        .await;
    mount_empty_pages(&server, HOME_PATH).await;

    let timeline = search_home(&client(&server), "foo").await.unwrap();

    let texts: Vec<&str> = timeline.posts().iter().map(|p| p.text.as_str()).collect();
    assert_eq!(texts, vec!["foo bar", "FOOBAR"]);
}

#[tokio::test]
async fn test_home_search_fails_when_page_keeps_failing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(HOME_PATH))
        .and(query_param("page", "16"))
        .respond_with(ResponseTemplate::new(500))
        .with_priority(1)
        .expect(3)
        .mount(&server)
        .await;
    mount_empty_pages(&server, HOME_PATH).await;

    let err = search_home(&client(&server), "foo").await.unwrap_err();

    assert!(matches!(
        err,
        SearchError::RetriesExhausted { page: 16, attempts: 3, .. }
    ));
}

#[tokio::test]
async fn test_user_search_sends_screen_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(USER_PATH))
        .and(query_param("screen_name", "jack"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([status("jack", "just setting up")])),
        )
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(USER_PATH))
        .and(query_param("screen_name", "jack"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .with_priority(5)
        .expect(15)
        .mount(&server)
        .await;

    let timeline = search_user(&client(&server), "@jack", "SETTING").await.unwrap();

    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline.posts()[0].author_handle, "jack");
}

#[tokio::test]
async fn test_user_search_sends_long_screen_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(USER_PATH))
        .and(query_param("screen_name", "averyveryverylongname21"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(16)
        .mount(&server)
        .await;

    let timeline = search_user(&client(&server), "@averyveryverylongname21", "anything")
        .await
        .unwrap();

    assert!(timeline.is_empty());
}

#[tokio::test]
async fn test_search_all_sends_count() {
    let server = MockServer::start().await;
    let results: Vec<Value> = (1..=5)
        .map(|i| search_result("sferik", &format!("rust {i}")))
        .collect();
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "rust lang"))
        .and(query_param("rpp", "5"))
        .and(query_param("include_entities", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": results })))
        .expect(1)
        .mount(&server)
        .await;

    let posts = search_all(&client(&server), "rust lang", Some(5), true)
        .await
        .unwrap();

    assert_eq!(posts.len(), 5);
    assert_eq!(posts[0].text, "rust 5");
    assert_eq!(posts[4].text, "rust 1");
}

#[tokio::test]
async fn test_search_all_does_not_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = search_all(&client(&server), "rust", None, false)
        .await
        .unwrap_err();

    assert!(err.is_transient());
}
