//! End-to-end tests against a local mock of the CrossRef API.
//!
//! The mock serves canned envelopes on a random port and records every
//! request URI, so the tests can check both what the client decodes and what
//! it puts on the wire.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use crossref_client::{
    CrossRefClient, CrossRefError, Endpoint, EndpointResult, QueryOptions, Work,
};
use serde_json::{json, Value};

type Log = Arc<Mutex<Vec<String>>>;

const WORKS_TOTAL: u64 = 45;

struct MockCrossRef {
    addr: SocketAddr,
    log: Log,
}

impl MockCrossRef {
    async fn start() -> Self {
        let log: Log = Arc::default();
        let app = Router::new().fallback(crossref).with_state(log.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        Self { addr, log }
    }

    fn client(&self) -> CrossRefClient {
        CrossRefClient::new()
            .unwrap()
            .with_base_url(format!("http://{}", self.addr))
    }

    fn requests(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

async fn crossref(State(log): State<Log>, uri: Uri) -> Response {
    log.lock().unwrap().push(uri.to_string());

    let params: Vec<(String, String)> =
        url::form_urlencoded::parse(uri.query().unwrap_or("").as_bytes())
            .into_owned()
            .collect();
    let param = |key: &str| {
        params
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.parse::<u64>().ok())
    };
    let offset = param("offset").unwrap_or(0);
    let rows = param("rows").unwrap_or(20);

    let path = uri.path().trim_start_matches('/');
    match path {
        "works" => ok(work_page(offset, rows, WORKS_TOTAL)),
        "types" => ok(json!({
            "total-results": 2,
            "items": [
                {"id": "book", "label": "Book"},
                {"id": "journal-article", "label": "Journal Article"}
            ]
        })),
        "funders" => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "status": "failed",
                "message-type": "validation-failure",
                "message": [{
                    "type": "parameter-not-allowed",
                    "value": "bogus",
                    "message": "This route does not support bogus"
                }]
            })),
        )
            .into_response(),
        "licenses" => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        "members/broken" => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/html")],
            "<html>upstream proxy error</html>",
        )
            .into_response(),
        "members/nostatus" => Json(json!({"message": {}})).into_response(),
        "members/failed" => Json(json!({"status": "failed", "message": {}})).into_response(),
        "works/10.0000/nonexistent" => (StatusCode::NOT_FOUND, "Resource not found.").into_response(),
        p if p.ends_with("/works") => ok(work_page(offset, rows, 5)),
        p if p.starts_with("works/") => ok(json!({
            "DOI": &p["works/".len()..],
            "title": ["A mock work"],
            "type": "journal-article",
            "issued": {"date-parts": [[2019, 4, 2]]}
        })),
        p if p.starts_with("members/") => ok(json!({"id": 311, "primary-name": "Mock Publisher"})),
        _ => (StatusCode::NOT_FOUND, "Resource not found.").into_response(),
    }
}

fn ok(message: Value) -> Response {
    Json(json!({"status": "ok", "message-type": "mock", "message": message})).into_response()
}

fn work_page(offset: u64, rows: u64, total: u64) -> Value {
    let items: Vec<Value> = (offset..(offset + rows).min(total))
        .map(|i| json!({"DOI": format!("10.5555/{}", i)}))
        .collect();
    json!({
        "facets": {},
        "total-results": total,
        "items": items,
        "items-per-page": rows,
        "query": {"start-index": offset, "search-terms": null}
    })
}

// --- lists ---

#[tokio::test]
async fn first_page_of_works() {
    let mock = MockCrossRef::start().await;
    let page = mock.client().works(&QueryOptions::new()).await.unwrap();

    assert_eq!(page.items.len(), 20);
    assert!(page.items.iter().all(|w| w.get("DOI").is_some()));
    assert_eq!(page.next_options.offset, Some(20));
    assert!(!page.is_done);
    assert_eq!(page.total_results(), Some(WORKS_TOTAL));
    assert!(!page.message.contains_key("items"));
    assert_eq!(mock.requests(), vec!["/works"]);
}

#[tokio::test]
async fn paging_through_all_works() {
    let mock = MockCrossRef::start().await;
    let client = mock.client();

    let mut options = QueryOptions::new().query("graphene");
    let mut dois = Vec::new();
    loop {
        let page = client.works(&options).await.unwrap();
        let works: Vec<Work> = page.items_as().unwrap();
        dois.extend(works.into_iter().map(|w| w.doi));
        if page.is_done {
            break;
        }
        options = page.next_options;
    }

    let expected: Vec<String> = (0..WORKS_TOTAL).map(|i| format!("10.5555/{}", i)).collect();
    assert_eq!(dois, expected);
    assert_eq!(
        mock.requests(),
        vec![
            "/works?query=graphene",
            "/works?query=graphene&offset=20",
            "/works?query=graphene&offset=40",
        ]
    );
}

#[tokio::test]
async fn same_options_same_page() {
    let mock = MockCrossRef::start().await;
    let client = mock.client();
    let options = QueryOptions::new().rows(10).offset(10);

    let first = client.works(&options).await.unwrap();
    let second = client.works(&options).await.unwrap();
    assert_eq!(first.items, second.items);
    assert_eq!(first.next_options, second.next_options);
    assert_eq!(first.next_options.offset, Some(20));
}

#[tokio::test]
async fn types_is_a_single_final_page() {
    let mock = MockCrossRef::start().await;
    let options = QueryOptions::new().rows(3);
    let page = mock.client().types(&options).await.unwrap();

    assert!(page.is_done);
    assert_eq!(page.next_options, options);
    assert_eq!(page.items[1]["id"], "journal-article");
}

#[tokio::test]
async fn filters_for_every_field_reach_the_wire() {
    let mock = MockCrossRef::start().await;
    let options = QueryOptions::new()
        .filter("type", "journal-article")
        .filter("has-full-text", true);
    let page = mock
        .client()
        .journal_works("1234-5678", &options)
        .await
        .unwrap();

    assert_eq!(page.items.len(), 5);
    assert!(page.is_done);
    assert_eq!(
        mock.requests(),
        vec!["/journals/1234-5678/works?filter=type:journal-article,has-full-text:true"]
    );
}

#[tokio::test]
async fn long_query_is_truncated_on_the_wire() {
    let mock = MockCrossRef::start().await;
    let options = QueryOptions::new().query("q".repeat(2500));
    mock.client().works(&options).await.unwrap();

    assert_eq!(
        mock.requests(),
        vec![format!("/works?query={}", "q".repeat(2000))]
    );
}

#[tokio::test]
async fn concurrent_calls_are_independent() {
    let mock = MockCrossRef::start().await;
    let client = mock.client();
    let a = QueryOptions::new().rows(5);
    let b = QueryOptions::new().rows(5).offset(41);

    let (first, last) = tokio::join!(client.works(&a), client.works(&b));
    let (first, last) = (first.unwrap(), last.unwrap());

    assert_eq!(first.next_options.offset, Some(5));
    assert!(!first.is_done);
    assert_eq!(last.items.len(), 4);
    assert_eq!(last.next_options.offset, Some(46));
    assert!(last.is_done);
}

// --- items ---

#[tokio::test]
async fn work_by_doi() {
    let mock = MockCrossRef::start().await;
    let work = mock.client().work_typed("10.5555/12345678").await.unwrap();

    assert_eq!(work.doi, "10.5555/12345678");
    assert_eq!(work.year(), Some(2019));
    assert_eq!(mock.requests(), vec!["/works/10.5555/12345678"]);
}

#[tokio::test]
async fn missing_work_names_the_url() {
    let mock = MockCrossRef::start().await;
    let err = mock.client().work("10.0000/nonexistent").await.unwrap_err();

    let expected = format!("http://{}/works/10.0000/nonexistent", mock.addr);
    match &err {
        CrossRefError::NotFound { url } => assert_eq!(url, &expected),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains(&expected));
}

// --- endpoint table ---

#[tokio::test]
async fn fetch_by_endpoint_name() {
    let mock = MockCrossRef::start().await;
    let client = mock.client();

    let member = Endpoint::lookup("member").unwrap();
    match client.fetch(member, Some("311"), &QueryOptions::new()).await.unwrap() {
        EndpointResult::Item(value) => assert_eq!(value["id"], 311),
        other => panic!("expected an item, got {other:?}"),
    }

    let member_works = Endpoint::lookup("memberWorks").unwrap();
    let options = QueryOptions::new().rows(2);
    match client.fetch(member_works, Some("311"), &options).await.unwrap() {
        EndpointResult::Page(page) => {
            assert_eq!(page.items.len(), 2);
            assert_eq!(page.next_options.offset, Some(2));
        }
        other => panic!("expected a page, got {other:?}"),
    }

    assert_eq!(
        mock.requests(),
        vec!["/members/311", "/members/311/works?rows=2"]
    );
}

#[tokio::test]
async fn endpoint_missing_its_parameter_sends_nothing() {
    let mock = MockCrossRef::start().await;
    let journal_works = Endpoint::lookup("journalWorks").unwrap();
    let err = mock
        .client()
        .fetch(journal_works, None, &QueryOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, CrossRefError::InvalidRequest(_)));
    assert!(mock.requests().is_empty());
}

// --- errors ---

#[tokio::test]
async fn http_error_carries_upstream_message() {
    let mock = MockCrossRef::start().await;
    let err = mock.client().funders(&QueryOptions::new()).await.unwrap_err();

    match err {
        CrossRefError::Upstream { status, message } => {
            assert_eq!(status, Some(400));
            assert_eq!(message, "This route does not support bogus");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn http_error_without_body_uses_status_text() {
    let mock = MockCrossRef::start().await;
    let err = mock.client().licenses(&QueryOptions::new()).await.unwrap_err();

    match err {
        CrossRefError::Upstream { status, message } => {
            assert_eq!(status, Some(503));
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_envelopes() {
    let mock = MockCrossRef::start().await;
    let client = mock.client();

    let err = client.member("broken").await.unwrap_err();
    assert!(matches!(err, CrossRefError::Malformed(ref m) if m.contains("not JSON")));

    let err = client.member("nostatus").await.unwrap_err();
    assert!(matches!(err, CrossRefError::Malformed(ref m) if m.contains("status")));

    let err = client.member("failed").await.unwrap_err();
    assert!(matches!(
        err,
        CrossRefError::Upstream { status: None, ref message } if message == "failed"
    ));
}

#[tokio::test]
async fn connection_failure_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = CrossRefClient::new()
        .unwrap()
        .with_base_url(format!("http://{}", addr));
    let err = client.work("10.5555/1").await.unwrap_err();
    assert!(matches!(err, CrossRefError::Transport(_)));
}
