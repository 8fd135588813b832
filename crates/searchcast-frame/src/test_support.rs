//! Local stand-ins for upstream services, used by unit tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;

pub const CANADA_EXTRACT: &str = "Canada is a country in North America. Its ten provinces and three territories extend from the Atlantic Ocean to the Pacific Ocean. It is the world's second-largest country by total area.";

/// Summary the frame should show for [`CANADA_EXTRACT`].
pub const CANADA_SUMMARY: &str = "Canada is a country in North America. Its ten provinces and three territories extend from the Atlantic Ocean to the Pacific Ocean.";

/// How long the `Slow` title takes to answer.
pub const SLOW_RESPONSE_DELAY: Duration = Duration::from_secs(3);

/// Query parameters of an intro-only plain-text extract lookup. Requests
/// missing any of them get a 400.
const REQUIRED_PARAMS: &[(&str, &str)] = &[
    ("action", "query"),
    ("format", "json"),
    ("prop", "extracts"),
    ("exintro", "true"),
    ("explaintext", "true"),
    ("redirects", "1"),
];

/// Handle to a running MediaWiki stand-in.
#[derive(Clone, Default)]
pub struct MockWiki {
    hits: Arc<AtomicUsize>,
}

impl MockWiki {
    /// Number of API requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Answers `action=query` lookups for a few fixed titles.
///
/// - `Canada`: three-sentence extract
/// - `Stub`: page without an extract
/// - `Broken`: 502
/// - `Garbage`: non-JSON body
/// - `NoQuery`: JSON without a `query` object
/// - `Slow`: answers after [`SLOW_RESPONSE_DELAY`]
/// - `Canada|zzqq`: a missing page listed before an existing one
/// - anything else: missing page (`"-1"`)
async fn mock_api(
    State(mock): State<MockWiki>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    mock.hits.fetch_add(1, Ordering::SeqCst);

    let intro_lookup = REQUIRED_PARAMS
        .iter()
        .all(|(key, value)| params.get(*key).map(String::as_str) == Some(*value));
    if !intro_lookup {
        return (StatusCode::BAD_REQUEST, "unexpected parameters").into_response();
    }

    let title = params.get("titles").cloned().unwrap_or_default();
    let body = match title.as_str() {
        "Slow" => {
            tokio::time::sleep(SLOW_RESPONSE_DELAY).await;
            serde_json::json!({ "query": { "pages": {} } })
        }
        "Canada|zzqq" => serde_json::json!({
            "query": { "pages": {
                "-1": { "ns": 0, "title": "Zzqq", "missing": "" },
                "5042916": {
                    "pageid": 5042916, "ns": 0, "title": "Canada",
                    "extract": CANADA_EXTRACT,
                },
            }}
        }),
        "Canada" => serde_json::json!({
            "batchcomplete": "",
            "query": { "pages": { "5042916": {
                "pageid": 5042916, "ns": 0, "title": "Canada",
                "extract": CANADA_EXTRACT,
            }}}
        }),
        "Stub" => serde_json::json!({
            "query": { "pages": { "42": { "pageid": 42, "ns": 0, "title": "Stub" }}}
        }),
        "Broken" => return (StatusCode::BAD_GATEWAY, "upstream down").into_response(),
        "Garbage" => return "not json".into_response(),
        "NoQuery" => serde_json::json!({ "batchcomplete": "" }),
        _ => serde_json::json!({
            "query": { "pages": { "-1": { "ns": 0, "title": title, "missing": "" }}}
        }),
    };

    axum::Json(body).into_response()
}

/// Serve `app` on an ephemeral localhost port.
pub async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Start a MediaWiki stand-in and return its `api.php` URL.
pub async fn spawn_mock_wiki() -> (String, MockWiki) {
    let mock = MockWiki::default();
    let app = Router::new()
        .route("/w/api.php", get(mock_api))
        .with_state(mock.clone());

    let addr = serve(app).await;
    (format!("http://{addr}/w/api.php"), mock)
}
