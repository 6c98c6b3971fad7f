use crate::config::Endpoint;
use crate::delay;
use crate::wonky::{self, WonkyBehavior};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use url::form_urlencoded;
use warp::Filter;
use warp::http::header::{HeaderName, HeaderValue};
use warp::http::{Response, StatusCode};
use tracing::{info, warn};

/// Status returned for the `slow` query parameter and the simulated
/// rate-limit behavior. Fixed at 429 Too Many Requests.
pub const SLOW_STATUS: StatusCode = StatusCode::TOO_MANY_REQUESTS;

/// Fixed hold applied when wonky mode decides to delay a request.
const WONKY_DELAY: Duration = Duration::from_secs(5);

pub fn routes(
    endpoints: Arc<Vec<Endpoint>>,
    wonky_percentage: u8,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let endpoints = warp::any().map(move || Arc::clone(&endpoints));
    let wonky_percentage = warp::any().map(move || wonky_percentage);

    warp::path::full()
        .and(warp::method())
        .and(raw_query())
        .and(endpoints)
        .and(wonky_percentage)
        .and_then(handle_request)
}

/// Raw query string, or empty when the request carries none.
fn raw_query() -> impl Filter<Extract = (String,), Error = warp::Rejection> + Clone {
    warp::query::raw().or_else(|_| async { Ok::<_, warp::Rejection>((String::new(),)) })
}

pub async fn handle_request(
    path: warp::path::FullPath,
    method: warp::http::Method,
    raw_query: String,
    endpoints: Arc<Vec<Endpoint>>,
    wonky_percentage: u8,
) -> Result<impl warp::Reply, warp::Rejection> {
    info!("Received {} request for {}", method, path.as_str());

    let Some(endpoint) = find_endpoint(&endpoints, method.as_str(), path.as_str()) else {
        info!("No matching endpoint found, returning 404");
        return Ok(Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body("Not Found\n".to_string())
            .unwrap());
    };

    let query = parse_query(&raw_query);

    let wonky_behavior = wonky::roll(wonky_percentage);
    if let Some(behavior) = wonky_behavior {
        info!("Wonky behavior applied: {:?}", behavior);
    }

    // Explicit delay parameter takes precedence over the wonky delay.
    if let Some(delay_str) = query.delay.as_deref().filter(|v| !v.is_empty()) {
        match delay::parse_delay(delay_str) {
            Ok(duration) => {
                info!("Delaying response by {:?}", duration);
                sleep(duration).await;
            }
            Err(err) => warn!("Invalid delay parameter: {}", err),
        }
    } else if wonky_behavior == Some(WonkyBehavior::Delay) {
        info!("Wonky delay: {:?}", WONKY_DELAY);
        sleep(WONKY_DELAY).await;
    }

    let status_code = resolve_status(endpoint, &query, wonky_behavior);

    let mut response = Response::builder().status(status_code);
    if let Some(headers) = response.headers_mut() {
        for raw in &endpoint.headers {
            let (name, value) = parse_header_directive(raw);
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(&value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warn!("Ignoring malformed header directive: {}", raw),
            }
        }
    }

    info!("Returned {} status code", status_code.as_u16());

    Ok(response.body(endpoint.response.clone()).unwrap())
}

/// First catalog entry matching the request's method and path exactly.
fn find_endpoint<'a>(endpoints: &'a [Endpoint], method: &str, path: &str) -> Option<&'a Endpoint> {
    endpoints
        .iter()
        .find(|endpoint| endpoint.verb == method && endpoint.url == path)
}

#[derive(Debug, Default)]
struct QueryDirectives {
    delay: Option<String>,
    error: bool,
    slow: bool,
}

/// Pulls the recognized directives out of the raw query string. `error`
/// and `slow` are presence-only flags; for `delay` the first value wins.
fn parse_query(raw_query: &str) -> QueryDirectives {
    let mut query = QueryDirectives::default();
    for (key, value) in form_urlencoded::parse(raw_query.as_bytes()) {
        match key.as_ref() {
            "delay" => {
                if query.delay.is_none() {
                    query.delay = Some(value.into_owned());
                }
            }
            "error" => query.error = true,
            "slow" => query.slow = true,
            _ => {}
        }
    }
    query
}

/// Explicit query parameters beat wonky behavior, which beats the
/// configured status code.
fn resolve_status(
    endpoint: &Endpoint,
    query: &QueryDirectives,
    wonky_behavior: Option<WonkyBehavior>,
) -> StatusCode {
    if query.error {
        info!("Error parameter detected, returning 500");
        StatusCode::INTERNAL_SERVER_ERROR
    } else if query.slow {
        info!("Slow parameter detected, returning {}", SLOW_STATUS.as_u16());
        SLOW_STATUS
    } else if wonky_behavior == Some(WonkyBehavior::Error) {
        StatusCode::INTERNAL_SERVER_ERROR
    } else if wonky_behavior == Some(WonkyBehavior::RateLimit) {
        SLOW_STATUS
    } else {
        default_status_code(endpoint)
    }
}

/// The endpoint's configured status code, falling back to 200 when the
/// value does not parse as a valid HTTP status.
fn default_status_code(endpoint: &Endpoint) -> StatusCode {
    endpoint
        .code
        .parse::<u16>()
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::OK)
}

/// A header string with a colon is a `name: value` pair (both sides
/// trimmed); one without sets the Content-Type.
fn parse_header_directive(raw: &str) -> (String, String) {
    match raw.split_once(':') {
        Some((name, value)) => (name.trim().to_string(), value.trim().to_string()),
        None => ("Content-Type".to_string(), raw.to_string()),
    }
}
