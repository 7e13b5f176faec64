//! Shared test fixtures for the Lynapp SDK integration tests.
//!
//! Provides sample listing payloads shaped like the service's responses,
//! price-history builders, and `StubServer`, an axum app on a local port that
//! answers canned routes and records what it received.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::thread;

use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use chrono::NaiveDate;
use lynapp_sdk::models::PricePoint;
use lynapp_sdk::Listing;

// ---------------------------------------------------------------------------
// Price histories
// ---------------------------------------------------------------------------

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Build a history from `(year, month, price)` triples, dated the 1st.
pub fn history(points: &[(i32, u32, f64)]) -> Vec<PricePoint> {
    points
        .iter()
        .map(|&(y, m, price)| PricePoint::new(date(y, m, 1), price))
        .collect()
}

/// Build a monthly history starting January 2023 from bare prices.
pub fn prices(values: &[f64]) -> Vec<PricePoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, &price)| {
            let month = (i % 12) as u32 + 1;
            let year = 2023 + (i / 12) as i32;
            PricePoint::new(date(year, month, 1), price)
        })
        .collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// Three listings as the service serializes them.
///
/// Listing 1 stores its price values as a JSON-encoded string, listing 2 as a
/// plain array, listing 3 has no price history at all.
pub fn sample_listings_json() -> serde_json::Value {
    serde_json::json!([
        {
            "id": 1,
            "title": "Modern Downtown Condo",
            "street_address": "123 King Street W",
            "city": "Toronto",
            "province": "ON",
            "description": "Stunning modern condo in the heart of downtown.",
            "current_price": "850000.00",
            "bedrooms": 2,
            "bathrooms": 2,
            "square_feet": 1200,
            "image_url": "https://example.com/condo.jpg",
            "price_histories": [
                {
                    "id": 10,
                    "price_values": "[{\"date\": \"2023-01-01\", \"price\": 100000.0}, {\"date\": \"2023-06-01\", \"price\": 110000.0}, {\"date\": \"2024-01-01\", \"price\": 121000.0}]",
                    "date_recorded": "2024-01-02"
                }
            ]
        },
        {
            "id": 2,
            "title": "Luxury Waterfront Villa",
            "street_address": "456 Lakeshore Blvd",
            "city": "Vancouver",
            "province": "BC",
            "description": "Spectacular waterfront villa.",
            "current_price": "2500000.00",
            "bedrooms": 4,
            "bathrooms": 3,
            "square_feet": 3500,
            "image_url": "https://example.com/villa.jpg",
            "price_histories": [
                {
                    "id": 11,
                    "price_values": [
                        {"date": "2023-03-01", "price": 2400000.0},
                        {"date": "2023-09-01", "price": 2500000.0}
                    ],
                    "date_recorded": null
                }
            ]
        },
        {
            "id": 3,
            "title": "Cozy Suburban Home",
            "street_address": "789 Maple Avenue",
            "city": "Calgary",
            "province": "AB",
            "description": "Perfect family home in a quiet neighborhood.",
            "current_price": 485000,
            "bedrooms": 3,
            "bathrooms": 2,
            "square_feet": 1800,
            "image_url": "https://example.com/home.jpg",
            "price_histories": []
        }
    ])
}

pub fn sample_listings() -> Vec<Listing> {
    serde_json::from_value(sample_listings_json()).unwrap()
}

/// A listing with only the fields the filters look at set meaningfully.
pub fn listing(id: i64, city: &str, price: f64, bedrooms: i32, bathrooms: i32) -> Listing {
    Listing {
        id,
        title: format!("Listing {id}"),
        street_address: format!("{id} Main Street"),
        city: city.to_string(),
        province: "ON".to_string(),
        description: String::new(),
        current_price: price,
        bedrooms,
        bathrooms,
        square_feet: 1000,
        image_url: String::new(),
        price_histories: Vec::new(),
        year_built: None,
    }
}

// ---------------------------------------------------------------------------
// StubServer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path plus query string, e.g. `/api/listings/search/?city=Toronto`.
    pub target: String,
    pub body: String,
}

#[derive(Clone)]
struct Route {
    method: Method,
    target: String,
    status: StatusCode,
    body: String,
}

#[derive(Clone, Default)]
struct StubState {
    routes: Arc<Mutex<Vec<Route>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Canned JSON responses served by axum on 127.0.0.1.
///
/// Routes are matched on method plus path and query, so they can be added
/// after the server starts. Unknown routes get a DRF-style 404. The server
/// runs on its own runtime thread until the test process exits.
pub struct StubServer {
    pub base_url: String,
    state: StubState,
}

impl StubServer {
    pub fn start() -> Self {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let port = listener.local_addr().unwrap().port();

        let state = StubState::default();
        let app = Router::new().fallback(respond).with_state(state.clone());

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                axum::serve(listener, app).await.unwrap();
            });
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}/api"),
            state,
        }
    }

    /// Register a response for `method` + `target` (path under `/api`, with
    /// any query string).
    pub fn route(&self, method: &str, target: &str, status: u16, body: impl Into<String>) {
        self.state.routes.lock().unwrap().push(Route {
            method: Method::from_bytes(method.as_bytes()).unwrap(),
            target: format!("/api{target}"),
            status: StatusCode::from_u16(status).unwrap(),
            body: body.into(),
        });
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn respond(State(state): State<StubState>, method: Method, uri: Uri, body: String) -> Response {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        target: target.clone(),
        body,
    });

    let matched = state
        .routes
        .lock()
        .unwrap()
        .iter()
        .find(|r| r.method == method && r.target == target)
        .cloned();

    match matched {
        Some(route) if route.status == StatusCode::NO_CONTENT => route.status.into_response(),
        Some(route) => (
            route.status,
            [(header::CONTENT_TYPE, "application/json")],
            route.body,
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"detail": "Not found."}"#,
        )
            .into_response(),
    }
}
