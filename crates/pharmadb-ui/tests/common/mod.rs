//! Shared test doubles for controller tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pharmadb_client::StoreClient;
use pharmadb_ui::Prompter;
use serde_json::json;

/// Prompter that answers every confirmation with a fixed reply and records
/// all notices.
#[derive(Clone, Default)]
pub struct RecordingPrompter {
    answer: bool,
    confirms: Arc<AtomicUsize>,
    notices: Arc<Mutex<Vec<String>>>,
}

impl RecordingPrompter {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            ..Self::default()
        }
    }

    pub fn confirm_count(&self) -> usize {
        self.confirms.load(Ordering::SeqCst)
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }
}

impl Prompter for RecordingPrompter {
    fn confirm(&self, _message: &str) -> bool {
        self.confirms.fetch_add(1, Ordering::SeqCst);
        self.answer
    }

    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_owned());
    }
}

pub fn test_store(base_url: &str) -> StoreClient {
    StoreClient::with_base_url(base_url, 5, "pharmadb-test/0.1")
        .expect("client construction should not fail")
}

pub fn record_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "distance": 120.5,
        "latitude": 37.5,
        "longitude": 127.0,
        "address": "Seoul"
    })
}

pub fn result_json(name: &str, distance: &str, lat: f64, lng: f64) -> serde_json::Value {
    json!({
        "pharmacyName": name,
        "pharmacyAddress": "Seoul Gangnam-gu Teheran-ro",
        "directionURL": format!("https://map.kakao.com/link/to/{name},{lat},{lng}"),
        "roadViewURL": format!("https://map.kakao.com/link/roadview/{lat},{lng}"),
        "distance": distance,
        "latitude": lat,
        "longitude": lng
    })
}
