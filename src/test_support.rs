//! Helpers shared by the handler and service tests: a config pointing at a
//! throwaway local actix server that plays the VK API and records every hit.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};

use crate::config::VkConfig;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub accept: Option<String>,
}

impl RecordedRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

pub struct FakeVk {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeVk {
    /// Serves `body` with `status` for every request on a free local port.
    pub async fn start(status: StatusCode, body: &'static str) -> FakeVk {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = requests.clone();

        let server = HttpServer::new(move || {
            let recorded = recorded.clone();
            App::new().default_service(web::to(move |req: HttpRequest| {
                let recorded = recorded.clone();
                async move {
                    let query = web::Query::<Vec<(String, String)>>::from_query(req.query_string())
                        .map(|q| q.into_inner())
                        .unwrap_or_default();
                    recorded.lock().unwrap().push(RecordedRequest {
                        method: req.method().to_string(),
                        path: req.path().to_string(),
                        query,
                        accept: req
                            .headers()
                            .get("Accept")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string),
                    });
                    HttpResponse::build(status)
                        .content_type("application/json")
                        .body(body)
                }
            }))
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .expect("bind fake VK server");

        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());

        FakeVk {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn vk_config(api_url: &str) -> VkConfig {
    VkConfig {
        group_id: 1,
        access_token: "T".to_string(),
        api_url: api_url.to_string(),
        confirmation_code: "abc123".to_string(),
        send_method: "messages.send".to_string(),
        api_version: "5.131".to_string(),
        request_timeout: Duration::from_secs(5),
    }
}

/// Base URL of a port nothing listens on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind free port");
    let port = listener.local_addr().expect("local_addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
