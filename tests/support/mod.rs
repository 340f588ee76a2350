//! Scripted transport shared by the behavior tests.
#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use movies_core::{
    HttpClient, HttpError, HttpRequest, HttpResponse, MovieService, RestClientConfig, RetryPolicy,
};
use tokio::time::Instant;

pub const MOVIES_INFO_URL: &str = "http://localhost:8084/v1/movieinfos";
pub const REVIEWS_URL: &str = "http://localhost:8084/v1/reviews";

pub const MOVIE_INFO_JSON: &str = include_str!("../fixtures/movieinfo.json");
pub const REVIEWS_JSON: &str = include_str!("../fixtures/reviews.json");

pub type Reply = Result<HttpResponse, HttpError>;

struct Route {
    prefix: String,
    script: Vec<Reply>,
    latency: Duration,
    served: usize,
}

/// Answers requests by URL prefix. Each route plays its script in order and
/// then keeps repeating the last reply.
#[derive(Default)]
pub struct ScriptedHttpClient {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<(Instant, HttpRequest)>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stub(self, prefix: &str, reply: Reply) -> Self {
        self.stub_sequence(prefix, vec![reply])
    }

    pub fn stub_sequence(self, prefix: &str, script: Vec<Reply>) -> Self {
        assert!(!script.is_empty(), "a route needs at least one reply");
        self.routes
            .lock()
            .expect("route table should not be poisoned")
            .push(Route {
                prefix: prefix.to_owned(),
                script,
                latency: Duration::ZERO,
                served: 0,
            });
        self
    }

    pub fn with_latency(self, prefix: &str, latency: Duration) -> Self {
        for route in self
            .routes
            .lock()
            .expect("route table should not be poisoned")
            .iter_mut()
            .filter(|route| route.prefix == prefix)
        {
            route.latency = latency;
        }
        self
    }

    pub fn request_count(&self, prefix: &str) -> usize {
        self.requests_to(prefix).len()
    }

    pub fn requests_to(&self, prefix: &str) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request log should not be poisoned")
            .iter()
            .filter(|(_, request)| request.url.starts_with(prefix))
            .map(|(_, request)| request.clone())
            .collect()
    }

    pub fn request_times(&self, prefix: &str) -> Vec<Instant> {
        self.requests
            .lock()
            .expect("request log should not be poisoned")
            .iter()
            .filter(|(_, request)| request.url.starts_with(prefix))
            .map(|(at, _)| *at)
            .collect()
    }

    fn next_reply(&self, url: &str) -> (Reply, Duration) {
        let mut routes = self.routes.lock().expect("route table should not be poisoned");
        let Some(route) = routes.iter_mut().find(|route| url.starts_with(&route.prefix)) else {
            return (Err(HttpError::new(format!("no stub for {url}"))), Duration::ZERO);
        };

        let index = route.served.min(route.script.len() - 1);
        route.served += 1;
        (route.script[index].clone(), route.latency)
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let (reply, latency) = self.next_reply(&request.url);
        self.requests
            .lock()
            .expect("request log should not be poisoned")
            .push((Instant::now(), request));

        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            reply
        })
    }
}

pub fn ok_json(body: &str) -> Reply {
    Ok(HttpResponse::ok_json(body))
}

pub fn status(code: u16, body: &str) -> Reply {
    Ok(HttpResponse::new(code, body))
}

pub fn movie_info_url(id: &str) -> String {
    format!("{MOVIES_INFO_URL}/{id}")
}

pub fn config() -> RestClientConfig {
    RestClientConfig::new(MOVIES_INFO_URL, REVIEWS_URL).expect("test URLs are valid")
}

pub fn service(client: &Arc<ScriptedHttpClient>) -> MovieService {
    MovieService::with_http_client(client.clone(), &config())
}

pub fn service_with_retry(client: &Arc<ScriptedHttpClient>, retry: RetryPolicy) -> MovieService {
    MovieService::with_http_client(client.clone(), &config().with_retry(retry))
}
