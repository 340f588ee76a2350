//! REST clients for the two downstream services.
//!
//! Each client turns a raw [`HttpResponse`] into either a decoded value or a
//! [`ClassifiedFailure`], and wraps that single attempt in its [`RetryPolicy`](crate::RetryPolicy).

mod movies_info;
mod reviews;

pub use movies_info::MoviesInfoRestClient;
pub use reviews::ReviewRestClient;

use serde::de::DeserializeOwned;

use crate::http_client::{HttpError, HttpResponse};
use crate::ClassifiedFailure;

/// Classifies 4xx/5xx responses; `None` means the response is not an error.
fn classify_error_status(
    service_name: &str,
    response: &HttpResponse,
) -> Option<ClassifiedFailure> {
    match response.status {
        400..=499 => {
            log_status(service_name, response.status);
            Some(ClassifiedFailure::client(response.status, response.body.clone()))
        }
        500..=599 => {
            log_status(service_name, response.status);
            Some(ClassifiedFailure::server(
                response.status,
                format!("Server Exception in {service_name}: {}", response.body),
            ))
        }
        _ => None,
    }
}

fn log_status(service_name: &str, status: u16) {
    tracing::info!(status, service = service_name, "Status code is: {}", status);
}

fn transport_failure(service_name: &str, error: HttpError) -> ClassifiedFailure {
    let kind = if error.timed_out() { "timed out" } else { "failed" };
    ClassifiedFailure::transport(format!(
        "request to {service_name} {kind}: {}",
        error.message()
    ))
}

fn unexpected_status(service_name: &str, response: &HttpResponse) -> ClassifiedFailure {
    ClassifiedFailure::transport(format!(
        "unexpected status {} from {service_name}",
        response.status
    ))
}

fn decode_json<T: DeserializeOwned>(
    service_name: &str,
    response: &HttpResponse,
) -> Result<T, ClassifiedFailure> {
    serde_json::from_str(&response.body).map_err(|error| {
        ClassifiedFailure::decode(format!("failed to decode {service_name} response: {error}"))
    })
}
