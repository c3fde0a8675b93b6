//! Problem Details assertions for integration tests.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Mirror of the backend's Problem Details body, deliberately independent
/// of backend types.
#[derive(Debug, Deserialize)]
struct ProblemBody {
    #[serde(rename = "type")]
    type_: String,
    title: String,
    status: u16,
    detail: String,
    code: String,
    trace_id: String,
}

/// Assert that a response conforms to the stable error contract:
/// the expected HTTP status, a Problem Details body carrying the expected
/// `code`, and trace-id parity between the body and the `x-trace-id`
/// header. When `expected_detail_contains` is given, the `detail` field
/// must contain it.
pub async fn assert_problem_details_from_service_response(
    resp: ServiceResponse<BoxBody>,
    expected_code: &str,
    expected_status: StatusCode,
    expected_detail_contains: Option<&str>,
) {
    assert_eq!(resp.status(), expected_status);

    let trace_id_header = resp
        .headers()
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8")
        .to_string();

    let body = actix_web::test::read_body(resp).await;
    let problem: ProblemBody = serde_json::from_slice(&body).unwrap_or_else(|_| {
        panic!(
            "error body should be ProblemDetails JSON, got: {}",
            String::from_utf8_lossy(&body)
        )
    });

    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());
    assert_eq!(
        problem.trace_id, trace_id_header,
        "trace_id in body should match x-trace-id header"
    );
    assert!(!problem.title.is_empty(), "title should not be empty");
    assert!(
        problem.type_.ends_with(&problem.code),
        "type URL should end in the error code (got {})",
        problem.type_
    );

    if let Some(expected) = expected_detail_contains {
        assert!(
            problem.detail.contains(expected),
            "expected detail to contain '{expected}', got '{}'",
            problem.detail
        );
    }
}
