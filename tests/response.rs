use s3_deploy::ServiceResponse;
use s3_deploy::response::is_http_success;

#[test]
fn success_range_boundaries() {
    assert!(!is_http_success(199));
    assert!(is_http_success(200));
    assert!(is_http_success(201));
    assert!(is_http_success(399));
    assert!(!is_http_success(400));
    assert!(!is_http_success(500));
}

#[test]
fn response_classification() {
    assert!(ServiceResponse::new(304, serde_json::Value::Null).is_success());
    assert!(!ServiceResponse::new(403, serde_json::Value::Null).is_success());
}
