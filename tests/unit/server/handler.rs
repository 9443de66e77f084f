use super::*;

#[test]
fn parses_signed_decimal_seconds() {
    assert_eq!(parse_end_time(Some("1637410929")), 1_637_410_929);
    assert_eq!(parse_end_time(Some("-5")), -5);
    assert_eq!(parse_end_time(Some("+7")), 7);
}

#[test]
fn missing_or_invalid_end_time_is_zero() {
    assert_eq!(parse_end_time(None), 0);
    assert_eq!(parse_end_time(Some("")), 0);
    assert_eq!(parse_end_time(Some("soon")), 0);
    assert_eq!(parse_end_time(Some("12.5")), 0);
    assert_eq!(parse_end_time(Some(" 12")), 0);
    assert_eq!(parse_end_time(Some("99999999999999999999999")), 0);
}

#[test]
fn every_error_kind_is_a_server_error() {
    let errors = [
        CountdownError::validation("empty plan"),
        CountdownError::font("missing"),
        CountdownError::render("no glyphs"),
        CountdownError::encode("writer"),
        CountdownError::Other(anyhow::anyhow!("join")),
    ];
    for err in errors {
        let kind = err.kind();
        assert_eq!(
            ApiError(err).status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "{kind}"
        );
    }
}

#[test]
fn validation_error_response_is_json_500() {
    let resp = ApiError(CountdownError::validation("canvas width/height must be non-zero"))
        .into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        resp.headers()[CONTENT_TYPE],
        HeaderValue::from_static("application/json")
    );
}
