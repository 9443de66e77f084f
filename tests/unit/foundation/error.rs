use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CountdownError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(CountdownError::font("x").to_string().contains("font error:"));
    assert!(
        CountdownError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        CountdownError::encode("x")
            .to_string()
            .contains("encode error:")
    );
}

#[test]
fn kinds_are_stable() {
    assert_eq!(CountdownError::validation("x").kind(), "validation");
    assert_eq!(CountdownError::font("x").kind(), "font");
    assert_eq!(CountdownError::render("x").kind(), "render");
    assert_eq!(CountdownError::encode("x").kind(), "encode");
    assert_eq!(
        CountdownError::Other(anyhow::anyhow!("x")).kind(),
        "internal"
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CountdownError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
