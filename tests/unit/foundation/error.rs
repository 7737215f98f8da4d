use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(ReelError::render("x").to_string().contains("render error:"));
    assert!(ReelError::encode("x").to_string().contains("encode error:"));
    assert!(
        ReelError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn io_errors_convert_with_question_mark() {
    fn fails() -> ReelResult<()> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"))?;
        Ok(())
    }
    let err = fails().unwrap_err();
    assert!(matches!(err, ReelError::Io(_)));
    assert!(err.to_string().contains("read-only"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
