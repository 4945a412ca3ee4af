use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FlowloopError::precondition("x")
            .to_string()
            .contains("precondition failed:")
    );
    assert!(
        FlowloopError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FlowloopError::resource("x")
            .to_string()
            .contains("resource unavailable:")
    );
    assert!(
        FlowloopError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        FlowloopError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FlowloopError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_user_errors_are_user_facing() {
    assert!(FlowloopError::precondition("path").is_user_facing());
    assert!(FlowloopError::validation("duration").is_user_facing());
    assert!(!FlowloopError::resource("gif").is_user_facing());
    assert!(!FlowloopError::render("ctx").is_user_facing());
}
