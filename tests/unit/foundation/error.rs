use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        VoxError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        VoxError::transport("x")
            .to_string()
            .contains("transport error:")
    );
    assert!(
        VoxError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = VoxError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_transport_errors_end_sessions() {
    assert!(VoxError::transport("reset by peer").is_transport());
    assert!(!VoxError::validation("rpm").is_transport());
}
