use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BlitError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(BlitError::asset("x").to_string().contains("asset error:"));
    assert!(BlitError::sink("x").to_string().contains("sink error:"));
    assert!(
        BlitError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        BlitError::invalid_handle(RenderOutputHandle::INVALID, HandleFault::Sentinel)
            .to_string()
            .contains("invalid output handle")
    );
}

#[test]
fn handle_fault_is_exposed() {
    let err = BlitError::invalid_handle(RenderOutputHandle::INVALID, HandleFault::Destroyed);
    assert_eq!(err.handle_fault(), Some(HandleFault::Destroyed));
    assert!(err.to_string().contains("already destroyed"));
    assert_eq!(BlitError::validation("x").handle_fault(), None);
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BlitError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
