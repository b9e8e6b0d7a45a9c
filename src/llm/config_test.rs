use super::*;

#[test]
fn resolve_applies_defaults() {
    let cfg = CompletionConfig::resolve(Some("sk-test".into()), None, None, None, None).unwrap();
    assert_eq!(cfg.api_key, "sk-test");
    assert_eq!(cfg.model, DEFAULT_MODEL);
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    assert_eq!(
        cfg.timeouts,
        CompletionTimeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    );
}

#[test]
fn resolve_honors_overrides() {
    let cfg = CompletionConfig::resolve(
        Some("sk-test".into()),
        Some("gpt-4o".into()),
        Some("https://example.test/v1/".into()),
        Some("42".into()),
        Some("7".into()),
    )
    .unwrap();
    assert_eq!(cfg.model, "gpt-4o");
    assert_eq!(cfg.base_url, "https://example.test/v1");
    assert_eq!(cfg.timeouts, CompletionTimeouts { request_secs: 42, connect_secs: 7 });
}

#[test]
fn missing_key_is_missing_credential() {
    let err = CompletionConfig::resolve(None, None, None, None, None).unwrap_err();
    assert!(matches!(err, ProviderError::MissingCredential));
}

#[test]
fn blank_key_is_missing_credential() {
    let err = CompletionConfig::resolve(Some("   ".into()), None, None, None, None).unwrap_err();
    assert!(matches!(err, ProviderError::MissingCredential));
}

#[test]
fn unparseable_timeout_falls_back_to_default() {
    let cfg =
        CompletionConfig::resolve(Some("sk-test".into()), None, None, Some("soon".into()), None).unwrap();
    assert_eq!(cfg.timeouts.request_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
}
