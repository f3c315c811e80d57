//! Snapshot tests for response normalization and error messages

#[cfg(test)]
mod snapshot_tests {
    use crate::{Error, extract_text};
    use insta::assert_snapshot;
    use serde_json::json;

    #[test]
    fn test_chat_completion_shape() {
        let resp = json!({"choices": [{"message": {"role": "assistant", "content": "Paris"}}]});
        assert_snapshot!(extract_text(Some(&resp)), @"Paris");
    }

    #[test]
    fn test_legacy_completion_shape() {
        let resp = json!({"choices": [{"text": "Paris", "index": 0}]});
        assert_snapshot!(extract_text(Some(&resp)), @"Paris");
    }

    #[test]
    fn test_watsonx_generation_shape() {
        let resp = json!({"results": [{"generated_text": "Paris", "stop_reason": "eos_token"}]});
        assert_snapshot!(extract_text(Some(&resp)), @"Paris");

        let resp = json!({"results": [{"text": "Lyon"}]});
        assert_snapshot!(extract_text(Some(&resp)), @"Lyon");
    }

    #[test]
    fn test_output_shapes() {
        let resp = json!({"output": "Paris"});
        assert_snapshot!(extract_text(Some(&resp)), @"Paris");

        let resp = json!({"output": {"text": "Paris"}});
        assert_snapshot!(extract_text(Some(&resp)), @"Paris");
    }

    #[test]
    fn test_unknown_shape_falls_back_to_json() {
        let resp = json!({"foo": "bar"});
        assert_snapshot!(extract_text(Some(&resp)), @r#"{"foo":"bar"}"#);
    }

    #[test]
    fn test_non_string_field_is_rendered_as_json() {
        let resp = json!({"text": 42});
        assert_snapshot!(extract_text(Some(&resp)), @"42");
    }

    #[test]
    fn test_error_messages() {
        assert_snapshot!(
            Error::http(401, "Unauthorized").to_string(),
            @"HTTP error 401: Unauthorized"
        );
        assert_snapshot!(
            Error::Configuration("token exchange returned no token".to_string()).to_string(),
            @"Configuration error: token exchange returned no token"
        );
    }

    #[test]
    fn test_http_body_is_truncated() {
        let body = "x".repeat(800);
        match Error::http(500, &body) {
            Error::Http { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body.chars().count(), 500);
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }
}
