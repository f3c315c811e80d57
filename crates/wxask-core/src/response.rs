//! Response normalization
//!
//! Providers answer with several loosely documented body shapes. Every shape we
//! know about is handled here so callers only ever see a `String`.

use serde_json::Value;

/// Extract the answer text from a provider response.
///
/// Shapes are tried in order and the first match wins:
///
/// 1. `choices[0].message.content` (chat completions)
/// 2. `choices[0].text` (legacy completions)
/// 3. `results[0].generated_text`, then `results[0].text` (watsonx text generation)
/// 4. `output` as a string, or `output.text` / `output.content`
/// 5. top-level `text`
///
/// Anything else falls back to the JSON form of the whole response. This never
/// fails; `None` and `null` give an empty string.
pub fn extract_text(response: Option<&Value>) -> String {
    let Some(response) = response else {
        return String::new();
    };

    match response {
        Value::Null => String::new(),
        Value::Object(_) => from_choices(response)
            .or_else(|| from_results(response))
            .or_else(|| from_output(response))
            .or_else(|| response.get("text").map(render))
            .unwrap_or_else(|| response.to_string()),
        other => render(other),
    }
}

fn from_choices(response: &Value) -> Option<String> {
    let first = response.get("choices")?.as_array()?.first()?;

    if let Some(message) = first.get("message").filter(|m| m.is_object()) {
        return Some(message.get("content").map(render).unwrap_or_default());
    }

    first.get("text").map(render)
}

fn from_results(response: &Value) -> Option<String> {
    let first = response.get("results")?.as_array()?.first()?;
    if !first.is_object() {
        return None;
    }

    first
        .get("generated_text")
        .or_else(|| first.get("text"))
        .map(render)
}

fn from_output(response: &Value) -> Option<String> {
    match response.get("output")? {
        Value::String(text) => Some(text.clone()),
        output @ Value::Object(_) => {
            let text = output.get("text").map(render).unwrap_or_default();
            if !text.is_empty() {
                return Some(text);
            }
            Some(output.get("content").map(render).unwrap_or_default())
        }
        _ => None,
    }
}

/// Strings come back verbatim, `null` as empty, everything else as compact JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chat_message_content_wins_over_other_fields() {
        let resp = json!({
            "choices": [{"message": {"content": "X"}, "text": "ignored"}],
            "results": [{"generated_text": "also ignored"}],
        });
        assert_eq!(extract_text(Some(&resp)), "X");
    }

    #[test]
    fn message_without_content_is_empty() {
        let resp = json!({"choices": [{"message": {"role": "assistant"}}]});
        assert_eq!(extract_text(Some(&resp)), "");
    }

    #[test]
    fn empty_choices_fall_through_to_results() {
        let resp = json!({"choices": [], "results": [{"generated_text": "X"}]});
        assert_eq!(extract_text(Some(&resp)), "X");
    }

    #[test]
    fn results_without_known_fields_fall_through_to_top_level_text() {
        let resp = json!({"results": [{"stop_reason": "eos"}], "text": "top"});
        assert_eq!(extract_text(Some(&resp)), "top");
    }

    #[test]
    fn output_text_empty_uses_content() {
        let resp = json!({"output": {"text": "", "content": "C"}});
        assert_eq!(extract_text(Some(&resp)), "C");
    }

    #[test]
    fn output_object_without_fields_is_empty() {
        let resp = json!({"output": {"tokens": 3}, "text": "not reached"});
        assert_eq!(extract_text(Some(&resp)), "");
    }

    #[test]
    fn null_and_absent_are_empty() {
        assert_eq!(extract_text(None), "");
        assert_eq!(extract_text(Some(&Value::Null)), "");
    }

    #[test]
    fn bare_string_is_returned_verbatim() {
        let resp = json!("plain answer");
        assert_eq!(extract_text(Some(&resp)), "plain answer");
    }
}
