//! Model response parser
//!
//! Pulls the JSON body out of the model text and parses it strictly
//! as a DetoxResponse.

use crate::error::AnalysisError;
use crate::types::DetoxResponse;

/// Extract the JSON part of a model reply
///
/// The whole reply must be either a bare object or a single
/// ```json ... ``` (or plain ```) fence around one. Text around the
/// object is an error, not something to recover from.
///
/// # Examples
/// ```
/// use desk_detox_common::extract_json;
///
/// let response = "```json\n{\"summary\": \"ok\", \"items\": []}\n```";
/// let json = extract_json(response).unwrap();
/// assert!(json.starts_with('{'));
/// ```
pub fn extract_json(response: &str) -> Result<&str, AnalysisError> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }

    let body = match trimmed.strip_prefix("```") {
        Some(fenced) => {
            let fenced = fenced.strip_prefix("json").unwrap_or(fenced);
            fenced
                .strip_suffix("```")
                .ok_or_else(|| AnalysisError::Parse("unterminated code fence".into()))?
                .trim()
        }
        None => trimmed,
    };

    if body.starts_with('{') && body.ends_with('}') {
        Ok(body)
    } else {
        Err(AnalysisError::Parse("reply is not a single JSON object".into()))
    }
}

/// Parse a model reply into a DetoxResponse
///
/// Fails when the JSON is missing, does not match the schema, or repeats
/// an item id. Urgency scores outside 1..=10 are clamped.
/// Payment state is always reset: the model never decides it.
///
/// # Arguments
/// * `response` - the text part of the model reply
pub fn parse_detox_response(response: &str) -> Result<DetoxResponse, AnalysisError> {
    let json_str = extract_json(response)?;
    let mut parsed: DetoxResponse = serde_json::from_str(json_str)?;
    parsed.validate()?;
    for item in &mut parsed.items {
        item.is_paid = false;
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Visibility};

    // =============================================
    // extract_json
    // =============================================

    #[test]
    fn test_extract_json_with_block() {
        let response = "```json\n{\"summary\": \"x\", \"items\": []}\n```\n";
        let json = extract_json(response).unwrap();
        assert_eq!(json, "{\"summary\": \"x\", \"items\": []}");
    }

    #[test]
    fn test_extract_json_plain_fence() {
        let response = "```\n{\"summary\": \"x\", \"items\": []}\n```";
        assert!(extract_json(response).is_ok());
    }

    #[test]
    fn test_extract_json_rejects_surrounding_prose() {
        let response = "Sure! Here it is: {\"summary\":\"x\",\"items\":[]} Hope that helps";
        assert!(matches!(extract_json(response), Err(AnalysisError::Parse(_))));
        assert!(matches!(parse_detox_response(response), Err(AnalysisError::Parse(_))));
    }

    #[test]
    fn test_extract_json_rejects_prose_around_block() {
        let response = "Here you go:\n```json\n{\"summary\": \"x\", \"items\": []}\n```\nbye";
        assert!(matches!(extract_json(response), Err(AnalysisError::Parse(_))));
    }

    #[test]
    fn test_extract_json_unterminated_fence() {
        let response = "```json\n{\"summary\": \"x\", \"items\": []}";
        assert!(matches!(extract_json(response), Err(AnalysisError::Parse(_))));
    }

    #[test]
    fn test_extract_json_raw_object() {
        let response = r#"{"summary": "x", "items": []}"#;
        assert_eq!(extract_json(response).unwrap(), response);
    }

    #[test]
    fn test_extract_json_empty() {
        assert_eq!(extract_json("   "), Err(AnalysisError::EmptyResponse));
    }

    #[test]
    fn test_extract_json_no_object() {
        let result = extract_json("No JSON here, just plain text.");
        assert!(matches!(result, Err(AnalysisError::Parse(_))));
    }

    // =============================================
    // parse_detox_response
    // =============================================

    #[test]
    fn test_parse_full_response() {
        let response = r#"{
            "summary": "Found 2 documents, 1 urgent",
            "items": [
                {
                    "id": 1, "type": "Bill", "sender": "Power Co",
                    "extract_date": "2024-02-01", "deadline": "2024-03-15",
                    "amount": "€45.00", "urgency_score": 9, "category": "ACTION",
                    "action_suggested": "Pay by 15/03", "visibility": "High"
                },
                {
                    "id": 2, "type": "Flyer", "sender": "Pizza Place",
                    "urgency_score": 1, "category": "TRASH",
                    "action_suggested": "Throw away", "visibility": "Low"
                }
            ]
        }"#;

        let parsed = parse_detox_response(response).unwrap();
        assert_eq!(parsed.summary, "Found 2 documents, 1 urgent");
        assert_eq!(parsed.items.len(), 2);
        assert_eq!(parsed.items[0].category, Category::Action);
        assert_eq!(parsed.items[1].visibility, Some(Visibility::Low));
        assert_eq!(parsed.items[1].amount, None);
    }

    #[test]
    fn test_parse_zero_items() {
        let parsed = parse_detox_response(r#"{"summary": "Nothing found", "items": []}"#).unwrap();
        assert!(parsed.items.is_empty());
    }

    #[test]
    fn test_parse_missing_required_field() {
        // no "sender"
        let response = r#"{"summary": "s", "items": [
            {"id": 1, "type": "Bill", "urgency_score": 3, "category": "ACTION", "action_suggested": "Pay"}
        ]}"#;
        assert!(matches!(parse_detox_response(response), Err(AnalysisError::Parse(_))));
    }

    #[test]
    fn test_parse_missing_summary() {
        assert!(parse_detox_response(r#"{"items": []}"#).is_err());
    }

    #[test]
    fn test_parse_bad_enum() {
        let response = r#"{"summary": "s", "items": [
            {"id": 1, "type": "Bill", "sender": "A", "urgency_score": 3,
             "category": "ACTION", "action_suggested": "Pay", "visibility": "Blurry"}
        ]}"#;
        assert!(parse_detox_response(response).is_err());
    }

    #[test]
    fn test_parse_duplicate_ids() {
        let response = r#"{"summary": "s", "items": [
            {"id": 1, "type": "a", "sender": "A", "urgency_score": 3, "category": "TRASH", "action_suggested": "x"},
            {"id": 1, "type": "b", "sender": "B", "urgency_score": 4, "category": "TRASH", "action_suggested": "y"}
        ]}"#;
        let err = parse_detox_response(response).unwrap_err();
        assert_eq!(err, AnalysisError::Parse("duplicate item id 1".into()));
    }

    #[test]
    fn test_parse_clamps_urgency() {
        let response = r#"{"summary": "s", "items": [
            {"id": 1, "type": "a", "sender": "A", "urgency_score": 0, "category": "TRASH", "action_suggested": "x"},
            {"id": 2, "type": "b", "sender": "B", "urgency_score": 42, "category": "ACTION", "action_suggested": "y"},
            {"id": 3, "type": "c", "sender": "C", "urgency_score": -1, "category": "TRASH", "action_suggested": "z"},
            {"id": 4, "type": "d", "sender": "D", "urgency_score": 300, "category": "ACTION", "action_suggested": "w"},
            {"id": 5, "type": "e", "sender": "E", "urgency_score": 7, "category": "ARCHIVE", "action_suggested": "v"}
        ]}"#;
        let parsed = parse_detox_response(response).unwrap();
        let scores: Vec<u8> = parsed.items.iter().map(|i| i.urgency_score).collect();
        assert_eq!(scores, vec![1, 10, 1, 10, 7]);
    }

    #[test]
    fn test_parse_rejects_fractional_urgency() {
        let response = r#"{"summary": "s", "items": [
            {"id": 1, "type": "a", "sender": "A", "urgency_score": 7.5, "category": "TRASH", "action_suggested": "x"}
        ]}"#;
        assert!(matches!(parse_detox_response(response), Err(AnalysisError::Parse(_))));
    }

    #[test]
    fn test_parse_ignores_model_paid_flag() {
        let response = r#"{"summary": "s", "items": [
            {"id": 1, "type": "a", "sender": "A", "urgency_score": 5, "category": "ACTION",
             "action_suggested": "x", "isPaid": true}
        ]}"#;
        let parsed = parse_detox_response(response).unwrap();
        assert!(!parsed.items[0].is_paid);
    }

    #[test]
    fn test_parse_fenced_response() {
        let response = "```json\n{\"summary\": \"s\", \"items\": []}\n```";
        assert!(parse_detox_response(response).is_ok());
    }
}
