use crate::domain::entities::decision::DecisionDraft;
use crate::domain::error::DomainError;

/// Pull the JSON object out of free-form model output.
///
/// Takes everything from the first `{` to the last `}`; without braces,
/// falls back to the contents of a markdown code fence.
pub fn extract_json_block(text: &str) -> &str {
    let text = text.trim();
    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            return &text[start..=end];
        }
    }
    if let Some((_, rest)) = text.split_once("```json") {
        return rest.split("```").next().unwrap_or(rest).trim();
    }
    let mut fenced = text.split("```");
    if text.matches("```").count() >= 2 {
        if let Some(inner) = fenced.nth(1) {
            return inner.trim();
        }
    }
    text
}

/// Decode reasoning output into an untrusted draft.
pub fn parse_draft(text: &str) -> Result<DecisionDraft, DomainError> {
    let block = extract_json_block(text);
    DecisionDraft::from_json(block).map_err(DomainError::Parse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::chip::Chip;

    #[test]
    fn test_extract_plain_object() {
        assert_eq!(extract_json_block(r#"{"a": 1}"#), r#"{"a": 1}"#);
    }

    #[test]
    fn test_extract_after_reasoning_text() {
        let text = "Step 1: Salah is injured.\nStep 2: ...\n```json\n{\"chip\": \"none\", \"x\": {\"y\": 1}}\n```\nDone.";
        assert_eq!(
            extract_json_block(text),
            "{\"chip\": \"none\", \"x\": {\"y\": 1}}"
        );
    }

    #[test]
    fn test_extract_without_braces_uses_fence() {
        assert_eq!(extract_json_block("```json\nnull\n```"), "null");
        assert_eq!(extract_json_block("```\n[]\n```"), "[]");
        assert_eq!(extract_json_block("nothing here"), "nothing here");
    }

    #[test]
    fn test_parse_draft_from_model_output() {
        let text = r#"Reasoning first.
{
  "transfers": [{"element_out": 5, "element_in": 201}],
  "captain_id": 13,
  "vice_captain_id": null,
  "chip": "Free Hit",
  "lineup_order": null,
  "reasoning": "Cover the blank"
}"#;
        let draft = parse_draft(text).unwrap();
        assert_eq!(draft.transfers.len(), 1);
        assert_eq!(draft.chip, Chip::FreeHit);
        assert_eq!(draft.vice_captain_id, None);
    }

    #[test]
    fn test_parse_draft_errors_are_parse_errors() {
        assert!(matches!(parse_draft("no json"), Err(DomainError::Parse(_))));
        assert!(matches!(
            parse_draft(r#"{"chip": "double_up"}"#),
            Err(DomainError::Parse(_))
        ));
    }
}
