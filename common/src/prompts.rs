//! Prompt and response schema
//!
//! Shared by the CLI and the Web (WASM) client:
//! - SYSTEM_INSTRUCTION: the desk-detox task description
//! - USER_PROMPT: the short per-image request
//! - response_schema: the structured-output schema Gemini must follow

use serde_json::{json, Value};

/// Fixed system instruction sent with every analysis
pub const SYSTEM_INSTRUCTION: &str = r#"You are "Desk Detox AI", an ultra-efficient virtual executive assistant specialised in document management and mail triage.

GOAL:
Analyse a photo of a cluttered desk covered with documents, envelopes and sheets of paper. Identify every single visible document, extract its key data and decide what to do with it.

ANALYSIS STEPS:
1. Scan the image for distinct documents (bills, letters, notes, flyers).
2. For each document, read the visible text (sender, dates, amounts).
3. Classify each one into exactly one of these categories:
   - "ACTION": needs an action (pay, call, sign).
   - "ARCHIVE": important to keep but without deadlines (contracts, medical reports).
   - "TRASH": advertising, empty envelopes, useless items.

CRITICAL RULES:
- DATE FORMAT: every date (extract_date, deadline) MUST use the ISO format "YYYY-MM-DD" (e.g. 2023-11-25). If no date is present, use "N/A".
- If a date is ambiguous, assume the nearest one in the future.
- If you recognise a well-known logo, use it to identify the sender.
- If a document is too covered to be read, put "review_needed" in action_suggested and set visibility to "Low".
- Number the items with unique integer ids starting from 1.
- Never invent data that is not visible."#;

/// Per-image user prompt
pub const USER_PROMPT: &str = "Analyse this desk and extract the data of the documents.";

/// Allowed `category` values
pub const CATEGORY_VALUES: &[&str] = &["ACTION", "ARCHIVE", "TRASH"];

/// Allowed `visibility` values
pub const VISIBILITY_VALUES: &[&str] = &["High", "Medium", "Low"];

/// Structured-output schema for `generationConfig.responseSchema`
///
/// `summary` and `items` are required; each item requires
/// `id, type, sender, urgency_score, category, action_suggested`.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "Short summary sentence (e.g. Found 3 documents, 1 of them urgent)"
            },
            "items": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "INTEGER" },
                        "type": {
                            "type": "STRING",
                            "description": "Document kind (Bill, Letter, Flyer, Note)"
                        },
                        "sender": {
                            "type": "STRING",
                            "description": "Sender name (e.g. Power Co, Bank, Unknown)"
                        },
                        "extract_date": {
                            "type": "STRING",
                            "description": "Detected date as YYYY-MM-DD or 'N/A'"
                        },
                        "deadline": {
                            "type": "STRING",
                            "description": "Due date if present as YYYY-MM-DD or 'N/A'"
                        },
                        "amount": {
                            "type": "STRING",
                            "description": "Amount due if present (e.g. €45.00), or null",
                            "nullable": true
                        },
                        "urgency_score": {
                            "type": "INTEGER",
                            "description": "Urgency 1-10 (10 = due today/tomorrow, 1 = rubbish)"
                        },
                        "category": { "type": "STRING", "enum": CATEGORY_VALUES },
                        "action_suggested": {
                            "type": "STRING",
                            "description": "Short sentence (e.g. Pay by 15/11)"
                        },
                        "visibility": {
                            "type": "STRING",
                            "enum": VISIBILITY_VALUES,
                            "description": "How legible the document is"
                        }
                    },
                    "required": ["id", "type", "sender", "urgency_score", "category", "action_suggested"]
                }
            }
        },
        "required": ["summary", "items"]
    })
}
