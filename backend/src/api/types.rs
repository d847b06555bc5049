//! REST API request and response types.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::InputResult;
use crate::parser::parse_group_size;
use crate::transform::pipeline::{GenerateResult, GenerateStats};

/// Group size as sent by a client: a JSON number or the raw text of a form
/// field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawGroupSize {
    Number(i64),
    Text(String),
}

impl RawGroupSize {
    /// Resolve to an integer; text goes through [`parse_group_size`].
    pub fn resolve(&self) -> InputResult<i64> {
        match self {
            RawGroupSize::Number(m) => Ok(*m),
            RawGroupSize::Text(raw) => parse_group_size(raw),
        }
    }
}

/// Body of `POST /api/generate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Multi-line input text
    pub text: String,
    /// Group size
    pub m: RawGroupSize,
}

/// Response sent after a successful run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    /// Unique request identifier
    pub request_id: String,

    /// Always "ok"
    pub status: String,

    /// Rearranged text
    pub output: String,

    /// Run statistics
    pub metadata: ResponseMetadata,
}

/// Statistics about the run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub encoding: String,
    pub input_lines: usize,
    pub non_empty_lines: usize,
    pub groups: usize,
    pub output_lines: usize,
}

impl From<GenerateStats> for ResponseMetadata {
    fn from(stats: GenerateStats) -> Self {
        ResponseMetadata {
            encoding: stats.encoding,
            input_lines: stats.input_lines,
            non_empty_lines: stats.non_empty_lines,
            groups: stats.groups,
            output_lines: stats.output_lines,
        }
    }
}

impl From<GenerateResult> for GenerateResponse {
    fn from(result: GenerateResult) -> Self {
        GenerateResponse {
            request_id: Uuid::new_v4().to_string(),
            status: "ok".to_string(),
            output: result.output,
            metadata: result.stats.into(),
        }
    }
}

/// Create an error response carrying the human-readable reason
pub fn error_response(error: &str) -> Value {
    json!({
        "requestId": Uuid::new_v4().to_string(),
        "status": "error",
        "error": error,
        "output": ""
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;

    #[test]
    fn test_raw_group_size_number_or_text() {
        let req: GenerateRequest = serde_json::from_value(json!({ "text": "a", "m": 3 })).unwrap();
        assert_eq!(req.m, RawGroupSize::Number(3));
        assert_eq!(req.m.resolve().unwrap(), 3);

        let req: GenerateRequest = serde_json::from_value(json!({ "text": "a", "m": " 4 " })).unwrap();
        assert_eq!(req.m.resolve().unwrap(), 4);
    }

    #[test]
    fn test_raw_group_size_bad_text() {
        let m = RawGroupSize::Text("abc".into());
        assert!(matches!(m.resolve(), Err(InputError::InvalidGroupSize(_))));
        let m = RawGroupSize::Text(String::new());
        assert!(matches!(m.resolve(), Err(InputError::MissingGroupSize)));
    }

    #[test]
    fn test_response_camel_case() {
        let result = GenerateResult {
            output: "1\n2\n".into(),
            stats: GenerateStats {
                encoding: "utf-8".into(),
                input_lines: 2,
                non_empty_lines: 2,
                groups: 1,
                output_lines: 3,
            },
        };
        let json = serde_json::to_value(GenerateResponse::from(result)).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["output"], "1\n2\n");
        assert_eq!(json["metadata"]["nonEmptyLines"], 2);
        assert_eq!(json["metadata"]["outputLines"], 3);
        assert!(json["requestId"].is_string());
    }

    #[test]
    fn test_error_response() {
        let body = error_response("M must be greater than 1");
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"], "M must be greater than 1");
        assert_eq!(body["output"], "");
    }
}
