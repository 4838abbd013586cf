//! Resume vs job description match analysis.
//!
//! The model is asked for JSON but usually wraps it in prose, so the object is
//! cut out of the reply (first `{` through last `}`) before parsing. The parsed
//! object must then match the expected schema exactly; anything else is an
//! extraction failure and the caller gets the fixed fallback analysis.

use serde::Deserialize;
use tracing::warn;

use crate::chat::fallback::fallback_resume_analysis;
use crate::chat::AiService;
use crate::screening::prompts::{fill_template, RESUME_ANALYSIS_PROMPT_TEMPLATE};
use crate::screening::{ExtractionError, ResumeAnalysisResult};

const MAX_LIST_ITEMS: usize = 3;

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    score: f64,
    strengths: Vec<String>,
    weaknesses: Vec<String>,
    recommendation: String,
}

pub async fn analyze_resume(
    ai: &AiService,
    resume_text: &str,
    job_description: &str,
) -> ResumeAnalysisResult {
    let prompt = fill_template(
        RESUME_ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("{resume_text}", resume_text),
            ("{job_description}", job_description),
        ],
    );

    let reply = match ai.complete(&prompt, None).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Resume analysis call failed: {e}");
            return fallback_resume_analysis();
        }
    };

    parse_analysis(&reply).unwrap_or_else(|e| {
        warn!("Resume analysis extraction failed: {e}");
        fallback_resume_analysis()
    })
}

/// Greedy span from the first `{` to the last `}`.
pub fn extract_json_object(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (end > start).then(|| &reply[start..=end])
}

pub fn parse_analysis(reply: &str) -> Result<ResumeAnalysisResult, ExtractionError> {
    let json = extract_json_object(reply).ok_or(ExtractionError::NoJsonObject)?;
    let raw: RawAnalysis = serde_json::from_str(json)?;

    if !raw.score.is_finite() {
        return Err(ExtractionError::InvalidScore);
    }

    Ok(ResumeAnalysisResult {
        score: raw.score.round().clamp(0.0, 100.0) as u8,
        strengths: truncate(raw.strengths),
        weaknesses: truncate(raw.weaknesses),
        recommendation: raw.recommendation,
    })
}

fn truncate(mut items: Vec<String>) -> Vec<String> {
    items.truncate(MAX_LIST_ITEMS);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::test_support::{service, StubProvider};

    const EMBEDDED_REPLY: &str = "Here is the result: {\"score\": 82, \"strengths\": [\"x\"], \"weaknesses\": [\"y\"], \"recommendation\": \"Hire\"} Thanks.";

    #[test]
    fn test_extracts_object_from_surrounding_prose() {
        let analysis = parse_analysis(EMBEDDED_REPLY).unwrap();
        assert_eq!(analysis.score, 82);
        assert_eq!(analysis.strengths, vec!["x".to_string()]);
        assert_eq!(analysis.weaknesses, vec!["y".to_string()]);
        assert_eq!(analysis.recommendation, "Hire");
    }

    #[test]
    fn test_extract_is_greedy_to_last_brace() {
        let reply = "a {\"k\": {\"nested\": 1}} b";
        assert_eq!(extract_json_object(reply), Some("{\"k\": {\"nested\": 1}}"));
    }

    #[test]
    fn test_no_braces_is_no_object() {
        assert!(extract_json_object("no json here").is_none());
        assert!(extract_json_object("} backwards {").is_none());
        assert!(matches!(
            parse_analysis("The candidate looks great!"),
            Err(ExtractionError::NoJsonObject)
        ));
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(matches!(
            parse_analysis("{score: eighty}"),
            Err(ExtractionError::Json(_))
        ));
    }

    #[test]
    fn test_score_is_clamped() {
        let high = r#"{"score": 140, "strengths": [], "weaknesses": [], "recommendation": "Hire"}"#;
        assert_eq!(parse_analysis(high).unwrap().score, 100);

        let low = r#"{"score": -12, "strengths": [], "weaknesses": [], "recommendation": "Pass"}"#;
        assert_eq!(parse_analysis(low).unwrap().score, 0);

        let fractional = r#"{"score": 77.6, "strengths": [], "weaknesses": [], "recommendation": "Hire"}"#;
        assert_eq!(parse_analysis(fractional).unwrap().score, 78);
    }

    #[test]
    fn test_non_numeric_score_is_rejected() {
        let reply = r#"{"score": "82", "strengths": [], "weaknesses": [], "recommendation": "Hire"}"#;
        assert!(parse_analysis(reply).is_err());
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let reply = r#"{"score": 82, "strengths": ["x"], "recommendation": "Hire"}"#;
        assert!(parse_analysis(reply).is_err());
    }

    #[test]
    fn test_lists_truncated_to_three() {
        let reply = r#"{"score": 60, "strengths": ["a","b","c","d"], "weaknesses": ["e","f","g","h","i"], "recommendation": "Maybe"}"#;
        let analysis = parse_analysis(reply).unwrap();
        assert_eq!(analysis.strengths, vec!["a", "b", "c"]);
        assert_eq!(analysis.weaknesses.len(), 3);
    }

    #[tokio::test]
    async fn test_reply_without_braces_returns_exact_fallback() {
        let ai = service(StubProvider::Reply("Strong candidate overall.".into()));
        let analysis = analyze_resume(&ai, "resume", "job").await;
        assert_eq!(
            serde_json::to_string(&analysis).unwrap(),
            serde_json::to_string(&fallback_resume_analysis()).unwrap()
        );
    }

    #[tokio::test]
    async fn test_embedded_json_reply_is_parsed() {
        let ai = service(StubProvider::Reply(EMBEDDED_REPLY.into()));
        let analysis = analyze_resume(&ai, "resume", "job").await;
        assert_eq!(analysis.score, 82);
        assert_eq!(analysis.strengths, vec!["x".to_string()]);
    }

    #[tokio::test]
    async fn test_dispatch_failure_returns_fallback() {
        let ai = service(StubProvider::Fail);
        assert_eq!(
            analyze_resume(&ai, "resume", "job").await,
            fallback_resume_analysis()
        );
    }

    #[tokio::test]
    async fn test_prompt_schema_example_is_parseable() {
        let ai = service(StubProvider::Echo);
        // Echo returns the prompt itself, which contains the schema example.
        let analysis = analyze_resume(&ai, "Ten years of Rust", "Senior Rust role").await;
        assert_eq!(analysis.score, 85);
    }
}
