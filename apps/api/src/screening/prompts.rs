// LLM prompt templates for the screening tools.

/// Interview question prompt. Replace `{role}` and `{years_experience}` before sending.
pub const INTERVIEW_QUESTIONS_PROMPT_TEMPLATE: &str = "\
Generate exactly 5 technical interview questions for a {role} position \
requiring {years_experience} years of experience. \
Number them 1 to 5, one question per line. \
Return only the questions, with no introduction or closing remarks.";

/// Resume match prompt. Replace `{resume_text}` and `{job_description}` before sending.
pub const RESUME_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze how well the following resume matches the job description.
Score the match from 0 to 100.

Respond with a JSON object using exactly these keys:
{
  "score": 85,
  "strengths": ["up to 3 short strengths"],
  "weaknesses": ["up to 3 short weaknesses"],
  "recommendation": "one short hiring recommendation"
}

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}"#;

/// Substitutes `{placeholder}` keys in a single left-to-right pass, so text
/// inserted for one key is never rescanned for another.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut filled = String::with_capacity(template.len());
    let mut rest = template;

    while let Some((pos, key, value)) = values
        .iter()
        .filter_map(|(key, value)| rest.find(key).map(|pos| (pos, *key, *value)))
        .min_by_key(|(pos, _, _)| *pos)
    {
        filled.push_str(&rest[..pos]);
        filled.push_str(value);
        rest = &rest[pos + key.len()..];
    }

    filled.push_str(rest);
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_replaces_every_occurrence() {
        let filled = fill_template("{a} and {b} and {a}", &[("{a}", "x"), ("{b}", "y")]);
        assert_eq!(filled, "x and y and x");
    }

    #[test]
    fn test_inserted_text_is_not_rescanned() {
        let filled = fill_template(
            "role={role} years={years}",
            &[("{role}", "Engineer {years}"), ("{years}", "7")],
        );
        assert_eq!(filled, "role=Engineer {years} years=7");
    }

    #[test]
    fn test_template_without_keys_is_unchanged() {
        assert_eq!(fill_template("{\"score\": 85}", &[("{role}", "x")]), "{\"score\": 85}");
    }
}
