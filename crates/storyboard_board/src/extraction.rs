//! Pulling a JSON array out of model text.
//!
//! Schema-constrained responses are usually bare JSON, but models still wrap
//! output in markdown fences or lead with a sentence often enough that the
//! parser tolerates both.

use storyboard_error::{JsonError, StoryboardResult};

/// Extract the first JSON array from a response.
///
/// Candidates are tried in order and the first that parses as a JSON array
/// wins:
/// 1. Every `[ ... ]` inside a fenced code block (```json or bare ```)
/// 2. Every balanced `[ ... ]` in the whole response, respecting string literals
///
/// Prose may itself contain brackets ("the [3] scenes"), so a candidate that
/// fails to parse is skipped rather than returned.
///
/// # Errors
///
/// Returns a [`JsonError`] if no candidate is a JSON array.
pub fn extract_json_array(response: &str) -> StoryboardResult<String> {
    array_candidates(response)
        .into_iter()
        .find(|candidate| serde_json::from_str::<Vec<serde_json::Value>>(candidate).is_ok())
        .ok_or_else(|| {
            tracing::debug!(response_length = response.len(), "No JSON array found in response");
            JsonError::new(format!(
                "No JSON array found in response (length: {})",
                response.len()
            ))
            .into()
        })
}

/// Parse a response into a list of strings.
///
/// The first candidate array whose items are all strings is returned.
///
/// # Errors
///
/// Returns a [`JsonError`] if no array is found or none is an array of
/// strings.
///
/// # Examples
///
/// ```
/// use storyboard_board::parse_string_list;
///
/// let scenes = parse_string_list("Sure:\n```json\n[\"one\", \"two\"]\n```").unwrap();
/// assert_eq!(scenes, vec!["one", "two"]);
///
/// let scenes = parse_string_list("Here are the [2] scenes: [\"one\", \"two\"]").unwrap();
/// assert_eq!(scenes, vec!["one", "two"]);
/// ```
pub fn parse_string_list(response: &str) -> StoryboardResult<Vec<String>> {
    let candidates = array_candidates(response);
    if let Some(list) = candidates
        .iter()
        .find_map(|candidate| serde_json::from_str::<Vec<String>>(candidate).ok())
    {
        return Ok(list);
    }

    let preview = response.chars().take(100).collect::<String>();
    tracing::debug!(
        candidates = candidates.len(),
        response_preview = %preview,
        "No string list in response"
    );
    Err(JsonError::new(format!(
        "Failed to parse scene list from {} candidate(s) (response: {}...)",
        candidates.len(),
        preview
    ))
    .into())
}

fn array_candidates(response: &str) -> Vec<String> {
    let mut candidates = Vec::new();
    if let Some(block) = extract_from_code_block(response) {
        candidates.extend(balanced_arrays(&block));
    }
    candidates.extend(balanced_arrays(response));
    candidates
}

fn balanced_arrays(text: &str) -> Vec<String> {
    text.match_indices('[')
        .filter_map(|(start, _)| extract_balanced(text, start, '[', ']'))
        .collect()
}

fn extract_from_code_block(response: &str) -> Option<String> {
    let start = response.find("```")?;
    let content_start = start + 3;
    let skip_to = response[content_start..]
        .find('\n')
        .map(|n| content_start + n + 1)
        .unwrap_or(content_start);

    match response[skip_to..].find("```") {
        Some(end) => Some(response[skip_to..skip_to + end].trim().to_string()),
        // Unclosed fence, likely a truncated response
        None => Some(response[skip_to..].trim().to_string()),
    }
}

fn extract_balanced(response: &str, start: usize, open: char, close: char) -> Option<String> {
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + c.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}
