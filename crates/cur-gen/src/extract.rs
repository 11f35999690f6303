//! Markdown code-fence extraction for LLM output.
//!
//! Models are asked for bare JSON or a single code block, but routinely
//! wrap responses in fences anyway. These helpers peel one layer of
//! fencing and otherwise pass text through untouched.

/// Strip a single wrapping code fence (with optional language tag) from a
/// whole response. Used for JSON payloads.
#[must_use]
pub fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag line, if any.
    let body = rest.find('\n').map_or("", |idx| &rest[idx + 1..]);
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Extract the first fenced code block from a response, preferring a block
/// tagged with `lang`. Returns the trimmed full text when no fence exists.
#[must_use]
pub fn extract_code_block(text: &str, lang: &str) -> String {
    let trimmed = text.trim();
    let tagged = format!("```{lang}");

    let start = trimmed.find(&tagged).map(|idx| idx + tagged.len()).or_else(|| {
        trimmed.find("```").map(|idx| {
            let after = idx + 3;
            // Skip an unknown language tag line.
            trimmed[after..]
                .find('\n')
                .map_or(trimmed.len(), |nl| after + nl + 1)
        })
    });

    let Some(start) = start else {
        return trimmed.to_string();
    };
    match trimmed[start..].find("```") {
        Some(end) => trimmed[start..start + end].trim().to_string(),
        None => trimmed[start..].trim().to_string(),
    }
}
