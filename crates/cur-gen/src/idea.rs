//! Idea generation: one completion call per slot, parsed and validated.

use cur_core::{AppIdea, uniqueness_key};
use cur_llm::{Completion, CompletionRequest, prompts};
use serde::Deserialize;

use crate::{GenError, extract::strip_fences};

const IDEA_MAX_TOKENS: u32 = 2048;
const IDEA_TEMPERATURE: f32 = 0.8;

/// Everything the idea pass needs to know about the current gallery.
#[derive(Debug, Clone, Default)]
pub struct IdeaContext {
    /// Target category name.
    pub category: String,
    /// Services the idea should lean on.
    pub services: Vec<String>,
    /// App names already in the target category.
    pub existing_in_category: Vec<String>,
    /// All app names across categories, for similarity checks.
    pub all_names: Vec<String>,
    /// All registered uniqueness keys.
    pub known_keys: Vec<String>,
    /// Total registered apps.
    pub total_apps: usize,
}

/// Generates one validated, non-duplicate [`AppIdea`] per call.
pub struct IdeaGenerator<'a, C> {
    llm: &'a C,
}

// The idea schema the model returns has no category; it is filled from
// the selection context after parsing.
#[derive(Deserialize)]
struct RawIdea {
    name: String,
    description: String,
    #[serde(default)]
    features: Vec<String>,
    #[serde(default)]
    aws_services: Vec<String>,
    #[serde(default)]
    use_case: String,
    #[serde(default = "default_difficulty")]
    difficulty: String,
    #[serde(default)]
    frameworks: Vec<String>,
}

fn default_difficulty() -> String {
    "intermediate".to_string()
}

impl<'a, C: Completion> IdeaGenerator<'a, C> {
    pub const fn new(llm: &'a C) -> Self {
        Self { llm }
    }

    /// Request one idea and validate it against the known gallery.
    ///
    /// Makes exactly one completion call. A malformed or incomplete
    /// response is an error, not a retry.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Llm`] on transport or provider failure,
    /// [`GenError::Parse`] when the response is not a usable idea, and
    /// [`GenError::Duplicate`] when the idea collides with a registered app.
    pub async fn generate(&self, context: &IdeaContext) -> Result<AppIdea, GenError> {
        let request = CompletionRequest::new(prompts::idea_prompt(
            &context.category,
            &context.services,
            &context.existing_in_category,
            context.total_apps,
        ))
        .with_system(prompts::idea_system_prompt())
        .with_max_tokens(IDEA_MAX_TOKENS)
        .with_temperature(IDEA_TEMPERATURE);

        let response = self.llm.complete(request).await?;
        let raw: RawIdea = serde_json::from_str(strip_fences(&response))
            .map_err(|error| GenError::Parse(format!("idea response is not valid JSON: {error}")))?;

        let idea = AppIdea {
            name: raw.name,
            description: raw.description,
            features: raw.features,
            aws_services: raw.aws_services,
            use_case: raw.use_case,
            difficulty: raw.difficulty,
            frameworks: raw.frameworks,
            category: context.category.clone(),
        };
        validate(&idea)?;
        check_uniqueness(&idea, context)?;

        tracing::info!(name = %idea.name, category = %idea.category, "idea generated");
        Ok(idea)
    }
}

fn validate(idea: &AppIdea) -> Result<(), GenError> {
    let missing = [
        ("name", idea.name.trim().is_empty()),
        ("description", idea.description.trim().is_empty()),
        ("use_case", idea.use_case.trim().is_empty()),
        ("features", idea.features.is_empty()),
        ("aws_services", idea.aws_services.is_empty()),
    ]
    .into_iter()
    .find_map(|(field, empty)| empty.then_some(field));
    match missing {
        Some(field) => Err(GenError::Parse(format!("idea is missing required field '{field}'"))),
        None => Ok(()),
    }
}

fn check_uniqueness(idea: &AppIdea, context: &IdeaContext) -> Result<(), GenError> {
    let key = uniqueness_key(&idea.category, &idea.name);
    if context.known_keys.iter().any(|known| known == &key) {
        return Err(GenError::Duplicate { key });
    }
    if context.all_names.iter().any(|name| too_similar(name, &idea.name)) {
        return Err(GenError::Duplicate { key });
    }
    Ok(())
}

/// Names match when equal ignoring case, or when one contains the other
/// and both are long enough that containment is not coincidental.
fn too_similar(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    if a == b {
        return true;
    }
    a.len() > 5 && b.len() > 5 && (a.contains(&b) || b.contains(&a))
}
