//! Prompt templates for the generation, review, and fix round-trips.
//!
//! Each template embeds the structured context the model needs and pins the
//! response format (JSON or a single code block) so the parsers in `cur-gen`
//! have a stable shape to work against.

use std::fmt::Write as _;

use cur_core::{AppIdea, Issue};

/// How many existing app names are listed verbatim in the idea prompt
/// before truncating to a count.
const EXISTING_APPS_SHOWN: usize = 10;

/// System prompt for idea generation. Pins the JSON response schema.
#[must_use]
pub fn idea_system_prompt() -> String {
    r#"You are an expert AI/ML application architect specializing in AWS services.
Your task is to generate unique, practical, and innovative AI application ideas.

Key requirements:
- Ideas must be unique and not duplicate existing applications
- Must leverage AWS services effectively (Bedrock, SageMaker, Lambda, etc.)
- Must be practical and implementable
- Should solve real-world problems
- Return response in JSON format only, no additional text

JSON schema:
{
    "name": "Application name (concise, descriptive, 3-6 words)",
    "description": "2-3 sentence description of what the app does and its value",
    "features": ["feature1", "feature2", "feature3", ...],
    "aws_services": ["bedrock", "lambda", "s3", ...],
    "use_case": "Primary use case or target audience",
    "difficulty": "beginner|intermediate|advanced",
    "frameworks": ["streamlit", "fastapi", "langchain", ...]
}"#
        .to_string()
}

/// User prompt for one idea request.
///
/// `existing_apps` are the names already in the target category; the first
/// few are listed verbatim to steer the model away from duplicates.
#[must_use]
pub fn idea_prompt(
    category: &str,
    preferred_services: &[String],
    existing_apps: &[String],
    total_apps: usize,
) -> String {
    let mut existing = existing_apps
        .iter()
        .take(EXISTING_APPS_SHOWN)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if existing_apps.len() > EXISTING_APPS_SHOWN {
        let _ = write!(
            existing,
            ", and {} more...",
            existing_apps.len() - EXISTING_APPS_SHOWN
        );
    }

    format!(
        r"Generate a unique AI application idea for the category: {category}

Context:
- Preferred AWS services: {services}
- Existing apps in this category: {existing_count}
- Total apps in repository: {total_apps}

Avoid duplicating these existing apps:
{existing}

Generate a creative, unique idea that:
1. Uses AWS services in innovative ways (especially the preferred services)
2. Solves a practical, real-world problem
3. Is completely different from existing applications
4. Is implementable with modern AI/ML frameworks
5. Provides clear value to users

Return ONLY the JSON response, no markdown formatting or additional text.",
        services = preferred_services.join(", "),
        existing_count = existing_apps.len(),
    )
}

/// System prompt for application code generation.
#[must_use]
pub fn code_system_prompt() -> String {
    r"You are an expert Python developer specializing in AWS and AI/ML applications.
Your task is to generate clean, production-ready, well-documented Python code.

Requirements:
- Write Python 3.10+ code following PEP 8 style guidelines
- Include comprehensive error handling
- Add clear docstrings and comments
- Use type hints where appropriate
- Follow AWS best practices and security guidelines
- Make code modular and maintainable
- Include environment variable configuration
- Never hardcode credentials or secrets"
        .to_string()
}

/// User prompt for the main application file.
#[must_use]
pub fn app_code_prompt(idea: &AppIdea) -> String {
    format!(
        r"Generate a complete Python application for: {name}

Description: {description}

Features to implement:
{features}

AWS Services to use:
{services}

Requirements:
1. Create a main application file using {framework} for the UI
2. Use boto3 for AWS service integration
3. Include proper error handling and logging
4. Add configuration management using environment variables
5. Make the code production-ready and secure
6. Include inline comments explaining key logic
7. Follow AWS SDK best practices

Return ONLY the Python code in a single code block, no markdown headers or explanations.",
        name = idea.name,
        description = idea.description,
        features = bullet_list(&idea.features),
        services = bullet_list(&idea.aws_services),
        framework = idea.primary_framework(),
    )
}

/// User prompt for the per-app README.
#[must_use]
pub fn readme_prompt(idea: &AppIdea) -> String {
    format!(
        r"Generate a comprehensive README.md file for: {name}

Application details:
- Description: {description}
- AWS Services: {services}
- Use Case: {use_case}
- Difficulty: {difficulty}

The README should include:
1. Title and brief description
2. Features list
3. Prerequisites (AWS account, Python version, etc.)
4. Installation instructions
5. Configuration (environment variables needed)
6. Usage instructions with examples
7. AWS Setup guide (what resources to create)
8. Cost considerations
9. Troubleshooting section
10. License (MIT)

Use clear markdown formatting with proper headings, code blocks, and emoji where appropriate.
Return the complete README content.",
        name = idea.name,
        description = idea.description,
        services = idea.aws_services.join(", "),
        use_case = idea.use_case,
        difficulty = idea.difficulty,
    )
}

/// User prompt for the CloudFormation template.
#[must_use]
pub fn cloudformation_prompt(idea: &AppIdea) -> String {
    format!(
        r"Generate a CloudFormation template (YAML) for deploying: {name}

AWS Services to provision:
{services}

The template should:
1. Define all necessary AWS resources
2. Use parameters for configurable values
3. Include outputs for important resource identifiers
4. Follow CloudFormation best practices
5. Include IAM roles and policies with least privilege
6. Add resource tags for organization
7. Include descriptions for parameters and resources

Return ONLY the YAML CloudFormation template, no additional text.",
        name = idea.name,
        services = bullet_list(&idea.aws_services),
    )
}

/// System prompt for review passes.
#[must_use]
pub fn review_system_prompt() -> String {
    r"You are an expert code reviewer specializing in Python, AWS, and security.
Analyze code for bugs, security issues, best practice violations, and potential improvements."
        .to_string()
}

/// User prompt for reviewing one source file. Pins the JSON issue schema.
#[must_use]
pub fn review_prompt(file_path: &str, code: &str) -> String {
    format!(
        r#"Review this Python code from {file_path}:

```python
{code}
```

Analyze for:
1. Bugs and logic errors
2. Security vulnerabilities (hardcoded secrets, injection risks, etc.)
3. AWS best practices violations
4. Error handling issues
5. Performance problems
6. Code quality issues

Return a JSON array of issues found:
[
    {{
        "severity": "critical|high|medium|low",
        "type": "bug|security|performance|style",
        "line": line_number,
        "issue": "description of the issue",
        "suggestion": "how to fix it"
    }},
    ...
]

If no issues found, return an empty array: []"#
    )
}

/// User prompt for fixing a file. All actionable issues go into one
/// round trip.
#[must_use]
pub fn fix_prompt(code: &str, issues: &[Issue]) -> String {
    let mut listing = String::new();
    for (index, issue) in issues.iter().enumerate() {
        let _ = writeln!(
            listing,
            "{n}. [{severity}] {description} (line: {line}) — suggested fix: {suggestion}",
            n = index + 1,
            severity = issue.severity.as_str(),
            description = issue.description,
            line = issue
                .line
                .map_or_else(|| "unknown".to_string(), |l| l.to_string()),
            suggestion = issue.suggestion,
        );
    }

    format!(
        r"Fix the following issues in this code:

{listing}
Original code:
```python
{code}
```

Apply every fix. Return ONLY the corrected code, no explanations or markdown headers."
    )
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
