//! Built-in category and AWS service catalogs.
//!
//! Used when no catalog is provided via config files. The sets mirror the
//! areas the target repository curates.

use cur_core::{AwsService, Category};

/// Default application categories.
#[must_use]
pub fn default_categories() -> Vec<Category> {
    let entries = [
        (
            "bedrock_ai_agents",
            "AI agents using AWS Bedrock foundation models",
            3,
        ),
        (
            "serverless_ai_apps",
            "Serverless AI applications using Lambda and API Gateway",
            2,
        ),
        (
            "rag_on_aws",
            "RAG applications with AWS services (Bedrock, OpenSearch, S3)",
            3,
        ),
        (
            "sagemaker_ml_apps",
            "ML applications using Amazon SageMaker",
            2,
        ),
        (
            "realtime_ai_streaming",
            "Real-time AI with Kinesis and Lambda",
            1,
        ),
        (
            "multimodal_ai",
            "Multimodal AI with Bedrock (text, image, video)",
            2,
        ),
    ];
    entries
        .into_iter()
        .map(|(name, description, priority)| Category {
            name: name.to_string(),
            description: description.to_string(),
            priority,
        })
        .collect()
}

/// Default AWS service catalog.
#[must_use]
pub fn default_aws_services() -> Vec<AwsService> {
    let entries: [(&str, &str, &[&str], u32); 9] = [
        ("bedrock", "Amazon Bedrock", &["LLM inference", "RAG", "Agents"], 3),
        ("lambda", "AWS Lambda", &["Serverless compute", "API backends"], 3),
        (
            "sagemaker",
            "Amazon SageMaker",
            &["Model training", "Model deployment", "Endpoints"],
            2,
        ),
        (
            "s3",
            "Amazon S3",
            &["Document storage", "Model artifacts", "Data lake"],
            3,
        ),
        (
            "dynamodb",
            "Amazon DynamoDB",
            &["Session storage", "Vector DB", "Metadata"],
            2,
        ),
        (
            "opensearch",
            "Amazon OpenSearch",
            &["Vector search", "RAG", "Semantic search"],
            2,
        ),
        (
            "api_gateway",
            "Amazon API Gateway",
            &["REST APIs", "WebSocket APIs"],
            2,
        ),
        (
            "eventbridge",
            "Amazon EventBridge",
            &["Event-driven architecture", "Scheduling"],
            1,
        ),
        (
            "kinesis",
            "Amazon Kinesis",
            &["Real-time streaming", "Data pipelines"],
            1,
        ),
    ];
    entries
        .into_iter()
        .map(|(key, name, use_cases, priority)| AwsService {
            key: key.to_string(),
            name: name.to_string(),
            use_cases: use_cases.iter().map(ToString::to_string).collect(),
            priority,
        })
        .collect()
}
