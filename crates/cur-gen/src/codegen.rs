//! Application file-set generation.
//!
//! Three artifacts come from the model (app code, README, CloudFormation
//! template); the rest are deterministic templates. A model response that
//! fails to parse falls back to a deterministic stub so a committed app is
//! always complete; transport, provider, and rate-limit errors propagate.

use std::fmt::Write as _;

use chrono::Utc;
use cur_core::{AppIdea, GeneratedApplication, slug};
use cur_llm::{Completion, CompletionRequest, LlmError, prompts};

use crate::GenError;
use crate::extract::extract_code_block;

const CODE_MAX_TOKENS: u32 = 4096;
const CODE_TEMPERATURE: f32 = 0.3;
const README_MAX_TOKENS: u32 = 2048;
const README_TEMPERATURE: f32 = 0.5;

/// Produces the full file set for one [`AppIdea`].
pub struct CodeGenerator<'a, C> {
    llm: &'a C,
}

impl<'a, C: Completion> CodeGenerator<'a, C> {
    pub const fn new(llm: &'a C) -> Self {
        Self { llm }
    }

    /// Generate every file for the application, in commit order:
    /// code first, then docs, then infrastructure.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Llm`] when a completion call fails for any
    /// reason other than an unparseable response.
    pub async fn generate(&self, idea: &AppIdea) -> Result<GeneratedApplication, GenError> {
        tracing::info!(name = %idea.name, "generating application files");

        let app_code = self.generate_app_code(idea).await?;
        let readme = self.generate_readme(idea).await?;
        let template = self.generate_cloudformation(idea).await?;

        let files = vec![
            ("app.py".to_string(), app_code),
            ("requirements.txt".to_string(), requirements(idea)),
            ("README.md".to_string(), readme),
            ("config.yaml".to_string(), config_yaml(idea)),
            (".env.example".to_string(), env_example(idea)),
            ("aws/cloudformation/template.yaml".to_string(), template),
            ("aws/deploy.sh".to_string(), deploy_script(idea)),
        ];

        tracing::debug!(name = %idea.name, files = files.len(), "file set complete");
        Ok(GeneratedApplication {
            idea: idea.clone(),
            files,
            created_at: Utc::now(),
        })
    }

    async fn generate_app_code(&self, idea: &AppIdea) -> Result<String, GenError> {
        let request = CompletionRequest::new(prompts::app_code_prompt(idea))
            .with_system(prompts::code_system_prompt())
            .with_max_tokens(CODE_MAX_TOKENS)
            .with_temperature(CODE_TEMPERATURE);
        match self.llm.complete(request).await {
            Ok(text) => Ok(extract_code_block(&text, "python")),
            Err(LlmError::Parse(error)) => {
                tracing::warn!(name = %idea.name, %error, "app code unusable, using fallback");
                Ok(fallback_app_code(idea))
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn generate_readme(&self, idea: &AppIdea) -> Result<String, GenError> {
        let request = CompletionRequest::new(prompts::readme_prompt(idea))
            .with_max_tokens(README_MAX_TOKENS)
            .with_temperature(README_TEMPERATURE);
        match self.llm.complete(request).await {
            Ok(text) => Ok(text.trim().to_string()),
            Err(LlmError::Parse(error)) => {
                tracing::warn!(name = %idea.name, %error, "README unusable, using fallback");
                Ok(fallback_readme(idea))
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn generate_cloudformation(&self, idea: &AppIdea) -> Result<String, GenError> {
        let request = CompletionRequest::new(prompts::cloudformation_prompt(idea))
            .with_system(prompts::code_system_prompt())
            .with_max_tokens(CODE_MAX_TOKENS)
            .with_temperature(CODE_TEMPERATURE);
        match self.llm.complete(request).await {
            Ok(text) => Ok(extract_code_block(&text, "yaml")),
            Err(LlmError::Parse(error)) => {
                tracing::warn!(name = %idea.name, %error, "template unusable, using fallback");
                Ok(fallback_cloudformation(idea))
            }
            Err(error) => Err(error.into()),
        }
    }
}

/// Pinned dependency set derived from the idea's services and frameworks.
fn requirements(idea: &AppIdea) -> String {
    let mut deps = vec![
        "boto3>=1.34.0",
        "botocore>=1.34.0",
        "python-dotenv>=1.0.0",
        "pydantic>=2.6.0",
        "pyyaml>=6.0.1",
    ];
    if idea.aws_services.iter().any(|s| s == "bedrock") {
        deps.push("anthropic>=0.18.0");
    }
    for framework in &idea.frameworks {
        match framework.as_str() {
            "streamlit" => deps.push("streamlit>=1.31.0"),
            "fastapi" => {
                deps.push("fastapi>=0.109.0");
                deps.push("uvicorn>=0.27.0");
            }
            "langchain" => {
                deps.push("langchain>=0.1.0");
                deps.push("langchain-aws>=0.1.0");
            }
            "flask" => deps.push("flask>=3.0.0"),
            _ => {}
        }
    }
    deps.sort_unstable();
    deps.dedup();
    let mut out = deps.join("\n");
    out.push('\n');
    out
}

fn config_yaml(idea: &AppIdea) -> String {
    let mut services = String::new();
    for service in &idea.aws_services {
        let _ = writeln!(services, "  - {service}");
    }
    format!(
        r"app_name: {name}
aws_region: us-east-1
aws_services:
{services}llm_config:
  model: anthropic.claude-3-sonnet-20240229-v1:0
  max_tokens: 2048
  temperature: 0.7
",
        name = idea.name,
    )
}

fn env_example(idea: &AppIdea) -> String {
    let mut out = String::from(
        "# AWS Configuration\n\
         AWS_ACCESS_KEY_ID=your_access_key_here\n\
         AWS_SECRET_ACCESS_KEY=your_secret_key_here\n\
         AWS_REGION=us-east-1\n\n",
    );
    if idea.aws_services.iter().any(|s| s == "bedrock") {
        out.push_str(
            "# AWS Bedrock Configuration\n\
             BEDROCK_MODEL_ID=anthropic.claude-3-sonnet-20240229-v1:0\n\n",
        );
    }
    out.push_str("# Application Configuration\nLOG_LEVEL=INFO\n");
    out
}

fn deploy_script(idea: &AppIdea) -> String {
    format!(
        r#"#!/bin/bash
# Deployment script for {name}

set -e

echo "Deploying {name} to AWS..."

export AWS_REGION=${{AWS_REGION:-us-east-1}}

aws cloudformation deploy \
    --template-file cloudformation/template.yaml \
    --stack-name {stack} \
    --capabilities CAPABILITY_IAM \
    --region $AWS_REGION

echo "Deployment complete!"
"#,
        name = idea.name,
        stack = slug(&idea.name),
    )
}

fn fallback_app_code(idea: &AppIdea) -> String {
    let services = idea.aws_services.join(", ");
    let mut features = String::new();
    for feature in &idea.features {
        let _ = writeln!(features, "        # - {feature}");
    }
    format!(
        r#""""
{name}

{description}
"""

import os

import boto3
import streamlit as st
from dotenv import load_dotenv

load_dotenv()


class App:
    def __init__(self):
        self.aws_region = os.getenv("AWS_REGION", "us-east-1")
        self.setup_aws_clients()

    def setup_aws_clients(self):
        """Initialize AWS service clients"""
        # TODO: Initialize AWS clients for: {services}
        pass

    def run(self):
        """Main application logic"""
        st.title("{name}")
        st.write("{description}")

        # TODO: Implement features:
{features}

if __name__ == "__main__":
    app = App()
    app.run()
"#,
        name = idea.name,
        description = idea.description,
    )
}

fn fallback_readme(idea: &AppIdea) -> String {
    let bullets = |items: &[String]| {
        items
            .iter()
            .map(|item| format!("- {item}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!(
        r"# {name}

{description}

## Features

{features}

## AWS Services Used

{services}

## Prerequisites

- Python 3.10+
- AWS Account with appropriate permissions
- AWS CLI configured

## Installation

```bash
pip install -r requirements.txt
```

## Configuration

Copy `.env.example` to `.env` and fill in your AWS credentials:

```bash
cp .env.example .env
```

## Usage

```bash
streamlit run app.py
```

## AWS Deployment

```bash
cd aws
chmod +x deploy.sh
./deploy.sh
```

## Use Case

{use_case}

## License

MIT
",
        name = idea.name,
        description = idea.description,
        features = bullets(&idea.features),
        services = bullets(&idea.aws_services),
        use_case = idea.use_case,
    )
}

fn fallback_cloudformation(idea: &AppIdea) -> String {
    format!(
        r"AWSTemplateFormatVersion: '2010-09-09'
Description: CloudFormation template for {name}

Parameters:
  Environment:
    Type: String
    Default: dev
    Description: Environment name

Resources:
  # TODO: Define AWS resources for: {services}

  AppLogGroup:
    Type: AWS::Logs::LogGroup
    Properties:
      LogGroupName: !Sub '/{stack}'
      RetentionInDays: 7

Outputs:
  LogGroupName:
    Description: CloudWatch Log Group
    Value: !Ref AppLogGroup
",
        name = idea.name,
        services = idea.aws_services.join(", "),
        stack = slug(&idea.name),
    )
}
