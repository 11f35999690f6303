//! `cur init`: create the target repository and seed its skeleton.

use anyhow::Context as _;
use cur_config::CuratorConfig;
use cur_core::Category;
use cur_github::GitHubClient;

const REPO_DESCRIPTION: &str =
    "Curated collection of AI and ML applications built with AWS services";

pub async fn handle(config: &CuratorConfig) -> anyhow::Result<()> {
    let github = GitHubClient::new(&config.github.token, &config.github.branch)
        .context("GitHub is not configured (set CURATOR_GITHUB__TOKEN)")?;

    let repo = github
        .ensure_repository(&config.github.target_repo, REPO_DESCRIPTION)
        .await
        .context("failed to create target repository")?;
    tracing::info!(repo = %repo.full_name(), "repository ready");

    github
        .put_file(&repo, "README.md", &root_readme(), "Initial commit: add README")
        .await
        .context("failed to write README.md")?;
    github
        .put_file(&repo, ".gitignore", gitignore(), "Add .gitignore")
        .await
        .context("failed to write .gitignore")?;

    for category in &config.categories {
        tracing::info!(category = %category.name, "seeding category");
        github
            .put_file(
                &repo,
                &format!("{}/README.md", category.name),
                &category_readme(category),
                &format!("Add {} category", category.name),
            )
            .await
            .with_context(|| format!("failed to seed category {}", category.name))?;
    }

    println!("## Repository Initialization Complete\n");
    println!("- **Repository**: {}", repo.full_name());
    println!("- **Branch**: {}", config.github.branch);
    println!("- **Categories created**: {}\n", config.categories.len());
    println!("Next: schedule `cur run` (daily) with the same credentials.");

    Ok(())
}

fn root_readme() -> String {
    "# Awesome AWS AI Apps\n\n\
     A curated collection of AI and Machine Learning applications built with AWS \
     services. Each application ships with complete source code, a detailed README, \
     CloudFormation templates, and its dependencies.\n\n\
     ## Categories\n\n\
     Applications are organized by category directory; browse any category and pick \
     an app to get started.\n\n\
     ## Prerequisites\n\n\
     - AWS Account with appropriate permissions\n\
     - Python 3.10 or higher\n\
     - AWS CLI configured\n\n\
     ## Cost Warning\n\n\
     These applications use AWS services that may incur costs. Review the pricing of \
     each service before deploying.\n\n\
     ## License\n\n\
     MIT License - see individual app directories for details.\n\n\
     ---\n\n\
     *This repository is updated automatically with new AI applications.*\n"
        .to_string()
}

const fn gitignore() -> &'static str {
    "# Python\n\
     __pycache__/\n\
     *.py[cod]\n\
     *.egg-info/\n\
     build/\n\
     dist/\n\
     env/\n\
     venv/\n\
     .venv\n\n\
     # Environment\n\
     .env\n\n\
     # IDE\n\
     .vscode/\n\
     .idea/\n\
     *.swp\n\n\
     # AWS\n\
     .aws/\n\n\
     # Logs\n\
     *.log\n\n\
     # OS\n\
     .DS_Store\n\
     Thumbs.db\n"
}

fn category_readme(category: &Category) -> String {
    format!(
        "# {description}\n\n\
         This directory contains {lower}.\n\n\
         ## Applications\n\n\
         *Applications will be added here by the automated agent.*\n",
        description = category.description,
        lower = category.description.to_lowercase(),
    )
}
