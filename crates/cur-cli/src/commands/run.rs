//! `cur run`: one full iteration against the configured repository.

use anyhow::Context as _;
use cur_agent::Agent;
use cur_config::CuratorConfig;
use cur_github::GitHubClient;
use cur_llm::LlmClient;
use cur_state::StateStore;

pub async fn handle(config: &CuratorConfig) -> anyhow::Result<()> {
    let llm = LlmClient::from_config(&config.llm)
        .context("LLM provider is not configured (set CURATOR_LLM__API_KEY)")?;
    let github = GitHubClient::new(&config.github.token, &config.github.branch)
        .context("GitHub is not configured (set CURATOR_GITHUB__TOKEN)")?;
    let store = StateStore::new(config.general.state_file());

    let report = Agent::new(&llm, &github, config, &store)
        .run()
        .await
        .context("iteration failed")?;

    let summary = report.to_markdown();
    println!("{summary}");

    // Artifacts for CI job summaries and the follow-up commit step.
    let dir = &config.general.state_dir;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    std::fs::write(dir.join("iteration_summary.md"), &summary)
        .context("failed to write iteration summary")?;
    std::fs::write(dir.join("last_commit_message.txt"), report.commit_message())
        .context("failed to write commit message")?;

    Ok(())
}
