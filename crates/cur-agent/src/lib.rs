//! # cur-agent
//!
//! The iteration orchestrator: one `run` wires idea generation, code
//! generation, review, and fixes together against a hosted repository
//! and the persisted state.
//!
//! Failure discipline: anything scoped to a single idea or application is
//! recorded in the report and the run moves on. Only repository setup and
//! the final state save are fatal. State is mutated in memory throughout
//! and persisted exactly once, at the end.

use chrono::Utc;
use cur_config::CuratorConfig;
use cur_core::{AppRecord, FailureStage, GeneratedApplication, ItemFailure, IterationReport};
use cur_gen::{BugFixer, CodeGenerator, CodeReviewer, IdeaContext, IdeaGenerator, actionable};
use cur_github::{RepoHandle, RepoStore};
use cur_llm::Completion;
use cur_state::{AutomationState, LastIteration, StateError, StateStore};
use thiserror::Error;

const REPO_DESCRIPTION: &str =
    "A curated, automatically maintained gallery of AI applications built on AWS";

/// Errors that abort an iteration outright.
///
/// Per-item failures never surface here; they land in the report.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The target repository could not be resolved or created.
    #[error("repository setup failed: {0}")]
    Repo(#[from] cur_github::RepoError),

    /// The final state save failed. The iteration's work is committed
    /// remotely but not recorded, so the caller must treat this as fatal.
    #[error(transparent)]
    State(#[from] StateError),
}

/// Runs one full iteration against a completion backend and a repo store.
pub struct Agent<'a, C, R> {
    llm: &'a C,
    repo: &'a R,
    config: &'a CuratorConfig,
    store: &'a StateStore,
}

impl<'a, C: Completion, R: RepoStore> Agent<'a, C, R> {
    pub const fn new(
        llm: &'a C,
        repo: &'a R,
        config: &'a CuratorConfig,
        store: &'a StateStore,
    ) -> Self {
        Self {
            llm,
            repo,
            config,
            store,
        }
    }

    /// Run one iteration: N new-application slots, then M review slots,
    /// then a single state save.
    ///
    /// Each slot makes exactly one attempt; there is no retry of a failed
    /// slot within a run.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError`] when repository setup or the final state
    /// save fails.
    pub async fn run(&self) -> Result<IterationReport, AgentError> {
        let mut state = self.store.load_or_default();
        let mut report = IterationReport {
            started_at: Some(Utc::now()),
            ..Default::default()
        };

        let handle = self
            .repo
            .ensure_repository(&self.config.github.target_repo, REPO_DESCRIPTION)
            .await?;
        tracing::info!(repo = %handle.full_name(), "iteration started");

        for slot in 0..self.config.generation.new_apps_per_day {
            tracing::debug!(slot, "new application slot");
            self.generation_slot(&handle, &mut state, &mut report).await;
        }

        let queue: Vec<String> = state
            .review_queue()
            .into_iter()
            .take(self.config.generation.bug_fixes_per_day as usize)
            .collect();
        for key in queue {
            tracing::debug!(%key, "review slot");
            self.review_slot(&handle, &mut state, &mut report, &key).await;
        }

        report.finished_at = Some(Utc::now());
        state.last_iteration = Some(LastIteration {
            timestamp: report.finished_at.unwrap_or_else(Utc::now),
            new_apps: report.new_apps.clone(),
            bugs_fixed: report.bugs_fixed.clone(),
        });
        self.store.save(&state)?;

        tracing::info!(
            new_apps = report.new_apps.len(),
            bugs_fixed = report.bugs_fixed.len(),
            failures = report.failures.len(),
            "iteration finished",
        );
        Ok(report)
    }

    /// One new-application slot: pick, ideate, generate, commit, register.
    async fn generation_slot(
        &self,
        handle: &RepoHandle,
        state: &mut AutomationState,
        report: &mut IterationReport,
    ) {
        // Sampling happens before the first await so the rng never crosses
        // a suspension point.
        let (category, services) = {
            let mut rng = rand::thread_rng();
            let Some(category) =
                cur_gen::select::pick_category(&mut rng, &self.config.categories, |name| {
                    state.category_count(name)
                })
            else {
                report.failures.push(ItemFailure {
                    stage: FailureStage::IdeaGeneration,
                    subject: None,
                    message: "no categories configured".to_string(),
                });
                return;
            };
            let services = cur_gen::select::pick_services(
                &mut rng,
                &self.config.aws_services,
                self.config.generation.services_per_idea_min,
                self.config.generation.services_per_idea_max,
            );
            (category.name.clone(), services)
        };

        let context = IdeaContext {
            existing_in_category: state.names_in_category(&category),
            all_names: state.app_names(),
            known_keys: state.registry.iter().map(|r| r.key.clone()).collect(),
            total_apps: state.total_apps(),
            category,
            services,
        };

        let idea = match IdeaGenerator::new(self.llm).generate(&context).await {
            Ok(idea) => idea,
            Err(error) => {
                tracing::warn!(category = %context.category, %error, "idea slot failed");
                report.failures.push(ItemFailure {
                    stage: FailureStage::IdeaGeneration,
                    subject: Some(context.category),
                    message: error.to_string(),
                });
                return;
            }
        };

        let app = match CodeGenerator::new(self.llm).generate(&idea).await {
            Ok(app) => app,
            Err(error) => {
                tracing::warn!(name = %idea.name, %error, "code generation failed");
                report.failures.push(ItemFailure {
                    stage: FailureStage::CodeGeneration,
                    subject: Some(idea.name),
                    message: error.to_string(),
                });
                return;
            }
        };

        let files = prefixed_files(&app);
        let message = format!("feat: add {}", idea.name);
        if let Err(error) = self.repo.write_files(handle, &files, &message).await {
            tracing::warn!(name = %idea.name, %error, "commit failed");
            report.failures.push(ItemFailure {
                stage: FailureStage::Commit,
                subject: Some(idea.name),
                message: error.to_string(),
            });
            return;
        }

        // The registry gains an entry only once the files are committed.
        state.register(AppRecord {
            key: idea.key(),
            name: idea.name.clone(),
            category: idea.category.clone(),
            aws_services: idea.aws_services.clone(),
            created_at: app.created_at,
            last_reviewed_at: None,
        });
        state.stats.total_apps_generated += 1;
        tracing::info!(name = %idea.name, key = %idea.key(), "application committed");
        report.new_apps.push(idea.name);
    }

    /// One review slot: read the app's main file, review it, and apply a
    /// fix when actionable issues come back.
    async fn review_slot(
        &self,
        handle: &RepoHandle,
        state: &mut AutomationState,
        report: &mut IterationReport,
        key: &str,
    ) {
        let Some(name) = state.get(key).map(|record| record.name.clone()) else {
            return;
        };
        let path = format!("{key}/app.py");

        let file = match self.repo.get_file(handle, &path).await {
            Ok(Some(file)) => file,
            Ok(None) => {
                report.failures.push(ItemFailure {
                    stage: FailureStage::Review,
                    subject: Some(name),
                    message: format!("{path} not found in repository"),
                });
                return;
            }
            Err(error) => {
                report.failures.push(ItemFailure {
                    stage: FailureStage::Review,
                    subject: Some(name),
                    message: error.to_string(),
                });
                return;
            }
        };

        let issues = match CodeReviewer::new(self.llm).review(&path, &file.content).await {
            Ok(issues) => issues,
            Err(error) => {
                tracing::warn!(%key, %error, "review failed");
                report.failures.push(ItemFailure {
                    stage: FailureStage::Review,
                    subject: Some(name),
                    message: error.to_string(),
                });
                return;
            }
        };

        let actionable = actionable(&issues);
        if actionable.is_empty() {
            tracing::info!(%key, total_issues = issues.len(), "no actionable issues");
            state.mark_reviewed(key, Utc::now());
            report.reviewed_clean.push(name);
            return;
        }

        let fixed = match BugFixer::new(self.llm).fix(&file.content, &actionable).await {
            Ok(fixed) => fixed,
            Err(error) => {
                tracing::warn!(%key, %error, "fix failed");
                report.failures.push(ItemFailure {
                    stage: FailureStage::Fix,
                    subject: Some(name),
                    message: error.to_string(),
                });
                return;
            }
        };
        if fixed == file.content {
            state.mark_reviewed(key, Utc::now());
            report.reviewed_clean.push(name);
            return;
        }

        let message = format!(
            "fix: resolve {} issue(s) in {name}",
            actionable.len()
        );
        let batch = vec![(path, fixed)];
        if let Err(error) = self.repo.write_files(handle, &batch, &message).await {
            report.failures.push(ItemFailure {
                stage: FailureStage::Commit,
                subject: Some(name),
                message: error.to_string(),
            });
            return;
        }

        state.stats.total_bugs_fixed += actionable.len() as u64;
        state.mark_reviewed(key, Utc::now());
        tracing::info!(%key, fixed = actionable.len(), "issues fixed");
        report
            .bugs_fixed
            .push(format!("{name}: {} issue(s) fixed", actionable.len()));
    }
}

/// Repository paths for an application's files: the app directory is its
/// uniqueness key.
fn prefixed_files(app: &GeneratedApplication) -> Vec<(String, String)> {
    let base = app.repo_path();
    app.files
        .iter()
        .map(|(path, content)| (format!("{base}/{path}"), content.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashSet, VecDeque};
    use std::sync::Mutex;

    use cur_config::{GenerationConfig, GithubConfig};
    use cur_core::{AwsService, Category};
    use cur_github::{CommitResult, FileContent, RepoError};
    use cur_llm::{CompletionRequest, LlmError};
    use pretty_assertions::assert_eq;

    struct ScriptedLlm {
        responses: Mutex<VecDeque<Result<String, LlmError>>>,
        calls: Mutex<usize>,
    }

    impl ScriptedLlm {
        fn new(responses: Vec<Result<String, LlmError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(0),
            }
        }

        fn call_count(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    impl Completion for ScriptedLlm {
        async fn complete(&self, _request: CompletionRequest) -> Result<String, LlmError> {
            *self.calls.lock().unwrap() += 1;
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(LlmError::Parse("script exhausted".to_string())))
        }
    }

    #[derive(Default)]
    struct FakeRepo {
        files: Mutex<BTreeMap<String, String>>,
        fail_paths: Mutex<HashSet<String>>,
    }

    impl FakeRepo {
        fn with_file(self, path: &str, content: &str) -> Self {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_string(), content.to_string());
            self
        }

        fn failing_on(self, path: &str) -> Self {
            self.fail_paths.lock().unwrap().insert(path.to_string());
            self
        }

        fn file(&self, path: &str) -> Option<String> {
            self.files.lock().unwrap().get(path).cloned()
        }
    }

    impl RepoStore for FakeRepo {
        async fn ensure_repository(
            &self,
            name: &str,
            _description: &str,
        ) -> Result<RepoHandle, RepoError> {
            Ok(RepoHandle {
                owner: "octocat".to_string(),
                name: name.to_string(),
            })
        }

        async fn write_files(
            &self,
            _repo: &RepoHandle,
            files: &[(String, String)],
            _message: &str,
        ) -> Result<CommitResult, RepoError> {
            let mut written = Vec::new();
            for (path, content) in files {
                if self.fail_paths.lock().unwrap().contains(path) {
                    return Err(RepoError::PartialWrite {
                        written,
                        path: path.clone(),
                        source: Box::new(RepoError::Api {
                            status: 500,
                            message: "injected".to_string(),
                        }),
                    });
                }
                self.files
                    .lock()
                    .unwrap()
                    .insert(path.clone(), content.clone());
                written.push(path.clone());
            }
            Ok(CommitResult { written })
        }

        async fn get_file(
            &self,
            _repo: &RepoHandle,
            path: &str,
        ) -> Result<Option<FileContent>, RepoError> {
            Ok(self.file(path).map(|content| FileContent {
                content,
                sha: "fake".to_string(),
            }))
        }
    }

    /// One category, one service: sampling is forced, keys predictable.
    fn config(new_apps: u32, fixes: u32) -> CuratorConfig {
        CuratorConfig {
            github: GithubConfig {
                token: "ghp_test".to_string(),
                ..Default::default()
            },
            generation: GenerationConfig {
                new_apps_per_day: new_apps,
                bug_fixes_per_day: fixes,
                services_per_idea_min: 1,
                services_per_idea_max: 1,
            },
            categories: vec![Category {
                name: "rag_on_aws".to_string(),
                description: "RAG".to_string(),
                priority: 1,
            }],
            aws_services: vec![AwsService {
                key: "bedrock".to_string(),
                name: "Bedrock".to_string(),
                use_cases: vec![],
                priority: 1,
            }],
            ..Default::default()
        }
    }

    fn idea_json(name: &str) -> String {
        format!(
            r#"{{
                "name": "{name}",
                "description": "Does useful things.",
                "features": ["one"],
                "aws_services": ["bedrock"],
                "use_case": "Teams",
                "frameworks": ["streamlit"]
            }}"#
        )
    }

    fn app_script(name: &str) -> Vec<Result<String, LlmError>> {
        vec![
            Ok(idea_json(name)),
            Ok("```python\nimport boto3\n```".to_string()),
            Ok("# Readme".to_string()),
            Ok("```yaml\nAWSTemplateFormatVersion: '2010-09-09'\n```".to_string()),
        ]
    }

    fn seeded_store(dir: &tempfile::TempDir, state: &AutomationState) -> StateStore {
        let store = StateStore::new(dir.path().join("state.json"));
        store.save(state).unwrap();
        store
    }

    fn record(key: &str, name: &str) -> AppRecord {
        AppRecord {
            key: key.to_string(),
            name: name.to_string(),
            category: "rag_on_aws".to_string(),
            aws_services: vec!["bedrock".to_string()],
            created_at: Utc::now(),
            last_reviewed_at: None,
        }
    }

    const REVIEW_CRITICAL: &str = r#"[
        {"severity": "critical", "type": "security", "line": 1,
         "issue": "Hardcoded key", "suggestion": "Use env vars"}
    ]"#;

    #[tokio::test]
    async fn end_to_end_generates_commits_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("state.json"));
        let llm = ScriptedLlm::new(app_script("Contract Analyzer"));
        let repo = FakeRepo::default();
        let config = config(1, 0);

        let report = Agent::new(&llm, &repo, &config, &store).run().await.unwrap();

        assert_eq!(report.new_apps, vec!["Contract Analyzer"]);
        assert!(report.failures.is_empty());
        assert_eq!(
            repo.file("rag_on_aws/contract-analyzer/app.py").as_deref(),
            Some("import boto3")
        );
        assert!(repo.file("rag_on_aws/contract-analyzer/aws/deploy.sh").is_some());

        let state = store.load().unwrap();
        assert_eq!(state.stats.total_apps_generated, 1);
        assert!(state.contains_key("rag_on_aws/contract-analyzer"));
        assert_eq!(state.category_count("rag_on_aws"), 1);
        assert_eq!(
            state.last_iteration.unwrap().new_apps,
            vec!["Contract Analyzer"]
        );
    }

    #[tokio::test]
    async fn duplicate_idea_fails_slot_without_codegen() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AutomationState::default();
        state.register(record("rag_on_aws/contract-analyzer", "Contract Analyzer"));
        let store = seeded_store(&dir, &state);

        let llm = ScriptedLlm::new(vec![Ok(idea_json("Contract Analyzer"))]);
        let repo = FakeRepo::default();
        let config = config(1, 0);

        let report = Agent::new(&llm, &repo, &config, &store).run().await.unwrap();

        assert!(report.new_apps.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].stage, FailureStage::IdeaGeneration);
        // Only the idea call was made; no code generation followed.
        assert_eq!(llm.call_count(), 1);
        assert_eq!(store.load().unwrap().stats.total_apps_generated, 0);
    }

    #[tokio::test]
    async fn failed_slot_does_not_stop_later_slots() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("state.json"));
        let mut script = app_script("First App");
        script.push(Ok("not json".to_string()));
        script.extend(app_script("Third App"));
        let llm = ScriptedLlm::new(script);
        let repo = FakeRepo::default();
        let config = config(3, 0);

        let report = Agent::new(&llm, &repo, &config, &store).run().await.unwrap();

        assert_eq!(report.new_apps, vec!["First App", "Third App"]);
        assert_eq!(report.failures.len(), 1);
        // Exactly one idea attempt per slot: 4 calls per success, 1 for the
        // failed middle slot.
        assert_eq!(llm.call_count(), 9);
        assert_eq!(store.load().unwrap().stats.total_apps_generated, 2);
    }

    #[tokio::test]
    async fn commit_failure_leaves_registry_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("state.json"));
        let llm = ScriptedLlm::new(app_script("Contract Analyzer"));
        let repo = FakeRepo::default().failing_on("rag_on_aws/contract-analyzer/app.py");
        let config = config(1, 0);

        let report = Agent::new(&llm, &repo, &config, &store).run().await.unwrap();

        assert!(report.new_apps.is_empty());
        assert_eq!(report.failures[0].stage, FailureStage::Commit);
        let state = store.load().unwrap();
        assert_eq!(state.total_apps(), 0);
        assert_eq!(state.stats.total_apps_generated, 0);
    }

    #[tokio::test]
    async fn review_fixes_actionable_issues_and_updates_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AutomationState::default();
        state.register(record("rag_on_aws/legal-rag", "Legal RAG"));
        let store = seeded_store(&dir, &state);

        let llm = ScriptedLlm::new(vec![
            Ok(REVIEW_CRITICAL.to_string()),
            Ok("```python\nimport os\n```".to_string()),
        ]);
        let repo = FakeRepo::default().with_file("rag_on_aws/legal-rag/app.py", "key = 'abc'");
        let config = config(0, 1);

        let report = Agent::new(&llm, &repo, &config, &store).run().await.unwrap();

        assert_eq!(report.bugs_fixed, vec!["Legal RAG: 1 issue(s) fixed"]);
        assert_eq!(
            repo.file("rag_on_aws/legal-rag/app.py").as_deref(),
            Some("import os")
        );
        let state = store.load().unwrap();
        assert_eq!(state.stats.total_bugs_fixed, 1);
        assert!(state.get("rag_on_aws/legal-rag").unwrap().last_reviewed_at.is_some());
    }

    #[tokio::test]
    async fn clean_review_marks_reviewed_without_fix_call() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AutomationState::default();
        state.register(record("rag_on_aws/legal-rag", "Legal RAG"));
        let store = seeded_store(&dir, &state);

        // Low-severity findings only: nothing actionable.
        let llm = ScriptedLlm::new(vec![Ok(r#"[
            {"severity": "low", "type": "style", "line": null, "issue": "nit"}
        ]"#
        .to_string())]);
        let repo = FakeRepo::default().with_file("rag_on_aws/legal-rag/app.py", "import boto3");
        let config = config(0, 1);

        let report = Agent::new(&llm, &repo, &config, &store).run().await.unwrap();

        assert_eq!(report.reviewed_clean, vec!["Legal RAG"]);
        assert!(report.bugs_fixed.is_empty());
        assert_eq!(llm.call_count(), 1);
        let state = store.load().unwrap();
        assert_eq!(state.stats.total_bugs_fixed, 0);
        assert!(state.get("rag_on_aws/legal-rag").unwrap().last_reviewed_at.is_some());
    }

    #[tokio::test]
    async fn review_failure_is_recorded_and_run_continues() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AutomationState::default();
        state.register(record("rag_on_aws/legal-rag", "Legal RAG"));
        state.register(record("rag_on_aws/tax-rag", "Tax RAG"));
        let store = seeded_store(&dir, &state);

        let llm = ScriptedLlm::new(vec![
            Ok("prose, not an issue array".to_string()),
            Ok("[]".to_string()),
        ]);
        let repo = FakeRepo::default()
            .with_file("rag_on_aws/legal-rag/app.py", "a")
            .with_file("rag_on_aws/tax-rag/app.py", "b");
        let config = config(0, 2);

        let report = Agent::new(&llm, &repo, &config, &store).run().await.unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].stage, FailureStage::Review);
        assert_eq!(report.reviewed_clean, vec!["Tax RAG"]);
        // The failed app stays unreviewed and so keeps queue priority.
        let state = store.load().unwrap();
        assert!(state.get("rag_on_aws/legal-rag").unwrap().last_reviewed_at.is_none());
    }

    #[tokio::test]
    async fn missing_app_file_is_a_review_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AutomationState::default();
        state.register(record("rag_on_aws/legal-rag", "Legal RAG"));
        let store = seeded_store(&dir, &state);

        let llm = ScriptedLlm::new(vec![]);
        let repo = FakeRepo::default();
        let config = config(0, 1);

        let report = Agent::new(&llm, &repo, &config, &store).run().await.unwrap();

        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].message.contains("app.py not found"));
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn state_is_saved_even_when_every_slot_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("state.json"));
        let llm = ScriptedLlm::new(vec![Err(LlmError::Api {
            status: 500,
            message: "down".to_string(),
        })]);
        let repo = FakeRepo::default();
        let config = config(1, 0);

        let report = Agent::new(&llm, &repo, &config, &store).run().await.unwrap();

        assert_eq!(report.failures.len(), 1);
        let state = store.load().unwrap();
        assert!(state.last_iteration.is_some());
        assert!(state.last_iteration.unwrap().new_apps.is_empty());
    }
}
