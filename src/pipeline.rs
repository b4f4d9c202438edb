use chrono::{DateTime, Utc};
use log::info;

use crate::activity::{self, ActivitySource};
use crate::config::{PromptConfig, Settings};
use crate::error::PulseError;
use crate::readme;
use crate::report::{format_activity, ActivityStats};
use crate::summarizer::{self, provider::LlmProvider};

const UPDATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M %:z";

/// What a run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub login: String,
    pub stats: ActivityStats,
    pub activity: String,
    pub summary: String,
    /// Full README text after splicing.
    pub readme: String,
    pub written: bool,
}

/// Fetch, aggregate, summarize and splice, in that order. The README is
/// only touched after every earlier step has succeeded.
pub async fn execute(
    settings: &Settings,
    prompt: &PromptConfig,
    source: &dyn ActivitySource,
    provider: &dyn LlmProvider,
    now: DateTime<Utc>,
) -> Result<RunOutcome, PulseError> {
    let (login, events) =
        activity::collect(source, &settings.username, &settings.window, now).await?;

    let stats = ActivityStats::from_events(&events);
    info!(
        "Stats: {} commits, {} repos, {} PRs, {} issues",
        stats.commit_count, stats.repo_count, stats.pr_count, stats.issue_count
    );

    let activity = format_activity(&login, &events, &settings.window);
    let summary = summarizer::summarize(provider, prompt, &activity).await?;

    let section = readme::render_section(
        &stats.badges(),
        &summary,
        &settings.window.render(now, UPDATED_AT_FORMAT),
    );
    let contents = readme::render_readme(&settings.readme_path, &section).await?;

    let written = if settings.dry_run {
        println!("{}", contents);
        info!("Dry run, {} left unchanged", settings.readme_path.display());
        false
    } else {
        readme::write_readme(&settings.readme_path, &contents).await?;
        info!("Updated {}", settings.readme_path.display());
        true
    };

    Ok(RunOutcome {
        login,
        stats,
        activity,
        summary,
        readme: contents,
        written,
    })
}
