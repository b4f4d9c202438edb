use std::collections::HashSet;

use crate::activity::{ActivityEvent, EventKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityStats {
    pub commit_count: usize,
    pub repo_count: usize,
    pub pr_count: usize,
    pub issue_count: usize,
}

impl ActivityStats {
    pub fn from_events(events: &[ActivityEvent]) -> Self {
        let mut repos = HashSet::new();
        let mut stats = ActivityStats::default();

        for event in events {
            repos.insert(event.repo.as_str());
            match &event.kind {
                EventKind::Push { commits } => stats.commit_count += commits,
                EventKind::PullRequest { action } if action == "opened" => stats.pr_count += 1,
                EventKind::Issues { action } if action == "opened" => stats.issue_count += 1,
                _ => {}
            }
        }

        stats.repo_count = repos.len();
        stats
    }

    /// Shields.io badges in the order commits, repos, pull requests, issues.
    pub fn badges(&self) -> String {
        [
            badge("Recent Commits", self.commit_count, "blue"),
            badge("Active Repos", self.repo_count, "green"),
            badge("Pull Requests", self.pr_count, "orange"),
            badge("Issues Opened", self.issue_count, "red"),
        ]
        .join(" ")
    }
}

const BADGE_STYLE: &str = "flat-square";

fn badge(label: &str, value: usize, color: &str) -> String {
    format!(
        "![{label}](https://img.shields.io/badge/{}-{value}-{color}?style={BADGE_STYLE}&logoColor=white)",
        label.replace(' ', "%20")
    )
}
