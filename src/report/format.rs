use crate::activity::{ActivityEvent, EventKind};
use crate::config::TimeWindow;

const EVENT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Render the activity log fed to the summarizer: a header line, then one
/// bullet per event in the order given.
pub fn format_activity(login: &str, events: &[ActivityEvent], window: &TimeWindow) -> String {
    let shown = match window.format_limit() {
        Some(limit) => &events[..events.len().min(limit)],
        None => events,
    };

    let header = match (window, shown.is_empty()) {
        (TimeWindow::All, false) => format!("Recent GitHub activity for {}:", login),
        (TimeWindow::All, true) => format!("No recent GitHub activity for {}.", login),
        (TimeWindow::Rolling { hours, .. }, false) => {
            format!("GitHub activity for {} in the last {} hours:", login, hours)
        }
        (TimeWindow::Rolling { hours, .. }, true) => {
            format!("No GitHub activity for {} in the last {} hours.", login, hours)
        }
    };

    let mut output = header;
    for event in shown {
        output.push_str(&format!(
            "\n- {}: {}",
            window.render(event.created_at, EVENT_TIME_FORMAT),
            describe(event)
        ));
    }
    output
}

fn describe(event: &ActivityEvent) -> String {
    let repo = &event.repo;
    match &event.kind {
        EventKind::Push { commits } => format!("Pushed {} commit(s) to {}", commits, repo),
        EventKind::Create { ref_type } => {
            let ref_type = if ref_type.is_empty() { "ref" } else { ref_type };
            format!("Created {} in {}", ref_type, repo)
        }
        EventKind::Issues { action } => format!("{} issue in {}", action, repo),
        EventKind::PullRequest { action } => format!("{} pull request in {}", action, repo),
        EventKind::Watch => format!("Starred {}", repo),
        EventKind::Fork => format!("Forked {}", repo),
        EventKind::Release => format!("Released in {}", repo),
        EventKind::Other { name } => format!("{} in {}", name, repo),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn rolling() -> TimeWindow {
        TimeWindow::parse("24h", "+02:00").unwrap()
    }

    fn event(kind: EventKind, minutes_ago: i64) -> ActivityEvent {
        ActivityEvent {
            kind,
            repo: "alice/proj".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 6, 10, 12, 0, 0).unwrap()
                - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn empty_window_says_so() {
        let text = format_activity("alice", &[], &rolling());
        assert_eq!(text, "No GitHub activity for alice in the last 24 hours.");
    }

    #[test]
    fn empty_all_time_says_so() {
        let text = format_activity("alice", &[], &TimeWindow::All);
        assert_eq!(text, "No recent GitHub activity for alice.");
    }

    #[test]
    fn one_line_per_event_in_input_order() {
        let events = vec![
            event(EventKind::Push { commits: 2 }, 0),
            event(EventKind::Issues { action: "opened".into() }, 30),
            event(EventKind::Create { ref_type: "branch".into() }, 60),
        ];
        let text = format_activity("alice", &events, &rolling());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "GitHub activity for alice in the last 24 hours:",
                "- 2026-06-10 14:00: Pushed 2 commit(s) to alice/proj",
                "- 2026-06-10 13:30: opened issue in alice/proj",
                "- 2026-06-10 13:00: Created branch in alice/proj",
            ]
        );
    }

    #[test]
    fn phrases_for_every_kind() {
        let cases = [
            (EventKind::PullRequest { action: "closed".into() }, "closed pull request in alice/proj"),
            (EventKind::Watch, "Starred alice/proj"),
            (EventKind::Fork, "Forked alice/proj"),
            (EventKind::Release, "Released in alice/proj"),
            (EventKind::Create { ref_type: String::new() }, "Created ref in alice/proj"),
            (EventKind::Other { name: "GollumEvent".into() }, "GollumEvent in alice/proj"),
        ];
        for (kind, phrase) in cases {
            assert_eq!(describe(&event(kind, 0)), phrase);
        }
    }

    #[test]
    fn all_time_log_is_capped() {
        let events: Vec<_> = (0..30).map(|i| event(EventKind::Watch, i)).collect();
        let text = format_activity("alice", &events, &TimeWindow::All);
        assert_eq!(text.lines().count(), 21);

        let text = format_activity("alice", &events, &rolling());
        assert_eq!(text.lines().count(), 31);
    }
}
