use std::path::Path;

use crate::error::PulseError;

pub const START_MARKER: &str = "<!--START_SECTION:activity-->";
pub const END_MARKER: &str = "<!--END_SECTION:activity-->";

/// Block placed between the markers.
pub fn render_section(badges: &str, summary: &str, updated_at: &str) -> String {
    format!(
        "\n### Recent GitHub Activity\n\n{}\n\n{}\n\n<sub>Summarized by AI · Last updated {}</sub>\n",
        badges, summary, updated_at
    )
}

/// Replace everything strictly between the markers with `section`. The
/// markers and all text outside them are kept as-is.
pub fn splice(contents: &str, section: &str) -> Result<String, PulseError> {
    let start = contents
        .find(START_MARKER)
        .ok_or_else(|| PulseError::Readme(format!("Start marker {} not found", START_MARKER)))?
        + START_MARKER.len();
    let end = contents[start..]
        .find(END_MARKER)
        .map(|offset| start + offset)
        .ok_or_else(|| {
            PulseError::Readme(format!("End marker {} not found after start marker", END_MARKER))
        })?;

    let mut output = String::with_capacity(start + section.len() + contents.len() - end);
    output.push_str(&contents[..start]);
    output.push_str(section);
    output.push_str(&contents[end..]);
    Ok(output)
}

/// Read `path` and return its contents with the section replaced.
pub async fn render_readme(path: &Path, section: &str) -> Result<String, PulseError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| PulseError::Readme(format!("Cannot read {}: {}", path.display(), e)))?;
    splice(&contents, section)
}

pub async fn write_readme(path: &Path, contents: &str) -> Result<(), PulseError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| PulseError::Readme(format!("Cannot write {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const README: &str = "# Hi there\n\n<!--START_SECTION:activity-->\nold stuff\n<!--END_SECTION:activity-->\n\nFooter\n";

    #[test]
    fn replaces_only_the_marked_region() {
        let section = render_section("BADGES", "Did things.", "2026-01-01 10:00 +00:00");
        let updated = splice(README, &section).unwrap();
        assert_eq!(
            updated,
            "# Hi there\n\n<!--START_SECTION:activity-->\n### Recent GitHub Activity\n\nBADGES\n\nDid things.\n\n\
<sub>Summarized by AI · Last updated 2026-01-01 10:00 +00:00</sub>\n<!--END_SECTION:activity-->\n\nFooter\n"
        );
    }

    #[test]
    fn splicing_twice_matches_latest_call() {
        let first = splice(README, &render_section("A", "one", "t1")).unwrap();
        let second = splice(&first, &render_section("B", "two", "t2")).unwrap();
        assert_eq!(second, splice(README, &render_section("B", "two", "t2")).unwrap());
        assert!(second.starts_with("# Hi there\n\n<!--START_SECTION:activity-->"));
        assert!(second.ends_with("<!--END_SECTION:activity-->\n\nFooter\n"));
        assert!(!second.contains("one"));
    }

    #[test]
    fn empty_region_is_filled() {
        let readme = "<!--START_SECTION:activity--><!--END_SECTION:activity-->";
        assert_eq!(
            splice(readme, "X").unwrap(),
            "<!--START_SECTION:activity-->X<!--END_SECTION:activity-->"
        );
    }

    #[test]
    fn missing_markers_fail() {
        assert!(matches!(
            splice("no markers", "X"),
            Err(PulseError::Readme(_))
        ));
        assert!(splice("<!--START_SECTION:activity--> only start", "X").is_err());
        assert!(splice("<!--END_SECTION:activity--> only end", "X").is_err());
    }

    #[test]
    fn end_before_start_fails() {
        let readme = "<!--END_SECTION:activity-->\n<!--START_SECTION:activity-->\n";
        assert!(splice(readme, "X").is_err());
    }

    #[tokio::test]
    async fn missing_markers_leave_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README.md");
        std::fs::write(&path, "# plain readme\n").unwrap();

        assert!(render_readme(&path, "X").await.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# plain readme\n");
    }

    #[tokio::test]
    async fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README.md");
        std::fs::write(&path, README).unwrap();

        let updated = render_readme(&path, "\nnew\n").await.unwrap();
        write_readme(&path, &updated).await.unwrap();
        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert!(on_disk.contains("<!--START_SECTION:activity-->\nnew\n<!--END_SECTION:activity-->"));
    }

    #[tokio::test]
    async fn missing_file_is_a_readme_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = render_readme(&dir.path().join("absent.md"), "X").await.unwrap_err();
        assert!(matches!(err, PulseError::Readme(_)));
    }
}
