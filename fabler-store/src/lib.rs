use std::{
    fs,
    path::{Path, PathBuf},
};

use fabler_common::{
    err,
    models::{AnalyzedStory, Story},
    Context as _, Report,
};

const ILLEGAL_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];
const MAX_BASE_LENGTH: usize = 255;

/// Turns free text into a filesystem-legal file name stem: illegal characters
/// removed, spaces replaced with underscores, at most 255 characters.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .filter(|c| !ILLEGAL_CHARS.contains(c))
        .map(|c| if c == ' ' { '_' } else { c })
        .take(MAX_BASE_LENGTH)
        .collect()
}

/// First of `<base>.<ext>`, `<base>_1.<ext>`, `<base>_2.<ext>`, … that does
/// not exist in `dir`, so an existing file is never overwritten.
///
/// The window between this existence probe and the eventual create is racy
/// under concurrent writers; the CLI is single-threaded and sequential, so
/// the window is never exercised.
pub fn unique_path(dir: &Path, base: &str, extension: &str) -> PathBuf {
    let mut path = dir.join(format!("{}.{}", base, extension));
    let mut counter = 1;

    while path.exists() {
        path = dir.join(format!("{}_{}.{}", base, counter, extension));
        counter += 1;
    }

    path
}

/// Writes a fully assembled story record as pretty-printed JSON under a name
/// derived from its title, and returns the path written to.
#[tracing::instrument(skip(dir, story), fields(title = %story.title), err)]
pub fn save_story(dir: &Path, story: &Story) -> Result<PathBuf, Report> {
    fs::create_dir_all(dir)
        .with_context(|| format!("unable to create output directory `{}`", dir.display()))?;

    let base = sanitize_file_name(&story.title);
    let path = unique_path(dir, &base, "json");

    let json = serde_json::to_string_pretty(story)?;
    fs::write(&path, json)
        .with_context(|| format!("unable to write story to `{}`", path.display()))?;

    Ok(path)
}

/// Writes the legacy plain-text rendition: the title, a blank line, then the
/// chapters, each under a `Chapter <n>` heading.
#[tracing::instrument(skip(dir, story), fields(title = %story.title), err)]
pub fn save_story_text(dir: &Path, story: &Story) -> Result<PathBuf, Report> {
    fs::create_dir_all(dir)
        .with_context(|| format!("unable to create output directory `{}`", dir.display()))?;

    let base = sanitize_file_name(&story.title);
    let path = unique_path(dir, &base, "txt");

    let chapters = story
        .chapters
        .iter()
        .enumerate()
        .map(|(index, chapter)| format!("Chapter {}\n\n{}", index + 1, chapter.content))
        .collect::<Vec<_>>()
        .join("\n\n");

    fs::write(&path, format!("{}\n\n{}", story.title, chapters))
        .with_context(|| format!("unable to write story to `{}`", path.display()))?;

    Ok(path)
}

#[tracing::instrument(skip(path), fields(path = %path.display()), err)]
pub fn load_story(path: &Path) -> Result<Story, Report> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("unable to read story from `{}`", path.display()))?;

    let story = serde_json::from_str(&raw)
        .with_context(|| format!("`{}` is not a story record", path.display()))?;

    Ok(story)
}

/// Rewrites an existing story record in place.
#[tracing::instrument(skip(path, story), fields(path = %path.display()), err)]
pub fn update_story(path: &Path, story: &Story) -> Result<(), Report> {
    let json = serde_json::to_string_pretty(story)?;

    fs::write(path, json)
        .with_context(|| format!("unable to write story to `{}`", path.display()))?;

    Ok(())
}

/// Writes an analyzed record as `analyzed_<source-file-name>` inside
/// `out_dir`, creating the directory if needed. An earlier analysis of the
/// same source is replaced.
#[tracing::instrument(skip(out_dir, source, analyzed), fields(source = %source.display()), err)]
pub fn save_analyzed(
    out_dir: &Path,
    source: &Path,
    analyzed: &AnalyzedStory,
) -> Result<PathBuf, Report> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("unable to create output directory `{}`", out_dir.display()))?;

    let name = source
        .file_name()
        .ok_or_else(|| err!("`{}` has no file name", source.display()))?;
    let path = out_dir.join(format!("analyzed_{}", name.to_string_lossy()));

    let json = serde_json::to_string_pretty(analyzed)?;
    fs::write(&path, json)
        .with_context(|| format!("unable to write analysis to `{}`", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use fabler_common::models::Chapter;

    use super::*;

    fn story(title: &str) -> Story {
        Story {
            genre: "fantasy".into(),
            title: title.into(),
            description: "A story.".into(),
            original_title: None,
            suggested_title: None,
            chapters: vec![Chapter {
                title: "Chapter 1".into(),
                content: "Once upon a time.".into(),
            }],
        }
    }

    #[test]
    fn sanitize_removes_illegal_characters() {
        let input = r#"a<b>c:d"e/f\g|h?i*j"#;
        let output = sanitize_file_name(input);

        assert_eq!(output, "abcdefghij");
        assert!(!output.contains(ILLEGAL_CHARS));
    }

    #[test]
    fn sanitize_replaces_spaces() {
        assert_eq!(sanitize_file_name("The City Burned"), "The_City_Burned");
    }

    #[test]
    fn sanitize_truncates_to_255() {
        let long = "x".repeat(400);

        assert_eq!(sanitize_file_name(&long).chars().count(), 255);
    }

    #[test]
    fn unique_path_appends_numeric_suffixes() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(
            unique_path(dir.path(), "X", "json"),
            dir.path().join("X.json")
        );

        fs::write(dir.path().join("X.json"), "{}").unwrap();
        assert_eq!(
            unique_path(dir.path(), "X", "json"),
            dir.path().join("X_1.json")
        );

        fs::write(dir.path().join("X_1.json"), "{}").unwrap();
        assert_eq!(
            unique_path(dir.path(), "X", "json"),
            dir.path().join("X_2.json")
        );
    }

    #[test]
    fn save_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();

        let first = save_story(dir.path(), &story("Twice Told")).unwrap();
        let second = save_story(dir.path(), &story("Twice Told")).unwrap();

        assert_eq!(first, dir.path().join("Twice_Told.json"));
        assert_eq!(second, dir.path().join("Twice_Told_1.json"));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();

        let original = story("Round Trip");
        let path = save_story(dir.path(), &original).unwrap();

        assert_eq!(load_story(&path).unwrap(), original);
    }

    #[test]
    fn retitle_fields_stay_out_of_json_until_set() {
        let dir = tempfile::tempdir().unwrap();

        let path = save_story(dir.path(), &story("Plain")).unwrap();
        let raw = fs::read_to_string(&path).unwrap();

        assert!(!raw.contains("suggested_title"));
    }

    #[test]
    fn analyzed_records_get_the_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("analyzed");

        let analyzed = AnalyzedStory {
            title: "Plain".into(),
            description: "A story.".into(),
            chapters: Vec::new(),
        };

        let path = save_analyzed(&out_dir, Path::new("Plain.json"), &analyzed).unwrap();

        assert_eq!(path, out_dir.join("analyzed_Plain.json"));
        assert!(path.exists());
    }

    #[test]
    fn legacy_text_rendition() {
        let dir = tempfile::tempdir().unwrap();

        let path = save_story_text(dir.path(), &story("Plain")).unwrap();
        let raw = fs::read_to_string(&path).unwrap();

        assert_eq!(path, dir.path().join("Plain.txt"));
        assert_eq!(raw, "Plain\n\nChapter 1\n\nOnce upon a time.");
    }
}
