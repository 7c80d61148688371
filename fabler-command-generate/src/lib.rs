use std::path::Path;

use fabler_client::{clean_chapter, generate_text, Generate, OllamaClient};
use fabler_common::{
    bail,
    models::{Chapter, Story},
    prompt, utils, Conf, Report,
};
use rand::Rng as _;

static GENRES: &[&str] = &[
    "fantasy",
    "science fiction",
    "space opera",
    "cyberpunk",
    "steampunk",
];

// Titles and descriptions are short; the floor just rejects empty output.
const MIN_TITLE_LENGTH: usize = 10;
const MIN_DESCRIPTION_LENGTH: usize = 10;

pub struct GenerateOpts {
    pub min_chapter_length: usize,
    pub max_continuations: usize,
}

#[tracing::instrument(skip(conf, genre), err)]
pub async fn run(
    conf: &Conf,
    stories: u32,
    chapters: u32,
    genre: Option<&str>,
    legacy_text: bool,
) -> Result<(), Report> {
    let client = OllamaClient::new(conf.endpoint(), conf.model(), conf.timeout())?;
    let opts = GenerateOpts {
        min_chapter_length: conf.min_chapter_length(),
        max_continuations: conf.max_continuations(),
    };
    let output = Path::new(conf.output());

    for index in 0..stories {
        let genre = match genre {
            Some(genre) => genre.to_string(),
            None => GENRES[rand::thread_rng().gen_range(0..GENRES.len())].to_string(),
        };

        tracing::info!(story = index + 1, genre = %genre, "generating story");

        let story = match build_story(&client, &genre, chapters as usize, &opts).await {
            Ok(story) => story,
            Err(err) => {
                tracing::error!(error = %err, genre = %genre, "abandoning story");

                continue;
            }
        };

        match fabler_store::save_story(output, &story) {
            Ok(path) => {
                println!(
                    "Story '{}' has been generated and saved to {}",
                    story.title,
                    path.display()
                );
            }
            Err(err) => {
                // The assembled story is still in memory; report and move on.
                tracing::error!(error = %err, title = %story.title, "unable to save story");

                continue;
            }
        }

        if legacy_text {
            match fabler_store::save_story_text(output, &story) {
                Ok(path) => println!("Legacy text copy saved to {}", path.display()),
                Err(err) => {
                    tracing::error!(error = %err, title = %story.title, "unable to save legacy text copy");
                }
            }
        }
    }

    Ok(())
}

/// Assembles a story fully in memory: chapters first, then the title and
/// description, which are derived from chapter excerpts and so can only
/// exist once every chapter does.
#[tracing::instrument(skip(service, opts), err)]
pub async fn build_story(
    service: &dyn Generate,
    genre: &str,
    chapter_count: usize,
    opts: &GenerateOpts,
) -> Result<Story, Report> {
    if chapter_count == 0 {
        bail!("a story needs at least one chapter");
    }

    let mut chapters: Vec<Chapter> = Vec::with_capacity(chapter_count);

    for number in 1..=chapter_count {
        tracing::info!(chapter = number, "generating chapter");

        let prompt = if number == 1 {
            prompt::first_chapter(genre)
        } else {
            let opening = utils::first_paragraph(&chapters[0].content);

            prompt::next_chapter(genre, opening, number)
        };

        let raw = generate_text(
            service,
            &prompt,
            opts.min_chapter_length,
            opts.max_continuations,
        )
        .await?;

        chapters.push(Chapter {
            title: format!("Chapter {}", number),
            content: clean_chapter(&raw),
        });
    }

    let excerpts = utils::chapter_excerpts(&chapters);

    let title = generate_text(
        service,
        &prompt::story_title(&excerpts),
        MIN_TITLE_LENGTH,
        opts.max_continuations,
    )
    .await?
    .trim()
    .to_string();

    let description = generate_text(
        service,
        &prompt::story_description(&title, &excerpts),
        MIN_DESCRIPTION_LENGTH,
        opts.max_continuations,
    )
    .await?
    .trim()
    .to_string();

    Ok(Story {
        genre: genre.to_string(),
        title,
        description,
        original_title: None,
        suggested_title: None,
        chapters,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use fabler_client::GenerateError;

    use super::*;

    struct FixedChunks {
        chunk: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Generate for FixedChunks {
        async fn complete(&self, _prompt: &str) -> Result<String, GenerateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            Ok(self.chunk.to_string())
        }
    }

    #[tokio::test]
    async fn one_chapter_story_end_to_end() {
        // 20-char chunks against a 50-char chapter minimum: the chapter
        // takes exactly 3 calls (20, 41, 62); title and description are
        // over their 10-char floor after one call each.
        let service = FixedChunks {
            chunk: "exactly twenty chars",
            calls: AtomicUsize::new(0),
        };
        let opts = GenerateOpts {
            min_chapter_length: 50,
            max_continuations: 16,
        };

        let story = build_story(&service, "fantasy", 1, &opts).await.unwrap();

        assert_eq!(service.calls.load(Ordering::SeqCst), 5);
        assert_eq!(story.chapters.len(), 1);
        assert!(story.chapters[0].content.chars().count() >= 50);

        let dir = tempfile::tempdir().unwrap();
        let path = fabler_store::save_story(dir.path(), &story).unwrap();

        let saved = fabler_store::load_story(&path).unwrap();
        assert_eq!(saved.chapters.len(), 1);
        assert_eq!(saved.genre, "fantasy");
    }

    #[tokio::test]
    async fn zero_chapters_is_rejected() {
        let service = FixedChunks {
            chunk: "exactly twenty chars",
            calls: AtomicUsize::new(0),
        };
        let opts = GenerateOpts {
            min_chapter_length: 50,
            max_continuations: 16,
        };

        assert!(build_story(&service, "fantasy", 0, &opts).await.is_err());
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn chapters_are_numbered_in_order() {
        let service = FixedChunks {
            chunk: "exactly twenty chars",
            calls: AtomicUsize::new(0),
        };
        let opts = GenerateOpts {
            min_chapter_length: 10,
            max_continuations: 16,
        };

        let story = build_story(&service, "cyberpunk", 3, &opts).await.unwrap();

        let titles: Vec<_> = story.chapters.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["Chapter 1", "Chapter 2", "Chapter 3"]);
    }
}
