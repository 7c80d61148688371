use std::path::{Path, PathBuf};

use fabler_client::{Generate, OllamaClient};
use fabler_common::{
    bail,
    models::{AnalyzedChapter, AnalyzedStory},
    prompt, utils, Conf, Report,
};

#[tracing::instrument(skip(conf, files, out_dir), err)]
pub async fn run(conf: &Conf, files: &[PathBuf], out_dir: &Path) -> Result<(), Report> {
    if files.is_empty() {
        bail!("no story files given");
    }

    let client = OllamaClient::new(conf.endpoint(), conf.model(), conf.timeout())?;

    for file in files {
        if let Err(err) = analyze_file(&client, file, out_dir).await {
            tracing::error!(error = %err, file = %file.display(), "unable to analyze story");
        }
    }

    Ok(())
}

#[tracing::instrument(skip(service, file, out_dir), fields(file = %file.display()), err)]
async fn analyze_file(service: &dyn Generate, file: &Path, out_dir: &Path) -> Result<(), Report> {
    let story = fabler_store::load_story(file)?;

    let excerpts = utils::chapter_excerpts(&story.chapters);
    let description = service
        .complete(&prompt::story_description(&story.title, &excerpts))
        .await?
        .trim()
        .to_string();

    let mut chapters = Vec::with_capacity(story.chapters.len());

    for chapter in &story.chapters {
        // The first two paragraphs carry the chapter's essence.
        let context = utils::leading_paragraphs(&chapter.content, 2);
        let suggested = service
            .complete(&prompt::chapter_title(&context))
            .await?
            .trim()
            .to_string();

        chapters.push(AnalyzedChapter {
            original_title: chapter.title.clone(),
            suggested_title: suggested,
            content: chapter.content.clone(),
        });
    }

    let analyzed = AnalyzedStory {
        title: story.title,
        description,
        chapters,
    };

    let path = fabler_store::save_analyzed(out_dir, file, &analyzed)?;

    println!("Analysis saved to {}", path.display());
    println!("Description: {}", analyzed.description);
    println!("\nSuggested chapter titles:");
    for (number, chapter) in analyzed.chapters.iter().enumerate() {
        println!("Chapter {}:", number + 1);
        println!("  Original: {}", chapter.original_title);
        println!("  Suggested: {}", chapter.suggested_title);
    }

    Ok(())
}
