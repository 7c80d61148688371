use std::path::{Path, PathBuf};

use fabler_client::{Generate, OllamaClient};
use fabler_common::{bail, prompt, utils, Conf, Report};

#[tracing::instrument(skip(conf, files), err)]
pub async fn run(conf: &Conf, files: &[PathBuf]) -> Result<(), Report> {
    if files.is_empty() {
        bail!("no story files given");
    }

    let client = OllamaClient::new(conf.endpoint(), conf.model(), conf.timeout())?;

    for file in files {
        if let Err(err) = retitle_file(&client, file).await {
            tracing::error!(error = %err, file = %file.display(), "unable to retitle story");
        }
    }

    Ok(())
}

/// Generates a replacement title from chapter excerpts and rewrites the
/// record in place, keeping the current title as `original_title`.
#[tracing::instrument(skip(service, file), fields(file = %file.display()), err)]
async fn retitle_file(service: &dyn Generate, file: &Path) -> Result<(), Report> {
    let mut story = fabler_store::load_story(file)?;

    let excerpts = utils::chapter_excerpts(&story.chapters);
    let suggested = service
        .complete(&prompt::story_title(&excerpts))
        .await?
        .trim()
        .to_string();

    story.original_title = Some(story.title.clone());
    story.suggested_title = Some(suggested);

    fabler_store::update_story(file, &story)?;

    println!("\n{}:", file.display());
    println!("Original title: {}", story.title);
    if let Some(suggested) = &story.suggested_title {
        println!("Suggested title: {}", suggested);
    }

    Ok(())
}
