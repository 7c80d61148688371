//! Prompt templates sent to the generation service.
//!
//! Title and description prompts take chapter excerpts rather than whole
//! chapters, so the context stays small no matter how long the story ran.

pub fn first_chapter(genre: &str) -> String {
    format!(
        "Write the first chapter of a {} story. \
         Make it engaging and set the stage for an epic adventure:",
        genre
    )
}

pub fn next_chapter(genre: &str, opening: &str, number: usize) -> String {
    format!(
        "Continue the {} story that begins with the following excerpt. \
         Write chapter {}, advancing the plot and developing the characters:\
         \n\n{}",
        genre, number, opening
    )
}

pub fn story_title(excerpts: &str) -> String {
    format!(
        "Based on the following story excerpts, generate a compelling and \
         memorable title that captures the essence of the story. The title \
         should be 2-6 words. Here's the content:\n\n{}\n\n\
         Please provide only the title, without any additional text or formatting.",
        excerpts
    )
}

pub fn story_description(title: &str, excerpts: &str) -> String {
    format!(
        "Based on the following excerpts from '{}', generate a compelling \
         2-3 sentence description of the story. Make it engaging but avoid \
         spoilers. Here are the excerpts:\n\n{}\n\n\
         Please provide only the description, without any additional text or formatting.",
        title, excerpts
    )
}

pub fn chapter_title(context: &str) -> String {
    format!(
        "Based on the following chapter content, generate a short, \
         compelling chapter title that captures the main theme or event. \
         The title should be 2-6 words. Here's the content:\n\n{}\n\n\
         Please provide only the title, without any additional text or formatting.",
        context
    )
}
