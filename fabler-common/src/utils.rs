use crate::models::Chapter;

/// The text up to the first blank line.
pub fn first_paragraph(text: &str) -> &str {
    text.split("\n\n").next().unwrap_or("")
}

pub fn leading_paragraphs(text: &str, count: usize) -> String {
    text.split("\n\n").take(count).collect::<Vec<_>>().join("\n\n")
}

/// The opening paragraph of every chapter, joined by blank lines.
///
/// Used as prompt context wherever the whole story would blow the model's
/// context window.
pub fn chapter_excerpts(chapters: &[Chapter]) -> String {
    chapters
        .iter()
        .map(|chapter| first_paragraph(&chapter.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_paragraph_stops_at_blank_line() {
        assert_eq!(first_paragraph("one\ntwo\n\nthree"), "one\ntwo");
        assert_eq!(first_paragraph("no breaks"), "no breaks");
        assert_eq!(first_paragraph(""), "");
    }

    #[test]
    fn leading_paragraphs_takes_at_most_count() {
        assert_eq!(leading_paragraphs("a\n\nb\n\nc", 2), "a\n\nb");
        assert_eq!(leading_paragraphs("a", 2), "a");
    }

    #[test]
    fn excerpts_join_chapter_openings() {
        let chapters = vec![
            Chapter {
                title: "Chapter 1".into(),
                content: "An opening.\n\nMore text.".into(),
            },
            Chapter {
                title: "Chapter 2".into(),
                content: "A second opening.".into(),
            },
        ];

        assert_eq!(
            chapter_excerpts(&chapters),
            "An opening.\n\nA second opening."
        );
    }
}
