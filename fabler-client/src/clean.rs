/// Strips leading `Chapter …` heading lines the model likes to emit before
/// the actual prose.
///
/// Blank lines and heading lines are dropped until the first real content
/// line; everything after that is kept verbatim. The result is trimmed of
/// surrounding whitespace.
pub fn clean_chapter(raw: &str) -> String {
    let mut started = false;
    let mut kept = Vec::new();

    for line in raw.lines() {
        if !started {
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with("Chapter") {
                continue;
            }

            started = true;
        }

        kept.push(line);
    }

    kept.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_leading_heading() {
        assert_eq!(clean_chapter("Chapter 3\n\nThe city burned."), "The city burned.");
    }

    #[test]
    fn drops_stacked_headings_and_blanks() {
        assert_eq!(
            clean_chapter("\nChapter 1\nChapter One\n\nIt began at dusk."),
            "It began at dusk."
        );
    }

    #[test]
    fn keeps_later_heading_lines_verbatim() {
        let raw = "Chapter 2\n\nShe ran.\n\nChapter of the Guild\nwas the sign above the door.";

        assert_eq!(
            clean_chapter(raw),
            "She ran.\n\nChapter of the Guild\nwas the sign above the door."
        );
    }

    #[test]
    fn heading_free_input_is_only_trimmed() {
        assert_eq!(clean_chapter("  The city burned.\n"), "The city burned.");
    }

    #[test]
    fn preserves_blank_lines_inside_content() {
        assert_eq!(clean_chapter("First.\n\nSecond."), "First.\n\nSecond.");
    }
}
