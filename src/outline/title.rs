//! Title identification from the first page.

use crate::model::TextSpan;

/// How many of the largest spans form the title.
pub const TITLE_SPAN_COUNT: usize = 2;

/// Build a title from the largest spans of the first page.
///
/// Spans without visible text are ignored. The remaining spans are ordered
/// by font size, largest first; the sort is stable, so spans of equal size
/// keep their reading order. The trimmed texts of the first
/// [`TITLE_SPAN_COUNT`] are joined with a single space in that size order.
/// A page without text yields an empty title.
pub fn identify_title(first_page: &[TextSpan]) -> String {
    let mut candidates: Vec<&TextSpan> = first_page.iter().filter(|s| s.has_text()).collect();
    candidates.sort_by(|a, b| b.size.total_cmp(&a.size));

    candidates
        .iter()
        .take(TITLE_SPAN_COUNT)
        .map(|s| s.trimmed())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_largest_in_size_order() {
        let spans = vec![
            TextSpan::plain("Subtitle", 16.0),
            TextSpan::plain("body", 10.0),
            TextSpan::plain("  Main Title ", 28.0),
        ];
        assert_eq!(identify_title(&spans), "Main Title Subtitle");
    }

    #[test]
    fn test_ties_keep_reading_order() {
        let spans = vec![
            TextSpan::plain("Big Title", 24.0),
            TextSpan::plain("intro", 10.0),
            TextSpan::plain("This is body text of normal length and font.", 10.0),
        ];
        assert_eq!(identify_title(&spans), "Big Title intro");

        let spans = vec![
            TextSpan::plain("first", 20.0),
            TextSpan::plain("second", 20.0),
            TextSpan::plain("third", 20.0),
        ];
        assert_eq!(identify_title(&spans), "first second");
    }

    #[test]
    fn test_single_span() {
        assert_eq!(identify_title(&[TextSpan::plain(" Only ", 12.0)]), "Only");
    }

    #[test]
    fn test_empty_spans_skipped() {
        let spans = vec![
            TextSpan::plain("   ", 40.0),
            TextSpan::plain("Report", 20.0),
            TextSpan::plain("", 30.0),
        ];
        assert_eq!(identify_title(&spans), "Report");
    }

    #[test]
    fn test_no_spans() {
        assert_eq!(identify_title(&[]), "");
        assert_eq!(identify_title(&[TextSpan::plain("\t", 12.0)]), "");
    }
}
