// Abbreviation-aware sentence segmentation.
//
// A sentence ends at a run of `.`, `!` or `?` (plus any closing quotes or
// brackets) followed by whitespace or end of text. A period does NOT end a
// sentence when it closes a known abbreviation ("Mr.", "Inc.", "e.g."), a
// reference abbreviation followed by a number ("No. 5"), a single-letter
// initial ("J. Smith"), or when the next word starts in lowercase. Decimal
// points never qualify because they are not followed by whitespace. Line
// breaks inside a sentence are folded into spaces, since PDF extraction wraps
// lines mid-sentence.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Lowercased abbreviations (without their trailing period) that do not end
/// a sentence.
static ABBREVIATIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // titles
        "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "rev", "hon", "capt", "lt", "sgt",
        "gov", "sen", "pres",
        // business and legal
        "inc", "ltd", "corp", "llc", "plc", "pvt", "bros", "dept", "assn",
        // references
        "eds", "approx", "cf", "al", "ibid", "viz", "vs", "etc", "misc",
        // months and days
        "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
        "tue", "tues", "thu", "thur", "thurs", "fri",
        // units and currency
        "rs", "mn", "bn", "cr", "avg", "ft", "oz", "lb", "lbs",
    ]
    .into_iter()
    .collect()
});

/// Reference abbreviations that are also ordinary words ("no", "art"). They
/// only hold a sentence open when a number follows: "No. 5", "Sec. 12(3)".
static NUMBERED_ABBREVIATIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "no", "nos", "vol", "vols", "fig", "figs", "pp", "ch", "sec", "art", "para", "reg",
    ]
    .into_iter()
    .collect()
});

const TERMINATORS: [char; 3] = ['.', '!', '?'];
const CLOSERS: [char; 8] = ['"', '\'', ')', ']', '}', '\u{201D}', '\u{2019}', '\u{00BB}'];

/// Split `text` into sentences, in order, with internal whitespace collapsed.
///
/// Blank fragments are dropped, so whitespace-only input yields no sentences.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        let (_, c) = chars[i];
        if !TERMINATORS.contains(&c) {
            i += 1;
            continue;
        }

        // Swallow the whole terminator run ("?!", "...") and any closers
        let run_start = i;
        while i < chars.len() && TERMINATORS.contains(&chars[i].1) {
            i += 1;
        }
        let run_end = i;
        while i < chars.len() && CLOSERS.contains(&chars[i].1) {
            i += 1;
        }

        // A boundary needs whitespace (or end of text) right after
        let at_end = i >= chars.len();
        if !at_end && !chars[i].1.is_whitespace() {
            continue;
        }

        let single_period = run_end - run_start == 1 && chars[run_start].1 == '.';
        if single_period && !at_end {
            let word = word_before(text, chars[run_start].0);
            let rest = &chars[i..];
            if is_abbreviation(word)
                || (is_numbered_abbreviation(word) && next_word_starts_with_digit(rest))
                || next_word_is_lowercase(rest)
            {
                continue;
            }
        }

        let end = if at_end { text.len() } else { chars[i].0 };
        push_sentence(&mut sentences, &text[start..end]);
        start = end;
    }

    if start < text.len() {
        push_sentence(&mut sentences, &text[start..]);
    }

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, fragment: &str) {
    let folded = fragment.split_whitespace().collect::<Vec<_>>().join(" ");
    if !folded.is_empty() {
        sentences.push(folded);
    }
}

/// The whitespace-delimited word ending at byte offset `period`, with any
/// opening punctuation stripped.
fn word_before(text: &str, period: usize) -> &str {
    let before = &text[..period];
    let word_start = before
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(idx, c)| idx + c.len_utf8())
        .unwrap_or(0);
    before[word_start..].trim_start_matches(|c: char| !c.is_alphanumeric())
}

fn is_abbreviation(word: &str) -> bool {
    if word.is_empty() {
        return false;
    }

    // Single-letter initials: "J. R. R. Tolkien"
    let mut letters = word.chars();
    if let (Some(first), None) = (letters.next(), letters.next()) {
        if first.is_alphabetic() {
            return true;
        }
    }

    // Dotted forms: "e.g", "u.s", "a.m"
    if word.contains('.') {
        return true;
    }

    ABBREVIATIONS.contains(word.to_lowercase().as_str())
}

fn is_numbered_abbreviation(word: &str) -> bool {
    NUMBERED_ABBREVIATIONS.contains(word.to_lowercase().as_str())
}

fn next_char(rest: &[(usize, char)]) -> Option<char> {
    rest.iter().map(|(_, c)| *c).find(|c| !c.is_whitespace())
}

fn next_word_is_lowercase(rest: &[(usize, char)]) -> bool {
    next_char(rest).is_some_and(|c| c.is_lowercase())
}

fn next_word_starts_with_digit(rest: &[(usize, char)]) -> bool {
    next_char(rest).is_some_and(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_sentences() {
        let s = split_sentences("Profits rose. Costs fell! Was it enough? Yes.");
        assert_eq!(s, vec!["Profits rose.", "Costs fell!", "Was it enough?", "Yes."]);
    }

    #[test]
    fn test_abbreviations_do_not_split() {
        let s = split_sentences("Mr. Chandrasekaran chairs Tata Sons Pvt. Ltd. The board agreed.");
        assert_eq!(
            s,
            vec!["Mr. Chandrasekaran chairs Tata Sons Pvt. Ltd. The board agreed."]
        );
    }

    #[test]
    fn test_dotted_abbreviations_and_initials() {
        let s = split_sentences("Markets e.g. the U.S. grew. J. Smith disagreed.");
        assert_eq!(s, vec!["Markets e.g. the U.S. grew.", "J. Smith disagreed."]);
    }

    #[test]
    fn test_common_words_end_sentences() {
        for (text, first, second) in [
            ("Our mills use state of the art. The plant grew.", "Our mills use state of the art.", "The plant grew."),
            ("The answer was no. Then the board met.", "The answer was no.", "Then the board met."),
            ("We reached the max. Demand then eased.", "We reached the max.", "Demand then eased."),
            ("The committee sat. Then it adjourned.", "The committee sat.", "Then it adjourned."),
            ("Plants run on the sun. Wind helps too.", "Plants run on the sun.", "Wind helps too."),
            ("Margins hit the min. Volumes recovered.", "Margins hit the min.", "Volumes recovered."),
        ] {
            assert_eq!(split_sentences(text), vec![first, second], "input: {text:?}");
        }
    }

    #[test]
    fn test_reference_abbreviations_before_numbers() {
        let s = split_sentences("See Note No. 5 and Sec. 12(3) of the Act. Art. 21 applies.");
        assert_eq!(s, vec!["See Note No. 5 and Sec. 12(3) of the Act.", "Art. 21 applies."]);
    }

    #[test]
    fn test_reference_abbreviation_without_number_splits() {
        let s = split_sentences("Refer to the sec. Then continue. It was a no. Nobody objected.");
        assert_eq!(
            s,
            vec!["Refer to the sec.", "Then continue.", "It was a no.", "Nobody objected."]
        );
    }

    #[test]
    fn test_decimals_do_not_split() {
        let s = split_sentences("Output was 3.5 million tonnes. Demand held.");
        assert_eq!(s, vec!["Output was 3.5 million tonnes.", "Demand held."]);
    }

    #[test]
    fn test_lowercase_continuation_does_not_split() {
        let s = split_sentences("See the table in sec. four for details.");
        assert_eq!(s, vec!["See the table in sec. four for details."]);
    }

    #[test]
    fn test_closing_quotes_stay_with_sentence() {
        let s = split_sentences("He said \"we grew.\" Then he left.");
        assert_eq!(s, vec!["He said \"we grew.\"", "Then he left."]);
    }

    #[test]
    fn test_newlines_fold_into_spaces() {
        let s = split_sentences("The company delivered\nstrong results this\nyear. Outlook is stable.");
        assert_eq!(
            s,
            vec!["The company delivered strong results this year.", "Outlook is stable."]
        );
    }

    #[test]
    fn test_trailing_fragment_without_terminator() {
        let s = split_sentences("First one. And a trailing heading");
        assert_eq!(s, vec!["First one.", "And a trailing heading"]);
    }

    #[test]
    fn test_blank_input() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n\t ").is_empty());
    }
}
