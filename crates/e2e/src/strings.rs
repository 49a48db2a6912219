//! String helpers shared by locators and the runner

use once_cell::sync::Lazy;
use rand::Rng;

/// Tag generated once per process, used to namespace run artifacts
/// (downloads, screenshots) so parallel workers never collide.
pub static RUN_TAG: Lazy<String> = Lazy::new(|| random_alpha(9));

/// Row-match predicate: every expected value must appear somewhere in the
/// actual cells, order-independent, and the actual row may not be shorter
/// than the expected sequence.
pub fn contains_all(actual: &[String], expected: &[&str]) -> bool {
    actual.len() >= expected.len()
        && expected
            .iter()
            .all(|expected| actual.iter().any(|cell| cell == expected))
}

/// Collapse every whitespace run to a single `replacement`.
pub fn replace_spaces(original: &str, replacement: &str) -> String {
    original
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(replacement)
}

/// Random sequence of ASCII letters (mixed case) of the given length.
pub fn random_alpha(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            if rng.gen_bool(0.5) {
                rng.gen_range(b'A'..=b'Z') as char
            } else {
                rng.gen_range(b'a'..=b'z') as char
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test_case(&["a", "b", "c"], &["b", "a"], true ; "subset out of order")]
    #[test_case(&["a", "b"], &["a", "b"], true ; "exact")]
    #[test_case(&["a", "b"], &["a", "b", "c"], false ; "actual shorter")]
    #[test_case(&["a", "b", "c"], &["d"], false ; "missing value")]
    #[test_case(&["a"], &[], true ; "empty expectation")]
    fn contains_all_cases(actual: &[&str], expected: &[&str], outcome: bool) {
        assert_eq!(contains_all(&cells(actual), expected), outcome);
    }

    #[test]
    fn replace_spaces_collapses_runs() {
        assert_eq!(replace_spaces("Job  Title\tX", "-"), "Job-Title-X");
    }

    #[test]
    fn random_alpha_is_letters_of_requested_length() {
        let tag = random_alpha(16);
        assert_eq!(tag.len(), 16);
        assert!(tag.chars().all(|c| c.is_ascii_alphabetic()));
    }

    #[test]
    fn run_tag_is_stable_within_a_process() {
        assert_eq!(&*RUN_TAG, &*RUN_TAG);
        assert_eq!(RUN_TAG.len(), 9);
    }
}
