//! Starter suggestions shown before the first turn.

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub title: &'static str,
    pub subtitle: &'static str,
}

impl Suggestion {
    /// Text placed in the compose box when the suggestion is picked.
    pub fn prompt(&self) -> String {
        format!("{} {}", self.title, self.subtitle)
    }
}

const fn suggestion(title: &'static str, subtitle: &'static str) -> Suggestion {
    Suggestion { title, subtitle }
}

pub const BUILTIN_SUGGESTIONS: [Suggestion; 15] = [
    suggestion("Write an email", "to communicate professionally or casually"),
    suggestion("Summarize a text", "to quickly grasp the key points"),
    suggestion("Generate a code snippet", "to solve a programming challenge efficiently"),
    suggestion("Translate a document", "to make it accessible in another language"),
    suggestion("Brainstorm a business idea", "to explore new opportunities in the market"),
    suggestion("Solve a math problem", "to understand complex calculations step by step"),
    suggestion("Create a practice exam", "to test your knowledge before an important test"),
    suggestion("Plan a weekly meal", "to maintain a balanced and healthy diet"),
    suggestion("Rewrite a paragraph", "to improve clarity and engagement"),
    suggestion("Explain a difficult concept", "to make learning easier and more intuitive"),
    suggestion("Draft a cover letter", "to make a strong impression on employers"),
    suggestion("Craft a social media post", "to capture attention and boost engagement"),
    suggestion("Analyze a dataset", "to extract meaningful insights and trends"),
    suggestion("Invent a movie plot", "to create an exciting and original story"),
    suggestion("Give strategic advice", "to optimize business decisions and performance"),
];

/// Pick `count` distinct suggestions from the thread-local generator.
pub fn pick_suggestions(count: usize) -> Vec<Suggestion> {
    let picks = pick_with_rng(count, &mut rand::rng());
    debug!(count = picks.len(), "picked starter suggestions");
    picks
}

/// Pick up to `count` distinct suggestions.
pub fn pick_with_rng<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Suggestion> {
    BUILTIN_SUGGESTIONS[..]
        .choose_multiple(rng, count)
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn picks_are_distinct_builtins() {
        for seed in [0, 1, 42, u64::MAX] {
            let mut rng = StdRng::seed_from_u64(seed);
            let picks = pick_with_rng(3, &mut rng);
            assert_eq!(picks.len(), 3);
            assert!(picks.iter().all(|p| BUILTIN_SUGGESTIONS.contains(p)));
            assert_ne!(picks[0], picks[1]);
            assert_ne!(picks[1], picks[2]);
            assert_ne!(picks[0], picks[2]);
        }
    }

    #[test]
    fn count_is_capped_by_pool_size() {
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(pick_with_rng(40, &mut rng).len(), BUILTIN_SUGGESTIONS.len());
    }

    #[test]
    fn same_seed_gives_same_picks() {
        let first = pick_with_rng(3, &mut StdRng::seed_from_u64(7));
        let second = pick_with_rng(3, &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
    }

    #[test]
    fn runtime_pick_uses_the_configured_count() {
        assert_eq!(pick_suggestions(3).len(), 3);
    }

    #[test]
    fn prompt_joins_title_and_subtitle() {
        assert_eq!(
            BUILTIN_SUGGESTIONS[1].prompt(),
            "Summarize a text to quickly grasp the key points"
        );
    }
}
