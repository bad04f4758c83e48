/// Session ends once the total reaches this.
pub const MAX_TOTAL_SCORE: f64 = 100.0;
/// No single sentence can be worth more than this, multiplier included.
pub const MAX_SCORE_PER_SENTENCE: f64 = 10.0;

// Ascending tiers; a word earns the score of the largest length it reaches.
const WORD_TIERS: [(usize, u32); 4] = [(4, 1), (5, 3), (7, 5), (10, 6)];

// Keyed on raw sentence char length, not word count.
const SENTENCE_MULTIPLIERS: [(usize, f64); 3] = [(1, 1.0), (10, 1.05), (15, 1.3)];

/// Score for a single word based on its length in chars.
pub fn word_score(word: &str) -> u32 {
    let len = word.chars().count();
    let mut score = 0;
    for (threshold, tier_score) in WORD_TIERS {
        if len >= threshold {
            score = tier_score;
        }
    }
    score
}

/// Sum of word scores over space-split tokens.
pub fn base_score(sentence: &str) -> u32 {
    sentence.split(' ').map(word_score).sum()
}

/// Multiplier for the sentence's overall length.
pub fn length_multiplier(sentence: &str) -> f64 {
    let len = sentence.chars().count();
    let mut factor = 1.0;
    for (threshold, tier_factor) in SENTENCE_MULTIPLIERS {
        if len >= threshold {
            factor = tier_factor;
        }
    }
    factor
}

/// Final per-sentence score, capped at [`MAX_SCORE_PER_SENTENCE`].
pub fn sentence_score(sentence: &str) -> f64 {
    (base_score(sentence) as f64 * length_multiplier(sentence)).min(MAX_SCORE_PER_SENTENCE)
}
