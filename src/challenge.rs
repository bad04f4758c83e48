use rand::seq::SliceRandom;
use rand::Rng;

/// Pool of challenge phrases served via a shuffled draw-without-replacement
/// buffer. Every phrase is drawn once per full cycle before any repeats; a
/// repeat straddling the refill boundary is possible.
#[derive(Debug, Clone)]
pub struct ChallengePool {
    source: Vec<String>,
    buffer: Vec<String>,
}

impl ChallengePool {
    /// Split raw text on newline into the source list. Lenient mode keeps
    /// blank lines as empty-string challenges; strict mode drops them.
    pub fn parse(raw: &str, strict: bool) -> Self {
        let source = raw
            .split('\n')
            .map(|line| line.trim_end_matches('\r').to_string())
            .filter(|line| !strict || !line.trim().is_empty())
            .collect();
        Self {
            source,
            buffer: Vec::new(),
        }
    }

    pub fn from_phrases(phrases: Vec<String>) -> Self {
        Self {
            source: phrases,
            buffer: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Pop the next challenge, reshuffling the full source list when the
    /// working buffer runs dry. `None` only when the source list is empty.
    pub fn draw(&mut self) -> Option<String> {
        if self.source.is_empty() {
            return None;
        }
        if self.buffer.is_empty() {
            self.buffer = self.source.clone();
            self.buffer.shuffle(&mut rand::thread_rng());
        }
        self.buffer.pop()
    }

    /// One challenge roll: with the given probability draw a new challenge,
    /// otherwise leave none active until the next roll.
    pub fn roll(&mut self, probability: f64) -> Option<String> {
        let mut rng = rand::thread_rng();
        if rng.gen_bool(probability.clamp(0.0, 1.0)) {
            self.draw()
        } else {
            None
        }
    }
}

/// An active challenge is satisfied when the sentence contains it as a
/// substring. No challenge, or an empty-string challenge, always passes.
pub fn challenge_complete(sentence: &str, challenge: Option<&str>) -> bool {
    match challenge {
        None => true,
        Some("") => true,
        Some(phrase) => sentence.contains(phrase),
    }
}
