use crate::challenge::{challenge_complete, ChallengePool};
use crate::lexicon::{Lexicon, Verdict};
use crate::scoring;
use std::time::SystemTime;

pub const TICK_RATE_MS: u64 = 100;

// 3 blinks, each one colored tick and one cleared tick.
const BLINK_PHASES: u8 = 6;
// The floating score indicator lives for ~3 seconds.
const SCORE_FLOAT_TICKS: u16 = 30;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlashKind {
    Accept,
    Reject,
}

/// Blinking background feedback on the input line. While a flash is running
/// the game is locked and all input is dropped.
#[derive(Debug, Clone, Copy)]
pub struct Flash {
    pub kind: FlashKind,
    remaining: u8,
}

impl Flash {
    fn new(kind: FlashKind) -> Self {
        Self {
            kind,
            remaining: BLINK_PHASES,
        }
    }

    pub fn is_lit(&self) -> bool {
        self.remaining % 2 == 0
    }
}

/// Transient "+N" indicator shown after an accepted sentence.
#[derive(Debug, Clone, Copy)]
pub struct ScoreFloat {
    pub amount: f64,
    remaining: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    EmptySentence,
    UnknownWord(String),
    ChallengeMissed(String),
}

#[derive(Debug, Clone)]
pub struct GameRules {
    pub validate: bool,
    pub challenge_probability: f64,
    pub goal: f64,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            validate: false,
            challenge_probability: 0.3,
            goal: scoring::MAX_TOTAL_SCORE,
        }
    }
}

/// One play session: the visible text buffer, cumulative score, accepted
/// sentence history and the active challenge, advanced by key events and
/// 100ms ticks.
#[derive(Debug)]
pub struct Game {
    pub buffer: String,
    pub total_score: f64,
    pub accepted: Vec<String>,
    pub current_challenge: Option<String>,
    pub flash: Option<Flash>,
    pub score_float: Option<ScoreFloat>,
    pub last_rejection: Option<Rejection>,
    pub started_at: Option<SystemTime>,
    pub goal_reached: bool,
    lexicon: Lexicon,
    pool: ChallengePool,
    rules: GameRules,
}

impl Game {
    pub fn new(lexicon: Lexicon, pool: ChallengePool, rules: GameRules) -> Self {
        Self {
            buffer: String::new(),
            total_score: 0.0,
            accepted: vec![],
            current_challenge: None,
            flash: None,
            score_float: None,
            last_rejection: None,
            started_at: None,
            goal_reached: false,
            lexicon,
            pool,
            rules,
        }
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// True while a flash is being played; input is dropped until it ends.
    pub fn is_locked(&self) -> bool {
        self.flash.is_some()
    }

    pub fn is_over(&self) -> bool {
        self.goal_reached
    }

    /// Fraction of the goal reached, in 0..=1.
    pub fn progress(&self) -> f64 {
        if self.rules.goal <= 0.0 {
            return 1.0;
        }
        (self.total_score / self.rules.goal).clamp(0.0, 1.0)
    }

    fn accepts_char(c: char) -> bool {
        matches!(c, 'a'..='z' | 'A'..='Z' | ' ' | 'æ' | 'ø' | 'å' | 'Æ' | 'Ø' | 'Å')
    }

    pub fn type_char(&mut self, c: char) {
        if self.is_locked() || self.goal_reached || !Self::accepts_char(c) {
            return;
        }
        if self.started_at.is_none() {
            self.started_at = Some(SystemTime::now());
        }
        self.buffer.push(c);
    }

    pub fn backspace(&mut self) {
        if self.is_locked() || self.goal_reached {
            return;
        }
        self.buffer.pop();
    }

    /// Submit the buffer for scoring. Acceptance requires the word-list check
    /// (when enabled) and the active challenge as a substring. The buffer is
    /// cleared when the feedback flash finishes, not here.
    pub fn commit(&mut self) {
        if self.is_locked() || self.goal_reached {
            return;
        }

        let sentence = self.buffer.trim().to_string();

        let verdict = if self.rules.validate {
            self.lexicon.check(&sentence)
        } else {
            Verdict::Valid
        };

        if verdict == Verdict::Valid
            && challenge_complete(&sentence, self.current_challenge.as_deref())
        {
            let score = scoring::sentence_score(&sentence);
            self.accepted.push(sentence);
            self.total_score = (self.total_score + score).min(self.rules.goal);
            self.score_float = Some(ScoreFloat {
                amount: score,
                remaining: SCORE_FLOAT_TICKS,
            });
            self.last_rejection = None;
            self.flash = Some(Flash::new(FlashKind::Accept));
        } else {
            self.last_rejection = Some(match verdict {
                Verdict::Empty => Rejection::EmptySentence,
                Verdict::UnknownWord(word) => Rejection::UnknownWord(word),
                Verdict::Valid => Rejection::ChallengeMissed(
                    self.current_challenge.clone().unwrap_or_default(),
                ),
            });
            self.flash = Some(Flash::new(FlashKind::Reject));
        }
    }

    /// Advance animation timers by one tick. Goal detection and the next
    /// challenge roll happen when the accept flash finishes, mirroring the
    /// commit path's ordering.
    pub fn on_tick(&mut self) {
        if let Some(mut float) = self.score_float {
            float.remaining -= 1;
            self.score_float = (float.remaining > 0).then_some(float);
        }

        if let Some(mut flash) = self.flash {
            flash.remaining -= 1;
            if flash.remaining > 0 {
                self.flash = Some(flash);
                return;
            }
            self.flash = None;
            self.buffer.clear();
            if flash.kind == FlashKind::Accept {
                if self.total_score >= self.rules.goal {
                    self.goal_reached = true;
                    self.current_challenge = None;
                } else {
                    self.roll_challenge();
                }
            }
        }
    }

    /// Clear any active challenge, then draw a new one with the configured
    /// probability.
    fn roll_challenge(&mut self) {
        self.current_challenge = self.pool.roll(self.rules.challenge_probability);
    }

    pub fn has_active_animation(&self) -> bool {
        self.flash.is_some() || self.score_float.is_some()
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.started_at
            .and_then(|t| t.elapsed().ok())
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }
}
