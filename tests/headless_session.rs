use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use skriv::challenge::ChallengePool;
use skriv::game::{Game, GameRules};
use skriv::lexicon::Lexicon;
use skriv::runtime::{FixedTicker, GameEvent, Runner, TestEventSource};

fn test_game(rules: GameRules) -> Game {
    let lexicon = Lexicon::parse("test", "en\nfin\nkatt\nhund\nlang\nog\nsetning\n", true);
    let pool = ChallengePool::from_phrases(vec!["fin katt".to_string()]);
    Game::new(lexicon, pool, rules)
}

fn send_sentence(tx: &mpsc::Sender<GameEvent>, sentence: &str) {
    for c in sentence.chars() {
        tx.send(GameEvent::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::NONE,
        )))
        .unwrap();
    }
    tx.send(GameEvent::Key(KeyEvent::new(
        KeyCode::Enter,
        KeyModifiers::NONE,
    )))
    .unwrap();
}

// Headless integration using the internal runtime + Game without a TTY.
// Verifies that a full round completes via Runner/TestEventSource.
#[test]
fn headless_round_reaches_goal() {
    let mut game = test_game(GameRules {
        challenge_probability: 0.0,
        goal: 4.0,
        ..GameRules::default()
    });

    let (tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let ticker = FixedTicker::new(Duration::from_millis(1));
    let runner = Runner::new(es, ticker);

    // Two sentences worth 2.6 each against a goal of 4. Each sentence is
    // sent only after the previous accept flash has released the lock.
    for round in 1..=2usize {
        send_sentence(&tx, "en lang og fin katt");

        for _ in 0..500u32 {
            match runner.step() {
                GameEvent::Tick => game.on_tick(),
                GameEvent::Resize => {}
                GameEvent::Key(key) => match key.code {
                    KeyCode::Enter => game.commit(),
                    KeyCode::Backspace => game.backspace(),
                    KeyCode::Char(c) => game.type_char(c),
                    _ => {}
                },
            }
            if game.accepted.len() == round && !game.is_locked() {
                break;
            }
        }
    }

    assert!(game.is_over(), "round should reach its goal");
    assert_eq!(game.accepted.len(), 2);
    assert_eq!(game.total_score, 4.0); // clamped at the goal
}

#[test]
fn headless_keystrokes_during_flash_are_dropped() {
    let mut game = test_game(GameRules {
        challenge_probability: 0.0,
        ..GameRules::default()
    });

    // Commit, then immediately type more without letting the flash finish
    for c in "katt".chars() {
        game.type_char(c);
    }
    game.commit();
    for c in "hund".chars() {
        game.type_char(c);
    }
    game.commit();

    assert_eq!(game.accepted.len(), 1, "second commit arrived while locked");
    assert_eq!(game.buffer, "katt");

    // Let the flash play out; the buffer clears and input works again
    for _ in 0..6 {
        game.on_tick();
    }
    assert_eq!(game.buffer, "");
    for c in "hund".chars() {
        game.type_char(c);
    }
    assert_eq!(game.buffer, "hund");
}

#[test]
fn headless_challenge_cycle() {
    let mut game = test_game(GameRules {
        challenge_probability: 1.0,
        ..GameRules::default()
    });

    // First accepted sentence always rolls a challenge at probability 1
    for c in "hund".chars() {
        game.type_char(c);
    }
    game.commit();
    for _ in 0..6 {
        game.on_tick();
    }
    assert_eq!(game.current_challenge, Some("fin katt".to_string()));

    // A sentence without the challenge is rejected and scores nothing
    let before = game.total_score;
    for c in "hund".chars() {
        game.type_char(c);
    }
    game.commit();
    for _ in 0..6 {
        game.on_tick();
    }
    assert_eq!(game.total_score, before);
    assert_eq!(game.accepted.len(), 1);

    // Working the challenge into the sentence is accepted
    for c in "en fin katt og hund".chars() {
        game.type_char(c);
    }
    game.commit();
    for _ in 0..6 {
        game.on_tick();
    }
    assert_eq!(game.accepted.len(), 2);
    assert!(game.total_score > before);
}
