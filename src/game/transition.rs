//! Session state machine transitions
//!
//! `submit_answer` is the whole game: it checks the answer on screen,
//! updates the counters, and rolls the next problem unless the session just
//! ended. `reset` brings a terminal session back to initial values.

use rand::Rng;

use super::problem::generate_problem;
use super::state::{GameEvent, Phase, Session};
use crate::consts::{MAX_LEVEL, MAX_LIVES, STREAK_FOR_LEVEL_UP};

/// Result of one answer submission
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub correct: bool,
    /// The answer that was expected (for feedback text)
    pub expected: i32,
    /// Everything that happened, in order
    pub events: Vec<GameEvent>,
}

/// Process one answer submission.
///
/// Unparseable input is never equal to the expected result and takes the
/// incorrect branch. Submissions while the session is terminal are ignored.
///
/// Ordering on a correct answer: level-up (with its life bonus) applies
/// first, then the high-score check runs against the updated session.
pub fn submit_answer(session: &mut Session, raw: &str, rng: &mut impl Rng) -> SubmitOutcome {
    let expected = session.problem.expected();

    if session.phase == Phase::GameOver {
        return SubmitOutcome {
            correct: false,
            expected,
            events: Vec::new(),
        };
    }

    let answer: Option<i32> = raw.trim().parse().ok();
    let correct = answer == Some(expected);
    let mut events = Vec::new();

    if correct {
        session.score += 1;
        session.streak += 1;
        events.push(GameEvent::Correct { expected });

        if session.streak.is_multiple_of(STREAK_FOR_LEVEL_UP) {
            let new_level = (session.level + 1).min(MAX_LEVEL);
            if new_level > session.level {
                session.level = new_level;
                events.push(GameEvent::LevelUp { level: new_level });
            }
            // Life bonus is granted even when already at max level
            if session.lives < MAX_LIVES {
                session.lives += 1;
                events.push(GameEvent::LifeGained);
            }
        }

        if session.score > session.high_score {
            session.high_score = session.score;
            events.push(GameEvent::NewHighScore {
                score: session.score,
            });
        }

        session.problem = generate_problem(session.level, rng);
    } else {
        session.lives = session.lives.saturating_sub(1);
        session.streak = 0;
        events.push(GameEvent::Incorrect { expected });

        if session.level > 1 {
            session.level -= 1;
            events.push(GameEvent::LevelDown {
                level: session.level,
            });
        }

        if session.lives == 0 {
            // Terminal; the last problem stays for the game-over screen
            session.phase = Phase::GameOver;
            events.push(GameEvent::GameOver);
        } else {
            session.problem = generate_problem(session.level, rng);
        }
    }

    SubmitOutcome {
        correct,
        expected,
        events,
    }
}

/// Return to initial values with a fresh level-1 problem. The high score
/// carries over.
pub fn reset(session: &mut Session, rng: &mut impl Rng) {
    *session = Session::new(session.high_score, rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::STARTING_LIVES;
    use crate::game::problem::{Op, Problem};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    fn session_with(problem: Problem) -> Session {
        let mut s = Session::new(0, &mut rng());
        s.problem = problem;
        s
    }

    fn sub_problem(a: i32, b: i32) -> Problem {
        Problem { a, b, op: Op::Sub }
    }

    fn add_problem(a: i32, b: i32) -> Problem {
        Problem { a, b, op: Op::Add }
    }

    /// Answer the current problem correctly, whatever it is
    fn answer_correctly(s: &mut Session, rng: &mut Pcg32) -> SubmitOutcome {
        let expected = s.problem.expected().to_string();
        submit_answer(s, &expected, rng)
    }

    #[test]
    fn test_correct_answer_scores() {
        let mut s = session_with(sub_problem(7, 3));
        let mut r = rng();

        let out = submit_answer(&mut s, "4", &mut r);
        assert!(out.correct);
        assert_eq!(s.score, 1);
        assert_eq!(s.streak, 1);
        assert_eq!(out.events[0], GameEvent::Correct { expected: 4 });
    }

    #[test]
    fn test_incorrect_answer_costs_a_life() {
        let mut s = session_with(add_problem(10, 15));
        let mut r = rng();
        assert_eq!(s.lives, STARTING_LIVES);

        let out = submit_answer(&mut s, "99", &mut r);
        assert!(!out.correct);
        assert_eq!(out.expected, 25);
        assert_eq!(s.lives, STARTING_LIVES - 1);
        assert_eq!(s.streak, 0);
        // Already at level 1 - no demotion below the floor
        assert_eq!(s.level, 1);
    }

    #[test]
    fn test_malformed_input_is_incorrect() {
        let mut s = session_with(sub_problem(7, 3));
        let mut r = rng();

        for raw in ["", "potato", "4.5", "  "] {
            let before = s.lives;
            let out = submit_answer(&mut s, raw, &mut r);
            assert!(!out.correct, "{raw:?} should not be correct");
            assert_eq!(s.lives, before - 1);
            s.lives = before; // keep the session alive for the next case
            s.phase = Phase::Playing;
        }
    }

    #[test]
    fn test_streak_resets_on_miss() {
        let mut s = Session::new(0, &mut rng());
        let mut r = rng();

        for _ in 0..3 {
            answer_correctly(&mut s, &mut r);
        }
        assert_eq!(s.streak, 3);

        submit_answer(&mut s, "not-a-number", &mut r);
        assert_eq!(s.streak, 0);
    }

    #[test]
    fn test_streak_of_ten_levels_up_and_grants_a_life() {
        let mut s = Session::new(0, &mut rng());
        let mut r = rng();

        for _ in 0..9 {
            answer_correctly(&mut s, &mut r);
        }
        assert_eq!(s.level, 1);
        assert_eq!(s.lives, STARTING_LIVES);

        let out = answer_correctly(&mut s, &mut r);
        assert_eq!(s.streak, 10);
        assert_eq!(s.level, 2);
        assert_eq!(s.lives, STARTING_LIVES + 1);
        assert!(out.events.contains(&GameEvent::LevelUp { level: 2 }));
        assert!(out.events.contains(&GameEvent::LifeGained));
    }

    #[test]
    fn test_level_caps_at_max() {
        let mut s = Session::new(0, &mut rng());
        let mut r = rng();

        // 40 straight correct answers: level-ups at streaks 10/20/30/40
        for _ in 0..40 {
            answer_correctly(&mut s, &mut r);
        }
        assert_eq!(s.level, MAX_LEVEL);
        assert_eq!(s.lives, MAX_LIVES);

        // Ten more: still capped, no LevelUp event, no life past the cap
        for _ in 0..10 {
            let out = answer_correctly(&mut s, &mut r);
            assert!(
                !out.events.iter().any(|e| matches!(e, GameEvent::LevelUp { .. })),
                "no level-up past the cap"
            );
        }
        assert_eq!(s.level, MAX_LEVEL);
        assert_eq!(s.lives, MAX_LIVES);
    }

    #[test]
    fn test_miss_demotes_one_level() {
        let mut s = Session::new(0, &mut rng());
        let mut r = rng();
        s.level = 3;
        s.problem = sub_problem(30, 10);

        let out = submit_answer(&mut s, "wrong", &mut r);
        assert_eq!(s.level, 2);
        assert!(out.events.contains(&GameEvent::LevelDown { level: 2 }));
    }

    #[test]
    fn test_new_high_score_event() {
        let mut s = Session::new(2, &mut rng());
        let mut r = rng();

        // First two correct answers only tie the stored best
        answer_correctly(&mut s, &mut r);
        let out = answer_correctly(&mut s, &mut r);
        assert_eq!(s.high_score, 2);
        assert!(
            !out.events.iter().any(|e| matches!(e, GameEvent::NewHighScore { .. }))
        );

        let out = answer_correctly(&mut s, &mut r);
        assert_eq!(s.high_score, 3);
        assert!(out.events.contains(&GameEvent::NewHighScore { score: 3 }));
    }

    #[test]
    fn test_last_life_ends_the_session() {
        let mut s = session_with(sub_problem(12, 5));
        let mut r = rng();
        s.lives = 1;
        s.level = 3;
        let frozen = s.problem;

        let out = submit_answer(&mut s, "0", &mut r);
        assert_eq!(s.lives, 0);
        assert!(s.is_game_over());
        assert!(out.events.contains(&GameEvent::GameOver));
        // No new problem once terminal
        assert_eq!(s.problem, frozen);
    }

    #[test]
    fn test_submissions_ignored_while_terminal() {
        let mut s = session_with(sub_problem(12, 5));
        let mut r = rng();
        s.lives = 1;
        submit_answer(&mut s, "0", &mut r);
        assert!(s.is_game_over());

        let snapshot = s.clone();
        let out = submit_answer(&mut s, "7", &mut r);
        assert!(out.events.is_empty());
        assert_eq!(s.score, snapshot.score);
        assert_eq!(s.lives, snapshot.lives);
        assert!(s.is_game_over());
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut s = Session::new(5, &mut rng());
        let mut r = rng();

        for _ in 0..12 {
            answer_correctly(&mut s, &mut r);
        }
        s.lives = 1;
        submit_answer(&mut s, "drop", &mut r);
        assert!(s.is_game_over());
        let best = s.high_score;

        reset(&mut s, &mut r);
        assert_eq!(s.phase, Phase::Playing);
        assert_eq!(s.score, 0);
        assert_eq!(s.streak, 0);
        assert_eq!(s.level, 1);
        assert_eq!(s.lives, STARTING_LIVES);
        // Best score survives the reset
        assert_eq!(s.high_score, best);
    }

    #[test]
    fn test_next_problem_matches_current_level() {
        use crate::game::problem::tier_for_level;

        let mut s = Session::new(0, &mut rng());
        let mut r = rng();

        for _ in 0..10 {
            answer_correctly(&mut s, &mut r);
        }
        assert_eq!(s.level, 2);
        let tier = tier_for_level(2);
        assert!(s.problem.a >= tier.min && s.problem.a <= tier.max);
    }
}
