//! Math Adventure entry point
//!
//! Handles platform-specific initialization and wires DOM events to the
//! game core.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlInputElement};

    use math_adventure::audio::{AudioManager, SoundEffect};
    use math_adventure::consts::FEEDBACK_DELAY_MS;
    use math_adventure::game::{GameEvent, Session, transition};
    use math_adventure::{HighScore, Settings};

    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Game instance holding all state
    struct Game {
        session: Session,
        rng: Pcg32,
        audio: AudioManager,
        settings: Settings,
        best: HighScore,
        /// Whether this run beat the stored best (for the game-over banner)
        new_best_this_run: bool,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let best = HighScore::load();
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_volume(settings.effective_volume());
            let mut rng = Pcg32::seed_from_u64(seed);
            Self {
                session: Session::new(best.0, &mut rng),
                rng,
                audio,
                settings,
                best,
                new_best_this_run: false,
            }
        }

        /// Restart after game over. The stored best carries over.
        fn restart(&mut self) {
            transition::reset(&mut self.session, &mut self.rng);
            self.new_best_this_run = false;
        }

        /// Update score/lives/level/streak in the DOM
        fn update_hud(&self) {
            let document = document();
            set_text(&document, "hud-score", &self.session.score.to_string());
            set_text(&document, "hud-best", &self.session.high_score.to_string());
            set_text(&document, "hud-lives", &self.session.lives.to_string());
            set_text(&document, "hud-level", &self.session.level.to_string());
            set_text(&document, "hud-streak", &self.session.streak.to_string());
        }

        /// Show the current problem and clear the answer box
        fn show_problem(&self) {
            let document = document();
            let p = &self.session.problem;
            set_text(
                &document,
                "problem",
                &format!("{} {} {} = ?", p.a, p.op.symbol(), p.b),
            );
            if let Some(input) = answer_input(&document) {
                input.set_value("");
                let _ = input.focus();
            }
            set_text(&document, "feedback", "");
        }

        /// Fill in and reveal the game-over overlay
        fn show_game_over(&self) {
            let document = document();
            set_text(&document, "final-score", &self.session.score.to_string());
            set_text(&document, "final-level", &self.session.level.to_string());
            set_text(&document, "final-best", &self.session.high_score.to_string());

            if let Some(el) = document.get_element_by_id("new-best-banner") {
                let class = if self.new_best_this_run { "banner" } else { "banner hidden" };
                let _ = el.set_attribute("class", class);
            }
            if let Some(el) = document.get_element_by_id("game-over") {
                let _ = el.set_attribute("class", "overlay");
            }
            if let Some(el) = document.get_element_by_id("play-area") {
                let _ = el.set_attribute("class", "hidden");
            }
        }

        fn hide_game_over(&self) {
            let document = document();
            if let Some(el) = document.get_element_by_id("game-over") {
                let _ = el.set_attribute("class", "overlay hidden");
            }
            if let Some(el) = document.get_element_by_id("play-area") {
                let _ = el.set_attribute("class", "");
            }
        }

        /// Flash the card on a correct answer (if celebrations are on)
        fn celebrate(&self, on: bool) {
            if !self.settings.celebrations {
                return;
            }
            if let Some(el) = document().get_element_by_id("card") {
                let class = if on { "card celebrate" } else { "card" };
                let _ = el.set_attribute("class", class);
            }
        }
    }

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn answer_input(document: &Document) -> Option<HtmlInputElement> {
        document
            .get_element_by_id("answer")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    }

    /// Process the answer currently in the input box
    fn submit(game: &Rc<RefCell<Game>>) {
        let game_over = {
            let mut g = game.borrow_mut();
            let g = &mut *g;
            if g.session.is_game_over() {
                return;
            }

            let raw = match answer_input(&document()) {
                Some(input) => input.value(),
                None => return,
            };
            if raw.trim().is_empty() {
                return;
            }

            let outcome = transition::submit_answer(&mut g.session, &raw, &mut g.rng);

            // Feedback text mirrors the event order: a level change message
            // wins over the plain correct/incorrect line
            let mut feedback = if outcome.correct {
                "Correct! 🎉".to_string()
            } else {
                format!("Not quite! The answer was {}. Try again!", outcome.expected)
            };

            for event in &outcome.events {
                match event {
                    GameEvent::Correct { .. } => g.audio.play(SoundEffect::Correct),
                    GameEvent::Incorrect { .. } => g.audio.play(SoundEffect::Wrong),
                    GameEvent::LevelUp { level } => {
                        g.audio.play(SoundEffect::LevelUp);
                        feedback = format!("Level Up! 🚀 Welcome to Level {level}!");
                    }
                    GameEvent::LevelDown { level } => {
                        feedback = format!("Let's go back to Level {level} and try again!");
                    }
                    GameEvent::LifeGained => {}
                    GameEvent::NewHighScore { score } => {
                        g.audio.play(SoundEffect::HighScore);
                        g.new_best_this_run = true;
                        if g.best.record(*score) {
                            log::info!("New high score: {score}");
                        }
                    }
                    GameEvent::GameOver => g.audio.play(SoundEffect::GameOver),
                }
            }

            set_text(&document(), "feedback", &feedback);
            g.celebrate(outcome.correct);
            g.update_hud();

            if g.session.is_game_over() {
                g.show_game_over();
            }
            g.session.is_game_over()
        };

        // Cosmetic pacing: reveal the next problem after the feedback pause.
        // No cancellation needed - a superseding reset just overwrites.
        if !game_over {
            schedule_next_problem(game.clone());
        }
    }

    fn schedule_next_problem(game: Rc<RefCell<Game>>) {
        let closure = Closure::once(move || {
            let g = game.borrow();
            if !g.session.is_game_over() {
                g.celebrate(false);
                g.show_problem();
            }
        });
        let _ = web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                FEEDBACK_DELAY_MS,
            );
        closure.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Math Adventure starting...");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Session started with seed: {seed}");

        {
            let g = game.borrow();
            g.update_hud();
            g.show_problem();
        }
        sync_sound_button(&game.borrow());

        setup_answer_handlers(game.clone());
        setup_play_again_button(game.clone());
        setup_sound_toggle(game);

        log::info!("Math Adventure running!");
    }

    fn setup_answer_handlers(game: Rc<RefCell<Game>>) {
        let document = document();

        // Enter key in the answer box
        if let Some(input) = document.get_element_by_id("answer") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if event.key() == "Enter" {
                    // First gesture also unlocks the audio context
                    game.borrow().audio.resume();
                    submit(&game);
                }
            });
            let _ =
                input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Check button
        if let Some(btn) = document.get_element_by_id("check-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow().audio.resume();
                submit(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_play_again_button(game: Rc<RefCell<Game>>) {
        if let Some(btn) = document().get_element_by_id("play-again-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.restart();
                g.hide_game_over();
                g.update_hud();
                g.show_problem();
                log::info!("New session started");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_sound_toggle(game: Rc<RefCell<Game>>) {
        if let Some(btn) = document().get_element_by_id("sound-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.settings.sound_enabled = !g.settings.sound_enabled;
                g.settings.save();
                let vol = g.settings.effective_volume();
                g.audio.set_volume(vol);
                sync_sound_button(&g);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn sync_sound_button(game: &Game) {
        let label = if game.settings.sound_enabled { "🔊" } else { "🔇" };
        set_text(&document(), "sound-btn", label);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Math Adventure (native) starting...");
    log::info!("This is a browser game - run with `trunk serve` for the web version");

    // Smoke-run a short session
    println!("\nRunning session smoke test...");
    demo_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_session() {
    use math_adventure::game::{Session, transition};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    let mut rng = Pcg32::seed_from_u64(12345);
    let mut session = Session::new(0, &mut rng);

    for _ in 0..12 {
        let answer = session.problem.expected().to_string();
        let outcome = transition::submit_answer(&mut session, &answer, &mut rng);
        assert!(outcome.correct, "Known answer should be accepted");
    }
    assert_eq!(session.score, 12);
    assert_eq!(session.level, 2, "Streak of 10 should have advanced a level");
    println!("✓ Session smoke test passed!");
}
