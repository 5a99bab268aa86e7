//! Kids Match entry point
//!
//! Native builds run a line-oriented version of the game in the terminal:
//! the composition root wires the shell to log-backed speech and music, the
//! ad presenter and a JSON preferences file. Browser builds start from
//! `kids_match::web` instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host loads the library; see `kids_match::web`
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::io::{self, BufRead, Write};
    use std::thread;
    use std::time::{Duration, Instant};

    use kids_match::ads::{AdPresenter, NullAdNetwork};
    use kids_match::consts::{PROMPT_SPEECH_DELAY, SETTLE_DELAY};
    use kids_match::music::LogMusic;
    use kids_match::persistence::FileStore;
    use kids_match::platform::{self, BackAction};
    use kids_match::speech::LogSpeech;
    use kids_match::strings::UiStrings;
    use kids_match::{Category, Outcome, Shell, View};

    type NativeShell = Shell<LogSpeech, NullAdNetwork, FileStore, LogMusic>;

    const DEFAULT_PREFS_PATH: &str = "kids_match_settings.json";

    pub fn run() {
        platform::init_logging();

        let seed = std::env::var("KIDS_MATCH_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(rand::random);
        let prefs =
            std::env::var("KIDS_MATCH_PREFS").unwrap_or_else(|_| DEFAULT_PREFS_PATH.to_string());
        log::info!("Kids Match starting (seed {seed}, prefs {prefs})");

        let clock = Instant::now();
        let ads = AdPresenter::new(NullAdNetwork, platform::supports_ads());
        let mut shell = Shell::new(LogSpeech, ads, LogMusic, FileStore::new(prefs), seed);
        shell.boot(clock.elapsed());

        render(&shell.view());
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let now = clock.elapsed();
            match line.trim() {
                "q" => break,
                "b" => {
                    if shell.back() == BackAction::Exit {
                        break;
                    }
                }
                "l" => {
                    if let Err(e) = shell.toggle_language(now) {
                        log::error!("{e}");
                    }
                }
                "m" => {
                    let on = shell.toggle_music();
                    println!("Music {}", if on { "on" } else { "off" });
                }
                input => handle_input(&mut shell, input, now),
            }
            settle(&mut shell, clock);
            render(&shell.view());
        }
        log::info!("Bye");
    }

    fn handle_input(shell: &mut NativeShell, input: &str, now: Duration) {
        let Ok(n) = input.parse::<usize>() else {
            println!("?");
            return;
        };
        match shell.view() {
            View::Home { .. } => match n.checked_sub(1).and_then(|i| Category::ALL.get(i)) {
                Some(&category) => {
                    if let Err(e) = shell.select_category(category, now) {
                        log::error!("{e}");
                    }
                }
                None => println!("?"),
            },
            View::Round { round, language, .. } => {
                let Some(item) = n.checked_sub(1).and_then(|i| round.options.get(i)) else {
                    println!("?");
                    return;
                };
                let strings = UiStrings::for_language(language);
                match shell.choose(round.id, &item.id, now) {
                    Outcome::Correct => println!("{}", strings.well_done),
                    Outcome::Incorrect => println!("{}", strings.try_again),
                    Outcome::Ignored => {}
                }
            }
        }
    }

    /// Sleep through the short feedback delays so the next prompt is ready.
    /// Longer waits (ad retries) are left for later input.
    fn settle(shell: &mut NativeShell, clock: Instant) {
        let horizon = SETTLE_DELAY + PROMPT_SPEECH_DELAY;
        while let Some(due) = shell.next_due() {
            let now = clock.elapsed();
            if due > now + horizon {
                break;
            }
            thread::sleep(due.saturating_sub(now));
            shell.tick(clock.elapsed());
        }
    }

    fn render(view: &View) {
        match view {
            View::Home {
                strings,
                music_enabled,
                language,
            } => {
                println!();
                println!("== {} ({language}) ==", strings.title);
                println!("{}", strings.choose_game);
                for (i, category) in Category::ALL.iter().enumerate() {
                    println!("  {}) {}", i + 1, strings.category(*category));
                }
                println!(
                    "[l] language  [m] music ({})  [b] exit",
                    if *music_enabled { "on" } else { "off" }
                );
            }
            View::Round {
                stage_label, round, ..
            } => {
                println!();
                println!("{stage_label}");
                println!("Find: {}", round.correct.display_label);
                for (i, item) in round.options.iter().enumerate() {
                    println!("  {}) {} [{}]", i + 1, item.visual_content, item.style_token.as_str());
                }
                println!("[b] back");
            }
        }
        print!("> ");
        let _ = io::stdout().flush();
    }
}
