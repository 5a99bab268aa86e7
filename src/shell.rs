//! Presentation shell
//!
//! Owns the one live `Session` and every side effect around it: speech,
//! ads, the music preference, and the delayed tasks between a correct
//! answer and the next round. Hosts feed it taps, back presses and clock
//! ticks, and draw whatever `view()` returns.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::ads::{AdNetwork, AdPresenter};
use crate::catalog::{Category, Language};
use crate::consts::{MUSIC_VOLUME, PROMPT_SPEECH_DELAY, SETTLE_DELAY, STAGES_PER_CYCLE};
use crate::engine::{Advance, Outcome, Round, RoundId, Session, SessionError};
use crate::music::MusicPlayer;
use crate::persistence::PreferenceStore;
use crate::platform::BackAction;
use crate::schedule::Scheduler;
use crate::settings::Settings;
use crate::speech::{Announcer, SpeechBackend};
use crate::strings::UiStrings;

/// Delayed work the shell schedules for itself
#[derive(Debug, Clone, PartialEq)]
enum Task {
    /// Read the new round's item aloud (session-bound)
    SpeakPrompt { text: String, language: Language },
    /// Move past a solved round (session-bound)
    Advance,
    RetryBanner,
    RearmInterstitial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Playing,
}

/// What the host should draw
#[derive(Debug, Clone)]
pub enum View {
    Home {
        language: Language,
        strings: &'static UiStrings,
        music_enabled: bool,
    },
    Round {
        language: Language,
        category: Category,
        /// e.g. "Stage 2 / 4"
        stage_label: String,
        round: Round,
    },
}

impl View {
    /// Plain JSON form for script hosts (the browser page draws from this)
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::json;

        match self {
            View::Home {
                language,
                strings,
                music_enabled,
            } => json!({
                "screen": "home",
                "language": language.code(),
                "rtl": language.is_rtl(),
                "title": strings.title,
                "prompt": strings.choose_game,
                "categories": Category::ALL
                    .iter()
                    .map(|c| json!({ "id": c.to_string(), "label": strings.category(*c) }))
                    .collect::<Vec<_>>(),
                "music_enabled": music_enabled,
            }),
            View::Round {
                language,
                category,
                stage_label,
                round,
            } => json!({
                "screen": "round",
                "language": language.code(),
                "rtl": language.is_rtl(),
                "category": category.to_string(),
                "stage_label": stage_label,
                "round_id": round.id.0,
                "target": round.correct.display_label,
                "solved": round.solved,
                "options": round
                    .options
                    .iter()
                    .map(|item| json!({
                        "id": item.id,
                        "visual": item.visual_content,
                        "style": item.style_token.as_str(),
                    }))
                    .collect::<Vec<_>>(),
            }),
        }
    }
}

pub struct Shell<B, N, P, M> {
    language: Language,
    session: Option<Session>,
    scheduler: Scheduler<Task>,
    announcer: Announcer<B>,
    ads: AdPresenter<N>,
    music: M,
    store: P,
    settings: Settings,
    /// Source of per-session seeds
    seeds: Pcg32,
}

impl<B: SpeechBackend, N: AdNetwork, P: PreferenceStore, M: MusicPlayer> Shell<B, N, P, M> {
    /// Compose the shell. Settings are read from `store` once, here.
    pub fn new(speech: B, ads: AdPresenter<N>, music: M, store: P, seed: u64) -> Self {
        let settings = Settings::load(&store);
        let mut seeds = Pcg32::seed_from_u64(seed);
        let announcer = Announcer::new(speech, seeds.random());
        Self {
            language: Language::default(),
            session: None,
            scheduler: Scheduler::new(),
            announcer,
            ads,
            music,
            store,
            settings,
            seeds,
        }
    }

    /// App start: bring up ads, the banner and the music preference
    pub fn boot(&mut self, now: Duration) {
        self.ads.initialize();
        self.show_banner(now);
        self.apply_music();
    }

    pub fn screen(&self) -> Screen {
        if self.session.is_some() {
            Screen::Playing
        } else {
            Screen::Home
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn music_enabled(&self) -> bool {
        self.settings.music_enabled
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn announcer(&self) -> &Announcer<B> {
        &self.announcer
    }

    pub fn ads(&self) -> &AdPresenter<N> {
        &self.ads
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn music(&self) -> &M {
        &self.music
    }

    /// When the host should next call `tick`
    pub fn next_due(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }

    /// Open a game for `category` in the current language
    pub fn select_category(&mut self, category: Category, now: Duration) -> Result<(), SessionError> {
        self.start_session(category, now)?;
        let strings = UiStrings::for_language(self.language);
        self.announcer.speak(strings.lets_play, self.language);
        Ok(())
    }

    /// Switch language. A running game restarts over the new language's list.
    pub fn set_language(&mut self, language: Language, now: Duration) -> Result<(), SessionError> {
        if language == self.language {
            return Ok(());
        }
        self.language = language;
        log::info!("Language: {language}");
        self.announcer
            .speak(UiStrings::for_language(language).language_name, language);

        match self.session.as_ref().map(Session::category) {
            Some(category) => self.start_session(category, now),
            None => Ok(()),
        }
    }

    pub fn toggle_language(&mut self, now: Duration) -> Result<(), SessionError> {
        self.set_language(self.language.toggled(), now)
    }

    /// Flip background music and persist the choice
    pub fn toggle_music(&mut self) -> bool {
        let enabled = self.settings.toggle_music();
        self.settings.save(&mut self.store);
        self.apply_music();
        enabled
    }

    /// Forward a tap on an option of `round`
    pub fn choose(&mut self, round: RoundId, item_id: &str, now: Duration) -> Outcome {
        let Some(session) = self.session.as_mut() else {
            return Outcome::Ignored;
        };
        let outcome = session.submit_choice_for(round, item_id);
        let language = session.language();

        match outcome {
            Outcome::Correct => {
                self.announcer.announce_success(language);
                self.scheduler.schedule(now, SETTLE_DELAY, Task::Advance);
            }
            Outcome::Incorrect => self.announcer.announce_error(language),
            Outcome::Ignored => {}
        }
        outcome
    }

    /// Platform back button
    pub fn back(&mut self) -> BackAction {
        if self.session.is_some() {
            self.go_home();
            BackAction::ReturnedHome
        } else {
            BackAction::Exit
        }
    }

    /// Drop the session and anything still pending for it
    pub fn go_home(&mut self) {
        self.scheduler.invalidate();
        if let Some(session) = self.session.take() {
            log::info!("Left {} game", session.category());
        }
    }

    /// Run every task due at `now`; returns the round advances that happened
    pub fn tick(&mut self, now: Duration) -> Vec<Advance> {
        let mut advances = Vec::new();
        for task in self.scheduler.take_due(now) {
            match task {
                Task::SpeakPrompt { text, language } => self.announcer.speak(&text, language),
                Task::Advance => {
                    let Some(advance) = self.session.as_mut().map(Session::advance) else {
                        continue;
                    };
                    if advance == Advance::CycleComplete {
                        log::info!("Cycle complete");
                        if let Some(delay) = self.ads.show_interstitial() {
                            self.scheduler
                                .schedule_detached(now, delay, Task::RearmInterstitial);
                        }
                    }
                    if advance != Advance::NotReady {
                        self.schedule_prompt(now);
                    }
                    advances.push(advance);
                }
                Task::RetryBanner => self.show_banner(now),
                Task::RearmInterstitial => self.ads.prepare_interstitial(),
            }
        }
        advances
    }

    pub fn view(&self) -> View {
        match &self.session {
            None => View::Home {
                language: self.language,
                strings: UiStrings::for_language(self.language),
                music_enabled: self.settings.music_enabled,
            },
            Some(session) => View::Round {
                language: session.language(),
                category: session.category(),
                stage_label: UiStrings::for_language(session.language())
                    .stage_label(session.stage_cursor(), STAGES_PER_CYCLE),
                round: session.current_round().clone(),
            },
        }
    }

    fn start_session(&mut self, category: Category, now: Duration) -> Result<(), SessionError> {
        self.scheduler.invalidate();
        self.session = None;
        let session = Session::start(category, self.language, self.seeds.random())?;
        log::info!("Started {category} game ({})", self.language);
        self.session = Some(session);
        self.schedule_prompt(now);
        Ok(())
    }

    fn schedule_prompt(&mut self, now: Duration) {
        if let Some(session) = &self.session {
            let task = Task::SpeakPrompt {
                text: session.current_round().correct.speech_label.clone(),
                language: session.language(),
            };
            self.scheduler.schedule(now, PROMPT_SPEECH_DELAY, task);
        }
    }

    fn apply_music(&mut self) {
        if !self.settings.music_enabled {
            self.music.pause();
            return;
        }
        if let Err(e) = self.music.play(MUSIC_VOLUME) {
            log::warn!("Background music unavailable: {e}");
        }
    }

    fn show_banner(&mut self, now: Duration) {
        if let Some(delay) = self.ads.show_banner() {
            self.scheduler.schedule_detached(now, delay, Task::RetryBanner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ads::ScriptedAds;
    use crate::consts::BANNER_RETRY_DELAY;
    use crate::engine::Phase;
    use crate::music::{MusicCall, RecordingMusic};
    use crate::persistence::MemoryStore;
    use crate::speech::{RecordingSpeech, success_phrases};

    type TestShell = Shell<RecordingSpeech, ScriptedAds, MemoryStore, RecordingMusic>;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn shell() -> TestShell {
        Shell::new(
            RecordingSpeech::default(),
            AdPresenter::new(ScriptedAds::default(), true),
            RecordingMusic::default(),
            MemoryStore::new(),
            2024,
        )
    }

    fn current(shell: &TestShell) -> Round {
        shell.session().unwrap().current_round().clone()
    }

    fn spoken(shell: &TestShell) -> Vec<String> {
        shell
            .announcer()
            .backend()
            .texts()
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Answer correctly at `now` and let the settle delay pass
    fn solve(shell: &mut TestShell, now: Duration) -> Vec<Advance> {
        let round = current(shell);
        assert_eq!(shell.choose(round.id, &round.correct.id, now), Outcome::Correct);
        shell.tick(now + SETTLE_DELAY)
    }

    #[test]
    fn test_select_category_speaks_and_prompts() {
        let mut shell = shell();
        shell.set_language(Language::English, ms(0)).unwrap();
        shell.select_category(Category::Numbers, ms(0)).unwrap();
        assert_eq!(shell.screen(), Screen::Playing);
        assert_eq!(spoken(&shell).last().unwrap(), "Let's Play!");

        shell.tick(ms(100));
        let before = spoken(&shell).len();
        shell.tick(PROMPT_SPEECH_DELAY);
        let texts = spoken(&shell);
        assert_eq!(texts.len(), before + 1);
        assert_eq!(texts.last().unwrap(), &current(&shell).correct.speech_label);
    }

    #[test]
    fn test_correct_answer_advances_after_settle_delay() {
        let mut shell = shell();
        shell.set_language(Language::English, ms(0)).unwrap();
        shell.select_category(Category::Numbers, ms(0)).unwrap();
        let round = current(&shell);

        assert_eq!(shell.choose(round.id, &round.correct.id, ms(500)), Outcome::Correct);
        let praise = spoken(&shell).last().unwrap().clone();
        assert!(success_phrases(Language::English).contains(&praise.as_str()));
        assert_eq!(shell.choose(round.id, &round.correct.id, ms(600)), Outcome::Ignored);

        assert!(shell.tick(ms(2000)).is_empty());
        assert_eq!(shell.session().unwrap().phase(), Phase::RoundSolved);

        assert_eq!(shell.tick(ms(500) + SETTLE_DELAY), vec![Advance::NextRound]);
        let session = shell.session().unwrap();
        assert_eq!(session.stage_cursor(), 1);
        assert_eq!(session.round_cursor(), 1);
        assert_ne!(current(&shell).id, round.id);
        match shell.view() {
            View::Round { stage_label, .. } => assert_eq!(stage_label, "Stage 2 / 4"),
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn test_wrong_answer_speaks_error() {
        let mut shell = shell();
        shell.select_category(Category::Shapes, ms(0)).unwrap();
        let round = current(&shell);
        assert_eq!(shell.choose(round.id, &round.decoy().id, ms(10)), Outcome::Incorrect);
        assert_eq!(spoken(&shell).last().unwrap(), "حَاوِل مَرَّةً أُخْرَى");
        assert!(shell.tick(ms(10_000)).is_empty());
        assert_eq!(current(&shell), round);
    }

    #[test]
    fn test_cycle_complete_shows_one_interstitial() {
        let mut shell = shell();
        shell.boot(ms(0));
        shell.select_category(Category::Images, ms(0)).unwrap();

        let mut now = ms(0);
        let mut all = Vec::new();
        for _ in 0..4 {
            now += ms(5000);
            all.extend(solve(&mut shell, now));
        }
        assert_eq!(
            all,
            vec![Advance::NextRound, Advance::NextRound, Advance::NextRound, Advance::CycleComplete]
        );
        assert_eq!(shell.ads().network().interstitials, 1);
        assert_eq!(shell.session().unwrap().stage_cursor(), 0);

        // Initial prepare from boot, then the re-arm after the show
        assert_eq!(shell.ads().network().prepares, 1);
        shell.tick(now + SETTLE_DELAY + ms(2000));
        assert_eq!(shell.ads().network().prepares, 2);
    }

    #[test]
    fn test_language_switch_during_settle_drops_pending_advance() {
        let mut shell = shell();
        shell.select_category(Category::Letters, ms(0)).unwrap();
        solve(&mut shell, ms(1000));
        let round = current(&shell);
        assert_eq!(shell.choose(round.id, &round.correct.id, ms(5000)), Outcome::Correct);

        shell.set_language(Language::English, ms(5100)).unwrap();
        let session = shell.session().unwrap();
        assert_eq!(session.language(), Language::English);
        assert_eq!(session.category(), Category::Letters);
        assert_eq!((session.round_cursor(), session.stage_cursor()), (0, 0));

        assert!(shell.tick(ms(20_000)).is_empty());
        let session = shell.session().unwrap();
        assert_eq!(session.stage_cursor(), 0);
        assert_eq!(session.current_round().id, RoundId(0));
        assert!(session.current_round().correct.id.starts_with("letter-en-"));

        // A tap aimed at the old language's round is stale
        assert_eq!(shell.choose(round.id, &round.correct.id, ms(20_001)), Outcome::Ignored);
    }

    #[test]
    fn test_back_goes_home_then_exits() {
        let mut shell = shell();
        shell.select_category(Category::Numbers, ms(0)).unwrap();
        let round = current(&shell);
        shell.choose(round.id, &round.correct.id, ms(10));

        assert_eq!(shell.back(), BackAction::ReturnedHome);
        assert_eq!(shell.screen(), Screen::Home);
        assert!(shell.tick(ms(60_000)).is_empty());
        assert!(matches!(shell.view(), View::Home { .. }));
        assert_eq!(shell.back(), BackAction::Exit);
        assert_eq!(shell.choose(round.id, &round.correct.id, ms(60_001)), Outcome::Ignored);
    }

    #[test]
    fn test_music_toggle_persists() {
        let mut shell = shell();
        assert!(shell.music_enabled());
        assert!(!shell.toggle_music());
        assert!(!Settings::load(shell.store()).music_enabled);

        let reopened = Shell::new(
            RecordingSpeech::default(),
            AdPresenter::new(ScriptedAds::default(), true),
            RecordingMusic::default(),
            shell.store().clone(),
            1,
        );
        assert!(!reopened.music_enabled());
    }

    #[test]
    fn test_banner_retry_is_scheduled() {
        let network = ScriptedAds {
            banner_failures: 2,
            ..Default::default()
        };
        let mut shell = Shell::new(
            RecordingSpeech::default(),
            AdPresenter::new(network, true),
            RecordingMusic::default(),
            MemoryStore::new(),
            5,
        );
        shell.boot(ms(0));
        assert_eq!(shell.next_due(), Some(BANNER_RETRY_DELAY));

        // Entering and leaving a game does not cancel ad retries
        shell.select_category(Category::Shapes, ms(1)).unwrap();
        shell.go_home();

        shell.tick(BANNER_RETRY_DELAY);
        assert!(!shell.ads().banner_visible());
        shell.tick(BANNER_RETRY_DELAY * 2);
        assert!(shell.ads().banner_visible());
        assert_eq!(shell.ads().network().banner_attempts, 3);
    }

    #[test]
    fn test_language_toggle_at_home_speaks_name() {
        let mut shell = shell();
        shell.toggle_language(ms(0)).unwrap();
        assert_eq!(shell.language(), Language::English);
        assert_eq!(spoken(&shell).last().unwrap(), "English");
        assert_eq!(shell.screen(), Screen::Home);
        shell.toggle_language(ms(0)).unwrap();
        assert_eq!(spoken(&shell).last().unwrap(), "العربية");
    }

    #[test]
    fn test_music_follows_preference() {
        let mut shell = shell();
        assert!(shell.music().calls.is_empty());
        shell.boot(ms(0));
        assert_eq!(shell.music().calls, vec![MusicCall::Play(MUSIC_VOLUME)]);

        assert!(!shell.toggle_music());
        assert!(shell.toggle_music());
        assert_eq!(
            shell.music().calls,
            vec![
                MusicCall::Play(MUSIC_VOLUME),
                MusicCall::Pause,
                MusicCall::Play(MUSIC_VOLUME),
            ]
        );

        // A stored "off" keeps the track paused from boot
        shell.toggle_music();
        let mut reopened = Shell::new(
            RecordingSpeech::default(),
            AdPresenter::new(ScriptedAds::default(), true),
            RecordingMusic::default(),
            shell.store().clone(),
            3,
        );
        reopened.boot(ms(0));
        assert_eq!(reopened.music().calls, vec![MusicCall::Pause]);
    }

    #[test]
    fn test_failed_music_does_not_block_boot() {
        let mut shell = Shell::new(
            RecordingSpeech::default(),
            AdPresenter::new(ScriptedAds::default(), true),
            RecordingMusic {
                fail: true,
                ..Default::default()
            },
            MemoryStore::new(),
            9,
        );
        shell.boot(ms(0));
        assert!(shell.music_enabled());
        assert!(shell.ads().banner_visible());
        shell.select_category(Category::Numbers, ms(0)).unwrap();
        assert_eq!(shell.screen(), Screen::Playing);
    }

    #[test]
    fn test_restarting_a_game_stays_in_play_and_drops_old_tasks() {
        let mut shell = shell();
        shell.select_category(Category::Numbers, ms(0)).unwrap();
        let first = current(&shell);
        assert_eq!(shell.choose(first.id, &first.correct.id, ms(100)), Outcome::Correct);

        // Picking a category while a game runs replaces it without a home trip
        shell.select_category(Category::Shapes, ms(200)).unwrap();
        assert_eq!(shell.screen(), Screen::Playing);
        assert_eq!(shell.session().unwrap().category(), Category::Shapes);

        // Only the new game's prompt is spoken; the old prompt and advance are dropped
        let before = spoken(&shell).len();
        assert!(shell.tick(ms(200) + PROMPT_SPEECH_DELAY).is_empty());
        let texts = spoken(&shell);
        assert_eq!(texts.len(), before + 1);
        assert_eq!(texts.last().unwrap(), &current(&shell).correct.speech_label);
        assert!(shell.tick(ms(10_000)).is_empty());
        let session = shell.session().unwrap();
        assert_eq!((session.round_cursor(), session.stage_cursor()), (0, 0));
        assert_eq!(shell.choose(first.id, &first.correct.id, ms(10_001)), Outcome::Ignored);
    }

    #[test]
    fn test_view_json_for_script_hosts() {
        let mut shell = shell();
        let home = shell.view().to_json();
        assert_eq!(home["screen"], "home");
        assert_eq!(home["language"], "ar");
        assert_eq!(home["rtl"], true);
        assert_eq!(home["categories"].as_array().unwrap().len(), Category::ALL.len());
        assert_eq!(home["music_enabled"], true);

        shell.set_language(Language::English, ms(0)).unwrap();
        shell.select_category(Category::Numbers, ms(0)).unwrap();
        let round = current(&shell);
        let view = shell.view().to_json();
        assert_eq!(view["screen"], "round");
        assert_eq!(view["category"], "Numbers");
        assert_eq!(view["stage_label"], "Stage 1 / 4");
        assert_eq!(view["round_id"], round.id.0);
        assert_eq!(view["target"], round.correct.display_label.as_str());
        let options = view["options"].as_array().unwrap();
        assert_eq!(options.len(), 2);
        assert!(options.iter().any(|o| o["id"] == round.correct.id.as_str()));
    }
}
