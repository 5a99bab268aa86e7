//! Spoken feedback
//!
//! `Announcer` is the only speech entry point the shell uses. It never fails:
//! backend errors are logged and dropped, so a missing voice just means silence.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use thiserror::Error;

use crate::catalog::Language;
use crate::consts::{SPEECH_PITCH, SPEECH_RATE};

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech synthesis unavailable")]
    Unavailable,
    #[error("utterance rejected: {0}")]
    Rejected(String),
}

/// A voice offered by the speech engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    /// BCP 47 tag, e.g. "ar-SA"
    pub lang: String,
}

/// One request to the speech engine
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub lang_tag: &'static str,
    /// Preferred voice name; None leaves the choice to the engine
    pub voice: Option<String>,
    pub pitch: f32,
    pub rate: f32,
}

/// Platform speech engine
pub trait SpeechBackend {
    fn voices(&self) -> Vec<Voice>;
    /// Stop whatever is being said
    fn cancel(&mut self);
    fn speak(&mut self, utterance: Utterance) -> Result<(), SpeechError>;
}

const SUCCESS_AR: [&str; 4] = ["أَحْسَنْتَ!", "رَائِع!", "مُمْتَاز!", "بَطَل!"];
const SUCCESS_EN: [&str; 4] = ["Well done!", "Great!", "Excellent!", "You rock!"];

pub fn success_phrases(language: Language) -> &'static [&'static str] {
    match language {
        Language::Arabic => &SUCCESS_AR,
        Language::English => &SUCCESS_EN,
    }
}

pub fn error_phrase(language: Language) -> &'static str {
    match language {
        Language::Arabic => "حَاوِل مَرَّةً أُخْرَى",
        Language::English => "Try again!",
    }
}

/// Pick the nicest-sounding voice for `language`.
///
/// Only voices whose tag starts with the language code qualify. Among those,
/// names mentioning "google" (+100), "natural" (+80) and "female" (+50) win;
/// ties keep engine order.
pub fn best_voice(voices: &[Voice], language: Language) -> Option<&Voice> {
    let prefix = language.code();
    voices
        .iter()
        .filter(|v| v.lang.to_lowercase().starts_with(prefix))
        .enumerate()
        .max_by_key(|(i, v)| (voice_score(&v.name), std::cmp::Reverse(*i)))
        .map(|(_, v)| v)
}

fn voice_score(name: &str) -> u32 {
    let name = name.to_lowercase();
    let mut score = 0;
    if name.contains("google") {
        score += 100;
    }
    if name.contains("natural") {
        score += 80;
    }
    if name.contains("female") {
        score += 50;
    }
    score
}

/// Speech announcer: speaks prompts and feedback phrases
pub struct Announcer<B> {
    backend: B,
    rng: Pcg32,
}

impl<B: SpeechBackend> Announcer<B> {
    pub fn new(backend: B, seed: u64) -> Self {
        Self {
            backend,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Say `text`, cutting off anything still playing
    pub fn speak(&mut self, text: &str, language: Language) {
        self.backend.cancel();

        let voices = self.backend.voices();
        let voice = best_voice(&voices, language).map(|v| v.name.clone());
        let utterance = Utterance {
            text: text.to_string(),
            lang_tag: language.speech_tag(),
            voice,
            pitch: SPEECH_PITCH,
            rate: SPEECH_RATE,
        };

        if let Err(e) = self.backend.speak(utterance) {
            log::warn!("Speech failed ({}): {e}", language.speech_tag());
        }
    }

    /// A random praise phrase
    pub fn announce_success(&mut self, language: Language) {
        let phrases = success_phrases(language);
        let phrase = phrases[self.rng.random_range(0..phrases.len())];
        self.speak(phrase, language);
    }

    pub fn announce_error(&mut self, language: Language) {
        self.speak(error_phrase(language), language);
    }
}

/// Native stand-in: writes utterances to the log
#[derive(Debug, Default)]
pub struct LogSpeech;

impl SpeechBackend for LogSpeech {
    fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }

    fn cancel(&mut self) {}

    fn speak(&mut self, utterance: Utterance) -> Result<(), SpeechError> {
        log::info!("[say {}] {}", utterance.lang_tag, utterance.text);
        Ok(())
    }
}

/// Browser speech synthesis (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct WebSpeech {
    synth: Option<web_sys::SpeechSynthesis>,
}

#[cfg(target_arch = "wasm32")]
impl Default for WebSpeech {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl WebSpeech {
    pub fn new() -> Self {
        let synth = web_sys::window().and_then(|w| w.speech_synthesis().ok());
        if synth.is_none() {
            log::warn!("speechSynthesis not available - speech disabled");
        }
        Self { synth }
    }

    fn web_voices(synth: &web_sys::SpeechSynthesis) -> Vec<web_sys::SpeechSynthesisVoice> {
        use wasm_bindgen::JsCast;
        synth
            .get_voices()
            .iter()
            .filter_map(|v| v.dyn_into::<web_sys::SpeechSynthesisVoice>().ok())
            .collect()
    }
}

#[cfg(target_arch = "wasm32")]
impl SpeechBackend for WebSpeech {
    fn voices(&self) -> Vec<Voice> {
        let Some(synth) = &self.synth else {
            return Vec::new();
        };
        Self::web_voices(synth)
            .iter()
            .map(|v| Voice {
                name: v.name(),
                lang: v.lang(),
            })
            .collect()
    }

    fn cancel(&mut self) {
        if let Some(synth) = &self.synth {
            synth.cancel();
        }
    }

    fn speak(&mut self, utterance: Utterance) -> Result<(), SpeechError> {
        let synth = self.synth.as_ref().ok_or(SpeechError::Unavailable)?;
        let utt = web_sys::SpeechSynthesisUtterance::new_with_text(&utterance.text)
            .map_err(|e| SpeechError::Rejected(format!("{e:?}")))?;
        utt.set_lang(utterance.lang_tag);
        utt.set_pitch(utterance.pitch);
        utt.set_rate(utterance.rate);
        if let Some(name) = &utterance.voice {
            let voice = Self::web_voices(synth)
                .into_iter()
                .find(|v| &v.name() == name);
            utt.set_voice(voice.as_ref());
        }
        synth.speak(&utt);
        Ok(())
    }
}

/// Test backend that records everything it is asked to say
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSpeech {
    pub voices: Vec<Voice>,
    pub spoken: Vec<Utterance>,
    pub cancels: usize,
    pub fail: bool,
}

#[cfg(test)]
impl RecordingSpeech {
    pub fn texts(&self) -> Vec<&str> {
        self.spoken.iter().map(|u| u.text.as_str()).collect()
    }
}

#[cfg(test)]
impl SpeechBackend for RecordingSpeech {
    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn cancel(&mut self) {
        self.cancels += 1;
    }

    fn speak(&mut self, utterance: Utterance) -> Result<(), SpeechError> {
        if self.fail {
            return Err(SpeechError::Unavailable);
        }
        self.spoken.push(utterance);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(name: &str, lang: &str) -> Voice {
        Voice {
            name: name.to_string(),
            lang: lang.to_string(),
        }
    }

    #[test]
    fn test_best_voice_prefers_scored_names_in_language() {
        let voices = vec![
            voice("Google US English", "en-US"),
            voice("Maged", "ar-SA"),
            voice("Microsoft Natural Female Arabic", "ar-EG"),
            voice("Google Arabic", "AR-SA"),
        ];
        assert_eq!(best_voice(&voices, Language::Arabic).unwrap().name, "Microsoft Natural Female Arabic");
        assert_eq!(best_voice(&voices, Language::English).unwrap().name, "Google US English");
    }

    #[test]
    fn test_best_voice_falls_back_to_first_match() {
        let voices = vec![voice("Daniel", "en-GB"), voice("Samantha", "en-US")];
        assert_eq!(best_voice(&voices, Language::English).unwrap().name, "Daniel");
        assert!(best_voice(&voices, Language::Arabic).is_none());
    }

    #[test]
    fn test_speak_cancels_first_and_tags_language() {
        let mut announcer = Announcer::new(RecordingSpeech::default(), 1);
        announcer.speak("بَاء", Language::Arabic);
        let backend = announcer.backend();
        assert_eq!(backend.cancels, 1);
        assert_eq!(backend.spoken[0].lang_tag, "ar-SA");
        assert_eq!(backend.spoken[0].pitch, SPEECH_PITCH);
        assert_eq!(backend.spoken[0].voice, None);
    }

    #[test]
    fn test_success_and_error_phrases() {
        let mut announcer = Announcer::new(RecordingSpeech::default(), 2);
        for _ in 0..20 {
            announcer.announce_success(Language::English);
        }
        announcer.announce_error(Language::Arabic);
        let texts = announcer.backend().texts();
        assert!(texts[..20].iter().all(|t| SUCCESS_EN.contains(t)));
        assert_eq!(texts[20], "حَاوِل مَرَّةً أُخْرَى");
    }

    #[test]
    fn test_backend_failure_is_swallowed() {
        let backend = RecordingSpeech {
            fail: true,
            ..Default::default()
        };
        let mut announcer = Announcer::new(backend, 3);
        announcer.announce_error(Language::English);
        assert!(announcer.backend().spoken.is_empty());
    }
}
