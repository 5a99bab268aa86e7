//! Per-language UI strings

use crate::catalog::{Category, Language};

/// Fixed UI text for one language
#[derive(Debug, Clone, Copy)]
pub struct UiStrings {
    pub title: &'static str,
    pub choose_game: &'static str,
    pub letters: &'static str,
    pub numbers: &'static str,
    pub shapes: &'static str,
    pub images: &'static str,
    pub lets_play: &'static str,
    pub well_done: &'static str,
    pub try_again: &'static str,
    pub stage: &'static str,
    /// The language's own name, spoken when switching to it
    pub language_name: &'static str,
}

const ARABIC: UiStrings = UiStrings {
    title: "Kids Fun",
    choose_game: "اختر لعبة لتبدأ!",
    letters: "الحروف",
    numbers: "الأرقام",
    shapes: "الأشكال",
    images: "الصور",
    lets_play: "هَيَّا نَلْعَب!",
    well_done: "أَحْسَنْتَ!",
    try_again: "حَاوِل مَرَّةً أُخْرَى",
    stage: "المرحلة",
    language_name: "العربية",
};

const ENGLISH: UiStrings = UiStrings {
    title: "Kids Fun",
    choose_game: "Choose a game to start!",
    letters: "Letters",
    numbers: "Numbers",
    shapes: "Shapes",
    images: "Images",
    lets_play: "Let's Play!",
    well_done: "Well Done!",
    try_again: "Try Again",
    stage: "Stage",
    language_name: "English",
};

impl UiStrings {
    pub fn for_language(language: Language) -> &'static UiStrings {
        match language {
            Language::Arabic => &ARABIC,
            Language::English => &ENGLISH,
        }
    }

    /// Home-menu label for a category
    pub fn category(&self, category: Category) -> &'static str {
        match category {
            Category::Letters => self.letters,
            Category::Numbers => self.numbers,
            Category::Shapes => self.shapes,
            Category::Images => self.images,
        }
    }

    /// "Stage 2 / 4" style progress label; `stage` is 0-based
    pub fn stage_label(&self, stage: u8, of: u8) -> String {
        format!("{} {} / {}", self.stage, stage + 1, of)
    }
}
