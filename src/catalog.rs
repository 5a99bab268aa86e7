//! Static content catalog
//!
//! Every category/language pair resolves to a fixed, ordered list of items.
//! Lists are rebuilt on each request; they are small and never mutated.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::PALETTE_SIZE;

/// Content domain the learner picks from the home menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Letters,
    Numbers,
    Shapes,
    Images,
}

impl Category {
    /// All categories in home-menu order
    pub const ALL: [Category; 4] = [
        Category::Letters,
        Category::Numbers,
        Category::Shapes,
        Category::Images,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Letters => write!(f, "Letters"),
            Category::Numbers => write!(f, "Numbers"),
            Category::Shapes => write!(f, "Shapes"),
            Category::Images => write!(f, "Images"),
        }
    }
}

/// Interface language. Arabic is primary, English secondary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    Arabic,
    English,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Arabic, Language::English];

    /// Two-letter prefix used to match speech voices
    pub fn code(self) -> &'static str {
        match self {
            Language::Arabic => "ar",
            Language::English => "en",
        }
    }

    /// BCP 47 tag handed to the speech engine
    pub fn speech_tag(self) -> &'static str {
        match self {
            Language::Arabic => "ar-SA",
            Language::English => "en-US",
        }
    }

    pub fn is_rtl(self) -> bool {
        self == Language::Arabic
    }

    /// The other language (the home screen has a single toggle button)
    pub fn toggled(self) -> Self {
        match self {
            Language::Arabic => Language::English,
            Language::English => Language::Arabic,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Arabic => write!(f, "AR"),
            Language::English => write!(f, "EN"),
        }
    }
}

/// Visual variant tag (color family) for an item's option button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleToken {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Pink,
    Orange,
    Teal,
}

impl StyleToken {
    pub const PALETTE: [StyleToken; PALETTE_SIZE] = [
        StyleToken::Red,
        StyleToken::Blue,
        StyleToken::Green,
        StyleToken::Yellow,
        StyleToken::Purple,
        StyleToken::Pink,
        StyleToken::Orange,
        StyleToken::Teal,
    ];

    /// Token for the item at `position` in its list
    pub fn for_position(position: usize) -> Self {
        Self::PALETTE[position % PALETTE_SIZE]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleToken::Red => "red",
            StyleToken::Blue => "blue",
            StyleToken::Green => "green",
            StyleToken::Yellow => "yellow",
            StyleToken::Purple => "purple",
            StyleToken::Pink => "pink",
            StyleToken::Orange => "orange",
            StyleToken::Teal => "teal",
        }
    }
}

/// A single matchable unit of content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique within its category+language list
    pub id: String,
    /// Short textual form
    pub display_label: String,
    /// Full phrase spoken for this item
    pub speech_label: String,
    /// Glyph actually drawn in the option slot
    pub visual_content: String,
    pub style_token: StyleToken,
}

/// Arabic letters: (glyph, full phonetic name)
const ARABIC_LETTERS: [(&str, &str); 28] = [
    ("أ", "أَلِف"),
    ("ب", "بَاء"),
    ("ت", "تَاء"),
    ("ث", "ثَاء"),
    ("ج", "جِيم"),
    ("ح", "حَاء"),
    ("خ", "خَاء"),
    ("د", "دَال"),
    ("ذ", "ذَال"),
    ("ر", "رَاء"),
    ("ز", "زَاي"),
    ("س", "سِين"),
    ("ش", "شِين"),
    ("ص", "صَاد"),
    ("ض", "ضَاد"),
    ("ط", "طَاء"),
    ("ظ", "ظَاء"),
    ("ع", "عَيْن"),
    ("غ", "غَيْن"),
    ("ف", "فَاء"),
    ("ق", "قَاف"),
    ("ك", "كَاف"),
    ("ل", "لاَم"),
    ("م", "مِيم"),
    ("ن", "نُون"),
    ("هـ", "هَاء"),
    ("و", "وَاو"),
    ("ي", "يَاء"),
];

/// Numbers run 1..=NUMBER_COUNT in both languages
const NUMBER_COUNT: usize = 20;

/// A bilingual entry sharing one icon: (arabic, english, icon)
type Bilingual = (&'static str, &'static str, &'static str);

const SHAPES: [Bilingual; 20] = [
    ("دَائِرَة", "Circle", "●"),
    ("مُرَبَّع", "Square", "■"),
    ("مُثَلَّث", "Triangle", "▲"),
    ("مُسْتَطِيل", "Rectangle", "▮"),
    ("نَجْمَة", "Star", "★"),
    ("هِلَال", "Crescent", "🌙"),
    ("سُدَاسِي", "Hexagon", "⬢"),
    ("خُمَاسِي", "Pentagon", "⬠"),
    ("بَيْضَاوِي", "Oval", "⬭"),
    ("قَلْب", "Heart", "♥"),
    ("سَهْم", "Arrow", "➔"),
    ("مُعَيَّن", "Diamond", "◆"),
    ("مُتَوَازِي أَضْلَاع", "Parallelogram", "▰"),
    ("شِبْهُ مُنْحَرِف", "Trapezoid", "⏢"),
    ("حَلَقَة", "Ring", "◎"),
    ("إِطَار مُرَبَّع", "Square Frame", "▣"),
    ("قَطْرَة", "Drop", "💧"),
    ("مَوْجَة", "Wave", "〰"),
    ("زَهْرَة بَسِيطَة", "Simple Flower", "🌸"),
    ("سَحَابَة", "Cloud", "☁"),
];

const IMAGES: [Bilingual; 20] = [
    ("تُفَّاحَة", "Apple", "🍎"),
    ("سَيَّارَة", "Car", "🚗"),
    ("شَمْس", "Sun", "☀️"),
    ("أَسَد", "Lion", "🦁"),
    ("فَرَاوِلَة", "Strawberry", "🍓"),
    ("طَمَاطِم", "Tomato", "🍅"),
    ("خِيَار", "Cucumber", "🥒"),
    ("جَزَر", "Carrot", "🥕"),
    ("دَرَّاجَة", "Bicycle", "🚲"),
    ("سَفِينَة", "Ship", "🚢"),
    ("قَمَر", "Moon", "🌙"),
    ("شَجَرَة", "Tree", "🌳"),
    ("سَحَابَة", "Cloud", "☁️"),
    ("كُوب مَاء", "Cup of water", "🥤"),
    ("بَطِّيخ", "Watermelon", "🍉"),
    ("لُعْبَة دُب", "Teddy bear", "🧸"),
    ("قِط", "Cat", "🐱"),
    ("كَلْب", "Dog", "🐶"),
    ("نِمْر", "Tiger", "🐯"),
    ("فِيل", "Elephant", "🐘"),
];

/// Ordered item list for a category in a language.
///
/// Pure and deterministic. Numbers ignore `language`.
pub fn items_for(category: Category, language: Language) -> Vec<Item> {
    match category {
        Category::Letters => letters(language),
        Category::Numbers => numbers(),
        Category::Shapes => bilingual("shape", &SHAPES, language),
        Category::Images => bilingual("img", &IMAGES, language),
    }
}

fn item(position: usize, id: String, label: &str, speech: &str, content: &str) -> Item {
    Item {
        id,
        display_label: label.to_string(),
        speech_label: speech.to_string(),
        visual_content: content.to_string(),
        style_token: StyleToken::for_position(position),
    }
}

fn letters(language: Language) -> Vec<Item> {
    match language {
        Language::Arabic => ARABIC_LETTERS
            .iter()
            .enumerate()
            .map(|(i, (glyph, name))| item(i, format!("letter-ar-{i}"), glyph, name, glyph))
            .collect(),
        Language::English => ('a'..='z')
            .enumerate()
            .map(|(i, c)| {
                let upper = c.to_ascii_uppercase().to_string();
                item(i, format!("letter-en-{i}"), &upper, &c.to_string(), &upper)
            })
            .collect(),
    }
}

fn numbers() -> Vec<Item> {
    (1..=NUMBER_COUNT)
        .enumerate()
        .map(|(i, n)| {
            let s = n.to_string();
            item(i, format!("num-{n}"), &s, &s, &s)
        })
        .collect()
}

fn bilingual(prefix: &str, table: &[Bilingual], language: Language) -> Vec<Item> {
    table
        .iter()
        .enumerate()
        .map(|(i, (ar, en, icon))| {
            let label = match language {
                Language::Arabic => ar,
                Language::English => en,
            };
            item(i, format!("{prefix}-{i}"), label, label, icon)
        })
        .collect()
}
