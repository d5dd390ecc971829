/// A named, ready-made word list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordList {
    pub name: &'static str,
    pub words: &'static [&'static str],
}

pub const BUILTIN_WORD_LISTS: &[WordList] = &[
    WordList {
        name: "Halloween",
        words: &["GHOST", "WITCH", "PUMPKIN", "SPOOKY", "ZOMBIE", "BAT", "COSTUME", "TRICKORTREAT"],
    },
    WordList {
        name: "Christmas",
        words: &["SANTA", "ELF", "REINDEER", "MISTLETOE", "JINGLEBELLS", "EGGNOG", "CANDYCANE", "STOCKING"],
    },
    WordList {
        name: "Faith",
        words: &["PRAYER", "GRACE", "HOPE", "FAITH", "LOVE", "PEACE", "JOY", "BIBLE"],
    },
    WordList {
        name: "Motorsports",
        words: &["FORMULAONE", "NASCAR", "RALLY", "DRIFT", "TURBO", "PITSTOP", "CHECKEREDFLAG", "SPEEDWAY"],
    },
];

/// Case-insensitive lookup of a built-in list
pub fn builtin(name: &str) -> Option<&'static WordList> {
    BUILTIN_WORD_LISTS
        .iter()
        .find(|list| list.name.eq_ignore_ascii_case(name))
}

impl WordList {
    pub fn to_vec(&self) -> Vec<String> {
        self.words.iter().map(|w| w.to_string()).collect()
    }
}
