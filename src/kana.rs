// ============================================
// src/kana.rs
// ひらがな・カタカナの出題テーブル
// ============================================

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// 1文字分の出題データ（文字 → 正解のローマ字）
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub symbol: &'static str, // "し"
    pub romaji: &'static str, // "shi"
}

const fn entry(symbol: &'static str, romaji: &'static str) -> SymbolEntry {
    SymbolEntry { symbol, romaji }
}

/// 文字 → ローマ字の固定テーブル
#[derive(Debug, Copy, Clone)]
pub struct SyllabaryTable {
    name: &'static str,
    entries: &'static [SymbolEntry],
}

impl SyllabaryTable {
    pub const fn new(name: &'static str, entries: &'static [SymbolEntry]) -> Self {
        Self { name, entries }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn entries(&self) -> &'static [SymbolEntry] {
        self.entries
    }

    /// 出題文字だけを定義順で返す
    pub fn symbols(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|e| e.symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 文字に対応する正解のローマ字
    pub fn expected(&self, symbol: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|e| e.symbol == symbol)
            .map(|e| e.romaji)
    }
}

/// 出題する文字セットの種類
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Syllabary {
    Hiragana,
    Katakana,
}

impl Syllabary {
    /// メニューの表示順
    pub const ALL: [Syllabary; 2] = [Syllabary::Hiragana, Syllabary::Katakana];

    pub fn table(self) -> SyllabaryTable {
        match self {
            Syllabary::Hiragana => HIRAGANA,
            Syllabary::Katakana => KATAKANA,
        }
    }

    pub fn label(self) -> &'static str {
        self.table().name()
    }
}

pub const HIRAGANA: SyllabaryTable = SyllabaryTable::new("Hiragana", HIRAGANA_ENTRIES);
pub const KATAKANA: SyllabaryTable = SyllabaryTable::new("Katakana", KATAKANA_ENTRIES);

#[rustfmt::skip]
const HIRAGANA_ENTRIES: &[SymbolEntry] = &[
    entry("あ", "a"), entry("い", "i"), entry("う", "u"), entry("え", "e"), entry("お", "o"),
    entry("か", "ka"), entry("き", "ki"), entry("く", "ku"), entry("け", "ke"), entry("こ", "ko"),
    entry("さ", "sa"), entry("し", "shi"), entry("す", "su"), entry("せ", "se"), entry("そ", "so"),
    entry("た", "ta"), entry("ち", "chi"), entry("つ", "tsu"), entry("て", "te"), entry("と", "to"),
    entry("な", "na"), entry("に", "ni"), entry("ぬ", "nu"), entry("ね", "ne"), entry("の", "no"),
    entry("は", "ha"), entry("ひ", "hi"), entry("ふ", "fu"), entry("へ", "he"), entry("ほ", "ho"),
    entry("ま", "ma"), entry("み", "mi"), entry("む", "mu"), entry("め", "me"), entry("も", "mo"),
    entry("や", "ya"), entry("ゆ", "yu"), entry("よ", "yo"),
    entry("ら", "ra"), entry("り", "ri"), entry("る", "ru"), entry("れ", "re"), entry("ろ", "ro"),
    entry("わ", "wa"), entry("を", "wo"), entry("ん", "n"),
];

#[rustfmt::skip]
const KATAKANA_ENTRIES: &[SymbolEntry] = &[
    entry("ア", "a"), entry("イ", "i"), entry("ウ", "u"), entry("エ", "e"), entry("オ", "o"),
    entry("カ", "ka"), entry("キ", "ki"), entry("ク", "ku"), entry("ケ", "ke"), entry("コ", "ko"),
    entry("サ", "sa"), entry("シ", "shi"), entry("ス", "su"), entry("セ", "se"), entry("ソ", "so"),
    entry("タ", "ta"), entry("チ", "chi"), entry("ツ", "tsu"), entry("テ", "te"), entry("ト", "to"),
    entry("ナ", "na"), entry("ニ", "ni"), entry("ヌ", "nu"), entry("ネ", "ne"), entry("ノ", "no"),
    entry("ハ", "ha"), entry("ヒ", "hi"), entry("フ", "fu"), entry("ヘ", "he"), entry("ホ", "ho"),
    entry("マ", "ma"), entry("ミ", "mi"), entry("ム", "mu"), entry("メ", "me"), entry("モ", "mo"),
    entry("ヤ", "ya"), entry("ユ", "yu"), entry("ヨ", "yo"),
    entry("ラ", "ra"), entry("リ", "ri"), entry("ル", "ru"), entry("レ", "re"), entry("ロ", "ro"),
    entry("ワ", "wa"), entry("ヲ", "wo"), entry("ン", "n"),
];
