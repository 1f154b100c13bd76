use std::collections::HashMap;
use std::sync::LazyLock;

use indexmap::IndexSet;

pub const LONG_VOWEL_MARK: char = 'ー';

const KATAKANA_START: u32 = 0x30A1; // ァ
const KATAKANA_END: u32 = 0x30F6; // ヶ
const KANA_OFFSET: u32 = 0x60;

const HALF_WIDTH_DAKUTEN: char = '\u{FF9E}';
const HALF_WIDTH_HANDAKUTEN: char = '\u{FF9F}';

const SMALL_KANA: &str = "ぁぃぅぇぉゃゅょゎゕゖァィゥェォャュョヮヵヶ";

/// Half-width katakana and punctuation to their full-width hiragana counterparts
static HALF_WIDTH: LazyLock<HashMap<char, char>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    // ｦ..ｯ
    map.extend(('\u{FF66}'..='\u{FF6F}').zip("をぁぃぅぇぉゃゅょっ".chars()));
    // ｱ..ﾝ
    map.extend(('\u{FF71}'..='\u{FF9D}').zip(
        "あいうえおかきくけこさしすせそたちつてとなにぬねのはひふへほまみむめもやゆよらりるれろわん"
            .chars(),
    ));
    map.extend([
        ('\u{FF61}', '。'),
        ('\u{FF62}', '「'),
        ('\u{FF63}', '」'),
        ('\u{FF64}', '、'),
        ('\u{FF65}', '・'),
        ('\u{FF70}', LONG_VOWEL_MARK),
        (HALF_WIDTH_DAKUTEN, '゛'),
        (HALF_WIDTH_HANDAKUTEN, '゜'),
    ]);
    map
});

/// Vowel each kana ends in, keyed by hiragana
static FINAL_VOWEL: LazyLock<HashMap<char, char>> = LazyLock::new(|| {
    let rows = [
        ('あ', "あかさたなはまやらわがざだばぱぁゃゎゕ"),
        ('い', "いきしちにひみりぎじぢびぴぃゐ"),
        ('う', "うくすつぬふむゆるぐずづぶぷぅゅゔ"),
        ('え', "えけせてねへめれげぜでべぺぇゖゑ"),
        ('お', "おこそとのほもよろをごぞどぼぽぉょ"),
    ];
    rows.iter()
        .flat_map(|(vowel, kana)| kana.chars().map(move |c| (c, *vowel)))
        .collect()
});

pub fn is_hiragana(c: char) -> bool {
    ('\u{3041}'..='\u{309F}').contains(&c)
}

pub fn is_katakana(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c) || ('\u{FF66}'..='\u{FF9F}').contains(&c)
}

pub fn is_kana(c: char) -> bool {
    is_hiragana(c) || is_katakana(c)
}

pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{F900}'..='\u{FAFF}').contains(&c)
        || ('\u{20000}'..='\u{2EBEF}').contains(&c)
        || ('\u{30000}'..='\u{3134F}').contains(&c)
        || c == '々'
}

fn full_width_katakana_to_hiragana(c: char) -> char {
    let code = c as u32;
    match c {
        'ヽ' => 'ゝ',
        'ヾ' => 'ゞ',
        _ if (KATAKANA_START..=KATAKANA_END).contains(&code) => {
            char::from_u32(code - KANA_OFFSET).unwrap_or(c)
        }
        _ => c,
    }
}

fn voiced(c: char, mark: char) -> Option<char> {
    let shift = match mark {
        HALF_WIDTH_DAKUTEN if c == 'う' => return Some('ゔ'),
        HALF_WIDTH_DAKUTEN if "かきくけこさしすせそたちつてとはひふへほ".contains(c) => 1,
        HALF_WIDTH_HANDAKUTEN if "はひふへほ".contains(c) => 2,
        _ => return None,
    };
    char::from_u32(c as u32 + shift)
}

/// Fold katakana (full- and half-width) into hiragana. Everything else passes through.
pub fn katakana_to_hiragana(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if let Some(&base) = HALF_WIDTH.get(&c) {
            let combined = chars.peek().and_then(|&mark| voiced(base, mark));
            match combined {
                Some(v) => {
                    chars.next();
                    out.push(v);
                }
                None => out.push(base),
            }
            continue;
        }
        out.push(full_width_katakana_to_hiragana(c));
    }

    out
}

/// Reverse of [`katakana_to_hiragana`] for full-width kana
pub fn hiragana_to_katakana(text: &str) -> String {
    text.chars()
        .map(|c| {
            let code = c as u32;
            match c {
                'ゝ' => 'ヽ',
                'ゞ' => 'ヾ',
                _ if (KATAKANA_START - KANA_OFFSET..=KATAKANA_END - KANA_OFFSET).contains(&code) => {
                    char::from_u32(code + KANA_OFFSET).unwrap_or(c)
                }
                _ => c,
            }
        })
        .collect()
}

fn final_vowel(c: char) -> Option<char> {
    FINAL_VOWEL
        .get(&full_width_katakana_to_hiragana(c))
        .copied()
}

/// Expand every `ー` that follows a kana with a known vowel.
///
/// お-row and え-row vowels are ambiguous (とー is とお or とう, けー is けえ or けい),
/// so each such mark doubles the number of variants. The inserted vowel follows the
/// script of the preceding kana. Variants are returned in a stable order with the
/// primary vowel first.
pub fn long_vowel_mark_to_kana(text: &str) -> Vec<String> {
    expand_long_vowels(text, usize::MAX).0
}

/// [`long_vowel_mark_to_kana`] with at most `max_forks` ambiguous marks forking.
/// Later ambiguous marks take the primary vowel only. The flag is true when at
/// least one mark was not forked.
pub fn expand_long_vowels(text: &str, max_forks: usize) -> (Vec<String>, bool) {
    let mut variants: IndexSet<String> = IndexSet::from([String::new()]);
    let mut previous: Option<char> = None;
    let mut forks = 0usize;
    let mut capped = false;

    for c in text.chars() {
        let vowel = previous.filter(|_| c == LONG_VOWEL_MARK).and_then(final_vowel);
        let as_script = |v: char| match previous {
            Some(p) if is_katakana(p) => hiragana_to_katakana(&v.to_string()),
            _ => v.to_string(),
        };

        variants = match vowel {
            Some(v @ ('お' | 'え')) if forks < max_forks => {
                forks += 1;
                let alternate = if v == 'お' { 'う' } else { 'い' };
                let (primary, alternate) = (as_script(v), as_script(alternate));
                variants
                    .iter()
                    .map(|s| format!("{s}{primary}"))
                    .chain(variants.iter().map(|s| format!("{s}{alternate}")))
                    .collect()
            }
            Some(v) => {
                capped |= matches!(v, 'お' | 'え');
                let vowel = as_script(v);
                variants.iter().map(|s| format!("{s}{vowel}")).collect()
            }
            None => variants.iter().map(|s| format!("{s}{c}")).collect(),
        };
        previous = Some(c);
    }

    (variants.into_iter().collect(), capped)
}

/// Split text into display units, attaching small kana to the kana before them
/// (ニャ, きょ) so both count as one unit
pub fn create_combined_form(text: &str) -> Vec<String> {
    let mut units: Vec<String> = Vec::new();

    for c in text.chars() {
        let attaches = SMALL_KANA.contains(c)
            && units
                .last()
                .and_then(|u| u.chars().last())
                .is_some_and(|p| is_kana(p) && !SMALL_KANA.contains(p) && p != LONG_VOWEL_MARK);

        match units.last_mut() {
            Some(last) if attaches => last.push(c),
            _ => units.push(c.to_string()),
        }
    }

    units
}
