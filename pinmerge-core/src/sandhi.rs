//! Tone sandhi for context-free romanization
//!
//! Applied to the per-character TONE3 syllables of a single segment:
//! 1. 不 (bu4) becomes bu2 before a fourth tone
//! 2. 一 (yi1) becomes yi2 before a fourth tone and yi4 before tones 1-3,
//!    except at the end, in ordinals and numbers, and between reduplicated
//!    verbs where it is neutral
//! 3. Runs of third tones become second tones except for the last one

use crate::token::{set_tone, tone_of};

const CHINESE_NUMERALS: &str = "零〇一二三四五六七八九十百千万亿两";

fn is_numeral(ch: char) -> bool {
    CHINESE_NUMERALS.contains(ch)
}

/// Apply tone sandhi in place. `chars` and `syllables` must have the same
/// length; entries that are not TONE3 syllables are left untouched and break
/// third-tone runs.
pub fn apply_tone_sandhi(chars: &[char], syllables: &mut [String]) {
    debug_assert_eq!(chars.len(), syllables.len());
    let len = chars.len().min(syllables.len());

    for i in 0..len {
        match chars[i] {
            '不' => bu_sandhi(i, len, syllables),
            '一' => yi_sandhi(i, len, chars, syllables),
            _ => {}
        }
    }

    three_sandhi(len, syllables);
}

fn bu_sandhi(i: usize, len: usize, syllables: &mut [String]) {
    if syllables[i] != "bu4" || i + 1 >= len {
        return;
    }
    if tone_of(&syllables[i + 1]) == Some(4) {
        set_tone(&mut syllables[i], 2);
    }
}

fn yi_sandhi(i: usize, len: usize, chars: &[char], syllables: &mut [String]) {
    if syllables[i] != "yi1" || i + 1 >= len {
        return;
    }

    let prev = if i > 0 { Some(chars[i - 1]) } else { None };
    let next = chars[i + 1];

    // 第一, 一一, 十一 keep the citation tone
    if prev == Some('第') || is_numeral(next) || prev.is_some_and(is_numeral) {
        return;
    }

    // 看一看
    if prev == Some(next) {
        syllables[i] = "yi".to_string();
        return;
    }

    match tone_of(&syllables[i + 1]) {
        Some(4) => set_tone(&mut syllables[i], 2),
        Some(1..=3) => set_tone(&mut syllables[i], 4),
        _ => {}
    }
}

fn three_sandhi(len: usize, syllables: &mut [String]) {
    let mut i = 0;
    while i < len {
        if tone_of(&syllables[i]) != Some(3) {
            i += 1;
            continue;
        }

        let start = i;
        while i < len && tone_of(&syllables[i]) == Some(3) {
            i += 1;
        }

        // i is one past the run; the last syllable keeps tone 3
        for syllable in &mut syllables[start..i - 1] {
            set_tone(syllable, 2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, syllables: &[&str]) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let mut out: Vec<String> = syllables.iter().map(|s| s.to_string()).collect();
        apply_tone_sandhi(&chars, &mut out);
        out
    }

    #[test]
    fn test_bu_before_fourth_tone() {
        assert_eq!(run("不是", &["bu4", "shi4"]), vec!["bu2", "shi4"]);
        assert_eq!(run("不好", &["bu4", "hao3"]), vec!["bu4", "hao3"]);
        assert_eq!(run("不", &["bu4"]), vec!["bu4"]);
    }

    #[test]
    fn test_yi_sandhi() {
        assert_eq!(run("一定", &["yi1", "ding4"]), vec!["yi2", "ding4"]);
        assert_eq!(run("一天", &["yi1", "tian1"]), vec!["yi4", "tian1"]);
        assert_eq!(run("一起", &["yi1", "qi3"]), vec!["yi4", "qi3"]);
        assert_eq!(run("统一", &["tong3", "yi1"]), vec!["tong3", "yi1"]);
    }

    #[test]
    fn test_yi_in_numbers_and_ordinals() {
        assert_eq!(run("第一天", &["di4", "yi1", "tian1"]), vec!["di4", "yi1", "tian1"]);
        assert_eq!(run("一二", &["yi1", "er4"]), vec!["yi1", "er4"]);
        assert_eq!(run("十一月", &["shi2", "yi1", "yue4"]), vec!["shi2", "yi1", "yue4"]);
    }

    #[test]
    fn test_yi_reduplication_is_neutral() {
        assert_eq!(run("看一看", &["kan4", "yi1", "kan4"]), vec!["kan4", "yi", "kan4"]);
    }

    #[test]
    fn test_three_sandhi() {
        assert_eq!(run("你好", &["ni3", "hao3"]), vec!["ni2", "hao3"]);
        assert_eq!(
            run("展览馆", &["zhan3", "lan3", "guan3"]),
            vec!["zhan2", "lan2", "guan3"]
        );
        assert_eq!(run("好人", &["hao3", "ren2"]), vec!["hao3", "ren2"]);
    }

    #[test]
    fn test_non_syllables_break_runs() {
        assert_eq!(run("好，好", &["hao3", "，", "hao3"]), vec!["hao3", "，", "hao3"]);
    }
}
