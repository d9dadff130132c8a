//! 이모지 기반 감정 신호
//!
//! 텍스트와 사용자가 직접 고른 이모지에서 글리프를 추출하고,
//! 고정 테이블로 감정 레이블을 매핑한 뒤 다수결로 하나의 감정을 선택합니다.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::label::EmotionLabel;

/// 이모티콘, 픽토그램, 교통/지도 기호, 국기, 기타 기호, 보조 이모지 블록
static EMOJI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        "[",
        r"\x{1F600}-\x{1F64F}",
        r"\x{1F300}-\x{1F5FF}",
        r"\x{1F680}-\x{1F6FF}",
        r"\x{1F1E0}-\x{1F1FF}",
        r"\x{2600}-\x{27BF}",
        r"\x{1F900}-\x{1F9FF}",
        r"\x{1FA70}-\x{1FAFF}",
        "]"
    ))
    .expect("emoji pattern is a valid regex")
});

/// 이모지 표현 선택자 (U+FE0F)
const VARIATION_SELECTOR: char = '\u{FE0F}';

static GLOBAL_TABLE: LazyLock<EmojiEmotionTable> = LazyLock::new(EmojiEmotionTable::new);

/// 텍스트에 포함된 이모지 글리프를 등장 순서대로 반환합니다 (중복 포함).
///
/// 스킨톤이나 표현 선택자가 붙은 시퀀스는 스칼라 단위로 분리될 수 있습니다.
pub fn extract_emojis(text: &str) -> Vec<String> {
    EMOJI_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// 이모지 글리프 → 감정 레이블 고정 테이블
#[derive(Debug)]
pub struct EmojiEmotionTable {
    entries: HashMap<&'static str, EmotionLabel>,
}

impl EmojiEmotionTable {
    fn new() -> Self {
        let groups: [(EmotionLabel, &[&'static str]); 7] = [
            (EmotionLabel::Anger, &["😡", "😠", "🤬", "💢"]),
            (EmotionLabel::Disgust, &["🤢", "🤮", "🤧"]),
            (EmotionLabel::Fear, &["😱", "😨", "😰", "😧"]),
            (
                EmotionLabel::Joy,
                &[
                    "😊", "😃", "😄", "😁", "😀", "🙂", "😌", "😍", "🥰", "😘", "🤗", "🥳", "🎉",
                    "✨",
                ],
            ),
            (EmotionLabel::Neutral, &["😐", "😑", "😶"]),
            (
                EmotionLabel::Sadness,
                &[
                    "😢", "😭", "😞", "😔", "😟", "🙁", "☹", "😣", "😖", "😫", "😩", "🥺",
                ],
            ),
            (
                EmotionLabel::Surprise,
                &["😲", "😮", "😯", "😳", "🤯", "😦"],
            ),
        ];

        let entries = groups
            .into_iter()
            .flat_map(|(label, glyphs)| glyphs.iter().map(move |glyph| (*glyph, label)))
            .collect();

        Self { entries }
    }

    /// 프로세스 전역 테이블 (최초 접근 시 한 번만 생성)
    pub fn global() -> &'static EmojiEmotionTable {
        &GLOBAL_TABLE
    }

    /// 글리프를 감정으로 매핑합니다. 표현 선택자(U+FE0F)는 무시합니다.
    pub fn lookup(&self, glyph: &str) -> Option<EmotionLabel> {
        if glyph.contains(VARIATION_SELECTOR) {
            let normalized: String = glyph.chars().filter(|c| *c != VARIATION_SELECTOR).collect();
            return self.entries.get(normalized.as_str()).copied();
        }
        self.entries.get(glyph).copied()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// 텍스트 내 이모지와 사용자가 선택한 이모지를 하나의 시퀀스로 합칩니다.
///
/// 텍스트에 포함된 글리프가 먼저, 그 뒤에 선택 목록의 글리프가 순서대로 옵니다.
pub fn collect_emoji_signal(text: &str, explicit: &[String]) -> Vec<String> {
    let mut glyphs = extract_emojis(text);
    for entry in explicit {
        glyphs.extend(extract_emojis(entry));
    }
    glyphs
}

/// 이모지 글리프들의 다수결 감정을 반환합니다.
///
/// 매핑되지 않는 글리프는 무시하며, 매핑된 글리프가 없으면 `None`입니다.
/// 동률이면 먼저 집계된 레이블이 선택됩니다.
pub fn fuse_emoji_signal<S: AsRef<str>>(
    glyphs: &[S],
    table: &EmojiEmotionTable,
) -> Option<EmotionLabel> {
    let mut tally: Vec<(EmotionLabel, usize)> = Vec::new();

    for glyph in glyphs {
        let Some(label) = table.lookup(glyph.as_ref()) else {
            continue;
        };
        match tally.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, count)) => *count += 1,
            None => tally.push((label, 1)),
        }
    }

    let mut winner: Option<(EmotionLabel, usize)> = None;
    for (label, count) in tally {
        if winner.map_or(true, |(_, best)| count > best) {
            winner = Some((label, count));
        }
    }

    winner.map(|(label, _)| label)
}
