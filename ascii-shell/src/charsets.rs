//! 文字セットの定義と指定文字列の解析
//!
//! シェルの add / remove に渡される文字指定を文字の集合に変換する。

/// 基本的なASCII文字セット（10文字）
pub const CHARS_BASIC: &str = " .:-=+*#%@";

/// 拡張ASCII文字セット（67文字）
pub const CHARS_EXTENDED: &str =
    r#" .'`^",:;Il!i~+_-?][}{1)(|/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$"#;

/// 完全ASCII文字セット（92文字）
pub const CHARS_FULL: &str = r#" `.-':_,^=;><+!rc*/z?sLTv)J7(|Fi{C}fI31tlu[neoZ5Yxjya]2ESwqkP6h9d4VpOGbUAKXHm8RD#$Bg0MNWQ%&@"#;

/// ブロック文字（Unicode）
pub const CHARS_BLOCKS: &str = " ░▒▓█";

/// グラデーション文字
pub const CHARS_GRADIENT: &str = " ▁▂▃▄▅▆▇█";

/// 2値文字（白黒）
pub const CHARS_BINARY: &str = " █";

/// 名前付きの文字セット
pub const PRESETS: &[(&str, &str)] = &[
    ("basic", CHARS_BASIC),
    ("extended", CHARS_EXTENDED),
    ("full", CHARS_FULL),
    ("blocks", CHARS_BLOCKS),
    ("gradient", CHARS_GRADIENT),
    ("binary", CHARS_BINARY),
];

/// `all` で選ばれる表示可能なASCIIの範囲
const PRINTABLE_ASCII: std::ops::RangeInclusive<char> = ' '..='~';

/// 名前から文字セットを取得
pub fn preset(name: &str) -> Option<&'static str> {
    PRESETS
        .iter()
        .find(|(preset_name, _)| *preset_name == name)
        .map(|(_, chars)| *chars)
}

/// 文字指定を解析
///
/// 受け付ける形式：
///
/// * 1文字
/// * `a-z` のような3文字の範囲（逆順も可）
/// * `all`（表示可能なASCII全て）、`space`
/// * 文字セット名
pub fn parse_selection(arg: &str) -> Option<Vec<char>> {
    match arg {
        "all" => return Some(PRINTABLE_ASCII.collect()),
        "space" => return Some(vec![' ']),
        _ => {}
    }
    if let Some(chars) = preset(arg) {
        return Some(chars.chars().collect());
    }

    let chars: Vec<char> = arg.chars().collect();
    match chars.as_slice() {
        [single] => Some(vec![*single]),
        [from, '-', to] => {
            let (low, high) = if from <= to { (*from, *to) } else { (*to, *from) };
            Some((low..=high).collect())
        }
        _ => None,
    }
}

/// 空白区切りの文字指定を全て解析。1つでも不正なら None
pub fn parse_selections(text: &str) -> Option<Vec<char>> {
    let mut chars = Vec::new();
    for arg in text.split_whitespace() {
        chars.extend(parse_selection(arg)?);
    }
    Some(chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_character() {
        assert_eq!(parse_selection("a"), Some(vec!['a']));
        assert_eq!(parse_selection("-"), Some(vec!['-']));
    }

    #[test]
    fn test_range() {
        assert_eq!(parse_selection("a-e"), Some(vec!['a', 'b', 'c', 'd', 'e']));
        assert_eq!(parse_selection("3-1"), Some(vec!['1', '2', '3']));
        assert_eq!(parse_selection("x-x"), Some(vec!['x']));
    }

    #[test]
    fn test_keywords() {
        let all = parse_selection("all").unwrap();
        assert_eq!(all.len(), 95);
        assert_eq!(all.first(), Some(&' '));
        assert_eq!(all.last(), Some(&'~'));
        assert_eq!(parse_selection("space"), Some(vec![' ']));
    }

    #[test]
    fn test_presets() {
        for (name, chars) in PRESETS {
            assert_eq!(parse_selection(name), Some(chars.chars().collect()));
        }
        assert_eq!(preset("missing"), None);
    }

    #[test]
    fn test_invalid() {
        assert_eq!(parse_selection(""), None);
        assert_eq!(parse_selection("ab"), None);
        assert_eq!(parse_selection("a+z"), None);
        assert_eq!(parse_selection("abcd"), None);
    }

    #[test]
    fn test_parse_selections() {
        assert_eq!(parse_selections("0-2 x"), Some(vec!['0', '1', '2', 'x']));
        assert_eq!(parse_selections("0-2 xy"), None);
        assert_eq!(parse_selections(""), Some(vec![]));
    }
}
