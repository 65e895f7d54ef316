//! Scrolling banners drawn under each frame.

use std::sync::OnceLock;

pub const DEFAULT_PADDING: usize = 10;

pub const BIG_BANNER_RAW: &str = r#"
                         /$$ /$$             /$$
                        | $$| $$            | $$
 /$$$$$$/$$$$   /$$$$$$ | $$| $$  /$$$$$$$ /$$$$$$    /$$$$$$   /$$$$$$  /$$   /$$      /$$$$$$   /$$$$$$  /$$$$$$/$$$$   /$$$$$$
| $$_  $$_  $$ /$$__  $$| $$| $$ /$$_____/|_  $$_/   /$$__  $$ /$$__  $$| $$  | $$     /$$__  $$ |____  $$| $$_  $$_  $$ /$$__  $$
| $$ \ $$ \ $$| $$$$$$$$| $$| $$|  $$$$$$   | $$    | $$  \__/| $$  \ $$| $$  | $$    | $$  \ $$  /$$$$$$$| $$ \ $$ \ $$| $$$$$$$$
| $$ | $$ | $$| $$_____/| $$| $$ \____  $$  | $$ /$$| $$      | $$  | $$| $$  | $$    | $$  | $$ /$$__  $$| $$ | $$ | $$| $$_____/
| $$ | $$ | $$|  $$$$$$$| $$| $$ /$$$$$$$/  |  $$$$/| $$      |  $$$$$$/|  $$$$$$$ /$$|  $$$$$$$|  $$$$$$$| $$ | $$ | $$|  $$$$$$$
|__/ |__/ |__/ \_______/|__/|__/|_______/    \___/  |__/       \______/  \____  $$|__/ \____  $$ \_______/|__/ |__/ |__/ \_______/
                                                                         /$$  | $$     /$$  \ $$
                                                                        |  $$$$$$/    |  $$$$$$/
                                                                         \______/      \______/
"#;

/// Fixed-width banner lines that rotate together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    lines: Vec<String>,
    width: usize,
}

impl Banner {
    /// Right-trims each line, drops blank ones and pads all of them to the
    /// longest line plus `pad`.
    pub fn normalize<'a, I>(lines: I, pad: usize) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let raw: Vec<&str> = lines
            .into_iter()
            .filter(|l| !l.trim().is_empty())
            .map(str::trim_end)
            .collect();
        let max_len = raw.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let width = max_len + pad;
        let lines = raw.into_iter().map(|l| ljust(l, width)).collect();

        Self { lines, width }
    }

    /// Single-line banner with whitespace runs collapsed.
    pub fn ticker(text: &str, pad: usize) -> Self {
        let base = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let width = base.chars().count() + pad;

        Self {
            lines: vec![ljust(&base, width)],
            width,
        }
    }

    pub fn big(pad: usize) -> Self {
        if pad == DEFAULT_PADDING {
            static BIG: OnceLock<Banner> = OnceLock::new();
            return BIG
                .get_or_init(|| Banner::normalize(BIG_BANNER_RAW.lines(), DEFAULT_PADDING))
                .clone();
        }
        Banner::normalize(BIG_BANNER_RAW.lines(), pad)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Rotates every line left by the same offset, modulo the banner width.
    pub fn shifted(&self, offset: usize) -> Vec<String> {
        let o = offset % self.width.max(1);
        self.lines
            .iter()
            .map(|line| {
                let split = line.char_indices().nth(o).map_or(line.len(), |(i, _)| i);
                let (head, tail) = line.split_at(split);
                let mut out = String::with_capacity(line.len());
                out.push_str(tail);
                out.push_str(head);
                out
            })
            .collect()
    }
}

fn ljust(s: &str, width: usize) -> String {
    let len = s.chars().count();
    let mut out = String::with_capacity(s.len() + width.saturating_sub(len));
    out.push_str(s);
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(len)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_len(s: &str) -> usize {
        s.chars().count()
    }

    #[test]
    fn big_banner_lines_share_width() {
        let banner = Banner::big(DEFAULT_PADDING);
        assert_eq!(banner.lines().len(), 11);
        for line in banner.lines() {
            assert_eq!(char_len(line), banner.width());
        }
        let longest = BIG_BANNER_RAW
            .lines()
            .map(|l| char_len(l.trim_end()))
            .max()
            .unwrap();
        assert_eq!(banner.width(), longest + DEFAULT_PADDING);
    }

    #[test]
    fn normalize_drops_blank_lines() {
        let banner = Banner::normalize(["", "ab  ", "   ", "abcd"], 2);
        assert_eq!(banner.width(), 6);
        assert_eq!(banner.lines(), &["ab    ".to_string(), "abcd  ".to_string()]);
    }

    #[test]
    fn ticker_collapses_whitespace() {
        let banner = Banner::ticker("  MELLSTROY •\t STREAM  ", 3);
        assert_eq!(banner.lines(), &["MELLSTROY • STREAM   ".to_string()]);
        assert_eq!(banner.width(), 21);

        let empty = Banner::ticker("", DEFAULT_PADDING);
        assert_eq!(empty.width(), DEFAULT_PADDING);
        assert_eq!(empty.lines()[0], " ".repeat(DEFAULT_PADDING));
    }

    #[test]
    fn shift_rotates_all_lines_together() {
        let banner = Banner::normalize(["abc", "xyz"], 1);
        assert_eq!(banner.shifted(1), vec!["bc a", "yz x"]);
        assert_eq!(banner.shifted(0), banner.lines().to_vec());
        assert_eq!(banner.shifted(banner.width()), banner.lines().to_vec());
        assert_eq!(banner.shifted(5), banner.shifted(1));
    }

    #[test]
    fn shift_counts_chars_not_bytes() {
        let banner = Banner::ticker("a•b", 0);
        assert_eq!(banner.shifted(1), vec!["•ba"]);
        assert_eq!(banner.shifted(2), vec!["ba•"]);
    }

    #[test]
    fn empty_banner_shift_is_safe() {
        let banner = Banner::normalize(Vec::<&str>::new(), 0);
        assert_eq!(banner.width(), 0);
        assert!(banner.shifted(7).is_empty());
    }
}
