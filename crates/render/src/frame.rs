use crate::ansi::{CLEAR_TO_EOL, CLEAR_TO_EOS, CURSOR_HOME};
use crate::markup::to_ansi;
use ascii_models::Rgb;

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push_str(CLEAR_TO_EOL);
    out.push('\n');
}

/// Renders one frame followed by a blank separator and the banner.
///
/// Every line is terminated with erase-to-end-of-line so a shorter line never
/// leaves the tail of the previous frame behind, and the whole block ends
/// with erase-to-end-of-screen.
pub fn compose<S: AsRef<str>>(frame_markup: &str, banner_lines: &[S], color: Rgb) -> String {
    let mut out = String::with_capacity(frame_markup.len() * 2);

    for line in frame_markup.lines() {
        push_line(&mut out, &to_ansi(line));
    }

    push_line(&mut out, "");

    for line in banner_lines {
        let markup = format!("[rgb({})]{}[/]", color, line.as_ref());
        push_line(&mut out, &to_ansi(&markup));
    }

    out.push_str(CLEAR_TO_EOS);
    out
}

/// A wire chunk: cursor home, then the composed frame.
pub fn chunk<S: AsRef<str>>(frame_markup: &str, banner_lines: &[S], color: Rgb) -> String {
    let mut out = String::from(CURSOR_HOME);
    out.push_str(&compose(frame_markup, banner_lines, color));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_layout() {
        let out = compose("[rgb(1,2,3)]@[/]\n..", &["ab"], Rgb(9, 8, 7));
        let expected = concat!(
            "\x1b[38;2;1;2;3m@\x1b[0m\x1b[K\n",
            "..\x1b[K\n",
            "\x1b[K\n",
            "\x1b[38;2;9;8;7mab\x1b[0m\x1b[K\n",
            "\x1b[J",
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn empty_frame_still_has_separator_and_banner() {
        let out = compose("", &["x", "y"], Rgb(0, 0, 0));
        assert!(out.starts_with("\x1b[K\n"));
        assert_eq!(out.matches("\x1b[K\n").count(), 3);
        assert!(out.ends_with("\x1b[J"));
    }

    #[test]
    fn chunk_starts_at_home() {
        let banner: Vec<String> = vec![];
        let out = chunk("a", &banner, Rgb(0, 0, 0));
        assert_eq!(out, "\x1b[Ha\x1b[K\n\x1b[K\n\x1b[J");
    }
}
