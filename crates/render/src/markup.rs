//! Translation of the frame color markup into ANSI truecolor escapes.
//!
//! Frames and banners use a small bracket markup: `[rgb(r,g,b)]` opens a
//! foreground color and `[/]` (or `[/rgb(...)]`) closes the innermost one.
//! `\[` is a literal bracket. Anything else in brackets is plain text.

use crate::ansi::{fg, RESET};
use ascii_models::Rgb;

enum Tag {
    Open(Rgb),
    Close,
}

fn parse_tag(tag: &str) -> Option<Tag> {
    if tag == "/" {
        return Some(Tag::Close);
    }
    if let Some(rest) = tag.strip_prefix('/') {
        return parse_rgb(rest).map(|_| Tag::Close);
    }
    parse_rgb(tag).map(Tag::Open)
}

fn parse_rgb(tag: &str) -> Option<Rgb> {
    tag.trim()
        .strip_prefix("rgb(")?
        .strip_suffix(')')?
        .parse()
        .ok()
}

struct Writer {
    out: String,
    run: String,
    stack: Vec<Rgb>,
}

impl Writer {
    fn flush(&mut self) {
        if self.run.is_empty() {
            return;
        }
        match self.stack.last() {
            Some(Rgb(r, g, b)) => {
                self.out.push_str(&fg(*r, *g, *b));
                self.out.push_str(&self.run);
                self.out.push_str(RESET);
            }
            None => self.out.push_str(&self.run),
        }
        self.run.clear();
    }
}

pub fn to_ansi(markup: &str) -> String {
    let mut w = Writer {
        out: String::with_capacity(markup.len() * 2),
        run: String::new(),
        stack: Vec::new(),
    };

    let mut rest = markup;
    while let Some(pos) = rest.find(['[', '\\']) {
        let (text, tail) = rest.split_at(pos);
        w.run.push_str(text);

        if let Some(after) = tail.strip_prefix("\\[") {
            w.run.push('[');
            rest = after;
            continue;
        }
        if let Some(after) = tail.strip_prefix('\\') {
            w.run.push('\\');
            rest = after;
            continue;
        }

        // tail starts with '['
        let body = &tail[1..];
        let tag = body
            .find(']')
            .filter(|&end| !body[..end].contains('['))
            .and_then(|end| parse_tag(&body[..end]).map(|t| (t, end)));

        match tag {
            Some((Tag::Open(rgb), end)) => {
                w.flush();
                w.stack.push(rgb);
                rest = &body[end + 1..];
            }
            Some((Tag::Close, end)) => {
                w.flush();
                w.stack.pop();
                rest = &body[end + 1..];
            }
            None => {
                w.run.push('[');
                rest = body;
            }
        }
    }
    w.run.push_str(rest);
    w.flush();

    w.out
}
