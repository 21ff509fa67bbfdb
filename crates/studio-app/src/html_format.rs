//! Pretty-printer for the Code tab of the draft preview.
//!
//! This is a formatting heuristic, not an HTML parser: tag boundaries of
//! the form `>` whitespace `<` become line breaks, and each line is
//! indented by the current open-tag depth. Good enough for the branded
//! template the model emits; pathological markup just comes out flat.

use regex::Regex;

const INDENT: &str = "  ";

/// Tags that never take a closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

pub fn prettify(html: &str) -> String {
    let boundary = match Regex::new(r">\s*<") {
        Ok(re) => re,
        Err(_) => return html.to_string(),
    };
    let tag = match Regex::new(r"(?s)<(/?)([a-zA-Z][a-zA-Z0-9-]*)[^>]*?(/?)>") {
        Ok(re) => re,
        Err(_) => return html.to_string(),
    };

    let split = boundary.replace_all(html.trim(), ">\n<");
    let mut out = String::with_capacity(split.len() + 256);
    let mut depth: usize = 0;

    for line in split.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("</") {
            depth = depth.saturating_sub(1);
        }
        for _ in 0..depth {
            out.push_str(INDENT);
        }
        out.push_str(line);
        out.push('\n');
        let mut delta = depth_delta(&tag, line);
        if line.starts_with("</") {
            // The pre-print dedent already consumed this line's own close.
            delta += 1;
        }
        depth = (depth as isize + delta).max(0) as usize;
    }

    out.trim_end().to_string()
}

/// Net change in nesting depth contributed by the tags on one line.
fn depth_delta(tag: &Regex, line: &str) -> isize {
    let mut delta = 0isize;
    for captures in tag.captures_iter(line) {
        let closing = &captures[1] == "/";
        let name = captures[2].to_ascii_lowercase();
        let self_closing = &captures[3] == "/";
        if VOID_TAGS.contains(&name.as_str()) || self_closing {
            continue;
        }
        if closing {
            delta -= 1;
        } else {
            delta += 1;
        }
    }
    delta
}
