//! In-app preview of the generated HTML email.
//!
//! The draft is sanitized with ammonia, parsed with scraper, and lowered
//! to a flat list of text blocks with inline styling. Table-based email
//! layout degrades gracefully: every cell becomes its own block, which is
//! exactly right for the single-column branded template.

use egui::text::LayoutJob;
use egui::{Color32, FontId, Stroke, TextFormat, Ui};
use scraper::{ElementRef, Html, Node};

/// Brand gold, used for links and the summary accent.
pub const ACCENT: Color32 = Color32::from_rgb(0xD4, 0xAF, 0x37);

#[derive(Debug, Clone, Copy)]
struct Palette {
    base: Color32,
    strong: Color32,
}

#[derive(Clone, Copy, Default)]
struct Inline {
    bold: bool,
    italic: bool,
    underline: bool,
    strike: bool,
    link: bool,
    heading: Option<u8>,
}

#[derive(Debug)]
enum Block {
    Text(LayoutJob),
    Rule,
}

pub fn render_email_html(ui: &mut Ui, html: &str) {
    let palette = Palette {
        base: ui.visuals().text_color(),
        strong: ui.visuals().strong_text_color(),
    };
    for block in lower(html, palette) {
        match block {
            Block::Text(job) => {
                ui.label(job);
                ui.add_space(6.0);
            }
            Block::Rule => {
                ui.separator();
            }
        }
    }
}

fn lower(html: &str, palette: Palette) -> Vec<Block> {
    let clean = ammonia::clean(html);
    let document = Html::parse_document(&clean);
    let mut lowering = Lowering {
        palette,
        blocks: Vec::new(),
        current: LayoutJob::default(),
    };
    lowering.walk_children(document.root_element(), Inline::default());
    lowering.flush();
    lowering.blocks
}

struct Lowering {
    palette: Palette,
    blocks: Vec<Block>,
    current: LayoutJob,
}

impl Lowering {
    fn flush(&mut self) {
        if !self.current.text.trim().is_empty() {
            let job = std::mem::take(&mut self.current);
            self.blocks.push(Block::Text(job));
        } else {
            self.current = LayoutJob::default();
        }
    }

    fn walk_children(&mut self, element: ElementRef<'_>, style: Inline) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => self.push_text(text, style),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.walk(child, style);
                    }
                }
                _ => {}
            }
        }
    }

    fn walk(&mut self, element: ElementRef<'_>, mut style: Inline) {
        let name = element.value().name();
        match name {
            "b" | "strong" => style.bold = true,
            "i" | "em" | "cite" => style.italic = true,
            "u" | "ins" => style.underline = true,
            "s" | "del" | "strike" => style.strike = true,
            "a" => style.link = true,
            "h1" => style.heading = Some(1),
            "h2" => style.heading = Some(2),
            "h3" => style.heading = Some(3),
            "h4" | "h5" | "h6" => style.heading = Some(4),
            "br" => {
                self.current.append("\n", 0.0, self.format_for(style));
                return;
            }
            "hr" => {
                self.flush();
                self.blocks.push(Block::Rule);
                return;
            }
            "img" => {
                // No image loading in the preview; show the alt text.
                if let Some(alt) = element.value().attr("alt").filter(|alt| !alt.is_empty()) {
                    let mut format = self.format_for(Inline {
                        italic: true,
                        ..style
                    });
                    format.color = self.palette.base.gamma_multiply(0.7);
                    self.push_word(&format!("[{alt}]"), format);
                }
                return;
            }
            _ => {}
        }

        let is_block = matches!(
            name,
            "p" | "div"
                | "table"
                | "thead"
                | "tbody"
                | "tfoot"
                | "tr"
                | "td"
                | "th"
                | "li"
                | "blockquote"
                | "pre"
                | "h1"
                | "h2"
                | "h3"
                | "h4"
                | "h5"
                | "h6"
        );
        if is_block {
            self.flush();
        }
        if name == "li" {
            self.current.append("•  ", 0.0, self.format_for(style));
        }

        self.walk_children(element, style);

        if is_block {
            self.flush();
        }
    }

    fn push_text(&mut self, raw: &str, style: Inline) {
        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            return;
        }
        let format = self.format_for(style);
        let needs_space = raw.starts_with(char::is_whitespace)
            && !self.current.text.is_empty()
            && !self.current.text.ends_with(char::is_whitespace);
        if needs_space {
            self.current.append(" ", 0.0, format.clone());
        }
        self.current.append(&collapsed, 0.0, format.clone());
        if raw.ends_with(char::is_whitespace) {
            self.current.append(" ", 0.0, format);
        }
    }

    fn push_word(&mut self, word: &str, format: TextFormat) {
        if !self.current.text.is_empty() && !self.current.text.ends_with(char::is_whitespace) {
            self.current.append(" ", 0.0, format.clone());
        }
        self.current.append(word, 0.0, format);
    }

    fn format_for(&self, style: Inline) -> TextFormat {
        let size = match style.heading {
            Some(1) => 20.0,
            Some(2) => 18.0,
            Some(3) => 16.5,
            Some(_) => 15.0,
            None => 14.0,
        };
        let color = if style.link {
            ACCENT
        } else if style.bold || style.heading.is_some() {
            self.palette.strong
        } else {
            self.palette.base
        };
        TextFormat {
            font_id: FontId::proportional(size),
            color,
            italics: style.italic,
            underline: if style.underline || style.link {
                Stroke::new(1.0, color)
            } else {
                Stroke::NONE
            },
            strikethrough: if style.strike {
                Stroke::new(1.0, color)
            } else {
                Stroke::NONE
            },
            ..TextFormat::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PALETTE: Palette = Palette {
        base: Color32::GRAY,
        strong: Color32::WHITE,
    };

    fn texts(html: &str) -> Vec<String> {
        lower(html, PALETTE)
            .into_iter()
            .filter_map(|block| match block {
                Block::Text(job) => Some(job.text),
                Block::Rule => None,
            })
            .collect()
    }

    #[test]
    fn paragraphs_become_separate_blocks() {
        let blocks = texts("<p>Hello [Customer Name],</p><p>Thanks for reaching out.</p>");
        assert_eq!(blocks, vec!["Hello [Customer Name],", "Thanks for reaching out."]);
    }

    #[test]
    fn table_cells_flatten_to_blocks() {
        let blocks = texts(
            "<table><tr><td><strong>Resolution Summary</strong><br>We reshipped it.</td></tr></table>",
        );
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("Resolution Summary"));
        assert!(blocks[0].contains("\nWe reshipped it."));
    }

    #[test]
    fn scripts_and_styles_are_stripped() {
        let blocks = texts("<style>p { color: red; }</style><script>alert(1)</script><p>safe</p>");
        assert_eq!(blocks, vec!["safe"]);
    }

    #[test]
    fn images_render_as_alt_text() {
        let blocks = texts("<p><img src=\"https://cdn/logo.jpg\" alt=\"Franco AI Automations\"></p>");
        assert_eq!(blocks, vec!["[Franco AI Automations]"]);
    }

    #[test]
    fn whitespace_between_inline_runs_is_preserved() {
        let blocks = texts("<p>Sincerely,<br><strong>Franco AI Team</strong></p>");
        assert_eq!(blocks, vec!["Sincerely,\nFranco AI Team"]);
    }

    #[test]
    fn empty_markup_produces_no_blocks() {
        assert!(texts("<div>   </div>").is_empty());
        assert!(texts("").is_empty());
    }
}
