//! Markdown rendering with syntax highlighting

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use super::toc::HeadingAnchors;

pub(crate) fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_SMART_PUNCTUATION
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_GFM
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", true)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    /// Render markdown to HTML.
    ///
    /// Headings get `id` anchors matching [`super::extract_toc`].
    pub fn render(&self, markdown: &str) -> Result<String> {
        let parser = Parser::new_ext(markdown, parser_options());

        let mut anchors = HeadingAnchors::default();
        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;
        let mut heading: Option<(Tag, Vec<Event>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        let highlighted = self.highlight_code(&code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, code)) = code_block.as_mut() {
                        code.push_str(&text);
                    }
                }
                Event::Start(tag @ Tag::Heading { .. }) => {
                    heading = Some((tag, Vec::new(), String::new()));
                }
                Event::End(TagEnd::Heading(level)) => {
                    if let Some((tag, inner, label)) = heading.take() {
                        let tag = match tag {
                            Tag::Heading {
                                level,
                                id,
                                classes,
                                attrs,
                            } => {
                                let anchor = anchors.next(label.trim(), id.as_deref());
                                Tag::Heading {
                                    level,
                                    id: Some(CowStr::from(anchor)),
                                    classes,
                                    attrs,
                                }
                            }
                            other => other,
                        };
                        events.push(Event::Start(tag));
                        events.extend(inner);
                        events.push(Event::End(TagEnd::Heading(level)));
                    }
                }
                event => {
                    if let Some((_, inner, label)) = heading.as_mut() {
                        if let Event::Text(text) | Event::Code(text) = &event {
                            label.push_str(text);
                        }
                        inner.push(event);
                    } else {
                        events.push(event);
                    }
                }
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(highlighted) if self.line_numbers => self.add_line_numbers(&highlighted, lang),
            Some(highlighted) => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang, highlighted
            ),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang,
                html_escape(code)
            ),
        }
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let lines: Vec<&str> = code.lines().collect();

        let gutter = (1..=lines.len())
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");
        let code_lines = lines.join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
            lang, gutter, code_lines
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
