//! Markdown rendering with optional syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::MarkdownConfig;

/// Theme used when the configured one is not bundled with syntect
const FALLBACK_THEME: &str = "base16-ocean.dark";

/// Markdown to HTML renderer
///
/// Rendering is a pure function of the input: the renderer holds only
/// immutable settings and loaded syntax definitions.
pub struct MarkdownRenderer {
    options: Options,
    highlighter: Option<Highlighter>,
}

impl MarkdownRenderer {
    /// Plain CommonMark renderer without highlighting
    pub fn new() -> Self {
        Self {
            options: Options::empty(),
            highlighter: None,
        }
    }

    /// Create a renderer from the site's markdown settings
    pub fn from_config(config: &MarkdownConfig) -> Self {
        let mut options = Options::empty();
        if config.gfm {
            options |= Options::ENABLE_TABLES
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS;
        }

        let highlighter = config
            .highlight
            .enable
            .then(|| Highlighter::new(&config.highlight.theme, config.highlight.line_number));

        Self {
            options,
            highlighter,
        }
    }

    /// Render markdown to an HTML fragment
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);

        let mut html_output = String::new();
        match &self.highlighter {
            Some(highlighter) => {
                html::push_html(&mut html_output, highlighter.rewrite(parser).into_iter())
            }
            None => html::push_html(&mut html_output, parser),
        }
        html_output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Replaces code blocks with syntect-highlighted HTML
struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
    line_numbers: bool,
}

impl Highlighter {
    fn new(theme_name: &str, line_numbers: bool) -> Self {
        let mut theme_set = ThemeSet::load_defaults();
        let theme = match theme_set.themes.remove(theme_name) {
            Some(theme) => theme,
            None => {
                tracing::warn!(
                    "Unknown highlight theme {:?}, using {}",
                    theme_name,
                    FALLBACK_THEME
                );
                theme_set.themes.remove(FALLBACK_THEME).unwrap_or_default()
            }
        };

        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
            line_numbers,
        }
    }

    fn rewrite<'a>(&self, parser: Parser<'a>) -> Vec<Event<'a>> {
        let mut events = Vec::new();
        // (language, collected source) of the code block being read
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => {
                            info.split_whitespace().next().map(str::to_string)
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        let highlighted = self.highlight(&code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) => match code_block.as_mut() {
                    Some((_, code)) => code.push_str(&text),
                    None => events.push(Event::Text(text)),
                },
                _ => events.push(event),
            }
        }

        events
    }

    /// Highlight a code block
    fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        let token = lang.unwrap_or("text");
        let syntax = self
            .syntax_set
            .find_syntax_by_token(token)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        match highlighted_html_for_string(code, &self.syntax_set, syntax, &self.theme) {
            Ok(highlighted) if self.line_numbers => add_line_numbers(&highlighted, code, token),
            Ok(highlighted) => highlighted,
            Err(e) => {
                tracing::warn!("Failed to highlight {} code block: {}", token, e);
                plain_code_block(code, lang)
            }
        }
    }
}

/// Wrap highlighted code in a table with a line-number gutter
fn add_line_numbers(highlighted: &str, code: &str, lang: &str) -> String {
    let gutter = (1..=code.lines().count().max(1))
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
        html_escape(lang),
        gutter,
        highlighted
    )
}

fn plain_code_block(code: &str, lang: Option<&str>) -> String {
    match lang {
        Some(lang) => format!(
            "<pre><code class=\"language-{}\">{}</code></pre>\n",
            html_escape(lang),
            html_escape(code)
        ),
        None => format!("<pre><code>{}</code></pre>\n", html_escape(code)),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HighlightConfig;

    fn highlighting(line_number: bool) -> MarkdownRenderer {
        MarkdownRenderer::from_config(&MarkdownConfig {
            gfm: false,
            highlight: HighlightConfig {
                enable: true,
                line_number,
                ..Default::default()
            },
        })
    }

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hi\n\nThis is **bold**.");
        assert_eq!(html, "<h1>Hi</h1>\n<p>This is <strong>bold</strong>.</p>\n");
    }

    #[test]
    fn test_render_block_elements() {
        let renderer = MarkdownRenderer::new();
        let markdown = "## Sub\n\n> quoted\n\n- one\n- two\n\n1. first\n\n---\n\nSee [site](https://example.com), *em* and `code`.\n";
        let html = renderer.render(markdown);
        assert!(html.contains("<h2>Sub</h2>"));
        assert!(html.contains("<blockquote>\n<p>quoted</p>\n</blockquote>"));
        assert!(html.contains("<ul>\n<li>one</li>\n<li>two</li>\n</ul>"));
        assert!(html.contains("<ol>\n<li>first</li>\n</ol>"));
        assert!(html.contains("<hr />"));
        assert!(html.contains(r#"<a href="https://example.com">site</a>"#));
        assert!(html.contains("<em>em</em>"));
        assert!(html.contains("<code>code</code>"));
    }

    #[test]
    fn test_render_fenced_code_without_highlighting() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert_eq!(
            html,
            "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>\n"
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = highlighting(true);
        let markdown = "# Title\n\n```go\nfunc main() {}\n```\n\nText.";
        assert_eq!(renderer.render(markdown), renderer.render(markdown));
    }

    #[test]
    fn test_scripts_pass_through() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("<script>alert(1)</script>\n");
        assert!(html.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn test_gfm_tables_opt_in() {
        let table = "| a | b |\n|---|---|\n| 1 | 2 |\n";
        assert!(!MarkdownRenderer::new().render(table).contains("<table>"));

        let gfm = MarkdownRenderer::from_config(&MarkdownConfig {
            gfm: true,
            ..Default::default()
        });
        assert!(gfm.render(table).contains("<table>"));
    }

    #[test]
    fn test_render_highlighted_code_block() {
        let html = highlighting(false).render("```rust\nfn main() {}\n```\n\nAfter.");
        assert!(html.contains("<pre style="));
        assert!(html.contains("main"));
        assert!(!html.contains("language-rust"));
        assert!(html.contains("<p>After.</p>"));
    }

    #[test]
    fn test_line_number_gutter() {
        let html = highlighting(true).render("```\nline one\nline two\n```");
        assert!(html.contains(r#"<td class="gutter">"#));
        assert!(html.contains(r#"<span class="line-number">2</span>"#));
        assert!(!html.contains(r#"<span class="line-number">3</span>"#));
    }

    #[test]
    fn test_plain_code_block_escapes() {
        let html = plain_code_block("a < b && c", Some("js"));
        assert_eq!(
            html,
            "<pre><code class=\"language-js\">a &lt; b &amp;&amp; c</code></pre>\n"
        );
    }
}
