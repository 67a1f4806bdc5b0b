//! Documentation page extraction
//!
//! Turns a raw documentation page into markdown-like structured text:
//!
//! 1. Chrome (navigation, banners, callouts, widgets) is removed from the
//!    whole document before anything else looks at it.
//! 2. The title is resolved from headings or the `<title>` tag.
//! 3. The first known content container with any markup becomes the content
//!    root; residual navigation inside it is removed.
//! 4. Block elements are walked in document order and folded into
//!    [`Section`]s, which are rendered and bounded to
//!    [`MAX_CONTENT_CHARS`](crate::MAX_CONTENT_CHARS).
//!
//! Extraction is a pure function of the HTML and the tables in this module.

use crate::error::ExtractionError;
use crate::types::ExtractionResult;
use crate::MAX_CONTENT_CHARS;
use scraper::{ElementRef, Html, Selector};

/// Title used when the page offers none
pub const DEFAULT_TITLE: &str = "Google Cloud Documentation";

/// Suffix the site appends to `<title>`
const TITLE_SUFFIX: &str = " | Google Cloud";

/// Structural and navigational chrome removed from the whole document
const CHROME_SELECTOR: &str = "script, style, nav, header, footer, noscript, iframe, svg, img, \
    .devsite-nav, .devsite-book-nav, .devsite-footer, .devsite-header, \
    .devsite-breadcrumb-list, .devsite-page-title, .devsite-banner, \
    .devsite-collapsible-section, .devsite-toc, .devsite-article-meta, \
    [role=\"navigation\"], [role=\"banner\"], [aria-hidden=\"true\"], \
    .nocontent, .caution, .note, .warning, .tip, .key-point, \
    .buttons, .button-group, .cta, .feedback, .rating";

/// Navigation nested inside content containers
const INNER_CHROME_SELECTOR: &str = "nav, .devsite-nav, .devsite-toc, .nocontent, \
    [role=\"navigation\"], [aria-hidden=\"true\"]";

/// Title candidates, most specific first
const TITLE_SELECTORS: &[&str] = &["h1.devsite-page-title", "article h1", "h1"];

/// Content containers, most specific first
const CONTENT_ROOT_SELECTORS: &[&str] = &[
    ".devsite-article-body",
    "article .body-content",
    "article",
    "main",
    ".content",
];

/// Block-level elements visited by the walk
const BLOCK_SELECTOR: &str = "h1, h2, h3, h4, h5, p, pre, ul, ol, table, blockquote, dl";

/// Length of the body text preview attached to [`ExtractionError::NoContent`]
const PREVIEW_CHARS: usize = 500;

/// Code blocks this short are noise
const MIN_CODE_CHARS: usize = 5;

/// Paragraphs this short are stray fragments
const MIN_PARAGRAPH_CHARS: usize = 10;

/// Text-pattern filter for chrome that has no stable selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoilerplateFilter {
    /// Short text containing every one of the given words
    ShortContainingAll {
        words: &'static [&'static str],
        max_chars: usize,
    },
    /// Text starting with a fixed prompt
    Prefix(&'static str),
}

impl BoilerplateFilter {
    /// Whether trimmed block text matches this filter
    pub fn matches(&self, text: &str) -> bool {
        match self {
            BoilerplateFilter::ShortContainingAll { words, max_chars } => {
                words.iter().all(|w| text.contains(w)) && text.chars().count() < *max_chars
            }
            BoilerplateFilter::Prefix(prefix) => text.starts_with(prefix),
        }
    }
}

/// Boilerplate that survives selector removal, checked in order.
///
/// These track the site's current UI copy and break silently when it
/// changes; every entry has a fixture in the tests below.
pub const BOILERPLATE_FILTERS: &[BoilerplateFilter] = &[
    // "Home > Documentation" link cluster
    BoilerplateFilter::ShortContainingAll {
        words: &["Documentation", "Home"],
        max_chars: 100,
    },
    // Collections bookmark prompt
    BoilerplateFilter::Prefix("Stay organized with collections"),
    BoilerplateFilter::Prefix("Save and categorize"),
];

/// Whether block text is known boilerplate
pub fn is_boilerplate(text: &str) -> bool {
    BOILERPLATE_FILTERS.iter().any(|f| f.matches(text))
}

/// A heading plus the body accumulated under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    /// Heading level, 1 to 5
    pub level: u8,
    pub body: String,
}

impl Section {
    fn new(heading: impl Into<String>, level: u8) -> Self {
        Self {
            heading: heading.into(),
            level,
            body: String::new(),
        }
    }

    fn has_body(&self) -> bool {
        !self.body.trim().is_empty()
    }

    /// Markdown rendering: `#` prefix capped at four, then the trimmed body
    pub fn render(&self) -> String {
        format!(
            "{} {}\n{}",
            "#".repeat(usize::from(self.level.min(4))),
            self.heading,
            self.body.trim()
        )
    }
}

/// Title and ordered sections of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    pub title: String,
    pub sections: Vec<Section>,
}

impl ExtractedPage {
    /// Render all non-empty sections as one markdown document
    pub fn render(&self) -> String {
        let joined = self
            .sections
            .iter()
            .filter(|s| s.has_body())
            .map(Section::render)
            .collect::<Vec<_>>()
            .join("\n\n");
        filter_excessive_newlines(&joined).trim().to_string()
    }
}

/// Compiled selector tables
#[derive(Debug, Clone)]
struct Selectors {
    chrome: Selector,
    inner_chrome: Selector,
    titles: Vec<Selector>,
    title_tag: Selector,
    content_roots: Vec<Selector>,
    body: Selector,
    blocks: Selector,
    code: Selector,
    row: Selector,
    cell: Selector,
    term: Selector,
}

pub(crate) fn compile(css: &str) -> Selector {
    Selector::parse(css).expect("built-in selector")
}

impl Selectors {
    fn new() -> Self {
        Self {
            chrome: compile(CHROME_SELECTOR),
            inner_chrome: compile(INNER_CHROME_SELECTOR),
            titles: TITLE_SELECTORS.iter().map(|css| compile(css)).collect(),
            title_tag: compile("title"),
            content_roots: CONTENT_ROOT_SELECTORS.iter().map(|css| compile(css)).collect(),
            body: compile("body"),
            blocks: compile(BLOCK_SELECTOR),
            code: compile("code"),
            row: compile("tr"),
            cell: compile("th, td"),
            term: compile("dt"),
        }
    }
}

/// Stateless documentation page extractor
#[derive(Debug, Clone)]
pub struct Extractor {
    selectors: Selectors,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    /// Create an extractor with the built-in selector tables
    pub fn new() -> Self {
        Self {
            selectors: Selectors::new(),
        }
    }

    /// Extract bounded markdown content from a page
    pub fn extract(&self, html: &str, source_url: &str) -> Result<ExtractionResult, ExtractionError> {
        let page = self.extract_sections(html, source_url)?;
        Ok(bound(page.title.clone(), source_url, &page.render()))
    }

    /// Extract the title and sections of a page without rendering
    pub fn extract_sections(
        &self,
        html: &str,
        source_url: &str,
    ) -> Result<ExtractedPage, ExtractionError> {
        let mut document = Html::parse_document(html);
        remove_matching(&mut document, &self.selectors.chrome);

        let title = self.resolve_title(&document);

        let Some(root_html) = self.content_root(&document, is_fragment(html)) else {
            return Err(ExtractionError::NoContent {
                url: source_url.to_string(),
                raw_text_preview: self.body_preview(&document),
            });
        };

        let mut content = Html::parse_document(&root_html);
        remove_matching(&mut content, &self.selectors.inner_chrome);

        let mut builder = SectionBuilder::new(&self.selectors, title.clone());
        for element in content.root_element().select(&self.selectors.blocks) {
            builder.visit(element);
        }

        Ok(ExtractedPage {
            title,
            sections: builder.finish(),
        })
    }

    fn resolve_title(&self, document: &Html) -> String {
        let root = document.root_element();

        for selector in &self.selectors.titles {
            if let Some(heading) = root.select(selector).next() {
                let text = element_text(heading);
                let text = text.trim();
                if !text.is_empty() {
                    return text.to_string();
                }
            }
        }

        let title_tag: String = root
            .select(&self.selectors.title_tag)
            .map(element_text)
            .collect();
        let title_tag = title_tag.replacen(TITLE_SUFFIX, "", 1);
        let title_tag = title_tag.trim();
        if !title_tag.is_empty() {
            return title_tag.to_string();
        }

        DEFAULT_TITLE.to_string()
    }

    /// Inner markup of the first content container that has any.
    ///
    /// A bare fragment has no page chrome around it, so its body is the
    /// last resort; full documents without a container fail instead.
    fn content_root(&self, document: &Html, fragment: bool) -> Option<String> {
        let root = document.root_element();
        let fallback = fragment.then_some(&self.selectors.body);
        self.selectors.content_roots.iter().chain(fallback).find_map(|selector| {
            root.select(selector)
                .next()
                .map(|element| element.inner_html())
                .filter(|markup| !markup.is_empty())
        })
    }

    fn body_preview(&self, document: &Html) -> String {
        let text = document
            .root_element()
            .select(&self.selectors.body)
            .next()
            .map(element_text)
            .unwrap_or_default();
        collapse_whitespace(&text).chars().take(PREVIEW_CHARS).collect()
    }
}

/// Extract a page with the default extractor
pub fn extract(html: &str, source_url: &str) -> Result<ExtractionResult, ExtractionError> {
    Extractor::new().extract(html, source_url)
}

/// Block kinds the walk distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Heading(u8),
    Code,
    Table,
    List { ordered: bool },
    Definitions,
    Quote,
    Paragraph,
}

impl BlockKind {
    fn of(element: &ElementRef<'_>) -> Self {
        match element.value().name() {
            "h1" => BlockKind::Heading(1),
            "h2" => BlockKind::Heading(2),
            "h3" => BlockKind::Heading(3),
            "h4" => BlockKind::Heading(4),
            "h5" => BlockKind::Heading(5),
            "pre" => BlockKind::Code,
            "table" => BlockKind::Table,
            "ul" => BlockKind::List { ordered: false },
            "ol" => BlockKind::List { ordered: true },
            "dl" => BlockKind::Definitions,
            "blockquote" => BlockKind::Quote,
            _ => BlockKind::Paragraph,
        }
    }
}

/// Folds visited blocks into sections
struct SectionBuilder<'s> {
    selectors: &'s Selectors,
    sections: Vec<Section>,
    current: Section,
}

impl<'s> SectionBuilder<'s> {
    fn new(selectors: &'s Selectors, title: String) -> Self {
        Self {
            selectors,
            sections: Vec::new(),
            current: Section::new(title, 1),
        }
    }

    fn visit(&mut self, element: ElementRef<'_>) {
        let raw = element_text(element);
        let text = raw.trim();
        if text.is_empty() || is_boilerplate(text) {
            return;
        }

        match BlockKind::of(&element) {
            BlockKind::Heading(level) => {
                let next = Section::new(text, level);
                let done = std::mem::replace(&mut self.current, next);
                if done.has_body() {
                    self.sections.push(done);
                }
            }
            BlockKind::Code => {
                if text.chars().count() > MIN_CODE_CHARS {
                    let lang = element
                        .select(&self.selectors.code)
                        .next()
                        .and_then(|code| code.value().attr("class"))
                        .map(code_language)
                        .unwrap_or("");
                    self.append(&format!("\n```{lang}\n{text}\n```\n"));
                }
            }
            BlockKind::Table => {
                if let Some(table) = self.render_table(element) {
                    self.append(&table);
                }
            }
            BlockKind::List { ordered } => {
                if let Some(list) = render_list(element, ordered) {
                    self.append(&list);
                }
            }
            BlockKind::Definitions => {
                let definitions = self.render_definitions(element);
                self.append(&definitions);
            }
            BlockKind::Quote => self.append(&format!("\n> {text}\n")),
            BlockKind::Paragraph => {
                if text.chars().count() > MIN_PARAGRAPH_CHARS {
                    self.append(&format!("\n{text}\n"));
                }
            }
        }
    }

    fn append(&mut self, markdown: &str) {
        self.current.body.push_str(markdown);
    }

    fn render_table(&self, table: ElementRef<'_>) -> Option<String> {
        let rows: Vec<String> = table
            .select(&self.selectors.row)
            .filter_map(|row| {
                let cells: Vec<String> = row
                    .select(&self.selectors.cell)
                    .map(|cell| element_text(cell).trim().to_string())
                    .collect();
                (!cells.is_empty()).then(|| cells.join(" | "))
            })
            .collect();

        if rows.is_empty() {
            return None;
        }
        Some(format!("\n| {} |\n", rows.join(" |\n| ")))
    }

    fn render_definitions(&self, list: ElementRef<'_>) -> String {
        let mut out = String::new();
        for term in list.select(&self.selectors.term) {
            let term_text = element_text(term);
            let term_text = term_text.trim();
            if term_text.is_empty() {
                continue;
            }
            let definition = term
                .next_siblings()
                .find_map(ElementRef::wrap)
                .filter(|sibling| sibling.value().name() == "dd")
                .map(|dd| element_text(dd).trim().to_string())
                .unwrap_or_default();
            out.push_str(&format!("\n**{term_text}**: {definition}\n"));
        }
        out
    }

    fn finish(mut self) -> Vec<Section> {
        if self.current.has_body() {
            self.sections.push(self.current);
        }
        self.sections
    }
}

/// Direct `li` children; ordered numbering counts every `li`, even empty ones
fn render_list(list: ElementRef<'_>, ordered: bool) -> Option<String> {
    let items: Vec<String> = list
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "li")
        .enumerate()
        .filter_map(|(i, item)| {
            let text = element_text(item);
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Some(if ordered {
                format!("{}. {text}", i + 1)
            } else {
                format!("- {text}")
            })
        })
        .collect();

    if items.is_empty() {
        return None;
    }
    Some(format!("\n{}\n", items.join("\n")))
}

/// Language tag from a `language-xxx` class name
fn code_language(class: &str) -> &str {
    const MARKER: &str = "language-";
    for (idx, _) in class.match_indices(MARKER) {
        let rest = &class[idx + MARKER.len()..];
        let end = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if end > 0 {
            return &rest[..end];
        }
    }
    ""
}

/// Markup with no document-level tag, e.g. an article snippet
///
/// HTML5 allows omitting `<body>`, so a doctype, `<html>` or `<head>` also
/// marks a full document.
fn is_fragment(html: &str) -> bool {
    let lower = html.to_ascii_lowercase();
    !["<!doctype", "<html", "<head", "<body"]
        .iter()
        .any(|tag| has_tag(&lower, tag))
}

/// Whether `open` occurs as a whole tag name (`<head` but not `<header`)
fn has_tag(html: &str, open: &str) -> bool {
    html.match_indices(open).any(|(at, _)| {
        html[at + open.len()..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_ascii_alphanumeric() && c != '-')
    })
}

/// Detach every element matching `selector` from the document tree
fn remove_matching(document: &mut Html, selector: &Selector) {
    let ids: Vec<_> = document
        .root_element()
        .select(selector)
        .map(|element| element.id())
        .collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Bound rendered content to [`MAX_CONTENT_CHARS`]
fn bound(title: String, url: &str, rendered: &str) -> ExtractionResult {
    let content_length = rendered.chars().count();
    ExtractionResult {
        title,
        url: url.to_string(),
        content: rendered.chars().take(MAX_CONTENT_CHARS).collect(),
        content_length,
        truncated: content_length > MAX_CONTENT_CHARS,
    }
}

/// Replace every whitespace run with a single space
fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut last_was_space = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !last_was_space {
                result.push(' ');
            }
            last_was_space = true;
        } else {
            result.push(c);
            last_was_space = false;
        }
    }
    result
}

/// Filter excessive newlines: keep at most 2 consecutive newlines
pub fn filter_excessive_newlines(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut newline_count = 0;

    for c in s.chars() {
        if c == '\n' {
            newline_count += 1;
            if newline_count <= 2 {
                result.push(c);
            }
        } else {
            newline_count = 0;
            result.push(c);
        }
    }

    result
}
