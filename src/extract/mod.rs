//! Content extraction for Doc-Atlas
//!
//! Given a parsed HTML document, this module isolates the primary content
//! region and emits an ordered sequence of typed text blocks (headings and
//! paragraphs). Blocks are extracted directly from the parsed document in a
//! single pass; extracted text is never re-parsed as markup.
//!
//! Selector strategy: try the configured content container; if a narrower
//! article region exists inside it, prefer that; otherwise keep the outer
//! container; if neither matches, fall back to the whole document. Auxiliary
//! regions (navigation, headers, footers, scripts, forms, TOC widgets) are
//! excluded before any text is collected, so their text never appears in the
//! output.

use crate::config::ExtractionConfig;
use scraper::{ElementRef, Html, Selector};

/// Structural role of one extracted text block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Heading with its level (1-based, open-ended so h4+ degrade gracefully)
    Heading(u8),
    /// Body paragraph
    Paragraph,
}

/// One unit of extracted text tagged with its structural role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub kind: BlockKind,
    pub text: String,
}

impl TextBlock {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Heading(level),
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Paragraph,
            text: text.into(),
        }
    }
}

/// Element names whose subtrees are stripped before text extraction
const AUXILIARY_TAGS: &[&str] = &[
    "nav", "header", "footer", "aside", "script", "style", "form",
];

/// Extracts the ordered block sequence from a parsed document
///
/// This is a pure transform with no error cases: when the configured content
/// container is absent the whole document is used, so extraction always
/// produces whatever heading/paragraph structure the page has.
pub fn extract_blocks(doc: &Html, config: &ExtractionConfig) -> Vec<TextBlock> {
    let region = select_content_region(doc, config);
    collect_blocks(region)
}

/// Locates the primary content region per the selector strategy
fn select_content_region<'a>(doc: &'a Html, config: &ExtractionConfig) -> ElementRef<'a> {
    if let Some(container) = select_first(doc.root_element(), &config.content_selector) {
        // Prefer the narrower article region when present inside the container
        if let Some(article) = select_first(container, &config.article_selector) {
            return article;
        }
        return container;
    }

    // Whole-document fallback: the body if present, else the root element
    select_first(doc.root_element(), "body").unwrap_or_else(|| doc.root_element())
}

/// Selects the first match of `selector` scoped to `scope`
///
/// An unparseable selector behaves as no-match rather than an error, so a
/// typo in the config degrades to the fallback instead of failing the page.
fn select_first<'a>(scope: ElementRef<'a>, selector: &str) -> Option<ElementRef<'a>> {
    let parsed = Selector::parse(selector).ok()?;
    scope.select(&parsed).next()
}

/// Walks the region in document order collecting heading/paragraph blocks
fn collect_blocks(region: ElementRef<'_>) -> Vec<TextBlock> {
    let mut blocks = Vec::new();

    for node in region.descendants() {
        let element = match ElementRef::wrap(node) {
            Some(el) => el,
            None => continue,
        };

        let kind = match classify_element(&element) {
            Some(k) => k,
            None => continue,
        };

        if in_auxiliary_region(&element, &region) {
            continue;
        }

        let text = block_text(&element);
        if !text.is_empty() {
            blocks.push(TextBlock { kind, text });
        }
    }

    blocks
}

/// Maps an element name to a block kind, if it is one we collect
fn classify_element(element: &ElementRef<'_>) -> Option<BlockKind> {
    let name = element.value().name();
    match name {
        "p" => Some(BlockKind::Paragraph),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level: u8 = name[1..].parse().ok()?;
            Some(BlockKind::Heading(level))
        }
        _ => None,
    }
}

/// Returns true if the element sits inside an auxiliary subtree of the region
///
/// Checking ancestry up to the region root is equivalent to removing the
/// auxiliary subtrees before extraction: their text never reaches the output.
fn in_auxiliary_region(element: &ElementRef<'_>, region: &ElementRef<'_>) -> bool {
    for ancestor in element.ancestors() {
        if ancestor.id() == region.id() {
            break;
        }
        if let Some(el) = ElementRef::wrap(ancestor) {
            if is_auxiliary(&el) {
                return true;
            }
        }
    }
    false
}

/// Returns true for navigation/chrome elements and TOC widgets
fn is_auxiliary(element: &ElementRef<'_>) -> bool {
    let value = element.value();

    if AUXILIARY_TAGS.contains(&value.name()) {
        return true;
    }

    // MkDocs-Material table-of-contents widgets
    if value.attr("data-md-component") == Some("toc") {
        return true;
    }
    value.classes().any(|c| c == "md-toc")
}

/// Extracts element text: strip each text node, join with single newlines
fn block_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
