//! HTML content extractor
//!
//! This module turns a fetched HTML document into a [`ScrapedContent`]:
//! - Strips navigation, ads, overlays and hidden elements
//! - Picks the main content block and collapses its whitespace
//! - Collects metadata, links, images, social tags and headings
//! - Derives structure counts and coarse performance signals
//!
//! Extraction is pure: no network access, same output for the same input.

use crate::report::{
    ContentMetadata, Headings, ImageInfo, LinkInventory, PageStructure, PerformanceSignals,
    ScrapedContent, SocialTags, TechnicalInfo,
};
use crate::url::{classify_link, extract_domain, resolve_against, LinkScope};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::ops::Deref;
use url::Url;

/// Subtrees removed before any text is read
const NOISE_SELECTORS: &[&str] = &[
    "script",
    "style",
    "noscript",
    "iframe",
    "footer",
    "header",
    "nav",
    "aside",
    "[aria-hidden='true']",
    "[hidden]",
];

/// Class or id words that mark an ad, banner, popup, modal, overlay or sidebar
const NOISE_WORDS: &[&str] = &[
    "ad",
    "ads",
    "advert",
    "advertisement",
    "advertising",
    "banner",
    "popup",
    "modal",
    "overlay",
    "sidebar",
];

/// Words that may precede a noise word inside one class token (`left-sidebar`)
const POSITION_WORDS: &[&str] = &[
    "left", "right", "top", "bottom", "site", "page", "main", "primary", "secondary",
];

/// Elements never detached, whatever their classes say
const STRUCTURAL_TAGS: &[&str] = &["html", "head", "body"];

/// Elements whose boundaries separate words in extracted text
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li",
    "main", "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Main content candidates, highest priority first
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    "[role='main']",
    ".content",
    ".main-content",
    ".post-content",
    ".entry-content",
    "#content",
    "#main",
];

const AUTHOR_SELECTORS: &[&str] = &[
    "meta[name='author']",
    "meta[property='article:author']",
    "meta[name='twitter:creator']",
];

const PUBLISHED_SELECTORS: &[&str] = &[
    "meta[property='article:published_time']",
    "meta[itemprop='datePublished']",
    "meta[name='publish_date']",
    "meta[name='pubdate']",
    "meta[name='date']",
];

const MODIFIED_SELECTORS: &[&str] = &[
    "meta[property='article:modified_time']",
    "meta[itemprop='dateModified']",
    "meta[property='og:updated_time']",
    "meta[name='last-modified']",
];

const RESOURCE_SELECTOR: &str = "link, script, img, video, audio";

/// Known CDN hostnames and markers, matched anywhere in the raw HTML
static CDN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)cdn|cloudflare|jsdelivr|unpkg|cloudfront\.net|fastly\.net")
        .expect("valid CDN regex")
});

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Extracts the structured page model from raw HTML
///
/// Head metadata, social tags and performance signals are read from the
/// document as served. Everything derived from the body (content, links,
/// images, headings, structure counts) is read after noise removal.
///
/// # Arguments
///
/// * `html` - The raw HTML document
/// * `base_url` - The page URL, used to resolve relative links and to decide
///   which links are internal
/// * `technical` - Transport metadata from the fetch
/// * `load_time_ms` - Time spent on the scrape so far
///
/// # Example
///
/// ```
/// use sumi_lens::report::TechnicalInfo;
/// use sumi_lens::scrape::extract_content;
/// use url::Url;
///
/// let html = r#"<html lang="en"><head><title>Test</title></head>
///     <body><article><p>Hello world</p></article></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let content = extract_content(html, &base_url, TechnicalInfo::default(), 0);
///
/// assert_eq!(content.title, "Test");
/// assert_eq!(content.metadata.word_count, 2);
/// ```
pub fn extract_content(
    html: &str,
    base_url: &Url,
    technical: TechnicalInfo,
    load_time_ms: u64,
) -> ScrapedContent {
    let raw = Html::parse_document(html);
    let mut cleaned = raw.clone();
    strip_noise(&mut cleaned);

    let raw_root = raw.root_element();
    let root = cleaned.root_element();

    let content = extract_main_content(root);
    let word_count = content.split_whitespace().count();

    let metadata = ContentMetadata {
        author: first_meta_content(raw_root, AUTHOR_SELECTORS),
        publish_date: first_meta_content(raw_root, PUBLISHED_SELECTORS).or_else(|| {
            select_all(raw_root, "time[datetime]")
                .into_iter()
                .find_map(|el| non_empty(el.value().attr("datetime")))
        }),
        modified_date: first_meta_content(raw_root, MODIFIED_SELECTORS),
        language: non_empty(raw_root.value().attr("lang")).or_else(|| {
            first_meta_content(raw_root, &["meta[http-equiv='content-language']"])
        }),
        keywords: extract_keywords(raw_root),
        word_count,
        reading_time: ContentMetadata::reading_time_for(word_count),
    };

    ScrapedContent {
        title: extract_title(raw_root, root),
        description: first_meta_content(
            raw_root,
            &["meta[name='description']", "meta[property='og:description']"],
        ),
        content,
        metadata,
        links: extract_links(root, base_url),
        images: extract_images(root, base_url),
        social: extract_social(raw_root),
        technical,
        structure: extract_structure(root),
        performance: PerformanceSignals {
            load_time: load_time_ms,
            resource_count: select_all(raw_root, RESOURCE_SELECTOR).len(),
            has_lazy_loading: !select_all(raw_root, "[loading='lazy']").is_empty(),
            has_cdn: CDN_PATTERN.is_match(html),
        },
    }
}

/// Detaches every noise subtree from the document
///
/// `<html>`, `<head>` and `<body>` are never detached, so body classes such as
/// `no-sidebar` or `modal-open` cannot empty the page.
fn strip_noise(document: &mut Html) {
    let root = document.root_element();

    let mut noise: Vec<ElementRef> = match selector(&NOISE_SELECTORS.join(", ")) {
        Some(selector) => root.select(&selector).collect(),
        None => Vec::new(),
    };
    noise.extend(
        root.descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| has_noise_marker(*el)),
    );

    let ids: Vec<_> = noise
        .into_iter()
        .filter(|el| !STRUCTURAL_TAGS.contains(&el.value().name()))
        .map(|el| el.deref().id())
        .collect();

    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

fn has_noise_marker(element: ElementRef) -> bool {
    let value = element.value();
    value.classes().any(is_noise_token) || value.id().is_some_and(is_noise_token)
}

/// Matches a single class or id token against [`NOISE_WORDS`]
///
/// The token is split on `-` and `_`. A noise word counts when it leads the
/// token (`sidebar-left`, `ad-slot`) or follows a position word
/// (`right-sidebar`). State classes like `no-sidebar`, `has-sidebar` or
/// `read-more` do not match.
fn is_noise_token(token: &str) -> bool {
    let lower = token.to_ascii_lowercase();
    let parts: Vec<&str> = lower.split(['-', '_']).collect();

    parts.iter().enumerate().any(|(i, part)| {
        NOISE_WORDS.contains(part) && (i == 0 || POSITION_WORDS.contains(&parts[i - 1]))
    })
}

fn extract_title(raw_root: ElementRef, root: ElementRef) -> String {
    select_all(raw_root, "title")
        .into_iter()
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
        .or_else(|| {
            select_all(root, "h1")
                .into_iter()
                .next()
                .map(element_text)
        })
        .unwrap_or_default()
}

fn extract_main_content(root: ElementRef) -> String {
    let block = CONTENT_SELECTORS
        .iter()
        .find_map(|css| select_all(root, css).into_iter().next())
        .or_else(|| select_all(root, "body").into_iter().next())
        .unwrap_or(root);

    let mut text = String::new();
    push_block_text(block, &mut text);
    collapse_whitespace(&text)
}

/// Appends the text under `element`, breaking lines at block boundaries
///
/// Inline markup adds no separator, so `Hel<b>lo</b>` stays one word.
fn push_block_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            let is_block = BLOCK_TAGS.contains(&child_element.value().name());
            if is_block {
                out.push('\n');
            }
            push_block_text(child_element, out);
            if is_block {
                out.push('\n');
            }
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
}

fn extract_keywords(raw_root: ElementRef) -> Vec<String> {
    first_meta_content(raw_root, &["meta[name='keywords']"])
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Collects `<a href>` targets, split into internal and external
///
/// Skipped: fragment-only, `javascript:`, `mailto:`, `tel:` and `data:`
/// hrefs, and anything that does not resolve to an HTTP(S) URL.
fn extract_links(root: ElementRef, base_url: &Url) -> LinkInventory {
    let source_domain = extract_domain(base_url).unwrap_or_default();
    let mut links = LinkInventory::default();

    for element in select_all(root, "a[href]") {
        let Some(href) = element.value().attr("href").map(str::trim) else {
            continue;
        };
        if is_skipped_href(href) {
            continue;
        }

        let Some(resolved) = resolve_against(base_url, href) else {
            continue;
        };
        if resolved.scheme() != "http" && resolved.scheme() != "https" {
            continue;
        }

        match classify_link(&resolved, &source_domain) {
            LinkScope::Internal => links.internal.push(resolved.to_string()),
            LinkScope::External => links.external.push(resolved.to_string()),
        }
    }

    links.total = links.internal.len() + links.external.len();
    links
}

fn is_skipped_href(href: &str) -> bool {
    if href.is_empty() || href.starts_with('#') {
        return true;
    }
    let lower = href.to_ascii_lowercase();
    ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

fn extract_images(root: ElementRef, base_url: &Url) -> Vec<ImageInfo> {
    select_all(root, "img[src]")
        .into_iter()
        .filter_map(|element| {
            let src = resolve_against(base_url, element.value().attr("src")?)?;
            Some(ImageInfo {
                src: src.to_string(),
                alt: non_empty(element.value().attr("alt")),
                title: non_empty(element.value().attr("title")),
            })
        })
        .collect()
}

fn extract_social(raw_root: ElementRef) -> SocialTags {
    let mut social = SocialTags::default();

    for element in select_all(raw_root, "meta[property^='og:']") {
        if let Some(property) = element.value().attr("property") {
            let content = element.value().attr("content").unwrap_or_default();
            social
                .open_graph
                .insert(property.to_string(), content.to_string());
        }
    }

    for element in select_all(raw_root, "meta[name^='twitter:']") {
        if let Some(name) = element.value().attr("name") {
            let content = element.value().attr("content").unwrap_or_default();
            social
                .twitter_card
                .insert(name.to_string(), content.to_string());
        }
    }

    social
}

fn extract_structure(root: ElementRef) -> PageStructure {
    let mut headings = Headings::default();
    for level in 1..=6u8 {
        let texts = select_all(root, &format!("h{}", level))
            .into_iter()
            .map(element_text);
        if let Some(list) = headings.level_mut(level) {
            list.extend(texts);
        }
    }

    PageStructure {
        headings,
        paragraphs: select_all(root, "p").len(),
        lists: select_all(root, "ul, ol").len(),
        tables: select_all(root, "table").len(),
        forms: select_all(root, "form").len(),
    }
}

/// Collapses whitespace: runs of spaces become one space, runs of blank
/// lines become a single blank line
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::new();
    let mut pending_blank = false;

    for line in text.lines() {
        let line = WHITESPACE_RUN.replace_all(line.trim(), " ");
        if line.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if !out.is_empty() {
            out.push_str(if pending_blank { "\n\n" } else { "\n" });
        }
        out.push_str(&line);
        pending_blank = false;
    }

    out
}

fn first_meta_content(root: ElementRef, selectors: &[&str]) -> Option<String> {
    selectors.iter().find_map(|css| {
        select_all(root, css)
            .into_iter()
            .find_map(|el| non_empty(el.value().attr("content")))
    })
}

fn element_text(element: ElementRef) -> String {
    WHITESPACE_RUN
        .replace_all(element.text().collect::<String>().trim(), " ")
        .into_owned()
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Descendants of `root` matching `css`
///
/// Selecting from an element rather than the document skips subtrees that
/// were detached by [`strip_noise`].
fn select_all<'a>(root: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match selector(css) {
        Some(selector) => root.select(&selector).collect(),
        None => Vec::new(),
    }
}
