//! HTML to Markdown conversion engine
//!
//! The engine is the one replaceable capability in this crate: everything
//! else orchestrates around the [`HtmlConverter`] trait. The default
//! implementation prepares the DOM with `scraper` (selector exclusion,
//! permissive readability pruning, main-content isolation, relative
//! reference resolution) and hands the result to `htmd`.

use crate::error::Error;
use crate::options::ConvertOptions;
use htmd::options::{CodeBlockStyle, HeadingStyle, LinkStyle, Options};
use htmd::HtmlToMarkdown;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::warn;
use url::Url;

/// The opaque HTML to Markdown capability
///
/// Deterministic: the same HTML input must yield byte-identical Markdown
/// on every call. Implementations must not keep per-call state.
pub trait HtmlConverter: Send + Sync {
    /// Convert a complete HTML document to Markdown
    ///
    /// `base` is the origin used to resolve relative references; `None`
    /// leaves relative links untouched.
    fn convert(&self, html: &str, base: Option<&Url>, options: &ConvertOptions)
        -> Result<String, Error>;
}

/// Selectors tried in order when isolating the main content region
const MAIN_REGION_SELECTORS: &[&str] = &["main", "article", "[role=\"main\"]"];

/// Class/id fragments that usually mark boilerplate regions
const UNLIKELY_HINTS: &[&str] = &[
    "banner", "combx", "comment", "community", "disqus", "extra", "foot", "header", "menu",
    "modal", "related", "remark", "rss", "shoutbox", "sidebar", "skyscraper", "sponsor",
    "agegate", "pagination", "pager", "popup",
];

/// Class/id fragments that save an otherwise unlikely region
const LIKELY_HINTS: &[&str] = &["article", "body", "column", "content", "main", "shadow"];

/// Class/id fragments that raise a region's readability score
const POSITIVE_HINTS: &[&str] = &[
    "article", "body", "content", "entry", "main", "page", "post", "text", "blog", "story",
];

/// Class/id fragments that lower a region's readability score
const NEGATIVE_HINTS: &[&str] = &[
    "combx", "comment", "contact", "foot", "footnote", "masthead", "media", "meta", "outbrain",
    "promo", "related", "scroll", "shoutbox", "sponsor", "shopping", "tags", "tool", "widget",
];

/// Default engine: scraper content filtering + htmd Markdown emission
#[derive(Debug, Default)]
pub struct HtmdConverter;

impl HtmdConverter {
    pub fn new() -> Self {
        Self
    }
}

impl HtmlConverter for HtmdConverter {
    fn convert(
        &self,
        html: &str,
        base: Option<&Url>,
        options: &ConvertOptions,
    ) -> Result<String, Error> {
        let prepared = prepare_html(html, base, options);

        let converter = HtmlToMarkdown::builder()
            .options(Options {
                heading_style: HeadingStyle::Atx,
                code_block_style: CodeBlockStyle::Fenced,
                link_style: LinkStyle::Inlined,
                ..Default::default()
            })
            .build();

        converter
            .convert(&prepared)
            .map_err(|e| Error::Conversion(e.to_string()))
    }
}

/// Run the fixed content-filtering passes and serialize back to HTML
fn prepare_html(html: &str, base: Option<&Url>, options: &ConvertOptions) -> String {
    let mut doc = Html::parse_document(html);

    strip_excluded(&mut doc, &options.exclude);
    if options.remove_unlikely_content {
        strip_unlikely(&mut doc);
    }
    prune_low_scoring(&mut doc, options);
    if let Some(base) = base {
        resolve_relative_refs(&mut doc, base);
    }

    if options.isolate_main {
        if let Some(region) = main_region(&doc) {
            return region;
        }
    }
    doc.html()
}

/// Drop every element matching the exclusion selector list
fn strip_excluded(doc: &mut Html, exclude: &[String]) {
    for pattern in exclude {
        let selector = match Selector::parse(pattern) {
            Ok(s) => s,
            Err(e) => {
                warn!(pattern = %pattern, error = %e, "skipping unparseable exclude selector");
                continue;
            }
        };
        let ids: Vec<_> = doc.select(&selector).map(|el| el.id()).collect();
        for id in ids {
            if let Some(mut node) = doc.tree.get_mut(id) {
                node.detach();
            }
        }
    }
}

/// Drop regions whose class/id look like boilerplate
///
/// Disabled by the default configuration; kept behind the
/// `remove_unlikely_content` flag.
fn strip_unlikely(doc: &mut Html) {
    let all = match Selector::parse("*") {
        Ok(s) => s,
        Err(_) => return,
    };
    let ids: Vec<_> = doc
        .select(&all)
        .filter(|el| {
            let name = el.value().name();
            if matches!(name, "html" | "body" | "main" | "article" | "a") {
                return false;
            }
            let hint = class_id_hint(el);
            UNLIKELY_HINTS.iter().any(|t| hint.contains(t))
                && !LIKELY_HINTS.iter().any(|t| hint.contains(t))
        })
        .map(|el| el.id())
        .collect();
    for id in ids {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Readability pass: drop short regions that also score below the floor
///
/// With the default thresholds (length 10, score -50) this keeps nearly
/// everything; only regions that are both empty of text and heavily
/// penalized by their class/id disappear.
fn prune_low_scoring(doc: &mut Html, options: &ConvertOptions) {
    let candidates = match Selector::parse("p, div, section, aside, td, li") {
        Ok(s) => s,
        Err(_) => return,
    };
    let ids: Vec<_> = doc
        .select(&candidates)
        .filter(|el| {
            let text: String = el.text().collect();
            let text = text.trim();
            text.len() < options.min_content_length && region_score(el, text) < options.min_score
        })
        .map(|el| el.id())
        .collect();
    for id in ids {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Estimate how content-like a region is
fn region_score(el: &ElementRef, text: &str) -> i32 {
    let mut score = class_id_weight(el);
    score += text.matches(',').count() as i32;
    score += ((text.len() / 100) as i32).min(3);
    score
}

fn class_id_weight(el: &ElementRef) -> i32 {
    let hint = class_id_hint(el);
    let mut weight = 0;
    if POSITIVE_HINTS.iter().any(|t| hint.contains(t)) {
        weight += 25;
    }
    if NEGATIVE_HINTS.iter().any(|t| hint.contains(t)) {
        weight -= 25;
    }
    weight
}

fn class_id_hint(el: &ElementRef) -> String {
    let class = el.value().attr("class").unwrap_or_default();
    let id = el.value().attr("id").unwrap_or_default();
    format!("{class} {id}").to_lowercase()
}

/// Rewrite relative href/src attributes against the request origin
fn resolve_relative_refs(doc: &mut Html, base: &Url) {
    let targets = [("a[href]", "href"), ("img[src]", "src")];

    let mut rewrites = Vec::new();
    for (pattern, attr) in targets {
        let selector = match Selector::parse(pattern) {
            Ok(s) => s,
            Err(_) => continue,
        };
        for el in doc.select(&selector) {
            if let Some(value) = el.value().attr(attr) {
                if matches!(Url::parse(value), Err(url::ParseError::RelativeUrlWithoutBase)) {
                    if let Ok(resolved) = base.join(value) {
                        rewrites.push((el.id(), attr, resolved.to_string()));
                    }
                }
            }
        }
    }

    for (id, attr, resolved) in rewrites {
        if let Some(mut node) = doc.tree.get_mut(id) {
            if let Node::Element(el) = node.value() {
                for (name, value) in el.attrs.iter_mut() {
                    if &*name.local == attr {
                        *value = resolved.as_str().into();
                    }
                }
            }
        }
    }
}

/// Serialize the first non-empty main-content region, if any
fn main_region(doc: &Html) -> Option<String> {
    for pattern in MAIN_REGION_SELECTORS {
        let selector = Selector::parse(pattern).ok()?;
        if let Some(el) = doc.select(&selector).next() {
            let text: String = el.text().collect();
            if !text.trim().is_empty() {
                return Some(el.html());
            }
        }
    }
    None
}
