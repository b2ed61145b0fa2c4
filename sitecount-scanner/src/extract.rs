//! Streaming anchor extraction built on `lol_html`.

use crate::error::ExtractError;
use crate::origin::RawLink;
use futures::{Stream, StreamExt};
use lol_html::html_content::Attribute;
use lol_html::{HtmlRewriter, Settings, element, end_tag};
use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;

/// Path segment used by CDN rewrite endpoints (email obfuscation and friends).
const CDN_REWRITE_MARKER: &str = "cdn-cgi";

/// Whether an `href` value is worth handing to the normalizer.
pub fn is_candidate(href: &str) -> bool {
    !href.is_empty() && !href.starts_with('#') && !href.contains(CDN_REWRITE_MARKER)
}

/// Collects every `href` on the start and end tags of anchors in a document
/// fed chunk by chunk.
///
/// Links are returned in document order, and a tag carrying several `href`
/// attributes yields all of them. Malformed markup is tolerated by the
/// rewriter; only a failing body stream or a rewriter error aborts the page.
pub async fn extract_links<S, B, E>(body: S) -> Result<Vec<RawLink>, ExtractError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let mut body = std::pin::pin!(body);
    let collected = Rc::new(RefCell::new(Collected::default()));
    let mut window = Window::default();

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![element!("a", |el| {
                collected
                    .borrow_mut()
                    .links
                    .extend(hrefs(el.attributes()));

                if el.can_have_content() {
                    let collected = Rc::clone(&collected);
                    el.on_end_tag(end_tag!(move |end| {
                        collected
                            .borrow_mut()
                            .mark_end_tag(end.source_location().bytes());
                        Ok(())
                    }))?;
                }
                Ok(())
            })],
            ..Settings::default()
        },
        |_: &[u8]| {},
    );

    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| ExtractError::Body(e.into()))?;
        window.push(chunk.as_ref());
        rewriter.write(chunk.as_ref())?;

        let consumed = collected.borrow_mut().resolve_end_tags(&window)?;
        window.discard(consumed);
    }
    rewriter.end()?;
    collected.borrow_mut().resolve_end_tags(&window)?;

    let links = std::mem::take(&mut collected.borrow_mut().links);
    Ok(links)
}

/// Candidate `href` values among a tag's attributes, duplicates included.
fn hrefs(attributes: &[Attribute<'_>]) -> Vec<RawLink> {
    attributes
        .iter()
        .filter(|attr| attr.name() == "href")
        .map(|attr| attr.value())
        .filter(|href| is_candidate(href))
        .map(RawLink::new)
        .collect()
}

/// Links from the attributes of a raw `</a ...>` tag.
///
/// The rewriter drops attributes on end tags, so the tag is replayed as a
/// start tag through a throwaway rewriter.
fn end_tag_hrefs(raw: &[u8]) -> Result<Vec<RawLink>, ExtractError> {
    let Some(rest) = raw.strip_prefix(b"</") else {
        return Ok(Vec::new());
    };
    if !rest.contains(&b'=') {
        return Ok(Vec::new());
    }

    let mut links = Vec::new();
    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![element!("a", |el| {
                links.extend(hrefs(el.attributes()));
                Ok(())
            })],
            ..Settings::default()
        },
        |_: &[u8]| {},
    );
    rewriter.write(b"<")?;
    rewriter.write(rest)?;
    rewriter.end()?;

    Ok(links)
}

#[derive(Default)]
struct Collected {
    links: Vec<RawLink>,
    end_tags: Vec<EndTagSpan>,
}

/// An anchor end tag seen by the rewriter whose attributes are still unread.
struct EndTagSpan {
    /// Index in `links` where the tag's own links belong.
    at: usize,
    /// Position of the whole tag in the input.
    bytes: Range<usize>,
}

impl Collected {
    fn mark_end_tag(&mut self, bytes: Range<usize>) {
        let at = self.links.len();
        self.end_tags.push(EndTagSpan { at, bytes });
    }

    /// Splices the links of every pending end tag into place and returns the
    /// input offset up to which no end tag can still be pending.
    fn resolve_end_tags(&mut self, window: &Window) -> Result<usize, ExtractError> {
        let mut consumed = window.offset;
        let mut inserted = 0;

        for span in std::mem::take(&mut self.end_tags) {
            consumed = consumed.max(span.bytes.end);
            let Some(raw) = window.get(span.bytes) else {
                continue;
            };

            let found = end_tag_hrefs(raw)?;
            let at = span.at + inserted;
            inserted += found.len();
            self.links.splice(at..at, found);
        }

        Ok(consumed)
    }
}

/// Tail of the input that may still contain an unfinished `</a ...>` tag.
#[derive(Default)]
struct Window {
    /// Input offset of `bytes[0]`.
    offset: usize,
    bytes: Vec<u8>,
}

impl Window {
    fn push(&mut self, chunk: &[u8]) {
        self.bytes.extend_from_slice(chunk);
    }

    fn get(&self, range: Range<usize>) -> Option<&[u8]> {
        let start = range.start.checked_sub(self.offset)?;
        let end = range.end.checked_sub(self.offset)?;
        self.bytes.get(start..end)
    }

    /// Forgets input before `consumed`, keeping any later bytes that could open
    /// an anchor end tag. Two trailing bytes survive for a split `</`.
    fn discard(&mut self, consumed: usize) {
        let from = consumed.saturating_sub(self.offset).min(self.bytes.len());
        let keep = match anchor_end_tag_start(&self.bytes[from..]) {
            Some(pos) => from + pos,
            None => self.bytes.len().saturating_sub(2).max(from),
        };

        self.bytes.drain(..keep);
        self.offset += keep;
    }
}

/// Position of the first `</a` that is followed by a tag-name terminator or by
/// the end of the buffer.
fn anchor_end_tag_start(bytes: &[u8]) -> Option<usize> {
    (0..bytes.len()).find(|&i| {
        let tail = &bytes[i..];
        tail.starts_with(b"</")
            && tail.get(2).is_some_and(|b| b.eq_ignore_ascii_case(&b'a'))
            && tail
                .get(3)
                .is_none_or(|b| b.is_ascii_whitespace() || *b == b'/' || *b == b'>')
    })
}

/// Convenience wrapper for a document already held in memory.
pub async fn extract_links_from_str(html: &str) -> Result<Vec<RawLink>, ExtractError> {
    let chunk: Result<&[u8], std::io::Error> = Ok(html.as_bytes());
    extract_links(futures::stream::iter([chunk])).await
}
