//! Sitemap reading.
//!
//! The sitemap is the route manifest: every `<loc>` becomes one route.
//! Entries that are malformed or not absolute URLs are skipped without
//! complaint, and repeated entries are kept so the renderer simply writes
//! them again.

use quick_xml::Reader;
use quick_xml::events::Event;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use super::RenderError;
use crate::core::Route;
use crate::debug;

/// First candidate that exists on disk.
pub fn locate_sitemap(candidates: &[PathBuf]) -> Result<&Path, RenderError> {
    candidates
        .iter()
        .map(PathBuf::as_path)
        .find(|path| path.is_file())
        .ok_or_else(|| RenderError::MissingSitemap {
            tried: candidates.to_vec(),
        })
}

/// Locate and parse the sitemap, returning its path and routes.
pub fn load_routes(candidates: &[PathBuf]) -> Result<(PathBuf, Vec<Route>), RenderError> {
    let path = locate_sitemap(candidates)?;
    let xml = fs::read_to_string(path).map_err(|source| RenderError::Io {
        action: "read",
        path: path.to_path_buf(),
        source,
    })?;
    Ok((path.to_path_buf(), parse_sitemap(&xml)))
}

/// One `<loc>` element (namespace prefix allowed). Its body may hold text
/// and CDATA sections but no other markup, so an unterminated entry cannot
/// swallow the next one.
static RE_LOC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<(?:[a-z_][-\w.]*:)?loc\b[^>]*>((?:[^<]|<!\[CDATA\[.*?\]\]>)*)</(?:[a-z_][-\w.]*:)?loc\s*>",
    )
    .unwrap()
});

/// Extract the routes of every `<loc>` in document order.
///
/// Each entry is decoded on its own, so an entry that is not well-formed
/// XML or not an absolute URL is dropped without affecting its neighbours.
pub fn parse_sitemap(xml: &str) -> Vec<Route> {
    RE_LOC
        .captures_iter(xml)
        .filter_map(|caps| {
            let body = caps.get(1)?.as_str();
            match decode_loc(body) {
                Ok(text) => Route::from_url(&text),
                Err(err) => {
                    debug!("sitemap"; "skipping <loc>{}</loc>: {err}", body.trim());
                    None
                }
            }
        })
        .collect()
}

/// Text of a `<loc>` body with CDATA unwrapped and entities resolved.
fn decode_loc(body: &str) -> Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut text = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(t) => text.push_str(&String::from_utf8_lossy(&t)),
            Event::CData(data) => text.push_str(&String::from_utf8_lossy(&data)),
            // `&amp;` and friends arrive as separate events
            Event::GeneralRef(entity) => {
                let name = String::from_utf8_lossy(&entity);
                match resolve_entity(&name) {
                    Some(c) => text.push(c),
                    None => {
                        text.push('&');
                        text.push_str(&name);
                        text.push(';');
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(text)
}

/// Predefined XML entities and numeric character references.
fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
