//! Browser globals that carry little or no state on the server.
//!
//! Everything here answers with the most neutral value a browser could
//! give: no media query matches, observers never fire, images never load.

use url::Url;

use super::dom::{NodeId, StyleDeclaration};

/// Fallback when the configured origin does not parse.
const FALLBACK_ORIGIN: &str = "http://localhost/";

// ============================================================================
// Navigator
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    pub user_agent: String,
    pub language: String,
    pub languages: Vec<String>,
    pub on_line: bool,
    pub cookie_enabled: bool,
    pub hardware_concurrency: u32,
}

impl Navigator {
    pub fn new(language: &str) -> Self {
        Self {
            user_agent: concat!("prerender/", env!("CARGO_PKG_VERSION")).to_string(),
            language: language.to_string(),
            languages: vec![language.to_string()],
            on_line: true,
            cookie_enabled: false,
            hardware_concurrency: 1,
        }
    }
}

// ============================================================================
// Location and History
// ============================================================================

/// `window.location`, kept in sync with the route being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    pub fn new(origin: &str) -> Self {
        let url = Url::parse(origin)
            .or_else(|_| Url::parse(FALLBACK_ORIGIN))
            .expect("fallback origin is a valid URL");
        Self { url }
    }

    /// Point at `path` on the same origin; query and fragment are cleared.
    pub fn set_pathname(&mut self, path: &str) {
        self.url.set_path(path);
        self.url.set_query(None);
        self.url.set_fragment(None);
    }

    pub fn href(&self) -> &str {
        self.url.as_str()
    }

    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    /// `https:`
    pub fn protocol(&self) -> String {
        format!("{}:", self.url.scheme())
    }

    pub fn host(&self) -> String {
        match (self.url.host_str(), self.url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            _ => String::new(),
        }
    }

    pub fn hostname(&self) -> &str {
        self.url.host_str().unwrap_or("")
    }

    pub fn pathname(&self) -> &str {
        self.url.path()
    }

    /// `?a=1`, or empty.
    pub fn search(&self) -> String {
        self.url.query().map(|q| format!("?{q}")).unwrap_or_default()
    }

    /// `#top`, or empty.
    pub fn hash(&self) -> String {
        self.url.fragment().map(|f| format!("#{f}")).unwrap_or_default()
    }

    pub fn assign(&mut self, _url: &str) {}
    pub fn replace(&mut self, _url: &str) {}
    pub fn reload(&mut self) {}
}

/// `window.history`: navigation calls are accepted and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct History {
    pub length: usize,
}

impl Default for History {
    fn default() -> Self {
        Self { length: 1 }
    }
}

impl History {
    pub fn push_state(&mut self, _url: &str) {}
    pub fn replace_state(&mut self, _url: &str) {}
    pub fn back(&mut self) {}
    pub fn forward(&mut self) {}
    pub fn go(&mut self, _delta: i32) {}
}

// ============================================================================
// matchMedia / getComputedStyle
// ============================================================================

/// Result of `matchMedia(query)`. Never matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaQueryList {
    pub media: String,
    pub matches: bool,
}

impl MediaQueryList {
    pub fn add_listener<F: FnMut(bool)>(&self, _listener: F) {}
    pub fn remove_listener(&self) {}
    pub fn add_event_listener<F: FnMut(bool)>(&self, _event: &str, _listener: F) {}
    pub fn remove_event_listener(&self, _event: &str) {}
}

pub fn match_media(query: &str) -> MediaQueryList {
    MediaQueryList {
        media: query.to_string(),
        matches: false,
    }
}

/// Every property reads as the empty string.
pub fn get_computed_style(_element: NodeId) -> StyleDeclaration {
    StyleDeclaration::default()
}

// ============================================================================
// Observers
// ============================================================================

/// Shared surface of the observer classes. Callbacks are never invoked.
pub trait Observer {
    fn observe(&self, _target: NodeId) {}
    fn unobserve(&self, _target: NodeId) {}
    fn disconnect(&self) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IntersectionObserver;

#[derive(Debug, Clone, Copy, Default)]
pub struct MutationObserver;

#[derive(Debug, Clone, Copy, Default)]
pub struct ResizeObserver;

impl Observer for IntersectionObserver {}
impl Observer for ResizeObserver {}

impl Observer for MutationObserver {}

impl MutationObserver {
    /// Nothing is ever queued.
    pub fn take_records(&self) -> Vec<NodeId> {
        Vec::new()
    }
}

// ============================================================================
// Image
// ============================================================================

/// `new Image()`. Setting `src` records the value but never loads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    pub src: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
}

impl Image {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn set_src(&mut self, src: &str) {
        self.src = src.to_string();
    }

    pub fn complete(&self) -> bool {
        false
    }
}

// ============================================================================
// Animation frames
// ============================================================================

/// `requestAnimationFrame` / `cancelAnimationFrame`.
///
/// Callbacks are dropped on request; only the id sequence is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationFrames {
    last_id: u32,
}

impl AnimationFrames {
    pub fn request<F: FnOnce(f64)>(&mut self, _callback: F) -> u32 {
        self.last_id += 1;
        self.last_id
    }

    pub fn cancel(&mut self, _id: u32) {}
}
