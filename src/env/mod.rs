//! Browser environment stand-ins for rendering outside a browser.
//!
//! [`Environment`] is constructed once per render run, installed before the
//! first route and handed to every render by `&mut`. It is never reset, so
//! whatever one route writes (storage, injected style elements) is visible to
//! the next.
//!
//! Each global is a slot that `install()` fills only when empty: installing
//! twice is harmless and a value supplied by the host is kept. Touching a
//! global that was never installed fails with [`EnvError::Reference`], the
//! same way the browser reports an undefined name. `window` is deliberately
//! absent; code probing for it sees a non-browser runtime.

mod browser;
mod dom;
mod fetch;
mod storage;

pub use browser::{
    AnimationFrames, History, Image, IntersectionObserver, Location, MediaQueryList,
    MutationObserver, Navigator, Observer, ResizeObserver,
};
pub use dom::{Document, NodeId, StyleDeclaration};
pub use fetch::{Fetch, Response};
pub use storage::Storage;

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::core::Route;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    #[error("ReferenceError: {0} is not defined")]
    Reference(&'static str),

    #[error("HierarchyRequestError: {0}")]
    Hierarchy(&'static str),

    #[error("NotFoundError: node is not a child of this parent")]
    NotFound,
}

// ============================================================================
// Global names
// ============================================================================

/// Every name the environment can define on the global scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Global {
    SessionStorage,
    LocalStorage,
    Document,
    Navigator,
    Location,
    History,
    MatchMedia,
    IntersectionObserver,
    MutationObserver,
    ResizeObserver,
    Image,
    Fetch,
    RequestAnimationFrame,
    CancelAnimationFrame,
    GetComputedStyle,
}

/// Globals that are plain functions or constructors with no state to hold.
const STATELESS: [Global; 6] = [
    Global::MatchMedia,
    Global::IntersectionObserver,
    Global::MutationObserver,
    Global::ResizeObserver,
    Global::Image,
    Global::GetComputedStyle,
];

impl Global {
    pub const ALL: [Self; 15] = [
        Self::SessionStorage,
        Self::LocalStorage,
        Self::Document,
        Self::Navigator,
        Self::Location,
        Self::History,
        Self::MatchMedia,
        Self::IntersectionObserver,
        Self::MutationObserver,
        Self::ResizeObserver,
        Self::Image,
        Self::Fetch,
        Self::RequestAnimationFrame,
        Self::CancelAnimationFrame,
        Self::GetComputedStyle,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::SessionStorage => "sessionStorage",
            Self::LocalStorage => "localStorage",
            Self::Document => "document",
            Self::Navigator => "navigator",
            Self::Location => "location",
            Self::History => "history",
            Self::MatchMedia => "matchMedia",
            Self::IntersectionObserver => "IntersectionObserver",
            Self::MutationObserver => "MutationObserver",
            Self::ResizeObserver => "ResizeObserver",
            Self::Image => "Image",
            Self::Fetch => "fetch",
            Self::RequestAnimationFrame => "requestAnimationFrame",
            Self::CancelAnimationFrame => "cancelAnimationFrame",
            Self::GetComputedStyle => "getComputedStyle",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.name() == name)
    }
}

// ============================================================================
// Environment
// ============================================================================

/// Values `install()` needs to build location and navigator.
#[derive(Debug, Clone)]
pub struct EnvOptions {
    /// Site origin, e.g. `https://example.com`.
    pub origin: String,
    /// BCP 47 tag reported by `navigator.language`.
    pub language: String,
}

impl Default for EnvOptions {
    fn default() -> Self {
        Self {
            origin: "http://localhost".to_string(),
            language: "en-US".to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Environment {
    session_storage: Option<Storage>,
    local_storage: Option<Storage>,
    document: Option<Document>,
    navigator: Option<Navigator>,
    location: Option<Location>,
    history: Option<History>,
    fetch: Option<Fetch>,
    animation_frames: Option<AnimationFrames>,
    stateless: FxHashSet<Global>,
}

/// Fill `slot` if empty; returns 1 when something was installed.
fn fill<T>(slot: &mut Option<T>, init: impl FnOnce() -> T) -> usize {
    if slot.is_some() {
        return 0;
    }
    *slot = Some(init());
    1
}

fn require<T>(slot: &mut Option<T>, global: Global) -> Result<&mut T, EnvError> {
    slot.as_mut().ok_or(EnvError::Reference(global.name()))
}

impl Environment {
    /// An empty environment: nothing is defined until [`install`](Self::install).
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply `localStorage` from the host before installing.
    pub fn with_local_storage(mut self, storage: Storage) -> Self {
        self.local_storage = Some(storage);
        self
    }

    /// Supply `document` from the host before installing.
    pub fn with_document(mut self, document: Document) -> Self {
        self.document = Some(document);
        self
    }

    /// Define every missing global. Returns how many slots were filled, so a
    /// second call returns 0.
    pub fn install(&mut self, options: &EnvOptions) -> usize {
        let mut installed = 0;
        installed += fill(&mut self.session_storage, Storage::new);
        installed += fill(&mut self.local_storage, Storage::new);
        installed += fill(&mut self.document, Document::new);
        installed += fill(&mut self.navigator, || Navigator::new(&options.language));
        installed += fill(&mut self.location, || Location::new(&options.origin));
        installed += fill(&mut self.history, History::default);
        installed += fill(&mut self.fetch, Fetch::default);
        installed += fill(&mut self.animation_frames, AnimationFrames::default);
        for global in STATELESS {
            if self.stateless.insert(global) {
                installed += 1;
            }
        }
        installed
    }

    /// Whether `name` resolves on the global scope (`typeof name !== "undefined"`).
    pub fn defines(&self, name: &str) -> bool {
        Global::from_name(name).is_some_and(|g| self.is_installed(g))
    }

    pub fn is_installed(&self, global: Global) -> bool {
        match global {
            Global::SessionStorage => self.session_storage.is_some(),
            Global::LocalStorage => self.local_storage.is_some(),
            Global::Document => self.document.is_some(),
            Global::Navigator => self.navigator.is_some(),
            Global::Location => self.location.is_some(),
            Global::History => self.history.is_some(),
            Global::Fetch => self.fetch.is_some(),
            Global::RequestAnimationFrame | Global::CancelAnimationFrame => {
                self.animation_frames.is_some()
            }
            _ => self.stateless.contains(&global),
        }
    }

    fn require_stateless(&self, global: Global) -> Result<(), EnvError> {
        if self.stateless.contains(&global) {
            Ok(())
        } else {
            Err(EnvError::Reference(global.name()))
        }
    }

    /// Point `location` at the route about to be rendered.
    pub fn navigate(&mut self, route: &Route) -> Result<(), EnvError> {
        self.location()?.set_pathname(route.as_str());
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Stateful globals
    // ------------------------------------------------------------------------

    pub fn session_storage(&mut self) -> Result<&mut Storage, EnvError> {
        require(&mut self.session_storage, Global::SessionStorage)
    }

    pub fn local_storage(&mut self) -> Result<&mut Storage, EnvError> {
        require(&mut self.local_storage, Global::LocalStorage)
    }

    pub fn document(&mut self) -> Result<&mut Document, EnvError> {
        require(&mut self.document, Global::Document)
    }

    pub fn navigator(&mut self) -> Result<&mut Navigator, EnvError> {
        require(&mut self.navigator, Global::Navigator)
    }

    pub fn location(&mut self) -> Result<&mut Location, EnvError> {
        require(&mut self.location, Global::Location)
    }

    pub fn history(&mut self) -> Result<&mut History, EnvError> {
        require(&mut self.history, Global::History)
    }

    pub fn fetch(&mut self, url: &str) -> Result<Response, EnvError> {
        Ok(require(&mut self.fetch, Global::Fetch)?.fetch(url))
    }

    /// Number of requests swallowed by `fetch` so far.
    pub fn fetch_count(&self) -> usize {
        self.fetch.as_ref().map_or(0, Fetch::count)
    }

    pub fn request_animation_frame<F: FnOnce(f64)>(&mut self, callback: F) -> Result<u32, EnvError> {
        Ok(require(&mut self.animation_frames, Global::RequestAnimationFrame)?.request(callback))
    }

    pub fn cancel_animation_frame(&mut self, id: u32) -> Result<(), EnvError> {
        require(&mut self.animation_frames, Global::CancelAnimationFrame)?.cancel(id);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Functions and constructors
    // ------------------------------------------------------------------------

    pub fn match_media(&self, query: &str) -> Result<MediaQueryList, EnvError> {
        self.require_stateless(Global::MatchMedia)?;
        Ok(browser::match_media(query))
    }

    pub fn get_computed_style(&self, element: NodeId) -> Result<StyleDeclaration, EnvError> {
        self.require_stateless(Global::GetComputedStyle)?;
        Ok(browser::get_computed_style(element))
    }

    pub fn intersection_observer(&self) -> Result<IntersectionObserver, EnvError> {
        self.require_stateless(Global::IntersectionObserver)?;
        Ok(IntersectionObserver)
    }

    pub fn mutation_observer(&self) -> Result<MutationObserver, EnvError> {
        self.require_stateless(Global::MutationObserver)?;
        Ok(MutationObserver)
    }

    pub fn resize_observer(&self) -> Result<ResizeObserver, EnvError> {
        self.require_stateless(Global::ResizeObserver)?;
        Ok(ResizeObserver)
    }

    pub fn image(&self, width: u32, height: u32) -> Result<Image, EnvError> {
        self.require_stateless(Global::Image)?;
        Ok(Image::new(width, height))
    }
}

// ============================================================================
// Tests
// ============================================================================
