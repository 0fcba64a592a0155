// src/view/mod.rs
// =============================================================================
// The README viewer controller.
//
// `ViewController` owns the surface it draws on and everything about the
// README currently shown. One "open" is one invocation:
//
//   Idle -> Fetching -> Decoding -> Rendering -> Indexing -> Ready
//                 \__________\___________\__________\-----> Failed(reason)
//
// Every open gets a fresh generation number (a `Ticket`). Results that come
// back with an old ticket are dropped, so a slow first request can never
// overwrite a faster second one. Closing the viewer also bumps the generation.
//
// Submodules:
// - events: observer registry for ViewerEvent
// - surface: where things are drawn (terminal, HTML page)
// - animation: page effects (scroll reveal, logo bounce and glow)
// - portfolio: the project cards page, with those effects
// =============================================================================

mod animation;
mod events;
mod portfolio;
mod surface;

pub use animation::PageEffects;
pub use events::Listeners;
pub use portfolio::render_portfolio_page;
pub use surface::{HtmlPageSurface, ScrollOptions, Surface, TerminalSurface};

use tracing::{debug, info, warn};

use crate::error::ReadmeError;
use crate::github::{GithubClient, ReadmeRequest};
use crate::readme::{self, ImageReference, RenderedReadme, Stage};

const LOADING_MESSAGE: &str = "Loading README...";
const THUMBNAIL_TITLE: &str = "Click to scroll to image";

/// A clickable thumbnail for one README image
#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    pub index: usize,
    pub src: String,
    /// Identifier of the image this thumbnail scrolls to
    pub target_id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailStrip {
    pub thumbnails: Vec<Thumbnail>,
}

impl ThumbnailStrip {
    // One thumbnail per image; no strip at all when there are no images
    pub fn from_images(images: &[ImageReference]) -> Option<Self> {
        if images.is_empty() {
            return None;
        }
        let thumbnails = images
            .iter()
            .map(|image| Thumbnail {
                index: image.ordinal_index,
                src: image.resolved_source.clone(),
                target_id: image.assigned_identifier.clone(),
                title: THUMBNAIL_TITLE.to_string(),
            })
            .collect();
        Some(Self { thumbnails })
    }
}

/// What the viewer presents after a successful invocation
#[derive(Debug, Clone, PartialEq)]
pub struct ReadmeView {
    pub thumbnails: Option<ThumbnailStrip>,
    pub readme: RenderedReadme,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InvocationState {
    Idle,
    Running(Stage),
    Ready,
    Failed(ReadmeError),
}

/// Events published to subscribers of the controller
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    StateChanged { repo: String, state: InvocationState },
    Scrolled { target: String },
    /// The thumbnail's image is no longer in the document
    ScrollSkipped { index: usize },
    StaleResultDropped { repo: String },
    Closed,
}

/// Generation token of one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

pub struct ViewController<S: Surface> {
    surface: S,
    owner: String,
    raw_base: String,
    generation: u64,
    active_repo: String,
    state: InvocationState,
    current: Option<ReadmeView>,
    listeners: Listeners<ViewerEvent>,
}

impl<S: Surface> ViewController<S> {
    pub fn new(surface: S, owner: impl Into<String>, raw_base: impl Into<String>) -> Self {
        Self {
            surface,
            owner: owner.into(),
            raw_base: raw_base.into(),
            generation: 0,
            active_repo: String::new(),
            state: InvocationState::Idle,
            current: None,
            listeners: Listeners::new(),
        }
    }

    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&ViewerEvent) + 'static,
    {
        self.listeners.subscribe(observer);
    }

    pub fn state(&self) -> &InvocationState {
        &self.state
    }

    pub fn current(&self) -> Option<&ReadmeView> {
        self.current.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    // Runs one full invocation for `repo` and presents the outcome
    pub async fn open_readme(&mut self, client: &GithubClient, repo: &str) -> &InvocationState {
        let ticket = self.begin(repo);
        let request = ReadmeRequest::new(self.owner.clone(), repo);
        let raw_base = self.raw_base.clone();

        let result = readme::run(client, &request, &raw_base, |stage| self.advance(ticket, stage)).await;

        self.finish(ticket, result);
        &self.state
    }

    // Starts a new invocation: title, loading indicator, fresh ticket.
    // Any invocation still in flight becomes stale.
    pub fn begin(&mut self, repo: &str) -> Ticket {
        self.generation += 1;
        self.active_repo = repo.to_string();
        self.current = None;
        self.surface.set_title(&format!("{} - README.md", repo));
        self.surface.show_loading(LOADING_MESSAGE);
        self.set_state(InvocationState::Idle);
        info!(repo, generation = self.generation, "opening README");
        Ticket(self.generation)
    }

    // Records that `ticket`'s invocation entered `stage`
    pub fn advance(&mut self, ticket: Ticket, stage: Stage) {
        if self.is_current(ticket) {
            self.set_state(InvocationState::Running(stage));
        }
    }

    // Presents the outcome of `ticket`'s invocation.
    // Returns false when the result was stale and has been dropped.
    pub fn finish(&mut self, ticket: Ticket, result: Result<RenderedReadme, ReadmeError>) -> bool {
        if !self.is_current(ticket) {
            let repo = match &result {
                Ok(readme) => readme.request.repo.clone(),
                Err(_) => String::new(),
            };
            debug!(%repo, ticket = ticket.0, latest = self.generation, "dropping stale README result");
            self.listeners.emit(&ViewerEvent::StaleResultDropped { repo });
            return false;
        }

        match result {
            Ok(readme) => {
                let view = ReadmeView {
                    thumbnails: ThumbnailStrip::from_images(&readme.images),
                    readme,
                };
                self.surface.show_readme(&view);
                self.current = Some(view);
                self.set_state(InvocationState::Ready);
            }
            Err(e) => {
                warn!(
                    repo = %self.active_repo,
                    kind = e.kind(),
                    detail = e.detail().unwrap_or(""),
                    "README invocation failed"
                );
                self.surface.show_error(&e.to_string());
                self.current = None;
                self.set_state(InvocationState::Failed(e));
            }
        }
        true
    }

    // Scrolls to the image behind thumbnail `index`.
    // Silently does nothing if the image cannot be found.
    pub fn activate_thumbnail(&mut self, index: usize) -> bool {
        let target = self.current.as_ref().and_then(|view| {
            let thumb = view.thumbnails.as_ref()?.thumbnails.get(index)?;
            view.readme
                .document
                .find_image(&thumb.target_id)
                .map(|_| thumb.target_id.clone())
        });

        match target {
            Some(target) => {
                self.surface.scroll_into_view(&target, ScrollOptions::SMOOTH_CENTER);
                self.listeners.emit(&ViewerEvent::Scrolled { target });
                true
            }
            None => {
                debug!(index, "thumbnail target not found, skipping scroll");
                self.listeners.emit(&ViewerEvent::ScrollSkipped { index });
                false
            }
        }
    }

    // Closes the viewer; late results of the open invocation are dropped
    pub fn close(&mut self) {
        self.generation += 1;
        self.current = None;
        self.state = InvocationState::Idle;
        self.surface.clear();
        self.listeners.emit(&ViewerEvent::Closed);
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    fn set_state(&mut self, state: InvocationState) {
        self.state = state.clone();
        self.listeners.emit(&ViewerEvent::StateChanged {
            repo: self.active_repo.clone(),
            state,
        });
    }
}
