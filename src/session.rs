//! Display-layer state: which deck, which card, which face.
//!
//! Everything mutable about the widget lives in [`Session`]; card text is
//! re-derived from it on every [`Session::view`], never cached.

use crate::{
    binder::{Face, RenderedCard},
    cursor::CursorState,
    deck::Deck,
    env::Settings,
    error::DataSourceError,
    generator::PendingRefresh,
    schema::FieldMap,
};
use log::{debug, info, warn};

pub const LOADING: &str = "Loading...";

/// What the widget shows right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub title: String,
    pub body: String,
    /// `position/max`.
    pub progression: String,
    pub flipped: bool,
}

/// A navigation request from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Flip,
    Next,
}

pub struct Session {
    title: String,
    field_map: FieldMap,
    deck: Option<Deck>,
    cursor: CursorState,
    flipped: bool,
    segment: usize,
    /// Shown instead of the card until the next navigation.
    message: Option<String>,
    pending: Option<PendingRefresh>,
}

impl Session {
    pub fn new(settings: &Settings, field_map: FieldMap) -> Self {
        Self {
            title: settings.title.clone(),
            field_map,
            deck: None,
            cursor: CursorState::new(settings.max_position),
            flipped: false,
            segment: 0,
            message: None,
            pending: None,
        }
    }

    pub fn deck(&self) -> Option<&Deck> {
        self.deck.as_ref()
    }

    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Install a freshly read deck, or show why the read failed.
    ///
    /// On failure the previous deck and position are kept.
    pub fn load(&mut self, result: Result<Deck, DataSourceError>) {
        match result {
            Ok(deck) => {
                info!("showing deck of {} cards", deck.len());
                self.cursor = CursorState::for_deck(deck.len());
                self.deck = Some(deck);
                self.flipped = false;
                self.message = None;
            }
            Err(e) => {
                warn!("deck not loaded: {e}");
                self.message = Some(e.to_string());
            }
        }
    }

    /// Toggle between front and back.
    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
        self.dismiss_message();
    }

    /// Advance to the next card (wrapping) and show its front.
    pub fn next(&mut self) {
        self.cursor = self.cursor.advance();
        self.flipped = false;
        self.dismiss_message();
    }

    /// Apply `action`, unless a background refresh has finished since the
    /// last call: then the new deck is shown at its first front and the
    /// action is dropped. Returns whether `action` was applied.
    pub fn apply(&mut self, action: Action) -> bool {
        if self.poll_refresh() {
            return false;
        }
        match action {
            Action::Flip => self.flip(),
            Action::Next => self.next(),
        }
        true
    }

    /// Navigation hides an error only once there is a card to show instead,
    /// and never hides a running refresh.
    fn dismiss_message(&mut self) {
        if self.deck.is_some() && self.pending.is_none() {
            self.message = None;
        }
    }

    /// Jump to 1-based `position`. Returns `false` if out of range.
    pub fn jump(&mut self, position: usize) -> bool {
        match self.cursor.at(position) {
            Some(c) => {
                self.cursor = c;
                self.flipped = false;
                self.dismiss_message();
                true
            }
            None => false,
        }
    }

    /// Pick which `|` alternate of each face to show.
    pub fn set_segment(&mut self, segment: usize) {
        self.segment = segment;
    }

    /// Start a background refresh. Returns `false` if one is already running.
    pub fn start_refresh(&mut self, settings: &Settings) -> bool {
        if self.pending.is_some() {
            debug!("refresh already pending");
            return false;
        }
        self.pending = Some(PendingRefresh::spawn(settings.clone()));
        self.message = Some(LOADING.to_owned());
        true
    }

    pub fn refresh_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Apply a finished background refresh. Returns `true` if one was applied.
    pub fn poll_refresh(&mut self) -> bool {
        let Some(result) = self.pending.as_ref().and_then(PendingRefresh::poll) else {
            return false;
        };
        self.pending = None;
        self.load(result);
        true
    }

    /// Block until the pending refresh (if any) finishes and apply it.
    pub fn finish_refresh(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.load(pending.wait());
        }
    }

    /// The card at the cursor, or the text to show in its place.
    pub fn current_card(&self) -> Result<RenderedCard, String> {
        let deck = self.deck.as_ref().ok_or_else(|| LOADING.to_owned())?;
        deck.card(self.cursor.index(), &self.field_map)
            .map_err(|e| e.to_string())
    }

    pub fn view(&self) -> View {
        let body = match &self.message {
            Some(msg) => msg.clone(),
            None => match self.current_card() {
                Ok(card) => {
                    if !card.missing.is_empty() {
                        debug!("card {} has no field for {:?}", self.cursor.position, card.missing);
                    }
                    let face = if self.flipped { &card.back } else { &card.front };
                    face_text(face, self.segment).to_owned()
                }
                Err(text) => text,
            },
        };

        View {
            title: self.title.clone(),
            body,
            progression: self.cursor.label(),
            flipped: self.flipped,
        }
    }
}

fn face_text(face: &Face, segment: usize) -> &str {
    face.segment(segment).unwrap_or_else(|| face.text())
}
