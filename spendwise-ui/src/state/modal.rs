//! Modal visibility
//!
//! At most one modal is open. Its close control or a click that lands on
//! the overlay itself (not on the dialog inside it) hides it.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalKind {
    /// `#input-section`
    NewEntry,
    /// `#filter-section`
    Filter,
}

impl ModalKind {
    pub fn element_id(&self) -> &'static str {
        match self {
            ModalKind::NewEntry => "input-section",
            ModalKind::Filter => "filter-section",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModalState {
    open: Option<ModalKind>,
}

impl ModalState {
    pub fn open(&mut self, kind: ModalKind) {
        self.open = Some(kind);
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    /// Click anywhere in the page; closes only when the overlay was hit
    pub fn click(&mut self, on_overlay: bool) {
        if on_overlay {
            self.close();
        }
    }

    pub fn is_open(&self, kind: ModalKind) -> bool {
        self.open == Some(kind)
    }
}
