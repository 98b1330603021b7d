//! Shared application state.

use axum::body::Bytes;

use habit_core::view::{landing, render_document};

/// The landing document, rendered once at startup and shared by every request.
#[derive(Clone)]
pub(crate) struct LandingPage(Bytes);

impl LandingPage {
    pub(crate) fn render(title: &str) -> Self {
        Self(Bytes::from(render_document(title, &landing())))
    }

    pub(crate) fn bytes(&self) -> Bytes {
        self.0.clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}
