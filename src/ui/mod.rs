//! Presentation layer
//!
//! `view` turns a session into plain data; `dom` puts that data on the page.

pub mod copy;
#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod keyed;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub use dom::DomPresenter;
pub use view::{CardView, SceneView};
