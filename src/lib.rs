//! Interactivity for the static marketing page: navbar styling on scroll,
//! active nav link tracking, scroll-triggered reveals, and the contact form
//! with its success/error modals.
//!
//! The behaviours in [`navbar`], [`nav_links`], [`reveal`], [`modal`] and
//! [`form`] only depend on the small capability traits in [`dom`], [`events`]
//! and [`timer`]. [`browser`] implements those traits with `web-sys`, and
//! [`page`] wires everything together.

pub mod browser;
pub mod config;
pub mod dom;
pub mod error;
pub mod events;
pub mod form;
pub mod modal;
pub mod nav_links;
pub mod navbar;
pub mod page;
pub mod reveal;
pub mod timer;

#[cfg(test)]
mod testing;

pub use config::PageConfig;
pub use error::{ConfigError, PageError, TransportError};
pub use page::{FormParts, Page, PageElements, Platform, Spawner};
