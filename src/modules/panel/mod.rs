//! Admin panel pages.
//!
//! The panel UI is rendered elsewhere. These routes answer with a small page
//! descriptor once the gatekeeper has let the request through, so navigation
//! rules can be exercised without a browser.

pub mod controller;
pub mod router;

pub use router::init_panel_router;
