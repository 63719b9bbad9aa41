#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::float_cmp)]
#![allow(clippy::unwrap_used)]
//! Testing harness for swipetap gesture engines.
//!
//! Drives a [`GestureEngine`](swipetap_core::GestureEngine) on a manual
//! clock. Deadlines fire at their exact time while the harness advances, so
//! every recorded gesture carries the time it would have been emitted in a
//! browser.
//!
//! ```
//! use swipetap_core::{AdapterKind, GestureKind};
//! use swipetap_test::Harness;
//!
//! let mut h = Harness::new(AdapterKind::Pointer);
//! h.at(0.0).pointer_down(1, 0.0, 0.0);
//! h.at(50.0).pointer_up(1, 0.0, 0.0);
//! h.at(1000.0);
//! h.assert_gestures(&[GestureKind::Tap]);
//! assert_eq!(h.gestures()[0].at, 350.0);
//! ```

mod harness;

pub use harness::{Harness, Recorded};
