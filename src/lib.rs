//! # Hidden-Child Bookkeeping for Container Layouts
//!
//! *Two consistent views of one child sequence, with sub-linear index math.*
//!
//! ## Intuition First
//!
//! Picture a list view removing a row with a fade-out animation. The row's
//! data is already gone, but the element itself must stay on screen until the
//! animation finishes. The layout algorithm must pretend the row does not
//! exist; the container that paints it must know that it very much does.
//!
//! One child sequence, two truths:
//! - the **regular** view: only visible children, in display order;
//! - the **physical** view: everything the container holds, hidden included.
//!
//! ## The Problem
//!
//! Keeping both views consistent is an index-translation problem. With
//! children `A b c D e F` (lowercase hidden), regular index 2 is `F` at
//! physical index 5. The naive translation scans the whole sequence on every
//! lookup, and lookups happen on every layout pass.
//!
//! The classic fix is *rank*: store hidden-ness as a bit per physical slot,
//! and `physical - rank(physical)` is the regular index. Static rank
//! structures answer that in O(1) but cannot absorb insertions; this
//! container inserts and removes children constantly. What is needed is a
//! bitset with *positional* insert/remove (shift every bit above a slot,
//! carrying across word boundaries) plus rank, all in O(words) rather than
//! O(children).
//!
//! ## Implementation Notes
//!
//! This crate provides:
//! - [`ElasticBits`]: a growable bit sequence over `u64` words with point
//!   set/clear/get, positional insert/remove, and prefix population count.
//! - [`ChildSet`]: the bookkeeping façade: hidden-child tracking, both
//!   child views, and regular/physical index translation, delegating every
//!   physical mutation to an injected [`Container`].
//! - [`Container`]: the narrow contract the host container implements
//!   (add/remove/attach/detach primitives and hidden-state notifications).
//!
//! Everything is single-threaded and synchronous: one logical owner, one
//! layout pass at a time.
//!
//! ## References
//!
//! - Jacobson, G. (1989). "Succinct Static Data Structures": the rank
//!   operation this crate leans on.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bits;
pub mod childset;
pub mod container;
pub mod error;

pub use bits::ElasticBits;
pub use childset::ChildSet;
pub use container::{ChildMeta, Container};
pub use error::{Error, Result};
