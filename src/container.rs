//! The physical-container contract.
//!
//! [`crate::ChildSet`] never stores or lays out children itself; it keeps the
//! hidden/visible bookkeeping and forwards every physical mutation to an
//! injected [`Container`]. The trait is consumed by this crate, implemented
//! by the host: the component that actually owns, measures, and paints the
//! child elements.

use std::fmt;

/// Metadata a container reports for one of its children, used to recycle a
/// hidden child that is mid-animation instead of creating a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildMeta {
    /// The child's position in the host's layout, as last assigned.
    pub layout_position: usize,
    /// The host-defined element kind.
    pub kind: u32,
    /// True if the child's content is stale and must not be reused as-is.
    pub is_invalid: bool,
    /// True if the child is pending removal from the host's data set.
    pub is_removed: bool,
}

/// The physical child store behind a [`crate::ChildSet`].
///
/// All indices here are physical: they address the full child sequence,
/// hidden children included. The child set does every regular-to-physical
/// translation before calling in.
pub trait Container {
    /// Opaque child identity. Compared by equality only; a slot-table index
    /// or unique id both work.
    type Handle: Copy + Eq + fmt::Debug;

    /// Host-defined placement parameters passed through by
    /// [`crate::ChildSet::attach_at`]; opaque to this crate.
    type LayoutParams;

    /// Number of children physically present, hidden ones included.
    fn child_count(&self) -> usize;

    /// Insert `child` at the physical `index`, shifting later children up.
    fn add_child(&mut self, child: Self::Handle, index: usize);

    /// Remove the child at the physical `index`.
    fn remove_child_at(&mut self, index: usize);

    /// Return the child at the physical `index`, if any.
    fn child_at(&self, index: usize) -> Option<Self::Handle>;

    /// Return the physical index of `child`, or `None` if it is not a child.
    fn index_of(&self, child: Self::Handle) -> Option<usize>;

    /// Remove every child.
    fn remove_all_children(&mut self);

    /// Return the metadata for `child`, or `None` if the host has none.
    fn child_meta(&self, child: Self::Handle) -> Option<ChildMeta>;

    /// Re-attach a detached `child` at the physical `index` with the given
    /// placement parameters. The child stays owned by the host throughout.
    fn attach_child(&mut self, child: Self::Handle, index: usize, params: Self::LayoutParams);

    /// Detach the child at the physical `index`: still owned by the host,
    /// no longer laid out.
    fn detach_child_at(&mut self, index: usize);

    /// Notification: `child` just became hidden.
    fn on_entered_hidden_state(&mut self, child: Self::Handle);

    /// Notification: `child` just stopped being hidden.
    fn on_left_hidden_state(&mut self, child: Self::Handle);
}
