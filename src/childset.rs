//! Two simultaneous views over one child sequence.
//!
//! A visual container sometimes needs to keep a child around after it has
//! logically gone, most commonly while an exit animation plays out. The
//! layout algorithm must not see such children, but the container still
//! physically holds them. [`ChildSet`] maintains both perspectives at once:
//!
//! - the **regular** view: only visible children, in display order, which
//!   is what a layout pass is allowed to observe;
//! - the **physical** (unfiltered) view: every child the container actually
//!   stores, hidden ones included.
//!
//! Given physical children `A b c D e F` (lowercase hidden), the regular
//! view is `A D F`: `child_count()` is 3 while `unfiltered_child_count()` is
//! 6, and `child_at(1)` is `D` while `unfiltered_child_at(1)` is `b`.
//!
//! Index translation between the two views rides on
//! [`ElasticBits::count_ones_before`]: the regular index of a visible child
//! at physical position `p` is `p - count_ones_before(p)`, and the reverse
//! direction is solved by the iterative correction in [`ChildSet::offset_of`].
//! Every structural call updates the bit sequence first, then forwards the
//! physical mutation to the injected [`Container`].

use tracing::trace;

use crate::bits::ElasticBits;
use crate::container::Container;
use crate::error::{Error, Result};

/// Hidden-child bookkeeping and index translation over a [`Container`].
///
/// Not thread-aware: all access must be serialized by the owning container,
/// typically one layout pass at a time.
///
/// # Strict mode
///
/// Contract violations (hiding a child twice, unhiding a visible child,
/// querying the regular index of a hidden child, hiding a non-child) are
/// reported as `Err`/`None` fallbacks by a set built with [`ChildSet::new`];
/// a set built with [`ChildSet::strict`] panics instead, for verification
/// builds that would rather crash than mask a bookkeeping bug. A rejected
/// call never mutates: the bit sequence, the hidden list, and the container
/// stay consistent either way.
pub struct ChildSet<C: Container> {
    container: C,
    /// Bit `i` is set iff the child at physical index `i` is hidden.
    bits: ElasticBits,
    /// Hidden children in hide order (not physical order).
    hidden: Vec<C::Handle>,
    strict: bool,
}

impl<C: Container> ChildSet<C> {
    /// Wrap `container` with permissive violation reporting.
    pub fn new(container: C) -> Self {
        Self {
            container,
            bits: ElasticBits::new(),
            hidden: Vec::new(),
            strict: false,
        }
    }

    /// Wrap `container`, panicking on contract violations.
    pub fn strict(container: C) -> Self {
        Self {
            strict: true,
            ..Self::new(container)
        }
    }

    /// Borrow the wrapped container.
    pub fn container(&self) -> &C {
        &self.container
    }

    /// Mutably borrow the wrapped container.
    ///
    /// Structural mutations must keep going through the child set; this is
    /// for reaching host functionality the set does not mediate
    /// (measurement, drawing, and the like).
    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    /// In strict mode, escalate `error` to a panic; otherwise hand it back
    /// for the caller to surface or map to its fallback.
    fn violation(&self, error: Error) -> Error {
        if self.strict {
            panic!("child-set contract violated: {error}");
        }
        error
    }

    fn hide_internal(&mut self, child: C::Handle) {
        self.hidden.push(child);
        self.container.on_entered_hidden_state(child);
    }

    fn unhide_internal(&mut self, child: C::Handle) -> bool {
        if let Some(pos) = self.hidden.iter().position(|&h| h == child) {
            self.hidden.remove(pos);
            self.container.on_left_hidden_state(child);
            true
        } else {
            false
        }
    }

    /// Translate a regular index to the physical index it denotes.
    ///
    /// Solves `index == offset - count_ones_before(offset)` for the smallest
    /// non-hidden `offset`: start at `offset = index` and repeatedly add the
    /// shortfall until it reaches zero, then step past any hidden run so the
    /// result always lands on a visible slot (or one past the last child when
    /// the sequence ends in hidden children). Returns `None` when no visible
    /// child has regular index `index`.
    pub fn offset_of(&self, index: usize) -> Option<usize> {
        let limit = self.container.child_count();
        let mut offset = index;
        while offset < limit {
            let hidden_before = self.bits.count_ones_before(offset);
            let diff = index + hidden_before - offset;
            if diff == 0 {
                while self.bits.get(offset) {
                    offset += 1;
                }
                return Some(offset);
            }
            offset += diff;
        }
        None
    }

    /// Number of visible children.
    pub fn child_count(&self) -> usize {
        self.container.child_count() - self.hidden.len()
    }

    /// Total number of children, hidden ones included.
    pub fn unfiltered_child_count(&self) -> usize {
        self.container.child_count()
    }

    /// Return the visible child at the regular `index`.
    pub fn child_at(&self, index: usize) -> Option<C::Handle> {
        let offset = self.offset_of(index)?;
        self.container.child_at(offset)
    }

    /// Return the child at the physical `index`, hidden or not.
    pub fn unfiltered_child_at(&self, index: usize) -> Option<C::Handle> {
        self.container.child_at(index)
    }

    /// Return the regular index of `child`.
    ///
    /// `None` if it is not a child of the container. A hidden child has no
    /// regular index, so asking for one is a contract violation: `None` when
    /// permissive, a panic when strict.
    pub fn index_of(&self, child: C::Handle) -> Option<usize> {
        let offset = self.container.index_of(child)?;
        if self.bits.get(offset) {
            let _ = self.violation(Error::HiddenChild(offset));
            return None;
        }
        Some(offset - self.bits.count_ones_before(offset))
    }

    /// Physical slot for an insertion at the regular `index` (`None` means
    /// append). An unresolvable index is a violation; the permissive
    /// fallback appends.
    fn insert_offset(&self, index: Option<usize>) -> usize {
        match index {
            None => self.container.child_count(),
            Some(index) => match self.offset_of(index) {
                Some(offset) => offset,
                None => {
                    let _ = self.violation(Error::IndexOutOfBounds(index));
                    self.container.child_count()
                }
            },
        }
    }

    /// Append `child`, optionally already hidden.
    pub fn add(&mut self, child: C::Handle, hidden: bool) {
        self.add_internal(child, None, hidden);
    }

    /// Insert `child` at the regular `index`, optionally already hidden.
    ///
    /// The index is translated to a physical slot; existing hidden/visible
    /// mappings at and above that slot shift up by one.
    pub fn add_at(&mut self, child: C::Handle, index: usize, hidden: bool) {
        self.add_internal(child, Some(index), hidden);
    }

    fn add_internal(&mut self, child: C::Handle, index: Option<usize>, hidden: bool) {
        let offset = self.insert_offset(index);
        self.bits.insert(offset, hidden);
        if hidden {
            self.hide_internal(child);
        }
        self.container.add_child(child, offset);
        trace!(child = ?child, ?index, offset, hidden, "add child");
    }

    /// Remove `child` from the container. No-op if it is not a child.
    pub fn remove(&mut self, child: C::Handle) {
        let Some(offset) = self.container.index_of(child) else {
            return;
        };
        if self.bits.remove(offset) {
            self.unhide_internal(child);
        }
        self.container.remove_child_at(offset);
        trace!(child = ?child, offset, "remove child");
    }

    /// Remove the visible child at the regular `index`. No-op if no child
    /// occupies that index.
    pub fn remove_at(&mut self, index: usize) {
        let Some(offset) = self.offset_of(index) else {
            return;
        };
        let Some(child) = self.container.child_at(offset) else {
            return;
        };
        if self.bits.remove(offset) {
            self.unhide_internal(child);
        }
        self.container.remove_child_at(offset);
        trace!(child = ?child, index, offset, "remove child at");
    }

    /// Remove every child, hidden ones included.
    ///
    /// Hidden children leave the hidden state in reverse hide order before
    /// the physical clear is delegated.
    pub fn remove_all_unfiltered(&mut self) {
        self.bits.reset();
        for child in self.hidden.drain(..).rev() {
            self.container.on_left_hidden_state(child);
        }
        self.container.remove_all_children();
        trace!("remove all children");
    }

    /// Mark `child` as hidden, excluding it from the regular view.
    ///
    /// Violations: `child` is not a child of the container, or is already
    /// hidden. Neither mutates anything.
    pub fn hide(&mut self, child: C::Handle) -> Result<()> {
        let Some(offset) = self.container.index_of(child) else {
            return Err(self.violation(Error::NotAChild));
        };
        if self.bits.get(offset) {
            return Err(self.violation(Error::AlreadyHidden(offset)));
        }
        self.bits.set(offset);
        self.hide_internal(child);
        trace!(child = ?child, offset, "hide child");
        Ok(())
    }

    /// Return `child` from the hidden state to the regular view.
    ///
    /// The child keeps the physical slot it already occupies, so the caller
    /// should normally detach it next; otherwise it pops back into the
    /// regular view at that old position. Violations: `child` is not a child
    /// of the container, or is not hidden. Neither mutates anything.
    pub fn unhide(&mut self, child: C::Handle) -> Result<()> {
        let Some(offset) = self.container.index_of(child) else {
            return Err(self.violation(Error::NotAChild));
        };
        if !self.bits.get(offset) {
            return Err(self.violation(Error::NotHidden(offset)));
        }
        self.bits.clear(offset);
        self.unhide_internal(child);
        trace!(child = ?child, offset, "unhide child");
        Ok(())
    }

    /// Whether `child` is currently hidden.
    pub fn is_hidden(&self, child: C::Handle) -> bool {
        self.hidden.contains(&child)
    }

    /// Remove `child` if, and only if, it is hidden.
    ///
    /// Returns `true` when the caller is done with the child: it was hidden
    /// and has been removed, or the container no longer holds it at all (any
    /// stale hidden-list entry is dropped). Returns `false` when the child is
    /// present and visible; that removal must go through [`ChildSet::remove`]
    /// or [`ChildSet::remove_at`]. In strict mode, a disagreement between the
    /// hidden list and the bit sequence panics.
    pub fn remove_if_hidden(&mut self, child: C::Handle) -> bool {
        let Some(offset) = self.container.index_of(child) else {
            if self.unhide_internal(child) && self.strict {
                panic!(
                    "child-set contract violated: hidden-list entry for a child \
                     the container no longer holds"
                );
            }
            return true;
        };
        if self.bits.get(offset) {
            self.bits.remove(offset);
            if !self.unhide_internal(child) && self.strict {
                panic!(
                    "child-set contract violated: hidden bit set for a child \
                     missing from the hidden list"
                );
            }
            self.container.remove_child_at(offset);
            trace!(child = ?child, offset, "remove hidden child");
            return true;
        }
        false
    }

    /// Find a hidden child parked at the layout `position`, suitable for
    /// reuse: neither invalid nor pending removal, and of the requested
    /// `kind` (`None` matches any kind). Children are scanned in hide order.
    pub fn find_hidden_non_removed(&self, position: usize, kind: Option<u32>) -> Option<C::Handle> {
        self.hidden.iter().copied().find(|&child| {
            self.container.child_meta(child).is_some_and(|meta| {
                meta.layout_position == position
                    && !meta.is_invalid
                    && !meta.is_removed
                    && kind.is_none_or(|k| k == meta.kind)
            })
        })
    }

    /// Attach `child` at the end of the sequence.
    ///
    /// Same bookkeeping as [`ChildSet::add`], but the physical primitive is
    /// the host's attach: the child was already owned, just not placed.
    pub fn attach(&mut self, child: C::Handle, params: C::LayoutParams, hidden: bool) {
        self.attach_internal(child, None, params, hidden);
    }

    /// Attach `child` at the regular `index`.
    pub fn attach_at(
        &mut self,
        child: C::Handle,
        index: usize,
        params: C::LayoutParams,
        hidden: bool,
    ) {
        self.attach_internal(child, Some(index), params, hidden);
    }

    fn attach_internal(
        &mut self,
        child: C::Handle,
        index: Option<usize>,
        params: C::LayoutParams,
        hidden: bool,
    ) {
        let offset = self.insert_offset(index);
        self.bits.insert(offset, hidden);
        if hidden {
            self.hide_internal(child);
        }
        self.container.attach_child(child, offset, params);
        trace!(child = ?child, ?index, offset, hidden, "attach child");
    }

    /// Detach the visible child at the regular `index`: still owned by the
    /// host, no longer placed. No-op if no child occupies that index.
    pub fn detach(&mut self, index: usize) {
        let Some(offset) = self.offset_of(index) else {
            return;
        };
        // Trailing hidden children make offset_of(child_count()) resolve to
        // one past the last slot; nothing to detach there.
        if offset >= self.container.child_count() {
            return;
        }
        // A regular index always resolves to a visible slot, so the removed
        // bit is zero; removing it keeps later mappings aligned.
        self.bits.remove(offset);
        self.container.detach_child_at(offset);
        trace!(index, offset, "detach child");
    }
}

impl<C: Container> std::fmt::Debug for ChildSet<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChildSet")
            .field("bits", &self.bits)
            .field("hidden", &self.hidden.len())
            .finish()
    }
}
