use proptest::prelude::*;

use childmask::bits::ElasticBits;
use childmask::container::{ChildMeta, Container};
use childmask::ChildSet;

/// Ops against `ElasticBits`, mirrored on a plain `Vec<bool>` model.
#[derive(Debug, Clone)]
enum BitOp {
    Set(usize),
    Clear(usize),
    Insert(usize, bool),
    Remove(usize),
}

fn bit_op() -> impl Strategy<Value = BitOp> {
    prop_oneof![
        (0..256usize).prop_map(BitOp::Set),
        (0..256usize).prop_map(BitOp::Clear),
        (0..256usize, any::<bool>()).prop_map(|(i, v)| BitOp::Insert(i, v)),
        (0..256usize).prop_map(BitOp::Remove),
    ]
}

proptest! {
    #[test]
    fn test_bits_match_naive_model(ops in prop::collection::vec(bit_op(), 0..64)) {
        let mut bits = ElasticBits::new();
        // The model starts long enough that removals can never pull the
        // operated-on range past its end.
        let mut model = vec![false; 512];

        for op in ops {
            match op {
                BitOp::Set(i) => {
                    bits.set(i);
                    model[i] = true;
                }
                BitOp::Clear(i) => {
                    bits.clear(i);
                    model[i] = false;
                }
                BitOp::Insert(i, v) => {
                    bits.insert(i, v);
                    model.insert(i, v);
                }
                BitOp::Remove(i) => {
                    prop_assert_eq!(bits.remove(i), model.remove(i));
                }
            }
        }

        for i in 0..model.len() {
            prop_assert_eq!(bits.get(i), model[i], "bit {}", i);
        }
        let mut expected_rank = 0;
        for i in 0..model.len() {
            if i % 17 == 0 {
                prop_assert_eq!(bits.count_ones_before(i), expected_rank, "rank {}", i);
            }
            if model[i] {
                expected_rank += 1;
            }
        }
        // Past the tail: total population.
        prop_assert_eq!(bits.count_ones_before(model.len() + 1000), expected_rank);
    }

    #[test]
    fn test_insert_remove_round_trip_property(
        pattern in prop::collection::vec(any::<bool>(), 200..201),
        index in 0..200usize,
        value: bool,
    ) {
        let mut bits = ElasticBits::new();
        for (i, &b) in pattern.iter().enumerate() {
            if b {
                bits.set(i);
            }
        }
        bits.insert(index, value);
        prop_assert_eq!(bits.remove(index), value);
        for (i, &b) in pattern.iter().enumerate() {
            prop_assert_eq!(bits.get(i), b, "bit {}", i);
        }
        prop_assert!(!bits.get(pattern.len()));
    }
}

/// Minimal physical container over `u32` ids.
#[derive(Default)]
struct ModelContainer {
    children: Vec<u32>,
    detached: Vec<u32>,
}

impl Container for ModelContainer {
    type Handle = u32;
    type LayoutParams = ();

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn add_child(&mut self, child: u32, index: usize) {
        self.children.insert(index, child);
    }

    fn remove_child_at(&mut self, index: usize) {
        self.children.remove(index);
    }

    fn child_at(&self, index: usize) -> Option<u32> {
        self.children.get(index).copied()
    }

    fn index_of(&self, child: u32) -> Option<usize> {
        self.children.iter().position(|&c| c == child)
    }

    fn remove_all_children(&mut self) {
        self.children.clear();
    }

    fn child_meta(&self, _child: u32) -> Option<ChildMeta> {
        None
    }

    fn attach_child(&mut self, child: u32, index: usize, _params: ()) {
        self.detached.retain(|&c| c != child);
        self.children.insert(index, child);
    }

    fn detach_child_at(&mut self, index: usize) {
        let child = self.children.remove(index);
        self.detached.push(child);
    }

    fn on_entered_hidden_state(&mut self, _child: u32) {}

    fn on_left_hidden_state(&mut self, _child: u32) {}
}

proptest! {
    /// For any hidden subset, `child_at(r)` is the r-th visible child and
    /// `index_of` inverts it.
    #[test]
    fn test_translation_matches_filtered_model(
        hidden in prop::collection::vec(any::<bool>(), 1..120),
    ) {
        let mut set = ChildSet::new(ModelContainer::default());
        for (id, &h) in hidden.iter().enumerate() {
            set.add(id as u32, h);
        }

        let visible: Vec<u32> = hidden
            .iter()
            .enumerate()
            .filter(|(_, &h)| !h)
            .map(|(i, _)| i as u32)
            .collect();

        prop_assert_eq!(set.unfiltered_child_count(), hidden.len());
        prop_assert_eq!(set.child_count(), visible.len());
        for (r, &id) in visible.iter().enumerate() {
            prop_assert_eq!(set.child_at(r), Some(id), "regular index {}", r);
            prop_assert_eq!(set.index_of(id), Some(r), "child {}", id);
        }
        prop_assert_eq!(set.child_at(visible.len()), None);
        for (p, &h) in hidden.iter().enumerate() {
            let child = set.unfiltered_child_at(p).unwrap();
            prop_assert_eq!(child, p as u32);
            prop_assert_eq!(set.is_hidden(child), h, "physical index {}", p);
        }
    }
}

/// Structural ops against a `ChildSet`, mirrored on a `Vec<(id, hidden)>`
/// model. Handle-valued ops pick their target by slot so they mostly land on
/// live children.
#[derive(Debug, Clone)]
enum SetOp {
    Add { index: usize, hidden: bool },
    RemoveAt(usize),
    Remove(usize),
    Hide(usize),
    Unhide(usize),
    RemoveIfHidden(usize),
}

fn set_op() -> impl Strategy<Value = SetOp> {
    prop_oneof![
        (0..64usize, any::<bool>()).prop_map(|(index, hidden)| SetOp::Add { index, hidden }),
        (0..64usize).prop_map(SetOp::RemoveAt),
        (0..64usize).prop_map(SetOp::Remove),
        (0..64usize).prop_map(SetOp::Hide),
        (0..64usize).prop_map(SetOp::Unhide),
        (0..64usize).prop_map(SetOp::RemoveIfHidden),
    ]
}

fn target(model: &[(u32, bool)], slot: usize) -> Option<u32> {
    if model.is_empty() {
        None
    } else {
        Some(model[slot % model.len()].0)
    }
}

/// Physical insertion slot for a regular-index insert: directly before the
/// `index`-th visible child, or the end of the sequence when no such child
/// exists (which also covers insertion past trailing hidden children).
fn model_insert_pos(model: &[(u32, bool)], index: usize) -> usize {
    model
        .iter()
        .enumerate()
        .filter(|(_, &(_, hidden))| !hidden)
        .nth(index)
        .map(|(pos, _)| pos)
        .unwrap_or(model.len())
}

proptest! {
    #[test]
    fn test_childset_matches_naive_model(ops in prop::collection::vec(set_op(), 0..48)) {
        let mut set = ChildSet::new(ModelContainer::default());
        let mut model: Vec<(u32, bool)> = Vec::new();
        let mut next_id = 0u32;

        for op in ops {
            match op {
                SetOp::Add { index, hidden } => {
                    let id = next_id;
                    next_id += 1;
                    set.add_at(id, index, hidden);
                    let pos = model_insert_pos(&model, index);
                    model.insert(pos, (id, hidden));
                }
                SetOp::RemoveAt(index) => {
                    set.remove_at(index);
                    if let Some(pos) = model
                        .iter()
                        .enumerate()
                        .filter(|(_, &(_, hidden))| !hidden)
                        .nth(index)
                        .map(|(pos, _)| pos)
                    {
                        model.remove(pos);
                    }
                }
                SetOp::Remove(slot) => {
                    if let Some(id) = target(&model, slot) {
                        set.remove(id);
                        model.retain(|&(c, _)| c != id);
                    }
                }
                SetOp::Hide(slot) => {
                    if let Some(id) = target(&model, slot) {
                        let entry = model.iter_mut().find(|e| e.0 == id).unwrap();
                        let expected = if entry.1 { Err(()) } else { Ok(()) };
                        prop_assert_eq!(set.hide(id).map_err(|_| ()), expected);
                        entry.1 = true;
                    }
                }
                SetOp::Unhide(slot) => {
                    if let Some(id) = target(&model, slot) {
                        let entry = model.iter_mut().find(|e| e.0 == id).unwrap();
                        let expected = if entry.1 { Ok(()) } else { Err(()) };
                        prop_assert_eq!(set.unhide(id).map_err(|_| ()), expected);
                        entry.1 = false;
                    }
                }
                SetOp::RemoveIfHidden(slot) => {
                    if let Some(id) = target(&model, slot) {
                        let was_hidden = model.iter().find(|e| e.0 == id).unwrap().1;
                        prop_assert_eq!(set.remove_if_hidden(id), was_hidden);
                        if was_hidden {
                            model.retain(|&(c, _)| c != id);
                        }
                    }
                }
            }

            // Both views stay consistent after every step.
            prop_assert_eq!(set.unfiltered_child_count(), model.len());
            let visible = model.iter().filter(|&&(_, hidden)| !hidden).count();
            prop_assert_eq!(set.child_count(), visible);
        }

        for (p, &(id, hidden)) in model.iter().enumerate() {
            prop_assert_eq!(set.unfiltered_child_at(p), Some(id));
            prop_assert_eq!(set.is_hidden(id), hidden);
        }
        let visible_ids: Vec<u32> =
            model.iter().filter(|&&(_, h)| !h).map(|&(id, _)| id).collect();
        for (r, &id) in visible_ids.iter().enumerate() {
            prop_assert_eq!(set.child_at(r), Some(id));
            prop_assert_eq!(set.index_of(id), Some(r));
        }

        set.remove_all_unfiltered();
        prop_assert_eq!(set.unfiltered_child_count(), 0);
        prop_assert_eq!(set.child_count(), 0);
    }
}
