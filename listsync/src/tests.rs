use crate::*;

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;

use proptest::prelude::*;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start) as u64) as usize
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.gen_range_usize(0, i + 1);
            items.swap(i, j);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Event {
    ReloadData,
    Begin,
    Objects(usize),
    Delete(Vec<usize>),
    Insert(Vec<usize>),
    Move(usize, usize),
    End,
    Layer(usize, Layer),
    Refresh(usize),
    ScrollToTop,
    EmptyState(bool),
}

type Log = Rc<RefCell<Vec<Event>>>;

struct FakeSurface {
    log: Log,
    in_window: bool,
    visible: Vec<usize>,
    content: u64,
    viewport: u32,
}

impl FakeSurface {
    fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
            in_window: true,
            visible: Vec::new(),
            content: 1_000,
            viewport: 100,
        }
    }

    fn push(&self, event: Event) {
        self.log.borrow_mut().push(event);
    }

    fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    fn count(&self, f: impl Fn(&Event) -> bool) -> usize {
        self.log.borrow().iter().filter(|e| f(e)).count()
    }
}

impl ListSurface for FakeSurface {
    fn is_in_window(&self) -> bool {
        self.in_window
    }

    fn reload_data(&mut self) {
        self.push(Event::ReloadData);
    }

    fn begin_updates(&mut self) {
        self.push(Event::Begin);
    }

    fn delete_items(&mut self, indexes: &[usize]) {
        self.push(Event::Delete(indexes.to_vec()));
    }

    fn insert_items(&mut self, indexes: &[usize]) {
        self.push(Event::Insert(indexes.to_vec()));
    }

    fn move_item(&mut self, from: usize, to: usize) {
        self.push(Event::Move(from, to));
    }

    fn end_updates(&mut self) {
        self.push(Event::End);
    }

    fn visible_indexes(&self, out: &mut Vec<usize>) {
        out.clear();
        out.extend_from_slice(&self.visible);
    }

    fn content_extent(&self) -> u64 {
        self.content
    }

    fn viewport_extent(&self) -> u32 {
        self.viewport
    }

    fn scroll_to_top(&mut self) {
        self.push(Event::ScrollToTop);
    }

    fn set_layer(&mut self, index: usize, layer: Layer) {
        self.push(Event::Layer(index, layer));
    }

    fn refresh_item(&mut self, index: usize) {
        self.push(Event::Refresh(index));
    }

    fn set_empty_state_visible(&mut self, visible: bool) {
        self.push(Event::EmptyState(visible));
    }
}

fn assert_ascending(indexes: &[usize]) {
    for w in indexes.windows(2) {
        assert!(w[0] < w[1], "not strictly ascending: {indexes:?}");
    }
}

fn dedup_first(items: Vec<u16>) -> Vec<u16> {
    let mut seen = IdentitySet::new();
    items.into_iter().filter(|k| seen.insert(*k)).collect()
}

#[test]
fn delete_insert_and_shift_left() {
    let old = vec!['A', 'B', 'C'];
    let new = vec!['A', 'C', 'D'];
    let script = diff(&old, &new);

    assert_eq!(script.deletions, vec![Deletion { index: 1, id: 'B' }]);
    assert_eq!(script.insertions, vec![Insertion { index: 2, id: 'D' }]);
    assert_eq!(script.moves, vec![Move { from: 2, to: 1 }]);
    assert_eq!(script.reloads, vec![0, 1]);
    assert!(script.duplicates.is_empty());
    assert_eq!(script.apply(&old), Some(new));
}

#[test]
fn empty_old_is_a_pure_insert() {
    let script = diff::<u32>(&[], &[7, 8, 9]);
    assert!(script.deletions.is_empty());
    assert!(script.moves.is_empty());
    assert_eq!(script.insertion_indexes(), vec![0, 1, 2]);
}

#[test]
fn empty_new_is_a_pure_delete() {
    let script = diff::<u32>(&[7, 8, 9], &[]);
    assert!(script.insertions.is_empty());
    assert!(script.moves.is_empty());
    assert_eq!(script.deletion_indexes(), vec![0, 1, 2]);
    assert_eq!(script.expected_len(3), Some(0));
}

#[test]
fn identical_snapshots_only_reload() {
    let old = vec![1u32, 2, 3];
    let script = diff(&old, &old);
    assert!(script.is_empty());
    assert_eq!(script.reloads, vec![0, 1, 2]);
}

#[test]
fn swap_emits_two_moves() {
    let old = vec!["a", "b"];
    let new = vec!["b", "a"];
    let script = diff(&old, &new);
    assert_eq!(
        script.moves,
        vec![Move { from: 0, to: 1 }, Move { from: 1, to: 0 }]
    );
    assert_eq!(script.apply(&old), Some(new));
}

#[test]
fn duplicates_are_reported_and_first_occurrence_wins() {
    let old = vec![1u32, 2, 1, 3];
    let new = vec![3u32, 3, 1];
    let script = diff(&old, &new);

    assert_eq!(
        script.duplicates,
        vec![
            DuplicateIdentity {
                side: SnapshotSide::Old,
                index: 2,
                first_index: 0,
            },
            DuplicateIdentity {
                side: SnapshotSide::New,
                index: 1,
                first_index: 0,
            },
        ]
    );
    // The repeated `1` at old index 2 and the repeated `3` at new index 1 are unrelated rows.
    assert_eq!(script.deletion_indexes(), vec![1, 2]);
    assert_eq!(script.insertion_indexes(), vec![1]);
    assert_eq!(script.apply(&old), Some(new));
}

#[test]
fn duplicate_identity_displays_its_location() {
    let dup = find_duplicates(&["x", "y", "x"], SnapshotSide::New);
    assert_eq!(dup.len(), 1);
    assert_eq!(
        dup[0].to_string(),
        "duplicate identity in new snapshot at index 2 (first seen at 0)"
    );
    assert!(find_duplicates(&["x", "y"], SnapshotSide::Old).is_empty());
}

#[test]
fn duplicate_positions_resolve_to_the_repeated_identity() {
    let snapshot = ["x", "y", "x", "y", "z"];
    let dups = find_duplicates(&snapshot, SnapshotSide::Old);
    assert_eq!(dups.len(), 2);
    for dup in &dups {
        assert_eq!(snapshot[dup.index], snapshot[dup.first_index]);
        assert!(dup.first_index < dup.index);
    }
}

#[test]
fn keyed_rows_compare_by_key_only() {
    let old = vec![Keyed::new(1u32, "one"), Keyed::new(2, "two")];
    let new = vec![Keyed::new(2u32, "deux"), Keyed::new(1, "un")];
    assert_eq!(Keyed::new(1u32, "a"), Keyed::new(1u32, "b"));

    let script = diff_by_key(&old, &new, |row| row.key);
    assert!(script.deletions.is_empty());
    assert!(script.insertions.is_empty());
    assert_eq!(script.moves.len(), 2);
    assert_eq!(script.reloads, vec![0, 1]);
}

#[test]
fn apply_rejects_a_script_that_does_not_fit() {
    let script = diff(&[1u32, 2, 3], &[3u32]);
    assert_eq!(script.apply(&[1, 2]), None);
    assert_eq!(script.apply(&[9, 9, 9]), Some(vec![9]));
}

#[test]
fn randomized_scripts_rebuild_the_new_snapshot() {
    let mut rng = Lcg::new(0x5eed);
    for _ in 0..500 {
        let old_len = rng.gen_range_usize(0, 30);
        let old: Vec<u32> = (0..old_len as u32).collect();

        let mut new: Vec<u32> = old.iter().copied().filter(|_| rng.gen_bool()).collect();
        let extra = rng.gen_range_usize(0, 10);
        new.extend((0..extra as u32).map(|i| 1_000 + i));
        rng.shuffle(&mut new);

        let script = diff(&old, &new);
        assert_ascending(&script.deletion_indexes());
        assert_ascending(&script.insertion_indexes());
        assert_eq!(script.expected_len(old.len()), Some(new.len()));
        assert_eq!(script.apply(&old).as_ref(), Some(&new));
    }
}

proptest! {
    #[test]
    fn applying_the_script_yields_new(
        old in proptest::collection::vec(0u16..40, 0..24),
        new in proptest::collection::vec(0u16..40, 0..24),
    ) {
        let old = dedup_first(old);
        let new = dedup_first(new);
        let script = diff(&old, &new);
        prop_assert_eq!(script.apply(&old), Some(new));
    }

    #[test]
    fn applying_the_script_yields_new_even_with_duplicates(
        old in proptest::collection::vec(0u16..10, 0..24),
        new in proptest::collection::vec(0u16..10, 0..24),
    ) {
        let script = diff(&old, &new);
        prop_assert_eq!(script.apply(&old), Some(new));
    }

    #[test]
    fn diffing_a_snapshot_against_itself_is_empty(
        old in proptest::collection::vec(0u16..40, 0..24),
    ) {
        let old = dedup_first(old);
        let script = diff(&old, &old);
        prop_assert!(script.is_empty());
        prop_assert_eq!(script.reloads.len(), old.len());
    }

    #[test]
    fn deletions_and_insertions_are_strictly_ascending(
        old in proptest::collection::vec(0u16..40, 0..24),
        new in proptest::collection::vec(0u16..40, 0..24),
    ) {
        let script = diff(&old, &new);
        for w in script.deletion_indexes().windows(2) {
            prop_assert!(w[0] < w[1]);
        }
        for w in script.insertion_indexes().windows(2) {
            prop_assert!(w[0] < w[1]);
        }
    }
}

#[test]
fn empty_old_snapshot_bypasses_animation() {
    let mut surface = FakeSurface::new();
    let mut installed = Vec::new();
    let result = reload(
        &mut surface,
        &[] as &[char],
        vec!['X', 'Y'],
        true,
        &ReloadOptions::default(),
        |new| installed = new,
    );

    assert_eq!(result, Reload::full());
    assert_eq!(installed, vec!['X', 'Y']);
    assert_eq!(surface.events(), vec![Event::ReloadData]);
}

#[test]
fn detached_surface_or_inactive_host_bypasses_animation() {
    let options = ReloadOptions::default();
    let mut surface = FakeSurface::new();
    surface.in_window = false;
    assert!(!can_animate(&surface, 3, true, &options));
    surface.in_window = true;
    assert!(can_animate(&surface, 3, true, &options));
    assert!(!can_animate(&surface, 3, false, &options));

    let inactive = ReloadOptions::new().with_host_active(|| false);
    assert!(!can_animate(&surface, 3, true, &inactive));
}

#[test]
fn animated_batch_installs_snapshot_inside_transaction() {
    let mut surface = FakeSurface::new();
    let log = Rc::clone(&surface.log);
    let result = reload(
        &mut surface,
        &['A', 'B', 'C'],
        vec!['A', 'C', 'D'],
        true,
        &ReloadOptions::new().with_layer_inserts_behind(false),
        |new| log.borrow_mut().push(Event::Objects(new.len())),
    );

    assert_eq!(result.kind, ReloadKind::Animated);
    assert_eq!(result.reloads, vec![0, 1]);
    assert_eq!(
        surface.events(),
        vec![
            Event::Begin,
            Event::Objects(3),
            Event::Delete(vec![1]),
            Event::Insert(vec![2]),
            Event::Move(2, 1),
            Event::End,
        ]
    );
}

#[test]
fn inserted_visible_rows_go_behind() {
    let mut surface = FakeSurface::new();
    surface.visible = vec![0, 1, 2];
    reload(
        &mut surface,
        &[1u32, 2],
        vec![1, 9, 2],
        true,
        &ReloadOptions::default(),
        |_| {},
    );

    let events = surface.events();
    assert!(events.contains(&Event::Layer(0, Layer::Front)));
    assert!(events.contains(&Event::Layer(1, Layer::Back)));
    assert!(events.contains(&Event::Layer(2, Layer::Front)));
    let end = events.iter().position(|e| *e == Event::End).unwrap();
    let last_layer = events
        .iter()
        .rposition(|e| matches!(e, Event::Layer(..)))
        .unwrap();
    assert!(last_layer < end);
}

#[test]
fn underfilled_content_scrolls_to_top() {
    let mut surface = FakeSurface::new();
    surface.content = 40;
    reload(
        &mut surface,
        &[1u32, 2, 3],
        vec![1],
        true,
        &ReloadOptions::default(),
        |_| {},
    );
    assert_eq!(surface.events().last(), Some(&Event::ScrollToTop));

    surface.clear();
    reload(
        &mut surface,
        &[1u32],
        vec![],
        true,
        &ReloadOptions::default(),
        |_| {},
    );
    assert_eq!(surface.count(|e| *e == Event::ScrollToTop), 0);
}

#[test]
fn empty_script_skips_the_batch() {
    let mut surface = FakeSurface::new();
    let mut calls = 0;
    let result = reload(
        &mut surface,
        &[1u32, 2],
        vec![1, 2],
        true,
        &ReloadOptions::default(),
        |_| calls += 1,
    );
    assert_eq!(result.kind, ReloadKind::Unchanged);
    assert_eq!(result.reloads, vec![0, 1]);
    assert_eq!(calls, 1);
    assert!(surface.events().is_empty());
}

#[test]
fn hidden_updates_collapse_into_one_reload_of_the_latest() {
    let mut surface = FakeSurface::new();
    let mut list = ListController::with_items(ReloadOptions::default(), vec![String::from("z")]);

    assert_eq!(list.set_visible(&mut surface, false), None);
    let a = vec![String::from("a")];
    let b = vec![String::from("b"), String::from("c")];
    assert_eq!(list.set_items(&mut surface, a, true), Update::Deferred);
    assert_eq!(list.set_items(&mut surface, b.clone(), true), Update::Deferred);

    // Synchronous readers already see the latest snapshot.
    assert_eq!(list.items(), b.as_slice());
    assert!(surface.events().is_empty());
    assert!(list.gate_state().deferred);

    assert_eq!(list.set_visible(&mut surface, true), Some(Reload::full()));
    assert_eq!(surface.count(|e| *e == Event::ReloadData), 1);
    assert_eq!(surface.count(|e| *e == Event::Begin), 0);
    assert_eq!(list.items(), b.as_slice());

    // A second reveal has nothing left to flush.
    assert_eq!(list.set_visible(&mut surface, true), None);
}

#[test]
fn reveal_without_pending_update_is_silent() {
    let mut surface = FakeSurface::new();
    let mut list = ListController::<u32>::new(ReloadOptions::default());
    list.set_visible(&mut surface, false);
    assert_eq!(list.set_visible(&mut surface, true), None);
    assert!(surface.events().is_empty());
}

#[test]
fn requests_during_a_running_batch_are_coalesced() {
    let mut surface = FakeSurface::new();
    let mut list = ListController::with_items(ReloadOptions::default(), vec![1u32, 2, 3]);

    let first = list.set_items(&mut surface, vec![1, 3], true);
    assert!(matches!(first, Update::Applied(ref r) if r.is_animated()));
    assert!(list.is_updating());

    assert_eq!(list.set_items(&mut surface, vec![4], true), Update::Queued);
    assert_eq!(list.set_items(&mut surface, vec![5, 6], true), Update::Queued);
    assert_eq!(list.items(), &[1, 3]);

    surface.clear();
    let next = list.finish_update(&mut surface);
    assert_eq!(next, Some(Update::Applied(Reload::full())));
    assert_eq!(list.items(), &[5, 6]);
    assert!(!list.is_updating());
    assert_eq!(surface.count(|e| *e == Event::ReloadData), 1);
    assert_eq!(list.finish_update(&mut surface), None);
}

#[test]
fn animated_update_refreshes_visible_retained_rows() {
    let mut surface = FakeSurface::new();
    surface.visible = vec![0, 1];
    let mut list = ListController::with_items(ReloadOptions::default(), vec![1u32, 2, 3]);
    list.set_items(&mut surface, vec![2, 3, 4], true);

    assert_eq!(surface.count(|e| matches!(e, Event::Refresh(_))), 2);
    assert!(surface.events().contains(&Event::Refresh(0)));
    assert!(surface.events().contains(&Event::Refresh(1)));
    assert_eq!(list.index_of(&4), Some(2));
}

#[test]
fn payload_only_update_rebinds_visible_rows() {
    let mut surface = FakeSurface::new();
    surface.visible = vec![0, 1];
    let mut list = ListController::with_items(
        ReloadOptions::default(),
        vec![Keyed::new(1u32, "old-a"), Keyed::new(2, "old-b"), Keyed::new(3, "old-c")],
    );

    let update = list.set_items(
        &mut surface,
        vec![Keyed::new(1u32, "new-a"), Keyed::new(2, "new-b"), Keyed::new(3, "new-c")],
        true,
    );

    assert!(matches!(update, Update::Applied(ref r) if r.kind == ReloadKind::Unchanged));
    assert_eq!(surface.count(|e| *e == Event::Begin), 0);
    assert_eq!(
        surface.count(|e| matches!(e, Event::Refresh(_))),
        2,
        "only the visible rows are re-bound"
    );
    assert!(surface.events().contains(&Event::Refresh(0)));
    assert!(surface.events().contains(&Event::Refresh(1)));
    assert!(!list.is_updating());
    assert_eq!(list.get(1).map(|row| row.value), Some("new-b"));
}

#[test]
fn empty_state_follows_the_snapshot() {
    let mut surface = FakeSurface::new();
    let mut list = ListController::with_items(ReloadOptions::default(), vec![1u32]);
    list.set_items(&mut surface, vec![], true);
    assert_eq!(surface.events().last(), Some(&Event::EmptyState(true)));
    list.finish_update(&mut surface);

    let options = ReloadOptions::new().with_show_empty_state(Some(|len: usize| len < 2));
    list.set_options(options);
    list.set_items(&mut surface, vec![7], false);
    assert_eq!(surface.events().last(), Some(&Event::EmptyState(true)));
    list.set_items(&mut surface, vec![7, 8], false);
    assert_eq!(surface.events().last(), Some(&Event::EmptyState(false)));
}

#[test]
fn gate_state_round_trips_through_restore() {
    let mut gate = VisibilityGate::new(Visibility::Hidden);
    gate.defer();
    let state = gate.state();
    assert_eq!(
        state,
        GateState {
            visibility: Visibility::Hidden,
            deferred: true,
        }
    );

    let mut list = ListController::<u32>::new(ReloadOptions::default());
    list.restore_gate_state(state);
    assert!(!list.is_visible());

    let mut surface = FakeSurface::new();
    assert!(list.set_visible(&mut surface, true).is_some());
    assert!(!list.gate_state().deferred);
}
