/// A trait for targets whose whole observable state can be copied out and put back.
///
/// `snapshot` must return a value that shares nothing mutable with `self`:
/// later changes to the target must never show up in an earlier snapshot.
/// `restore` takes the snapshot by reference, so the target has to build its
/// own copy and a later `snapshot` never aliases a stored one.
///
/// Implementations are written by hand for each target rather than derived
/// from a generic deep copy.
///
/// # Example
///
/// ```
/// use versioned_history::prelude::Snapshotable;
///
/// #[derive(Default)]
/// struct Counter {
///     values: Vec<i32>,
/// }
///
/// impl Snapshotable for Counter {
///     type Snapshot = Vec<i32>;
///
///     fn snapshot(&self) -> Vec<i32> {
///         self.values.clone()
///     }
///
///     fn restore(&mut self, snapshot: &Vec<i32>) {
///         self.values.clone_from(snapshot);
///     }
/// }
///
/// let mut counter = Counter { values: vec![1, 2, 3] };
/// let saved = counter.snapshot();
/// counter.values.push(4);
/// assert_eq!(saved, vec![1, 2, 3]);
///
/// counter.restore(&saved);
/// assert_eq!(counter.values, vec![1, 2, 3]);
/// ```
pub trait Snapshotable {
    type Snapshot: Clone;

    /// Copies the current observable state.
    fn snapshot(&self) -> Self::Snapshot;

    /// Replaces all observable state with the contents of `snapshot`.
    fn restore(&mut self, snapshot: &Self::Snapshot);
}
