use std::borrow::Cow;

/// A trait representing a reversible change to a target.
///
/// An action is applied once when it is recorded, then reverted and
/// re-applied as a history is navigated. A history never applies the same
/// action twice without an intervening revert, and never reverts an action
/// that was not applied.
///
/// # Associated Types
///
/// * `Target`: The type of the value the action mutates.
/// * `Error`: The failure raised by the target when the change cannot be made.
///
/// # Required Methods
///
/// * `apply(&mut self, target: &mut Self::Target)`: Performs the forward change.
/// * `revert(&mut self, target: &mut Self::Target)`: Restores the exact state the target had before `apply`.
///
/// # Provided Methods
///
/// * `description(&self) -> Cow<str>`: Returns a description of the action. The default implementation returns "Unknown action".
///
/// # Example
///
/// ```
/// use versioned_history::prelude::Action;
/// use std::convert::Infallible;
///
/// struct Push(char);
///
/// impl Action for Push {
///     type Target = String;
///     type Error = Infallible;
///
///     fn apply(&mut self, target: &mut String) -> Result<(), Infallible> {
///         target.push(self.0);
///         Ok(())
///     }
///
///     fn revert(&mut self, target: &mut String) -> Result<(), Infallible> {
///         target.pop();
///         Ok(())
///     }
/// }
///
/// let mut text = String::from("ab");
/// let mut push = Push('c');
/// push.apply(&mut text).unwrap();
/// assert_eq!(text, "abc");
/// push.revert(&mut text).unwrap();
/// assert_eq!(text, "ab");
/// ```
pub trait Action {
    type Target: ?Sized;
    type Error;

    /// Performs the forward change on `target`.
    ///
    /// # Errors
    ///
    /// Returns the target's error when the change cannot be made. A failed
    /// apply must leave nothing that `revert` would need to undo, except for
    /// actions that track partial progress themselves.
    fn apply(&mut self, target: &mut Self::Target) -> Result<(), Self::Error>;

    /// Restores `target` to the state it had immediately before `apply`.
    ///
    /// # Errors
    ///
    /// Returns the target's error when the change cannot be reversed.
    fn revert(&mut self, target: &mut Self::Target) -> Result<(), Self::Error>;

    /// Returns a description of the action. The default implementation returns "Unknown action".
    fn description(&self) -> Cow<'_, str> {
        Cow::Borrowed("Unknown action")
    }
}
