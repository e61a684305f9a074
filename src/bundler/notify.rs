//! Build lifecycle notifications.

use super::{BuildState, esbuild::BuildResult};

/// Receives build lifecycle signals. Purely a reporting sink: nothing a
/// notifier does affects the build.
pub trait Notifier {
    /// A build pass is starting.
    fn building(&self);

    /// A build pass finished; `state` already holds its statistics.
    fn built(&self, state: &BuildState);

    /// Results of every task in the finished pass, in task order.
    /// Called after [`Notifier::built`], also when there are no warnings.
    fn warnings(&self, results: &[BuildResult]);
}

impl<T: Notifier> Notifier for &T {
    fn building(&self) {
        (**self).building()
    }

    fn built(&self, state: &BuildState) {
        (**self).built(state)
    }

    fn warnings(&self, results: &[BuildResult]) {
        (**self).warnings(results)
    }
}

/// Notifier that discards every signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn building(&self) {}

    fn built(&self, _state: &BuildState) {}

    fn warnings(&self, _results: &[BuildResult]) {}
}
