//! Entry points used by a host: does an existing run configuration already
//! match a selection, and fill one in from a selection.

use crate::{
    command::{AcceptsDescriptor, is_equivalent},
    config::{RunConfiguration, merge_with_default},
    interfaces::{ResolveContext, TreeOracle, WorkspaceOracle},
    resolve::{SelectionClassifier, TestConfig},
};
use tracing::debug;

/// Outcome of populating a configuration from a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Populated<E> {
    pub success: bool,
    pub name: Option<String>,
    pub anchor: Option<E>,
}

impl<E> Populated<E> {
    fn failed() -> Self {
        Self {
            success: false,
            name: None,
            anchor: None,
        }
    }
}

pub struct TestProducer<'a, T, W> {
    ctx: ResolveContext<'a, T, W>,
}

impl<'a, T, W> TestProducer<'a, T, W>
where
    T: TreeOracle,
    W: WorkspaceOracle<T::Element>,
{
    pub fn new(tree: &'a T, workspace: &'a W) -> Self {
        Self {
            ctx: ResolveContext::new(tree, workspace),
        }
    }

    pub fn resolve(&self, selection: &[T::Element], climb_up: bool) -> Option<TestConfig<T::Element>> {
        SelectionClassifier::new(self.ctx)
            .climb_up(climb_up)
            .classify(selection)
    }

    /// Whether `existing` already runs what the selection resolves to
    pub fn matches<C>(&self, existing: &C, selection: &[T::Element]) -> bool
    where
        C: AcceptsDescriptor + ?Sized,
    {
        match self.resolve(selection, true) {
            Some(config) => is_equivalent(existing, &config.command_descriptor()),
            None => false,
        }
    }

    /// Replace the identity of `existing` with the selection's, keeping its
    /// user-set fields. `existing` is untouched when nothing resolves.
    pub fn populate(
        &self,
        existing: &mut RunConfiguration,
        selection: &[T::Element],
    ) -> Populated<T::Element> {
        let Some(config) = self.resolve(selection, true) else {
            debug!("selection does not resolve to tests");
            return Populated::failed();
        };

        let descriptor = config.command_descriptor();
        *existing = merge_with_default(existing, &descriptor, config.name());
        debug!("populated '{}'", existing.name);

        Populated {
            success: true,
            name: Some(config.name().to_string()),
            anchor: Some(config.anchor().clone()),
        }
    }
}
