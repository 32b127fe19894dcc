//! Selection classification
//!
//! Strategies are tried in a fixed order: the whole selection as several
//! files, then the first element as a test function, then the first element
//! as a module.

use super::test_config::{FunctionTest, ModuleTest, MultiFileTest, TestConfig};
use crate::interfaces::{ElementKind, ResolveContext, TreeOracle, WorkspaceOracle};
use tracing::debug;

pub struct SelectionClassifier<'a, T, W> {
    ctx: ResolveContext<'a, T, W>,
    climb_up: bool,
}

impl<'a, T, W> SelectionClassifier<'a, T, W>
where
    T: TreeOracle,
    W: WorkspaceOracle<T::Element>,
{
    pub fn new(ctx: ResolveContext<'a, T, W>) -> Self {
        Self {
            ctx,
            climb_up: true,
        }
    }

    /// Whether elements may be replaced by their nearest enclosing function
    /// or module. When off, an element must already be of the required kind.
    pub fn climb_up(mut self, climb_up: bool) -> Self {
        self.climb_up = climb_up;
        self
    }

    pub fn classify(&self, selection: &[T::Element]) -> Option<TestConfig<T::Element>> {
        let first = selection.first()?;

        let modules: Vec<T::Element> = selection
            .iter()
            .filter_map(|element| self.as_module(element))
            .collect();
        if let Some(config) = MultiFileTest::create(self.ctx, &modules) {
            debug!("classified selection as multi-file test");
            return Some(TestConfig::MultiFile(config));
        }

        if let Some(config) = FunctionTest::create(self.ctx, first, self.climb_up) {
            debug!("classified selection as function test");
            return Some(TestConfig::Function(config));
        }

        let config = ModuleTest::create(self.ctx, first, self.climb_up)?;
        debug!("classified selection as module test");
        Some(TestConfig::Module(config))
    }

    fn as_module(&self, element: &T::Element) -> Option<T::Element> {
        if self.ctx.tree.is_module(element) {
            Some(element.clone())
        } else if self.climb_up {
            self.ctx
                .tree
                .nearest_ancestor_or_self(element, ElementKind::Module)
        } else {
            None
        }
    }
}
