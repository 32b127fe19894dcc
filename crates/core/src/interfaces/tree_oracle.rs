//! Syntax tree queries

use std::fmt::Debug;
use std::hash::Hash;

/// Capability an element can be tested for while climbing the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Function,
    Module,
}

/// Read-only view of the program's syntax tree
pub trait TreeOracle {
    /// Opaque handle to a located element
    type Element: Clone + Eq + Hash + Debug;

    /// Parent of an element, `None` at the top of the tree
    fn parent(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Whether the element is a function item
    fn is_function(&self, element: &Self::Element) -> bool;

    /// Whether the element is a module (a whole file or an inline module)
    fn is_module(&self, element: &Self::Element) -> bool;

    /// Whether the element is a function marked as a test case
    fn is_test_function(&self, element: &Self::Element) -> bool;

    /// Whether a test function is reachable under the module, through nested
    /// modules and expanded items
    fn module_has_reachable_test_function(&self, module: &Self::Element) -> bool;

    /// Path of the element relative to its crate root, e.g. `::net::tests`
    fn crate_relative_qualified_path(&self, element: &Self::Element) -> Option<String>;

    /// Declared name of the element
    fn name(&self, element: &Self::Element) -> Option<String>;

    /// Name of the module itself
    fn own_module_name(&self, module: &Self::Element) -> Option<String>;

    /// Name of the module enclosing the module
    fn parent_module_name(&self, module: &Self::Element) -> Option<String>;

    /// Whether the element has the given capability
    fn is_kind(&self, element: &Self::Element, kind: ElementKind) -> bool {
        match kind {
            ElementKind::Function => self.is_function(element),
            ElementKind::Module => self.is_module(element),
        }
    }

    /// The element followed by its parents, innermost first
    fn ancestors_or_self(&self, element: &Self::Element) -> Ancestors<'_, Self>
    where
        Self: Sized,
    {
        Ancestors {
            tree: self,
            next: Some(element.clone()),
        }
    }

    /// Closest element, starting at `element` itself, that has the capability
    fn nearest_ancestor_or_self(
        &self,
        element: &Self::Element,
        kind: ElementKind,
    ) -> Option<Self::Element>
    where
        Self: Sized,
    {
        self.ancestors_or_self(element)
            .find(|candidate| self.is_kind(candidate, kind))
    }
}

/// Iterator over an element and its parents
pub struct Ancestors<'a, T: TreeOracle> {
    tree: &'a T,
    next: Option<T::Element>,
}

impl<T: TreeOracle> Iterator for Ancestors<'_, T> {
    type Item = T::Element;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = self.tree.parent(&current);
        Some(current)
    }
}
