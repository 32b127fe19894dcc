//! Validated test resolutions
//!
//! Each variant is built only through its `create` function, which checks the
//! variant's invariants and returns `None` when they do not hold.

use crate::command::CommandDescriptor;
use crate::interfaces::{ElementKind, ResolveContext, TreeOracle, WorkspaceOracle};
use crate::types::{BuildTarget, Package};
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, trace};

pub const PATH_SEPARATOR: &str = "::";
pub const MULTIPLE_FILES_NAME: &str = "Test multiple selected files";

/// Strip one leading `::` from a crate-relative path
pub fn normalize_path(raw: &str) -> String {
    raw.strip_prefix(PATH_SEPARATOR).unwrap_or(raw).to_string()
}

/// Display name of a module test run
///
/// Modules called `test` or `tests` say little on their own, so they are
/// shown together with their parent module.
pub fn module_display_name(own: &str, parent: Option<&str>) -> String {
    match parent {
        Some(parent) if own == "test" || own == "tests" => format!("Test {parent}::{own}"),
        _ => format!("Test {own}"),
    }
}

/// Exactly one test function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionTest<E> {
    path: String,
    target: BuildTarget,
    anchor: E,
    name: String,
}

impl<E: Clone> FunctionTest<E> {
    pub fn create<T, W>(ctx: ResolveContext<'_, T, W>, element: &E, climb_up: bool) -> Option<Self>
    where
        T: TreeOracle<Element = E>,
        W: WorkspaceOracle<E>,
    {
        let function = if climb_up {
            ctx.tree.nearest_ancestor_or_self(element, ElementKind::Function)?
        } else if ctx.tree.is_function(element) {
            element.clone()
        } else {
            return None;
        };

        if !ctx.tree.is_test_function(&function) {
            trace!("function is not marked as a test");
            return None;
        }

        let path = normalize_path(&ctx.tree.crate_relative_qualified_path(&function)?);
        let Some(target) = ctx.workspace.containing_build_target(&function) else {
            debug!("no build target owns test function {}", path);
            return None;
        };
        let name = format!("Test {}", ctx.tree.name(&function)?);

        Some(Self {
            path,
            target,
            anchor: function,
            name,
        })
    }
}

/// Every test under a module path prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleTest<E> {
    path: String,
    target: BuildTarget,
    anchor: E,
    name: String,
}

impl<E: Clone> ModuleTest<E> {
    pub fn create<T, W>(ctx: ResolveContext<'_, T, W>, element: &E, climb_up: bool) -> Option<Self>
    where
        T: TreeOracle<Element = E>,
        W: WorkspaceOracle<E>,
    {
        let module = if climb_up {
            ctx.tree.nearest_ancestor_or_self(element, ElementKind::Module)?
        } else if ctx.tree.is_module(element) {
            element.clone()
        } else {
            return None;
        };

        let path = normalize_path(&ctx.tree.crate_relative_qualified_path(&module)?);
        if !ctx.tree.module_has_reachable_test_function(&module) {
            trace!("module '{}' has no reachable test function", path);
            return None;
        }
        let Some(target) = ctx.workspace.containing_build_target(&module) else {
            debug!("no build target owns module '{}'", path);
            return None;
        };

        let own = ctx.tree.own_module_name(&module)?;
        let parent = ctx.tree.parent_module_name(&module);
        let name = module_display_name(&own, parent.as_deref());

        Some(Self {
            path,
            target,
            anchor: module,
            name,
        })
    }
}

/// All tests of several targets of one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiFileTest<E> {
    targets: Vec<BuildTarget>,
    anchor: E,
}

impl<E: Clone + Eq + Hash + Debug> MultiFileTest<E> {
    /// Build from candidate modules in selection order.
    ///
    /// Modules without reachable tests or without a target are skipped. The
    /// survivors must span at least two targets of a single package.
    pub fn create<T, W>(ctx: ResolveContext<'_, T, W>, modules: &[E]) -> Option<Self>
    where
        T: TreeOracle<Element = E>,
        W: WorkspaceOracle<E>,
    {
        let mut seen = HashSet::new();
        let mut anchor = None;
        let mut targets: Vec<BuildTarget> = Vec::new();

        for module in modules {
            if !seen.insert(module) {
                continue;
            }
            if !ctx.tree.module_has_reachable_test_function(module) {
                trace!("skipping module without tests: {:?}", module);
                continue;
            }
            let Some(target) = ctx.workspace.containing_build_target(module) else {
                trace!("skipping module without build target: {:?}", module);
                continue;
            };
            anchor.get_or_insert_with(|| module.clone());
            if !targets.contains(&target) {
                targets.push(target);
            }
        }

        if targets.len() < 2 {
            trace!("{} qualifying target(s), not a multi-file run", targets.len());
            return None;
        }

        let packages: Vec<Option<Package>> = targets
            .iter()
            .map(|target| ctx.workspace.owning_package(target))
            .collect();
        let first = packages.first().cloned().flatten()?;
        if packages.iter().any(|package| package.as_ref() != Some(&first)) {
            debug!(
                "selection spans more than one package, first is '{}'",
                first.name
            );
            return None;
        }

        Some(Self {
            targets,
            anchor: anchor?,
        })
    }
}

/// Result of resolving a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestConfig<E> {
    Function(FunctionTest<E>),
    Module(ModuleTest<E>),
    MultiFile(MultiFileTest<E>),
}

impl<E> TestConfig<E> {
    /// Path filter; empty means no filter
    pub fn path(&self) -> &str {
        match self {
            TestConfig::Function(config) => &config.path,
            TestConfig::Module(config) => &config.path,
            TestConfig::MultiFile(_) => "",
        }
    }

    pub fn targets(&self) -> &[BuildTarget] {
        match self {
            TestConfig::Function(config) => std::slice::from_ref(&config.target),
            TestConfig::Module(config) => std::slice::from_ref(&config.target),
            TestConfig::MultiFile(config) => &config.targets,
        }
    }

    /// Whether the filter must match a single test name exactly
    pub fn exact(&self) -> bool {
        matches!(self, TestConfig::Function(_))
    }

    /// Element the run is shown against
    pub fn anchor(&self) -> &E {
        match self {
            TestConfig::Function(config) => &config.anchor,
            TestConfig::Module(config) => &config.anchor,
            TestConfig::MultiFile(config) => &config.anchor,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TestConfig::Function(config) => &config.name,
            TestConfig::Module(config) => &config.name,
            TestConfig::MultiFile(_) => MULTIPLE_FILES_NAME,
        }
    }

    pub fn command_descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::for_test(self.targets().to_vec(), self.path(), self.exact())
    }
}
