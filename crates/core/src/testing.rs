//! In-memory oracles for unit tests

use crate::interfaces::{ResolveContext, TreeOracle, WorkspaceOracle};
use crate::types::{BuildTarget, Package, PackageId, TargetKind};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone)]
struct FakeNode {
    module: bool,
    name: String,
    parent: Option<usize>,
    is_test: bool,
    path: Option<String>,
    expanded_test: bool,
}

/// Tree built by hand; elements are indices into the node list
#[derive(Debug, Default)]
pub struct FakeTree {
    nodes: Vec<FakeNode>,
}

impl FakeTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, node: FakeNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn child_path(&self, parent: Option<usize>, name: &str) -> Option<String> {
        match parent {
            Some(p) => self.nodes[p].path.as_ref().map(|base| format!("{base}::{name}")),
            None => Some(String::new()),
        }
    }

    /// Add a crate root module; its path is empty
    pub fn root(&mut self, name: &str) -> usize {
        self.push(FakeNode {
            module: true,
            name: name.to_string(),
            parent: None,
            is_test: false,
            path: Some(String::new()),
            expanded_test: false,
        })
    }

    pub fn module(&mut self, parent: usize, name: &str) -> usize {
        let path = self.child_path(Some(parent), name);
        self.push(FakeNode {
            module: true,
            name: name.to_string(),
            parent: Some(parent),
            is_test: false,
            path,
            expanded_test: false,
        })
    }

    pub fn function(&mut self, parent: usize, name: &str, is_test: bool) -> usize {
        let path = self.child_path(Some(parent), name);
        self.push(FakeNode {
            module: false,
            name: name.to_string(),
            parent: Some(parent),
            is_test,
            path,
            expanded_test: false,
        })
    }

    /// Pretend a macro under `module` expands to a test function
    pub fn mark_expanded_test(&mut self, module: usize) {
        self.nodes[module].expanded_test = true;
    }

    pub fn clear_path(&mut self, element: usize) {
        self.nodes[element].path = None;
    }
}

impl TreeOracle for FakeTree {
    type Element = usize;

    fn parent(&self, element: &usize) -> Option<usize> {
        self.nodes[*element].parent
    }

    fn is_function(&self, element: &usize) -> bool {
        !self.nodes[*element].module
    }

    fn is_module(&self, element: &usize) -> bool {
        self.nodes[*element].module
    }

    fn is_test_function(&self, element: &usize) -> bool {
        let node = &self.nodes[*element];
        !node.module && node.is_test
    }

    fn module_has_reachable_test_function(&self, module: &usize) -> bool {
        if self.nodes[*module].expanded_test {
            return true;
        }
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent == Some(*module))
            .any(|(id, node)| {
                if node.module {
                    self.module_has_reachable_test_function(&id)
                } else {
                    node.is_test
                }
            })
    }

    fn crate_relative_qualified_path(&self, element: &usize) -> Option<String> {
        self.nodes[*element].path.clone()
    }

    fn name(&self, element: &usize) -> Option<String> {
        Some(self.nodes[*element].name.clone())
    }

    fn own_module_name(&self, module: &usize) -> Option<String> {
        Some(self.nodes[*module].name.clone())
    }

    fn parent_module_name(&self, module: &usize) -> Option<String> {
        let parent = self.nodes[*module].parent?;
        Some(self.nodes[parent].name.clone())
    }
}

/// Workspace answering target ownership from an explicit table; an element
/// without an entry inherits the target of its nearest listed ancestor
#[derive(Debug, Default)]
pub struct FakeWorkspace {
    owners: HashMap<usize, BuildTarget>,
    packages: HashMap<PackageId, Package>,
}

impl FakeWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn package(&mut self, name: &str) -> PackageId {
        let root = PathBuf::from(format!("/ws/{name}"));
        let id = PackageId::new(root.join("Cargo.toml"));
        self.packages.insert(
            id.clone(),
            Package {
                id: id.clone(),
                name: name.to_string(),
                version: Some("0.1.0".to_string()),
                root,
            },
        );
        id
    }

    pub fn target(&self, package: &PackageId, kind: TargetKind, name: &str) -> BuildTarget {
        let package = &self.packages[package];
        BuildTarget {
            package: package.id.clone(),
            package_name: package.name.clone(),
            name: name.to_string(),
            kind,
            src_path: package.root.join("src").join(format!("{name}.rs")),
        }
    }

    pub fn assign(&mut self, element: usize, target: &BuildTarget) {
        self.owners.insert(element, target.clone());
    }

    pub fn bind<'a>(&'a self, tree: &'a FakeTree) -> Bound<'a> {
        Bound {
            tree,
            workspace: self,
        }
    }

    fn lookup(&self, tree: &FakeTree, element: usize) -> Option<BuildTarget> {
        tree.ancestors_or_self(&element)
            .find_map(|e| self.owners.get(&e).cloned())
    }
}

/// Pairs a workspace with the tree it was assigned against
pub struct Bound<'a> {
    pub tree: &'a FakeTree,
    pub workspace: &'a FakeWorkspace,
}

impl WorkspaceOracle<usize> for Bound<'_> {
    fn containing_build_target(&self, element: &usize) -> Option<BuildTarget> {
        self.workspace.lookup(self.tree, *element)
    }

    fn owning_package(&self, target: &BuildTarget) -> Option<Package> {
        self.workspace.packages.get(&target.package).cloned()
    }
}

impl<'a> Bound<'a> {
    pub fn context(&'a self) -> ResolveContext<'a, FakeTree, Bound<'a>> {
        ResolveContext::new(self.tree, self)
    }
}
