//! Syntax-tree oracle over the Rust files of a workspace
//!
//! Every file is parsed once into a flat list of items. Elements handed out
//! by the index are `(file, item)` pairs and stay valid for the lifetime of
//! the index.

use super::cargo_workspace::CargoWorkspace;
use crate::{
    error::Result,
    interfaces::TreeOracle,
    parser::{ParsedItem, RustParser},
    types::{BuildTarget, ItemKind},
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

pub type FileId = usize;
pub type ItemId = usize;

/// Handle to an item of an indexed file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ElementId {
    pub file: FileId,
    pub item: ItemId,
}

impl ElementId {
    fn file_root(file: FileId) -> Self {
        Self { file, item: 0 }
    }
}

#[derive(Debug)]
struct IndexedFile {
    path: PathBuf,
    target: Option<BuildTarget>,
    /// Module path of the file inside its crate, `None` without a target
    module_path: Option<Vec<String>>,
    items: Vec<ParsedItem>,
    children: Vec<Vec<ItemId>>,
}

#[derive(Debug, Default)]
pub struct SourceIndex {
    files: Vec<IndexedFile>,
    by_path: HashMap<PathBuf, FileId>,
}

impl SourceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every Rust file under the workspace's packages
    pub fn for_workspace(workspace: &CargoWorkspace) -> Result<Self> {
        let mut index = Self::new();
        let mut parser = RustParser::new()?;

        for package in workspace.packages() {
            let walker = WalkDir::new(&package.root)
                .into_iter()
                .filter_entry(|entry| {
                    entry.depth() == 0
                        || !entry
                            .file_name()
                            .to_str()
                            .map(|name| name.starts_with('.') || name == "target")
                            .unwrap_or(false)
                });
            for entry in walker.filter_map(|entry| entry.ok()) {
                let path = entry.path();
                if entry.file_type().is_file()
                    && path.extension().and_then(|e| e.to_str()) == Some("rs")
                    && !index.by_path.contains_key(path)
                {
                    let source = match std::fs::read_to_string(path) {
                        Ok(source) => source,
                        Err(e) => {
                            debug!("Skipping unreadable {:?}: {}", path, e);
                            continue;
                        }
                    };
                    if let Err(e) = index.insert(&mut parser, path.to_path_buf(), &source, workspace) {
                        debug!("Skipping unparsable {:?}: {}", path, e);
                    }
                }
            }
        }

        debug!("Indexed {} file(s)", index.files.len());
        Ok(index)
    }

    /// Index (or re-index) one file from its source text
    pub fn add_source(
        &mut self,
        path: PathBuf,
        source: &str,
        workspace: &CargoWorkspace,
    ) -> Result<FileId> {
        let mut parser = RustParser::new()?;
        self.insert(&mut parser, path, source, workspace)
    }

    fn insert(
        &mut self,
        parser: &mut RustParser,
        path: PathBuf,
        source: &str,
        workspace: &CargoWorkspace,
    ) -> Result<FileId> {
        let items = parser.parse_items(source)?;
        let target = workspace.target_for_file(&path);
        let module_path = target
            .as_ref()
            .and_then(|target| module_path_for(&path, target));
        trace!("{:?}: {} item(s), module {:?}", path, items.len(), module_path);

        let mut children = vec![Vec::new(); items.len()];
        for (id, item) in items.iter().enumerate() {
            if let Some(parent) = item.parent {
                children[parent].push(id);
            }
        }

        let file = IndexedFile {
            path: path.clone(),
            target,
            module_path,
            items,
            children,
        };
        match self.by_path.get(&path) {
            Some(&id) => {
                self.files[id] = file;
                Ok(id)
            }
            None => {
                self.files.push(file);
                let id = self.files.len() - 1;
                self.by_path.insert(path, id);
                Ok(id)
            }
        }
    }

    pub fn file_id(&self, path: &Path) -> Option<FileId> {
        self.by_path.get(path).copied()
    }

    pub fn path_of(&self, element: &ElementId) -> Option<&Path> {
        self.files.get(element.file).map(|file| file.path.as_path())
    }

    /// The module formed by a whole file
    pub fn file_element(&self, file: FileId) -> Option<ElementId> {
        self.files.get(file).map(|_| ElementId::file_root(file))
    }

    /// Innermost item spanning a 0-based line, else the file itself
    pub fn element_at(&self, file: FileId, line: u32) -> Option<ElementId> {
        let indexed = self.files.get(file)?;
        let innermost = indexed
            .items
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, item)| item.span.contains_line(line))
            .min_by_key(|(_, item)| item.span.line_count())
            .map(|(item, _)| ElementId { file, item });
        Some(innermost.unwrap_or(ElementId::file_root(file)))
    }

    fn item(&self, element: &ElementId) -> Option<&ParsedItem> {
        self.files.get(element.file)?.items.get(element.item)
    }

    fn children(&self, element: &ElementId) -> impl Iterator<Item = ElementId> + '_ {
        let file = element.file;
        self.files
            .get(file)
            .and_then(|indexed| indexed.children.get(element.item))
            .into_iter()
            .flatten()
            .map(move |&item| ElementId { file, item })
    }

    /// Module path segments of an element inside its crate
    fn segments(&self, element: &ElementId) -> Option<Vec<String>> {
        let file = self.files.get(element.file)?;
        let mut segments = file.module_path.clone()?;

        let mut names = Vec::new();
        let mut current = Some(element.item);
        while let Some(id) = current {
            let item = file.items.get(id)?;
            if item.kind != ItemKind::File {
                names.push(item.name.clone()?);
            }
            current = item.parent;
        }
        segments.extend(names.into_iter().rev());
        Some(segments)
    }

    fn crate_name(&self, element: &ElementId) -> Option<String> {
        let file = self.files.get(element.file)?;
        file.target.as_ref().map(BuildTarget::crate_name)
    }

    /// File a `mod name;` declaration points at
    fn resolve_declaration(&self, declaration: &ElementId) -> Option<ElementId> {
        let target = self.files.get(declaration.file)?.target.as_ref()?;
        let segments = self.segments(declaration)?;
        self.files
            .iter()
            .position(|file| {
                file.target.as_ref() == Some(target)
                    && file.module_path.as_ref() == Some(&segments)
            })
            .map(ElementId::file_root)
    }

    fn reaches_test(&self, module: &ElementId, visited: &mut HashSet<ElementId>) -> bool {
        if !visited.insert(*module) {
            return false;
        }
        self.children(module).any(|child| match self.item(&child) {
            Some(item) => match item.kind {
                ItemKind::Function => item.is_test,
                ItemKind::Module => self.reaches_test(&child, visited),
                ItemKind::ModDecl => self
                    .resolve_declaration(&child)
                    .map(|file| self.reaches_test(&file, visited))
                    .unwrap_or(false),
                ItemKind::File => false,
            },
            None => false,
        })
    }
}

impl TreeOracle for SourceIndex {
    type Element = ElementId;

    fn parent(&self, element: &ElementId) -> Option<ElementId> {
        let parent = self.item(element)?.parent?;
        Some(ElementId {
            file: element.file,
            item: parent,
        })
    }

    fn is_function(&self, element: &ElementId) -> bool {
        self.item(element)
            .map(|item| item.kind == ItemKind::Function)
            .unwrap_or(false)
    }

    fn is_module(&self, element: &ElementId) -> bool {
        self.item(element)
            .map(|item| item.kind.is_module())
            .unwrap_or(false)
    }

    fn is_test_function(&self, element: &ElementId) -> bool {
        self.item(element)
            .map(|item| item.kind == ItemKind::Function && item.is_test)
            .unwrap_or(false)
    }

    fn module_has_reachable_test_function(&self, module: &ElementId) -> bool {
        self.is_module(module) && self.reaches_test(module, &mut HashSet::new())
    }

    fn crate_relative_qualified_path(&self, element: &ElementId) -> Option<String> {
        let segments = self.segments(element)?;
        Some(
            segments
                .iter()
                .map(|segment| format!("::{segment}"))
                .collect(),
        )
    }

    fn name(&self, element: &ElementId) -> Option<String> {
        match self.item(element)?.kind {
            ItemKind::File => self.own_module_name(element),
            _ => self.item(element)?.name.clone(),
        }
    }

    fn own_module_name(&self, module: &ElementId) -> Option<String> {
        let item = self.item(module)?;
        match item.kind {
            ItemKind::Module => item.name.clone(),
            ItemKind::File => match self.files.get(module.file)?.module_path.as_ref()?.last() {
                Some(last) => Some(last.clone()),
                None => self.crate_name(module),
            },
            _ => None,
        }
    }

    fn parent_module_name(&self, module: &ElementId) -> Option<String> {
        if let Some(parent) = self.parent(module) {
            return self.own_module_name(&parent);
        }
        let module_path = self.files.get(module.file)?.module_path.as_ref()?;
        match module_path.len() {
            0 => None,
            1 => self.crate_name(module),
            n => Some(module_path[n - 2].clone()),
        }
    }
}

/// Module path of a file relative to its target's root file.
///
/// Paths are taken relative to the directory holding the root file, which is
/// where rustc looks up `mod x;` of a crate root. A file nested under a
/// directory named after a non-`mod.rs` root (`src/bin/tool/helper.rs` next
/// to `src/bin/tool.rs`) gets `tool::helper`, a path no declaration reaches.
fn module_path_for(path: &Path, target: &BuildTarget) -> Option<Vec<String>> {
    if path == target.src_path {
        return Some(Vec::new());
    }
    let root_dir = target.src_path.parent()?;
    let relative = path.strip_prefix(root_dir).ok()?;
    let mut segments = relative
        .components()
        .map(|component| component.as_os_str().to_str().map(str::to_string))
        .collect::<Option<Vec<String>>>()?;

    let file_name = segments.pop()?;
    if file_name != "mod.rs" {
        segments.push(file_name.strip_suffix(".rs")?.to_string());
    }
    Some(segments)
}
