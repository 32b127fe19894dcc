//! Workspace metadata loaded from `Cargo.toml` manifests

use crate::{
    error::{Error, Result},
    types::{BuildTarget, Package, PackageId, TargetKind},
};
use cargo_toml::{Inheritable, Manifest, Product};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Packages and targets of a Cargo workspace
#[derive(Debug, Clone)]
pub struct CargoWorkspace {
    root: PathBuf,
    packages: Vec<Package>,
    targets: Vec<BuildTarget>,
}

impl CargoWorkspace {
    /// Load the workspace rooted at `manifest_path`, including its members
    pub fn load(manifest_path: &Path) -> Result<Self> {
        let root = manifest_path
            .parent()
            .ok_or_else(|| Error::ManifestError("Cannot determine workspace root".to_string()))?
            .to_path_buf();
        let manifest = read_manifest(manifest_path)?;

        let mut workspace = Self {
            root: root.clone(),
            packages: Vec::new(),
            targets: Vec::new(),
        };

        if manifest.package.is_some() {
            workspace.add_package(manifest_path, &manifest);
        }

        if let Some(ws) = &manifest.workspace {
            for member_dir in expand_members(&root, &ws.members) {
                let excluded = ws
                    .exclude
                    .iter()
                    .any(|exclude| member_dir == root.join(exclude));
                let member_manifest = member_dir.join("Cargo.toml");
                if excluded || member_manifest == manifest_path || !member_manifest.exists() {
                    continue;
                }
                let member = read_manifest(&member_manifest)?;
                workspace.add_package(&member_manifest, &member);
            }
        }

        debug!(
            "Loaded workspace at {:?}: {} package(s), {} target(s)",
            workspace.root,
            workspace.packages.len(),
            workspace.targets.len()
        );
        Ok(workspace)
    }

    /// Find the manifest to load for a path: the outermost `[workspace]`
    /// manifest above it, else the nearest `Cargo.toml`
    pub fn find_manifest(start: &Path) -> Option<PathBuf> {
        let mut nearest = None;
        let mut workspace_root = None;

        for dir in start.ancestors() {
            let candidate = dir.join("Cargo.toml");
            if !candidate.is_file() {
                continue;
            }
            if nearest.is_none() {
                nearest = Some(candidate.clone());
            }
            let is_workspace = std::fs::read_to_string(&candidate)
                .map(|contents| contents.contains("[workspace]"))
                .unwrap_or(false);
            if is_workspace {
                workspace_root = Some(candidate);
            }
        }

        workspace_root.or(nearest)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn targets(&self) -> &[BuildTarget] {
        &self.targets
    }

    pub fn package(&self, id: &PackageId) -> Option<&Package> {
        self.packages.iter().find(|package| &package.id == id)
    }

    /// Package whose directory most closely contains the file
    pub fn package_for_file(&self, path: &Path) -> Option<&Package> {
        self.packages
            .iter()
            .filter(|package| path.starts_with(&package.root))
            .max_by_key(|package| package.root.components().count())
    }

    /// Target compiling the file.
    ///
    /// A target root file belongs to its target. Any other file belongs to
    /// the target whose root directory most closely contains it; when several
    /// do, the library wins, and without a library the file has no target.
    pub fn target_for_file(&self, path: &Path) -> Option<BuildTarget> {
        let package = self.package_for_file(path)?;
        let candidates: Vec<&BuildTarget> = self
            .targets
            .iter()
            .filter(|target| target.package == package.id)
            .collect();

        if let Some(target) = candidates.iter().find(|target| target.src_path == path) {
            return Some((*target).clone());
        }

        let depth_of = |target: &BuildTarget| {
            target
                .src_path
                .parent()
                .filter(|dir| path.starts_with(dir))
                .map(|dir| dir.components().count())
        };
        let deepest = candidates.iter().filter_map(|t| depth_of(t)).max()?;
        let closest: Vec<&BuildTarget> = candidates
            .into_iter()
            .filter(|t| depth_of(t) == Some(deepest))
            .collect();

        match closest.as_slice() {
            [only] => Some((*only).clone()),
            several => {
                let lib = several.iter().find(|t| t.kind == TargetKind::Lib);
                if lib.is_none() {
                    debug!("{:?} is shared by {} targets", path, several.len());
                }
                lib.map(|t| (*t).clone())
            }
        }
    }

    fn add_package(&mut self, manifest_path: &Path, manifest: &Manifest) {
        let Some(package) = &manifest.package else {
            return;
        };
        let root = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());
        let version = match &package.version {
            Inheritable::Set(version) => Some(version.clone()),
            _ => None,
        };
        let package = Package {
            id: PackageId::new(manifest_path),
            name: package.name.clone(),
            version,
            root,
        };

        let mut targets = Vec::new();
        if let Some(lib) = &manifest.lib {
            let default_name = package.name.replace('-', "_");
            targets.extend(self.product(
                &package,
                lib,
                TargetKind::Lib,
                Some("src/lib.rs"),
                &default_name,
            ));
        }
        for (products, kind) in [
            (&manifest.bin, TargetKind::Bin),
            (&manifest.test, TargetKind::Test),
            (&manifest.bench, TargetKind::Bench),
            (&manifest.example, TargetKind::Example),
        ] {
            for product in products {
                targets.extend(self.product(&package, product, kind, None, ""));
            }
        }
        add_default_targets(&package, &mut targets);

        debug!("Package {} has {} target(s)", package.name, targets.len());
        self.targets.extend(targets);
        self.packages.push(package);
    }

    fn product(
        &self,
        package: &Package,
        product: &Product,
        kind: TargetKind,
        default_path: Option<&str>,
        default_name: &str,
    ) -> Option<BuildTarget> {
        let relative = product.path.as_deref().or(default_path)?;
        let src_path = package.root.join(relative);
        let name = product.name.clone().or_else(|| {
            if default_name.is_empty() {
                src_path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
            } else {
                Some(default_name.to_string())
            }
        })?;
        // Library crates never contain dashes
        let name = if kind == TargetKind::Lib {
            name.replace('-', "_")
        } else {
            name
        };
        Some(BuildTarget {
            package: package.id.clone(),
            package_name: package.name.clone(),
            name,
            kind,
            src_path,
        })
    }
}

fn read_manifest(path: &Path) -> Result<Manifest> {
    Manifest::from_path(path)
        .map_err(|e| Error::ManifestError(format!("Failed to parse {}: {e}", path.display())))
}

/// Resolve member entries: literal paths and a trailing `/*`
fn expand_members(root: &Path, members: &[String]) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    for member in members {
        if let Some(prefix) = member.strip_suffix("/*") {
            let Ok(entries) = std::fs::read_dir(root.join(prefix)) else {
                continue;
            };
            let mut found: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| path.join("Cargo.toml").is_file())
                .collect();
            found.sort();
            dirs.extend(found);
        } else if member.contains('*') {
            debug!("Unsupported member pattern: {}", member);
        } else {
            dirs.push(root.join(member));
        }
    }
    dirs
}

/// Conventional targets on disk that the manifest did not list
fn add_default_targets(package: &Package, targets: &mut Vec<BuildTarget>) {
    let mut push = |kind: TargetKind, name: String, src_path: PathBuf| {
        let known = targets
            .iter()
            .any(|t| t.src_path == src_path || (t.kind == kind && t.name == name));
        if !known && src_path.is_file() {
            targets.push(BuildTarget {
                package: package.id.clone(),
                package_name: package.name.clone(),
                name,
                kind,
                src_path,
            });
        }
    };

    push(
        TargetKind::Lib,
        package.name.replace('-', "_"),
        package.root.join("src/lib.rs"),
    );
    push(
        TargetKind::Bin,
        package.name.clone(),
        package.root.join("src/main.rs"),
    );

    for (dir, kind) in [
        ("src/bin", TargetKind::Bin),
        ("tests", TargetKind::Test),
        ("benches", TargetKind::Bench),
        ("examples", TargetKind::Example),
    ] {
        let Ok(entries) = std::fs::read_dir(package.root.join(dir)) else {
            continue;
        };
        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("rs"))
            .collect();
        files.sort();
        for file in files {
            if let Some(name) = file.file_stem().and_then(|s| s.to_str()).map(str::to_string) {
                push(kind, name, file);
            }
        }
    }
}
