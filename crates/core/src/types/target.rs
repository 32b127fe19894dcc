use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Identity of a package: the path of its manifest
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PackageId(PathBuf);

impl PackageId {
    pub fn new(manifest_path: impl Into<PathBuf>) -> Self {
        Self(manifest_path.into())
    }

    pub fn manifest_path(&self) -> &Path {
        &self.0
    }
}

/// A package of the workspace. Two packages are the same package only when
/// their ids are equal; names are not an identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    pub id: PackageId,
    pub name: String,
    pub version: Option<String>,
    pub root: PathBuf,
}

impl PartialEq for Package {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Package {}

impl std::hash::Hash for Package {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Different cargo target types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Lib,
    Bin,
    Test,
    Bench,
    Example,
}

impl TargetKind {
    /// Cargo flag selecting a target of this kind
    pub fn cargo_flag(self) -> &'static str {
        match self {
            TargetKind::Lib => "--lib",
            TargetKind::Bin => "--bin",
            TargetKind::Test => "--test",
            TargetKind::Bench => "--bench",
            TargetKind::Example => "--example",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TargetKind::Lib => "lib",
            TargetKind::Bin => "bin",
            TargetKind::Test => "test",
            TargetKind::Bench => "bench",
            TargetKind::Example => "example",
        };
        f.write_str(s)
    }
}

/// A unit of compilation, owned by exactly one package
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BuildTarget {
    pub package: PackageId,
    pub package_name: String,
    pub name: String,
    pub kind: TargetKind,
    pub src_path: PathBuf,
}

impl BuildTarget {
    /// Name of the crate this target compiles to
    pub fn crate_name(&self) -> String {
        self.name.replace('-', "_")
    }

    /// Cargo arguments selecting this target
    pub fn cargo_args(&self) -> Vec<String> {
        match self.kind {
            TargetKind::Lib => vec![self.kind.cargo_flag().to_string()],
            _ => vec![self.kind.cargo_flag().to_string(), self.name.clone()],
        }
    }

    /// Serializable reference to this target, independent of file system paths
    pub fn spec(&self) -> TargetSpec {
        TargetSpec {
            package: self.package_name.clone(),
            kind: self.kind,
            name: self.name.clone(),
        }
    }
}

/// Stored form of a target reference inside a run configuration
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TargetSpec {
    pub package: String,
    pub kind: TargetKind,
    pub name: String,
}

impl TargetSpec {
    pub fn cargo_args(&self) -> Vec<String> {
        match self.kind {
            TargetKind::Lib => vec![self.kind.cargo_flag().to_string()],
            _ => vec![self.kind.cargo_flag().to_string(), self.name.clone()],
        }
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.package, self.kind, self.name)
    }
}
