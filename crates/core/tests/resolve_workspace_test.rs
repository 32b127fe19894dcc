//! End-to-end resolution against a workspace on disk

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use testscope_core::services::IndexedWorkspace;
use testscope_core::{
    CargoCommand, CargoWorkspace, ConfigStore, RunConfiguration, SourceIndex, TargetKind,
    TestConfig, TestProducer, WorkspaceSnapshot,
};

const NET_RS: &str = r#"pub fn connect() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connects() {
        assert!(connect());
    }
}
"#;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn workspace() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(
        root,
        "Cargo.toml",
        "[workspace]\nmembers = [\"net\", \"other\"]\nresolver = \"2\"\n",
    );

    write(
        root,
        "net/Cargo.toml",
        "[package]\nname = \"net-kit\"\nversion = \"0.1.0\"\nedition = \"2021\"\n",
    );
    write(
        root,
        "net/src/lib.rs",
        "pub mod net;\npub mod parser;\nmod util;\n\npub fn version() -> u32 {\n    1\n}\n",
    );
    write(root, "net/src/net.rs", NET_RS);
    write(root, "net/src/parser/mod.rs", "mod lexer;\n\npub fn parse() {}\n");
    write(
        root,
        "net/src/parser/lexer.rs",
        "#[test]\nfn lexes() {}\n",
    );
    write(root, "net/src/util.rs", "pub fn helper() {}\n");
    write(root, "net/tests/smoke.rs", "#[test]\nfn smoke() {}\n");
    write(root, "net/tests/api.rs", "#[tokio::test]\nasync fn api() {}\n");

    write(
        root,
        "other/Cargo.toml",
        "[package]\nname = \"other\"\nversion = \"0.1.0\"\nedition = \"2021\"\n",
    );
    write(
        root,
        "other/src/lib.rs",
        "#[cfg(test)]\nmod tests {\n    #[test]\n    fn works() {}\n}\n",
    );
    temp
}

fn load(temp: &TempDir) -> WorkspaceSnapshot {
    WorkspaceSnapshot::load(&temp.path().join("Cargo.toml")).unwrap()
}

#[test]
fn test_function_selection() {
    let temp = workspace();
    let snapshot = load(&temp);
    let oracle = snapshot.workspace_oracle();
    let producer = TestProducer::new(snapshot.index(), &oracle);

    // inside the body of `fn connects`
    let element = snapshot
        .element_at(&temp.path().join("net/src/net.rs"), Some(10))
        .unwrap();
    let config = producer.resolve(&[element], true).unwrap();

    assert!(matches!(config, TestConfig::Function(_)));
    assert_eq!(config.path(), "net::tests::connects");
    assert_eq!(config.name(), "Test connects");
    assert!(config.exact());

    let descriptor = config.command_descriptor();
    assert_eq!(descriptor.targets.len(), 1);
    assert_eq!(descriptor.targets[0].kind, TargetKind::Lib);
    assert_eq!(descriptor.targets[0].name, "net_kit");
    assert_eq!(
        CargoCommand::from_descriptor(&descriptor).to_shell_command(),
        "cargo test --package net-kit --lib -- net::tests::connects --exact"
    );
}

#[test]
fn test_attribute_line_selects_function() {
    let temp = workspace();
    let snapshot = load(&temp);
    let oracle = snapshot.workspace_oracle();
    let producer = TestProducer::new(snapshot.index(), &oracle);

    let element = snapshot
        .element_at(&temp.path().join("net/src/net.rs"), Some(8))
        .unwrap();
    let config = producer.resolve(&[element], true).unwrap();
    assert_eq!(config.path(), "net::tests::connects");
}

#[test]
fn test_inline_test_module_selection() {
    let temp = workspace();
    let snapshot = load(&temp);
    let oracle = snapshot.workspace_oracle();
    let producer = TestProducer::new(snapshot.index(), &oracle);

    // `use super::*;` inside `mod tests`
    let element = snapshot
        .element_at(&temp.path().join("net/src/net.rs"), Some(6))
        .unwrap();
    let config = producer.resolve(&[element], true).unwrap();

    assert!(matches!(config, TestConfig::Module(_)));
    assert_eq!(config.name(), "Test net::tests");
    assert_eq!(config.path(), "net::tests");
    assert!(config.command_descriptor().flags.is_empty());
}

#[test]
fn test_module_reaches_tests_through_declarations() {
    let temp = workspace();
    let snapshot = load(&temp);
    let oracle = snapshot.workspace_oracle();
    let producer = TestProducer::new(snapshot.index(), &oracle);

    let parser = snapshot
        .element_at(&temp.path().join("net/src/parser/mod.rs"), None)
        .unwrap();
    let config = producer.resolve(&[parser], true).unwrap();
    assert_eq!(config.name(), "Test parser");
    assert_eq!(config.path(), "parser");

    let lib = snapshot
        .element_at(&temp.path().join("net/src/lib.rs"), None)
        .unwrap();
    let config = producer.resolve(&[lib], true).unwrap();
    assert_eq!(config.name(), "Test net_kit");
    assert_eq!(config.path(), "");
}

#[test]
fn test_non_test_function_climbs_to_file_module() {
    let temp = workspace();
    let snapshot = load(&temp);
    let oracle = snapshot.workspace_oracle();
    let producer = TestProducer::new(snapshot.index(), &oracle);

    let connect = snapshot
        .element_at(&temp.path().join("net/src/net.rs"), Some(0))
        .unwrap();
    let config = producer.resolve(&[connect], true).unwrap();
    assert_eq!(config.name(), "Test net");
    assert_eq!(config.path(), "net");

    assert!(producer.resolve(&[connect], false).is_none());
}

#[test]
fn test_module_without_tests_is_absent() {
    let temp = workspace();
    let snapshot = load(&temp);
    let oracle = snapshot.workspace_oracle();
    let producer = TestProducer::new(snapshot.index(), &oracle);

    let util = snapshot
        .element_at(&temp.path().join("net/src/util.rs"), None)
        .unwrap();
    assert!(producer.resolve(&[util], true).is_none());

    let helper = snapshot
        .element_at(&temp.path().join("net/src/util.rs"), Some(0))
        .unwrap();
    assert!(producer.resolve(&[helper], true).is_none());
}

#[test]
fn test_multiple_files_of_one_package() {
    let temp = workspace();
    let snapshot = load(&temp);
    let oracle = snapshot.workspace_oracle();
    let producer = TestProducer::new(snapshot.index(), &oracle);

    let smoke = snapshot
        .element_at(&temp.path().join("net/tests/smoke.rs"), None)
        .unwrap();
    let api = snapshot
        .element_at(&temp.path().join("net/tests/api.rs"), None)
        .unwrap();
    let config = producer.resolve(&[smoke, api], true).unwrap();

    assert!(matches!(config, TestConfig::MultiFile(_)));
    assert_eq!(config.name(), "Test multiple selected files");
    assert_eq!(*config.anchor(), smoke);
    assert_eq!(
        CargoCommand::from_descriptor(&config.command_descriptor()).to_shell_command(),
        "cargo test --package net-kit --test smoke --test api"
    );
}

#[test]
fn test_multiple_packages_fall_back_to_first_file() {
    let temp = workspace();
    let snapshot = load(&temp);
    let oracle = snapshot.workspace_oracle();
    let producer = TestProducer::new(snapshot.index(), &oracle);

    let smoke = snapshot
        .element_at(&temp.path().join("net/tests/smoke.rs"), None)
        .unwrap();
    let other = snapshot
        .element_at(&temp.path().join("other/src/lib.rs"), None)
        .unwrap();
    let config = producer.resolve(&[smoke, other], true).unwrap();

    assert!(matches!(config, TestConfig::Module(_)));
    assert_eq!(config.name(), "Test smoke");
    assert_eq!(config.targets().len(), 1);
    assert_eq!(config.targets()[0].name, "smoke");
    assert_eq!(config.path(), "");
}

#[test]
fn test_populate_store_and_match() {
    let temp = workspace();
    let snapshot = load(&temp);
    let oracle = snapshot.workspace_oracle();
    let producer = TestProducer::new(snapshot.index(), &oracle);
    let net = temp.path().join("net/src/net.rs");
    let connects = snapshot.element_at(&net, Some(10)).unwrap();

    let mut config: RunConfiguration =
        serde_json::from_str(r#"{ "name": "draft", "env": { "RUST_BACKTRACE": "1" } }"#).unwrap();
    let populated = producer.populate(&mut config, &[connects]);
    assert!(populated.success);
    assert_eq!(populated.anchor, Some(connects));

    let path = ConfigStore::path_for(temp.path());
    let mut store = ConfigStore::load_from_file(&path).unwrap();
    store.upsert(config);
    store.save_to_file(&path).unwrap();

    let reloaded = ConfigStore::load_from_file(&path).unwrap();
    let stored = reloaded.find("Test connects").unwrap();
    assert_eq!(stored.env.get("RUST_BACKTRACE").map(String::as_str), Some("1"));
    assert!(producer.matches(stored, &[connects]));

    let tests_module = snapshot.element_at(&net, Some(6)).unwrap();
    assert!(!producer.matches(stored, &[tests_module]));
}

#[test]
fn test_undecodable_file_is_skipped() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(
        root,
        "Cargo.toml",
        "[package]\nname = \"codec\"\nversion = \"0.1.0\"\nedition = \"2021\"\n",
    );
    write(
        root,
        "src/lib.rs",
        "#[cfg(test)]\nmod tests {\n    #[test]\n    fn works() {}\n}\n",
    );
    fs::create_dir_all(root.join("fixtures")).unwrap();
    fs::write(root.join("fixtures/bad.rs"), [0xff, 0xfe, b'f', b'n']).unwrap();

    let snapshot = WorkspaceSnapshot::load(&root.join("Cargo.toml")).unwrap();
    assert!(snapshot.element_at(&root.join("fixtures/bad.rs"), None).is_none());

    let oracle = snapshot.workspace_oracle();
    let producer = TestProducer::new(snapshot.index(), &oracle);
    let works = snapshot
        .element_at(&root.join("src/lib.rs"), Some(3))
        .unwrap();
    let config = producer.resolve(&[works], true).unwrap();
    assert_eq!(config.path(), "tests::works");
    assert_eq!(config.name(), "Test works");
}

#[test]
fn test_reindexed_source_replaces_file() {
    let temp = workspace();
    let workspace = CargoWorkspace::load(&temp.path().join("Cargo.toml")).unwrap();
    let mut index = SourceIndex::for_workspace(&workspace).unwrap();
    let util = temp.path().join("net/src/util.rs");
    let file = index.file_id(&util).unwrap();

    {
        let oracle = IndexedWorkspace::new(&workspace, &index);
        let producer = TestProducer::new(&index, &oracle);
        let element = index.file_element(file).unwrap();
        assert!(producer.resolve(&[element], true).is_none());
    }

    let reindexed = index
        .add_source(util.clone(), "#[test]\nfn helper() {}\n", &workspace)
        .unwrap();
    assert_eq!(reindexed, file);

    let oracle = IndexedWorkspace::new(&workspace, &index);
    let producer = TestProducer::new(&index, &oracle);
    let helper = index.element_at(file, 1).unwrap();
    let config = producer.resolve(&[helper], true).unwrap();
    assert_eq!(config.path(), "util::helper");
    assert_eq!(config.name(), "Test helper");
}
