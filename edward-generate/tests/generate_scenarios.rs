//! End-to-end `Generator` runs over real project trees, driven through
//! concurrent input/output pipes.

mod support;

use std::fs;
use std::path::Path;

use edward_core::{config, Configuration, Group, Service};
use edward_generate::{GenerateError, Outcome};
use support::{go_service, run, wrote_to, Run};
use tempfile::TempDir;

const SERVICE: &str = "edward-test-service";
const PROMPT_ONE: &str = "The following will be generated:\nServices:\n\tedward-test-service\nDo you wish to continue? [y/n]? ";

fn config_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("edward.json")
}

fn load(dir: &TempDir) -> Configuration {
    config::load(&config_path(dir)).expect("load config")
}

fn seed_config(dir: &TempDir, services: &[&str], groups: &[(&str, &[&str])]) {
    let mut cfg = Configuration::empty();
    for name in services {
        cfg.service_map
            .insert(name.to_string(), Service::new(*name).with_path(*name));
    }
    for (name, children) in groups {
        let mut group = Group::new(*name);
        group.services = children.iter().map(|c| c.to_string()).collect();
        cfg.group_map.insert(name.to_string(), group);
    }
    config::save(&config_path(dir), &cfg).expect("seed config");
}

fn children(cfg: &Configuration, group: &str) -> Vec<String> {
    cfg.group_map
        .get(group)
        .unwrap_or_else(|| panic!("group not found {group}"))
        .children()
}

// ---------------------------------------------------------------------------
// Literal scenarios
// ---------------------------------------------------------------------------

#[test]
fn existing_config_and_services_is_a_noop() {
    let dir = TempDir::new().unwrap();
    go_service(dir.path(), SERVICE);
    seed_config(&dir, &[SERVICE], &[]);
    let before = fs::read(config_path(&dir)).unwrap();

    for force in [false, true] {
        let cfg_path = config_path(&dir);
        let mut opts = Run::new(&cfg_path, dir.path());
        opts.force = force;
        let t = run(opts);
        assert_eq!(t.result.unwrap(), Outcome::NoChanges);
        assert_eq!(t.output, "No new services, groups or imports found\n");
        assert_eq!(fs::read(config_path(&dir)).unwrap(), before);
    }
}

#[test]
fn existing_empty_config_file_confirmed() {
    let dir = TempDir::new().unwrap();
    go_service(dir.path(), SERVICE);
    config::save(&config_path(&dir), &Configuration::empty()).unwrap();

    let cfg_path = config_path(&dir);
    let t = run(Run::new(&cfg_path, dir.path()).input("Y\n"));
    assert!(matches!(t.result.unwrap(), Outcome::Written(_)));
    assert_eq!(t.output, format!("{PROMPT_ONE}{}", wrote_to(dir.path())));
    assert_eq!(load(&dir).service_names(), vec![SERVICE]);
}

#[test]
fn new_config_and_service_confirmed() {
    let dir = TempDir::new().unwrap();
    go_service(dir.path(), SERVICE);

    let cfg_path = config_path(&dir);
    let t = run(Run::new(&cfg_path, dir.path()).input("Y\n"));
    let written = match t.result.unwrap() {
        Outcome::Written(path) => path,
        other => panic!("expected a write, got {other:?}"),
    };
    assert_eq!(written, dir.path().join("edward.json"));
    assert_eq!(t.output, format!("{PROMPT_ONE}{}", wrote_to(dir.path())));

    let cfg = load(&dir);
    assert_eq!(cfg.service_names(), vec![SERVICE]);
    assert_eq!(
        cfg.service_map[SERVICE].path.as_deref(),
        Some(Path::new(SERVICE))
    );
}

#[test]
fn new_config_and_service_forced() {
    let dir = TempDir::new().unwrap();
    go_service(dir.path(), SERVICE);

    let cfg_path = config_path(&dir);
    let t = run(Run::new(&cfg_path, dir.path()).force());
    assert!(t.result.is_ok());
    assert_eq!(t.output, wrote_to(dir.path()));
    assert_eq!(load(&dir).service_names(), vec![SERVICE]);
}

#[test]
fn duplicate_names_fail_without_writing() {
    let dir = TempDir::new().unwrap();
    go_service(dir.path(), &format!("a/{SERVICE}"));
    go_service(dir.path(), &format!("b/{SERVICE}"));

    let cfg_path = config_path(&dir);
    let t = run(Run::new(&cfg_path, dir.path()).force());
    let err = t.result.unwrap_err();
    assert!(matches!(err, GenerateError::DuplicateNames(_)));
    assert_eq!(
        err.to_string(),
        "Multiple services or groups were found with the names: edward-test-service"
    );
    assert!(t.output.is_empty());
    assert!(!config_path(&dir).exists());
}

#[test]
fn new_config_and_service_with_group() {
    let dir = TempDir::new().unwrap();
    go_service(dir.path(), SERVICE);

    let cfg_path = config_path(&dir);
    let t = run(Run::new(&cfg_path, dir.path()).group("newgroup").input("Y\n"));
    assert!(t.result.is_ok());
    assert_eq!(
        t.output,
        format!(
            "The following will be generated:\nServices:\n\tedward-test-service\nDo you wish to continue? [y/n]? {}",
            wrote_to(dir.path())
        )
    );

    let cfg = load(&dir);
    assert_eq!(cfg.service_names(), vec![SERVICE]);
    assert_eq!(children(&cfg, "newgroup"), vec![SERVICE]);
}

#[test]
fn new_service_added_to_existing_group() {
    let dir = TempDir::new().unwrap();
    go_service(dir.path(), SERVICE);
    go_service(dir.path(), "edward-test-service2");
    seed_config(&dir, &[SERVICE], &[("group1", &[SERVICE])]);

    let cfg_path = config_path(&dir);
    let t = run(Run::new(&cfg_path, dir.path()).group("group1").input("Y\n"));
    assert!(t.result.is_ok());
    assert_eq!(
        t.output,
        format!(
            "The following will be generated:\nServices:\n\tedward-test-service2\nDo you wish to continue? [y/n]? {}",
            wrote_to(dir.path())
        )
    );

    let cfg = load(&dir);
    assert_eq!(cfg.service_names(), vec![SERVICE, "edward-test-service2"]);
    assert_eq!(
        children(&cfg, "group1"),
        vec![SERVICE, "edward-test-service2"]
    );
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn second_run_is_idempotent() {
    let dir = TempDir::new().unwrap();
    go_service(dir.path(), SERVICE);
    go_service(dir.path(), "other");
    let cfg_path = config_path(&dir);

    run(Run::new(&cfg_path, dir.path()).force()).result.unwrap();
    let after_first = fs::read(&cfg_path).unwrap();

    let t = run(Run::new(&cfg_path, dir.path()).input("y\n"));
    assert_eq!(t.result.unwrap(), Outcome::NoChanges);
    assert_eq!(t.output, "No new services, groups or imports found\n");
    assert_eq!(fs::read(&cfg_path).unwrap(), after_first);
}

#[test]
fn summary_is_sorted_regardless_of_tree_layout() {
    let dir = TempDir::new().unwrap();
    go_service(dir.path(), "z/alpha");
    go_service(dir.path(), "a/zulu");
    go_service(dir.path(), "m/mike");

    let cfg_path = config_path(&dir);
    let t = run(Run::new(&cfg_path, dir.path()).input("n\n"));
    assert_eq!(t.result.unwrap(), Outcome::Declined);
    assert_eq!(
        t.output,
        "The following will be generated:\nServices:\n\talpha\n\tmike\n\tzulu\nDo you wish to continue? [y/n]? "
    );
    assert!(!cfg_path.exists());
}

#[test]
fn forced_and_confirmed_runs_write_identical_configs() {
    let forced = TempDir::new().unwrap();
    let confirmed = TempDir::new().unwrap();
    for dir in [&forced, &confirmed] {
        go_service(dir.path(), SERVICE);
        go_service(dir.path(), "svc-b");
        seed_config(dir, &[], &[("g", &[])]);
    }

    let forced_path = config_path(&forced);
    let confirmed_path = config_path(&confirmed);
    run(Run::new(&forced_path, forced.path()).group("g").force())
        .result
        .unwrap();
    run(Run::new(&confirmed_path, confirmed.path()).group("g").input("yes\n"))
        .result
        .unwrap();

    assert_eq!(
        fs::read_to_string(&forced_path).unwrap(),
        fs::read_to_string(&confirmed_path).unwrap()
    );
}

#[test]
fn duplicate_names_leave_existing_config_byte_identical() {
    let dir = TempDir::new().unwrap();
    go_service(dir.path(), &format!("a/{SERVICE}"));
    go_service(dir.path(), &format!("b/{SERVICE}"));
    seed_config(&dir, &["unrelated"], &[]);
    let before = fs::read(config_path(&dir)).unwrap();

    let cfg_path = config_path(&dir);
    let t = run(Run::new(&cfg_path, dir.path()).input("y\n"));
    assert!(matches!(t.result, Err(GenerateError::DuplicateNames(_))));
    assert_eq!(fs::read(config_path(&dir)).unwrap(), before);
}

#[test]
fn discovered_name_colliding_with_group_is_fatal() {
    let dir = TempDir::new().unwrap();
    go_service(dir.path(), "backend");
    seed_config(&dir, &[], &[("backend", &[])]);

    let cfg_path = config_path(&dir);
    let t = run(Run::new(&cfg_path, dir.path()).force());
    let err = t.result.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Multiple services or groups were found with the names: backend"
    );
}

#[test]
fn missing_target_is_a_discovery_error() {
    let dir = TempDir::new().unwrap();
    let cfg_path = config_path(&dir);
    let t = run(Run::new(&cfg_path, &dir.path().join("missing")).force());
    assert!(matches!(t.result, Err(GenerateError::Discovery { .. })));
    assert!(!cfg_path.exists());
}
