//! Archive layout and assembly scenarios: naming rules, the manifest
//! document, boilerplate appending and the archiver failure modes.

mod common;

use common::{entry_content, entry_names, manifest, tokens, Fixture};
use consign::infrastructure::memory::MemorySink;
use consign::{ArchiveError, BuildError};

#[test]
fn artifacts_are_placed_under_their_basenames() {
    let mut fixture = Fixture::new();
    fixture.artifacts.add_artifact("g:a:v:zip", b"a");
    fixture.artifacts.add_artifact("g1:a1:v1", b"b");

    let (_, bytes) = fixture.run(&["g:a:v:zip", "g1:a1:v1"]).unwrap();

    assert_eq!(
        entry_names(&bytes),
        vec!["a-v.zip", "a1-v1.jar", "delivery_info.json"]
    );
}

#[test]
fn colliding_basenames_are_separated_by_group() {
    let mut fixture = Fixture::new();
    fixture.artifacts.add_artifact("g1:a:v:zip", b"1");
    fixture.artifacts.add_artifact("g2:a:v:zip", b"2");
    fixture.artifacts.add_artifact("g3:foo:bar:zip", b"3");

    let (_, bytes) = fixture
        .run(&["g1:a:v:zip", "g2:a:v:zip", "g3:foo:bar:zip"])
        .unwrap();

    assert_eq!(
        entry_names(&bytes),
        vec![
            "delivery_info.json",
            "foo-bar.zip",
            "g1/a-v.zip",
            "g2/a-v.zip"
        ]
    );
    assert_eq!(entry_content(&bytes, "g1/a-v.zip"), b"1");
    assert_eq!(entry_content(&bytes, "g2/a-v.zip"), b"2");
}

#[test]
fn installer_artifact_is_placed_unversioned() {
    let mut fixture = Fixture::new();
    fixture.artifacts.add_artifact("com.ow:load_sql:v123:ssp", b"sql");

    let (_, bytes) = fixture.run(&["com.ow:load_sql:v123:ssp"]).unwrap();

    assert_eq!(entry_names(&bytes), vec!["delivery_info.json", "load_sql.ssp"]);
}

#[test]
fn tree_files_mirror_their_branch_paths() {
    let mut fixture = Fixture::new();
    fixture.tree.add_file("a.txt", b"a");
    fixture.tree.add_file("b/c.txt", b"c");

    let (_, bytes) = fixture.run(&["a.txt", "b/c.txt"]).unwrap();

    assert_eq!(
        entry_names(&bytes),
        vec!["a.txt", "b/c.txt", "delivery_info.json"]
    );
}

#[test]
fn tree_prefix_mismatch_fails_the_build() {
    let mut fixture = Fixture::new();
    fixture.tree.add_file("c/file1.txt", b"1");
    fixture.tree_prefix = "branch/".to_string();

    let err = fixture.run(&["c/file1.txt"]).unwrap_err();

    assert!(matches!(
        err,
        BuildError::Archive(ArchiveError::PrefixMismatch { .. })
    ));
}

#[test]
fn building_an_empty_resource_set_fails() {
    let fixture = Fixture::new();
    let mut sink = MemorySink::new();

    let err = fixture.pipeline().build(Vec::new(), &mut sink).unwrap_err();

    assert!(matches!(
        err,
        BuildError::Archive(ArchiveError::EmptyDelivery)
    ));
    assert!(sink.archives().is_empty());
}

#[test]
fn manifest_lists_every_placed_resource() {
    let mut fixture = Fixture::new();
    fixture.tree.add_file("a.txt", b"a");
    fixture.artifacts.add_artifact("g:a:v:zip", b"z");

    let (_, bytes) = fixture.run(&["a.txt", "g:a:v:zip"]).unwrap();
    let document = manifest(&bytes);

    assert_eq!(document["deliveryId"], "TESTCLIENT:TESTCLIENT-fixes:v1");
    let files = document["deliveryFiles"].as_array().unwrap();
    let mut described: Vec<(String, String)> = files
        .iter()
        .map(|entry| {
            (
                entry["path"].as_str().unwrap().to_string(),
                entry["citype"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    described.sort();
    assert_eq!(
        described,
        vec![
            ("a-v.zip".to_string(), "FILE".to_string()),
            ("a.txt".to_string(), "TREEFILE".to_string())
        ]
    );
}

#[test]
fn boilerplate_is_appended_when_toggled_on() {
    let dir = tempfile::tempdir().unwrap();
    let legal = dir.path().join("legal.txt");
    std::fs::write(&legal, b"(c) respective owners").unwrap();

    let mut fixture = Fixture::new();
    fixture.artifacts.add_artifact("g:a:v:zip", b"z");
    fixture.customers = fixture
        .customers
        .clone()
        .with_boilerplate("TESTCLIENT", legal);
    fixture.options.append_boilerplate = true;

    let (_, bytes) = fixture.run(&["g:a:v:zip"]).unwrap();

    assert_eq!(
        entry_names(&bytes),
        vec!["Copyright", "a-v.zip", "delivery_info.json"]
    );
    assert_eq!(entry_content(&bytes, "Copyright"), b"(c) respective owners");
}

#[test]
fn boilerplate_stays_off_by_default() {
    let mut fixture = Fixture::new();
    fixture.artifacts.add_artifact("g:a:v:zip", b"z");

    let (_, bytes) = fixture.run(&["g:a:v:zip"]).unwrap();

    assert!(!entry_names(&bytes).contains(&"Copyright".to_string()));
}

#[test]
fn archive_work_name_is_stable_across_builds() {
    let mut fixture = Fixture::new();
    fixture.artifacts.add_artifact("g:a:v:zip", b"z");

    let (first, _) = fixture.run(&["g:a:v:zip"]).unwrap();
    let (second, _) = fixture.run(&["g:a:v:zip"]).unwrap();

    assert_eq!(first, second);
    assert!(first.name.ends_with(".zip"));
}

#[test]
fn resolve_then_build_matches_run() {
    let mut fixture = Fixture::new();
    fixture.tree.add_file("a.txt", b"a");

    let pipeline = fixture.pipeline();
    let resources = pipeline.resolve(&tokens(&["a.txt"])).unwrap();
    let mut sink = MemorySink::new();
    pipeline.build(resources, &mut sink).unwrap();

    let (_, bytes) = fixture.run(&["a.txt"]).unwrap();
    assert_eq!(entry_names(&sink.archives()[0].1), entry_names(&bytes));
}
