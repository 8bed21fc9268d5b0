//! Property tests for the resolution and layout laws.

use proptest::prelude::*;

use consign::infrastructure::memory::{
    GroupIdCustomerDirectory, MemoryArtifactStore, MemorySink, MemoryTreeStore, StaticCatalog,
    StaticTransformer,
};
use consign::{DeliveryMetadata, DeliveryPipeline, RequestContext};

fn file_names() -> impl Strategy<Value = Vec<String>> {
    let name = proptest::string::string_regex("[a-z][a-z0-9]{0,7}").unwrap();
    proptest::collection::hash_set(name, 1..6)
        .prop_map(|names| names.into_iter().collect::<Vec<_>>())
}

fn group_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9.]{0,10}").unwrap()
}

fn group_pair() -> impl Strategy<Value = (String, String)> {
    (group_name(), group_name()).prop_filter("groups must differ", |(a, b)| a != b)
}

fn resolve_described(
    tree: &MemoryTreeStore,
    artifacts: &MemoryArtifactStore,
    tokens: &[String],
) -> Vec<(String, String)> {
    let catalog = StaticCatalog::new();
    let transformer = StaticTransformer::new(b"wrapped");
    let customers = GroupIdCustomerDirectory::new();
    let pipeline = DeliveryPipeline::new(
        RequestContext::new(tree, artifacts),
        &catalog,
        &transformer,
        &customers,
        DeliveryMetadata::new("acme.delivery.c.TESTCLIENT", "a", "v"),
        "",
    );
    let described = pipeline
        .resolve(tokens)
        .unwrap()
        .iter()
        .map(|resource| {
            (
                resource.locator.path.clone(),
                resource.locator.classification.code().to_string(),
            )
        })
        .collect();
    described
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: resolving an unchanged token list against an unchanged
    /// store twice yields identical resource sets.
    #[test]
    fn property_resolution_is_idempotent(names in file_names()) {
        let mut tree = MemoryTreeStore::new("rev");
        for name in &names {
            tree.add_file(&format!("dir/{name}.txt"), name.as_bytes());
        }
        let artifacts = MemoryArtifactStore::new();
        let tokens: Vec<String> = names.iter().map(|name| format!("dir/{name}.txt")).collect();

        let first = resolve_described(&tree, &artifacts, &tokens);
        let second = resolve_described(&tree, &artifacts, &tokens);

        prop_assert_eq!(first, second);
    }

    /// PROPERTY: a path requested twice resolves to exactly one resource.
    #[test]
    fn property_dedup_keeps_one_resource_per_path(names in file_names()) {
        let mut tree = MemoryTreeStore::new("rev");
        for name in &names {
            tree.add_file(&format!("dir/{name}.txt"), name.as_bytes());
        }
        let artifacts = MemoryArtifactStore::new();
        let mut tokens: Vec<String> =
            names.iter().map(|name| format!("dir/{name}.txt")).collect();
        // request the first path a second time
        tokens.push(tokens[0].clone());

        let resolved = resolve_described(&tree, &artifacts, &tokens);

        prop_assert_eq!(resolved.len(), names.len());
        let mut paths: Vec<&String> = resolved.iter().map(|(path, _)| path).collect();
        paths.dedup();
        prop_assert_eq!(paths.len(), resolved.len());
    }

    /// PROPERTY: two artifacts sharing a basename are both placed under
    /// their group directories, never both at the bare basename.
    #[test]
    fn property_basename_collisions_are_separated(
        (g1, g2) in group_pair(),
        artifact in proptest::string::string_regex("[a-z][a-z0-9]{0,7}").unwrap(),
        version in proptest::string::string_regex("v[0-9]{1,4}").unwrap(),
    ) {
        let tree = MemoryTreeStore::new("rev");
        let mut artifacts = MemoryArtifactStore::new();
        let first = format!("{g1}:{artifact}:{version}:zip");
        let second = format!("{g2}:{artifact}:{version}:zip");
        artifacts.add_artifact(&first, b"1");
        artifacts.add_artifact(&second, b"2");

        let catalog = StaticCatalog::new();
        let transformer = StaticTransformer::new(b"wrapped");
        let customers = GroupIdCustomerDirectory::new();
        let pipeline = DeliveryPipeline::new(
            RequestContext::new(&tree, &artifacts),
            &catalog,
            &transformer,
            &customers,
            DeliveryMetadata::new("acme.delivery.c.TESTCLIENT", "a", "v"),
            "",
        );
        let mut sink = MemorySink::new();
        pipeline
            .run(&[first.clone(), second.clone()], &mut sink)
            .unwrap();

        let archive =
            zip::ZipArchive::new(std::io::Cursor::new(sink.archives()[0].1.clone())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        let basename = format!("{artifact}-{version}.zip");
        let first_placed = format!("{g1}/{basename}");
        let second_placed = format!("{g2}/{basename}");
        prop_assert!(names.contains(&first_placed.as_str()));
        prop_assert!(names.contains(&second_placed.as_str()));
        prop_assert!(!names.contains(&basename.as_str()));
    }
}
