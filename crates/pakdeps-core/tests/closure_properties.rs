use pakdeps_core::closure::{Closure, ClosureResolver, compute_closure};
use pakdeps_core::package::PackageId;
use pakdeps_core::policy::ExclusionPolicy;
use pakdeps_core::registry::Registry;
use std::collections::BTreeSet;

fn make_registry(edges: &[(&str, &[&str])]) -> Registry {
    let mut registry = Registry::new();
    for (from, to) in edges {
        registry.insert_package(*from, to.iter().map(|t| PackageId::from(*t)));
    }
    registry
}

fn ids(names: &[&str]) -> BTreeSet<PackageId> {
    names.iter().map(|n| PackageId::from(*n)).collect()
}

fn seeds(names: &[&str]) -> Vec<PackageId> {
    names.iter().map(|n| PackageId::from(*n)).collect()
}

fn resolve(registry: &Registry, seed_names: &[&str]) -> Closure {
    compute_closure(registry, ExclusionPolicy::default(), seeds(seed_names))
}

#[test]
fn test_engine_and_script_dependencies_are_excluded_and_not_expanded() {
    let registry = make_registry(&[
        ("/Game/A", &["/Game/B", "/Engine/X", "/Script/Y"]),
        ("/Game/B", &["/Game/C"]),
        ("/Game/C", &[]),
        ("/Engine/X", &["/Game/FromEngine"]),
        ("/Script/Y", &["/Game/FromScript"]),
        ("/Game/FromEngine", &[]),
        ("/Game/FromScript", &[]),
    ]);

    let closure = resolve(&registry, &["/Game/A"]);
    assert_eq!(
        closure.dependencies_of(&"/Game/A".into()),
        Some(&ids(&["/Game/B", "/Game/C"]))
    );
    assert!(!closure.contains(&"/Game/FromEngine".into()));
    assert!(!closure.contains(&"/Game/FromScript".into()));
}

#[test]
fn test_root_scope_is_computed_per_seed() {
    let registry = make_registry(&[
        ("/Game/A", &["/Game/B"]),
        ("/Game/B", &[]),
        ("/Other/Z", &["/Game/Q"]),
        ("/Game/Q", &[]),
    ]);

    let closure = resolve(&registry, &["/Game/A", "/Other/Z"]);
    assert_eq!(
        closure.dependencies_of(&"/Game/A".into()),
        Some(&ids(&["/Game/B"]))
    );
    assert_eq!(
        closure.dependencies_of(&"/Other/Z".into()),
        Some(&BTreeSet::new())
    );
    assert!(!closure.contains(&"/Game/Q".into()));
}

#[test]
fn test_diamond_visits_shared_dependency_once() {
    let registry = make_registry(&[
        ("/Game/A", &["/Game/B", "/Game/C"]),
        ("/Game/B", &["/Game/D"]),
        ("/Game/C", &["/Game/D"]),
        ("/Game/D", &[]),
    ]);

    let closure = resolve(&registry, &["/Game/A"]);
    assert_eq!(
        closure.dependencies_of(&"/Game/A".into()),
        Some(&ids(&["/Game/B", "/Game/C", "/Game/D"]))
    );
    assert_eq!(closure.len(), 4);
}

#[test]
fn test_cycle_terminates() {
    let registry = make_registry(&[("/Game/A", &["/Game/B"]), ("/Game/B", &["/Game/A"])]);

    let closure = resolve(&registry, &["/Game/A"]);
    assert_eq!(closure.all(), &ids(&["/Game/A", "/Game/B"]));
    assert_eq!(
        closure.dependencies_of(&"/Game/A".into()),
        Some(&ids(&["/Game/B"]))
    );
}

#[test]
fn test_self_dependency_terminates() {
    let registry = make_registry(&[("/Game/A", &["/Game/A"])]);
    let closure = resolve(&registry, &["/Game/A"]);
    assert_eq!(closure.all(), &ids(&["/Game/A"]));
}

#[test]
fn test_resolve_is_idempotent() {
    let registry = make_registry(&[
        ("/Game/A", &["/Game/B", "/Game/C", "/Engine/E"]),
        ("/Game/B", &["/Game/C", "/Other/O"]),
        ("/Game/C", &["/Game/A"]),
        ("/Other/Z", &["/Other/Y"]),
        ("/Other/Y", &[]),
    ]);
    let resolver = ClosureResolver::new(&registry, ExclusionPolicy::default());

    let first = resolver.resolve(seeds(&["/Game/A", "/Other/Z"]));
    let second = resolver.resolve(seeds(&["/Game/A", "/Other/Z"]));
    assert_eq!(first, second);
}

#[test]
fn test_exclusion_is_a_cut_not_a_filter() {
    // /Game/Hidden is only reachable through an excluded node.
    let registry = make_registry(&[
        ("/Game/A", &["/Game/Vendor/Bridge"]),
        ("/Game/Vendor/Bridge", &["/Game/Hidden"]),
        ("/Game/Hidden", &[]),
    ]);
    let policy = ExclusionPolicy::default().with_prefix("/Game/Vendor");

    let closure = compute_closure(&registry, policy, seeds(&["/Game/A"]));
    assert!(!closure.contains(&"/Game/Hidden".into()));
    assert!(closure.dependencies_of(&"/Game/A".into()).unwrap().is_empty());
}

#[test]
fn test_excluded_package_reevaluated_on_another_path() {
    // /Other/Shared is out of /Game's root but inside /Other's root.
    let registry = make_registry(&[
        ("/Game/A", &["/Other/Shared"]),
        ("/Other/Z", &["/Other/Shared"]),
        ("/Other/Shared", &["/Other/Leaf"]),
        ("/Other/Leaf", &[]),
    ]);

    let closure = resolve(&registry, &["/Game/A", "/Other/Z"]);
    assert!(closure.dependencies_of(&"/Game/A".into()).unwrap().is_empty());
    assert_eq!(
        closure.dependencies_of(&"/Other/Z".into()),
        Some(&ids(&["/Other/Shared", "/Other/Leaf"]))
    );
}

#[test]
fn test_package_collected_by_first_seed_only() {
    let registry = make_registry(&[
        ("/Game/A", &["/Game/Shared"]),
        ("/Game/B", &["/Game/Shared"]),
        ("/Game/Shared", &[]),
    ]);

    let closure = resolve(&registry, &["/Game/A", "/Game/B"]);
    assert_eq!(
        closure.dependencies_of(&"/Game/A".into()),
        Some(&ids(&["/Game/Shared"]))
    );
    assert!(closure.dependencies_of(&"/Game/B".into()).unwrap().is_empty());
    assert_eq!(closure.dependencies(), ids(&["/Game/Shared"]));
}

#[test]
fn test_unknown_packages_become_leaves() {
    let registry = make_registry(&[
        ("/Game/A", &["/Game/NotInRegistry", "/Game/B"]),
        ("/Game/B", &[]),
    ]);

    let closure = resolve(&registry, &["/Game/A", "/Game/Missing"]);
    assert_eq!(
        closure.dependencies_of(&"/Game/A".into()),
        Some(&ids(&["/Game/NotInRegistry", "/Game/B"]))
    );
    assert_eq!(
        closure.skipped_lookups(),
        &ids(&["/Game/NotInRegistry", "/Game/Missing"])
    );
}

#[test]
fn test_top_level_seed_admits_every_rooted_path() {
    let registry = make_registry(&[
        ("/Loose", &["/Game/B", "/Engine/X"]),
        ("/Game/B", &[]),
    ]);

    let closure = resolve(&registry, &["/Loose"]);
    assert_eq!(
        closure.dependencies_of(&"/Loose".into()),
        Some(&ids(&["/Game/B"]))
    );
}

#[test]
fn test_case_folds_for_prefixes_but_not_identity() {
    let registry = make_registry(&[
        ("/Game/A", &["/Game/Tex/Wood", "/game/tex/wood", "/ENGINE/X"]),
        ("/Game/Tex/Wood", &[]),
        ("/game/tex/wood", &[]),
    ]);

    let closure = resolve(&registry, &["/Game/A"]);
    assert_eq!(
        closure.dependencies_of(&"/Game/A".into()),
        Some(&ids(&["/Game/Tex/Wood", "/game/tex/wood"]))
    );
}

#[test]
fn test_long_chain_does_not_overflow() {
    let mut registry = Registry::new();
    let depth = 50_000;
    for i in 0..depth {
        registry.insert_package(
            format!("/Game/N{}", i),
            [PackageId::new(format!("/Game/N{}", i + 1))],
        );
    }
    registry.insert_package(format!("/Game/N{}", depth), Vec::new());

    let closure = resolve(&registry, &["/Game/N0"]);
    assert_eq!(closure.len(), depth + 1);
}
