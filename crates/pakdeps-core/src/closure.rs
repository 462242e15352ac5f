//! Dependency-closure resolution.
//!
//! Given seed packages, collects every package that has to travel with them:
//! a depth-first walk over the oracle's direct dependencies, pruning (and not
//! expanding) anything the [`ExclusionPolicy`] rejects or that lies outside
//! the seed's root scope.
//!
//! Each package is accepted and expanded at most once per resolve call, across
//! all seeds, so cyclic and diamond-shaped graphs terminate. An excluded
//! package is never marked visited; it is re-tested whenever another path
//! reaches it.

use crate::oracle::DependencyOracle;
use crate::package::PackageId;
use crate::policy::{ExclusionPolicy, Verdict};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Per-call traversal state: replaces process-wide accumulators.
#[derive(Debug, Default)]
struct ClosureContext {
    visited: BTreeSet<PackageId>,
    skipped_lookups: BTreeSet<PackageId>,
    stack: Vec<PackageId>,
}

/// Result of one resolve call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Closure {
    /// Seeds in the order they were first given.
    seeds: Vec<PackageId>,
    /// Dependencies collected while expanding each seed (seed excluded).
    per_seed: BTreeMap<PackageId, BTreeSet<PackageId>>,
    /// Every package included by this call, seeds included.
    visited: BTreeSet<PackageId>,
    /// Packages whose oracle query failed and were treated as leaves.
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    skipped_lookups: BTreeSet<PackageId>,
}

impl Closure {
    pub fn seeds(&self) -> &[PackageId] {
        &self.seeds
    }

    pub fn per_seed(&self) -> &BTreeMap<PackageId, BTreeSet<PackageId>> {
        &self.per_seed
    }

    /// Dependencies collected for `seed`. `None` if it was never a seed.
    pub fn dependencies_of(&self, seed: &PackageId) -> Option<&BTreeSet<PackageId>> {
        self.per_seed.get(seed)
    }

    /// The full set to migrate: seeds plus their collected dependencies.
    pub fn all(&self) -> &BTreeSet<PackageId> {
        &self.visited
    }

    /// Union of the per-seed sets (seeds not included unless pulled in
    /// as a dependency of an earlier seed).
    pub fn dependencies(&self) -> BTreeSet<PackageId> {
        self.per_seed.values().flatten().cloned().collect()
    }

    pub fn contains(&self, package: &PackageId) -> bool {
        self.visited.contains(package)
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    pub fn skipped_lookups(&self) -> &BTreeSet<PackageId> {
        &self.skipped_lookups
    }
}

/// Computes dependency closures against an oracle under an exclusion policy.
pub struct ClosureResolver<O> {
    oracle: O,
    policy: ExclusionPolicy,
}

impl<O: DependencyOracle> ClosureResolver<O> {
    pub fn new(oracle: O, policy: ExclusionPolicy) -> Self {
        Self { oracle, policy }
    }

    pub fn policy(&self) -> &ExclusionPolicy {
        &self.policy
    }

    pub fn resolve<I>(&self, seeds: I) -> Closure
    where
        I: IntoIterator<Item = PackageId>,
    {
        self.resolve_with_progress(seeds, |_, _| {})
    }

    /// Like [`resolve`](Self::resolve), calling `progress(index, seed)` as
    /// each seed is entered.
    pub fn resolve_with_progress<I, F>(&self, seeds: I, mut progress: F) -> Closure
    where
        I: IntoIterator<Item = PackageId>,
        F: FnMut(usize, &PackageId),
    {
        let mut ctx = ClosureContext::default();
        let mut closure = Closure::default();

        for (index, seed) in seeds.into_iter().enumerate() {
            progress(index, &seed);

            if closure.per_seed.contains_key(&seed) {
                continue;
            }
            closure.seeds.push(seed.clone());
            let mut collected = BTreeSet::new();

            // Seeds are never policy-tested, only deduplicated.
            if ctx.visited.insert(seed.clone()) {
                let root = seed.root_scope();
                self.expand(&mut ctx, &seed, &root, &mut collected);
            } else {
                tracing::debug!("seed {} already collected by an earlier seed", seed);
            }

            closure.per_seed.insert(seed, collected);
        }

        tracing::info!(
            "resolved {} seed(s) into {} package(s), {} failed lookup(s)",
            closure.seeds.len(),
            ctx.visited.len(),
            ctx.skipped_lookups.len()
        );

        closure.visited = ctx.visited;
        closure.skipped_lookups = ctx.skipped_lookups;
        closure
    }

    fn expand(
        &self,
        ctx: &mut ClosureContext,
        seed: &PackageId,
        root: &str,
        collected: &mut BTreeSet<PackageId>,
    ) {
        ctx.stack.push(seed.clone());

        while let Some(current) = ctx.stack.pop() {
            let deps = match self.oracle.direct_dependencies(&current) {
                Ok(deps) => deps,
                Err(e) => {
                    // Partially loaded registries are common mid-edit: treat as a leaf.
                    tracing::warn!("no dependency info for {}: {}", current, e);
                    ctx.skipped_lookups.insert(current);
                    continue;
                }
            };

            for dep in deps {
                if ctx.visited.contains(&dep) {
                    continue;
                }
                match self.policy.check(&dep, root) {
                    Verdict::Admitted => {
                        ctx.visited.insert(dep.clone());
                        collected.insert(dep.clone());
                        ctx.stack.push(dep);
                    }
                    Verdict::Excluded(prefix) => {
                        tracing::debug!("pruned {} (excluded prefix {})", dep, prefix);
                    }
                    Verdict::OutOfRoot => {
                        tracing::debug!("pruned {} (outside root {})", dep, root);
                    }
                }
            }
        }
    }
}

/// One-shot closure computation.
pub fn compute_closure<O, I>(oracle: O, policy: ExclusionPolicy, seeds: I) -> Closure
where
    O: DependencyOracle,
    I: IntoIterator<Item = PackageId>,
{
    ClosureResolver::new(oracle, policy).resolve(seeds)
}
