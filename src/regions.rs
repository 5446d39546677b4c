//! Fill topology reconstruction: partitions an unordered set of closed
//! subpaths into filled regions, each an outer boundary with its immediate
//! holes, under the even-odd rule.

use crate::path::SubPath;

/// One outer boundary plus the holes directly inside it. Every hole lies
/// entirely within the outer boundary; holes do not nest within each other
/// (a boundary nested two levels deep becomes its own region).
#[derive(Debug, Clone, PartialEq)]
pub struct FilledRegion {
    outer: SubPath,
    holes: Vec<SubPath>,
}

impl FilledRegion {
    pub fn outer(&self) -> &SubPath {
        &self.outer
    }

    pub fn holes(&self) -> &[SubPath] {
        &self.holes
    }

    /// Assembles the outer boundary and holes into one compound shape.
    /// Under even-odd fill the outer area renders solid and each hole stays
    /// unfilled; no geometry is computed here.
    pub fn to_compound_path(&self) -> CompoundPath {
        let mut subpaths = Vec::with_capacity(1 + self.holes.len());
        subpaths.push(self.outer.clone());
        subpaths.extend(self.holes.iter().cloned());
        CompoundPath { subpaths }
    }
}

/// Closed subpaths to be filled together with the even-odd rule, outer
/// boundary first.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundPath {
    subpaths: Vec<SubPath>,
}

impl CompoundPath {
    pub fn subpaths(&self) -> &[SubPath] {
        &self.subpaths
    }

    /// Even-odd membership across the whole compound: inside an odd number
    /// of boundaries means filled.
    pub fn fills(&self, p: crate::geometry::Point) -> bool {
        self.subpaths.iter().filter(|s| s.contains_point(p)).count() % 2 == 1
    }
}

/// The ordered regions produced for one traced image. Built once per trace,
/// immutable afterward.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathForest {
    regions: Vec<FilledRegion>,
}

impl PathForest {
    pub fn new(regions: Vec<FilledRegion>) -> Self {
        PathForest { regions }
    }

    pub fn regions(&self) -> &[FilledRegion] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Greedy forest building over subpaths sorted by bounding-box left edge.
///
/// The front of the sorted list cannot be contained by anything remaining,
/// so it is an outer boundary. Its holes are the contained subpaths minus
/// those a prior hole already contains; such grandchildren stay in the
/// master list and surface later as their own regions. The sort is stable,
/// so equal left edges keep input order.
pub fn group_filled_regions(subpaths: Vec<SubPath>) -> Vec<FilledRegion> {
    let mut pending = subpaths;
    pending.sort_by(|a, b| a.bounding_box().left().total_cmp(&b.bounding_box().left()));

    let mut regions = Vec::new();
    while !pending.is_empty() {
        let outer = pending.remove(0);
        let mut candidates: Vec<usize> = (0..pending.len())
            .filter(|&i| outer.contains(&pending[i]))
            .collect();

        // Candidate indices stay ascending: `retain` preserves order and we
        // always pop the front.
        let mut hole_indices = Vec::new();
        while !candidates.is_empty() {
            let hole = candidates.remove(0);
            candidates.retain(|&i| !pending[hole].contains(&pending[i]));
            hole_indices.push(hole);
        }

        let mut holes = Vec::with_capacity(hole_indices.len());
        for (removed, &i) in hole_indices.iter().enumerate() {
            holes.push(pending.remove(i - removed));
        }
        regions.push(FilledRegion { outer, holes });
    }
    regions
}
