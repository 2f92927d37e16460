use crate::*;

// Create/delete the empty region pair. A region starts with no shell at
// all; the outer shell appears lazily the first time content moves in and
// survives until the region itself is deleted.

impl<V> PeMesh<V> {
    pub fn create_empty_region(&mut self) -> RegionId {
        self.alloc_region(Region {
            flavor: RegionFlavor::Empty,
            outer_shell: None,
        })
    }

    /// Inverse of [`PeMesh::create_empty_region`]. Also reclaims the
    /// contentless outer shell left behind by emptying the region.
    pub fn delete_empty_region(&mut self, region: RegionId) {
        debug_assert!(
            self.region_is_empty(region),
            "must empty the region first: {region:?}"
        );
        let outer = self.region(region).outer_shell;
        if let Some(outer) = outer {
            self.free_shell(outer);
        }
        self.free_region(region);
    }
}
