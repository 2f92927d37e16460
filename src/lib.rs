//! A non-manifold boundary representation built on partial topological
//! entities (the radial-edge family of structures). One mesh can carry
//! isolated points, dangling wire curves, open sheets and closed solids
//! with internal voids, all in the same graph. Mutation goes through the
//! paired Euler operators; everything else is read-only traversal.

use std::fmt::{self, Debug, Formatter};

mod entity;
pub use entity::*;

mod cursors;
pub use cursors::*;

mod check;
pub use check::*;

mod dot;
pub use dot::*;

mod obj_export;
pub use obj_export::*;

#[cfg(feature = "obj_import")]
mod obj_import;

#[cfg(feature = "obj_import")]
pub use obj_import::*;

#[cfg(test)]
mod tests;

mod region;

mod isolated_vertex;

mod wire_edge;

mod edge_cycle;

mod edge_in_loop;

mod split_edge;

mod face_build;

/// The partial-entity mesh. `V` is the vertex point payload, stored but
/// never inspected.
pub struct PeMesh<V> {
    vertices: Pool<Vertex<V>>,
    pvertices: Pool<PVertex>,
    edges: Pool<Edge>,
    pedges: Pool<PEdge>,
    loops: Pool<Loop>,
    faces: Pool<Face>,
    pfaces: Pool<PFace>,
    shells: Pool<Shell>,
    regions: Pool<Region>,
}

impl<V> Default for PeMesh<V> {
    fn default() -> Self {
        Self {
            vertices: Default::default(),
            pvertices: Default::default(),
            edges: Default::default(),
            pedges: Default::default(),
            loops: Default::default(),
            faces: Default::default(),
            pfaces: Default::default(),
            shells: Default::default(),
            regions: Default::default(),
        }
    }
}

impl<V> PeMesh<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_isolated(&self, vertex: VertexId) -> bool {
        self.vertex(vertex).flavor == VertexFlavor::Isolated
    }

    pub fn is_wire_edge(&self, edge: EdgeId) -> bool {
        self.edge(edge).flavor == EdgeFlavor::Wire
    }

    /// A face is degenerate iff its p-face has no mate: it stands in for a
    /// wire edge or an isolated vertex rather than a real surface patch.
    pub fn is_degenerate_face(&self, face: FaceId) -> bool {
        let pface = self.face(face).parent_pface.unwrap();
        self.pface(pface).mate_pface.is_none()
    }

    /// True if the region has no content. A contentless outer shell does
    /// not count as content; `delete_empty_region` reclaims it.
    pub fn region_is_empty(&self, region: RegionId) -> bool {
        match self.region(region).outer_shell {
            None => true,
            Some(outer) => {
                let shell = self.shell(outer);
                shell.pface.is_none() && shell.next_void_shell.is_none()
            }
        }
    }

    pub fn edge_vertices(&self, edge: EdgeId) -> [VertexId; 2] {
        let edge = self.edge(edge);
        [edge.start_pvertex.unwrap(), edge.end_pvertex.unwrap()]
            .map(|pv| self.pvertex(pv).vertex.unwrap())
    }

    /// The boundary vertex sequence of a face's outer loop, one vertex per
    /// loop-ring p-edge. This is what display tessellation consumes.
    pub fn face_boundary(&self, face: FaceId) -> impl Iterator<Item = VertexId> + '_ {
        let loop_ = self.face(face).outer_loop.unwrap();
        self.loop_ring(loop_)
            .map(|pe| self.pvertex(self.pedge(pe).start_pvertex.unwrap()).vertex.unwrap())
    }

    pub(crate) fn ensure_outer_shell(&mut self, region: RegionId) -> ShellId {
        if let Some(outer) = self.region(region).outer_shell {
            return outer;
        }
        let outer = self.alloc_shell(Shell {
            parent_region: Some(region),
            ..Default::default()
        });
        self.region_mut(region).outer_shell = Some(outer);
        outer
    }

    // Void-shell list maintenance. Extra shells always hang off the
    // region's outer shell, never off each other.

    pub(crate) fn add_void_shell(&mut self, outer: ShellId, shell: ShellId) {
        let head = self.shell(outer).next_void_shell;
        self.shell_mut(shell).next_void_shell = head;
        self.shell_mut(outer).next_void_shell = Some(shell);
    }

    pub(crate) fn remove_void_shell(&mut self, outer: ShellId, shell: ShellId) {
        let mut cursor = outer;
        loop {
            let next = self.shell(cursor).next_void_shell;
            match next {
                Some(next) if next == shell => {
                    let after = self.shell(shell).next_void_shell;
                    self.shell_mut(cursor).next_void_shell = after;
                    self.shell_mut(shell).next_void_shell = None;
                    return;
                }
                Some(next) => cursor = next,
                None => {
                    debug_assert!(false, "shell is not on the void-shell list");
                    return;
                }
            }
        }
    }

    pub(crate) fn find_void_shell(&self, outer: ShellId, shell: ShellId) -> bool {
        self.void_shells(outer).any(|s| s == shell)
    }

    // Vertex ring maintenance (singly-linked cyclic).

    pub(crate) fn vertex_ring_insert(&mut self, vertex: VertexId, pvertex: PVertexId) {
        let head = self.vertex(vertex).pvertex;
        match head {
            None => {
                self.pvertex_mut(pvertex).next_pvertex = Some(pvertex);
                self.vertex_mut(vertex).pvertex = Some(pvertex);
            }
            Some(head) => {
                let next = self.pvertex(head).next_pvertex;
                self.pvertex_mut(pvertex).next_pvertex = next;
                self.pvertex_mut(head).next_pvertex = Some(pvertex);
            }
        }
        self.pvertex_mut(pvertex).vertex = Some(vertex);
    }

    pub(crate) fn vertex_ring_remove(&mut self, vertex: VertexId, pvertex: PVertexId) {
        let next = self.pvertex(pvertex).next_pvertex.unwrap();
        if next == pvertex {
            self.vertex_mut(vertex).pvertex = None;
            return;
        }
        let mut prev = next;
        while self.pvertex(prev).next_pvertex != Some(pvertex) {
            prev = self.pvertex(prev).next_pvertex.unwrap();
        }
        self.pvertex_mut(prev).next_pvertex = Some(next);
        if self.vertex(vertex).pvertex == Some(pvertex) {
            self.vertex_mut(vertex).pvertex = Some(next);
        }
    }

    // Loop-ring and radial-ring splicing (doubly-linked cyclic). The
    // splices work on singleton rings too.

    pub(crate) fn splice_loop_after(&mut self, at: PEdgeId, pedge: PEdgeId) {
        let next = self.pedge(at).loop_next.unwrap();
        self.pedge_mut(pedge).loop_prev = Some(at);
        self.pedge_mut(pedge).loop_next = Some(next);
        self.pedge_mut(at).loop_next = Some(pedge);
        self.pedge_mut(next).loop_prev = Some(pedge);
    }

    pub(crate) fn splice_loop_before(&mut self, at: PEdgeId, pedge: PEdgeId) {
        let prev = self.pedge(at).loop_prev.unwrap();
        self.splice_loop_after(prev, pedge);
    }

    pub(crate) fn unsplice_loop(&mut self, pedge: PEdgeId) {
        let prev = self.pedge(pedge).loop_prev.unwrap();
        let next = self.pedge(pedge).loop_next.unwrap();
        debug_assert!(next != pedge, "cannot unsplice a singleton loop ring");
        self.pedge_mut(prev).loop_next = Some(next);
        self.pedge_mut(next).loop_prev = Some(prev);
        self.pedge_mut(pedge).loop_prev = None;
        self.pedge_mut(pedge).loop_next = None;
    }

    pub(crate) fn splice_radial_after(&mut self, at: PEdgeId, pedge: PEdgeId) {
        let next = self.pedge(at).radial_next.unwrap();
        self.pedge_mut(pedge).radial_prev = Some(at);
        self.pedge_mut(pedge).radial_next = Some(next);
        self.pedge_mut(at).radial_next = Some(pedge);
        self.pedge_mut(next).radial_prev = Some(pedge);
    }
}

impl<V: Debug> Debug for PeMesh<V> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("PeMesh")
            .field("vertices", &self.vertex_count())
            .field("pvertices", &self.pvertex_count())
            .field("edges", &self.edge_count())
            .field("pedges", &self.pedge_count())
            .field("loops", &self.loop_count())
            .field("faces", &self.face_count())
            .field("pfaces", &self.pface_count())
            .field("shells", &self.shell_count())
            .field("regions", &self.region_count())
            .finish()
    }
}
