use crate::*;
use thiserror::Error;

// Read-only structure checker. Each check walks the cross-references of
// one entity and reports the first broken invariant together with the
// offending handle. The `validate_*` wrappers reduce that to a boolean
// and raise a debug assertion naming the failure, so tests and debug
// builds stop at the first corruption. Nothing here is called on any
// production path.

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckError {
    #[error("{0:?}: handle is dangling")]
    Dangling(EntityRef),
    #[error("{0:?}: no parent p-vertex")]
    VertexWithoutParent(VertexId),
    #[error("{pvertex:?} on the ring of {vertex:?} does not point back to it")]
    VertexRingMismatch { vertex: VertexId, pvertex: PVertexId },
    #[error("vertex ring of {0:?} does not close")]
    VertexRingOpen(VertexId),
    #[error("{0:?} is isolated but its edge is not a self-loop")]
    IsolatedVertexNotSelfLooped(VertexId),
    #[error("{0:?}: no parent edge")]
    PVertexWithoutEdge(PVertexId),
    #[error("{0:?}: parent edge does not end at this p-vertex")]
    PVertexNotOnParentEdge(PVertexId),
    #[error("{0:?}: no child vertex")]
    PVertexWithoutVertex(PVertexId),
    #[error("{0:?}: no parent p-edge")]
    EdgeWithoutParent(EdgeId),
    #[error("{0:?}: missing an end p-vertex")]
    EdgeEndMissing(EdgeId),
    #[error("{pedge:?} on the radial ring of {edge:?} has the wrong child edge")]
    RadialRingMismatch { edge: EdgeId, pedge: PEdgeId },
    #[error("radial links of {0:?} are not mutually inverse")]
    RadialRingBroken(PEdgeId),
    #[error("radial ring of {0:?} does not close")]
    RadialRingOpen(EdgeId),
    #[error("{0:?}: no parent loop")]
    PEdgeWithoutLoop(PEdgeId),
    #[error("{0:?}: no child edge")]
    PEdgeWithoutEdge(PEdgeId),
    #[error("{0:?} is not on its parent loop's ring")]
    PEdgeNotInParentLoop(PEdgeId),
    #[error("{0:?}: no boundary p-edge")]
    LoopWithoutBoundary(LoopId),
    #[error("loop links of {0:?} are not mutually inverse")]
    LoopRingBroken(PEdgeId),
    #[error("loop ring of {0:?} does not close")]
    LoopRingOpen(LoopId),
    #[error("{pedge:?} on the ring of {loop_:?} belongs to another loop")]
    LoopRingMismatch { loop_: LoopId, pedge: PEdgeId },
    #[error("{0:?}: no outer loop")]
    FaceWithoutLoop(FaceId),
    #[error("{0:?}: outer loop does not point back to this face")]
    FaceLoopMismatch(FaceId),
    #[error("{0:?}: no parent p-face")]
    FaceWithoutParent(FaceId),
    #[error("{0:?}: parent p-face has the wrong child face")]
    FacePFaceMismatch(FaceId),
    #[error("{0:?}: no parent shell")]
    PFaceWithoutShell(PFaceId),
    #[error("shell ring of {0:?} does not close")]
    ShellRingOpen(ShellId),
    #[error("{0:?}: mate's mate is not this p-face")]
    MateAsymmetric(PFaceId),
    #[error("{0:?} is degenerate but has a mate")]
    MateOnDegenerate(PFaceId),
    #[error("{0:?} is oriented but has no mate")]
    MateMissing(PFaceId),
    #[error("{0:?}: no parent region")]
    ShellWithoutRegion(ShellId),
    #[error("void shell {shell:?} does not belong to {region:?}")]
    VoidShellWrongRegion { region: RegionId, shell: ShellId },
    #[error("{0:?}: outer shell does not point back to this region")]
    RegionShellMismatch(RegionId),
    #[error("edge cycle is broken between {0:?} and {1:?}")]
    CycleBroken(EdgeId, EdgeId),
    #[error("edge cycle does not return to its first vertex")]
    CycleNotClosed,
}

/// An entity handle of any kind, for dangling-reference reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef {
    Vertex(VertexId),
    PVertex(PVertexId),
    Edge(EdgeId),
    PEdge(PEdgeId),
    Loop(LoopId),
    Face(FaceId),
    PFace(PFaceId),
    Shell(ShellId),
    Region(RegionId),
}

use CheckError::*;

fn wrap(result: Result<(), CheckError>) -> bool {
    match result {
        Ok(()) => true,
        Err(error) => {
            debug_assert!(false, "validation failed: {error}");
            false
        }
    }
}

impl<V> PeMesh<V> {
    /// Checks every entity in every pool. Test tool, not a runtime guard.
    pub fn validate(&self) -> bool {
        wrap(self.check_mesh())
    }

    pub fn validate_vertex(&self, vertex: VertexId) -> bool {
        wrap(self.check_vertex(vertex))
    }

    pub fn validate_pvertex(&self, pvertex: PVertexId) -> bool {
        wrap(self.check_pvertex(pvertex))
    }

    pub fn validate_edge(&self, edge: EdgeId) -> bool {
        wrap(self.check_edge(edge))
    }

    pub fn validate_pedge(&self, pedge: PEdgeId) -> bool {
        wrap(self.check_pedge(pedge))
    }

    pub fn validate_loop(&self, loop_: LoopId) -> bool {
        wrap(self.check_loop(loop_))
    }

    pub fn validate_face(&self, face: FaceId) -> bool {
        wrap(self.check_face(face))
    }

    pub fn validate_pface(&self, pface: PFaceId) -> bool {
        wrap(self.check_pface(pface))
    }

    pub fn validate_shell(&self, shell: ShellId) -> bool {
        wrap(self.check_shell(shell))
    }

    pub fn validate_region(&self, region: RegionId) -> bool {
        wrap(self.check_region(region))
    }

    /// Checks that `edges` forms a closed, vertex-connected cycle.
    pub fn validate_edge_cycle(&self, edges: &[EdgeId]) -> bool {
        wrap(self.check_edge_cycle(edges))
    }

    pub fn check_mesh(&self) -> Result<(), CheckError> {
        for (id, _) in self.vertices() {
            self.check_vertex(id)?;
        }
        for (id, _) in self.pvertices() {
            self.check_pvertex(id)?;
        }
        for (id, _) in self.edges() {
            self.check_edge(id)?;
        }
        for (id, _) in self.pedges() {
            self.check_pedge(id)?;
        }
        for (id, _) in self.loops() {
            self.check_loop(id)?;
        }
        for (id, _) in self.faces() {
            self.check_face(id)?;
        }
        for (id, _) in self.pfaces() {
            self.check_pface(id)?;
        }
        for (id, _) in self.shells() {
            self.check_shell(id)?;
        }
        for (id, _) in self.regions() {
            self.check_region(id)?;
        }
        Ok(())
    }

    pub fn check_vertex(&self, vertex: VertexId) -> Result<(), CheckError> {
        let record = self.try_vertex(vertex).ok_or(Dangling(EntityRef::Vertex(vertex)))?;
        let head = record.pvertex.ok_or(VertexWithoutParent(vertex))?;

        // The chain of p-vertices around the vertex must close and every
        // member must point back down.
        let mut cursor = head;
        for _ in 0..=self.pvertex_count() {
            let pv = self
                .try_pvertex(cursor)
                .ok_or(Dangling(EntityRef::PVertex(cursor)))?;
            if pv.vertex != Some(vertex) {
                return Err(VertexRingMismatch {
                    vertex,
                    pvertex: cursor,
                });
            }
            cursor = pv.next_pvertex.ok_or(VertexRingOpen(vertex))?;
            if cursor == head {
                break;
            }
        }
        if cursor != head {
            return Err(VertexRingOpen(vertex));
        }

        if record.flavor == VertexFlavor::Isolated {
            let edge = self
                .try_pvertex(head)
                .unwrap()
                .parent_edge
                .ok_or(PVertexWithoutEdge(head))?;
            let edge = self.try_edge(edge).ok_or(Dangling(EntityRef::Edge(edge)))?;
            if edge.start_pvertex != Some(head) || edge.end_pvertex != Some(head) {
                return Err(IsolatedVertexNotSelfLooped(vertex));
            }
        }
        Ok(())
    }

    pub fn check_pvertex(&self, pvertex: PVertexId) -> Result<(), CheckError> {
        let record = self
            .try_pvertex(pvertex)
            .ok_or(Dangling(EntityRef::PVertex(pvertex)))?;
        let edge = record.parent_edge.ok_or(PVertexWithoutEdge(pvertex))?;
        let edge = self.try_edge(edge).ok_or(Dangling(EntityRef::Edge(edge)))?;
        if edge.start_pvertex != Some(pvertex) && edge.end_pvertex != Some(pvertex) {
            return Err(PVertexNotOnParentEdge(pvertex));
        }
        record.vertex.ok_or(PVertexWithoutVertex(pvertex))?;
        Ok(())
    }

    pub fn check_edge(&self, edge: EdgeId) -> Result<(), CheckError> {
        let record = self.try_edge(edge).ok_or(Dangling(EntityRef::Edge(edge)))?;
        let head = record.parent_pedge.ok_or(EdgeWithoutParent(edge))?;
        record.start_pvertex.ok_or(EdgeEndMissing(edge))?;
        record.end_pvertex.ok_or(EdgeEndMissing(edge))?;

        // Radial ring: closes, next/prev mutually inverse, all members
        // share this child edge.
        let mut cursor = head;
        for _ in 0..=self.pedge_count() {
            let pe = self
                .try_pedge(cursor)
                .ok_or(Dangling(EntityRef::PEdge(cursor)))?;
            if pe.child_edge != Some(edge) {
                return Err(RadialRingMismatch {
                    edge,
                    pedge: cursor,
                });
            }
            let next = pe.radial_next.ok_or(RadialRingOpen(edge))?;
            let back = self
                .try_pedge(next)
                .ok_or(Dangling(EntityRef::PEdge(next)))?
                .radial_prev;
            if back != Some(cursor) {
                return Err(RadialRingBroken(cursor));
            }
            cursor = next;
            if cursor == head {
                break;
            }
        }
        if cursor != head {
            return Err(RadialRingOpen(edge));
        }
        Ok(())
    }

    pub fn check_pedge(&self, pedge: PEdgeId) -> Result<(), CheckError> {
        let record = self
            .try_pedge(pedge)
            .ok_or(Dangling(EntityRef::PEdge(pedge)))?;
        let loop_ = record.parent_loop.ok_or(PEdgeWithoutLoop(pedge))?;
        self.try_loop(loop_).ok_or(Dangling(EntityRef::Loop(loop_)))?;
        if !self.loop_ring(loop_).any(|pe| pe == pedge) {
            return Err(PEdgeNotInParentLoop(pedge));
        }
        let edge = record.child_edge.ok_or(PEdgeWithoutEdge(pedge))?;
        let parent = self
            .try_edge(edge)
            .ok_or(Dangling(EntityRef::Edge(edge)))?
            .parent_pedge
            .ok_or(EdgeWithoutParent(edge))?;
        if !self.radial_ring_at(parent).any(|pe| pe == pedge) {
            return Err(RadialRingMismatch { edge, pedge });
        }
        Ok(())
    }

    pub fn check_loop(&self, loop_: LoopId) -> Result<(), CheckError> {
        let record = self.try_loop(loop_).ok_or(Dangling(EntityRef::Loop(loop_)))?;
        let head = record.boundary_pedge.ok_or(LoopWithoutBoundary(loop_))?;

        let mut cursor = head;
        for _ in 0..=self.pedge_count() {
            let pe = self
                .try_pedge(cursor)
                .ok_or(Dangling(EntityRef::PEdge(cursor)))?;
            if pe.parent_loop != Some(loop_) {
                return Err(LoopRingMismatch {
                    loop_,
                    pedge: cursor,
                });
            }
            let next = pe.loop_next.ok_or(LoopRingOpen(loop_))?;
            let back = self
                .try_pedge(next)
                .ok_or(Dangling(EntityRef::PEdge(next)))?
                .loop_prev;
            if back != Some(cursor) {
                return Err(LoopRingBroken(cursor));
            }
            cursor = next;
            if cursor == head {
                break;
            }
        }
        if cursor != head {
            return Err(LoopRingOpen(loop_));
        }
        Ok(())
    }

    pub fn check_face(&self, face: FaceId) -> Result<(), CheckError> {
        let record = self.try_face(face).ok_or(Dangling(EntityRef::Face(face)))?;
        let loop_ = record.outer_loop.ok_or(FaceWithoutLoop(face))?;
        let loop_record = self.try_loop(loop_).ok_or(Dangling(EntityRef::Loop(loop_)))?;
        if loop_record.parent_face != Some(face) {
            return Err(FaceLoopMismatch(face));
        }
        let pface = record.parent_pface.ok_or(FaceWithoutParent(face))?;
        let pface_record = self
            .try_pface(pface)
            .ok_or(Dangling(EntityRef::PFace(pface)))?;
        if pface_record.child_face != Some(face) {
            return Err(FacePFaceMismatch(face));
        }
        Ok(())
    }

    pub fn check_pface(&self, pface: PFaceId) -> Result<(), CheckError> {
        let record = self
            .try_pface(pface)
            .ok_or(Dangling(EntityRef::PFace(pface)))?;
        let shell = record.parent_shell.ok_or(PFaceWithoutShell(pface))?;
        self.try_shell(shell).ok_or(Dangling(EntityRef::Shell(shell)))?;

        // A mate exists iff the p-face is really two-sided, and mating is
        // symmetric.
        match record.orientation {
            PFaceOrientation::Forward | PFaceOrientation::Reversed => {
                let mate = record.mate_pface.ok_or(MateMissing(pface))?;
                let mate_record = self.try_pface(mate).ok_or(Dangling(EntityRef::PFace(mate)))?;
                if mate_record.mate_pface != Some(pface) {
                    return Err(MateAsymmetric(pface));
                }
                if mate_record.child_face != record.child_face {
                    return Err(MateAsymmetric(pface));
                }
            }
            PFaceOrientation::Wire | PFaceOrientation::Isolated => {
                if record.mate_pface.is_some() {
                    return Err(MateOnDegenerate(pface));
                }
            }
        }
        Ok(())
    }

    pub fn check_shell(&self, shell: ShellId) -> Result<(), CheckError> {
        let record = self.try_shell(shell).ok_or(Dangling(EntityRef::Shell(shell)))?;
        let region = record.parent_region.ok_or(ShellWithoutRegion(shell))?;
        self.try_region(region)
            .ok_or(Dangling(EntityRef::Region(region)))?;

        if let Some(head) = record.pface {
            let mut cursor = head;
            for _ in 0..=self.pface_count() {
                let pf = self
                    .try_pface(cursor)
                    .ok_or(Dangling(EntityRef::PFace(cursor)))?;
                if pf.parent_shell != Some(shell) {
                    return Err(PFaceWithoutShell(cursor));
                }
                cursor = pf.next_pface.ok_or(ShellRingOpen(shell))?;
                if cursor == head {
                    break;
                }
            }
            if cursor != head {
                return Err(ShellRingOpen(shell));
            }
        }
        Ok(())
    }

    pub fn check_region(&self, region: RegionId) -> Result<(), CheckError> {
        let record = self
            .try_region(region)
            .ok_or(Dangling(EntityRef::Region(region)))?;
        let Some(outer) = record.outer_shell else {
            return Ok(());
        };
        let outer_record = self.try_shell(outer).ok_or(Dangling(EntityRef::Shell(outer)))?;
        if outer_record.parent_region != Some(region) {
            return Err(RegionShellMismatch(region));
        }
        for shell in self.void_shells(outer) {
            let record = self.try_shell(shell).ok_or(Dangling(EntityRef::Shell(shell)))?;
            if record.parent_region != Some(region) {
                return Err(VoidShellWrongRegion { region, shell });
            }
        }
        Ok(())
    }

    pub fn check_edge_cycle(&self, edges: &[EdgeId]) -> Result<(), CheckError> {
        debug_assert!(edges.len() >= 2);

        // Walk the chain, carrying the vertex each consecutive pair must
        // share, and come back to where we started.
        let [first_a, first_b] = self.edge_vertices(edges[0]);
        let second = self.edge_vertices(edges[1]);
        let (start, mut cursor) = if second.contains(&first_b) {
            (first_a, first_b)
        } else {
            (first_b, first_a)
        };

        for pair in edges.windows(2) {
            let [a, b] = self.edge_vertices(pair[1]);
            cursor = if cursor == a {
                b
            } else if cursor == b {
                a
            } else {
                return Err(CycleBroken(pair[0], pair[1]));
            };
        }
        if cursor != start {
            return Err(CycleNotClosed);
        }
        Ok(())
    }
}
