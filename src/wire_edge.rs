use crate::*;

// Wire edges extend dangling curve chains, one edge and one vertex at a
// time. Attaching to an isolated vertex reuses its degenerate chain:
//
//   before:  (v1) <-- pv1 <-- e0 (self-loop) <-- pe1 (unoriented)
//
//   after:   (v1) <-- pv1 <-- e0 --> pv2 --> (v2)
//                              |
//                         pe1 (forward) <-> pe2 (reversed)
//
// Attaching to any other vertex grows a fresh component: a new p-vertex
// on v1's ring, a new edge with a forward/reversed p-edge pair, and a new
// degenerate loop/face/p-face in a void shell of its own.

impl<V> PeMesh<V> {
    /// Extends a wire chain by one edge and one vertex, starting at `v1`.
    /// `v1` must live in `shell`'s region.
    pub fn create_wire_edge_and_vertex(
        &mut self,
        shell: ShellId,
        v1: VertexId,
        point: V,
    ) -> EdgeId {
        let region = self.shell(shell).parent_region.unwrap();

        if self.is_isolated(v1) {
            let pv1 = self.vertex(v1).pvertex.unwrap();
            let edge = self.pvertex(pv1).parent_edge.unwrap();
            let pe1 = self.edge(edge).parent_pedge.unwrap();
            let loop_ = self.pedge(pe1).parent_loop.unwrap();
            let pface = self
                .face(self.loop_(loop_).parent_face.unwrap())
                .parent_pface
                .unwrap();
            debug_assert!({
                let outer = self.region(region).outer_shell.unwrap();
                self.find_void_shell(outer, self.pface(pface).parent_shell.unwrap())
            });

            let v2 = self.alloc_vertex(Vertex {
                flavor: VertexFlavor::Normal,
                pvertex: None,
                point,
            });
            let pv2 = self.alloc_pvertex(PVertex::default());
            let pe2 = self.alloc_pedge(PEdge::default());

            self.vertex_mut(v2).pvertex = Some(pv2);
            *self.pvertex_mut(pv2) = PVertex {
                parent_edge: Some(edge),
                vertex: Some(v2),
                next_pvertex: Some(pv2),
            };

            // Unwrap the self-loop: the degenerate edge becomes the wire
            // edge, its unoriented p-edge the forward side of the pair.
            self.edge_mut(edge).end_pvertex = Some(pv2);
            *self.pedge_mut(pe1) = PEdge {
                orientation: PEdgeOrientation::Forward,
                parent_loop: Some(loop_),
                child_edge: Some(edge),
                start_pvertex: Some(pv1),
                loop_prev: Some(pe2),
                loop_next: Some(pe2),
                radial_prev: Some(pe2),
                radial_next: Some(pe2),
            };
            *self.pedge_mut(pe2) = PEdge {
                orientation: PEdgeOrientation::Reversed,
                parent_loop: Some(loop_),
                child_edge: Some(edge),
                start_pvertex: Some(pv2),
                loop_prev: Some(pe1),
                loop_next: Some(pe1),
                radial_prev: Some(pe1),
                radial_next: Some(pe1),
            };

            self.vertex_mut(v1).flavor = VertexFlavor::Normal;
            self.pface_mut(pface).orientation = PFaceOrientation::Wire;

            edge
        } else {
            let v2 = self.alloc_vertex(Vertex {
                flavor: VertexFlavor::Normal,
                pvertex: None,
                point,
            });
            let pv2 = self.alloc_pvertex(PVertex::default());
            let pv1b = self.alloc_pvertex(PVertex::default());
            let edge = self.alloc_edge(Edge {
                flavor: EdgeFlavor::Wire,
                parent_pedge: None,
                start_pvertex: None,
                end_pvertex: None,
            });

            self.vertex_mut(v2).pvertex = Some(pv2);
            *self.pvertex_mut(pv2) = PVertex {
                parent_edge: Some(edge),
                vertex: Some(v2),
                next_pvertex: Some(pv2),
            };

            // v1 keeps its existing uses and gains one for the new edge.
            self.vertex_ring_insert(v1, pv1b);
            self.pvertex_mut(pv1b).parent_edge = Some(edge);

            self.edge_mut(edge).start_pvertex = Some(pv1b);
            self.edge_mut(edge).end_pvertex = Some(pv2);

            self.wrap_wire_edge(region, edge, pv1b, pv2);
            edge
        }
    }

    /// Builds the degenerate apparatus around a bare wire edge: the
    /// forward/reversed p-edge pair, a loop, a face, an unmated p-face,
    /// and a void shell threaded off the region's outer shell.
    pub(crate) fn wrap_wire_edge(
        &mut self,
        region: RegionId,
        edge: EdgeId,
        start: PVertexId,
        end: PVertexId,
    ) {
        let pe_f = self.alloc_pedge(PEdge::default());
        let pe_r = self.alloc_pedge(PEdge::default());
        let loop_ = self.alloc_loop(Loop::default());
        let face = self.alloc_face(Face::default());
        let pface = self.alloc_pface(PFace {
            orientation: PFaceOrientation::Wire,
            parent_shell: None,
            child_face: None,
            next_pface: None,
            mate_pface: None,
        });
        let void_shell = self.alloc_shell(Shell::default());
        let outer = self.ensure_outer_shell(region);

        self.edge_mut(edge).parent_pedge = Some(pe_f);
        *self.pedge_mut(pe_f) = PEdge {
            orientation: PEdgeOrientation::Forward,
            parent_loop: Some(loop_),
            child_edge: Some(edge),
            start_pvertex: Some(start),
            loop_prev: Some(pe_r),
            loop_next: Some(pe_r),
            radial_prev: Some(pe_r),
            radial_next: Some(pe_r),
        };
        *self.pedge_mut(pe_r) = PEdge {
            orientation: PEdgeOrientation::Reversed,
            parent_loop: Some(loop_),
            child_edge: Some(edge),
            start_pvertex: Some(end),
            loop_prev: Some(pe_f),
            loop_next: Some(pe_f),
            radial_prev: Some(pe_f),
            radial_next: Some(pe_f),
        };

        *self.loop_mut(loop_) = Loop {
            parent_face: Some(face),
            boundary_pedge: Some(pe_f),
            next_hole: None,
        };
        *self.face_mut(face) = Face {
            parent_pface: Some(pface),
            outer_loop: Some(loop_),
        };

        let pf = self.pface_mut(pface);
        pf.parent_shell = Some(void_shell);
        pf.child_face = Some(face);
        pf.next_pface = Some(pface);

        *self.shell_mut(void_shell) = Shell {
            parent_region: Some(region),
            pface: Some(pface),
            next_void_shell: None,
        };
        self.add_void_shell(outer, void_shell);
    }

    /// Inverse of [`PeMesh::create_wire_edge_and_vertex`]; deletes a wire
    /// edge together with its chain-tip vertex and returns the point
    /// payload. `vertex` must be an endpoint of `edge` with no other
    /// incident edge. Deleting the last edge of a two-vertex component
    /// re-wraps the surviving vertex as isolated.
    pub fn delete_wire_edge_and_vertex(&mut self, edge: EdgeId, vertex: VertexId) -> V {
        debug_assert!(self.is_wire_edge(edge), "not a wire edge: {edge:?}");
        debug_assert!(
            self.edge_vertices(edge).contains(&vertex),
            "{vertex:?} is not an endpoint of {edge:?}"
        );
        debug_assert!(
            self.incident_edge_count(vertex) == 1,
            "{vertex:?} still has other incident edges"
        );

        let start = self.edge(edge).start_pvertex.unwrap();
        let end = self.edge(edge).end_pvertex.unwrap();
        let (pv_del, pv_keep) = if self.pvertex(start).vertex == Some(vertex) {
            (start, end)
        } else {
            (end, start)
        };
        let kept_vertex = self.pvertex(pv_keep).vertex.unwrap();

        let pe1 = self.edge(edge).parent_pedge.unwrap();
        let pe2 = self.pedge(pe1).radial_next.unwrap();
        debug_assert!(pe2 != pe1 && self.pedge(pe2).radial_next == Some(pe1));
        let loop_ = self.pedge(pe1).parent_loop.unwrap();
        let face = self.loop_(loop_).parent_face.unwrap();
        let pface = self.face(face).parent_pface.unwrap();

        if self.incident_edge_count(kept_vertex) == 1 {
            // Last edge of the component: re-wrap the survivor as an
            // isolated vertex, reusing the edge as its self-loop.
            let kept_pe = if self.pedge(pe1).start_pvertex == Some(pv_keep) {
                pe1
            } else {
                pe2
            };
            let dead_pe = if kept_pe == pe1 { pe2 } else { pe1 };

            *self.pedge_mut(kept_pe) = PEdge {
                orientation: PEdgeOrientation::Unoriented,
                parent_loop: Some(loop_),
                child_edge: Some(edge),
                start_pvertex: Some(pv_keep),
                loop_prev: Some(kept_pe),
                loop_next: Some(kept_pe),
                radial_prev: Some(kept_pe),
                radial_next: Some(kept_pe),
            };
            self.loop_mut(loop_).boundary_pedge = Some(kept_pe);

            let e = self.edge_mut(edge);
            e.parent_pedge = Some(kept_pe);
            e.start_pvertex = Some(pv_keep);
            e.end_pvertex = Some(pv_keep);

            self.vertex_mut(kept_vertex).flavor = VertexFlavor::Isolated;
            self.pface_mut(pface).orientation = PFaceOrientation::Isolated;

            self.free_pedge(dead_pe);
            self.free_pvertex(pv_del);
            self.free_vertex(vertex).point
        } else {
            // The chain continues past the kept vertex: tear down this
            // edge's whole component.
            let void_shell = self.pface(pface).parent_shell.unwrap();
            let region = self.shell(void_shell).parent_region.unwrap();
            let outer = self.region(region).outer_shell.unwrap();
            debug_assert!(self.shell(void_shell).pface == Some(pface));
            debug_assert!(self.pface(pface).mate_pface.is_none());

            self.vertex_ring_remove(kept_vertex, pv_keep);
            self.remove_void_shell(outer, void_shell);

            self.free_shell(void_shell);
            self.free_pface(pface);
            self.free_face(face);
            self.free_loop(loop_);
            self.free_pedge(pe1);
            self.free_pedge(pe2);
            self.free_pvertex(pv_keep);
            self.free_pvertex(pv_del);
            self.free_edge(edge);
            self.free_vertex(vertex).point
        }
    }
}
