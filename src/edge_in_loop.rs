use crate::*;

// Spur insertion: splits a loop boundary open at an existing vertex and
// splices in a new edge out to a newly allocated vertex.
//
//   before:   ... d ->(v) a ...
//
//   after:    ... d ->(v) out ->(w) in ->(v) a ...
//
// Both new p-edges land in the same loop; the spur edge's radial ring is
// just the pair itself.

impl<V> PeMesh<V> {
    /// Splits the boundary of `loop_` at `vertex`, inserting a new edge
    /// to a new vertex carrying `point`. The loop's face must be a real
    /// face and `vertex` must lie on the loop.
    pub fn create_edge_in_loop(&mut self, loop_: LoopId, vertex: VertexId, point: V) -> EdgeId {
        let face = self.loop_(loop_).parent_face.unwrap();
        debug_assert!(
            !self.is_degenerate_face(face),
            "cannot split a degenerate loop: {loop_:?}"
        );

        let a = self
            .loop_ring(loop_)
            .find(|&pe| {
                let pv = self.pedge(pe).start_pvertex.unwrap();
                self.pvertex(pv).vertex == Some(vertex)
            })
            .expect("vertex is not on the loop");
        let d = self.pedge(a).loop_prev.unwrap();
        let pv_v = self.pedge(a).start_pvertex.unwrap();

        let w = self.alloc_vertex(Vertex {
            flavor: VertexFlavor::Normal,
            pvertex: None,
            point,
        });
        let pv_w = self.alloc_pvertex(PVertex::default());
        let edge = self.alloc_edge(Edge {
            flavor: EdgeFlavor::Normal,
            parent_pedge: None,
            start_pvertex: None,
            end_pvertex: None,
        });
        let pe_out = self.alloc_pedge(PEdge::default());
        let pe_in = self.alloc_pedge(PEdge::default());

        self.vertex_mut(w).pvertex = Some(pv_w);
        *self.pvertex_mut(pv_w) = PVertex {
            parent_edge: Some(edge),
            vertex: Some(w),
            next_pvertex: Some(pv_w),
        };

        let e = self.edge_mut(edge);
        e.parent_pedge = Some(pe_out);
        e.start_pvertex = Some(pv_v);
        e.end_pvertex = Some(pv_w);

        *self.pedge_mut(pe_out) = PEdge {
            orientation: PEdgeOrientation::Forward,
            parent_loop: Some(loop_),
            child_edge: Some(edge),
            start_pvertex: Some(pv_v),
            loop_prev: Some(d),
            loop_next: Some(pe_in),
            radial_prev: Some(pe_in),
            radial_next: Some(pe_in),
        };
        *self.pedge_mut(pe_in) = PEdge {
            orientation: PEdgeOrientation::Reversed,
            parent_loop: Some(loop_),
            child_edge: Some(edge),
            start_pvertex: Some(pv_w),
            loop_prev: Some(pe_out),
            loop_next: Some(a),
            radial_prev: Some(pe_out),
            radial_next: Some(pe_out),
        };
        self.pedge_mut(d).loop_next = Some(pe_out);
        self.pedge_mut(a).loop_prev = Some(pe_in);

        edge
    }

    /// Inverse of [`PeMesh::create_edge_in_loop`]: removes a spur edge
    /// whose far endpoint is singular, frees that vertex and returns its
    /// point payload.
    pub fn delete_edge_from_loop(&mut self, edge: EdgeId) -> V {
        debug_assert!(!self.is_wire_edge(edge), "wire edges have their own delete");

        let pe1 = self.edge(edge).parent_pedge.unwrap();
        let pe2 = self.pedge(pe1).radial_next.unwrap();
        debug_assert!(
            pe2 != pe1 && self.pedge(pe2).radial_next == Some(pe1),
            "not a spur: radial ring is not the bare pair"
        );
        debug_assert!(
            self.pedge(pe1).parent_loop == self.pedge(pe2).parent_loop,
            "not a spur: p-edges sit in different loops"
        );
        let loop_ = self.pedge(pe1).parent_loop.unwrap();

        let [v_near, v_far] = self.edge_vertices(edge);
        let (kept, tip) = if self.incident_edge_count(v_far) == 1 {
            (v_near, v_far)
        } else {
            (v_far, v_near)
        };
        debug_assert!(
            self.incident_edge_count(tip) == 1,
            "neither endpoint of {edge:?} is singular"
        );

        // The ring member following the spur survives; re-anchor the loop
        // and the kept vertex's representative edge on it.
        let after = {
            let next = self.pedge(pe2).loop_next.unwrap();
            if next == pe1 {
                self.pedge(pe1).loop_next.unwrap()
            } else {
                next
            }
        };
        debug_assert!(after != pe1 && after != pe2);

        self.unsplice_loop(pe2);
        self.unsplice_loop(pe1);
        let boundary = self.loop_(loop_).boundary_pedge.unwrap();
        if boundary == pe1 || boundary == pe2 {
            self.loop_mut(loop_).boundary_pedge = Some(after);
        }

        let tip_pv = self.vertex(tip).pvertex.unwrap();
        let kept_pv = if self.edge(edge).start_pvertex == Some(tip_pv) {
            self.edge(edge).end_pvertex.unwrap()
        } else {
            self.edge(edge).start_pvertex.unwrap()
        };
        if self.pvertex(kept_pv).parent_edge == Some(edge) {
            let replacement = self.pedge(after).child_edge.unwrap();
            debug_assert!(self.edge_vertices(replacement).contains(&kept));
            self.pvertex_mut(kept_pv).parent_edge = Some(replacement);
        }

        self.free_pedge(pe1);
        self.free_pedge(pe2);
        self.free_edge(edge);
        self.free_pvertex(tip_pv);
        self.free_vertex(tip).point
    }
}
