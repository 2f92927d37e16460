use crate::*;

// Edge splitting and its inverse. The new vertex gets exactly one
// p-vertex, shared by both halves; every p-edge in the radial ring of the
// split edge gains a companion covering the second half, spliced into the
// same loop so each bounding loop grows by one member:
//
//   before:   (v1) ----------- e ----------> (v2)
//                    pe (per radial use)
//
//   after:    (v1) --- e ---> (w) --- e2 --> (v2)
//                    pe             pe2
//
// A forward companion follows its p-edge in loop order; a reversed one
// precedes it, because the loop walks the halves in the other order.

impl<V> PeMesh<V> {
    /// Splits a non-wire edge, inserting a new vertex carrying `point`.
    /// Returns the new vertex, which ends up between `edge` and the newly
    /// allocated second half.
    pub fn split_edge_create_vertex(&mut self, edge: EdgeId, point: V) -> VertexId {
        debug_assert!(!self.is_wire_edge(edge), "cannot split a wire edge");

        let old_end = self.edge(edge).end_pvertex.unwrap();
        let radial: Vec<PEdgeId> = self.radial_ring(edge).collect();

        let w = self.alloc_vertex(Vertex {
            flavor: VertexFlavor::Normal,
            pvertex: None,
            point,
        });
        let pv_w = self.alloc_pvertex(PVertex::default());
        let edge2 = self.alloc_edge(Edge {
            flavor: EdgeFlavor::Normal,
            parent_pedge: None,
            start_pvertex: None,
            end_pvertex: None,
        });

        self.vertex_mut(w).pvertex = Some(pv_w);
        *self.pvertex_mut(pv_w) = PVertex {
            parent_edge: Some(edge),
            vertex: Some(w),
            next_pvertex: Some(pv_w),
        };

        self.edge_mut(edge).end_pvertex = Some(pv_w);
        let e2 = self.edge_mut(edge2);
        e2.start_pvertex = Some(pv_w);
        e2.end_pvertex = Some(old_end);
        if self.pvertex(old_end).parent_edge == Some(edge) {
            self.pvertex_mut(old_end).parent_edge = Some(edge2);
        }

        let mut prev_companion: Option<PEdgeId> = None;
        for pedge in radial {
            let orientation = self.pedge(pedge).orientation;
            let loop_ = self.pedge(pedge).parent_loop;
            let companion = self.alloc_pedge(PEdge {
                orientation,
                parent_loop: loop_,
                child_edge: Some(edge2),
                ..Default::default()
            });

            match orientation {
                PEdgeOrientation::Forward => {
                    // pe keeps the v1 side; the companion picks up w -> v2.
                    self.pedge_mut(companion).start_pvertex = Some(pv_w);
                    self.splice_loop_after(pedge, companion);
                }
                PEdgeOrientation::Reversed => {
                    // The loop passes v2 -> w on the companion first, then
                    // w -> v1 on pe.
                    let old_start = self.pedge(pedge).start_pvertex;
                    self.pedge_mut(companion).start_pvertex = old_start;
                    self.pedge_mut(pedge).start_pvertex = Some(pv_w);
                    self.splice_loop_before(pedge, companion);
                }
                PEdgeOrientation::Unoriented => unreachable!("unoriented p-edge on a normal edge"),
            }

            match prev_companion {
                None => {
                    self.edge_mut(edge2).parent_pedge = Some(companion);
                    self.pedge_mut(companion).radial_prev = Some(companion);
                    self.pedge_mut(companion).radial_next = Some(companion);
                }
                Some(prev) => self.splice_radial_after(prev, companion),
            }
            prev_companion = Some(companion);
        }

        w
    }

    /// Inverse of [`PeMesh::split_edge_create_vertex`]: removes `vertex`
    /// and merges the edge following `edge` across it back into `edge`.
    /// `vertex` must have exactly two incident edges and a single
    /// p-vertex, and `edge` must be one of the two.
    pub fn delete_vertex_join_edge(&mut self, vertex: VertexId, edge: EdgeId) {
        let pv = self.vertex(vertex).pvertex.unwrap();
        debug_assert!(
            self.pvertex(pv).next_pvertex == Some(pv),
            "{vertex:?} has more than one p-vertex"
        );
        let incident = self.visit_vertex_edges(vertex);
        debug_assert!(
            incident.len() == 2 && incident.contains(&edge),
            "{vertex:?} is not a plain split point of {edge:?}"
        );
        let other = if incident[0] == edge {
            incident[1]
        } else {
            incident[0]
        };

        // Orient the merge so `edge` absorbs `other` across the vertex.
        let (absorbed_far, at_start) = if self.edge(edge).end_pvertex == Some(pv) {
            debug_assert!(self.edge(other).start_pvertex == Some(pv));
            (self.edge(other).end_pvertex.unwrap(), false)
        } else {
            debug_assert!(self.edge(edge).start_pvertex == Some(pv));
            debug_assert!(self.edge(other).end_pvertex == Some(pv));
            (self.edge(other).start_pvertex.unwrap(), true)
        };

        let companions: Vec<PEdgeId> = self.radial_ring(other).collect();
        for companion in companions {
            let record = self.pedge(companion);
            let orientation = record.orientation;
            let loop_ = record.parent_loop.unwrap();

            // The partner is the half that stays; it is loop-adjacent to
            // the companion across the deleted vertex.
            let partner = match (orientation, at_start) {
                (PEdgeOrientation::Forward, false) | (PEdgeOrientation::Reversed, true) => {
                    record.loop_prev.unwrap()
                }
                _ => record.loop_next.unwrap(),
            };
            debug_assert!(self.pedge(partner).child_edge == Some(edge));

            if self.pedge(partner).start_pvertex == Some(pv) {
                let source = self.pedge(companion).start_pvertex;
                self.pedge_mut(partner).start_pvertex = source;
            }
            if self.loop_(loop_).boundary_pedge == Some(companion) {
                self.loop_mut(loop_).boundary_pedge = Some(partner);
            }
            self.unsplice_loop(companion);
            self.free_pedge(companion);
        }

        if at_start {
            self.edge_mut(edge).start_pvertex = Some(absorbed_far);
        } else {
            self.edge_mut(edge).end_pvertex = Some(absorbed_far);
        }
        if self.pvertex(absorbed_far).parent_edge == Some(other) {
            self.pvertex_mut(absorbed_far).parent_edge = Some(edge);
        }

        self.free_edge(other);
        self.free_pvertex(pv);
        self.free_vertex(vertex);
    }
}
