use crate::*;

// A cycle-closing wire edge: connects two existing vertices without
// allocating a vertex. The new edge gets the same degenerate apparatus as
// any other wire edge; what makes a cycle a cycle is only the vertex
// connectivity, which `check_edge_cycle` can verify across a whole chain.

impl<V> PeMesh<V> {
    /// Creates a wire edge from `v_from` to `v_to`. An isolated endpoint
    /// first has its degenerate self-loop torn down.
    pub fn make_edge_cycle(&mut self, shell: ShellId, v_from: VertexId, v_to: VertexId) -> EdgeId {
        debug_assert!(v_from != v_to, "cycle edge needs two distinct vertices");
        let region = self.shell(shell).parent_region.unwrap();

        let pv_from = self.alloc_pvertex(PVertex::default());
        let pv_to = self.alloc_pvertex(PVertex::default());
        let edge = self.alloc_edge(Edge {
            flavor: EdgeFlavor::Wire,
            parent_pedge: None,
            start_pvertex: None,
            end_pvertex: None,
        });

        if self.is_isolated(v_from) {
            self.strip_isolated_chain(v_from);
        }
        if self.is_isolated(v_to) {
            self.strip_isolated_chain(v_to);
        }

        self.vertex_ring_insert(v_from, pv_from);
        self.pvertex_mut(pv_from).parent_edge = Some(edge);
        self.vertex_ring_insert(v_to, pv_to);
        self.pvertex_mut(pv_to).parent_edge = Some(edge);

        self.edge_mut(edge).start_pvertex = Some(pv_from);
        self.edge_mut(edge).end_pvertex = Some(pv_to);

        self.wrap_wire_edge(region, edge, pv_from, pv_to);
        edge
    }

    /// Inverse of [`PeMesh::make_edge_cycle`]. Both endpoint vertices stay;
    /// each must keep at least one other incident edge, or it would be
    /// left floating with no parent chain.
    pub fn delete_edge_cycle(&mut self, edge: EdgeId) {
        debug_assert!(self.is_wire_edge(edge), "not a wire edge: {edge:?}");

        let pv_from = self.edge(edge).start_pvertex.unwrap();
        let pv_to = self.edge(edge).end_pvertex.unwrap();
        let v_from = self.pvertex(pv_from).vertex.unwrap();
        let v_to = self.pvertex(pv_to).vertex.unwrap();
        debug_assert!(self.incident_edge_count(v_from) > 1);
        debug_assert!(self.incident_edge_count(v_to) > 1);

        let pe1 = self.edge(edge).parent_pedge.unwrap();
        let pe2 = self.pedge(pe1).radial_next.unwrap();
        debug_assert!(pe2 != pe1 && self.pedge(pe2).radial_next == Some(pe1));
        let loop_ = self.pedge(pe1).parent_loop.unwrap();
        let face = self.loop_(loop_).parent_face.unwrap();
        let pface = self.face(face).parent_pface.unwrap();
        let void_shell = self.pface(pface).parent_shell.unwrap();
        let region = self.shell(void_shell).parent_region.unwrap();
        let outer = self.region(region).outer_shell.unwrap();
        debug_assert!(self.pface(pface).mate_pface.is_none());

        self.vertex_ring_remove(v_from, pv_from);
        self.vertex_ring_remove(v_to, pv_to);
        self.remove_void_shell(outer, void_shell);

        self.free_shell(void_shell);
        self.free_pface(pface);
        self.free_face(face);
        self.free_loop(loop_);
        self.free_pedge(pe1);
        self.free_pedge(pe2);
        self.free_pvertex(pv_from);
        self.free_pvertex(pv_to);
        self.free_edge(edge);
    }
}
