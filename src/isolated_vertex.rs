use crate::*;

// An isolated vertex keeps the structure uniform by carrying the whole
// degenerate chain: a p-vertex in a singleton ring, a zero-length wire
// edge whose start and end are that same p-vertex, an unoriented p-edge
// that is its own loop and radial ring, a loop, a face, an unmated
// p-face, and a void shell of its own.

impl<V> PeMesh<V> {
    /// Creates an isolated vertex within `region`. Returns the vertex and
    /// the void shell hosting its degenerate chain.
    pub fn create_isolated_vertex(&mut self, region: RegionId, point: V) -> (VertexId, ShellId) {
        let vertex = self.alloc_vertex(Vertex {
            flavor: VertexFlavor::Isolated,
            pvertex: None,
            point,
        });
        let pvertex = self.alloc_pvertex(PVertex::default());
        let edge = self.alloc_edge(Edge {
            flavor: EdgeFlavor::Wire,
            parent_pedge: None,
            start_pvertex: None,
            end_pvertex: None,
        });
        let pedge = self.alloc_pedge(PEdge::default());
        let loop_ = self.alloc_loop(Loop::default());
        let face = self.alloc_face(Face::default());
        let pface = self.alloc_pface(PFace {
            orientation: PFaceOrientation::Isolated,
            parent_shell: None,
            child_face: None,
            next_pface: None,
            mate_pface: None,
        });
        let shell = self.alloc_shell(Shell::default());
        let outer = self.ensure_outer_shell(region);

        self.vertex_mut(vertex).pvertex = Some(pvertex);
        *self.pvertex_mut(pvertex) = PVertex {
            parent_edge: Some(edge),
            vertex: Some(vertex),
            next_pvertex: Some(pvertex),
        };

        // The edge points to the same start and end p-vertex.
        let e = self.edge_mut(edge);
        e.parent_pedge = Some(pedge);
        e.start_pvertex = Some(pvertex);
        e.end_pvertex = Some(pvertex);

        // The p-edge links to itself, both radially and along the loop.
        *self.pedge_mut(pedge) = PEdge {
            orientation: PEdgeOrientation::Unoriented,
            parent_loop: Some(loop_),
            child_edge: Some(edge),
            start_pvertex: Some(pvertex),
            loop_prev: Some(pedge),
            loop_next: Some(pedge),
            radial_prev: Some(pedge),
            radial_next: Some(pedge),
        };

        *self.loop_mut(loop_) = Loop {
            parent_face: Some(face),
            boundary_pedge: Some(pedge),
            next_hole: None,
        };
        *self.face_mut(face) = Face {
            parent_pface: Some(pface),
            outer_loop: Some(loop_),
        };

        // Unmated p-face in a singleton shell ring.
        let pf = self.pface_mut(pface);
        pf.parent_shell = Some(shell);
        pf.child_face = Some(face);
        pf.next_pface = Some(pface);

        *self.shell_mut(shell) = Shell {
            parent_region: Some(region),
            pface: Some(pface),
            next_void_shell: None,
        };
        self.add_void_shell(outer, shell);

        (vertex, shell)
    }

    /// Inverse of [`PeMesh::create_isolated_vertex`]; returns the point
    /// payload. The region's outer shell stays behind.
    pub fn delete_isolated_vertex(&mut self, vertex: VertexId) -> V {
        debug_assert!(self.is_isolated(vertex), "not isolated: {vertex:?}");

        let pvertex = self.vertex(vertex).pvertex.unwrap();
        debug_assert!(self.pvertex(pvertex).next_pvertex == Some(pvertex));
        let edge = self.pvertex(pvertex).parent_edge.unwrap();
        let pedge = self.edge(edge).parent_pedge.unwrap();
        debug_assert!(self.pedge(pedge).loop_next == Some(pedge));
        debug_assert!(self.pedge(pedge).radial_next == Some(pedge));
        let loop_ = self.pedge(pedge).parent_loop.unwrap();
        debug_assert!(self.loop_(loop_).boundary_pedge == Some(pedge));
        debug_assert!(self.loop_(loop_).next_hole.is_none());
        let face = self.loop_(loop_).parent_face.unwrap();
        debug_assert!(self.face(face).outer_loop == Some(loop_));
        let pface = self.face(face).parent_pface.unwrap();
        debug_assert!(self.pface(pface).next_pface == Some(pface));
        debug_assert!(self.pface(pface).mate_pface.is_none());
        let shell = self.pface(pface).parent_shell.unwrap();
        debug_assert!(self.shell(shell).pface == Some(pface));
        let region = self.shell(shell).parent_region.unwrap();
        let outer = self.region(region).outer_shell.unwrap();
        debug_assert!(outer != shell);

        self.remove_void_shell(outer, shell);
        self.free_shell(shell);
        self.free_pface(pface);
        self.free_face(face);
        self.free_loop(loop_);
        self.free_pedge(pedge);
        self.free_edge(edge);
        self.free_pvertex(pvertex);
        self.free_vertex(vertex).point
    }

    /// Tears down the degenerate chain of an isolated vertex, leaving the
    /// bare vertex with no p-vertex. Callers that attach the vertex to a
    /// real edge afterwards use this; `create_wire_edge_and_vertex`
    /// instead unwraps the chain in place.
    pub(crate) fn strip_isolated_chain(&mut self, vertex: VertexId) {
        debug_assert!(self.is_isolated(vertex));

        let pvertex = self.vertex(vertex).pvertex.unwrap();
        let edge = self.pvertex(pvertex).parent_edge.unwrap();
        let pedge = self.edge(edge).parent_pedge.unwrap();
        let loop_ = self.pedge(pedge).parent_loop.unwrap();
        let face = self.loop_(loop_).parent_face.unwrap();
        let pface = self.face(face).parent_pface.unwrap();
        let shell = self.pface(pface).parent_shell.unwrap();
        let region = self.shell(shell).parent_region.unwrap();
        let outer = self.region(region).outer_shell.unwrap();

        self.remove_void_shell(outer, shell);
        self.free_shell(shell);
        self.free_pface(pface);
        self.free_face(face);
        self.free_loop(loop_);
        self.free_pedge(pedge);
        self.free_edge(edge);
        self.free_pvertex(pvertex);

        let v = self.vertex_mut(vertex);
        v.flavor = VertexFlavor::Normal;
        v.pvertex = None;
    }
}
