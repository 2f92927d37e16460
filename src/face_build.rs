use crate::*;

// Construction-layer entry point: builds one real face over an existing
// vertex cycle. This is the only source of mated p-face pairs; the Euler
// operators above it only ever deal in wire and degenerate topology, so
// importers call this in a loop to lift a polygon soup into the mesh.

impl<V> PeMesh<V> {
    /// Builds a face whose outer loop runs through `verts` in order,
    /// allocating missing edges, promoting wire edges into boundary
    /// edges, and unwrapping isolated vertices on first use. One p-edge
    /// per boundary edge lands in the new loop; the face gets a mated
    /// Forward/Reversed p-face pair on `shell`'s ring.
    pub fn add_polygon_face(&mut self, shell: ShellId, verts: &[VertexId]) -> FaceId {
        debug_assert!(verts.len() >= 3, "a face needs at least three vertices");
        debug_assert!({
            let mut sorted = verts.to_vec();
            sorted.sort();
            sorted.windows(2).all(|pair| pair[0] != pair[1])
        });

        // Boundary edges first, so every vertex has a usable p-vertex
        // before any loop splicing starts.
        let mut boundary = Vec::with_capacity(verts.len());
        for (index, &v_a) in verts.iter().enumerate() {
            let v_b = verts[(index + 1) % verts.len()];
            let edge = match self.find_edge_between(v_a, v_b) {
                Some(edge) => {
                    if self.is_wire_edge(edge) {
                        self.absorb_wire_edge(edge);
                    }
                    edge
                }
                None => self.add_bare_edge(v_a, v_b),
            };
            let forward = self.edge_source(edge) == v_a;
            boundary.push((edge, forward));
        }

        let loop_ = self.alloc_loop(Loop::default());
        let face = self.alloc_face(Face::default());
        let pface = self.alloc_pface(PFace {
            orientation: PFaceOrientation::Forward,
            parent_shell: Some(shell),
            child_face: None,
            next_pface: None,
            mate_pface: None,
        });
        let mate = self.alloc_pface(PFace {
            orientation: PFaceOrientation::Reversed,
            parent_shell: Some(shell),
            child_face: None,
            next_pface: None,
            mate_pface: Some(pface),
        });
        self.pface_mut(pface).mate_pface = Some(mate);

        let mut first: Option<PEdgeId> = None;
        let mut prev: Option<PEdgeId> = None;
        for &(edge, forward) in &boundary {
            let record = self.edge(edge);
            let (orientation, source) = if forward {
                (PEdgeOrientation::Forward, record.start_pvertex.unwrap())
            } else {
                (PEdgeOrientation::Reversed, record.end_pvertex.unwrap())
            };
            let pedge = self.alloc_pedge(PEdge {
                orientation,
                parent_loop: Some(loop_),
                child_edge: Some(edge),
                start_pvertex: Some(source),
                ..Default::default()
            });

            let radial_head = self.edge(edge).parent_pedge;
            match radial_head {
                None => {
                    self.edge_mut(edge).parent_pedge = Some(pedge);
                    self.pedge_mut(pedge).radial_prev = Some(pedge);
                    self.pedge_mut(pedge).radial_next = Some(pedge);
                }
                Some(at) => self.splice_radial_after(at, pedge),
            }

            match prev {
                None => {
                    self.pedge_mut(pedge).loop_prev = Some(pedge);
                    self.pedge_mut(pedge).loop_next = Some(pedge);
                    first = Some(pedge);
                }
                Some(prev) => self.splice_loop_after(prev, pedge),
            }
            prev = Some(pedge);
        }

        *self.loop_mut(loop_) = Loop {
            parent_face: Some(face),
            boundary_pedge: first,
            next_hole: None,
        };
        *self.face_mut(face) = Face {
            parent_pface: Some(pface),
            outer_loop: Some(loop_),
        };
        self.pface_mut(pface).child_face = Some(face);
        self.pface_mut(mate).child_face = Some(face);

        // Mates sit next to each other on the shell ring.
        let ring_head = self.shell(shell).pface;
        match ring_head {
            None => {
                self.pface_mut(pface).next_pface = Some(mate);
                self.pface_mut(mate).next_pface = Some(pface);
                self.shell_mut(shell).pface = Some(pface);
            }
            Some(head) => {
                let after = self.pface(head).next_pface.unwrap();
                self.pface_mut(head).next_pface = Some(pface);
                self.pface_mut(pface).next_pface = Some(mate);
                self.pface_mut(mate).next_pface = Some(after);
            }
        }

        face
    }

    pub fn find_edge_between(&self, v_a: VertexId, v_b: VertexId) -> Option<EdgeId> {
        if self.is_isolated(v_a) {
            return None;
        }
        self.visit_vertex_edges(v_a)
            .into_iter()
            .find(|&edge| self.edge_vertices(edge).contains(&v_b))
    }

    fn edge_source(&self, edge: EdgeId) -> VertexId {
        let pv = self.edge(edge).start_pvertex.unwrap();
        self.pvertex(pv).vertex.unwrap()
    }

    /// A plain normal edge between two vertices, with no p-edges yet; the
    /// caller wires it into a loop. Isolated endpoints are unwrapped,
    /// and endpoints with no prior use get a fresh p-vertex.
    fn add_bare_edge(&mut self, v_a: VertexId, v_b: VertexId) -> EdgeId {
        let edge = self.alloc_edge(Edge {
            flavor: EdgeFlavor::Normal,
            parent_pedge: None,
            start_pvertex: None,
            end_pvertex: None,
        });
        let pv_a = self.use_vertex(v_a, edge);
        let pv_b = self.use_vertex(v_b, edge);
        self.edge_mut(edge).start_pvertex = Some(pv_a);
        self.edge_mut(edge).end_pvertex = Some(pv_b);
        edge
    }

    fn use_vertex(&mut self, vertex: VertexId, edge: EdgeId) -> PVertexId {
        if self.is_isolated(vertex) {
            self.strip_isolated_chain(vertex);
        }
        // One p-vertex per edge use, so every incident edge is reachable
        // from the vertex ring no matter how faces arrive.
        let pv = self.alloc_pvertex(PVertex::default());
        self.vertex_ring_insert(vertex, pv);
        self.pvertex_mut(pv).parent_edge = Some(edge);
        pv
    }

    /// Frees the degenerate apparatus of a wire edge that is being
    /// promoted into a real face boundary. The edge and its p-vertices
    /// survive; the p-edge pair, loop, face, p-face and void shell go.
    fn absorb_wire_edge(&mut self, edge: EdgeId) {
        debug_assert!(self.is_wire_edge(edge));

        let pe1 = self.edge(edge).parent_pedge.unwrap();
        let pe2 = self.pedge(pe1).radial_next.unwrap();
        debug_assert!(pe2 != pe1 && self.pedge(pe2).radial_next == Some(pe1));
        let loop_ = self.pedge(pe1).parent_loop.unwrap();
        let face = self.loop_(loop_).parent_face.unwrap();
        let pface = self.face(face).parent_pface.unwrap();
        debug_assert!(self.pface(pface).mate_pface.is_none());
        let void_shell = self.pface(pface).parent_shell.unwrap();
        let region = self.shell(void_shell).parent_region.unwrap();
        let outer = self.region(region).outer_shell.unwrap();

        self.remove_void_shell(outer, void_shell);
        self.free_shell(void_shell);
        self.free_pface(pface);
        self.free_face(face);
        self.free_loop(loop_);
        self.free_pedge(pe1);
        self.free_pedge(pe2);

        let e = self.edge_mut(edge);
        e.flavor = EdgeFlavor::Normal;
        e.parent_pedge = None;
    }
}
