//! Weighted graphs over dense vertex ids, and the two classic clients of an
//! indexed min-heap: Prim's minimum spanning tree and Dijkstra's shortest
//! paths.
//!
//! Both algorithms keep every unfinished vertex in an [`IndexedMinHeap`]
//! keyed by vertex id and lower its priority in place as better edges are
//! found, so no stale entries ever pile up in the queue.

use anyhow::{bail, Result};

use crate::IndexedMinHeap;

/// Edge weight types usable with [`WeightedGraph`]. `Default` is the zero
/// weight.
pub trait Weight: Copy + PartialOrd + Default {
    /// Adds two weights, returning `None` if the sum does not fit.
    fn checked_add(self, other: Self) -> Option<Self>;
}

macro_rules! impl_weight_int {
    ($($t:ty),*) => {
        $(impl Weight for $t {
            fn checked_add(self, other: Self) -> Option<Self> {
                <$t>::checked_add(self, other)
            }
        })*
    };
}

impl_weight_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

// Floats saturate to infinity instead of overflowing.
impl Weight for f32 {
    fn checked_add(self, other: Self) -> Option<Self> {
        Some(self + other)
    }
}

impl Weight for f64 {
    fn checked_add(self, other: Self) -> Option<Self> {
        Some(self + other)
    }
}

/// A tentative distance or edge weight. `Infinite` orders after every
/// `Finite` value.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Dist<W> {
    Finite(W),
    Infinite,
}

impl<W> Dist<W> {
    /// Returns the finite value, if any.
    pub fn finite(self) -> Option<W> {
        match self {
            Dist::Finite(w) => Some(w),
            Dist::Infinite => None,
        }
    }
}

/// A graph with adjacency lists. Edges added with [`add_edge`](Self::add_edge)
/// are undirected; [`add_arc`](Self::add_arc) adds a single directed edge.
#[derive(Debug, Clone)]
pub struct WeightedGraph<W> {
    adj: Vec<Vec<(usize, W)>>,
}

/// One row of [`WeightedGraph::dijkstra`]'s result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathInfo<W> {
    /// The vertex this row describes.
    pub vertex: usize,
    /// `None` when the vertex is unreachable from the source.
    pub distance: Option<W>,
    /// Predecessor on a shortest path, `None` for the source and for
    /// unreachable vertices.
    pub parent: Option<usize>,
}

impl<W> WeightedGraph<W>
where
    W: Weight,
{
    /// Creates a graph with `v` vertices and no edges.
    pub fn new(v: usize) -> Self {
        Self {
            adj: (0..v).map(|_| Vec::new()).collect(),
        }
    }

    /// Returns the number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.adj.len()
    }

    /// Adds an undirected edge between `a` and `b`.
    pub fn add_edge(&mut self, a: usize, b: usize, w: W) -> Result<()> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        self.adj[a].push((b, w));
        self.adj[b].push((a, w));
        Ok(())
    }

    /// Adds a directed edge from `a` to `b`.
    pub fn add_arc(&mut self, a: usize, b: usize, w: W) -> Result<()> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        self.adj[a].push((b, w));
        Ok(())
    }

    /// Returns the `(vertex, weight)` pairs adjacent to `u`.
    pub fn neighbors(&self, u: usize) -> Result<&[(usize, W)]> {
        self.check_vertex(u)?;
        Ok(&self.adj[u])
    }

    /// Computes a minimum spanning forest with Prim's algorithm, growing the
    /// tree that contains `root` first.
    ///
    /// Returns the forest's edges as `(parent, child)` pairs.
    pub fn mst_prim(&self, root: usize) -> Result<Vec<(usize, usize)>> {
        self.check_vertex(root)?;
        let n = self.num_vertices();
        let mut parent: Vec<Option<usize>> = vec![None; n];

        let mut queue = IndexedMinHeap::new(n);
        queue.insert(root, Dist::Finite(W::default()))?;
        for u in (0..n).filter(|&u| u != root) {
            queue.insert(u, Dist::Infinite)?;
        }

        while !queue.is_empty() {
            let u = queue.extract_min()?;
            for &(v, w) in &self.adj[u] {
                if queue.contains(v) && Dist::Finite(w) < *queue.get_priority(v)? {
                    parent[v] = Some(u);
                    queue.change_priority(v, Dist::Finite(w))?;
                }
            }
        }

        Ok(parent
            .into_iter()
            .enumerate()
            .filter_map(|(v, p)| p.map(|u| (u, v)))
            .collect())
    }

    /// Computes single-source shortest paths with Dijkstra's algorithm.
    ///
    /// Weights must be non-negative. Returns one [`PathInfo`] per vertex, in
    /// vertex order, or an error if a path length overflows `W`.
    pub fn dijkstra(&self, source: usize) -> Result<Vec<PathInfo<W>>> {
        self.check_vertex(source)?;
        let n = self.num_vertices();
        let mut dist: Vec<Dist<W>> = vec![Dist::Infinite; n];
        let mut parent: Vec<Option<usize>> = vec![None; n];
        dist[source] = Dist::Finite(W::default());

        let mut queue = IndexedMinHeap::new(n);
        queue.insert_all(dist.iter().copied().enumerate())?;

        while !queue.is_empty() {
            let (u, d) = queue.extract_min_entry()?;
            // Everything left is unreachable.
            let Dist::Finite(du) = d else {
                break;
            };
            for &(v, w) in &self.adj[u] {
                if !queue.contains(v) {
                    continue;
                }
                let Some(sum) = du.checked_add(w) else {
                    bail!("path length to vertex {v} overflows the weight type");
                };
                let candidate = Dist::Finite(sum);
                if candidate < dist[v] {
                    dist[v] = candidate;
                    parent[v] = Some(u);
                    queue.change_priority(v, candidate)?;
                }
            }
        }

        Ok(dist
            .into_iter()
            .zip(parent)
            .enumerate()
            .map(|(vertex, (d, parent))| PathInfo {
                vertex,
                distance: d.finite(),
                parent,
            })
            .collect())
    }

    fn check_vertex(&self, u: usize) -> Result<()> {
        if u >= self.num_vertices() {
            bail!(
                "vertex {u} is outside the graph's {} vertices",
                self.num_vertices()
            );
        }
        Ok(())
    }
}
