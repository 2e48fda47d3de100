//! Maximal connected-region extraction via flood fill.

use warren_core::{Point, Range};

use crate::traits::Pather;

/// A maximal set of mutually connected points of one cell class.
pub type Region = Vec<Point>;

/// A [`Pather`] yielding the in-bounds cardinal neighbours of a point.
///
/// Adjacency only; cell-class membership is decided by the `matches`
/// predicate passed to the [`RegionRange`] queries.
#[derive(Debug, Clone, Copy)]
pub struct CardinalPather {
    pub rng: Range,
}

impl Pather for CardinalPather {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for n in p.neighbors_4() {
            if self.rng.contains(n) {
                buf.push(n);
            }
        }
    }
}

/// Flood-fill engine over a grid rectangle.
///
/// Owns the label array, the explicit fill stack and a shared neighbour
/// buffer, so repeated queries reuse the same allocations. Regions are
/// grown over the adjacency a [`Pather`] provides (4-directional for
/// [`CardinalPather`]), restricted to cells for which `matches` holds.
pub struct RegionRange {
    rng: Range,
    width: usize,
    labels: Vec<i32>,
    stack: Vec<usize>,
    nbuf: Vec<Point>,
}

impl RegionRange {
    /// Create a new `RegionRange` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            width: rng.width().max(0) as usize,
            labels: vec![-1; rng.len()],
            stack: Vec::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Replace the underlying rectangle, reallocating the label cache if
    /// the new rectangle needs more room.
    pub fn set_range(&mut self, rng: Range) {
        self.rng = rng;
        self.width = rng.width().max(0) as usize;
        if self.labels.len() < rng.len() {
            self.labels.resize(rng.len(), -1);
        }
    }

    /// The rectangle this engine operates on.
    pub fn range(&self) -> Range {
        self.rng
    }

    fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let q = p - self.rng.min;
        Some(q.y as usize * self.width + q.x as usize)
    }

    fn point(&self, i: usize) -> Point {
        Point::new(
            (i % self.width) as i32 + self.rng.min.x,
            (i / self.width) as i32 + self.rng.min.y,
        )
    }

    /// Extract every maximal connected region of cells satisfying `matches`.
    ///
    /// Cells are scanned in row-major order; each unvisited matching cell
    /// seeds a flood fill over the pather's adjacency, using an explicit
    /// stack (no recursion, so large grids cannot overflow the call stack).
    /// Every matching cell lands in exactly one returned region, and the
    /// regions are maximal. Component labels are left behind for
    /// [`cc_at`](Self::cc_at) queries.
    pub fn regions<P: Pather>(
        &mut self,
        pather: &P,
        matches: impl Fn(Point) -> bool,
    ) -> Vec<Region> {
        for v in self.labels.iter_mut() {
            *v = -1;
        }

        let mut out: Vec<Region> = Vec::new();
        let mut nbuf = std::mem::take(&mut self.nbuf);
        let len = self.rng.len();

        for start in 0..len {
            if self.labels[start] >= 0 || !matches(self.point(start)) {
                continue;
            }

            let label = out.len() as i32;
            let mut region = Region::new();
            self.stack.clear();
            self.stack.push(start);
            self.labels[start] = label;

            while let Some(ci) = self.stack.pop() {
                let cp = self.point(ci);
                region.push(cp);
                nbuf.clear();
                pather.neighbors(cp, &mut nbuf);

                for i in 0..nbuf.len() {
                    let np = nbuf[i];
                    if let Some(ni) = self.idx(np) {
                        if self.labels[ni] < 0 && matches(np) {
                            self.labels[ni] = label;
                            self.stack.push(ni);
                        }
                    }
                }
            }

            out.push(region);
        }

        self.nbuf = nbuf;
        out
    }

    /// Label every matching cell with its connected-component ID without
    /// materializing the point lists. Query labels with [`cc_at`](Self::cc_at).
    pub fn cc_map_all<P: Pather>(&mut self, pather: &P, matches: impl Fn(Point) -> bool) {
        for v in self.labels.iter_mut() {
            *v = -1;
        }

        let mut label: i32 = 0;
        let mut nbuf = std::mem::take(&mut self.nbuf);
        let len = self.rng.len();

        for start in 0..len {
            if self.labels[start] >= 0 || !matches(self.point(start)) {
                continue;
            }

            self.stack.clear();
            self.stack.push(start);
            self.labels[start] = label;

            while let Some(ci) = self.stack.pop() {
                let cp = self.point(ci);
                nbuf.clear();
                pather.neighbors(cp, &mut nbuf);

                for i in 0..nbuf.len() {
                    let np = nbuf[i];
                    if let Some(ni) = self.idx(np) {
                        if self.labels[ni] < 0 && matches(np) {
                            self.labels[ni] = label;
                            self.stack.push(ni);
                        }
                    }
                }
            }

            label += 1;
        }

        self.nbuf = nbuf;
    }

    /// Query the connected-component label of a point.
    ///
    /// Returns `None` if the point is outside the range or was not part of
    /// the matching class in the last [`regions`](Self::regions) /
    /// [`cc_map_all`](Self::cc_map_all) call.
    pub fn cc_at(&self, p: Point) -> Option<usize> {
        let i = self.idx(p)?;
        let label = self.labels[i];
        if label < 0 { None } else { Some(label as usize) }
    }
}
