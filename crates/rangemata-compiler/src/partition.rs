//! Refinable partition of `0..n`.
//!
//! Elements are kept in one permuted array so that every block is a
//! contiguous slice. Marking moves an element to the front of its block;
//! splitting turns the marked prefix into a block of its own. Both are O(1)
//! per element, which keeps partition refinement within O(m log n).

/// Partition of the integers `0..len` into disjoint blocks.
#[derive(Debug, Clone)]
pub(crate) struct Partition {
    /// Elements, grouped by block.
    elements: Vec<u32>,
    /// Position of each element in `elements`.
    location: Vec<u32>,
    block_of: Vec<u32>,
    /// Block `b` spans `elements[first[b]..end[b]]`, with the marked prefix
    /// ending at `mid[b]`.
    first: Vec<u32>,
    mid: Vec<u32>,
    end: Vec<u32>,
    /// Blocks with at least one marked element.
    touched: Vec<u32>,
}

impl Partition {
    /// A single block holding every element; no blocks when `len == 0`.
    pub(crate) fn new(len: usize) -> Self {
        let n = len as u32;
        let (first, mid, end) = if len == 0 {
            (Vec::new(), Vec::new(), Vec::new())
        } else {
            (vec![0], vec![0], vec![n])
        };
        Self {
            elements: (0..n).collect(),
            location: (0..n).collect(),
            block_of: vec![0; len],
            first,
            mid,
            end,
            touched: Vec::new(),
        }
    }

    pub(crate) fn block_count(&self) -> usize {
        self.first.len()
    }

    pub(crate) fn block_of(&self, element: u32) -> u32 {
        self.block_of[element as usize]
    }

    pub(crate) fn size(&self, block: u32) -> usize {
        let b = block as usize;
        (self.end[b] - self.first[b]) as usize
    }

    pub(crate) fn members(&self, block: u32) -> &[u32] {
        let b = block as usize;
        &self.elements[self.first[b] as usize..self.end[b] as usize]
    }

    /// Mark `element` for the next [`split`](Self::split). Marking twice is a no-op.
    pub(crate) fn mark(&mut self, element: u32) {
        let b = self.block_of[element as usize] as usize;
        let i = self.location[element as usize];
        let j = self.mid[b];
        if i < j {
            return;
        }
        if j == self.first[b] {
            self.touched.push(b as u32);
        }

        let other = self.elements[j as usize];
        self.elements.swap(i as usize, j as usize);
        self.location[element as usize] = j;
        self.location[other as usize] = i;
        self.mid[b] = j + 1;
    }

    /// Separate marked from unmarked elements in every touched block.
    ///
    /// The marked part becomes a new block. Returns `(old, new)` for each
    /// block that actually split; fully marked blocks stay intact.
    pub(crate) fn split(&mut self) -> Vec<(u32, u32)> {
        let mut splits = Vec::new();
        for b in std::mem::take(&mut self.touched) {
            let bi = b as usize;
            let (first, mid) = (self.first[bi], self.mid[bi]);
            self.mid[bi] = first;
            if mid == self.end[bi] {
                continue;
            }

            let new = self.first.len() as u32;
            self.first.push(first);
            self.mid.push(first);
            self.end.push(mid);
            self.first[bi] = mid;
            self.mid[bi] = mid;
            for &e in &self.elements[first as usize..mid as usize] {
                self.block_of[e as usize] = new;
            }
            splits.push((b, new));
        }
        splits
    }
}
