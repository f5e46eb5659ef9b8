//! Connected components of dark pixels in the binarized search plane
//! Each component is a candidate symbol; its outline drives orientation and corner estimation

use std::collections::TryReserveError;

use crate::models::{BitMatrix, Point};

/// Union-Find data structure over provisional labels
pub struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    /// Forest holding only the background label
    pub fn new() -> Self {
        // Label 0 is background
        Self { parent: vec![0] }
    }

    /// Allocate a fresh label
    pub fn make_set(&mut self) -> Result<u32, TryReserveError> {
        self.parent.try_reserve(1)?;
        let label = self.parent.len() as u32;
        self.parent.push(label);
        Ok(label)
    }

    /// Root of `x`, halving paths on the way
    pub fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grandparent = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grandparent;
            x = grandparent;
        }
        x
    }

    /// Merge two sets; the smaller label becomes the root
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x != root_y {
            let (low, high) = if root_x < root_y { (root_x, root_y) } else { (root_y, root_x) };
            self.parent[high as usize] = low;
        }
    }
}

impl Default for UnionFind {
    fn default() -> Self {
        Self::new()
    }
}

/// Bounding box and size of one 8-connected dark component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Component {
    /// Final label in the component map
    pub label: u32,
    /// Leftmost column
    pub min_x: usize,
    /// Topmost row
    pub min_y: usize,
    /// Rightmost column
    pub max_x: usize,
    /// Bottom row
    pub max_y: usize,
    /// Dark pixel count
    pub area: usize,
}

impl Component {
    /// Bounding box width
    pub fn width(&self) -> usize {
        self.max_x - self.min_x + 1
    }

    /// Bounding box height
    pub fn height(&self) -> usize {
        self.max_y - self.min_y + 1
    }

    /// Bounding-box centre in search plane pixels
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x + 1) as f32 / 2.0,
            (self.min_y + self.max_y + 1) as f32 / 2.0,
        )
    }
}

/// Label image plus the components found in it, in raster order of their top-left corner
pub struct ComponentMap {
    width: usize,
    height: usize,
    labels: Vec<u32>,
    components: Vec<Component>,
}

impl ComponentMap {
    /// Label the dark pixels of `matrix` with 8-connectivity
    pub fn label(matrix: &BitMatrix) -> Result<Self, TryReserveError> {
        let width = matrix.width();
        let height = matrix.height();

        let mut labels: Vec<u32> = Vec::new();
        labels.try_reserve_exact(width * height)?;
        labels.resize(width * height, 0);
        let mut uf = UnionFind::new();

        // First pass: provisional labels from the already visited neighbours
        for y in 0..height {
            for x in 0..width {
                if !matrix.get(x, y) {
                    continue;
                }

                let mut neighbors = [0u32; 4];
                let mut count = 0;
                let mut note = |label: u32| {
                    if label != 0 {
                        neighbors[count] = label;
                        count += 1;
                    }
                };
                if x > 0 {
                    note(labels[y * width + x - 1]);
                }
                if y > 0 {
                    let above = (y - 1) * width;
                    if x > 0 {
                        note(labels[above + x - 1]);
                    }
                    note(labels[above + x]);
                    if x + 1 < width {
                        note(labels[above + x + 1]);
                    }
                }

                let idx = y * width + x;
                match neighbors[..count].iter().copied().min() {
                    None => labels[idx] = uf.make_set()?,
                    Some(min_label) => {
                        labels[idx] = min_label;
                        for &l in &neighbors[..count] {
                            uf.union(min_label, l);
                        }
                    }
                }
            }
        }

        // Second pass: resolve roots and gather bounding boxes
        let mut slots: Vec<Option<usize>> = Vec::new();
        slots.try_reserve_exact(uf.parent.len())?;
        slots.resize(uf.parent.len(), None);
        let mut components: Vec<Component> = Vec::new();

        for y in 0..height {
            for x in 0..width {
                let idx = y * width + x;
                if labels[idx] == 0 {
                    continue;
                }
                let root = uf.find(labels[idx]);
                labels[idx] = root;

                match slots[root as usize] {
                    Some(slot) => {
                        let c = &mut components[slot];
                        c.min_x = c.min_x.min(x);
                        c.max_x = c.max_x.max(x);
                        c.max_y = y;
                        c.area += 1;
                    }
                    None => {
                        components.try_reserve(1)?;
                        slots[root as usize] = Some(components.len());
                        components.push(Component {
                            label: root,
                            min_x: x,
                            min_y: y,
                            max_x: x,
                            max_y: y,
                            area: 1,
                        });
                    }
                }
            }
        }

        components.sort_by_key(|c| (c.min_y, c.min_x));

        Ok(Self {
            width,
            height,
            labels,
            components,
        })
    }

    /// Components ordered by (top, left) of their bounding box
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// True when (x, y) belongs to the component labelled `label`
    pub fn is_label(&self, x: usize, y: usize, label: u32) -> bool {
        x < self.width && y < self.height && self.labels[y * self.width + x] == label
    }

    /// Centres of the component's pixels that touch the outside in 4-connectivity
    pub fn boundary_points(&self, component: &Component) -> Result<Vec<Point>, TryReserveError> {
        let mut points = Vec::new();
        let label = component.label;

        for y in component.min_y..=component.max_y {
            for x in component.min_x..=component.max_x {
                if !self.is_label(x, y, label) {
                    continue;
                }
                let interior = x > 0
                    && y > 0
                    && self.is_label(x - 1, y, label)
                    && self.is_label(x + 1, y, label)
                    && self.is_label(x, y - 1, label)
                    && self.is_label(x, y + 1, label);
                if !interior {
                    points.try_reserve(1)?;
                    points.push(Point::new(x as f32 + 0.5, y as f32 + 0.5));
                }
            }
        }

        Ok(points)
    }
}
