//! Grid planning: partition figures into rows and size the composite page
//!
//! Planning is pure arithmetic over figure sizes. The writer feeds it the
//! page sizes read from the source documents and then follows the returned
//! placements.

use std::fmt;

use crate::geometry::{BoundingBox, Point};

use super::config::ComposeConfig;

/// Page size of one figure source, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureSize {
    pub width: f64,
    pub height: f64,
}

impl FigureSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// One row of the grid
#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    /// Indices into the flat figure list, left to right
    pub figures: Vec<usize>,
    /// Sum of the figure widths
    pub width: f64,
    /// Tallest figure plus the row gap
    pub height: f64,
}

/// Where one figure and its label land on the composite page
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Index into the flat figure list (also the label index)
    pub figure: usize,
    /// Figure rectangle, top-left origin
    pub bounds: BoundingBox,
    /// Label baseline start
    pub label_anchor: Point,
}

/// Complete plan for a composite page
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub rows: Vec<RowLayout>,
    pub placements: Vec<Placement>,
    pub width: f64,
    pub height: f64,
}

impl GridLayout {
    /// Number of figures that end up on the page
    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }

    /// True when nothing was placed and the page has zero area
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

impl fmt::Display for GridLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {} x {}", self.width, self.height)?;
        for (index, row) in self.rows.iter().enumerate() {
            write!(
                f,
                "\nrow {}: figures {:?}, {} x {}",
                index, row.figures, row.width, row.height
            )?;
        }
        Ok(())
    }
}

/// Number of figures a row specification places out of `available` sources
pub fn placed_count(available: usize, row_specification: &[usize]) -> usize {
    row_specification
        .iter()
        .fold(0usize, |total, &count| total.saturating_add(count))
        .min(available)
}

/// Partition `sizes` into rows following `row_specification` and place them.
///
/// Row `i` takes the next `row_specification[i]` figures, or fewer once the
/// list runs out. Rows that end up with no figures are dropped. Page width is
/// the widest row, page height the sum of row heights plus one extra gap.
/// Each row starts one gap below the previous row's height, which already
/// includes a gap, so with several rows the last one can extend past the
/// bottom of the page.
pub fn plan_grid(
    sizes: &[FigureSize],
    row_specification: &[usize],
    config: &ComposeConfig,
) -> GridLayout {
    let gap = config.row_gap;
    let mut rows = Vec::with_capacity(row_specification.len());
    let mut next = 0;

    for &count in row_specification {
        if next >= sizes.len() {
            break;
        }
        let end = next.saturating_add(count).min(sizes.len());
        if end == next {
            continue;
        }
        let figures: Vec<usize> = (next..end).collect();
        let width: f64 = figures.iter().map(|&i| sizes[i].width).sum();
        let tallest = figures
            .iter()
            .map(|&i| sizes[i].height)
            .fold(0.0, f64::max);
        rows.push(RowLayout {
            figures,
            width,
            height: tallest + gap,
        });
        next = end;
    }

    let width = rows.iter().map(|r| r.width).fold(0.0, f64::max);
    let height = rows.iter().map(|r| r.height).sum::<f64>() + gap;

    let (label_dx, label_dy) = config.label_offset;
    let mut placements = Vec::with_capacity(next);
    let mut current_y = 0.0;
    for row in &rows {
        let mut current_x = 0.0;
        for &figure in &row.figures {
            let size = sizes[figure];
            placements.push(Placement {
                figure,
                bounds: BoundingBox::new(current_x, current_y, size.width, size.height),
                label_anchor: Point::new(current_x + label_dx, current_y + label_dy),
            });
            current_x += size.width;
        }
        current_y += row.height + gap;
    }

    GridLayout {
        rows,
        placements,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn squares(n: usize, side: f64) -> Vec<FigureSize> {
        vec![FigureSize::new(side, side); n]
    }

    #[test]
    fn test_two_figures_one_row() {
        let sizes = [FigureSize::new(100.0, 50.0), FigureSize::new(80.0, 60.0)];
        let layout = plan_grid(&sizes, &[2], &ComposeConfig::default());

        assert_eq!(layout.width, 180.0);
        assert_eq!(layout.height, 64.0);
        assert_eq!(layout.placements[0].bounds, BoundingBox::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(layout.placements[1].bounds, BoundingBox::new(100.0, 0.0, 80.0, 60.0));
        assert_eq!(layout.placements[1].label_anchor, Point::new(105.0, 15.0));
    }

    #[test]
    fn test_identical_squares_in_a_row() {
        let config = ComposeConfig::default().with_row_gap(3.0);
        let layout = plan_grid(&squares(4, 25.0), &[4], &config);
        assert_eq!(layout.width, 100.0);
        assert_eq!(layout.height, 25.0 + 2.0 * 3.0);
    }

    #[test]
    fn test_rows_span_the_flat_list() {
        let sizes = [
            FigureSize::new(10.0, 10.0),
            FigureSize::new(20.0, 30.0),
            FigureSize::new(40.0, 5.0),
        ];
        let layout = plan_grid(&sizes, &[2, 1], &ComposeConfig::default());

        assert_eq!(layout.rows[0].figures, vec![0, 1]);
        assert_eq!(layout.rows[1].figures, vec![2]);
        assert_eq!(layout.width, 40.0);
        assert_eq!(layout.height, (30.0 + 2.0) + (5.0 + 2.0) + 2.0);
        // row height already carries a gap, and one more is added between rows
        assert_eq!(layout.placements[2].bounds.y, 34.0);
        assert_eq!(layout.placements[2].label_anchor, Point::new(5.0, 49.0));
        assert_eq!(layout.placements[2].bounds.x, 0.0);
    }

    #[test]
    fn test_specification_longer_than_sources() {
        let layout = plan_grid(&squares(3, 10.0), &[2, 2, 2], &ComposeConfig::default());
        assert_eq!(layout.placed_count(), 3);
        assert_eq!(layout.rows.len(), 2);
        assert_eq!(layout.rows[1].figures, vec![2]);
        assert_eq!(placed_count(3, &[2, 2, 2]), 3);
    }

    #[test]
    fn test_sources_longer_than_specification() {
        let layout = plan_grid(&squares(5, 10.0), &[1, 1], &ComposeConfig::default());
        assert_eq!(layout.placed_count(), 2);
        assert_eq!(placed_count(5, &[1, 1]), 2);
    }

    #[test]
    fn test_zero_count_rows_are_dropped() {
        let layout = plan_grid(&squares(2, 10.0), &[1, 0, 1], &ComposeConfig::default());
        assert_eq!(layout.rows.len(), 2);
        assert_eq!(layout.height, 12.0 + 12.0 + 2.0);
    }

    #[test]
    fn test_nothing_placed_gives_zero_area() {
        let layout = plan_grid(&[], &[2], &ComposeConfig::default());
        assert!(layout.is_empty());
        assert_eq!(layout.width, 0.0);
        assert_eq!(layout.height, 2.0);
    }

    #[test]
    fn test_row_offset_adds_gap_to_row_height() {
        let sizes = [FigureSize::new(100.0, 50.0), FigureSize::new(80.0, 60.0)];
        let layout = plan_grid(&sizes, &[1, 1], &ComposeConfig::default());
        assert_eq!(layout.placements[0].bounds.y, 0.0);
        assert_eq!(layout.placements[1].bounds.y, (50.0 + 2.0) + 2.0);
    }

    #[test]
    fn test_huge_row_counts_saturate() {
        assert_eq!(placed_count(3, &[usize::MAX, usize::MAX]), 3);
        let layout = plan_grid(&squares(3, 10.0), &[1, usize::MAX], &ComposeConfig::default());
        assert_eq!(layout.placed_count(), 3);
        assert_eq!(layout.rows[1].figures, vec![1, 2]);
    }

    #[test]
    fn test_display_summary() {
        let sizes = [FigureSize::new(100.0, 50.0), FigureSize::new(80.0, 60.0)];
        let layout = plan_grid(&sizes, &[1, 1], &ComposeConfig::default());
        insta::assert_snapshot!(layout.to_string(), @r"
        page 100 x 116
        row 0: figures [0], 100 x 52
        row 1: figures [1], 80 x 62
        ");
    }
}
