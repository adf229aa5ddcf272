use crate::pathing::costmatrix::*;

/// Debug sink for the per-tick cost matrix. Nothing downstream depends on
/// what a sink does with it.
pub trait CostMatrixVisualizer {
    fn visualize_cost_matrix(&mut self, cost_matrix: &CostMatrix);
}

/// Glyph for a cell cost.
///
/// `.` free, `-` gradient tail, `o` threat zone, `x` near contact, `#` contact.
pub fn cost_glyph(cost: u8) -> char {
    match cost {
        0 => '.',
        1..=99 => '-',
        100..=149 => 'o',
        150..=199 => 'x',
        _ => '#',
    }
}

/// Renders the matrix as text, one line per row. Keeps only the most recent
/// rendering.
#[derive(Debug, Default)]
pub struct AsciiCostMatrixVisualizer {
    rendered: String,
}

impl AsciiCostMatrixVisualizer {
    pub fn new() -> AsciiCostMatrixVisualizer {
        AsciiCostMatrixVisualizer::default()
    }

    pub fn rendered(&self) -> &str {
        &self.rendered
    }
}

impl CostMatrixVisualizer for AsciiCostMatrixVisualizer {
    fn visualize_cost_matrix(&mut self, cost_matrix: &CostMatrix) {
        let width = cost_matrix.width() as usize;
        let height = cost_matrix.height() as usize;

        self.rendered.clear();
        self.rendered.reserve((width + 1) * height);

        for row in cost_matrix.rows() {
            self.rendered.extend(row.iter().map(|cost| cost_glyph(*cost)));
            self.rendered.push('\n');
        }
    }
}
