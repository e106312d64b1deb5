use harris_core::{Candidate, PixelBuffer};
use log::{debug, trace};
use crate::error::{HarrisError, HarrisResult};

/// Cells already claimed by an accepted candidate
pub struct SuppressionMask {
    rows: usize,
    cols: usize,
    bits: Vec<bool>,
}

impl SuppressionMask {
    /// Mask with nothing suppressed
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            bits: vec![false; rows * cols],
        }
    }

    /// Out-of-range positions read as suppressed.
    #[inline]
    pub fn is_suppressed(&self, row: usize, col: usize) -> bool {
        if row >= self.rows || col >= self.cols {
            return true;
        }
        self.bits[row * self.cols + col]
    }

    /// Mark the Chebyshev square of half-width `radius` around `(row, col)`,
    /// clipped to the mask.
    pub fn suppress_around(&mut self, row: usize, col: usize, radius: usize) {
        if self.rows == 0 || self.cols == 0 {
            return;
        }
        let r0 = row.saturating_sub(radius);
        let r1 = row.saturating_add(radius).min(self.rows - 1);
        let c0 = col.saturating_sub(radius);
        let c1 = col.saturating_add(radius).min(self.cols - 1);
        for r in r0..=r1 {
            let start = r * self.cols;
            self.bits[start + c0..=start + c1].fill(true);
        }
    }

    /// Number of suppressed cells
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

/// `rows * cols * percentage`, multiplied in `f32` and truncated
pub fn target_count(rows: usize, cols: usize, percentage: f32) -> usize {
    ((rows * cols) as f32 * percentage) as usize
}

/// Accept percentages in (0, 1]; NaN is rejected
pub fn validate_percentage(percentage: f32) -> HarrisResult<()> {
    if percentage > 0.0 && percentage <= 1.0 {
        Ok(())
    } else {
        Err(HarrisError::InvalidPercentage(percentage))
    }
}

/// Greedy non-maximum suppression over a response buffer.
///
/// Candidates are scanned by descending score; ties keep row-major order.
/// Each accepted candidate suppresses its `suppression_radius` square and is
/// shifted by `1 + filter_range` on both axes into image coordinates.
/// Scanning stops after `target_count(rows, cols, percentage)` acceptances.
pub fn select_maxima(
    responses: &PixelBuffer,
    percentage: f32,
    filter_range: usize,
    suppression_radius: usize,
) -> HarrisResult<Vec<Candidate>> {
    validate_percentage(percentage)?;

    let (rows, cols) = responses.dimensions();
    let target = target_count(rows, cols, percentage);
    let offset = filter_range
        .checked_add(1)
        .filter(|&o| rows.checked_add(o).is_some() && cols.checked_add(o).is_some())
        .ok_or_else(|| {
            HarrisError::InvalidConfig(format!(
                "filter range {filter_range} overflows the coordinate remap"
            ))
        })?;

    let mut ranked: Vec<Candidate> = responses
        .pixels()
        .map(|(row, col, score)| Candidate { row, col, score })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut mask = SuppressionMask::new(rows, cols);
    let mut accepted = Vec::with_capacity(target.min(ranked.len()));
    let mut scanned = 0;

    for candidate in ranked {
        if accepted.len() >= target {
            break;
        }
        scanned += 1;
        if mask.is_suppressed(candidate.row, candidate.col) {
            continue;
        }
        mask.suppress_around(candidate.row, candidate.col, suppression_radius);
        accepted.push(Candidate {
            row: candidate.row + offset,
            col: candidate.col + offset,
            score: candidate.score,
        });
    }

    trace!(
        "selection: accepted {} of {} requested, scanned {} of {}",
        accepted.len(),
        target,
        scanned,
        rows * cols
    );
    if accepted.len() < target {
        debug!(
            "only {} candidates survive radius {} suppression ({} requested)",
            accepted.len(),
            suppression_radius,
            target
        );
    }
    Ok(accepted)
}
