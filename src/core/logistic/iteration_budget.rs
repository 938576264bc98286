use crate::core::data::viewport::Viewport;

/// r span at which the zoom factor is 1.
const REFERENCE_R_SPAN: f64 = 4.0;

const SKIP_BASE: f64 = 2000.0;
const PLOT_STAGE1_BASE: f64 = 500.0;
const PLOT_STAGE2_BASE: f64 = 5000.0;

/// Step counts for a progressive render. Narrower r spans and higher detail
/// levels get proportionally deeper orbits.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct IterationBudget {
    /// Transient steps discarded before plotting.
    pub skip: usize,
    /// Plotted steps through the end of stage 1.
    pub plot_stage1: usize,
    /// Plotted steps through the end of stage 2, counting stage 1's.
    pub plot_stage2: usize,
}

#[must_use]
pub fn adaptive_multiplier(viewport: &Viewport, detail_level: u8) -> f64 {
    let zoom = (REFERENCE_R_SPAN / viewport.r_range().abs()).min(f64::MAX);
    (zoom.log10() * 2.0).max(1.0) * f64::from(detail_level)
}

impl IterationBudget {
    #[must_use]
    pub fn for_view(viewport: &Viewport, detail_level: u8) -> Self {
        let multiplier = adaptive_multiplier(viewport, detail_level);

        Self {
            skip: (SKIP_BASE * multiplier).floor() as usize,
            plot_stage1: (PLOT_STAGE1_BASE * multiplier).floor() as usize,
            plot_stage2: (PLOT_STAGE2_BASE * multiplier).floor() as usize,
        }
    }

    /// Steps stage 2 adds on top of stage 1.
    #[must_use]
    pub fn stage2_steps(&self) -> usize {
        self.plot_stage2.saturating_sub(self.plot_stage1)
    }
}
