use crate::core::actions::cancellation::{CancelToken, Cancelled};
use crate::core::data::column_checkpoints::{ColumnCheckpoints, ColumnState};
use crate::core::data::hit_histogram::HitHistogram;
use crate::core::data::viewport::Viewport;
use crate::core::logistic::iteration_budget::IterationBudget;
use crate::core::logistic::orbit::{iterate, Orbit, INITIAL_STATE};
use crate::core::util::plane_coords::{in_safety_band, r_at_column, row_for_state};

/// Plots an orbit into one histogram column and reports where it ended.
fn plot_column(
    histogram: &mut HitHistogram,
    column: u32,
    orbit: &mut Orbit,
    viewport: &Viewport,
) -> ColumnState {
    let height = histogram.height();

    for x in orbit.by_ref() {
        if let Some(row) = row_for_state(x, height, viewport) {
            histogram.record(column, row);
        }
    }

    if orbit.escaped() {
        ColumnState::Escaped
    } else {
        ColumnState::Resumable(orbit.state())
    }
}

/// First progressive stage: pays for the transient of every column, plots
/// `budget.plot_stage1` iterates and checkpoints each column's end state.
///
/// Columns outside the safety band, or whose transient escapes, keep
/// [`ColumnState::Skipped`] and add nothing to the histogram.
pub fn accumulate_first_stage<C: CancelToken>(
    histogram: &mut HitHistogram,
    checkpoints: &mut ColumnCheckpoints,
    viewport: &Viewport,
    budget: &IterationBudget,
    cancel: &C,
) -> Result<(), Cancelled> {
    let width = histogram.width();

    for column in 0..width {
        cancel.check()?;

        let r = r_at_column(column, width, viewport);
        if !in_safety_band(r) {
            checkpoints.set(column, ColumnState::Skipped);
            continue;
        }

        let mut transient = iterate(r, INITIAL_STATE, budget.skip);
        transient.exhaust();
        if transient.escaped() {
            checkpoints.set(column, ColumnState::Skipped);
            continue;
        }

        let mut orbit = transient.resume(budget.plot_stage1);
        let state = plot_column(histogram, column, &mut orbit, viewport);
        checkpoints.set(column, state);
    }

    Ok(())
}

/// Second progressive stage: resumes every still-bounded column from its
/// checkpoint and plots the remaining `plot_stage2 - plot_stage1` iterates
/// into the same histogram. The transient is never repeated.
pub fn accumulate_second_stage<C: CancelToken>(
    histogram: &mut HitHistogram,
    checkpoints: &mut ColumnCheckpoints,
    viewport: &Viewport,
    budget: &IterationBudget,
    cancel: &C,
) -> Result<(), Cancelled> {
    let width = histogram.width();
    let steps = budget.stage2_steps();

    for column in 0..width {
        cancel.check()?;

        let ColumnState::Resumable(x) = checkpoints.get(column) else {
            continue;
        };

        let r = r_at_column(column, width, viewport);
        let mut orbit = iterate(r, x, steps);
        let state = plot_column(histogram, column, &mut orbit, viewport);
        checkpoints.set(column, state);
    }

    Ok(())
}
