use std::iter::FusedIterator;

/// Once `|x|` passes this the map runs off to infinity.
pub const ESCAPE_BOUND: f64 = 2.0;

/// Every column starts its orbit here.
pub const INITIAL_STATE: f64 = 0.5;

#[inline]
#[must_use]
pub fn logistic(r: f64, x: f64) -> f64 {
    r * x * (1.0 - x)
}

/// Lazy run of the logistic map from a given state.
///
/// Yields at most `max_steps` iterates and stops early the first time an
/// iterate escapes. The escaping value is not yielded but stays available
/// through [`Orbit::state`], with [`Orbit::escaped`] set.
#[derive(Debug, Clone)]
pub struct Orbit {
    r: f64,
    x: f64,
    remaining: usize,
    escaped: bool,
}

#[must_use]
pub fn iterate(r: f64, x0: f64, max_steps: usize) -> Orbit {
    Orbit::new(r, x0, max_steps)
}

impl Orbit {
    #[must_use]
    pub fn new(r: f64, x0: f64, max_steps: usize) -> Self {
        Self {
            r,
            x: x0,
            remaining: max_steps,
            escaped: false,
        }
    }

    /// The latest iterate, or the starting state if nothing ran yet.
    #[must_use]
    pub fn state(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn escaped(&self) -> bool {
        self.escaped
    }

    /// Runs the remaining steps without yielding them. Returns the final state.
    pub fn exhaust(&mut self) -> f64 {
        for _ in self.by_ref() {}
        self.x
    }

    /// Continues from the current state for another `max_steps` steps.
    /// An escaped orbit stays escaped.
    #[must_use]
    pub fn resume(&self, max_steps: usize) -> Self {
        Self {
            r: self.r,
            x: self.x,
            remaining: if self.escaped { 0 } else { max_steps },
            escaped: self.escaped,
        }
    }
}

impl Iterator for Orbit {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.escaped || self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        self.x = logistic(self.r, self.x);

        if self.x.abs() > ESCAPE_BOUND {
            self.escaped = true;
            self.remaining = 0;
            return None;
        }

        Some(self.x)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

impl FusedIterator for Orbit {}
