/// Per-pixel hit counts for one render job, with the running maximum kept
/// alongside so tone mapping never needs a second scan.
#[derive(Debug, Clone, PartialEq)]
pub struct HitHistogram {
    width: u32,
    height: u32,
    counts: Vec<u32>,
    max_hits: u32,
}

impl HitHistogram {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            counts: vec![0; width as usize * height as usize],
            max_hits: 0,
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn max_hits(&self) -> u32 {
        self.max_hits
    }

    /// Row-major counts, top row first.
    #[must_use]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    #[must_use]
    pub fn count(&self, column: u32, row: u32) -> u32 {
        self.counts[self.index_of(column, row)]
    }

    /// Adds one hit and returns the cell's new count.
    ///
    /// # Panics
    /// Panics if the cell lies outside the histogram.
    pub fn record(&mut self, column: u32, row: u32) -> u32 {
        let index = self.index_of(column, row);
        let cell = &mut self.counts[index];
        *cell = cell.saturating_add(1);

        if *cell > self.max_hits {
            self.max_hits = *cell;
        }

        *cell
    }

    #[must_use]
    pub fn total_hits(&self) -> u64 {
        self.counts.iter().map(|&count| u64::from(count)).sum()
    }

    fn index_of(&self, column: u32, row: u32) -> usize {
        assert!(
            column < self.width && row < self.height,
            "cell ({}, {}) outside {}x{} histogram",
            column,
            row,
            self.width,
            self.height
        );
        row as usize * self.width as usize + column as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_histogram_is_empty() {
        let histogram = HitHistogram::new(4, 3);

        assert_eq!(histogram.counts().len(), 12);
        assert_eq!(histogram.max_hits(), 0);
        assert_eq!(histogram.total_hits(), 0);
    }

    #[test]
    fn test_record_tracks_running_maximum() {
        let mut histogram = HitHistogram::new(4, 3);

        assert_eq!(histogram.record(1, 2), 1);
        assert_eq!(histogram.record(1, 2), 2);
        assert_eq!(histogram.record(3, 0), 1);

        assert_eq!(histogram.max_hits(), 2);
        assert_eq!(histogram.count(1, 2), 2);
        assert_eq!(histogram.count(3, 0), 1);
        assert_eq!(histogram.count(0, 0), 0);
        assert_eq!(histogram.total_hits(), 3);
    }

    #[test]
    fn test_record_is_row_major() {
        let mut histogram = HitHistogram::new(4, 3);

        histogram.record(1, 2);

        assert_eq!(histogram.counts()[2 * 4 + 1], 1);
    }

    #[test]
    fn test_max_hits_matches_full_scan() {
        let mut histogram = HitHistogram::new(5, 5);
        for i in 0..40u32 {
            histogram.record(i % 5, (i * 7) % 5);
            histogram.record(2, 2);
        }

        let scanned = histogram.counts().iter().copied().max().unwrap();

        assert_eq!(histogram.max_hits(), scanned);
    }

    #[test]
    #[should_panic(expected = "outside 4x3 histogram")]
    fn test_record_outside_bounds_panics() {
        let mut histogram = HitHistogram::new(4, 3);
        histogram.record(4, 0);
    }
}
