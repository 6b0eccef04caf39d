//! Per-channel moving-average filters behind one shared write cursor.
//!
//! Every channel keeps a ring buffer of the last `K` raw samples plus a
//! running sum, so the average never requires re-walking the window. The
//! write cursor is shared by all channels and advances once per tick, after
//! every channel has recorded its sample for that tick. Sharing the cursor
//! keeps the windows time-aligned, which the gesture detector relies on.

/// Ring buffers and running sums for `N` channels with `K`-sample windows.
#[derive(Clone, Debug)]
pub struct FilterBank<const N: usize, const K: usize> {
    samples: [[i32; K]; N],
    sums: [i32; N],
    cursor: usize,
}

impl<const N: usize, const K: usize> FilterBank<N, K> {
    /// Creates a bank with all windows zeroed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            samples: [[0; K]; N],
            sums: [0; N],
            cursor: 0,
        }
    }

    /// Records `sample` at the shared cursor slot for `channel`.
    ///
    /// The overwritten value leaves the running sum before the new value
    /// enters it, so the subtraction never observes the fresh sample.
    pub fn record(&mut self, channel: usize, sample: i32) {
        let slot = &mut self.samples[channel][self.cursor];
        self.sums[channel] -= *slot;
        *slot = sample;
        self.sums[channel] += sample;
    }

    /// Moves the shared cursor forward one slot, wrapping modulo `K`.
    ///
    /// Called exactly once per tick, after all `N` channels recorded.
    pub fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % K;
    }

    /// Windowed average for `channel`: `sum / K`, truncating toward zero.
    #[must_use]
    pub fn average(&self, channel: usize) -> i32 {
        self.sums[channel] / K as i32
    }

    /// Most recently recorded sample for `channel`.
    ///
    /// Once [`advance`](Self::advance) has run for the tick, that sample
    /// sits one slot behind the cursor.
    #[must_use]
    pub fn last_raw(&self, channel: usize) -> i32 {
        self.samples[channel][(self.cursor + K - 1) % K]
    }

    /// Current shared cursor position, always in `0..K`.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[cfg(test)]
    fn literal_sum(&self, channel: usize) -> i32 {
        self.samples[channel].iter().sum()
    }
}

impl<const N: usize, const K: usize> Default for FilterBank<N, K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_tick<const N: usize, const K: usize>(bank: &mut FilterBank<N, K>, samples: [i32; N]) {
        for (channel, sample) in samples.into_iter().enumerate() {
            bank.record(channel, sample);
        }
        bank.advance();
    }

    #[test]
    fn running_sum_matches_literal_sum_across_wrap() {
        let mut bank = FilterBank::<2, 4>::new();
        let script = [3, 9, -4, 12, 7, 0, 25, -1, 6, 6];

        for (tick, &value) in script.iter().enumerate() {
            run_tick(&mut bank, [value, value * 2]);
            for channel in 0..2 {
                assert_eq!(
                    bank.sums[channel],
                    bank.literal_sum(channel),
                    "sum drifted on tick {tick}"
                );
            }
        }
    }

    #[test]
    fn cursor_wraps_and_stays_in_range() {
        let mut bank = FilterBank::<1, 3>::new();
        for tick in 0..10 {
            assert_eq!(bank.cursor(), tick % 3);
            run_tick(&mut bank, [1]);
        }
    }

    #[test]
    fn average_truncates_toward_zero() {
        let mut bank = FilterBank::<1, 4>::new();
        run_tick(&mut bank, [7]);
        // Sum 7 over a window of 4 truncates to 1.
        assert_eq!(bank.average(0), 1);

        let mut negative = FilterBank::<1, 4>::new();
        run_tick(&mut negative, [-7]);
        assert_eq!(negative.average(0), -1);
    }

    #[test]
    fn last_raw_returns_the_sample_written_this_tick() {
        let mut bank = FilterBank::<1, 3>::new();
        run_tick(&mut bank, [10]);
        assert_eq!(bank.last_raw(0), 10);
        run_tick(&mut bank, [20]);
        assert_eq!(bank.last_raw(0), 20);
        run_tick(&mut bank, [30]);
        run_tick(&mut bank, [40]);
        assert_eq!(bank.last_raw(0), 40);
    }

    #[test]
    fn overwritten_values_leave_the_window() {
        let mut bank = FilterBank::<1, 2>::new();
        run_tick(&mut bank, [100]);
        run_tick(&mut bank, [100]);
        run_tick(&mut bank, [2]);
        // Window now holds [2, 100].
        assert_eq!(bank.average(0), 51);
    }
}
