use crate::common::constants::RASTA_FIR_LEN;
use crate::common::scaler::Scaler;

/// Fixed-capacity cyclic history holding the last RASTA_FIR_LEN samples of
/// every band, backed by a borrowed scratch slice. One write column is
/// shared by all bands and advances by one position per recorded frame,
/// overwriting the oldest samples.
pub struct FirHistory<'a> {
    samples: &'a mut [Scaler], // n_bands * RASTA_FIR_LEN, one row per band
    n_bands: usize,
    head: usize,   // column holding the most recent frame
    filled: usize, // frames recorded, saturates at RASTA_FIR_LEN
}

impl<'a> FirHistory<'a> {
    pub fn new(n_bands: usize, scaler_buf: &'a mut [Scaler]) -> (Self, &'a mut [Scaler]) {
        let (samples, scaler_buf) = scaler_buf.split_at_mut(n_bands * RASTA_FIR_LEN);
        samples.fill(0.0);

        (
            Self {
                samples,
                n_bands,
                head: RASTA_FIR_LEN - 1,
                filled: 0,
            },
            scaler_buf,
        )
    }

    pub const fn calc_working_buffer_length(n_bands: usize) -> usize {
        n_bands * RASTA_FIR_LEN
    }

    /// Records one sample per band as the newest history column.
    pub fn push(&mut self, frame: &[Scaler]) {
        assert_eq!(frame.len(), self.n_bands);

        self.head = (self.head + 1) % RASTA_FIR_LEN;
        for (band, value) in frame.iter().enumerate() {
            self.samples[band * RASTA_FIR_LEN + self.head] = *value;
        }
        if self.filled < RASTA_FIR_LEN {
            self.filled += 1;
        }
    }

    /// Sample of `band` recorded `age` frames ago (0 = newest). Columns not
    /// written since the last reset read as zero.
    pub fn sample(&self, band: usize, age: usize) -> Scaler {
        debug_assert!(age < RASTA_FIR_LEN);
        let column = (self.head + RASTA_FIR_LEN - age) % RASTA_FIR_LEN;
        self.samples[band * RASTA_FIR_LEN + column]
    }

    /// True once every history column has been written.
    pub fn is_full(&self) -> bool {
        self.filled == RASTA_FIR_LEN
    }

    /// Frames recorded since construction or the last reset, capped at the
    /// history depth.
    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    pub fn reset(&mut self) {
        self.samples.fill(0.0);
        self.head = RASTA_FIR_LEN - 1;
        self.filled = 0;
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;

    #[test]
    fn empty_history_reads_zero() {
        let mut buf = [1.0; 2 * RASTA_FIR_LEN];
        let (history, _) = FirHistory::new(2, &mut buf);

        assert!(history.is_empty());
        assert!(!history.is_full());
        for age in 0..RASTA_FIR_LEN {
            assert_eq!(history.sample(0, age), 0.0);
            assert_eq!(history.sample(1, age), 0.0);
        }
    }

    #[test]
    fn newest_sample_has_age_zero() {
        let mut buf = [0.0; RASTA_FIR_LEN];
        let (mut history, _) = FirHistory::new(1, &mut buf);

        history.push(&[10.0]);
        history.push(&[20.0]);
        history.push(&[30.0]);

        assert_eq!(history.len(), 3);
        assert_eq!(history.sample(0, 0), 30.0);
        assert_eq!(history.sample(0, 1), 20.0);
        assert_eq!(history.sample(0, 2), 10.0);
        assert_eq!(history.sample(0, 3), 0.0); // not written yet
    }

    #[test]
    fn wraps_around_overwriting_the_oldest() {
        let mut buf = [0.0; RASTA_FIR_LEN];
        let (mut history, _) = FirHistory::new(1, &mut buf);

        for n in 1..=7 {
            history.push(&[n as Scaler]);
        }

        assert!(history.is_full());
        assert_eq!(history.sample(0, 0), 7.0);
        assert_eq!(history.sample(0, 1), 6.0);
        assert_eq!(history.sample(0, 4), 3.0); // 1.0 and 2.0 were overwritten
    }

    #[test]
    fn bands_are_independent() {
        let mut buf = [0.0; 3 * RASTA_FIR_LEN];
        let (mut history, _) = FirHistory::new(3, &mut buf);

        history.push(&[1.0, 2.0, 3.0]);
        history.push(&[4.0, 5.0, 6.0]);

        assert_eq!(history.sample(0, 0), 4.0);
        assert_eq!(history.sample(1, 0), 5.0);
        assert_eq!(history.sample(2, 0), 6.0);
        assert_eq!(history.sample(0, 1), 1.0);
        assert_eq!(history.sample(2, 1), 3.0);
    }

    #[test]
    fn reset_restores_stream_start() {
        let mut buf = [0.0; RASTA_FIR_LEN];
        let (mut history, _) = FirHistory::new(1, &mut buf);

        for n in 0..RASTA_FIR_LEN {
            history.push(&[(n + 1) as Scaler]);
        }
        assert!(history.is_full());

        history.reset();
        assert!(history.is_empty());
        assert_eq!(history.sample(0, 0), 0.0);

        history.push(&[9.0]);
        assert_eq!(history.sample(0, 0), 9.0);
        assert_eq!(history.len(), 1);
    }
}
