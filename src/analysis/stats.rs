//! Document-level font statistics.

/// Mean and modal font size of a document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentFontProfile {
    /// Arithmetic mean of all span sizes
    pub mean_size: f64,
    /// Most common span size; ties go to the size seen first
    pub modal_size: f32,
    /// Number of sizes observed
    pub samples: usize,
}

impl DocumentFontProfile {
    /// Build a profile from a sequence of font sizes.
    ///
    /// Returns `None` for an empty sequence.
    pub fn from_sizes<I>(sizes: I) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        // (size, count) in first-seen order
        let mut histogram: Vec<(f32, usize)> = Vec::new();
        let mut sum = 0.0f64;
        let mut samples = 0usize;

        for size in sizes {
            sum += size as f64;
            samples += 1;
            match histogram.iter_mut().find(|(s, _)| *s == size) {
                Some((_, count)) => *count += 1,
                None => histogram.push((size, 1)),
            }
        }

        if samples == 0 {
            return None;
        }

        let mut modal = histogram[0];
        for &(size, count) in &histogram[1..] {
            if count > modal.1 {
                modal = (size, count);
            }
        }

        Some(Self {
            mean_size: sum / samples as f64,
            modal_size: modal.0,
            samples,
        })
    }

    /// Size at or above which a span counts as large, in f64 so boundary
    /// sizes compare the same as double-precision layout data.
    pub fn size_threshold(&self, mean_margin: f32, modal_margin: f32) -> f64 {
        let by_mean = self.mean_size + f64::from(mean_margin);
        let by_mode = f64::from(self.modal_size) + f64::from(modal_margin);
        by_mean.max(by_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_has_no_profile() {
        assert!(DocumentFontProfile::from_sizes(Vec::new()).is_none());
    }

    #[test]
    fn test_mean_and_mode() {
        let profile = DocumentFontProfile::from_sizes([10.0, 12.0, 12.0, 14.0, 22.0]).unwrap();
        assert!((profile.mean_size - 14.0).abs() < 1e-9);
        assert_eq!(profile.modal_size, 12.0);
        assert_eq!(profile.samples, 5);
    }

    #[test]
    fn test_mode_tie_goes_to_first_seen() {
        let profile = DocumentFontProfile::from_sizes([14.0, 11.0, 11.0, 14.0]).unwrap();
        assert_eq!(profile.modal_size, 14.0);

        let profile = DocumentFontProfile::from_sizes([11.0, 14.0, 14.0, 11.0]).unwrap();
        assert_eq!(profile.modal_size, 11.0);
    }

    #[test]
    fn test_size_threshold() {
        let profile = DocumentFontProfile::from_sizes([12.0, 12.0, 12.0]).unwrap();
        assert_eq!(profile.size_threshold(2.0, 1.0), 14.0);

        let profile = DocumentFontProfile::from_sizes([10.0, 10.0, 10.0, 30.0]).unwrap();
        // mean 15.0 + 2.0 beats mode 10.0 + 1.0
        assert_eq!(profile.size_threshold(2.0, 1.0), 17.0);
    }

    #[test]
    fn test_threshold_boundary_uses_double_precision() {
        let mut sizes = vec![10.0f32; 10];
        sizes.push(12.2);
        let profile = DocumentFontProfile::from_sizes(sizes).unwrap();
        // mean + 2.0 lands just above 12.2 as stored in f32
        assert!(f64::from(12.2f32) < profile.size_threshold(2.0, 1.0));
    }
}
