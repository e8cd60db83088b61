// Hand-off point to downstream feature extraction. The generator only promises a
// finished canvas; what gets measured from it is up to the implementation.

use crate::types::Canvas;

pub trait FeatureExtractor {
    fn extract_features(&self, canvas: &Canvas) -> Vec<f64>;
}

/// Plain functions and closures work as extractors.
impl<F> FeatureExtractor for F
where
    F: Fn(&Canvas) -> Vec<f64>,
{
    fn extract_features(&self, canvas: &Canvas) -> Vec<f64> {
        self(canvas)
    }
}
