use crate::descriptive::axis::{lane_axis, map_lanes};
use crate::sample::NanPolicy;
use crate::testing::{Alternative, TTestType, TestResult};
use ndarray::{ArrayBase, ArrayView1, Axis, Data, Ix2};
use rayon::iter::IntoParallelIterator;
use rayon::iter::ParallelIterator;

pub mod parametric;

pub mod nonparametric;

/// Hypothesis tests applied lane by lane to 2-D arrays.
///
/// Each lane along `axis` is one sample: with `Axis(0)` every column is tested,
/// with `Axis(1)` every row. Two-array tests pair lane `i` of `self` with lane
/// `i` of `other`, so both arrays must have the same number of lanes; the
/// lanes themselves may differ in length.
pub trait ArrayStatTests {
    fn one_sample_t_test_axis(
        &self,
        null_mean: f64,
        axis: Axis,
        alternative: Alternative,
        nan_policy: NanPolicy,
    ) -> anyhow::Result<Vec<TestResult<f64>>>;

    fn t_test_axis<S2>(
        &self,
        other: &ArrayBase<S2, Ix2>,
        axis: Axis,
        test_type: TTestType,
        alternative: Alternative,
        nan_policy: NanPolicy,
    ) -> anyhow::Result<Vec<TestResult<f64>>>
    where
        S2: Data<Elem = f64>;

    fn ks_2samp_axis<S2>(
        &self,
        other: &ArrayBase<S2, Ix2>,
        axis: Axis,
        alternative: Alternative,
        nan_policy: NanPolicy,
    ) -> anyhow::Result<Vec<TestResult<f64>>>
    where
        S2: Data<Elem = f64>;
}

impl<S> ArrayStatTests for ArrayBase<S, Ix2>
where
    S: Data<Elem = f64>,
{
    fn one_sample_t_test_axis(
        &self,
        null_mean: f64,
        axis: Axis,
        alternative: Alternative,
        nan_policy: NanPolicy,
    ) -> anyhow::Result<Vec<TestResult<f64>>> {
        map_lanes(self, axis, |lane| {
            parametric::one_sample_t_test_with_policy(
                &lane.to_vec(),
                null_mean,
                alternative,
                nan_policy,
            )
        })
    }

    fn t_test_axis<S2>(
        &self,
        other: &ArrayBase<S2, Ix2>,
        axis: Axis,
        test_type: TTestType,
        alternative: Alternative,
        nan_policy: NanPolicy,
    ) -> anyhow::Result<Vec<TestResult<f64>>>
    where
        S2: Data<Elem = f64>,
    {
        map_paired_lanes(self, other, axis, |x, y| {
            parametric::t_test(x, y, test_type, alternative, nan_policy)
        })
    }

    fn ks_2samp_axis<S2>(
        &self,
        other: &ArrayBase<S2, Ix2>,
        axis: Axis,
        alternative: Alternative,
        nan_policy: NanPolicy,
    ) -> anyhow::Result<Vec<TestResult<f64>>>
    where
        S2: Data<Elem = f64>,
    {
        map_paired_lanes(self, other, axis, |x, y| {
            nonparametric::ks_2samp(x, y, alternative, nan_policy)
        })
    }
}

fn map_paired_lanes<S1, S2, F>(
    x: &ArrayBase<S1, Ix2>,
    y: &ArrayBase<S2, Ix2>,
    axis: Axis,
    test: F,
) -> anyhow::Result<Vec<TestResult<f64>>>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    F: Fn(&[f64], &[f64]) -> anyhow::Result<TestResult<f64>> + Sync + Send,
{
    let iter_axis = lane_axis(axis)?;
    if x.len_of(iter_axis) != y.len_of(iter_axis) {
        return Err(anyhow::anyhow!(
            "Incompatible shapes {:?} and {:?} for a test along axis {}",
            x.shape(),
            y.shape(),
            axis.index()
        ));
    }

    let x_lanes: Vec<ArrayView1<'_, f64>> = x.axis_iter(iter_axis).collect();
    let y_lanes: Vec<ArrayView1<'_, f64>> = y.axis_iter(iter_axis).collect();

    (0..x_lanes.len())
        .into_par_iter()
        .map(|lane| test(&x_lanes[lane].to_vec(), &y_lanes[lane].to_vec()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2};

    #[test]
    fn test_t_test_per_column() {
        // Column 0: clear difference, column 1: identical groups
        let x = array![[1.0, 3.0], [1.5, 3.5], [2.0, 4.0]];
        let y = array![[5.0, 3.0], [5.5, 3.5], [6.0, 4.0], [6.5, 4.5]];

        let results = x
            .t_test_axis(&y, Axis(0), TTestType::Student, Alternative::TwoSided, NanPolicy::Omit)
            .unwrap();

        assert_eq!(results.len(), 2);
        assert!(results[0].p_value < 0.001);
        assert!(results[1].p_value > 0.3);
        assert_eq!(results[0].degrees_of_freedom, Some(5.0));
    }

    #[test]
    fn test_incompatible_shapes() {
        let x = Array2::<f64>::zeros((3, 2));
        let y = Array2::<f64>::zeros((3, 4));

        assert!(x
            .t_test_axis(&y, Axis(0), TTestType::Welch, Alternative::TwoSided, NanPolicy::Omit)
            .is_err());
        // Rows pair up fine even though their lengths differ
        assert!(x
            .ks_2samp_axis(&y, Axis(1), Alternative::TwoSided, NanPolicy::Omit)
            .is_ok());
    }

    #[test]
    fn test_ks_per_row_matches_direct_call() {
        let x = array![[1.0, 2.0, 3.0, 4.0], [0.5, 2.5, 1.5, 3.5]];
        let y = array![[5.0, 6.0, 7.0, 2.5, 8.0], [1.0, 2.0, 3.0, 4.0, 5.0]];

        for alternative in [Alternative::TwoSided, Alternative::Greater, Alternative::Less] {
            let results = x
                .ks_2samp_axis(&y, Axis(1), alternative, NanPolicy::Omit)
                .unwrap();
            assert_eq!(results.len(), 2);

            for (row, result) in results.iter().enumerate() {
                let direct = nonparametric::ks_2samp(
                    &x.row(row).to_vec(),
                    &y.row(row).to_vec(),
                    alternative,
                    NanPolicy::Omit,
                )
                .unwrap();
                assert_eq!(result.statistic, direct.statistic);
                assert_eq!(result.p_value, direct.p_value);
                assert_eq!(result.metadata["statistic_location"], direct.metadata["statistic_location"]);
            }
        }

        // Row 0 of x sits below most of y, so the lanes must differ
        let two_sided = x
            .ks_2samp_axis(&y, Axis(1), Alternative::TwoSided, NanPolicy::Omit)
            .unwrap();
        assert!(two_sided[0].statistic > two_sided[1].statistic);
    }

    #[test]
    fn test_one_sample_per_row() {
        let x = array![[1.0, 2.0, 3.0, 4.0, 5.0], [2.0, 2.5, 3.0, 3.5, 4.0]];
        let results = x
            .one_sample_t_test_axis(3.0, Axis(1), Alternative::Greater, NanPolicy::Omit)
            .unwrap();

        for result in &results {
            assert_abs_diff_eq!(result.statistic, 0.0);
            assert_abs_diff_eq!(result.p_value, 0.5, epsilon = 1e-12);
            assert_eq!(result.degrees_of_freedom, Some(4.0));
        }
    }

    #[test]
    fn test_invalid_axis() {
        let x = Array2::<f64>::zeros((2, 2));
        assert!(x
            .one_sample_t_test_axis(0.0, Axis(3), Alternative::TwoSided, NanPolicy::Omit)
            .is_err());
    }
}
