//! Axis-wise descriptive statistics for 2-D arrays.
//!
//! Reducing along `Axis(0)` yields one value per column, along `Axis(1)` one
//! value per row. Lanes are processed in parallel.

use crate::descriptive::{self, Interpolation, KurtosisDefinition};
use crate::sample::NanPolicy;
use ndarray::parallel::prelude::*;
use ndarray::{Array1, Array2, ArrayBase, ArrayView1, Axis, Data, Ix2};

/// The axis whose iteration yields the lanes running along `axis`.
pub(crate) fn lane_axis(axis: Axis) -> anyhow::Result<Axis> {
    match axis.index() {
        0 => Ok(Axis(1)),
        1 => Ok(Axis(0)),
        other => Err(anyhow::anyhow!(
            "Invalid axis {} for a 2-dimensional array",
            other
        )),
    }
}

/// Apply `f` to every lane along `axis` in parallel, keeping lane order.
pub(crate) fn map_lanes<S, R, F>(
    array: &ArrayBase<S, Ix2>,
    axis: Axis,
    f: F,
) -> anyhow::Result<Vec<R>>
where
    S: Data<Elem = f64>,
    R: Send,
    F: Fn(ArrayView1<'_, f64>) -> anyhow::Result<R> + Sync + Send,
{
    array
        .axis_iter(lane_axis(axis)?)
        .into_par_iter()
        .map(f)
        .collect()
}

fn reduce_lanes<S, F>(array: &ArrayBase<S, Ix2>, axis: Axis, f: F) -> anyhow::Result<Array1<f64>>
where
    S: Data<Elem = f64>,
    F: Fn(&[f64]) -> anyhow::Result<f64> + Sync + Send,
{
    let values = map_lanes(array, axis, |lane| f(&lane.to_vec()))?;
    Ok(Array1::from(values))
}

/// Descriptive statistics reduced along one axis of a 2-D array.
pub trait ArrayStats {
    fn min_axis(&self, axis: Axis) -> anyhow::Result<Array1<f64>>;

    fn max_axis(&self, axis: Axis) -> anyhow::Result<Array1<f64>>;

    fn range_axis(&self, axis: Axis) -> anyhow::Result<Array1<f64>>;

    fn skewness_axis(
        &self,
        axis: Axis,
        bias: bool,
        nan_policy: NanPolicy,
    ) -> anyhow::Result<Array1<f64>>;

    fn kurtosis_axis(
        &self,
        axis: Axis,
        definition: KurtosisDefinition,
        bias: bool,
        nan_policy: NanPolicy,
    ) -> anyhow::Result<Array1<f64>>;

    /// Quantiles per lane. Row `i` of the result holds the quantiles `qs` of lane `i`.
    fn quantiles_axis(
        &self,
        qs: &[f64],
        axis: Axis,
        interpolation: Interpolation,
    ) -> anyhow::Result<Array2<f64>>;

    fn iqr_axis(&self, axis: Axis, interpolation: Interpolation) -> anyhow::Result<Array1<f64>>;
}

impl<S> ArrayStats for ArrayBase<S, Ix2>
where
    S: Data<Elem = f64>,
{
    fn min_axis(&self, axis: Axis) -> anyhow::Result<Array1<f64>> {
        reduce_lanes(self, axis, descriptive::minimum)
    }

    fn max_axis(&self, axis: Axis) -> anyhow::Result<Array1<f64>> {
        reduce_lanes(self, axis, descriptive::maximum)
    }

    fn range_axis(&self, axis: Axis) -> anyhow::Result<Array1<f64>> {
        reduce_lanes(self, axis, descriptive::range)
    }

    fn skewness_axis(
        &self,
        axis: Axis,
        bias: bool,
        nan_policy: NanPolicy,
    ) -> anyhow::Result<Array1<f64>> {
        reduce_lanes(self, axis, |lane| descriptive::skewness(lane, bias, nan_policy))
    }

    fn kurtosis_axis(
        &self,
        axis: Axis,
        definition: KurtosisDefinition,
        bias: bool,
        nan_policy: NanPolicy,
    ) -> anyhow::Result<Array1<f64>> {
        reduce_lanes(self, axis, |lane| {
            descriptive::kurtosis(lane, definition, bias, nan_policy)
        })
    }

    fn quantiles_axis(
        &self,
        qs: &[f64],
        axis: Axis,
        interpolation: Interpolation,
    ) -> anyhow::Result<Array2<f64>> {
        let rows = map_lanes(self, axis, |lane| {
            descriptive::quantiles(&lane.to_vec(), qs, interpolation)
        })?;

        let n_lanes = rows.len();
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        Array2::from_shape_vec((n_lanes, qs.len()), flat)
            .map_err(|e| anyhow::anyhow!("Failed to assemble quantile matrix: {}", e))
    }

    fn iqr_axis(&self, axis: Axis, interpolation: Interpolation) -> anyhow::Result<Array1<f64>> {
        reduce_lanes(self, axis, |lane| descriptive::iqr(lane, interpolation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_min_max_along_both_axes() {
        let a = array![[1.0, 5.0, 3.0], [4.0, 2.0, 6.0]];

        assert_eq!(a.min_axis(Axis(0)).unwrap(), array![1.0, 2.0, 3.0]);
        assert_eq!(a.max_axis(Axis(0)).unwrap(), array![4.0, 5.0, 6.0]);
        assert_eq!(a.min_axis(Axis(1)).unwrap(), array![1.0, 2.0]);
        assert_eq!(a.range_axis(Axis(1)).unwrap(), array![4.0, 4.0]);
    }

    #[test]
    fn test_invalid_axis() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        assert!(a.min_axis(Axis(2)).is_err());
        assert!(a.iqr_axis(Axis(5), Interpolation::Linear).is_err());
    }

    #[test]
    fn test_quantiles_axis_shape() {
        let a = array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0]];
        let q = a
            .quantiles_axis(&[0.25, 0.5, 0.75], Axis(0), Interpolation::Linear)
            .unwrap();

        assert_eq!(q.dim(), (2, 3));
        assert_abs_diff_eq!(q[[0, 1]], 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(q[[1, 0]], 17.5, epsilon = 1e-12);
    }

    #[test]
    fn test_skewness_axis_on_view() {
        let a = array![[1.0, 0.0], [2.0, 0.0], [3.0, 0.0], [4.0, 6.0]];
        let skew = a.view().skewness_axis(Axis(0), true, NanPolicy::Omit).unwrap();

        assert_abs_diff_eq!(skew[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(skew[1], 2.0 / 3.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_kurtosis_axis_fisher() {
        let a = array![[1.0, 2.0, 3.0, 4.0, 5.0]];
        let k = a
            .kurtosis_axis(Axis(1), KurtosisDefinition::Fisher, true, NanPolicy::Omit)
            .unwrap();
        assert_abs_diff_eq!(k[0], -1.3, epsilon = 1e-12);
    }
}
