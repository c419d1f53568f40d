// Integration tests for the statkit crate
// End-to-end checks that the descriptive and testing modules work together
// on samples with missing values and on 2-D arrays.

#[cfg(test)]
mod integration_tests {
    use ndarray::{array, Axis};
    use statkit::descriptive::{self, ArrayStats, Interpolation, KurtosisDefinition};
    use statkit::sample::{NanPolicy, Sample};
    use statkit::testing::inference::parametric::difference_in_means;
    use statkit::testing::inference::ArrayStatTests;
    use statkit::testing::{Alternative, TTestType};

    #[test]
    fn test_basic_integration() {
        let x = Sample::new(vec![2.0, 4.0, f64::NAN, 6.0, 8.0]);
        let y = Sample::new(vec![1.0, 1.5, 2.0, f64::NAN, 2.5, 3.0]);

        let result = difference_in_means(x.as_slice(), y.as_slice(), false, Alternative::Greater).unwrap();

        // Basic sanity checks
        assert!(result.p_value >= 0.0 && result.p_value <= 1.0);
        assert!(result.statistic.is_finite());
        assert!(result.statistic > 0.0);
        assert_eq!(result.metadata["nx"], x.count() as f64);
        assert_eq!(result.metadata["ny"], y.count() as f64);
    }

    #[test]
    fn test_descriptive_summary() {
        let data: Vec<f64> = (1..=9).map(f64::from).collect();

        assert_eq!(descriptive::minimum(&data).unwrap(), 1.0);
        assert_eq!(descriptive::maximum(&data).unwrap(), 9.0);
        assert_eq!(descriptive::range(&data).unwrap(), 8.0);
        assert!((descriptive::iqr(&data, Interpolation::Linear).unwrap() - 4.0).abs() < 1e-12);

        let skew = descriptive::skewness(&data, true, NanPolicy::Omit).unwrap();
        assert!(skew.abs() < 1e-12);

        let pearson = descriptive::kurtosis(&data, KurtosisDefinition::Pearson, true, NanPolicy::Omit).unwrap();
        let fisher = descriptive::kurtosis(&data, KurtosisDefinition::Fisher, true, NanPolicy::Omit).unwrap();
        assert!((pearson - fisher - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_array_workflow() {
        // 4 observations x 3 features; group A and group B
        let group_a = array![[1.0, 3.0, 0.0], [1.2, 3.1, 0.5], [0.9, 2.9, 1.0], [1.1, 3.0, 1.5]];
        let group_b = array![[5.0, 3.0, 2.0], [5.2, 3.1, 2.5], [4.9, 2.9, 3.0], [5.1, 3.0, 3.5]];

        let results = group_a
            .t_test_axis(&group_b, Axis(0), TTestType::Welch, Alternative::Less, NanPolicy::Omit)
            .unwrap();

        for (feature, result) in results.iter().enumerate() {
            println!("Feature {}: t={:.3}, p={:.6}", feature, result.statistic, result.p_value);
        }

        assert!(results[0].p_value < 0.001);
        assert!(results[1].p_value > 0.4);
        assert!(results[2].p_value < 0.05);

        let ranges = group_a.range_axis(Axis(0)).unwrap();
        assert!((ranges[0] - 0.3).abs() < 1e-12);
        assert!((ranges[2] - 1.5).abs() < 1e-12);
    }
}
