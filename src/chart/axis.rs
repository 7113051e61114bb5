//! Vertical axis assignment for series with very different scales
//!
//! A series' magnitude is the median of its absolute observed values. A series
//! moves to the secondary axis when its magnitude is at least `ratio` times
//! the median magnitude of the other series.

use crate::data::Column;
use serde::Serialize;
use statrs::statistics::{Data, Median};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Axis {
    Primary,
    Secondary,
}

fn median(values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let m = Data::new(values).median();
    m.is_finite().then_some(m)
}

/// Median absolute observed value of a column
pub fn magnitude(column: &Column) -> Option<f64> {
    median(column.observed().filter(|v| v.is_finite()).map(f64::abs).collect())
}

/// Axis for each column, in column order
pub fn assign_axes(columns: &[Column], ratio: f64) -> Vec<Axis> {
    let magnitudes: Vec<Option<f64>> = columns.iter().map(magnitude).collect();

    magnitudes
        .iter()
        .enumerate()
        .map(|(i, mag)| {
            let Some(mag) = mag else {
                return Axis::Primary;
            };
            let others: Vec<f64> = magnitudes
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .filter_map(|(_, m)| *m)
                .collect();

            match median(others) {
                Some(baseline) if baseline > 0.0 && *mag >= ratio * baseline => Axis::Secondary,
                _ => Axis::Primary,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, values: &[f64]) -> Column {
        Column::new(name, values.iter().map(|v| Some(*v)).collect())
    }

    #[test]
    fn test_peso_scale_goes_secondary() {
        let columns = vec![
            column("Real (BRL)", &[4.9, 5.0, 5.4]),
            column("Argentine Peso (ARS)", &[350.0, 800.0, 900.0]),
            column("Mexican Peso (MXN)", &[17.0, 17.5, 18.2]),
            column("Chinese Yuan (CNY)", &[7.1, 7.2, 7.3]),
            column("Indian Rupee (INR)", &[82.0, 83.0, 83.5]),
        ];

        let axes = assign_axes(&columns, 10.0);
        assert_eq!(
            axes,
            vec![
                Axis::Primary,
                Axis::Secondary,
                Axis::Primary,
                Axis::Primary,
                Axis::Primary
            ]
        );
    }

    #[test]
    fn test_two_series_split() {
        let columns = vec![column("small", &[5.0]), column("large", &[900.0])];
        assert_eq!(
            assign_axes(&columns, 10.0),
            vec![Axis::Primary, Axis::Secondary]
        );
    }

    #[test]
    fn test_single_series_is_primary() {
        let columns = vec![column("only", &[900.0])];
        assert_eq!(assign_axes(&columns, 10.0), vec![Axis::Primary]);
    }

    #[test]
    fn test_similar_scales_stay_primary() {
        let columns = vec![column("a", &[5.0]), column("b", &[7.0]), column("c", &[18.0])];
        assert!(assign_axes(&columns, 10.0).iter().all(|a| *a == Axis::Primary));
    }

    #[test]
    fn test_empty_column_is_primary() {
        let columns = vec![Column::new("empty", vec![None]), column("b", &[7.0])];
        assert_eq!(
            assign_axes(&columns, 10.0),
            vec![Axis::Primary, Axis::Primary]
        );
    }

    #[test]
    fn test_magnitude_is_median() {
        assert_eq!(magnitude(&column("a", &[1.0, 100.0, 3.0])), Some(3.0));
    }
}
