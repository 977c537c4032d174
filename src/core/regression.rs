use crate::utils::error::{HousingError, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// 主元小於此相對門檻視為線性相依
const RANK_TOLERANCE: f64 = 1e-10;

/// Ordinary least squares with an intercept.
///
/// Features and target are centered before solving the normal equations, so the
/// intercept falls out as `mean(y) - mean(x) · coefficients`. Directions with no
/// independent information (for example one-hot columns that together duplicate the
/// intercept) receive a zero weight; predictions are unaffected by that choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub rank: usize,
}

impl LinearRegression {
    pub fn fit(x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<Self> {
        let (n_samples, n_features) = x.dim();
        if n_samples == 0 {
            return Err(HousingError::data("cannot fit a model on zero samples"));
        }
        if y.len() != n_samples {
            return Err(HousingError::data(format!(
                "feature matrix has {} rows but target has {} values",
                n_samples,
                y.len()
            )));
        }

        let x_mean = x
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(n_features));
        let y_mean = y.sum() / n_samples as f64;

        let x_centered = &x - &x_mean;
        let y_centered = &y - y_mean;

        let gram = x_centered.t().dot(&x_centered);
        let moment = x_centered.t().dot(&y_centered);

        let (coefficients, rank) = solve_normal_equations(gram, moment);
        let intercept = y_mean - x_mean.dot(&coefficients);

        tracing::debug!(
            "Fitted linear regression on {} samples, {} features (rank {})",
            n_samples,
            n_features,
            rank
        );

        Ok(Self {
            coefficients: coefficients.to_vec(),
            intercept,
            rank,
        })
    }

    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    pub fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        if x.ncols() != self.n_features() {
            return Err(HousingError::model(format!(
                "model expects {} features but got {}",
                self.n_features(),
                x.ncols()
            )));
        }
        let coefficients = ArrayView1::from(self.coefficients.as_slice());
        Ok(x.dot(&coefficients) + self.intercept)
    }
}

/// Gauss-Jordan elimination with partial pivoting on a symmetric positive
/// semi-definite system. Columns without a usable pivot are free and fixed at zero.
fn solve_normal_equations(mut a: Array2<f64>, mut b: Array1<f64>) -> (Array1<f64>, usize) {
    let n = b.len();
    let scale = a.diag().iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    let tolerance = scale * RANK_TOLERANCE * n.max(1) as f64;

    let mut pivot_columns = Vec::with_capacity(n);
    let mut row = 0;

    for col in 0..n {
        if row == n {
            break;
        }

        let (best_row, best_value) = (row..n)
            .map(|r| (r, a[[r, col]].abs()))
            .fold((row, -1.0), |best, cur| if cur.1 > best.1 { cur } else { best });

        if best_value <= tolerance {
            continue;
        }

        if best_row != row {
            for k in 0..n {
                a.swap([row, k], [best_row, k]);
            }
            b.swap(row, best_row);
        }

        let pivot = a[[row, col]];
        for k in 0..n {
            a[[row, k]] /= pivot;
        }
        b[row] /= pivot;

        for r in 0..n {
            if r == row {
                continue;
            }
            let factor = a[[r, col]];
            if factor == 0.0 {
                continue;
            }
            for k in 0..n {
                a[[r, k]] -= factor * a[[row, k]];
            }
            b[r] -= factor * b[row];
        }

        pivot_columns.push(col);
        row += 1;
    }

    let mut solution = Array1::zeros(n);
    for (r, col) in pivot_columns.iter().enumerate() {
        solution[*col] = b[r];
    }

    (solution, pivot_columns.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_recovers_exact_linear_relation() {
        let x = array![
            [1.0, 2.0],
            [2.0, 1.0],
            [3.0, 5.0],
            [4.0, 3.0],
            [5.0, 8.0],
        ];
        let y = x.column(0).mapv(|v| 3.0 * v) - x.column(1).mapv(|v| 2.0 * v) + 5.0;

        let model = LinearRegression::fit(x.view(), y.view()).unwrap();

        assert_eq!(model.rank, 2);
        assert!((model.coefficients[0] - 3.0).abs() < 1e-9);
        assert!((model.coefficients[1] + 2.0).abs() < 1e-9);
        assert!((model.intercept - 5.0).abs() < 1e-9);

        let predictions = model.predict(x.view()).unwrap();
        for (p, t) in predictions.iter().zip(y.iter()) {
            assert!((p - t).abs() < 1e-9);
        }
    }

    #[test]
    fn test_collinear_one_hot_columns() {
        // the two indicator columns always sum to one, like the intercept
        let x = array![
            [0.5, 1.0, 0.0],
            [1.5, 0.0, 1.0],
            [2.0, 1.0, 0.0],
            [3.5, 0.0, 1.0],
            [4.0, 1.0, 0.0],
            [5.0, 0.0, 1.0],
        ];
        let y = array![11.0, 23.0, 14.0, 27.0, 18.0, 30.0];

        let model = LinearRegression::fit(x.view(), y.view()).unwrap();
        assert_eq!(model.rank, 2);

        let predictions = model.predict(x.view()).unwrap();
        for (p, t) in predictions.iter().zip(y.iter()) {
            assert!((p - t).abs() < 1e-8, "prediction {p} target {t}");
        }
    }

    #[test]
    fn test_constant_target_has_zero_weights() {
        let x = array![[1.0], [2.0], [3.0]];
        let y = array![7.0, 7.0, 7.0];

        let model = LinearRegression::fit(x.view(), y.view()).unwrap();
        assert!(model.coefficients[0].abs() < 1e-12);
        assert!((model.intercept - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_fit_errors() {
        let empty = Array2::<f64>::zeros((0, 2));
        let no_targets = Array1::<f64>::zeros(0);
        assert!(LinearRegression::fit(empty.view(), no_targets.view()).is_err());

        let x = array![[1.0], [2.0]];
        let y = array![1.0];
        assert!(LinearRegression::fit(x.view(), y.view()).is_err());
    }

    #[test]
    fn test_predict_dimension_mismatch() {
        let x = array![[1.0], [2.0], [3.0]];
        let y = array![2.0, 4.0, 6.0];
        let model = LinearRegression::fit(x.view(), y.view()).unwrap();

        let wrong = array![[1.0, 2.0]];
        assert!(matches!(
            model.predict(wrong.view()),
            Err(HousingError::ModelError { .. })
        ));
    }
}
