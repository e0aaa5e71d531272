//! Ordinary least squares: users regressed on (engagement, growth).
//!
//! The model is a pure function of the immutable dataset, so fitting is
//! deterministic and cheap (a 3x3 normal-equations solve over ten rows).
//! Callers may re-fit on every request; nothing is cached here.

use crate::domain::{DomainError, PlatformRow};

/// Fitted linear model `users ~ intercept + c0*engagement + c1*growth`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    /// Coefficients for (engagement, growth), in that order.
    pub coefficients: [f64; 2],
    /// Bias term.
    pub intercept: f64,
}

impl LinearModel {
    /// Fit by ordinary least squares over the given rows.
    ///
    /// Solves the normal equations `XᵀX β = Xᵀy` with an intercept column,
    /// by Gaussian elimination with partial pivoting. Fails only if the
    /// design matrix is singular, which the fixed dataset never is.
    pub fn fit(rows: &[PlatformRow]) -> Result<Self, DomainError> {
        if rows.len() < 3 {
            return Err(DomainError::Validation(
                "need at least 3 rows to fit two features and an intercept".into(),
            ));
        }

        // XᵀX and Xᵀy for the design matrix [1, engagement, growth].
        let mut xtx = [[0.0f64; 3]; 3];
        let mut xty = [0.0f64; 3];
        for row in rows {
            let x = [1.0, f64::from(row.engagement), f64::from(row.growth)];
            let y = f64::from(row.users);
            for i in 0..3 {
                for j in 0..3 {
                    xtx[i][j] += x[i] * x[j];
                }
                xty[i] += x[i] * y;
            }
        }

        let beta = solve3(xtx, xty)
            .ok_or_else(|| DomainError::Validation("design matrix is singular".into()))?;

        Ok(Self {
            coefficients: [beta[1], beta[2]],
            intercept: beta[0],
        })
    }

    /// Predicted user count for one (engagement, growth) pair.
    ///
    /// The model itself imposes no bound on the inputs.
    pub fn predict(&self, engagement: f64, growth: f64) -> f64 {
        self.intercept + self.coefficients[0] * engagement + self.coefficients[1] * growth
    }
}

/// Solve a 3x3 linear system by Gaussian elimination with partial pivoting.
fn solve3(mut a: [[f64; 3]; 3], mut b: [f64; 3]) -> Option<[f64; 3]> {
    for col in 0..3 {
        let pivot = (col..3)
            .max_by(|&r1, &r2| a[r1][col].abs().total_cmp(&a[r2][col].abs()))?;
        if a[pivot][col].abs() < f64::EPSILON {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in (col + 1)..3 {
            let factor = a[row][col] / a[col][col];
            for k in col..3 {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = [0.0f64; 3];
    for row in (0..3).rev() {
        let tail: f64 = ((row + 1)..3).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{find_platform, PLATFORMS};

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() < tol,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn recovers_exact_linear_relationship() {
        // users = 2*engagement + 3*growth + 7, constructed from dataset inputs.
        let rows: Vec<PlatformRow> = PLATFORMS
            .iter()
            .map(|r| PlatformRow {
                users: 2 * r.engagement + 3 * r.growth + 7,
                ..*r
            })
            .collect();

        let model = LinearModel::fit(&rows).unwrap();
        assert_close(model.intercept, 7.0, 1e-6);
        assert_close(model.coefficients[0], 2.0, 1e-6);
        assert_close(model.coefficients[1], 3.0, 1e-6);
    }

    #[test]
    fn fixed_dataset_fit_matches_reference() {
        // Reference values from an independent least-squares solve.
        let model = LinearModel::fit(&PLATFORMS).unwrap();
        assert_close(model.intercept, -4146.8644, 1e-3);
        assert_close(model.coefficients[0], 73.66602, 1e-4);
        assert_close(model.coefficients[1], -67.83140, 1e-4);
    }

    #[test]
    fn prediction_at_facebook_point_carries_ols_residual() {
        let model = LinearModel::fit(&PLATFORMS).unwrap();
        let facebook = find_platform("Facebook").unwrap();
        let predicted = model.predict(
            f64::from(facebook.engagement),
            f64::from(facebook.growth),
        );

        // OLS does not interpolate: the fitted value is near 1775, well
        // below the observed 2900.
        assert_close(predicted, 1775.59, 0.01);
        assert!((predicted - f64::from(facebook.users)).abs() > 1.0);
    }

    #[test]
    fn fit_is_deterministic_across_calls() {
        let first = LinearModel::fit(&PLATFORMS).unwrap();
        let second = LinearModel::fit(&PLATFORMS).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.predict(80.0, 5.0), second.predict(80.0, 5.0));
    }

    #[test]
    fn too_few_rows_is_an_error() {
        assert!(LinearModel::fit(&PLATFORMS[..2]).is_err());
    }

    #[test]
    fn singular_design_matrix_is_an_error() {
        // Identical predictor rows make XᵀX rank-deficient.
        let rows = vec![
            PlatformRow { platform: "A", users: 10, engagement: 50, growth: 5 },
            PlatformRow { platform: "B", users: 20, engagement: 50, growth: 5 },
            PlatformRow { platform: "C", users: 30, engagement: 50, growth: 5 },
            PlatformRow { platform: "D", users: 40, engagement: 50, growth: 5 },
        ];
        assert!(LinearModel::fit(&rows).is_err());
    }
}
