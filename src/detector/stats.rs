//! Small statistics helpers shared by the detector variants.
//!
//! Everything here works on plain `f64` slices; no detector needs more
//! linear algebra than a covariance matrix, its inverse, and a
//! symmetric eigendecomposition.

/// Column-wise mean of a set of rows.
pub fn mean_rows(rows: &[Vec<f64>]) -> Vec<f64> {
    if rows.is_empty() {
        return Vec::new();
    }
    let d = rows[0].len();
    let n = rows.len() as f64;
    let mut mean = vec![0.0; d];
    for row in rows {
        for (m, &x) in mean.iter_mut().zip(row.iter()) {
            *m += x;
        }
    }
    for m in &mut mean {
        *m /= n;
    }
    mean
}

/// Sample covariance matrix (divides by n - 1; zero matrix when n < 2).
pub fn covariance_matrix(rows: &[Vec<f64>], mean: &[f64]) -> Vec<Vec<f64>> {
    let d = mean.len();
    let mut cov = vec![vec![0.0; d]; d];
    if rows.len() < 2 {
        return cov;
    }
    let denom = (rows.len() - 1) as f64;
    for row in rows {
        for i in 0..d {
            let di = row[i] - mean[i];
            for j in i..d {
                cov[i][j] += di * (row[j] - mean[j]) / denom;
            }
        }
    }
    for i in 0..d {
        for j in 0..i {
            cov[i][j] = cov[j][i];
        }
    }
    cov
}

/// Invert a square matrix via Gauss-Jordan elimination with partial
/// pivoting. Returns `None` when the matrix is (numerically) singular.
pub fn invert(matrix: &[Vec<f64>]) -> Option<Vec<Vec<f64>>> {
    let n = matrix.len();
    let mut a: Vec<Vec<f64>> = matrix.to_vec();
    let mut inv = identity(n);

    for col in 0..n {
        // Partial pivot: largest absolute value in this column
        let pivot_row = (col..n).max_by(|&i, &j| {
            a[i][col]
                .abs()
                .partial_cmp(&a[j][col].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;
        if a[pivot_row][col].abs() < 1e-12 {
            return None;
        }
        a.swap(col, pivot_row);
        inv.swap(col, pivot_row);

        let pivot = a[col][col];
        for j in 0..n {
            a[col][j] /= pivot;
            inv[col][j] /= pivot;
        }
        for i in 0..n {
            if i == col {
                continue;
            }
            let factor = a[i][col];
            if factor == 0.0 {
                continue;
            }
            for j in 0..n {
                a[i][j] -= factor * a[col][j];
                inv[i][j] -= factor * inv[col][j];
            }
        }
    }
    Some(inv)
}

/// Eigendecomposition of a symmetric matrix via cyclic Jacobi
/// rotations. Returns (eigenvalues, eigenvectors); eigenvector `i` is
/// the `i`-th column of the returned matrix, paired with eigenvalue
/// `i`. Unsorted.
pub fn jacobi_eigen(matrix: &[Vec<f64>]) -> (Vec<f64>, Vec<Vec<f64>>) {
    let n = matrix.len();
    let mut a: Vec<Vec<f64>> = matrix.to_vec();
    let mut v = identity(n);
    if n < 2 {
        return (a.first().map_or_else(Vec::new, |r| vec![r[0]]), v);
    }

    // 100 sweeps is far beyond what small covariance matrices need
    for _ in 0..100 * n * n {
        // Largest off-diagonal element
        let (mut p, mut q, mut max) = (0, 1, 0.0_f64);
        for i in 0..n {
            for j in (i + 1)..n {
                if a[i][j].abs() > max {
                    max = a[i][j].abs();
                    p = i;
                    q = j;
                }
            }
        }
        if max < 1e-12 {
            break;
        }

        let theta = 0.5 * (a[q][q] - a[p][p]) / a[p][q];
        let t = if theta >= 0.0 {
            1.0 / (theta + (theta * theta + 1.0).sqrt())
        } else {
            -1.0 / (-theta + (theta * theta + 1.0).sqrt())
        };
        let c = 1.0 / (t * t + 1.0).sqrt();
        let s = t * c;

        for k in 0..n {
            let akp = a[k][p];
            let akq = a[k][q];
            a[k][p] = c * akp - s * akq;
            a[k][q] = s * akp + c * akq;
        }
        for k in 0..n {
            let apk = a[p][k];
            let aqk = a[q][k];
            a[p][k] = c * apk - s * aqk;
            a[q][k] = s * apk + c * aqk;
        }
        for k in 0..n {
            let vkp = v[k][p];
            let vkq = v[k][q];
            v[k][p] = c * vkp - s * vkq;
            v[k][q] = s * vkp + c * vkq;
        }
    }

    let eigenvalues = (0..n).map(|i| a[i][i]).collect();
    (eigenvalues, v)
}

/// Squared Euclidean distance between two rows.
pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}

pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    squared_distance(a, b).sqrt()
}

/// Decision offset calibrated from the configured contamination: the
/// `(1 - contamination)` empirical quantile of training outlyingness,
/// so that roughly `contamination * n` training rows end up with a
/// negative decision score.
pub fn contamination_offset(outlyingness: &[f64], contamination: f64) -> f64 {
    if outlyingness.is_empty() {
        return 0.0;
    }
    let mut sorted = outlyingness.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    let idx = (((1.0 - contamination) * n as f64).ceil() as usize).clamp(1, n) - 1;
    sorted[idx]
}

fn identity(n: usize) -> Vec<Vec<f64>> {
    let mut m = vec![vec![0.0; n]; n];
    for (i, row) in m.iter_mut().enumerate() {
        row[i] = 1.0;
    }
    m
}
