use rand::Rng;

use crate::block::{concat_cols, concat_rows, extract_sub_vector};
use crate::ops::{propagate_one_step, propagate_one_step_with_input};
use crate::sampling::GaussianSampler;
use crate::{LinalgError, Matrix, Vector};

/// Parameters of a causal linear dynamical system
///
/// ```text
/// x_{t+1} = A x_t + B u_t + w_t
/// y_t     = C x_t + v_t
/// ```
///
/// where `E[w wᵀ] = Q`, `E[v vᵀ] = R` and `E[w vᵀ] = S`.
///
/// With state dimension `n`, input dimension `m` and observation dimension `p`
/// the shapes are `A: n×n`, `B: n×m`, `C: p×n`, `Q: n×n`, `R: p×p`, `S: n×p`.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSpaceModel {
    /// State transition matrix.
    pub a: Matrix,
    /// Input matrix.
    pub b: Matrix,
    /// Observation matrix.
    pub c: Matrix,
    /// Process noise covariance.
    pub q: Matrix,
    /// Observation noise covariance.
    pub r: Matrix,
    /// Cross-covariance between process and observation noise.
    pub s: Matrix,
}

impl StateSpaceModel {
    /// Create a model after checking that all matrices are conformable.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] naming the first matrix
    /// whose shape does not fit the dimensions implied by `A`, `B` and `C`.
    pub fn new(
        a: Matrix,
        b: Matrix,
        c: Matrix,
        q: Matrix,
        r: Matrix,
        s: Matrix,
    ) -> Result<Self, LinalgError> {
        let n = a.nrows();
        let m = b.ncols();
        let p = c.nrows();

        let expected: [(&'static str, &Matrix, (usize, usize)); 6] = [
            ("StateSpaceModel::a", &a, (n, n)),
            ("StateSpaceModel::b", &b, (n, m)),
            ("StateSpaceModel::c", &c, (p, n)),
            ("StateSpaceModel::q", &q, (n, n)),
            ("StateSpaceModel::r", &r, (p, p)),
            ("StateSpaceModel::s", &s, (n, p)),
        ];
        for (op, mat, shape) in expected {
            if (mat.nrows(), mat.ncols()) != shape {
                return Err(LinalgError::shape_mismatch(
                    op,
                    shape,
                    (mat.nrows(), mat.ncols()),
                ));
            }
        }

        Ok(Self { a, b, c, q, r, s })
    }

    /// Dimension `n` of the state.
    pub fn state_dim(&self) -> usize {
        self.a.nrows()
    }

    /// Dimension `m` of the control input.
    pub fn input_dim(&self) -> usize {
        self.b.ncols()
    }

    /// Dimension `p` of the observation.
    pub fn obs_dim(&self) -> usize {
        self.c.nrows()
    }

    /// Joint covariance of the stacked noise `[w; v]`,
    ///
    /// ```text
    /// [ Q   S ]
    /// [ Sᵀ  R ]
    /// ```
    pub fn noise_covariance(&self) -> Result<Matrix, LinalgError> {
        let top = concat_cols(&self.q, &self.s)?;
        let bottom = concat_cols(&self.s.transpose().to_owned(), &self.r)?;
        concat_rows(&top, &bottom)
    }

    /// Sampler for the stacked noise `[w; v]`.
    pub fn noise_sampler(&self) -> Result<GaussianSampler, LinalgError> {
        GaussianSampler::new(&self.noise_covariance()?)
    }

    /// Advance the model with explicit noise realizations.
    ///
    /// Returns `(x_{t+1}, y_t)`.
    pub fn step_with_noise(
        &self,
        x: &Vector,
        u: &Vector,
        w: &Vector,
        v: &Vector,
    ) -> Result<(Vector, Vector), LinalgError> {
        let x_next = propagate_one_step_with_input(&self.a, &self.b, x, u, w)?;
        let y = propagate_one_step(&self.c, x, v)?;
        Ok((x_next, y))
    }

    /// Advance the model one step with noise drawn from `rng`.
    ///
    /// Returns `(x_{t+1}, y_t)`.
    ///
    /// The joint noise covariance is factored on every call. To run many
    /// steps, use [`Self::simulate`], or build the sampler once with
    /// [`Self::noise_sampler`] and feed its draws to [`Self::step_with_noise`].
    pub fn simulate_step<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        x: &Vector,
        u: &Vector,
    ) -> Result<(Vector, Vector), LinalgError> {
        let sampler = self.noise_sampler()?;
        self.step_sampled(&sampler, rng, x, u)
    }

    /// Simulate a trajectory from `x0` driven by `inputs`.
    ///
    /// Returns the states `x_1..=x_T` and the observations `y_0..y_{T-1}`,
    /// one of each per input.
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        x0: &Vector,
        inputs: &[Vector],
    ) -> Result<(Vec<Vector>, Vec<Vector>), LinalgError> {
        let sampler = self.noise_sampler()?;
        let mut states = Vec::with_capacity(inputs.len());
        let mut observations = Vec::with_capacity(inputs.len());

        let mut x = x0.clone();
        for u in inputs {
            let (x_next, y) = self.step_sampled(&sampler, rng, &x, u)?;
            states.push(x_next.clone());
            observations.push(y);
            x = x_next;
        }
        log::debug!("simulated {} steps", inputs.len());

        Ok((states, observations))
    }

    fn step_sampled<R: Rng + ?Sized>(
        &self,
        sampler: &GaussianSampler,
        rng: &mut R,
        x: &Vector,
        u: &Vector,
    ) -> Result<(Vector, Vector), LinalgError> {
        let n = self.state_dim();
        let noise = sampler.sample(rng);
        let w = noise_segment(&noise, 0, n)?;
        let v = noise_segment(&noise, n, self.obs_dim())?;
        self.step_with_noise(x, u, &w, &v)
    }
}

fn noise_segment(noise: &Vector, start: usize, len: usize) -> Result<Vector, LinalgError> {
    if len == 0 {
        return Ok(Vector::zeros(0));
    }
    extract_sub_vector(noise, start, start + len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mat(rows: &[&[f64]]) -> Matrix {
        Matrix::from_fn(rows.len(), rows[0].len(), |i, j| rows[i][j])
    }

    fn col(values: &[f64]) -> Vector {
        Vector::from_fn(values.len(), |i| values[i])
    }

    // constant velocity model, position observed
    fn constant_velocity(q_scale: f64, r_scale: f64) -> Result<StateSpaceModel, LinalgError> {
        StateSpaceModel::new(
            mat(&[&[1.0, 1.0], &[0.0, 1.0]]),
            mat(&[&[0.5], &[1.0]]),
            mat(&[&[1.0, 0.0]]),
            mat(&[&[q_scale, 0.0], &[0.0, q_scale]]),
            mat(&[&[r_scale]]),
            mat(&[&[0.0], &[0.0]]),
        )
    }

    #[test]
    fn test_dimensions() -> Result<(), LinalgError> {
        let model = constant_velocity(1.0, 1.0)?;
        assert_eq!(model.state_dim(), 2);
        assert_eq!(model.input_dim(), 1);
        assert_eq!(model.obs_dim(), 1);
        Ok(())
    }

    #[test]
    fn test_rejects_non_conformable() {
        let res = StateSpaceModel::new(
            mat(&[&[1.0, 1.0], &[0.0, 1.0]]),
            mat(&[&[0.5], &[1.0]]),
            mat(&[&[1.0, 0.0]]),
            mat(&[&[1.0]]),
            mat(&[&[1.0]]),
            mat(&[&[0.0], &[0.0]]),
        );
        assert_eq!(
            res.err(),
            Some(LinalgError::DimensionMismatch {
                op: "StateSpaceModel::q",
                expected: (2, 2),
                actual: (1, 1),
            })
        );
    }

    #[test]
    fn test_noise_covariance_layout() -> Result<(), LinalgError> {
        let model = StateSpaceModel::new(
            mat(&[&[1.0, 0.0], &[0.0, 1.0]]),
            mat(&[&[0.0], &[0.0]]),
            mat(&[&[1.0, 0.0]]),
            mat(&[&[2.0, 0.1], &[0.1, 3.0]]),
            mat(&[&[4.0]]),
            mat(&[&[0.2], &[0.3]]),
        )?;
        let sigma = model.noise_covariance()?;
        let expected = mat(&[&[2.0, 0.1, 0.2], &[0.1, 3.0, 0.3], &[0.2, 0.3, 4.0]]);
        assert_eq!(sigma, expected);
        Ok(())
    }

    #[test]
    fn test_noiseless_step_is_deterministic() -> Result<(), LinalgError> {
        let model = constant_velocity(0.0, 0.0)?;
        let mut rng = StdRng::seed_from_u64(11);
        let (x_next, y) = model.simulate_step(&mut rng, &col(&[1.0, 2.0]), &col(&[2.0]))?;
        assert_relative_eq!(x_next.read(0), 4.0);
        assert_relative_eq!(x_next.read(1), 4.0);
        assert_relative_eq!(y.read(0), 1.0);
        Ok(())
    }

    #[test]
    fn test_simulate_trajectory() -> Result<(), LinalgError> {
        let model = constant_velocity(0.0, 0.0)?;
        let mut rng = StdRng::seed_from_u64(0);
        let inputs = vec![col(&[0.0]); 3];
        let (states, observations) = model.simulate(&mut rng, &col(&[0.0, 1.0]), &inputs)?;

        assert_eq!(states.len(), 3);
        assert_eq!(observations.len(), 3);
        for (t, (x, y)) in states.iter().zip(observations.iter()).enumerate() {
            assert_relative_eq!(x.read(0), (t + 1) as f64);
            assert_relative_eq!(x.read(1), 1.0);
            assert_relative_eq!(y.read(0), t as f64);
        }
        Ok(())
    }

    #[test]
    fn test_simulate_is_reproducible() -> Result<(), LinalgError> {
        let model = constant_velocity(0.1, 0.5)?;
        let inputs = vec![col(&[1.0]); 5];
        let x0 = col(&[0.0, 0.0]);
        let a = model.simulate(&mut StdRng::seed_from_u64(8), &x0, &inputs)?;
        let b = model.simulate(&mut StdRng::seed_from_u64(8), &x0, &inputs)?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn test_cached_sampler_loop_matches_simulate() -> Result<(), LinalgError> {
        let model = constant_velocity(0.1, 0.5)?;
        let inputs = vec![col(&[1.0]); 4];
        let x0 = col(&[0.0, 0.0]);
        let (states, observations) =
            model.simulate(&mut StdRng::seed_from_u64(21), &x0, &inputs)?;

        let sampler = model.noise_sampler()?;
        let mut rng = StdRng::seed_from_u64(21);
        let mut x = x0;
        for (t, u) in inputs.iter().enumerate() {
            let noise = sampler.sample(&mut rng);
            let w = extract_sub_vector(&noise, 0, 1)?;
            let v = extract_sub_vector(&noise, 2, 2)?;
            let (x_next, y) = model.step_with_noise(&x, u, &w, &v)?;
            assert_eq!(x_next, states[t]);
            assert_eq!(y, observations[t]);
            x = x_next;
        }
        Ok(())
    }
}
