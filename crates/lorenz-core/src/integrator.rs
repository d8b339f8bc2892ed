#![forbid(unsafe_code)]

//! Lorenz vector field and the explicit Euler step.
//!
//! ```text
//! dx/dt = sigma * (y - x)
//! dy/dt = x * (rho - z) - y
//! dz/dt = x * y - beta * z
//! ```
//!
//! The step is not guarded against divergence: with a step size that is too
//! large relative to the system's Lyapunov exponents the state overflows and
//! every later state is NaN. Renderers are expected to skip non-finite
//! geometry rather than the integrator refusing to produce it.

/// A point in phase space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct State {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl State {
    /// Starting point used by the classic demo.
    pub const CLASSIC_START: Self = Self::new(0.0, 1.0, 1.05);

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// True when all three coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<(f64, f64, f64)> for State {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

/// Lorenz system parameters. Immutable for a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LorenzParams {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
}

impl LorenzParams {
    /// Lorenz's 1963 chaotic regime: sigma = 10, rho = 28, beta = 8/3.
    pub const CLASSIC: Self = Self {
        sigma: 10.0,
        rho: 28.0,
        beta: 8.0 / 3.0,
    };

    #[inline]
    pub const fn new(sigma: f64, rho: f64, beta: f64) -> Self {
        Self { sigma, rho, beta }
    }

    /// Time derivative of the state.
    #[inline]
    pub fn derivative(&self, s: State) -> State {
        State {
            x: self.sigma * (s.y - s.x),
            y: s.x * (self.rho - s.z) - s.y,
            z: s.x * s.y - self.beta * s.z,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.sigma.is_finite() && self.rho.is_finite() && self.beta.is_finite()
    }
}

impl Default for LorenzParams {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Advance `state` by one explicit Euler step of size `dt`.
#[inline]
pub fn euler_step(state: State, params: &LorenzParams, dt: f64) -> State {
    let d = params.derivative(state);
    State {
        x: state.x + d.x * dt,
        y: state.y + d.y * dt,
        z: state.z + d.z * dt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn assert_close(a: State, b: State) {
        assert!(
            (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS && (a.z - b.z).abs() < EPS,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn first_step_from_classic_start() {
        let next = euler_step(State::CLASSIC_START, &LorenzParams::CLASSIC, 0.01);
        assert_close(next, State::new(0.1, 0.99, 1.022));
    }

    #[test]
    fn origin_is_a_fixed_point() {
        let next = euler_step(State::default(), &LorenzParams::CLASSIC, 0.01);
        assert_eq!(next, State::default());
    }

    #[test]
    fn nonzero_fixed_points_are_stationary() {
        let p = LorenzParams::CLASSIC;
        let c = (p.beta * (p.rho - 1.0)).sqrt();
        for s in [State::new(c, c, p.rho - 1.0), State::new(-c, -c, p.rho - 1.0)] {
            let d = p.derivative(s);
            assert!(d.x.abs() < 1e-9 && d.y.abs() < 1e-9 && d.z.abs() < 1e-9);
        }
    }

    #[test]
    fn zero_dt_is_identity() {
        let s = State::new(3.0, -4.0, 20.0);
        assert_eq!(euler_step(s, &LorenzParams::CLASSIC, 0.0), s);
    }

    #[test]
    fn nan_propagates() {
        let s = State::new(f64::NAN, 1.0, 1.0);
        let next = euler_step(s, &LorenzParams::CLASSIC, 0.01);
        assert!(!next.is_finite());
        assert!(next.x.is_nan() && next.y.is_nan() && next.z.is_nan());
    }

    #[test]
    fn large_step_diverges_without_panicking() {
        let mut s = State::CLASSIC_START;
        for _ in 0..10_000 {
            s = euler_step(s, &LorenzParams::CLASSIC, 0.5);
        }
        assert!(!s.is_finite());
    }

    #[test]
    fn tuple_conversion() {
        assert_eq!(State::from((1.0, 2.0, 3.0)), State::new(1.0, 2.0, 3.0));
    }
}
