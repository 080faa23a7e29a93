// tests/integrator.rs
//
// Behavior of the three schemes through the public `Integrator` facade:
// steady states, boundary clamping, a single-cell impulse, shape and scheme
// validation, norm behavior over many steps, temporal convergence order, and
// determinism.

use approx::assert_abs_diff_eq;
use ndarray as nd;
use psigrid::{
    boundary::{ BoundaryPolicy, edges_equal },
    error::{ IntegratorError, ShapeError },
    fields::{ Domain, gaussian, harmonic },
    timedep::{ Integrator, Scheme, SchemeParameters },
    utils::{ split_complex, wf_norm },
};

const SCHEMES: [Scheme; 3] = [Scheme::Ftcs, Scheme::Btcs, Scheme::Ctcs];

fn packet_domain() -> Domain {
    Domain { x_min: -6.3, x_max: 6.3, n_x: 64, y_min: -6.3, y_max: 6.3, n_y: 64 }
}

fn packet(scheme: Scheme, dt: f64) -> Integrator {
    let domain = packet_domain();
    let (re, im) = split_complex(&gaussian(&domain, 0.0, 0.0, 1.5, 1.0, 0.5, 0.0));
    let v = nd::Array2::zeros(domain.shape());
    let params = SchemeParameters::new(scheme, domain.dx(), domain.dy(), dt);
    Integrator::new(v, re, im, params).unwrap()
}

#[test]
fn zero_wavefunction_stays_zero() {
    for scheme in SCHEMES {
        let v = nd::Array2::from_shape_fn((8, 7), |(i, j)| (i * j) as f64 * 0.1);
        let z = nd::Array2::zeros((8, 7));
        let params = SchemeParameters::new(scheme, 0.5, 0.5, 1e-3);
        let mut integ = Integrator::new(v, z.clone(), z, params).unwrap();
        integ.step_n(10).unwrap();
        assert!(integ.real_part().iter().all(|x| *x == 0.0), "{}", scheme);
        assert!(integ.imag_part().iter().all(|x| *x == 0.0), "{}", scheme);
    }
}

#[test]
fn constant_wavefunction_is_steady() {
    let (c_re, c_im) = (0.3, -0.7);
    for scheme in SCHEMES {
        let v = nd::Array2::zeros((9, 6));
        let re = nd::Array2::from_elem((9, 6), c_re);
        let im = nd::Array2::from_elem((9, 6), c_im);
        let params = SchemeParameters::new(scheme, 0.4, 0.3, 1e-3);
        let mut integ
            = Integrator::new(v, re, im, params).unwrap()
            .with_boundary(BoundaryPolicy::dirichlet(c_re, c_im));
        integ.step_n(20).unwrap();
        for (r, i) in integ.real_part().iter().zip(integ.imag_part()) {
            assert_abs_diff_eq!(*r, c_re, epsilon = 1e-12);
            assert_abs_diff_eq!(*i, c_im, epsilon = 1e-12);
        }
    }
}

#[test]
fn edges_hold_the_boundary_value() {
    for scheme in SCHEMES {
        let mut integ = packet(scheme, 1e-4);
        for _ in 0..5 {
            integ.step().unwrap();
            assert!(edges_equal(&integ.real_part(), 0.0), "{}", scheme);
            assert!(edges_equal(&integ.imag_part(), 0.0), "{}", scheme);
        }

        let mut integ = packet(scheme, 1e-4).with_boundary(BoundaryPolicy::dirichlet(0.0, 0.5));
        integ.step().unwrap();
        assert!(edges_equal(&integ.real_part(), 0.0), "{}", scheme);
        assert!(edges_equal(&integ.imag_part(), 0.5), "{}", scheme);
    }
}

#[test]
fn impulse_spreads_to_neighbors() {
    let v = nd::Array2::zeros((5, 5));
    let mut re = nd::Array2::zeros((5, 5));
    re[[2, 2]] = 1.0;
    let im = nd::Array2::zeros((5, 5));
    let mut integ = Integrator::from_tag(v, re, im, "btcs", 1.0, 1.0, 0.001, 1.0, 1.0).unwrap();
    integ.step().unwrap();

    let re = integ.real_part();
    let im = integ.imag_part();
    assert!(re[[2, 2]] < 1.0);
    assert!(re[[2, 2]] > 0.99);
    assert!(im[[2, 2]] < 0.0);
    for (i, j) in [(1, 2), (3, 2), (2, 1), (2, 3)] {
        assert!(re[[i, j]] != 0.0, "re at ({}, {})", i, j);
        assert!(im[[i, j]] > 0.0, "im at ({}, {})", i, j);
    }
    assert_abs_diff_eq!(re[[1, 2]], re[[3, 2]], epsilon = 1e-12);
    assert_abs_diff_eq!(im[[2, 1]], im[[2, 3]], epsilon = 1e-12);
    assert!(edges_equal(&re, 0.0));
    assert!(edges_equal(&im, 0.0));
}

#[test]
fn mismatched_grids_are_rejected() {
    let params = SchemeParameters::new(Scheme::Ctcs, 0.1, 0.1, 1e-3);
    let res = Integrator::new(
        nd::Array2::zeros((10, 10)),
        nd::Array2::zeros((10, 11)),
        nd::Array2::zeros((10, 10)),
        params,
    );
    assert!(matches!(
        res,
        Err(IntegratorError::Shape(ShapeError::Mismatch { got: (10, 11), .. })),
    ));

    let res = Integrator::new(
        nd::Array2::zeros((10, 10)),
        nd::Array2::zeros((10, 10)),
        nd::Array2::zeros((9, 10)),
        params,
    );
    assert!(matches!(res, Err(IntegratorError::Shape(_))));
}

#[test]
fn unknown_scheme_is_rejected() {
    let z = || nd::Array2::zeros((4, 4));
    let res = Integrator::from_tag(z(), z(), z(), "leapfrog", 0.1, 0.1, 1e-3, 1.0, 1.0);
    match res {
        Err(IntegratorError::Scheme(e)) => assert!(e.to_string().contains("leapfrog")),
        other => panic!("expected a scheme error, got {:?}", other.map(|i| i.scheme())),
    }
}

#[test]
fn implicit_schemes_conserve_norm() {
    for scheme in [Scheme::Btcs, Scheme::Ctcs] {
        let mut integ = packet(scheme, 1e-3);
        let n0 = integ.norm();
        integ.step_n(100).unwrap();
        let rel = (integ.norm() - n0).abs() / n0;
        assert!(rel < 1e-3, "{}: relative norm change {:e}", scheme, rel);
    }
}

#[test]
fn crank_nicolson_is_unitary() {
    let mut integ = packet(Scheme::Ctcs, 1e-2);
    let p0 = integ.probability();
    integ.step_n(50).unwrap();
    assert_abs_diff_eq!(integ.probability(), p0, epsilon = 1e-8 * p0);
}

#[test]
fn explicit_scheme_stays_bounded() {
    let mut integ = packet(Scheme::Ftcs, 1e-4);
    assert!(integ.params().stability_number(0.0) < 0.1);
    let n0 = integ.norm();
    integ.step_n(100).unwrap();
    assert!(integ.norm().is_finite());
    let rel = (integ.norm() - n0).abs() / n0;
    assert!(rel < 1e-2, "relative norm change {:e}", rel);
}

#[test]
fn schemes_agree_for_small_steps() {
    let mut a = packet(Scheme::Ctcs, 1e-4);
    let mut b = packet(Scheme::Ftcs, 1e-4);
    a.step_n(50).unwrap();
    b.step_n(50).unwrap();
    let diff
        = nd::Zip::from(&a.real_part()).and(&b.real_part())
        .fold(0.0_f64, |acc, x, y| acc.max((x - y).abs()));
    assert!(diff < 1e-4, "max difference {:e}", diff);
}

#[test]
fn stepping_is_deterministic() {
    for scheme in SCHEMES {
        let mut a = packet(scheme, 1e-4);
        let mut b = packet(scheme, 1e-4);
        a.step_n(10).unwrap();
        b.step_n(10).unwrap();
        assert_eq!(a.real_part(), b.real_part());
        assert_eq!(a.imag_part(), b.imag_part());
        assert_eq!(a.steps(), 10);
        assert_abs_diff_eq!(a.time(), 1e-3, epsilon = 1e-15);
    }
}

// evolve a displaced packet in a harmonic well to t = 0.4 with step `dt`
fn harmonic_run(scheme: Scheme, dt: f64) -> (nd::Array2<f64>, nd::Array2<f64>) {
    let domain = Domain { x_min: -4.0, x_max: 4.0, n_x: 41, y_min: -4.0, y_max: 4.0, n_y: 41 };
    let (re, im) = split_complex(&gaussian(&domain, 0.5, -0.3, 1.0, 1.0, 1.0, 0.0));
    let v = harmonic(&domain, 1.0);
    let params = SchemeParameters::new(scheme, domain.dx(), domain.dy(), dt);
    let mut integ = Integrator::new(v, re, im, params).unwrap();
    integ.step_n((0.4 / dt).round() as usize).unwrap();
    (integ.real_part().to_owned(), integ.imag_part().to_owned())
}

// ratios of successive differences between runs with halved time steps; on a
// fixed grid these approach 2^p for a scheme of order p in time
fn error_ratios(scheme: Scheme) -> Vec<f64> {
    let runs: Vec<_>
        = [0.04, 0.02, 0.01, 0.005].into_iter()
        .map(|dt| harmonic_run(scheme, dt))
        .collect();
    let diffs: Vec<f64>
        = runs.windows(2)
        .map(|w| wf_norm(&(&w[0].0 - &w[1].0), &(&w[0].1 - &w[1].1)))
        .collect();
    diffs.windows(2).map(|d| d[0] / d[1]).collect()
}

#[test]
fn crank_nicolson_is_second_order_with_a_potential() {
    // the potential couples the split x and y operators, so a first-order
    // splitting would drag these ratios down toward 2
    for ratio in error_ratios(Scheme::Ctcs) {
        assert!(ratio > 3.3 && ratio < 4.7, "error ratio {}", ratio);
    }
}

#[test]
fn backward_euler_is_first_order() {
    for ratio in error_ratios(Scheme::Btcs) {
        assert!(ratio > 1.6 && ratio < 2.4, "error ratio {}", ratio);
    }
}
