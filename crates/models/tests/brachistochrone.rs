use std::f64::consts::{PI, TAU};

use approx::assert_abs_diff_eq;
use descent_core::{Differentiable, Model, check::CheckConfig};
use descent_models::brachistochrone::{BrachistochroneOde, Gravity, Input, STANDARD_GRAVITY};

/// Evenly spaced samples over `[start, end]`.
fn sweep(start: f64, end: f64, count: usize) -> impl Iterator<Item = f64> {
    let step = (end - start) / (count - 1) as f64;
    (0..count).map(move |i| start + step * i as f64)
}

#[test]
fn analytic_partials_match_central_differences_across_sweep() {
    let config = CheckConfig::default();

    for g in sweep(1.0, 20.0, 5) {
        let v: Vec<f64> = sweep(0.0, 10.0, 9).collect();
        let theta: Vec<f64> = sweep(0.0, TAU, 9).collect();
        let ode = BrachistochroneOde::new(v.len());
        let input = Input::new(v, theta).with_gravity(Gravity::Scalar(g));

        for check in ode.check_partials(&input, &config).unwrap() {
            assert!(
                check.comparison.max_abs_error < 1e-6,
                "g = {g}: d{}/d{} off by {}",
                check.of,
                check.wrt,
                check.comparison.max_abs_error,
            );
        }
    }
}

#[test]
fn rates_follow_closed_form() {
    let v: Vec<f64> = sweep(0.0, 10.0, 11).collect();
    let theta: Vec<f64> = sweep(0.0, TAU, 11).collect();
    let ode = BrachistochroneOde::new(v.len());

    let rates = ode.call(&Input::new(v.clone(), theta.clone())).unwrap();

    for i in 0..v.len() {
        assert_abs_diff_eq!(rates.vdot[i], STANDARD_GRAVITY * theta[i].cos(), epsilon = 1e-12);
        assert_abs_diff_eq!(rates.xdot[i], v[i] * theta[i].sin(), epsilon = 1e-12);
        assert_abs_diff_eq!(rates.ydot[i], -v[i] * theta[i].cos(), epsilon = 1e-12);
    }
}

#[test]
fn partials_are_diagonal_for_every_node_count() {
    for n in 1..=8 {
        let ode = BrachistochroneOde::with_per_node_gravity(n);
        let v: Vec<f64> = sweep(0.5, 9.5, n.max(2)).take(n).collect();
        let theta: Vec<f64> = sweep(0.1, PI, n.max(2)).take(n).collect();
        let input = Input::new(v, theta).with_gravity(Gravity::PerNode(vec![STANDARD_GRAVITY; n]));

        let partials = ode.partials(&input).unwrap();

        for (of, wrt, block) in partials.blocks() {
            let dense = block.to_dense();
            for (i, row) in dense.iter().enumerate() {
                for (j, value) in row.iter().enumerate() {
                    if i != j {
                        assert_eq!(*value, 0.0, "n = {n}: d{of}/d{wrt}[{i}][{j}]");
                    }
                }
            }
        }
    }
}

#[test]
fn repeated_evaluation_is_bit_identical() {
    let ode = BrachistochroneOde::new(6);
    let input = Input::new(
        vec![0.0, 0.7, 1.9, 3.3, 8.1, 10.0],
        vec![0.01, 0.9, 1.7, 2.4, 3.1, 6.2],
    )
    .with_gravity(Gravity::Scalar(13.7));

    let first = (ode.call(&input).unwrap(), ode.partials(&input).unwrap());
    let second = (ode.call(&input).unwrap(), ode.partials(&input).unwrap());

    let bits = |values: &[f64]| values.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&first.0.xdot), bits(&second.0.xdot));
    assert_eq!(bits(&first.0.ydot), bits(&second.0.ydot));
    assert_eq!(bits(&first.0.vdot), bits(&second.0.vdot));
    for ((_, _, a), (_, _, b)) in first.1.blocks().zip(second.1.blocks()) {
        assert_eq!(bits(a.values()), bits(b.values()));
    }
}
