//! Plain-text rendering of reports.

use std::collections::BTreeMap;

use descent_driver::{DriverOptions, OptionValue};
use descent_models::brachistochrone::PartialCheck;
use descent_phase::brachistochrone::NodeValues;
use uom::si::{
    angle::{degree, radian},
    f64::Angle,
};

fn map_section(title: &str, map: &BTreeMap<String, OptionValue>) -> String {
    if map.is_empty() {
        return String::new();
    }
    let entries: String = map
        .iter()
        .map(|(key, value)| match value {
            OptionValue::Str(s) => format!("    {key} = {s}\n"),
            OptionValue::Int(i) => format!("    {key} = {i}\n"),
        })
        .collect();
    format!("  {title}:\n{entries}")
}

/// Renders the driver and its option dictionaries.
#[must_use]
pub fn driver(options: &DriverOptions) -> String {
    let mut out = format!("Driver: {:?}\n", options.driver);
    out.push_str(&map_section("options", &options.options));
    out.push_str(&map_section("opt_settings", &options.opt_settings));
    out
}

/// Renders node values as a table, with the wire angle in degrees.
#[must_use]
pub fn node_table(nodes: &NodeValues) -> String {
    let mut out = format!(
        "{:>4} {:>8} {:>8} {:>8} {:>8} {:>10} {:>9} {:>9} {:>9}\n",
        "node", "t (s)", "x (m)", "y (m)", "v (m/s)", "theta (°)", "xdot", "ydot", "vdot"
    );

    for i in 0..nodes.ptau.len() {
        let theta = Angle::new::<radian>(nodes.theta[i]).get::<degree>();
        out.push_str(&format!(
            "{i:>4} {:>8.4} {:>8.4} {:>8.4} {:>8.4} {:>10.4} {:>9.4} {:>9.4} {:>9.4}\n",
            nodes.time[i],
            nodes.x[i],
            nodes.y[i],
            nodes.v[i],
            theta,
            nodes.xdot[i],
            nodes.ydot[i],
            nodes.vdot[i],
        ));
    }
    out
}

/// Renders a partials check, one line per `(of, wrt)` block.
#[must_use]
pub fn check_table(checks: &[PartialCheck]) -> String {
    let mut out = format!(
        "{:>6} {:>6} {:>12} {:>12}  status\n",
        "of", "wrt", "max abs", "max rel"
    );
    for check in checks {
        let status = if check.comparison.passed { "ok" } else { "FAILED" };
        out.push_str(&format!(
            "{:>6} {:>6} {:>12.3e} {:>12.3e}  {status}\n",
            check.of, check.wrt, check.comparison.max_abs_error, check.comparison.max_rel_error,
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use descent_core::check::Comparison;
    use descent_driver::Algorithm;

    #[test]
    fn driver_lists_options_and_settings() {
        let text = driver(&DriverOptions::trajectory("ParOpt", "ip"));

        assert!(text.starts_with("Driver: PyOptSparse\n"));
        assert!(text.contains("  options:\n    optimizer = ParOpt\n"));
        assert!(text.contains("    max_major_iters = 1000\n"));
    }

    #[test]
    fn driver_skips_empty_settings() {
        let text = driver(&DriverOptions::paraboloid(Algorithm::Mma));

        assert_eq!(text, "Driver: ParOpt\n  options:\n    algorithm = mma\n");
    }

    #[test]
    fn node_table_shows_degrees() {
        let nodes = NodeValues {
            ptau: vec![-1.0],
            time: vec![0.0],
            x: vec![0.0],
            y: vec![10.0],
            v: vec![0.0],
            theta: vec![std::f64::consts::FRAC_PI_2],
            xdot: vec![0.0],
            ydot: vec![0.0],
            vdot: vec![0.0],
        };

        let text = node_table(&nodes);
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().nth(1).unwrap().contains("90.0000"));
    }

    #[test]
    fn check_table_marks_each_block() {
        let checks = [
            PartialCheck {
                of: "xdot",
                wrt: "v",
                comparison: Comparison {
                    max_abs_error: 1e-9,
                    max_rel_error: 1e-9,
                    passed: true,
                },
            },
            PartialCheck {
                of: "vdot",
                wrt: "theta",
                comparison: Comparison {
                    max_abs_error: 0.5,
                    max_rel_error: 0.1,
                    passed: false,
                },
            },
        ];

        let text = check_table(&checks);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("status"));
        assert!(lines[1].contains("xdot") && lines[1].ends_with("ok"));
        assert!(lines[2].contains("theta") && lines[2].ends_with("FAILED"));
    }
}
