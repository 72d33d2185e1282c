//! Interactive configuration intake.
//!
//! Each constrained field re-prompts until `check` passes, quoting the
//! constraint's admissible set on a miss. Only `check` is used here; the
//! interactive path never substitutes a fitted value for what the operator
//! typed.

use lt_constraints::Registry;
use lt_core::round_nearest;
use lt_tune::Config;
use lt_tune::config::NUM_COEFFS;
use std::io::{self, BufRead, Write};

pub fn prompt_config(registry: &Registry) -> io::Result<Config> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    prompt_config_from(registry, &mut lines)
}

/// Testable core: reads from any line source.
pub fn prompt_config_from<I>(registry: &Registry, lines: &mut I) -> io::Result<Config>
where
    I: Iterator<Item = io::Result<String>>,
{
    let mut cfg = Config::default();

    cfg.m1 = prompt_selector(registry, "M", "M1", lines)?;
    cfg.m2 = prompt_selector(registry, "M", "M2", lines)?;
    while cfg.m1 == cfg.m2 {
        println!("Error: M1 and M2 must be distinct. Try again.");
        cfg.m1 = prompt_selector(registry, "M", "M1", lines)?;
    }

    cfg.l = prompt_selector(registry, "L", "L", lines)?;
    cfg.j = prompt_selector(registry, "J", "J", lines)?;
    cfg.n = prompt_selector(registry, "N", "N", lines)?;

    for i in 0..NUM_COEFFS {
        let label = format!("B{}", i + 1);
        cfg.b[i] = prompt_number(&label, lines)?;
    }
    cfg.target_y = prompt_number("target Y", lines)?;

    Ok(cfg)
}

fn prompt_selector<I>(
    registry: &Registry,
    constraint_name: &str,
    field: &str,
    lines: &mut I,
) -> io::Result<u32>
where
    I: Iterator<Item = io::Result<String>>,
{
    loop {
        let v = prompt_number(field, lines)?;
        // Store the same rounded value that check validated; truncation
        // could otherwise admit a selector the constraint rejects.
        let rounded = round_nearest(v);
        match registry.lookup(constraint_name) {
            Ok(constraint) => {
                if constraint.check(v) {
                    if let Ok(selector) = u32::try_from(rounded) {
                        return Ok(selector);
                    }
                }
                println!("Incorrect value for {field}. {}", constraint.describe());
            }
            Err(e) => {
                // No constraint on file for this field: report once and take
                // the value as-is rather than blocking the operator.
                println!("Warning: {e}");
                return Ok(u32::try_from(rounded.max(0)).unwrap_or(u32::MAX));
            }
        }
    }
}

fn prompt_number<I>(field: &str, lines: &mut I) -> io::Result<f64>
where
    I: Iterator<Item = io::Result<String>>,
{
    loop {
        print!("Enter value for {field}: ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("input ended while reading {field}"),
            ));
        };
        match line?.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("Not a number. Try again."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lt_constraints::schema::from_json_str;

    fn registry() -> Registry {
        let (r, _) = from_json_str(
            r#"[
                {"name": "M", "type": "discrete", "values": [0, 1, 2]},
                {"name": "L", "type": "discrete", "values": [2]},
                {"name": "J", "type": "discrete_range", "minval": 0, "maxval": 3},
                {"name": "N", "type": "discrete_range", "minval": 1, "maxval": 100}
            ]"#,
        )
        .unwrap();
        r
    }

    fn feed(inputs: &[&str]) -> impl Iterator<Item = std::io::Result<String>> {
        inputs
            .iter()
            .map(|s| Ok(s.to_string()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn accepts_a_clean_session() {
        let mut lines = feed(&[
            "0", "1", // M1, M2
            "2", // L
            "3", // J
            "10", // N
            "0", "0", "0", "1", "0", "0", // B1..B6
            "5.0", // Y
        ]);
        let cfg = prompt_config_from(&registry(), &mut lines).unwrap();
        assert_eq!((cfg.m1, cfg.m2, cfg.l, cfg.j, cfg.n), (0, 1, 2, 3, 10));
        assert_eq!(cfg.b[3], 1.0);
        assert_eq!(cfg.target_y, 5.0);
    }

    #[test]
    fn reprompts_until_constraint_passes() {
        // 9 fails the M constraint, then 0 passes.
        let mut lines = feed(&[
            "9", "0", // M1 (retry)
            "1", "2", "3", "10", "0", "0", "0", "1", "0", "0", "5.0",
        ]);
        let cfg = prompt_config_from(&registry(), &mut lines).unwrap();
        assert_eq!(cfg.m1, 0);
    }

    #[test]
    fn reprompts_m1_while_selectors_collide() {
        // M1 = M2 = 1, then M1 is re-read as 0.
        let mut lines = feed(&[
            "1", "1", "0", // M1, M2, M1 again
            "2", "3", "10", "0", "0", "0", "1", "0", "0", "5.0",
        ]);
        let cfg = prompt_config_from(&registry(), &mut lines).unwrap();
        assert_eq!(cfg.m1, 0);
        assert_eq!(cfg.m2, 1);
    }

    #[test]
    fn exhausted_input_is_an_error() {
        let mut lines = feed(&["0"]);
        assert!(prompt_config_from(&registry(), &mut lines).is_err());
    }

    #[test]
    fn fractional_entry_stores_the_value_check_validated() {
        // M admits {1, 2}; "0.6" rounds to 1 for check and must be stored
        // as 1, not truncated to the inadmissible 0.
        let (r, _) = from_json_str(
            r#"[
                {"name": "M", "type": "discrete", "values": [1, 2]},
                {"name": "L", "type": "discrete", "values": [2]},
                {"name": "J", "type": "discrete_range", "minval": 0, "maxval": 3},
                {"name": "N", "type": "discrete_range", "minval": 1, "maxval": 100}
            ]"#,
        )
        .unwrap();
        let mut lines = feed(&[
            "0.6", "2", // M1 (fractional), M2
            "2", "3", "10", "0", "0", "0", "1", "0", "0", "5.0",
        ]);
        let cfg = prompt_config_from(&r, &mut lines).unwrap();
        assert_eq!(cfg.m1, 1);
        assert!(r.lookup("M").unwrap().check(cfg.m1 as f64));
    }
}
