use hashbrown::HashSet;
use smallvec::SmallVec;

use crate::*;

/// A partial result: its value and the parenthesized text that produced it.
#[derive(Clone, Debug)]
struct Term {
    value: f64,
    expr: String,
}

type Terms = SmallVec<[Term; HAND_SIZE]>;

fn leaves(values: &[f64]) -> Terms {
    values
        .iter()
        .map(|&value| Term {
            value,
            expr: format!("{value}"),
        })
        .collect()
}

/// Finds an expression over all of `values` that evaluates to [`TARGET`].
///
/// Every ordered pair is combined with every operator, depth first, and the
/// first hit is returned. The result is a witness, not a canonical form.
pub fn solve(values: &[f64]) -> Option<String> {
    if values.is_empty() {
        return None;
    }

    let solution = search(&leaves(values));
    log::trace!("solve {:?}: {:?}", values, solution);
    solution
}

pub fn is_solvable(values: &[f64]) -> bool {
    solve(values).is_some()
}

/// Every distinct witness expression, in the order the search reaches them.
pub fn solve_all(values: &[f64]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut solutions = Vec::new();
    if !values.is_empty() {
        collect(&leaves(values), &mut seen, &mut solutions);
    }
    solutions
}

fn search(terms: &[Term]) -> Option<String> {
    if let [last] = terms {
        return hits_target(last.value).then(|| last.expr.clone());
    }
    try_reductions(terms, search)
}

fn collect(terms: &[Term], seen: &mut HashSet<String>, solutions: &mut Vec<String>) {
    if let [last] = terms {
        if hits_target(last.value) && seen.insert(last.expr.clone()) {
            solutions.push(last.expr.clone());
        }
        return;
    }
    try_reductions(terms, |reduced| {
        collect(reduced, seen, solutions);
        None::<()>
    });
}

/// Replaces each ordered pair `(i, j)` with `i op j`, appended after the
/// untouched terms, and hands the reduced set to `visit` until it returns `Some`.
fn try_reductions<T>(terms: &[Term], mut visit: impl FnMut(&[Term]) -> Option<T>) -> Option<T> {
    for (i, lhs) in terms.iter().enumerate() {
        for (j, rhs) in terms.iter().enumerate() {
            if i == j {
                continue;
            }

            let rest: Terms = terms
                .iter()
                .enumerate()
                .filter(|&(k, _)| k != i && k != j)
                .map(|(_, term)| term.clone())
                .collect();

            for op in Operator::ALL {
                let Some(value) = op.apply(lhs.value, rhs.value, DIVISOR_TOLERANCE) else {
                    continue;
                };

                let mut reduced = rest.clone();
                reduced.push(Term {
                    value,
                    expr: format!("({}{}{})", lhs.expr, op, rhs.expr),
                });

                if let Some(found) = visit(&reduced) {
                    return Some(found);
                }
            }
        }
    }
    None
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Evaluates a fully parenthesized solver expression.
    pub(crate) fn eval(expr: &str) -> f64 {
        let chars: Vec<char> = expr.chars().collect();
        let mut pos = 0;
        let value = eval_term(&chars, &mut pos);
        assert_eq!(pos, chars.len(), "trailing input in {expr}");
        value
    }

    fn eval_term(chars: &[char], pos: &mut usize) -> f64 {
        if chars[*pos] == '(' {
            *pos += 1;
            let lhs = eval_term(chars, pos);
            let op = chars[*pos];
            *pos += 1;
            let rhs = eval_term(chars, pos);
            assert_eq!(chars[*pos], ')');
            *pos += 1;
            match op {
                '+' => lhs + rhs,
                '-' => lhs - rhs,
                '×' => lhs * rhs,
                '÷' => lhs / rhs,
                other => panic!("unexpected operator {other}"),
            }
        } else {
            let start = *pos;
            if chars[*pos] == '-' {
                *pos += 1;
            }
            while *pos < chars.len() && (chars[*pos].is_ascii_digit() || chars[*pos] == '.') {
                *pos += 1;
            }
            chars[start..*pos].iter().collect::<String>().parse().unwrap()
        }
    }

    #[test]
    fn finds_solution_for_four_sixes() {
        let solution = solve(&[6.0, 6.0, 6.0, 6.0]).unwrap();
        assert!(hits_target(eval(&solution)), "{solution}");
    }

    #[test]
    fn four_aces_have_no_solution() {
        assert_eq!(solve(&[1.0, 1.0, 1.0, 1.0]), None);
        assert!(solve_all(&[1.0, 1.0, 1.0, 1.0]).is_empty());
    }

    #[test]
    fn needs_fractional_intermediate() {
        // 8 ÷ (3 - 8 ÷ 3)
        let solution = solve(&[8.0, 3.0, 8.0, 3.0]).unwrap();
        assert!(hits_target(eval(&solution)), "{solution}");
        assert!(is_solvable(&[1.0, 5.0, 5.0, 5.0]));
    }

    #[test]
    fn first_hit_follows_search_order() {
        assert_eq!(solve(&[4.0, 6.0]), Some("(4×6)".into()));
        assert_eq!(solve_all(&[4.0, 6.0]), vec!["(4×6)", "(6×4)"]);
    }

    #[test]
    fn single_value_is_its_own_expression() {
        assert_eq!(solve(&[24.0]), Some("24".into()));
        assert_eq!(solve(&[23.5]), None);
        assert_eq!(solve(&[]), None);
    }

    #[test]
    fn zero_divisors_are_skipped() {
        assert_eq!(solve(&[24.0, 0.0]), Some("(24+0)".into()));
        for solution in solve_all(&[24.0, 0.0]) {
            assert!(!solution.contains("÷0"), "{solution}");
        }
    }

    #[test]
    fn every_solution_evaluates_to_target() {
        for values in [[1.0, 2.0, 3.0, 4.0], [3.0, 3.0, 8.0, 8.0], [13.0, 12.0, 11.0, 1.0]] {
            let solutions = solve_all(&values);
            assert!(!solutions.is_empty(), "{values:?}");
            for solution in solutions {
                assert!(hits_target(eval(&solution)), "{solution}");
            }
        }
    }

    #[test]
    fn every_rank_hand_is_classified() {
        let mut solvable = 0;
        for a in 1..=13u8 {
            for b in a..=13 {
                for c in b..=13 {
                    for d in c..=13 {
                        let values = [a, b, c, d].map(f64::from);
                        if let Some(solution) = solve(&values) {
                            assert!(hits_target(eval(&solution)), "{values:?}: {solution}");
                            solvable += 1;
                        }
                    }
                }
            }
        }
        assert_eq!(solvable, 1362);
    }
}
