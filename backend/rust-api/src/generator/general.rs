//! General-audience family: algebra through introductory calculus.
//!
//! Every generator builds the answer forward from its drawn parameters and
//! returns `None` when the draw is degenerate; `retry_draws` burns another
//! draw from the same stream in that case.

use super::distractor::DistractorProfile;
use super::latex::{linear_factor, poly, terms};
use super::question::{clamp_level, Candidate};
use super::rng::SeededRng;
use super::{binomial, checked_pow, retry_draws, ArchetypeSpec, QuestionFamily};

const NON_SQUARES: [i64; 5] = [2, 3, 5, 6, 7];
const LOG_BASES: [i64; 4] = [2, 3, 5, 10];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Archetype {
    Exponent,
    Radical,
    Logarithm,
    Polynomial,
    Sequence,
    Sigma,
    Limit,
    Derivative,
    Integral,
    Combination,
}

impl Archetype {
    pub const ALL: [Archetype; 10] = [
        Archetype::Exponent,
        Archetype::Radical,
        Archetype::Logarithm,
        Archetype::Polynomial,
        Archetype::Sequence,
        Archetype::Sigma,
        Archetype::Limit,
        Archetype::Derivative,
        Archetype::Integral,
        Archetype::Combination,
    ];
}

// Difficulty shifts which archetypes are eligible, not the numeric ranges.
const LEVEL_1: &[Archetype] = &[
    Archetype::Exponent,
    Archetype::Radical,
    Archetype::Logarithm,
    Archetype::Polynomial,
    Archetype::Sequence,
];
const LEVEL_2: &[Archetype] = &[
    Archetype::Exponent,
    Archetype::Logarithm,
    Archetype::Polynomial,
    Archetype::Sequence,
    Archetype::Sigma,
    Archetype::Combination,
];
const LEVEL_3: &[Archetype] = &[
    Archetype::Radical,
    Archetype::Logarithm,
    Archetype::Sigma,
    Archetype::Combination,
    Archetype::Limit,
    Archetype::Derivative,
];
const LEVEL_4: &[Archetype] = &[
    Archetype::Exponent,
    Archetype::Sigma,
    Archetype::Limit,
    Archetype::Derivative,
    Archetype::Integral,
    Archetype::Combination,
];
const LEVEL_5: &[Archetype] = &[
    Archetype::Exponent,
    Archetype::Logarithm,
    Archetype::Limit,
    Archetype::Derivative,
    Archetype::Integral,
];

pub struct General;

impl QuestionFamily for General {
    type Archetype = Archetype;

    const NAME: &'static str = "general";
    const ID_PREFIX: &'static str = "";

    fn all() -> &'static [Archetype] {
        &Archetype::ALL
    }

    fn level_pool(level: u8) -> &'static [Archetype] {
        match clamp_level(level) {
            1 => LEVEL_1,
            2 => LEVEL_2,
            3 => LEVEL_3,
            4 => LEVEL_4,
            _ => LEVEL_5,
        }
    }
}

impl ArchetypeSpec for Archetype {
    fn type_tag(self) -> &'static str {
        match self {
            Archetype::Exponent => "exponent",
            Archetype::Radical => "radical",
            Archetype::Logarithm => "log",
            Archetype::Polynomial => "polynomial",
            Archetype::Sequence => "sequence",
            Archetype::Sigma => "sigma",
            Archetype::Limit => "limit",
            Archetype::Derivative => "derivative",
            Archetype::Integral => "integral",
            Archetype::Combination => "combination",
        }
    }

    fn distractor_profile(self) -> DistractorProfile {
        match self {
            Archetype::Exponent => DistractorProfile::Exponent,
            Archetype::Radical => DistractorProfile::Radical,
            Archetype::Logarithm => DistractorProfile::Logarithm,
            Archetype::Polynomial => DistractorProfile::Polynomial,
            Archetype::Sequence | Archetype::Sigma => DistractorProfile::Series,
            Archetype::Limit | Archetype::Derivative | Archetype::Integral => {
                DistractorProfile::Calculus
            }
            Archetype::Combination => DistractorProfile::Counting,
        }
    }

    fn generate(self, rng: &mut SeededRng) -> Option<Candidate> {
        match self {
            Archetype::Exponent => retry_draws(rng, exponent),
            Archetype::Radical => retry_draws(rng, radical),
            Archetype::Logarithm => retry_draws(rng, logarithm),
            Archetype::Polynomial => retry_draws(rng, polynomial),
            Archetype::Sequence => retry_draws(rng, sequence),
            Archetype::Sigma => retry_draws(rng, sigma),
            Archetype::Limit => retry_draws(rng, limit),
            Archetype::Derivative => retry_draws(rng, derivative),
            Archetype::Integral => retry_draws(rng, integral),
            Archetype::Combination => retry_draws(rng, combination),
        }
    }
}

fn exponent(rng: &mut SeededRng) -> Option<Candidate> {
    match rng.index(3) {
        0 => {
            let base = rng.int_range(2, 5);
            let m = rng.int_range(1, 6);
            let n = rng.int_range(1, 6);
            let answer = checked_pow(base, m + n)?;
            Some(Candidate::new(
                format!("{base}^{{{m}}} \\times {base}^{{{n}}}"),
                answer,
                1,
            ))
        }
        1 => {
            // (r^q)^(p/q) = r^p
            let root = rng.int_range(2, 6);
            let q = rng.int_range(2, 3);
            let p = rng.int_range(1, 4);
            if p % q == 0 {
                return None;
            }
            let radicand = checked_pow(root, q)?;
            let answer = checked_pow(root, p)?;
            Some(Candidate::new(
                format!("{radicand}^{{\\frac{{{p}}}{{{q}}}}}"),
                answer,
                2,
            ))
        }
        _ => {
            // (a^(√k+1))^(√k-1) = a^(k-1)
            let base = rng.int_range(2, 5);
            let k = rng.pick(&NON_SQUARES);
            let answer = checked_pow(base, k - 1)?;
            Some(Candidate::new(
                format!("\\left({base}^{{\\sqrt{{{k}}}+1}}\\right)^{{\\sqrt{{{k}}}-1}}"),
                answer,
                4,
            ))
        }
    }
}

fn radical(rng: &mut SeededRng) -> Option<Candidate> {
    match rng.index(3) {
        0 => {
            // √(s t²) · √(s u²) = s t u
            let s = rng.pick(&NON_SQUARES);
            let t = rng.int_range(1, 4);
            let u = rng.int_range(1, 4);
            let answer = s * t * u;
            Some(Candidate::new(
                format!("\\sqrt{{{}}} \\times \\sqrt{{{}}}", s * t * t, s * u * u),
                answer,
                2,
            ))
        }
        1 => {
            // (√a + √b)(√a - √b) = a - b
            let a = rng.int_range(5, 40);
            let b = rng.int_range(2, a - 1);
            Some(Candidate::new(
                format!("\\left(\\sqrt{{{a}}} + \\sqrt{{{b}}}\\right)\\left(\\sqrt{{{a}}} - \\sqrt{{{b}}}\\right)"),
                a - b,
                2,
            ))
        }
        _ => {
            let n = rng.int_range(2, 6);
            let m = rng.int_range(2, 12);
            Some(Candidate::new(
                format!("\\sqrt[3]{{{}}} + \\sqrt{{{}}}", n * n * n, m * m),
                n + m,
                1,
            ))
        }
    }
}

fn logarithm(rng: &mut SeededRng) -> Option<Candidate> {
    let base = rng.pick(&LOG_BASES);
    match rng.index(4) {
        0 => {
            let k = rng.int_range(2, 6);
            let i = rng.int_range(1, k - 1);
            let x = checked_pow(base, i)?;
            let y = checked_pow(base, k - i)?;
            Some(Candidate::new(
                format!("\\log_{{{base}}} {x} + \\log_{{{base}}} {y}"),
                k,
                1,
            ))
        }
        1 => {
            // log_b(f·b^i) + log_b(b^(k-i)) - log_b(f) = k
            let k = rng.int_range(2, 6);
            let i = rng.int_range(1, k - 1);
            let f = rng.int_range(2, 9);
            if f % base == 0 {
                return None;
            }
            let x = f * checked_pow(base, i)?;
            let y = checked_pow(base, k - i)?;
            Some(Candidate::new(
                format!("\\log_{{{base}}} {x} + \\log_{{{base}}} {y} - \\log_{{{base}}} {f}"),
                k,
                2,
            ))
        }
        2 => {
            let y = rng.int_range(2, 12);
            let k = rng.int_range(1, 4);
            let x = y * checked_pow(base, k)?;
            Some(Candidate::new(
                format!("\\log_{{{base}}} {x} - \\log_{{{base}}} {y}"),
                k,
                2,
            ))
        }
        _ => {
            let n = rng.int_range(2, 30);
            let k = rng.int_range(1, 5);
            let power = checked_pow(base, k)?;
            Some(Candidate::new(
                format!("{base}^{{\\log_{{{base}}} {n}}} + \\log_{{{base}}} {power}"),
                n + k,
                3,
            ))
        }
    }
}

fn polynomial(rng: &mut SeededRng) -> Option<Candidate> {
    let cubic = rng.chance(0.3);
    let d = if cubic { rng.int_range(1, 2) } else { 0 };
    let a = rng.int_range(1, 3);
    let b = rng.int_range(-6, 6);
    let c = rng.int_range(-9, 9);
    let r = rng.int_range(-3, 4);
    let answer = d * r * r * r + a * r * r + b * r + c;
    if answer <= 0 {
        return None;
    }
    let p = if cubic {
        poly(&[d, a, b, c], "x")
    } else {
        poly(&[a, b, c], "x")
    };
    let level = match (cubic, r < 0) {
        (true, _) => 3,
        (false, true) => 2,
        (false, false) => 1,
    };
    Some(Candidate::new(
        format!(
            "P(x) = {p}. \\text{{ Remainder of }} P(x) \\div ({})",
            linear_factor("x", r)
        ),
        answer,
        level,
    ))
}

fn sequence(rng: &mut SeededRng) -> Option<Candidate> {
    if rng.chance(0.65) {
        let first = rng.int_range(1, 20);
        let d = rng.int_range(-4, 9);
        if d == 0 {
            return None;
        }
        let p = rng.int_range(1, 4);
        let q = rng.int_range(p + 1, p + 4);
        let n = rng.int_range(q + 1, q + 10);
        let term = |i: i64| first + (i - 1) * d;
        let answer = term(n);
        Some(Candidate::new(
            format!(
                "\\text{{Arithmetic: }} a_{{{p}}} = {}, \\; a_{{{q}}} = {}. \\; a_{{{n}}} = ?",
                term(p),
                term(q)
            ),
            answer,
            if d < 0 { 2 } else { 1 },
        ))
    } else {
        let first = rng.int_range(1, 5);
        let ratio = rng.int_range(2, 4);
        let n = rng.int_range(4, 8);
        let term = |i: i64| checked_pow(ratio, i - 1).map(|r| first * r);
        let answer = term(n)?;
        Some(Candidate::new(
            format!(
                "\\text{{Geometric: }} a_{{2}} = {}, \\; a_{{3}} = {}. \\; a_{{{n}}} = ?",
                term(2)?,
                term(3)?
            ),
            answer,
            2,
        ))
    }
}

fn sigma(rng: &mut SeededRng) -> Option<Candidate> {
    match rng.index(3) {
        0 => {
            let a = rng.int_range(1, 5);
            let b = rng.int_range(-3, 5);
            let n = rng.int_range(5, 20);
            let answer = a * n * (n + 1) / 2 + b * n;
            Some(Candidate::new(
                format!("\\sum_{{k=1}}^{{{n}}} ({})", poly(&[a, b], "k")),
                answer,
                2,
            ))
        }
        1 => {
            let n = rng.int_range(5, 15);
            let s = rng.int_range(10, 60);
            let t = rng.int_range(5, 40);
            let p = rng.int_range(1, 4);
            let q = rng.int_range(-3, 4);
            let c = rng.int_range(0, 5);
            let answer = p * s + q * t + c * n;
            Some(Candidate::new(
                format!(
                    "\\sum_{{k=1}}^{{{n}}} a_k = {s}, \\; \\sum_{{k=1}}^{{{n}}} b_k = {t}. \\; \\sum_{{k=1}}^{{{n}}} ({}) = ?",
                    terms(&[(p, "a_k"), (q, "b_k"), (c, "")])
                ),
                answer,
                3,
            ))
        }
        _ => {
            let n = rng.int_range(3, 12);
            let answer = n * (n + 1) * (2 * n + 1) / 6;
            Some(Candidate::new(
                format!("\\sum_{{k=1}}^{{{n}}} k^{{2}}"),
                answer,
                3,
            ))
        }
    }
}

fn limit(rng: &mut SeededRng) -> Option<Candidate> {
    match rng.index(3) {
        0 => {
            // (x - r)(x + s) / (x - r) → r + s
            let r = rng.int_range(1, 6);
            let s = rng.int_range(-3, 8);
            let numerator = poly(&[1, s - r, -r * s], "x");
            Some(Candidate::new(
                format!(
                    "\\lim_{{x \\to {r}}} \\frac{{{numerator}}}{{{}}}",
                    linear_factor("x", r)
                ),
                r + s,
                3,
            ))
        }
        1 => {
            let b = rng.int_range(1, 4);
            let k = rng.int_range(1, 6);
            let numerator = poly(&[k * b, rng.int_range(-5, 5), rng.int_range(-9, 9)], "x");
            let denominator = poly(&[b, rng.int_range(-5, 5), rng.int_range(1, 9)], "x");
            Some(Candidate::new(
                format!("\\lim_{{x \\to \\infty}} \\frac{{{numerator}}}{{{denominator}}}"),
                k,
                3,
            ))
        }
        _ => {
            // (x - a²)/(√x - a) = √x + a → 2a
            let a = rng.int_range(1, 9);
            let square = a * a;
            Some(Candidate::new(
                format!("\\lim_{{x \\to {square}}} \\frac{{x - {square}}}{{\\sqrt{{x}} - {a}}}"),
                2 * a,
                4,
            ))
        }
    }
}

fn derivative(rng: &mut SeededRng) -> Option<Candidate> {
    let p = rng.int_range(0, 2);
    let q = rng.int_range(0, 4);
    let r = rng.int_range(-5, 6);
    let s = rng.int_range(-5, 5);
    if p == 0 && q == 0 {
        return None;
    }
    let a = rng.int_range(-2, 3);
    let slope = 3 * p * a * a + 2 * q * a + r;
    let f = poly(&[p, q, r, s], "x");
    let point = terms(&[(a, ""), (1, "h")]);

    if rng.chance(0.25) {
        let m = rng.int_range(2, 3);
        let shifted = terms(&[(a, ""), (m, "h")]);
        return Some(Candidate::new(
            format!("f(x) = {f}. \\; \\lim_{{h \\to 0}} \\frac{{f({shifted}) - f({a})}}{{h}}"),
            m * slope,
            5,
        ));
    }

    Some(Candidate::new(
        format!("f(x) = {f}. \\; \\lim_{{h \\to 0}} \\frac{{f({point}) - f({a})}}{{h}}"),
        slope,
        if p > 0 { 4 } else { 3 },
    ))
}

fn integral(rng: &mut SeededRng) -> Option<Candidate> {
    // Quadratic coefficient a multiple of 3 and linear even keep the
    // antiderivative integral at integer bounds.
    let k2 = rng.int_range(0, 2);
    let k1 = rng.int_range(0, 3);
    let c0 = rng.int_range(0, 5);

    if rng.chance(0.3) {
        // Odd part cancels over a symmetric interval.
        let c3 = rng.int_range(1, 4);
        let c1 = rng.int_range(-4, 4);
        let a = rng.int_range(1, 3);
        let answer = 2 * (k2 * a * a * a + c0 * a);
        return Some(Candidate::new(
            format!(
                "\\int_{{-{a}}}^{{{a}}} ({}) \\, dx",
                poly(&[c3, 3 * k2, c1, c0], "x")
            ),
            answer,
            5,
        ));
    }

    let lo = rng.int_range(0, 2);
    let hi = rng.int_range(lo + 1, lo + 3);
    let answer = k2 * (hi.pow(3) - lo.pow(3)) + k1 * (hi.pow(2) - lo.pow(2)) + c0 * (hi - lo);
    Some(Candidate::new(
        format!(
            "\\int_{{{lo}}}^{{{hi}}} ({}) \\, dx",
            poly(&[3 * k2, 2 * k1, c0], "x")
        ),
        answer,
        if k2 == 0 { 3 } else { 4 },
    ))
}

fn combination(rng: &mut SeededRng) -> Option<Candidate> {
    match rng.index(3) {
        0 => {
            let n = rng.int_range(4, 12);
            let k = rng.int_range(2, 4);
            Some(Candidate::new(format!("\\binom{{{n}}}{{{k}}}"), binomial(n, k)?, 2))
        }
        1 => {
            let n = rng.int_range(4, 9);
            let k = rng.int_range(2, 3);
            let answer: i64 = (n - k + 1..=n).product();
            Some(Candidate::new(format!("{{}}_{{{n}}}P_{{{k}}}"), answer, 2))
        }
        _ => {
            let n = rng.int_range(6, 15);
            let k = rng.int_range(2, n / 2);
            if n - k == k {
                return None;
            }
            Some(Candidate::new(
                format!("\\binom{{{n}}}{{{k}}} = \\binom{{{n}}}{{x}}, \\; x \\neq {k}. \\; x = ?"),
                n - k,
                3,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_archetype_produces_valid_candidates() {
        for archetype in Archetype::ALL {
            let mut rng = SeededRng::from_key(archetype.type_tag());
            for _ in 0..200 {
                let candidate = archetype
                    .generate(&mut rng)
                    .unwrap_or_else(|| panic!("{archetype:?} exhausted its retries"));
                assert!(candidate.is_valid(), "{archetype:?}: {candidate:?}");
                assert!((1..=5).contains(&candidate.level));
                assert!(!candidate.display_text.is_empty());
            }
        }
    }

    #[test]
    fn level_pools_cover_every_archetype() {
        for archetype in Archetype::ALL {
            assert!(
                (1..=5).any(|level| General::level_pool(level).contains(&archetype)),
                "{archetype:?} is unreachable by level"
            );
        }
    }

    #[test]
    fn type_tags_are_unique() {
        let mut tags: Vec<_> = Archetype::ALL.iter().map(|a| a.type_tag()).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), Archetype::ALL.len());
    }

    #[test]
    fn out_of_range_levels_are_clamped() {
        assert_eq!(General::level_pool(0), General::level_pool(1));
        assert_eq!(General::level_pool(9), General::level_pool(5));
    }

    #[test]
    fn difference_of_squares_exponent_is_consistent() {
        // Every irrational-exponent variant must state a^(k-1).
        let mut rng = SeededRng::from_key("exp-check");
        for _ in 0..300 {
            let candidate = exponent(&mut rng);
            if let Some(c) = candidate.filter(|c| c.display_text.contains("sqrt")) {
                let base: i64 = c.display_text["\\left(".len()..]
                    .split('^')
                    .next()
                    .and_then(|b| b.parse().ok())
                    .expect("base");
                let k: i64 = c.display_text
                    .split("\\sqrt{")
                    .nth(1)
                    .and_then(|rest| rest.split('}').next())
                    .and_then(|k| k.parse().ok())
                    .expect("k");
                assert_eq!(c.answer, base.pow((k - 1) as u32));
            }
        }
    }
}
