//! Cognitive-skill family: middle-school content tagged by the skill it
//! exercises. Shares the stream, selector and distractor machinery with the
//! general family; only the archetype table differs.

use super::distractor::DistractorProfile;
use super::latex::{paren, poly, terms};
use super::question::{clamp_level, AngleRelation, Candidate, CognitiveSkill, Diagram};
use super::rng::SeededRng;
use super::{binomial, checked_pow, gcd, retry_draws, ArchetypeSpec, QuestionFamily};

const SQUARE_FREE: [i64; 5] = [2, 3, 5, 6, 7];
const PYTHAGOREAN_TRIPLES: [(i64, i64, i64); 5] =
    [(3, 4, 5), (5, 12, 13), (8, 15, 17), (7, 24, 25), (20, 21, 29)];
const PERCENTS: [i64; 7] = [5, 10, 15, 20, 25, 50, 75];
const INEQUALITY_OPTIONS: [&str; 5] = [">", "<", "\\geq", "\\leq", "="];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CognitiveArchetype {
    SignedArithmetic,
    ExponentRule,
    RootSimplify,
    LinearEquation,
    LinearSystem,
    Quadrant,
    InequalityDirection,
    IrrationalClassification,
    SimilarityRatio,
    AreaRatio,
    VolumeRatio,
    ProbabilityCount,
    TriangleAngle,
    ExteriorAngle,
    ParallelLines,
    Pythagorean,
    Slope,
    Percentage,
    Mean,
    Gcd,
}

impl CognitiveArchetype {
    pub const ALL: [CognitiveArchetype; 20] = [
        CognitiveArchetype::SignedArithmetic,
        CognitiveArchetype::ExponentRule,
        CognitiveArchetype::RootSimplify,
        CognitiveArchetype::LinearEquation,
        CognitiveArchetype::LinearSystem,
        CognitiveArchetype::Quadrant,
        CognitiveArchetype::InequalityDirection,
        CognitiveArchetype::IrrationalClassification,
        CognitiveArchetype::SimilarityRatio,
        CognitiveArchetype::AreaRatio,
        CognitiveArchetype::VolumeRatio,
        CognitiveArchetype::ProbabilityCount,
        CognitiveArchetype::TriangleAngle,
        CognitiveArchetype::ExteriorAngle,
        CognitiveArchetype::ParallelLines,
        CognitiveArchetype::Pythagorean,
        CognitiveArchetype::Slope,
        CognitiveArchetype::Percentage,
        CognitiveArchetype::Mean,
        CognitiveArchetype::Gcd,
    ];

    pub fn skill(self) -> CognitiveSkill {
        use CognitiveArchetype as A;
        match self {
            A::SignedArithmetic | A::ExponentRule | A::RootSimplify | A::LinearEquation => {
                CognitiveSkill::Computation
            }
            A::Quadrant
            | A::IrrationalClassification
            | A::TriangleAngle
            | A::ExteriorAngle
            | A::Slope => CognitiveSkill::Understanding,
            A::LinearSystem
            | A::InequalityDirection
            | A::ProbabilityCount
            | A::ParallelLines
            | A::Gcd => CognitiveSkill::Reasoning,
            A::SimilarityRatio
            | A::AreaRatio
            | A::VolumeRatio
            | A::Pythagorean
            | A::Percentage
            | A::Mean => CognitiveSkill::Application,
        }
    }
}

const LEVEL_1: &[CognitiveArchetype] = &[
    CognitiveArchetype::SignedArithmetic,
    CognitiveArchetype::ExponentRule,
    CognitiveArchetype::LinearEquation,
    CognitiveArchetype::Quadrant,
    CognitiveArchetype::TriangleAngle,
    CognitiveArchetype::Percentage,
];
const LEVEL_2: &[CognitiveArchetype] = &[
    CognitiveArchetype::ExponentRule,
    CognitiveArchetype::RootSimplify,
    CognitiveArchetype::InequalityDirection,
    CognitiveArchetype::IrrationalClassification,
    CognitiveArchetype::ExteriorAngle,
    CognitiveArchetype::ParallelLines,
    CognitiveArchetype::Pythagorean,
    CognitiveArchetype::Slope,
    CognitiveArchetype::Mean,
];
const LEVEL_3: &[CognitiveArchetype] = &[
    CognitiveArchetype::LinearSystem,
    CognitiveArchetype::Quadrant,
    CognitiveArchetype::InequalityDirection,
    CognitiveArchetype::SimilarityRatio,
    CognitiveArchetype::AreaRatio,
    CognitiveArchetype::ProbabilityCount,
    CognitiveArchetype::Gcd,
];
const LEVEL_4: &[CognitiveArchetype] = &[
    CognitiveArchetype::LinearSystem,
    CognitiveArchetype::AreaRatio,
    CognitiveArchetype::VolumeRatio,
    CognitiveArchetype::ProbabilityCount,
    CognitiveArchetype::Pythagorean,
    CognitiveArchetype::Slope,
];
const LEVEL_5: &[CognitiveArchetype] = &[
    CognitiveArchetype::LinearSystem,
    CognitiveArchetype::IrrationalClassification,
    CognitiveArchetype::SimilarityRatio,
    CognitiveArchetype::VolumeRatio,
    CognitiveArchetype::ProbabilityCount,
    CognitiveArchetype::Gcd,
];

pub struct Cognitive;

impl QuestionFamily for Cognitive {
    type Archetype = CognitiveArchetype;

    const NAME: &'static str = "cognitive";
    const ID_PREFIX: &'static str = "cog-";

    fn all() -> &'static [CognitiveArchetype] {
        &CognitiveArchetype::ALL
    }

    fn level_pool(level: u8) -> &'static [CognitiveArchetype] {
        match clamp_level(level) {
            1 => LEVEL_1,
            2 => LEVEL_2,
            3 => LEVEL_3,
            4 => LEVEL_4,
            _ => LEVEL_5,
        }
    }
}

impl ArchetypeSpec for CognitiveArchetype {
    fn type_tag(self) -> &'static str {
        use CognitiveArchetype as A;
        match self {
            A::SignedArithmetic => "signed_arithmetic",
            A::ExponentRule => "exponent_rule",
            A::RootSimplify => "root_simplify",
            A::LinearEquation => "linear_equation",
            A::LinearSystem => "linear_system",
            A::Quadrant => "quadrant",
            A::InequalityDirection => "inequality",
            A::IrrationalClassification => "irrational",
            A::SimilarityRatio => "similarity",
            A::AreaRatio => "area_ratio",
            A::VolumeRatio => "volume_ratio",
            A::ProbabilityCount => "probability",
            A::TriangleAngle => "triangle_angle",
            A::ExteriorAngle => "exterior_angle",
            A::ParallelLines => "parallel_lines",
            A::Pythagorean => "pythagorean",
            A::Slope => "slope",
            A::Percentage => "percentage",
            A::Mean => "mean",
            A::Gcd => "gcd",
        }
    }

    fn cognitive_tag(self) -> Option<CognitiveSkill> {
        Some(self.skill())
    }

    fn matches_tag(self, tag: &str) -> bool {
        self.type_tag() == tag || self.skill().as_str() == tag
    }

    fn distractor_profile(self) -> DistractorProfile {
        use CognitiveArchetype as A;
        match self {
            A::SignedArithmetic | A::LinearEquation | A::LinearSystem | A::Gcd => {
                DistractorProfile::Arithmetic
            }
            A::ExponentRule => DistractorProfile::Exponent,
            A::RootSimplify => DistractorProfile::Radical,
            A::Quadrant | A::InequalityDirection | A::IrrationalClassification => {
                DistractorProfile::POSITIONAL
            }
            A::SimilarityRatio | A::AreaRatio | A::VolumeRatio | A::Pythagorean => {
                DistractorProfile::Ratio
            }
            A::ProbabilityCount => DistractorProfile::Counting,
            A::TriangleAngle | A::ExteriorAngle | A::ParallelLines => DistractorProfile::Angle,
            A::Slope => DistractorProfile::Polynomial,
            A::Percentage | A::Mean => DistractorProfile::Percent,
        }
    }

    fn generate(self, rng: &mut SeededRng) -> Option<Candidate> {
        use CognitiveArchetype as A;
        match self {
            A::SignedArithmetic => retry_draws(rng, signed_arithmetic),
            A::ExponentRule => retry_draws(rng, exponent_rule),
            A::RootSimplify => retry_draws(rng, root_simplify),
            A::LinearEquation => retry_draws(rng, linear_equation),
            A::LinearSystem => retry_draws(rng, linear_system),
            A::Quadrant => retry_draws(rng, quadrant),
            A::InequalityDirection => retry_draws(rng, inequality_direction),
            A::IrrationalClassification => retry_draws(rng, irrational_classification),
            A::SimilarityRatio => retry_draws(rng, similarity_ratio),
            A::AreaRatio => retry_draws(rng, area_ratio),
            A::VolumeRatio => retry_draws(rng, volume_ratio),
            A::ProbabilityCount => retry_draws(rng, probability_count),
            A::TriangleAngle => retry_draws(rng, triangle_angle),
            A::ExteriorAngle => retry_draws(rng, exterior_angle),
            A::ParallelLines => retry_draws(rng, parallel_lines),
            A::Pythagorean => retry_draws(rng, pythagorean),
            A::Slope => retry_draws(rng, slope),
            A::Percentage => retry_draws(rng, percentage),
            A::Mean => retry_draws(rng, mean),
            A::Gcd => retry_draws(rng, greatest_common_divisor),
        }
    }
}

fn signed_arithmetic(rng: &mut SeededRng) -> Option<Candidate> {
    let a = rng.int_range(2, 12);
    let b = rng.int_range(2, 12);
    let c = rng.int_range(1, 30);
    if rng.chance(0.5) {
        // (-a)(-b) - c
        let answer = a * b - c;
        Some(Candidate::new(
            format!("({}) \\times ({}) - {c}", -a, -b),
            answer,
            1,
        ))
    } else {
        // -a - (-b) + c
        let answer = -a + b + c;
        Some(Candidate::new(
            format!("{} - ({}) + {c}", -a, -b),
            answer,
            1,
        ))
    }
}

fn exponent_rule(rng: &mut SeededRng) -> Option<Candidate> {
    let base = rng.int_range(2, 5);
    let m = rng.int_range(2, 4);
    let n = rng.int_range(2, 3);
    let p = rng.int_range(1, m * n - 1);
    let answer = checked_pow(base, m * n - p)?;
    Some(Candidate::new(
        format!("\\frac{{({base}^{{{m}}})^{{{n}}}}}{{{base}^{{{p}}}}}"),
        answer,
        if m * n - p > 3 { 2 } else { 1 },
    ))
}

fn root_simplify(rng: &mut SeededRng) -> Option<Candidate> {
    let m = rng.pick(&SQUARE_FREE);
    let k = rng.int_range(2, 9);
    Some(Candidate::new(
        format!("\\sqrt{{{}}} = a\\sqrt{{{m}}}. \\; a = ?", k * k * m),
        k,
        2,
    ))
}

fn linear_equation(rng: &mut SeededRng) -> Option<Candidate> {
    let x = rng.int_range(1, 20);
    let a = rng.int_range(2, 9);
    let b = rng.int_range(-20, 20);
    if b == 0 {
        return None;
    }
    let c = a * x + b;
    Some(Candidate::new(
        format!("{} = {c}. \\; x = ?", poly(&[a, b], "x")),
        x,
        1,
    ))
}

fn linear_system(rng: &mut SeededRng) -> Option<Candidate> {
    let x = rng.int_range(1, 15);
    let y = rng.int_range(1, 15);
    let (a1, b1) = (rng.int_range(1, 4), rng.int_range(-4, 4));
    let (a2, b2) = (rng.int_range(-4, 4), rng.int_range(1, 4));
    if a1 * b2 - a2 * b1 == 0 || b1 == 0 || a2 == 0 {
        return None;
    }
    let c1 = a1 * x + b1 * y;
    let c2 = a2 * x + b2 * y;
    Some(Candidate::new(
        format!(
            "\\begin{{cases}} {} = {c1} \\\\ {} = {c2} \\end{{cases}} \\; x + y = ?",
            terms(&[(a1, "x"), (b1, "y")]),
            terms(&[(a2, "x"), (b2, "y")])
        ),
        x + y,
        3,
    ))
}

/// Choice 5 of the quadrant listing: the point sits on an axis.
const ON_AXIS: i64 = 5;

fn quadrant_of(x_positive: bool, y_positive: bool) -> i64 {
    match (x_positive, y_positive) {
        (true, true) => 1,
        (false, true) => 2,
        (false, false) => 3,
        (true, false) => 4,
    }
}

fn locate(x: i64, y: i64) -> i64 {
    if x == 0 || y == 0 {
        ON_AXIS
    } else {
        quadrant_of(x > 0, y > 0)
    }
}

fn quadrant(rng: &mut SeededRng) -> Option<Candidate> {
    if rng.chance(0.5) {
        let mut x = rng.int_range(1, 9);
        let mut y = rng.int_range(1, 9);
        if rng.chance(0.5) {
            x = -x;
        }
        if rng.chance(0.5) {
            y = -y;
        }
        if rng.chance(0.2) {
            if rng.chance(0.5) {
                x = 0;
            } else {
                y = 0;
            }
        }
        Some(Candidate::new(
            format!("P({x}, {y}) \\text{{ lies in quadrant ? }} (5 = \\text{{on an axis}})"),
            locate(x, y),
            1,
        ))
    } else {
        // P(a, b) in quadrant q; where is Q(b, -a)?
        let q = rng.int_range(1, 4);
        let (a_positive, b_positive) = match q {
            1 => (true, true),
            2 => (false, true),
            3 => (false, false),
            _ => (true, false),
        };
        Some(Candidate::new(
            format!("P(a, b) \\text{{ lies in quadrant }} {q}. \\; Q(b, -a) \\text{{ lies in quadrant ? }} (5 = \\text{{on an axis}})"),
            quadrant_of(b_positive, !a_positive),
            3,
        ))
    }
}

fn inequality_direction(rng: &mut SeededRng) -> Option<Candidate> {
    let magnitude = rng.int_range(2, 6);
    let a = if rng.chance(0.6) { -magnitude } else { magnitude };
    let m = rng.int_range(-9, 9);
    let c = rng.int_range(-10, 10);
    let op = rng.index(4);
    let d = a * m + c;

    // Dividing by a negative coefficient flips the relation.
    let solved = if a < 0 { op ^ 1 } else { op };
    let options = INEQUALITY_OPTIONS
        .iter()
        .enumerate()
        .map(|(i, symbol)| format!("({}) \\; x {symbol} {m}", i + 1))
        .collect::<Vec<_>>()
        .join(" \\quad ");

    Some(Candidate::new(
        format!(
            "{} {} {d} \\implies ? \\qquad {options}",
            poly(&[a, c], "x"),
            INEQUALITY_OPTIONS[op]
        ),
        solved as i64 + 1,
        if a < 0 { 3 } else { 2 },
    ))
}

fn irrational_classification(rng: &mut SeededRng) -> Option<Candidate> {
    let find_rational = rng.chance(0.3);
    let position = rng.int_range(1, 5);
    let mut items = Vec::with_capacity(5);
    for slot in 1..=5 {
        let odd_one_out = slot == position;
        let want_rational = odd_one_out == find_rational;
        items.push(if want_rational {
            rational_expression(rng)
        } else {
            irrational_expression(rng)
        });
    }
    let listing = items
        .iter()
        .enumerate()
        .map(|(i, e)| format!("({}) \\; {e}", i + 1))
        .collect::<Vec<_>>()
        .join(" \\quad ");
    let prompt = if find_rational { "rational" } else { "irrational" };
    Some(Candidate::new(
        format!("\\text{{Which is {prompt}?}} \\qquad {listing}"),
        position,
        if find_rational { 3 } else { 2 },
    ))
}

fn rational_expression(rng: &mut SeededRng) -> String {
    match rng.index(4) {
        0 => {
            let n = rng.int_range(2, 12);
            format!("\\sqrt{{{}}}", n * n)
        }
        1 => format!("\\frac{{{}}}{{{}}}", rng.int_range(1, 9), rng.int_range(2, 9)),
        2 => format!("0.\\overline{{{}}}", rng.int_range(1, 9)),
        _ => {
            let n = rng.int_range(2, 5);
            format!("\\sqrt[3]{{{}}}", n * n * n)
        }
    }
}

fn irrational_expression(rng: &mut SeededRng) -> String {
    match rng.index(3) {
        0 => format!("\\sqrt{{{}}}", rng.pick(&SQUARE_FREE)),
        1 => format!("\\pi + {}", rng.int_range(1, 9)),
        _ => format!("{} + \\sqrt{{{}}}", rng.int_range(1, 9), rng.pick(&SQUARE_FREE)),
    }
}

fn similarity_ratio(rng: &mut SeededRng) -> Option<Candidate> {
    // Scale p/q; small sides q·u and q·v, large sides p·u and p·v.
    let q = rng.int_range(1, 3);
    let p = rng.int_range(q + 1, q + 3);
    let u = rng.int_range(1, 6);
    let v = rng.int_range(1, 6);
    if u == v {
        return None;
    }
    let small = [q * u, q * v];
    let large = p * u;
    Some(
        Candidate::new(
            format!(
                "\\triangle ABC \\sim \\triangle DEF. \\; AB = {}, \\; BC = {}, \\; DE = {large}. \\; EF = ?",
                small[0], small[1]
            ),
            p * v,
            3,
        )
        .with_diagram(Diagram::SimilarTriangles {
            small_sides: small,
            large_side: large,
        }),
    )
}

fn area_ratio(rng: &mut SeededRng) -> Option<Candidate> {
    let q = rng.int_range(1, 4);
    let p = rng.int_range(q + 1, q + 4);
    if gcd(p, q) != 1 {
        return None;
    }
    let t = rng.int_range(1, 6);
    Some(Candidate::new(
        format!(
            "\\text{{Similar figures, side ratio }} {q}:{p}. \\text{{ Smaller area }} = {}. \\text{{ Larger area}} = ?",
            q * q * t
        ),
        p * p * t,
        3,
    ))
}

fn volume_ratio(rng: &mut SeededRng) -> Option<Candidate> {
    let q = rng.int_range(1, 3);
    let p = rng.int_range(q + 1, q + 3);
    if gcd(p, q) != 1 {
        return None;
    }
    let t = rng.int_range(1, 5);
    Some(Candidate::new(
        format!(
            "\\text{{Similar solids, edge ratio }} {q}:{p}. \\text{{ Smaller volume }} = {}. \\text{{ Larger volume}} = ?",
            q * q * q * t
        ),
        p * p * p * t,
        4,
    ))
}

fn probability_count(rng: &mut SeededRng) -> Option<Candidate> {
    match rng.index(3) {
        0 => {
            let sum = rng.int_range(2, 12);
            Some(Candidate::new(
                format!("\\text{{Two dice. Outcomes with sum }} {sum} = ?"),
                6 - (sum - 7).abs(),
                2,
            ))
        }
        1 => {
            let red = rng.int_range(2, 8);
            let blue = rng.int_range(2, 8);
            let answer = binomial(red, 2)? + binomial(blue, 2)?;
            Some(Candidate::new(
                format!("\\text{{{red} red, {blue} blue. Ways to pick 2 of the same colour}} = ?"),
                answer,
                4,
            ))
        }
        _ => {
            let coins = rng.int_range(3, 8);
            let heads = rng.int_range(1, coins - 1);
            Some(Candidate::new(
                format!("\\text{{{coins} coins. Outcomes with exactly {heads} heads}} = ?"),
                binomial(coins, heads)?,
                3,
            ))
        }
    }
}

fn triangle_angle(rng: &mut SeededRng) -> Option<Candidate> {
    let a = rng.int_range(4, 20) * 5;
    let b = rng.int_range(4, 20) * 5;
    let answer = 180 - a - b;
    if answer < 10 {
        return None;
    }
    Some(
        Candidate::new(
            format!("\\angle A = {a}^\\circ, \\; \\angle B = {b}^\\circ. \\; \\angle C = ?"),
            answer,
            1,
        )
        .with_diagram(Diagram::Triangle {
            known_angles: [a, b],
        }),
    )
}

fn exterior_angle(rng: &mut SeededRng) -> Option<Candidate> {
    let a = rng.int_range(4, 16) * 5;
    let b = rng.int_range(4, 16) * 5;
    if a + b >= 170 {
        return None;
    }
    Some(
        Candidate::new(
            format!("\\angle A = {a}^\\circ, \\; \\angle B = {b}^\\circ. \\; \\text{{Exterior angle at }} C = ?"),
            a + b,
            2,
        )
        .with_diagram(Diagram::ExteriorAngle {
            interior_angles: [a, b],
        }),
    )
}

fn parallel_lines(rng: &mut SeededRng) -> Option<Candidate> {
    let given = rng.int_range(5, 34) * 5;
    if given == 90 {
        return None;
    }
    let relation = match rng.index(3) {
        0 => AngleRelation::Corresponding,
        1 => AngleRelation::Alternate,
        _ => AngleRelation::CoInterior,
    };
    let (name, answer) = match relation {
        AngleRelation::Corresponding => ("corresponding", given),
        AngleRelation::Alternate => ("alternate", given),
        AngleRelation::CoInterior => ("co-interior", 180 - given),
    };
    Some(
        Candidate::new(
            format!("l \\parallel m. \\; \\text{{Given }} {given}^\\circ, \\text{{ the {name} angle}} = ?"),
            answer,
            2,
        )
        .with_diagram(Diagram::ParallelLines {
            given_angle: given,
            relation,
        }),
    )
}

fn pythagorean(rng: &mut SeededRng) -> Option<Candidate> {
    let (a, b, c) = rng.pick(&PYTHAGOREAN_TRIPLES);
    let k = rng.int_range(1, 4);
    let (a, b, c) = (a * k, b * k, c * k);
    if rng.chance(0.6) {
        Some(
            Candidate::new(
                format!("\\text{{Legs }} {a}, {b}. \\text{{ Hypotenuse}} = ?"),
                c,
                2,
            )
            .with_diagram(Diagram::RightTriangle {
                legs: [Some(a), Some(b)],
                hypotenuse: None,
            }),
        )
    } else {
        Some(
            Candidate::new(
                format!("\\text{{Leg }} {a}, \\text{{ hypotenuse }} {c}. \\text{{ Other leg}} = ?"),
                b,
                3,
            )
            .with_diagram(Diagram::RightTriangle {
                legs: [Some(a), None],
                hypotenuse: Some(c),
            }),
        )
    }
}

fn slope(rng: &mut SeededRng) -> Option<Candidate> {
    let m = rng.int_range(1, 6);
    let x1 = rng.int_range(-5, 5);
    let y1 = rng.int_range(-9, 9);
    if rng.chance(0.5) {
        let dx = rng.int_range(1, 4);
        let (x2, y2) = (x1 + dx, y1 + m * dx);
        Some(Candidate::new(
            format!("\\text{{Slope through }} ({x1}, {y1}) \\text{{ and }} ({x2}, {y2}) = ?"),
            m,
            2,
        ))
    } else {
        // y = m x + b through (x1, y1): b = y1 - m x1
        let intercept = y1 - m * x1;
        Some(Candidate::new(
            format!("y = {m}x + b \\text{{ passes through }} ({x1}, {y1}). \\; b = ?"),
            intercept,
            3,
        ))
    }
}

fn percentage(rng: &mut SeededRng) -> Option<Candidate> {
    let percent = rng.pick(&PERCENTS);
    let n = rng.int_range(1, 40) * 20;
    if rng.chance(0.6) {
        let scaled = percent * n;
        if scaled % 100 != 0 {
            return None;
        }
        Some(Candidate::new(
            format!("{percent}\\% \\text{{ of }} {n} = ?"),
            scaled / 100,
            1,
        ))
    } else {
        let scaled = (100 + percent) * n;
        if scaled % 100 != 0 {
            return None;
        }
        Some(Candidate::new(
            format!("{n} \\text{{ increased by }} {percent}\\% = ?"),
            scaled / 100,
            2,
        ))
    }
}

fn mean(rng: &mut SeededRng) -> Option<Candidate> {
    if rng.chance(0.5) {
        let count = rng.int_range(4, 6);
        let values: Vec<i64> = (0..count).map(|_| rng.int_range(1, 30)).collect();
        let sum: i64 = values.iter().sum();
        if sum % count != 0 {
            return None;
        }
        Some(Candidate::new(
            format!("\\text{{Mean of }} {} = ?", join(&values)),
            sum / count,
            2,
        ))
    } else {
        let target = rng.int_range(5, 25);
        let known: Vec<i64> = (0..4).map(|_| rng.int_range(1, 30)).collect();
        let missing = 5 * target - known.iter().sum::<i64>();
        Some(Candidate::new(
            format!(
                "\\text{{Mean of }} {}, x \\text{{ is }} {target}. \\; x = ?",
                join(&known)
            ),
            missing,
            3,
        ))
    }
}

fn greatest_common_divisor(rng: &mut SeededRng) -> Option<Candidate> {
    let g = rng.int_range(2, 15);
    let u = rng.int_range(1, 12);
    let v = rng.int_range(1, 12);
    if u == v || gcd(u, v) != 1 {
        return None;
    }
    let (a, b) = (g * u, g * v);
    if rng.chance(0.3) {
        Some(Candidate::new(
            format!("\\operatorname{{lcm}}({a}, {b}) = ?"),
            g * u * v,
            4,
        ))
    } else {
        Some(Candidate::new(
            format!("\\gcd({a}, {b}) = ?"),
            g,
            3,
        ))
    }
}

fn join(values: &[i64]) -> String {
    values
        .iter()
        .map(|v| paren(*v))
        .collect::<Vec<_>>()
        .join(", ")
}
