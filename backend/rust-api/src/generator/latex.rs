//! Small LaTeX builders for question text.

/// Joins `coefficient * symbol` terms with proper signs, skipping zeros.
/// An empty symbol is a constant term.
pub fn terms(parts: &[(i64, &str)]) -> String {
    let mut out = String::new();
    for &(coefficient, symbol) in parts {
        if coefficient == 0 {
            continue;
        }
        let magnitude = coefficient.abs();
        let body = if symbol.is_empty() {
            magnitude.to_string()
        } else if magnitude == 1 {
            symbol.to_string()
        } else {
            format!("{magnitude}{symbol}")
        };
        if out.is_empty() {
            if coefficient < 0 {
                out.push('-');
            }
        } else {
            out.push_str(if coefficient < 0 { " - " } else { " + " });
        }
        out.push_str(&body);
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}

/// Polynomial in `var`, coefficients from the highest degree down.
pub fn poly(coefficients: &[i64], var: &str) -> String {
    let degree = coefficients.len().saturating_sub(1);
    let symbols: Vec<String> = (0..coefficients.len())
        .map(|i| match degree - i {
            0 => String::new(),
            1 => var.to_string(),
            p => format!("{var}^{{{p}}}"),
        })
        .collect();
    let parts: Vec<(i64, &str)> = coefficients
        .iter()
        .zip(symbols.iter())
        .map(|(c, s)| (*c, s.as_str()))
        .collect();
    terms(&parts)
}

/// `var - root`, written with the sign a person would use.
pub fn linear_factor(var: &str, root: i64) -> String {
    match root {
        0 => var.to_string(),
        r if r > 0 => format!("{var} - {r}"),
        r => format!("{var} + {}", -r),
    }
}

/// Wraps negative numbers in parentheses: `(-3)`.
pub fn paren(n: i64) -> String {
    if n < 0 {
        format!("({n})")
    } else {
        n.to_string()
    }
}
