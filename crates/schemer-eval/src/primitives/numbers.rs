//! The numeric tower as exact integers and inexact doubles: arithmetic,
//! comparison, rounding, and the `number<->string` conversions, all
//! honoring the exact/inexact contagion rule — any
//! inexact operand taints the result inexact, even for `quotient` and
//! kin where the magnitude is integral.

use schemer_heap::{EnvHandle, Result, SchemeError, Value};

use super::bind;

pub(super) fn install(env: &EnvHandle) {
    bind(env, "number?", number_p);
    bind(env, "complex?", number_p);
    bind(env, "real?", number_p);
    bind(env, "rational?", number_p);
    bind(env, "integer?", integer_p);
    bind(env, "exact?", exact_p);
    bind(env, "inexact?", inexact_p);
    bind(env, "=", num_eq);
    bind(env, "<", num_lt);
    bind(env, ">", num_gt);
    bind(env, "<=", num_le);
    bind(env, ">=", num_ge);
    bind(env, "zero?", zero_p);
    bind(env, "positive?", positive_p);
    bind(env, "negative?", negative_p);
    bind(env, "odd?", odd_p);
    bind(env, "even?", even_p);
    bind(env, "min", min);
    bind(env, "max", max);
    bind(env, "+", add);
    bind(env, "-", sub);
    bind(env, "*", mul);
    bind(env, "/", div);
    bind(env, "abs", abs);
    bind(env, "quotient", quotient);
    bind(env, "remainder", remainder);
    bind(env, "modulo", modulo);
    bind(env, "floor", floor);
    bind(env, "ceiling", ceiling);
    bind(env, "truncate", truncate);
    bind(env, "round", round);
    bind(env, "expt", expt);
    bind(env, "sqrt", sqrt);
    bind(env, "exact->inexact", exact_to_inexact);
    bind(env, "inexact->exact", inexact_to_exact);
    bind(env, "number->string", number_to_string);
    bind(env, "string->number", string_to_number);
}

/// A number is either an exact integer or an inexact real; this mirrors
/// `Value::Int`/`Value::Float` exactly, unboxed for arithmetic.
#[derive(Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn as_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(x) => x,
        }
    }

    fn to_value(self) -> Value {
        match self {
            Num::Int(n) => Value::Int(n),
            Num::Float(x) => Value::Float(x),
        }
    }

    fn is_inexact(self) -> bool {
        matches!(self, Num::Float(_))
    }
}

fn as_num(value: &Value, who: &str) -> Result<Num> {
    match value {
        Value::Int(n) => Ok(Num::Int(*n)),
        Value::Float(x) => Ok(Num::Float(*x)),
        other => Err(SchemeError::type_error(format!(
            "{who}: expected a number, got {}",
            other.kind_name()
        ))),
    }
}

fn nums(args: &[Value], who: &str) -> Result<Vec<Num>> {
    args.iter().map(|v| as_num(v, who)).collect()
}

/// Two exact integers stay exact; any inexact operand taints the whole
/// pair inexact, per the contagion rule.
fn contagion2(a: Num, b: Num) -> (bool, i64, i64, f64, f64) {
    let inexact = a.is_inexact() || b.is_inexact();
    (inexact, as_i64(a), as_i64(b), a.as_f64(), b.as_f64())
}

fn as_i64(n: Num) -> i64 {
    match n {
        Num::Int(n) => n,
        Num::Float(x) => x as i64,
    }
}

fn number_p(args: &[Value]) -> Result<Value> {
    let [v] = args else {
        return Err(SchemeError::arity_error("number predicate requires exactly 1 argument"));
    };
    Ok(Value::Bool(matches!(v, Value::Int(_) | Value::Float(_))))
}

fn integer_p(args: &[Value]) -> Result<Value> {
    let [v] = args else {
        return Err(SchemeError::arity_error("integer? requires exactly 1 argument"));
    };
    Ok(Value::Bool(match v {
        Value::Int(_) => true,
        Value::Float(x) => x.fract() == 0.0,
        _ => false,
    }))
}

fn exact_p(args: &[Value]) -> Result<Value> {
    let n = as_num(one(args, "exact?")?, "exact?")?;
    Ok(Value::Bool(!n.is_inexact()))
}

fn inexact_p(args: &[Value]) -> Result<Value> {
    let n = as_num(one(args, "inexact?")?, "inexact?")?;
    Ok(Value::Bool(n.is_inexact()))
}

fn one<'a>(args: &'a [Value], who: &str) -> Result<&'a Value> {
    match args {
        [v] => Ok(v),
        _ => Err(SchemeError::arity_error(format!(
            "{who} requires exactly 1 argument, got {}",
            args.len()
        ))),
    }
}

/// Shared machinery for the chained comparisons `=`, `<`, `>`, `<=`,
/// `>=`: every adjacent pair must satisfy `cmp`.
fn chain_compare(args: &[Value], who: &str, cmp: fn(f64, f64) -> bool) -> Result<Value> {
    let values = nums(args, who)?;
    for pair in values.windows(2) {
        if !cmp(pair[0].as_f64(), pair[1].as_f64()) {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

fn num_eq(args: &[Value]) -> Result<Value> {
    chain_compare(args, "=", |a, b| a == b)
}

fn num_lt(args: &[Value]) -> Result<Value> {
    chain_compare(args, "<", |a, b| a < b)
}

fn num_gt(args: &[Value]) -> Result<Value> {
    chain_compare(args, ">", |a, b| a > b)
}

fn num_le(args: &[Value]) -> Result<Value> {
    chain_compare(args, "<=", |a, b| a <= b)
}

fn num_ge(args: &[Value]) -> Result<Value> {
    chain_compare(args, ">=", |a, b| a >= b)
}

fn zero_p(args: &[Value]) -> Result<Value> {
    let n = as_num(one(args, "zero?")?, "zero?")?;
    Ok(Value::Bool(n.as_f64() == 0.0))
}

fn positive_p(args: &[Value]) -> Result<Value> {
    let n = as_num(one(args, "positive?")?, "positive?")?;
    Ok(Value::Bool(n.as_f64() > 0.0))
}

fn negative_p(args: &[Value]) -> Result<Value> {
    let n = as_num(one(args, "negative?")?, "negative?")?;
    Ok(Value::Bool(n.as_f64() < 0.0))
}

fn odd_p(args: &[Value]) -> Result<Value> {
    let n = as_num(one(args, "odd?")?, "odd?")?;
    Ok(Value::Bool(as_i64(n) % 2 != 0))
}

fn even_p(args: &[Value]) -> Result<Value> {
    let n = as_num(one(args, "even?")?, "even?")?;
    Ok(Value::Bool(as_i64(n) % 2 == 0))
}

fn min(args: &[Value]) -> Result<Value> {
    extremum(args, "min", |a, b| a < b)
}

fn max(args: &[Value]) -> Result<Value> {
    extremum(args, "max", |a, b| a > b)
}

/// `min`/`max`: the numerically-selected value, but inexact if *any*
/// argument was inexact even when it wasn't the winner.
fn extremum(args: &[Value], who: &str, better: fn(f64, f64) -> bool) -> Result<Value> {
    let values = nums(args, who)?;
    let (first, rest) = values
        .split_first()
        .ok_or_else(|| SchemeError::arity_error(format!("{who} requires at least 1 argument")))?;
    let any_inexact = values.iter().any(|n| n.is_inexact());
    let mut winner = *first;
    for &candidate in rest {
        if better(candidate.as_f64(), winner.as_f64()) {
            winner = candidate;
        }
    }
    Ok(if any_inexact {
        Value::Float(winner.as_f64())
    } else {
        winner.to_value()
    })
}

fn add(args: &[Value]) -> Result<Value> {
    let values = nums(args, "+")?;
    if values.iter().any(|n| n.is_inexact()) {
        Ok(Value::Float(values.iter().fold(0.0, |acc, n| acc + n.as_f64())))
    } else {
        let mut acc: i64 = 0;
        for n in values {
            acc = acc
                .checked_add(as_i64(n))
                .ok_or_else(|| SchemeError::arithmetic_error("+: integer overflow"))?;
        }
        Ok(Value::Int(acc))
    }
}

fn mul(args: &[Value]) -> Result<Value> {
    let values = nums(args, "*")?;
    if values.iter().any(|n| n.is_inexact()) {
        Ok(Value::Float(values.iter().fold(1.0, |acc, n| acc * n.as_f64())))
    } else {
        let mut acc: i64 = 1;
        for n in values {
            acc = acc
                .checked_mul(as_i64(n))
                .ok_or_else(|| SchemeError::arithmetic_error("*: integer overflow"))?;
        }
        Ok(Value::Int(acc))
    }
}

fn sub(args: &[Value]) -> Result<Value> {
    let values = nums(args, "-")?;
    let (first, rest) = values
        .split_first()
        .ok_or_else(|| SchemeError::arity_error("- requires at least 1 argument"))?;
    if rest.is_empty() {
        return Ok(match first {
            Num::Int(n) => Value::Int(-n),
            Num::Float(x) => Value::Float(-x),
        });
    }
    if first.is_inexact() || rest.iter().any(|n| n.is_inexact()) {
        let result = rest.iter().fold(first.as_f64(), |acc, n| acc - n.as_f64());
        Ok(Value::Float(result))
    } else {
        let mut acc = as_i64(*first);
        for n in rest {
            acc = acc
                .checked_sub(as_i64(*n))
                .ok_or_else(|| SchemeError::arithmetic_error("-: integer overflow"))?;
        }
        Ok(Value::Int(acc))
    }
}

fn div(args: &[Value]) -> Result<Value> {
    let values = nums(args, "/")?;
    let (first, rest) = values
        .split_first()
        .ok_or_else(|| SchemeError::arity_error("/ requires at least 1 argument"))?;
    if rest.is_empty() {
        return reciprocal(*first);
    }
    if first.is_inexact() || rest.iter().any(|n| n.is_inexact()) {
        for n in rest {
            if n.as_f64() == 0.0 {
                return Err(SchemeError::arithmetic_error("/: division by zero"));
            }
        }
        let result = rest.iter().fold(first.as_f64(), |acc, n| acc / n.as_f64());
        Ok(Value::Float(result))
    } else {
        let mut acc = as_i64(*first);
        let mut exact = true;
        for n in rest {
            let divisor = as_i64(*n);
            if divisor == 0 {
                return Err(SchemeError::arithmetic_error("/: division by zero"));
            }
            if exact && acc % divisor == 0 {
                acc /= divisor;
            } else {
                exact = false;
            }
        }
        if exact {
            Ok(Value::Int(acc))
        } else {
            let result = rest
                .iter()
                .fold(as_i64(*first) as f64, |running, n| running / n.as_f64());
            Ok(Value::Float(result))
        }
    }
}

fn reciprocal(n: Num) -> Result<Value> {
    match n {
        Num::Int(0) => Err(SchemeError::arithmetic_error("/: division by zero")),
        Num::Int(x) if 1 % x == 0 => Ok(Value::Int(1 / x)),
        other => Ok(Value::Float(1.0 / other.as_f64())),
    }
}

fn abs(args: &[Value]) -> Result<Value> {
    let n = as_num(one(args, "abs")?, "abs")?;
    Ok(match n {
        Num::Int(x) => Value::Int(x.abs()),
        Num::Float(x) => Value::Float(x.abs()),
    })
}

fn two_ints(args: &[Value], who: &str) -> Result<(Num, Num)> {
    match args {
        [a, b] => Ok((as_num(a, who)?, as_num(b, who)?)),
        _ => Err(SchemeError::arity_error(format!("{who} requires exactly 2 arguments"))),
    }
}

fn quotient(args: &[Value]) -> Result<Value> {
    let (a, b) = two_ints(args, "quotient")?;
    let (inexact, x, y, xf, yf) = contagion2(a, b);
    if y == 0 && !inexact {
        return Err(SchemeError::arithmetic_error("quotient: division by zero"));
    }
    if inexact {
        Ok(Value::Float((xf / yf).trunc()))
    } else {
        Ok(Value::Int(x / y))
    }
}

fn remainder(args: &[Value]) -> Result<Value> {
    let (a, b) = two_ints(args, "remainder")?;
    let (inexact, x, y, xf, yf) = contagion2(a, b);
    if y == 0 && !inexact {
        return Err(SchemeError::arithmetic_error("remainder: division by zero"));
    }
    if inexact {
        Ok(Value::Float(xf - yf * (xf / yf).trunc()))
    } else {
        Ok(Value::Int(x % y))
    }
}

fn modulo(args: &[Value]) -> Result<Value> {
    let (a, b) = two_ints(args, "modulo")?;
    let (inexact, x, y, xf, yf) = contagion2(a, b);
    if y == 0 && !inexact {
        return Err(SchemeError::arithmetic_error("modulo: division by zero"));
    }
    if inexact {
        let r = xf - yf * (xf / yf).trunc();
        Ok(Value::Float(if r != 0.0 && (r < 0.0) != (yf < 0.0) { r + yf } else { r }))
    } else {
        let r = x % y;
        Ok(Value::Int(if r != 0 && (r < 0) != (y < 0) { r + y } else { r }))
    }
}

fn floor(args: &[Value]) -> Result<Value> {
    round_like(args, "floor", f64::floor)
}

fn ceiling(args: &[Value]) -> Result<Value> {
    round_like(args, "ceiling", f64::ceil)
}

fn truncate(args: &[Value]) -> Result<Value> {
    round_like(args, "truncate", f64::trunc)
}

fn round(args: &[Value]) -> Result<Value> {
    round_like(args, "round", round_half_to_even)
}

/// Banker's rounding: ties round to the nearest even integer, matching
/// `(round 3.5) => 4.0` and `(round 2.5) => 2.0`.
fn round_half_to_even(x: f64) -> f64 {
    let floor = x.floor();
    let diff = x - floor;
    if diff < 0.5 {
        floor
    } else if diff > 0.5 {
        floor + 1.0
    } else if (floor as i64) % 2 == 0 {
        floor
    } else {
        floor + 1.0
    }
}

fn round_like(args: &[Value], who: &str, op: fn(f64) -> f64) -> Result<Value> {
    let n = as_num(one(args, who)?, who)?;
    Ok(match n {
        Num::Int(x) => Value::Int(x),
        Num::Float(x) => Value::Float(op(x)),
    })
}

fn expt(args: &[Value]) -> Result<Value> {
    let (base, power) = two_ints(args, "expt")?;
    match (base, power) {
        (Num::Int(b), Num::Int(p)) if p >= 0 => {
            let mut acc: i64 = 1;
            for _ in 0..p {
                acc = acc
                    .checked_mul(b)
                    .ok_or_else(|| SchemeError::arithmetic_error("expt: integer overflow"))?;
            }
            Ok(Value::Int(acc))
        }
        _ => Ok(Value::Float(base.as_f64().powf(power.as_f64()))),
    }
}

fn sqrt(args: &[Value]) -> Result<Value> {
    let n = as_num(one(args, "sqrt")?, "sqrt")?;
    let root = n.as_f64().sqrt();
    Ok(match n {
        Num::Int(_) if root.fract() == 0.0 => Value::Int(root as i64),
        _ => Value::Float(root),
    })
}

fn exact_to_inexact(args: &[Value]) -> Result<Value> {
    let n = as_num(one(args, "exact->inexact")?, "exact->inexact")?;
    Ok(Value::Float(n.as_f64()))
}

fn inexact_to_exact(args: &[Value]) -> Result<Value> {
    let n = as_num(one(args, "inexact->exact")?, "inexact->exact")?;
    Ok(Value::Int(match n {
        Num::Int(x) => x,
        Num::Float(x) => x.round() as i64,
    }))
}

fn number_to_string(args: &[Value]) -> Result<Value> {
    match args {
        [v] => {
            as_num(v, "number->string")?;
            Ok(Value::string(v.to_string().into_bytes()))
        }
        [v, radix] => {
            let n = as_num(v, "number->string")?;
            let radix = require_radix(radix)?;
            match n {
                Num::Int(x) if radix != 10 => Ok(Value::string(int_to_radix_string(x, radix).into_bytes())),
                _ => Ok(Value::string(v.to_string().into_bytes())),
            }
        }
        _ => Err(SchemeError::arity_error("number->string requires 1 or 2 arguments")),
    }
}

fn int_to_radix_string(value: i64, radix: u32) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let negative = value < 0;
    let mut magnitude = value.unsigned_abs();
    let mut digits = Vec::new();
    while magnitude > 0 {
        let digit = (magnitude % radix as u64) as u32;
        digits.push(std::char::from_digit(digit, radix).expect("digit within radix"));
        magnitude /= radix as u64;
    }
    if negative {
        digits.push('-');
    }
    digits.iter().rev().collect()
}

fn require_radix(value: &Value) -> Result<u32> {
    match value {
        Value::Int(r) if matches!(r, 2 | 8 | 10 | 16) => Ok(*r as u32),
        other => Err(SchemeError::type_error(format!(
            "expected a radix of 2, 8, 10, or 16, got {}",
            other.kind_name()
        ))),
    }
}

fn string_to_number(args: &[Value]) -> Result<Value> {
    let (text, radix) = match args {
        [Value::Str(s)] => (s.as_string_lossy(), 10),
        [Value::Str(s), radix] => (s.as_string_lossy(), require_radix(radix)?),
        [other, ..] => {
            return Err(SchemeError::type_error(format!(
                "string->number: expected a string, got {}",
                other.kind_name()
            )))
        }
        _ => return Err(SchemeError::arity_error("string->number requires 1 or 2 arguments")),
    };
    Ok(parse_number(&text, radix).map(|n| n.to_value()).unwrap_or(Value::Bool(false)))
}

/// Parses the subset of R5RS numeric syntax the reader accepts from a
/// plain `&str`, including the `#` wildcard-digit convention (each
/// trailing `#` stands for an unknown decimal digit, rendered as `0` and
/// forcing the result inexact).
fn parse_number(text: &str, radix: u32) -> Option<Num> {
    let (mantissa, exponent) = match text.split_once(['e', 'E']) {
        Some((m, e)) if radix == 10 => (m, Some(e)),
        _ => (text, None),
    };

    let (sign, unsigned) = match mantissa.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1, mantissa.strip_prefix('+').unwrap_or(mantissa)),
    };

    let mut forced_inexact = exponent.is_some();
    let mut digits = String::new();
    let mut seen_dot = false;
    for c in unsigned.chars() {
        if c == '.' && radix == 10 && !seen_dot {
            seen_dot = true;
            forced_inexact = true;
            digits.push('.');
        } else if c == '#' {
            forced_inexact = true;
            digits.push('0');
        } else if c.is_digit(radix) {
            digits.push(c);
        } else {
            return None;
        }
    }
    if digits.is_empty() || digits == "." {
        return None;
    }

    if !forced_inexact {
        let magnitude = i64::from_str_radix(&digits, radix).ok()?;
        return Some(Num::Int(sign * magnitude));
    }

    let mut float_text = digits;
    if let Some(exp) = exponent {
        float_text.push('e');
        float_text.push_str(exp);
    }
    let magnitude: f64 = float_text.parse().ok()?;
    Some(Num::Float(sign as f64 * magnitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn i(n: i64) -> Value {
        Value::Int(n)
    }
    fn f(x: f64) -> Value {
        Value::Float(x)
    }

    #[test]
    fn plus_sums_exact_integers() {
        assert!(matches!(add(&[i(22), i(20)]), Ok(Value::Int(42))));
    }

    #[test]
    fn plus_with_any_inexact_operand_is_inexact() {
        assert!(matches!(add(&[i(1), f(1.0)]), Ok(Value::Float(x)) if x == 2.0));
    }

    #[test]
    fn quotient_truncates_toward_zero() {
        assert!(matches!(quotient(&[i(13), i(4)]), Ok(Value::Int(3))));
        assert!(matches!(quotient(&[i(-13), i(4)]), Ok(Value::Int(-3))));
    }

    #[test]
    fn remainder_takes_the_sign_of_the_dividend() {
        assert!(matches!(remainder(&[i(13), i(4)]), Ok(Value::Int(1))));
        assert!(matches!(remainder(&[i(-13), i(4)]), Ok(Value::Int(-1))));
        assert!(matches!(remainder(&[i(13), i(-4)]), Ok(Value::Int(1))));
        assert!(matches!(remainder(&[i(-13), i(-4)]), Ok(Value::Int(-1))));
    }

    #[test]
    fn remainder_with_an_inexact_operand_is_inexact() {
        assert!(matches!(remainder(&[i(-13), f(-4.0)]), Ok(Value::Float(x)) if x == -1.0));
    }

    #[test]
    fn modulo_takes_the_sign_of_the_divisor() {
        assert!(matches!(modulo(&[i(13), i(4)]), Ok(Value::Int(1))));
        assert!(matches!(modulo(&[i(-13), i(4)]), Ok(Value::Int(3))));
        assert!(matches!(modulo(&[i(13), i(-4)]), Ok(Value::Int(-3))));
        assert!(matches!(modulo(&[i(-13), i(-4)]), Ok(Value::Int(-1))));
    }

    #[test]
    fn round_breaks_ties_to_even() {
        assert!(matches!(round(&[f(-4.3)]), Ok(Value::Float(x)) if x == -4.0));
        assert!(matches!(round(&[f(3.5)]), Ok(Value::Float(x)) if x == 4.0));
    }

    #[test]
    fn number_to_string_formats_ints_and_floats() {
        assert!(matches!(number_to_string(&[i(4)]), Ok(Value::Str(s)) if s.as_string_lossy() == "4"));
        assert!(matches!(number_to_string(&[f(4.25)]), Ok(Value::Str(s)) if s.as_string_lossy() == "4.25"));
    }

    #[test]
    fn string_to_number_parses_plain_and_radix_forms() {
        assert!(matches!(string_to_number(&[Value::string("100")]), Ok(Value::Int(100))));
        assert!(matches!(
            string_to_number(&[Value::string("100"), i(16)]),
            Ok(Value::Int(256))
        ));
        assert!(matches!(string_to_number(&[Value::string("1e2")]), Ok(Value::Float(x)) if x == 100.0));
    }

    #[test]
    fn string_to_number_honors_wildcard_digits() {
        assert!(matches!(string_to_number(&[Value::string("15##")]), Ok(Value::Float(x)) if x == 1500.0));
    }

    #[test]
    fn string_to_number_rejects_garbage() {
        assert!(matches!(string_to_number(&[Value::string("gg")]), Ok(Value::Bool(false))));
    }
}
