// ABOUTME: Numeric filters: arithmetic, clamping and rounding
// ABOUTME: Arithmetic runs on Decimal while rounding and remainders go through f64

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::Services;
use crate::value::Value;

fn first_decimal(params: &[Value]) -> Option<Decimal> {
    params.first().and_then(Value::as_decimal)
}

/// Apply a checked decimal operation, passing the input through on a miss.
fn decimal_op(input: &Value, params: &[Value], op: fn(Decimal, Decimal) -> Option<Decimal>) -> Value {
    match (input.as_decimal(), first_decimal(params)) {
        (Some(lhs), Some(rhs)) => op(lhs, rhs).map(Value::Decimal).unwrap_or_else(|| input.clone()),
        _ => input.clone(),
    }
}

fn decimal_from_double(value: f64) -> Option<Value> {
    Decimal::from_f64(value).map(Value::Decimal)
}

/// `f64` to `i64` when the value is finite and in range.
fn integer_from_double(value: f64) -> Option<i64> {
    if value.is_finite() && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

pub fn abs(input: &Value, _params: &[Value], _services: &Services) -> Value {
    input
        .as_decimal()
        .map(|d| Value::Decimal(d.abs()))
        .unwrap_or_else(|| input.clone())
}

pub fn at_least(input: &Value, params: &[Value], _services: &Services) -> Value {
    decimal_op(input, params, |value, floor| Some(value.max(floor)))
}

pub fn at_most(input: &Value, params: &[Value], _services: &Services) -> Value {
    decimal_op(input, params, |value, ceiling| Some(value.min(ceiling)))
}

pub fn plus(input: &Value, params: &[Value], _services: &Services) -> Value {
    decimal_op(input, params, Decimal::checked_add)
}

pub fn minus(input: &Value, params: &[Value], _services: &Services) -> Value {
    decimal_op(input, params, Decimal::checked_sub)
}

pub fn times(input: &Value, params: &[Value], _services: &Services) -> Value {
    decimal_op(input, params, Decimal::checked_mul)
}

/// Integer divisor: floored quotient as an Integer. Decimal divisor: exact
/// decimal quotient. A zero divisor passes the input through.
pub fn divided_by(input: &Value, params: &[Value], _services: &Services) -> Value {
    let Some(dividend) = input.as_double() else {
        return input.clone();
    };

    let quotient = match params.first() {
        Some(Value::Integer(0)) => None,
        Some(Value::Integer(divisor)) => {
            integer_from_double((dividend / *divisor as f64).floor()).map(Value::Integer)
        }
        Some(Value::Decimal(divisor)) => input
            .as_decimal()
            .or_else(|| Decimal::from_f64(dividend))
            .and_then(|d| d.checked_div(*divisor))
            .map(Value::Decimal),
        _ => None,
    };

    quotient.unwrap_or_else(|| input.clone())
}

pub fn modulo(input: &Value, params: &[Value], _services: &Services) -> Value {
    let divisor = params.first().and_then(Value::as_double);
    match (input.as_double(), divisor) {
        (Some(dividend), Some(divisor)) => {
            decimal_from_double(dividend % divisor).unwrap_or_else(|| input.clone())
        }
        _ => input.clone(),
    }
}

pub fn ceil(input: &Value, _params: &[Value], _services: &Services) -> Value {
    input
        .as_double()
        .and_then(|d| decimal_from_double(d.ceil()))
        .unwrap_or_else(|| input.clone())
}

pub fn floor(input: &Value, _params: &[Value], _services: &Services) -> Value {
    input
        .as_double()
        .and_then(|d| decimal_from_double(d.floor()))
        .unwrap_or_else(|| input.clone())
}

/// Without a parameter: nearest Integer, halves away from zero. With a
/// non-negative digit count: a Decimal rounded to that many places.
pub fn round(input: &Value, params: &[Value], _services: &Services) -> Value {
    let Some(number) = input.as_double() else {
        return input.clone();
    };

    let rounded = match params.first() {
        None => integer_from_double(number.round()).map(Value::Integer),
        Some(places) => places
            .as_integer()
            .and_then(|n| u32::try_from(n).ok())
            .zip(Decimal::from_f64(number))
            .map(|(places, d)| {
                Value::Decimal(d.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero))
            }),
    };

    rounded.unwrap_or_else(|| input.clone())
}
