//! Numeric bounds.
//!
//! The target bound fields are integer-valued, so fractional float/double
//! bounds are widened to the nearest enclosing integer: lower bounds round
//! down via `round(x - 0.5)`, upper bounds round up via `round(x + 0.5)`.
//! Integer-kind bounds are copied verbatim. `gt` wins over `gte` when both
//! are set, `lt` over `lte`. The exclusive flag is cleared for the strict
//! bound and set for the inclusive one; downstream consumers already
//! depend on that inversion, so it is preserved as-is.

use crate::rules::{DoubleRules, FloatRules, Int32Rules, Int64Rules};
use crate::schema::SchemaNode;

fn widen_down(x: f64) -> i64 {
    (x - 0.5).round() as i64
}

fn widen_up(x: f64) -> i64 {
    (x + 0.5).round() as i64
}

pub fn apply_float(rules: &FloatRules, node: &mut SchemaNode) {
    if let Some(gt) = rules.gt {
        node.minimum = Some(widen_down(gt as f64));
        node.exclusive_minimum = false;
    } else if let Some(gte) = rules.gte {
        node.minimum = Some(widen_down(gte as f64));
        node.exclusive_minimum = true;
    }
    if let Some(lt) = rules.lt {
        node.maximum = Some(widen_up(lt as f64));
        node.exclusive_maximum = false;
    } else if let Some(lte) = rules.lte {
        node.maximum = Some(widen_up(lte as f64));
        node.exclusive_maximum = true;
    }
}

pub fn apply_double(rules: &DoubleRules, node: &mut SchemaNode) {
    if let Some(gt) = rules.gt {
        node.minimum = Some(widen_down(gt));
        node.exclusive_minimum = false;
    } else if let Some(gte) = rules.gte {
        node.minimum = Some(widen_down(gte));
        node.exclusive_minimum = true;
    }
    if let Some(lt) = rules.lt {
        node.maximum = Some(widen_up(lt));
        node.exclusive_maximum = false;
    } else if let Some(lte) = rules.lte {
        node.maximum = Some(widen_up(lte));
        node.exclusive_maximum = true;
    }
}

pub fn apply_int32(rules: &Int32Rules, node: &mut SchemaNode) {
    if let Some(gt) = rules.gt {
        node.minimum = Some(gt as i64);
        node.exclusive_minimum = false;
    } else if let Some(gte) = rules.gte {
        node.minimum = Some(gte as i64);
        node.exclusive_minimum = true;
    }
    if let Some(lt) = rules.lt {
        node.maximum = Some(lt as i64);
        node.exclusive_maximum = false;
    } else if let Some(lte) = rules.lte {
        node.maximum = Some(lte as i64);
        node.exclusive_maximum = true;
    }
}

pub fn apply_int64(rules: &Int64Rules, node: &mut SchemaNode) {
    if let Some(gt) = rules.gt {
        node.minimum = Some(gt);
        node.exclusive_minimum = false;
    } else if let Some(gte) = rules.gte {
        node.minimum = Some(gte);
        node.exclusive_minimum = true;
    }
    if let Some(lt) = rules.lt {
        node.maximum = Some(lt);
        node.exclusive_maximum = false;
    } else if let Some(lte) = rules.lte {
        node.maximum = Some(lte);
        node.exclusive_maximum = true;
    }
}
