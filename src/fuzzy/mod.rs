//! Fuzzy Inference Engine
//!
//! A fixed two-rule Mamdani pipeline that maps two crisp quality scores
//! (food, service) to a crisp tip percentage:
//!
//! 1. Fuzzification - triangular membership of each input in two named
//!    fuzzy sets per linguistic variable
//! 2. Rule evaluation - "food Bad OR service Poor => tip Low" (max),
//!    "food Good AND service Excellent => tip High" (min)
//! 3. Defuzzification - centroid over the discrete tip universe 0..=20
//!
//! The pipeline is a pure function of its two inputs; nothing here holds
//! state between invocations.

// ============================================================================
// Membership
// ============================================================================

/// Triangular membership function with breakpoints `a <= b <= c`.
///
/// Returns 0 outside the open interval `(a, c)`, rises linearly on
/// `(a, b)` and falls linearly on `[b, c)`. Degenerate triangles
/// (`a == b` or `b == c`) collapse to a ramp: the branch that would
/// divide by zero is never taken because its guard is unsatisfiable.
/// Callers supply fixed, valid breakpoints; parameters are not
/// re-validated at runtime.
pub fn triangular(x: f64, a: f64, b: f64, c: f64) -> f64 {
    if x <= a || x >= c {
        0.0
    } else if x < b {
        (x - a) / (b - a)
    } else {
        (c - x) / (c - b)
    }
}

/// Membership of a food score in the two food-quality fuzzy sets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodQuality {
    /// Degree of membership in "Bad", triangular (0, 0, 5)
    pub bad: f64,
    /// Degree of membership in "Good", triangular (5, 10, 10)
    pub good: f64,
}

/// Membership of a service score in the two service-quality fuzzy sets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceQuality {
    /// Degree of membership in "Poor", triangular (0, 0, 5)
    pub poor: f64,
    /// Degree of membership in "Excellent", triangular (5, 10, 10)
    pub excellent: f64,
}

/// Fuzzify a food score over the [0, 10] universe.
pub fn food_quality(x: f64) -> FoodQuality {
    FoodQuality {
        bad: triangular(x, 0.0, 0.0, 5.0),
        good: triangular(x, 5.0, 10.0, 10.0),
    }
}

/// Fuzzify a service score over the [0, 10] universe.
pub fn service_quality(x: f64) -> ServiceQuality {
    ServiceQuality {
        poor: triangular(x, 0.0, 0.0, 5.0),
        excellent: triangular(x, 5.0, 10.0, 10.0),
    }
}

/// "Low" tip consequent membership, triangular (0, 0, 10).
fn tip_low(x: f64) -> f64 {
    triangular(x, 0.0, 0.0, 10.0)
}

/// "High" tip consequent membership, triangular (10, 20, 20).
fn tip_high(x: f64) -> f64 {
    triangular(x, 10.0, 20.0, 20.0)
}

// ============================================================================
// Rule Evaluation
// ============================================================================

/// Firing strengths of the two rules, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleStrengths {
    /// Rule 1: if food is Bad OR service is Poor then tip is Low
    pub low: f64,
    /// Rule 2: if food is Good AND service is Excellent then tip is High
    pub high: f64,
}

/// Evaluate the fixed two-rule base against a pair of crisp scores.
///
/// OR combines via max, AND via min. The rule base is intentionally not
/// extensible; this is the entire knowledge of the system.
pub fn fuzzy_inference(food: f64, service: f64) -> RuleStrengths {
    let f = food_quality(food);
    let s = service_quality(service);

    RuleStrengths {
        low: s.poor.max(f.bad),
        high: s.excellent.min(f.good),
    }
}

// ============================================================================
// Defuzzification
// ============================================================================

/// Centroid defuzzification over the discrete tip universe {0, 1, .., 20}.
///
/// Each consequent is clipped at its rule strength (Mamdani min
/// implication), samples are aggregated via max, and the weighted
/// average of the aggregate is returned. When no rule fires at all the
/// denominator is zero and the tip defaults to 0 - a defined fallback,
/// not an error.
pub fn defuzzify(low_strength: f64, high_strength: f64) -> f64 {
    let mut num = 0.0;
    let mut den = 0.0;

    for x in 0..=20 {
        let x = f64::from(x);
        let mu_low = low_strength.min(tip_low(x));
        let mu_high = high_strength.min(tip_high(x));
        let mu = mu_low.max(mu_high);

        num += mu * x;
        den += mu;
    }

    if den != 0.0 {
        num / den
    } else {
        0.0
    }
}

/// Compute the tip percentage for a pair of crisp quality scores.
///
/// This is the headline entry point of the fuzzy pipeline:
/// fuzzification, rule evaluation and defuzzification in one call.
pub fn compute_tip(food: f64, service: f64) -> f64 {
    let strengths = fuzzy_inference(food, service);
    defuzzify(strengths.low, strengths.high)
}

// ============================================================================
// Tests
// ============================================================================
