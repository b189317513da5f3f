//! Mapping from data values to canvas coordinates

use std::collections::HashMap;
use tplot_core::Value;

/// Affine map from a numeric domain onto a target interval
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    target_min: f64,
    target_max: f64,
}

impl LinearScale {
    /// Fit the domain to the extent of `values`
    #[must_use]
    pub fn fit(values: impl IntoIterator<Item = f64>, target_min: f64, target_max: f64) -> Self {
        let (domain_min, domain_max) = values
            .into_iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        let (domain_min, domain_max) = if domain_min <= domain_max {
            (domain_min, domain_max)
        } else {
            (0.0, 0.0)
        };
        Self {
            domain_min,
            domain_max,
            target_min,
            target_max,
        }
    }

    /// A zero-width domain maps everything to the middle of the target
    #[must_use]
    pub fn transform(&self, value: f64) -> f64 {
        // Halved so that domains wider than f64::MAX stay finite
        let domain = self.domain_max / 2.0 - self.domain_min / 2.0;
        if domain == 0.0 {
            return (self.target_min + self.target_max) / 2.0;
        }
        (value / 2.0 - self.domain_min / 2.0) / domain * (self.target_max - self.target_min)
            + self.target_min
    }
}

/// Evenly spaced positions for categories, in first-appearance order
#[derive(Debug, Clone, PartialEq)]
pub struct NominalScale {
    classes: Vec<String>,
    index: HashMap<String, usize>,
    linear: LinearScale,
}

impl NominalScale {
    #[must_use]
    pub fn fit(values: &[Value], target_min: f64, target_max: f64) -> Self {
        let classes = distinct_labels(values);
        let index = classes
            .iter()
            .enumerate()
            .map(|(i, class)| (class.clone(), i))
            .collect();
        #[allow(clippy::cast_precision_loss)]
        let linear = LinearScale::fit(
            (0..classes.len()).map(|i| i as f64),
            target_min,
            target_max,
        );
        Self {
            classes,
            index,
            linear,
        }
    }

    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Position of a category, `None` if it was not seen when fitting
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn transform(&self, value: &Value) -> Option<f64> {
        self.index
            .get(&value.label())
            .map(|&i| self.linear.transform(i as f64))
    }
}

/// Scale for one axis
#[derive(Debug, Clone, PartialEq)]
pub enum Scale {
    Linear(LinearScale),
    Nominal(NominalScale),
}

impl Scale {
    /// Position of `value` on the target interval
    ///
    /// Labels have no position on a linear scale.
    #[must_use]
    pub fn transform(&self, value: &Value) -> Option<f64> {
        match self {
            Self::Linear(scale) => value.as_number().map(|n| scale.transform(n)),
            Self::Nominal(scale) => scale.transform(value),
        }
    }
}

/// Distinct labels of `values`, in order of first appearance
#[must_use]
pub fn distinct_labels(values: &[Value]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .iter()
        .map(Value::label)
        .filter(|label| seen.insert(label.clone()))
        .collect()
}
