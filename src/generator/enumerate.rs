//! Lazy enumeration of the Cartesian product of feature domains.
//!
//! Order matches nested iteration over the catalog: the first feature varies
//! slowest, the last varies fastest. The same catalog always yields the same
//! sequence.

use crate::core::assignment::Assignment;
use crate::core::feature::FeatureCatalog;

/// Iterator over every raw assignment of a catalog.
///
/// Works like an odometer: one digit per feature, the rightmost digit ticks
/// on every step and carries to the left.
#[derive(Debug, Clone)]
pub struct Enumerator<'a> {
    catalog: &'a FeatureCatalog,
    digits: Vec<usize>,
    exhausted: bool,
}

impl<'a> Enumerator<'a> {
    pub fn new(catalog: &'a FeatureCatalog) -> Self {
        Enumerator {
            catalog,
            digits: vec![0; catalog.len()],
            exhausted: catalog.features().iter().any(|f| f.domain().is_empty()),
        }
    }

    /// Start again from the first assignment.
    pub fn restart(&mut self) {
        *self = Enumerator::new(self.catalog);
    }

    /// Total number of assignments in the product, if it fits in a `u64`.
    pub fn total(&self) -> Option<u64> {
        self.catalog.product_size()
    }

    /// The assignment at position `ordinal` in enumeration order, without
    /// walking the sequence.
    pub fn assignment_at(catalog: &FeatureCatalog, ordinal: u64) -> Option<Assignment> {
        if ordinal >= catalog.product_size()? {
            return None;
        }

        let mut codes = Vec::with_capacity(catalog.len());
        let mut rest = ordinal;
        for feature in catalog.features().iter().rev() {
            let radix = feature.domain().len() as u64;
            codes.push(feature.domain()[(rest % radix) as usize]);
            rest /= radix;
        }
        codes.reverse();

        Some(Assignment::from_codes(codes))
    }

    fn current(&self) -> Assignment {
        Assignment::from_codes(
            self.catalog
                .features()
                .iter()
                .zip(&self.digits)
                .map(|(feature, &digit)| feature.domain()[digit]),
        )
    }

    fn advance(&mut self) {
        for (position, feature) in self.catalog.features().iter().enumerate().rev() {
            self.digits[position] += 1;
            if self.digits[position] < feature.domain().len() {
                return;
            }
            self.digits[position] = 0;
        }
        self.exhausted = true;
    }
}

impl Iterator for Enumerator<'_> {
    type Item = Assignment;

    fn next(&mut self) -> Option<Assignment> {
        if self.exhausted {
            return None;
        }
        let assignment = self.current();
        self.advance();
        Some(assignment)
    }
}
