//! The single-slot memory register.

/// A single numeric slot, independent of the expression.
///
/// `None` means nothing is stored. A stored value may be `NaN` when the
/// display did not start with a number.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MemoryRegister {
    value: Option<f64>,
}

impl MemoryRegister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: f64) -> Self {
        Self { value: Some(value) }
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn store(&mut self, value: f64) -> f64 {
        self.value = Some(value);
        value
    }

    /// Add to the stored value, treating an empty register as zero.
    pub fn add(&mut self, operand: f64) -> f64 {
        self.store(self.value.unwrap_or(0.0) + operand)
    }

    /// Subtract from the stored value. An empty register becomes the
    /// negated operand.
    pub fn subtract(&mut self, operand: f64) -> f64 {
        let next = match self.value {
            Some(current) => current - operand,
            None => -operand,
        };
        self.store(next)
    }

    pub fn clear(&mut self) {
        self.value = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        assert_eq!(MemoryRegister::new().value(), None);
    }

    #[test]
    fn test_add_from_empty() {
        let mut register = MemoryRegister::new();
        assert_eq!(register.add(4.0), 4.0);
        assert_eq!(register.add(1.5), 5.5);
    }

    #[test]
    fn test_subtract_from_empty_negates() {
        let mut register = MemoryRegister::new();
        assert_eq!(register.subtract(4.0), -4.0);
        assert_eq!(register.subtract(1.0), -5.0);
    }

    #[test]
    fn test_store_overwrites() {
        let mut register = MemoryRegister::with_value(9.0);
        register.store(2.0);
        assert_eq!(register.value(), Some(2.0));
    }

    #[test]
    fn test_nan_accumulates() {
        let mut register = MemoryRegister::with_value(3.0);
        assert!(register.add(f64::NAN).is_nan());
        assert!(register.value().is_some_and(f64::is_nan));
    }

    #[test]
    fn test_clear() {
        let mut register = MemoryRegister::with_value(1.0);
        register.clear();
        assert_eq!(register.value(), None);
    }
}
