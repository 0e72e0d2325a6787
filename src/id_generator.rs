use std::fmt;

/// Opaque identifier of a design element.
///
/// Ids are handed out by the session's [`IdGenerator`] and are never reused
/// while that session lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element-{}", self.0)
    }
}

/// Monotonic per-session counter for element ids
#[derive(Debug)]
pub struct IdGenerator {
    next: usize,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate_id(&mut self) -> ElementId {
        let id = ElementId(self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic() {
        let mut ids = IdGenerator::new();
        let a = ids.generate_id();
        let b = ids.generate_id();
        assert_eq!((a.0, b.0), (1, 2));
        assert!(b > a);
        assert_eq!(a.to_string(), "element-1");
    }
}
