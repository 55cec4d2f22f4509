//! Read/write method classification.

use crate::descriptor::{MethodDescriptor, Mutability};

/// The outcome of classification: two disjoint method sets whose union is the
/// full input set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    pub read_methods: Vec<MethodDescriptor>,
    pub write_methods: Vec<MethodDescriptor>,
}

/// Partitions descriptors into read-only and mutating sets.
///
/// The single source of truth is the interface-declared mutability flag —
/// method names are never pattern-matched. A descriptor whose mutability is
/// [`Mutability::Unspecified`] is classified as mutating: an undeclared method
/// must not be callable without a transaction. That conservative default is a
/// tested property, not an accident.
pub fn classify(descriptors: Vec<MethodDescriptor>) -> Classified {
    let mut classified = Classified::default();
    for descriptor in descriptors {
        match descriptor.mutability {
            Mutability::ReadOnly => classified.read_methods.push(descriptor),
            Mutability::Mutating | Mutability::Unspecified => {
                classified.write_methods.push(descriptor)
            }
        }
    }
    classified
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str, mutability: Mutability) -> MethodDescriptor {
        MethodDescriptor {
            name: name.into(),
            mutability,
            input_fields: Vec::new(),
        }
    }

    #[test]
    fn declared_flags_drive_the_split() {
        let classified = classify(vec![
            descriptor("GetBalance", Mutability::ReadOnly),
            descriptor("Transfer", Mutability::Mutating),
        ]);
        assert_eq!(classified.read_methods[0].name, "GetBalance");
        assert_eq!(classified.write_methods[0].name, "Transfer");
    }

    #[test]
    fn unspecified_mutability_is_treated_as_mutating() {
        let classified = classify(vec![descriptor("Mystery", Mutability::Unspecified)]);
        assert!(classified.read_methods.is_empty());
        assert_eq!(classified.write_methods[0].name, "Mystery");
    }

    #[test]
    fn names_never_influence_classification() {
        // a read-sounding name with a mutating flag stays a write method
        let classified = classify(vec![descriptor("GetBalance", Mutability::Mutating)]);
        assert!(classified.read_methods.is_empty());
        assert_eq!(classified.write_methods.len(), 1);
    }
}
