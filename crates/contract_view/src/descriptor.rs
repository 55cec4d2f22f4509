//! Method descriptor extraction.
//!
//! Turns the wire-level interface carried by a bound contract into typed
//! method descriptors the classifier and the invoker work with. Field types
//! are resolved here, once, so argument validation downstream is structural
//! rather than duck-typed.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use aelf_chain_client::ContractInterface;

use crate::error::{Error, Result};

/// The type of a method input field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum FieldType {
    String,
    Number,
    Bool,
    Address,
    Bytes,
    /// A nested message type, referenced by its declared type name.
    Struct(String),
}

impl FieldType {
    /// Resolves a declared wire type name.
    fn parse(type_name: &str) -> Self {
        match type_name.to_ascii_lowercase().as_str() {
            "string" => Self::String,
            "int32" | "int64" | "uint32" | "uint64" | "sint32" | "sint64" | "int" | "number" => {
                Self::Number
            }
            "bool" | "boolean" => Self::Bool,
            "address" => Self::Address,
            "bytes" | "hash" => Self::Bytes,
            _ => Self::Struct(type_name.to_string()),
        }
    }

    /// Structural check of a supplied argument value against this type.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Bool => value.is_boolean(),
            // Addresses and bytes travel as strings (base58 / hex).
            Self::Address | Self::Bytes => value.is_string(),
            Self::Struct(_) => value.is_object(),
        }
    }
}

/// A named, typed input field of a method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: FieldType,
}

/// Declared mutability of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Mutability {
    /// Declared side-effect free.
    ReadOnly,
    /// Declared state-mutating.
    Mutating,
    /// The interface did not declare mutability either way.
    Unspecified,
}

/// One callable method of a resolved contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDescriptor {
    pub name: String,
    pub mutability: Mutability,
    pub input_fields: Vec<FieldDescriptor>,
}

/// Extracts typed method descriptors from a contract's published interface.
///
/// Fails with [`Error::DescriptorUnavailable`] when the interface exposes no
/// methods at all or a method entry is unusable (empty name, duplicate field
/// names). Pure function of the interface; callers cache nothing beyond the
/// lifetime of one resolved contract.
pub fn describe(interface: &ContractInterface) -> Result<Vec<MethodDescriptor>> {
    if interface.methods.is_empty() {
        return Err(Error::DescriptorUnavailable(
            "contract exposes no methods".into(),
        ));
    }

    let mut descriptors = Vec::with_capacity(interface.methods.len());
    for method in &interface.methods {
        if method.name.is_empty() {
            return Err(Error::DescriptorUnavailable(
                "interface contains a method with an empty name".into(),
            ));
        }

        let mut seen = HashSet::new();
        let mut input_fields = Vec::with_capacity(method.parameters.len());
        for parameter in &method.parameters {
            if !seen.insert(parameter.name.as_str()) {
                return Err(Error::DescriptorUnavailable(format!(
                    "method `{}` declares field `{}` twice",
                    method.name, parameter.name
                )));
            }
            input_fields.push(FieldDescriptor {
                name: parameter.name.clone(),
                field_type: FieldType::parse(&parameter.type_name),
            });
        }

        descriptors.push(MethodDescriptor {
            name: method.name.clone(),
            mutability: match method.is_view {
                Some(true) => Mutability::ReadOnly,
                Some(false) => Mutability::Mutating,
                None => Mutability::Unspecified,
            },
            input_fields,
        });
    }

    Ok(descriptors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aelf_chain_client::{InterfaceMethod, InterfaceParameter};
    use serde_json::json;

    fn method(name: &str, params: &[(&str, &str)], is_view: Option<bool>) -> InterfaceMethod {
        InterfaceMethod {
            name: name.into(),
            parameters: params
                .iter()
                .map(|(n, t)| InterfaceParameter {
                    name: n.to_string(),
                    type_name: t.to_string(),
                })
                .collect(),
            is_view,
        }
    }

    #[test]
    fn resolves_field_types_at_describe_time() {
        let interface = ContractInterface {
            methods: vec![method(
                "Transfer",
                &[
                    ("to", "address"),
                    ("amount", "int64"),
                    ("symbol", "string"),
                    ("memo", "bytes"),
                    ("extra", "TransferInput"),
                ],
                Some(false),
            )],
        };
        let descriptors = describe(&interface).unwrap();
        let fields = &descriptors[0].input_fields;
        assert_eq!(fields[0].field_type, FieldType::Address);
        assert_eq!(fields[1].field_type, FieldType::Number);
        assert_eq!(fields[2].field_type, FieldType::String);
        assert_eq!(fields[3].field_type, FieldType::Bytes);
        assert_eq!(
            fields[4].field_type,
            FieldType::Struct("TransferInput".into())
        );
    }

    #[test]
    fn empty_interface_is_descriptor_unavailable() {
        let err = describe(&ContractInterface::default()).unwrap_err();
        assert!(matches!(err, Error::DescriptorUnavailable(_)));
    }

    #[test]
    fn duplicate_field_names_are_descriptor_unavailable() {
        let interface = ContractInterface {
            methods: vec![method("Bad", &[("x", "string"), ("x", "int64")], None)],
        };
        assert!(matches!(
            describe(&interface),
            Err(Error::DescriptorUnavailable(_))
        ));
    }

    #[test]
    fn undeclared_mutability_stays_unspecified() {
        let interface = ContractInterface {
            methods: vec![method("Mystery", &[], None)],
        };
        let descriptors = describe(&interface).unwrap();
        assert_eq!(descriptors[0].mutability, Mutability::Unspecified);
    }

    #[test]
    fn structural_acceptance_per_field_type() {
        assert!(FieldType::String.accepts(&json!("hello")));
        assert!(!FieldType::String.accepts(&json!(1)));
        assert!(FieldType::Number.accepts(&json!(100)));
        assert!(!FieldType::Number.accepts(&json!("100")));
        assert!(FieldType::Address.accepts(&json!("2gaQh4uxg6Tz")));
        assert!(FieldType::Struct("T".into()).accepts(&json!({"a": 1})));
        assert!(!FieldType::Struct("T".into()).accepts(&json!([1])));
    }
}
