use serde::{Deserialize, Serialize};

/// A recursive reference to a type, used wherever a type must be printed:
/// return types, parameter types, base types, attribute types, constraints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeReference {
    /// A named type, identified by its namespace-qualified name.
    Named { full_name: String },
    /// An array with the given rank (1 = vector).
    Array {
        rank: u8,
        element: Box<TypeReference>,
    },
    /// An unmanaged pointer.
    Pointer(Box<TypeReference>),
    /// A by-reference (managed reference) type.
    Reference(Box<TypeReference>),
    /// A generic template parameter, printed as its bare name.
    Template(String),
    /// A generic specialization: template plus argument list.
    Specialization {
        template: Box<TypeReference>,
        arguments: Vec<TypeReference>,
    },
}

/// The unqualified form of a namespace-qualified name: the segment after the
/// last dot, with any generic arity marker stripped
/// (`System.Action`2` -> `Action`).
pub fn short_name(full_name: &str) -> &str {
    let tail = full_name.rsplit('.').next().unwrap_or(full_name);
    match tail.find('`') {
        Some(pos) => &tail[..pos],
        None => tail,
    }
}

impl TypeReference {
    pub fn named(full_name: impl Into<String>) -> Self {
        TypeReference::Named {
            full_name: full_name.into(),
        }
    }

    pub fn array(element: TypeReference) -> Self {
        TypeReference::Array {
            rank: 1,
            element: Box::new(element),
        }
    }

    pub fn array_of_rank(rank: u8, element: TypeReference) -> Self {
        TypeReference::Array {
            rank,
            element: Box::new(element),
        }
    }

    pub fn pointer(target: TypeReference) -> Self {
        TypeReference::Pointer(Box::new(target))
    }

    pub fn reference(target: TypeReference) -> Self {
        TypeReference::Reference(Box::new(target))
    }

    pub fn template(name: impl Into<String>) -> Self {
        TypeReference::Template(name.into())
    }

    pub fn specialization(template: TypeReference, arguments: Vec<TypeReference>) -> Self {
        TypeReference::Specialization {
            template: Box::new(template),
            arguments,
        }
    }

    /// The namespace-qualified name of the underlying named type, looking
    /// through arrays, pointers, references and specializations. Template
    /// parameters yield their bare name.
    pub fn full_name(&self) -> &str {
        match self {
            TypeReference::Named { full_name } => full_name,
            TypeReference::Array { element, .. } => element.full_name(),
            TypeReference::Pointer(inner) | TypeReference::Reference(inner) => inner.full_name(),
            TypeReference::Template(name) => name,
            TypeReference::Specialization { template, .. } => template.full_name(),
        }
    }

    /// The unqualified display name: segment after the last dot, with any
    /// generic arity marker stripped.
    pub fn display_name(&self) -> &str {
        short_name(self.full_name())
    }

    /// True when a pointer occurs anywhere in this reference, which makes the
    /// declaration an "unsafe" construct for languages without pointers.
    pub fn contains_pointer(&self) -> bool {
        match self {
            TypeReference::Pointer(_) => true,
            TypeReference::Named { .. } | TypeReference::Template(_) => false,
            TypeReference::Array { element, .. } => element.contains_pointer(),
            TypeReference::Reference(inner) => inner.contains_pointer(),
            TypeReference::Specialization {
                template,
                arguments,
            } => template.contains_pointer() || arguments.iter().any(|a| a.contains_pointer()),
        }
    }

    /// True for the CLR primitive and simple value types that markup
    /// languages can parse from an attribute string.
    pub fn is_simple_value_type(&self) -> bool {
        matches!(
            self.full_name(),
            "System.Boolean"
                | "System.Byte"
                | "System.SByte"
                | "System.Char"
                | "System.Int16"
                | "System.Int32"
                | "System.Int64"
                | "System.UInt16"
                | "System.UInt32"
                | "System.UInt64"
                | "System.Single"
                | "System.Double"
                | "System.Decimal"
                | "System.String"
                | "System.DateTime"
                | "System.TimeSpan"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_looks_through_wrappers() {
        let reference = TypeReference::array(TypeReference::pointer(TypeReference::named(
            "System.Int32",
        )));
        assert_eq!(reference.full_name(), "System.Int32");
    }

    #[test]
    fn test_short_name_strips_namespace_and_arity() {
        assert_eq!(short_name("System.Action`2"), "Action");
        assert_eq!(short_name("Widget"), "Widget");
    }

    #[test]
    fn test_display_name_strips_namespace_and_arity() {
        assert_eq!(
            TypeReference::named("System.Collections.Generic.List`1").display_name(),
            "List"
        );
        assert_eq!(TypeReference::template("T").display_name(), "T");
    }

    #[test]
    fn test_contains_pointer() {
        assert!(
            TypeReference::array(TypeReference::pointer(TypeReference::named("System.Byte")))
                .contains_pointer()
        );
        assert!(!TypeReference::named("System.Byte").contains_pointer());
        assert!(
            TypeReference::specialization(
                TypeReference::named("System.Collections.Generic.List`1"),
                vec![TypeReference::pointer(TypeReference::named("System.Int32"))]
            )
            .contains_pointer()
        );
    }

    #[test]
    fn test_is_simple_value_type() {
        assert!(TypeReference::named("System.Int32").is_simple_value_type());
        assert!(TypeReference::named("System.String").is_simple_value_type());
        assert!(!TypeReference::named("System.Windows.UIElement").is_simple_value_type());
    }
}
