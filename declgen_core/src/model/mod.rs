//! Strongly-typed read model for the member metadata consumed by generators.
//!
//! The documentation host parses its reflection data into these records once;
//! generators then operate on typed fields instead of late-bound path queries.
//! All values are read-only inputs. The builder-style `with_*` methods exist
//! for hosts and tests constructing descriptors by hand.

mod type_reference;

pub use type_reference::{short_name, TypeReference};

use serde::{Deserialize, Serialize};

/// The kind of API element a descriptor documents. Exactly one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subgroup {
    Namespace,
    Class,
    Structure,
    Interface,
    Delegate,
    Enumeration,
    Constructor,
    Method,
    Operator,
    Cast,
    Property,
    Event,
    Field,
}

impl Subgroup {
    pub fn is_type(self) -> bool {
        matches!(
            self,
            Subgroup::Class
                | Subgroup::Structure
                | Subgroup::Interface
                | Subgroup::Delegate
                | Subgroup::Enumeration
        )
    }
}

/// The six source visibility levels of the input metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    Public,
    Family,
    FamilyOrAssembly,
    FamilyAndAssembly,
    Assembly,
    Private,
}

/// Generic parameter variance, meaningful for interfaces and delegates only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variance {
    #[default]
    None,
    Covariant,
    Contravariant,
}

/// One generic template parameter with its constraints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenericParameter {
    pub name: String,
    #[serde(default)]
    pub variance: Variance,
    /// `where T : class`
    #[serde(default)]
    pub constrain_reference_type: bool,
    /// `where T : struct`
    #[serde(default)]
    pub constrain_value_type: bool,
    /// `where T : new()`
    #[serde(default)]
    pub constrain_default_constructor: bool,
    #[serde(default)]
    pub type_constraints: Vec<TypeReference>,
}

impl GenericParameter {
    pub fn new(name: impl Into<String>) -> Self {
        GenericParameter {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn has_constraints(&self) -> bool {
        self.constrain_reference_type
            || self.constrain_value_type
            || self.constrain_default_constructor
            || !self.type_constraints.is_empty()
    }
}

/// A typed constant value: field constants, parameter defaults and attribute
/// arguments all carry one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    Null,
    Boolean(bool),
    Char(char),
    Str(String),
    Integer(i64),
    /// `System.Single` constant; rendered with the language's float suffix.
    Single(f64),
    Double(f64),
    /// Decimal constants keep their exact textual form.
    Decimal(String),
}

/// One argument to an attribute application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArgumentValue {
    Null,
    /// A `typeof(...)` / `GetType(...)` literal.
    TypeLiteral(TypeReference),
    /// One or more members of an enumeration type, OR-ed together.
    EnumMembers {
        enum_type: TypeReference,
        members: Vec<String>,
    },
    Literal(LiteralValue),
    /// Array arguments are not expanded; a placeholder is rendered instead.
    ArrayPlaceholder,
}

/// An attribute applied to a member or parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeApplication {
    pub attribute_type: TypeReference,
    #[serde(default)]
    pub positional_arguments: Vec<ArgumentValue>,
    #[serde(default)]
    pub named_arguments: Vec<(String, ArgumentValue)>,
}

impl AttributeApplication {
    pub fn new(full_name: impl Into<String>) -> Self {
        AttributeApplication {
            attribute_type: TypeReference::named(full_name),
            positional_arguments: Vec::new(),
            named_arguments: Vec::new(),
        }
    }

    pub fn with_positional(mut self, value: ArgumentValue) -> Self {
        self.positional_arguments.push(value);
        self
    }

    pub fn with_named(mut self, name: impl Into<String>, value: ArgumentValue) -> Self {
        self.named_arguments.push((name.into(), value));
        self
    }
}

/// One parameter of a method, constructor, delegate, operator or indexer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    pub parameter_type: TypeReference,
    /// `in` (read-only reference) parameter.
    #[serde(default)]
    pub is_in: bool,
    /// `out` parameter; the type itself is a [`TypeReference::Reference`].
    #[serde(default)]
    pub is_out: bool,
    /// Parameter array (`params` / `ParamArray`).
    #[serde(default)]
    pub is_params: bool,
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default)]
    pub default_value: Option<LiteralValue>,
    #[serde(default)]
    pub attributes: Vec<AttributeApplication>,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, parameter_type: TypeReference) -> Self {
        ParameterDescriptor {
            name: name.into(),
            parameter_type,
            is_in: false,
            is_out: false,
            is_params: false,
            is_optional: false,
            default_value: None,
            attributes: Vec::new(),
        }
    }

    pub fn out(name: impl Into<String>, referenced_type: TypeReference) -> Self {
        let mut parameter =
            ParameterDescriptor::new(name, TypeReference::reference(referenced_type));
        parameter.is_out = true;
        parameter
    }

    pub fn by_ref(name: impl Into<String>, referenced_type: TypeReference) -> Self {
        ParameterDescriptor::new(name, TypeReference::reference(referenced_type))
    }

    pub fn is_by_reference(&self) -> bool {
        matches!(self.parameter_type, TypeReference::Reference(_))
    }
}

/// Struct layout kind for interop rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    Auto,
    Sequential,
    Explicit,
}

/// P/Invoke metadata synthesized into a `DllImport` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DllImportData {
    pub module_name: String,
    #[serde(default)]
    pub entry_point: Option<String>,
    #[serde(default)]
    pub char_set: Option<String>,
    #[serde(default)]
    pub calling_convention: Option<String>,
    #[serde(default)]
    pub set_last_error: bool,
    #[serde(default)]
    pub exact_spelling: bool,
    #[serde(default)]
    pub best_fit_mapping: Option<bool>,
    #[serde(default)]
    pub throw_on_unmappable_char: Option<bool>,
}

/// Interop metadata carried outside the generic attribute list. These fields
/// are synthesized into their well-known attributes and rendered first, in a
/// fixed order, before the generic attributes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InteropData {
    #[serde(default)]
    pub com_import: bool,
    #[serde(default)]
    pub layout_kind: Option<LayoutKind>,
    #[serde(default)]
    pub layout_pack: Option<u32>,
    #[serde(default)]
    pub layout_char_set: Option<String>,
    #[serde(default)]
    pub field_offset: Option<u32>,
    #[serde(default)]
    pub dll_import: Option<DllImportData>,
    #[serde(default)]
    pub preserve_sig: bool,
}

impl InteropData {
    pub fn is_empty(&self) -> bool {
        !self.com_import
            && self.layout_kind.is_none()
            && self.field_offset.is_none()
            && self.dll_import.is_none()
            && !self.preserve_sig
    }
}

/// Summary facts about a named type, used by the XAML and ASP.NET usage
/// engines for applicability decisions about parents and returned types.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TypeInfo {
    pub full_name: String,
    /// Full names of the base-class chain, nearest first.
    #[serde(default)]
    pub ancestors: Vec<String>,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_sealed: bool,
    #[serde(default)]
    pub is_enumeration: bool,
    #[serde(default)]
    pub has_default_constructor: bool,
    #[serde(default)]
    pub has_type_converter: bool,
}

impl TypeInfo {
    pub fn new(full_name: impl Into<String>) -> Self {
        TypeInfo {
            full_name: full_name.into(),
            ..Default::default()
        }
    }

    /// True when this type is a static class (abstract and sealed).
    pub fn is_static_class(&self) -> bool {
        self.is_abstract && self.is_sealed
    }

    pub fn is_or_derives_from(&self, full_name: &str) -> bool {
        self.full_name == full_name || self.ancestors.iter().any(|a| a == full_name)
    }
}

/// Data specific to type descriptors (class, structure, interface, delegate,
/// enumeration).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TypeData {
    #[serde(default)]
    pub base_type: Option<TypeReference>,
    #[serde(default)]
    pub implemented_interfaces: Vec<TypeReference>,
    /// Summary facts about this type itself (default ctor, converter, ...).
    #[serde(default)]
    pub info: TypeInfo,
    /// The XAML content property name, when one is declared.
    #[serde(default)]
    pub content_property: Option<String>,
    #[serde(default)]
    pub is_serializable: bool,
}

/// Data specific to property descriptors.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PropertyData {
    pub has_getter: bool,
    pub has_setter: bool,
    /// Accessor visibility when it differs from the property's own.
    #[serde(default)]
    pub getter_visibility: Option<Visibility>,
    #[serde(default)]
    pub setter_visibility: Option<Visibility>,
    /// Summary facts about the returned type, for usage applicability.
    #[serde(default)]
    pub return_type_info: Option<TypeInfo>,
    /// True when this property is its parent's declared content property.
    #[serde(default)]
    pub is_content_property: bool,
}

/// Data specific to event descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    pub handler_type: TypeReference,
}

/// Fixed-size buffer metadata (`fixed byte name[8]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedBufferData {
    pub element_type: TypeReference,
    pub size: u32,
}

/// Data specific to field descriptors.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldData {
    /// Compile-time constant (`const` / literal).
    #[serde(default)]
    pub is_literal: bool,
    /// Init-only (`readonly` / `ReadOnly` / `initonly`).
    #[serde(default)]
    pub is_init_only: bool,
    #[serde(default)]
    pub is_volatile: bool,
    #[serde(default)]
    pub fixed_buffer: Option<FixedBufferData>,
    /// The constant value for literal fields.
    #[serde(default)]
    pub literal_value: Option<LiteralValue>,
}

/// An explicitly implemented interface member: the contract type and the
/// member name on that contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplicitImplementation {
    pub contract: TypeReference,
    pub member_name: String,
}

/// The subject being rendered: one documented API element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDescriptor {
    pub name: String,
    pub subgroup: Subgroup,
    #[serde(default = "default_namespace")]
    pub namespace_name: String,
    #[serde(default)]
    pub containing_assembly: String,
    #[serde(default)]
    pub containing_type: Option<TypeReference>,
    #[serde(default)]
    pub containing_type_subgroup: Option<Subgroup>,
    /// Summary facts about the containing type, for usage applicability.
    #[serde(default)]
    pub containing_type_info: Option<TypeInfo>,
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_sealed: bool,
    #[serde(default)]
    pub is_override: bool,
    /// Sealed override (`final` on a virtual member).
    #[serde(default)]
    pub is_final: bool,
    /// Extension method: the first parameter becomes the receiver.
    #[serde(default)]
    pub is_extension: bool,
    /// Variable-argument calling convention.
    #[serde(default)]
    pub is_varargs: bool,
    #[serde(default)]
    pub explicit_implementations: Vec<ExplicitImplementation>,
    #[serde(default)]
    pub generic_parameters: Vec<GenericParameter>,
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
    #[serde(default)]
    pub return_type: Option<TypeReference>,
    #[serde(default)]
    pub attributes: Vec<AttributeApplication>,
    #[serde(default)]
    pub interop: InteropData,
    #[serde(default)]
    pub type_data: Option<TypeData>,
    #[serde(default)]
    pub property_data: Option<PropertyData>,
    #[serde(default)]
    pub event_data: Option<EventData>,
    #[serde(default)]
    pub field_data: Option<FieldData>,
}

fn default_namespace() -> String {
    String::new()
}

impl MemberDescriptor {
    pub fn new(subgroup: Subgroup, name: impl Into<String>) -> Self {
        MemberDescriptor {
            name: name.into(),
            subgroup,
            namespace_name: String::new(),
            containing_assembly: String::new(),
            containing_type: None,
            containing_type_subgroup: None,
            containing_type_info: None,
            visibility: Visibility::Public,
            is_static: false,
            is_virtual: false,
            is_abstract: false,
            is_sealed: false,
            is_override: false,
            is_final: false,
            is_extension: false,
            is_varargs: false,
            explicit_implementations: Vec::new(),
            generic_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type: None,
            attributes: Vec::new(),
            interop: InteropData::default(),
            type_data: None,
            property_data: None,
            event_data: None,
            field_data: None,
        }
    }

    pub fn namespace(name: impl Into<String>) -> Self {
        let name = name.into();
        let mut descriptor = MemberDescriptor::new(Subgroup::Namespace, name.clone());
        descriptor.namespace_name = name;
        descriptor
    }

    pub fn class(name: impl Into<String>) -> Self {
        let mut descriptor = MemberDescriptor::new(Subgroup::Class, name);
        descriptor.type_data = Some(TypeData::default());
        descriptor
    }

    pub fn structure(name: impl Into<String>) -> Self {
        let mut descriptor = MemberDescriptor::new(Subgroup::Structure, name);
        descriptor.type_data = Some(TypeData::default());
        descriptor
    }

    pub fn interface(name: impl Into<String>) -> Self {
        let mut descriptor = MemberDescriptor::new(Subgroup::Interface, name);
        descriptor.type_data = Some(TypeData::default());
        descriptor
    }

    pub fn delegate(name: impl Into<String>) -> Self {
        let mut descriptor = MemberDescriptor::new(Subgroup::Delegate, name);
        descriptor.type_data = Some(TypeData::default());
        descriptor
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        let mut descriptor = MemberDescriptor::new(Subgroup::Enumeration, name);
        descriptor.type_data = Some(TypeData::default());
        descriptor
    }

    pub fn constructor(containing_type: impl Into<String>) -> Self {
        let type_name = containing_type.into();
        let mut descriptor = MemberDescriptor::new(Subgroup::Constructor, ".ctor");
        descriptor.containing_type = Some(TypeReference::named(type_name));
        descriptor.containing_type_subgroup = Some(Subgroup::Class);
        descriptor
    }

    pub fn method(name: impl Into<String>) -> Self {
        MemberDescriptor::new(Subgroup::Method, name)
    }

    pub fn operator(name: impl Into<String>) -> Self {
        let mut descriptor = MemberDescriptor::new(Subgroup::Operator, name);
        descriptor.is_static = true;
        descriptor
    }

    pub fn cast(name: impl Into<String>) -> Self {
        let mut descriptor = MemberDescriptor::new(Subgroup::Cast, name);
        descriptor.is_static = true;
        descriptor
    }

    pub fn property(name: impl Into<String>) -> Self {
        let mut descriptor = MemberDescriptor::new(Subgroup::Property, name);
        descriptor.property_data = Some(PropertyData {
            has_getter: true,
            has_setter: true,
            ..Default::default()
        });
        descriptor
    }

    pub fn event(name: impl Into<String>, handler_type: TypeReference) -> Self {
        let mut descriptor = MemberDescriptor::new(Subgroup::Event, name);
        descriptor.event_data = Some(EventData { handler_type });
        descriptor
    }

    pub fn field(name: impl Into<String>, field_type: TypeReference) -> Self {
        let mut descriptor = MemberDescriptor::new(Subgroup::Field, name);
        descriptor.return_type = Some(field_type);
        descriptor.field_data = Some(FieldData::default());
        descriptor
    }

    // --- builder-style setters -------------------------------------------

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn with_sealed(mut self) -> Self {
        self.is_sealed = true;
        self
    }

    pub fn with_virtual(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    pub fn with_override(mut self) -> Self {
        self.is_virtual = true;
        self.is_override = true;
        self
    }

    pub fn with_namespace(mut self, name: impl Into<String>) -> Self {
        self.namespace_name = name.into();
        self
    }

    pub fn with_assembly(mut self, name: impl Into<String>) -> Self {
        self.containing_assembly = name.into();
        self
    }

    pub fn with_containing_type(mut self, full_name: impl Into<String>) -> Self {
        self.containing_type = Some(TypeReference::named(full_name));
        if self.containing_type_subgroup.is_none() {
            self.containing_type_subgroup = Some(Subgroup::Class);
        }
        self
    }

    pub fn with_containing_type_info(mut self, info: TypeInfo) -> Self {
        if self.containing_type.is_none() {
            self.containing_type = Some(TypeReference::named(info.full_name.clone()));
        }
        if self.containing_type_subgroup.is_none() {
            self.containing_type_subgroup = Some(Subgroup::Class);
        }
        self.containing_type_info = Some(info);
        self
    }

    pub fn with_return_type(mut self, return_type: TypeReference) -> Self {
        self.return_type = Some(return_type);
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_generic_parameter(mut self, parameter: GenericParameter) -> Self {
        self.generic_parameters.push(parameter);
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeApplication) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_explicit_implementation(
        mut self,
        contract: TypeReference,
        member_name: impl Into<String>,
    ) -> Self {
        self.explicit_implementations.push(ExplicitImplementation {
            contract,
            member_name: member_name.into(),
        });
        self
    }

    pub fn with_type_data(mut self, type_data: TypeData) -> Self {
        self.type_data = Some(type_data);
        self
    }

    pub fn with_property_data(mut self, property_data: PropertyData) -> Self {
        self.property_data = Some(property_data);
        self
    }

    pub fn with_field_data(mut self, field_data: FieldData) -> Self {
        self.field_data = Some(field_data);
        self
    }

    // --- queries ---------------------------------------------------------

    /// True when this member is an explicit interface implementation.
    pub fn is_explicit_implementation(&self) -> bool {
        !self.explicit_implementations.is_empty()
    }

    /// True when a pointer type occurs in the signature anywhere.
    pub fn has_unsafe_signature(&self) -> bool {
        self.return_type
            .as_ref()
            .is_some_and(TypeReference::contains_pointer)
            || self
                .parameters
                .iter()
                .any(|p| p.parameter_type.contains_pointer())
            || self
                .field_data
                .as_ref()
                .is_some_and(|f| f.fixed_buffer.is_some())
    }

    /// True when the member (or its declaring template) is generic.
    pub fn is_generic(&self) -> bool {
        !self.generic_parameters.is_empty()
    }

    /// Display name of the containing type, for constructor and EII forms.
    pub fn containing_type_name(&self) -> &str {
        self.containing_type
            .as_ref()
            .map(TypeReference::display_name)
            .unwrap_or(&self.name)
    }

    /// Static class means abstract and sealed on a class descriptor.
    pub fn is_static_class(&self) -> bool {
        self.subgroup == Subgroup::Class && self.is_abstract && self.is_sealed
    }

    /// A void return means "no return value" in every target language.
    pub fn returns_void(&self) -> bool {
        match &self.return_type {
            None => true,
            Some(reference) => reference.full_name() == "System.Void",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_produces_consistent_method() {
        let member = MemberDescriptor::method("Add")
            .with_static()
            .with_return_type(TypeReference::named("System.Int32"))
            .with_parameter(ParameterDescriptor::new(
                "a",
                TypeReference::named("System.Int32"),
            ));
        assert_eq!(member.subgroup, Subgroup::Method);
        assert!(member.is_static);
        assert!(!member.returns_void());
        assert_eq!(member.parameters.len(), 1);
    }

    #[test]
    fn test_static_class_detection() {
        let class = MemberDescriptor::class("Helpers").with_abstract().with_sealed();
        assert!(class.is_static_class());
        let sealed_only = MemberDescriptor::class("Sealed").with_sealed();
        assert!(!sealed_only.is_static_class());
    }

    #[test]
    fn test_unsafe_signature_detection() {
        let member = MemberDescriptor::method("Read").with_parameter(ParameterDescriptor::new(
            "buffer",
            TypeReference::pointer(TypeReference::named("System.Byte")),
        ));
        assert!(member.has_unsafe_signature());
        assert!(!MemberDescriptor::method("Safe").has_unsafe_signature());
    }

    #[test]
    fn test_returns_void() {
        assert!(MemberDescriptor::method("A").returns_void());
        assert!(
            MemberDescriptor::method("B")
                .with_return_type(TypeReference::named("System.Void"))
                .returns_void()
        );
        assert!(
            !MemberDescriptor::method("C")
                .with_return_type(TypeReference::named("System.Int32"))
                .returns_void()
        );
    }

    #[test]
    fn test_type_info_derivation_checks() {
        let info = TypeInfo {
            full_name: "My.Button".into(),
            ancestors: vec!["System.Windows.Control".into(), "System.Object".into()],
            ..Default::default()
        };
        assert!(info.is_or_derives_from("My.Button"));
        assert!(info.is_or_derives_from("System.Windows.Control"));
        assert!(!info.is_or_derives_from("System.Windows.Freezable"));
    }
}
