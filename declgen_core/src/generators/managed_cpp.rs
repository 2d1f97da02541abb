//! C++/CLI declaration syntax.

use crate::config::GeneratorConfig;
use crate::error::{DeclgenError, Result};
use crate::model::{
    ArgumentValue, AttributeApplication, GenericParameter, MemberDescriptor, ParameterDescriptor,
    TypeReference, Visibility,
};
use crate::writer::SyntaxWriter;

use super::shared::{
    all_rendered_attributes, attribute_display_name, literal_text, unsupported, LiteralStyle,
};
use super::{Language, SyntaxGenerator};

fn primitive_name(full_name: &str) -> Option<&'static str> {
    match full_name {
        "System.Void" => Some("void"),
        "System.Boolean" => Some("bool"),
        "System.Byte" => Some("unsigned char"),
        "System.SByte" => Some("signed char"),
        "System.Char" => Some("wchar_t"),
        "System.Int16" => Some("short"),
        "System.Int32" => Some("int"),
        "System.Int64" => Some("long long"),
        "System.UInt16" => Some("unsigned short"),
        "System.UInt32" => Some("unsigned int"),
        "System.UInt64" => Some("unsigned long long"),
        "System.Single" => Some("float"),
        "System.Double" => Some("double"),
        _ => None,
    }
}

/// Value types print bare; everything else is a handle (`^`).
fn is_bare_value_type(full_name: &str) -> bool {
    primitive_name(full_name).is_some()
        || matches!(
            full_name,
            "System.Decimal" | "System.DateTime" | "System.TimeSpan"
        )
}

fn operator_token(name: &str) -> Option<&'static str> {
    match name {
        "UnaryPlus" => Some("+"),
        "UnaryNegation" => Some("-"),
        "Increment" => Some("++"),
        "Decrement" => Some("--"),
        "LogicalNot" => Some("!"),
        "Addition" => Some("+"),
        "Subtraction" => Some("-"),
        "Multiply" => Some("*"),
        "Division" => Some("/"),
        "Modulus" => Some("%"),
        "BitwiseAnd" => Some("&"),
        "BitwiseOr" => Some("|"),
        "ExclusiveOr" => Some("^"),
        "OnesComplement" => Some("~"),
        "LeftShift" => Some("<<"),
        "RightShift" => Some(">>"),
        "Equality" => Some("=="),
        "Inequality" => Some("!="),
        "LessThan" => Some("<"),
        "GreaterThan" => Some(">"),
        "LessThanOrEqual" => Some("<="),
        "GreaterThanOrEqual" => Some(">="),
        "Assign" => Some("="),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct ManagedCppSyntaxGenerator {
    render_references: bool,
}

impl ManagedCppSyntaxGenerator {
    pub fn new() -> Self {
        ManagedCppSyntaxGenerator {
            render_references: true,
        }
    }

    /// Member visibility renders as an access label on its own line.
    fn write_visibility_label(&self, visibility: Visibility, writer: &mut dyn SyntaxWriter) {
        let keyword = match visibility {
            Visibility::Public => "public",
            Visibility::Family => "protected",
            Visibility::FamilyOrAssembly => "protected public",
            Visibility::FamilyAndAssembly => "protected private",
            Visibility::Assembly => "internal",
            Visibility::Private => "private",
        };
        writer.write_keyword(keyword);
        writer.write_string(":");
        writer.write_line();
    }

    fn write_type(&self, reference: &TypeReference, writer: &mut dyn SyntaxWriter) {
        match reference {
            TypeReference::Named { full_name } => {
                if let Some(keyword) = primitive_name(full_name) {
                    writer.write_keyword(keyword);
                } else {
                    if self.render_references {
                        writer.write_reference_link(full_name);
                    } else {
                        let display = reference.display_name().to_string();
                        writer.write_identifier(&display);
                    }
                    if !is_bare_value_type(full_name) {
                        writer.write_string("^");
                    }
                }
            }
            TypeReference::Array { rank, element } => {
                writer.write_keyword("array");
                writer.write_string("<");
                self.write_type(element, writer);
                if *rank > 1 {
                    writer.write_string(&format!(", {rank}"));
                }
                writer.write_string(">^");
            }
            TypeReference::Pointer(inner) => {
                self.write_type(inner, writer);
                writer.write_string("*");
            }
            TypeReference::Reference(inner) => {
                self.write_type(inner, writer);
                writer.write_string("%");
            }
            TypeReference::Template(name) => writer.write_identifier(name),
            TypeReference::Specialization {
                template,
                arguments,
            } => {
                let bare = is_bare_value_type(template.full_name());
                match template.as_ref() {
                    TypeReference::Named { full_name } if self.render_references => {
                        writer.write_reference_link(full_name)
                    }
                    other => {
                        let display = other.display_name().to_string();
                        writer.write_identifier(&display);
                    }
                }
                writer.write_string("<");
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        writer.write_string(", ");
                    }
                    self.write_type(argument, writer);
                }
                writer.write_string(">");
                if !bare {
                    writer.write_string("^");
                }
            }
        }
    }

    fn write_attribute_argument(&self, value: &ArgumentValue, writer: &mut dyn SyntaxWriter) {
        match value {
            ArgumentValue::Null => writer.write_keyword("nullptr"),
            ArgumentValue::TypeLiteral(reference) => {
                let display = reference.display_name().to_string();
                writer.write_identifier(&display);
                writer.write_string("::typeid");
            }
            ArgumentValue::EnumMembers { enum_type, members } => {
                for (index, member) in members.iter().enumerate() {
                    if index > 0 {
                        writer.write_string("|");
                    }
                    let display = enum_type.display_name().to_string();
                    writer.write_identifier(&display);
                    writer.write_string("::");
                    writer.write_identifier(member);
                }
            }
            ArgumentValue::Literal(literal) => {
                writer.write_literal(&literal_text(literal, LiteralStyle::ManagedCpp));
            }
            ArgumentValue::ArrayPlaceholder => writer.write_string("..."),
        }
    }

    fn write_attributes(&self, member: &MemberDescriptor, writer: &mut dyn SyntaxWriter) {
        for attribute in all_rendered_attributes(member) {
            writer.write_string("[");
            let display = attribute_display_name(&attribute);
            if self.render_references {
                writer.write_reference_link_with_text(
                    attribute.attribute_type.full_name(),
                    &display,
                );
            } else {
                writer.write_identifier(&display);
            }
            if !attribute.positional_arguments.is_empty() || !attribute.named_arguments.is_empty()
            {
                writer.write_string("(");
                let mut first = true;
                for argument in &attribute.positional_arguments {
                    if !first {
                        writer.write_string(", ");
                    }
                    first = false;
                    self.write_attribute_argument(argument, writer);
                }
                for (name, argument) in &attribute.named_arguments {
                    if !first {
                        writer.write_string(", ");
                    }
                    first = false;
                    writer.write_identifier(name);
                    writer.write_string(" = ");
                    self.write_attribute_argument(argument, writer);
                }
                writer.write_string(")");
            }
            writer.write_string("]");
            writer.write_line();
        }
    }

    /// `generic<typename T, typename U>` prefix line with constraint lines.
    fn write_generic_prefix(
        &self,
        parameters: &[GenericParameter],
        writer: &mut dyn SyntaxWriter,
    ) {
        if parameters.is_empty() {
            return;
        }
        writer.write_keyword("generic");
        writer.write_string("<");
        for (index, parameter) in parameters.iter().enumerate() {
            if index > 0 {
                writer.write_string(", ");
            }
            writer.write_keyword("typename");
            writer.write_string(" ");
            writer.write_identifier(&parameter.name);
        }
        writer.write_string(">");
        writer.write_line();
        for parameter in parameters.iter().filter(|p| p.has_constraints()) {
            writer.write_keyword("where");
            writer.write_string(" ");
            writer.write_identifier(&parameter.name);
            writer.write_string(" : ");
            let mut first = true;
            let mut separate = |writer: &mut dyn SyntaxWriter, first: &mut bool| {
                if !*first {
                    writer.write_string(", ");
                }
                *first = false;
            };
            if parameter.constrain_reference_type {
                separate(writer, &mut first);
                writer.write_keyword("ref class");
            }
            if parameter.constrain_value_type {
                separate(writer, &mut first);
                writer.write_keyword("value class");
            }
            for constraint in &parameter.type_constraints {
                separate(writer, &mut first);
                self.write_type(constraint, writer);
            }
            if parameter.constrain_default_constructor && !parameter.constrain_value_type {
                separate(writer, &mut first);
                writer.write_keyword("gcnew");
                writer.write_string("()");
            }
            writer.write_line();
        }
    }

    fn write_parameters(&self, parameters: &[ParameterDescriptor], writer: &mut dyn SyntaxWriter) {
        writer.write_string("(");
        for (index, parameter) in parameters.iter().enumerate() {
            if index > 0 {
                writer.write_string(", ");
            }
            if parameter.is_params {
                writer.write_string("... ");
            }
            if parameter.is_out {
                writer.write_string("[OutAttribute] ");
            }
            self.write_type(&parameter.parameter_type, writer);
            writer.write_string(" ");
            writer.write_parameter(&parameter.name);
        }
        writer.write_string(")");
    }

    fn write_return(&self, member: &MemberDescriptor, writer: &mut dyn SyntaxWriter) {
        match &member.return_type {
            Some(return_type) if !member.returns_void() => self.write_type(return_type, writer),
            _ => writer.write_keyword("void"),
        }
    }

    fn write_member_prefix(&self, member: &MemberDescriptor, writer: &mut dyn SyntaxWriter) {
        if member.is_static {
            writer.write_keyword("static");
            writer.write_string(" ");
        } else if member.is_virtual || member.is_abstract || member.is_override {
            writer.write_keyword("virtual");
            writer.write_string(" ");
        }
    }

    /// Trailing `abstract` / `override` / `sealed` specifiers.
    fn write_member_suffix(&self, member: &MemberDescriptor, writer: &mut dyn SyntaxWriter) {
        if member.is_abstract {
            writer.write_string(" ");
            writer.write_keyword("abstract");
        } else if member.is_override {
            writer.write_string(" ");
            writer.write_keyword("override");
            if member.is_final {
                writer.write_string(" ");
                writer.write_keyword("sealed");
            }
        }
    }
}

impl SyntaxGenerator for ManagedCppSyntaxGenerator {
    fn language(&self) -> Language {
        Language::ManagedCPlusPlus
    }

    fn initialize(&mut self, config: &GeneratorConfig) -> Result<()> {
        self.render_references = config.render_references;
        Ok(())
    }

    fn write_namespace_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        writer.write_keyword("namespace");
        writer.write_string(" ");
        let name = member.name.replace('.', "::");
        writer.write_identifier(&name);
        Ok(())
    }

    fn write_class_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        self.write_generic_prefix(&member.generic_parameters, writer);
        writer.write_keyword("public");
        writer.write_string(" ");
        writer.write_keyword("ref class");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        if member.is_static_class() {
            writer.write_string(" ");
            writer.write_keyword("abstract sealed");
        } else if member.is_abstract {
            writer.write_string(" ");
            writer.write_keyword("abstract");
        } else if member.is_sealed {
            writer.write_string(" ");
            writer.write_keyword("sealed");
        }
        if let Some(type_data) = &member.type_data {
            let mut first = true;
            if let Some(base) = &type_data.base_type {
                if base.full_name() != "System.Object" {
                    writer.write_string(" : ");
                    first = false;
                    writer.write_keyword("public");
                    writer.write_string(" ");
                    let display = base.display_name().to_string();
                    writer.write_identifier(&display);
                }
            }
            for interface in &type_data.implemented_interfaces {
                writer.write_string(if first { " : " } else { ", " });
                first = false;
                let display = interface.display_name().to_string();
                writer.write_identifier(&display);
            }
        }
        Ok(())
    }

    fn write_structure_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        self.write_generic_prefix(&member.generic_parameters, writer);
        writer.write_keyword("public");
        writer.write_string(" ");
        writer.write_keyword("value class");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        if let Some(type_data) = &member.type_data {
            let mut first = true;
            for interface in &type_data.implemented_interfaces {
                writer.write_string(if first { " : " } else { ", " });
                first = false;
                let display = interface.display_name().to_string();
                writer.write_identifier(&display);
            }
        }
        Ok(())
    }

    fn write_interface_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        self.write_generic_prefix(&member.generic_parameters, writer);
        writer.write_keyword("public");
        writer.write_string(" ");
        writer.write_keyword("interface class");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        if let Some(type_data) = &member.type_data {
            let mut first = true;
            for interface in &type_data.implemented_interfaces {
                writer.write_string(if first { " : " } else { ", " });
                first = false;
                let display = interface.display_name().to_string();
                writer.write_identifier(&display);
            }
        }
        Ok(())
    }

    fn write_delegate_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        self.write_generic_prefix(&member.generic_parameters, writer);
        writer.write_keyword("public");
        writer.write_string(" ");
        writer.write_keyword("delegate");
        writer.write_string(" ");
        self.write_return(member, writer);
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        self.write_parameters(&member.parameters, writer);
        Ok(())
    }

    fn write_enumeration_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        writer.write_keyword("public");
        writer.write_string(" ");
        writer.write_keyword("enum class");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        Ok(())
    }

    fn write_constructor_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        if member.is_static {
            writer.write_keyword("static");
            writer.write_string(" ");
        } else {
            self.write_visibility_label(member.visibility, writer);
        }
        let type_name = member.containing_type_name().to_string();
        writer.write_identifier(&type_name);
        self.write_parameters(&member.parameters, writer);
        Ok(())
    }

    fn write_method_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        self.write_visibility_label(member.visibility, writer);
        self.write_generic_prefix(&member.generic_parameters, writer);
        self.write_member_prefix(member, writer);
        self.write_return(member, writer);
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        self.write_parameters(&member.parameters, writer);
        self.write_member_suffix(member, writer);
        if let Some(explicit) = member.explicit_implementations.first() {
            writer.write_string(" = ");
            let contract = explicit.contract.display_name().to_string();
            writer.write_identifier(&contract);
            writer.write_string("::");
            writer.write_identifier(&explicit.member_name);
        }
        Ok(())
    }

    fn write_operator_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        let Some(token) = operator_token(&member.name) else {
            unsupported(writer, "Operator", self.language());
            return Ok(());
        };
        self.write_attributes(member, writer);
        writer.write_keyword("public");
        writer.write_string(":");
        writer.write_line();
        writer.write_keyword("static");
        writer.write_string(" ");
        self.write_return(member, writer);
        writer.write_string(" ");
        writer.write_keyword("operator");
        writer.write_string(" ");
        writer.write_string(token);
        self.write_parameters(&member.parameters, writer);
        Ok(())
    }

    fn write_cast_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        let explicit = match member.name.as_str() {
            "Implicit" => false,
            "Explicit" => true,
            other => {
                return Err(DeclgenError::malformed_member(
                    other,
                    "cast member must be named Implicit or Explicit",
                ));
            }
        };
        self.write_attributes(member, writer);
        writer.write_keyword("public");
        writer.write_string(":");
        writer.write_line();
        writer.write_keyword("static");
        writer.write_string(" ");
        if explicit {
            writer.write_keyword("explicit");
            writer.write_string(" ");
        }
        writer.write_keyword("operator");
        writer.write_string(" ");
        if let Some(target) = &member.return_type {
            self.write_type(target, writer);
        }
        self.write_parameters(&member.parameters, writer);
        Ok(())
    }

    fn write_property_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        self.write_visibility_label(member.visibility, writer);
        self.write_member_prefix(member, writer);
        writer.write_keyword("property");
        writer.write_string(" ");
        match &member.return_type {
            Some(return_type) => self.write_type(return_type, writer),
            None => writer.write_keyword("void"),
        }
        writer.write_string(" ");
        if member.parameters.is_empty() {
            writer.write_identifier(&member.name);
        } else {
            // Parameterized properties use the default-indexer spelling.
            writer.write_keyword("default");
            writer.write_string("[");
            for (index, parameter) in member.parameters.iter().enumerate() {
                if index > 0 {
                    writer.write_string(", ");
                }
                self.write_type(&parameter.parameter_type, writer);
            }
            writer.write_string("]");
        }
        writer.write_string(" { ");
        if let Some(property) = &member.property_data {
            if property.has_getter {
                match &member.return_type {
                    Some(return_type) => self.write_type(return_type, writer),
                    None => writer.write_keyword("void"),
                }
                writer.write_string(" ");
                writer.write_keyword("get");
                writer.write_string("(");
                for (index, parameter) in member.parameters.iter().enumerate() {
                    if index > 0 {
                        writer.write_string(", ");
                    }
                    self.write_type(&parameter.parameter_type, writer);
                    writer.write_string(" ");
                    writer.write_parameter(&parameter.name);
                }
                writer.write_string("); ");
            }
            if property.has_setter {
                writer.write_keyword("void");
                writer.write_string(" ");
                writer.write_keyword("set");
                writer.write_string("(");
                for parameter in &member.parameters {
                    self.write_type(&parameter.parameter_type, writer);
                    writer.write_string(" ");
                    writer.write_parameter(&parameter.name);
                    writer.write_string(", ");
                }
                match &member.return_type {
                    Some(return_type) => self.write_type(return_type, writer),
                    None => writer.write_keyword("void"),
                }
                writer.write_string(" ");
                writer.write_parameter("value");
                writer.write_string("); ");
            }
        }
        writer.write_string("}");
        Ok(())
    }

    fn write_event_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        self.write_visibility_label(member.visibility, writer);
        if member.is_static {
            writer.write_keyword("static");
            writer.write_string(" ");
        }
        writer.write_keyword("event");
        writer.write_string(" ");
        if let Some(event) = &member.event_data {
            self.write_type(&event.handler_type, writer);
            writer.write_string(" ");
        }
        writer.write_identifier(&member.name);
        Ok(())
    }

    fn write_field_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        self.write_visibility_label(member.visibility, writer);
        let field = member.field_data.clone().unwrap_or_default();
        if field.is_literal {
            writer.write_keyword("literal");
            writer.write_string(" ");
        } else {
            if member.is_static {
                writer.write_keyword("static");
                writer.write_string(" ");
            }
            if field.is_init_only {
                writer.write_keyword("initonly");
                writer.write_string(" ");
            }
            if field.is_volatile {
                writer.write_keyword("volatile");
                writer.write_string(" ");
            }
        }
        if let Some(field_type) = &member.return_type {
            self.write_type(field_type, writer);
            writer.write_string(" ");
        }
        writer.write_identifier(&member.name);
        if let Some(value) = &field.literal_value {
            writer.write_string(" = ");
            writer.write_literal(&literal_text(value, LiteralStyle::ManagedCpp));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldData, LiteralValue, TypeData};
    use crate::writer::TokenWriter;
    use pretty_assertions::assert_eq;

    fn render(member: &MemberDescriptor) -> String {
        let generator = ManagedCppSyntaxGenerator::new();
        let mut writer = TokenWriter::new();
        generator.write_syntax(member, &mut writer).unwrap();
        assert!(writer.is_balanced());
        writer.text()
    }

    fn int32() -> TypeReference {
        TypeReference::named("System.Int32")
    }

    #[test]
    fn test_static_method_with_access_label() {
        let member = MemberDescriptor::method("Add")
            .with_static()
            .with_return_type(int32())
            .with_parameter(ParameterDescriptor::new("a", int32()))
            .with_parameter(ParameterDescriptor::new("b", int32()));
        assert_eq!(render(&member), "public:\nstatic int Add(int a, int b)");
    }

    #[test]
    fn test_addition_operator_uses_operator_keyword() {
        let member = MemberDescriptor::operator("Addition")
            .with_return_type(int32())
            .with_parameter(ParameterDescriptor::new("a", int32()))
            .with_parameter(ParameterDescriptor::new("b", int32()));
        assert_eq!(
            render(&member),
            "public:\nstatic int operator +(int a, int b)"
        );
    }

    #[test]
    fn test_assignment_operator_supported() {
        let member = MemberDescriptor::operator("Assign")
            .with_return_type(int32())
            .with_parameter(ParameterDescriptor::new("value", int32()));
        assert_eq!(render(&member), "public:\nstatic int operator =(int value)");
    }

    #[test]
    fn test_concatenate_unsupported() {
        let member = MemberDescriptor::operator("Concatenate");
        let generator = ManagedCppSyntaxGenerator::new();
        let mut writer = TokenWriter::new();
        generator.write_syntax(&member, &mut writer).unwrap();
        assert_eq!(
            writer.messages(),
            vec!["UnsupportedOperator_ManagedCPlusPlus"]
        );
    }

    #[test]
    fn test_ref_class_with_bases() {
        let member = MemberDescriptor::class("Widget").with_type_data(TypeData {
            base_type: Some(TypeReference::named("System.ComponentModel.Component")),
            implemented_interfaces: vec![TypeReference::named("System.IDisposable")],
            ..Default::default()
        });
        assert_eq!(
            render(&member),
            "public ref class Widget : public Component, IDisposable"
        );
    }

    #[test]
    fn test_value_class_for_structure() {
        let member = MemberDescriptor::structure("Point");
        assert_eq!(render(&member), "public value class Point");
    }

    #[test]
    fn test_interface_class() {
        let member = MemberDescriptor::interface("IShape");
        assert_eq!(render(&member), "public interface class IShape");
    }

    #[test]
    fn test_handle_on_reference_types() {
        let member = MemberDescriptor::method("Format")
            .with_return_type(TypeReference::named("System.String"))
            .with_parameter(ParameterDescriptor::new(
                "values",
                TypeReference::array(int32()),
            ));
        assert_eq!(
            render(&member),
            "public:\nString^ Format(array<int>^ values)"
        );
    }

    #[test]
    fn test_generic_prefix_line() {
        let member = MemberDescriptor::method("Identity")
            .with_generic_parameter(crate::model::GenericParameter::new("T"))
            .with_return_type(TypeReference::template("T"))
            .with_parameter(ParameterDescriptor::new(
                "value",
                TypeReference::template("T"),
            ));
        assert_eq!(
            render(&member),
            "public:\ngeneric<typename T>\nT Identity(T value)"
        );
    }

    #[test]
    fn test_property_block_form() {
        let member = MemberDescriptor::property("Count").with_return_type(int32());
        assert_eq!(
            render(&member),
            "public:\nproperty int Count { int get(); void set(int value); }"
        );
    }

    #[test]
    fn test_default_indexer_form() {
        let member = MemberDescriptor::property("Item")
            .with_return_type(TypeReference::named("System.String"))
            .with_parameter(ParameterDescriptor::new("index", int32()))
            .with_property_data(crate::model::PropertyData {
                has_getter: true,
                has_setter: false,
                ..Default::default()
            });
        assert_eq!(
            render(&member),
            "public:\nproperty String^ default[int] { String^ get(int index); }"
        );
    }

    #[test]
    fn test_literal_field() {
        let member = MemberDescriptor::field("Answer", int32())
            .with_static()
            .with_field_data(FieldData {
                is_literal: true,
                literal_value: Some(LiteralValue::Integer(42)),
                ..Default::default()
            });
        assert_eq!(render(&member), "public:\nliteral int Answer = 42");
    }

    #[test]
    fn test_namespace_uses_scope_resolution() {
        let member = MemberDescriptor::namespace("System.Collections");
        assert_eq!(render(&member), "namespace System::Collections");
    }

    #[test]
    fn test_explicit_implementation_suffix() {
        let member = MemberDescriptor::method("Dispose")
            .with_visibility(Visibility::Private)
            .with_explicit_implementation(TypeReference::named("System.IDisposable"), "Dispose");
        let text = render(&member);
        assert!(text.ends_with("= IDisposable::Dispose"), "got: {text}");
    }

    #[test]
    fn test_wide_string_literal_in_attribute() {
        let attribute = AttributeApplication::new("System.ObsoleteAttribute").with_positional(
            ArgumentValue::Literal(LiteralValue::Str("old".into())),
        );
        let member = MemberDescriptor::method("Old").with_attribute(attribute);
        let text = render(&member);
        assert!(text.contains("[Obsolete(L\"old\")]"), "got: {text}");
    }
}
