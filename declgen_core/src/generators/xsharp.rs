//! X# declaration syntax.
//!
//! Keywords are upper case, member signatures are `name AS type`, and a
//! class literally named `Functions` holds the compiler-generated globals,
//! whose methods render in the standalone `FUNCTION` form.

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
        "System.Void" => Some("VOID"),
        "System.Boolean" => Some("LOGIC"),
        "System.Byte" => Some("BYTE"),
        "System.SByte" => Some("SBYTE"),
        "System.Char" => Some("CHAR"),
        "System.Int16" => Some("SHORT"),
        "System.Int32" => Some("LONG"),
        "System.Int64" => Some("INT64"),
        "System.UInt16" => Some("WORD"),
        "System.UInt32" => Some("DWORD"),
        "System.UInt64" => Some("UINT64"),
        "System.Single" => Some("REAL4"),
        "System.Double" => Some("REAL8"),
        "System.Decimal" => Some("DECIMAL"),
        "System.String" => Some("STRING"),
        "System.Object" => Some("OBJECT"),
        _ => None,
    }
}

fn operator_token(name: &str) -> Option<&'static str> {
    match name {
        "UnaryPlus" => Some("+"),
        "UnaryNegation" => Some("-"),
        "Increment" => Some("++"),
        "Decrement" => Some("--"),
        "LogicalNot" => Some("!"),
        "True" => Some("TRUE"),
        "False" => Some("FALSE"),
        "Addition" => Some("+"),
        "Subtraction" => Some("-"),
        "Multiply" => Some("*"),
        "Division" => Some("/"),
        "Modulus" => Some("%"),
        "BitwiseAnd" => Some("&"),
        "BitwiseOr" => Some("|"),
        "ExclusiveOr" => Some("~"),
        "OnesComplement" => Some("~"),
        "LeftShift" => Some("<<"),
        "RightShift" => Some(">>"),
        "Equality" => Some("=="),
        "Inequality" => Some("!="),
        "LessThan" => Some("<"),
        "GreaterThan" => Some(">"),
        "LessThanOrEqual" => Some("<="),
        "GreaterThanOrEqual" => Some(">="),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct XSharpSyntaxGenerator {
    render_references: bool,
}

impl XSharpSyntaxGenerator {
    pub fn new() -> Self {
        XSharpSyntaxGenerator {
            render_references: true,
        }
    }

    /// Members of the globals class render in free-function form.
    fn is_functions_class_member(&self, member: &MemberDescriptor) -> bool {
        member.containing_type_name() == "Functions" && member.containing_type.is_some()
    }

    fn write_visibility(&self, visibility: Visibility, writer: &mut dyn SyntaxWriter) {
        let keyword = match visibility {
            Visibility::Public => "PUBLIC",
            Visibility::Family => "PROTECTED",
            Visibility::FamilyOrAssembly => "PROTECTED INTERNAL",
            Visibility::FamilyAndAssembly => "PRIVATE PROTECTED",
            Visibility::Assembly => "INTERNAL",
            Visibility::Private => "PRIVATE",
        };
        writer.write_keyword(keyword);
        writer.write_string(" ");
    }

    fn write_type(&self, reference: &TypeReference, writer: &mut dyn SyntaxWriter) {
        match reference {
            TypeReference::Named { full_name } => match primitive_name(full_name) {
                Some(keyword) => writer.write_keyword(keyword),
                None if self.render_references => writer.write_reference_link(full_name),
                None => {
                    let display = reference.display_name().to_string();
                    writer.write_identifier(&display);
                }
            },
            TypeReference::Array { rank, element } => {
                self.write_type(element, writer);
                writer.write_string("[");
                for _ in 1..*rank {
                    writer.write_string(",");
                }
                writer.write_string("]");
            }
            TypeReference::Pointer(inner) => {
                self.write_type(inner, writer);
                writer.write_string(" ");
                writer.write_keyword("PTR");
            }
            TypeReference::Reference(inner) => self.write_type(inner, writer),
            TypeReference::Template(name) => writer.write_identifier(name),
            TypeReference::Specialization {
                template,
                arguments,
            } => {
                self.write_type(template, writer);
                writer.write_string("<");
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        writer.write_string(", ");
                    }
                    self.write_type(argument, writer);
                }
                writer.write_string(">");
            }
        }
    }

    fn write_attribute_argument(&self, value: &ArgumentValue, writer: &mut dyn SyntaxWriter) {
        match value {
            ArgumentValue::Null => writer.write_keyword("NULL"),
            ArgumentValue::TypeLiteral(reference) => {
                writer.write_keyword("typeof");
                writer.write_string("(");
                self.write_type(reference, writer);
                writer.write_string(")");
            }
            ArgumentValue::EnumMembers { enum_type, members } => {
                for (index, member) in members.iter().enumerate() {
                    if index > 0 {
                        writer.write_string("|");
                    }
                    let display = enum_type.display_name().to_string();
                    writer.write_identifier(&display);
                    writer.write_string(".");
                    writer.write_identifier(member);
                }
            }
            ArgumentValue::Literal(literal) => {
                writer.write_literal(&literal_text(literal, LiteralStyle::XSharp));
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
                    writer.write_string(" := ");
                    self.write_attribute_argument(argument, writer);
                }
                writer.write_string(")");
            }
            writer.write_string("]");
            writer.write_line();
        }
    }

    fn write_generic_parameters(
        &self,
        parameters: &[GenericParameter],
        writer: &mut dyn SyntaxWriter,
    ) {
        if parameters.is_empty() {
            return;
        }
        writer.write_string("<");
        for (index, parameter) in parameters.iter().enumerate() {
            if index > 0 {
                writer.write_string(", ");
            }
            writer.write_identifier(&parameter.name);
        }
        writer.write_string(">");
    }

    fn write_parameter(&self, parameter: &ParameterDescriptor, writer: &mut dyn SyntaxWriter) {
        writer.write_parameter(&parameter.name);
        writer.write_string(" ");
        if parameter.is_out {
            writer.write_keyword("OUT");
        } else if parameter.is_by_reference() {
            writer.write_keyword("REF");
        } else {
            writer.write_keyword("AS");
        }
        writer.write_string(" ");
        self.write_type(&parameter.parameter_type, writer);
    }

    fn write_parameters(&self, parameters: &[ParameterDescriptor], writer: &mut dyn SyntaxWriter) {
        writer.write_string("(");
        for (index, parameter) in parameters.iter().enumerate() {
            if index > 0 {
                writer.write_string(", ");
            }
            self.write_parameter(parameter, writer);
        }
        writer.write_string(")");
    }

    fn write_return(&self, member: &MemberDescriptor, writer: &mut dyn SyntaxWriter) {
        writer.write_string(" ");
        writer.write_keyword("AS");
        writer.write_string(" ");
        match &member.return_type {
            Some(return_type) if !member.returns_void() => self.write_type(return_type, writer),
            _ => writer.write_keyword("VOID"),
        }
    }

    fn write_member_modifiers(&self, member: &MemberDescriptor, writer: &mut dyn SyntaxWriter) {
        if member.is_static {
            writer.write_keyword("STATIC");
            writer.write_string(" ");
        } else if member.is_abstract {
            writer.write_keyword("ABSTRACT");
            writer.write_string(" ");
        } else if member.is_override {
            if member.is_final {
                writer.write_keyword("SEALED");
                writer.write_string(" ");
            }
            writer.write_keyword("OVERRIDE");
            writer.write_string(" ");
        } else if member.is_virtual && !member.is_final {
            writer.write_keyword("VIRTUAL");
            writer.write_string(" ");
        }
    }
}

impl SyntaxGenerator for XSharpSyntaxGenerator {
    fn language(&self) -> Language {
        Language::XSharp
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
        writer.write_keyword("BEGIN NAMESPACE");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        Ok(())
    }

    fn write_class_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        self.write_visibility(member.visibility, writer);
        if member.is_static_class() {
            writer.write_keyword("STATIC");
            writer.write_string(" ");
        } else if member.is_abstract {
            writer.write_keyword("ABSTRACT");
            writer.write_string(" ");
        } else if member.is_sealed {
            writer.write_keyword("SEALED");
            writer.write_string(" ");
        }
        writer.write_keyword("CLASS");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        self.write_generic_parameters(&member.generic_parameters, writer);
        if let Some(type_data) = &member.type_data {
            if let Some(base) = &type_data.base_type {
                if base.full_name() != "System.Object" {
                    writer.write_string(" ");
                    writer.write_keyword("INHERIT");
                    writer.write_string(" ");
                    self.write_type(base, writer);
                }
            }
            if !type_data.implemented_interfaces.is_empty() {
                writer.write_string(" ");
                writer.write_keyword("IMPLEMENTS");
                writer.write_string(" ");
                for (index, interface) in type_data.implemented_interfaces.iter().enumerate() {
                    if index > 0 {
                        writer.write_string(", ");
                    }
                    self.write_type(interface, writer);
                }
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
        self.write_visibility(member.visibility, writer);
        writer.write_keyword("STRUCTURE");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        self.write_generic_parameters(&member.generic_parameters, writer);
        if let Some(type_data) = &member.type_data {
            if !type_data.implemented_interfaces.is_empty() {
                writer.write_string(" ");
                writer.write_keyword("IMPLEMENTS");
                writer.write_string(" ");
                for (index, interface) in type_data.implemented_interfaces.iter().enumerate() {
                    if index > 0 {
                        writer.write_string(", ");
                    }
                    self.write_type(interface, writer);
                }
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
        self.write_visibility(member.visibility, writer);
        writer.write_keyword("INTERFACE");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        self.write_generic_parameters(&member.generic_parameters, writer);
        if let Some(type_data) = &member.type_data {
            if !type_data.implemented_interfaces.is_empty() {
                writer.write_string(" ");
                writer.write_keyword("INHERIT");
                writer.write_string(" ");
                for (index, interface) in type_data.implemented_interfaces.iter().enumerate() {
                    if index > 0 {
                        writer.write_string(", ");
                    }
                    self.write_type(interface, writer);
                }
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
        self.write_visibility(member.visibility, writer);
        writer.write_keyword("DELEGATE");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        self.write_generic_parameters(&member.generic_parameters, writer);
        self.write_parameters(&member.parameters, writer);
        self.write_return(member, writer);
        Ok(())
    }

    fn write_enumeration_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        self.write_visibility(member.visibility, writer);
        writer.write_keyword("ENUM");
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
            writer.write_keyword("STATIC");
            writer.write_string(" ");
        } else {
            self.write_visibility(member.visibility, writer);
        }
        writer.write_keyword("CONSTRUCTOR");
        self.write_parameters(&member.parameters, writer);
        Ok(())
    }

    fn write_method_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        if self.is_functions_class_member(member) {
            writer.write_keyword("FUNCTION");
            writer.write_string(" ");
            writer.write_identifier(&member.name);
            self.write_generic_parameters(&member.generic_parameters, writer);
            self.write_parameters(&member.parameters, writer);
            self.write_return(member, writer);
            return Ok(());
        }
        if let Some(explicit) = member.explicit_implementations.first() {
            writer.write_keyword("METHOD");
            writer.write_string(" ");
            self.write_type(&explicit.contract, writer);
            writer.write_string(".");
            writer.write_identifier(&explicit.member_name);
        } else {
            self.write_visibility(member.visibility, writer);
            self.write_member_modifiers(member, writer);
            writer.write_keyword("METHOD");
            writer.write_string(" ");
            writer.write_identifier(&member.name);
        }
        self.write_generic_parameters(&member.generic_parameters, writer);
        self.write_parameters(&member.parameters, writer);
        self.write_return(member, writer);
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
        writer.write_keyword("PUBLIC");
        writer.write_string(" ");
        writer.write_keyword("STATIC");
        writer.write_string(" ");
        writer.write_keyword("OPERATOR");
        writer.write_string(" ");
        writer.write_string(token);
        self.write_parameters(&member.parameters, writer);
        self.write_return(member, writer);
        Ok(())
    }

    fn write_cast_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        let keyword = match member.name.as_str() {
            "Implicit" => "IMPLICIT",
            "Explicit" => "EXPLICIT",
            other => {
                return Err(DeclgenError::malformed_member(
                    other,
                    "cast member must be named Implicit or Explicit",
                ));
            }
        };
        self.write_attributes(member, writer);
        writer.write_keyword("PUBLIC");
        writer.write_string(" ");
        writer.write_keyword("STATIC");
        writer.write_string(" ");
        writer.write_keyword("OPERATOR");
        writer.write_string(" ");
        writer.write_keyword(keyword);
        self.write_parameters(&member.parameters, writer);
        self.write_return(member, writer);
        Ok(())
    }

    fn write_property_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        if let Some(explicit) = member.explicit_implementations.first() {
            writer.write_keyword("PROPERTY");
            writer.write_string(" ");
            self.write_type(&explicit.contract, writer);
            writer.write_string(".");
            writer.write_identifier(&explicit.member_name);
        } else {
            self.write_visibility(member.visibility, writer);
            self.write_member_modifiers(member, writer);
            writer.write_keyword("PROPERTY");
            writer.write_string(" ");
            if member.parameters.is_empty() {
                writer.write_identifier(&member.name);
            } else {
                writer.write_keyword("SELF");
                writer.write_string("[");
                for (index, parameter) in member.parameters.iter().enumerate() {
                    if index > 0 {
                        writer.write_string(", ");
                    }
                    self.write_parameter(parameter, writer);
                }
                writer.write_string("]");
            }
        }
        self.write_return(member, writer);
        if let Some(property) = &member.property_data {
            if property.has_getter {
                writer.write_string(" ");
                writer.write_keyword("GET");
            }
            if property.has_setter {
                writer.write_string(" ");
                writer.write_keyword("SET");
            }
        }
        Ok(())
    }

    fn write_event_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        self.write_visibility(member.visibility, writer);
        self.write_member_modifiers(member, writer);
        writer.write_keyword("EVENT");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        if let Some(event) = &member.event_data {
            writer.write_string(" ");
            writer.write_keyword("AS");
            writer.write_string(" ");
            self.write_type(&event.handler_type, writer);
        }
        Ok(())
    }

    fn write_field_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        self.write_visibility(member.visibility, writer);
        let field = member.field_data.clone().unwrap_or_default();
        if field.is_literal {
            writer.write_keyword("CONST");
            writer.write_string(" ");
        } else {
            if member.is_static {
                writer.write_keyword("STATIC");
                writer.write_string(" ");
            }
            if field.is_init_only {
                writer.write_keyword("INITONLY");
                writer.write_string(" ");
            }
        }
        writer.write_identifier(&member.name);
        if let Some(value) = &field.literal_value {
            writer.write_string(" := ");
            writer.write_literal(&literal_text(value, LiteralStyle::XSharp));
        }
        if let Some(field_type) = &member.return_type {
            writer.write_string(" ");
            writer.write_keyword("AS");
            writer.write_string(" ");
            self.write_type(field_type, writer);
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
        let generator = XSharpSyntaxGenerator::new();
        let mut writer = TokenWriter::new();
        generator.write_syntax(member, &mut writer).unwrap();
        assert!(writer.is_balanced());
        writer.text()
    }

    fn int32() -> TypeReference {
        TypeReference::named("System.Int32")
    }

    #[test]
    fn test_static_method_declaration() {
        let member = MemberDescriptor::method("Add")
            .with_static()
            .with_return_type(int32())
            .with_parameter(ParameterDescriptor::new("a", int32()))
            .with_parameter(ParameterDescriptor::new("b", int32()));
        assert_eq!(
            render(&member),
            "PUBLIC STATIC METHOD Add(a AS LONG, b AS LONG) AS LONG"
        );
    }

    #[test]
    fn test_functions_class_member_renders_function_form() {
        let member = MemberDescriptor::method("Today")
            .with_static()
            .with_containing_type("XSharp.Core.Functions")
            .with_return_type(TypeReference::named("System.DateTime"));
        assert_eq!(render(&member), "FUNCTION Today() AS DateTime");
    }

    #[test]
    fn test_constant_field_uses_assignment_token() {
        let member = MemberDescriptor::field("Answer", int32())
            .with_static()
            .with_field_data(FieldData {
                is_literal: true,
                literal_value: Some(LiteralValue::Integer(42)),
                ..Default::default()
            });
        assert_eq!(render(&member), "PUBLIC CONST Answer := 42 AS LONG");
    }

    #[test]
    fn test_class_inherit_implements() {
        let member = MemberDescriptor::class("Widget").with_type_data(TypeData {
            base_type: Some(TypeReference::named("System.ComponentModel.Component")),
            implemented_interfaces: vec![TypeReference::named("System.IDisposable")],
            ..Default::default()
        });
        assert_eq!(
            render(&member),
            "PUBLIC CLASS Widget INHERIT Component IMPLEMENTS IDisposable"
        );
    }

    #[test]
    fn test_constructor_keyword() {
        let member = MemberDescriptor::constructor("My.Widget")
            .with_parameter(ParameterDescriptor::new("size", int32()));
        assert_eq!(render(&member), "PUBLIC CONSTRUCTOR(size AS LONG)");
    }

    #[test]
    fn test_operator_token_table() {
        let member = MemberDescriptor::operator("Addition")
            .with_return_type(int32())
            .with_parameter(ParameterDescriptor::new("a", int32()))
            .with_parameter(ParameterDescriptor::new("b", int32()));
        assert_eq!(
            render(&member),
            "PUBLIC STATIC OPERATOR +(a AS LONG, b AS LONG) AS LONG"
        );
    }

    #[test]
    fn test_implicit_cast() {
        let member = MemberDescriptor::cast("Implicit")
            .with_return_type(TypeReference::named("My.Widget"))
            .with_parameter(ParameterDescriptor::new("value", int32()));
        assert_eq!(
            render(&member),
            "PUBLIC STATIC OPERATOR IMPLICIT(value AS LONG) AS Widget"
        );
    }

    #[test]
    fn test_unsupported_operator() {
        let member = MemberDescriptor::operator("Concatenate");
        let generator = XSharpSyntaxGenerator::new();
        let mut writer = TokenWriter::new();
        generator.write_syntax(&member, &mut writer).unwrap();
        assert_eq!(writer.messages(), vec!["UnsupportedOperator_XSharp"]);
    }

    #[test]
    fn test_self_indexer() {
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
            "PUBLIC PROPERTY SELF[index AS LONG] AS STRING GET"
        );
    }

    #[test]
    fn test_property_accessor_keywords() {
        let member = MemberDescriptor::property("Count").with_return_type(int32());
        assert_eq!(render(&member), "PUBLIC PROPERTY Count AS LONG GET SET");
    }

    #[test]
    fn test_namespace_form() {
        let member = MemberDescriptor::namespace("System.Collections");
        assert_eq!(render(&member), "BEGIN NAMESPACE System.Collections");
    }

    #[test]
    fn test_explicit_interface_implementation() {
        let member = MemberDescriptor::method("Dispose")
            .with_visibility(Visibility::Private)
            .with_explicit_implementation(TypeReference::named("System.IDisposable"), "Dispose");
        assert_eq!(render(&member), "METHOD IDisposable.Dispose() AS VOID");
    }
}
