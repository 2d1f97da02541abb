//! F# signature-style declaration syntax.

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
        "System.Void" => Some("unit"),
        "System.Boolean" => Some("bool"),
        "System.Byte" => Some("byte"),
        "System.SByte" => Some("sbyte"),
        "System.Char" => Some("char"),
        "System.Int16" => Some("int16"),
        "System.Int32" => Some("int"),
        "System.Int64" => Some("int64"),
        "System.UInt16" => Some("uint16"),
        "System.UInt32" => Some("uint32"),
        "System.UInt64" => Some("uint64"),
        "System.Single" => Some("float32"),
        "System.Double" => Some("float"),
        "System.Decimal" => Some("decimal"),
        "System.String" => Some("string"),
        "System.Object" => Some("obj"),
        _ => None,
    }
}

/// Overloadable operator symbols. OnesComplement, Increment and Decrement
/// have no operator definition form and render as placeholders.
fn operator_token(name: &str) -> Option<&'static str> {
    match name {
        "UnaryPlus" => Some("+"),
        "UnaryNegation" => Some("-"),
        "Addition" => Some("+"),
        "Subtraction" => Some("-"),
        "Multiply" => Some("*"),
        "Division" => Some("/"),
        "Modulus" => Some("%"),
        "BitwiseAnd" => Some("&&&"),
        "BitwiseOr" => Some("|||"),
        "ExclusiveOr" => Some("^^^"),
        "LeftShift" => Some("<<<"),
        "RightShift" => Some(">>>"),
        "Equality" => Some("="),
        "Inequality" => Some("<>"),
        "LessThan" => Some("<"),
        "GreaterThan" => Some(">"),
        "LessThanOrEqual" => Some("<="),
        "GreaterThanOrEqual" => Some(">="),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct FSharpSyntaxGenerator {
    render_references: bool,
}

impl FSharpSyntaxGenerator {
    pub fn new() -> Self {
        FSharpSyntaxGenerator {
            render_references: true,
        }
    }

    /// Only assembly and private visibility have a spelling in signatures;
    /// public and family render nothing.
    fn write_visibility(&self, visibility: Visibility, writer: &mut dyn SyntaxWriter) {
        match visibility {
            Visibility::Assembly | Visibility::FamilyOrAssembly | Visibility::FamilyAndAssembly => {
                writer.write_keyword("internal");
                writer.write_string(" ");
            }
            Visibility::Private => {
                writer.write_keyword("private");
                writer.write_string(" ");
            }
            Visibility::Public | Visibility::Family => {}
        }
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
                writer.write_keyword("nativeptr");
                writer.write_string("<");
                self.write_type(inner, writer);
                writer.write_string(">");
            }
            TypeReference::Reference(inner) => {
                self.write_type(inner, writer);
                writer.write_string(" ");
                writer.write_keyword("byref");
            }
            TypeReference::Template(name) => {
                writer.write_string("'");
                writer.write_identifier(name);
            }
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
            ArgumentValue::Null => writer.write_keyword("null"),
            ArgumentValue::TypeLiteral(reference) => {
                writer.write_keyword("typeof");
                writer.write_string("<");
                self.write_type(reference, writer);
                writer.write_string(">");
            }
            ArgumentValue::EnumMembers { enum_type, members } => {
                for (index, member) in members.iter().enumerate() {
                    if index > 0 {
                        writer.write_string("|||");
                    }
                    let display = enum_type.display_name().to_string();
                    writer.write_identifier(&display);
                    writer.write_string(".");
                    writer.write_identifier(member);
                }
            }
            ArgumentValue::Literal(literal) => {
                writer.write_literal(&literal_text(literal, LiteralStyle::CSharpFamily));
            }
            ArgumentValue::ArrayPlaceholder => writer.write_string("..."),
        }
    }

    fn write_attribute(&self, attribute: &AttributeApplication, writer: &mut dyn SyntaxWriter) {
        writer.write_string("[<");
        let display = attribute_display_name(attribute);
        if self.render_references {
            writer
                .write_reference_link_with_text(attribute.attribute_type.full_name(), &display);
        } else {
            writer.write_identifier(&display);
        }
        if !attribute.positional_arguments.is_empty() || !attribute.named_arguments.is_empty() {
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
        writer.write_string(">]");
        writer.write_line();
    }

    fn write_attributes(&self, member: &MemberDescriptor, writer: &mut dyn SyntaxWriter) {
        for attribute in all_rendered_attributes(member) {
            self.write_attribute(&attribute, writer);
        }
    }

    /// Abstractness and sealedness have no keyword form; they surface as
    /// synthesized pseudo-attributes above the type.
    fn write_pseudo_attributes(&self, member: &MemberDescriptor, writer: &mut dyn SyntaxWriter) {
        if member.is_abstract {
            writer.write_string("[<");
            writer.write_identifier("AbstractClassAttribute");
            writer.write_string(">]");
            writer.write_line();
        }
        if member.is_sealed {
            writer.write_string("[<");
            writer.write_identifier("SealedAttribute");
            writer.write_string(">]");
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
            writer.write_string("'");
            writer.write_identifier(&parameter.name);
        }
        writer.write_string(">");
    }

    /// Curried signature form: `a : int * b : int -> int`, `unit -> int`
    /// when there are no parameters.
    fn write_signature(&self, member: &MemberDescriptor, writer: &mut dyn SyntaxWriter) {
        if member.parameters.is_empty() {
            writer.write_keyword("unit");
        } else {
            for (index, parameter) in member.parameters.iter().enumerate() {
                if index > 0 {
                    writer.write_string(" * ");
                }
                self.write_signature_parameter(parameter, writer);
            }
        }
        writer.write_string(" -> ");
        match &member.return_type {
            Some(return_type) if !member.returns_void() => self.write_type(return_type, writer),
            _ => writer.write_keyword("unit"),
        }
    }

    fn write_signature_parameter(
        &self,
        parameter: &ParameterDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) {
        writer.write_parameter(&parameter.name);
        writer.write_string(" : ");
        self.write_type(&parameter.parameter_type, writer);
    }
}

impl SyntaxGenerator for FSharpSyntaxGenerator {
    fn language(&self) -> Language {
        Language::FSharp
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
        writer.write_identifier(&member.name);
        Ok(())
    }

    fn write_class_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        self.write_pseudo_attributes(member, writer);
        writer.write_keyword("type");
        writer.write_string(" ");
        self.write_visibility(member.visibility, writer);
        writer.write_identifier(&member.name);
        self.write_generic_parameters(&member.generic_parameters, writer);
        writer.write_string(" = ");
        writer.write_keyword("class");
        if let Some(type_data) = &member.type_data {
            if let Some(base) = &type_data.base_type {
                if base.full_name() != "System.Object" {
                    writer.write_line();
                    writer.write_keyword("inherit");
                    writer.write_string(" ");
                    self.write_type(base, writer);
                }
            }
            for interface in &type_data.implemented_interfaces {
                writer.write_line();
                writer.write_keyword("interface");
                writer.write_string(" ");
                self.write_type(interface, writer);
            }
        }
        writer.write_line();
        writer.write_keyword("end");
        Ok(())
    }

    fn write_structure_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        writer.write_keyword("type");
        writer.write_string(" ");
        self.write_visibility(member.visibility, writer);
        writer.write_identifier(&member.name);
        self.write_generic_parameters(&member.generic_parameters, writer);
        writer.write_string(" = ");
        writer.write_keyword("struct");
        if let Some(type_data) = &member.type_data {
            for interface in &type_data.implemented_interfaces {
                writer.write_line();
                writer.write_keyword("interface");
                writer.write_string(" ");
                self.write_type(interface, writer);
            }
        }
        writer.write_line();
        writer.write_keyword("end");
        Ok(())
    }

    fn write_interface_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        writer.write_keyword("type");
        writer.write_string(" ");
        self.write_visibility(member.visibility, writer);
        writer.write_identifier(&member.name);
        self.write_generic_parameters(&member.generic_parameters, writer);
        writer.write_string(" = ");
        writer.write_keyword("interface");
        if let Some(type_data) = &member.type_data {
            for interface in &type_data.implemented_interfaces {
                writer.write_line();
                writer.write_keyword("inherit");
                writer.write_string(" ");
                self.write_type(interface, writer);
            }
        }
        writer.write_line();
        writer.write_keyword("end");
        Ok(())
    }

    fn write_delegate_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        writer.write_keyword("type");
        writer.write_string(" ");
        self.write_visibility(member.visibility, writer);
        writer.write_identifier(&member.name);
        self.write_generic_parameters(&member.generic_parameters, writer);
        writer.write_string(" = ");
        writer.write_keyword("delegate");
        writer.write_string(" ");
        writer.write_keyword("of");
        writer.write_string(" ");
        if member.parameters.is_empty() {
            writer.write_keyword("unit");
        } else {
            for (index, parameter) in member.parameters.iter().enumerate() {
                if index > 0 {
                    writer.write_string(" * ");
                }
                self.write_type(&parameter.parameter_type, writer);
            }
        }
        writer.write_string(" -> ");
        match &member.return_type {
            Some(return_type) if !member.returns_void() => self.write_type(return_type, writer),
            _ => writer.write_keyword("unit"),
        }
        Ok(())
    }

    fn write_enumeration_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        writer.write_keyword("type");
        writer.write_string(" ");
        self.write_visibility(member.visibility, writer);
        writer.write_identifier(&member.name);
        Ok(())
    }

    fn write_constructor_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        writer.write_keyword("new");
        writer.write_string(" : ");
        self.write_signature(member, writer);
        Ok(())
    }

    fn write_method_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        if member.has_unsafe_signature() {
            unsupported(writer, "Unsafe", self.language());
            return Ok(());
        }
        if member.is_varargs {
            unsupported(writer, "Varargs", self.language());
            return Ok(());
        }
        self.write_attributes(member, writer);
        if member.is_abstract {
            writer.write_keyword("abstract");
            writer.write_string(" ");
        } else {
            if member.is_static {
                writer.write_keyword("static");
                writer.write_string(" ");
            }
            if member.is_override {
                writer.write_keyword("override");
            } else {
                writer.write_keyword("member");
            }
            writer.write_string(" ");
        }
        self.write_visibility(member.visibility, writer);
        if let Some(explicit) = member.explicit_implementations.first() {
            self.write_type(&explicit.contract, writer);
            writer.write_string(".");
            writer.write_identifier(&explicit.member_name);
        } else {
            writer.write_identifier(&member.name);
        }
        writer.write_string(" : ");
        self.write_signature(member, writer);
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
        writer.write_keyword("let");
        writer.write_string(" ");
        writer.write_keyword("inline");
        writer.write_string(" ");
        writer.write_string("(");
        writer.write_string(token);
        writer.write_string(")");
        for parameter in &member.parameters {
            writer.write_string(" (");
            self.write_signature_parameter(parameter, writer);
            writer.write_string(")");
        }
        writer.write_string(" : ");
        match &member.return_type {
            Some(return_type) if !member.returns_void() => self.write_type(return_type, writer),
            _ => writer.write_keyword("unit"),
        }
        Ok(())
    }

    fn write_cast_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        let name = match member.name.as_str() {
            "Implicit" => "op_Implicit",
            "Explicit" => "op_Explicit",
            other => {
                return Err(DeclgenError::malformed_member(
                    other,
                    "cast member must be named Implicit or Explicit",
                ));
            }
        };
        self.write_attributes(member, writer);
        writer.write_keyword("static");
        writer.write_string(" ");
        writer.write_keyword("member");
        writer.write_string(" ");
        writer.write_identifier(name);
        writer.write_string(" : ");
        self.write_signature(member, writer);
        Ok(())
    }

    fn write_property_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        if member.has_unsafe_signature() {
            unsupported(writer, "Unsafe", self.language());
            return Ok(());
        }
        self.write_attributes(member, writer);
        if member.is_abstract {
            writer.write_keyword("abstract");
            writer.write_string(" ");
        } else {
            if member.is_static {
                writer.write_keyword("static");
                writer.write_string(" ");
            }
            if member.is_override {
                writer.write_keyword("override");
            } else {
                writer.write_keyword("member");
            }
            writer.write_string(" ");
        }
        self.write_visibility(member.visibility, writer);
        writer.write_identifier(&member.name);
        writer.write_string(" : ");
        match &member.return_type {
            Some(return_type) => self.write_type(return_type, writer),
            None => writer.write_keyword("unit"),
        }
        if let Some(property) = &member.property_data {
            writer.write_string(" ");
            writer.write_keyword("with");
            writer.write_string(" ");
            match (property.has_getter, property.has_setter) {
                (true, true) => {
                    writer.write_keyword("get");
                    writer.write_string(", ");
                    writer.write_keyword("set");
                }
                (true, false) => writer.write_keyword("get"),
                (false, true) => writer.write_keyword("set"),
                (false, false) => {}
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
        if member.is_static {
            writer.write_keyword("static");
            writer.write_string(" ");
        }
        writer.write_keyword("member");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        writer.write_string(" : ");
        writer.write_keyword("IEvent");
        writer.write_string("<");
        if let Some(event) = &member.event_data {
            self.write_type(&event.handler_type, writer);
        }
        writer.write_string(">");
        Ok(())
    }

    fn write_field_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        if member.has_unsafe_signature() {
            unsupported(writer, "Unsafe", self.language());
            return Ok(());
        }
        self.write_attributes(member, writer);
        let field = member.field_data.clone().unwrap_or_default();
        if member.is_static {
            writer.write_keyword("static");
            writer.write_string(" ");
        }
        writer.write_keyword("val");
        writer.write_string(" ");
        if !field.is_literal && !field.is_init_only {
            writer.write_keyword("mutable");
            writer.write_string(" ");
        }
        self.write_visibility(member.visibility, writer);
        writer.write_identifier(&member.name);
        if let Some(field_type) = &member.return_type {
            writer.write_string(" : ");
            self.write_type(field_type, writer);
        }
        if let Some(value) = &field.literal_value {
            writer.write_string(" = ");
            writer.write_literal(&literal_text(value, LiteralStyle::CSharpFamily));
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
        let generator = FSharpSyntaxGenerator::new();
        let mut writer = TokenWriter::new();
        generator.write_syntax(member, &mut writer).unwrap();
        assert!(writer.is_balanced());
        writer.text()
    }

    fn int32() -> TypeReference {
        TypeReference::named("System.Int32")
    }

    #[test]
    fn test_static_member_signature() {
        let member = MemberDescriptor::method("Add")
            .with_static()
            .with_return_type(int32())
            .with_parameter(ParameterDescriptor::new("a", int32()))
            .with_parameter(ParameterDescriptor::new("b", int32()));
        assert_eq!(render(&member), "static member Add : a : int * b : int -> int");
    }

    #[test]
    fn test_parameterless_method_takes_unit() {
        let member = MemberDescriptor::method("Run");
        assert_eq!(render(&member), "member Run : unit -> unit");
    }

    #[test]
    fn test_addition_operator_is_let_inline() {
        let member = MemberDescriptor::operator("Addition")
            .with_return_type(int32())
            .with_parameter(ParameterDescriptor::new("a", int32()))
            .with_parameter(ParameterDescriptor::new("b", int32()));
        assert_eq!(render(&member), "let inline (+) (a : int) (b : int) : int");
    }

    #[test]
    fn test_ones_complement_has_no_equivalent() {
        let member = MemberDescriptor::operator("OnesComplement");
        let generator = FSharpSyntaxGenerator::new();
        let mut writer = TokenWriter::new();
        generator.write_syntax(&member, &mut writer).unwrap();
        assert_eq!(writer.messages(), vec!["UnsupportedOperator_FSharp"]);
    }

    #[test]
    fn test_abstract_class_pseudo_attribute() {
        let member = MemberDescriptor::class("Shape").with_abstract();
        assert_eq!(
            render(&member),
            "[<AbstractClassAttribute>]\ntype Shape = class\nend"
        );
    }

    #[test]
    fn test_class_inherit_and_interface_clauses() {
        let member = MemberDescriptor::class("Widget").with_type_data(TypeData {
            base_type: Some(TypeReference::named("System.ComponentModel.Component")),
            implemented_interfaces: vec![TypeReference::named("System.IDisposable")],
            ..Default::default()
        });
        assert_eq!(
            render(&member),
            "type Widget = class\ninherit Component\ninterface IDisposable\nend"
        );
    }

    #[test]
    fn test_delegate_of_form() {
        let member = MemberDescriptor::delegate("Handler")
            .with_parameter(ParameterDescriptor::new("value", int32()));
        assert_eq!(render(&member), "type Handler = delegate of int -> unit");
    }

    #[test]
    fn test_internal_visibility_rendered() {
        let member = MemberDescriptor::method("Hidden").with_visibility(Visibility::Assembly);
        assert_eq!(render(&member), "member internal Hidden : unit -> unit");
    }

    #[test]
    fn test_family_visibility_is_omitted() {
        let member = MemberDescriptor::method("OnChange").with_visibility(Visibility::Family);
        assert_eq!(render(&member), "member OnChange : unit -> unit");
    }

    #[test]
    fn test_unsafe_signature_placeholder() {
        let member = MemberDescriptor::method("Read").with_parameter(ParameterDescriptor::new(
            "source",
            TypeReference::pointer(TypeReference::named("System.Byte")),
        ));
        let generator = FSharpSyntaxGenerator::new();
        let mut writer = TokenWriter::new();
        generator.write_syntax(&member, &mut writer).unwrap();
        assert_eq!(writer.messages(), vec!["UnsupportedUnsafe_FSharp"]);
    }

    #[test]
    fn test_property_accessor_suffix() {
        let member = MemberDescriptor::property("Count").with_return_type(int32());
        assert_eq!(render(&member), "member Count : int with get, set");
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
        assert_eq!(render(&member), "static val Answer : int = 42");
    }

    #[test]
    fn test_template_parameters_get_tick() {
        let member = MemberDescriptor::method("Identity")
            .with_return_type(TypeReference::template("T"))
            .with_parameter(ParameterDescriptor::new(
                "value",
                TypeReference::template("T"),
            ));
        assert_eq!(render(&member), "member Identity : value : 'T -> 'T");
    }
}
