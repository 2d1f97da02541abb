//! C# declaration syntax.

use crate::config::GeneratorConfig;
use crate::error::{DeclgenError, Result};
use crate::model::{
    ArgumentValue, AttributeApplication, GenericParameter, MemberDescriptor, ParameterDescriptor,
    TypeReference, Variance, Visibility,
};
use crate::writer::SyntaxWriter;

use super::shared::{
    all_rendered_attributes, attribute_display_name, literal_text, unsupported,
    write_with_line_break_if_needed, LiteralStyle,
};
use super::{Language, SyntaxGenerator};

/// Keyword substitution for the CLR primitive type names.
fn primitive_name(full_name: &str) -> Option<&'static str> {
    match full_name {
        "System.Void" => Some("void"),
        "System.Boolean" => Some("bool"),
        "System.Byte" => Some("byte"),
        "System.SByte" => Some("sbyte"),
        "System.Char" => Some("char"),
        "System.Int16" => Some("short"),
        "System.Int32" => Some("int"),
        "System.Int64" => Some("long"),
        "System.UInt16" => Some("ushort"),
        "System.UInt32" => Some("uint"),
        "System.UInt64" => Some("ulong"),
        "System.Single" => Some("float"),
        "System.Double" => Some("double"),
        "System.Decimal" => Some("decimal"),
        "System.String" => Some("string"),
        "System.Object" => Some("object"),
        _ => None,
    }
}

/// Operator name to token mapping. Names absent here have no C# equivalent
/// and fall back to the unsupported-operator placeholder.
fn operator_token(name: &str) -> Option<&'static str> {
    match name {
        "UnaryPlus" => Some("+"),
        "UnaryNegation" => Some("-"),
        "Increment" => Some("++"),
        "Decrement" => Some("--"),
        "LogicalNot" => Some("!"),
        "True" => Some("true"),
        "False" => Some("false"),
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
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct CSharpSyntaxGenerator {
    render_references: bool,
}

impl CSharpSyntaxGenerator {
    pub fn new() -> Self {
        CSharpSyntaxGenerator {
            render_references: true,
        }
    }

    fn write_visibility(&self, visibility: Visibility, writer: &mut dyn SyntaxWriter) {
        let keyword = match visibility {
            Visibility::Public => "public",
            Visibility::Family => "protected",
            Visibility::FamilyOrAssembly => "protected internal",
            Visibility::FamilyAndAssembly => "private protected",
            Visibility::Assembly => "internal",
            Visibility::Private => "private",
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
                writer.write_string("*");
            }
            // The by-ref marker renders as a parameter keyword, not as part
            // of the type.
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
            ArgumentValue::Null => writer.write_keyword("null"),
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
                writer.write_literal(&literal_text(literal, LiteralStyle::CSharpFamily));
            }
            ArgumentValue::ArrayPlaceholder => writer.write_string("..."),
        }
    }

    fn write_attribute(&self, attribute: &AttributeApplication, writer: &mut dyn SyntaxWriter) {
        writer.write_string("[");
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
        writer.write_string("]");
        writer.write_line();
    }

    fn write_attributes(&self, member: &MemberDescriptor, writer: &mut dyn SyntaxWriter) {
        for attribute in all_rendered_attributes(member) {
            self.write_attribute(&attribute, writer);
        }
    }

    fn write_generic_parameters(
        &self,
        parameters: &[GenericParameter],
        include_variance: bool,
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
            if include_variance {
                match parameter.variance {
                    Variance::Covariant => {
                        writer.write_keyword("out");
                        writer.write_string(" ");
                    }
                    Variance::Contravariant => {
                        writer.write_keyword("in");
                        writer.write_string(" ");
                    }
                    Variance::None => {}
                }
            }
            writer.write_identifier(&parameter.name);
        }
        writer.write_string(">");
    }

    fn write_generic_constraints(
        &self,
        parameters: &[GenericParameter],
        writer: &mut dyn SyntaxWriter,
    ) {
        for parameter in parameters.iter().filter(|p| p.has_constraints()) {
            writer.write_line();
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
                writer.write_keyword("class");
            }
            if parameter.constrain_value_type {
                separate(writer, &mut first);
                writer.write_keyword("struct");
            }
            for constraint in &parameter.type_constraints {
                separate(writer, &mut first);
                self.write_type(constraint, writer);
            }
            if parameter.constrain_default_constructor && !parameter.constrain_value_type {
                separate(writer, &mut first);
                writer.write_keyword("new");
                writer.write_string("()");
            }
        }
    }

    fn write_parameter(
        &self,
        parameter: &ParameterDescriptor,
        is_extension_receiver: bool,
        writer: &mut dyn SyntaxWriter,
    ) {
        if is_extension_receiver {
            writer.write_keyword("this");
            writer.write_string(" ");
        }
        if parameter.is_params {
            writer.write_keyword("params");
            writer.write_string(" ");
        }
        if parameter.is_out {
            writer.write_keyword("out");
            writer.write_string(" ");
        } else if parameter.is_by_reference() {
            writer.write_keyword("ref");
            writer.write_string(" ");
        } else if parameter.is_in {
            writer.write_keyword("in");
            writer.write_string(" ");
        }
        self.write_type(&parameter.parameter_type, writer);
        writer.write_string(" ");
        writer.write_parameter(&parameter.name);
        if parameter.is_optional {
            if let Some(default) = &parameter.default_value {
                writer.write_string(" = ");
                writer.write_literal(&literal_text(default, LiteralStyle::CSharpFamily));
            }
        }
    }

    fn write_parameters(&self, member: &MemberDescriptor, writer: &mut dyn SyntaxWriter) {
        writer.write_string("(");
        for (index, parameter) in member.parameters.iter().enumerate() {
            if index > 0 {
                writer.write_string(", ");
                write_with_line_break_if_needed(writer, parameter.name.len() + 12, "\t");
            }
            let is_receiver = index == 0 && member.is_extension;
            self.write_parameter(parameter, is_receiver, writer);
        }
        if member.is_varargs {
            if !member.parameters.is_empty() {
                writer.write_string(", ");
            }
            writer.write_keyword("__arglist");
        }
        writer.write_string(")");
    }

    fn write_member_modifiers(&self, member: &MemberDescriptor, writer: &mut dyn SyntaxWriter) {
        if member.is_static {
            writer.write_keyword("static");
            writer.write_string(" ");
        } else if member.is_abstract {
            writer.write_keyword("abstract");
            writer.write_string(" ");
        } else if member.is_override {
            if member.is_final {
                writer.write_keyword("sealed");
                writer.write_string(" ");
            }
            writer.write_keyword("override");
            writer.write_string(" ");
        } else if member.is_virtual && !member.is_final {
            writer.write_keyword("virtual");
            writer.write_string(" ");
        }
    }

    fn write_base_list(&self, member: &MemberDescriptor, writer: &mut dyn SyntaxWriter) {
        let Some(type_data) = &member.type_data else {
            return;
        };
        let mut entries: Vec<&TypeReference> = Vec::new();
        if let Some(base) = &type_data.base_type {
            if base.full_name() != "System.Object" {
                entries.push(base);
            }
        }
        entries.extend(type_data.implemented_interfaces.iter());
        if entries.is_empty() {
            return;
        }
        writer.write_string(" : ");
        for (index, entry) in entries.iter().enumerate() {
            if index > 0 {
                writer.write_string(", ");
                write_with_line_break_if_needed(writer, 12, "\t");
            }
            self.write_type(entry, writer);
        }
    }
}

impl SyntaxGenerator for CSharpSyntaxGenerator {
    fn language(&self) -> Language {
        Language::CSharp
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
        self.write_visibility(member.visibility, writer);
        if member.is_static_class() {
            writer.write_keyword("static");
            writer.write_string(" ");
        } else if member.is_abstract {
            writer.write_keyword("abstract");
            writer.write_string(" ");
        } else if member.is_sealed {
            writer.write_keyword("sealed");
            writer.write_string(" ");
        }
        writer.write_keyword("class");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        self.write_generic_parameters(&member.generic_parameters, false, writer);
        self.write_base_list(member, writer);
        self.write_generic_constraints(&member.generic_parameters, writer);
        Ok(())
    }

    fn write_structure_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        self.write_visibility(member.visibility, writer);
        writer.write_keyword("struct");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        self.write_generic_parameters(&member.generic_parameters, false, writer);
        self.write_base_list(member, writer);
        self.write_generic_constraints(&member.generic_parameters, writer);
        Ok(())
    }

    fn write_interface_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        self.write_visibility(member.visibility, writer);
        writer.write_keyword("interface");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        self.write_generic_parameters(&member.generic_parameters, true, writer);
        self.write_base_list(member, writer);
        self.write_generic_constraints(&member.generic_parameters, writer);
        Ok(())
    }

    fn write_delegate_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        self.write_visibility(member.visibility, writer);
        writer.write_keyword("delegate");
        writer.write_string(" ");
        match &member.return_type {
            Some(return_type) if !member.returns_void() => self.write_type(return_type, writer),
            _ => writer.write_keyword("void"),
        }
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        self.write_generic_parameters(&member.generic_parameters, true, writer);
        self.write_parameters(member, writer);
        self.write_generic_constraints(&member.generic_parameters, writer);
        Ok(())
    }

    fn write_enumeration_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        self.write_visibility(member.visibility, writer);
        writer.write_keyword("enum");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        if let Some(type_data) = &member.type_data {
            if let Some(base) = &type_data.base_type {
                if base.full_name() != "System.Int32" && base.full_name() != "System.Enum" {
                    writer.write_string(" : ");
                    self.write_type(base, writer);
                }
            }
        }
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
            self.write_visibility(member.visibility, writer);
        }
        let type_name = member.containing_type_name().to_string();
        writer.write_identifier(&type_name);
        self.write_parameters(member, writer);
        Ok(())
    }

    fn write_method_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        if let Some(explicit) = member.explicit_implementations.first() {
            match &member.return_type {
                Some(return_type) if !member.returns_void() => {
                    self.write_type(return_type, writer)
                }
                _ => writer.write_keyword("void"),
            }
            writer.write_string(" ");
            self.write_type(&explicit.contract, writer);
            writer.write_string(".");
            writer.write_identifier(&explicit.member_name);
        } else {
            self.write_visibility(member.visibility, writer);
            self.write_member_modifiers(member, writer);
            match &member.return_type {
                Some(return_type) if !member.returns_void() => {
                    self.write_type(return_type, writer)
                }
                _ => writer.write_keyword("void"),
            }
            writer.write_string(" ");
            writer.write_identifier(&member.name);
        }
        self.write_generic_parameters(&member.generic_parameters, false, writer);
        self.write_parameters(member, writer);
        self.write_generic_constraints(&member.generic_parameters, writer);
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
        writer.write_string(" ");
        writer.write_keyword("static");
        writer.write_string(" ");
        match &member.return_type {
            Some(return_type) if !member.returns_void() => self.write_type(return_type, writer),
            _ => writer.write_keyword("void"),
        }
        writer.write_string(" ");
        writer.write_keyword("operator");
        writer.write_string(" ");
        writer.write_string(token);
        self.write_parameters(member, writer);
        Ok(())
    }

    fn write_cast_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        let keyword = match member.name.as_str() {
            "Implicit" => "implicit",
            "Explicit" => "explicit",
            other => {
                return Err(DeclgenError::malformed_member(
                    other,
                    "cast member must be named Implicit or Explicit",
                ));
            }
        };
        self.write_attributes(member, writer);
        writer.write_keyword("public");
        writer.write_string(" ");
        writer.write_keyword("static");
        writer.write_string(" ");
        writer.write_keyword(keyword);
        writer.write_string(" ");
        writer.write_keyword("operator");
        writer.write_string(" ");
        if let Some(target) = &member.return_type {
            self.write_type(target, writer);
        }
        self.write_parameters(member, writer);
        Ok(())
    }

    fn write_property_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        let explicit = member.explicit_implementations.first();
        if explicit.is_none() {
            self.write_visibility(member.visibility, writer);
            self.write_member_modifiers(member, writer);
        }
        match &member.return_type {
            Some(return_type) => self.write_type(return_type, writer),
            None => writer.write_keyword("void"),
        }
        writer.write_string(" ");
        if let Some(explicit) = explicit {
            self.write_type(&explicit.contract, writer);
            writer.write_string(".");
        }
        if member.parameters.is_empty() {
            let name = explicit
                .map(|e| e.member_name.clone())
                .unwrap_or_else(|| member.name.clone());
            writer.write_identifier(&name);
        } else {
            // Parameterized properties always render as indexers.
            writer.write_keyword("this");
            writer.write_string("[");
            for (index, parameter) in member.parameters.iter().enumerate() {
                if index > 0 {
                    writer.write_string(", ");
                }
                self.write_parameter(parameter, false, writer);
            }
            writer.write_string("]");
        }
        writer.write_string(" { ");
        if let Some(property) = &member.property_data {
            if property.has_getter {
                if let Some(accessor_visibility) = property.getter_visibility {
                    self.write_visibility(accessor_visibility, writer);
                }
                writer.write_keyword("get");
                writer.write_string("; ");
            }
            if property.has_setter {
                if let Some(accessor_visibility) = property.setter_visibility {
                    self.write_visibility(accessor_visibility, writer);
                }
                writer.write_keyword("set");
                writer.write_string("; ");
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
        let explicit = member.explicit_implementations.first();
        if explicit.is_none() {
            self.write_visibility(member.visibility, writer);
            self.write_member_modifiers(member, writer);
        }
        writer.write_keyword("event");
        writer.write_string(" ");
        if let Some(event) = &member.event_data {
            self.write_type(&event.handler_type, writer);
            writer.write_string(" ");
        }
        if let Some(explicit) = explicit {
            self.write_type(&explicit.contract, writer);
            writer.write_string(".");
            writer.write_identifier(&explicit.member_name);
        } else {
            writer.write_identifier(&member.name);
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
            writer.write_keyword("const");
            writer.write_string(" ");
        } else {
            if member.is_static {
                writer.write_keyword("static");
                writer.write_string(" ");
            }
            if field.is_init_only {
                writer.write_keyword("readonly");
                writer.write_string(" ");
            }
            if field.is_volatile {
                writer.write_keyword("volatile");
                writer.write_string(" ");
            }
        }
        if let Some(buffer) = &field.fixed_buffer {
            writer.write_keyword("fixed");
            writer.write_string(" ");
            self.write_type(&buffer.element_type, writer);
            writer.write_string(" ");
            writer.write_identifier(&member.name);
            writer.write_string("[");
            writer.write_literal(&buffer.size.to_string());
            writer.write_string("]");
            return Ok(());
        }
        if let Some(field_type) = &member.return_type {
            self.write_type(field_type, writer);
            writer.write_string(" ");
        }
        writer.write_identifier(&member.name);
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
    use crate::model::{FieldData, LiteralValue, PropertyData, Subgroup, TypeData, TypeInfo};
    use crate::writer::TokenWriter;
    use pretty_assertions::assert_eq;

    fn render(member: &MemberDescriptor) -> String {
        let generator = CSharpSyntaxGenerator::new();
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
        assert_eq!(render(&member), "public static int Add(int a, int b)");
    }

    #[test]
    fn test_visibility_table() {
        let expectations = [
            (Visibility::Public, "public"),
            (Visibility::Family, "protected"),
            (Visibility::FamilyOrAssembly, "protected internal"),
            (Visibility::FamilyAndAssembly, "private protected"),
            (Visibility::Assembly, "internal"),
            (Visibility::Private, "private"),
        ];
        for (visibility, keyword) in expectations {
            let member = MemberDescriptor::method("M").with_visibility(visibility);
            assert_eq!(render(&member), format!("{keyword} void M()"));
        }
    }

    #[test]
    fn test_operator_table() {
        let expectations = [
            ("Addition", "+"),
            ("Subtraction", "-"),
            ("Multiply", "*"),
            ("Division", "/"),
            ("Modulus", "%"),
            ("Equality", "=="),
            ("Inequality", "!="),
            ("LessThan", "<"),
            ("GreaterThanOrEqual", ">="),
            ("OnesComplement", "~"),
            ("LeftShift", "<<"),
        ];
        for (name, token) in expectations {
            let member = MemberDescriptor::operator(name)
                .with_return_type(int32())
                .with_parameter(ParameterDescriptor::new("value", int32()));
            assert_eq!(
                render(&member),
                format!("public static int operator {token}(int value)")
            );
        }
    }

    #[test]
    fn test_unsupported_operator_placeholder() {
        let member = MemberDescriptor::operator("Concatenate");
        let generator = CSharpSyntaxGenerator::new();
        let mut writer = TokenWriter::new();
        generator.write_syntax(&member, &mut writer).unwrap();
        assert!(writer.is_balanced());
        assert_eq!(writer.messages(), vec!["UnsupportedOperator_CSharp"]);
        assert_eq!(writer.text(), "UnsupportedOperator_CSharp");
    }

    #[test]
    fn test_cast_rendering() {
        let member = MemberDescriptor::cast("Implicit")
            .with_return_type(TypeReference::named("My.Widget"))
            .with_parameter(ParameterDescriptor::new("value", int32()));
        assert_eq!(
            render(&member),
            "public static implicit operator Widget(int value)"
        );
    }

    #[test]
    fn test_malformed_cast_is_an_error() {
        let member = MemberDescriptor::cast("Sideways");
        let generator = CSharpSyntaxGenerator::new();
        let mut writer = TokenWriter::new();
        let result = generator.write_syntax(&member, &mut writer);
        assert!(matches!(
            result,
            Err(DeclgenError::MalformedMember { .. })
        ));
        // Even on the error path the block is closed again.
        assert!(writer.is_balanced());
    }

    #[test]
    fn test_static_class_renders_static() {
        let member = MemberDescriptor::class("Helpers").with_abstract().with_sealed();
        assert_eq!(render(&member), "public static class Helpers");
    }

    #[test]
    fn test_class_with_base_and_interfaces() {
        let member = MemberDescriptor::class("Widget").with_type_data(TypeData {
            base_type: Some(TypeReference::named("System.ComponentModel.Component")),
            implemented_interfaces: vec![TypeReference::named("System.IDisposable")],
            ..Default::default()
        });
        assert_eq!(render(&member), "public class Widget : Component, IDisposable");
    }

    #[test]
    fn test_generic_interface_variance_and_constraints() {
        let mut covariant = GenericParameter::new("T");
        covariant.variance = Variance::Covariant;
        covariant.constrain_reference_type = true;
        covariant.constrain_default_constructor = true;
        let member = MemberDescriptor::interface("IProducer").with_generic_parameter(covariant);
        assert_eq!(
            render(&member),
            "public interface IProducer<out T>\nwhere T : class, new()"
        );
    }

    #[test]
    fn test_explicit_interface_implementation() {
        let member = MemberDescriptor::method("Dispose")
            .with_visibility(Visibility::Private)
            .with_explicit_implementation(TypeReference::named("System.IDisposable"), "Dispose");
        assert_eq!(render(&member), "void IDisposable.Dispose()");
    }

    #[test]
    fn test_indexer_form_for_parameterized_property() {
        let member = MemberDescriptor::property("Item")
            .with_return_type(TypeReference::named("System.String"))
            .with_parameter(ParameterDescriptor::new("index", int32()));
        let text = render(&member);
        assert!(text.contains("this[int index]"), "got: {text}");
        assert!(!text.contains("Item"), "got: {text}");
    }

    #[test]
    fn test_private_getter_qualifier() {
        let member = MemberDescriptor::property("Count")
            .with_return_type(int32())
            .with_property_data(PropertyData {
                has_getter: true,
                has_setter: false,
                getter_visibility: Some(Visibility::Private),
                ..Default::default()
            });
        let text = render(&member);
        assert!(text.contains("{ private get; }"), "got: {text}");
        assert!(!text.contains("set"), "got: {text}");
    }

    #[test]
    fn test_literal_field_renders_value_inline() {
        let member = MemberDescriptor::field("Answer", int32())
            .with_static()
            .with_field_data(FieldData {
                is_literal: true,
                literal_value: Some(LiteralValue::Integer(42)),
                ..Default::default()
            });
        assert_eq!(render(&member), "public const int Answer = 42");
    }

    #[test]
    fn test_fixed_buffer_field() {
        let member = MemberDescriptor::field("buffer", TypeReference::named("System.Byte"))
            .with_field_data(FieldData {
                fixed_buffer: Some(crate::model::FixedBufferData {
                    element_type: TypeReference::named("System.Byte"),
                    size: 16,
                }),
                ..Default::default()
            });
        assert_eq!(render(&member), "public fixed byte buffer[16]");
    }

    #[test]
    fn test_extension_method_receiver() {
        let member = MemberDescriptor::method("Reverse")
            .with_static()
            .with_return_type(TypeReference::named("System.String"))
            .with_parameter(ParameterDescriptor::new(
                "value",
                TypeReference::named("System.String"),
            ));
        let mut extension = member.clone();
        extension.is_extension = true;
        assert_eq!(
            render(&extension),
            "public static string Reverse(this string value)"
        );
    }

    #[test]
    fn test_out_and_ref_parameters() {
        let member = MemberDescriptor::method("TryParse")
            .with_static()
            .with_return_type(TypeReference::named("System.Boolean"))
            .with_parameter(ParameterDescriptor::new(
                "text",
                TypeReference::named("System.String"),
            ))
            .with_parameter(ParameterDescriptor::out("result", int32()));
        assert_eq!(
            render(&member),
            "public static bool TryParse(string text, out int result)"
        );
    }

    #[test]
    fn test_interop_attributes_render_first() {
        let mut member = MemberDescriptor::method("MessageBox")
            .with_static()
            .with_return_type(int32());
        member.interop.dll_import = Some(crate::model::DllImportData {
            module_name: "user32.dll".into(),
            set_last_error: true,
            ..Default::default()
        });
        member = member.with_attribute(AttributeApplication::new("System.ObsoleteAttribute"));
        let text = render(&member);
        let dll_import = text.find("DllImport").unwrap();
        let obsolete = text.find("Obsolete").unwrap();
        assert!(dll_import < obsolete, "got: {text}");
        assert!(text.contains("\"user32.dll\""), "got: {text}");
        assert!(text.contains("SetLastError = true"), "got: {text}");
    }

    #[test]
    fn test_idempotent_rendering() {
        let member = MemberDescriptor::method("Add")
            .with_static()
            .with_return_type(int32())
            .with_parameter(ParameterDescriptor::new("a", int32()));
        assert_eq!(render(&member), render(&member));
    }

    #[test]
    fn test_delegate_with_variance() {
        let mut contravariant = GenericParameter::new("T");
        contravariant.variance = Variance::Contravariant;
        let member = MemberDescriptor::delegate("Handler")
            .with_generic_parameter(contravariant)
            .with_parameter(ParameterDescriptor::new(
                "input",
                TypeReference::template("T"),
            ));
        assert_eq!(render(&member), "public delegate void Handler<in T>(T input)");
    }

    #[test]
    fn test_namespace_syntax() {
        let member = MemberDescriptor::namespace("System.Collections");
        assert_eq!(render(&member), "namespace System.Collections");
    }

    #[test]
    fn test_static_constructor() {
        let mut member = MemberDescriptor::constructor("My.Widget");
        member.is_static = true;
        assert_eq!(render(&member), "static Widget()");
    }

    #[test]
    fn test_unsafe_pointer_signature_renders() {
        let member = MemberDescriptor::method("Read")
            .with_return_type(TypeReference::named("System.Void"))
            .with_parameter(ParameterDescriptor::new(
                "source",
                TypeReference::pointer(TypeReference::named("System.Byte")),
            ));
        assert_eq!(render(&member), "public void Read(byte* source)");
    }

    #[test]
    fn test_event_declaration() {
        let member = MemberDescriptor::event(
            "Click",
            TypeReference::named("System.EventHandler"),
        );
        assert_eq!(render(&member), "public event EventHandler Click");
    }

    #[test]
    fn test_property_info_unused_type_facts_do_not_change_rendering() {
        let mut member = MemberDescriptor::property("Count").with_return_type(int32());
        member.containing_type_info = Some(TypeInfo::new("My.Widget"));
        member.containing_type_subgroup = Some(Subgroup::Class);
        assert_eq!(render(&member), "public int Count { get; set; }");
    }
}
