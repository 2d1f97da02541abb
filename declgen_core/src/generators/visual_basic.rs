//! Visual Basic declaration syntax.

use crate::config::GeneratorConfig;
use crate::error::{DeclgenError, Result};
use crate::model::{
    ArgumentValue, AttributeApplication, GenericParameter, MemberDescriptor, ParameterDescriptor,
    TypeReference, Variance, Visibility,
};
use crate::writer::SyntaxWriter;

use super::shared::{
    all_rendered_attributes, attribute_display_name, literal_text, unsupported, LiteralStyle,
};
use super::{Language, SyntaxGenerator};

pub(crate) fn primitive_name(full_name: &str) -> Option<&'static str> {
    match full_name {
        "System.Boolean" => Some("Boolean"),
        "System.Byte" => Some("Byte"),
        "System.SByte" => Some("SByte"),
        "System.Char" => Some("Char"),
        "System.Int16" => Some("Short"),
        "System.Int32" => Some("Integer"),
        "System.Int64" => Some("Long"),
        "System.UInt16" => Some("UShort"),
        "System.UInt32" => Some("UInteger"),
        "System.UInt64" => Some("ULong"),
        "System.Single" => Some("Single"),
        "System.Double" => Some("Double"),
        "System.Decimal" => Some("Decimal"),
        "System.String" => Some("String"),
        "System.Object" => Some("Object"),
        _ => None,
    }
}

/// Operator name to Visual Basic token. Increment, Decrement, OnesComplement
/// and Assign have no overload syntax and render as placeholders.
fn operator_token(name: &str) -> Option<&'static str> {
    match name {
        "UnaryPlus" => Some("+"),
        "UnaryNegation" => Some("-"),
        "LogicalNot" => Some("Not"),
        "True" => Some("IsTrue"),
        "False" => Some("IsFalse"),
        "Addition" => Some("+"),
        "Subtraction" => Some("-"),
        "Multiply" => Some("*"),
        "Division" => Some("/"),
        "IntegerDivision" => Some("\\"),
        "Modulus" => Some("Mod"),
        "Exponent" => Some("^"),
        "BitwiseAnd" => Some("And"),
        "BitwiseOr" => Some("Or"),
        "ExclusiveOr" => Some("Xor"),
        "Concatenate" => Some("&"),
        "Like" => Some("Like"),
        "LeftShift" => Some("<<"),
        "RightShift" => Some(">>"),
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
pub struct VisualBasicSyntaxGenerator {
    render_references: bool,
    include_line_continuation: bool,
}

impl VisualBasicSyntaxGenerator {
    pub fn new() -> Self {
        VisualBasicSyntaxGenerator {
            render_references: true,
            include_line_continuation: false,
        }
    }

    /// Classic VB line continuation is ` _` before the break; later compilers
    /// accept a bare break, so the underscore is opt-in.
    fn write_line_break(&self, writer: &mut dyn SyntaxWriter) {
        if self.include_line_continuation {
            writer.write_string(" _");
        }
        writer.write_line();
    }

    fn write_visibility(&self, visibility: Visibility, writer: &mut dyn SyntaxWriter) {
        let keyword = match visibility {
            Visibility::Public => "Public",
            Visibility::Family => "Protected",
            Visibility::FamilyOrAssembly => "Protected Friend",
            Visibility::FamilyAndAssembly => "Private Protected",
            Visibility::Assembly => "Friend",
            Visibility::Private => "Private",
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
                writer.write_string("(");
                for _ in 1..*rank {
                    writer.write_string(",");
                }
                writer.write_string(")");
            }
            // Pointers cannot occur here; unsafe members render a placeholder
            // before type emission is reached.
            TypeReference::Pointer(inner) => self.write_type(inner, writer),
            TypeReference::Reference(inner) => self.write_type(inner, writer),
            TypeReference::Template(name) => writer.write_identifier(name),
            TypeReference::Specialization {
                template,
                arguments,
            } => {
                self.write_type(template, writer);
                writer.write_string("(");
                writer.write_keyword("Of");
                writer.write_string(" ");
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        writer.write_string(", ");
                    }
                    self.write_type(argument, writer);
                }
                writer.write_string(")");
            }
        }
    }

    fn write_attribute_argument(&self, value: &ArgumentValue, writer: &mut dyn SyntaxWriter) {
        match value {
            ArgumentValue::Null => writer.write_keyword("Nothing"),
            ArgumentValue::TypeLiteral(reference) => {
                writer.write_keyword("GetType");
                writer.write_string("(");
                self.write_type(reference, writer);
                writer.write_string(")");
            }
            ArgumentValue::EnumMembers { enum_type, members } => {
                for (index, member) in members.iter().enumerate() {
                    if index > 0 {
                        writer.write_string(" Or ");
                    }
                    let display = enum_type.display_name().to_string();
                    writer.write_identifier(&display);
                    writer.write_string(".");
                    writer.write_identifier(member);
                }
            }
            ArgumentValue::Literal(literal) => {
                writer.write_literal(&literal_text(literal, LiteralStyle::VisualBasic));
            }
            ArgumentValue::ArrayPlaceholder => writer.write_string("..."),
        }
    }

    fn write_attributes(&self, member: &MemberDescriptor, writer: &mut dyn SyntaxWriter) {
        for attribute in all_rendered_attributes(member) {
            self.write_attribute(&attribute, writer);
        }
    }

    fn write_attribute(&self, attribute: &AttributeApplication, writer: &mut dyn SyntaxWriter) {
        writer.write_string("<");
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
                writer.write_string(" := ");
                self.write_attribute_argument(argument, writer);
            }
            writer.write_string(")");
        }
        writer.write_string(">");
        self.write_line_break(writer);
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
        writer.write_string("(");
        writer.write_keyword("Of");
        writer.write_string(" ");
        for (index, parameter) in parameters.iter().enumerate() {
            if index > 0 {
                writer.write_string(", ");
            }
            if include_variance {
                match parameter.variance {
                    Variance::Covariant => {
                        writer.write_keyword("Out");
                        writer.write_string(" ");
                    }
                    Variance::Contravariant => {
                        writer.write_keyword("In");
                        writer.write_string(" ");
                    }
                    Variance::None => {}
                }
            }
            writer.write_identifier(&parameter.name);
            self.write_generic_constraints(parameter, writer);
        }
        writer.write_string(")");
    }

    fn write_generic_constraints(
        &self,
        parameter: &GenericParameter,
        writer: &mut dyn SyntaxWriter,
    ) {
        if !parameter.has_constraints() {
            return;
        }
        writer.write_string(" ");
        writer.write_keyword("As");
        writer.write_string(" ");
        let include_new =
            parameter.constrain_default_constructor && !parameter.constrain_value_type;
        let count = usize::from(parameter.constrain_reference_type)
            + usize::from(parameter.constrain_value_type)
            + parameter.type_constraints.len()
            + usize::from(include_new);
        let braced = count > 1;
        if braced {
            writer.write_string("{");
        }
        let mut first = true;
        let mut separate = |writer: &mut dyn SyntaxWriter, first: &mut bool| {
            if !*first {
                writer.write_string(", ");
            }
            *first = false;
        };
        if parameter.constrain_reference_type {
            separate(writer, &mut first);
            writer.write_keyword("Class");
        }
        if parameter.constrain_value_type {
            separate(writer, &mut first);
            writer.write_keyword("Structure");
        }
        for constraint in &parameter.type_constraints {
            separate(writer, &mut first);
            self.write_type(constraint, writer);
        }
        if include_new {
            separate(writer, &mut first);
            writer.write_keyword("New");
        }
        if braced {
            writer.write_string("}");
        }
    }

    fn write_parameter(&self, parameter: &ParameterDescriptor, writer: &mut dyn SyntaxWriter) {
        if parameter.is_params {
            writer.write_keyword("ParamArray");
            writer.write_string(" ");
        }
        if parameter.is_optional {
            writer.write_keyword("Optional");
            writer.write_string(" ");
        }
        if parameter.is_by_reference() {
            writer.write_keyword("ByRef");
            writer.write_string(" ");
        }
        writer.write_parameter(&parameter.name);
        writer.write_string(" ");
        writer.write_keyword("As");
        writer.write_string(" ");
        self.write_type(&parameter.parameter_type, writer);
        if parameter.is_optional {
            if let Some(default) = &parameter.default_value {
                writer.write_string(" = ");
                writer.write_literal(&literal_text(default, LiteralStyle::VisualBasic));
            }
        }
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

    fn write_member_modifiers(&self, member: &MemberDescriptor, writer: &mut dyn SyntaxWriter) {
        if member.is_static {
            writer.write_keyword("Shared");
            writer.write_string(" ");
        } else if member.is_abstract {
            writer.write_keyword("MustOverride");
            writer.write_string(" ");
        } else if member.is_override {
            if member.is_final {
                writer.write_keyword("NotOverridable");
                writer.write_string(" ");
            }
            writer.write_keyword("Overrides");
            writer.write_string(" ");
        } else if member.is_virtual && !member.is_final {
            writer.write_keyword("Overridable");
            writer.write_string(" ");
        }
    }

    fn write_return(&self, member: &MemberDescriptor, writer: &mut dyn SyntaxWriter) {
        if let Some(return_type) = &member.return_type {
            if !member.returns_void() {
                writer.write_string(" ");
                writer.write_keyword("As");
                writer.write_string(" ");
                self.write_type(return_type, writer);
            }
        }
    }

    fn write_implements_clause(&self, member: &MemberDescriptor, writer: &mut dyn SyntaxWriter) {
        if member.explicit_implementations.is_empty() {
            return;
        }
        writer.write_string(" ");
        writer.write_keyword("Implements");
        writer.write_string(" ");
        for (index, explicit) in member.explicit_implementations.iter().enumerate() {
            if index > 0 {
                writer.write_string(", ");
            }
            self.write_type(&explicit.contract, writer);
            writer.write_string(".");
            writer.write_identifier(&explicit.member_name);
        }
    }

    fn write_type_base_clauses(&self, member: &MemberDescriptor, writer: &mut dyn SyntaxWriter) {
        let Some(type_data) = &member.type_data else {
            return;
        };
        if let Some(base) = &type_data.base_type {
            if base.full_name() != "System.Object" {
                self.write_line_break(writer);
                writer.write_keyword("Inherits");
                writer.write_string(" ");
                self.write_type(base, writer);
            }
        }
        if !type_data.implemented_interfaces.is_empty() {
            self.write_line_break(writer);
            let keyword = if member.subgroup == crate::model::Subgroup::Interface {
                "Inherits"
            } else {
                "Implements"
            };
            writer.write_keyword(keyword);
            writer.write_string(" ");
            for (index, interface) in type_data.implemented_interfaces.iter().enumerate() {
                if index > 0 {
                    writer.write_string(", ");
                }
                self.write_type(interface, writer);
            }
        }
    }
}

impl SyntaxGenerator for VisualBasicSyntaxGenerator {
    fn language(&self) -> Language {
        Language::VisualBasic
    }

    fn initialize(&mut self, config: &GeneratorConfig) -> Result<()> {
        self.render_references = config.render_references;
        self.include_line_continuation = config.include_line_continuation;
        Ok(())
    }

    fn write_namespace_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        writer.write_keyword("Namespace");
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
        if member.is_static_class() || member.is_sealed {
            writer.write_keyword("NotInheritable");
            writer.write_string(" ");
        } else if member.is_abstract {
            writer.write_keyword("MustInherit");
            writer.write_string(" ");
        }
        writer.write_keyword("Class");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        self.write_generic_parameters(&member.generic_parameters, false, writer);
        self.write_type_base_clauses(member, writer);
        Ok(())
    }

    fn write_structure_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        self.write_visibility(member.visibility, writer);
        writer.write_keyword("Structure");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        self.write_generic_parameters(&member.generic_parameters, false, writer);
        self.write_type_base_clauses(member, writer);
        Ok(())
    }

    fn write_interface_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        self.write_visibility(member.visibility, writer);
        writer.write_keyword("Interface");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        self.write_generic_parameters(&member.generic_parameters, true, writer);
        self.write_type_base_clauses(member, writer);
        Ok(())
    }

    fn write_delegate_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        self.write_visibility(member.visibility, writer);
        writer.write_keyword("Delegate");
        writer.write_string(" ");
        if member.returns_void() {
            writer.write_keyword("Sub");
        } else {
            writer.write_keyword("Function");
        }
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        self.write_generic_parameters(&member.generic_parameters, true, writer);
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
        writer.write_keyword("Enumeration");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        if let Some(type_data) = &member.type_data {
            if let Some(base) = &type_data.base_type {
                if base.full_name() != "System.Int32" && base.full_name() != "System.Enum" {
                    writer.write_string(" ");
                    writer.write_keyword("As");
                    writer.write_string(" ");
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
            writer.write_keyword("Shared");
            writer.write_string(" ");
        } else {
            self.write_visibility(member.visibility, writer);
        }
        writer.write_keyword("Sub");
        writer.write_string(" ");
        writer.write_identifier("New");
        self.write_parameters(&member.parameters, writer);
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
        if member.is_extension {
            // The receiver keyword form does not exist; the attribute carries
            // the extension fact instead.
            writer.write_string("<");
            writer.write_identifier("ExtensionAttribute");
            writer.write_string(">");
            self.write_line_break(writer);
        }
        if !member.is_explicit_implementation() {
            self.write_visibility(member.visibility, writer);
            self.write_member_modifiers(member, writer);
        } else {
            self.write_visibility(Visibility::Private, writer);
        }
        if member.returns_void() {
            writer.write_keyword("Sub");
        } else {
            writer.write_keyword("Function");
        }
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        self.write_generic_parameters(&member.generic_parameters, false, writer);
        self.write_parameters(&member.parameters, writer);
        self.write_return(member, writer);
        self.write_implements_clause(member, writer);
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
        writer.write_keyword("Public");
        writer.write_string(" ");
        writer.write_keyword("Shared");
        writer.write_string(" ");
        writer.write_keyword("Operator");
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
            "Implicit" => "Widening",
            "Explicit" => "Narrowing",
            other => {
                return Err(DeclgenError::malformed_member(
                    other,
                    "cast member must be named Implicit or Explicit",
                ));
            }
        };
        self.write_attributes(member, writer);
        writer.write_keyword("Public");
        writer.write_string(" ");
        writer.write_keyword("Shared");
        writer.write_string(" ");
        writer.write_keyword(keyword);
        writer.write_string(" ");
        writer.write_keyword("Operator");
        writer.write_string(" ");
        writer.write_keyword("CType");
        self.write_parameters(&member.parameters, writer);
        self.write_return(member, writer);
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
        if !member.is_explicit_implementation() {
            self.write_visibility(member.visibility, writer);
            self.write_member_modifiers(member, writer);
        } else {
            self.write_visibility(Visibility::Private, writer);
        }
        if let Some(property) = &member.property_data {
            if property.has_getter && !property.has_setter {
                writer.write_keyword("ReadOnly");
                writer.write_string(" ");
            } else if property.has_setter && !property.has_getter {
                writer.write_keyword("WriteOnly");
                writer.write_string(" ");
            }
        }
        if !member.parameters.is_empty() {
            writer.write_keyword("Default");
            writer.write_string(" ");
        }
        writer.write_keyword("Property");
        writer.write_string(" ");
        let name = member
            .explicit_implementations
            .first()
            .map(|e| e.member_name.clone())
            .unwrap_or_else(|| member.name.clone());
        writer.write_identifier(&name);
        if !member.parameters.is_empty() {
            self.write_parameters(&member.parameters, writer);
        }
        self.write_return(member, writer);
        self.write_implements_clause(member, writer);
        Ok(())
    }

    fn write_event_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_attributes(member, writer);
        if !member.is_explicit_implementation() {
            self.write_visibility(member.visibility, writer);
            self.write_member_modifiers(member, writer);
        } else {
            self.write_visibility(Visibility::Private, writer);
        }
        writer.write_keyword("Event");
        writer.write_string(" ");
        let name = member
            .explicit_implementations
            .first()
            .map(|e| e.member_name.clone())
            .unwrap_or_else(|| member.name.clone());
        writer.write_identifier(&name);
        if let Some(event) = &member.event_data {
            writer.write_string(" ");
            writer.write_keyword("As");
            writer.write_string(" ");
            self.write_type(&event.handler_type, writer);
        }
        self.write_implements_clause(member, writer);
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
        self.write_visibility(member.visibility, writer);
        let field = member.field_data.clone().unwrap_or_default();
        if field.is_literal {
            writer.write_keyword("Const");
            writer.write_string(" ");
        } else {
            if member.is_static {
                writer.write_keyword("Shared");
                writer.write_string(" ");
            }
            if field.is_init_only {
                writer.write_keyword("ReadOnly");
                writer.write_string(" ");
            }
        }
        writer.write_identifier(&member.name);
        if let Some(field_type) = &member.return_type {
            writer.write_string(" ");
            writer.write_keyword("As");
            writer.write_string(" ");
            self.write_type(field_type, writer);
        }
        if let Some(value) = &field.literal_value {
            writer.write_string(" = ");
            writer.write_literal(&literal_text(value, LiteralStyle::VisualBasic));
        }
        Ok(())
    }
}
