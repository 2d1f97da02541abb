//! J# declaration syntax, Java-flavored.
//!
//! The language has no generics, varargs, operator overloading, pointers or
//! explicit interface implementations; all of those render as placeholders.
//! Properties and events surface as their accessor method pairs.

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::model::{
    ArgumentValue, AttributeApplication, MemberDescriptor, ParameterDescriptor, TypeReference,
    Visibility,
};
use crate::writer::SyntaxWriter;

use super::shared::{
    all_rendered_attributes, attribute_display_name, literal_text, unsupported, LiteralStyle,
};
use super::{Language, SyntaxGenerator};

fn primitive_name(full_name: &str) -> Option<&'static str> {
    match full_name {
        "System.Void" => Some("void"),
        "System.Boolean" => Some("boolean"),
        "System.Byte" => Some("byte"),
        "System.SByte" => Some("byte"),
        "System.Char" => Some("char"),
        "System.Int16" => Some("short"),
        "System.Int32" => Some("int"),
        "System.Int64" => Some("long"),
        "System.Single" => Some("float"),
        "System.Double" => Some("double"),
        "System.String" => Some("String"),
        "System.Object" => Some("Object"),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct JSharpSyntaxGenerator {
    render_references: bool,
}

impl JSharpSyntaxGenerator {
    pub fn new() -> Self {
        JSharpSyntaxGenerator {
            render_references: true,
        }
    }

    fn write_visibility(&self, visibility: Visibility, writer: &mut dyn SyntaxWriter) {
        let keyword = match visibility {
            Visibility::Public => Some("public"),
            // Family-or-assembly collapses to the nearest Java accessibility.
            Visibility::Family
            | Visibility::FamilyOrAssembly
            | Visibility::FamilyAndAssembly => Some("protected"),
            // Package access has no keyword.
            Visibility::Assembly => None,
            Visibility::Private => Some("private"),
        };
        if let Some(keyword) = keyword {
            writer.write_keyword(keyword);
            writer.write_string(" ");
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
                for _ in 0..*rank {
                    writer.write_string("[]");
                }
            }
            TypeReference::Pointer(inner) | TypeReference::Reference(inner) => {
                self.write_type(inner, writer)
            }
            TypeReference::Template(name) => writer.write_identifier(name),
            TypeReference::Specialization { template, .. } => self.write_type(template, writer),
        }
    }

    fn write_attribute_argument(&self, value: &ArgumentValue, writer: &mut dyn SyntaxWriter) {
        match value {
            ArgumentValue::Null => writer.write_keyword("null"),
            ArgumentValue::TypeLiteral(reference) => {
                self.write_type(reference, writer);
                writer.write_string(".class");
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

    /// Attributes have the javadoc `@attribute` form.
    fn write_attribute(&self, attribute: &AttributeApplication, writer: &mut dyn SyntaxWriter) {
        writer.write_string("/** @attribute ");
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
        writer.write_string(" */");
        writer.write_line();
    }

    fn write_attributes(&self, member: &MemberDescriptor, writer: &mut dyn SyntaxWriter) {
        for attribute in all_rendered_attributes(member) {
            self.write_attribute(&attribute, writer);
        }
    }

    fn write_parameters(&self, parameters: &[ParameterDescriptor], writer: &mut dyn SyntaxWriter) {
        writer.write_string("(");
        for (index, parameter) in parameters.iter().enumerate() {
            if index > 0 {
                writer.write_string(", ");
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

    fn write_member_modifiers(&self, member: &MemberDescriptor, writer: &mut dyn SyntaxWriter) {
        if member.is_static {
            writer.write_keyword("static");
            writer.write_string(" ");
        } else if member.is_abstract {
            writer.write_keyword("abstract");
            writer.write_string(" ");
        } else if member.is_final && (member.is_virtual || member.is_override) {
            writer.write_keyword("final");
            writer.write_string(" ");
        }
    }

    /// True when a placeholder was emitted for a construct the language
    /// cannot express.
    fn write_common_placeholders(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> bool {
        if member.is_generic() {
            unsupported(writer, "Generic", self.language());
            return true;
        }
        if member.is_varargs {
            unsupported(writer, "Varargs", self.language());
            return true;
        }
        if member.has_unsafe_signature() {
            unsupported(writer, "Unsafe", self.language());
            return true;
        }
        if member.is_explicit_implementation() {
            unsupported(writer, "Explicit", self.language());
            return true;
        }
        false
    }
}

impl SyntaxGenerator for JSharpSyntaxGenerator {
    fn language(&self) -> Language {
        Language::JSharp
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
        writer.write_keyword("package");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        Ok(())
    }

    fn write_class_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        if self.write_common_placeholders(member, writer) {
            return Ok(());
        }
        self.write_attributes(member, writer);
        self.write_visibility(member.visibility, writer);
        if member.is_abstract && !member.is_sealed {
            writer.write_keyword("abstract");
            writer.write_string(" ");
        } else if member.is_sealed && !member.is_abstract {
            writer.write_keyword("final");
            writer.write_string(" ");
        }
        writer.write_keyword("class");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        if let Some(type_data) = &member.type_data {
            if let Some(base) = &type_data.base_type {
                if base.full_name() != "System.Object" {
                    writer.write_string(" ");
                    writer.write_keyword("extends");
                    writer.write_string(" ");
                    self.write_type(base, writer);
                }
            }
            if !type_data.implemented_interfaces.is_empty() {
                writer.write_string(" ");
                writer.write_keyword("implements");
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
        if self.write_common_placeholders(member, writer) {
            return Ok(());
        }
        self.write_attributes(member, writer);
        self.write_visibility(member.visibility, writer);
        // Value types surface as final classes.
        writer.write_keyword("final");
        writer.write_string(" ");
        writer.write_keyword("class");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        writer.write_string(" ");
        writer.write_keyword("extends");
        writer.write_string(" ");
        writer.write_identifier("ValueType");
        Ok(())
    }

    fn write_interface_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        if self.write_common_placeholders(member, writer) {
            return Ok(());
        }
        self.write_attributes(member, writer);
        self.write_visibility(member.visibility, writer);
        writer.write_keyword("interface");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        if let Some(type_data) = &member.type_data {
            if !type_data.implemented_interfaces.is_empty() {
                writer.write_string(" ");
                writer.write_keyword("extends");
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
        if self.write_common_placeholders(member, writer) {
            return Ok(());
        }
        self.write_attributes(member, writer);
        self.write_visibility(member.visibility, writer);
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
        self.write_visibility(member.visibility, writer);
        writer.write_keyword("final");
        writer.write_string(" ");
        writer.write_keyword("class");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        writer.write_string(" ");
        writer.write_keyword("extends");
        writer.write_string(" ");
        writer.write_identifier("Enum");
        Ok(())
    }

    fn write_constructor_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        if self.write_common_placeholders(member, writer) {
            return Ok(());
        }
        if member.is_static {
            unsupported(writer, "StaticConstructor", self.language());
            return Ok(());
        }
        self.write_attributes(member, writer);
        self.write_visibility(member.visibility, writer);
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
        if self.write_common_placeholders(member, writer) {
            return Ok(());
        }
        self.write_attributes(member, writer);
        self.write_visibility(member.visibility, writer);
        self.write_member_modifiers(member, writer);
        self.write_return(member, writer);
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        self.write_parameters(&member.parameters, writer);
        Ok(())
    }

    fn write_operator_syntax(
        &self,
        _member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        // No operator overloading at all.
        unsupported(writer, "Operator", self.language());
        Ok(())
    }

    fn write_cast_syntax(
        &self,
        _member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        unsupported(writer, "Cast", self.language());
        Ok(())
    }

    fn write_property_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        if self.write_common_placeholders(member, writer) {
            return Ok(());
        }
        self.write_attributes(member, writer);
        let Some(property) = &member.property_data else {
            return Ok(());
        };
        let mut first = true;
        if property.has_getter {
            first = false;
            let visibility = property.getter_visibility.unwrap_or(member.visibility);
            self.write_visibility(visibility, writer);
            self.write_member_modifiers(member, writer);
            self.write_return(member, writer);
            writer.write_string(" ");
            let getter = format!("get_{}", member.name);
            writer.write_identifier(&getter);
            self.write_parameters(&member.parameters, writer);
        }
        if property.has_setter {
            if !first {
                writer.write_line();
            }
            let visibility = property.setter_visibility.unwrap_or(member.visibility);
            self.write_visibility(visibility, writer);
            self.write_member_modifiers(member, writer);
            writer.write_keyword("void");
            writer.write_string(" ");
            let setter = format!("set_{}", member.name);
            writer.write_identifier(&setter);
            writer.write_string("(");
            for parameter in &member.parameters {
                self.write_type(&parameter.parameter_type, writer);
                writer.write_string(" ");
                writer.write_parameter(&parameter.name);
                writer.write_string(", ");
            }
            if let Some(return_type) = &member.return_type {
                self.write_type(return_type, writer);
                writer.write_string(" ");
            }
            writer.write_parameter("value");
            writer.write_string(")");
        }
        Ok(())
    }

    fn write_event_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        if self.write_common_placeholders(member, writer) {
            return Ok(());
        }
        self.write_attributes(member, writer);
        let Some(event) = &member.event_data else {
            return Ok(());
        };
        for (index, accessor) in ["add_", "remove_"].iter().enumerate() {
            if index > 0 {
                writer.write_line();
            }
            self.write_visibility(member.visibility, writer);
            self.write_member_modifiers(member, writer);
            writer.write_keyword("void");
            writer.write_string(" ");
            let name = format!("{accessor}{}", member.name);
            writer.write_identifier(&name);
            writer.write_string("(");
            self.write_type(&event.handler_type, writer);
            writer.write_string(" ");
            writer.write_parameter("handler");
            writer.write_string(")");
        }
        Ok(())
    }

    fn write_field_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        if self.write_common_placeholders(member, writer) {
            return Ok(());
        }
        self.write_attributes(member, writer);
        self.write_visibility(member.visibility, writer);
        let field = member.field_data.clone().unwrap_or_default();
        if member.is_static || field.is_literal {
            writer.write_keyword("static");
            writer.write_string(" ");
        }
        if field.is_literal || field.is_init_only {
            writer.write_keyword("final");
            writer.write_string(" ");
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
    use crate::model::{FieldData, GenericParameter, LiteralValue, TypeData};
    use crate::writer::TokenWriter;
    use pretty_assertions::assert_eq;

    fn render(member: &MemberDescriptor) -> String {
        let generator = JSharpSyntaxGenerator::new();
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
    fn test_all_operators_unsupported() {
        for name in ["Addition", "Equality", "LogicalNot", "Concatenate"] {
            let member = MemberDescriptor::operator(name);
            let generator = JSharpSyntaxGenerator::new();
            let mut writer = TokenWriter::new();
            generator.write_syntax(&member, &mut writer).unwrap();
            assert_eq!(
                writer.messages(),
                vec!["UnsupportedOperator_JSharp"],
                "operator {name}"
            );
        }
    }

    #[test]
    fn test_generic_member_unsupported() {
        let member =
            MemberDescriptor::method("Map").with_generic_parameter(GenericParameter::new("T"));
        let generator = JSharpSyntaxGenerator::new();
        let mut writer = TokenWriter::new();
        generator.write_syntax(&member, &mut writer).unwrap();
        assert_eq!(writer.messages(), vec!["UnsupportedGeneric_JSharp"]);
    }

    #[test]
    fn test_property_renders_accessor_pair() {
        let member = MemberDescriptor::property("Count").with_return_type(int32());
        assert_eq!(
            render(&member),
            "public int get_Count()\npublic void set_Count(int value)"
        );
    }

    #[test]
    fn test_indexer_renders_get_item() {
        let member = MemberDescriptor::property("Item")
            .with_return_type(TypeReference::named("System.String"))
            .with_parameter(ParameterDescriptor::new("index", int32()))
            .with_property_data(crate::model::PropertyData {
                has_getter: true,
                has_setter: false,
                ..Default::default()
            });
        assert_eq!(render(&member), "public String get_Item(int index)");
    }

    #[test]
    fn test_event_renders_add_remove_pair() {
        let member =
            MemberDescriptor::event("Click", TypeReference::named("System.EventHandler"));
        assert_eq!(
            render(&member),
            "public void add_Click(EventHandler handler)\npublic void remove_Click(EventHandler handler)"
        );
    }

    #[test]
    fn test_class_extends_and_implements() {
        let member = MemberDescriptor::class("Widget").with_type_data(TypeData {
            base_type: Some(TypeReference::named("System.ComponentModel.Component")),
            implemented_interfaces: vec![TypeReference::named("System.IDisposable")],
            ..Default::default()
        });
        assert_eq!(
            render(&member),
            "public class Widget extends Component implements IDisposable"
        );
    }

    #[test]
    fn test_constant_field_is_static_final() {
        let member = MemberDescriptor::field("Answer", int32())
            .with_static()
            .with_field_data(FieldData {
                is_literal: true,
                literal_value: Some(LiteralValue::Integer(42)),
                ..Default::default()
            });
        assert_eq!(render(&member), "public static final int Answer = 42");
    }

    #[test]
    fn test_package_visibility_has_no_keyword() {
        let member = MemberDescriptor::method("Helper").with_visibility(Visibility::Assembly);
        assert_eq!(render(&member), "void Helper()");
    }

    #[test]
    fn test_attribute_javadoc_form() {
        let member = MemberDescriptor::method("Old")
            .with_attribute(AttributeApplication::new("System.ObsoleteAttribute"));
        assert_eq!(
            render(&member),
            "/** @attribute Obsolete */\npublic void Old()"
        );
    }

    #[test]
    fn test_static_constructor_unsupported() {
        let mut member = MemberDescriptor::constructor("My.Widget");
        member.is_static = true;
        let generator = JSharpSyntaxGenerator::new();
        let mut writer = TokenWriter::new();
        generator.write_syntax(&member, &mut writer).unwrap();
        assert_eq!(
            writer.messages(),
            vec!["UnsupportedStaticConstructor_JSharp"]
        );
    }
}
