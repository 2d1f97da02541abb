//! JScript declaration syntax.
//!
//! The thinnest of the declaration targets: generics, delegates, operators,
//! casts, events, static constructors and explicit implementations all render
//! placeholders, and attributes are not surfaced at all.

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::model::{MemberDescriptor, ParameterDescriptor, TypeReference, Visibility};
use crate::writer::SyntaxWriter;

use super::shared::{literal_text, unsupported, LiteralStyle};
use super::{Language, SyntaxGenerator};

fn primitive_name(full_name: &str) -> Option<&'static str> {
    match full_name {
        "System.Boolean" => Some("boolean"),
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
        "System.String" => Some("String"),
        "System.Object" => Some("Object"),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct JScriptSyntaxGenerator {
    render_references: bool,
}

impl JScriptSyntaxGenerator {
    pub fn new() -> Self {
        JScriptSyntaxGenerator {
            render_references: true,
        }
    }

    fn write_visibility(&self, visibility: Visibility, writer: &mut dyn SyntaxWriter) {
        let keyword = match visibility {
            Visibility::Public => Some("public"),
            Visibility::Family
            | Visibility::FamilyOrAssembly
            | Visibility::FamilyAndAssembly => Some("protected"),
            Visibility::Assembly => Some("internal"),
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
                writer.write_string("[");
                for _ in 1..*rank {
                    writer.write_string(",");
                }
                writer.write_string("]");
            }
            TypeReference::Pointer(inner) | TypeReference::Reference(inner) => {
                self.write_type(inner, writer)
            }
            TypeReference::Template(name) => writer.write_identifier(name),
            TypeReference::Specialization { template, .. } => self.write_type(template, writer),
        }
    }

    fn write_parameters(&self, parameters: &[ParameterDescriptor], writer: &mut dyn SyntaxWriter) {
        writer.write_string("(");
        for (index, parameter) in parameters.iter().enumerate() {
            if index > 0 {
                writer.write_string(", ");
            }
            writer.write_parameter(&parameter.name);
            writer.write_string(" : ");
            self.write_type(&parameter.parameter_type, writer);
        }
        writer.write_string(")");
    }

    fn write_return_clause(&self, member: &MemberDescriptor, writer: &mut dyn SyntaxWriter) {
        if let Some(return_type) = &member.return_type {
            if !member.returns_void() {
                writer.write_string(" : ");
                self.write_type(return_type, writer);
            }
        }
    }

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

impl SyntaxGenerator for JScriptSyntaxGenerator {
    fn language(&self) -> Language {
        Language::JScript
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
        // No value-type declaration form; a class shape is the closest fit.
        self.write_class_syntax(member, writer)
    }

    fn write_interface_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        if self.write_common_placeholders(member, writer) {
            return Ok(());
        }
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
        _member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        unsupported(writer, "Delegate", self.language());
        Ok(())
    }

    fn write_enumeration_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_visibility(member.visibility, writer);
        writer.write_keyword("enum");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        Ok(())
    }

    fn write_constructor_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        if member.is_static {
            unsupported(writer, "StaticConstructor", self.language());
            return Ok(());
        }
        if self.write_common_placeholders(member, writer) {
            return Ok(());
        }
        self.write_visibility(member.visibility, writer);
        writer.write_keyword("function");
        writer.write_string(" ");
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
        self.write_visibility(member.visibility, writer);
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
        writer.write_keyword("function");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        self.write_parameters(&member.parameters, writer);
        self.write_return_clause(member, writer);
        Ok(())
    }

    fn write_operator_syntax(
        &self,
        _member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
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
        let Some(property) = &member.property_data else {
            return Ok(());
        };
        let mut wrote_getter = false;
        if property.has_getter {
            wrote_getter = true;
            let visibility = property.getter_visibility.unwrap_or(member.visibility);
            self.write_visibility(visibility, writer);
            if member.is_static {
                writer.write_keyword("static");
                writer.write_string(" ");
            }
            writer.write_keyword("function");
            writer.write_string(" ");
            writer.write_keyword("get");
            writer.write_string(" ");
            writer.write_identifier(&member.name);
            self.write_parameters(&member.parameters, writer);
            self.write_return_clause(member, writer);
        }
        if property.has_setter {
            if wrote_getter {
                writer.write_line();
            }
            let visibility = property.setter_visibility.unwrap_or(member.visibility);
            self.write_visibility(visibility, writer);
            if member.is_static {
                writer.write_keyword("static");
                writer.write_string(" ");
            }
            writer.write_keyword("function");
            writer.write_string(" ");
            writer.write_keyword("set");
            writer.write_string(" ");
            writer.write_identifier(&member.name);
            writer.write_string("(");
            for parameter in &member.parameters {
                writer.write_parameter(&parameter.name);
                writer.write_string(" : ");
                self.write_type(&parameter.parameter_type, writer);
                writer.write_string(", ");
            }
            writer.write_parameter("value");
            if let Some(return_type) = &member.return_type {
                writer.write_string(" : ");
                self.write_type(return_type, writer);
            }
            writer.write_string(")");
        }
        Ok(())
    }

    fn write_event_syntax(
        &self,
        _member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        unsupported(writer, "Event", self.language());
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
        self.write_visibility(member.visibility, writer);
        let field = member.field_data.clone().unwrap_or_default();
        if member.is_static && !field.is_literal {
            writer.write_keyword("static");
            writer.write_string(" ");
        }
        if field.is_literal {
            writer.write_keyword("const");
        } else {
            writer.write_keyword("var");
        }
        writer.write_string(" ");
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
    use crate::model::{FieldData, GenericParameter, LiteralValue};
    use crate::writer::TokenWriter;
    use pretty_assertions::assert_eq;

    fn render(member: &MemberDescriptor) -> String {
        let generator = JScriptSyntaxGenerator::new();
        let mut writer = TokenWriter::new();
        generator.write_syntax(member, &mut writer).unwrap();
        assert!(writer.is_balanced());
        writer.text()
    }

    fn messages(member: &MemberDescriptor) -> Vec<String> {
        let generator = JScriptSyntaxGenerator::new();
        let mut writer = TokenWriter::new();
        generator.write_syntax(member, &mut writer).unwrap();
        writer.messages().into_iter().map(String::from).collect()
    }

    fn int32() -> TypeReference {
        TypeReference::named("System.Int32")
    }

    #[test]
    fn test_static_function_declaration() {
        let member = MemberDescriptor::method("Add")
            .with_static()
            .with_return_type(int32())
            .with_parameter(ParameterDescriptor::new("a", int32()))
            .with_parameter(ParameterDescriptor::new("b", int32()));
        assert_eq!(
            render(&member),
            "public static function Add(a : int, b : int) : int"
        );
    }

    #[test]
    fn test_void_return_clause_omitted() {
        let member = MemberDescriptor::method("Run");
        assert_eq!(render(&member), "public function Run()");
    }

    #[test]
    fn test_generic_method_unsupported() {
        let member =
            MemberDescriptor::method("Map").with_generic_parameter(GenericParameter::new("T"));
        assert_eq!(messages(&member), vec!["UnsupportedGeneric_JScript"]);
    }

    #[test]
    fn test_delegate_unsupported() {
        let member = MemberDescriptor::delegate("Handler");
        assert_eq!(messages(&member), vec!["UnsupportedDelegate_JScript"]);
    }

    #[test]
    fn test_explicit_implementation_unsupported() {
        let member = MemberDescriptor::method("Dispose")
            .with_explicit_implementation(TypeReference::named("System.IDisposable"), "Dispose");
        assert_eq!(messages(&member), vec!["UnsupportedExplicit_JScript"]);
    }

    #[test]
    fn test_static_constructor_unsupported() {
        let mut member = MemberDescriptor::constructor("My.Widget");
        member.is_static = true;
        assert_eq!(
            messages(&member),
            vec!["UnsupportedStaticConstructor_JScript"]
        );
    }

    #[test]
    fn test_operator_unsupported() {
        let member = MemberDescriptor::operator("Addition");
        assert_eq!(messages(&member), vec!["UnsupportedOperator_JScript"]);
    }

    #[test]
    fn test_property_getter_setter_forms() {
        let member = MemberDescriptor::property("Count").with_return_type(int32());
        assert_eq!(
            render(&member),
            "public function get Count() : int\npublic function set Count(value : int)"
        );
    }

    #[test]
    fn test_indexer_get_form() {
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
            "public function get Item(index : int) : String"
        );
    }

    #[test]
    fn test_constant_field() {
        let member = MemberDescriptor::field("Answer", int32())
            .with_static()
            .with_field_data(FieldData {
                is_literal: true,
                literal_value: Some(LiteralValue::Integer(42)),
                ..Default::default()
            });
        assert_eq!(render(&member), "public const Answer : int = 42");
    }

    #[test]
    fn test_constructor_uses_type_name() {
        let member = MemberDescriptor::constructor("My.Widget")
            .with_parameter(ParameterDescriptor::new("size", int32()));
        assert_eq!(render(&member), "public function Widget(size : int)");
    }
}
