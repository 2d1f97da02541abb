//! Visual Basic usage strategy: call-site examples instead of declarations.
//!
//! For each member this renders the locals a caller would need (`Dim x As T`
//! per instance, parameter and return value) followed by one statement
//! exercising the member. Operators carry an arity in their lookup table so
//! the statement takes the right shape, and a declared parameter count that
//! contradicts that arity falls back to the unsupported placeholder.

use crate::error::Result;
use crate::generators::visual_basic::primitive_name;
use crate::generators::{shared, Language, SyntaxGenerator};
use crate::model::{MemberDescriptor, ParameterDescriptor, Subgroup, TypeReference};
use crate::writer::SyntaxWriter;

/// Call-site shape of an overloadable operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OperatorShape {
    /// `returnValue = -a`
    PrefixUnary,
    /// `returnValue = a + b`
    Infix,
}

impl OperatorShape {
    fn arity(self) -> usize {
        match self {
            OperatorShape::PrefixUnary => 1,
            OperatorShape::Infix => 2,
        }
    }
}

/// Operator name to token and call-site shape. Increment and Decrement have
/// no Visual Basic expression form and are absent on purpose.
fn operator_usage(name: &str) -> Option<(&'static str, OperatorShape)> {
    match name {
        "UnaryPlus" => Some(("+", OperatorShape::PrefixUnary)),
        "UnaryNegation" => Some(("-", OperatorShape::PrefixUnary)),
        "LogicalNot" => Some(("Not", OperatorShape::PrefixUnary)),
        "OnesComplement" => Some(("Not", OperatorShape::PrefixUnary)),
        "Addition" => Some(("+", OperatorShape::Infix)),
        "Subtraction" => Some(("-", OperatorShape::Infix)),
        "Multiply" => Some(("*", OperatorShape::Infix)),
        "Division" => Some(("/", OperatorShape::Infix)),
        "IntegerDivision" => Some(("\\", OperatorShape::Infix)),
        "Modulus" => Some(("Mod", OperatorShape::Infix)),
        "Exponent" => Some(("^", OperatorShape::Infix)),
        "BitwiseAnd" => Some(("And", OperatorShape::Infix)),
        "BitwiseOr" => Some(("Or", OperatorShape::Infix)),
        "ExclusiveOr" => Some(("Xor", OperatorShape::Infix)),
        "Concatenate" => Some(("&", OperatorShape::Infix)),
        "Like" => Some(("Like", OperatorShape::Infix)),
        "LeftShift" => Some(("<<", OperatorShape::Infix)),
        "RightShift" => Some((">>", OperatorShape::Infix)),
        "Equality" => Some(("=", OperatorShape::Infix)),
        "Inequality" => Some(("<>", OperatorShape::Infix)),
        "LessThan" => Some(("<", OperatorShape::Infix)),
        "GreaterThan" => Some((">", OperatorShape::Infix)),
        "LessThanOrEqual" => Some(("<=", OperatorShape::Infix)),
        "GreaterThanOrEqual" => Some((">=", OperatorShape::Infix)),
        "Assign" => Some(("=", OperatorShape::Infix)),
        _ => None,
    }
}

#[derive(Debug)]
pub struct VisualBasicUsageSyntaxGenerator {
    render_references: bool,
}

impl Default for VisualBasicUsageSyntaxGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl VisualBasicUsageSyntaxGenerator {
    pub fn new() -> Self {
        VisualBasicUsageSyntaxGenerator {
            render_references: true,
        }
    }

    fn write_unsupported(&self, construct: &str, writer: &mut dyn SyntaxWriter) {
        shared::unsupported(writer, construct, Language::VisualBasicUsage);
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

    /// `Dim <name> As <type>`
    fn write_dim(&self, name: &str, reference: &TypeReference, writer: &mut dyn SyntaxWriter) {
        writer.write_keyword("Dim");
        writer.write_string(" ");
        writer.write_parameter(name);
        writer.write_string(" ");
        writer.write_keyword("As");
        writer.write_string(" ");
        self.write_type(reference, writer);
        writer.write_line();
    }

    /// `Dim instance As <containing type>` when the member needs a receiver.
    fn write_instance_dim(&self, member: &MemberDescriptor, writer: &mut dyn SyntaxWriter) {
        if member.is_static {
            return;
        }
        if let Some(containing) = &member.containing_type {
            self.write_dim("instance", containing, writer);
        }
    }

    fn write_parameter_dims(
        &self,
        parameters: &[ParameterDescriptor],
        writer: &mut dyn SyntaxWriter,
    ) {
        for parameter in parameters {
            self.write_dim(&parameter.name, &parameter.parameter_type, writer);
        }
    }

    fn write_return_dim(&self, member: &MemberDescriptor, writer: &mut dyn SyntaxWriter) {
        if member.returns_void() {
            return;
        }
        if let Some(return_type) = &member.return_type {
            self.write_dim("returnValue", return_type, writer);
        }
    }

    /// The receiver of a call: `instance.` for instance members, the
    /// containing type for shared ones. Extension methods use their first
    /// parameter as the receiver instead.
    fn write_receiver(&self, member: &MemberDescriptor, writer: &mut dyn SyntaxWriter) {
        if member.is_extension {
            if let Some(first) = member.parameters.first() {
                writer.write_parameter(&first.name);
                writer.write_string(".");
            }
            return;
        }
        if member.is_static {
            if let Some(containing) = &member.containing_type {
                self.write_type(containing, writer);
                writer.write_string(".");
            }
        } else if member.containing_type.is_some() {
            writer.write_parameter("instance");
            writer.write_string(".");
        }
    }

    fn write_argument_list(
        &self,
        parameters: &[ParameterDescriptor],
        writer: &mut dyn SyntaxWriter,
    ) {
        writer.write_string("(");
        for (index, parameter) in parameters.iter().enumerate() {
            if index > 0 {
                writer.write_string(", ");
            }
            writer.write_parameter(&parameter.name);
        }
        writer.write_string(")");
    }

    /// `Dim instance As <Name>` is the whole usage story for a type.
    fn write_type_usage(&self, member: &MemberDescriptor, writer: &mut dyn SyntaxWriter) {
        let reference = TypeReference::named(if member.namespace_name.is_empty() {
            member.name.clone()
        } else {
            format!("{}.{}", member.namespace_name, member.name)
        });
        let local = match member.subgroup {
            Subgroup::Delegate => "handler",
            _ => "instance",
        };
        self.write_dim(local, &reference, writer);
    }
}

impl SyntaxGenerator for VisualBasicUsageSyntaxGenerator {
    fn language(&self) -> Language {
        Language::VisualBasicUsage
    }

    fn style_id(&self) -> &'static str {
        "usage"
    }

    fn initialize(&mut self, config: &crate::config::GeneratorConfig) -> Result<()> {
        self.render_references = config.render_references;
        Ok(())
    }

    fn write_namespace_syntax(
        &self,
        _member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_unsupported("Namespace", writer);
        Ok(())
    }

    fn write_class_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        if member.is_static_class() {
            self.write_unsupported("StaticClass", writer);
            return Ok(());
        }
        self.write_type_usage(member, writer);
        Ok(())
    }

    fn write_structure_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_type_usage(member, writer);
        Ok(())
    }

    fn write_interface_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_type_usage(member, writer);
        Ok(())
    }

    fn write_delegate_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_type_usage(member, writer);
        Ok(())
    }

    fn write_enumeration_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_type_usage(member, writer);
        Ok(())
    }

    fn write_constructor_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_parameter_dims(&member.parameters, writer);
        writer.write_line();
        writer.write_keyword("Dim");
        writer.write_string(" ");
        writer.write_parameter("instance");
        writer.write_string(" ");
        writer.write_keyword("As");
        writer.write_string(" ");
        writer.write_keyword("New");
        writer.write_string(" ");
        match &member.containing_type {
            Some(containing) => self.write_type(containing, writer),
            None => writer.write_identifier(&member.name),
        }
        self.write_argument_list(&member.parameters, writer);
        Ok(())
    }

    fn write_method_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        if member.has_unsafe_signature() {
            self.write_unsupported("UnsafeMethod", writer);
            return Ok(());
        }
        self.write_instance_dim(member, writer);
        // An extension receiver is declared with the other parameters.
        let call_parameters: &[ParameterDescriptor] = if member.is_extension {
            member.parameters.get(1..).unwrap_or(&[])
        } else {
            &member.parameters
        };
        self.write_parameter_dims(&member.parameters, writer);
        self.write_return_dim(member, writer);
        writer.write_line();

        if !member.returns_void() {
            writer.write_parameter("returnValue");
            writer.write_string(" = ");
        }
        self.write_receiver(member, writer);
        writer.write_identifier(&member.name);
        self.write_argument_list(call_parameters, writer);
        Ok(())
    }

    fn write_operator_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        let Some((token, shape)) = operator_usage(&member.name) else {
            self.write_unsupported("Operator", writer);
            return Ok(());
        };
        // The declared parameter list must agree with the operator's arity;
        // metadata that contradicts the table gets the placeholder instead
        // of a nonsensical expression.
        if member.parameters.len() != shape.arity() {
            self.write_unsupported("Operator", writer);
            return Ok(());
        }

        self.write_parameter_dims(&member.parameters, writer);
        self.write_return_dim(member, writer);
        writer.write_line();

        if !member.returns_void() {
            writer.write_parameter("returnValue");
            writer.write_string(" = ");
        }
        match shape {
            OperatorShape::PrefixUnary => {
                writer.write_keyword(token);
                // Word operators need a separating space, symbols do not.
                if token.chars().all(char::is_alphabetic) {
                    writer.write_string(" ");
                }
                writer.write_parameter(&member.parameters[0].name);
            }
            OperatorShape::Infix => {
                writer.write_parameter(&member.parameters[0].name);
                writer.write_string(" ");
                writer.write_keyword(token);
                writer.write_string(" ");
                writer.write_parameter(&member.parameters[1].name);
            }
        }
        Ok(())
    }

    fn write_cast_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        let (Some(source), Some(target)) = (member.parameters.first(), member.return_type.as_ref())
        else {
            self.write_unsupported("Cast", writer);
            return Ok(());
        };
        self.write_dim(&source.name, &source.parameter_type, writer);
        self.write_dim("returnValue", target, writer);
        writer.write_line();

        writer.write_parameter("returnValue");
        writer.write_string(" = ");
        writer.write_keyword("CType");
        writer.write_string("(");
        writer.write_parameter(&source.name);
        writer.write_string(", ");
        self.write_type(target, writer);
        writer.write_string(")");
        Ok(())
    }

    fn write_property_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        let Some(return_type) = &member.return_type else {
            self.write_unsupported("Property", writer);
            return Ok(());
        };
        let data = member.property_data.clone().unwrap_or_default();

        self.write_instance_dim(member, writer);
        self.write_parameter_dims(&member.parameters, writer);
        self.write_dim("value", return_type, writer);
        writer.write_line();

        if data.has_getter {
            writer.write_parameter("value");
            writer.write_string(" = ");
            self.write_receiver(member, writer);
            writer.write_identifier(&member.name);
            if !member.parameters.is_empty() {
                self.write_argument_list(&member.parameters, writer);
            }
            writer.write_line();
        }
        if data.has_setter {
            self.write_receiver(member, writer);
            writer.write_identifier(&member.name);
            if !member.parameters.is_empty() {
                self.write_argument_list(&member.parameters, writer);
            }
            writer.write_string(" = ");
            writer.write_parameter("value");
            writer.write_line();
        }
        Ok(())
    }

    fn write_event_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        let Some(event_data) = &member.event_data else {
            self.write_unsupported("Event", writer);
            return Ok(());
        };
        self.write_instance_dim(member, writer);
        self.write_dim("handler", &event_data.handler_type, writer);
        writer.write_line();

        writer.write_keyword("AddHandler");
        writer.write_string(" ");
        self.write_receiver(member, writer);
        writer.write_identifier(&member.name);
        writer.write_string(", ");
        writer.write_parameter("handler");
        Ok(())
    }

    fn write_field_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        let Some(field_type) = &member.return_type else {
            self.write_unsupported("Field", writer);
            return Ok(());
        };
        self.write_instance_dim(member, writer);
        self.write_dim("value", field_type, writer);
        writer.write_line();

        writer.write_parameter("value");
        writer.write_string(" = ");
        self.write_receiver(member, writer);
        writer.write_identifier(&member.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MemberDescriptor, ParameterDescriptor, PropertyData};
    use crate::writer::TokenWriter;
    use pretty_assertions::assert_eq;

    fn render(member: &MemberDescriptor) -> TokenWriter {
        let mut writer = TokenWriter::new();
        VisualBasicUsageSyntaxGenerator::new()
            .write_syntax(member, &mut writer)
            .unwrap();
        assert!(writer.is_balanced());
        writer
    }

    fn int() -> TypeReference {
        TypeReference::named("System.Int32")
    }

    #[test]
    fn test_instance_method_call_site() {
        let member = MemberDescriptor::method("Add")
            .with_containing_type("Widgets.Calculator")
            .with_return_type(int())
            .with_parameter(ParameterDescriptor::new("a", int()))
            .with_parameter(ParameterDescriptor::new("b", int()));
        assert_eq!(
            render(&member).text(),
            "Dim instance As Calculator\n\
             Dim a As Integer\n\
             Dim b As Integer\n\
             Dim returnValue As Integer\n\
             \n\
             returnValue = instance.Add(a, b)"
        );
    }

    #[test]
    fn test_shared_method_uses_type_receiver() {
        let member = MemberDescriptor::method("Parse")
            .with_static()
            .with_containing_type("Widgets.Calculator")
            .with_return_type(int())
            .with_parameter(ParameterDescriptor::new(
                "text",
                TypeReference::named("System.String"),
            ));
        assert_eq!(
            render(&member).text(),
            "Dim text As String\n\
             Dim returnValue As Integer\n\
             \n\
             returnValue = Calculator.Parse(text)"
        );
    }

    #[test]
    fn test_void_method_has_no_return_value() {
        let member = MemberDescriptor::method("Reset")
            .with_containing_type("Widgets.Calculator");
        assert_eq!(
            render(&member).text(),
            "Dim instance As Calculator\n\ninstance.Reset()"
        );
    }

    #[test]
    fn test_extension_method_first_parameter_becomes_receiver() {
        let mut member = MemberDescriptor::method("Reverse")
            .with_static()
            .with_containing_type("Widgets.StringExtensions")
            .with_return_type(TypeReference::named("System.String"))
            .with_parameter(ParameterDescriptor::new(
                "text",
                TypeReference::named("System.String"),
            ))
            .with_parameter(ParameterDescriptor::new(
                "count",
                int(),
            ));
        member.is_extension = true;
        assert_eq!(
            render(&member).text(),
            "Dim text As String\n\
             Dim count As Integer\n\
             Dim returnValue As String\n\
             \n\
             returnValue = text.Reverse(count)"
        );
    }

    #[test]
    fn test_constructor_usage() {
        let member = MemberDescriptor::constructor("Widgets.Calculator")
            .with_parameter(ParameterDescriptor::new("precision", int()));
        assert_eq!(
            render(&member).text(),
            "Dim precision As Integer\n\nDim instance As New Calculator(precision)"
        );
    }

    #[test]
    fn test_binary_operator_call_site() {
        let member = MemberDescriptor::operator("Addition")
            .with_containing_type("Widgets.Money")
            .with_return_type(TypeReference::named("Widgets.Money"))
            .with_parameter(ParameterDescriptor::new(
                "a",
                TypeReference::named("Widgets.Money"),
            ))
            .with_parameter(ParameterDescriptor::new(
                "b",
                TypeReference::named("Widgets.Money"),
            ));
        assert_eq!(
            render(&member).text(),
            "Dim a As Money\n\
             Dim b As Money\n\
             Dim returnValue As Money\n\
             \n\
             returnValue = a + b"
        );
    }

    #[test]
    fn test_prefix_unary_operator_call_site() {
        let member = MemberDescriptor::operator("LogicalNot")
            .with_return_type(TypeReference::named("System.Boolean"))
            .with_parameter(ParameterDescriptor::new(
                "flag",
                TypeReference::named("System.Boolean"),
            ));
        assert_eq!(
            render(&member).text(),
            "Dim flag As Boolean\n\
             Dim returnValue As Boolean\n\
             \n\
             returnValue = Not flag"
        );
    }

    #[test]
    fn test_unknown_operator_is_unsupported() {
        let member = MemberDescriptor::operator("Increment")
            .with_return_type(int())
            .with_parameter(ParameterDescriptor::new("value", int()));
        assert_eq!(
            render(&member).messages(),
            vec!["UnsupportedOperator_VisualBasicUsage"]
        );
    }

    #[test]
    fn test_arity_mismatch_is_unsupported() {
        // Addition declared with one parameter contradicts the table.
        let member = MemberDescriptor::operator("Addition")
            .with_return_type(int())
            .with_parameter(ParameterDescriptor::new("a", int()));
        assert_eq!(
            render(&member).messages(),
            vec!["UnsupportedOperator_VisualBasicUsage"]
        );
    }

    #[test]
    fn test_cast_renders_ctype() {
        let member = MemberDescriptor::cast("Implicit")
            .with_containing_type("Widgets.Money")
            .with_return_type(TypeReference::named("System.Decimal"))
            .with_parameter(ParameterDescriptor::new(
                "money",
                TypeReference::named("Widgets.Money"),
            ));
        assert_eq!(
            render(&member).text(),
            "Dim money As Money\n\
             Dim returnValue As Decimal\n\
             \n\
             returnValue = CType(money, Decimal)"
        );
    }

    #[test]
    fn test_read_write_property_renders_both_statements() {
        let member = MemberDescriptor::property("Count")
            .with_containing_type("Widgets.Basket")
            .with_return_type(int());
        assert_eq!(
            render(&member).text(),
            "Dim instance As Basket\n\
             Dim value As Integer\n\
             \n\
             value = instance.Count\n\
             instance.Count = value\n"
        );
    }

    #[test]
    fn test_read_only_property_renders_get_only() {
        let member = MemberDescriptor::property("Count")
            .with_containing_type("Widgets.Basket")
            .with_return_type(int())
            .with_property_data(PropertyData {
                has_getter: true,
                has_setter: false,
                ..Default::default()
            });
        let text = render(&member).text();
        assert!(text.contains("value = instance.Count"));
        assert!(!text.contains("instance.Count = value"));
    }

    #[test]
    fn test_indexed_property_passes_arguments() {
        let member = MemberDescriptor::property("Item")
            .with_containing_type("Widgets.Basket")
            .with_return_type(TypeReference::named("System.String"))
            .with_parameter(ParameterDescriptor::new("index", int()));
        let text = render(&member).text();
        assert!(text.contains("value = instance.Item(index)"));
        assert!(text.contains("instance.Item(index) = value"));
    }

    #[test]
    fn test_event_usage_renders_add_handler() {
        let member = MemberDescriptor::event(
            "Emptied",
            TypeReference::named("System.EventHandler"),
        )
        .with_containing_type("Widgets.Basket");
        assert_eq!(
            render(&member).text(),
            "Dim instance As Basket\n\
             Dim handler As EventHandler\n\
             \n\
             AddHandler instance.Emptied, handler"
        );
    }

    #[test]
    fn test_shared_field_usage() {
        let member = MemberDescriptor::field("MaxItems", int())
            .with_static()
            .with_containing_type("Widgets.Basket");
        assert_eq!(
            render(&member).text(),
            "Dim value As Integer\n\nvalue = Basket.MaxItems"
        );
    }

    #[test]
    fn test_class_usage_is_a_local_declaration() {
        let member = MemberDescriptor::class("Basket").with_namespace("Widgets");
        assert_eq!(render(&member).text(), "Dim instance As Basket\n");
    }

    #[test]
    fn test_delegate_usage_declares_handler() {
        let member = MemberDescriptor::delegate("ItemAddedHandler").with_namespace("Widgets");
        assert_eq!(render(&member).text(), "Dim handler As ItemAddedHandler\n");
    }

    #[test]
    fn test_static_class_has_no_usage() {
        let member = MemberDescriptor::class("Helpers").with_abstract().with_sealed();
        assert_eq!(
            render(&member).messages(),
            vec!["UnsupportedStaticClass_VisualBasicUsage"]
        );
    }

    #[test]
    fn test_unsafe_method_is_unsupported() {
        let member = MemberDescriptor::method("Read").with_parameter(ParameterDescriptor::new(
            "buffer",
            TypeReference::pointer(TypeReference::named("System.Byte")),
        ));
        assert_eq!(
            render(&member).messages(),
            vec!["UnsupportedUnsafeMethod_VisualBasicUsage"]
        );
    }
}
