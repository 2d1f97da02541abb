//! ASP.NET markup usage strategy.
//!
//! Server controls (types deriving from `System.Web.UI.Control`) and their
//! properties and events can be used declaratively from .aspx markup. This
//! generator renders that tag form; every other construct has no markup
//! surface and gets the usual placeholder message.

use crate::error::Result;
use crate::generators::{shared, Language, SyntaxGenerator};
use crate::model::{MemberDescriptor, TypeInfo};
use crate::writer::SyntaxWriter;

const CONTROL_BASE: &str = "System.Web.UI.Control";

#[derive(Debug, Default)]
pub struct AspNetSyntaxGenerator;

impl AspNetSyntaxGenerator {
    pub fn new() -> Self {
        Self
    }

    fn is_server_control(info: Option<&TypeInfo>) -> bool {
        info.is_some_and(|info| info.is_or_derives_from(CONTROL_BASE))
    }

    fn write_tag_open(&self, control_name: &str, writer: &mut dyn SyntaxWriter) {
        writer.write_string("<asp:");
        writer.write_identifier(control_name);
    }

    fn write_tag_close(&self, writer: &mut dyn SyntaxWriter) {
        writer.write_string(" runat=\"server\" />");
    }

    fn write_unsupported(&self, construct: &str, writer: &mut dyn SyntaxWriter) {
        shared::unsupported(writer, construct, self.language());
    }
}

impl SyntaxGenerator for AspNetSyntaxGenerator {
    fn language(&self) -> Language {
        Language::AspNet
    }

    fn style_id(&self) -> &'static str {
        "usage"
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
        let info = member.type_data.as_ref().map(|data| &data.info);
        if !Self::is_server_control(info) {
            self.write_unsupported("Class", writer);
            return Ok(());
        }
        self.write_tag_open(&member.name, writer);
        self.write_tag_close(writer);
        Ok(())
    }

    fn write_structure_syntax(
        &self,
        _member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_unsupported("Structure", writer);
        Ok(())
    }

    fn write_interface_syntax(
        &self,
        _member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_unsupported("Interface", writer);
        Ok(())
    }

    fn write_delegate_syntax(
        &self,
        _member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_unsupported("Delegate", writer);
        Ok(())
    }

    fn write_enumeration_syntax(
        &self,
        _member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_unsupported("Enumeration", writer);
        Ok(())
    }

    fn write_constructor_syntax(
        &self,
        _member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_unsupported("Constructor", writer);
        Ok(())
    }

    fn write_method_syntax(
        &self,
        _member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_unsupported("Method", writer);
        Ok(())
    }

    fn write_operator_syntax(
        &self,
        _member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_unsupported("Operator", writer);
        Ok(())
    }

    fn write_cast_syntax(
        &self,
        _member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_unsupported("Cast", writer);
        Ok(())
    }

    fn write_property_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        if !Self::is_server_control(member.containing_type_info.as_ref()) {
            self.write_unsupported("Property", writer);
            return Ok(());
        }
        if !member.parameters.is_empty() {
            self.write_unsupported("Indexer", writer);
            return Ok(());
        }
        self.write_tag_open(member.containing_type_name(), writer);
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        writer.write_string("=\"");
        let placeholder = member
            .return_type
            .as_ref()
            .map(|r| r.display_name().to_string())
            .unwrap_or_else(|| "value".to_string());
        writer.write_parameter(&placeholder);
        writer.write_string("\"");
        self.write_tag_close(writer);
        Ok(())
    }

    fn write_event_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        if !Self::is_server_control(member.containing_type_info.as_ref()) {
            self.write_unsupported("Event", writer);
            return Ok(());
        }
        self.write_tag_open(member.containing_type_name(), writer);
        writer.write_string(" On");
        writer.write_identifier(&member.name);
        writer.write_string("=\"");
        match &member.event_data {
            Some(data) => writer.write_reference_link(data.handler_type.full_name()),
            None => writer.write_parameter("eventHandler"),
        }
        writer.write_string("\"");
        self.write_tag_close(writer);
        Ok(())
    }

    fn write_field_syntax(
        &self,
        _member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_unsupported("Field", writer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TypeData, TypeReference};
    use crate::writer::TokenWriter;
    use pretty_assertions::assert_eq;

    fn control_info(full_name: &str) -> TypeInfo {
        TypeInfo {
            full_name: full_name.into(),
            ancestors: vec![
                "System.Web.UI.WebControls.WebControl".into(),
                CONTROL_BASE.into(),
                "System.Object".into(),
            ],
            ..Default::default()
        }
    }

    fn render(member: &MemberDescriptor) -> TokenWriter {
        let mut writer = TokenWriter::new();
        AspNetSyntaxGenerator::new()
            .write_syntax(member, &mut writer)
            .unwrap();
        assert!(writer.is_balanced());
        writer
    }

    #[test]
    fn test_server_control_class_renders_tag() {
        let member = MemberDescriptor::class("Button").with_type_data(TypeData {
            info: control_info("System.Web.UI.WebControls.Button"),
            ..Default::default()
        });
        assert_eq!(render(&member).text(), "<asp:Button runat=\"server\" />");
    }

    #[test]
    fn test_non_control_class_is_unsupported() {
        let member = MemberDescriptor::class("StringBuilder");
        assert_eq!(render(&member).messages(), vec!["UnsupportedClass_AspNet"]);
    }

    #[test]
    fn test_control_property_renders_attribute() {
        let member = MemberDescriptor::property("Text")
            .with_containing_type_info(control_info("System.Web.UI.WebControls.Label"))
            .with_return_type(TypeReference::named("System.String"));
        assert_eq!(
            render(&member).text(),
            "<asp:Label Text=\"String\" runat=\"server\" />"
        );
    }

    #[test]
    fn test_control_indexer_is_unsupported() {
        let member = MemberDescriptor::property("Item")
            .with_containing_type_info(control_info("System.Web.UI.WebControls.ListBox"))
            .with_parameter(crate::model::ParameterDescriptor::new(
                "index",
                TypeReference::named("System.Int32"),
            ));
        assert_eq!(render(&member).messages(), vec!["UnsupportedIndexer_AspNet"]);
    }

    #[test]
    fn test_control_event_renders_on_prefixed_attribute() {
        let member = MemberDescriptor::event(
            "Click",
            TypeReference::named("System.EventHandler"),
        )
        .with_containing_type_info(control_info("System.Web.UI.WebControls.Button"));
        assert_eq!(
            render(&member).text(),
            "<asp:Button OnClick=\"EventHandler\" runat=\"server\" />"
        );
    }

    #[test]
    fn test_method_is_unsupported() {
        let member = MemberDescriptor::method("DataBind")
            .with_containing_type_info(control_info("System.Web.UI.WebControls.Repeater"));
        assert_eq!(render(&member).messages(), vec!["UnsupportedMethod_AspNet"]);
    }

    #[test]
    fn test_property_on_non_control_parent_is_unsupported() {
        let member = MemberDescriptor::property("Length")
            .with_containing_type_info(TypeInfo::new("System.String"));
        assert_eq!(
            render(&member).messages(),
            vec!["UnsupportedProperty_AspNet"]
        );
    }
}
