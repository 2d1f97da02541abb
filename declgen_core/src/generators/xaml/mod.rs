//! XAML usage applicability engine.
//!
//! Unlike the declaration generators, this strategy does not print the
//! member's own syntax. It decides whether the member is usable from markup
//! at all, and renders either a usage example (object element, property
//! element, attribute, or content element form) or one canned boilerplate
//! message naming the first reason usage does not apply. The decision order
//! is fixed; reordering the checks changes which reason wins.

mod filter;

pub use filter::XamlFilter;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::generators::{Language, SyntaxGenerator};
use crate::model::{MemberDescriptor, PropertyData, Subgroup, TypeInfo, Visibility};
use crate::writer::SyntaxWriter;
use strum::Display;
use tracing::debug;

pub const OBJECT_ELEMENT_USAGE: &str = "xamlObjectElementUsage";
pub const PROPERTY_ELEMENT_USAGE: &str = "xamlPropertyElementUsage";
pub const ATTRIBUTE_USAGE: &str = "xamlAttributeUsage";
pub const CONTENT_ELEMENT_USAGE: &str = "xamlContentElementUsage";
pub const BOILERPLATE: &str = "xamlBoilerplate";

/// The closed set of reasons a member gets boilerplate instead of a usage
/// example. The `Display` form is the message id emitted to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "camelCase")]
pub enum Boilerplate {
    NonXamlAssembly,
    AbstractClass,
    StaticClass,
    NoDefaultConstructor,
    NoDefaultConstructorWithTypeConverter,
    ExcludedSubclass,
    StructureOverview,
    InterfaceOverview,
    DelegateOverview,
    EnumerationOverview,
    MethodOverview,
    ConstructorOverview,
    FieldOverview,
    ParentIsInterface,
    ParentIsStaticClass,
    ParentIsExcludedSubclass,
    ParentDoesNotSupportXaml,
    MemberNotPublic,
    MemberIsAbstract,
    PropertyIsIndexer,
    PropertyIsReadOnly,
    AbstractReturnType,
    NonXamlReturnType,
}

#[derive(Debug, Default)]
pub struct XamlUsageSyntaxGenerator {
    filter: XamlFilter,
}

impl XamlUsageSyntaxGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn write_boilerplate(&self, writer: &mut dyn SyntaxWriter, reason: Boilerplate) {
        debug!(reason = %reason, "XAML usage not applicable");
        writer.start_sub_block(BOILERPLATE);
        writer.write_message(&reason.to_string());
        writer.end_sub_block();
    }

    /// The applicability checks shared by properties and events, in their
    /// fixed evaluation order. Returns the first blocking reason, if any.
    fn member_usage_blocker(&self, member: &MemberDescriptor) -> Option<Boilerplate> {
        if member.containing_type_subgroup == Some(Subgroup::Interface) {
            return Some(Boilerplate::ParentIsInterface);
        }
        if let Some(parent) = &member.containing_type_info {
            if parent.is_static_class() {
                return Some(Boilerplate::ParentIsStaticClass);
            }
            if self.filter.is_excluded(parent) {
                return Some(Boilerplate::ParentIsExcludedSubclass);
            }
            if !Self::parent_supports_xaml(parent, member) {
                return Some(Boilerplate::ParentDoesNotSupportXaml);
            }
        }
        if member.visibility != Visibility::Public {
            return Some(Boilerplate::MemberNotPublic);
        }
        if member.is_abstract {
            return Some(Boilerplate::MemberIsAbstract);
        }
        None
    }

    /// A parent type can appear in markup when it is abstract (some concrete
    /// subclass will), constructible, convertible from a string, or when the
    /// member itself yields a simple value markup can parse.
    fn parent_supports_xaml(parent: &TypeInfo, member: &MemberDescriptor) -> bool {
        parent.is_abstract
            || parent.has_default_constructor
            || parent.has_type_converter
            || member
                .return_type
                .as_ref()
                .is_some_and(|r| r.is_simple_value_type())
    }

    fn write_object_element_usage(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) {
        writer.start_sub_block(OBJECT_ELEMENT_USAGE);
        writer.write_string("<");
        writer.write_identifier(&member.name);
        if member.is_generic() {
            let arguments = member
                .generic_parameters
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            writer.write_string(" x:TypeArguments=\"");
            writer.write_parameter(&arguments);
            writer.write_string("\"");
        }
        if let Some(uri) = self
            .filter
            .markup_uris(&member.containing_assembly, &member.namespace_name)
            .first()
        {
            writer.write_string(" xmlns=\"");
            writer.write_string(uri);
            writer.write_string("\"");
        }

        let content_property = member
            .type_data
            .as_ref()
            .and_then(|data| data.content_property.as_deref());
        match content_property {
            Some(property_name) => {
                writer.write_string(">");
                writer.write_line();
                writer.write_string("  ");
                let target = format!("{}.{}", member.name, property_name);
                writer.write_reference_link_with_text(&target, property_name);
                writer.write_line();
                writer.write_string("</");
                writer.write_identifier(&member.name);
                writer.write_string(">");
            }
            None => writer.write_string(" .../>"),
        }
        writer.end_sub_block();
    }

    fn write_attribute_usage(
        &self,
        member: &MemberDescriptor,
        value_placeholder: &str,
        writer: &mut dyn SyntaxWriter,
    ) {
        writer.start_sub_block(ATTRIBUTE_USAGE);
        writer.write_string("<");
        writer.write_identifier("object");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        writer.write_string("=\"");
        writer.write_parameter(value_placeholder);
        writer.write_string("\" .../>");
        writer.end_sub_block();
    }

    fn write_property_element_usage(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) {
        writer.start_sub_block(PROPERTY_ELEMENT_USAGE);
        writer.write_string("<");
        writer.write_identifier("object");
        writer.write_string(">");
        writer.write_line();
        writer.write_string("  <");
        writer.write_identifier("object");
        writer.write_string(".");
        writer.write_identifier(&member.name);
        writer.write_string(">");
        if let Some(return_type) = &member.return_type {
            writer.write_line();
            writer.write_string("    <");
            writer.write_reference_link(return_type.full_name());
            writer.write_string(" .../>");
        }
        writer.write_line();
        writer.write_string("  </");
        writer.write_identifier("object");
        writer.write_string(".");
        writer.write_identifier(&member.name);
        writer.write_string(">");
        writer.write_line();
        writer.write_string("</");
        writer.write_identifier("object");
        writer.write_string(">");
        writer.end_sub_block();
    }

    fn write_content_element_usage(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) {
        let parent = member.containing_type_name();
        writer.start_sub_block(CONTENT_ELEMENT_USAGE);
        writer.write_string("<");
        writer.write_identifier(parent);
        writer.write_string(">");
        writer.write_line();
        writer.write_string("  ");
        writer.write_parameter("contents");
        writer.write_line();
        writer.write_string("</");
        writer.write_identifier(parent);
        writer.write_string(">");
        writer.end_sub_block();
    }
}

impl SyntaxGenerator for XamlUsageSyntaxGenerator {
    fn language(&self) -> Language {
        Language::XamlUsage
    }

    fn style_id(&self) -> &'static str {
        "usage"
    }

    fn initialize(&mut self, config: &GeneratorConfig) -> Result<()> {
        self.filter = XamlFilter::from_config(&config.xaml)?;
        Ok(())
    }

    /// The assembly allow-list gates everything. Members of non-XAML
    /// assemblies get the one assembly-level boilerplate and no per-kind
    /// reason, whatever else is true about them.
    fn write_member(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        if !self.filter.assembly_allowed(&member.containing_assembly) {
            self.write_boilerplate(writer, Boilerplate::NonXamlAssembly);
            return Ok(());
        }
        match member.subgroup {
            Subgroup::Namespace => self.write_namespace_syntax(member, writer),
            Subgroup::Class => self.write_class_syntax(member, writer),
            Subgroup::Structure => self.write_structure_syntax(member, writer),
            Subgroup::Interface => self.write_interface_syntax(member, writer),
            Subgroup::Delegate => self.write_delegate_syntax(member, writer),
            Subgroup::Enumeration => self.write_enumeration_syntax(member, writer),
            Subgroup::Constructor => self.write_constructor_syntax(member, writer),
            Subgroup::Method => self.write_method_syntax(member, writer),
            Subgroup::Operator => self.write_operator_syntax(member, writer),
            Subgroup::Cast => self.write_cast_syntax(member, writer),
            Subgroup::Property => self.write_property_syntax(member, writer),
            Subgroup::Event => self.write_event_syntax(member, writer),
            Subgroup::Field => self.write_field_syntax(member, writer),
        }
    }

    fn write_namespace_syntax(
        &self,
        _member: &MemberDescriptor,
        _writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        // Namespaces have no markup usage and no boilerplate either.
        Ok(())
    }

    fn write_class_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        let info = member
            .type_data
            .as_ref()
            .map(|data| data.info.clone())
            .unwrap_or_default();

        if member.is_static_class() {
            self.write_boilerplate(writer, Boilerplate::StaticClass);
        } else if member.is_abstract {
            self.write_boilerplate(writer, Boilerplate::AbstractClass);
        } else if !info.has_default_constructor {
            if info.has_type_converter {
                self.write_boilerplate(
                    writer,
                    Boilerplate::NoDefaultConstructorWithTypeConverter,
                );
            } else {
                self.write_boilerplate(writer, Boilerplate::NoDefaultConstructor);
            }
        } else if self.filter.is_excluded(&info) {
            self.write_boilerplate(writer, Boilerplate::ExcludedSubclass);
        } else {
            self.write_object_element_usage(member, writer);
        }
        Ok(())
    }

    fn write_structure_syntax(
        &self,
        _member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_boilerplate(writer, Boilerplate::StructureOverview);
        Ok(())
    }

    fn write_interface_syntax(
        &self,
        _member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_boilerplate(writer, Boilerplate::InterfaceOverview);
        Ok(())
    }

    fn write_delegate_syntax(
        &self,
        _member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_boilerplate(writer, Boilerplate::DelegateOverview);
        Ok(())
    }

    fn write_enumeration_syntax(
        &self,
        _member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_boilerplate(writer, Boilerplate::EnumerationOverview);
        Ok(())
    }

    fn write_constructor_syntax(
        &self,
        _member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_boilerplate(writer, Boilerplate::ConstructorOverview);
        Ok(())
    }

    fn write_method_syntax(
        &self,
        _member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_boilerplate(writer, Boilerplate::MethodOverview);
        Ok(())
    }

    fn write_operator_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_method_syntax(member, writer)
    }

    fn write_cast_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_method_syntax(member, writer)
    }

    fn write_property_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        if let Some(reason) = self.member_usage_blocker(member) {
            self.write_boilerplate(writer, reason);
            return Ok(());
        }
        let data = member.property_data.clone().unwrap_or_else(|| PropertyData {
            has_getter: true,
            has_setter: true,
            ..Default::default()
        });

        if !member.parameters.is_empty() {
            self.write_boilerplate(writer, Boilerplate::PropertyIsIndexer);
            return Ok(());
        }
        if data.is_content_property {
            self.write_content_element_usage(member, writer);
            return Ok(());
        }
        if data.has_getter && !data.has_setter {
            self.write_boilerplate(writer, Boilerplate::PropertyIsReadOnly);
            return Ok(());
        }

        let return_info = data.return_type_info.as_ref();
        if let Some(info) = return_info {
            if info.is_abstract && !info.has_type_converter {
                self.write_boilerplate(writer, Boilerplate::AbstractReturnType);
                return Ok(());
            }
        }

        let is_simple = member
            .return_type
            .as_ref()
            .is_some_and(|r| r.is_simple_value_type());
        let is_enumeration = return_info.is_some_and(|info| info.is_enumeration);
        if is_simple || is_enumeration {
            let placeholder = member
                .return_type
                .as_ref()
                .map(|r| r.display_name().to_string())
                .unwrap_or_else(|| "value".to_string());
            self.write_attribute_usage(member, &placeholder, writer);
            return Ok(());
        }

        // Complex-typed property. A constructible value type gets the
        // property-element form; a string-convertible one also gets the
        // attribute form. Both may apply.
        let constructible = return_info.is_some_and(|info| info.has_default_constructor);
        let convertible = return_info.is_some_and(|info| info.has_type_converter);
        if !constructible && !convertible {
            self.write_boilerplate(writer, Boilerplate::NonXamlReturnType);
            return Ok(());
        }
        if constructible {
            self.write_property_element_usage(member, writer);
        }
        if convertible {
            let placeholder = member
                .return_type
                .as_ref()
                .map(|r| r.display_name().to_string())
                .unwrap_or_else(|| "value".to_string());
            self.write_attribute_usage(member, &placeholder, writer);
        }
        Ok(())
    }

    fn write_event_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        if let Some(reason) = self.member_usage_blocker(member) {
            self.write_boilerplate(writer, reason);
            return Ok(());
        }
        writer.start_sub_block(ATTRIBUTE_USAGE);
        writer.write_string("<");
        writer.write_identifier("object");
        writer.write_string(" ");
        writer.write_identifier(&member.name);
        writer.write_string("=\"");
        match &member.event_data {
            Some(data) => writer.write_reference_link(data.handler_type.full_name()),
            None => writer.write_parameter("eventHandler"),
        }
        writer.write_string("\" .../>");
        writer.end_sub_block();
        Ok(())
    }

    fn write_field_syntax(
        &self,
        _member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        self.write_boilerplate(writer, Boilerplate::FieldOverview);
        Ok(())
    }
}
