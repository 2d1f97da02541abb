//! The per-language syntax generator strategies.
//!
//! Each target language implements [`SyntaxGenerator`]: a dispatch table keyed
//! by member subgroup, where each branch performs a bounded sequence of
//! conditional writes to the sink. The strategies are pure functions of the
//! descriptor apart from their one-shot initialization configuration.

pub mod aspnet;
pub mod csharp;
pub mod fsharp;
pub mod jscript;
pub mod jsharp;
pub mod managed_cpp;
pub mod shared;
pub mod vb_usage;
pub mod visual_basic;
pub mod xaml;
pub mod xsharp;

pub use aspnet::AspNetSyntaxGenerator;
pub use csharp::CSharpSyntaxGenerator;
pub use fsharp::FSharpSyntaxGenerator;
pub use jscript::JScriptSyntaxGenerator;
pub use jsharp::JSharpSyntaxGenerator;
pub use managed_cpp::ManagedCppSyntaxGenerator;
pub use vb_usage::VisualBasicUsageSyntaxGenerator;
pub use visual_basic::VisualBasicSyntaxGenerator;
pub use xaml::XamlUsageSyntaxGenerator;
pub use xsharp::XSharpSyntaxGenerator;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::model::{MemberDescriptor, Subgroup};
use crate::writer::SyntaxWriter;
use strum::{Display, EnumString};

/// Identifies a target language. The `Display` form is the language id used
/// in block markers and unsupported-construct message ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Language {
    CSharp,
    VisualBasic,
    VisualBasicUsage,
    FSharp,
    JSharp,
    JScript,
    ManagedCPlusPlus,
    XSharp,
    AspNet,
    XamlUsage,
}

/// One declaration- or usage-syntax strategy for one target language.
///
/// Implementations must be side-effect-free except for writes to the supplied
/// writer, must treat missing optional metadata as "feature not present", and
/// must emit a single descriptive placeholder message (never partial syntax)
/// for constructs the language cannot express.
pub trait SyntaxGenerator: std::fmt::Debug + Send + Sync {
    fn language(&self) -> Language;

    fn style_id(&self) -> &'static str {
        "declaration"
    }

    /// One-shot configuration at host startup; read-only afterwards.
    fn initialize(&mut self, config: &GeneratorConfig) -> Result<()> {
        let _ = config;
        Ok(())
    }

    /// Renders one self-contained syntax block for the member. Opens and
    /// closes the block around the subgroup dispatch so the sink is never
    /// left with an unbalanced block, even on the error path.
    fn write_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
        tracing::debug!(
            member = %member.name,
            subgroup = ?member.subgroup,
            language = %self.language(),
            "Rendering syntax block"
        );
        writer.start_block(&self.language().to_string(), self.style_id());
        let result = self.write_member(member, writer);
        writer.end_block();
        result
    }

    /// Subgroup dispatch. Each branch is independently sequential.
    fn write_member(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()> {
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
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()>;
    fn write_class_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()>;
    fn write_structure_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()>;
    fn write_interface_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()>;
    fn write_delegate_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()>;
    fn write_enumeration_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()>;
    fn write_constructor_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()>;
    fn write_method_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()>;
    fn write_operator_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()>;
    fn write_cast_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()>;
    fn write_property_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()>;
    fn write_event_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()>;
    fn write_field_syntax(
        &self,
        member: &MemberDescriptor,
        writer: &mut dyn SyntaxWriter,
    ) -> Result<()>;
}
