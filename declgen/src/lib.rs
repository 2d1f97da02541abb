pub use declgen_core::{config, error, generators, model, registry, writer};
pub use declgen_core::{
    DeclgenConfig, DeclgenError, GeneratorConfig, Language, MemberDescriptor, Result, Subgroup,
    SyntaxGenerator, SyntaxWriter, TokenWriter, TypeReference, Visibility,
};

pub mod prelude {
    pub use declgen_core::generators::{
        AspNetSyntaxGenerator, CSharpSyntaxGenerator, FSharpSyntaxGenerator,
        JScriptSyntaxGenerator, JSharpSyntaxGenerator, ManagedCppSyntaxGenerator,
        VisualBasicSyntaxGenerator, VisualBasicUsageSyntaxGenerator, XSharpSyntaxGenerator,
        XamlUsageSyntaxGenerator,
    };
    pub use declgen_core::registry::{all_generators, create, find};
}

/// Installs the default tracing subscriber, honoring `RUST_LOG`. Hosts that
/// bring their own subscriber skip this.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use declgen_core::model::{MemberDescriptor, ParameterDescriptor, TypeReference};
    use declgen_core::writer::TokenWriter;
    use declgen_core::SyntaxGenerator;
    use pretty_assertions::assert_eq;

    // The full pipeline as a host would drive it: look a generator up in the
    // registry, initialize it, render one member.
    #[test]
    fn test_registry_to_rendering_round_trip() {
        let mut generator = create("cs").unwrap();
        generator
            .initialize(&declgen_core::GeneratorConfig::default())
            .unwrap();

        let member = MemberDescriptor::method("Add")
            .with_static()
            .with_visibility(declgen_core::Visibility::Public)
            .with_return_type(TypeReference::named("System.Int32"))
            .with_parameter(ParameterDescriptor::new(
                "a",
                TypeReference::named("System.Int32"),
            ))
            .with_parameter(ParameterDescriptor::new(
                "b",
                TypeReference::named("System.Int32"),
            ));

        let mut writer = TokenWriter::new();
        generator.write_syntax(&member, &mut writer).unwrap();
        assert!(writer.is_balanced());
        assert_eq!(writer.text(), "public static int Add(int a, int b)");
    }

    #[test]
    fn test_every_registered_generator_renders_a_method() {
        let member = MemberDescriptor::method("Focus").with_containing_type("Widgets.Panel");
        for descriptor in all_generators() {
            let mut generator = descriptor.create();
            generator
                .initialize(&declgen_core::GeneratorConfig::default())
                .unwrap();
            let mut writer = TokenWriter::new();
            generator.write_syntax(&member, &mut writer).unwrap();
            assert!(writer.is_balanced(), "{} left open blocks", descriptor.id());
        }
    }

    #[test]
    fn test_visual_basic_generator_resolves_by_alias() {
        let generator = VisualBasicSyntaxGenerator::new();
        assert_eq!(
            create("vb").unwrap().language(),
            SyntaxGenerator::language(&generator)
        );
    }
}
