//! Registration metadata for the generator strategies.
//!
//! A documentation host discovers the available languages through
//! [`all_generators`] and instantiates a fresh strategy per run through the
//! descriptor's factory, so no generator state is shared between runs.

use crate::config::GeneratorConfig;
use crate::error::{DeclgenError, Result};
use crate::generators::{
    AspNetSyntaxGenerator, CSharpSyntaxGenerator, FSharpSyntaxGenerator, JScriptSyntaxGenerator,
    JSharpSyntaxGenerator, Language, ManagedCppSyntaxGenerator, SyntaxGenerator,
    VisualBasicSyntaxGenerator, VisualBasicUsageSyntaxGenerator, XSharpSyntaxGenerator,
    XamlUsageSyntaxGenerator,
};

/// Everything a host needs to offer one language: naming, ordering in
/// language pickers, alternate ids, and a factory for fresh instances.
pub struct GeneratorDescriptor {
    pub display_name: &'static str,
    pub language: Language,
    pub style_id: &'static str,
    pub aliases: &'static [&'static str],
    /// Position in language pickers; lower sorts first.
    pub sort_order: u32,
    factory: fn() -> Box<dyn SyntaxGenerator>,
}

impl GeneratorDescriptor {
    /// A fresh, uninitialized strategy instance.
    pub fn create(&self) -> Box<dyn SyntaxGenerator> {
        (self.factory)()
    }

    /// The canonical language id.
    pub fn id(&self) -> String {
        self.language.to_string()
    }

    /// Whether `id` names this generator, by canonical id or alias,
    /// case-insensitively.
    pub fn matches(&self, id: &str) -> bool {
        self.id().eq_ignore_ascii_case(id)
            || self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(id))
    }

    /// The configuration this generator starts from when the host supplies
    /// no fragment of its own.
    pub fn default_config(&self) -> GeneratorConfig {
        GeneratorConfig::default()
    }

    /// The default configuration serialized for host configuration files.
    pub fn default_config_toml(&self) -> Result<String> {
        Ok(toml::to_string(&self.default_config())?)
    }
}

static DESCRIPTORS: &[GeneratorDescriptor] = &[
    GeneratorDescriptor {
        display_name: "C#",
        language: Language::CSharp,
        style_id: "declaration",
        aliases: &["c#", "cs"],
        sort_order: 10,
        factory: || Box::new(CSharpSyntaxGenerator::new()),
    },
    GeneratorDescriptor {
        display_name: "Visual Basic",
        language: Language::VisualBasic,
        style_id: "declaration",
        aliases: &["vb", "vb.net"],
        sort_order: 20,
        factory: || Box::new(VisualBasicSyntaxGenerator::new()),
    },
    GeneratorDescriptor {
        display_name: "Visual Basic (Usage)",
        language: Language::VisualBasicUsage,
        style_id: "usage",
        aliases: &["vb-usage"],
        sort_order: 25,
        factory: || Box::new(VisualBasicUsageSyntaxGenerator::new()),
    },
    GeneratorDescriptor {
        display_name: "Managed C++",
        language: Language::ManagedCPlusPlus,
        style_id: "declaration",
        aliases: &["cpp", "c++", "cpp-cli"],
        sort_order: 30,
        factory: || Box::new(ManagedCppSyntaxGenerator::new()),
    },
    GeneratorDescriptor {
        display_name: "F#",
        language: Language::FSharp,
        style_id: "declaration",
        aliases: &["f#", "fs"],
        sort_order: 40,
        factory: || Box::new(FSharpSyntaxGenerator::new()),
    },
    GeneratorDescriptor {
        display_name: "J#",
        language: Language::JSharp,
        style_id: "declaration",
        aliases: &["j#"],
        sort_order: 50,
        factory: || Box::new(JSharpSyntaxGenerator::new()),
    },
    GeneratorDescriptor {
        display_name: "JScript",
        language: Language::JScript,
        style_id: "declaration",
        aliases: &["js", "jscript.net"],
        sort_order: 60,
        factory: || Box::new(JScriptSyntaxGenerator::new()),
    },
    GeneratorDescriptor {
        display_name: "X#",
        language: Language::XSharp,
        style_id: "declaration",
        aliases: &["x#"],
        sort_order: 70,
        factory: || Box::new(XSharpSyntaxGenerator::new()),
    },
    GeneratorDescriptor {
        display_name: "ASP.NET",
        language: Language::AspNet,
        style_id: "usage",
        aliases: &["asp.net", "aspx"],
        sort_order: 80,
        factory: || Box::new(AspNetSyntaxGenerator::new()),
    },
    GeneratorDescriptor {
        display_name: "XAML",
        language: Language::XamlUsage,
        style_id: "usage",
        aliases: &["xaml"],
        sort_order: 90,
        factory: || Box::new(XamlUsageSyntaxGenerator::new()),
    },
];

/// All registered generators in display order.
pub fn all_generators() -> Vec<&'static GeneratorDescriptor> {
    let mut descriptors: Vec<_> = DESCRIPTORS.iter().collect();
    descriptors.sort_by_key(|d| d.sort_order);
    descriptors
}

/// Looks up a descriptor by canonical id or alias.
pub fn find(id: &str) -> Result<&'static GeneratorDescriptor> {
    DESCRIPTORS
        .iter()
        .find(|descriptor| descriptor.matches(id))
        .ok_or_else(|| DeclgenError::UnknownGenerator(id.to_string()))
}

/// Creates a fresh, uninitialized generator by canonical id or alias.
pub fn create(id: &str) -> Result<Box<dyn SyntaxGenerator>> {
    Ok(find(id)?.create())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_generators_are_listed_in_sort_order() {
        let descriptors = all_generators();
        assert_eq!(descriptors.len(), 10);
        assert!(
            descriptors
                .windows(2)
                .all(|pair| pair[0].sort_order <= pair[1].sort_order)
        );
    }

    #[test]
    fn test_ids_and_aliases_are_unique() {
        let mut seen = HashSet::new();
        for descriptor in all_generators() {
            assert!(seen.insert(descriptor.id().to_ascii_lowercase()));
            for alias in descriptor.aliases {
                assert!(seen.insert(alias.to_ascii_lowercase()), "duplicate {alias}");
            }
        }
    }

    #[test]
    fn test_create_by_canonical_id() {
        let generator = create("CSharp").unwrap();
        assert_eq!(generator.language(), Language::CSharp);
        assert_eq!(generator.style_id(), "declaration");
    }

    #[test]
    fn test_create_by_alias_is_case_insensitive() {
        assert_eq!(create("VB").unwrap().language(), Language::VisualBasic);
        assert_eq!(create("c++").unwrap().language(), Language::ManagedCPlusPlus);
        assert_eq!(create("XAML").unwrap().language(), Language::XamlUsage);
    }

    #[test]
    fn test_unknown_id_is_an_error() {
        let error = create("COBOL").unwrap_err();
        assert!(matches!(error, DeclgenError::UnknownGenerator(id) if id == "COBOL"));
    }

    #[test]
    fn test_descriptor_style_ids_match_instances() {
        for descriptor in all_generators() {
            assert_eq!(descriptor.style_id, descriptor.create().style_id());
        }
    }

    #[test]
    fn test_default_config_serializes() {
        let toml_text = find("CSharp").unwrap().default_config_toml().unwrap();
        assert!(toml_text.contains("render_references = true"));
    }
}
