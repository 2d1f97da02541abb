// Declgen - multi-language declaration and usage syntax generation for
// documentation tooling

// Common modules
pub mod config;
pub mod error;
pub mod model;
pub mod registry;
pub mod writer;

// The per-language generator strategies
pub mod generators;

// Re-export commonly used items for convenience
pub use config::{DeclgenConfig, GeneratorConfig, XamlConfig};
pub use error::{DeclgenError, Result};
pub use generators::{Language, SyntaxGenerator};
pub use model::{MemberDescriptor, Subgroup, TypeReference, Visibility};
pub use writer::{SyntaxWriter, Token, TokenKind, TokenWriter};
