//! Shared emission vocabulary used by every generator strategy.
//!
//! These are pure functions over the descriptor and writer; each language
//! strategy composes them by explicit delegation rather than inheritance.

use crate::model::{
    ArgumentValue, AttributeApplication, LayoutKind, LiteralValue, MemberDescriptor, TypeReference,
};
use crate::writer::SyntaxWriter;

use super::Language;

/// Emits the single descriptive placeholder for a construct the target
/// language cannot express, e.g. `UnsupportedOperator_CSharp`.
pub fn unsupported(writer: &mut dyn SyntaxWriter, construct: &str, language: Language) {
    tracing::trace!(construct, %language, "Unsupported construct placeholder");
    writer.write_message(&format!("Unsupported{construct}_{language}"));
}

/// Compiler-synthesized attributes that are never rendered in the generic
/// attribute list because the languages express them through keywords
/// (`this` receiver, `fixed` buffer, `params` array, ...).
pub const SUPPRESSED_ATTRIBUTES: &[&str] = &[
    "System.Runtime.CompilerServices.ExtensionAttribute",
    "System.Runtime.CompilerServices.FixedBufferAttribute",
    "System.ParamArrayAttribute",
    "System.Runtime.CompilerServices.IsByRefLikeAttribute",
    "System.Runtime.CompilerServices.IsReadOnlyAttribute",
];

/// The generic attribute list minus the compiler-synthesized set.
pub fn visible_attributes(member: &MemberDescriptor) -> Vec<&AttributeApplication> {
    member
        .attributes
        .iter()
        .filter(|a| !SUPPRESSED_ATTRIBUTES.contains(&a.attribute_type.full_name()))
        .collect()
}

fn enum_members(enum_type: &str, members: &[&str]) -> ArgumentValue {
    ArgumentValue::EnumMembers {
        enum_type: TypeReference::named(enum_type),
        members: members.iter().map(|m| m.to_string()).collect(),
    }
}

/// Synthesizes the interop attributes from the dedicated metadata fields.
/// The order is fixed: ComImport, StructLayout, FieldOffset, DllImport,
/// PreserveSig. These render before the generic attribute list.
pub fn interop_attributes(member: &MemberDescriptor) -> Vec<AttributeApplication> {
    let interop = &member.interop;
    let mut attributes = Vec::new();

    if interop.com_import {
        attributes.push(AttributeApplication::new(
            "System.Runtime.InteropServices.ComImportAttribute",
        ));
    }

    if let Some(kind) = interop.layout_kind {
        let kind_member = match kind {
            LayoutKind::Auto => "Auto",
            LayoutKind::Sequential => "Sequential",
            LayoutKind::Explicit => "Explicit",
        };
        let mut attribute = AttributeApplication::new(
            "System.Runtime.InteropServices.StructLayoutAttribute",
        )
        .with_positional(enum_members(
            "System.Runtime.InteropServices.LayoutKind",
            &[kind_member],
        ));
        if let Some(pack) = interop.layout_pack {
            attribute = attribute.with_named(
                "Pack",
                ArgumentValue::Literal(LiteralValue::Integer(i64::from(pack))),
            );
        }
        if let Some(char_set) = &interop.layout_char_set {
            attribute = attribute.with_named(
                "CharSet",
                enum_members("System.Runtime.InteropServices.CharSet", &[char_set]),
            );
        }
        attributes.push(attribute);
    }

    if let Some(offset) = interop.field_offset {
        attributes.push(
            AttributeApplication::new("System.Runtime.InteropServices.FieldOffsetAttribute")
                .with_positional(ArgumentValue::Literal(LiteralValue::Integer(i64::from(
                    offset,
                )))),
        );
    }

    if let Some(import) = &interop.dll_import {
        let mut attribute =
            AttributeApplication::new("System.Runtime.InteropServices.DllImportAttribute")
                .with_positional(ArgumentValue::Literal(LiteralValue::Str(
                    import.module_name.clone(),
                )));
        if let Some(entry_point) = &import.entry_point {
            attribute = attribute.with_named(
                "EntryPoint",
                ArgumentValue::Literal(LiteralValue::Str(entry_point.clone())),
            );
        }
        if let Some(char_set) = &import.char_set {
            attribute = attribute.with_named(
                "CharSet",
                enum_members("System.Runtime.InteropServices.CharSet", &[char_set]),
            );
        }
        if let Some(convention) = &import.calling_convention {
            attribute = attribute.with_named(
                "CallingConvention",
                enum_members(
                    "System.Runtime.InteropServices.CallingConvention",
                    &[convention],
                ),
            );
        }
        if let Some(best_fit) = import.best_fit_mapping {
            attribute = attribute.with_named(
                "BestFitMapping",
                ArgumentValue::Literal(LiteralValue::Boolean(best_fit)),
            );
        }
        if import.exact_spelling {
            attribute = attribute.with_named(
                "ExactSpelling",
                ArgumentValue::Literal(LiteralValue::Boolean(true)),
            );
        }
        if import.set_last_error {
            attribute = attribute.with_named(
                "SetLastError",
                ArgumentValue::Literal(LiteralValue::Boolean(true)),
            );
        }
        if let Some(throw_on_unmappable) = import.throw_on_unmappable_char {
            attribute = attribute.with_named(
                "ThrowOnUnmappableChar",
                ArgumentValue::Literal(LiteralValue::Boolean(throw_on_unmappable)),
            );
        }
        attributes.push(attribute);
    }

    if interop.preserve_sig {
        attributes.push(AttributeApplication::new(
            "System.Runtime.InteropServices.PreserveSigAttribute",
        ));
    }

    attributes
}

/// Interop attributes followed by the visible generic attributes, in the
/// order every generator renders them.
pub fn all_rendered_attributes(member: &MemberDescriptor) -> Vec<AttributeApplication> {
    let mut attributes = interop_attributes(member);
    attributes.extend(visible_attributes(member).into_iter().cloned());
    attributes
}

/// Attribute display name with the conventional `Attribute` suffix removed.
pub fn attribute_display_name(attribute: &AttributeApplication) -> String {
    let name = attribute.attribute_type.display_name();
    name.strip_suffix("Attribute").unwrap_or(name).to_string()
}

/// Breaks the line and indents when writing `pending_width` more characters
/// would push past the writer's column budget.
pub fn write_with_line_break_if_needed(
    writer: &mut dyn SyntaxWriter,
    pending_width: usize,
    indent: &str,
) {
    if writer.position() + pending_width > writer.max_width() {
        writer.write_line();
        writer.write_string(indent);
    }
}

/// How a language spells its literal constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralStyle {
    /// C#, F#, J#, JScript: `null`, `true`, `'c'`, `1.5f`.
    CSharpFamily,
    /// Visual Basic: `Nothing`, `True`, `"c"c`, `1.5F`/`R`/`D` suffixes.
    VisualBasic,
    /// C++/CLI: `nullptr`, `true`, `L'c'`, `L"..."`.
    ManagedCpp,
    /// X#: `NULL`, `TRUE`/`FALSE`, C#-like literals otherwise.
    XSharp,
}

fn float_text(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Typed-literal formatting table shared by the declaration generators:
/// string to quoted, boolean to keyword, char to quoted, integral bare,
/// float suffixed.
pub fn literal_text(value: &LiteralValue, style: LiteralStyle) -> String {
    match value {
        LiteralValue::Null => match style {
            LiteralStyle::CSharpFamily => "null".to_string(),
            LiteralStyle::VisualBasic => "Nothing".to_string(),
            LiteralStyle::ManagedCpp => "nullptr".to_string(),
            LiteralStyle::XSharp => "NULL".to_string(),
        },
        LiteralValue::Boolean(b) => match style {
            LiteralStyle::CSharpFamily | LiteralStyle::ManagedCpp => {
                if *b { "true" } else { "false" }.to_string()
            }
            LiteralStyle::VisualBasic => if *b { "True" } else { "False" }.to_string(),
            LiteralStyle::XSharp => if *b { "TRUE" } else { "FALSE" }.to_string(),
        },
        LiteralValue::Char(c) => match style {
            LiteralStyle::CSharpFamily | LiteralStyle::XSharp => format!("'{c}'"),
            LiteralStyle::VisualBasic => format!("\"{c}\"c"),
            LiteralStyle::ManagedCpp => format!("L'{c}'"),
        },
        LiteralValue::Str(s) => match style {
            LiteralStyle::ManagedCpp => format!("L\"{s}\""),
            _ => format!("\"{s}\""),
        },
        LiteralValue::Integer(i) => i.to_string(),
        LiteralValue::Single(f) => match style {
            LiteralStyle::VisualBasic => format!("{}F", float_text(*f)),
            _ => format!("{}f", float_text(*f)),
        },
        LiteralValue::Double(f) => match style {
            LiteralStyle::VisualBasic => format!("{}R", float_text(*f)),
            _ => float_text(*f),
        },
        LiteralValue::Decimal(text) => match style {
            LiteralStyle::VisualBasic => format!("{text}D"),
            LiteralStyle::CSharpFamily => format!("{text}m"),
            _ => text.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DllImportData, InteropData};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unsupported_message_format() {
        let mut writer = crate::writer::TokenWriter::new();
        unsupported(&mut writer, "Operator", Language::CSharp);
        assert_eq!(writer.messages(), vec!["UnsupportedOperator_CSharp"]);
    }

    #[test]
    fn test_suppressed_attributes_filtered() {
        let member = MemberDescriptor::method("M")
            .with_attribute(AttributeApplication::new(
                "System.Runtime.CompilerServices.ExtensionAttribute",
            ))
            .with_attribute(AttributeApplication::new("System.ObsoleteAttribute"));
        let visible = visible_attributes(&member);
        assert_eq!(visible.len(), 1);
        assert_eq!(
            visible[0].attribute_type.full_name(),
            "System.ObsoleteAttribute"
        );
    }

    #[test]
    fn test_interop_attribute_order() {
        let mut member = MemberDescriptor::method("Native");
        member.interop = InteropData {
            com_import: true,
            layout_kind: Some(LayoutKind::Sequential),
            dll_import: Some(DllImportData {
                module_name: "user32.dll".into(),
                ..Default::default()
            }),
            preserve_sig: true,
            ..Default::default()
        };
        let names: Vec<String> = interop_attributes(&member)
            .iter()
            .map(attribute_display_name)
            .collect();
        assert_eq!(
            names,
            vec!["ComImport", "StructLayout", "DllImport", "PreserveSig"]
        );
    }

    #[test]
    fn test_literal_text_table() {
        assert_eq!(
            literal_text(&LiteralValue::Boolean(true), LiteralStyle::CSharpFamily),
            "true"
        );
        assert_eq!(
            literal_text(&LiteralValue::Boolean(true), LiteralStyle::VisualBasic),
            "True"
        );
        assert_eq!(
            literal_text(&LiteralValue::Char('a'), LiteralStyle::VisualBasic),
            "\"a\"c"
        );
        assert_eq!(
            literal_text(&LiteralValue::Str("hi".into()), LiteralStyle::ManagedCpp),
            "L\"hi\""
        );
        assert_eq!(
            literal_text(&LiteralValue::Integer(42), LiteralStyle::CSharpFamily),
            "42"
        );
        assert_eq!(
            literal_text(&LiteralValue::Single(1.0), LiteralStyle::CSharpFamily),
            "1.0f"
        );
        assert_eq!(
            literal_text(&LiteralValue::Null, LiteralStyle::XSharp),
            "NULL"
        );
    }

    #[test]
    fn test_attribute_display_name_strips_suffix() {
        let attribute = AttributeApplication::new("System.ObsoleteAttribute");
        assert_eq!(attribute_display_name(&attribute), "Obsolete");
    }

    #[test]
    fn test_line_break_when_over_budget() {
        let mut writer = crate::writer::TokenWriter::with_max_width(10);
        writer.write_string("0123456789");
        write_with_line_break_if_needed(&mut writer, 5, "    ");
        assert_eq!(writer.position(), 4);
    }
}
