//! Generation of resource-compiler inputs from a record: `version.h`
//! replacement headers and `VERSIONINFO` rc script blocks.
//!
//! Both renderings emit the tuple and its string form from the one
//! `VersionTuple`, so the consistency rules lint checks for hold by
//! construction in generated output.

use std::fmt::Write;

use crate::core::product::ProductInfo;

/// Escape a value for an rc string literal (quotes double inside).
fn rc_escape(value: &str) -> String {
    value.replace('"', "\"\"")
}

fn push_define(out: &mut String, key: &str, value: &str) {
    // Column alignment matches the hand-written headers this replaces.
    let _ = writeln!(out, "#define {:<22} {}", key, value);
}

/// Render a complete version header for one product.
///
/// The include guard is namespaced per product (`BITBOX_VERSION_H` instead
/// of a shared `VERSION_H`), so two products' headers can meet in one build
/// unit without one silently shadowing the other.
pub fn render_header(product: &ProductInfo) -> String {
    let guard = product.guard_symbol();
    let mut out = String::new();
    let _ = writeln!(out, "#ifndef {}", guard);
    let _ = writeln!(out, "#define {}", guard);
    out.push('\n');
    push_define(&mut out, "PRODUCT_ICON", &format!("{:?}", product.icon));
    push_define(&mut out, "PRODUCT_NAME", &format!("{:?}", product.name));
    out.push('\n');
    push_define(
        &mut out,
        "FILE_VERSION",
        &product.file_version.to_string().replace('.', ","),
    );
    push_define(
        &mut out,
        "FILE_VERSION_STR",
        &format!("{:?}", product.file_version.to_string()),
    );
    push_define(
        &mut out,
        "PRODUCT_VERSION",
        &product.product_version.to_string().replace('.', ","),
    );
    push_define(
        &mut out,
        "PRODUCT_VERSION_STR",
        &format!("{:?}", product.product_version.to_string()),
    );
    push_define(&mut out, "COMPANY_NAME", &format!("{:?}", product.company));
    push_define(
        &mut out,
        "INTERNAL_NAME",
        &format!("{:?}", product.internal_name),
    );
    push_define(
        &mut out,
        "FILE_DESCRIPTION",
        &format!("{:?}", product.description),
    );
    push_define(
        &mut out,
        "LEGAL_COPYRIGHT",
        &format!("{:?}", product.copyright),
    );
    push_define(
        &mut out,
        "ORIGINAL_FILE_NAME",
        &format!("{:?}", product.original_file_name),
    );
    push_define(
        &mut out,
        "ORGANIZATION_DOMAIN",
        &format!("{:?}", product.domain),
    );
    out.push('\n');
    let _ = writeln!(out, "#endif // {}", guard);
    out
}

/// Render a `VERSIONINFO` resource script block for one product, with the
/// icon statement. The string table uses the usual US-English/Unicode
/// translation (040904b0), the key set winres populates.
pub fn render_rc(product: &ProductInfo) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "1 ICON {:?}", product.icon);
    out.push('\n');
    let _ = writeln!(out, "1 VERSIONINFO");
    let _ = writeln!(out, "FILEVERSION {}", product.file_version.as_quad());
    let _ = writeln!(out, "PRODUCTVERSION {}", product.product_version.as_quad());
    let _ = writeln!(out, "FILEFLAGSMASK 0x3fL");
    let _ = writeln!(out, "FILEFLAGS 0x0L");
    let _ = writeln!(out, "FILEOS 0x40004L");
    let _ = writeln!(out, "FILETYPE 0x1L");
    let _ = writeln!(out, "FILESUBTYPE 0x0L");
    let _ = writeln!(out, "BEGIN");
    let _ = writeln!(out, "    BLOCK \"StringFileInfo\"");
    let _ = writeln!(out, "    BEGIN");
    let _ = writeln!(out, "        BLOCK \"040904b0\"");
    let _ = writeln!(out, "        BEGIN");
    let values = [
        ("CompanyName", product.company.clone()),
        ("FileDescription", product.description.clone()),
        ("FileVersion", product.file_version.to_string()),
        ("InternalName", product.internal_name.clone()),
        ("LegalCopyright", product.copyright.clone()),
        ("OriginalFilename", product.original_file_name.clone()),
        ("ProductName", product.name.clone()),
        ("ProductVersion", product.product_version.to_string()),
    ];
    for (key, value) in values {
        let _ = writeln!(
            out,
            "            VALUE \"{}\", \"{}\"",
            key,
            rc_escape(&value)
        );
    }
    let _ = writeln!(out, "        END");
    let _ = writeln!(out, "    END");
    let _ = writeln!(out, "    BLOCK \"VarFileInfo\"");
    let _ = writeln!(out, "    BEGIN");
    let _ = writeln!(out, "        VALUE \"Translation\", 0x409, 1200");
    let _ = writeln!(out, "    END");
    let _ = writeln!(out, "END");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::header::ParsedHeader;
    use crate::core::lint;
    use crate::core::manifest;

    #[test]
    fn rendered_header_round_trips_through_the_parser() {
        for product in manifest::builtin_products() {
            let text = render_header(product);
            let parsed = ParsedHeader::parse(&text, None).unwrap();
            assert_eq!(parsed.guard, Some(product.guard_symbol()));
            assert_eq!(&parsed.to_product().unwrap(), product);
        }
    }

    #[test]
    fn rendered_header_passes_lint() {
        for product in manifest::builtin_products() {
            let text = render_header(product);
            let parsed = ParsedHeader::parse(&text, None).unwrap();
            let findings = lint::lint_header(&parsed);
            assert!(findings.is_empty(), "{}: {:?}", product.name, findings);
        }
    }

    #[test]
    fn rendered_headers_have_distinct_guards() {
        let products = manifest::builtin_products();
        let headers: Vec<_> = products
            .iter()
            .map(|p| ParsedHeader::parse(&render_header(p), None).unwrap())
            .collect();
        let subjects: Vec<_> = headers.iter().map(lint::LintSubject::from_header).collect();
        assert!(lint::lint_set(&subjects).is_empty());
    }

    #[test]
    fn header_emits_tuple_and_string_consistently() {
        let product = manifest::find(manifest::builtin_products(), "bitbox").unwrap();
        let text = render_header(product);
        assert!(text.contains("#define FILE_VERSION           0,1,0"));
        assert!(text.contains("#define FILE_VERSION_STR       \"0.1.0\""));
        assert!(text.contains("#ifndef BITBOX_VERSION_H"));
        assert!(text.contains("#endif // BITBOX_VERSION_H"));
    }

    #[test]
    fn rc_block_has_quad_versions_and_string_table() {
        let product = manifest::find(manifest::builtin_products(), "rssbox").unwrap();
        let text = render_rc(product);
        assert!(text.contains("FILEVERSION 0,1,0,0"));
        assert!(text.contains("PRODUCTVERSION 0,1,0,0"));
        assert!(text.contains("VALUE \"OriginalFilename\", \"rssbox.exe\""));
        assert!(text.contains("VALUE \"ProductVersion\", \"0.1.0\""));
        assert!(text.contains("1 ICON \"icon.ico\""));
        assert!(text.contains("VALUE \"Translation\", 0x409, 1200"));
    }

    #[test]
    fn rc_values_escape_embedded_quotes() {
        let mut product = manifest::builtin_products()[0].clone();
        product.description = "a \"quoted\" description".to_string();
        let text = render_rc(&product);
        assert!(text.contains("a \"\"quoted\"\" description"));
    }
}
