//! Plain-text rendering of a `Presentation`.
//!
//! ```text
//! # Alice
//! ## Personal Information
//! Net Worth: £1,000,000
//! ...
//! ## Spouses
//! - Bob (married)
//! ```

use std::io::Write;

use super::{Field, Presentation};
use crate::Result;

pub fn write_presentation(p: &Presentation, writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "# {}", p.title)?;

    for section in &p.sections {
        writeln!(writer, "## {}", section.title)?;
        write_fields(writer, &section.fields, "")?;
        for group in &section.groups {
            writeln!(writer, "### {}", group.title)?;
            write_fields(writer, &group.fields, "")?;
            for item in &group.items {
                writeln!(writer, "- {}: {}", item.heading, item.summary)?;
                write_fields(writer, &item.fields, "  ")?;
            }
        }
    }

    for panel in &p.relations {
        writeln!(writer, "## {}", panel.title)?;
        for rel in &panel.items {
            match &rel.relation_type {
                Some(t) => writeln!(writer, "- {} ({t})", rel.id)?,
                None => writeln!(writer, "- {}", rel.id)?,
            }
        }
    }
    Ok(())
}

/// Convenience wrapper returning a `String`.
pub fn to_text(p: &Presentation) -> Result<String> {
    let mut buf = Vec::new();
    write_presentation(p, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn write_fields(writer: &mut dyn Write, fields: &[Field], indent: &str) -> Result<()> {
    for field in fields {
        if field.value.is_empty() {
            writeln!(writer, "{indent}{}:", field.label)?;
        } else {
            writeln!(writer, "{indent}{}: {}", field.label, field.value)?;
        }
    }
    Ok(())
}
