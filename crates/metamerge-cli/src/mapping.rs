//! Column-mapping command handlers.

use clap::Subcommand;
use metamerge_core::fields::{display_name, FIELD_GROUPS};
use metamerge_ingest::FieldDictionary;
use metamerge_store::OverrideStore;

/// Sub-commands available under `mapping`.
#[derive(Debug, Subcommand)]
pub enum MappingCommands {
    /// List every raw header and the field it maps to
    Show,
    /// Map a raw header to a canonical field
    Set { raw: String, canonical: String },
    /// Forget the mapping for a raw header
    Remove { raw: String },
    /// Drop all saved changes and return to the built-in mappings
    Reset,
}

/// Apply a mapping command and persist the resulting overrides.
///
/// # Errors
///
/// Returns an error if the saved overrides cannot be loaded or written, if
/// `set` conflicts with an existing mapping, or if `remove` names a header
/// with no mapping.
pub(crate) async fn run_mapping(
    store: &dyn OverrideStore,
    command: MappingCommands,
) -> anyhow::Result<()> {
    let mut dictionary = crate::load_dictionary(store).await?;
    match command {
        MappingCommands::Show => {
            for line in mapping_lines(&dictionary) {
                println!("{line}");
            }
        }
        MappingCommands::Set { raw, canonical } => {
            dictionary.set_override(&raw, &canonical)?;
            store.save(dictionary.overrides()).await?;
            println!("mapped '{}' to {}", raw.trim(), canonical.trim());
        }
        MappingCommands::Remove { raw } => {
            if !dictionary.remove(&raw) {
                anyhow::bail!("no mapping for '{raw}'");
            }
            store.save(dictionary.overrides()).await?;
            println!("removed mapping for '{raw}'");
        }
        MappingCommands::Reset => {
            dictionary.reset();
            store.save(dictionary.overrides()).await?;
            println!("mappings reset to defaults");
        }
    }
    Ok(())
}

/// Listing of every mapped field, grouped the way fields are shown elsewhere.
/// Fields outside the known groups (custom targets) come last under "Other".
pub(crate) fn mapping_lines(dictionary: &FieldDictionary) -> Vec<String> {
    let fields = dictionary.canonical_fields();
    let mut lines = Vec::new();
    let push_field = |lines: &mut Vec<String>, field: &str| {
        let label = display_name(field).unwrap_or(field);
        lines.push(format!("  {label} ({field})"));
        for name in dictionary.known_names(field) {
            lines.push(format!("    {name}"));
        }
    };

    for (group, members) in FIELD_GROUPS {
        let present: Vec<&str> = members
            .iter()
            .copied()
            .filter(|m| fields.contains(m))
            .collect();
        if present.is_empty() {
            continue;
        }
        lines.push(format!("{group}:"));
        for field in present {
            push_field(&mut lines, field);
        }
    }

    let other: Vec<&str> = fields
        .iter()
        .copied()
        .filter(|f| !FIELD_GROUPS.iter().any(|(_, members)| members.contains(f)))
        .collect();
    if !other.is_empty() {
        lines.push("Other:".to_string());
        for field in other {
            push_field(&mut lines, field);
        }
    }

    let overrides = dictionary.overrides();
    if !overrides.is_empty() {
        lines.push(format!(
            "{} custom mappings, {} removed defaults",
            overrides.set.len(),
            overrides.removed.len()
        ));
    }
    lines
}
