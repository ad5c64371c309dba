//! Template metadata parsing.
//!
//! Templates attach a small XML document describing how the generated tree
//! should be restructured. This module turns that payload into typed data:
//!
//! - [`parse_directives`] is the first stage, producing a [`DirectiveMap`]
//!   of directive keys to values.
//! - [`parse_asset_records`] is the second stage, re-parsing one directive's
//!   raw value into the ordered [`AssetRecord`] list consumed by asset
//!   injection.
//!
//! ## Document shape
//!
//! ```xml
//! <wizardData xmlns="http://schemas.microsoft.com/developer/vstemplate/2005">
//!   <entry name="template">Library.zip</entry>
//!   <entry name="solutionFolder">Libs</entry>
//!   <entry name="solutionItems">
//!     <solutionItems>
//!       <solutionItem>
//!         <physicalFolder>Root</physicalFolder>
//!         <solutionFolder>Build</solutionFolder>
//!         <solutionItemFile>build.proj</solutionItemFile>
//!       </solutionItem>
//!     </solutionItems>
//!   </entry>
//! </wizardData>
//! ```
//!
//! A simple text entry maps to its text content; an entry with nested markup
//! maps to the serialized form of its first child element, so structured data
//! passes through the directive map verbatim. Duplicate `name` attributes are
//! last-wins; uniqueness is not validated.
//!
//! The first stage slices nested markup straight out of the source document,
//! which drops any `xmlns` declared on an ancestor. Both stages therefore
//! accept elements in the metadata namespace or in none.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Fixed namespace for template metadata documents.
pub const METADATA_NS: &str = "http://schemas.microsoft.com/developer/vstemplate/2005";

/// Sentinel value of `physicalFolder` meaning "the workspace root itself".
pub const PHYSICAL_ROOT: &str = "Root";

/// Directive keys mapped to their raw values.
pub type DirectiveMap = HashMap<String, String>;

/// One shared-asset injection record, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Destination directory name relative to the workspace root, or
    /// [`PHYSICAL_ROOT`].
    pub physical_folder: String,
    /// Logical grouping the file is registered under.
    pub logical_group: String,
    /// File to copy and register.
    pub file_name: String,
}

impl AssetRecord {
    /// Whether the record targets the workspace root rather than a
    /// subdirectory.
    pub fn targets_workspace_root(&self) -> bool {
        self.physical_folder == PHYSICAL_ROOT
    }
}

/// Parses the raw metadata payload into a directive map.
///
/// Absent or blank payloads yield `Ok(None)`: a template without metadata is
/// ordinary, not an error. A payload that is present but not well-formed XML
/// is fatal for the invocation.
pub fn parse_directives(raw: Option<&str>) -> Result<Option<DirectiveMap>, DomainError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    if raw.trim().is_empty() {
        return Ok(None);
    }

    let doc = roxmltree::Document::parse(raw).map_err(|e| DomainError::MetadataFormat {
        reason: e.to_string(),
    })?;

    let root = doc.root_element();

    if !root.children().any(|c| c.is_element()) {
        return Ok(None);
    }

    let mut directives = DirectiveMap::new();

    for entry in root
        .descendants()
        .filter(|n| n.is_element() && is_metadata_element(*n, "entry"))
    {
        // Attribute-less or childless entries carry nothing; skip them.
        if entry.attributes().next().is_none() || entry.first_child().is_none() {
            continue;
        }

        let key = entry
            .attribute("name")
            .ok_or_else(|| DomainError::MetadataFormat {
                reason: "entry element is missing its 'name' attribute".into(),
            })?;

        let value = match entry.first_element_child() {
            // Nested markup: pass the first child element through verbatim.
            Some(child) => raw[child.range()].to_string(),
            None => element_text(entry),
        };

        directives.insert(key.to_string(), value);
    }

    Ok(Some(directives))
}

/// Re-parses one directive's raw value as the asset-record list.
///
/// Elements missing any of their three sub-elements (or carrying them empty)
/// are dropped, not an error; order is document order.
pub fn parse_asset_records(raw: &str) -> Result<Vec<AssetRecord>, DomainError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let doc = roxmltree::Document::parse(raw).map_err(|e| DomainError::MetadataFormat {
        reason: e.to_string(),
    })?;

    let records = doc
        .root()
        .descendants()
        .filter(|n| n.is_element() && is_metadata_element(*n, "solutionItem"))
        .filter_map(|item| {
            let physical_folder = child_element_text(item, "physicalFolder")?;
            let logical_group = child_element_text(item, "solutionFolder")?;
            let file_name = child_element_text(item, "solutionItemFile")?;

            Some(AssetRecord {
                physical_folder,
                logical_group,
                file_name,
            })
        })
        .collect();

    Ok(records)
}

/// Matches an element by local name, in the metadata namespace or in none.
fn is_metadata_element(node: roxmltree::Node<'_, '_>, name: &str) -> bool {
    node.tag_name().name() == name
        && matches!(node.tag_name().namespace(), None | Some(METADATA_NS))
}

/// Concatenated text content of an element's direct text children.
fn element_text(node: roxmltree::Node<'_, '_>) -> String {
    node.children()
        .filter(|c| c.is_text())
        .filter_map(|c| c.text())
        .collect()
}

/// Non-empty text of the first child element with the given local name.
fn child_element_text(node: roxmltree::Node<'_, '_>, name: &str) -> Option<String> {
    let child = node
        .children()
        .find(|c| c.is_element() && is_metadata_element(*c, name))?;

    let text = element_text(child);
    if text.is_empty() { None } else { Some(text) }
}
