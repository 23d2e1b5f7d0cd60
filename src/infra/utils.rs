//! Filepath: src/infra/utils.rs
//! Utility helpers organized by small, focused structs.
//! All functions are associated fns to keep call sites
//! ergonomic, testable, and discoverable.

// Tree-sitter types for node helpers
use tree_sitter::{Node, Tree};

/// UTF-8 safe slicing helpers
pub struct Utf8Utils;

impl Utf8Utils
{
    /// Return a substring by byte range if it is on a char
    /// boundary within `full`, else None
    pub fn slice_str(
        full: &str,
        start: usize,
        end: usize,
    ) -> Option<&str>
    {
        // Early checks on range validity
        if start > end || end > full.len()
        {
            return None;
        }

        // Use get(..) to enforce char boundary safety
        full.get(start..end)
    }

    /// Convert a tree-sitter byte range to a &str slice,
    /// returns None if boundaries are not valid char
    /// boundaries
    pub fn slice_node_text<'a>(
        full: &'a str,
        node: Node<'_>,
    ) -> Option<&'a str>
    {
        Self::slice_str(full, node.start_byte(), node.end_byte())
    }
}

/// Common Tree-sitter node helpers
pub struct TsNodeUtils;

impl TsNodeUtils
{
    /// Visit every node of `tree` in document order
    pub fn preorder<F>(
        tree: &Tree,
        mut visit: F,
    ) where
        F: FnMut(Node<'_>),
    {
        let mut cursor = tree.walk();

        loop
        {
            visit(cursor.node());

            // Descend first
            if cursor.goto_first_child()
            {
                continue;
            }

            // Then siblings, climbing up as needed
            loop
            {
                if cursor.goto_next_sibling()
                {
                    break;
                }

                if !cursor.goto_parent()
                {
                    return;
                }
            }
        }
    }

    /// Declared name of a declaration node via its `name` field
    pub fn name_of<'a>(
        node: Node<'_>,
        full: &'a str,
    ) -> Option<&'a str>
    {
        let name = node.child_by_field_name("name")?;
        Utf8Utils::slice_node_text(full, name)
    }
}
