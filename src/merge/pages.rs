//! Page-level operations on source documents.
//!
//! Copying a page into the combined document means:
//! - making the attributes it inherits from the page tree explicit,
//! - adding the requested rotation to its own `/Rotate`,
//! - deep-copying everything it references under fresh object ids.
//!
//! References to page tree nodes are never followed; they are replaced by
//! `null` so that one page cannot drag the rest of its source along.

use std::collections::HashMap;

use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::trace;

use crate::config::Rotation;
use crate::error::{PdfCombineError, Result};

/// Attributes a page inherits from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Page trees deeper than this are treated as cyclic.
const MAX_TREE_DEPTH: usize = 64;

/// Clone a page dictionary and fill in the attributes it inherits.
///
/// The page's own values win over inherited ones; among ancestors the
/// closest one wins.
pub fn resolve_page(doc: &Document, page_id: ObjectId) -> Result<Dictionary> {
    let mut page = doc
        .get_dictionary(page_id)
        .map_err(|e| {
            PdfCombineError::assembly_failed(format!("page object {page_id:?} is unusable: {e}"))
        })?
        .clone();

    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;

    while let Some(node_id) = parent {
        depth += 1;
        if depth > MAX_TREE_DEPTH {
            return Err(PdfCombineError::assembly_failed(
                "page tree is cyclic or too deep",
            ));
        }

        let Ok(node) = doc.get_dictionary(node_id) else {
            break;
        };

        for key in INHERITABLE {
            if !page.has(key)
                && let Ok(value) = node.get(key)
            {
                page.set(key.to_vec(), value.clone());
            }
        }

        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    Ok(page)
}

/// The page's current `/Rotate` value in degrees, or 0.
pub fn page_rotation(doc: &Document, page: &Dictionary) -> i64 {
    page.get(b"Rotate")
        .ok()
        .and_then(|value| doc.dereference(value).ok())
        .and_then(|(_, value)| value.as_i64().ok())
        .unwrap_or(0)
}

/// Add `rotation` to the page's orientation.
///
/// The result is normalized into `[0, 360)`. A page that has no `/Rotate`
/// and receives no rotation is left untouched.
pub fn apply_rotation(doc: &Document, page: &mut Dictionary, rotation: Rotation) {
    let current = page_rotation(doc, page);
    if rotation.is_none() && !page.has(b"Rotate") {
        return;
    }

    let degrees = (current + i64::from(rotation.degrees())).rem_euclid(360);
    page.set("Rotate", degrees);
}

/// Copies objects from one source document into a target document.
///
/// Each source object is copied at most once; later references to it reuse
/// the first copy. Keep one copier per source document.
#[derive(Debug)]
pub struct ObjectCopier<'a> {
    source: &'a Document,
    mapping: HashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectCopier<'a> {
    /// Create a copier reading from `source`.
    pub fn new(source: &'a Document) -> Self {
        Self {
            source,
            mapping: HashMap::new(),
        }
    }

    /// The document objects are copied from.
    pub fn source(&self) -> &'a Document {
        self.source
    }

    /// Number of distinct source objects copied so far.
    pub fn copied(&self) -> usize {
        self.mapping.len()
    }

    /// Copy a dictionary, rewriting every reference it contains.
    pub fn copy_dictionary(&mut self, dict: &Dictionary, target: &mut Document) -> Dictionary {
        let mut copy = Dictionary::new();
        for (key, value) in dict.iter() {
            copy.set(key.clone(), self.copy_value(value, target));
        }
        copy
    }

    /// Copy a direct value, rewriting every reference it contains.
    pub fn copy_value(&mut self, value: &Object, target: &mut Document) -> Object {
        match value {
            Object::Reference(id) => self.copy_reference(*id, target),
            Object::Dictionary(dict) => Object::Dictionary(self.copy_dictionary(dict, target)),
            Object::Array(items) => Object::Array(
                items
                    .iter()
                    .map(|item| self.copy_value(item, target))
                    .collect(),
            ),
            Object::Stream(stream) => {
                let mut copy = stream.clone();
                copy.dict = self.copy_dictionary(&stream.dict, target);
                Object::Stream(copy)
            }
            other => other.clone(),
        }
    }

    fn copy_reference(&mut self, id: ObjectId, target: &mut Document) -> Object {
        if let Some(&new_id) = self.mapping.get(&id) {
            return Object::Reference(new_id);
        }

        let Ok(object) = self.source.get_object(id) else {
            trace!(?id, "dangling reference replaced by null");
            return Object::Null;
        };

        if is_page_tree_node(object) {
            return Object::Null;
        }

        // Register before recursing so cycles resolve to the same copy.
        let new_id = target.new_object_id();
        self.mapping.insert(id, new_id);

        let copy = self.copy_value(object, target);
        target.objects.insert(new_id, copy);

        Object::Reference(new_id)
    }
}

fn is_page_tree_node(object: &Object) -> bool {
    let Ok(dict) = object.as_dict() else {
        return false;
    };
    matches!(
        dict.get(b"Type").and_then(Object::as_name),
        Ok(b"Page" | b"Pages")
    )
}
