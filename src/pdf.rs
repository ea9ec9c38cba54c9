//! PDF backend built on `lopdf`.
//!
//! ## Copying a Page
//!
//! A PDF page is a dictionary in an object graph. Its content streams,
//! fonts, images and annotations are separate objects reached through
//! references, and some attributes are not stored on the page at all but
//! inherited from ancestors in the page tree:
//!
//! ```text
//! Pages (Resources: 4 0 R, MediaBox: [0 0 612 792])
//!  ├── Page 1 (Contents: 7 0 R)            <- inherits Resources, MediaBox
//!  └── Page 2 (Contents: 9 0 R, Rotate 90)
//! ```
//!
//! To copy page N into a chunk we:
//!
//! 1. Resolve inherited `Resources`, `MediaBox`, `CropBox` and `Rotate`
//!    onto a copy of the page dictionary, and drop its `Parent`.
//! 2. Walk every reference reachable from the page, importing each object
//!    into the chunk under a fresh id. Objects already imported for an
//!    earlier page of the same chunk (a shared font, say) are reused. The
//!    walk uses a worklist, so long `/Next` chains cannot exhaust the stack.
//! 3. Keep references to pages, links to a later page of the same chunk
//!    included. When the chunk is saved, references to pages that never
//!    made it into the chunk (annotation `/P` entries, link targets) become
//!    `null`, as do references to page-tree nodes.
//!
//! Streams are copied byte-for-byte, never decoded and re-encoded, so page
//! content is identical to the source. When the chunk is saved a fresh page
//! tree and catalog are built around the imported pages.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::document::{ChunkDocument, SourceDocument};
use crate::{Error, Result};

/// Page attributes a page may inherit from its ancestors.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Parent hops followed before giving up on a malformed (cyclic) page tree.
const MAX_TREE_DEPTH: usize = 64;

/// Path reported for documents loaded from memory.
const MEMORY: &str = "<memory>";

/// Open `path`, read its page count, and release it.
///
/// # Errors
///
/// [`Error::SourceUnreadable`] if the file is missing, is not a PDF, or has
/// no pages.
pub fn count_pages(path: impl AsRef<Path>) -> Result<usize> {
    let source = PdfSource::open(path)?;
    Ok(source.page_count())
}

/// An opened PDF to split.
///
/// The whole file is read into memory on open; nothing keeps the file itself
/// open afterwards.
#[derive(Debug)]
pub struct PdfSource {
    doc: Document,
    pages: Vec<ObjectId>,
    path: PathBuf,
}

impl PdfSource {
    /// Load the PDF at `path`.
    ///
    /// # Errors
    ///
    /// [`Error::SourceUnreadable`] if the file cannot be read or parsed, or
    /// contains no pages.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let doc = Document::load(path).map_err(|e| Error::source_unreadable(path, e))?;
        Self::from_document(doc, path)
    }

    /// Load a PDF from an in-memory buffer.
    ///
    /// # Errors
    ///
    /// [`Error::SourceUnreadable`] if the bytes are not a PDF with pages.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let doc = Document::load_mem(bytes).map_err(|e| Error::source_unreadable(MEMORY, e))?;
        Self::from_document(doc, Path::new(MEMORY))
    }

    fn from_document(doc: Document, path: &Path) -> Result<Self> {
        let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
        if pages.is_empty() {
            return Err(Error::source_unreadable(path, "document has no pages"));
        }
        tracing::debug!(path = %path.display(), pages = pages.len(), "opened source document");
        Ok(Self {
            doc,
            pages,
            path: path.to_path_buf(),
        })
    }

    /// Where this document was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up an attribute on the nearest ancestor of `page` that has it.
    fn inherited(&self, page: &Dictionary, key: &[u8]) -> Option<Object> {
        let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
        for _ in 0..MAX_TREE_DEPTH {
            let node = self.doc.get_dictionary(parent?).ok()?;
            if let Ok(value) = node.get(key) {
                return Some(value.clone());
            }
            parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        }
        None
    }

    /// The `/Type` name of object `id`, if it is a dictionary with one.
    fn type_name(&self, id: ObjectId) -> Option<&[u8]> {
        let Ok(Object::Dictionary(dict)) = self.doc.get_object(id) else {
            return None;
        };
        match dict.get(b"Type") {
            Ok(Object::Name(name)) => Some(name.as_slice()),
            _ => None,
        }
    }

    /// Re-point every reference inside `object` at its chunk id.
    ///
    /// Ids seen for the first time are reserved here and queued on
    /// `pending`; nothing is copied. References to pages get a reserved id
    /// but are never queued: the page is filled in if and when it is copied
    /// into this chunk, and cut at save time otherwise.
    fn rewrite(
        &self,
        object: Object,
        chunk: &mut PdfChunk,
        pending: &mut Vec<ObjectId>,
    ) -> Object {
        match object {
            Object::Reference(id) => {
                if let Some(mapped) = chunk.imported.get(&id).copied() {
                    return Object::Reference(mapped);
                }
                match self.type_name(id) {
                    Some(b"Pages") => Object::Null,
                    Some(b"Page") => Object::Reference(chunk.reserve_page(id)),
                    _ => {
                        pending.push(id);
                        Object::Reference(chunk.reserve(id))
                    }
                }
            }
            Object::Array(items) => Object::Array(
                items
                    .into_iter()
                    .map(|item| self.rewrite(item, chunk, pending))
                    .collect(),
            ),
            Object::Dictionary(dict) => Object::Dictionary(self.rewrite_dict(dict, chunk, pending)),
            Object::Stream(mut stream) => {
                let dict = std::mem::take(&mut stream.dict);
                stream.dict = self.rewrite_dict(dict, chunk, pending);
                Object::Stream(stream)
            }
            other => other,
        }
    }

    fn rewrite_dict(
        &self,
        mut dict: Dictionary,
        chunk: &mut PdfChunk,
        pending: &mut Vec<ObjectId>,
    ) -> Dictionary {
        for (_, value) in dict.iter_mut() {
            let owned = std::mem::replace(value, Object::Null);
            *value = self.rewrite(owned, chunk, pending);
        }
        dict
    }

    /// Copy every queued object, and whatever those reach, into `chunk`.
    ///
    /// Runs off an explicit worklist so arbitrarily long reference chains
    /// cost heap, not stack.
    fn import_pending(&self, chunk: &mut PdfChunk, mut pending: Vec<ObjectId>) {
        while let Some(id) = pending.pop() {
            let Some(new_id) = chunk.imported.get(&id).copied() else {
                continue;
            };
            let object = self.doc.get_object(id).cloned().unwrap_or(Object::Null);
            let object = self.rewrite(object, chunk, &mut pending);
            chunk.doc.objects.insert(new_id, object);
        }
    }
}

impl SourceDocument for PdfSource {
    type Chunk = PdfChunk;

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn new_chunk(&self) -> PdfChunk {
        PdfChunk {
            doc: Document::with_version(self.doc.version.clone()),
            pages: Vec::new(),
            imported: HashMap::new(),
            unfilled: HashSet::new(),
        }
    }

    fn copy_page(&self, page: usize, chunk: &mut PdfChunk) -> Result<()> {
        let &page_id = self.pages.get(page).ok_or(Error::PageOutOfRange {
            page,
            total: self.pages.len(),
        })?;

        let mut dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::source_unreadable(&self.path, e))?
            .clone();

        for key in INHERITABLE {
            if !dict.has(key) {
                if let Some(value) = self.inherited(&dict, key) {
                    dict.set(key, value);
                }
            }
        }
        dict.remove(b"Parent");

        // An earlier page may already link here and hold a reserved id.
        let new_id = chunk.reserve_page(page_id);
        chunk.unfilled.remove(&new_id);

        let mut pending = Vec::new();
        let dict = self.rewrite_dict(dict, chunk, &mut pending);
        self.import_pending(chunk, pending);
        chunk.doc.objects.insert(new_id, Object::Dictionary(dict));
        chunk.pages.push(new_id);
        Ok(())
    }
}

/// A PDF under construction from pages of a [`PdfSource`].
#[derive(Debug)]
pub struct PdfChunk {
    doc: Document,
    pages: Vec<ObjectId>,
    // source id -> chunk id
    imported: HashMap<ObjectId, ObjectId>,
    // chunk ids reserved for linked pages not copied (yet)
    unfilled: HashSet<ObjectId>,
}

impl PdfChunk {
    /// The chunk id for source object `id`, allocating one on first sight.
    fn reserve(&mut self, id: ObjectId) -> ObjectId {
        if let Some(&mapped) = self.imported.get(&id) {
            return mapped;
        }
        let new_id = self.doc.new_object_id();
        self.imported.insert(id, new_id);
        new_id
    }

    /// Like [`reserve`](Self::reserve), for a page that may never be copied.
    fn reserve_page(&mut self, id: ObjectId) -> ObjectId {
        if let Some(&mapped) = self.imported.get(&id) {
            return mapped;
        }
        let new_id = self.reserve(id);
        self.unfilled.insert(new_id);
        new_id
    }

    /// Build the page tree and catalog around the imported pages.
    fn finish(&mut self) {
        if !self.unfilled.is_empty() {
            for object in self.doc.objects.values_mut() {
                cut_references(object, &self.unfilled);
            }
        }

        let pages_id = self.doc.new_object_id();
        for id in &self.pages {
            if let Some(Object::Dictionary(page)) = self.doc.objects.get_mut(id) {
                page.set("Parent", Object::Reference(pages_id));
            }
        }

        let kids = self.pages.iter().copied().map(Object::Reference).collect();
        let count = i64::try_from(self.pages.len()).unwrap_or(i64::MAX);
        let tree = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", Object::Integer(count)),
            ("Kids", Object::Array(kids)),
        ]);
        self.doc.objects.insert(pages_id, Object::Dictionary(tree));

        let catalog = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]);
        let catalog_id = self.doc.add_object(catalog);
        self.doc.trailer.set("Root", Object::Reference(catalog_id));
    }
}

/// Replace references to `dangling` ids anywhere inside `object` with `null`.
///
/// Only walks direct (inline) structure; referenced objects are visited on
/// their own.
fn cut_references(object: &mut Object, dangling: &HashSet<ObjectId>) {
    if matches!(object, Object::Reference(id) if dangling.contains(id)) {
        *object = Object::Null;
        return;
    }
    match object {
        Object::Array(items) => {
            for item in items {
                cut_references(item, dangling);
            }
        }
        Object::Dictionary(dict) => {
            for (_, value) in dict.iter_mut() {
                cut_references(value, dangling);
            }
        }
        Object::Stream(stream) => {
            for (_, value) in stream.dict.iter_mut() {
                cut_references(value, dangling);
            }
        }
        _ => {}
    }
}

impl ChunkDocument for PdfChunk {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn save(mut self, path: &Path) -> Result<()> {
        self.finish();

        let file = File::create(path).map_err(|e| Error::destination_unwritable(path, e))?;
        let mut writer = BufWriter::new(file);
        self.doc
            .save_to(&mut writer)
            .map_err(io::Error::other)
            .and_then(|()| writer.flush())
            .map_err(|e| Error::destination_unwritable(path, e))
    }
}
