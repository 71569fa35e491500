//! In-memory model of the page document: head meta tags, title and body style

use lazy_static::lazy_static;
use regex::Regex;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::helpers::{decode_entities, html_escape};

lazy_static! {
    static ref META_RE: Regex = Regex::new(r"(?is)<meta\b([^>]*)>").unwrap();
    static ref ATTR_RE: Regex =
        Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap();
    static ref TITLE_RE: Regex = Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap();
}

/// A document shared between the synchronizer, the share dialog and timers
pub type SharedDocument = Arc<Mutex<Document>>;

/// Wrap a document for sharing
pub fn shared(document: Document) -> SharedDocument {
    Arc::new(Mutex::new(document))
}

/// Lock a shared document, recovering from a poisoned lock
pub fn lock_document(document: &SharedDocument) -> MutexGuard<'_, Document> {
    document.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A `<meta>` element in the document head
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    pub property: Option<String>,
    pub name: Option<String>,
    pub content: String,
}

impl MetaTag {
    fn render(&self) -> String {
        let key_attr = match (&self.property, &self.name) {
            (Some(property), _) => format!(r#"property="{}""#, html_escape(property)),
            (None, Some(name)) => format!(r#"name="{}""#, html_escape(name)),
            (None, None) => String::new(),
        };
        format!(
            r#"<meta {} content="{}">"#,
            key_attr,
            html_escape(&self.content)
        )
    }
}

/// Inline overflow styles on `<body>`; empty means unset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyStyle {
    pub overflow: String,
    pub overflow_x: String,
}

/// The document state the share module reads and mutates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    title: String,
    metas: Vec<MetaTag>,
    pub body_style: BodyStyle,
}

impl Document {
    /// Create an empty document with a title
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }

    /// Build a document from the title and meta tags of an HTML page
    ///
    /// Meta tags with neither `property` nor `name` (e.g. `charset`) are ignored.
    pub fn parse_head(html: &str) -> Self {
        let title = TITLE_RE
            .captures(html)
            .map(|c| decode_entities(c[1].trim()))
            .unwrap_or_default();

        let metas = META_RE
            .captures_iter(html)
            .filter_map(|c| {
                let mut tag = MetaTag {
                    property: None,
                    name: None,
                    content: String::new(),
                };
                for attr in ATTR_RE.captures_iter(&c[1]) {
                    let value = attr
                        .get(2)
                        .or_else(|| attr.get(3))
                        .map(|m| decode_entities(m.as_str()))
                        .unwrap_or_default();
                    match attr[1].to_ascii_lowercase().as_str() {
                        "property" => tag.property = Some(value),
                        "name" => tag.name = Some(value),
                        "content" => tag.content = value,
                        _ => {}
                    }
                }
                (tag.property.is_some() || tag.name.is_some()).then_some(tag)
            })
            .collect();

        Self {
            title,
            metas,
            body_style: BodyStyle::default(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn metas(&self) -> &[MetaTag] {
        &self.metas
    }

    /// Find a tag by its `property` attribute, falling back to `name`
    pub fn find_meta(&self, key: &str) -> Option<&MetaTag> {
        self.position(key).map(|i| &self.metas[i])
    }

    /// Content of the tag for `key`, if present
    pub fn meta_content(&self, key: &str) -> Option<&str> {
        self.find_meta(key).map(|m| m.content.as_str())
    }

    /// Update the tag for `key` in place, or append one keyed by `property`
    pub fn upsert_meta_tag(&mut self, key: &str, content: &str) {
        match self.position(key) {
            Some(i) => self.metas[i].content = content.to_string(),
            None => self.metas.push(MetaTag {
                property: Some(key.to_string()),
                name: None,
                content: content.to_string(),
            }),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.metas
            .iter()
            .position(|m| m.property.as_deref() == Some(key))
            .or_else(|| {
                self.metas
                    .iter()
                    .position(|m| m.name.as_deref() == Some(key))
            })
    }

    /// Render the title and meta tags as HTML head content
    pub fn render_head(&self) -> String {
        let mut lines = Vec::with_capacity(self.metas.len() + 1);
        lines.push(format!("<title>{}</title>", html_escape(&self.title)));
        lines.extend(self.metas.iter().map(MetaTag::render));
        lines.join("\n")
    }
}
