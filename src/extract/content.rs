//! Content isolation
//!
//! Strips page chrome (navigation, headers, footers, scripts) from a parsed document
//! and locates the subtree that most likely holds the documentation itself.

use crate::extract::text::selector;
use crate::ExtractError;
use scraper::{ElementRef, Html};

/// Chrome removed from every page
const NON_CONTENT_SELECTORS: &str =
    "nav, header, footer, .navigation, .sidebar, .menu, .ads, script, style";

/// Additional chrome removed in strict mode
const STRICT_NON_CONTENT_SELECTORS: &str =
    "aside, .aside, .comments, .comment, .social, .share, .related, .recommendations";

/// Containers that usually wrap the main documentation content
pub(crate) const MAIN_CONTENT_SELECTORS: &str =
    "main, #main, .main, #content, .content, article, .article, .documentation, #documentation";

/// A parsed page with its chrome removed
pub struct ContentDocument {
    document: Html,
}

impl ContentDocument {
    /// Parses HTML and removes non-content elements
    ///
    /// # Arguments
    ///
    /// * `html` - The raw page HTML
    /// * `strict` - Also remove sidebars, comments, social and related-content blocks
    pub fn parse(html: &str, strict: bool) -> Result<Self, ExtractError> {
        let mut document = Html::parse_document(html);

        let mut css = NON_CONTENT_SELECTORS.to_string();
        if strict {
            css.push_str(", ");
            css.push_str(STRICT_NON_CONTENT_SELECTORS);
        }
        let chrome = selector(&css)?;

        let ids: Vec<_> = document.select(&chrome).map(|element| element.id()).collect();
        let removed = ids.len();
        for id in ids {
            if let Some(mut node) = document.tree.get_mut(id) {
                node.detach();
            }
        }
        tracing::trace!("Removed {} non-content elements", removed);

        Ok(Self { document })
    }

    /// Returns the main-content subtree
    ///
    /// The first element matching the main-content selectors wins; otherwise `<body>`,
    /// otherwise the document root. Only elements still attached to the document are
    /// considered, so containers inside removed chrome never win.
    pub fn root(&self) -> ElementRef<'_> {
        let document_root = self.document.root_element();

        if let Ok(main) = selector(MAIN_CONTENT_SELECTORS) {
            if let Some(element) = document_root.select(&main).next() {
                return element;
            }
        }

        if let Ok(body) = selector("body") {
            if let Some(element) = document_root.select(&body).next() {
                return element;
            }
        }

        document_root
    }
}
