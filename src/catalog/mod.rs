//! Built-in documentation set
//!
//! Bodies live under `content/` and are compiled into the binary. The footer
//! is not part of the body; it is applied at render time.

use crate::models::{Manifest, ManifestEntry};
use crate::render::Footer;

/// A compiled-in document
#[derive(Debug, Clone, Copy)]
pub struct Document {
    /// Output path relative to the base directory
    pub path: &'static str,
    pub title: &'static str,
    /// CMS source file the document describes
    pub source: &'static str,
    pub body: &'static str,
}

impl Document {
    pub fn render(&self, footer: &Footer) -> String {
        footer.apply(self.body)
    }
}

const DOCUMENTS: &[Document] = &[
    Document {
        path: "member/general/PROFILE.md",
        title: "Member Profil",
        source: "member/profile.php",
        body: include_str!("../../content/member/general/PROFILE.md"),
    },
    Document {
        path: "member/general/DASHBOARD.md",
        title: "Member Dashboard",
        source: "member/index.php",
        body: include_str!("../../content/member/general/DASHBOARD.md"),
    },
    Document {
        path: "member/general/NOTIFICATIONS.md",
        title: "Benachrichtigungen",
        source: "member/notifications.php",
        body: include_str!("../../content/member/general/NOTIFICATIONS.md"),
    },
    Document {
        path: "member/general/PRIVACY.md",
        title: "Datenschutz & Privatsphäre",
        source: "member/privacy.php",
        body: include_str!("../../content/member/general/PRIVACY.md"),
    },
    Document {
        path: "member/general/SECURITY.md",
        title: "Sicherheits-Center",
        source: "member/security.php",
        body: include_str!("../../content/member/general/SECURITY.md"),
    },
    Document {
        path: "member/general/SUBSCRIPTION.md",
        title: "Abo-Verwaltung",
        source: "member/subscription.php",
        body: include_str!("../../content/member/general/SUBSCRIPTION.md"),
    },
];

pub fn documents() -> &'static [Document] {
    DOCUMENTS
}

pub fn find(path: &str) -> Option<&'static Document> {
    DOCUMENTS.iter().find(|doc| doc.path == path)
}

/// Render every document with `footer` into a manifest, in catalog order
pub fn manifest(footer: &Footer) -> Manifest {
    DOCUMENTS
        .iter()
        .map(|doc| ManifestEntry::new(doc.path, doc.render(footer)))
        .collect()
}
