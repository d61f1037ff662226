use tracing::debug;

use crate::{
    error::HarvestResult,
    model::ArxivRecord,
    utils::collapse_whitespace,
    xml::{parse_document, XmlElement}
};

pub const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
pub const ARXIV_NS: &str = "http://arxiv.org/schemas/atom";

const REL_ALTERNATE: &str = "alternate";
const MIME_HTML: &str = "text/html";
const MIME_PDF: &str = "application/pdf";
const TITLE_PDF: &str = "pdf";

/// Parses an arXiv Atom feed into records, one per Atom `<entry>` child of
/// the root, in document order. Malformed XML fails the whole parse.
///
/// Elements are matched by namespace and local name, and single-valued
/// fields take the first matching child.
pub fn parse_feed(raw: &[u8]) -> HarvestResult<Vec<ArxivRecord>> {
    let root = parse_document(raw)?;
    let records = root.find_all(ATOM_NS, "entry")
        .map(ArxivRecord::from_entry)
        .collect::<Vec<_>>();
    debug!(entries = records.len(), "parsed arxiv feed");
    Ok(records)
}

impl ArxivRecord {
    fn from_entry(entry: &XmlElement) -> Self {
        let text = |name: &str| entry.find(ATOM_NS, name)
            .map(|el| collapse_whitespace(&el.text))
            .unwrap_or_default();

        let authors = entry.find_all(ATOM_NS, "author")
            .filter_map(|author| author.find(ATOM_NS, "name"))
            .map(|name| collapse_whitespace(&name.text))
            .filter(|name| !name.is_empty())
            .collect::<Vec<_>>();

        let categories = entry.find_all(ATOM_NS, "category")
            .filter_map(|cat| cat.attribute("term"))
            .filter(|term| !term.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>();

        // first qualifying link wins for each field.
        let links = entry.find_all(ATOM_NS, "link")
            .filter_map(|el| el.attribute("href").filter(|href| !href.is_empty()).map(|href| (href, el)))
            .collect::<Vec<_>>();
        let link_html = links.iter()
            .find(|(_, el)| is_html(el))
            .map(|(href, _)| href.to_string());
        let link_pdf = links.iter()
            .find(|(_, el)| is_pdf(el))
            .map(|(href, _)| href.to_string());

        ArxivRecord {
            id: text("id"),
            title: text("title"),
            summary: text("summary"),
            published: text("published"),
            updated: text("updated"),
            authors,
            primary_category: entry.find(ARXIV_NS, "primary_category")
                .and_then(|cat| cat.attribute("term"))
                .map(str::to_string),
            categories,
            link_html,
            link_pdf
        }
    }
}

fn is_html(link: &XmlElement) -> bool {
    link.attribute("rel") == Some(REL_ALTERNATE) && link.attribute("type") == Some(MIME_HTML)
}

fn is_pdf(link: &XmlElement) -> bool {
    link.attribute("title") == Some(TITLE_PDF) || link.attribute("type") == Some(MIME_PDF)
}
