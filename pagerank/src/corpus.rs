//! Building the link graph from a directory of HTML pages.
//!
//! Every `.html` file in the directory becomes a page; its outbound links
//! are the `href` targets of its anchor tags, filtered down to pages that
//! actually exist in the same directory. Self-links are dropped. The
//! resulting corpus is immutable.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display};
use std::fs;
use std::io;
use std::path::Path;

use scraper::{Html, Selector};
use tracing::debug;

/// Why a corpus could not be built or ranked.
#[derive(Debug)]
pub enum CorpusError {
    /// The corpus has no pages; both estimators would divide by zero, so
    /// they refuse instead.
    Empty,
    /// Reading the corpus directory failed.
    Io(io::Error),
}

impl Display for CorpusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorpusError::Empty => write!(f, "corpus has no pages"),
            CorpusError::Io(err) => write!(f, "reading corpus: {err}"),
        }
    }
}

impl std::error::Error for CorpusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CorpusError::Empty => None,
            CorpusError::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for CorpusError {
    fn from(err: io::Error) -> Self {
        CorpusError::Io(err)
    }
}

/// The hyperlink graph: each page name mapped to the set of corpus pages
/// it links out to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Corpus {
    pages: BTreeMap<String, BTreeSet<String>>,
}

impl Corpus {
    /// Crawl a directory of `.html` files.
    ///
    /// Files without the `.html` extension are ignored. An empty directory
    /// yields an empty corpus; the estimators reject that later.
    pub fn from_dir(dir: &Path) -> Result<Self, CorpusError> {
        let mut raw: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => continue,
            };
            if !name.ends_with(".html") {
                continue;
            }

            let contents = fs::read_to_string(entry.path())?;
            let links = extract_links(&contents);
            debug!(page = %name, links = links.len(), "crawled page");
            raw.insert(name, links);
        }

        Ok(Self::from_links(raw))
    }

    /// Build a corpus from raw page/link data, applying the same filtering
    /// as the directory crawl: self-links go, and so does every target
    /// that is not itself a page of the corpus.
    pub fn from_links<I, L>(pages: I) -> Self
    where
        I: IntoIterator<Item = (String, L)>,
        L: IntoIterator<Item = String>,
    {
        let raw: BTreeMap<String, BTreeSet<String>> = pages
            .into_iter()
            .map(|(name, links)| (name, links.into_iter().collect()))
            .collect();

        let names: BTreeSet<String> = raw.keys().cloned().collect();
        let pages = raw
            .into_iter()
            .map(|(name, links)| {
                let kept = links
                    .into_iter()
                    .filter(|link| link != &name && names.contains(link))
                    .collect();
                (name, kept)
            })
            .collect();

        Corpus { pages }
    }

    /// Page names in sorted order.
    pub fn pages(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    /// The outbound links of `page`, if the page exists.
    pub fn links(&self, page: &str) -> Option<&BTreeSet<String>> {
        self.pages.get(page)
    }

    /// Number of outbound links from `page`; 0 for dangling or unknown
    /// pages.
    pub fn out_degree(&self, page: &str) -> usize {
        self.links(page).map_or(0, BTreeSet::len)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Pull every anchor-tag `href` target out of an HTML document.
fn extract_links(html: &str) -> BTreeSet<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a").expect("static selector parses");

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus_of(pages: &[(&str, &[&str])]) -> Corpus {
        Corpus::from_links(pages.iter().map(|(name, links)| {
            (
                (*name).to_owned(),
                links.iter().map(|link| (*link).to_owned()).collect::<Vec<_>>(),
            )
        }))
    }

    #[test]
    fn extracts_anchor_hrefs() {
        let html = r#"
            <html>
              <body>
                <p>Some text with <a href="2.html">a link</a> in it.</p>
                <a class="nav" href="3.html">another</a>
                <a>no href at all</a>
              </body>
            </html>
        "#;

        let links = extract_links(html);
        assert_eq!(links, BTreeSet::from(["2.html".to_owned(), "3.html".to_owned()]));
    }

    #[test]
    fn drops_self_links_and_external_targets() {
        let corpus = corpus_of(&[
            ("1.html", &["1.html", "2.html", "https://example.com/"]),
            ("2.html", &["1.html"]),
        ]);

        assert_eq!(
            corpus.links("1.html"),
            Some(&BTreeSet::from(["2.html".to_owned()]))
        );
        assert_eq!(
            corpus.links("2.html"),
            Some(&BTreeSet::from(["1.html".to_owned()]))
        );
    }

    #[test]
    fn dangling_pages_keep_an_empty_link_set() {
        let corpus = corpus_of(&[("1.html", &["2.html"]), ("2.html", &[])]);

        assert_eq!(corpus.out_degree("1.html"), 1);
        assert_eq!(corpus.out_degree("2.html"), 0);
        assert_eq!(corpus.links("2.html"), Some(&BTreeSet::new()));
    }

    #[test]
    fn pages_iterate_sorted() {
        let corpus = corpus_of(&[("b.html", &[]), ("a.html", &[]), ("c.html", &[])]);
        let names: Vec<&str> = corpus.pages().collect();
        assert_eq!(names, vec!["a.html", "b.html", "c.html"]);
    }
}
