//! Generic page extraction: headings, links and paragraphs

use super::element_text;
use crate::browser::{BrowserError, Session};
use crate::models::{Link, PageData};
use scraper::{Html, Selector};
use url::Url;

/// Scrape the common elements of a page: all non-empty headings (h1-h6),
/// hyperlinks with a resolvable target, and paragraphs, in document order.
///
/// Returns an empty [`PageData`] if the page cannot be loaded.
pub fn scrape(session: &Session, url: &str) -> PageData {
    log::info!("Scraping: {}", url);

    match try_scrape(session, url) {
        Ok(data) => {
            log::info!(
                "Found: {} headings, {} links, {} paragraphs",
                data.headings.len(),
                data.links.len(),
                data.paragraphs.len()
            );
            data
        }
        Err(e) => {
            log::error!("Error scraping {}: {}", url, e);
            PageData::default()
        }
    }
}

fn try_scrape(session: &Session, url: &str) -> Result<PageData, BrowserError> {
    session.navigate(url)?;

    let title = session.title()?;
    let current_url = session.current_url()?;
    let html = session.html()?;

    Ok(parse_page(&html, &title, &current_url))
}

fn parse_page(html: &str, title: &str, current_url: &str) -> PageData {
    let document = Html::parse_document(html);
    let base = Url::parse(current_url).ok();

    let heading_sel = Selector::parse("h1, h2, h3, h4, h5, h6").unwrap();
    let headings = document
        .select(&heading_sel)
        .map(|h| element_text(&h))
        .filter(|t| !t.is_empty())
        .collect();

    let link_sel = Selector::parse("a").unwrap();
    let links = document
        .select(&link_sel)
        .filter_map(|a| {
            let text = element_text(&a);
            if text.is_empty() {
                return None;
            }
            let href = resolve_href(base.as_ref(), a.value().attr("href")?)?;
            Some(Link { text, href })
        })
        .collect();

    let paragraph_sel = Selector::parse("p").unwrap();
    let paragraphs = document
        .select(&paragraph_sel)
        .map(|p| element_text(&p))
        .filter(|t| !t.is_empty())
        .collect();

    PageData {
        title: title.to_string(),
        url: current_url.to_string(),
        headings,
        links,
        paragraphs,
    }
}

/// Resolve an href to an absolute URL; relative hrefs are joined against
/// the page URL, unresolvable ones are dropped
fn resolve_href(base: Option<&Url>, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    match Url::parse(href) {
        Ok(url) => Some(url.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            base.and_then(|b| b.join(href).ok()).map(|u| u.to_string())
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><head><title>Fixture</title></head><body>
            <h1>Main Title</h1>
            <h2>  </h2>
            <h3>Sub <em>section</em></h3>
            <p>First paragraph.</p>
            <p>
            </p>
            <a href="/about">About us</a>
            <a href="https://other.example/page">Elsewhere</a>
            <a href="/empty"><img src="x.png"></a>
            <a>No target</a>
        </body></html>
    "#;

    #[test]
    fn test_parse_page_collects_trimmed_elements() {
        let data = parse_page(PAGE, "Fixture", "https://example.com/start");

        assert_eq!(data.headings, vec!["Main Title", "Sub section"]);
        assert_eq!(data.paragraphs, vec!["First paragraph."]);
        assert_eq!(
            data.links,
            vec![
                Link {
                    text: "About us".into(),
                    href: "https://example.com/about".into()
                },
                Link {
                    text: "Elsewhere".into(),
                    href: "https://other.example/page".into()
                },
            ]
        );
    }

    #[test]
    fn test_parse_page_empty_document() {
        let data = parse_page("<html><body></body></html>", "", "https://example.com/");

        // Empty sequences, never an error
        assert!(data.headings.is_empty());
        assert!(data.links.is_empty());
        assert!(data.paragraphs.is_empty());
    }

    #[test]
    fn test_resolve_href() {
        let base = Url::parse("https://example.com/a/b").unwrap();

        assert_eq!(
            resolve_href(Some(&base), "/c"),
            Some("https://example.com/c".to_string())
        );
        assert_eq!(
            resolve_href(Some(&base), "https://abs.example/x"),
            Some("https://abs.example/x".to_string())
        );
        assert_eq!(resolve_href(Some(&base), ""), None);
        assert_eq!(resolve_href(None, "relative/only"), None);
    }
}
