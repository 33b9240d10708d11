//! Structured extraction for the quotes demo site

use super::element_text;
use crate::browser::{BrowserError, Session};
use crate::models::Quote;
use scraper::{Html, Selector};

const QUOTES_URL: &str = "https://quotes.toscrape.com/";

/// Scrape the quote blocks on the first page of the quotes demo site.
/// No pagination; returns an empty vec on any failure.
pub fn scrape(session: &Session) -> Vec<Quote> {
    log::info!("Scraping quotes from: {}", QUOTES_URL);

    match try_scrape(session) {
        Ok(quotes) => {
            log::info!("Successfully scraped {} quotes", quotes.len());
            quotes
        }
        Err(e) => {
            log::error!("Error scraping quotes: {}", e);
            Vec::new()
        }
    }
}

fn try_scrape(session: &Session) -> Result<Vec<Quote>, BrowserError> {
    session.navigate(QUOTES_URL)?;
    let html = session.html()?;
    Ok(parse_quotes(&html))
}

fn parse_quotes(html: &str) -> Vec<Quote> {
    let document = Html::parse_document(html);
    let quote_sel = Selector::parse(".quote").unwrap();
    let text_sel = Selector::parse(".text").unwrap();
    let author_sel = Selector::parse(".author").unwrap();
    let tag_sel = Selector::parse(".tag").unwrap();

    document
        .select(&quote_sel)
        .filter_map(|block| {
            let text = block.select(&text_sel).next().map(|e| element_text(&e))?;
            let author = block.select(&author_sel).next().map(|e| element_text(&e))?;
            let tags = block.select(&tag_sel).map(|e| element_text(&e)).collect();

            Some(Quote { text, author, tags })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUOTES_PAGE: &str = r#"
        <html><body>
            <div class="quote">
                <span class="text">“Simplicity is the ultimate sophistication.”</span>
                <small class="author">Leonardo da Vinci</small>
                <div class="tags">
                    <a class="tag">simplicity</a>
                    <a class="tag">design</a>
                </div>
            </div>
            <div class="quote">
                <span class="text">“Talk is cheap. Show me the code.”</span>
                <small class="author">Linus Torvalds</small>
                <div class="tags"></div>
            </div>
            <div class="quote">
                <span class="text">“Orphan quote with no author”</span>
            </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_quotes() {
        let quotes = parse_quotes(QUOTES_PAGE);

        assert_eq!(quotes.len(), 2);
        assert_eq!(
            quotes[0].text,
            "“Simplicity is the ultimate sophistication.”"
        );
        assert_eq!(quotes[0].author, "Leonardo da Vinci");
        assert_eq!(quotes[0].tags, vec!["simplicity", "design"]);

        assert_eq!(quotes[1].author, "Linus Torvalds");
        assert!(quotes[1].tags.is_empty());
    }

    #[test]
    fn test_parse_quotes_none_found() {
        assert!(parse_quotes("<html><body><p>no quotes</p></body></html>").is_empty());
    }

    #[test]
    #[ignore] // Requires Chrome to be installed
    fn test_scrape_live_site() {
        use crate::browser::SessionConfig;

        let session = Session::new(SessionConfig::default()).unwrap();
        let quotes = scrape(&session);

        assert!(!quotes.is_empty());
        assert!(quotes.iter().all(|q| !q.text.is_empty() && !q.author.is_empty()));
    }
}
