use crate::parsers::listing;
use crate::parsers::tests::fixtures;
use url::Url;

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://steamunlocked.org/?s=diablo").unwrap()
    }

    #[test]
    fn test_malformed_entries_are_dropped() {
        let page = listing::parse(fixtures::SEARCH_PAGE, &base(), 1);

        // 5 blocks: 3 complete, one without a title, one with an unresolvable link
        assert_eq!(page.items.len(), 3);
        let titles: Vec<&str> = page.items.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Diablo Free Download",
                "Diablo II: Resurrected Free Download",
                "Diablo IV Free Download",
            ]
        );
    }

    #[test]
    fn test_entry_fields() {
        let page = listing::parse(fixtures::SEARCH_PAGE, &base(), 1);

        let first = &page.items[0];
        assert_eq!(first.slug, "diablo-free-download");
        assert_eq!(first.url, "https://steamunlocked.org/diablo-free-download/");
        // data: placeholders lose to the lazy-load attribute
        assert_eq!(
            first.thumbnail.as_deref(),
            Some("https://steamunlocked.org/wp-content/uploads/diablo.jpg")
        );
        assert!(first.tags.contains("RPG"));

        let second = &page.items[1];
        assert_eq!(
            second.url,
            "https://steamunlocked.org/diablo-ii-resurrected-free-download/"
        );
        assert_eq!(second.thumbnail, None);
        assert!(second.tags.is_empty());

        let third = &page.items[2];
        assert_eq!(
            third.thumbnail.as_deref(),
            Some("https://steamunlocked.org/wp-content/uploads/d4.jpg")
        );
    }

    #[test]
    fn test_pagination_from_page_links() {
        let page = listing::parse(fixtures::SEARCH_PAGE, &base(), 1);
        assert_eq!(page.page, 1);
        assert!(page.has_next);

        let page = listing::parse(fixtures::SEARCH_PAGE, &base(), 2);
        assert!(!page.has_next);
    }

    #[test]
    fn test_az_layout() {
        let base = Url::parse("https://steamunlocked.org/all-games/?letter=a&page=2").unwrap();
        let page = listing::parse(fixtures::AZ_PAGE, &base, 2);

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].title, "ABZU Free Download");
        assert_eq!(page.items[0].slug, "abzu-free-download");
        assert_eq!(
            page.items[0].thumbnail.as_deref(),
            Some("https://steamunlocked.org/wp-content/uploads/abzu.jpg")
        );
        assert_eq!(page.items[1].slug, "alan-wake-free-download");
        assert!(page.has_next);

        let last = listing::parse(fixtures::AZ_PAGE, &base, 3);
        assert!(!last.has_next);
    }

    #[test]
    fn test_empty_page_is_not_an_error() {
        let page = listing::parse(fixtures::EMPTY_PAGE, &base(), 1);
        assert!(page.items.is_empty());
        assert!(!page.has_next);
    }

    #[test]
    fn test_explicit_next_link() {
        let html = r#"<html><body>
            <div class="cover-item"><div class="cover-item-title"><a href="/a-game/">A Game</a></div></div>
            <a class="next page-numbers" href="/category/rpg/page/2/">Next</a>
        </body></html>"#;
        let page = listing::parse(html, &base(), 1);
        assert_eq!(page.items.len(), 1);
        assert!(page.has_next);
    }

    #[test]
    fn test_page_number() {
        assert_eq!(listing::page_number("/category/rpg/page/4/"), Some(4));
        assert_eq!(listing::page_number("/all-games/?letter=b&page=12"), Some(12));
        assert_eq!(listing::page_number("/?paged=3"), Some(3));
        assert_eq!(listing::page_number("/diablo-free-download/"), None);
    }
}
