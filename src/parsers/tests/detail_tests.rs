use crate::error::Error;
use crate::parsers::detail;
use crate::parsers::tests::fixtures;
use crate::results::RequirementSet;
use url::Url;

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> Url {
        Url::parse("https://steamunlocked.org/").unwrap()
    }

    fn page(slug: &str) -> Url {
        site().join(&format!("{}/", slug)).unwrap()
    }

    #[test]
    fn test_full_page() {
        let game = detail::parse(
            fixtures::DETAIL_PAGE,
            "diablo-free-download",
            &page("diablo-free-download"),
            &site(),
        )
        .unwrap();

        assert_eq!(game.slug, "diablo-free-download");
        assert_eq!(game.url, "https://steamunlocked.org/diablo-free-download/");
        assert_eq!(game.title, "Diablo Free Download");
        assert_eq!(
            game.thumbnail.as_deref(),
            Some("https://steamunlocked.org/wp-content/uploads/diablo.jpg")
        );
        assert_eq!(
            game.description,
            "Diablo is an action role-playing hack and slash game.\n\nDescend into the depths beneath Tristram."
        );
        assert_eq!(
            game.screenshots,
            vec![
                "https://steamunlocked.org/wp-content/uploads/shot1.jpg",
                "https://steamunlocked.org/wp-content/uploads/shot2.jpg",
            ]
        );
        assert_eq!(game.genres, vec!["Action", "RPG"]);
        assert_eq!(game.developer.as_deref(), Some("Blizzard North"));
        assert_eq!(game.publisher.as_deref(), Some("Blizzard Entertainment"));
        assert_eq!(game.release_date.as_deref(), Some("31 Dec, 1996"));
        assert_eq!(game.file_size.as_deref(), Some("1.2 GB"));
    }

    #[test]
    fn test_repeated_mirror_url_listed_once() {
        let game = detail::parse(
            fixtures::DETAIL_PAGE,
            "diablo-free-download",
            &page("diablo-free-download"),
            &site(),
        )
        .unwrap();

        let links: Vec<(&str, &str)> = game
            .download_links
            .iter()
            .map(|m| (m.provider.as_str(), m.url.as_str()))
            .collect();
        assert_eq!(
            links,
            vec![
                ("UploadHaven", "https://uploadhaven.com/download/0123abcd"),
                ("MegaUp", "https://megaup.net/abc/diablo.zip"),
            ]
        );
    }

    #[test]
    fn test_requirements_after_heading() {
        let game = detail::parse(
            fixtures::DETAIL_PAGE,
            "diablo-free-download",
            &page("diablo-free-download"),
            &site(),
        )
        .unwrap();

        assert_eq!(
            game.requirements.minimum,
            RequirementSet {
                os: Some("Windows 10".into()),
                processor: Some("Intel Core i5".into()),
                memory: Some("8 GB RAM".into()),
                graphics: Some("GTX 970".into()),
                storage: Some("2 GB available space".into()),
            }
        );
        assert_eq!(game.requirements.recommended.os.as_deref(), Some("Windows 11"));
        assert_eq!(
            game.requirements.recommended.memory.as_deref(),
            Some("16 GB RAM")
        );
        assert_eq!(game.requirements.recommended.processor, None);
    }

    #[test]
    fn test_requirements_in_container_with_line_breaks() {
        let game = detail::parse(
            fixtures::CONTAINER_REQUIREMENTS_PAGE,
            "other-game",
            &page("other-game"),
            &site(),
        )
        .unwrap();

        let min = &game.requirements.minimum;
        assert_eq!(min.os.as_deref(), Some("Windows 7"));
        assert_eq!(min.processor.as_deref(), Some("Dual core"));
        assert_eq!(min.memory.as_deref(), Some("4 GB"));

        let rec = &game.requirements.recommended;
        assert_eq!(rec.os.as_deref(), Some("Windows 10"));
        assert_eq!(rec.graphics.as_deref(), Some("GTX 1060"));
        assert_eq!(rec.storage.as_deref(), Some("10 GB"));
    }

    #[test]
    fn test_requirements_heading_with_class_is_not_container() {
        let game = detail::parse(
            fixtures::STYLED_HEADING_PAGE,
            "styled-game",
            &page("styled-game"),
            &site(),
        )
        .unwrap();

        let min = &game.requirements.minimum;
        assert_eq!(min.os.as_deref(), Some("Windows 10"));
        assert_eq!(min.memory.as_deref(), Some("8 GB"));
        assert!(game.requirements.recommended.is_empty());
    }

    #[test]
    fn test_missing_sections_default() {
        let game = detail::parse(
            fixtures::BARE_DETAIL_PAGE,
            "tiny-game",
            &page("tiny-game"),
            &site(),
        )
        .unwrap();

        assert_eq!(game.title, "Tiny Game Free Download");
        assert_eq!(game.description, "A small game.");
        assert!(game.download_links.is_empty());
        assert!(game.requirements.is_empty());
        assert!(game.screenshots.is_empty());
        assert!(game.genres.is_empty());
        assert_eq!(game.thumbnail, None);
        assert_eq!(game.file_size, None);
    }

    #[test]
    fn test_not_found_template() {
        let err = detail::parse(
            fixtures::NOT_FOUND_PAGE,
            "missing",
            &page("missing"),
            &site(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_layout_drift_is_parse_error() {
        let err = detail::parse(fixtures::DRIFTED_PAGE, "x", &page("x"), &site()).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_unrecognised_mirror_host_is_parse_error() {
        let err = detail::parse(
            fixtures::UNKNOWN_MIRROR_PAGE,
            "drifted-game",
            &page("drifted-game"),
            &site(),
        )
        .unwrap_err();
        match err {
            Error::Parse { reason, .. } => assert!(reason.contains("files.newhost.example")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_mirror_named_by_link_text() {
        let html = r#"<html><body><h1>Game</h1>
            <p>Download Game for PC using the link below.
            <a href="https://short.example/r/9">PixelDrain</a></p></body></html>"#;
        let game = detail::parse(html, "game", &page("game"), &site()).unwrap();
        assert_eq!(game.download_links.len(), 1);
        assert_eq!(game.download_links[0].provider, "PixelDrain");
        assert_eq!(game.download_links[0].url, "https://short.example/r/9");
    }
}
