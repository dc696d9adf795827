use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["shopstyle-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_brands_with_limit() {
    let cli = Cli::try_parse_from(["shopstyle-cli", "brands", "--limit", "40"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Catalog(CatalogCommands::Brands { limit: Some(40) }))
    ));
}

#[test]
fn parses_reference_listings() {
    let parse = |arg: &str| {
        Cli::try_parse_from(["shopstyle-cli", arg])
            .expect("expected valid cli args")
            .command
    };
    assert!(matches!(parse("retailers"), Some(Commands::Catalog(CatalogCommands::Retailers))));
    assert!(matches!(parse("colors"), Some(Commands::Catalog(CatalogCommands::Colors))));
    assert!(matches!(parse("categories"), Some(Commands::Catalog(CatalogCommands::Categories))));
}

#[test]
fn browse_defaults_to_relevance_with_no_filters() {
    let cli = Cli::try_parse_from(["shopstyle-cli", "browse"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Catalog(CatalogCommands::Browse {
            cat: None,
            color: None,
            brand: None,
            sort: SortOrder::Relevance,
            ref choose,
        })) if choose.is_empty()
    ));
}

#[test]
fn browse_parses_filters_sort_and_choices() {
    let cli = Cli::try_parse_from([
        "shopstyle-cli",
        "browse",
        "--cat",
        "dresses",
        "--color",
        "7",
        "--sort",
        "hi-lo",
        "--choose",
        "101",
        "--choose",
        "102",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Catalog(CatalogCommands::Browse {
            cat: Some(ref cat),
            color: Some(ref color),
            brand: None,
            sort: SortOrder::PriceDescending,
            ref choose,
        })) if cat == "dresses" && color == "7" && choose == &vec![101, 102]
    ));
}

#[test]
fn browse_rejects_unknown_sort() {
    assert!(Cli::try_parse_from(["shopstyle-cli", "browse", "--sort", "cheapest"]).is_err());
}

#[test]
fn browse_request_builds_sorted_location() {
    let request = browse::BrowseRequest {
        category: Some("dresses".into()),
        color: None,
        brand: Some("12".into()),
        sort: SortOrder::Relevance,
        choose: Vec::new(),
    };
    assert_eq!(request.location().url(), "/browse?brand=12&cat=dresses");
}

#[test]
fn parses_url_set_without_value() {
    let cli = Cli::try_parse_from(["shopstyle-cli", "url", "set", "/a?x=1", "x"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Url {
            command: UrlCommands::Set { value: None, .. }
        })
    ));
}

#[test]
fn parses_url_build_pairs() {
    let cli = Cli::try_parse_from([
        "shopstyle-cli",
        "url",
        "build",
        "/ss/products",
        "category=dresses",
        "q=a=b",
        "--break-cache",
    ])
    .unwrap();
    match cli.command {
        Some(Commands::Url {
            command:
                UrlCommands::Build {
                    path,
                    params,
                    break_cache,
                },
        }) => {
            assert_eq!(path, "/ss/products");
            assert_eq!(
                params,
                vec![
                    ("category".to_owned(), "dresses".to_owned()),
                    ("q".to_owned(), "a=b".to_owned())
                ]
            );
            assert!(break_cache);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn url_commands_sit_beside_catalog_commands() {
    let parse = |args: &[&str]| {
        Cli::try_parse_from(std::iter::once("shopstyle-cli").chain(args.iter().copied()))
            .expect("expected valid cli args")
            .command
    };
    assert!(matches!(
        parse(&["url", "get", "/a?x=1", "x"]),
        Some(Commands::Url {
            command: UrlCommands::Get { .. }
        })
    ));
    assert!(matches!(
        parse(&["browse", "--brand", "12"]),
        Some(Commands::Catalog(CatalogCommands::Browse { .. }))
    ));
    assert!(Cli::try_parse_from(["shopstyle-cli", "catalog"]).is_err());
}

#[test]
fn key_value_requires_key() {
    assert!(url::parse_key_value("=x").is_err());
    assert!(url::parse_key_value("novalue").is_err());
    assert_eq!(
        url::parse_key_value("k="),
        Ok(("k".to_owned(), String::new()))
    );
}
