use super::*;

#[test]
fn from_path_maps_builder_extensions() {
    let cases = [
        ("src/App.tsx", Language::TypeScript),
        ("src/main.ts", Language::TypeScript),
        ("index.js", Language::JavaScript),
        ("components/Nav.jsx", Language::JavaScript),
        ("api/app.py", Language::Python),
        ("src/index.css", Language::Css),
        ("styles/site.scss", Language::Scss),
        ("public/index.html", Language::Html),
        ("package.json", Language::Json),
        ("README.md", Language::Markdown),
        ("db/schema.sql", Language::Sql),
        ("scripts/setup.sh", Language::Shell),
        (".github/ci.yml", Language::Yaml),
        ("docker-compose.yaml", Language::Yaml),
    ];

    for (path, expected) in cases {
        assert_eq!(Language::from_path(path), expected, "{path}");
    }
}

#[test]
fn from_path_falls_back_to_plain_text() {
    assert_eq!(Language::from_path("Makefile"), Language::PlainText);
    assert_eq!(Language::from_path(".gitignore"), Language::PlainText);
    assert_eq!(Language::from_path("src/lib.rs"), Language::PlainText);
    assert_eq!(Language::from_path("App.TSX"), Language::PlainText);
}

#[test]
fn unknown_tags_round_trip_through_serde() {
    let language: Language = serde_json::from_str("\"elixir\"").unwrap();
    assert_eq!(language, Language::Other("elixir".to_string()));
    assert_eq!(serde_json::to_string(&language).unwrap(), "\"elixir\"");

    let known: Language = serde_json::from_str("\"typescript\"").unwrap();
    assert_eq!(known, Language::TypeScript);
    assert_eq!(known.to_string(), "typescript");
}
