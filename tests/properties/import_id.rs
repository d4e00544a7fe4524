//! Property tests for import id derivation.

use std::path::PathBuf;

use proptest::prelude::*;

use scssync::ImportId;

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("_?[a-z0-9][a-z0-9_-]{0,8}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Only one leading underscore of the file name is dropped;
    /// directory segments are kept verbatim and joined with `/`.
    #[test]
    fn property_partial_id_drops_one_underscore_from_file_only(
        dirs in proptest::collection::vec(segment(), 0..=4),
        stem in segment(),
        underscored in any::<bool>(),
    ) {
        let file = if underscored { format!("_{stem}.scss") } else { format!("{stem}.scss") };
        let mut relative: PathBuf = dirs.iter().collect();
        relative.push(&file);

        let id = ImportId::from_partial(&relative).unwrap();

        let expected_stem = if underscored {
            stem.clone()
        } else {
            stem.strip_prefix('_').unwrap_or(&stem).to_string()
        };
        let mut expected = dirs.clone();
        expected.push(expected_stem);
        prop_assert_eq!(id.as_str(), expected.join("/"));
        prop_assert!(!id.as_str().contains('\\'));
    }

    /// PROPERTY: Non-scss files never produce an id.
    #[test]
    fn property_non_scss_is_rejected(
        dirs in proptest::collection::vec(segment(), 0..=3),
        stem in segment(),
        ext in "(css|sass|md|txt)",
    ) {
        let mut relative: PathBuf = dirs.iter().collect();
        relative.push(format!("{stem}.{ext}"));
        prop_assert!(ImportId::from_partial(&relative).is_err());
    }

    /// PROPERTY: Directives written for an id parse back to that id.
    #[test]
    fn property_directive_parses_back(
        dirs in proptest::collection::vec(segment(), 1..=4),
    ) {
        let id = ImportId::new(dirs.join("/"));
        prop_assert_eq!(ImportId::from_directive(&id.to_directive()), Some(id));
    }
}
