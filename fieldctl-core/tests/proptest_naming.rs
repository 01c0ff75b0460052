use fieldctl_core::naming::transform;
use fieldctl_core::patch::{patch_list, ListAnchor, PatchOutcome};
use proptest::prelude::*;
use regex::Regex;

fn filter_doc(items: &[String]) -> String {
    let body = items
        .iter()
        .map(|item| format!("        \"{item}\""))
        .collect::<Vec<_>>()
        .join(",\n");
    format!(
        "{{\n  \"filters\": [\n    {{\n      \"id\": \"form\",\n      \"components\": [\n\
         {body}\n      ]\n    }}\n  ],\n  \"note\":   \"keep   me\"\n}}\n"
    )
}

proptest! {
    /// Property: transform is idempotent on arbitrary input
    #[test]
    fn prop_transform_idempotent(raw in ".*") {
        let once = transform(&raw);
        prop_assert_eq!(transform(&once), once);
    }

    /// Property: output stays inside the identifier alphabet, without edge separators
    #[test]
    fn prop_transform_alphabet(raw in "\\PC*") {
        let name = transform(&raw);
        let alphabet = Regex::new(r"^[a-z0-9_-]*$").unwrap();
        prop_assert!(alphabet.is_match(&name), "bad output {:?}", name);
        prop_assert!(!name.starts_with('-') && !name.ends_with('-'));
        prop_assert!(!name.contains("--"));
    }

    /// Property: names that start with a letter after transform match the full identifier pattern
    #[test]
    fn prop_valid_names_match_identifier_pattern(raw in "[A-Za-z][A-Za-z0-9 _!-]{0,20}") {
        let name = transform(&raw);
        let identifier = Regex::new(r"^[a-z][a-z0-9_-]*$").unwrap();
        prop_assert!(identifier.is_match(&name), "bad identifier {:?}", name);
    }

    /// Property: patching a filter list twice equals patching once
    #[test]
    fn prop_filter_patch_idempotent(
        items in prop::collection::vec("[a-z][a-z-]{0,10}", 0..8),
        name in "[a-z][a-z0-9-]{0,12}",
    ) {
        let doc = filter_doc(&items);
        let anchor = ListAnchor::filter_group("form");

        let (once, _) = patch_list(&doc, &anchor, &name).unwrap();
        let (twice, outcome) = patch_list(&once, &anchor, &name).unwrap();

        prop_assert_eq!(outcome, PatchOutcome::AlreadyPresent);
        prop_assert_eq!(&once, &twice);
        let head_kept = once.starts_with(
            "{\n  \"filters\": [\n    \
             {\n      \"id\": \"form\",\n      \"components\": [",
        );
        let tail_kept =
            once.ends_with("      ]\n    }\n  ],\n  \"note\":   \"keep   me\"\n}\n");
        prop_assert!(head_kept, "leading bytes changed: {:?}", once);
        prop_assert!(tail_kept, "trailing bytes changed: {:?}", once);
    }
}
