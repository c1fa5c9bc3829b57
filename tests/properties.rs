//! Property tests for normalization and armor.

use pass_site::core::{armor, index};
use proptest::prelude::*;

proptest! {
    #[test]
    fn normalize_is_ascii(s in "\\PC*") {
        prop_assert!(index::normalize(&s).is_ascii());
    }

    #[test]
    fn normalize_is_idempotent(s in "\\PC*") {
        let once = index::normalize(&s);
        prop_assert_eq!(index::normalize(&once), once.clone());
    }

    #[test]
    fn normalize_keeps_ascii(s in "[ -~]*") {
        prop_assert_eq!(index::normalize(&s), s);
    }

    #[test]
    fn armor_preserves_bytes(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
        let text = armor::encode("PGP MESSAGE", &data);
        let decoded = armor::decode(&text).unwrap();
        prop_assert_eq!(decoded.data, data);
    }

    #[test]
    fn armor_lines_fit(data in proptest::collection::vec(any::<u8>(), 0..1024)) {
        let text = armor::encode("PGP MESSAGE", &data);
        prop_assert!(text.lines().all(|line| line.len() <= 64 || line.starts_with("-----")));
        prop_assert!(text.ends_with("-----END PGP MESSAGE-----\n"));
    }

    #[test]
    fn entry_recombines(parts in proptest::collection::vec("[a-z0-9.@-]{1,8}", 2..5)) {
        let name = parts.join("/");
        let entry = index::entry(&name);
        prop_assert_eq!(format!("{}/{}", entry.path, entry.username), name);
        prop_assert_eq!(&entry.domain, &parts[parts.len() - 2]);
    }
}
