//! Encoding then decoding gives back the same catalogs

use chrono::{Duration, TimeZone, Utc};
use disc_catalog::store::persistence::{decode_str, encode_to_string};
use disc_catalog::{Catalog, RecoveryPolicy};
use proptest::prelude::*;
use std::path::Path;

fn arb_catalog() -> impl Strategy<Value = Catalog> {
    (
        "\\PC{1,12}",
        prop::collection::vec(("[a-z]{1,3}(/[a-z]{1,3}){0,3}", 0i64..1_000_000, any::<bool>()), 0..20),
    )
        .prop_map(|(name, paths)| {
            let base = Utc.timestamp_opt(1_600_000_000, 0).unwrap();
            let mut catalog = Catalog::new(name, "/");
            catalog.root.timestamp = base;
            for (path, secs, is_dir) in paths {
                let ts = base + Duration::seconds(secs);
                if is_dir {
                    catalog.insert_directory_at(&path, ts).unwrap();
                } else {
                    catalog.insert_file_at(&path, ts).unwrap();
                }
            }
            catalog
        })
}

proptest! {
    #[test]
    fn document_round_trip(catalogs in prop::collection::vec(arb_catalog(), 0..4)) {
        let text = encode_to_string(&catalogs).unwrap();
        let decoded = decode_str(&text, RecoveryPolicy::Fail, Path::new("prop.json")).unwrap();
        prop_assert_eq!(decoded, catalogs);
    }
}
