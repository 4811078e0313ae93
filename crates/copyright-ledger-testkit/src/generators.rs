//! Proptest generators for property-based testing.

use proptest::prelude::*;

use copyright_ledger::{Author, Copyright};

/// Generate a non-empty record id.
pub fn record_id() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9_.-]{0,23}".prop_map(String::from)
}

/// Generate a caller identity string.
pub fn caller_id() -> impl Strategy<Value = String> {
    "[a-z]{1,8}(::[A-Za-z=/]{1,12})?".prop_map(String::from)
}

/// Generate a short free-text field.
pub fn text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ',.-]{0,32}".prop_map(String::from)
}

/// Generate a date-like free-text field.
pub fn date() -> impl Strategy<Value = String> {
    prop_oneof![
        "[12][0-9]{3}-[01][0-9]-[0-3][0-9]".prop_map(String::from),
        "[12][0-9]{3}".prop_map(String::from),
        text(),
    ]
}

/// Generate an author with any subset of fields set.
pub fn author() -> impl Strategy<Value = Author> {
    (
        proptest::option::of(text()),
        proptest::option::of(text()),
        proptest::option::of(prop_oneof![
            Just("named".to_string()),
            Just("anonymous".to_string()),
            Just("pseudonymous".to_string()),
        ]),
        proptest::option::of(date()),
        proptest::option::of(date()),
        proptest::option::of(text()),
    )
        .prop_map(
            |(name, contribution, authorship, date_of_birth, date_of_death, nationality)| Author {
                name,
                contribution,
                authorship,
                date_of_birth,
                date_of_death,
                nationality,
            },
        )
}

/// Generate a full record. The creator may be set; the contract ignores it.
pub fn copyright() -> impl Strategy<Value = Copyright> {
    (
        record_id(),
        text(),
        prop::collection::vec(text(), 0..4),
        prop::collection::vec(text(), 0..3),
        prop::collection::vec(author(), 0..4),
        proptest::option::of(date()),
        proptest::option::of(date()),
        proptest::option::of(caller_id()),
    )
        .prop_map(
            |(
                id,
                title,
                alt_titles,
                contributions,
                authors,
                creation_date,
                publication_date,
                creator,
            )| Copyright {
                id,
                title,
                alt_titles,
                contributions,
                authors,
                creation_date,
                publication_date,
                creator,
            },
        )
}

/// Generate records with pairwise distinct ids.
pub fn record_batch(max_len: usize) -> impl Strategy<Value = Vec<Copyright>> {
    prop::collection::btree_set(record_id(), 0..=max_len).prop_flat_map(|ids| {
        let len = ids.len();
        (Just(ids), prop::collection::vec(copyright(), len)).prop_map(|(ids, records)| {
            ids.into_iter()
                .zip(records)
                .map(|(id, record)| Copyright { id, ..record })
                .collect()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use copyright_ledger::{ContractError, Context, CopyrightContract, StaticIdentity};
    use copyright_ledger::store::MemoryLedger;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
    }

    proptest! {
        #[test]
        fn test_create_stamps_caller(record in copyright(), caller in caller_id()) {
            let ledger = MemoryLedger::new();
            let identity = StaticIdentity::new(caller.clone());
            let contract = CopyrightContract::default();

            let stored = runtime().block_on(async {
                let ctx = Context::new(&ledger, &identity);
                contract.create(&ctx, record.clone()).await?;
                contract.read(&ctx, &record.id).await
            }).unwrap();

            prop_assert_eq!(stored, record.stamped(caller));
        }

        #[test]
        fn test_duplicate_create_is_inert(
            first in copyright(),
            second in copyright(),
            a in caller_id(),
            b in caller_id(),
        ) {
            let second = Copyright { id: first.id.clone(), ..second };
            let ledger = MemoryLedger::new();
            let contract = CopyrightContract::default();
            let (a, b) = (StaticIdentity::new(a), StaticIdentity::new(b));

            let (before, result, after) = runtime().block_on(async {
                contract.create(&Context::new(&ledger, &a), first.clone()).await.unwrap();
                let before = contract.read(&Context::new(&ledger, &a), &first.id).await.unwrap();
                let result = contract.create(&Context::new(&ledger, &b), second).await;
                let after = contract.read(&Context::new(&ledger, &a), &first.id).await.unwrap();
                (before, result, after)
            });

            prop_assert!(matches!(result, Err(ContractError::AlreadyExists(_))));
            prop_assert_eq!(before, after);
        }

        #[test]
        fn test_read_all_matches_live_ids(
            batch in record_batch(12),
            mask in prop::collection::vec(any::<bool>(), 12),
        ) {
            let ledger = MemoryLedger::new();
            let identity = StaticIdentity::new("owner");
            let contract = CopyrightContract::default();

            let listed = runtime().block_on(async {
                let ctx = Context::new(&ledger, &identity);
                for record in &batch {
                    contract.create(&ctx, record.clone()).await?;
                }
                for (record, delete) in batch.iter().zip(&mask) {
                    if *delete {
                        contract.delete(&ctx, &record.id).await?;
                    }
                }
                contract.read_all_vec(&ctx).await
            }).unwrap();

            let expected: BTreeSet<String> = batch
                .iter()
                .zip(&mask)
                .filter(|(_, delete)| !**delete)
                .map(|(record, _)| record.id.clone())
                .collect();
            let listed: BTreeSet<String> = listed.into_iter().map(|r| r.id).collect();

            prop_assert_eq!(listed, expected);
        }
    }
}
