use proptest::prelude::*;
use slsdep_core::matcher::VersionMatcher;
use slsdep_core::product::{ProductDependency, ProductId};
use slsdep_core::version::{OrderableVersion, SlsVersion, Suffix};
use slsdep_resolver::merger::{merge, merge_all};

fn orderable() -> impl Strategy<Value = OrderableVersion> {
    (0u32..3, 0u32..3, 0u32..3, prop::option::of(1u32..3)).prop_map(|(major, minor, patch, rc)| {
        OrderableVersion {
            major,
            minor,
            patch,
            suffix: match rc {
                Some(rc) => Suffix::ReleaseCandidate { rc, commit: None },
                None => Suffix::Release,
            },
        }
    })
}

fn matcher() -> impl Strategy<Value = VersionMatcher> {
    prop_oneof![
        Just(VersionMatcher::ANY),
        (0u32..3).prop_map(VersionMatcher::major_only),
        (0u32..3, 0u32..3).prop_map(|(major, minor)| VersionMatcher::major_minor(major, minor)),
    ]
}

fn dependency() -> impl Strategy<Value = ProductDependency> {
    (orderable(), matcher(), prop::option::of(orderable())).prop_filter_map(
        "dependency must be valid",
        |(min, max, rec)| {
            ProductDependency::new(
                ProductId::new("com.foo", "bar"),
                SlsVersion::from(min),
                max,
                rec.map(SlsVersion::from),
                false,
            )
            .ok()
        },
    )
}

proptest! {
    #[test]
    fn merge_is_commutative(x in dependency(), y in dependency()) {
        prop_assert_eq!(merge(&x, &y), merge(&y, &x));
    }

    #[test]
    fn merged_range_is_associative(a in dependency(), b in dependency(), c in dependency()) {
        let left = merge(&a, &b).and_then(|ab| merge(&ab, &c));
        let right = merge(&b, &c).and_then(|bc| merge(&a, &bc));
        prop_assert_eq!(left.is_ok(), right.is_ok());
        if let (Ok(left), Ok(right)) = (&left, &right) {
            prop_assert_eq!(left.minimum(), right.minimum());
            prop_assert_eq!(left.maximum(), right.maximum());
        }
    }

    #[test]
    fn merge_is_associative_when_no_maximum_cuts_a_recommendation(
        a in dependency(),
        b in dependency(),
        c in dependency(),
    ) {
        let inputs = [&a, &b, &c];
        prop_assume!(inputs.iter().all(|d| {
            d.recommended()
                .and_then(|r| r.as_orderable())
                .map_or(true, |r| inputs.iter().all(|o| o.maximum().admits(r)))
        }));

        let left = merge(&a, &b).and_then(|ab| merge(&ab, &c));
        let right = merge(&b, &c).and_then(|bc| merge(&a, &bc));
        prop_assert_eq!(left.is_ok(), right.is_ok());
        if let (Ok(left), Ok(right)) = (left, right) {
            prop_assert_eq!(&left, &right);
            prop_assert_eq!(left, merge_all(&a, [&b, &c]).unwrap());
        }
    }

    #[test]
    fn merge_all_ignores_input_order(a in dependency(), b in dependency(), c in dependency()) {
        prop_assert_eq!(merge_all(&a, [&b, &c]), merge_all(&c, [&a, &b]));
        prop_assert_eq!(merge_all(&a, [&b, &c]), merge_all(&b, [&c, &a]));
    }

    #[test]
    fn merge_result_lies_within_both_inputs(x in dependency(), y in dependency()) {
        if let Ok(merged) = merge(&x, &y) {
            let min = merged.minimum().as_orderable().unwrap();
            for input in [&x, &y] {
                prop_assert!(min >= input.minimum().as_orderable().unwrap());
                prop_assert!(merged.maximum() <= input.maximum());
            }
        }
    }

    #[test]
    fn merge_is_idempotent(x in dependency()) {
        let merged = merge(&x, &x).unwrap();
        prop_assert_eq!(merged.minimum(), x.minimum());
        prop_assert_eq!(merged.maximum(), x.maximum());
        prop_assert_eq!(merged.recommended(), Some(x.recommended().unwrap_or(x.minimum())));
        prop_assert_eq!(merge(&merged, &merged).unwrap(), merged);
    }

    #[test]
    fn merged_recommendation_lies_in_range(x in dependency(), y in dependency()) {
        if let Ok(merged) = merge(&x, &y) {
            let rec = merged.recommended().and_then(|r| r.as_orderable()).unwrap();
            prop_assert!(rec >= merged.minimum().as_orderable().unwrap());
            prop_assert!(merged.maximum().admits(rec));
        }
    }
}

#[test]
fn disjoint_major_ranges_fail() {
    let two = ProductDependency::from_strings("com.foo", "bar", "2.0.0", "2.x.x", None).unwrap();
    let three = ProductDependency::from_strings("com.foo", "bar", "3.0.0", "3.x.x", None).unwrap();
    assert!(matches!(
        merge(&two, &three),
        Err(slsdep_core::error::ConstraintError::DisjointRanges { .. })
    ));
}
