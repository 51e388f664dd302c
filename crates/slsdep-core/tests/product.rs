use slsdep_core::error::ConstraintError;
use slsdep_core::matcher::VersionMatcher;
use slsdep_core::product::{ProductDependency, ProductId};
use slsdep_core::version::SlsVersion;

fn reason(err: ConstraintError) -> String {
    match err {
        ConstraintError::InvalidDependency { reason, .. } => reason,
        other => panic!("expected InvalidDependency, got {other:?}"),
    }
}

#[test]
fn valid_dependency_constructs() {
    let dep = ProductDependency::from_strings("com.foo", "bar", "1.2.0", "1.x.x", Some("1.5.0")).unwrap();
    assert_eq!(dep.id(), &ProductId::new("com.foo", "bar"));
    assert_eq!(dep.minimum().to_string(), "1.2.0");
    assert_eq!(dep.maximum().to_string(), "1.x.x");
    assert_eq!(dep.recommended().unwrap().to_string(), "1.5.0");
    assert!(!dep.is_optional());
}

#[test]
fn minimum_equal_to_maximum_is_rejected() {
    let err = ProductDependency::from_strings("com.foo", "bar", "1.2.3", "1.2.3", None).unwrap_err();
    assert!(reason(err).contains("must differ"));
}

#[test]
fn minimum_above_maximum_is_rejected() {
    let err = ProductDependency::from_strings("com.foo", "bar", "2.0.0", "1.x.x", None).unwrap_err();
    assert!(reason(err).contains("greater than maximum"));
}

#[test]
fn minimum_below_pinned_minor_is_a_valid_range() {
    let dep = ProductDependency::from_strings("com.foo", "bar", "1.1.0", "1.2.x", None);
    assert!(dep.is_ok());
}

#[test]
fn recommended_below_minimum_is_rejected() {
    let err =
        ProductDependency::from_strings("com.foo", "bar", "1.2.0", "1.x.x", Some("1.1.0")).unwrap_err();
    assert!(reason(err).contains("lower than minimum"));
}

#[test]
fn recommended_above_maximum_is_rejected() {
    let err =
        ProductDependency::from_strings("com.foo", "bar", "1.2.0", "1.x.x", Some("2.0.0")).unwrap_err();
    assert!(reason(err).contains("greater than maximum"));
}

#[test]
fn missing_group_or_name_is_rejected() {
    let err = ProductDependency::from_strings("", "bar", "1.0.0", "1.x.x", None).unwrap_err();
    assert!(reason(err).contains("group must not be empty"));
    let err = ProductDependency::from_strings("com.foo", "", "1.0.0", "1.x.x", None).unwrap_err();
    assert!(reason(err).contains("name must not be empty"));
}

#[test]
fn whitespace_in_name_is_rejected() {
    let err = ProductDependency::from_strings("com.foo", "b ar", "1.0.0", "1.x.x", None).unwrap_err();
    assert!(reason(err).contains("whitespace"));
}

#[test]
fn non_orderable_minimum_is_bounded_by_its_release_triple() {
    let build = |min: &str, max: &str| {
        ProductDependency::new(
            ProductId::new("com.foo", "bar"),
            SlsVersion::parse(min).unwrap(),
            VersionMatcher::parse(max).unwrap(),
            None,
            false,
        )
    };
    assert!(build("1.4.0-foo.dirty", "1.x.x").is_ok());
    assert!(build("1.2.0.dirty", "1.2.x").is_ok());

    let err = build("3.0.0.dirty", "1.x.x").unwrap_err();
    assert!(reason(err).contains("minimum version 3.0.0.dirty is greater than maximum version 1.x.x"));
}

#[test]
fn non_orderable_recommended_is_bounded_by_its_release_triple() {
    let ok = ProductDependency::from_strings("com.foo", "bar", "1.0.0", "1.x.x", Some("1.3.0-foo.dirty"));
    assert!(ok.is_ok());

    let err = ProductDependency::from_strings("com.foo", "bar", "1.0.0", "1.x.x", Some("2.0.0-foo.dirty"))
        .unwrap_err();
    assert!(reason(err).contains("greater than maximum version 1.x.x"));
}

#[test]
fn invalid_version_strings_surface_parse_errors() {
    assert_eq!(
        ProductDependency::from_strings("com.foo", "bar", "one", "1.x.x", None),
        Err(ConstraintError::InvalidVersion("one".to_string()))
    );
    assert_eq!(
        ProductDependency::from_strings("com.foo", "bar", "1.0.0", "1.*", None),
        Err(ConstraintError::InvalidMatcher("1.*".to_string()))
    );
}

#[test]
fn declared_keeps_explicit_maximum() {
    let dep = ProductDependency::declared("com.foo", "bar", "1.2.0", Some("1.4.x"), None).unwrap();
    assert_eq!(dep.maximum().to_string(), "1.4.x");
}
