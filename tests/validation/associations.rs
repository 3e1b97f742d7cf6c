//! Findings for product links: link counts, link cardinalities against the
//! policy association, and validity windows of link targets.

use std::sync::Arc;

use ipsmodel::declaration::{
    AssociationDeclaration, ClassId, DeclarationRegistry, Getter, Setter, TypeDeclaration,
};
use ipsmodel::foundation::{Cardinality, CardinalityRange};
use ipsmodel::model::ModelRegistry;
use ipsmodel::runtime::{
    InMemoryRepository, InvalidObject, MessageList, ObjectProperty, ProductComponent, ProductLink,
    ValidationContext,
};
use ipsmodel::validation::{codes, validate_product_association};

use crate::fixture::{
    coverage_type_class, coverage_type_component, date, home_product_class,
    home_product_component, registry,
};
use crate::{only_finding, validate};

fn home_with_links(links: &[(&str, CardinalityRange)]) -> ProductComponent {
    let registry = registry();
    let coverage_types = registry
        .product_cmpt_type(home_product_class())
        .unwrap()
        .association("coverageType")
        .unwrap();
    let mut component = home_product_component("Home 2024");
    for (target, cardinality) in links {
        coverage_types
            .add_link(&mut component, None, ProductLink::new(target, *cardinality))
            .unwrap();
    }
    component
}

fn link_property(target: &str, property: &str) -> ObjectProperty {
    ObjectProperty::new(
        InvalidObject::Link {
            source: "Home 2024".into(),
            association: "coverageType".to_string(),
            target: target.into(),
        },
        property,
    )
}

// =============================================================================
// Link Cardinalities
// =============================================================================

#[test]
fn one_link_may_exceed_the_policy_maximum() {
    let component = home_with_links(&[
        ("Fire", CardinalityRange::bounded(1, 2)),
        ("Storm", CardinalityRange::bounded(1, 2)),
        ("Flood", CardinalityRange::bounded(1, 2)),
        ("Theft", CardinalityRange::bounded(1, 3)),
    ]);
    let list = validate(&component, &ValidationContext::default());

    let message = only_finding(&list);
    assert_eq!(message.code, codes::MAX_CARDINALITY_EXCEEDS_MODEL_MAX);
    assert_eq!(
        message.invalid_properties,
        vec![link_property("Theft", codes::PROPERTY_MAX_CARDINALITY)]
    );
}

#[test]
fn links_within_the_policy_bounds() {
    let component = home_with_links(&[
        ("Fire", CardinalityRange::bounded(1, 2)),
        ("Storm", CardinalityRange::bounded(0, 3)),
    ]);
    assert!(validate(&component, &ValidationContext::default()).is_empty());
}

#[test]
fn optional_single_link_falls_below_the_policy_minimum() {
    let component = home_with_links(&[("Fire", CardinalityRange::OPTIONAL)]);
    let list = validate(&component, &ValidationContext::default());

    let message = only_finding(&list);
    assert_eq!(message.code, codes::MIN_CARDINALITY_FALLS_BELOW_MODEL_MIN);
    assert_eq!(
        message.invalid_properties,
        vec![link_property("Fire", codes::PROPERTY_MIN_CARDINALITY)]
    );
}

#[test]
fn unbounded_link_exceeds_a_bounded_policy_maximum() {
    let component = home_with_links(&[("Fire", CardinalityRange::at_least(1))]);
    let list = validate(&component, &ValidationContext::default());

    assert!(list.contains_code(codes::MAX_CARDINALITY_EXCEEDS_MODEL_MAX));
    assert!(!list.contains_code(codes::MIN_CARDINALITY_FALLS_BELOW_MODEL_MIN));
}

// =============================================================================
// Validity Windows
// =============================================================================

fn context_with(targets: Vec<ProductComponent>) -> ValidationContext {
    let mut repository = InMemoryRepository::new();
    for target in targets {
        repository.add_component(target);
    }
    ValidationContext::default().with_repository(Arc::new(repository))
}

#[test]
fn target_valid_from_after_source() {
    let component = home_with_links(&[("Fire", CardinalityRange::MANDATORY)]);
    let context = context_with(vec![coverage_type_component("Fire", date(2024, 6, 1))]);
    let list = validate(&component, &context);

    let message = only_finding(&list);
    assert_eq!(message.code, codes::TARGET_VALID_FROM_AFTER_SOURCE);
    assert_eq!(
        message.invalid_properties,
        vec![link_property("Fire", codes::PROPERTY_VALID_FROM)]
    );
    assert!(message.text.contains("2024-06-01"), "{}", message.text);
}

#[test]
fn target_valid_to_before_unbounded_source() {
    let component = home_with_links(&[("Fire", CardinalityRange::MANDATORY)]);
    let target = coverage_type_component("Fire", date(2024, 1, 1)).with_valid_to(date(2030, 12, 31));
    let list = validate(&component, &context_with(vec![target]));

    let message = only_finding(&list);
    assert_eq!(message.code, codes::TARGET_VALID_TO_BEFORE_SOURCE);
    assert_eq!(
        message.invalid_properties,
        vec![link_property("Fire", codes::PROPERTY_VALID_TO)]
    );
}

#[test]
fn unknown_targets_are_skipped() {
    let component = home_with_links(&[("Fire", CardinalityRange::MANDATORY)]);
    let context = context_with(vec![coverage_type_component("Storm", date(2025, 1, 1))]);
    assert!(validate(&component, &context).is_empty());
}

// =============================================================================
// Link Counts
// =============================================================================

#[derive(Debug, Default)]
struct Bundle {
    parts: Vec<ProductLink>,
}

fn bundle_registry() -> ModelRegistry {
    let declarations = DeclarationRegistry::new()
        .with(
            TypeDeclaration::product(ClassId::of::<Bundle>(), "Bundle").with_association(
                AssociationDeclaration::new("part", coverage_type_class())
                    .with_plural_name("parts")
                    .with_cardinality(1, Cardinality::Bounded(2))
                    .with_link_accessors(
                        Getter::typed::<Bundle>("getLinksForParts", |bundle| bundle.parts.clone()),
                        Setter::typed::<Bundle>("addPart", |bundle, link| {
                            bundle.parts.push(link);
                            Ok(())
                        }),
                        Setter::typed::<Bundle>("removePart", |bundle, target: Arc<str>| {
                            bundle.parts.retain(|link| link.target != target);
                            Ok(())
                        }),
                    ),
            )
            .with_association(
                AssociationDeclaration::new("option", coverage_type_class())
                    .with_plural_name("options")
                    .with_cardinality(1, Cardinality::Bounded(2)),
            ),
        )
        .expect("unique class");
    ModelRegistry::new(declarations)
}

fn bundle_component(parts: &[&str]) -> ProductComponent {
    ProductComponent::new(
        "Bundle 2024",
        date(2024, 1, 1),
        Bundle {
            parts: parts
                .iter()
                .map(|target| ProductLink::new(target, CardinalityRange::MANDATORY))
                .collect(),
        },
    )
}

fn count_findings(parts: &[&str]) -> MessageList {
    let registry = bundle_registry();
    let association = registry
        .product_cmpt_type(ClassId::of::<Bundle>())
        .unwrap()
        .association("parts")
        .unwrap();
    let component = bundle_component(parts);
    let mut list = MessageList::new();
    validate_product_association(
        &mut list,
        &ValidationContext::default(),
        &association,
        &component,
        None,
    )
    .unwrap();
    list
}

#[test]
fn link_counts() {
    let object = ObjectProperty::new(InvalidObject::ProductComponent("Bundle 2024".into()), "part");

    let too_few = count_findings(&[]);
    assert_eq!(only_finding(&too_few).code, codes::MIN_CARDINALITY_NOT_REACHED);
    assert_eq!(only_finding(&too_few).invalid_properties, vec![object.clone()]);

    assert!(count_findings(&["a", "b"]).is_empty());

    let too_many = count_findings(&["a", "b", "c"]);
    assert_eq!(only_finding(&too_many).code, codes::MAX_CARDINALITY_EXCEEDED);
    assert_eq!(only_finding(&too_many).invalid_properties, vec![object]);
}

#[test]
fn associations_without_links_getter_are_not_counted() {
    let registry = bundle_registry();
    let options = registry
        .product_cmpt_type(ClassId::of::<Bundle>())
        .unwrap()
        .association("options")
        .unwrap();
    let component = bundle_component(&[]);

    let mut list = MessageList::new();
    validate_product_association(
        &mut list,
        &ValidationContext::default(),
        &options,
        &component,
        None,
    )
    .unwrap();
    assert!(list.is_empty());
    assert!(options.links(&component, None).unwrap_err().is_configuration());
}
