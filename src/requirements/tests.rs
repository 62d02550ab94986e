use super::*;
use crate::error::Diagnostic;
use crate::localization::{NoLocalization, StringTable};
use crate::registry::{CompiledType, ContractTarget, ContractTypeRef, DeclarativeType};

fn registry() -> TypeRegistry {
    TypeRegistry::builder()
        .declarative(DeclarativeType::new("Rescue", "Rescue a stranded kerbal"))
        .declarative(DeclarativeType::new("Orbit", "Reach orbit").invalid())
        .compiled(CompiledType::new("Contracts.Templates.VesselDestroyed"))
        .compiled(CompiledType::new("Contracts.Templates.PartTest"))
        .build()
        .unwrap()
}

fn node(values: &[(&str, &str)]) -> ConfigNode {
    ConfigNode::with_values("REQUIREMENT", values.iter().copied())
}

fn record(type_name: &str, tags: &[&str], state: ContractStates) -> ContractRecord {
    ContractRecord { type_name: type_name.into(), tags: tags.iter().map(|t| t.to_string()).collect(), state }
}

#[test]
fn omitted_counts_take_their_defaults() {
    let reg = registry();
    let ctx = LoadContext::new(&reg);
    let n = node(&[("type", "CompleteContract"), ("contractType", "RescueKerbal")]);

    let check = ContractCheck::load(&n, &ctx, CheckKind::Complete).unwrap();
    assert_eq!(check.min_count, 1);
    assert_eq!(check.max_count, u32::MAX);
    assert!(check.base.check_on_active_contract);
    assert!(!check.base.invert);
    assert_eq!(check.base.name, "CompleteContract");
    assert_eq!(check.target, ContractTarget::Type(ContractTypeRef::Declarative("RescueKerbal".into())));
}

#[test]
fn one_load_reports_every_independent_error() {
    let reg = registry();
    let ctx = LoadContext::new(&reg);
    let n = node(&[("minCount", "abc"), ("checkOnActiveContract", "sometimes")]);

    let err = ContractCheck::load(&n, &ctx, CheckKind::Complete).unwrap_err();
    let fields: Vec<_> = err.diagnostics.iter().filter_map(Diagnostic::field).collect();
    assert_eq!(fields, vec!["type", "checkOnActiveContract", "contractType", "minCount"]);
}

#[test]
fn unresolvable_contract_type_fails_the_load() {
    let reg = registry();
    let ctx = LoadContext::new(&reg);
    let n = node(&[("type", "CompleteContract"), ("name", "needs-sat"), ("contractType", "Satellite")]);

    let err = ContractCheck::load(&n, &ctx, CheckKind::Complete).unwrap_err();
    assert_eq!(
        err.diagnostics,
        vec![Diagnostic::UnresolvedIdentifier { owner: "needs-sat".into(), identifier: "Satellite".into() }]
    );
}

#[test]
fn tag_takes_precedence_over_contract_type() {
    let reg = registry();
    let ctx = LoadContext::new(&reg);
    let n = node(&[("type", "AcceptContract"), ("tag", "rescue"), ("contractType", "!!not a type!!")]);

    let check = ContractCheck::load(&n, &ctx, CheckKind::Accept).unwrap();
    assert_eq!(check.target, ContractTarget::Tag("rescue".into()));
}

#[test]
fn min_count_above_max_count_is_rejected() {
    let reg = registry();
    let ctx = LoadContext::new(&reg);
    let n = node(&[("type", "CompleteContract"), ("contractType", "PartTest"), ("minCount", "3"), ("maxCount", "2")]);

    let err = ContractCheck::load(&n, &ctx, CheckKind::Complete).unwrap_err();
    assert_eq!(err.diagnostics.len(), 1);
    assert!(matches!(&err.diagnostics[0], Diagnostic::Invalid { message, .. } if message.contains("minCount")));
}

#[test]
fn save_then_load_reproduces_the_check() {
    let reg = registry();
    let ctx = LoadContext::new(&reg);
    let n = node(&[
        ("type", "CompleteContract"),
        ("minCount", "2"),
        ("maxCount", "5"),
        ("checkOnActiveContract", "false"),
        ("contractType", "VesselDestroyed"),
    ]);
    let original = ContractCheck::load(&n, &ctx, CheckKind::Complete).unwrap();

    let mut saved = ConfigNode::new("REQUIREMENT");
    original.on_save(&mut saved);
    assert_eq!(saved.get_value("contractType"), Some("VesselDestroyed"));
    assert!(!saved.has_value("tag"));

    let restored =
        ContractCheck::on_load(&saved, &ctx, CheckKind::Complete, RequirementBase::new("CompleteContract")).unwrap();
    assert_eq!(restored.min_count, 2);
    assert_eq!(restored.max_count, 5);
    assert!(!restored.base.check_on_active_contract);
    match &restored.target {
        ContractTarget::Type(ty) => assert_eq!(ty.identifier(), "VesselDestroyed"),
        other => panic!("expected a contract type, got {other:?}"),
    }
    assert_eq!(restored.target, original.target);
}

#[test]
fn compiled_type_under_an_alias_survives_save_and_load() {
    let reg = TypeRegistry::builder()
        .compiled_as("Contracts.Templates.PartTest", CompiledType::new("Contracts.Templates.PartTest"))
        .build()
        .unwrap();
    let ctx = LoadContext::new(&reg);
    let n = node(&[("type", "CompleteContract"), ("contractType", "Contracts.Templates.PartTest")]);
    let original = ContractCheck::load(&n, &ctx, CheckKind::Complete).unwrap();

    let mut saved = ConfigNode::new("REQUIREMENT");
    original.on_save(&mut saved);
    assert_eq!(saved.get_value("contractType"), Some("Contracts.Templates.PartTest"));

    let restored =
        ContractCheck::on_load(&saved, &ctx, CheckKind::Complete, RequirementBase::new("CompleteContract")).unwrap();
    assert_eq!(restored.target, original.target);

    // Titles and record matching still use the bare name.
    assert_eq!(restored.contract_title(&reg, &NoLocalization), "PartTest");
    assert!(restored.matches(&record("PartTest", &[], ContractStates::COMPLETED)));
}

#[test]
fn saved_tag_skips_type_resolution_on_load() {
    let reg = registry();
    let ctx = LoadContext::new(&reg);
    let saved = node(&[("minCount", "1"), ("maxCount", "1"), ("tag", "rescue"), ("contractType", "Satellite")]);

    let restored =
        ContractCheck::on_load(&saved, &ctx, CheckKind::Accept, RequirementBase::new("AcceptContract")).unwrap();
    assert_eq!(restored.target, ContractTarget::Tag("rescue".into()));
}

#[test]
fn counts_are_mandatory_when_restoring() {
    let reg = registry();
    let ctx = LoadContext::new(&reg);
    let saved = node(&[("contractType", "PartTest")]);

    let err = ContractCheck::on_load(&saved, &ctx, CheckKind::Complete, RequirementBase::new("CompleteContract"))
        .unwrap_err();
    let fields: Vec<_> = err.diagnostics.iter().filter_map(Diagnostic::field).collect();
    assert_eq!(fields, vec!["minCount", "maxCount"]);
}

#[test]
fn catalog_round_trip_keeps_base_fields() {
    let reg = registry();
    let ctx = LoadContext::new(&reg);
    let n = node(&[
        ("type", "AcceptContract"),
        ("name", "had-rescue"),
        ("invertRequirement", "true"),
        ("tag", "rescue"),
        ("maxCount", "3"),
    ]);
    let loaded = load(&n, &ctx).unwrap();

    let mut saved = ConfigNode::new("REQUIREMENT");
    save(loaded.as_ref(), &mut saved);
    assert_eq!(saved.get_value("type"), Some("AcceptContract"));

    let restored = restore(&saved, &ctx).unwrap();
    assert_eq!(restored.base(), loaded.base());

    let mut resaved = ConfigNode::new("REQUIREMENT");
    save(restored.as_ref(), &mut resaved);
    assert_eq!(resaved, saved);
}

#[test]
fn unknown_or_missing_type_is_reported() {
    let reg = registry();
    let ctx = LoadContext::new(&reg);

    let err = load(&node(&[("type", "Teleport")]), &ctx).unwrap_err();
    assert!(matches!(&err.diagnostics[..], [Diagnostic::Invalid { message, .. }] if message.contains("Teleport")));

    let err = load(&node(&[]), &ctx).unwrap_err();
    assert!(matches!(&err.diagnostics[..], [Diagnostic::MissingField { field, .. }] if field == "type"));

    let err = restore(&node(&[("type", "Teleport")]), &ctx).unwrap_err();
    assert_eq!(err.diagnostics.len(), 1);
}

#[test]
fn contract_title_follows_the_fallback_chain() {
    let reg = registry();
    let ctx = LoadContext::new(&reg);
    let strings: StringTable = [("#cc.contracttag.OfType.rescue", "rescue contracts")].into_iter().collect();
    let title = |values: &[(&str, &str)], localizer: &dyn Localizer| {
        let mut all = vec![("type", "CompleteContract")];
        all.extend_from_slice(values);
        ContractCheck::load(&node(&all), &ctx, CheckKind::Complete).unwrap().contract_title(&reg, localizer)
    };

    assert_eq!(title(&[("tag", "rescue")], &strings), "rescue contracts");
    assert_eq!(title(&[("tag", "rescue")], &NoLocalization), "of type rescue");
    assert_eq!(title(&[("contractType", "Rescue")], &strings), "Rescue a stranded kerbal");
    // Suffixed identifiers have no exact valid type; neither do invalid types.
    assert_eq!(title(&[("contractType", "RescueKerbal")], &strings), "RescueKerbal");
    assert_eq!(title(&[("contractType", "Orbit")], &strings), "Orbit");
    assert_eq!(title(&[("contractType", "PartTest")], &strings), "PartTest");
}

#[test]
fn requirement_title_uses_authored_title_first() {
    let reg = registry();
    let ctx = LoadContext::new(&reg);

    let n = node(&[("type", "CompleteContract"), ("contractType", "PartTest"), ("minCount", "2")]);
    let req = load(&n, &ctx).unwrap();
    assert_eq!(req.title(&reg, &NoLocalization), "Must have completed at least 2 contract(s): PartTest");

    let n = node(&[("type", "CompleteContract"), ("contractType", "PartTest"), ("title", "Test two parts")]);
    let req = load(&n, &ctx).unwrap();
    assert_eq!(req.title(&reg, &NoLocalization), "Test two parts");
}

#[test]
fn requirement_title_describes_unbounded_counts() {
    let reg = registry();
    let ctx = LoadContext::new(&reg);
    let title = |values: &[(&str, &str)]| {
        let mut all = vec![("type", "CompleteContract"), ("contractType", "PartTest")];
        all.extend_from_slice(values);
        load(&node(&all), &ctx).unwrap().title(&reg, &NoLocalization)
    };

    assert_eq!(title(&[("minCount", "0")]), "Must have completed any number of contract(s): PartTest");
    assert_eq!(title(&[("minCount", "0"), ("maxCount", "4")]), "Must have completed at most 4 contract(s): PartTest");
    assert_eq!(title(&[("minCount", "0"), ("maxCount", "0")]), "Must have completed exactly 0 contract(s): PartTest");
    assert_eq!(
        title(&[("minCount", "1"), ("maxCount", "3")]),
        "Must have completed between 1 and 3 contract(s): PartTest"
    );
}

#[test]
fn check_counts_matching_contracts_within_bounds() {
    let reg = registry();
    let ctx = LoadContext::new(&reg);
    let n = node(&[("type", "CompleteContract"), ("contractType", "PartTest"), ("minCount", "2"), ("maxCount", "3")]);
    let req = load(&n, &ctx).unwrap();

    let mut contracts = vec![
        record("PartTest", &[], ContractStates::COMPLETED),
        record("PartTest", &[], ContractStates::ACTIVE),
        record("VesselDestroyed", &[], ContractStates::COMPLETED),
    ];
    assert!(!check(req.as_ref(), &contracts, false));

    contracts.push(record("PartTest", &[], ContractStates::COMPLETED));
    assert!(check(req.as_ref(), &contracts, false));

    contracts.extend((0..2).map(|_| record("PartTest", &[], ContractStates::COMPLETED)));
    assert!(!check(req.as_ref(), &contracts, false));
}

#[test]
fn accept_counts_active_contracts_by_tag() {
    let reg = registry();
    let ctx = LoadContext::new(&reg);
    let req = load(&node(&[("type", "AcceptContract"), ("tag", "rescue")]), &ctx).unwrap();

    let contracts = vec![record("Rescue", &["rescue"], ContractStates::ACTIVE)];
    assert!(check(req.as_ref(), &contracts, false));
    assert!(!check(req.as_ref(), &[record("Rescue", &["rescue"], ContractStates::OFFERED)], false));
}

#[test]
fn active_parent_and_inversion() {
    let reg = registry();
    let ctx = LoadContext::new(&reg);
    let n = node(&[
        ("type", "CompleteContract"),
        ("contractType", "PartTest"),
        ("checkOnActiveContract", "false"),
        ("invertRequirement", "true"),
    ]);
    let req = load(&n, &ctx).unwrap();

    // Not re-checked while the parent is active.
    assert!(check(req.as_ref(), &[], true));
    // Inverted: met only while no completed PartTest exists.
    assert!(check(req.as_ref(), &[], false));
    assert!(!check(req.as_ref(), &[record("PartTest", &[], ContractStates::COMPLETED)], false));
}
