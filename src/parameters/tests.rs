use super::*;
use crate::error::{ConversionError, Diagnostic};
use crate::field::Duration;
use crate::registry::TypeRegistry;

fn node(values: &[(&str, &str)]) -> ConfigNode {
    ConfigNode::with_values("PARAMETER", values.iter().copied())
}

#[test]
fn vessel_group_defaults() {
    let reg = TypeRegistry::default();
    let ctx = LoadContext::new(&reg);
    let factory = VesselParameterGroupFactory::load(&node(&[("type", "VesselParameterGroup")]), &ctx).unwrap();

    assert_eq!(factory.base.name, "VesselParameterGroup");
    assert!(!factory.base.optional);
    assert!(factory.duration.is_unlimited());
    assert_eq!(factory.define, None);
    assert!(factory.vessels.is_empty());
}

#[test]
fn vessel_group_generates_from_loaded_fields() {
    let reg = TypeRegistry::default();
    let ctx = LoadContext::new(&reg);
    let n = node(&[
        ("type", "VesselParameterGroup"),
        ("title", "Dock the two stations"),
        ("duration", "3600"),
        ("define", "DockedStation"),
        ("vessel", "Station Alpha"),
        ("vessel", "Station Beta"),
    ]);
    let factory = load(&n, &ctx).unwrap();

    let generated = factory.generate(&Contract::new("StationLink"));
    assert_eq!(
        generated,
        Parameter::VesselGroup(VesselParameterGroup {
            contract: "StationLink".into(),
            title: Some("Dock the two stations".into()),
            define: Some("DockedStation".into()),
            vessels: vec!["Station Alpha".into(), "Station Beta".into()],
            duration: 3600.0,
        })
    );

    // Generating twice gives two equal, independent parameters.
    assert_eq!(factory.generate(&Contract::new("StationLink")), generated);
}

// `duration = 0.0` and an absent duration both load as the unlimited sentinel.
#[test]
fn explicit_zero_duration_collapses_into_the_default() {
    let reg = TypeRegistry::default();
    let ctx = LoadContext::new(&reg);
    let explicit =
        VesselParameterGroupFactory::load(&node(&[("type", "VesselParameterGroup"), ("duration", "0.0")]), &ctx)
            .unwrap();
    let absent = VesselParameterGroupFactory::load(&node(&[("type", "VesselParameterGroup")]), &ctx).unwrap();

    assert_eq!(explicit.duration, Duration::UNLIMITED);
    assert_eq!(explicit, absent);
}

#[test]
fn vessel_group_reports_all_bad_fields() {
    let reg = TypeRegistry::default();
    let ctx = LoadContext::new(&reg);
    let n = node(&[("type", "VesselParameterGroup"), ("duration", "-5"), ("optional", "maybe")]);

    let err = load(&n, &ctx).unwrap_err();
    let fields: Vec<_> = err.diagnostics.iter().filter_map(Diagnostic::field).collect();
    assert_eq!(fields, vec!["optional", "duration"]);
}

#[test]
fn duration_requires_a_positive_duration() {
    let reg = TypeRegistry::default();
    let ctx = LoadContext::new(&reg);

    let err = DurationFactory::load(&node(&[("type", "Duration")]), &ctx).unwrap_err();
    assert!(matches!(&err.diagnostics[..], [Diagnostic::MissingField { field, .. }] if field == "duration"));

    let err = DurationFactory::load(&node(&[("type", "Duration"), ("duration", "0")]), &ctx).unwrap_err();
    assert!(matches!(
        &err.diagnostics[..],
        [Diagnostic::Conversion { reason: ConversionError::Custom(_), .. }]
    ));

    let n = node(&[("type", "Duration"), ("name", "wait"), ("duration", "120"), ("waitingText", "Hold still")]);
    let factory = load(&n, &ctx).unwrap();
    assert_eq!(factory.base().name, "wait");
    match factory.generate(&Contract::new("Hold")) {
        Parameter::Duration(p) => {
            assert_eq!(p.duration, 120.0);
            assert_eq!(p.waiting_text.as_deref(), Some("Hold still"));
            assert_eq!(p.pre_wait_text, None);
        }
        other => panic!("expected a duration parameter, got {other:?}"),
    }
}

#[test]
fn unknown_parameter_type_is_reported() {
    let reg = TypeRegistry::default();
    let ctx = LoadContext::new(&reg);
    let err = load(&node(&[("type", "ReachSpace")]), &ctx).unwrap_err();
    assert!(matches!(&err.diagnostics[..], [Diagnostic::Invalid { message, .. }] if message.contains("ReachSpace")));
    assert!(catalog().iter().any(|kind| kind.name == "VesselParameterGroup"));
}
