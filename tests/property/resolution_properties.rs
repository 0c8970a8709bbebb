// ==========================================
// 用量解析性质测试
// ==========================================

use proptest::prelude::*;
use quantity_resolution_engine::domain::{
    Confidence, ManualOverride, MaterialEntry, MaterialItem, QuantityResolverInput,
    ResolutionMethod, ResolvedBy, ResolverVersion,
};
use quantity_resolution_engine::engine::{infer_category, BatchResolver, QuantityResolver};

const NAMES: &[&str] = &[
    "ceramic tile",
    "porcelain tiles",
    "grout",
    "interior paint",
    "laminate flooring",
    "asphalt shingles",
    "xyz-unknown-stuff",
    "custom trim kit",
    "",
];

fn material_name() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(NAMES).prop_map(|s| s.to_string()),
        "[a-zA-Z -]{0,24}",
    ]
}

proptest! {
    #[test]
    fn gross_is_integer_and_not_below_net(
        name in material_name(),
        value in 0.0f64..1_000_000.0,
        waste in 0.0f64..=100.0,
        area_driven in any::<bool>(),
        v1 in any::<bool>(),
    ) {
        let base = if area_driven {
            QuantityResolverInput::area(&name, value, "sq_ft")
        } else {
            QuantityResolverInput::quantity(&name, value, "unit")
        };
        let input = base.with_waste_percent(waste);
        let version = if v1 { ResolverVersion::V1 } else { ResolverVersion::V2 };

        let out = QuantityResolver::default().resolve(&input, version);
        if out.success {
            let net = out.resolved_quantity.unwrap();
            let gross = out.gross_quantity.unwrap();
            prop_assert!(net >= 0.0);
            prop_assert!(gross >= net, "gross {} < net {}", gross, net);
            prop_assert_eq!(gross.fract(), 0.0);
            prop_assert!(!out.calculation_trace.is_empty());
        } else {
            prop_assert_eq!(out.confidence, Confidence::Low);
            prop_assert!(out.error.is_some());
        }
    }

    #[test]
    fn v1_is_always_medium_passthrough(name in material_name(), value in 0.0f64..10_000.0) {
        let out = QuantityResolver::default()
            .resolve(&QuantityResolverInput::quantity(&name, value, "unit"), ResolverVersion::V1);
        prop_assert!(out.success);
        prop_assert_eq!(out.resolution_method, Some(ResolutionMethod::Passthrough));
        prop_assert_eq!(out.confidence, Confidence::Medium);
    }

    #[test]
    fn infer_category_is_deterministic(name in ".{0,40}") {
        prop_assert_eq!(infer_category(&name), infer_category(&name));
    }

    #[test]
    fn batch_partitions_every_item(
        names in prop::collection::vec(material_name(), 0..20),
        base_area in 0.0f64..5_000.0,
    ) {
        let resolver = QuantityResolver::default();
        let count = names.len();
        let materials: Vec<MaterialItem> = names.iter().map(|n| MaterialItem::new(n)).collect();

        let result = BatchResolver::new(&resolver)
            .resolve_materials_batch(materials, base_area, None, ResolverVersion::V2);

        prop_assert_eq!(result.resolved.len() + result.failed.len(), count);
        let expected_summary = format!("{} of {} materials resolved.", result.resolved.len(), count);
        prop_assert_eq!(result.summary, expected_summary);
    }

    #[test]
    fn overrides_never_recomputed(
        names in prop::collection::vec(material_name(), 1..10),
        override_mask in prop::collection::vec(any::<bool>(), 10),
        quantity in 0.0f64..500.0,
    ) {
        let resolver = QuantityResolver::default();
        let entries: Vec<MaterialEntry> = names
            .iter()
            .zip(override_mask.iter())
            .map(|(n, &ov)| {
                let entry = MaterialEntry::from_item(MaterialItem::new(n));
                if ov {
                    let manual = ManualOverride::at(quantity, "unit", "prop", ResolvedBy::User, chrono::Utc::now()).unwrap();
                    entry.attach_override(manual)
                } else {
                    entry
                }
            })
            .collect();

        let result = BatchResolver::new(&resolver)
            .resolve_entries(entries.clone(), 100.0, None, ResolverVersion::V2);

        prop_assert_eq!(result.entries.len(), entries.len());
        for (before, after) in entries.iter().zip(result.entries.iter()) {
            if before.is_override() {
                prop_assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn clearing_override_reproduces_first_resolution(
        names in prop::collection::vec(material_name(), 1..8),
        base_area in 0.0f64..5_000.0,
        waste in 0.0f64..=100.0,
    ) {
        let resolver = QuantityResolver::default();
        let batch = BatchResolver::new(&resolver);
        let entries: Vec<MaterialEntry> = names
            .iter()
            .map(|n| MaterialEntry::from_item(MaterialItem::new(n)))
            .collect();

        let first = batch.resolve_entries(entries, base_area, Some(waste), ResolverVersion::V2);
        let manual = ManualOverride::at(1.0, "unit", "prop", ResolvedBy::Owner, chrono::Utc::now()).unwrap();
        let cleared: Vec<MaterialEntry> = first
            .entries
            .iter()
            .cloned()
            .map(|e| e.attach_override(manual.clone()).clear_override())
            .collect();
        let again = batch.resolve_entries(cleared, base_area, Some(waste), ResolverVersion::V2);

        for (a, b) in first.entries.iter().zip(again.entries.iter()) {
            prop_assert_eq!(a.item().gross_quantity, b.item().gross_quantity);
            prop_assert_eq!(a.item().resolution_method, b.item().resolution_method);
        }
    }
}
